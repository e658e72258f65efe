pub mod actors;
pub mod cli;
pub mod client;
pub mod error;
pub mod models;
pub mod render;
pub mod types;
pub mod view;
