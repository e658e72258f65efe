pub mod lookup_view;

pub use lookup_view::{LookupViewActor, LookupViewMessage};
