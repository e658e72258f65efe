use crate::models::{ViewState, DEFAULT_OWNER, DEFAULT_REPO};
use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "loro")]
#[command(about = "Loro - Look up GitHub repository stars, forks and open issues")]
#[command(version)]
pub struct Cli {
    /// Base URL of the repo info endpoint
    #[arg(long, env = "LORO_ENDPOINT", default_value = "http://localhost:3000")]
    pub endpoint: String,

    /// Repository owner
    #[arg(long, env = "LORO_OWNER", default_value = DEFAULT_OWNER)]
    pub owner: String,

    /// Repository name
    #[arg(long, env = "LORO_REPO", default_value = DEFAULT_REPO)]
    pub repo: String,

    /// Request timeout in seconds (none by default)
    #[arg(long, env = "LORO_TIMEOUT_SECS")]
    pub timeout_secs: Option<u64>,

    /// Read owner/repo edits and submissions from stdin
    #[arg(short, long)]
    pub interactive: bool,
}

/// One line of input in an interactive session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    Owner(String),
    Repo(String),
    Submit,
    Cancel,
    Show,
    Help,
    Quit,
    Unknown(String),
}

impl SessionCommand {
    pub fn parse(line: &str) -> Self {
        let line = line.trim_end_matches(['\r', '\n']);
        let trimmed = line.trim_start();
        let (word, rest) = trimmed.split_once(' ').unwrap_or((trimmed, ""));
        let bare = rest.trim().is_empty();

        match word.trim_end() {
            // Edit values are taken verbatim; an empty value clears the field
            "owner" => SessionCommand::Owner(rest.to_string()),
            "repo" => SessionCommand::Repo(rest.to_string()),
            "" | "submit" if bare => SessionCommand::Submit,
            "cancel" if bare => SessionCommand::Cancel,
            "show" if bare => SessionCommand::Show,
            "help" | "?" if bare => SessionCommand::Help,
            "quit" | "exit" if bare => SessionCommand::Quit,
            _ => SessionCommand::Unknown(line.to_string()),
        }
    }
}

pub const SESSION_HELP: &str = "\
Commands:
  owner <name>   set the repository owner
  repo <name>    set the repository name
  submit         fetch info (an empty line does the same)
  cancel         abandon the lookup in flight
  show           print the current view
  quit           leave";

/// Exit status of a one-shot lookup. `None` means the query was not
/// submittable and nothing was requested.
pub fn one_shot_exit_status(settled: Option<&ViewState>) -> u8 {
    match settled {
        None | Some(ViewState::Error(_)) => 1,
        Some(_) => 0,
    }
}
