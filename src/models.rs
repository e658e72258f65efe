use crate::types::RepoSummary;

pub const DEFAULT_OWNER: &str = "daresh887";
pub const DEFAULT_REPO: &str = "codereviewer";

/// Owner/repo pair as currently typed into the form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupQuery {
    pub owner: String,
    pub repo: String,
}

impl LookupQuery {
    pub fn new(owner: impl Into<String>, repo: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            repo: repo.into(),
        }
    }

    /// Both fields must be filled in. Whitespace counts as content.
    pub fn is_submittable(&self) -> bool {
        !self.owner.is_empty() && !self.repo.is_empty()
    }
}

impl Default for LookupQuery {
    fn default() -> Self {
        Self::new(DEFAULT_OWNER, DEFAULT_REPO)
    }
}

/// What the lookup view is currently showing
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ViewState {
    #[default]
    Idle,
    Loading,
    Error(String),
    Success(RepoSummary),
}

impl ViewState {
    pub fn is_loading(&self) -> bool {
        matches!(self, ViewState::Loading)
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            ViewState::Error(message) => Some(message),
            _ => None,
        }
    }

    pub fn summary(&self) -> Option<&RepoSummary> {
        match self {
            ViewState::Success(summary) => Some(summary),
            _ => None,
        }
    }
}

/// Issued for every started submission; carries the query snapshot taken at
/// submission time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupTicket {
    pub generation: u64,
    pub owner: String,
    pub repo: String,
}
