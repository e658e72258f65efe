use crate::client::RepoInfoClient;
use crate::error::LoroError;
use crate::models::{LookupQuery, LookupTicket, ViewState};
use crate::render::ViewBlock;
use crate::types::RepoSummary;
use tracing::{debug, info, warn};

/// Result of a single lookup as delivered back to the view
pub type LookupOutcome = std::result::Result<RepoSummary, LoroError>;

/// Form state plus the idle/loading/error/success state machine.
///
/// Every started submission bumps `generation`; an outcome is only applied
/// when it carries the current generation, so a superseded request can never
/// overwrite the state of a newer one.
#[derive(Debug, Default)]
pub struct LookupView {
    query: LookupQuery,
    state: ViewState,
    generation: u64,
}

impl LookupView {
    pub fn new(query: LookupQuery) -> Self {
        Self {
            query,
            state: ViewState::Idle,
            generation: 0,
        }
    }

    pub fn query(&self) -> &LookupQuery {
        &self.query
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_loading(&self) -> bool {
        self.state.is_loading()
    }

    pub fn edit_owner(&mut self, value: impl Into<String>) {
        self.query.owner = value.into();
    }

    pub fn edit_repo(&mut self, value: impl Into<String>) {
        self.query.repo = value.into();
    }

    /// Starts a submission. Returns `None` and leaves the state untouched when
    /// either field is empty; otherwise clears any error or summary, enters
    /// `Loading` and hands out the ticket the outcome must be completed with.
    pub fn begin_submit(&mut self) -> Option<LookupTicket> {
        if !self.query.is_submittable() {
            debug!(
                owner = %self.query.owner,
                repo = %self.query.repo,
                "Ignoring submission with an empty field"
            );
            return None;
        }

        self.generation += 1;
        self.state = ViewState::Loading;

        let ticket = LookupTicket {
            generation: self.generation,
            owner: self.query.owner.clone(),
            repo: self.query.repo.clone(),
        };
        info!(
            generation = ticket.generation,
            owner = %ticket.owner,
            repo = %ticket.repo,
            "Lookup submitted"
        );
        Some(ticket)
    }

    /// Applies an outcome. Returns `false` when the ticket was superseded or
    /// cancelled, in which case nothing changes.
    pub fn complete(&mut self, ticket: &LookupTicket, outcome: LookupOutcome) -> bool {
        if ticket.generation != self.generation || !self.state.is_loading() {
            warn!(
                generation = ticket.generation,
                current_generation = self.generation,
                owner = %ticket.owner,
                repo = %ticket.repo,
                "Discarding stale lookup result"
            );
            return false;
        }

        self.state = match outcome {
            Ok(summary) => {
                info!(generation = ticket.generation, name = %summary.name, "Lookup succeeded");
                ViewState::Success(summary)
            }
            Err(e) => {
                warn!(generation = ticket.generation, error = %e, "Lookup failed");
                ViewState::Error(e.to_string())
            }
        };
        true
    }

    /// Abandons the in-flight lookup, if any, and returns to `Idle`.
    pub fn cancel(&mut self) -> bool {
        if !self.state.is_loading() {
            return false;
        }
        self.generation += 1;
        self.state = ViewState::Idle;
        info!(generation = self.generation, "Lookup cancelled");
        true
    }

    /// Runs one submission to completion against `client`. Returns `false`
    /// when the query was not submittable and no request was issued.
    pub async fn submit(&mut self, client: &RepoInfoClient) -> bool {
        let Some(ticket) = self.begin_submit() else {
            return false;
        };
        let outcome = client.fetch_repo_summary(&ticket.owner, &ticket.repo).await;
        self.complete(&ticket, outcome);
        true
    }

    pub fn render(&self) -> ViewBlock {
        ViewBlock::from_state(&self.state)
    }

    pub fn submit_label(&self) -> &'static str {
        if self.is_loading() {
            "Fetching..."
        } else {
            "Fetch Info"
        }
    }
}
