use crate::client::RepoInfoClient;
use crate::error::{LoroError, Result};
use crate::models::{LookupQuery, LookupTicket, ViewState};
use crate::view::{LookupOutcome, LookupView};
use ractor::{Actor, ActorProcessingErr, ActorRef, RpcReplyPort};
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

/// Actor that owns a `LookupView` and serialises edits, submissions and
/// lookup completions through its mailbox
pub struct LookupViewActor;

/// State for the lookup view actor
pub struct LookupViewState {
    view: LookupView,
    client: RepoInfoClient,
    in_flight: Option<JoinHandle<()>>,
    settle_waiters: Vec<RpcReplyPort<ViewState>>,
}

/// Messages the lookup view actor can handle
#[derive(Debug)]
pub enum LookupViewMessage {
    EditOwner(String),
    EditRepo(String),
    /// Replies `true` when a request was issued
    Submit(Option<RpcReplyPort<bool>>),
    /// Replies `true` when an in-flight lookup was abandoned
    Cancel(Option<RpcReplyPort<bool>>),
    GetState(RpcReplyPort<ViewState>),
    GetQuery(RpcReplyPort<LookupQuery>),
    /// Replies once the view is no longer loading
    WaitSettled(RpcReplyPort<ViewState>),
    /// Posted by the lookup task when its request finishes
    LookupCompleted {
        ticket: LookupTicket,
        outcome: LookupOutcome,
    },
}

/// Arguments for starting the lookup view actor
pub struct LookupViewArgs {
    pub client: RepoInfoClient,
    pub query: LookupQuery,
}

impl LookupViewActor {
    pub async fn spawn_view(
        client: RepoInfoClient,
        query: LookupQuery,
    ) -> Result<(ActorRef<LookupViewMessage>, JoinHandle<()>)> {
        let args = LookupViewArgs { client, query };
        Actor::spawn(None, LookupViewActor, args)
            .await
            .map_err(|e| LoroError::Actor(format!("Failed to spawn lookup view: {}", e)))
    }
}

#[ractor::async_trait]
impl Actor for LookupViewActor {
    type Msg = LookupViewMessage;
    type State = LookupViewState;
    type Arguments = LookupViewArgs;

    async fn pre_start(
        &self,
        _myself: ActorRef<Self::Msg>,
        args: Self::Arguments,
    ) -> std::result::Result<Self::State, ActorProcessingErr> {
        info!(
            endpoint = %args.client.base_url(),
            owner = %args.query.owner,
            repo = %args.query.repo,
            "Lookup view starting"
        );

        Ok(LookupViewState {
            view: LookupView::new(args.query),
            client: args.client,
            in_flight: None,
            settle_waiters: Vec::new(),
        })
    }

    async fn handle(
        &self,
        myself: ActorRef<Self::Msg>,
        message: Self::Msg,
        state: &mut Self::State,
    ) -> std::result::Result<(), ActorProcessingErr> {
        match message {
            LookupViewMessage::EditOwner(value) => state.view.edit_owner(value),
            LookupViewMessage::EditRepo(value) => state.view.edit_repo(value),
            LookupViewMessage::Submit(reply) => {
                let issued = match state.view.begin_submit() {
                    Some(ticket) => {
                        state.abort_in_flight();
                        state.in_flight = Some(spawn_lookup(myself, state.client.clone(), ticket));
                        true
                    }
                    None => false,
                };
                if let Some(reply) = reply {
                    let _ = reply.send(issued);
                }
            }
            LookupViewMessage::Cancel(reply) => {
                state.abort_in_flight();
                let cancelled = state.view.cancel();
                if cancelled {
                    state.notify_settled();
                }
                if let Some(reply) = reply {
                    let _ = reply.send(cancelled);
                }
            }
            LookupViewMessage::GetState(reply) => {
                let _ = reply.send(state.view.state().clone());
            }
            LookupViewMessage::GetQuery(reply) => {
                let _ = reply.send(state.view.query().clone());
            }
            LookupViewMessage::WaitSettled(reply) => {
                if state.view.is_loading() {
                    state.settle_waiters.push(reply);
                } else {
                    let _ = reply.send(state.view.state().clone());
                }
            }
            LookupViewMessage::LookupCompleted { ticket, outcome } => {
                if state.view.complete(&ticket, outcome) {
                    state.in_flight = None;
                    state.notify_settled();
                }
            }
        }

        Ok(())
    }

    async fn post_stop(
        &self,
        _myself: ActorRef<Self::Msg>,
        state: &mut Self::State,
    ) -> std::result::Result<(), ActorProcessingErr> {
        state.abort_in_flight();
        info!(generation = state.view.generation(), "Lookup view stopped");
        Ok(())
    }
}

impl LookupViewState {
    fn abort_in_flight(&mut self) {
        if let Some(handle) = self.in_flight.take() {
            if !handle.is_finished() {
                debug!("Aborting in-flight lookup");
                handle.abort();
            }
        }
    }

    fn notify_settled(&mut self) {
        for waiter in self.settle_waiters.drain(..) {
            let _ = waiter.send(self.view.state().clone());
        }
    }
}

fn spawn_lookup(
    myself: ActorRef<LookupViewMessage>,
    client: RepoInfoClient,
    ticket: LookupTicket,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let outcome = client.fetch_repo_summary(&ticket.owner, &ticket.repo).await;
        if let Err(e) = myself.send_message(LookupViewMessage::LookupCompleted { ticket, outcome }) {
            error!("Failed to deliver lookup result: {}", e);
        }
    })
}

/// Fetches the current view state
pub async fn current_state(
    view: &ActorRef<LookupViewMessage>,
    timeout: Duration,
) -> Result<ViewState> {
    match view.call(LookupViewMessage::GetState, Some(timeout)).await {
        Ok(ractor::rpc::CallResult::Success(state)) => Ok(state),
        Ok(ractor::rpc::CallResult::Timeout) => {
            Err(LoroError::Actor("Timeout getting view state".to_string()))
        }
        Ok(ractor::rpc::CallResult::SenderError) => {
            Err(LoroError::Actor("Sender error getting view state".to_string()))
        }
        Err(e) => Err(LoroError::Actor(format!("Failed to get view state: {}", e))),
    }
}

/// Submits the current query; `Ok(false)` means no request was issued
pub async fn submit(view: &ActorRef<LookupViewMessage>, timeout: Duration) -> Result<bool> {
    match view
        .call(|reply| LookupViewMessage::Submit(Some(reply)), Some(timeout))
        .await
    {
        Ok(ractor::rpc::CallResult::Success(issued)) => Ok(issued),
        Ok(_) => Err(LoroError::Actor("No reply to submission".to_string())),
        Err(e) => Err(LoroError::Actor(format!("Failed to submit lookup: {}", e))),
    }
}

/// Abandons the in-flight lookup; `Ok(false)` means nothing was loading
pub async fn cancel(view: &ActorRef<LookupViewMessage>, timeout: Duration) -> Result<bool> {
    match view
        .call(|reply| LookupViewMessage::Cancel(Some(reply)), Some(timeout))
        .await
    {
        Ok(ractor::rpc::CallResult::Success(cancelled)) => Ok(cancelled),
        Ok(_) => Err(LoroError::Actor("No reply to cancellation".to_string())),
        Err(e) => Err(LoroError::Actor(format!("Failed to cancel lookup: {}", e))),
    }
}

/// Waits until the view leaves `Loading`. `None` waits indefinitely.
pub async fn wait_settled(
    view: &ActorRef<LookupViewMessage>,
    timeout: Option<Duration>,
) -> Result<ViewState> {
    match view.call(LookupViewMessage::WaitSettled, timeout).await {
        Ok(ractor::rpc::CallResult::Success(state)) => Ok(state),
        Ok(ractor::rpc::CallResult::Timeout) => {
            Err(LoroError::Actor("Timeout waiting for lookup".to_string()))
        }
        Ok(ractor::rpc::CallResult::SenderError) => {
            Err(LoroError::Actor("Lookup view dropped the request".to_string()))
        }
        Err(e) => Err(LoroError::Actor(format!("Failed to wait for lookup: {}", e))),
    }
}
