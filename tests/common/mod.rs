#![allow(dead_code)]

use axum::{
    extract::{Path, State},
    http::{header, StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use serde_json::json;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Canned reply for one owner/repo pair
#[derive(Debug, Clone)]
pub struct CannedReply {
    pub status: StatusCode,
    pub body: String,
    pub delay: Duration,
}

impl CannedReply {
    pub fn json(status: StatusCode, body: serde_json::Value) -> Self {
        Self {
            status,
            body: body.to_string(),
            delay: Duration::ZERO,
        }
    }

    pub fn raw(status: StatusCode, body: &str) -> Self {
        Self {
            status,
            body: body.to_string(),
            delay: Duration::ZERO,
        }
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

/// In-process stand-in for the repo info endpoint
#[derive(Clone, Default)]
pub struct FakeEndpoint {
    replies: Arc<Mutex<HashMap<(String, String), CannedReply>>>,
    requests: Arc<Mutex<Vec<String>>>,
}

pub struct TestContext {
    pub endpoint: FakeEndpoint,
    pub base_url: String,
}

impl TestContext {
    pub async fn new() -> anyhow::Result<Self> {
        let endpoint = FakeEndpoint::default();
        let app = Router::new()
            .route("/api/repo/:owner/:repo", get(repo_info))
            .with_state(endpoint.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                eprintln!("Fake endpoint stopped: {}", e);
            }
        });

        Ok(TestContext {
            endpoint,
            base_url: format!("http://{}", addr),
        })
    }

    pub fn reply(&self, owner: &str, repo: &str, reply: CannedReply) {
        self.endpoint
            .replies
            .lock()
            .unwrap()
            .insert((owner.to_string(), repo.to_string()), reply);
    }

    pub fn reply_summary(&self, owner: &str, repo: &str, body: serde_json::Value) {
        self.reply(owner, repo, CannedReply::json(StatusCode::OK, body));
    }

    /// Paths requested so far, in arrival order
    pub fn requests(&self) -> Vec<String> {
        self.endpoint.requests.lock().unwrap().clone()
    }
}

pub fn codereviewer_body() -> serde_json::Value {
    json!({
        "name": "codereviewer",
        "description": "A tool",
        "stargazers_count": 42,
        "forks_count": 3,
        "open_issues_count": 1,
        "html_url": "https://github.com/daresh887/codereviewer"
    })
}

pub fn summary_body(name: &str, stars: u64) -> serde_json::Value {
    json!({
        "name": name,
        "description": format!("{} description", name),
        "stargazers_count": stars,
        "forks_count": 0,
        "open_issues_count": 0,
        "html_url": format!("https://github.com/test/{}", name)
    })
}

async fn repo_info(
    State(endpoint): State<FakeEndpoint>,
    Path((owner, repo)): Path<(String, String)>,
    uri: Uri,
) -> Response {
    endpoint.requests.lock().unwrap().push(uri.path().to_string());

    let reply = endpoint
        .replies
        .lock()
        .unwrap()
        .get(&(owner, repo))
        .cloned()
        .unwrap_or_else(|| {
            CannedReply::json(
                StatusCode::NOT_FOUND,
                json!({ "error": "Repository not found" }),
            )
        });

    if !reply.delay.is_zero() {
        tokio::time::sleep(reply.delay).await;
    }

    (
        reply.status,
        [(header::CONTENT_TYPE, "application/json")],
        reply.body,
    )
        .into_response()
}
