//! Mock endpoint for form submissions.
//!
//! Static routes always give the same reply; `/submit` follows an
//! [`EndpointScript`]: a number of `progress` replies, then a terminal one.

use std::sync::{
    atomic::{AtomicU32, Ordering},
    Arc, Mutex, MutexGuard,
};

use axum::{extract::State, response::IntoResponse, routing::get, Json, Router};
use serde_json::{json, Value};
use tower_http::cors::CorsLayer;
use tracing::info;

pub const DEFAULT_PROGRESS_TIMEOUT_MS: u64 = 1000;
pub const DEFAULT_ERROR_REASON: &str = "Server is busy, try again later";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TerminalReply {
    Success,
    Error { reason: String },
    /// A status the client is not expected to know
    Status(String),
}

impl TerminalReply {
    fn to_json(&self) -> Value {
        match self {
            TerminalReply::Success => json!({ "status": "success" }),
            TerminalReply::Error { reason } => json!({ "status": "error", "reason": reason }),
            TerminalReply::Status(status) => json!({ "status": status }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointScript {
    /// How many `progress` replies precede the terminal one
    pub progress_replies: u32,
    /// Retry delay sent with `progress`; `None` leaves the field out
    pub progress_timeout_ms: Option<u64>,
    pub terminal: TerminalReply,
}

impl Default for EndpointScript {
    fn default() -> Self {
        Self {
            progress_replies: 0,
            progress_timeout_ms: Some(DEFAULT_PROGRESS_TIMEOUT_MS),
            terminal: TerminalReply::Success,
        }
    }
}

impl EndpointScript {
    pub fn success_after(progress_replies: u32, progress_timeout_ms: u64) -> Self {
        Self {
            progress_replies,
            progress_timeout_ms: Some(progress_timeout_ms),
            terminal: TerminalReply::Success,
        }
    }

    pub fn error_after(progress_replies: u32, progress_timeout_ms: u64, reason: &str) -> Self {
        Self {
            progress_replies,
            progress_timeout_ms: Some(progress_timeout_ms),
            terminal: TerminalReply::Error {
                reason: reason.to_string(),
            },
        }
    }

    /// Send `progress` replies without a `timeout` field
    pub fn without_timeout(mut self) -> Self {
        self.progress_timeout_ms = None;
        self
    }

    fn progress_json(&self) -> Value {
        match self.progress_timeout_ms {
            Some(timeout) => json!({ "status": "progress", "timeout": timeout }),
            None => json!({ "status": "progress" }),
        }
    }
}

struct ScriptRun {
    script: EndpointScript,
    /// Replies given in the current run of the script
    position: u32,
}

#[derive(Clone)]
pub struct SubmitEndpoint {
    run: Arc<Mutex<ScriptRun>>,
    hits: Arc<AtomicU32>,
}

impl SubmitEndpoint {
    pub fn new(script: EndpointScript) -> Self {
        Self {
            run: Arc::new(Mutex::new(ScriptRun {
                script,
                position: 0,
            })),
            hits: Arc::new(AtomicU32::new(0)),
        }
    }

    fn lock_run(&self) -> MutexGuard<'_, ScriptRun> {
        self.run.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Total requests served by the scripted route
    pub fn hits(&self) -> u32 {
        self.hits.load(Ordering::SeqCst)
    }

    /// Replace the script and restart it from the beginning
    pub fn set_script(&self, script: EndpointScript) {
        let mut run = self.lock_run();
        run.script = script;
        run.position = 0;
    }

    fn next_reply(&self) -> Value {
        self.hits.fetch_add(1, Ordering::SeqCst);

        // Read and advance under one lock
        let mut run = self.lock_run();
        let position = run.position;

        if position < run.script.progress_replies {
            run.position += 1;
            info!(position, "Scripted submission still in progress");
            return run.script.progress_json();
        }

        // Terminal reply restarts the script for the next submission
        run.position = 0;
        info!(reply = ?run.script.terminal, "Scripted submission finished");
        run.script.terminal.to_json()
    }

    pub fn router(&self) -> Router {
        Router::new()
            .route("/submit", get(scripted))
            .route("/success.json", get(success))
            .route("/error.json", get(error))
            .route("/progress.json", get(progress))
            .route("/unknown.json", get(unknown))
            .route("/broken", get(broken))
            .layer(CorsLayer::permissive())
            .with_state(self.clone())
    }
}

async fn scripted(State(endpoint): State<SubmitEndpoint>) -> impl IntoResponse {
    Json(endpoint.next_reply())
}

async fn success() -> impl IntoResponse {
    Json(TerminalReply::Success.to_json())
}

async fn error() -> impl IntoResponse {
    Json(
        TerminalReply::Error {
            reason: DEFAULT_ERROR_REASON.to_string(),
        }
        .to_json(),
    )
}

async fn progress(State(endpoint): State<SubmitEndpoint>) -> impl IntoResponse {
    let reply = endpoint.lock_run().script.progress_json();
    Json(reply)
}

async fn unknown() -> impl IntoResponse {
    Json(TerminalReply::Status("queued".to_string()).to_json())
}

async fn broken() -> impl IntoResponse {
    "<html>502 Bad Gateway</html>"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_script_replays_after_terminal_reply() {
        let endpoint = SubmitEndpoint::new(EndpointScript::success_after(2, 10));

        let replies: Vec<Value> = (0..6).map(|_| endpoint.next_reply()).collect();
        let statuses: Vec<&str> = replies
            .iter()
            .map(|r| r["status"].as_str().unwrap())
            .collect();

        assert_eq!(
            statuses,
            vec!["progress", "progress", "success", "progress", "progress", "success"]
        );
        assert_eq!(replies[0]["timeout"], 10);
        assert_eq!(endpoint.hits(), 6);
    }

    #[test]
    fn test_progress_without_timeout() {
        let endpoint = SubmitEndpoint::new(EndpointScript::success_after(1, 10).without_timeout());

        assert_eq!(endpoint.next_reply(), json!({ "status": "progress" }));
        assert_eq!(endpoint.next_reply(), json!({ "status": "success" }));
    }

    #[test]
    fn test_concurrent_polls_follow_the_script() {
        let endpoint = SubmitEndpoint::new(EndpointScript::success_after(3, 10));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let endpoint = endpoint.clone();
                std::thread::spawn(move || endpoint.next_reply())
            })
            .collect();

        let statuses: Vec<String> = handles
            .into_iter()
            .map(|h| h.join().unwrap()["status"].as_str().unwrap().to_string())
            .collect();

        // Two full runs of progress x3 + success, whatever the interleaving
        let successes = statuses.iter().filter(|s| *s == "success").count();
        assert_eq!(successes, 2);
        assert_eq!(statuses.len() - successes, 6);
        assert_eq!(endpoint.hits(), 8);
    }

    #[test]
    fn test_set_script_restarts() {
        let endpoint = SubmitEndpoint::new(EndpointScript::success_after(3, 10));
        assert_eq!(endpoint.next_reply()["status"], "progress");

        endpoint.set_script(EndpointScript::error_after(0, 10, "Nope"));
        let reply = endpoint.next_reply();
        assert_eq!(reply, json!({ "status": "error", "reason": "Nope" }));
    }
}
