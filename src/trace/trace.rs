use serde::Serialize;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// One dispatched operation, written as a JSONL line.
#[derive(Debug, Serialize)]
pub struct TraceEvent {
    pub timestamp_ms: u128,

    /// `mutate_text` or `invoke_action`
    pub operation: String,
    pub element_id: String,

    /// Title substring the caller asked for
    pub window: Option<String>,
    /// Title of the window the operation actually ran against
    pub resolved_window: Option<String>,
    pub action: Option<String>,

    pub outcome: Option<String>,
    pub detail: Option<String>,

    pub elapsed_ms: Option<u128>,
}

impl TraceEvent {
    pub fn now(operation: &str, element_id: &str) -> Self {
        Self {
            timestamp_ms: SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_millis())
                .unwrap_or(0),
            operation: operation.to_string(),
            element_id: element_id.to_string(),
            window: None,
            resolved_window: None,
            action: None,
            outcome: None,
            detail: None,
            elapsed_ms: None,
        }
    }

    pub fn with_window(mut self, window: impl ToString) -> Self {
        self.window = Some(window.to_string());
        self
    }

    pub fn with_resolved_window(mut self, title: Option<String>) -> Self {
        self.resolved_window = title;
        self
    }

    pub fn with_action(mut self, action: impl ToString) -> Self {
        self.action = Some(action.to_string());
        self
    }

    pub fn with_outcome(mut self, outcome: impl ToString) -> Self {
        self.outcome = Some(outcome.to_string());
        self
    }

    pub fn with_detail(mut self, detail: impl ToString) -> Self {
        self.detail = Some(detail.to_string());
        self
    }

    pub fn with_elapsed(mut self, elapsed: Duration) -> Self {
        self.elapsed_ms = Some(elapsed.as_millis());
        self
    }
}
