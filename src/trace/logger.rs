use std::{fs::OpenOptions, io::Write, sync::Mutex};

use log::{debug, info, warn};

use crate::trace::trace::TraceEvent;

/// Appends one JSONL line per dispatched `mutate_text` / `invoke_action`.
///
/// Tracing never fails a dispatch: an unopenable file disables the logger
/// and write errors are only reported.
pub struct TraceLogger {
    file: Option<Mutex<std::fs::File>>,
}

impl TraceLogger {
    pub fn new(path: &str) -> Self {
        match OpenOptions::new().create(true).append(true).open(path) {
            Ok(f) => {
                info!("tracing dispatched actions to '{}'", path);
                Self {
                    file: Some(Mutex::new(f)),
                }
            }
            Err(e) => {
                warn!("dispatch trace disabled, could not open '{}': {}", path, e);
                Self::disabled()
            }
        }
    }

    pub fn disabled() -> Self {
        Self { file: None }
    }

    pub fn is_enabled(&self) -> bool {
        self.file.is_some()
    }

    pub fn log(&self, event: &TraceEvent) {
        let Some(file_mutex) = &self.file else {
            return;
        };

        debug!(
            "trace {} {} in {} -> {}",
            event.operation,
            event.element_id,
            event.resolved_window.as_deref().unwrap_or("<unresolved>"),
            event.outcome.as_deref().unwrap_or("-"),
        );

        let line = match serde_json::to_string(event) {
            Ok(j) => j,
            Err(e) => {
                warn!("dropping {} trace for {}: {}", event.operation, event.element_id, e);
                return;
            }
        };

        let Ok(mut file) = file_mutex.lock() else {
            warn!("dispatch trace lock poisoned, dropping {}", event.operation);
            return;
        };

        if let Err(e) = writeln!(file, "{}", line) {
            warn!("failed to append {} trace: {}", event.operation, e);
        }
    }
}
