use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::identity::path::IdentityScheme;

/// Wait after the activate action, before touching the value.
pub const DEFAULT_ACTIVATE_SETTLE_MS: u64 = 50;

/// Wait after writing the value, before reading it back.
pub const DEFAULT_WRITE_SETTLE_MS: u64 = 100;

/// Action invoked to focus a control before its value is written.
pub const DEFAULT_ACTIVATE_ACTION: &str = "AXPress";

/// Reported in place of a value that could not be read.
pub const READ_ERROR_SENTINEL: &str = "Error: Could not read value";

/// Reported as the after-value when the application rejected the write.
pub const WRITE_ERROR_SENTINEL: &str = "Error: Could not write value";

/// Knobs for the action dispatcher.
///
/// The settle delays are plain sleeps: the accessibility service gives no
/// completion signal for a write, so the dispatcher waits a fixed time and
/// hopes the application has caught up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchSettings {
    pub activate_action: String,
    pub activate_settle: Duration,
    pub write_settle: Duration,
    /// Must match the scheme the ids were issued under
    pub scheme: IdentityScheme,
}

impl Default for DispatchSettings {
    fn default() -> Self {
        Self {
            activate_action: DEFAULT_ACTIVATE_ACTION.to_string(),
            activate_settle: Duration::from_millis(DEFAULT_ACTIVATE_SETTLE_MS),
            write_settle: Duration::from_millis(DEFAULT_WRITE_SETTLE_MS),
            scheme: IdentityScheme::Attributes,
        }
    }
}

impl DispatchSettings {
    /// Same behavior without the sleeps.
    pub fn immediate() -> Self {
        Self {
            activate_settle: Duration::ZERO,
            write_settle: Duration::ZERO,
            ..Self::default()
        }
    }
}

/// Value observed before and after a text write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextMutation {
    pub before: String,
    pub after: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionReport {
    pub result: String,
}

impl ActionReport {
    pub fn success() -> Self {
        Self {
            result: "success".into(),
        }
    }
}
