use std::time::Duration;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

use crate::action::action_model::{
    DEFAULT_ACTIVATE_ACTION, DEFAULT_ACTIVATE_SETTLE_MS, DEFAULT_WRITE_SETTLE_MS, DispatchSettings,
};
use crate::identity::path::IdentityScheme;

// ============================================================================
// CLI Argument Parsing (clap derive)
// ============================================================================

#[derive(Parser, Debug)]
#[command(
    name = "ax-snapshot",
    version,
    about = "Snapshot an accessibility tree and act on its elements by id"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to config file (default: ax-snapshot.yaml in current dir)
    #[arg(long, global = true)]
    pub config: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print a snapshot document
    Snapshot {
        /// Recorded accessibility tree (YAML or JSON)
        #[arg(long)]
        fixture: String,

        /// Application name (case-insensitive); default is the frontmost app
        #[arg(long)]
        app: Option<String>,

        /// Window title (case-insensitive, exact)
        #[arg(long)]
        window: Option<String>,

        /// Pretty-print the JSON
        #[arg(long)]
        pretty: bool,
    },

    /// Re-identify an element and print its path
    Find {
        #[arg(long)]
        fixture: String,

        /// Element id from a previous snapshot
        #[arg(long)]
        id: String,

        /// Substring of the window title to search under
        #[arg(long)]
        window: Option<String>,
    },

    /// Replace an element's value and report it before and after
    Type {
        #[arg(long)]
        fixture: String,

        #[arg(long)]
        id: String,

        /// New value
        #[arg(long)]
        text: String,

        #[arg(long)]
        window: Option<String>,
    },

    /// Invoke a named action on an element
    Action {
        #[arg(long)]
        fixture: String,

        #[arg(long)]
        id: String,

        /// Action name, e.g. AXPress
        #[arg(long)]
        name: String,

        #[arg(long)]
        window: Option<String>,
    },

    /// List input-like elements and any text selection bounds
    Inputs {
        #[arg(long)]
        fixture: String,

        #[arg(long)]
        app: Option<String>,
    },
}

// ============================================================================
// Config File Model (optional YAML)
// ============================================================================

/// Optional YAML config file: `ax-snapshot.yaml`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub dispatch: DispatchConfig,
    #[serde(default)]
    pub identity: IdentityConfig,
    #[serde(default)]
    pub trace: TraceConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DispatchConfig {
    /// Window title substring used when `--window` is not given
    pub target_window: Option<String>,

    #[serde(default = "default_activate_action")]
    pub activate_action: String,

    #[serde(default = "default_activate_settle_ms")]
    pub activate_settle_ms: u64,

    #[serde(default = "default_write_settle_ms")]
    pub write_settle_ms: u64,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            target_window: None,
            activate_action: DEFAULT_ACTIVATE_ACTION.to_string(),
            activate_settle_ms: DEFAULT_ACTIVATE_SETTLE_MS,
            write_settle_ms: DEFAULT_WRITE_SETTLE_MS,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IdentityConfig {
    #[serde(default)]
    pub scheme: IdentityScheme,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TraceConfig {
    /// JSONL file receiving one line per dispatched action
    pub path: Option<String>,
}

// Serde default helpers
fn default_activate_action() -> String { DEFAULT_ACTIVATE_ACTION.to_string() }
fn default_activate_settle_ms() -> u64 { DEFAULT_ACTIVATE_SETTLE_MS }
fn default_write_settle_ms() -> u64 { DEFAULT_WRITE_SETTLE_MS }

// ============================================================================
// Config File Loading
// ============================================================================

/// Load config from a YAML file. Returns defaults if file is missing or malformed.
pub fn load_config(path: Option<&str>) -> AppConfig {
    let config_path = path.unwrap_or("ax-snapshot.yaml");
    match std::fs::read_to_string(config_path) {
        Ok(content) => serde_yaml::from_str(&content).unwrap_or_else(|e| {
            log::warn!("ignoring malformed config '{}': {}", config_path, e);
            AppConfig::default()
        }),
        Err(_) => AppConfig::default(),
    }
}

// ============================================================================
// Config Builders (merge CLI args with config file)
// ============================================================================

pub fn build_dispatch_settings(config: &AppConfig) -> DispatchSettings {
    DispatchSettings {
        activate_action: config.dispatch.activate_action.clone(),
        activate_settle: Duration::from_millis(config.dispatch.activate_settle_ms),
        write_settle: Duration::from_millis(config.dispatch.write_settle_ms),
        scheme: config.identity.scheme,
    }
}

/// `--window` first, then the config file's target window.
pub fn resolve_target_window(cli_window: Option<&str>, config: &AppConfig) -> Option<String> {
    cli_window
        .map(str::to_string)
        .or_else(|| config.dispatch.target_window.clone())
}

/// Log level for a `-v` count; `RUST_LOG` still wins when set.
pub fn log_level(verbose: u8) -> log::LevelFilter {
    match verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        _ => log::LevelFilter::Debug,
    }
}
