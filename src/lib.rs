use serde::Serialize;

use crate::{
    action::{action_model::DispatchSettings, dispatcher::ActionDispatcher},
    ax::backend::AxBackend,
    error::AxError,
    identity::path::IdentityScheme,
    snapshot::{orchestrator::snapshot_hierarchy, snapshot_model::SnapshotFilter},
};

pub mod action;
pub mod ax;
pub mod cli;
pub mod error;
pub mod identity;
pub mod snapshot;
pub mod trace;

// =========================================================================
// String boundary
// =========================================================================
//
// Each call returns text and nothing else: internal failures become an error
// document or a literal error string, never a panic or an `Err`.

/// Snapshot of the frontmost application's main window.
pub fn get_snapshot<B: AxBackend>(backend: &B) -> String {
    snapshot_json(backend, None, IdentityScheme::Attributes, false)
}

/// Snapshot narrowed by application name and/or window title.
pub fn get_snapshot_filtered<B: AxBackend>(
    backend: &B,
    app_name: Option<&str>,
    window_title: Option<&str>,
) -> String {
    let filter = SnapshotFilter {
        application_name: app_name.map(str::to_string),
        window_title: window_title.map(str::to_string),
    };
    snapshot_json(backend, Some(&filter), IdentityScheme::Attributes, false)
}

/// Snapshot document as JSON, or `{"error": "..."}`.
pub fn snapshot_json<B: AxBackend>(
    backend: &B,
    filter: Option<&SnapshotFilter>,
    scheme: IdentityScheme,
    pretty: bool,
) -> String {
    match snapshot_hierarchy(backend, filter, scheme) {
        Ok(document) => render_json(&document, pretty),
        Err(e) => error_document(&e),
    }
}

/// `{"before": ..., "after": ...}`, or a literal error string.
pub fn mutate_text<B: AxBackend>(
    backend: &B,
    window_title: &str,
    element_id: &str,
    text: &str,
    settings: &DispatchSettings,
) -> String {
    let dispatcher = ActionDispatcher::new(backend, settings.clone());
    match dispatcher.mutate_text(window_title, element_id, text) {
        Ok(mutation) => render_json(&mutation, false),
        Err(e) => e.to_string(),
    }
}

/// `{"result": "success"}`, or a literal error string.
pub fn invoke_action<B: AxBackend>(
    backend: &B,
    window_title: &str,
    element_id: &str,
    action_name: &str,
    settings: &DispatchSettings,
) -> String {
    let dispatcher = ActionDispatcher::new(backend, settings.clone());
    match dispatcher.invoke_action(window_title, element_id, action_name) {
        Ok(report) => render_json(&report, false),
        Err(e) => e.to_string(),
    }
}

/// Serialize, falling back to an empty object.
pub fn render_json<T: Serialize>(value: &T, pretty: bool) -> String {
    let rendered = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };

    match rendered {
        Ok(json) => json,
        Err(source) => {
            let e = AxError::Serialization {
                context: "boundary response".into(),
                source,
            };
            log::warn!("{}", e);
            "{}".to_string()
        }
    }
}

pub fn error_document(error: &AxError) -> String {
    render_json(&serde_json::json!({ "error": error.message() }), false)
}
