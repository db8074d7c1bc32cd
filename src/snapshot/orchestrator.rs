use chrono::{SecondsFormat, Utc};
use log::debug;

use crate::ax::attr_model::{AX_MAIN, AX_TITLE};
use crate::ax::backend::{Application, AxBackend};
use crate::error::AxError;
use crate::identity::path::{IdentityScheme, PathContext};
use crate::snapshot::snapshot_model::{SnapshotDocument, SnapshotFilter, WindowSnapshot};
use crate::snapshot::traversal::snapshot_node_in;

/// Snapshot the main window of every application that passes `filter`.
///
/// Applications are matched by name when the filter carries one, otherwise
/// only the frontmost application is visited. Within each application the
/// window title predicate narrows the candidates and only the main window
/// among them is traversed.
pub fn snapshot_hierarchy<B: AxBackend>(
    backend: &B,
    filter: Option<&SnapshotFilter>,
    scheme: IdentityScheme,
) -> Result<SnapshotDocument, AxError> {
    if !backend.is_trusted() {
        return Err(AxError::PermissionDenied);
    }

    let app_name = filter.and_then(|f| f.application_name.as_deref());
    let window_title = filter.and_then(|f| f.window_title.as_deref());

    let mut windows = Vec::new();

    for app in backend.applications() {
        if !application_matches(&app, app_name) {
            continue;
        }

        for window in backend.windows(&app.element) {
            if let Some(title) = window_title {
                if !title_matches(backend, &window, title) {
                    continue;
                }
            }

            if !is_main_window(backend, &window) {
                continue;
            }

            if let Some(node) = snapshot_node_in(backend, &window, 0, PathContext::root(scheme)) {
                windows.push(WindowSnapshot {
                    node,
                    is_main: true,
                    application_name: app.name.clone(),
                    application_is_active: app.is_active,
                });
            }
        }
    }

    let document = SnapshotDocument {
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        windows,
    };

    debug!(
        "snapshot: {} windows, {} nodes",
        document.windows.len(),
        document.node_count()
    );

    Ok(document)
}

fn application_matches<N>(app: &Application<N>, wanted: Option<&str>) -> bool {
    match wanted {
        Some(name) => app.name.to_lowercase() == name.to_lowercase(),
        None => app.is_active,
    }
}

fn title_matches<B: AxBackend>(backend: &B, window: &B::Node, wanted: &str) -> bool {
    backend
        .attribute(window, AX_TITLE)
        .map(|t| t.render().to_lowercase() == wanted.to_lowercase())
        .unwrap_or(false)
}

pub(crate) fn is_main_window<B: AxBackend>(backend: &B, window: &B::Node) -> bool {
    backend
        .attribute(window, AX_MAIN)
        .and_then(|v| v.as_bool())
        .unwrap_or(false)
}
