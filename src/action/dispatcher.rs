use std::thread;
use std::time::{Duration, Instant};

use log::{debug, info, warn};

use crate::action::action_model::{
    ActionReport, DispatchSettings, READ_ERROR_SENTINEL, TextMutation, WRITE_ERROR_SENTINEL,
};
use crate::ax::attr_model::{AX_TITLE, AX_VALUE, AttrValue};
use crate::ax::backend::AxBackend;
use crate::error::AxError;
use crate::snapshot::orchestrator::is_main_window;
use crate::snapshot::traversal::find_by_id_in;
use crate::trace::logger::TraceLogger;
use crate::trace::trace::TraceEvent;

/// Locates nodes by previously issued id and acts on them.
///
/// Holds no node handles between calls: every operation resolves its window
/// and re-identifies its target from scratch.
pub struct ActionDispatcher<'a, B: AxBackend> {
    backend: &'a B,
    settings: DispatchSettings,
    tracer: Option<&'a TraceLogger>,
}

impl<'a, B: AxBackend> ActionDispatcher<'a, B> {
    pub fn new(backend: &'a B, settings: DispatchSettings) -> Self {
        Self {
            backend,
            settings,
            tracer: None,
        }
    }

    pub fn with_tracer(mut self, tracer: &'a TraceLogger) -> Self {
        self.tracer = Some(tracer);
        self
    }

    /// First window, across all applications, whose title contains
    /// `title_contains`; failing that, the frontmost application's main window.
    pub fn resolve_window(&self, title_contains: &str) -> Result<B::Node, AxError> {
        self.resolve_titled_window(title_contains).map(|(window, _)| window)
    }

    /// `resolve_window` plus the resolved window's own title.
    fn resolve_titled_window(&self, title_contains: &str) -> Result<(B::Node, String), AxError> {
        for app in self.backend.applications() {
            for window in self.backend.windows(&app.element) {
                let title = self.title_of(&window);
                if title.contains(title_contains) {
                    debug!("resolved window '{}' in {}", title, app.name);
                    return Ok((window, title));
                }
            }
        }

        let frontmost = self
            .backend
            .applications()
            .into_iter()
            .find(|app| app.is_active)
            .ok_or(AxError::WindowNotFound)?;

        debug!(
            "no window titled like '{}', falling back to {}",
            title_contains, frontmost.name
        );

        let window = self
            .backend
            .windows(&frontmost.element)
            .into_iter()
            .find(|w| is_main_window(self.backend, w))
            .ok_or(AxError::WindowNotFound)?;
        let title = self.title_of(&window);
        Ok((window, title))
    }

    /// Replace the value of the node `element_id` with `text`.
    ///
    /// Read and write failures are reported in the result as sentinels rather
    /// than as errors; only permission, window and element lookup can fail the call.
    pub fn mutate_text(
        &self,
        window_title: &str,
        element_id: &str,
        text: &str,
    ) -> Result<TextMutation, AxError> {
        let started = Instant::now();
        let mut resolved = None;
        let result = self.mutate_text_inner(window_title, element_id, text, &mut resolved);

        let event = TraceEvent::now("mutate_text", element_id)
            .with_window(window_title)
            .with_resolved_window(resolved)
            .with_elapsed(started.elapsed());
        self.trace(match &result {
            Ok(m) => event.with_outcome("ok").with_detail(format!("{:?} -> {:?}", m.before, m.after)),
            Err(e) => event.with_outcome("error").with_detail(e),
        });

        result
    }

    fn mutate_text_inner(
        &self,
        window_title: &str,
        element_id: &str,
        text: &str,
        resolved: &mut Option<String>,
    ) -> Result<TextMutation, AxError> {
        if !self.backend.is_trusted() {
            return Err(AxError::PermissionDenied);
        }

        let (window, title) = self.resolve_titled_window(window_title)?;
        *resolved = Some(title);
        let node = self.locate(&window, element_id)?;

        let activate = &self.settings.activate_action;
        if self.backend.action_names(&node).iter().any(|a| a == activate) {
            if let Err(e) = self.backend.perform_action(&node, activate) {
                warn!("activate before write failed on {}: {}", element_id, e);
            }
            settle(self.settings.activate_settle);
        }

        let before = self.read_value(&node);

        let after = match self.backend.set_value(&node, text) {
            Ok(()) => {
                settle(self.settings.write_settle);
                self.read_value(&node)
            }
            Err(e) => {
                warn!("value write on {} failed: {}", element_id, e);
                WRITE_ERROR_SENTINEL.to_string()
            }
        };

        info!("mutated {}: {:?} -> {:?}", element_id, before, after);
        Ok(TextMutation { before, after })
    }

    /// Invoke `action` on the node `element_id`.
    pub fn invoke_action(
        &self,
        window_title: &str,
        element_id: &str,
        action: &str,
    ) -> Result<ActionReport, AxError> {
        let started = Instant::now();
        let mut resolved = None;
        let result = self.invoke_action_inner(window_title, element_id, action, &mut resolved);

        let event = TraceEvent::now("invoke_action", element_id)
            .with_window(window_title)
            .with_resolved_window(resolved)
            .with_action(action)
            .with_elapsed(started.elapsed());
        self.trace(match &result {
            Ok(_) => event.with_outcome("ok"),
            Err(e) => event.with_outcome("error").with_detail(e),
        });

        result
    }

    fn invoke_action_inner(
        &self,
        window_title: &str,
        element_id: &str,
        action: &str,
        resolved: &mut Option<String>,
    ) -> Result<ActionReport, AxError> {
        if !self.backend.is_trusted() {
            return Err(AxError::PermissionDenied);
        }

        let (window, title) = self.resolve_titled_window(window_title)?;
        *resolved = Some(title);
        let node = self.locate(&window, element_id)?;

        self.backend.perform_action(&node, action)?;
        info!("performed {} on {}", action, element_id);
        Ok(ActionReport::success())
    }

    /// Path of the node `element_id` under the resolved window, without acting on it.
    pub fn find_path(&self, window_title: &str, element_id: &str) -> Result<String, AxError> {
        if !self.backend.is_trusted() {
            return Err(AxError::PermissionDenied);
        }

        let window = self.resolve_window(window_title)?;
        find_by_id_in(self.backend, &window, element_id, self.settings.scheme)
            .map(|found| found.path)
            .ok_or_else(|| AxError::ElementNotFound {
                id: element_id.to_string(),
            })
    }

    fn locate(&self, window: &B::Node, element_id: &str) -> Result<B::Node, AxError> {
        find_by_id_in(self.backend, window, element_id, self.settings.scheme)
            .map(|found| {
                debug!("re-identified {} at '{}'", element_id, found.path);
                found.node
            })
            .ok_or_else(|| AxError::ElementNotFound {
                id: element_id.to_string(),
            })
    }

    fn title_of(&self, window: &B::Node) -> String {
        self.backend
            .attribute(window, AX_TITLE)
            .map(|t| t.render())
            .unwrap_or_default()
    }

    fn read_value(&self, node: &B::Node) -> String {
        match self.backend.attribute(node, AX_VALUE) {
            Some(AttrValue::Text(s)) => s,
            Some(other) => other.render(),
            None => READ_ERROR_SENTINEL.to_string(),
        }
    }

    fn trace(&self, event: TraceEvent) {
        if let Some(tracer) = self.tracer {
            tracer.log(&event);
        }
    }
}

fn settle(delay: Duration) {
    if !delay.is_zero() {
        thread::sleep(delay);
    }
}
