use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::ax::attr_model::{AX_SELECTED_TEXT_BOUNDS, Rect};

// ============================================================================
// Wire model
// ============================================================================
//
// Field names are short on purpose: callers parse these documents on every
// poll, and the names are a stable contract with them.

/// Screen rectangle, serialized as `[x, y, width, height]`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "[f64; 4]", into = "[f64; 4]")]
pub struct Frame {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl From<[f64; 4]> for Frame {
    fn from(v: [f64; 4]) -> Self {
        Frame {
            x: v[0],
            y: v[1],
            width: v[2],
            height: v[3],
        }
    }
}

impl From<Frame> for [f64; 4] {
    fn from(f: Frame) -> Self {
        [f.x, f.y, f.width, f.height]
    }
}

/// One visible element of a snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotNode {
    /// Truncated hash of `path`
    pub id: String,

    #[serde(rename = "e")]
    pub role: String,

    #[serde(rename = "p")]
    pub path: String,

    #[serde(rename = "d")]
    pub depth: u32,

    #[serde(rename = "f", default)]
    pub frame: Frame,

    #[serde(rename = "a", default, skip_serializing_if = "Option::is_none")]
    pub attributes: Option<BTreeMap<String, String>>,

    /// Advertised action names
    #[serde(rename = "m", default, skip_serializing_if = "Option::is_none")]
    pub actions: Option<Vec<String>>,

    #[serde(rename = "c", default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<SnapshotNode>>,
}

impl SnapshotNode {
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.as_ref()?.get(name).map(String::as_str)
    }

    pub fn children(&self) -> &[SnapshotNode] {
        self.children.as_deref().unwrap_or(&[])
    }

    /// This node plus all of its descendants.
    pub fn count(&self) -> usize {
        1 + self.children().iter().map(SnapshotNode::count).sum::<usize>()
    }

    /// Pre-order search by id.
    pub fn find(&self, id: &str) -> Option<&SnapshotNode> {
        if self.id == id {
            return Some(self);
        }
        self.children().iter().find_map(|c| c.find(id))
    }

    /// Parse the `x,y,w,h` selection bounds recorded for text inputs.
    pub fn selected_text_bounds(&self) -> Option<Rect> {
        let raw = self.attribute(AX_SELECTED_TEXT_BOUNDS)?;
        let parts: Vec<f64> = raw
            .split(',')
            .map(|s| s.trim().parse::<f64>())
            .collect::<Result<_, _>>()
            .ok()?;

        match parts.as_slice() {
            [x, y, width, height] => Some(Rect {
                x: *x,
                y: *y,
                width: *width,
                height: *height,
            }),
            _ => None,
        }
    }
}

/// Render selection bounds the way `selected_text_bounds` parses them.
pub fn format_bounds(rect: &Rect) -> String {
    format!(
        "{:.2},{:.2},{:.2},{:.2}",
        rect.x, rect.y, rect.width, rect.height
    )
}

/// A window's subtree decorated with where it came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowSnapshot {
    #[serde(flatten)]
    pub node: SnapshotNode,

    #[serde(rename = "main")]
    pub is_main: bool,

    #[serde(rename = "app")]
    pub application_name: String,

    #[serde(rename = "appActive")]
    pub application_is_active: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotDocument {
    /// RFC 3339 capture time
    #[serde(rename = "ts")]
    pub timestamp: String,

    #[serde(rename = "e")]
    pub windows: Vec<WindowSnapshot>,
}

impl SnapshotDocument {
    pub fn node_count(&self) -> usize {
        self.windows.iter().map(|w| w.node.count()).sum()
    }
}

/// Narrows which applications and windows a snapshot visits.
///
/// Both predicates are case-insensitive exact matches. Without an application
/// name only the frontmost application is visited.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotFilter {
    #[serde(rename = "applicationName", default)]
    pub application_name: Option<String>,

    #[serde(rename = "windowTitle", default)]
    pub window_title: Option<String>,
}

impl SnapshotFilter {
    pub fn application(mut self, name: &str) -> Self {
        self.application_name = Some(name.to_string());
        self
    }

    pub fn window(mut self, title: &str) -> Self {
        self.window_title = Some(title.to_string());
        self
    }
}
