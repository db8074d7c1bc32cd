use serde::Serialize;

use crate::ax::attr_model::{AX_LABEL, AX_TITLE, AX_VALUE};
use crate::snapshot::snapshot_model::{SnapshotDocument, SnapshotNode};

/// Role suffixes of elements a user can type into or operate.
pub const INPUT_ROLES: [&str; 8] = [
    "AXTextField",
    "AXTextArea",
    "AXButton",
    "AXCheckBox",
    "AXRadioButton",
    "AXSlider",
    "AXComboBox",
    "AXPopUpButton",
];

/// Roles reported by `interactive_elements`.
pub const INTERACTIVE_ROLES: [&str; 4] = ["AXButton", "AXSlider", "AXTextField", "AXCheckBox"];

pub fn is_input_role(role: &str) -> bool {
    INPUT_ROLES.iter().any(|r| role.ends_with(r))
}

/// Every input-like node across all windows, in pre-order.
pub fn collect_input_elements(document: &SnapshotDocument) -> Vec<&SnapshotNode> {
    let mut found = Vec::new();
    for window in &document.windows {
        collect_inputs(&window.node, &mut found);
    }
    found
}

fn collect_inputs<'a>(node: &'a SnapshotNode, found: &mut Vec<&'a SnapshotNode>) {
    if is_input_role(&node.role) {
        found.push(node);
    }
    for child in node.children() {
        collect_inputs(child, found);
    }
}

/// Flat view of one interactive element.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InteractiveElement {
    pub id: String,
    pub role: String,
    /// Title, falling back to label
    pub label: String,
    pub value: String,
    pub x: f64,
    pub y: f64,
}

pub fn interactive_elements(document: &SnapshotDocument) -> Vec<InteractiveElement> {
    let mut out = Vec::new();
    for window in &document.windows {
        flatten_interactive(&window.node, &mut out);
    }
    out
}

fn flatten_interactive(node: &SnapshotNode, out: &mut Vec<InteractiveElement>) {
    if INTERACTIVE_ROLES.contains(&node.role.as_str()) {
        let label = node
            .attribute(AX_TITLE)
            .or_else(|| node.attribute(AX_LABEL))
            .unwrap_or_default();
        out.push(InteractiveElement {
            id: node.id.clone(),
            role: node.role.clone(),
            label: label.to_string(),
            value: node.attribute(AX_VALUE).unwrap_or_default().to_string(),
            x: node.frame.x,
            y: node.frame.y,
        });
    }
    for child in node.children() {
        flatten_interactive(child, out);
    }
}
