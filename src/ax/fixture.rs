use std::cell::RefCell;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::ax::attr_model::{
    AX_POSITION, AX_ROLE, AX_SIZE, AX_TITLE, AX_VALUE, AttrValue, Point, Rect, Size, TextRange,
};
use crate::ax::backend::{Application, AxBackend};
use crate::error::AxError;

// ============================================================================
// Recorded tree model (YAML / JSON)
// ============================================================================

/// One element of a recorded accessibility tree.
///
/// ```yaml
/// attributes:
///   AXRole: AXTextField
///   AXValue: draft
///   AXPosition: { x: 10, y: 20 }
/// actions: [AXPress]
/// children: []
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ElementSpec {
    #[serde(default)]
    pub attributes: BTreeMap<String, AttrValue>,

    #[serde(default)]
    pub actions: Vec<String>,

    #[serde(default)]
    pub children: Vec<ElementSpec>,

    /// Whether writes to the value attribute are accepted (default true)
    #[serde(default = "default_true")]
    pub settable: bool,

    /// Bounds reported for any character range
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_bounds: Option<Rect>,
}

impl ElementSpec {
    pub fn new(role: &str) -> Self {
        let mut attributes = BTreeMap::new();
        attributes.insert(AX_ROLE.to_string(), AttrValue::from(role));
        Self {
            attributes,
            actions: vec![],
            children: vec![],
            settable: true,
            text_bounds: None,
        }
    }

    /// An element that carries no attributes at all, not even a role.
    pub fn bare() -> Self {
        Self {
            attributes: BTreeMap::new(),
            actions: vec![],
            children: vec![],
            settable: true,
            text_bounds: None,
        }
    }

    pub fn attr(mut self, name: &str, value: impl Into<AttrValue>) -> Self {
        self.attributes.insert(name.to_string(), value.into());
        self
    }

    pub fn title(self, title: &str) -> Self {
        self.attr(AX_TITLE, title)
    }

    pub fn frame(self, x: f64, y: f64, width: f64, height: f64) -> Self {
        self.attr(AX_POSITION, Point { x, y })
            .attr(AX_SIZE, Size { width, height })
    }

    pub fn action(mut self, name: &str) -> Self {
        self.actions.push(name.to_string());
        self
    }

    pub fn child(mut self, child: ElementSpec) -> Self {
        self.children.push(child);
        self
    }

    pub fn read_only(mut self) -> Self {
        self.settable = false;
        self
    }

    pub fn with_text_bounds(mut self, bounds: Rect) -> Self {
        self.text_bounds = Some(bounds);
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationSpec {
    pub name: String,

    /// Frontmost application
    #[serde(default)]
    pub active: bool,

    #[serde(default)]
    pub windows: Vec<ElementSpec>,
}

impl ApplicationSpec {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            active: false,
            windows: vec![],
        }
    }

    pub fn active(mut self) -> Self {
        self.active = true;
        self
    }

    pub fn window(mut self, window: ElementSpec) -> Self {
        self.windows.push(window);
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixtureSpec {
    /// Whether accessibility access is granted (default true)
    #[serde(default = "default_true")]
    pub trusted: bool,

    #[serde(default)]
    pub applications: Vec<ApplicationSpec>,
}

fn default_true() -> bool {
    true
}

// ============================================================================
// In-memory backend
// ============================================================================

/// Handle into a `FixtureBackend` arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FixtureNode(usize);

#[derive(Debug)]
struct FixtureElement {
    attributes: RefCell<BTreeMap<String, AttrValue>>,
    actions: Vec<String>,
    children: Vec<usize>,
    settable: bool,
    text_bounds: Option<Rect>,
    performed: RefCell<Vec<String>>,
}

#[derive(Debug)]
struct FixtureApplication {
    name: String,
    active: bool,
    element: usize,
    windows: Vec<usize>,
}

/// A recorded accessibility tree served through `AxBackend`.
///
/// Value writes and action invocations mutate the recording in place, so a
/// later traversal observes them the way it would observe a live application.
#[derive(Debug)]
pub struct FixtureBackend {
    trusted: bool,
    elements: Vec<FixtureElement>,
    applications: Vec<FixtureApplication>,
}

impl FixtureBackend {
    pub fn new(spec: FixtureSpec) -> Self {
        let mut backend = FixtureBackend {
            trusted: spec.trusted,
            elements: vec![],
            applications: vec![],
        };

        for app in spec.applications {
            let app_spec = ElementSpec::new("AXApplication").title(&app.name);
            let element = backend.insert(&app_spec);
            let windows: Vec<usize> = app.windows.iter().map(|w| backend.insert(w)).collect();
            backend.elements[element].children = windows.clone();
            backend.applications.push(FixtureApplication {
                name: app.name,
                active: app.active,
                element,
                windows,
            });
        }

        backend
    }

    pub fn from_yaml(content: &str) -> Result<Self, AxError> {
        let spec: FixtureSpec = serde_yaml::from_str(content).map_err(|e| AxError::Fixture {
            context: "fixture document".into(),
            source: e,
        })?;
        Ok(Self::new(spec))
    }

    /// Load a recorded tree from disk. JSON is accepted too, being a YAML subset.
    pub fn load(path: &str) -> Result<Self, AxError> {
        let content = std::fs::read_to_string(path).map_err(|e| AxError::Io {
            path: path.to_string(),
            source: e,
        })?;
        Self::from_yaml(&content)
    }

    /// Pre-order insertion; returns the arena index of `spec`.
    fn insert(&mut self, spec: &ElementSpec) -> usize {
        let index = self.elements.len();
        self.elements.push(FixtureElement {
            attributes: RefCell::new(spec.attributes.clone()),
            actions: spec.actions.clone(),
            children: vec![],
            settable: spec.settable,
            text_bounds: spec.text_bounds,
            performed: RefCell::new(vec![]),
        });
        let children: Vec<usize> = spec.children.iter().map(|c| self.insert(c)).collect();
        self.elements[index].children = children;
        index
    }

    pub fn set_trusted(&mut self, trusted: bool) {
        self.trusted = trusted;
    }

    /// First element, in pre-order over all applications, whose attribute
    /// `name` renders to `value`.
    pub fn find_by_attribute(&self, name: &str, value: &str) -> Option<FixtureNode> {
        self.elements
            .iter()
            .position(|el| {
                el.attributes
                    .borrow()
                    .get(name)
                    .is_some_and(|v| v.render() == value)
            })
            .map(FixtureNode)
    }

    /// Actions invoked on `node` so far, oldest first.
    pub fn performed_actions(&self, node: FixtureNode) -> Vec<String> {
        self.elements[node.0].performed.borrow().clone()
    }

    pub fn value(&self, node: FixtureNode) -> Option<AttrValue> {
        self.elements[node.0].attributes.borrow().get(AX_VALUE).cloned()
    }

    /// Overwrite an attribute, as an application would between two traversals.
    pub fn update_attribute(&self, node: FixtureNode, name: &str, value: AttrValue) {
        self.elements[node.0]
            .attributes
            .borrow_mut()
            .insert(name.to_string(), value);
    }
}

impl AxBackend for FixtureBackend {
    type Node = FixtureNode;

    fn is_trusted(&self) -> bool {
        self.trusted
    }

    fn attribute(&self, node: &FixtureNode, name: &str) -> Option<AttrValue> {
        self.elements
            .get(node.0)?
            .attributes
            .borrow()
            .get(name)
            .cloned()
    }

    fn bounds_for_range(&self, node: &FixtureNode, _range: TextRange) -> Option<Rect> {
        self.elements.get(node.0)?.text_bounds
    }

    fn children(&self, node: &FixtureNode) -> Vec<FixtureNode> {
        match self.elements.get(node.0) {
            Some(el) => el.children.iter().copied().map(FixtureNode).collect(),
            None => vec![],
        }
    }

    fn action_names(&self, node: &FixtureNode) -> Vec<String> {
        match self.elements.get(node.0) {
            Some(el) => el.actions.clone(),
            None => vec![],
        }
    }

    fn perform_action(&self, node: &FixtureNode, action: &str) -> Result<(), AxError> {
        let el = self.elements.get(node.0).ok_or_else(|| AxError::ActionFailed {
            action: action.to_string(),
            reason: "invalid element".into(),
        })?;

        if !el.actions.iter().any(|a| a == action) {
            return Err(AxError::ActionFailed {
                action: action.to_string(),
                reason: "action not supported".into(),
            });
        }

        el.performed.borrow_mut().push(action.to_string());
        Ok(())
    }

    fn set_value(&self, node: &FixtureNode, value: &str) -> Result<(), AxError> {
        let el = self.elements.get(node.0).ok_or(AxError::ValueNotSettable)?;
        if !el.settable {
            return Err(AxError::ValueNotSettable);
        }
        el.attributes
            .borrow_mut()
            .insert(AX_VALUE.to_string(), AttrValue::from(value));
        Ok(())
    }

    fn applications(&self) -> Vec<Application<FixtureNode>> {
        self.applications
            .iter()
            .map(|app| Application {
                name: app.name.clone(),
                is_active: app.active,
                element: FixtureNode(app.element),
            })
            .collect()
    }

    fn windows(&self, app: &FixtureNode) -> Vec<FixtureNode> {
        self.applications
            .iter()
            .find(|a| a.element == app.0)
            .map(|a| a.windows.iter().copied().map(FixtureNode).collect())
            .unwrap_or_default()
    }
}
