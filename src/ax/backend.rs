use std::fmt::Debug;

use crate::ax::attr_model::{AttrValue, Rect, TextRange};
use crate::error::AxError;

/// A running application as reported by the window server.
#[derive(Debug, Clone)]
pub struct Application<N> {
    /// Localized application name
    pub name: String,

    /// Whether this is the frontmost application
    pub is_active: bool,

    /// Application-level accessibility element
    pub element: N,
}

/// The accessibility service this crate traverses.
///
/// Every call is blocking. `Node` values are borrowed handles: they are only
/// meaningful inside the call that obtained them and are never stored by the
/// traversal or the dispatcher once that call returns.
pub trait AxBackend {
    type Node: Clone + Debug;

    /// Whether the calling process has been granted accessibility access.
    fn is_trusted(&self) -> bool;

    /// Read one named attribute. `None` when the node does not carry it or the
    /// read fails; absence is never an error.
    fn attribute(&self, node: &Self::Node, name: &str) -> Option<AttrValue>;

    /// Screen bounds of a character range (the parameterized bounds-for-range read).
    fn bounds_for_range(&self, node: &Self::Node, range: TextRange) -> Option<Rect>;

    /// Children in the order the service returns them.
    fn children(&self, node: &Self::Node) -> Vec<Self::Node>;

    /// Names of the actions the node advertises.
    fn action_names(&self, node: &Self::Node) -> Vec<String>;

    fn perform_action(&self, node: &Self::Node, action: &str) -> Result<(), AxError>;

    /// Write the node's value attribute.
    fn set_value(&self, node: &Self::Node, value: &str) -> Result<(), AxError>;

    /// Running applications in window-server order.
    fn applications(&self) -> Vec<Application<Self::Node>>;

    /// Top-level windows of an application element.
    fn windows(&self, app: &Self::Node) -> Vec<Self::Node>;
}
