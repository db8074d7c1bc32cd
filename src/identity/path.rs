use serde::{Deserialize, Serialize};

use crate::ax::attr_model::{PATH_ATTRIBUTES, PATH_SEPARATOR};
use crate::ax::backend::AxBackend;

/// How a node's own path segment is derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IdentityScheme {
    /// Attribute labels only. Identical siblings share a path and an id.
    #[default]
    Attributes,

    /// Attribute labels plus `#<index>`, the node's position among the
    /// service-reported children of its parent (roots are index 0).
    SiblingIndexed,
}

/// Where a node sits among its parent's children.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathContext<'a> {
    pub parent_path: &'a str,
    pub sibling_index: usize,
    pub scheme: IdentityScheme,
}

impl<'a> PathContext<'a> {
    pub fn root(scheme: IdentityScheme) -> Self {
        Self {
            parent_path: "",
            sibling_index: 0,
            scheme,
        }
    }

    pub fn child(parent_path: &'a str, sibling_index: usize, scheme: IdentityScheme) -> Self {
        Self {
            parent_path,
            sibling_index,
            scheme,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodePath {
    /// This node's labels only
    pub segment: String,

    /// Parent path followed by `segment`
    pub full: String,
}

/// Labels read from the fixed attribute list, empty ones dropped, joined.
pub fn own_segment<B: AxBackend>(backend: &B, node: &B::Node) -> String {
    PATH_ATTRIBUTES
        .iter()
        .filter_map(|name| backend.attribute(node, name))
        .map(|value| value.render())
        .filter(|label| !label.is_empty())
        .collect::<Vec<_>>()
        .join(PATH_SEPARATOR)
}

pub fn join_path(parent_path: &str, segment: &str) -> String {
    if parent_path.is_empty() {
        segment.to_string()
    } else {
        format!("{parent_path}{PATH_SEPARATOR}{segment}")
    }
}

/// Default-scheme path of `node` under `parent_path`.
pub fn build_path<B: AxBackend>(backend: &B, node: &B::Node, parent_path: &str) -> NodePath {
    let segment = own_segment(backend, node);
    let full = join_path(parent_path, &segment);
    NodePath { segment, full }
}

/// Path of `node` under the scheme carried by `ctx`.
pub fn build_path_in<B: AxBackend>(backend: &B, node: &B::Node, ctx: PathContext<'_>) -> NodePath {
    match ctx.scheme {
        IdentityScheme::Attributes => build_path(backend, node, ctx.parent_path),
        IdentityScheme::SiblingIndexed => {
            let segment = format!("{}#{}", own_segment(backend, node), ctx.sibling_index);
            let full = join_path(ctx.parent_path, &segment);
            NodePath { segment, full }
        }
    }
}
