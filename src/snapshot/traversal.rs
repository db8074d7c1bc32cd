use std::collections::BTreeMap;

use log::trace;

use crate::ax::attr_model::{
    AX_MARKED_TEXT_RANGE, AX_NUMBER_OF_CHARACTERS, AX_PLACEHOLDER_VALUE, AX_POSITION, AX_ROLE,
    AX_SELECTED_TEXT, AX_SELECTED_TEXT_BOUNDS, AX_SELECTED_TEXT_RANGE, AX_SIZE,
    SNAPSHOT_ATTRIBUTES, TEXT_INPUT_ROLES, AttrValue,
};
use crate::ax::backend::AxBackend;
use crate::identity::hasher::element_id;
use crate::identity::path::{IdentityScheme, NodePath, PathContext, build_path_in};
use crate::snapshot::snapshot_model::{Frame, SnapshotNode, format_bounds};
use crate::snapshot::visibility::is_visible;

// ============================================================================
// Snapshot (live tree -> SnapshotNode)
// ============================================================================

/// Snapshot `node` and its visible descendants using the default identity scheme.
pub fn snapshot_node<B: AxBackend>(
    backend: &B,
    node: &B::Node,
    depth: u32,
    parent_path: &str,
) -> Option<SnapshotNode> {
    let ctx = PathContext {
        parent_path,
        sibling_index: 0,
        scheme: IdentityScheme::Attributes,
    };
    snapshot_node_in(backend, node, depth, ctx)
}

/// Snapshot `node` and its visible descendants.
///
/// Returns `None` when the node is invisible (its whole subtree is dropped
/// with it) or has no readable role. Every node that survives those two
/// checks is emitted, even with no attributes, actions or children.
pub fn snapshot_node_in<B: AxBackend>(
    backend: &B,
    node: &B::Node,
    depth: u32,
    ctx: PathContext<'_>,
) -> Option<SnapshotNode> {
    if !is_visible(backend, node) {
        trace!("pruned invisible subtree at depth {}", depth);
        return None;
    }

    let role = backend.attribute(node, AX_ROLE)?.render();

    let path = build_path_in(backend, node, ctx);
    let id = element_id(&path.full);

    let attributes = collect_attributes(backend, node, &role);

    let actions = backend.action_names(node);

    let children: Vec<SnapshotNode> = backend
        .children(node)
        .iter()
        .enumerate()
        .filter_map(|(index, child)| {
            let child_ctx = PathContext::child(&path.full, index, ctx.scheme);
            snapshot_node_in(backend, child, depth + 1, child_ctx)
        })
        .collect();

    Some(SnapshotNode {
        id,
        role,
        path: path.full,
        depth,
        frame: read_frame(backend, node),
        attributes: (!attributes.is_empty()).then_some(attributes),
        actions: (!actions.is_empty()).then_some(actions),
        children: (!children.is_empty()).then_some(children),
    })
}

fn read_frame<B: AxBackend>(backend: &B, node: &B::Node) -> Frame {
    let mut frame = Frame::default();
    if let Some(pos) = backend.attribute(node, AX_POSITION).and_then(|v| v.as_point()) {
        frame.x = pos.x;
        frame.y = pos.y;
    }
    if let Some(size) = backend.attribute(node, AX_SIZE).and_then(|v| v.as_size()) {
        frame.width = size.width;
        frame.height = size.height;
    }
    frame
}

fn collect_attributes<B: AxBackend>(
    backend: &B,
    node: &B::Node,
    role: &str,
) -> BTreeMap<String, String> {
    let mut attributes = BTreeMap::new();

    for name in SNAPSHOT_ATTRIBUTES {
        insert_rendered(backend, node, name, &mut attributes);
    }

    if TEXT_INPUT_ROLES.contains(&role) {
        if let Some(range) = backend
            .attribute(node, AX_SELECTED_TEXT_RANGE)
            .and_then(|v| v.as_range())
        {
            attributes.insert(
                AX_SELECTED_TEXT_RANGE.to_string(),
                AttrValue::from(range).render(),
            );
            if range.length > 0 {
                if let Some(bounds) = backend.bounds_for_range(node, range) {
                    attributes.insert(AX_SELECTED_TEXT_BOUNDS.to_string(), format_bounds(&bounds));
                }
            }
        }

        for name in [
            AX_SELECTED_TEXT,
            AX_MARKED_TEXT_RANGE,
            AX_NUMBER_OF_CHARACTERS,
            AX_PLACEHOLDER_VALUE,
        ] {
            insert_rendered(backend, node, name, &mut attributes);
        }
    }

    attributes
}

fn insert_rendered<B: AxBackend>(
    backend: &B,
    node: &B::Node,
    name: &str,
    attributes: &mut BTreeMap<String, String>,
) {
    if let Some(value) = backend.attribute(node, name) {
        let rendered = value.render();
        if !rendered.is_empty() {
            attributes.insert(name.to_string(), rendered);
        }
    }
}

// ============================================================================
// Re-identification (id -> live node)
// ============================================================================

/// A live node found by id, with the path that hashed to it.
#[derive(Debug, Clone)]
pub struct Located<N> {
    pub node: N,
    pub path: String,
}

/// First node under `root`, in pre-order, whose default-scheme id is `target_id`.
pub fn find_by_id<B: AxBackend>(backend: &B, root: &B::Node, target_id: &str) -> Option<B::Node> {
    find_by_id_in(backend, root, target_id, IdentityScheme::Attributes).map(|found| found.node)
}

/// First node under `root`, in pre-order, whose id under `scheme` is `target_id`.
///
/// Unlike snapshotting, this does not apply the visibility policy: a node
/// hidden since the snapshot was taken can still be found. Nodes without a
/// readable role are skipped together with their subtrees, as in a snapshot.
pub fn find_by_id_in<B: AxBackend>(
    backend: &B,
    root: &B::Node,
    target_id: &str,
    scheme: IdentityScheme,
) -> Option<Located<B::Node>> {
    search(backend, root, target_id, PathContext::root(scheme))
}

fn search<B: AxBackend>(
    backend: &B,
    node: &B::Node,
    target_id: &str,
    ctx: PathContext<'_>,
) -> Option<Located<B::Node>> {
    backend.attribute(node, AX_ROLE)?;

    let NodePath { full, .. } = build_path_in(backend, node, ctx);
    if element_id(&full) == target_id {
        return Some(Located {
            node: node.clone(),
            path: full,
        });
    }

    backend
        .children(node)
        .iter()
        .enumerate()
        .find_map(|(index, child)| {
            search(
                backend,
                child,
                target_id,
                PathContext::child(&full, index, ctx.scheme),
            )
        })
}
