use crate::ax::attr_model::{AX_HIDDEN, AX_POSITION, AX_SIZE, AX_VISIBLE};
use crate::ax::backend::AxBackend;

/// Coordinates below this on either axis are treated as parked off-screen.
pub const OFFSCREEN_THRESHOLD: f64 = -10000.0;

/// Whether a node (and therefore its whole subtree) belongs in a snapshot.
///
/// Each indicator is optional; a node carrying none of them is visible.
pub fn is_visible<B: AxBackend>(backend: &B, node: &B::Node) -> bool {
    if backend
        .attribute(node, AX_HIDDEN)
        .and_then(|v| v.as_bool())
        .unwrap_or(false)
    {
        return false;
    }

    if let Some(size) = backend.attribute(node, AX_SIZE).and_then(|v| v.as_size()) {
        if size.width <= 0.0 || size.height <= 0.0 {
            return false;
        }
    }

    if let Some(pos) = backend.attribute(node, AX_POSITION).and_then(|v| v.as_point()) {
        if pos.x < OFFSCREEN_THRESHOLD || pos.y < OFFSCREEN_THRESHOLD {
            return false;
        }
    }

    // Best effort: few roles report this at all.
    if let Some(shown) = backend.attribute(node, AX_VISIBLE).and_then(|v| v.as_bool()) {
        if !shown {
            return false;
        }
    }

    true
}
