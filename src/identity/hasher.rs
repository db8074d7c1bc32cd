use sha2::{Digest, Sha256};

/// Bytes of the digest kept in an element id.
pub const ID_BYTES: usize = 4;

/// Short stable id for a full node path: the first four bytes of the path's
/// SHA-256 digest as lowercase hex.
///
/// Ids are re-derived on every traversal, so this must never depend on
/// anything but `path`.
pub fn element_id(path: &str) -> String {
    let digest = Sha256::digest(path.as_bytes());
    hex::encode(&digest[..ID_BYTES])
}
