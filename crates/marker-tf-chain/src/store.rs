//! Transform store capability interface.

use marker_tf_core::RigidTransform;

/// Failures surfaced by a transform store lookup.
#[derive(thiserror::Error, Debug)]
pub enum TransformError {
    #[error("transform {target} -> {source} not yet available")]
    NotYetAvailable { target: String, source: String },
    #[error("frames {target} and {source} are not connected in the transform graph")]
    Disconnected { target: String, source: String },
    #[error("transform buffer no longer holds {target} -> {source}")]
    Expired { target: String, source: String },
}

/// Externally-owned buffered graph of timestamped rigid transforms.
///
/// `publish` is fire-and-forget broadcast into the graph. `lookup` resolves
/// the composed transform from `target` to `source` at the latest available
/// time; it blocks with bounded latency (the store's own timeout governs
/// the worst case) and fails until the graph has observed both frames.
pub trait TransformStore {
    fn publish(&mut self, transform: RigidTransform);

    fn lookup(&self, target: &str, source: &str) -> Result<RigidTransform, TransformError>;
}
