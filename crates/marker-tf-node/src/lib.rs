//! The perception-and-localization node.
//!
//! Wires the detection pipeline, pose correction, back-projection, and
//! transform chaining behind two frame callbacks and a periodic `tick`.
//! The node owns the latest-value frame slots; the timer driving `tick`
//! and the concrete vision/transform-store implementations are supplied by
//! the surrounding runtime.
//!
//! ```no_run
//! # use marker_tf_node::{NodeConfig, PerceptionNode};
//! # fn run<D, P, S>(detection: D, pose: P, store: S)
//! # where
//! #     D: marker_tf_detect::MarkerDetectionProvider,
//! #     P: marker_tf_detect::SingleMarkerPoseProvider,
//! #     S: marker_tf_chain::TransformStore,
//! # {
//! let config = NodeConfig::default();
//! let mut node = PerceptionNode::new(config, detection, pose, store);
//! loop {
//!     // frame callbacks and a sleep-based timer omitted
//!     node.tick(std::time::SystemTime::now());
//! }
//! # }
//! ```

mod annotate;
mod config;
mod node;

pub use config::{ConfigError, NodeConfig};
pub use node::{PerceptionNode, TickOutcome};
