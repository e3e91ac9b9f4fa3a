//! Pose correction, pinhole back-projection, and transform chaining.
//!
//! This crate turns detector measurements into the two transforms published
//! per marker: the camera-relative intermediate frame and, after a transform
//! store round trip, the base-relative frame downstream planners consume.

mod chain;
mod correct;
mod project;
mod store;

pub use chain::{ChainFrames, TransformChainer};
pub use correct::{
    corrected_orientation, corrected_yaw, MOUNT_PITCH, MOUNT_ROLL, YAW_OFFSET,
};
pub use project::project_to_mount_frame;
pub use store::{TransformError, TransformStore};
