//! Core types for the marker perception and transform-chaining pipeline.
//!
//! This crate is intentionally small and purely representational: quad
//! geometry, camera intrinsics, in-memory pixel frames, and named rigid
//! transforms. It does *not* depend on any concrete marker detector or
//! transform store.

mod camera;
mod frame;
mod geometry;
mod logger;
mod transform;

pub use camera::{CameraIntrinsics, IntrinsicsError};
pub use frame::{ColorFrame, DepthFrame, FrameError, GrayFrame, GrayView, PixelLayout};
pub use geometry::{quad_center, quad_metrics, QuadMetrics};
pub use transform::{quat_from_euler_xyz, FrameNaming, RigidTransform};

#[cfg(feature = "tracing")]
pub use logger::init_tracing;

pub use logger::init_with_level;
