//! Fiducial marker detection for the marker-tf pipeline.
//!
//! This crate owns:
//! - dictionary descriptors for the square-bit marker families,
//! - the capability interfaces the vision primitives plug into,
//! - the detection pipeline: intensity conversion, quad filtering by area,
//!   and per-marker range/angle extraction from the estimated pose.
//!
//! It does **not** implement quad finding or PnP itself; those arrive
//! through [`MarkerDetectionProvider`] and [`SingleMarkerPoseProvider`] so
//! the pipeline stays testable with synthetic stubs.

mod detector;
mod dictionary;
mod provider;

pub use detector::{DetectedMarker, DetectorParams, MarkerDetector};
pub use dictionary::{builtin_dictionary, dict_4x4_50, DictionarySpec};
pub use provider::{MarkerDetectionProvider, MarkerPose, QuadDetection, SingleMarkerPoseProvider};
