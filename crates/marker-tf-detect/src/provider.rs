//! Capability interfaces for the external vision primitives.

use marker_tf_core::{CameraIntrinsics, GrayView};
use nalgebra::{Point2, Vector3};

use crate::DictionarySpec;

/// One marker candidate found in an image: four corners and a decoded id.
#[derive(Clone, Debug)]
pub struct QuadDetection {
    pub id: u32,
    /// Image-space corners in detection order (winding not guaranteed).
    pub corners: [Point2<f64>; 4],
}

/// Rotation-vector / translation-vector pose of one marker, camera coords.
#[derive(Clone, Copy, Debug)]
pub struct MarkerPose {
    /// Axis-angle rotation vector.
    pub rvec: Vector3<f64>,
    /// Translation from the camera optical center, meters.
    pub tvec: Vector3<f64>,
}

/// Fiducial detection primitive: intensity image + dictionary -> candidates.
///
/// An empty result is a normal outcome, not an error.
pub trait MarkerDetectionProvider {
    fn detect_markers(
        &self,
        image: &GrayView<'_>,
        dictionary: &DictionarySpec,
    ) -> Vec<QuadDetection>;
}

/// Single-marker pose estimation primitive.
///
/// `marker_size_m` is the physical marker edge length in meters. Returns
/// `None` when no pose can be recovered for the candidate.
pub trait SingleMarkerPoseProvider {
    fn estimate_pose(
        &self,
        corners: &[Point2<f64>; 4],
        marker_size_m: f64,
        intrinsics: &CameraIntrinsics,
    ) -> Option<MarkerPose>;
}
