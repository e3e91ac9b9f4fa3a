//! Pinhole back-projection into the camera-mount frame.

use marker_tf_core::CameraIntrinsics;
use nalgebra::{Point2, Vector3};

/// Back-project a pixel center and range to a 3D point in the mount frame.
///
/// Standard pinhole relationship, followed by the `(x, y, z) -> (z, x, y)`
/// axis permutation that maps the camera optical axis onto the robot
/// forward axis. The permutation is a property of the physical camera
/// mounting; keep it in sync with the hardware, not with the math.
pub fn project_to_mount_frame(
    center: Point2<f64>,
    range: f64,
    intrinsics: &CameraIntrinsics,
) -> Vector3<f64> {
    let x = range * (intrinsics.width as f64 - center.x - intrinsics.cx) / intrinsics.fx;
    let y = range * (intrinsics.height as f64 - center.y - intrinsics.cy) / intrinsics.fy;
    let z = range;
    Vector3::new(z, x, y)
}
