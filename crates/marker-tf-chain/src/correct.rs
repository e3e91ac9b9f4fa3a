//! Empirical orientation correction for raw marker angles.

use std::f64::consts::FRAC_PI_2;

use marker_tf_core::quat_from_euler_xyz;
use nalgebra::UnitQuaternion;

/// Fixed roll aligning the marker frame with the camera mount, radians.
///
/// Mounting constant of the deployed cell, not derived geometry; override
/// together with [`YAW_OFFSET`] for a different camera/arm mounting.
pub const MOUNT_ROLL: f64 = FRAC_PI_2;

/// Fixed pitch of the camera mount, radians.
pub const MOUNT_PITCH: f64 = 0.0;

/// Yaw offset pointing the frame's Z axis into the object face, radians.
pub const YAW_OFFSET: f64 = FRAC_PI_2;

/// Empirical second-order correction of the raw yaw-like angle.
///
/// The raw angle is truncated to its integer part before entering the
/// polynomial. The constants were fitted against the truncated value, so
/// the truncation is part of the model and must not be widened.
pub fn corrected_yaw(raw_angle: f64) -> f64 {
    let t = raw_angle.trunc();
    0.788 * t - (t * t) / 3160.0
}

/// Full corrected orientation for a marker with the given raw angle.
///
/// Roll and pitch are the fixed mount constants; yaw is [`YAW_OFFSET`]
/// minus the corrected angle. Composed as an intrinsic X-Y-Z rotation.
pub fn corrected_orientation(raw_angle: f64) -> UnitQuaternion<f64> {
    quat_from_euler_xyz(MOUNT_ROLL, MOUNT_PITCH, YAW_OFFSET - corrected_yaw(raw_angle))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn zero_angle_needs_no_correction() {
        assert_relative_eq!(corrected_yaw(0.0), 0.0);
    }

    #[test]
    fn reference_angle_matches_fitted_polynomial() {
        assert_relative_eq!(corrected_yaw(10.0), 0.788 * 10.0 - 100.0 / 3160.0);
    }

    #[test]
    fn fractional_part_is_truncated_not_rounded() {
        assert_relative_eq!(corrected_yaw(10.9), corrected_yaw(10.0));
        // Truncation goes toward zero for negative angles as well.
        assert_relative_eq!(corrected_yaw(-3.7), 0.788 * -3.0 - 9.0 / 3160.0);
    }

    #[test]
    fn zero_angle_orientation_is_the_mount_rotation() {
        // Rx(pi/2) * Rz(pi/2); coords in (x, y, z, w) order.
        let q = corrected_orientation(0.0);
        assert_relative_eq!(q.coords[0], 0.5, epsilon = 1e-12);
        assert_relative_eq!(q.coords[1], -0.5, epsilon = 1e-12);
        assert_relative_eq!(q.coords[2], 0.5, epsilon = 1e-12);
        assert_relative_eq!(q.coords[3], 0.5, epsilon = 1e-12);
    }

    #[test]
    fn corrected_orientation_is_a_unit_quaternion() {
        let q = corrected_orientation(7.3);
        assert_relative_eq!(q.norm(), 1.0, epsilon = 1e-12);
    }
}
