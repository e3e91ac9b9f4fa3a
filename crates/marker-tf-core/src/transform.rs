//! Named, timestamped rigid transforms and per-marker frame naming.

use std::time::SystemTime;

use nalgebra::{UnitQuaternion, Vector3};
use serde::{Deserialize, Serialize};

/// One rigid-body pose between two named coordinate frames.
///
/// Transforms are independently constructed, handed to the transform store,
/// and never mutated afterwards.
#[derive(Clone, Debug)]
pub struct RigidTransform {
    /// Parent frame name.
    pub parent: String,
    /// Child frame name.
    pub child: String,
    pub stamp: SystemTime,
    pub translation: Vector3<f64>,
    pub rotation: UnitQuaternion<f64>,
}

impl RigidTransform {
    pub fn new(
        parent: impl Into<String>,
        child: impl Into<String>,
        stamp: SystemTime,
        translation: Vector3<f64>,
        rotation: UnitQuaternion<f64>,
    ) -> Self {
        Self {
            parent: parent.into(),
            child: child.into(),
            stamp,
            translation,
            rotation,
        }
    }

    /// Pure-translation transform (identity rotation).
    pub fn from_translation(
        parent: impl Into<String>,
        child: impl Into<String>,
        stamp: SystemTime,
        translation: Vector3<f64>,
    ) -> Self {
        Self::new(parent, child, stamp, translation, UnitQuaternion::identity())
    }
}

/// Quaternion from intrinsic X-Y-Z Euler angles: roll about X first, then
/// pitch about the rotated Y, then yaw about the rotated Z.
pub fn quat_from_euler_xyz(roll: f64, pitch: f64, yaw: f64) -> UnitQuaternion<f64> {
    UnitQuaternion::from_axis_angle(&Vector3::x_axis(), roll)
        * UnitQuaternion::from_axis_angle(&Vector3::y_axis(), pitch)
        * UnitQuaternion::from_axis_angle(&Vector3::z_axis(), yaw)
}

/// Builder for the per-marker frame names downstream consumers match on.
///
/// The names are a contract surface: planners locate objects by exact string
/// match on `<team>_base_<id>`, so the prefix and id rendering must stay
/// stable across releases.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameNaming {
    pub team_prefix: String,
}

impl FrameNaming {
    pub fn new(team_prefix: impl Into<String>) -> Self {
        Self {
            team_prefix: team_prefix.into(),
        }
    }

    /// Camera-relative intermediate frame for a marker id.
    pub fn cam_frame(&self, id: u32) -> String {
        format!("{}_cam_{}", self.team_prefix, id)
    }

    /// Base-relative final frame for a marker id.
    pub fn base_frame(&self, id: u32) -> String {
        format!("{}_base_{}", self.team_prefix, id)
    }
}
