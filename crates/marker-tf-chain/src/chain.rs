//! Two-step transform chaining.
//!
//! Per marker: publish the camera-relative intermediate frame, ask the
//! store for its base-relative pose, and republish that pose under the
//! final marker frame with the corrected orientation.

use std::time::SystemTime;

use log::{debug, warn};
use marker_tf_core::{FrameNaming, RigidTransform};
use nalgebra::{UnitQuaternion, Vector3};
use serde::{Deserialize, Serialize};

use crate::store::{TransformError, TransformStore};

/// Frame names the chainer publishes against.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainFrames {
    /// Parent frame of the raw camera-relative marker transforms.
    #[serde(default = "default_camera_frame")]
    pub camera_frame: String,
    /// Robot base frame the final marker transforms hang off.
    #[serde(default = "default_base_frame")]
    pub base_frame: String,
    #[serde(default = "default_naming")]
    pub naming: FrameNaming,
}

fn default_camera_frame() -> String {
    "camera_link".to_owned()
}

fn default_base_frame() -> String {
    "base_link".to_owned()
}

fn default_naming() -> FrameNaming {
    FrameNaming::new("2029")
}

impl Default for ChainFrames {
    fn default() -> Self {
        Self {
            camera_frame: default_camera_frame(),
            base_frame: default_base_frame(),
            naming: default_naming(),
        }
    }
}

/// Publishes the two per-marker transforms through a [`TransformStore`].
pub struct TransformChainer {
    frames: ChainFrames,
}

impl TransformChainer {
    pub fn new(frames: ChainFrames) -> Self {
        Self { frames }
    }

    #[inline]
    pub fn frames(&self) -> &ChainFrames {
        &self.frames
    }

    /// Chain one marker through the store.
    ///
    /// Publishes the camera-relative transform unconditionally, then asks
    /// the store for the base-relative pose of the intermediate frame. On
    /// lookup failure the marker is abandoned for this tick (the error is
    /// returned after a per-marker log line; later markers are unaffected,
    /// and the periodic driver retries on the next tick). On success the
    /// final transform carries the store's translation as-is and the
    /// corrected rotation.
    pub fn chain<S: TransformStore>(
        &self,
        store: &mut S,
        marker_id: u32,
        position: Vector3<f64>,
        rotation: UnitQuaternion<f64>,
        stamp: SystemTime,
    ) -> Result<(), TransformError> {
        let cam_child = self.frames.naming.cam_frame(marker_id);
        store.publish(RigidTransform::from_translation(
            self.frames.camera_frame.clone(),
            cam_child.clone(),
            stamp,
            position,
        ));

        let resolved = match store.lookup(&self.frames.base_frame, &cam_child) {
            Ok(transform) => transform,
            Err(err) => {
                warn!(
                    "marker {marker_id}: could not resolve {} -> {cam_child}: {err}",
                    self.frames.base_frame
                );
                return Err(err);
            }
        };
        debug!("marker {marker_id}: base-relative pose resolved");

        store.publish(RigidTransform::new(
            self.frames.base_frame.clone(),
            self.frames.naming.base_frame(marker_id),
            stamp,
            resolved.translation,
            rotation,
        ));
        Ok(())
    }
}
