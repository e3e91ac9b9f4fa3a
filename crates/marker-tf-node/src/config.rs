//! Node configuration.

use marker_tf_chain::ChainFrames;
use marker_tf_core::{CameraIntrinsics, IntrinsicsError};
use marker_tf_detect::{builtin_dictionary, DetectorParams};
use serde::{Deserialize, Serialize};

/// Errors rejecting a node configuration at load time.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("invalid configuration JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error(transparent)]
    Intrinsics(#[from] IntrinsicsError),
    #[error("unknown marker dictionary {0:?}")]
    UnknownDictionary(String),
    #[error("marker edge length must be positive (got {0})")]
    BadMarkerSize(f64),
    #[error("tick period must be positive (got {0})")]
    BadTickPeriod(f64),
    #[error("{0} frame name must not be empty")]
    EmptyFrameName(&'static str),
    #[error("team prefix must not be empty")]
    EmptyTeamPrefix,
}

/// Full configuration of the perception node.
///
/// Defaults reproduce the deployed cell: the 1280x720 camera, 4x4/50
/// dictionary, 150 mm markers, `camera_link`/`base_link` frames, and a
/// 0.2 s tick.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NodeConfig {
    pub intrinsics: CameraIntrinsics,
    #[serde(default)]
    pub detector: DetectorParams,
    #[serde(default)]
    pub frames: ChainFrames,
    /// Pipeline tick period, seconds. The timer itself lives in the
    /// surrounding runtime; this is the rate it should drive [`tick`] at.
    ///
    /// [`tick`]: crate::PerceptionNode::tick
    #[serde(default = "default_tick_period")]
    pub tick_period_s: f64,
    /// Draw detected centers onto the held frame for operator inspection.
    #[serde(default)]
    pub annotate: bool,
}

fn default_tick_period() -> f64 {
    0.2
}

/// Intrinsics of the deployed 1280x720 camera, zero distortion.
fn deployed_intrinsics() -> CameraIntrinsics {
    CameraIntrinsics {
        fx: 931.1829833984375,
        fy: 931.1829833984375,
        cx: 640.0,
        cy: 360.0,
        width: 1280,
        height: 720,
        distortion: [0.0; 5],
    }
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            intrinsics: deployed_intrinsics(),
            detector: DetectorParams::default(),
            frames: ChainFrames::default(),
            tick_period_s: default_tick_period(),
            annotate: false,
        }
    }
}

impl NodeConfig {
    /// Parse and validate a configuration from JSON.
    ///
    /// Malformed intrinsics are a configuration-time error by design; they
    /// must never reach the per-tick pipeline.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check every invariant the pipeline relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.intrinsics.validate()?;
        if builtin_dictionary(&self.detector.dictionary.name).is_none() {
            return Err(ConfigError::UnknownDictionary(
                self.detector.dictionary.name.clone(),
            ));
        }
        if !(self.detector.marker_size_m.is_finite() && self.detector.marker_size_m > 0.0) {
            return Err(ConfigError::BadMarkerSize(self.detector.marker_size_m));
        }
        if !(self.tick_period_s.is_finite() && self.tick_period_s > 0.0) {
            return Err(ConfigError::BadTickPeriod(self.tick_period_s));
        }
        if self.frames.camera_frame.is_empty() {
            return Err(ConfigError::EmptyFrameName("camera"));
        }
        if self.frames.base_frame.is_empty() {
            return Err(ConfigError::EmptyFrameName("base"));
        }
        if self.frames.naming.team_prefix.is_empty() {
            return Err(ConfigError::EmptyTeamPrefix);
        }
        Ok(())
    }
}
