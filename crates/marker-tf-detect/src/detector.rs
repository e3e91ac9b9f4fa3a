//! The marker detection pipeline.

use log::{debug, info};
use marker_tf_core::{quad_center, quad_metrics, CameraIntrinsics, ColorFrame};
use nalgebra::Point2;
use serde::{Deserialize, Serialize};

use crate::dictionary::{dict_4x4_50, DictionarySpec};
use crate::provider::{MarkerDetectionProvider, SingleMarkerPoseProvider};

/// Detection settings.
///
/// Defaults reproduce the deployed cell: 4x4/50 dictionary, 150 mm markers,
/// area cut at 1500 px² to drop markers beyond the arm's reach.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DetectorParams {
    #[serde(default = "dict_4x4_50")]
    pub dictionary: DictionarySpec,
    /// Physical marker edge length, meters.
    #[serde(default = "default_marker_size_m")]
    pub marker_size_m: f64,
    /// Minimum quad area in pixels²; strictly smaller quads are dropped.
    #[serde(default = "default_area_threshold")]
    pub area_threshold: f64,
}

fn default_marker_size_m() -> f64 {
    0.15
}

fn default_area_threshold() -> f64 {
    1500.0
}

impl Default for DetectorParams {
    fn default() -> Self {
        Self {
            dictionary: dict_4x4_50(),
            marker_size_m: default_marker_size_m(),
            area_threshold: default_area_threshold(),
        }
    }
}

/// One marker retained by the detector, with its derived measurements.
///
/// Produced fresh each tick, never persisted across ticks.
#[derive(Clone, Debug)]
pub struct DetectedMarker {
    pub id: u32,
    /// Image-space corners in detection order.
    pub corners: [Point2<f64>; 4],
    /// Mean of the four corners, pixels.
    pub center: Point2<f64>,
    /// Distance from the camera optical center, meters.
    pub range: f64,
    /// Uncorrected yaw-like angle: the z component of the pose rotation
    /// vector. Deliberately not a proper Euler decomposition; the empirical
    /// correction downstream is tuned to this exact simplification.
    pub raw_angle: f64,
    /// Apparent marker width, pixels.
    pub width: f64,
}

/// Detection pipeline over injectable vision primitives.
pub struct MarkerDetector<D, P> {
    params: DetectorParams,
    detection: D,
    pose: P,
}

impl<D, P> MarkerDetector<D, P>
where
    D: MarkerDetectionProvider,
    P: SingleMarkerPoseProvider,
{
    pub fn new(params: DetectorParams, detection: D, pose: P) -> Self {
        Self {
            params,
            detection,
            pose,
        }
    }

    #[inline]
    pub fn params(&self) -> &DetectorParams {
        &self.params
    }

    /// Detect markers in a color frame and derive their measurements.
    ///
    /// The frame is converted to intensity with the layout-correct
    /// conversion, candidates below the area threshold are dropped, and the
    /// pose primitive supplies range and raw angle for the survivors.
    /// Candidates whose pose cannot be estimated are skipped individually.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(level = "info", skip(self, frame, intrinsics), fields(width = frame.width, height = frame.height))
    )]
    pub fn detect(&self, frame: &ColorFrame, intrinsics: &CameraIntrinsics) -> Vec<DetectedMarker> {
        let gray = frame.to_gray();
        let quads = self
            .detection
            .detect_markers(&gray.view(), &self.params.dictionary);

        if quads.is_empty() {
            info!("no markers detected in frame");
            return Vec::new();
        }

        let mut out = Vec::with_capacity(quads.len());
        for quad in quads {
            let metrics = quad_metrics(&quad.corners);
            if metrics.area < self.params.area_threshold {
                debug!(
                    "marker {}: area {:.1} below threshold {:.1}, dropped",
                    quad.id, metrics.area, self.params.area_threshold
                );
                continue;
            }

            let center = quad_center(&quad.corners);
            let Some(pose) =
                self.pose
                    .estimate_pose(&quad.corners, self.params.marker_size_m, intrinsics)
            else {
                debug!("marker {}: pose estimation failed, skipped", quad.id);
                continue;
            };

            out.push(DetectedMarker {
                id: quad.id,
                corners: quad.corners,
                center,
                range: pose.tvec.norm(),
                raw_angle: pose.rvec.z,
                width: metrics.width,
            });
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::{MarkerPose, QuadDetection};
    use approx::assert_relative_eq;
    use marker_tf_core::{GrayView, PixelLayout};
    use nalgebra::Vector3;

    struct ScriptedQuads(Vec<QuadDetection>);

    impl MarkerDetectionProvider for ScriptedQuads {
        fn detect_markers(
            &self,
            _image: &GrayView<'_>,
            _dictionary: &DictionarySpec,
        ) -> Vec<QuadDetection> {
            self.0.clone()
        }
    }

    struct FixedPose {
        tvec: Vector3<f64>,
        rvec: Vector3<f64>,
    }

    impl SingleMarkerPoseProvider for FixedPose {
        fn estimate_pose(
            &self,
            _corners: &[Point2<f64>; 4],
            _marker_size_m: f64,
            _intrinsics: &CameraIntrinsics,
        ) -> Option<MarkerPose> {
            Some(MarkerPose {
                rvec: self.rvec,
                tvec: self.tvec,
            })
        }
    }

    struct NoPose;

    impl SingleMarkerPoseProvider for NoPose {
        fn estimate_pose(
            &self,
            _corners: &[Point2<f64>; 4],
            _marker_size_m: f64,
            _intrinsics: &CameraIntrinsics,
        ) -> Option<MarkerPose> {
            None
        }
    }

    fn intrinsics() -> CameraIntrinsics {
        CameraIntrinsics::new(931.18, 931.18, 640.0, 360.0, 1280, 720).expect("intrinsics")
    }

    fn frame() -> ColorFrame {
        ColorFrame::new(4, 4, PixelLayout::Gray8, vec![0u8; 16]).expect("frame")
    }

    fn square_quad(id: u32, origin: (f64, f64), side: f64) -> QuadDetection {
        let (x, y) = origin;
        QuadDetection {
            id,
            corners: [
                Point2::new(x, y),
                Point2::new(x, y + side),
                Point2::new(x + side, y + side),
                Point2::new(x + side, y),
            ],
        }
    }

    fn rect_quad(id: u32, height: f64, width: f64) -> QuadDetection {
        QuadDetection {
            id,
            corners: [
                Point2::new(0.0, 0.0),
                Point2::new(0.0, height),
                Point2::new(width, height),
                Point2::new(width, 0.0),
            ],
        }
    }

    #[test]
    fn area_threshold_is_a_strict_lower_bound() {
        // 30x50 = 1500 px² exactly: retained. 30x49: dropped.
        let at_threshold = rect_quad(1, 30.0, 50.0);
        let below = rect_quad(2, 30.0, 49.0);
        let detector = MarkerDetector::new(
            DetectorParams::default(),
            ScriptedQuads(vec![at_threshold, below]),
            FixedPose {
                tvec: Vector3::new(0.0, 0.0, 1.0),
                rvec: Vector3::zeros(),
            },
        );

        let markers = detector.detect(&frame(), &intrinsics());
        assert_eq!(markers.len(), 1);
        assert_eq!(markers[0].id, 1);
    }

    #[test]
    fn derived_fields_come_from_pose_and_corners() {
        let detector = MarkerDetector::new(
            DetectorParams::default(),
            ScriptedQuads(vec![square_quad(20, (100.0, 100.0), 200.0)]),
            FixedPose {
                tvec: Vector3::new(0.3, 0.0, 0.4),
                rvec: Vector3::new(0.1, 0.2, 0.7),
            },
        );

        let markers = detector.detect(&frame(), &intrinsics());
        assert_eq!(markers.len(), 1);
        let m = &markers[0];
        assert_relative_eq!(m.center.x, 200.0);
        assert_relative_eq!(m.center.y, 200.0);
        assert_relative_eq!(m.range, 0.5, epsilon = 1e-12);
        assert_relative_eq!(m.raw_angle, 0.7);
        assert_relative_eq!(m.width, 200.0);
    }

    #[test]
    fn empty_detection_yields_empty_result() {
        let detector = MarkerDetector::new(
            DetectorParams::default(),
            ScriptedQuads(Vec::new()),
            NoPose,
        );
        assert!(detector.detect(&frame(), &intrinsics()).is_empty());
    }

    #[test]
    fn pose_failure_skips_only_that_marker() {
        let detector = MarkerDetector::new(
            DetectorParams::default(),
            ScriptedQuads(vec![square_quad(3, (0.0, 0.0), 100.0)]),
            NoPose,
        );
        assert!(detector.detect(&frame(), &intrinsics()).is_empty());
    }

    #[test]
    fn markers_keep_detection_order() {
        let detector = MarkerDetector::new(
            DetectorParams::default(),
            ScriptedQuads(vec![
                square_quad(9, (0.0, 0.0), 100.0),
                square_quad(2, (300.0, 0.0), 100.0),
                square_quad(5, (600.0, 0.0), 100.0),
            ]),
            FixedPose {
                tvec: Vector3::new(0.0, 0.0, 1.0),
                rvec: Vector3::zeros(),
            },
        );

        let ids: Vec<u32> = detector
            .detect(&frame(), &intrinsics())
            .iter()
            .map(|m| m.id)
            .collect();
        assert_eq!(ids, vec![9, 2, 5]);
    }

    #[test]
    fn params_json_defaults_fill_missing_fields() {
        let params: DetectorParams = serde_json::from_str("{}").expect("parse");
        assert_eq!(params.dictionary, dict_4x4_50());
        assert_relative_eq!(params.marker_size_m, 0.15);
        assert_relative_eq!(params.area_threshold, 1500.0);
    }
}
