//! Latest-frame slots and the per-tick pipeline.

use std::time::{Duration, SystemTime};

use log::{debug, info, warn};
use marker_tf_chain::{
    corrected_orientation, project_to_mount_frame, TransformChainer, TransformStore,
};
use marker_tf_core::{ColorFrame, DepthFrame, PixelLayout};
use marker_tf_detect::{MarkerDetectionProvider, MarkerDetector, SingleMarkerPoseProvider};

use crate::annotate::mark_center;
use crate::config::NodeConfig;

/// Summary of one pipeline tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickOutcome {
    /// Markers surviving detection and area filtering.
    pub detected: usize,
    /// Markers whose base-relative transform was published.
    pub published: usize,
    /// Markers abandoned because the store could not resolve their pose.
    pub skipped: usize,
}

/// The perception node.
///
/// Owns the two latest-value frame slots (overwrite semantics: a new frame
/// replaces the previous one, stale-frame loss is acceptable for this
/// control loop) and runs the full pipeline once per `tick`. Frame
/// callbacks and `tick` interleave on one thread; there is no internal
/// locking by design.
pub struct PerceptionNode<D, P, S> {
    config: NodeConfig,
    detector: MarkerDetector<D, P>,
    chainer: TransformChainer,
    store: S,
    latest_color: Option<ColorFrame>,
    latest_depth: Option<DepthFrame>,
}

impl<D, P, S> PerceptionNode<D, P, S>
where
    D: MarkerDetectionProvider,
    P: SingleMarkerPoseProvider,
    S: TransformStore,
{
    pub fn new(config: NodeConfig, detection: D, pose: P, store: S) -> Self {
        let detector = MarkerDetector::new(config.detector.clone(), detection, pose);
        let chainer = TransformChainer::new(config.frames.clone());
        Self {
            config,
            detector,
            chainer,
            store,
            latest_color: None,
            latest_depth: None,
        }
    }

    #[inline]
    pub fn config(&self) -> &NodeConfig {
        &self.config
    }

    /// Rate the surrounding runtime should drive [`tick`] at.
    ///
    /// [`tick`]: Self::tick
    pub fn tick_period(&self) -> Duration {
        Duration::from_secs_f64(self.config.tick_period_s)
    }

    #[inline]
    pub fn store(&self) -> &S {
        &self.store
    }

    #[inline]
    pub fn latest_color(&self) -> Option<&ColorFrame> {
        self.latest_color.as_ref()
    }

    #[inline]
    pub fn latest_depth(&self) -> Option<&DepthFrame> {
        self.latest_depth.as_ref()
    }

    /// Color-frame callback: keep the newest frame, overwrite the previous.
    ///
    /// A rejected buffer leaves the previously held frame in place.
    pub fn on_color_frame(&mut self, width: usize, height: usize, layout: PixelLayout, data: Vec<u8>) {
        match ColorFrame::new(width, height, layout, data) {
            Ok(frame) => self.latest_color = Some(frame),
            Err(err) => warn!("color frame rejected, keeping previous frame: {err}"),
        }
    }

    /// Depth-frame callback.
    ///
    /// Stored but not consumed by the pose pipeline; kept as an input for a
    /// later refinement stage.
    pub fn on_depth_frame(&mut self, width: usize, height: usize, data: Vec<u16>) {
        match DepthFrame::new(width, height, data) {
            Ok(frame) => self.latest_depth = Some(frame),
            Err(err) => warn!("depth frame rejected, keeping previous frame: {err}"),
        }
    }

    /// Run detection, correction, projection, and chaining on the latest
    /// color frame.
    ///
    /// Safe no-op until the first frame arrives. Store-lookup failures skip
    /// the affected marker only; the next tick is the retry.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(level = "info", skip(self, stamp))
    )]
    pub fn tick(&mut self, stamp: SystemTime) -> TickOutcome {
        let Some(frame) = self.latest_color.as_ref() else {
            debug!("tick skipped: no color frame received yet");
            return TickOutcome::default();
        };

        let markers = self.detector.detect(frame, &self.config.intrinsics);
        let mut outcome = TickOutcome {
            detected: markers.len(),
            ..TickOutcome::default()
        };

        for marker in &markers {
            if self.config.annotate {
                if let Some(frame) = self.latest_color.as_mut() {
                    mark_center(frame, marker.center);
                }
            }

            let position = project_to_mount_frame(marker.center, marker.range, &self.config.intrinsics);
            let rotation = corrected_orientation(marker.raw_angle);

            // Lookup failures are already logged per marker by the chainer.
            match self
                .chainer
                .chain(&mut self.store, marker.id, position, rotation, stamp)
            {
                Ok(()) => outcome.published += 1,
                Err(_) => outcome.skipped += 1,
            }
        }

        if outcome.detected > 0 {
            info!(
                "tick: {} detected, {} published, {} skipped",
                outcome.detected, outcome.published, outcome.skipped
            );
        }
        outcome
    }
}
