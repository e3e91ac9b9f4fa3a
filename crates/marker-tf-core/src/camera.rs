//! Pinhole camera intrinsics.

use serde::{Deserialize, Serialize};

/// Errors raised when intrinsics are rejected at configuration time.
#[derive(thiserror::Error, Debug)]
pub enum IntrinsicsError {
    #[error("focal lengths must be finite and positive (fx={fx}, fy={fy})")]
    BadFocal { fx: f64, fy: f64 },
    #[error("principal point must be finite (cx={cx}, cy={cy})")]
    BadPrincipalPoint { cx: f64, cy: f64 },
    #[error("image dimensions must be non-zero ({width}x{height})")]
    BadDimensions { width: usize, height: usize },
}

/// Intrinsics of the deployed camera.
///
/// Configured once at startup and constant thereafter; validation happens
/// here so that malformed intrinsics never reach the per-tick pipeline. The
/// distortion terms are carried for completeness, the current deployment
/// runs with all five at zero.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct CameraIntrinsics {
    pub fx: f64,
    pub fy: f64,
    pub cx: f64,
    pub cy: f64,
    /// Image width in pixels.
    pub width: usize,
    /// Image height in pixels.
    pub height: usize,
    /// Plumb-bob distortion coefficients (k1, k2, p1, p2, k3).
    #[serde(default)]
    pub distortion: [f64; 5],
}

impl CameraIntrinsics {
    /// Build distortion-free intrinsics, rejecting malformed values.
    pub fn new(
        fx: f64,
        fy: f64,
        cx: f64,
        cy: f64,
        width: usize,
        height: usize,
    ) -> Result<Self, IntrinsicsError> {
        let intrinsics = Self {
            fx,
            fy,
            cx,
            cy,
            width,
            height,
            distortion: [0.0; 5],
        };
        intrinsics.validate()?;
        Ok(intrinsics)
    }

    /// Check the invariants required by the projection code.
    pub fn validate(&self) -> Result<(), IntrinsicsError> {
        if !(self.fx.is_finite() && self.fy.is_finite() && self.fx > 0.0 && self.fy > 0.0) {
            return Err(IntrinsicsError::BadFocal {
                fx: self.fx,
                fy: self.fy,
            });
        }
        if !(self.cx.is_finite() && self.cy.is_finite()) {
            return Err(IntrinsicsError::BadPrincipalPoint {
                cx: self.cx,
                cy: self.cy,
            });
        }
        if self.width == 0 || self.height == 0 {
            return Err(IntrinsicsError::BadDimensions {
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_deployed_camera() {
        let intr = CameraIntrinsics::new(931.1829833984375, 931.1829833984375, 640.0, 360.0, 1280, 720);
        assert!(intr.is_ok());
    }

    #[test]
    fn rejects_nonpositive_focal() {
        assert!(matches!(
            CameraIntrinsics::new(0.0, 931.18, 640.0, 360.0, 1280, 720),
            Err(IntrinsicsError::BadFocal { .. })
        ));
        assert!(matches!(
            CameraIntrinsics::new(931.18, f64::NAN, 640.0, 360.0, 1280, 720),
            Err(IntrinsicsError::BadFocal { .. })
        ));
    }

    #[test]
    fn rejects_zero_dimensions() {
        assert!(matches!(
            CameraIntrinsics::new(931.18, 931.18, 640.0, 360.0, 0, 720),
            Err(IntrinsicsError::BadDimensions { .. })
        ));
    }
}
