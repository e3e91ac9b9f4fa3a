//! In-memory pixel frames exchanged with the camera driver.
//!
//! The driver hands the node ready-made 2D pixel arrays; these types only
//! validate buffer geometry and perform the layout-correct intensity
//! conversion needed by the detector.

use serde::{Deserialize, Serialize};

/// Channel layout of an inbound color frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PixelLayout {
    Rgb8,
    Bgr8,
    Gray8,
}

impl PixelLayout {
    #[inline]
    pub fn bytes_per_pixel(self) -> usize {
        match self {
            PixelLayout::Rgb8 | PixelLayout::Bgr8 => 3,
            PixelLayout::Gray8 => 1,
        }
    }
}

/// Errors raised when an inbound frame buffer is rejected.
#[derive(thiserror::Error, Debug)]
pub enum FrameError {
    #[error("frame dimensions must be non-zero ({width}x{height})")]
    EmptyDimensions { width: usize, height: usize },
    #[error(
        "frame buffer length {got} does not match {width}x{height} {layout:?} (expected {expected})"
    )]
    BufferLength {
        width: usize,
        height: usize,
        layout: PixelLayout,
        expected: usize,
        got: usize,
    },
    #[error("depth buffer length {got} does not match {width}x{height} (expected {expected})")]
    DepthBufferLength {
        width: usize,
        height: usize,
        expected: usize,
        got: usize,
    },
}

/// One color frame, row-major interleaved 8-bit channels.
#[derive(Clone, Debug)]
pub struct ColorFrame {
    pub width: usize,
    pub height: usize,
    pub layout: PixelLayout,
    pub data: Vec<u8>,
}

impl ColorFrame {
    /// Wrap a raw driver buffer, rejecting mismatched geometry.
    pub fn new(
        width: usize,
        height: usize,
        layout: PixelLayout,
        data: Vec<u8>,
    ) -> Result<Self, FrameError> {
        if width == 0 || height == 0 {
            return Err(FrameError::EmptyDimensions { width, height });
        }
        let expected = width * height * layout.bytes_per_pixel();
        if data.len() != expected {
            return Err(FrameError::BufferLength {
                width,
                height,
                layout,
                expected,
                got: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            layout,
            data,
        })
    }

    /// Single-channel intensity conversion matching the frame's layout.
    ///
    /// BT.601 luma for the 3-channel layouts; `Gray8` passes through.
    pub fn to_gray(&self) -> GrayFrame {
        let data = match self.layout {
            PixelLayout::Gray8 => self.data.clone(),
            PixelLayout::Rgb8 => luma(&self.data, [0, 1, 2]),
            PixelLayout::Bgr8 => luma(&self.data, [2, 1, 0]),
        };
        GrayFrame {
            width: self.width,
            height: self.height,
            data,
        }
    }

    /// Write one pixel, converting the RGB color to the frame's own layout.
    pub fn set_pixel(&mut self, x: usize, y: usize, rgb: [u8; 3]) {
        if x >= self.width || y >= self.height {
            return;
        }
        let idx = (y * self.width + x) * self.layout.bytes_per_pixel();
        match self.layout {
            PixelLayout::Rgb8 => self.data[idx..idx + 3].copy_from_slice(&rgb),
            PixelLayout::Bgr8 => {
                self.data[idx] = rgb[2];
                self.data[idx + 1] = rgb[1];
                self.data[idx + 2] = rgb[0];
            }
            PixelLayout::Gray8 => self.data[idx] = luma_of(rgb[0], rgb[1], rgb[2]),
        }
    }
}

#[inline]
fn luma_of(r: u8, g: u8, b: u8) -> u8 {
    ((299 * r as u32 + 587 * g as u32 + 114 * b as u32) / 1000) as u8
}

fn luma(data: &[u8], [r, g, b]: [usize; 3]) -> Vec<u8> {
    data.chunks_exact(3)
        .map(|px| luma_of(px[r], px[g], px[b]))
        .collect()
}

/// Owned single-channel intensity image.
#[derive(Clone, Debug)]
pub struct GrayFrame {
    pub width: usize,
    pub height: usize,
    pub data: Vec<u8>,
}

impl GrayFrame {
    #[inline]
    pub fn view(&self) -> GrayView<'_> {
        GrayView {
            width: self.width,
            height: self.height,
            data: &self.data,
        }
    }
}

/// Borrowed single-channel view handed to the detection provider.
#[derive(Clone, Copy, Debug)]
pub struct GrayView<'a> {
    pub width: usize,
    pub height: usize,
    /// Row-major, len = width * height.
    pub data: &'a [u8],
}

/// Depth frame aligned to the color frame.
///
/// Accepted and stored by the node but not consumed by the pose pipeline;
/// kept as an input for a later refinement stage.
#[derive(Clone, Debug)]
pub struct DepthFrame {
    pub width: usize,
    pub height: usize,
    /// Row-major depth samples, millimeters.
    pub data: Vec<u16>,
}

impl DepthFrame {
    pub fn new(width: usize, height: usize, data: Vec<u16>) -> Result<Self, FrameError> {
        if width == 0 || height == 0 {
            return Err(FrameError::EmptyDimensions { width, height });
        }
        let expected = width * height;
        if data.len() != expected {
            return Err(FrameError::DepthBufferLength {
                width,
                height,
                expected,
                got: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_wrong_buffer_length() {
        let err = ColorFrame::new(4, 4, PixelLayout::Rgb8, vec![0u8; 4 * 4]);
        assert!(matches!(err, Err(FrameError::BufferLength { .. })));
    }

    #[test]
    fn gray_passthrough_keeps_data() {
        let frame = ColorFrame::new(2, 2, PixelLayout::Gray8, vec![10, 20, 30, 40]).unwrap();
        let gray = frame.to_gray();
        assert_eq!(gray.data, vec![10, 20, 30, 40]);
    }

    #[test]
    fn bgr_and_rgb_agree_on_luma() {
        let rgb = ColorFrame::new(1, 1, PixelLayout::Rgb8, vec![200, 100, 50]).unwrap();
        let bgr = ColorFrame::new(1, 1, PixelLayout::Bgr8, vec![50, 100, 200]).unwrap();
        assert_eq!(rgb.to_gray().data, bgr.to_gray().data);
    }

    #[test]
    fn pure_green_luma_uses_bt601_weight() {
        let frame = ColorFrame::new(1, 1, PixelLayout::Rgb8, vec![0, 255, 0]).unwrap();
        assert_eq!(frame.to_gray().data[0], 149);
    }

    #[test]
    fn set_pixel_respects_layout() {
        let mut frame = ColorFrame::new(2, 1, PixelLayout::Bgr8, vec![0u8; 6]).unwrap();
        frame.set_pixel(1, 0, [255, 0, 0]);
        assert_eq!(&frame.data[3..6], &[0, 0, 255]);
    }

    #[test]
    fn depth_frame_validates_length() {
        assert!(DepthFrame::new(3, 2, vec![0u16; 6]).is_ok());
        assert!(matches!(
            DepthFrame::new(3, 2, vec![0u16; 5]),
            Err(FrameError::DepthBufferLength { .. })
        ));
    }
}
