//! Operator-facing frame annotation.
//!
//! Non-functional: kept out of the correctness path, only touches the held
//! working frame.

use marker_tf_core::ColorFrame;
use nalgebra::Point2;

/// Radius of the center disc, pixels.
const MARK_RADIUS: i64 = 10;
/// Disc color, RGB.
const MARK_COLOR: [u8; 3] = [255, 0, 0];

/// Draw a filled disc at a detected marker center.
pub(crate) fn mark_center(frame: &mut ColorFrame, center: Point2<f64>) {
    let cx = center.x.round() as i64;
    let cy = center.y.round() as i64;
    for dy in -MARK_RADIUS..=MARK_RADIUS {
        for dx in -MARK_RADIUS..=MARK_RADIUS {
            if dx * dx + dy * dy > MARK_RADIUS * MARK_RADIUS {
                continue;
            }
            let (x, y) = (cx + dx, cy + dy);
            if x < 0 || y < 0 {
                continue;
            }
            frame.set_pixel(x as usize, y as usize, MARK_COLOR);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use marker_tf_core::PixelLayout;

    #[test]
    fn marks_the_center_pixel() {
        let mut frame =
            ColorFrame::new(64, 64, PixelLayout::Rgb8, vec![0u8; 64 * 64 * 3]).expect("frame");
        mark_center(&mut frame, Point2::new(32.0, 32.0));
        let idx = (32 * 64 + 32) * 3;
        assert_eq!(&frame.data[idx..idx + 3], &MARK_COLOR);
    }

    #[test]
    fn clips_at_the_frame_border() {
        let mut frame =
            ColorFrame::new(16, 16, PixelLayout::Rgb8, vec![0u8; 16 * 16 * 3]).expect("frame");
        // Must not panic or wrap around.
        mark_center(&mut frame, Point2::new(0.0, 0.0));
        mark_center(&mut frame, Point2::new(15.0, 15.0));
    }
}
