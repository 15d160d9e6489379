//! Structural checks run before a single byte is written.

use super::anim::Animation;
use super::error::MuxError;

/// Check that `animation` can be encoded.
///
/// Rules, in the order they are checked:
///
/// 1. at least one frame, and no more than a `u32` can count;
/// 2. one delay per frame;
/// 3. one disposal per frame, if a disposal list is present;
/// 4. every frame has frame 0's exact [`PixelLayout`](crate::PixelLayout);
/// 5. frame 0's minimum corner is non-negative (it defines the canvas);
/// 6. every other frame has a non-negative minimum corner and a maximum
///    corner no further out than frame 0's on either axis.
///
/// Rule 6 compares footprints only. It does not check that an offset frame
/// actually fits in the canvas size recorded in frame 0's header.
pub fn validate(animation: &Animation<'_>) -> Result<(), MuxError> {
    let frames = animation.frames();
    let first = frames.first().ok_or(MuxError::NoFrames)?;
    if u32::try_from(frames.len()).is_err() {
        return Err(MuxError::TooManyFrames(frames.len()));
    }

    if animation.delays().len() != frames.len() {
        return Err(MuxError::DelayCountMismatch {
            frames: frames.len(),
            delays: animation.delays().len(),
        });
    }

    if let Some(disposals) = animation.disposals() {
        if disposals.len() != frames.len() {
            return Err(MuxError::DisposalCountMismatch {
                frames: frames.len(),
                disposals: disposals.len(),
            });
        }
    }

    let expected = first.layout();
    for (index, frame) in frames.iter().enumerate().skip(1) {
        if frame.layout() != expected {
            return Err(MuxError::MixedPixelLayout {
                index,
                expected,
                found: frame.layout(),
            });
        }
    }

    let canvas = first.bounds();
    for (index, frame) in frames.iter().enumerate() {
        let bounds = frame.bounds();
        if bounds.min_x() < 0 || bounds.min_y() < 0 {
            return Err(MuxError::NegativeOffset {
                index,
                x: bounds.min_x(),
                y: bounds.min_y(),
            });
        }
        if bounds.max_x() > canvas.max_x() || bounds.max_y() > canvas.max_y() {
            return Err(MuxError::FrameOutsideCanvas {
                index,
                max_x: bounds.max_x(),
                max_y: bounds.max_y(),
                canvas_max_x: canvas.max_x(),
                canvas_max_y: canvas.max_y(),
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mux::DisposeOp;
    use crate::{PixelLayout, Raster};

    const PIXELS: [u8; 4 * 4 * 4] = [0; 64];

    fn rgba(width: u32, height: u32) -> Raster<'static> {
        let len = (width * height * 4) as usize;
        Raster::new(&PIXELS[..len], PixelLayout::Rgba8, width, height)
    }

    fn anim(frames: Vec<Raster<'static>>) -> Animation<'static> {
        let mut a = Animation::new(0);
        for f in frames {
            a.push_frame(f, 10);
        }
        a
    }

    #[test]
    fn accepts_nested_frames() {
        let a = anim(vec![rgba(4, 4), rgba(2, 2).at(2, 2), rgba(1, 3).at(0, 1)]);
        assert!(validate(&a).is_ok());
    }

    #[test]
    fn rejects_empty() {
        assert!(matches!(
            validate(&Animation::new(0)),
            Err(MuxError::NoFrames)
        ));
    }

    #[test]
    fn rejects_delay_mismatch() {
        let a = Animation::from_parts(vec![rgba(4, 4), rgba(4, 4)], vec![10], None, 0);
        assert!(matches!(
            validate(&a),
            Err(MuxError::DelayCountMismatch {
                frames: 2,
                delays: 1
            })
        ));
    }

    #[test]
    fn rejects_disposal_mismatch() {
        let a = Animation::from_parts(
            vec![rgba(4, 4)],
            vec![10],
            Some(vec![DisposeOp::None, DisposeOp::Background]),
            0,
        );
        assert!(matches!(
            validate(&a),
            Err(MuxError::DisposalCountMismatch {
                frames: 1,
                disposals: 2
            })
        ));
        // An absent list is fine.
        let a = Animation::from_parts(vec![rgba(4, 4)], vec![10], None, 0);
        assert!(validate(&a).is_ok());
    }

    #[test]
    fn rejects_mixed_layouts() {
        let gray = Raster::new(&PIXELS[..16], PixelLayout::L8, 4, 4);
        let a = anim(vec![rgba(4, 4), rgba(4, 4), gray]);
        assert!(matches!(
            validate(&a),
            Err(MuxError::MixedPixelLayout {
                index: 2,
                expected: PixelLayout::Rgba8,
                found: PixelLayout::L8
            })
        ));
    }

    #[test]
    fn same_channels_different_depth_is_mixed() {
        let wide = Raster::new(&PIXELS[..32], PixelLayout::L16, 4, 4);
        let narrow = Raster::new(&PIXELS[..16], PixelLayout::L8, 4, 4);
        assert!(matches!(
            validate(&anim(vec![wide, narrow])),
            Err(MuxError::MixedPixelLayout { index: 1, .. })
        ));
    }

    #[test]
    fn rejects_negative_first_frame() {
        let a = anim(vec![rgba(4, 4).at(-1, 0)]);
        assert!(matches!(
            validate(&a),
            Err(MuxError::NegativeOffset { index: 0, x: -1, y: 0 })
        ));
    }

    #[test]
    fn rejects_negative_later_frame() {
        let a = anim(vec![rgba(4, 4), rgba(1, 1).at(0, -2)]);
        assert!(matches!(
            validate(&a),
            Err(MuxError::NegativeOffset { index: 1, .. })
        ));
    }

    #[test]
    fn rejects_frame_past_canvas() {
        let a = anim(vec![rgba(4, 4), rgba(2, 2).at(3, 0)]);
        assert!(matches!(
            validate(&a),
            Err(MuxError::FrameOutsideCanvas {
                index: 1,
                max_x: 5,
                canvas_max_x: 4,
                ..
            })
        ));
        let a = anim(vec![rgba(4, 4), rgba(4, 4).at(0, 1)]);
        assert!(validate(&a).is_err());
    }

    #[test]
    fn footprint_check_uses_frame_zero_corner() {
        // Frame 0 offset to (2, 2) puts the canvas corner at (6, 6); a full
        // 4x4 frame at (2, 2) nests inside that footprint.
        let a = anim(vec![rgba(4, 4).at(2, 2), rgba(4, 4).at(2, 2)]);
        assert!(validate(&a).is_ok());
        // Zero-extent frames at the far corner pass too.
        let a = anim(vec![rgba(4, 4), rgba(0, 0).at(4, 4)]);
        assert!(validate(&a).is_ok());
    }
}
