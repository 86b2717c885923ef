use crate::shared::frame::Frame;
use crate::shared::mask::Mask;

/// Domain interface for isolating the hand region of a frame.
///
/// Segmentation never fails: a frame with nothing hand-colored yields an
/// all-background mask. Implementations must be pure functions of the frame.
pub trait Segmenter: Send {
    fn segment(&self, frame: &Frame) -> Mask;
}
