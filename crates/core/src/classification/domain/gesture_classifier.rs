use crate::shared::gesture_label::GestureLabel;
use crate::shared::mask::Mask;

/// Domain interface for turning a segmentation mask into a raw,
/// unstabilized gesture label.
///
/// Classification never fails: geometric problems degrade to
/// [`GestureLabel::Unknown`] or [`GestureLabel::None`].
pub trait GestureClassifier: Send {
    fn classify(&self, mask: &Mask) -> GestureLabel;
}
