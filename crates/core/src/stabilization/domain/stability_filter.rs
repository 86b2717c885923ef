use crate::shared::constants::STABILITY_FRAMES;
use crate::shared::gesture_label::GestureLabel;

/// Domain interface for temporal debouncing of per-frame labels.
pub trait GestureStabilizer: Send {
    /// Feeds one raw label. Returns the label once it is stable, `None` while
    /// it is still settling.
    fn stabilize(&mut self, raw: GestureLabel) -> Option<GestureLabel>;
}

/// Emits a label only after it has been seen on `threshold` consecutive
/// frames.
///
/// A stable [`GestureLabel::None`] is emitted like any other label and is
/// distinct from "nothing emitted". State belongs to a single owner and is
/// mutated through `&mut self` only.
pub struct StabilityFilter {
    threshold: usize,
    last_raw: Option<GestureLabel>,
    match_count: usize,
}

impl StabilityFilter {
    pub fn new(threshold: usize) -> Self {
        Self {
            threshold: threshold.max(1),
            last_raw: None,
            match_count: 0,
        }
    }
}

impl Default for StabilityFilter {
    fn default() -> Self {
        Self::new(STABILITY_FRAMES)
    }
}

impl GestureStabilizer for StabilityFilter {
    fn stabilize(&mut self, raw: GestureLabel) -> Option<GestureLabel> {
        if self.last_raw == Some(raw) {
            self.match_count = self.match_count.saturating_add(1);
        } else {
            self.last_raw = Some(raw);
            self.match_count = 1;
        }

        (self.match_count >= self.threshold).then_some(raw)
    }
}
