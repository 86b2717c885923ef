use crate::classification::domain::convexity::{count_fingers, ConvexityDefect};
use crate::shared::config::ClassifierConfig;
use crate::shared::gesture_label::GestureLabel;

/// Minimum hull size for convexity defects to be meaningful.
pub const MIN_HULL_VERTICES: usize = 4;

/// Outcome of the shape rules before the finger-position heuristic runs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShapeVerdict {
    Gesture(GestureLabel),
    /// Exactly one finger: the caller must decide left vs. right.
    SingleFinger,
}

/// Roundness-only rule used when defects are unavailable.
pub fn circularity_fallback(circularity: f64, config: &ClassifierConfig) -> GestureLabel {
    if circularity > config.fist_circularity {
        GestureLabel::Fist
    } else {
        GestureLabel::OpenHand
    }
}

/// Maps circularity, hull size and convexity defects to a verdict.
///
/// A hull smaller than [`MIN_HULL_VERTICES`] or a contour with no defects at
/// all falls back to [`circularity_fallback`].
pub fn judge_shape(
    circularity: f64,
    hull_vertices: usize,
    defects: &[ConvexityDefect],
    config: &ClassifierConfig,
) -> ShapeVerdict {
    if hull_vertices < MIN_HULL_VERTICES || defects.is_empty() {
        return ShapeVerdict::Gesture(circularity_fallback(circularity, config));
    }

    let fingers = count_fingers(defects, config.finger_defect_depth);
    log::debug!("Shape: circularity={circularity:.3} hull={hull_vertices} fingers={fingers}");

    if fingers == 0 && circularity > config.fist_circularity {
        ShapeVerdict::Gesture(GestureLabel::Fist)
    } else if fingers >= config.open_hand_min_fingers {
        ShapeVerdict::Gesture(GestureLabel::OpenHand)
    } else if fingers == 1 {
        ShapeVerdict::SingleFinger
    } else {
        ShapeVerdict::Gesture(GestureLabel::Unknown)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn defects(depths: &[f64]) -> Vec<ConvexityDefect> {
        depths
            .iter()
            .enumerate()
            .map(|(i, &depth)| ConvexityDefect {
                start: i,
                end: i + 1,
                farthest: i,
                depth,
            })
            .collect()
    }

    const SHALLOW: f64 = 500.0;
    const DEEP: f64 = 20_000.0;

    #[rstest]
    #[case::round_fist(0.8, &[SHALLOW], GestureLabel::Fist)]
    #[case::jagged_no_fingers(0.5, &[SHALLOW], GestureLabel::Unknown)]
    #[case::four_fingers(0.3, &[DEEP, DEEP, DEEP, DEEP], GestureLabel::OpenHand)]
    #[case::five_fingers(0.3, &[DEEP, DEEP, DEEP, DEEP, DEEP, SHALLOW], GestureLabel::OpenHand)]
    #[case::two_fingers(0.4, &[DEEP, DEEP, SHALLOW], GestureLabel::Unknown)]
    #[case::three_fingers(0.4, &[DEEP, DEEP, DEEP], GestureLabel::Unknown)]
    fn test_defect_rules(
        #[case] circularity: f64,
        #[case] depths: &[f64],
        #[case] expected: GestureLabel,
    ) {
        let verdict = judge_shape(circularity, 10, &defects(depths), &ClassifierConfig::default());
        assert_eq!(verdict, ShapeVerdict::Gesture(expected));
    }

    #[test]
    fn test_one_finger_defers_to_position_heuristic() {
        let verdict = judge_shape(
            0.5,
            10,
            &defects(&[DEEP, SHALLOW]),
            &ClassifierConfig::default(),
        );
        assert_eq!(verdict, ShapeVerdict::SingleFinger);
    }

    #[rstest]
    #[case::round(0.9, GestureLabel::Fist)]
    #[case::at_threshold(0.7, GestureLabel::OpenHand)]
    #[case::elongated(0.4, GestureLabel::OpenHand)]
    fn test_small_hull_uses_circularity_only(
        #[case] circularity: f64,
        #[case] expected: GestureLabel,
    ) {
        let verdict = judge_shape(
            circularity,
            3,
            &defects(&[DEEP, DEEP, DEEP, DEEP]),
            &ClassifierConfig::default(),
        );
        assert_eq!(verdict, ShapeVerdict::Gesture(expected));
    }

    #[test]
    fn test_no_defects_uses_circularity_only() {
        let config = ClassifierConfig::default();
        assert_eq!(
            judge_shape(0.5, 12, &[], &config),
            ShapeVerdict::Gesture(GestureLabel::OpenHand)
        );
        assert_eq!(
            judge_shape(0.85, 12, &[], &config),
            ShapeVerdict::Gesture(GestureLabel::Fist)
        );
    }

    #[test]
    fn test_thresholds_come_from_config() {
        let config = ClassifierConfig {
            finger_defect_depth: 100.0,
            ..ClassifierConfig::default()
        };
        let verdict = judge_shape(0.3, 10, &defects(&[SHALLOW; 4]), &config);
        assert_eq!(verdict, ShapeVerdict::Gesture(GestureLabel::OpenHand));
    }
}
