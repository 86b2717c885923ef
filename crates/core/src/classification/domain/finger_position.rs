//! Left/right heuristic separating `thumb_up` from `pinky_up` for contours
//! with exactly one raised finger.
//!
//! This is a crude lateral-bias proxy, not real finger identification. Since
//! the center is taken halfway between the horizontal extremes, the right
//! extreme always lies half a span from it, so any contour wider than one
//! pixel resolves to `thumb_up`. The centered case and extraction failures
//! also default to `thumb_up`. Both asymmetries are kept deliberately.

use crate::classification::domain::contour::{Contour, Point};
use crate::classification::domain::geometry_error::GeometryError;
use crate::shared::gesture_label::GestureLabel;

/// Label used when the extremes cannot be extracted or the finger sits
/// dead center.
pub const SINGLE_FINGER_FALLBACK: GestureLabel = GestureLabel::ThumbUp;

/// Outermost contour points. Ties keep the earliest point in contour order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Extremes {
    pub top: Point,
    pub bottom: Point,
    pub left: Point,
    pub right: Point,
}

impl Extremes {
    pub fn of(points: &[Point]) -> Result<Self, GeometryError> {
        let (&first, rest) = points.split_first().ok_or(GeometryError::EmptyContour)?;
        let mut extremes = Extremes {
            top: first,
            bottom: first,
            left: first,
            right: first,
        };
        for &p in rest {
            if p.y < extremes.top.y {
                extremes.top = p;
            }
            if p.y > extremes.bottom.y {
                extremes.bottom = p;
            }
            if p.x < extremes.left.x {
                extremes.left = p;
            }
            if p.x > extremes.right.x {
                extremes.right = p;
            }
        }
        Ok(extremes)
    }

    /// Midpoint between the left and right extremes, rounded down.
    pub fn center_x(&self) -> i32 {
        (self.left.x + self.right.x).div_euclid(2)
    }
}

/// Decides the finger side from horizontal bounds around a given center.
///
/// `right_x` beyond `fraction` of the span right of center → `thumb_up`;
/// otherwise `left_x` beyond the same margin left of center → `pinky_up`;
/// otherwise [`SINGLE_FINGER_FALLBACK`].
pub fn side_from_bounds(left_x: i32, right_x: i32, center_x: i32, fraction: f64) -> GestureLabel {
    let margin = (right_x - left_x) as f64 * fraction;
    if right_x as f64 > center_x as f64 + margin {
        GestureLabel::ThumbUp
    } else if (left_x as f64) < center_x as f64 - margin {
        GestureLabel::PinkyUp
    } else {
        SINGLE_FINGER_FALLBACK
    }
}

pub fn finger_side(contour: &Contour, fraction: f64) -> Result<GestureLabel, GeometryError> {
    let extremes = Extremes::of(contour.points())?;
    Ok(side_from_bounds(
        extremes.left.x,
        extremes.right.x,
        extremes.center_x(),
        fraction,
    ))
}

/// [`finger_side`] with extraction failures collapsed to
/// [`SINGLE_FINGER_FALLBACK`].
pub fn classify_single_finger(contour: &Contour, fraction: f64) -> GestureLabel {
    finger_side(contour, fraction).unwrap_or_else(|e| {
        log::debug!("Finger position fallback to {SINGLE_FINGER_FALLBACK}: {e}");
        SINGLE_FINGER_FALLBACK
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classification::domain::contour::test_shapes::rectangle;
    use rstest::rstest;

    fn pt(x: i32, y: i32) -> Point {
        Point::new(x, y)
    }

    #[test]
    fn test_extremes_of_rectangle() {
        let e = Extremes::of(rectangle(10, 20, 110, 70).points()).unwrap();
        assert_eq!(e.left.x, 10);
        assert_eq!(e.right.x, 110);
        assert_eq!(e.top.y, 20);
        assert_eq!(e.bottom.y, 70);
        assert_eq!(e.center_x(), 60);
    }

    #[test]
    fn test_extremes_ties_keep_first_point() {
        let e = Extremes::of(&[pt(0, 5), pt(0, 9), pt(4, 5)]).unwrap();
        assert_eq!(e.left, pt(0, 5));
        assert_eq!(e.top, pt(0, 5));
    }

    #[test]
    fn test_center_rounds_down() {
        let e = Extremes::of(&[pt(0, 0), pt(5, 0)]).unwrap();
        assert_eq!(e.center_x(), 2);
    }

    #[test]
    fn test_extremes_of_empty_contour_fails() {
        assert_eq!(Extremes::of(&[]), Err(GeometryError::EmptyContour));
    }

    #[rstest]
    #[case::right_of_center(0, 100, 20, GestureLabel::ThumbUp)]
    #[case::left_of_center(0, 100, 80, GestureLabel::PinkyUp)]
    #[case::centered_defaults_to_thumb(0, 100, 50, GestureLabel::ThumbUp)]
    #[case::zero_span(40, 40, 40, GestureLabel::ThumbUp)]
    fn test_side_from_bounds(
        #[case] left: i32,
        #[case] right: i32,
        #[case] center: i32,
        #[case] expected: GestureLabel,
    ) {
        assert_eq!(side_from_bounds(left, right, center, 0.3), expected);
    }

    #[test]
    fn test_centered_case_requires_full_margin() {
        // Right extreme exactly 30% of span from center is not "beyond"
        assert_eq!(side_from_bounds(0, 100, 70, 0.3), GestureLabel::PinkyUp);
        assert_eq!(side_from_bounds(0, 100, 69, 0.3), GestureLabel::ThumbUp);
    }

    #[test]
    fn test_real_contours_resolve_to_thumb_up() {
        let label = finger_side(&rectangle(0, 0, 80, 40), 0.3).unwrap();
        assert_eq!(label, GestureLabel::ThumbUp);
    }

    #[test]
    fn test_empty_contour_falls_back_to_thumb_up() {
        let label = classify_single_finger(&Contour::new(vec![]), 0.3);
        assert_eq!(label, SINGLE_FINGER_FALLBACK);
        assert_eq!(label, GestureLabel::ThumbUp);
    }
}
