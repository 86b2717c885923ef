use crate::classification::domain::contour::Contour;
use crate::classification::domain::convexity::{convexity_defects, hull_indices};
use crate::classification::domain::finger_position::classify_single_finger;
use crate::classification::domain::gesture_classifier::GestureClassifier;
use crate::classification::domain::geometry_error::GeometryError;
use crate::classification::domain::shape_rules::{judge_shape, ShapeVerdict};
use crate::classification::infrastructure::contour_tracer::{
    convex_hull, external_contours, largest_by_area,
};
use crate::shared::config::ClassifierConfig;
use crate::shared::gesture_label::GestureLabel;
use crate::shared::mask::Mask;

/// Classifies the dominant mask region by roundness and finger gaps.
///
/// Pipeline: outer contours → largest by area → circularity → convex hull →
/// convexity defects → [`judge_shape`]. Geometry failures surface as
/// [`GestureLabel::Unknown`].
pub struct ShapeClassifier {
    config: ClassifierConfig,
}

impl ShapeClassifier {
    pub fn new(config: ClassifierConfig) -> Self {
        Self { config }
    }

    fn classify_mask(&self, mask: &Mask) -> Result<GestureLabel, GeometryError> {
        let Some((hand, area)) = largest_by_area(external_contours(mask)?) else {
            return Ok(GestureLabel::None);
        };
        if area < self.config.min_hand_area {
            log::trace!("Largest region too small: area={area:.0}");
            return Ok(GestureLabel::None);
        }
        self.classify_contour(&hand)
    }

    /// Classifies a contour already known to be large enough to be a hand.
    pub fn classify_contour(&self, contour: &Contour) -> Result<GestureLabel, GeometryError> {
        let Some(circularity) = contour.circularity() else {
            return Ok(GestureLabel::Unknown);
        };
        if !circularity.is_finite() {
            return Err(GeometryError::NonFinite {
                quantity: "circularity",
            });
        }

        let hull = hull_indices(contour, &convex_hull(contour));
        let defects = convexity_defects(contour, &hull)?;

        Ok(
            match judge_shape(circularity, hull.len(), &defects, &self.config) {
                ShapeVerdict::Gesture(label) => label,
                ShapeVerdict::SingleFinger => {
                    classify_single_finger(contour, self.config.finger_span_fraction)
                }
            },
        )
    }
}

impl Default for ShapeClassifier {
    fn default() -> Self {
        Self::new(ClassifierConfig::default())
    }
}

impl GestureClassifier for ShapeClassifier {
    fn classify(&self, mask: &Mask) -> GestureLabel {
        self.classify_mask(mask).unwrap_or_else(|e| {
            log::warn!("Shape analysis failed, reporting unknown: {e}");
            GestureLabel::Unknown
        })
    }
}
