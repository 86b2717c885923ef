use std::collections::HashMap;

use crate::classification::domain::contour::{Contour, Point};
use crate::classification::domain::geometry_error::GeometryError;

/// Fixed-point scale of [`ConvexityDefect::depth`]: depths are stored in
/// 1/256 pixel units.
pub const DEPTH_SCALE: f64 = 256.0;

/// A stretch of contour that dips inward between two consecutive hull
/// vertices.
#[derive(Clone, Debug, PartialEq)]
pub struct ConvexityDefect {
    /// Contour index of the hull vertex where the dip starts.
    pub start: usize,
    /// Contour index of the hull vertex where the dip ends.
    pub end: usize,
    /// Contour index of the point farthest from the hull edge.
    pub farthest: usize,
    /// Distance from `farthest` to the hull edge, in 1/256 px.
    pub depth: f64,
}

/// Maps hull vertices back to their positions in the contour.
///
/// Each hull point resolves to its first occurrence in the contour. Returns
/// sorted, de-duplicated indices so defects can be found by walking the
/// contour forward.
pub fn hull_indices(contour: &Contour, hull: &[Point]) -> Vec<usize> {
    let mut first_seen: HashMap<Point, usize> = HashMap::with_capacity(contour.len());
    for (i, &p) in contour.points().iter().enumerate() {
        first_seen.entry(p).or_insert(i);
    }
    let mut indices: Vec<usize> = hull
        .iter()
        .filter_map(|p| first_seen.get(p).copied())
        .collect();
    indices.sort_unstable();
    indices.dedup();
    indices
}

/// Finds, for every pair of consecutive hull vertices, the contour point
/// lying deepest inside the hull.
///
/// Hull edges whose intermediate points all sit on the edge produce no
/// defect. `hull` must hold ascending contour indices.
pub fn convexity_defects(
    contour: &Contour,
    hull: &[usize],
) -> Result<Vec<ConvexityDefect>, GeometryError> {
    let points = contour.points();
    let n = points.len();
    if n == 0 {
        return Err(GeometryError::EmptyContour);
    }
    if let Some(&index) = hull.iter().find(|&&i| i >= n) {
        return Err(GeometryError::HullIndex { index, len: n });
    }
    if hull.len() < 3 {
        return Ok(Vec::new());
    }

    let mut defects = Vec::new();
    for (k, &start) in hull.iter().enumerate() {
        let end = hull[(k + 1) % hull.len()];
        let p0 = points[start];
        let p1 = points[end];
        let dx0 = (p1.x - p0.x) as f64;
        let dy0 = (p1.y - p0.y) as f64;
        let edge = dx0.hypot(dy0);
        let scale = if edge == 0.0 { 0.0 } else { 1.0 / edge };

        let mut deepest: Option<(usize, f64)> = None;
        let mut j = (start + 1) % n;
        while j != end {
            let dx = (points[j].x - p0.x) as f64;
            let dy = (points[j].y - p0.y) as f64;
            let dist = (dx0 * dy - dy0 * dx).abs() * scale;
            if dist > deepest.map_or(0.0, |(_, d)| d) {
                deepest = Some((j, dist));
            }
            j = (j + 1) % n;
        }

        if let Some((farthest, dist)) = deepest {
            defects.push(ConvexityDefect {
                start,
                end,
                farthest,
                depth: (dist * DEPTH_SCALE).round(),
            });
        }
    }
    Ok(defects)
}

/// Number of defects deeper than `min_depth` (1/256 px units).
pub fn count_fingers(defects: &[ConvexityDefect], min_depth: f64) -> usize {
    defects.iter().filter(|d| d.depth > min_depth).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn contour(points: &[(i32, i32)]) -> Contour {
        Contour::new(points.iter().map(|&(x, y)| Point::new(x, y)).collect())
    }

    /// A "U" notch: square 0..100 with a 40 px deep slot cut into the top edge.
    fn notched_square() -> Contour {
        contour(&[
            (0, 0),
            (40, 0),
            (50, 40),
            (60, 0),
            (100, 0),
            (100, 100),
            (0, 100),
        ])
    }

    #[test]
    fn test_hull_indices_are_sorted_first_occurrences() {
        let c = contour(&[(0, 0), (5, 1), (10, 0), (10, 10), (0, 10), (0, 0)]);
        let hull = vec![
            Point::new(10, 10),
            Point::new(0, 0),
            Point::new(10, 0),
            Point::new(0, 10),
        ];
        assert_eq!(hull_indices(&c, &hull), vec![0, 2, 3, 4]);
    }

    #[test]
    fn test_hull_points_missing_from_contour_are_skipped() {
        let c = contour(&[(0, 0), (10, 0), (10, 10)]);
        let hull = vec![Point::new(0, 0), Point::new(99, 99)];
        assert_eq!(hull_indices(&c, &hull), vec![0]);
    }

    #[test]
    fn test_convex_shape_has_no_defects() {
        let c = contour(&[(0, 0), (10, 0), (20, 0), (20, 20), (0, 20)]);
        let defects = convexity_defects(&c, &[0, 2, 3, 4]).unwrap();
        assert!(defects.is_empty());
    }

    #[test]
    fn test_notch_depth_in_fixed_point() {
        let c = notched_square();
        let defects = convexity_defects(&c, &[0, 4, 5, 6]).unwrap();
        assert_eq!(defects.len(), 1);
        let d = &defects[0];
        assert_eq!((d.start, d.end, d.farthest), (0, 4, 2));
        assert_relative_eq!(d.depth, 40.0 * DEPTH_SCALE);
        assert_relative_eq!(d.depth / DEPTH_SCALE, 40.0);
    }

    #[test]
    fn test_wraparound_edge_is_scanned() {
        // Notch sits between the last hull vertex and the first one
        let c = contour(&[(100, 0), (100, 100), (0, 100), (0, 0), (40, 0), (50, 30), (60, 0)]);
        let defects = convexity_defects(&c, &[0, 1, 2, 3]).unwrap();
        assert_eq!(defects.len(), 1);
        assert_eq!(defects[0].farthest, 5);
        assert_relative_eq!(defects[0].depth / DEPTH_SCALE, 30.0);
    }

    #[test]
    fn test_small_hull_yields_no_defects() {
        let c = notched_square();
        assert!(convexity_defects(&c, &[0, 4]).unwrap().is_empty());
    }

    #[test]
    fn test_out_of_range_hull_index_is_error() {
        let c = notched_square();
        let err = convexity_defects(&c, &[0, 4, 50]).unwrap_err();
        assert_eq!(err, GeometryError::HullIndex { index: 50, len: 7 });
    }

    #[test]
    fn test_empty_contour_is_error() {
        let c = Contour::new(vec![]);
        assert_eq!(
            convexity_defects(&c, &[]).unwrap_err(),
            GeometryError::EmptyContour
        );
    }

    #[test]
    fn test_count_fingers_uses_strict_threshold() {
        let defect = |depth| ConvexityDefect {
            start: 0,
            end: 1,
            farthest: 0,
            depth,
        };
        let defects = vec![defect(9_999.0), defect(10_000.0), defect(10_001.0), defect(40_000.0)];
        assert_eq!(count_fingers(&defects, 10_000.0), 2);
    }
}
