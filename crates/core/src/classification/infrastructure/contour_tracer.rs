use imageproc::contours::{find_contours, BorderType};
use imageproc::point::Point as ImagePoint;

use crate::classification::domain::contour::{Contour, Point};
use crate::classification::domain::geometry_error::GeometryError;
use crate::shared::mask::Mask;

/// Traces the outer borders of top-level foreground regions.
///
/// Borders of holes, and regions nested inside holes, are skipped. Any
/// nonzero mask value counts as foreground.
pub fn external_contours(mask: &Mask) -> Result<Vec<Contour>, GeometryError> {
    if mask.is_empty() {
        return Ok(Vec::new());
    }
    let image = mask.to_gray_image().ok_or(GeometryError::MaskLayout {
        width: mask.width(),
        height: mask.height(),
    })?;

    Ok(find_contours::<i32>(&image)
        .into_iter()
        .filter(|c| c.border_type == BorderType::Outer && c.parent.is_none())
        .map(|c| Contour::new(c.points.iter().map(to_point).collect()))
        .collect())
}

/// Convex hull of a contour's points.
pub fn convex_hull(contour: &Contour) -> Vec<Point> {
    let points: Vec<ImagePoint<i32>> = contour
        .points()
        .iter()
        .map(|p| ImagePoint::new(p.x, p.y))
        .collect();
    imageproc::geometry::convex_hull(points.as_slice())
        .iter()
        .map(to_point)
        .collect()
}

/// The contour enclosing the most area. Ties keep the first traced.
pub fn largest_by_area(contours: Vec<Contour>) -> Option<(Contour, f64)> {
    let mut best: Option<(Contour, f64)> = None;
    for contour in contours {
        let area = contour.area();
        if best.as_ref().map_or(true, |(_, a)| area > *a) {
            best = Some((contour, area));
        }
    }
    best
}

fn to_point(p: &ImagePoint<i32>) -> Point {
    Point::new(p.x, p.y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn fill_rect(mask: &mut Mask, x0: usize, y0: usize, x1: usize, y1: usize) {
        for y in y0..y1 {
            for x in x0..x1 {
                mask.set(x, y, 255);
            }
        }
    }

    #[test]
    fn test_empty_mask_has_no_contours() {
        let mask = Mask::empty(50, 50);
        assert!(external_contours(&mask).unwrap().is_empty());
    }

    #[test]
    fn test_one_contour_per_region() {
        let mut mask = Mask::empty(100, 60);
        fill_rect(&mut mask, 5, 5, 25, 25);
        fill_rect(&mut mask, 50, 10, 90, 50);
        assert_eq!(external_contours(&mask).unwrap().len(), 2);
    }

    #[test]
    fn test_hole_and_nested_island_are_ignored() {
        let mut mask = Mask::empty(100, 100);
        fill_rect(&mut mask, 10, 10, 90, 90);
        // Carve a hole and put an island inside it
        for y in 30..70 {
            for x in 30..70 {
                mask.set(x, y, 0);
            }
        }
        fill_rect(&mut mask, 45, 45, 55, 55);
        let contours = external_contours(&mask).unwrap();
        assert_eq!(contours.len(), 1);
        assert_relative_eq!(contours[0].area(), 79.0 * 79.0);
    }

    #[test]
    fn test_soft_edges_count_as_foreground() {
        let mut mask = Mask::empty(40, 40);
        for y in 10..30 {
            for x in 10..30 {
                mask.set(x, y, 3);
            }
        }
        let contours = external_contours(&mask).unwrap();
        assert_eq!(contours.len(), 1);
    }

    #[test]
    fn test_largest_by_area_picks_biggest() {
        let mut mask = Mask::empty(100, 60);
        fill_rect(&mut mask, 5, 5, 15, 15);
        fill_rect(&mut mask, 50, 10, 90, 50);
        let (largest, area) = largest_by_area(external_contours(&mask).unwrap()).unwrap();
        assert_relative_eq!(area, 39.0 * 39.0);
        assert!(largest.points().iter().all(|p| p.x >= 50));
    }

    #[test]
    fn test_largest_by_area_of_nothing() {
        assert!(largest_by_area(Vec::new()).is_none());
    }

    #[test]
    fn test_hull_of_square_region_has_four_corners() {
        let mut mask = Mask::empty(60, 60);
        fill_rect(&mut mask, 10, 10, 50, 50);
        let contours = external_contours(&mask).unwrap();
        let hull = convex_hull(&contours[0]);
        for corner in [
            Point::new(10, 10),
            Point::new(49, 10),
            Point::new(49, 49),
            Point::new(10, 49),
        ] {
            assert!(hull.contains(&corner), "missing corner {corner:?}");
        }
    }
}
