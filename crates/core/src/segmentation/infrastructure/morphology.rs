//! Elliptical structuring elements for imageproc's grayscale morphology.
//!
//! `grayscale_close` and `grayscale_open` ignore pixels outside the image
//! rather than padding them, so borders neither grow nor shrink regions.

use image::{GrayImage, Luma};
use imageproc::morphology::Mask as StructuringElement;

use crate::shared::constants::MAX_MORPH_KERNEL_SIZE;

/// Footprint of an ellipse inscribed in a `size`×`size` square, 255 inside.
/// Sizes above [`MAX_MORPH_KERNEL_SIZE`] are clamped.
///
/// Row extents follow OpenCV's `MORPH_ELLIPSE` construction.
pub fn ellipse_footprint(size: usize) -> GrayImage {
    let size = size.clamp(1, MAX_MORPH_KERNEL_SIZE);
    let r = (size / 2) as i64;
    let inv_r2 = if r > 0 { 1.0 / (r * r) as f64 } else { 0.0 };

    let mut footprint = GrayImage::new(size as u32, size as u32);
    for i in 0..size as i64 {
        let dy = i - r;
        let dx = if r > 0 {
            let t = ((r * r - dy * dy) as f64 * inv_r2).max(0.0);
            (r as f64 * t.sqrt()).round() as i64
        } else {
            0
        };
        let j1 = (r - dx).max(0);
        let j2 = (r + dx + 1).min(size as i64);
        for j in j1..j2 {
            footprint.put_pixel(j as u32, i as u32, Luma([255]));
        }
    }
    footprint
}

/// Elliptical element centered on its middle pixel.
pub fn elliptical_element(size: usize) -> StructuringElement {
    let footprint = ellipse_footprint(size);
    let center = (footprint.width() / 2) as u8;
    StructuringElement::from_image(&footprint, center, center)
}

#[cfg(test)]
mod tests {
    use super::*;
    use imageproc::morphology::{grayscale_close, grayscale_open};

    fn square(width: u32, height: u32, x0: u32, y0: u32, side: u32) -> GrayImage {
        GrayImage::from_fn(width, height, |x, y| {
            let inside = x >= x0 && x < x0 + side && y >= y0 && y < y0 + side;
            Luma([if inside { 255 } else { 0 }])
        })
    }

    fn row(footprint: &GrayImage, y: u32) -> Vec<u32> {
        (0..footprint.width())
            .filter(|&x| footprint.get_pixel(x, y)[0] != 0)
            .collect()
    }

    #[test]
    fn test_footprint_size_1_is_single_pixel() {
        let footprint = ellipse_footprint(1);
        assert_eq!(footprint.dimensions(), (1, 1));
        assert_eq!(footprint.get_pixel(0, 0)[0], 255);
    }

    #[test]
    fn test_footprint_11_shape() {
        let footprint = ellipse_footprint(11);
        // Top and bottom rows hold only the center column
        assert_eq!(row(&footprint, 0), vec![5]);
        assert_eq!(row(&footprint, 10), vec![5]);
        // Middle row spans the full width
        assert_eq!(row(&footprint, 5).len(), 11);
        let area = footprint.pixels().filter(|p| p[0] != 0).count();
        assert_eq!(area, 89);
    }

    #[test]
    fn test_footprint_is_symmetric() {
        let footprint = ellipse_footprint(11);
        for (x, y, p) in footprint.enumerate_pixels() {
            assert_eq!(p[0], footprint.get_pixel(10 - x, y)[0]);
            assert_eq!(p[0], footprint.get_pixel(x, 10 - y)[0]);
        }
    }

    #[test]
    fn test_oversized_footprint_is_clamped() {
        let footprint = ellipse_footprint(1001);
        assert_eq!(footprint.width() as usize, MAX_MORPH_KERNEL_SIZE);
    }

    #[test]
    fn test_open_removes_small_speck() {
        let opened = grayscale_open(&square(30, 30, 10, 10, 3), &elliptical_element(11));
        assert!(opened.pixels().all(|p| p[0] == 0));
    }

    #[test]
    fn test_open_keeps_large_block_core() {
        let opened = grayscale_open(&square(60, 60, 10, 10, 30), &elliptical_element(11));
        assert_eq!(opened.get_pixel(25, 25)[0], 255);
        assert_eq!(opened.get_pixel(5, 5)[0], 0);
    }

    #[test]
    fn test_close_fills_small_hole() {
        let mut image = square(60, 60, 10, 10, 30);
        image.put_pixel(25, 25, Luma([0]));
        image.put_pixel(26, 25, Luma([0]));
        let closed = grayscale_close(&image, &elliptical_element(11));
        assert_eq!(closed.get_pixel(25, 25)[0], 255);
        assert_eq!(closed.get_pixel(26, 25)[0], 255);
    }

    #[test]
    fn test_border_region_survives_close() {
        let closed = grayscale_close(&square(40, 40, 0, 0, 20), &elliptical_element(11));
        assert_eq!(closed.get_pixel(0, 0)[0], 255);
        assert_eq!(closed.get_pixel(19, 19)[0], 255);
    }
}
