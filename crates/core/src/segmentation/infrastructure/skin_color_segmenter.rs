use imageproc::morphology::{grayscale_close, grayscale_open, Mask as StructuringElement};
use ndarray::{Array2, Axis, Zip};

use crate::segmentation::domain::segmenter::Segmenter;
use crate::segmentation::infrastructure::gaussian::{blur_single_channel, gaussian_kernel_1d};
use crate::segmentation::infrastructure::hsv::rgb_to_hsv;
use crate::segmentation::infrastructure::morphology::elliptical_element;
use crate::shared::config::{SegmentationConfig, SkinRange};
use crate::shared::frame::Frame;
use crate::shared::mask::Mask;

/// Skin-tone segmenter: HSV threshold → closing → opening → Gaussian smoothing.
///
/// The structuring element and blur kernel are built once at construction.
pub struct SkinColorSegmenter {
    skin: SkinRange,
    element: StructuringElement,
    blur_kernel: Vec<f32>,
}

impl SkinColorSegmenter {
    pub fn new(config: &SegmentationConfig) -> Self {
        Self {
            skin: config.skin.clone(),
            element: elliptical_element(config.morph_kernel_size),
            blur_kernel: gaussian_kernel_1d(config.blur_kernel_size),
        }
    }

    /// Raw skin-tone threshold before any cleanup: 255 inside the band, 0 outside.
    pub fn threshold(&self, frame: &Frame) -> Mask {
        let pixels = frame.as_ndarray();
        let mut out = Array2::<u8>::zeros((frame.height() as usize, frame.width() as usize));
        Zip::from(&mut out)
            .and(pixels.lanes(Axis(2)))
            .for_each(|m, px| {
                let rgb = if px.len() >= 3 {
                    [px[0], px[1], px[2]]
                } else {
                    [px[0]; 3]
                };
                if self.skin.contains(rgb_to_hsv(rgb)) {
                    *m = 255;
                }
            });
        Mask::from_array(out)
    }
}

impl Default for SkinColorSegmenter {
    fn default() -> Self {
        Self::new(&SegmentationConfig::default())
    }
}

impl Segmenter for SkinColorSegmenter {
    fn segment(&self, frame: &Frame) -> Mask {
        let width = frame.width() as usize;
        let height = frame.height() as usize;
        let raw = self.threshold(frame);
        if raw.is_empty() {
            return raw;
        }

        let Some(gray) = raw.to_gray_image() else {
            return Mask::empty(frame.width(), frame.height());
        };
        let closed = grayscale_close(&gray, &self.element);
        let mut cleaned = grayscale_open(&closed, &self.element).into_raw();

        let mut temp = Vec::new();
        blur_single_channel(&mut cleaned, width, height, &self.blur_kernel, &mut temp);

        Mask::from_vec(cleaned, frame.width(), frame.height())
            .unwrap_or_else(|| Mask::empty(frame.width(), frame.height()))
    }
}
