use image::GrayImage;
use ndarray::{Array2, ArrayView2};

/// Single-channel segmentation result with the same size as its source frame.
///
/// Any nonzero value is foreground. Values between 0 and 255 appear only
/// along region edges after smoothing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Mask {
    pixels: Array2<u8>,
}

impl Mask {
    /// An all-background mask.
    pub fn empty(width: u32, height: u32) -> Self {
        Self {
            pixels: Array2::zeros((height as usize, width as usize)),
        }
    }

    /// Wraps a `(height, width)` array.
    pub fn from_array(pixels: Array2<u8>) -> Self {
        Self { pixels }
    }

    pub fn width(&self) -> u32 {
        self.pixels.ncols() as u32
    }

    pub fn height(&self) -> u32 {
        self.pixels.nrows() as u32
    }

    pub fn get(&self, x: usize, y: usize) -> u8 {
        self.pixels[[y, x]]
    }

    pub fn set(&mut self, x: usize, y: usize, value: u8) {
        self.pixels[[y, x]] = value;
    }

    pub fn as_ndarray(&self) -> ArrayView2<'_, u8> {
        self.pixels.view()
    }

    pub fn foreground_count(&self) -> usize {
        self.pixels.iter().filter(|&&v| v != 0).count()
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.iter().all(|&v| v == 0)
    }

    /// Row-major copy for image-processing routines that work on flat buffers.
    pub fn to_vec(&self) -> Vec<u8> {
        self.pixels.iter().copied().collect()
    }

    /// Rebuilds a mask from a row-major buffer produced by [`Mask::to_vec`].
    pub fn from_vec(data: Vec<u8>, width: u32, height: u32) -> Option<Self> {
        Array2::from_shape_vec((height as usize, width as usize), data)
            .ok()
            .map(Self::from_array)
    }

    /// Converts to an `image` gray buffer for contour tracing.
    pub fn to_gray_image(&self) -> Option<GrayImage> {
        GrayImage::from_raw(self.width(), self.height(), self.to_vec())
    }
}
