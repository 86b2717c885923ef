pub mod gaussian;
pub mod hsv;
pub mod morphology;
pub mod skin_color_segmenter;
