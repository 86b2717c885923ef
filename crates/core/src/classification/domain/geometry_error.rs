use thiserror::Error;

/// Failures inside contour geometry.
///
/// These never escape the classifier: each call site collapses them into a
/// named fallback label.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    #[error("contour has no points")]
    EmptyContour,
    #[error("mask buffer does not match {width}x{height}")]
    MaskLayout { width: u32, height: u32 },
    #[error("{quantity} is not finite")]
    NonFinite { quantity: &'static str },
    #[error("hull index {index} out of range for a contour of {len} points")]
    HullIndex { index: usize, len: usize },
}
