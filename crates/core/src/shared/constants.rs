//! Default tuning values.
//!
//! Thresholds assume a 640x480 capture with the hand at arm's length under
//! ordinary indoor lighting. All of them can be overridden via
//! [`crate::shared::config::AppConfig`].

/// Skin-tone band in OpenCV 8-bit HSV units (hue 0-180).
pub const SKIN_HUE_RANGE: [u8; 2] = [0, 20];
pub const SKIN_SATURATION_RANGE: [u8; 2] = [20, 255];
pub const SKIN_VALUE_RANGE: [u8; 2] = [70, 255];

/// Elliptical structuring element used for closing and opening.
pub const MORPH_KERNEL_SIZE: usize = 11;
/// Largest structuring element side the morphology stage accepts.
pub const MAX_MORPH_KERNEL_SIZE: usize = 255;
pub const MASK_BLUR_KERNEL_SIZE: usize = 5;

/// Contours enclosing less than this many square pixels are ignored.
pub const MIN_HAND_AREA: f64 = 5000.0;

/// Convexity-defect depth (1/256 px units) above which a gap counts as a finger.
pub const FINGER_DEFECT_DEPTH: f64 = 10000.0;

pub const FIST_CIRCULARITY: f64 = 0.7;
pub const OPEN_HAND_MIN_FINGERS: usize = 4;
pub const FINGER_SPAN_FRACTION: f64 = 0.3;

/// Consecutive identical raw labels needed before a gesture is confirmed.
pub const STABILITY_FRAMES: usize = 3;

pub const HOLD_SECS: f64 = 1.0;
pub const COOLDOWN_SECS: f64 = 1.0;
pub const SKIP_SECONDS: u32 = 10;

pub const CAPTURE_WIDTH: u32 = 640;
pub const CAPTURE_HEIGHT: u32 = 480;
pub const CAPTURE_FPS: u32 = 30;

pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "bmp", "tiff", "tif", "webp"];
