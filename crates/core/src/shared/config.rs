use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::control::domain::media_command::KeyMap;
use crate::shared::constants::*;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Inclusive HSV band, OpenCV 8-bit units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkinRange {
    pub hue: [u8; 2],
    pub saturation: [u8; 2],
    pub value: [u8; 2],
}

impl Default for SkinRange {
    fn default() -> Self {
        Self {
            hue: SKIN_HUE_RANGE,
            saturation: SKIN_SATURATION_RANGE,
            value: SKIN_VALUE_RANGE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SegmentationConfig {
    pub skin: SkinRange,
    pub morph_kernel_size: usize,
    pub blur_kernel_size: usize,
}

impl Default for SegmentationConfig {
    fn default() -> Self {
        Self {
            skin: SkinRange::default(),
            morph_kernel_size: MORPH_KERNEL_SIZE,
            blur_kernel_size: MASK_BLUR_KERNEL_SIZE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    pub min_hand_area: f64,
    pub finger_defect_depth: f64,
    pub fist_circularity: f64,
    pub open_hand_min_fingers: usize,
    pub finger_span_fraction: f64,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            min_hand_area: MIN_HAND_AREA,
            finger_defect_depth: FINGER_DEFECT_DEPTH,
            fist_circularity: FIST_CIRCULARITY,
            open_hand_min_fingers: OPEN_HAND_MIN_FINGERS,
            finger_span_fraction: FINGER_SPAN_FRACTION,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecognitionConfig {
    pub segmentation: SegmentationConfig,
    pub classifier: ClassifierConfig,
    pub stability_frames: usize,
}

impl Default for RecognitionConfig {
    fn default() -> Self {
        Self {
            segmentation: SegmentationConfig::default(),
            classifier: ClassifierConfig::default(),
            stability_frames: STABILITY_FRAMES,
        }
    }
}

/// Key names sent for each command. Parsed into a [`KeyMap`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    pub toggle_pause: String,
    pub toggle_play: String,
    pub skip_forward: String,
    pub skip_back: String,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            toggle_pause: "space".to_string(),
            toggle_play: "space".to_string(),
            skip_forward: "l".to_string(),
            skip_back: "j".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DispatchConfig {
    pub hold_secs: f64,
    pub cooldown_secs: f64,
    pub skip_seconds: u32,
    pub keys: KeyBindings,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            hold_secs: HOLD_SECS,
            cooldown_secs: COOLDOWN_SECS,
            skip_seconds: SKIP_SECONDS,
            keys: KeyBindings::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaptureConfig {
    pub width: u32,
    pub height: u32,
    pub fps: u32,
    /// Flip frames left-to-right before detection.
    pub mirror: bool,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            width: CAPTURE_WIDTH,
            height: CAPTURE_HEIGHT,
            fps: CAPTURE_FPS,
            mirror: true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub recognition: RecognitionConfig,
    pub dispatch: DispatchConfig,
    pub capture: CaptureConfig,
}

impl AppConfig {
    /// Platform config location, e.g. `~/.config/Gesture Remote/config.json`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("Gesture Remote").join("config.json"))
    }

    /// Loads and validates a JSON config file. Missing fields take defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: AppConfig =
            serde_json::from_str(&json).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Loads `path` if given, else the platform default if it exists, else
    /// built-in defaults.
    pub fn resolve(path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = path {
            return Self::load(path);
        }
        match Self::default_path() {
            Some(default) if default.exists() => {
                log::info!("Loading config from {}", default.display());
                Self::load(&default)
            }
            _ => Ok(Self::default()),
        }
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ConfigError::Invalid(format!("cannot serialize config: {e}")))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let seg = &self.recognition.segmentation;
        for (name, range) in [
            ("hue", seg.skin.hue),
            ("saturation", seg.skin.saturation),
            ("value", seg.skin.value),
        ] {
            if range[0] > range[1] {
                return invalid(format!(
                    "skin {name} range is inverted: [{}, {}]",
                    range[0], range[1]
                ));
            }
        }
        if seg.skin.hue[1] > 180 {
            return invalid(format!(
                "skin hue upper bound must be <= 180, got {}",
                seg.skin.hue[1]
            ));
        }
        for (name, size) in [
            ("morph_kernel_size", seg.morph_kernel_size),
            ("blur_kernel_size", seg.blur_kernel_size),
        ] {
            if size == 0 || size % 2 == 0 {
                return invalid(format!("{name} must be a positive odd integer, got {size}"));
            }
        }
        if seg.morph_kernel_size > MAX_MORPH_KERNEL_SIZE {
            return invalid(format!(
                "morph_kernel_size must be <= {MAX_MORPH_KERNEL_SIZE}, got {}",
                seg.morph_kernel_size
            ));
        }

        let cls = &self.recognition.classifier;
        if !(cls.min_hand_area >= 0.0) {
            return invalid(format!(
                "min_hand_area must be >= 0, got {}",
                cls.min_hand_area
            ));
        }
        if !(cls.finger_defect_depth > 0.0) {
            return invalid(format!(
                "finger_defect_depth must be > 0, got {}",
                cls.finger_defect_depth
            ));
        }
        if !(0.0..=1.0).contains(&cls.fist_circularity) {
            return invalid(format!(
                "fist_circularity must be between 0.0 and 1.0, got {}",
                cls.fist_circularity
            ));
        }
        if cls.open_hand_min_fingers < 2 {
            return invalid(format!(
                "open_hand_min_fingers must be >= 2, got {}",
                cls.open_hand_min_fingers
            ));
        }
        if !(0.0..=0.5).contains(&cls.finger_span_fraction) {
            return invalid(format!(
                "finger_span_fraction must be between 0.0 and 0.5, got {}",
                cls.finger_span_fraction
            ));
        }
        if self.recognition.stability_frames == 0 {
            return invalid("stability_frames must be >= 1".to_string());
        }

        let dispatch = &self.dispatch;
        if !(dispatch.hold_secs >= 0.0) || !(dispatch.cooldown_secs >= 0.0) {
            return invalid(format!(
                "hold_secs and cooldown_secs must be >= 0, got {} and {}",
                dispatch.hold_secs, dispatch.cooldown_secs
            ));
        }
        KeyMap::from_bindings(&dispatch.keys).map_err(ConfigError::Invalid)?;

        let capture = &self.capture;
        if capture.width == 0 || capture.height == 0 || capture.fps == 0 {
            return invalid(format!(
                "capture size and fps must be positive, got {}x{} @ {}",
                capture.width, capture.height, capture.fps
            ));
        }
        Ok(())
    }
}

fn invalid(message: String) -> Result<(), ConfigError> {
    Err(ConfigError::Invalid(message))
}
