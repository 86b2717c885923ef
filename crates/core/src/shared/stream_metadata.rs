use std::path::PathBuf;

/// Properties of an opened frame source.
///
/// Live devices report `total_frames = 0` because their length is unbounded.
#[derive(Clone, Debug, PartialEq)]
pub struct StreamMetadata {
    pub width: u32,
    pub height: u32,
    pub fps: f64,
    pub total_frames: usize,
    pub codec: String,
    pub source_path: Option<PathBuf>,
    pub live: bool,
}

impl StreamMetadata {
    /// Seconds between consecutive frames, if the rate is known.
    pub fn frame_interval(&self) -> Option<f64> {
        (self.fps > 0.0).then(|| 1.0 / self.fps)
    }
}
