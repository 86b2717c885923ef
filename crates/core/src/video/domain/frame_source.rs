use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::shared::frame::Frame;
use crate::shared::stream_metadata::StreamMetadata;

#[derive(Error, Debug)]
pub enum FrameSourceError {
    #[error("frame source not opened")]
    NotOpened,
    #[error("no video stream in {0}")]
    NoVideoStream(PathBuf),
    #[error("no images found in {0}")]
    NoImages(PathBuf),
    #[error("failed to list {path}: {source}")]
    List {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to decode {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

/// Produces frames from a camera, a video file or a set of stills.
///
/// Implementations handle I/O details (device negotiation, codec, container
/// format) while the pipeline works with the abstract `Frame` and
/// `StreamMetadata` types.
pub trait FrameSource: Send {
    /// Opens the source and returns its metadata.
    fn open(&mut self, path: &Path) -> Result<StreamMetadata, Box<dyn std::error::Error>>;

    /// Returns an iterator over frames in capture order.
    fn frames(
        &mut self,
    ) -> Box<dyn Iterator<Item = Result<Frame, Box<dyn std::error::Error>>> + '_>;

    /// Releases any resources held by the source.
    fn close(&mut self);
}
