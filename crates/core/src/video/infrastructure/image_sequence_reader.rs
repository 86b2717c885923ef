use std::fs;
use std::path::{Path, PathBuf};

use crate::shared::constants::IMAGE_EXTENSIONS;
use crate::shared::frame::Frame;
use crate::shared::stream_metadata::StreamMetadata;
use crate::video::domain::frame_source::{FrameSource, FrameSourceError};

/// Replays a single still or a directory of stills as a frame stream.
///
/// Directory entries are played in file-name order; files without an image
/// extension are skipped. Frames are decoded lazily with the `image` crate
/// and timed at a fixed `fps`.
pub struct ImageSequenceReader {
    fps: f64,
    paths: Vec<PathBuf>,
}

impl ImageSequenceReader {
    pub fn new(fps: f64) -> Self {
        Self {
            fps,
            paths: Vec::new(),
        }
    }
}

/// Whether `path` has an extension the reader can decode.
pub fn is_image_path(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| IMAGE_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
}

fn list_images(dir: &Path) -> Result<Vec<PathBuf>, FrameSourceError> {
    let list_err = |source| FrameSourceError::List {
        path: dir.to_path_buf(),
        source,
    };
    let mut paths = Vec::new();
    for entry in fs::read_dir(dir).map_err(list_err)? {
        let path = entry.map_err(list_err)?.path();
        if path.is_file() && is_image_path(&path) {
            paths.push(path);
        }
    }
    paths.sort();
    Ok(paths)
}

fn decode(path: &Path, index: usize) -> Result<Frame, FrameSourceError> {
    let rgb = image::open(path)
        .map_err(|source| FrameSourceError::Decode {
            path: path.to_path_buf(),
            source,
        })?
        .to_rgb8();
    let (width, height) = rgb.dimensions();
    Ok(Frame::new(rgb.into_raw(), width, height, 3, index))
}

impl FrameSource for ImageSequenceReader {
    fn open(&mut self, path: &Path) -> Result<StreamMetadata, Box<dyn std::error::Error>> {
        let paths = if path.is_dir() {
            list_images(path)?
        } else {
            vec![path.to_path_buf()]
        };
        let first = paths
            .first()
            .ok_or_else(|| FrameSourceError::NoImages(path.to_path_buf()))?;
        let (width, height) = image::image_dimensions(first).map_err(|source| {
            FrameSourceError::Decode {
                path: first.clone(),
                source,
            }
        })?;

        log::debug!("Opened {} image(s) from {}", paths.len(), path.display());
        let metadata = StreamMetadata {
            width,
            height,
            fps: self.fps,
            total_frames: paths.len(),
            codec: String::new(),
            source_path: Some(path.to_path_buf()),
            live: false,
        };
        self.paths = paths;
        Ok(metadata)
    }

    fn frames(
        &mut self,
    ) -> Box<dyn Iterator<Item = Result<Frame, Box<dyn std::error::Error>>> + '_> {
        if self.paths.is_empty() {
            return Box::new(std::iter::once(Err(FrameSourceError::NotOpened.into())));
        }
        Box::new(self.paths.iter().enumerate().map(
            |(i, p)| -> Result<Frame, Box<dyn std::error::Error>> { Ok(decode(p, i)?) },
        ))
    }

    fn close(&mut self) {
        self.paths.clear();
    }
}
