use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::control::domain::action_dispatcher::ActionDispatcher;
use crate::control::domain::media_command::MediaCommand;
use crate::pipeline::gesture_detector::GestureDetector;
use crate::pipeline::pipeline_logger::PipelineLogger;
use crate::shared::constants::CAPTURE_FPS;
use crate::shared::gesture_label::GestureLabel;
use crate::shared::stream_metadata::StreamMetadata;
use crate::video::domain::frame_source::FrameSource;

/// Something the user should see while the loop runs.
#[derive(Clone, Debug, PartialEq)]
pub enum PlaybackEvent {
    /// The stable gesture changed.
    GestureChanged(GestureLabel),
    /// A media key was sent.
    CommandFired(MediaCommand),
    /// A key could not be sent; the loop keeps going.
    KeyFailed(String),
}

/// What happened during one run.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RunSummary {
    pub frames: usize,
    /// Frames on which each label was the stable label.
    pub stable_counts: HashMap<GestureLabel, usize>,
    pub commands: Vec<MediaCommand>,
    pub key_failures: usize,
}

pub type ProgressCallback = Box<dyn Fn(usize, usize) -> bool + Send>;
pub type EventCallback = Box<dyn Fn(&PlaybackEvent) + Send>;

/// Drives the recognition loop: read → mirror → detect → dispatch.
///
/// Stops at end of stream, on a frame-source error, when `on_progress`
/// returns `false`, or when `cancelled` is set.
pub struct ControlPlaybackUseCase {
    source: Box<dyn FrameSource>,
    detector: GestureDetector,
    dispatcher: ActionDispatcher,
    logger: Box<dyn PipelineLogger>,
    mirror: bool,
    on_progress: Option<ProgressCallback>,
    on_event: Option<EventCallback>,
    cancelled: Arc<AtomicBool>,
}

impl ControlPlaybackUseCase {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        source: Box<dyn FrameSource>,
        detector: GestureDetector,
        dispatcher: ActionDispatcher,
        logger: Box<dyn PipelineLogger>,
        mirror: bool,
        on_progress: Option<ProgressCallback>,
        on_event: Option<EventCallback>,
        cancelled: Option<Arc<AtomicBool>>,
    ) -> Self {
        Self {
            source,
            detector,
            dispatcher,
            logger,
            mirror,
            on_progress,
            on_event,
            cancelled: cancelled.unwrap_or_else(|| Arc::new(AtomicBool::new(false))),
        }
    }

    pub fn execute(&mut self, path: &Path) -> Result<RunSummary, Box<dyn std::error::Error>> {
        let metadata = self.source.open(path)?;
        self.logger.info(&format!(
            "Reading {} ({}x{}, {})",
            path.display(),
            metadata.width,
            metadata.height,
            if metadata.live { "live" } else { "recorded" }
        ));

        let result = self.run(&metadata);
        self.source.close();
        self.logger.summary();
        result
    }

    fn run(&mut self, metadata: &StreamMetadata) -> Result<RunSummary, Box<dyn std::error::Error>> {
        let clock = StreamClock::new(metadata);
        let mut summary = RunSummary::default();
        let mut last_stable: Option<GestureLabel> = None;

        let Self {
            source,
            detector,
            dispatcher,
            logger,
            mirror,
            on_progress,
            on_event,
            cancelled,
        } = self;
        let emit = |event: PlaybackEvent| {
            if let Some(callback) = on_event.as_ref() {
                callback(&event);
            }
        };

        for frame in source.frames() {
            if cancelled.load(Ordering::Relaxed) {
                logger.info("Cancelled");
                break;
            }
            let mut frame = frame?;
            if *mirror {
                frame.flip_horizontal();
            }

            let detection = detector.detect(&frame, logger.as_mut());
            summary.frames += 1;

            if let Some(stable) = detection.stable {
                *summary.stable_counts.entry(stable).or_default() += 1;
                if last_stable != Some(stable) {
                    last_stable = Some(stable);
                    emit(PlaybackEvent::GestureChanged(stable));
                }
            }

            let t0 = Instant::now();
            match dispatcher.observe(detection.stable, clock.at(frame.index())) {
                Ok(Some(command)) => {
                    logger.info(&format!("Action: {command}"));
                    summary.commands.push(command);
                    emit(PlaybackEvent::CommandFired(command));
                }
                Ok(None) => {}
                Err(e) => {
                    log::warn!("Failed to send key: {e}");
                    summary.key_failures += 1;
                    emit(PlaybackEvent::KeyFailed(e.to_string()));
                }
            }
            logger.timing("dispatch", t0.elapsed().as_secs_f64() * 1000.0);

            logger.progress(summary.frames, metadata.total_frames);
            if let Some(callback) = on_progress.as_ref() {
                if !callback(summary.frames, metadata.total_frames) {
                    logger.info("Stopped by caller");
                    break;
                }
            }
        }

        Ok(summary)
    }
}

/// Timestamps for frames: wall clock for live sources, `index / fps` for
/// recordings so offline runs are reproducible.
enum StreamClock {
    Live,
    Recorded { start: Instant, interval: Duration },
}

impl StreamClock {
    fn new(metadata: &StreamMetadata) -> Self {
        if metadata.live {
            return StreamClock::Live;
        }
        let secs = metadata
            .frame_interval()
            .unwrap_or(1.0 / CAPTURE_FPS as f64);
        StreamClock::Recorded {
            start: Instant::now(),
            interval: Duration::from_secs_f64(secs),
        }
    }

    fn at(&self, index: usize) -> Instant {
        match self {
            StreamClock::Live => Instant::now(),
            StreamClock::Recorded { start, interval } => {
                *start + interval.saturating_mul(u32::try_from(index).unwrap_or(u32::MAX))
            }
        }
    }
}
