use std::path::{Path, PathBuf};
use std::process;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use clap::Parser;

use gesture_remote_core::control::domain::action_dispatcher::ActionDispatcher;
use gesture_remote_core::control::domain::key_sender::KeySender;
use gesture_remote_core::control::infrastructure::command_key_sender::CommandKeySender;
use gesture_remote_core::control::infrastructure::log_key_sender::LogKeySender;
use gesture_remote_core::pipeline::control_playback_use_case::{
    ControlPlaybackUseCase, PlaybackEvent, RunSummary,
};
use gesture_remote_core::pipeline::gesture_detector::GestureDetector;
use gesture_remote_core::pipeline::pipeline_logger::LogPipelineLogger;
use gesture_remote_core::shared::config::AppConfig;
use gesture_remote_core::shared::gesture_label::GestureLabel;
use gesture_remote_core::video::domain::frame_source::FrameSource;
use gesture_remote_core::video::infrastructure::ffmpeg_reader::{is_capture_device, FfmpegReader};
use gesture_remote_core::video::infrastructure::image_sequence_reader::{
    is_image_path, ImageSequenceReader,
};

/// Control a video player with hand gestures seen by a camera.
#[derive(Parser)]
#[command(name = "gesture-remote")]
struct Cli {
    /// Camera device, video file, image, or directory of images.
    #[arg(default_value = "/dev/video0")]
    source: PathBuf,

    /// JSON config file (default: platform config dir, if present).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seconds a gesture must be held before acting.
    #[arg(long)]
    hold: Option<f64>,

    /// Minimum seconds between two actions.
    #[arg(long)]
    cooldown: Option<f64>,

    /// Consecutive identical frames needed to confirm a gesture.
    #[arg(long)]
    stability_frames: Option<usize>,

    /// Smallest hand area in square pixels.
    #[arg(long)]
    min_area: Option<f64>,

    /// Do not mirror frames before detection.
    #[arg(long)]
    no_mirror: bool,

    /// Program that injects keys, e.g. "xdotool key". The key name is
    /// appended. Without it keys are only logged.
    #[arg(long)]
    key_command: Option<String>,

    /// Seconds to wait before a live session starts.
    #[arg(long, default_value = "3")]
    countdown: u32,

    /// Print the effective configuration as JSON and exit.
    #[arg(long)]
    print_config: bool,
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = effective_config(&cli)?;

    if cli.print_config {
        println!("{}", config.to_json()?);
        return Ok(());
    }
    if !cli.source.exists() {
        return Err(format!("Source not found: {}", cli.source.display()).into());
    }

    let live = is_capture_device(&cli.source);
    let source = open_source(&cli.source, &config);
    let sender: Box<dyn KeySender> = match &cli.key_command {
        Some(command) => Box::new(CommandKeySender::parse(command)?),
        None => {
            log::warn!("No --key-command given; key presses are only logged");
            Box::new(LogKeySender::new())
        }
    };
    let dispatcher = ActionDispatcher::from_config(sender, &config.dispatch)?;
    let detector = GestureDetector::from_config(&config.recognition);

    let cancelled = Arc::new(AtomicBool::new(false));
    let handler_flag = Arc::clone(&cancelled);
    ctrlc::set_handler(move || request_stop(&handler_flag))?;

    print_banner(&config);
    if live {
        countdown(cli.countdown, &cancelled);
    }

    let on_event: Box<dyn Fn(&PlaybackEvent) + Send> = Box::new(|event| match event {
        PlaybackEvent::GestureChanged(GestureLabel::None) => eprintln!("No gesture detected"),
        PlaybackEvent::GestureChanged(label) => eprintln!("Gesture: {label}"),
        PlaybackEvent::CommandFired(command) => eprintln!("Action: {command}"),
        PlaybackEvent::KeyFailed(reason) => eprintln!("Key press failed: {reason}"),
    });

    let mut use_case = ControlPlaybackUseCase::new(
        source,
        detector,
        dispatcher,
        Box::new(LogPipelineLogger::default()),
        config.capture.mirror,
        None,
        Some(on_event),
        Some(cancelled),
    );
    let summary = use_case.execute(&cli.source)?;
    report(&summary);
    Ok(())
}

/// File or platform config, then command-line overrides, then validation.
fn effective_config(cli: &Cli) -> Result<AppConfig, Box<dyn std::error::Error>> {
    let mut config = AppConfig::resolve(cli.config.as_deref())?;

    if let Some(hold) = cli.hold {
        config.dispatch.hold_secs = hold;
    }
    if let Some(cooldown) = cli.cooldown {
        config.dispatch.cooldown_secs = cooldown;
    }
    if let Some(frames) = cli.stability_frames {
        config.recognition.stability_frames = frames;
    }
    if let Some(area) = cli.min_area {
        config.recognition.classifier.min_hand_area = area;
    }
    if cli.no_mirror {
        config.capture.mirror = false;
    }

    config.validate()?;
    Ok(config)
}

fn open_source(path: &Path, config: &AppConfig) -> Box<dyn FrameSource> {
    if path.is_dir() || is_image_path(path) {
        Box::new(ImageSequenceReader::new(config.capture.fps as f64))
    } else {
        Box::new(FfmpegReader::new(config.capture.clone()))
    }
}

fn print_banner(config: &AppConfig) {
    let skip = config.dispatch.skip_seconds;
    eprintln!("Gesture remote started.");
    eprintln!("Make sure the video player window has focus.");
    eprintln!();
    eprintln!("Gestures:");
    eprintln!("  Fist (closed hand)          pause");
    eprintln!("  Open hand (fingers spread)  play");
    eprintln!("  Thumb up                    forward {skip}s");
    eprintln!("  Pinky up                    back {skip}s");
    eprintln!();
    eprintln!(
        "Hold a gesture steady for {:.1}s. Good lighting and a plain background help.",
        config.dispatch.hold_secs
    );
    eprintln!("Press Ctrl+C to quit.");
}

/// First interrupt stops the loop so the source closes and the summary
/// prints; a second one exits immediately.
fn request_stop(cancelled: &AtomicBool) {
    if cancelled.swap(true, Ordering::SeqCst) {
        eprintln!("Interrupted again, exiting");
        process::exit(130);
    }
    eprintln!("Stopping...");
}

fn countdown(seconds: u32, cancelled: &AtomicBool) {
    if seconds == 0 {
        return;
    }
    eprintln!();
    eprintln!("Starting in {seconds} seconds...");
    for remaining in (1..=seconds).rev() {
        if cancelled.load(Ordering::SeqCst) {
            return;
        }
        eprintln!("{remaining}...");
        thread::sleep(Duration::from_secs(1));
    }
}

fn report(summary: &RunSummary) {
    let mut counts: Vec<_> = summary.stable_counts.iter().collect();
    counts.sort_by_key(|(label, _)| label.as_str());
    let counts = counts
        .iter()
        .map(|(label, n)| format!("{label}={n}"))
        .collect::<Vec<_>>()
        .join(", ");
    log::info!(
        "Processed {} frames, {} action(s), {} key failure(s); stable frames: {}",
        summary.frames,
        summary.commands.len(),
        summary.key_failures,
        if counts.is_empty() { "none" } else { counts.as_str() }
    );
}
