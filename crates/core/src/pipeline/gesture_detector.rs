use std::time::Instant;

use crate::classification::domain::gesture_classifier::GestureClassifier;
use crate::classification::infrastructure::shape_classifier::ShapeClassifier;
use crate::pipeline::pipeline_logger::PipelineLogger;
use crate::segmentation::domain::segmenter::Segmenter;
use crate::segmentation::infrastructure::skin_color_segmenter::SkinColorSegmenter;
use crate::shared::config::RecognitionConfig;
use crate::shared::frame::Frame;
use crate::shared::gesture_label::GestureLabel;
use crate::stabilization::domain::stability_filter::{GestureStabilizer, StabilityFilter};

/// Per-frame recognition result.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Detection {
    /// Label of this frame alone.
    pub raw: GestureLabel,
    /// Debounced label, `None` until the raw label has settled.
    pub stable: Option<GestureLabel>,
}

/// Segment → classify → stabilize, one frame at a time.
///
/// Holds the stabilizer state, so one detector serves one stream.
pub struct GestureDetector {
    segmenter: Box<dyn Segmenter>,
    classifier: Box<dyn GestureClassifier>,
    stabilizer: Box<dyn GestureStabilizer>,
}

impl GestureDetector {
    pub fn new(
        segmenter: Box<dyn Segmenter>,
        classifier: Box<dyn GestureClassifier>,
        stabilizer: Box<dyn GestureStabilizer>,
    ) -> Self {
        Self {
            segmenter,
            classifier,
            stabilizer,
        }
    }

    /// Skin-color segmentation, shape classification and a consecutive-frame
    /// stability filter, all tuned from `config`.
    pub fn from_config(config: &RecognitionConfig) -> Self {
        Self::new(
            Box::new(SkinColorSegmenter::new(&config.segmentation)),
            Box::new(ShapeClassifier::new(config.classifier.clone())),
            Box::new(StabilityFilter::new(config.stability_frames)),
        )
    }

    pub fn detect(&mut self, frame: &Frame, logger: &mut dyn PipelineLogger) -> Detection {
        let t0 = Instant::now();
        let mask = self.segmenter.segment(frame);
        let t1 = Instant::now();
        let raw = self.classifier.classify(&mask);
        let t2 = Instant::now();
        let stable = self.stabilizer.stabilize(raw);
        let t3 = Instant::now();

        logger.timing("segment", ms(t1 - t0));
        logger.timing("classify", ms(t2 - t1));
        logger.timing("stabilize", ms(t3 - t2));
        let pixels = (mask.width() as usize * mask.height() as usize).max(1);
        logger.metric("mask_coverage", mask.foreground_count() as f64 / pixels as f64);

        log::debug!("Frame {}: raw={raw} stable={stable:?}", frame.index());
        Detection { raw, stable }
    }
}

fn ms(d: std::time::Duration) -> f64 {
    d.as_secs_f64() * 1000.0
}
