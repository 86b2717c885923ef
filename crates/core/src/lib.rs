//! Hand-gesture recognition from camera frames, mapped to media-player key
//! presses.
//!
//! Frames flow through skin segmentation, contour-based shape classification
//! and a consecutive-frame stability filter; stable poses held long enough
//! are dispatched as key presses.

pub mod shared {
    pub mod config;
    pub mod constants;
    pub mod frame;
    pub mod gesture_label;
    pub mod mask;
    pub mod stream_metadata;
}

pub mod segmentation {
    pub mod domain {
        pub mod segmenter;
    }
    pub mod infrastructure;
}

pub mod classification {
    pub mod domain {
        pub mod contour;
        pub mod convexity;
        pub mod finger_position;
        pub mod geometry_error;
        pub mod gesture_classifier;
        pub mod shape_rules;
    }
    pub mod infrastructure;
}

pub mod stabilization {
    pub mod domain {
        pub mod stability_filter;
    }
}

pub mod control {
    pub mod domain {
        pub mod action_dispatcher;
        pub mod key;
        pub mod key_sender;
        pub mod media_command;
    }
    pub mod infrastructure;
}

pub mod video {
    pub mod domain {
        pub mod frame_source;
    }
    pub mod infrastructure;
}

pub mod pipeline {
    pub mod control_playback_use_case;
    pub mod gesture_detector;
    pub mod pipeline_logger;
}
