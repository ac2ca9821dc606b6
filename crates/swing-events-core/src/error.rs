/// Errors returned by the event detectors.
///
/// Every detector either returns a complete result or one of these typed
/// failures. None of them is retried internally: the same input always
/// produces the same error.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum DetectError {
    #[error("pose frame store is empty")]
    EmptyClip,
    #[error("invalid frame rate {fps} (must be finite and positive)")]
    InvalidFps { fps: f32 },
    #[error("unknown skeleton model `{0}`")]
    UnknownSkeletonModel(String),
    #[error("{detector}: insufficient data ({usable} usable frames, {required} required)")]
    InsufficientData {
        detector: &'static str,
        usable: usize,
        required: usize,
    },
    #[error("no wrist motion to infer the dominant hand from")]
    NoHandednessSignal,
    #[error("{detector}: no event found ({reason})")]
    NoEventFound {
        detector: &'static str,
        reason: String,
    },
}

impl DetectError {
    /// Shorthand for [`DetectError::InsufficientData`].
    pub fn insufficient(detector: &'static str, usable: usize, required: usize) -> Self {
        Self::InsufficientData {
            detector,
            usable,
            required,
        }
    }

    /// Shorthand for [`DetectError::NoEventFound`].
    pub fn no_event(detector: &'static str, reason: impl Into<String>) -> Self {
        Self::NoEventFound {
            detector,
            reason: reason.into(),
        }
    }
}
