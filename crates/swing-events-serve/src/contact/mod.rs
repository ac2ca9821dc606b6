//! Ball-contact detection.
//!
//! The arm tip (wrist, or the elbow when it is higher or the wrist is lost)
//! peaks in speed around contact. Frames around that peak are scored on tip
//! height, arm extension, body extension and closeness to the peak.

mod params;
mod pipeline;
mod result;
mod scoring;
mod signal;

pub use params::{ContactParams, ContactWeights};
pub use pipeline::ContactDetector;
pub use result::{ContactDetectionResult, ContactFrameScore};
pub use signal::{ArmTip, ContactFrameSignal};
