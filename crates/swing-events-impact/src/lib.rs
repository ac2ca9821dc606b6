//! Swing impact detection.
//!
//! Both detectors track the wrists relative to a body center (the mean of
//! the confident shoulders and hips) and look for one event per swing:
//!
//! - [`SwingV1Detector`] takes local maxima of the combined wrist speed and
//!   keeps the ones preceded by outward radial motion of the racket wrist,
//!   which separates forward swings from the recovery.
//! - [`SwingV2Detector`] takes local maxima of the combined wrist
//!   acceleration that stand out from their surroundings by a prominence
//!   ratio, with the radial check available as an option.

mod params;
mod result;
mod signal;
mod v1;
mod v2;

pub use params::{SwingV1Params, SwingV2Params};
pub use result::{SwingDetectionResult, SwingEvent};
pub use signal::SwingFrameSignal;
pub use v1::SwingV1Detector;
pub use v2::SwingV2Detector;
