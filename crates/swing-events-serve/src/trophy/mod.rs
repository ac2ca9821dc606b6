//! Trophy-position detection.
//!
//! The trophy stance is the loaded pause before the forward swing of a
//! serve. The search is restricted to a fraction of the clip ahead of the
//! racket-wrist acceleration peak; inside that window every cue is
//! normalized against the window's own extremes and combined with fixed
//! weights.

mod params;
mod pipeline;
mod result;
mod scoring;
mod signal;

pub use params::{LegsTogetherWeights, TrophyParams, TrophyWeights};
pub use pipeline::TrophyDetector;
pub use result::{TrophyDetectionResult, TrophyFrameScore};
pub use signal::TrophyFrameSignal;
