//! Serve event detectors.
//!
//! - [`TrophyDetector`] finds the loaded "trophy" stance before the forward
//!   swing: racket-hand acceleration, toss-arm height, knee bend, both arms
//!   up and feet together, scored inside a window ahead of the acceleration
//!   peak.
//! - [`ContactDetector`] finds the ball-contact instant: the highest arm
//!   tip with the arm extended and the body stretched, close to the arm-tip
//!   velocity peak.
//!
//! Both detectors make one pass over the clip, keep the raw per-frame
//! signal sequence, and score the search window into a separate sequence.

mod contact;
mod trophy;
mod window;

pub use contact::{
    ArmTip, ContactDetectionResult, ContactDetector, ContactFrameScore, ContactFrameSignal,
    ContactParams, ContactWeights,
};
pub use trophy::{
    LegsTogetherWeights, TrophyDetectionResult, TrophyDetector, TrophyFrameScore,
    TrophyFrameSignal, TrophyParams, TrophyWeights,
};
pub use window::SearchWindow;
