use serde::{Deserialize, Serialize};
use swing_events_core::{HandednessEstimate, Side};

use super::TrophyFrameSignal;
use crate::SearchWindow;

/// Scored cues for one frame inside the search window.
///
/// Every component is already normalized to `[0, 1]` against the window;
/// `None` means the cue was not observable at that frame and added nothing.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TrophyFrameScore {
    pub frame: u32,
    pub timestamp: f32,
    pub acceleration: Option<f32>,
    pub toss_height: Option<f32>,
    pub knee_bend: Option<f32>,
    pub arms_up: Option<f32>,
    pub stability: Option<f32>,
    pub ankle_proximity: Option<f32>,
    pub knee_proximity: Option<f32>,
    pub legs_together: Option<f32>,
    pub total: f32,
}

/// Output of a trophy detection run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TrophyDetectionResult {
    pub trophy_frame: u32,
    pub trophy_timestamp: f32,
    pub peak_acceleration_frame: u32,
    pub peak_acceleration_timestamp: f32,
    /// Best window score, in `[0, 1]`.
    pub confidence: f32,
    pub racket_hand: Side,
    pub handedness: HandednessEstimate,
    pub search_window: SearchWindow,
    pub signals: Vec<TrophyFrameSignal>,
    pub scores: Vec<TrophyFrameScore>,
}

impl TrophyDetectionResult {
    /// Signal record of the selected frame.
    pub fn trophy_signal(&self) -> Option<&TrophyFrameSignal> {
        self.signals.iter().find(|s| s.frame == self.trophy_frame)
    }
}
