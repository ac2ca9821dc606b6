use serde::{Deserialize, Serialize};
use swing_events_core::{HandednessEstimate, Side};

use super::{ArmTip, ContactFrameSignal};
use crate::SearchWindow;

/// Scored cues for one frame inside the search window.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ContactFrameScore {
    pub frame: u32,
    pub timestamp: f32,
    pub tip_height: Option<f32>,
    pub extension: Option<f32>,
    pub body_extension: Option<f32>,
    pub proximity: f32,
    pub total: f32,
}

/// Output of a contact-point detection run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ContactDetectionResult {
    pub contact_frame: u32,
    pub contact_timestamp: f32,
    pub peak_velocity_frame: u32,
    pub peak_velocity_timestamp: f32,
    /// Which joint served as the arm tip at contact.
    pub tip_source: Option<ArmTip>,
    /// Best window score, in `[0, 1]`.
    pub confidence: f32,
    pub racket_hand: Side,
    pub handedness: HandednessEstimate,
    pub search_window: SearchWindow,
    pub signals: Vec<ContactFrameSignal>,
    pub scores: Vec<ContactFrameScore>,
}
