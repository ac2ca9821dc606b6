use serde::{Deserialize, Serialize};
use swing_events_core::{HandednessEstimate, Side};

use crate::SwingFrameSignal;

/// One detected swing impact.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SwingEvent {
    pub frame: u32,
    pub timestamp: f32,
    /// Smoothed speed (px/s) or acceleration (px/s²) at the peak.
    pub value: f32,
    /// Peak-to-baseline ratio; `None` when unbounded or not computed.
    pub prominence: Option<f32>,
    pub confidence: f32,
}

/// Output of a swing detection run. Swings are in chronological order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SwingDetectionResult {
    pub swings: Vec<SwingEvent>,
    pub racket_hand: Side,
    pub handedness: HandednessEstimate,
    pub signals: Vec<SwingFrameSignal>,
}
