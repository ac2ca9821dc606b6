use serde::{Deserialize, Serialize};

use crate::LandingFrameSignal;

/// One located phase.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PhaseEvent {
    pub frame: u32,
    pub timestamp: f32,
}

/// Output of a jump phase detection run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LandingDetectionResult {
    pub takeoff: PhaseEvent,
    pub peak: PhaseEvent,
    pub landing: PhaseEvent,
    /// Deepest knee bend before takeoff.
    pub loading: Option<PhaseEvent>,
    /// Straightest knee between loading and peak.
    pub extension: Option<PhaseEvent>,
    /// Knee flexion after landing.
    pub absorption: Option<PhaseEvent>,
    /// Absorption is the post-landing knee minimum, not a measured drop.
    pub absorption_fallback: bool,
    pub peak_upward_velocity: Option<PhaseEvent>,
    /// Pixels per second, negative.
    pub peak_upward_velocity_px_s: Option<f32>,
    pub peak_downward_velocity: Option<PhaseEvent>,
    pub peak_downward_velocity_px_s: Option<f32>,
    pub ground_y: f32,
    pub peak_y: f32,
    pub jump_height_px: f32,
    /// Jump height over ground level.
    pub jump_height_ratio: f32,
    pub flight_time: f32,
    pub confidence: f32,
    pub signals: Vec<LandingFrameSignal>,
}
