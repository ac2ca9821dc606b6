use serde::{Deserialize, Serialize};

/// Configuration for the jump phase detector.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LandingParams {
    pub min_confidence: f32,
    /// Moving-average window for knee angle and vertical velocity. The
    /// primary Y used for the jump extrema is never smoothed.
    pub smoothing_window: usize,
    /// Minimum number of frames with a primary Y.
    pub min_valid_frames: usize,
    /// A frame is "on the ground" once its primary Y reaches this fraction
    /// of ground level.
    pub ground_fraction: f32,
    /// Ankles closer than this in Y count as both feet down.
    pub both_feet_tolerance_px: f32,
    /// Frames after landing searched for the straightest knee.
    pub absorption_lookahead: usize,
    /// Knee flexion, in degrees, that marks absorption.
    pub absorption_drop_deg: f32,
    /// Jumps lower than this fraction of ground level are rejected.
    pub min_jump_ratio: f32,
}

impl Default for LandingParams {
    fn default() -> Self {
        Self {
            min_confidence: 0.3,
            smoothing_window: 5,
            min_valid_frames: 10,
            ground_fraction: 0.95,
            both_feet_tolerance_px: 10.0,
            absorption_lookahead: 10,
            absorption_drop_deg: 5.0,
            min_jump_ratio: 0.02,
        }
    }
}
