use serde::{Deserialize, Serialize};
use swing_events_core::HandSelection;

/// Weights of the contact score components. They sum to 1.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactWeights {
    pub tip_height: f32,
    pub extension: f32,
    pub body_extension: f32,
    pub proximity: f32,
}

impl Default for ContactWeights {
    fn default() -> Self {
        Self {
            tip_height: 0.35,
            extension: 0.25,
            body_extension: 0.15,
            proximity: 0.25,
        }
    }
}

/// Configuration for the contact-point detector.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactParams {
    pub min_confidence: f32,
    /// Moving-average window applied to the arm-tip speed.
    pub smoothing_window: usize,
    /// Minimum number of frames with an arm tip.
    pub min_valid_frames: usize,
    /// Window start as a fraction of the peak-velocity index.
    pub window_start_frac: f32,
    /// Window end as a fraction of the peak-velocity index (inclusive).
    pub window_end_frac: f32,
    /// Records added after the scaled window end.
    pub window_end_pad: usize,
    pub weights: ContactWeights,
    pub hand: HandSelection,
}

impl Default for ContactParams {
    fn default() -> Self {
        Self {
            min_confidence: 0.3,
            smoothing_window: 5,
            min_valid_frames: 10,
            window_start_frac: 0.7,
            window_end_frac: 1.3,
            window_end_pad: 5,
            weights: ContactWeights::default(),
            hand: HandSelection::Auto,
        }
    }
}
