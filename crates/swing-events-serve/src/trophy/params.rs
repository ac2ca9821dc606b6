use serde::{Deserialize, Serialize};
use swing_events_core::HandSelection;

/// Weights of the trophy score components. They sum to 1.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrophyWeights {
    pub acceleration: f32,
    pub toss_height: f32,
    pub knee_bend: f32,
    pub arms_up: f32,
    pub legs_together: f32,
}

impl Default for TrophyWeights {
    fn default() -> Self {
        Self {
            acceleration: 0.25,
            toss_height: 0.20,
            knee_bend: 0.20,
            arms_up: 0.20,
            legs_together: 0.15,
        }
    }
}

/// Sub-weights of the "legs together" cue.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LegsTogetherWeights {
    pub stability: f32,
    pub ankle_proximity: f32,
    pub knee_proximity: f32,
}

impl Default for LegsTogetherWeights {
    fn default() -> Self {
        Self {
            stability: 0.40,
            ankle_proximity: 0.35,
            knee_proximity: 0.25,
        }
    }
}

/// Configuration for the trophy detector.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrophyParams {
    /// Keypoints at or below this confidence are treated as missing.
    pub min_confidence: f32,
    /// Moving-average window applied to acceleration, toss height and knee bend.
    pub smoothing_window: usize,
    /// Minimum number of frames with a confident racket wrist.
    pub min_valid_frames: usize,
    /// Window start as a fraction of the acceleration peak index.
    pub window_start_frac: f32,
    /// Window end (exclusive) as a fraction of the acceleration peak index.
    pub window_end_frac: f32,
    /// Arms-up credit factor when only one arm is above its shoulder.
    pub single_arm_credit: f32,
    pub weights: TrophyWeights,
    pub legs_together: LegsTogetherWeights,
    pub hand: HandSelection,
}

impl Default for TrophyParams {
    fn default() -> Self {
        Self {
            min_confidence: 0.3,
            smoothing_window: 5,
            min_valid_frames: 20,
            window_start_frac: 0.2,
            window_end_frac: 0.85,
            single_arm_credit: 0.3,
            weights: TrophyWeights::default(),
            legs_together: LegsTogetherWeights::default(),
            hand: HandSelection::Auto,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weights_sum_to_one() {
        let w = TrophyWeights::default();
        let sum = w.acceleration + w.toss_height + w.knee_bend + w.arms_up + w.legs_together;
        assert!((sum - 1.0).abs() < 1e-6);

        let l = LegsTogetherWeights::default();
        assert!((l.stability + l.ankle_proximity + l.knee_proximity - 1.0).abs() < 1e-6);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let p: TrophyParams =
            serde_json::from_str(r#"{"min_valid_frames": 8, "hand": "left"}"#).unwrap();
        assert_eq!(p.min_valid_frames, 8);
        assert_eq!(p.hand, HandSelection::Left);
        assert_eq!(p.smoothing_window, 5);
        assert_eq!(p.weights, TrophyWeights::default());
    }
}
