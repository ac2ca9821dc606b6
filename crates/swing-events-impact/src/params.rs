use serde::{Deserialize, Serialize};
use swing_events_core::{seconds_to_frames, HandSelection, PeakParams};

/// Configuration for the velocity-based swing detector.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SwingV1Params {
    pub min_confidence: f32,
    pub smoothing_window: usize,
    /// Minimum number of frames with a body center and a wrist.
    pub min_valid_frames: usize,
    /// A peak must be strictly greater than every sample within this radius.
    pub neighborhood: usize,
    /// Peaks below this fraction of the clip's maximum speed are ignored.
    pub min_speed_fraction: f32,
    /// Records before a peak averaged for the radial direction check.
    pub radial_lookback: usize,
    /// Mean outward velocity, px/s, a peak must exceed.
    pub min_radial_velocity: f32,
    pub min_separation_s: f32,
    pub hand: HandSelection,
}

impl Default for SwingV1Params {
    fn default() -> Self {
        Self {
            min_confidence: 0.2,
            smoothing_window: 5,
            min_valid_frames: 10,
            neighborhood: 2,
            min_speed_fraction: 0.35,
            radial_lookback: 8,
            min_radial_velocity: 0.0,
            min_separation_s: 1.0,
            hand: HandSelection::Auto,
        }
    }
}

/// Configuration for the acceleration-based swing detector.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SwingV2Params {
    pub min_confidence: f32,
    pub smoothing_window: usize,
    pub min_valid_frames: usize,
    pub neighborhood: usize,
    pub baseline_radius: usize,
    pub core_radius: usize,
    /// Minimum peak-to-baseline ratio.
    pub min_prominence: f32,
    pub min_separation_s: f32,
    /// Reject peaks not preceded by outward radial motion.
    pub direction_filter: bool,
    pub radial_lookback: usize,
    pub min_radial_velocity: f32,
    pub hand: HandSelection,
}

impl Default for SwingV2Params {
    fn default() -> Self {
        Self {
            min_confidence: 0.2,
            smoothing_window: 5,
            min_valid_frames: 5,
            neighborhood: 2,
            baseline_radius: 15,
            core_radius: 3,
            min_prominence: 1.3,
            min_separation_s: 1.5,
            direction_filter: false,
            radial_lookback: 8,
            min_radial_velocity: 0.0,
            hand: HandSelection::Auto,
        }
    }
}

impl SwingV2Params {
    /// Peak search parameters at the clip frame rate.
    pub fn peak_params(&self, fps: f32) -> PeakParams {
        PeakParams {
            neighborhood: self.neighborhood,
            baseline_radius: self.baseline_radius,
            core_radius: self.core_radius,
            min_prominence: self.min_prominence,
            min_separation: seconds_to_frames(self.min_separation_s, fps),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn separation_follows_the_frame_rate() {
        let p = SwingV2Params::default();
        assert_eq!(p.peak_params(30.0).min_separation, 45);
        assert_eq!(p.peak_params(60.0).min_separation, 90);
        assert_eq!(p.peak_params(0.1).min_separation, 1);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let p: SwingV2Params =
            serde_json::from_str(r#"{"direction_filter": true, "hand": "left"}"#).unwrap();
        assert!(p.direction_filter);
        assert_eq!(p.hand, HandSelection::Left);
        assert_eq!(p.min_prominence, 1.3);
    }
}
