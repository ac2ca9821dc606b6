use log::debug;
use swing_events_core::{
    local_maxima, resolve_hand, seconds_to_frames, select_separated, ClipInfo, DetectError,
    Peak, PoseClip, PoseFrames,
};

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::signal::{extract_signals, moving_outward};
use crate::{SwingDetectionResult, SwingEvent, SwingV1Params};

const DETECTOR: &str = "swing_v1";

/// Velocity-peak swing detector with a radial direction gate.
pub struct SwingV1Detector {
    params: SwingV1Params,
}

impl SwingV1Detector {
    pub fn new(params: SwingV1Params) -> Self {
        Self { params }
    }

    #[inline]
    pub fn params(&self) -> &SwingV1Params {
        &self.params
    }

    /// Find every forward swing in the clip.
    #[cfg_attr(
        feature = "tracing",
        instrument(level = "info", skip(self, frames, info), fields(frames = frames.len()))
    )]
    pub fn detect(
        &self,
        frames: &PoseFrames,
        info: &ClipInfo,
    ) -> Result<SwingDetectionResult, DetectError> {
        let params = &self.params;
        let clip = PoseClip::new(frames, info)?;
        let handedness = resolve_hand(params.hand, &clip);
        let racket_hand = handedness.hand;

        let signals = extract_signals(
            &clip,
            racket_hand,
            params.min_confidence,
            params.smoothing_window,
        );
        let usable = signals.iter().filter(|s| s.has_motion_input()).count();
        if usable < params.min_valid_frames {
            return Err(DetectError::insufficient(
                DETECTOR,
                usable,
                params.min_valid_frames,
            ));
        }

        let speed: Vec<Option<f32>> = signals.iter().map(|s| s.smoothed_speed).collect();
        let radial: Vec<Option<f32>> = signals
            .iter()
            .map(|s| s.smoothed_radial_velocity)
            .collect();
        let max_speed = speed
            .iter()
            .flatten()
            .copied()
            .fold(f32::NEG_INFINITY, f32::max);
        if !(max_speed.is_finite() && max_speed > 0.0) {
            return Err(DetectError::no_event(DETECTOR, "no wrist motion"));
        }
        let threshold = params.min_speed_fraction * max_speed;

        let candidates: Vec<Peak> = local_maxima(&speed, params.neighborhood)
            .into_iter()
            .filter_map(|i| {
                let value = speed[i]?;
                (value >= threshold).then_some(Peak {
                    index: i,
                    value,
                    prominence: None,
                })
            })
            .filter(|p| {
                moving_outward(
                    &radial,
                    p.index,
                    params.radial_lookback,
                    params.min_radial_velocity,
                )
            })
            .collect();
        let min_separation = seconds_to_frames(params.min_separation_s, clip.fps());
        let peaks = select_separated(candidates, min_separation);
        debug!(
            "swing_v1: {} swings, max speed {max_speed:.1} px/s, separation {min_separation}",
            peaks.len()
        );
        if peaks.is_empty() {
            return Err(DetectError::no_event(
                DETECTOR,
                "no outward speed peak above threshold",
            ));
        }

        let swings = peaks
            .into_iter()
            .map(|p| SwingEvent {
                frame: signals[p.index].frame,
                timestamp: signals[p.index].timestamp,
                value: p.value,
                prominence: None,
                confidence: (p.value / max_speed).clamp(0.0, 1.0),
            })
            .collect();

        Ok(SwingDetectionResult {
            swings,
            racket_hand,
            handedness,
            signals,
        })
    }
}

impl Default for SwingV1Detector {
    fn default() -> Self {
        Self::new(SwingV1Params::default())
    }
}
