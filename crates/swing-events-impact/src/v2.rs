use log::debug;
use swing_events_core::{
    prominent_candidates, resolve_hand, select_separated, ClipInfo, DetectError, Peak, PoseClip,
    PoseFrames,
};

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::signal::{extract_signals, moving_outward};
use crate::{SwingDetectionResult, SwingEvent, SwingV2Params};

const DETECTOR: &str = "swing_v2";

/// `(p - 1) / p`, saturating at 1 for an unbounded prominence.
fn prominence_confidence(peak: &Peak) -> f32 {
    match peak.prominence {
        Some(p) if p > 0.0 => ((p - 1.0) / p).clamp(0.0, 1.0),
        Some(_) => 0.0,
        None => 1.0,
    }
}

/// Acceleration-peak swing detector with a prominence gate.
pub struct SwingV2Detector {
    params: SwingV2Params,
}

impl SwingV2Detector {
    pub fn new(params: SwingV2Params) -> Self {
        Self { params }
    }

    #[inline]
    pub fn params(&self) -> &SwingV2Params {
        &self.params
    }

    /// Find every swing impact in the clip.
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

        let accel: Vec<Option<f32>> = signals.iter().map(|s| s.smoothed_acceleration).collect();
        let peak_params = params.peak_params(clip.fps());
        let mut candidates = prominent_candidates(&accel, &peak_params);
        // Direction gate on candidates, ahead of separation.
        if params.direction_filter {
            let radial: Vec<Option<f32>> = signals
                .iter()
                .map(|s| s.smoothed_radial_velocity)
                .collect();
            candidates.retain(|p| {
                moving_outward(
                    &radial,
                    p.index,
                    params.radial_lookback,
                    params.min_radial_velocity,
                )
            });
        }
        let peaks = select_separated(candidates, peak_params.min_separation);
        debug!(
            "swing_v2: {} swings (direction filter {})",
            peaks.len(),
            params.direction_filter
        );
        if peaks.is_empty() {
            return Err(DetectError::no_event(
                DETECTOR,
                "no prominent acceleration peak",
            ));
        }

        let swings = peaks
            .iter()
            .map(|p| SwingEvent {
                frame: signals[p.index].frame,
                timestamp: signals[p.index].timestamp,
                value: p.value,
                prominence: p.prominence,
                confidence: prominence_confidence(p),
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

impl Default for SwingV2Detector {
    fn default() -> Self {
        Self::new(SwingV2Params::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn confidence_from_prominence() {
        let peak = |prominence| Peak {
            index: 0,
            value: 1.0,
            prominence,
        };
        assert!((prominence_confidence(&peak(Some(2.0))) - 0.5).abs() < 1e-6);
        assert_eq!(prominence_confidence(&peak(Some(1.0))), 0.0);
        assert_eq!(prominence_confidence(&peak(None)), 1.0);
    }
}
