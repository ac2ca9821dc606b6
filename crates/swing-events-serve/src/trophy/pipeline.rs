use log::debug;
use swing_events_core::{argmax, resolve_hand, ClipInfo, DetectError, PoseClip, PoseFrames};

#[cfg(feature = "tracing")]
use tracing::instrument;

use super::scoring::{best_score, score_window, search_window};
use super::signal::extract_signals;
use super::{TrophyDetectionResult, TrophyParams};

const DETECTOR: &str = "trophy";

/// Trophy-position detector.
pub struct TrophyDetector {
    params: TrophyParams,
}

impl TrophyDetector {
    pub fn new(params: TrophyParams) -> Self {
        Self { params }
    }

    /// Detector parameters.
    #[inline]
    pub fn params(&self) -> &TrophyParams {
        &self.params
    }

    /// Locate the trophy position in one serve clip.
    #[cfg_attr(
        feature = "tracing",
        instrument(level = "info", skip(self, frames, info), fields(frames = frames.len()))
    )]
    pub fn detect(
        &self,
        frames: &PoseFrames,
        info: &ClipInfo,
    ) -> Result<TrophyDetectionResult, DetectError> {
        let clip = PoseClip::new(frames, info)?;
        let handedness = resolve_hand(self.params.hand, &clip);
        let racket_hand = handedness.hand;

        let signals = extract_signals(&clip, racket_hand, &self.params);

        let usable = signals.iter().filter(|s| s.racket_wrist.is_some()).count();
        if usable < self.params.min_valid_frames {
            return Err(DetectError::insufficient(
                DETECTOR,
                usable,
                self.params.min_valid_frames,
            ));
        }

        let accel: Vec<Option<f32>> = signals.iter().map(|s| s.smoothed_acceleration).collect();
        let peak_index = argmax(&accel)
            .ok_or_else(|| DetectError::no_event(DETECTOR, "no racket-wrist acceleration"))?;

        let frame_numbers: Vec<u32> = signals.iter().map(|s| s.frame).collect();
        let window = search_window(&frame_numbers, peak_index, &self.params).ok_or_else(|| {
            DetectError::no_event(
                DETECTOR,
                format!("acceleration peak at record {peak_index} leaves no search window"),
            )
        })?;
        debug!(
            "trophy: accel peak at frame {}, window frames {}..={}",
            signals[peak_index].frame, window.start_frame, window.end_frame
        );

        let scores = score_window(&signals, &window, &self.params);
        let best = best_score(&scores)
            .ok_or_else(|| DetectError::no_event(DETECTOR, "empty search window"))?;

        let trophy_frame = best.frame;
        let trophy_timestamp = best.timestamp;
        let confidence = best.total.clamp(0.0, 1.0);
        let peak_frame = signals[peak_index].frame;
        let peak_timestamp = signals[peak_index].timestamp;

        Ok(TrophyDetectionResult {
            trophy_frame,
            trophy_timestamp,
            peak_acceleration_frame: peak_frame,
            peak_acceleration_timestamp: peak_timestamp,
            confidence,
            racket_hand,
            handedness,
            search_window: window,
            signals,
            scores,
        })
    }
}

impl Default for TrophyDetector {
    fn default() -> Self {
        Self::new(TrophyParams::default())
    }
}
