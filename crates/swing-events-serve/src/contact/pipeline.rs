use log::debug;
use swing_events_core::{argmax, resolve_hand, ClipInfo, DetectError, PoseClip, PoseFrames};

#[cfg(feature = "tracing")]
use tracing::instrument;

use super::scoring::{best_score, score_window, search_window};
use super::signal::extract_signals;
use super::{ContactDetectionResult, ContactParams};

const DETECTOR: &str = "contact";

/// Ball-contact detector.
pub struct ContactDetector {
    params: ContactParams,
}

impl ContactDetector {
    pub fn new(params: ContactParams) -> Self {
        Self { params }
    }

    #[inline]
    pub fn params(&self) -> &ContactParams {
        &self.params
    }

    /// Locate the contact instant in one serve or swing clip.
    #[cfg_attr(
        feature = "tracing",
        instrument(level = "info", skip(self, frames, info), fields(frames = frames.len()))
    )]
    pub fn detect(
        &self,
        frames: &PoseFrames,
        info: &ClipInfo,
    ) -> Result<ContactDetectionResult, DetectError> {
        let clip = PoseClip::new(frames, info)?;
        let handedness = resolve_hand(self.params.hand, &clip);
        let racket_hand = handedness.hand;

        let signals = extract_signals(&clip, racket_hand, &self.params);

        let usable = signals.iter().filter(|s| s.tip.is_some()).count();
        if usable < self.params.min_valid_frames {
            return Err(DetectError::insufficient(
                DETECTOR,
                usable,
                self.params.min_valid_frames,
            ));
        }

        let speed: Vec<Option<f32>> = signals.iter().map(|s| s.smoothed_tip_speed).collect();
        let peak_index =
            argmax(&speed).ok_or_else(|| DetectError::no_event(DETECTOR, "no arm-tip velocity"))?;

        let frame_numbers: Vec<u32> = signals.iter().map(|s| s.frame).collect();
        let window = search_window(&frame_numbers, peak_index, &self.params)
            .ok_or_else(|| DetectError::no_event(DETECTOR, "empty search window"))?;
        debug!(
            "contact: velocity peak at frame {}, window frames {}..={}",
            signals[peak_index].frame, window.start_frame, window.end_frame
        );

        let scores = score_window(&signals, &window, peak_index, &self.params);
        let (offset, best) = best_score(&scores)
            .ok_or_else(|| DetectError::no_event(DETECTOR, "empty search window"))?;

        let contact_frame = best.frame;
        let contact_timestamp = best.timestamp;
        let confidence = best.total.clamp(0.0, 1.0);
        let tip_source = signals[window.start_index + offset].tip_source;
        let peak_frame = signals[peak_index].frame;
        let peak_timestamp = signals[peak_index].timestamp;

        Ok(ContactDetectionResult {
            contact_frame,
            contact_timestamp,
            peak_velocity_frame: peak_frame,
            peak_velocity_timestamp: peak_timestamp,
            tip_source,
            confidence,
            racket_hand,
            handedness,
            search_window: window,
            signals,
            scores,
        })
    }
}

impl Default for ContactDetector {
    fn default() -> Self {
        Self::new(ContactParams::default())
    }
}
