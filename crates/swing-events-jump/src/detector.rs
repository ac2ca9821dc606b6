use log::debug;
use swing_events_core::{ClipInfo, DetectError, PoseClip, PoseFrames};

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::phases::{knee_phases, locate_flight, velocity_extremes};
use crate::signal::extract_signals;
use crate::{LandingDetectionResult, LandingFrameSignal, LandingParams, PhaseEvent, PrimarySource};

const DETECTOR: &str = "landing";

/// Ratio at which the height half of the confidence saturates.
const FULL_CREDIT_RATIO: f32 = 0.15;

/// Jump phase detector.
pub struct LandingDetector {
    params: LandingParams,
}

impl LandingDetector {
    pub fn new(params: LandingParams) -> Self {
        Self { params }
    }

    #[inline]
    pub fn params(&self) -> &LandingParams {
        &self.params
    }

    /// Locate takeoff, peak, landing and the knee phases in one jump clip.
    #[cfg_attr(
        feature = "tracing",
        instrument(level = "info", skip(self, frames, info), fields(frames = frames.len()))
    )]
    pub fn detect(
        &self,
        frames: &PoseFrames,
        info: &ClipInfo,
    ) -> Result<LandingDetectionResult, DetectError> {
        let clip = PoseClip::new(frames, info)?;
        let params = &self.params;
        let signals = extract_signals(&clip, params);

        let usable = signals.iter().filter(|s| s.primary_y.is_some()).count();
        if usable < params.min_valid_frames {
            return Err(DetectError::insufficient(
                DETECTOR,
                usable,
                params.min_valid_frames,
            ));
        }

        let primary: Vec<Option<f32>> = signals.iter().map(|s| s.primary_y).collect();
        let flight =
            locate_flight(&primary, params).map_err(|reason| DetectError::no_event(DETECTOR, reason))?;
        let ratio = flight.height_ratio();
        if ratio < params.min_jump_ratio {
            return Err(DetectError::no_event(
                DETECTOR,
                format!(
                    "jump height ratio {ratio:.3} below {:.3}",
                    params.min_jump_ratio
                ),
            ));
        }
        debug!(
            "landing: takeoff {}, peak {}, landing {}, ratio {ratio:.3}",
            signals[flight.takeoff].frame, signals[flight.peak].frame, signals[flight.landing].frame
        );

        let knee: Vec<Option<f32>> = signals.iter().map(|s| s.smoothed_knee_angle).collect();
        let phases = knee_phases(&knee, &flight, params);
        let velocity: Vec<Option<f32>> = signals
            .iter()
            .map(|s| s.smoothed_vertical_velocity)
            .collect();
        let (upward, downward) = velocity_extremes(&velocity, &flight);

        let ankle_frames = signals
            .iter()
            .filter(|s| s.source == Some(PrimarySource::Ankle))
            .count();
        let ankle_share = ankle_frames as f32 / usable as f32;
        let confidence =
            (0.5 * ankle_share + 0.5 * (ratio / FULL_CREDIT_RATIO).clamp(0.0, 1.0)).clamp(0.0, 1.0);

        let event = |i: usize| phase_event(&signals[i]);
        let takeoff = event(flight.takeoff);
        let peak = event(flight.peak);
        let landing = event(flight.landing);
        let loading = phases.loading.map(event);
        let extension = phases.extension.map(event);
        let absorption = phases.absorption.map(event);
        let peak_upward_velocity = upward.map(event);
        let peak_downward_velocity = downward.map(event);

        Ok(LandingDetectionResult {
            takeoff,
            peak,
            landing,
            loading,
            extension,
            absorption,
            absorption_fallback: phases.absorption_fallback,
            peak_upward_velocity,
            peak_upward_velocity_px_s: upward.and_then(|i| velocity[i]),
            peak_downward_velocity,
            peak_downward_velocity_px_s: downward.and_then(|i| velocity[i]),
            ground_y: flight.ground_y,
            peak_y: flight.peak_y,
            jump_height_px: flight.ground_y - flight.peak_y,
            jump_height_ratio: ratio,
            flight_time: landing.timestamp - takeoff.timestamp,
            confidence,
            signals,
        })
    }
}

fn phase_event(signal: &LandingFrameSignal) -> PhaseEvent {
    PhaseEvent {
        frame: signal.frame,
        timestamp: signal.timestamp,
    }
}

impl Default for LandingDetector {
    fn default() -> Self {
        Self::new(LandingParams::default())
    }
}
