//! Core types and signal utilities for pose-based event detection.
//!
//! This crate holds everything the detectors share: the sparse pose store
//! and clip validation, the two supported skeleton layouts, planar geometry,
//! the null-aware smoother, finite-difference kinematics, racket-hand
//! inference and the peak locator. It performs no I/O.
//!
//! Missing data is explicit throughout. A keypoint below a detector's
//! confidence threshold is `None`, and every derived per-frame signal is an
//! `Option<f32>`, so a lost joint can never leak a `(0, 0)` position into a
//! computation.

mod error;
mod geometry;
mod handedness;
mod kinematics;
mod layout;
mod logger;
mod peaks;
mod pose;
mod smoothing;

pub use error::DetectError;
pub use geometry::{angle_at_vertex, centroid, distance, MinMax};
pub use handedness::{
    accumulate_wrist_motion, detect_handedness, detect_handedness_strict, resolve_hand,
    HandSelection, HandednessEstimate, HandednessOutcome, HANDEDNESS_MIN_CONFIDENCE,
};
pub use kinematics::{displacement, motion_profile, velocity_vectors, vertical_velocity, Motion};
pub use layout::{Joint, JointPair, KeypointLayout, Side, SkeletonModel};
pub use peaks::{
    argmax, argmax_in, argmin_in, find_prominent_peaks, local_maxima, median,
    prominent_candidates, select_separated, Peak, PeakParams,
};
pub use pose::{Body, ClipInfo, FrameSample, Keypoint, PoseClip, PoseFrames};
pub use smoothing::{moving_average, smooth_channels};

#[cfg(feature = "tracing")]
pub use logger::init_tracing;

pub use logger::init_with_level;

/// Seconds to whole records at the clip frame rate, never below one.
pub fn seconds_to_frames(seconds: f32, fps: f32) -> usize {
    let frames = (seconds * fps).round();
    if frames.is_finite() && frames >= 1.0 {
        frames as usize
    } else {
        1
    }
}

/// Weighted sum of optional components; a missing component adds nothing.
pub fn weighted_score(components: &[(Option<f32>, f32)]) -> f32 {
    components
        .iter()
        .filter_map(|&(value, weight)| value.map(|v| v * weight))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seconds_to_frames_rounds_and_floors_at_one() {
        assert_eq!(seconds_to_frames(1.5, 30.0), 45);
        assert_eq!(seconds_to_frames(0.01, 30.0), 1);
        assert_eq!(seconds_to_frames(f32::NAN, 30.0), 1);
    }

    #[test]
    fn weighted_score_skips_missing() {
        let s = weighted_score(&[(Some(1.0), 0.25), (None, 0.5), (Some(0.5), 0.5)]);
        assert!((s - 0.5).abs() < 1e-6);
    }
}
