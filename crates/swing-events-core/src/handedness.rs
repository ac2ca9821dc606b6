//! Racket-hand inference from aggregate wrist motion.

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::{DetectError, Joint, PoseClip, Side};

/// Wrist confidence threshold used by handedness inference.
pub const HANDEDNESS_MIN_CONFIDENCE: f32 = 0.3;

/// How the racket hand is chosen.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HandSelection {
    /// Infer from wrist motion.
    #[default]
    Auto,
    Left,
    Right,
}

/// How a [`HandednessEstimate`] was reached.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HandednessOutcome {
    /// Inferred from wrist motion.
    Detected,
    /// No wrist motion at all; defaulted to the right hand with zero confidence.
    NoMotionDefault,
    /// Set by the caller.
    Configured,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct HandednessEstimate {
    pub hand: Side,
    /// `|right / (left + right) - 0.5| * 2`, in `[0, 1]`.
    pub confidence: f32,
    /// Accumulated left-wrist displacement in pixels.
    pub left_motion: f32,
    /// Accumulated right-wrist displacement in pixels.
    pub right_motion: f32,
    pub outcome: HandednessOutcome,
}

impl HandednessEstimate {
    /// Estimate for an explicitly chosen hand.
    pub fn configured(hand: Side) -> Self {
        Self {
            hand,
            confidence: 1.0,
            left_motion: 0.0,
            right_motion: 0.0,
            outcome: HandednessOutcome::Configured,
        }
    }

    /// Build an estimate from accumulated wrist motion.
    ///
    /// The hand with more motion wins; ties go to the right hand.
    pub fn from_motion(left_motion: f32, right_motion: f32) -> Self {
        let total = left_motion + right_motion;
        if total.is_nan() || total <= 0.0 {
            return Self {
                hand: Side::Right,
                confidence: 0.0,
                left_motion,
                right_motion,
                outcome: HandednessOutcome::NoMotionDefault,
            };
        }
        let hand = if left_motion > right_motion {
            Side::Left
        } else {
            Side::Right
        };
        let confidence = ((right_motion / total - 0.5).abs() * 2.0).clamp(0.0, 1.0);
        Self {
            hand,
            confidence,
            left_motion,
            right_motion,
            outcome: HandednessOutcome::Detected,
        }
    }
}

/// Total wrist displacement per side over consecutive stored frames.
///
/// A pair only contributes when both frames have a confident wrist on that
/// side; gaps add nothing rather than counting as zero motion.
pub fn accumulate_wrist_motion(clip: &PoseClip<'_>) -> (f32, f32) {
    let layout = clip.layout();
    let mut totals = [0.0f32; 2];
    let mut prev: [Option<nalgebra::Point2<f32>>; 2] = [None, None];

    for sample in clip.samples() {
        for (k, side) in Side::BOTH.into_iter().enumerate() {
            let curr = sample.body.and_then(|b| {
                b.joint(layout, Joint::Wrist, side, HANDEDNESS_MIN_CONFIDENCE)
            });
            if let (Some(p0), Some(p1)) = (prev[k], curr) {
                totals[k] += (p1 - p0).norm();
            }
            prev[k] = curr;
        }
    }
    (totals[0], totals[1])
}

/// Infer the racket hand, degrading to a right-hand default when the
/// clip has no wrist motion.
pub fn detect_handedness(clip: &PoseClip<'_>) -> HandednessEstimate {
    let (left, right) = accumulate_wrist_motion(clip);
    let estimate = HandednessEstimate::from_motion(left, right);
    match estimate.outcome {
        HandednessOutcome::NoMotionDefault => {
            warn!("no wrist motion in clip; defaulting to right hand");
        }
        _ => debug!(
            "handedness: {:?} (left={left:.1}px right={right:.1}px conf={:.2})",
            estimate.hand, estimate.confidence
        ),
    }
    estimate
}

/// Like [`detect_handedness`], but zero motion is an error.
pub fn detect_handedness_strict(clip: &PoseClip<'_>) -> Result<HandednessEstimate, DetectError> {
    let (left, right) = accumulate_wrist_motion(clip);
    let estimate = HandednessEstimate::from_motion(left, right);
    if estimate.outcome == HandednessOutcome::NoMotionDefault {
        return Err(DetectError::NoHandednessSignal);
    }
    Ok(estimate)
}

/// Apply a [`HandSelection`].
pub fn resolve_hand(selection: HandSelection, clip: &PoseClip<'_>) -> HandednessEstimate {
    match selection {
        HandSelection::Auto => detect_handedness(clip),
        HandSelection::Left => HandednessEstimate::configured(Side::Left),
        HandSelection::Right => HandednessEstimate::configured(Side::Right),
    }
}
