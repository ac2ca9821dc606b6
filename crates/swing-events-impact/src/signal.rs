use nalgebra::{Point2, Vector2};
use serde::{Deserialize, Serialize};
use swing_events_core::{
    centroid, motion_profile, smooth_channels, velocity_vectors, Joint, PoseClip, Side,
};

/// Core keypoints needed for a body center.
const MIN_CENTER_POINTS: usize = 2;

/// Per-frame swing cues, as extracted.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SwingFrameSignal {
    pub frame: u32,
    pub timestamp: f32,
    pub body_center: Option<Point2<f32>>,
    /// Wrist offsets from the body center.
    pub left_wrist: Option<Vector2<f32>>,
    pub right_wrist: Option<Vector2<f32>>,
    pub left_speed: Option<f32>,
    pub right_speed: Option<f32>,
    pub left_acceleration: Option<f32>,
    pub right_acceleration: Option<f32>,
    /// Faster of the two wrists.
    pub combined_speed: Option<f32>,
    pub smoothed_speed: Option<f32>,
    /// Larger of the two signed wrist accelerations.
    pub combined_acceleration: Option<f32>,
    pub smoothed_acceleration: Option<f32>,
    /// Racket-wrist velocity along the center-to-wrist direction; positive is outward.
    pub radial_velocity: Option<f32>,
    pub smoothed_radial_velocity: Option<f32>,
}

impl SwingFrameSignal {
    pub(crate) fn has_motion_input(&self) -> bool {
        self.body_center.is_some() && (self.left_wrist.is_some() || self.right_wrist.is_some())
    }
}

fn max_of(a: Option<f32>, b: Option<f32>) -> Option<f32> {
    match (a, b) {
        (Some(a), Some(b)) => Some(a.max(b)),
        (one, other) => one.or(other),
    }
}

/// Component of `velocity` along `offset`; `None` for a zero offset.
pub(crate) fn radial_component(offset: Vector2<f32>, velocity: Vector2<f32>) -> Option<f32> {
    let r = offset.norm();
    (r > f32::EPSILON).then(|| velocity.dot(&offset) / r)
}

/// Outward-motion check over `[index - lookback, index]`.
///
/// Passes when the mean available sample exceeds `threshold`, and when no
/// sample is available at all.
pub(crate) fn moving_outward(
    radial: &[Option<f32>],
    index: usize,
    lookback: usize,
    threshold: f32,
) -> bool {
    let end = (index + 1).min(radial.len());
    let start = index.saturating_sub(lookback).min(end);
    let (sum, n) = radial[start..end]
        .iter()
        .flatten()
        .fold((0.0f32, 0usize), |(s, n), v| (s + v, n + 1));
    n == 0 || sum / n as f32 > threshold
}

fn wrist_track(signals: &[SwingFrameSignal], side: Side) -> Vec<(u32, Option<Point2<f32>>)> {
    signals
        .iter()
        .map(|s| {
            let offset = match side {
                Side::Left => s.left_wrist,
                Side::Right => s.right_wrist,
            };
            (s.frame, offset.map(Point2::from))
        })
        .collect()
}

pub(crate) fn extract_signals(
    clip: &PoseClip<'_>,
    racket_hand: Side,
    min_confidence: f32,
    smoothing_window: usize,
) -> Vec<SwingFrameSignal> {
    let layout = clip.layout();
    let mut out = Vec::with_capacity(clip.len());

    for sample in clip.samples() {
        let pt = |joint: Joint, side: Side| {
            sample
                .body
                .and_then(|b| b.joint(layout, joint, side, min_confidence))
        };
        let body_center = centroid(
            [
                pt(Joint::Shoulder, Side::Left),
                pt(Joint::Shoulder, Side::Right),
                pt(Joint::Hip, Side::Left),
                pt(Joint::Hip, Side::Right),
            ],
            MIN_CENTER_POINTS,
        );
        let relative = |side: Side| body_center.zip(pt(Joint::Wrist, side)).map(|(c, w)| w - c);

        out.push(SwingFrameSignal {
            frame: sample.frame,
            timestamp: sample.timestamp,
            body_center,
            left_wrist: relative(Side::Left),
            right_wrist: relative(Side::Right),
            left_speed: None,
            right_speed: None,
            left_acceleration: None,
            right_acceleration: None,
            combined_speed: None,
            smoothed_speed: None,
            combined_acceleration: None,
            smoothed_acceleration: None,
            radial_velocity: None,
            smoothed_radial_velocity: None,
        });
    }

    let fps = clip.fps();
    let left_track = wrist_track(&out, Side::Left);
    let right_track = wrist_track(&out, Side::Right);
    let left = motion_profile(&left_track, fps);
    let right = motion_profile(&right_track, fps);
    let racket_track = match racket_hand {
        Side::Left => &left_track,
        Side::Right => &right_track,
    };
    let racket_velocity = velocity_vectors(racket_track, fps);

    for (i, s) in out.iter_mut().enumerate() {
        s.left_speed = left[i].speed;
        s.right_speed = right[i].speed;
        s.left_acceleration = left[i].acceleration;
        s.right_acceleration = right[i].acceleration;
        s.combined_speed = max_of(s.left_speed, s.right_speed);
        s.combined_acceleration = max_of(s.left_acceleration, s.right_acceleration);
        let offset = match racket_hand {
            Side::Left => s.left_wrist,
            Side::Right => s.right_wrist,
        };
        s.radial_velocity = offset
            .zip(racket_velocity[i])
            .and_then(|(r, v)| radial_component(r, v));
    }

    let speed: Vec<Option<f32>> = out.iter().map(|s| s.combined_speed).collect();
    let accel: Vec<Option<f32>> = out.iter().map(|s| s.combined_acceleration).collect();
    let radial: Vec<Option<f32>> = out.iter().map(|s| s.radial_velocity).collect();
    let [speed, accel, radial] =
        smooth_channels([&speed[..], &accel[..], &radial[..]], smoothing_window);
    for (i, s) in out.iter_mut().enumerate() {
        s.smoothed_speed = speed[i];
        s.smoothed_acceleration = accel[i];
        s.smoothed_radial_velocity = radial[i];
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn radial_sign_follows_direction() {
        let offset = Vector2::new(3.0, 4.0);
        assert_abs_diff_eq!(
            radial_component(offset, Vector2::new(6.0, 8.0)).unwrap(),
            10.0
        );
        assert_abs_diff_eq!(
            radial_component(offset, Vector2::new(-3.0, -4.0)).unwrap(),
            -5.0
        );
        assert_abs_diff_eq!(
            radial_component(offset, Vector2::new(4.0, -3.0)).unwrap(),
            0.0
        );
        assert!(radial_component(Vector2::zeros(), Vector2::new(1.0, 0.0)).is_none());
    }

    #[test]
    fn outward_check_uses_the_lookback_mean() {
        let radial = vec![Some(-5.0), Some(1.0), Some(2.0), None, Some(3.0)];
        assert!(moving_outward(&radial, 4, 2, 0.0));
        assert!(!moving_outward(&radial, 1, 1, 0.0));
        assert!(moving_outward(&[None, None, None], 2, 8, 0.0));
    }

    #[test]
    fn combined_channels_take_the_larger_wrist() {
        assert_eq!(max_of(Some(1.0), Some(-3.0)), Some(1.0));
        assert_eq!(max_of(None, Some(-3.0)), Some(-3.0));
        assert_eq!(max_of(None, None), None);
    }
}
