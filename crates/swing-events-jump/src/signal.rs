use serde::{Deserialize, Serialize};
use swing_events_core::{
    angle_at_vertex, moving_average, vertical_velocity, Joint, PoseClip, Side,
};

use crate::LandingParams;

/// Joint pair the primary Y was read from.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrimarySource {
    Ankle,
    Hip,
}

/// Which foot is lowest in the image.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FootContact {
    Left,
    Right,
    Both,
}

/// Per-frame jump cues, as extracted.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LandingFrameSignal {
    pub frame: u32,
    pub timestamp: f32,
    /// Image Y of the lowest ankle, or of the lowest hip as a fallback.
    pub primary_y: Option<f32>,
    pub source: Option<PrimarySource>,
    /// Only set for ankle-sourced frames.
    pub foot: Option<FootContact>,
    pub left_knee_angle: Option<f32>,
    pub right_knee_angle: Option<f32>,
    pub knee_angle: Option<f32>,
    pub smoothed_knee_angle: Option<f32>,
    /// Pixels per second; negative is upward.
    pub vertical_velocity: Option<f32>,
    pub smoothed_vertical_velocity: Option<f32>,
}

type Primary = (f32, PrimarySource, Option<FootContact>);

/// Lowest ankle, else lowest hip.
pub(crate) fn primary_y(
    ankles: [Option<f32>; 2],
    hips: [Option<f32>; 2],
    both_feet_tolerance: f32,
) -> Option<Primary> {
    match ankles {
        [Some(l), Some(r)] => {
            let foot = if (l - r).abs() <= both_feet_tolerance {
                FootContact::Both
            } else if l > r {
                FootContact::Left
            } else {
                FootContact::Right
            };
            Some((l.max(r), PrimarySource::Ankle, Some(foot)))
        }
        [Some(l), None] => Some((l, PrimarySource::Ankle, Some(FootContact::Left))),
        [None, Some(r)] => Some((r, PrimarySource::Ankle, Some(FootContact::Right))),
        [None, None] => match hips {
            [Some(l), Some(r)] => Some((l.max(r), PrimarySource::Hip, None)),
            [Some(y), None] | [None, Some(y)] => Some((y, PrimarySource::Hip, None)),
            [None, None] => None,
        },
    }
}

pub(crate) fn extract_signals(
    clip: &PoseClip<'_>,
    params: &LandingParams,
) -> Vec<LandingFrameSignal> {
    let layout = clip.layout();
    let conf = params.min_confidence;
    let mut out = Vec::with_capacity(clip.len());

    for sample in clip.samples() {
        let pt = |joint: Joint, side: Side| {
            sample
                .body
                .and_then(|b| b.joint(layout, joint, side, conf))
        };
        let ankles = Side::BOTH.map(|s| pt(Joint::Ankle, s));
        let hips = Side::BOTH.map(|s| pt(Joint::Hip, s));
        let primary = primary_y(
            ankles.map(|p| p.map(|p| p.y)),
            hips.map(|p| p.map(|p| p.y)),
            params.both_feet_tolerance_px,
        );

        let knee_angle = |side: Side| {
            let k = side as usize;
            match (hips[k], pt(Joint::Knee, side), ankles[k]) {
                (Some(h), Some(knee), Some(a)) => Some(angle_at_vertex(h, knee, a)),
                _ => None,
            }
        };
        let left_knee_angle = knee_angle(Side::Left);
        let right_knee_angle = knee_angle(Side::Right);
        let knee_angle = match (left_knee_angle, right_knee_angle) {
            (Some(l), Some(r)) => Some(0.5 * (l + r)),
            (one, other) => one.or(other),
        };

        out.push(LandingFrameSignal {
            frame: sample.frame,
            timestamp: sample.timestamp,
            primary_y: primary.map(|p| p.0),
            source: primary.map(|p| p.1),
            foot: primary.and_then(|p| p.2),
            left_knee_angle,
            right_knee_angle,
            knee_angle,
            smoothed_knee_angle: None,
            vertical_velocity: None,
            smoothed_vertical_velocity: None,
        });
    }

    let track: Vec<(u32, Option<f32>)> = out.iter().map(|s| (s.frame, s.primary_y)).collect();
    let velocity = vertical_velocity(&track, clip.fps());
    let knees = moving_average(
        &out.iter().map(|s| s.knee_angle).collect::<Vec<_>>(),
        params.smoothing_window,
    );
    let smoothed_velocity = moving_average(&velocity, params.smoothing_window);
    for (i, s) in out.iter_mut().enumerate() {
        s.vertical_velocity = velocity[i];
        s.smoothed_vertical_velocity = smoothed_velocity[i];
        s.smoothed_knee_angle = knees[i];
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefers_the_lower_ankle() {
        let (y, src, foot) = primary_y([Some(480.0), Some(500.0)], [None, None], 10.0).unwrap();
        assert_eq!((y, src, foot), (500.0, PrimarySource::Ankle, Some(FootContact::Right)));

        let (y, _, foot) = primary_y([Some(495.0), Some(500.0)], [None, None], 10.0).unwrap();
        assert_eq!((y, foot), (500.0, Some(FootContact::Both)));

        let (_, _, foot) = primary_y([Some(520.0), None], [None, None], 10.0).unwrap();
        assert_eq!(foot, Some(FootContact::Left));
    }

    #[test]
    fn falls_back_to_the_lower_hip() {
        let (y, src, foot) = primary_y([None, None], [Some(300.0), Some(310.0)], 10.0).unwrap();
        assert_eq!((y, src, foot), (310.0, PrimarySource::Hip, None));
        assert!(primary_y([None, None], [None, None], 10.0).is_none());
    }
}
