use nalgebra::{Point2, Vector2};
use serde::{Deserialize, Serialize};
use swing_events_core::{angle_at_vertex, motion_profile, moving_average, Joint, PoseClip, Side};

use super::ContactParams;

/// Joint that stood in for the arm tip at one frame.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArmTip {
    Wrist,
    Elbow,
}

/// Per-frame contact cues, as extracted.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ContactFrameSignal {
    pub frame: u32,
    pub timestamp: f32,
    pub tip: Option<Point2<f32>>,
    pub tip_source: Option<ArmTip>,
    pub tip_speed: Option<f32>,
    pub tip_acceleration: Option<f32>,
    pub smoothed_tip_speed: Option<f32>,
    /// Shoulder-elbow-wrist angle in degrees; 180 is a straight arm.
    pub extension_angle: Option<f32>,
    /// Set when the angle came from the shoulder-to-elbow bearing.
    pub extension_estimated: bool,
    /// Mean image Y of the racket-side shoulder and hip; lower is a taller
    /// stretch.
    pub trunk_y: Option<f32>,
}

/// Higher of wrist and elbow in the image. Equal heights keep the wrist.
pub(crate) fn arm_tip(
    wrist: Option<Point2<f32>>,
    elbow: Option<Point2<f32>>,
) -> Option<(Point2<f32>, ArmTip)> {
    match (wrist, elbow) {
        (Some(w), Some(e)) if e.y < w.y => Some((e, ArmTip::Elbow)),
        (Some(w), _) => Some((w, ArmTip::Wrist)),
        (None, Some(e)) => Some((e, ArmTip::Elbow)),
        (None, None) => None,
    }
}

/// Midpoint height of shoulder and hip. Both are required so a dropped
/// joint cannot shift the level by a whole torso length.
pub(crate) fn trunk_height(shoulder: Option<Point2<f32>>, hip: Option<Point2<f32>>) -> Option<f32> {
    shoulder.zip(hip).map(|(s, h)| 0.5 * (s.y + h.y))
}

/// Arm extension angle and whether it was estimated.
///
/// With all three joints it is the angle at the elbow. Without a wrist, an
/// elbow tip gives `180 - bearing`, the bearing being the angle at the
/// shoulder between the upper arm and straight up.
pub(crate) fn extension_angle(
    shoulder: Option<Point2<f32>>,
    elbow: Option<Point2<f32>>,
    wrist: Option<Point2<f32>>,
    tip: Option<ArmTip>,
) -> Option<(f32, bool)> {
    match (shoulder, elbow, wrist) {
        (Some(s), Some(e), Some(w)) => Some((angle_at_vertex(s, e, w), false)),
        (Some(s), Some(e), None) if tip == Some(ArmTip::Elbow) => {
            let up = s + Vector2::new(0.0, -1.0);
            Some((180.0 - angle_at_vertex(e, s, up), true))
        }
        _ => None,
    }
}

pub(crate) fn extract_signals(
    clip: &PoseClip<'_>,
    racket_hand: Side,
    params: &ContactParams,
) -> Vec<ContactFrameSignal> {
    let layout = clip.layout();
    let conf = params.min_confidence;

    let mut out = Vec::with_capacity(clip.len());
    let mut tip_track = Vec::with_capacity(clip.len());

    for sample in clip.samples() {
        let pt = |joint: Joint| {
            sample
                .body
                .and_then(|b| b.joint(layout, joint, racket_hand, conf))
        };
        let wrist = pt(Joint::Wrist);
        let elbow = pt(Joint::Elbow);
        let shoulder = pt(Joint::Shoulder);
        let hip = pt(Joint::Hip);

        let tip = arm_tip(wrist, elbow);
        let tip_source = tip.map(|(_, src)| src);
        let extension = extension_angle(shoulder, elbow, wrist, tip_source);

        tip_track.push((sample.frame, tip.map(|(p, _)| p)));
        out.push(ContactFrameSignal {
            frame: sample.frame,
            timestamp: sample.timestamp,
            tip: tip.map(|(p, _)| p),
            tip_source,
            tip_speed: None,
            tip_acceleration: None,
            smoothed_tip_speed: None,
            extension_angle: extension.map(|(a, _)| a),
            extension_estimated: extension.is_some_and(|(_, est)| est),
            trunk_y: trunk_height(shoulder, hip),
        });
    }

    let motion = motion_profile(&tip_track, clip.fps());
    let speed: Vec<Option<f32>> = motion.iter().map(|m| m.speed).collect();
    let smoothed = moving_average(&speed, params.smoothing_window);
    for (i, s) in out.iter_mut().enumerate() {
        s.tip_speed = motion[i].speed;
        s.tip_acceleration = motion[i].acceleration;
        s.smoothed_tip_speed = smoothed[i];
    }
    out
}
