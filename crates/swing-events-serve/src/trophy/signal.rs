use nalgebra::Point2;
use serde::{Deserialize, Serialize};
use swing_events_core::{
    angle_at_vertex, displacement, distance, motion_profile, moving_average, Joint, PoseClip,
    Side,
};

use super::TrophyParams;

/// Per-frame trophy cues, as extracted. Never modified after extraction.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TrophyFrameSignal {
    pub frame: u32,
    pub timestamp: f32,
    pub racket_wrist: Option<Point2<f32>>,
    pub wrist_speed: Option<f32>,
    pub wrist_acceleration: Option<f32>,
    pub smoothed_acceleration: Option<f32>,
    /// Image Y of the toss (non-racket) wrist; smaller is higher.
    pub toss_wrist_y: Option<f32>,
    pub smoothed_toss_wrist_y: Option<f32>,
    /// 0..1, full credit only with both wrists above their shoulders.
    pub arms_up: Option<f32>,
    pub left_knee_angle: Option<f32>,
    pub right_knee_angle: Option<f32>,
    /// Mean of `180 - knee angle` over the legs that are visible.
    pub knee_bend: Option<f32>,
    pub smoothed_knee_bend: Option<f32>,
    pub ankle_separation: Option<f32>,
    pub knee_separation: Option<f32>,
    /// Mean ankle displacement from the previous record, in pixels.
    pub ankle_motion: Option<f32>,
}

/// Credit for arms raised above the shoulders, scaled by shoulder width.
///
/// Both arms up: mean of the two grades. One arm up: `single_arm_credit`
/// times that arm's grade. Requires both shoulders.
pub(crate) fn arms_up_score(
    wrists: [Option<Point2<f32>>; 2],
    shoulders: [Option<Point2<f32>>; 2],
    single_arm_credit: f32,
) -> Option<f32> {
    let (Some(ls), Some(rs)) = (shoulders[0], shoulders[1]) else {
        return None;
    };
    let width = distance(ls, rs).max(1.0);
    let grade = |wrist: Option<Point2<f32>>, shoulder: Point2<f32>| {
        wrist.map(|w| ((shoulder.y - w.y) / width).clamp(0.0, 1.0))
    };
    match (grade(wrists[0], ls), grade(wrists[1], rs)) {
        (None, None) => None,
        (Some(l), Some(r)) if l > 0.0 && r > 0.0 => Some(0.5 * (l + r)),
        (Some(l), Some(r)) => Some(single_arm_credit * l.max(r)),
        (Some(g), None) | (None, Some(g)) => Some(single_arm_credit * g),
    }
}

fn mean_of(values: [Option<f32>; 2]) -> Option<f32> {
    let (sum, n) = values
        .iter()
        .flatten()
        .fold((0.0f32, 0usize), |(s, n), v| (s + v, n + 1));
    (n > 0).then(|| sum / n as f32)
}

/// One pass over the clip, then motion and smoothing passes.
pub(crate) fn extract_signals(
    clip: &PoseClip<'_>,
    racket_hand: Side,
    params: &TrophyParams,
) -> Vec<TrophyFrameSignal> {
    let layout = clip.layout();
    let conf = params.min_confidence;
    let toss_hand = racket_hand.opposite();

    let mut out = Vec::with_capacity(clip.len());
    let mut wrist_track = Vec::with_capacity(clip.len());
    let mut ankle_tracks: [Vec<Option<Point2<f32>>>; 2] = [Vec::new(), Vec::new()];

    for sample in clip.samples() {
        let pt = |joint: Joint, side: Side| {
            sample
                .body
                .and_then(|b| b.joint(layout, joint, side, conf))
        };

        let racket_wrist = pt(Joint::Wrist, racket_hand);
        let wrists = [pt(Joint::Wrist, Side::Left), pt(Joint::Wrist, Side::Right)];
        let shoulders = [
            pt(Joint::Shoulder, Side::Left),
            pt(Joint::Shoulder, Side::Right),
        ];
        let knees = [pt(Joint::Knee, Side::Left), pt(Joint::Knee, Side::Right)];
        let ankles = [pt(Joint::Ankle, Side::Left), pt(Joint::Ankle, Side::Right)];

        let knee_angle = |side: Side| {
            let k = side as usize;
            match (pt(Joint::Hip, side), knees[k], ankles[k]) {
                (Some(hip), Some(knee), Some(ankle)) => Some(angle_at_vertex(hip, knee, ankle)),
                _ => None,
            }
        };
        let left_knee_angle = knee_angle(Side::Left);
        let right_knee_angle = knee_angle(Side::Right);
        let knee_bend = mean_of([
            left_knee_angle.map(|a| 180.0 - a),
            right_knee_angle.map(|a| 180.0 - a),
        ]);

        let pair_distance = |pair: [Option<Point2<f32>>; 2]| match pair {
            [Some(a), Some(b)] => Some(distance(a, b)),
            _ => None,
        };

        wrist_track.push((sample.frame, racket_wrist));
        ankle_tracks[0].push(ankles[0]);
        ankle_tracks[1].push(ankles[1]);

        out.push(TrophyFrameSignal {
            frame: sample.frame,
            timestamp: sample.timestamp,
            racket_wrist,
            wrist_speed: None,
            wrist_acceleration: None,
            smoothed_acceleration: None,
            toss_wrist_y: pt(Joint::Wrist, toss_hand).map(|p| p.y),
            smoothed_toss_wrist_y: None,
            arms_up: arms_up_score(wrists, shoulders, params.single_arm_credit),
            left_knee_angle,
            right_knee_angle,
            knee_bend,
            smoothed_knee_bend: None,
            ankle_separation: pair_distance(ankles),
            knee_separation: pair_distance(knees),
            ankle_motion: None,
        });
    }

    let motion = motion_profile(&wrist_track, clip.fps());
    let left_ankle_motion = displacement(&ankle_tracks[0]);
    let right_ankle_motion = displacement(&ankle_tracks[1]);
    for (i, s) in out.iter_mut().enumerate() {
        s.wrist_speed = motion[i].speed;
        s.wrist_acceleration = motion[i].acceleration;
        s.ankle_motion = mean_of([left_ankle_motion[i], right_ankle_motion[i]]);
    }

    let window = params.smoothing_window;
    let accel = moving_average(
        &out.iter().map(|s| s.wrist_acceleration).collect::<Vec<_>>(),
        window,
    );
    let toss = moving_average(
        &out.iter().map(|s| s.toss_wrist_y).collect::<Vec<_>>(),
        window,
    );
    let bend = moving_average(
        &out.iter().map(|s| s.knee_bend).collect::<Vec<_>>(),
        window,
    );
    for (i, s) in out.iter_mut().enumerate() {
        s.smoothed_acceleration = accel[i];
        s.smoothed_toss_wrist_y = toss[i];
        s.smoothed_knee_bend = bend[i];
    }
    out
}
