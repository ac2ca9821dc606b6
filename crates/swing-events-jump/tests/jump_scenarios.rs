use approx::assert_abs_diff_eq;
use swing_events_core::{
    Body, ClipInfo, DetectError, Joint, Keypoint, PoseFrames, Side, SkeletonModel,
};
use swing_events_jump::{FootContact, LandingDetector, LandingParams, PrimarySource};

const FPS: f32 = 30.0;
const MODEL: SkeletonModel = SkeletonModel::BlazePose33;

fn info() -> ClipInfo {
    ClipInfo::new(FPS, MODEL)
}

/// Feet at `ankle_y`, hips 200 px above, knees flexed to `180 - bend_deg`.
fn jumper(ankle_y: f32, bend_deg: f32) -> Body {
    let layout = MODEL.layout();
    let offset = 100.0 * (bend_deg.to_radians() / 2.0).tan();
    let mut body = Body::empty(MODEL);
    for (side, x, dir) in [(Side::Left, 300.0, -1.0), (Side::Right, 360.0, 1.0)] {
        body.set_joint(&layout, Joint::Hip, side, Keypoint::new(x, ankle_y - 200.0, 0.9))
            .set_joint(
                &layout,
                Joint::Knee,
                side,
                Keypoint::new(x + dir * offset, ankle_y - 100.0, 0.9),
            )
            .set_joint(&layout, Joint::Ankle, side, Keypoint::new(x, ankle_y, 0.9));
    }
    body
}

/// Ankles rise linearly from 500 to 100 px over 30 frames and come back down.
fn v_jump(i: u32) -> f32 {
    let i = i as f32;
    if i <= 30.0 {
        500.0 - 400.0 * i / 30.0
    } else {
        100.0 + 400.0 * (i - 30.0) / 30.0
    }
}

#[test]
fn v_shaped_jump() {
    let frames: PoseFrames = (0..=60u32).map(|i| (i, vec![jumper(v_jump(i), 0.0)])).collect();
    let jump = LandingDetector::default()
        .detect(&frames, &info())
        .expect("jump detection");

    assert!(jump.takeoff.frame <= 3);
    assert_eq!(jump.peak.frame, 30);
    assert!((57..=60).contains(&jump.landing.frame));
    assert_abs_diff_eq!(jump.jump_height_ratio, 0.8, epsilon = 1e-5);
    assert_abs_diff_eq!(jump.jump_height_px, 400.0, epsilon = 1e-3);
    assert_abs_diff_eq!(
        jump.flight_time,
        (jump.landing.frame - jump.takeoff.frame) as f32 / FPS,
        epsilon = 1e-5
    );
    assert_abs_diff_eq!(jump.confidence, 1.0);
    assert!(jump
        .signals
        .iter()
        .all(|s| s.source == Some(PrimarySource::Ankle) && s.foot == Some(FootContact::Both)));

    let up = jump.peak_upward_velocity_px_s.expect("upward velocity");
    let down = jump.peak_downward_velocity_px_s.expect("downward velocity");
    assert!(up < 0.0 && down > 0.0);
}

fn knee_profile(i: u32) -> f32 {
    let f = i as f32;
    match i {
        0..=5 => 170.0 - 14.0 * f,
        6..=11 => 100.0 + 10.0 * (f - 5.0),
        12..=40 => 160.0 + 0.5 * (f - 11.0),
        41..=68 => 176.0,
        69 => 178.0,
        70 | 71 => 176.0,
        72 => 174.0,
        _ => 172.0 - 2.0 * (f - 73.0),
    }
}

fn stand_jump_stand(i: u32) -> f32 {
    let f = i as f32;
    match i {
        0..=10 => 500.0,
        11..=40 => 500.0 - 400.0 * (f - 10.0) / 30.0,
        41..=69 => 100.0 + 400.0 * (f - 40.0) / 30.0,
        _ => 500.0,
    }
}

#[test]
fn knee_phases_around_the_flight() {
    let frames: PoseFrames = (0..=85u32)
        .map(|i| (i, vec![jumper(stand_jump_stand(i), 180.0 - knee_profile(i))]))
        .collect();
    let params = LandingParams {
        smoothing_window: 1,
        ..LandingParams::default()
    };
    let jump = LandingDetector::new(params)
        .detect(&frames, &info())
        .expect("jump detection");

    assert_eq!(jump.takeoff.frame, 11);
    assert_eq!(jump.peak.frame, 40);
    assert_eq!(jump.landing.frame, 69);
    assert_eq!(jump.loading.map(|e| e.frame), Some(5));
    assert_eq!(jump.extension.map(|e| e.frame), Some(40));
    assert_eq!(jump.absorption.map(|e| e.frame), Some(73));
    assert!(!jump.absorption_fallback);

    let up = jump.peak_upward_velocity.expect("upward").frame;
    let down = jump.peak_downward_velocity.expect("downward").frame;
    assert!((11..=40).contains(&up));
    assert!((40..=69).contains(&down));
}

#[test]
fn hips_stand_in_for_lost_ankles() {
    let layout = MODEL.layout();
    let frames: PoseFrames = (0..=60u32)
        .map(|i| {
            let mut body = jumper(v_jump(i) + 200.0, 0.0);
            for side in Side::BOTH {
                body.set_joint(&layout, Joint::Ankle, side, Keypoint::new(0.0, 0.0, 0.0));
            }
            (i, vec![body])
        })
        .collect();
    let jump = LandingDetector::default()
        .detect(&frames, &info())
        .expect("jump detection");

    assert_eq!(jump.peak.frame, 30);
    assert!(jump
        .signals
        .iter()
        .all(|s| s.source == Some(PrimarySource::Hip) && s.foot.is_none()));
    assert!(jump.signals.iter().all(|s| s.knee_angle.is_none()));
    assert!(jump.loading.is_none() && jump.absorption.is_none());
    assert_abs_diff_eq!(jump.confidence, 0.5);
}

#[test]
fn shallow_dip_is_not_a_jump() {
    let frames: PoseFrames = (0..=40u32)
        .map(|i| {
            let dip = 5.0 - (i as f32 - 20.0).abs() / 4.0;
            (i, vec![jumper(500.0 - dip, 0.0)])
        })
        .collect();
    let err = LandingDetector::default().detect(&frames, &info()).unwrap_err();
    assert!(matches!(err, DetectError::NoEventFound { detector: "landing", .. }));
}

#[test]
fn short_clip_is_insufficient() {
    let frames: PoseFrames = (0..5u32).map(|i| (i, vec![jumper(500.0, 0.0)])).collect();
    assert_eq!(
        LandingDetector::default().detect(&frames, &info()).unwrap_err(),
        DetectError::InsufficientData {
            detector: "landing",
            usable: 5,
            required: 10,
        }
    );
}

#[test]
fn repeated_runs_serialize_identically() {
    let frames: PoseFrames = (0..=60u32).map(|i| (i, vec![jumper(v_jump(i), 10.0)])).collect();
    let detector = LandingDetector::default();
    let a = serde_json::to_string(&detector.detect(&frames, &info()).unwrap()).unwrap();
    let b = serde_json::to_string(&detector.detect(&frames, &info()).unwrap()).unwrap();
    assert_eq!(a, b);
}
