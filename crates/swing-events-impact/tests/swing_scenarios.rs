use approx::assert_abs_diff_eq;
use swing_events_core::{
    Body, ClipInfo, DetectError, HandSelection, Joint, Keypoint, PoseFrames, Side, SkeletonModel,
};
use swing_events_impact::{SwingV1Detector, SwingV1Params, SwingV2Detector, SwingV2Params};

const FPS: f32 = 30.0;
const MODEL: SkeletonModel = SkeletonModel::Coco17;

fn info() -> ClipInfo {
    ClipInfo::new(FPS, MODEL)
}

/// Still torso centered on (300, 275) with the two wrists given.
fn player(left_wrist: (f32, f32), right_wrist: (f32, f32)) -> Body {
    let layout = MODEL.layout();
    let mut body = Body::empty(MODEL);
    let joints = [
        (Joint::Shoulder, Side::Left, (250.0, 200.0)),
        (Joint::Shoulder, Side::Right, (350.0, 200.0)),
        (Joint::Hip, Side::Left, (260.0, 350.0)),
        (Joint::Hip, Side::Right, (340.0, 350.0)),
        (Joint::Wrist, Side::Left, left_wrist),
        (Joint::Wrist, Side::Right, right_wrist),
    ];
    for (joint, side, (x, y)) in joints {
        body.set_joint(&layout, joint, side, Keypoint::new(x, y, 0.9));
    }
    body
}

/// Left wrist bobs on a sinusoid; the right wrist jumps sideways at frame 40.
fn spike_clip(step: f32) -> PoseFrames {
    (0..60u32)
        .map(|i| {
            let phase = std::f32::consts::TAU * i as f32 / 20.0;
            let left = (240.0, 275.0 + 10.0 * phase.sin());
            let right_x = if i >= 40 { 380.0 + step } else { 380.0 };
            (i, vec![player(left, (right_x, 300.0))])
        })
        .collect()
}

#[test]
fn v2_finds_the_single_acceleration_spike() {
    let params = SwingV2Params {
        smoothing_window: 1,
        ..SwingV2Params::default()
    };
    let result = SwingV2Detector::new(params)
        .detect(&spike_clip(30.0), &info())
        .expect("swing detection");

    let frames: Vec<u32> = result.swings.iter().map(|s| s.frame).collect();
    assert_eq!(frames, vec![40]);
    let swing = &result.swings[0];
    assert_abs_diff_eq!(swing.timestamp, 40.0 / FPS);
    assert!(swing.prominence.map_or(true, |p| p >= 1.3));
    assert!(swing.confidence > 0.2 && swing.confidence <= 1.0);
    assert_eq!(result.signals.len(), 60);
}

#[test]
fn v2_direction_filter_drops_inward_motion() {
    let params = SwingV2Params {
        smoothing_window: 1,
        direction_filter: true,
        hand: HandSelection::Right,
        ..SwingV2Params::default()
    };
    let detector = SwingV2Detector::new(params);

    let err = detector.detect(&spike_clip(-30.0), &info()).unwrap_err();
    assert!(matches!(err, DetectError::NoEventFound { detector: "swing_v2", .. }));

    let outward = detector
        .detect(&spike_clip(30.0), &info())
        .expect("swing detection");
    assert_eq!(outward.swings.len(), 1);
    assert_eq!(outward.swings[0].frame, 40);
}

/// Outward step of the right wrist at frame 20, then a larger inward
/// recovery step at frame 35, well inside the V2 separation.
fn swing_then_recovery_clip() -> PoseFrames {
    (0..60u32)
        .map(|i| {
            let phase = std::f32::consts::TAU * i as f32 / 20.0;
            let left = (240.0, 275.0 + 10.0 * phase.sin());
            let right_x = match i {
                0..=19 => 380.0,
                20..=34 => 400.0,
                _ => 360.0,
            };
            (i, vec![player(left, (right_x, 300.0))])
        })
        .collect()
}

#[test]
fn v2_recovery_peak_does_not_hide_the_swing() {
    let params = SwingV2Params {
        smoothing_window: 1,
        hand: HandSelection::Right,
        ..SwingV2Params::default()
    };
    let frames = swing_then_recovery_clip();

    let unfiltered = SwingV2Detector::new(params.clone())
        .detect(&frames, &info())
        .expect("swing detection");
    let found: Vec<u32> = unfiltered.swings.iter().map(|s| s.frame).collect();
    assert_eq!(found, vec![35]);

    let filtered = SwingV2Detector::new(SwingV2Params {
        direction_filter: true,
        ..params
    })
    .detect(&frames, &info())
    .expect("swing detection");
    let found: Vec<u32> = filtered.swings.iter().map(|s| s.frame).collect();
    assert_eq!(found, vec![20]);
}

/// Right-wrist offset from the body center: a fast move at each swing
/// followed by a slow return over 20 frames. `sign` flips the direction.
fn swing_clip(sign: f32) -> PoseFrames {
    let mut offset = if sign > 0.0 { 60.0 } else { 190.0 };
    (0..90u32)
        .map(|i| {
            for c in [20u32, 60] {
                let d = i.abs_diff(c);
                if d <= 5 {
                    offset += sign * (20.0 - 3.0 * d as f32);
                } else if i >= c + 6 && i <= c + 25 {
                    offset -= sign * 6.5;
                }
            }
            (i, vec![player((240.0, 275.0), (300.0 + offset, 275.0))])
        })
        .collect()
}

#[test]
fn v1_finds_outward_swings() {
    let params = SwingV1Params {
        hand: HandSelection::Right,
        ..SwingV1Params::default()
    };
    let result = SwingV1Detector::new(params)
        .detect(&swing_clip(1.0), &info())
        .expect("swing detection");

    let frames: Vec<u32> = result.swings.iter().map(|s| s.frame).collect();
    assert_eq!(frames, vec![20, 60]);
    for swing in &result.swings {
        assert!(swing.confidence > 0.99);
        assert!(swing.prominence.is_none());
    }
    let at_20 = &result.signals[20];
    assert!(at_20.smoothed_radial_velocity.unwrap() > 0.0);
}

#[test]
fn v1_rejects_fast_inward_motion() {
    let params = SwingV1Params {
        hand: HandSelection::Right,
        ..SwingV1Params::default()
    };
    let err = SwingV1Detector::new(params)
        .detect(&swing_clip(-1.0), &info())
        .unwrap_err();
    assert!(matches!(err, DetectError::NoEventFound { detector: "swing_v1", .. }));
}

#[test]
fn no_torso_means_no_usable_frames() {
    let layout = MODEL.layout();
    let frames: PoseFrames = (0..20u32)
        .map(|i| {
            let mut body = Body::empty(MODEL);
            body.set_joint(
                &layout,
                Joint::Wrist,
                Side::Right,
                Keypoint::new(i as f32, 0.0, 0.9),
            );
            (i, vec![body])
        })
        .collect();

    assert_eq!(
        SwingV1Detector::default().detect(&frames, &info()).unwrap_err(),
        DetectError::InsufficientData {
            detector: "swing_v1",
            usable: 0,
            required: 10,
        }
    );
    assert!(matches!(
        SwingV2Detector::default().detect(&frames, &info()),
        Err(DetectError::InsufficientData { usable: 0, required: 5, .. })
    ));
}

#[test]
fn repeated_runs_serialize_identically() {
    let frames = swing_clip(1.0);
    let v1 = SwingV1Detector::default();
    let a = serde_json::to_string(&v1.detect(&frames, &info()).unwrap()).unwrap();
    let b = serde_json::to_string(&v1.detect(&frames, &info()).unwrap()).unwrap();
    assert_eq!(a, b);
}
