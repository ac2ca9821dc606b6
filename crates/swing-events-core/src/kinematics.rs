//! Finite-difference motion estimates over sparse frame sequences.
//!
//! All functions take one record per stored frame, in ascending frame
//! order, and return one value per record. Time steps come from the actual
//! frame indices, so gaps in the store and records missing the tracked
//! point lengthen `dt` instead of being treated as adjacent frames.

use nalgebra::Point2;
use serde::{Deserialize, Serialize};

/// Speed and acceleration of one tracked point at one record.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Motion {
    /// Pixels per second since the last record with a position.
    pub speed: Option<f32>,
    /// Change in speed per second since the last record with a speed.
    pub acceleration: Option<f32>,
}

#[inline]
fn step_seconds(prev: u32, curr: u32, fps: f32) -> Option<f32> {
    let dt = curr.checked_sub(prev)? as f32 / fps;
    (dt > 0.0).then_some(dt)
}

/// Pairs each record holding a value with the last earlier record that held
/// one: `(previous, current, dt)`. Records without a value, or without an
/// earlier one, map to `None`.
fn with_previous<T: Copy>(track: &[(u32, Option<T>)], fps: f32) -> Vec<Option<(T, T, f32)>> {
    let mut last: Option<(u32, T)> = None;
    track
        .iter()
        .map(|&(frame, value)| {
            let value = value?;
            let step =
                last.and_then(|(f0, v0)| step_seconds(f0, frame, fps).map(|dt| (v0, value, dt)));
            last = Some((frame, value));
            step
        })
        .collect()
}

/// Speed/acceleration per record.
///
/// `speed[i]` differences the position at `i` against the last earlier
/// record with a position, over the real frame span. `acceleration[i]`
/// differences the speed at `i` against the last earlier speed and divides by
/// the mean of the two time steps. A record without a position has neither.
pub fn motion_profile(track: &[(u32, Option<Point2<f32>>)], fps: f32) -> Vec<Motion> {
    let speeds: Vec<(u32, Option<(f32, f32)>)> = track
        .iter()
        .zip(with_previous(track, fps))
        .map(|(&(frame, _), step)| (frame, step.map(|(p0, p1, dt)| ((p1 - p0).norm() / dt, dt))))
        .collect();

    speeds
        .iter()
        .zip(with_previous(&speeds, fps))
        .map(|(&(_, speed), step)| Motion {
            speed: speed.map(|(v, _)| v),
            acceleration: step.map(|((v1, dt1), (v2, dt2), _)| (v2 - v1) / (0.5 * (dt1 + dt2))),
        })
        .collect()
}

/// Signed vertical velocity per record in pixels per second (negative = upward).
///
/// Missing records are bridged the same way as in [`motion_profile`].
pub fn vertical_velocity(track: &[(u32, Option<f32>)], fps: f32) -> Vec<Option<f32>> {
    with_previous(track, fps)
        .into_iter()
        .map(|step| step.map(|(y0, y1, dt)| (y1 - y0) / dt))
        .collect()
}

/// Displacement in pixels from the previous record.
pub fn displacement(track: &[Option<Point2<f32>>]) -> Vec<Option<f32>> {
    let mut out = vec![None; track.len()];
    for i in 1..track.len() {
        if let (Some(p0), Some(p1)) = (track[i - 1], track[i]) {
            out[i] = Some((p1 - p0).norm());
        }
    }
    out
}

/// Velocity vector per record in pixels per second, bridging missing records.
pub fn velocity_vectors(
    track: &[(u32, Option<Point2<f32>>)],
    fps: f32,
) -> Vec<Option<nalgebra::Vector2<f32>>> {
    with_previous(track, fps)
        .into_iter()
        .map(|step| step.map(|(p0, p1, dt)| (p1 - p0) / dt))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn track(points: &[(u32, Option<(f32, f32)>)]) -> Vec<(u32, Option<Point2<f32>>)> {
        points
            .iter()
            .map(|&(f, p)| (f, p.map(|(x, y)| Point2::new(x, y))))
            .collect()
    }

    #[test]
    fn constant_velocity_has_zero_acceleration() {
        let t = track(&[
            (0, Some((0.0, 0.0))),
            (1, Some((3.0, 4.0))),
            (2, Some((6.0, 8.0))),
            (3, Some((9.0, 12.0))),
        ]);
        let m = motion_profile(&t, 10.0);
        assert_eq!(m[0], Motion::default());
        assert_relative_eq!(m[1].speed.unwrap(), 50.0);
        assert!(m[1].acceleration.is_none());
        assert_relative_eq!(m[3].speed.unwrap(), 50.0);
        assert_relative_eq!(m[3].acceleration.unwrap(), 0.0);
    }

    #[test]
    fn acceleration_uses_mean_step() {
        // Speeds 10 px/s then 40 px/s across steps of 1 and 3 frames at 1 fps.
        let t = track(&[
            (0, Some((0.0, 0.0))),
            (1, Some((10.0, 0.0))),
            (4, Some((130.0, 0.0))),
        ]);
        let m = motion_profile(&t, 1.0);
        assert_relative_eq!(m[1].speed.unwrap(), 10.0);
        assert_relative_eq!(m[2].speed.unwrap(), 40.0);
        assert_relative_eq!(m[2].acceleration.unwrap(), 15.0);
    }

    #[test]
    fn missing_record_is_bridged_from_the_last_position() {
        let t = track(&[
            (0, Some((0.0, 0.0))),
            (1, None),
            (2, Some((2.0, 0.0))),
            (3, Some((4.0, 0.0))),
        ]);
        let m = motion_profile(&t, 1.0);
        assert_eq!(m[1], Motion::default());
        // Record 2 against record 0: 2 px over 2 frames.
        assert_relative_eq!(m[2].speed.unwrap(), 1.0);
        assert!(m[2].acceleration.is_none());
        assert_relative_eq!(m[3].speed.unwrap(), 2.0);
        // (2 - 1) / mean(2, 1)
        assert_relative_eq!(m[3].acceleration.unwrap(), 1.0 / 1.5);
    }

    #[test]
    fn vertical_velocity_is_signed() {
        let v = vertical_velocity(
            &[(0, Some(100.0)), (1, Some(90.0)), (2, None), (3, Some(102.0))],
            30.0,
        );
        assert_eq!(v[0], None);
        assert_relative_eq!(v[1].unwrap(), -300.0);
        assert_eq!(v[2], None);
        assert_relative_eq!(v[3].unwrap(), 180.0);
    }

    #[test]
    fn displacement_and_vectors() {
        let pts = [Some(Point2::new(0.0, 0.0)), Some(Point2::new(0.0, 2.0)), None];
        assert_eq!(displacement(&pts), vec![None, Some(2.0), None]);

        let vel = velocity_vectors(&track(&[(0, Some((0.0, 0.0))), (2, Some((4.0, 0.0)))]), 2.0);
        assert_relative_eq!(vel[1].unwrap().x, 4.0);

        let bridged = velocity_vectors(
            &track(&[(0, Some((0.0, 0.0))), (1, None), (2, Some((0.0, 6.0)))]),
            1.0,
        );
        assert_eq!(bridged[1], None);
        assert_relative_eq!(bridged[2].unwrap().y, 3.0);
    }
}
