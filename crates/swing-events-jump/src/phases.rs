use swing_events_core::{argmax_in, argmin_in};

use crate::LandingParams;

/// Record indices of the airborne part of the clip.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Flight {
    pub takeoff: usize,
    pub peak: usize,
    pub landing: usize,
    pub ground_y: f32,
    pub peak_y: f32,
}

impl Flight {
    /// `(ground - peak) / ground`.
    pub fn height_ratio(&self) -> f32 {
        if self.ground_y > 0.0 {
            (self.ground_y - self.peak_y) / self.ground_y
        } else {
            0.0
        }
    }
}

/// Peak, takeoff and landing from the raw primary Y.
///
/// Ground level is the larger of the first and last available Y. Takeoff is
/// the last record before the peak at or below `ground_fraction` of ground,
/// landing the first one after it.
pub(crate) fn locate_flight(
    primary_y: &[Option<f32>],
    params: &LandingParams,
) -> Result<Flight, String> {
    let n = primary_y.len();
    let peak = argmin_in(primary_y, 0..n).ok_or("no primary Y")?;
    let first = primary_y.iter().flatten().next();
    let last = primary_y.iter().rev().flatten().next();
    let (Some(&first), Some(&last)) = (first, last) else {
        return Err("no primary Y".to_string());
    };
    if peak == 0 || peak + 1 == n {
        return Err(format!("jump peak on the clip boundary (record {peak})"));
    }

    let ground_y = first.max(last);
    let threshold = params.ground_fraction * ground_y;
    let on_ground = |i: &usize| primary_y[*i].is_some_and(|y| y >= threshold);

    let takeoff = (0..peak)
        .rev()
        .find(on_ground)
        .ok_or("no takeoff before the peak")?;
    let landing = (peak + 1..n)
        .find(on_ground)
        .ok_or("no landing after the peak")?;
    let peak_y = primary_y[peak].unwrap_or(ground_y);

    Ok(Flight {
        takeoff,
        peak,
        landing,
        ground_y,
        peak_y,
    })
}

/// Knee phase indices: loading, extension and absorption.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub(crate) struct KneePhases {
    pub loading: Option<usize>,
    pub extension: Option<usize>,
    pub absorption: Option<usize>,
    /// Absorption came from the post-landing minimum.
    pub absorption_fallback: bool,
}

/// Loading is the deepest knee bend up to takeoff, extension the straightest
/// knee between loading and peak. Absorption is the first record after the
/// straightest post-landing knee that flexes by `absorption_drop_deg`.
pub(crate) fn knee_phases(
    knee: &[Option<f32>],
    flight: &Flight,
    params: &LandingParams,
) -> KneePhases {
    let n = knee.len();
    let loading = argmin_in(knee, 0..flight.takeoff + 1);
    let extension = loading.and_then(|l| argmax_in(knee, l..flight.peak + 1));

    let lookahead_end = (flight.landing + params.absorption_lookahead + 1).min(n);
    let straightest = argmax_in(knee, flight.landing..lookahead_end);
    let flexed = straightest.and_then(|s| {
        let limit = knee[s]? - params.absorption_drop_deg;
        (s + 1..n).find(|&j| knee[j].is_some_and(|a| a <= limit))
    });
    let (absorption, absorption_fallback) = match flexed {
        Some(j) => (Some(j), false),
        None => {
            let fallback = argmin_in(knee, flight.landing..n);
            (fallback, fallback.is_some())
        }
    };

    KneePhases {
        loading,
        extension,
        absorption,
        absorption_fallback,
    }
}

/// Fastest rise between takeoff and peak, fastest fall between peak and landing.
pub(crate) fn velocity_extremes(
    velocity: &[Option<f32>],
    flight: &Flight,
) -> (Option<usize>, Option<usize>) {
    let upward = argmin_in(velocity, flight.takeoff..flight.peak + 1);
    let downward = argmax_in(velocity, flight.peak..flight.landing + 1);
    (upward, downward)
}
