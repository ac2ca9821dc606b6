//! Peak search over null-aware, per-record signals.
//!
//! Indices are positions in the record sequence, not frame numbers.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

const ZERO_BASELINE: f32 = 1e-6;

/// Parameters for [`find_prominent_peaks`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PeakParams {
    /// A peak must be strictly greater than every sample within `±neighborhood`.
    pub neighborhood: usize,
    /// Half-width of the baseline neighbourhood.
    pub baseline_radius: usize,
    /// Half-width of the core around the peak excluded from the baseline.
    pub core_radius: usize,
    /// Minimum `value / baseline_mean`.
    pub min_prominence: f32,
    /// Minimum distance in records between two kept peaks.
    pub min_separation: usize,
}

impl Default for PeakParams {
    fn default() -> Self {
        Self {
            neighborhood: 2,
            baseline_radius: 15,
            core_radius: 3,
            min_prominence: 1.3,
            min_separation: 45,
        }
    }
}

/// One located peak.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Peak {
    pub index: usize,
    pub value: f32,
    /// `value / baseline_mean`; `None` when the baseline is empty or zero
    /// (unbounded). A negative baseline gives a negative ratio.
    pub prominence: Option<f32>,
}

impl Peak {
    /// Prominence with an unbounded baseline mapped to infinity.
    pub fn prominence_ratio(&self) -> f32 {
        self.prominence.unwrap_or(f32::INFINITY)
    }
}

/// Index of the largest sample. Ties keep the earliest index.
pub fn argmax(values: &[Option<f32>]) -> Option<usize> {
    let mut best: Option<(usize, f32)> = None;
    for (i, v) in values.iter().enumerate() {
        let Some(v) = *v else { continue };
        if best.map(|(_, b)| v > b).unwrap_or(true) {
            best = Some((i, v));
        }
    }
    best.map(|(i, _)| i)
}

/// Index of the smallest sample in `range`. Ties keep the earliest index.
pub fn argmin_in(values: &[Option<f32>], range: std::ops::Range<usize>) -> Option<usize> {
    let end = range.end.min(values.len());
    let mut best: Option<(usize, f32)> = None;
    for i in range.start..end {
        let Some(v) = values[i] else { continue };
        if best.map(|(_, b)| v < b).unwrap_or(true) {
            best = Some((i, v));
        }
    }
    best.map(|(i, _)| i)
}

/// Index of the largest sample in `range`. Ties keep the earliest index.
pub fn argmax_in(values: &[Option<f32>], range: std::ops::Range<usize>) -> Option<usize> {
    let end = range.end.min(values.len());
    let start = range.start.min(end);
    argmax(&values[start..end]).map(|i| i + start)
}

/// Median of the available samples.
pub fn median(values: &[Option<f32>]) -> Option<f32> {
    let mut v: Vec<f32> = values.iter().flatten().copied().collect();
    if v.is_empty() {
        return None;
    }
    v.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
    let mid = v.len() / 2;
    if v.len() % 2 == 0 {
        Some(0.5 * (v[mid - 1] + v[mid]))
    } else {
        Some(v[mid])
    }
}

/// Records strictly greater than every available sample within `±neighborhood`.
///
/// Missing neighbours are ignored; a record needs at least one available
/// neighbour to qualify.
pub fn local_maxima(values: &[Option<f32>], neighborhood: usize) -> Vec<usize> {
    let n = values.len();
    let mut out = Vec::new();
    for (i, v) in values.iter().enumerate() {
        let Some(v) = *v else { continue };
        let lo = i.saturating_sub(neighborhood);
        let hi = (i + neighborhood).min(n.saturating_sub(1));
        let mut seen = false;
        let mut is_max = true;
        for j in (lo..=hi).filter(|&j| j != i) {
            if let Some(u) = values[j] {
                seen = true;
                if u >= v {
                    is_max = false;
                    break;
                }
            }
        }
        if seen && is_max {
            out.push(i);
        }
    }
    out
}

/// Mean of samples in `[i - radius, i + radius]` excluding `[i - core, i + core]`.
fn baseline_mean(values: &[Option<f32>], i: usize, radius: usize, core: usize) -> Option<f32> {
    let n = values.len();
    let lo = i.saturating_sub(radius);
    let hi = (i + radius).min(n.saturating_sub(1));
    let (sum, count) = (lo..=hi)
        .filter(|&j| j.abs_diff(i) > core)
        .filter_map(|j| values[j])
        .fold((0.0f32, 0usize), |(s, c), v| (s + v, c + 1));
    (count > 0).then(|| sum / count as f32)
}

/// Greedy selection by descending value under a minimum separation.
///
/// Equal values are taken in index order. The result is chronological.
pub fn select_separated(mut candidates: Vec<Peak>, min_separation: usize) -> Vec<Peak> {
    candidates.sort_by(|a, b| {
        b.value
            .partial_cmp(&a.value)
            .unwrap_or(Ordering::Equal)
            .then(a.index.cmp(&b.index))
    });
    let mut kept: Vec<Peak> = Vec::new();
    for c in candidates {
        if kept
            .iter()
            .all(|k| k.index.abs_diff(c.index) >= min_separation)
        {
            kept.push(c);
        }
    }
    kept.sort_by_key(|p| p.index);
    kept
}

/// Local maxima above the series median whose value stands out from the
/// surrounding baseline by at least `min_prominence`, before separation.
///
/// The ratio is literal: a peak over a negative baseline mean has a negative
/// prominence and never passes a positive gate.
pub fn prominent_candidates(values: &[Option<f32>], params: &PeakParams) -> Vec<Peak> {
    let Some(med) = median(values) else {
        return Vec::new();
    };

    local_maxima(values, params.neighborhood)
        .into_iter()
        .filter_map(|i| {
            let value = values[i]?;
            if value <= med {
                return None;
            }
            let prominence = baseline_mean(values, i, params.baseline_radius, params.core_radius)
                .filter(|b| b.abs() > ZERO_BASELINE)
                .map(|b| value / b);
            let peak = Peak {
                index: i,
                value,
                prominence,
            };
            (peak.prominence_ratio() >= params.min_prominence).then_some(peak)
        })
        .collect()
}

/// [`prominent_candidates`] thinned to `min_separation`.
pub fn find_prominent_peaks(values: &[Option<f32>], params: &PeakParams) -> Vec<Peak> {
    select_separated(prominent_candidates(values, params), params.min_separation)
}
