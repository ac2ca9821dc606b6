use swing_events_core::{weighted_score, MinMax};

use super::{ContactFrameScore, ContactFrameSignal, ContactParams};
use crate::SearchWindow;

/// Inclusive record bounds `[floor(start_frac * p), min(n - 1, ceil(end_frac * p) + pad)]`.
pub(crate) fn search_window(
    frames: &[u32],
    peak_index: usize,
    params: &ContactParams,
) -> Option<SearchWindow> {
    let last = frames.len().checked_sub(1)?;
    let peak = peak_index as f32;
    let start = (params.window_start_frac * peak).floor().max(0.0) as usize;
    let end = (params.window_end_frac * peak).ceil().max(0.0) as usize + params.window_end_pad;
    SearchWindow::from_indices(frames, start, end.min(last))
}

/// `1 - |i - p| / reach`, `reach` being the larger distance from the peak to
/// a window edge, at least one record.
pub(crate) fn proximity(index: usize, peak_index: usize, window: &SearchWindow) -> f32 {
    let reach = peak_index
        .abs_diff(window.start_index)
        .max(window.end_index.abs_diff(peak_index))
        .max(1);
    (1.0 - index.abs_diff(peak_index) as f32 / reach as f32).clamp(0.0, 1.0)
}

fn window_range<F>(signals: &[ContactFrameSignal], window: &SearchWindow, f: F) -> Option<MinMax>
where
    F: Fn(&ContactFrameSignal) -> Option<f32>,
{
    MinMax::from_values(signals[window.indices()].iter().filter_map(f))
}

pub(crate) fn score_window(
    signals: &[ContactFrameSignal],
    window: &SearchWindow,
    peak_index: usize,
    params: &ContactParams,
) -> Vec<ContactFrameScore> {
    let tip_y = window_range(signals, window, |s| s.tip.map(|p| p.y));
    let extension = window_range(signals, window, |s| s.extension_angle);
    let trunk = window_range(signals, window, |s| s.trunk_y);
    let w = &params.weights;

    window
        .indices()
        .map(|i| {
            let s = &signals[i];
            let tip_height = s.tip.map(|p| p.y).zip(tip_y).map(|(v, m)| m.inverted(v));
            let arm_extension = s.extension_angle.zip(extension).map(|(v, m)| m.direct(v));
            let body_extension = s.trunk_y.zip(trunk).map(|(v, m)| m.inverted(v));
            let near_peak = proximity(i, peak_index, window);

            let total = weighted_score(&[
                (tip_height, w.tip_height),
                (arm_extension, w.extension),
                (body_extension, w.body_extension),
                (Some(near_peak), w.proximity),
            ]);

            ContactFrameScore {
                frame: s.frame,
                timestamp: s.timestamp,
                tip_height,
                extension: arm_extension,
                body_extension,
                proximity: near_peak,
                total,
            }
        })
        .collect()
}

/// Position and record of the highest total; ties keep the earliest frame.
pub(crate) fn best_score(scores: &[ContactFrameScore]) -> Option<(usize, &ContactFrameScore)> {
    scores
        .iter()
        .enumerate()
        .fold(None, |best: Option<(usize, &ContactFrameScore)>, (i, s)| match best {
            Some((_, b)) if b.total >= s.total => best,
            _ => Some((i, s)),
        })
}
