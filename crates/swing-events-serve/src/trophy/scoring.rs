use swing_events_core::{weighted_score, MinMax};

use super::{TrophyFrameScore, TrophyFrameSignal, TrophyParams};
use crate::SearchWindow;

/// Record bounds `[floor(start_frac * peak), floor(end_frac * peak))`.
///
/// The end fraction is exclusive. `None` when the window is empty.
pub(crate) fn search_window(
    frames: &[u32],
    peak_index: usize,
    params: &TrophyParams,
) -> Option<SearchWindow> {
    let peak = peak_index as f32;
    let start = (params.window_start_frac * peak).floor().max(0.0) as usize;
    let end_exclusive = (params.window_end_frac * peak).floor().max(0.0) as usize;
    let end_exclusive = end_exclusive.min(frames.len());
    if end_exclusive == 0 {
        return None;
    }
    SearchWindow::from_indices(frames, start, end_exclusive - 1)
}

fn window_range<F>(signals: &[TrophyFrameSignal], window: &SearchWindow, f: F) -> Option<MinMax>
where
    F: Fn(&TrophyFrameSignal) -> Option<f32>,
{
    MinMax::from_values(signals[window.indices()].iter().filter_map(f))
}

/// Score every record in the window against the window's own extremes.
pub(crate) fn score_window(
    signals: &[TrophyFrameSignal],
    window: &SearchWindow,
    params: &TrophyParams,
) -> Vec<TrophyFrameScore> {
    let accel = window_range(signals, window, |s| s.smoothed_acceleration);
    let toss = window_range(signals, window, |s| s.smoothed_toss_wrist_y);
    let bend = window_range(signals, window, |s| s.smoothed_knee_bend);
    let ankle_sep = window_range(signals, window, |s| s.ankle_separation);
    let knee_sep = window_range(signals, window, |s| s.knee_separation);
    let ankle_motion = window_range(signals, window, |s| s.ankle_motion);

    let w = &params.weights;
    let lw = &params.legs_together;

    signals[window.indices()]
        .iter()
        .map(|s| {
            let acceleration = s.smoothed_acceleration.zip(accel).map(|(v, m)| m.direct(v));
            let toss_height = s.smoothed_toss_wrist_y.zip(toss).map(|(v, m)| m.inverted(v));
            let knee_bend = s.smoothed_knee_bend.zip(bend).map(|(v, m)| m.direct(v));
            let stability = s.ankle_motion.zip(ankle_motion).map(|(v, m)| m.inverted(v));
            let ankle_proximity = s.ankle_separation.zip(ankle_sep).map(|(v, m)| m.inverted(v));
            let knee_proximity = s.knee_separation.zip(knee_sep).map(|(v, m)| m.inverted(v));

            let legs_together = (stability.is_some()
                || ankle_proximity.is_some()
                || knee_proximity.is_some())
            .then(|| {
                weighted_score(&[
                    (stability, lw.stability),
                    (ankle_proximity, lw.ankle_proximity),
                    (knee_proximity, lw.knee_proximity),
                ])
            });

            let total = weighted_score(&[
                (acceleration, w.acceleration),
                (toss_height, w.toss_height),
                (knee_bend, w.knee_bend),
                (s.arms_up, w.arms_up),
                (legs_together, w.legs_together),
            ]);

            TrophyFrameScore {
                frame: s.frame,
                timestamp: s.timestamp,
                acceleration,
                toss_height,
                knee_bend,
                arms_up: s.arms_up,
                stability,
                ankle_proximity,
                knee_proximity,
                legs_together,
                total,
            }
        })
        .collect()
}

/// Highest total; ties keep the earliest frame.
pub(crate) fn best_score(scores: &[TrophyFrameScore]) -> Option<&TrophyFrameScore> {
    scores.iter().fold(None, |best: Option<&TrophyFrameScore>, s| match best {
        Some(b) if b.total >= s.total => Some(b),
        _ => Some(s),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frames(n: u32) -> Vec<u32> {
        (0..n).collect()
    }

    #[test]
    fn window_spans_start_to_end_fraction() {
        let params = TrophyParams::default();
        let w = search_window(&frames(100), 60, &params).unwrap();
        assert_eq!(w.start_index, 12);
        assert_eq!(w.end_index, 50);
    }

    #[test]
    fn window_is_empty_for_an_early_peak() {
        let params = TrophyParams::default();
        assert!(search_window(&frames(100), 0, &params).is_none());
        assert!(search_window(&frames(100), 1, &params).is_none());
        // floor(0.4) = 0, floor(1.7) = 1: a single record.
        let w = search_window(&frames(100), 2, &params).unwrap();
        assert_eq!((w.start_index, w.end_index), (0, 0));
    }

    fn blank(frame: u32) -> TrophyFrameSignal {
        TrophyFrameSignal {
            frame,
            timestamp: frame as f32 / 30.0,
            racket_wrist: None,
            wrist_speed: None,
            wrist_acceleration: None,
            smoothed_acceleration: None,
            toss_wrist_y: None,
            smoothed_toss_wrist_y: None,
            arms_up: None,
            left_knee_angle: None,
            right_knee_angle: None,
            knee_bend: None,
            smoothed_knee_bend: None,
            ankle_separation: None,
            knee_separation: None,
            ankle_motion: None,
        }
    }

    #[test]
    fn toss_height_is_image_y_inverted() {
        let mut signals: Vec<TrophyFrameSignal> = (0..3).map(blank).collect();
        signals[0].smoothed_toss_wrist_y = Some(300.0);
        signals[1].smoothed_toss_wrist_y = Some(100.0);
        signals[2].smoothed_toss_wrist_y = Some(200.0);
        let window = SearchWindow::from_indices(&[0, 1, 2], 0, 2).unwrap();
        let scores = score_window(&signals, &window, &TrophyParams::default());
        assert_eq!(scores[1].toss_height, Some(1.0));
        assert_eq!(scores[0].toss_height, Some(0.0));
        assert_eq!(best_score(&scores).unwrap().frame, 1);
        assert!((scores[1].total - 0.20).abs() < 1e-6);
    }

    #[test]
    fn missing_cues_add_no_credit() {
        let signals: Vec<TrophyFrameSignal> = (0..2).map(blank).collect();
        let window = SearchWindow::from_indices(&[0, 1], 0, 1).unwrap();
        let scores = score_window(&signals, &window, &TrophyParams::default());
        assert!(scores.iter().all(|s| s.total == 0.0 && s.legs_together.is_none()));
        // Equal totals resolve to the earliest frame.
        assert_eq!(best_score(&scores).unwrap().frame, 0);
    }

    #[test]
    fn legs_together_combines_sub_scores() {
        let mut signals: Vec<TrophyFrameSignal> = (0..2).map(blank).collect();
        signals[0].ankle_motion = Some(0.0);
        signals[0].ankle_separation = Some(10.0);
        signals[0].knee_separation = Some(20.0);
        signals[1].ankle_motion = Some(8.0);
        signals[1].ankle_separation = Some(50.0);
        signals[1].knee_separation = Some(60.0);
        let window = SearchWindow::from_indices(&[0, 1], 0, 1).unwrap();
        let scores = score_window(&signals, &window, &TrophyParams::default());
        assert!((scores[0].legs_together.unwrap() - 1.0).abs() < 1e-6);
        assert!(scores[1].legs_together.unwrap().abs() < 1e-6);
        assert!((scores[0].total - 0.15).abs() < 1e-6);
    }
}
