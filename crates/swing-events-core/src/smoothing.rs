/// Centered moving average over a null-aware series.
///
/// The window shrinks at the series boundaries instead of wrapping. Missing
/// samples are skipped inside each window but do not shrink the window seen
/// by their neighbours; a window without any sample yields `None`.
///
/// `window <= 1` returns the input unchanged. An even window uses
/// `window / 2` samples on each side.
pub fn moving_average(values: &[Option<f32>], window: usize) -> Vec<Option<f32>> {
    if window <= 1 {
        return values.to_vec();
    }
    let half = window / 2;
    let n = values.len();
    (0..n)
        .map(|i| {
            let lo = i.saturating_sub(half);
            let hi = (i + half).min(n.saturating_sub(1));
            let (sum, count) = values[lo..=hi]
                .iter()
                .flatten()
                .fold((0.0f32, 0usize), |(s, c), v| (s + v, c + 1));
            (count > 0).then(|| sum / count as f32)
        })
        .collect()
}

/// Smooth several channels that share one frame axis.
pub fn smooth_channels<const N: usize>(
    channels: [&[Option<f32>]; N],
    window: usize,
) -> [Vec<Option<f32>>; N] {
    channels.map(|c| moving_average(c, window))
}
