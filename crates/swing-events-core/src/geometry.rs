//! Planar geometry helpers and per-window min-max normalization.

use nalgebra::Point2;
use serde::{Deserialize, Serialize};

const DEGENERATE_RANGE: f32 = 1e-6;

/// Angle at `vertex` formed by the rays towards `p1` and `p2`, in degrees `[0, 180]`.
///
/// Computed from the absolute difference of the two rays' polar angles,
/// folded back into `[0, 180]`.
pub fn angle_at_vertex(p1: Point2<f32>, vertex: Point2<f32>, p2: Point2<f32>) -> f32 {
    let a1 = (p1.y - vertex.y).atan2(p1.x - vertex.x);
    let a2 = (p2.y - vertex.y).atan2(p2.x - vertex.x);
    let mut diff = (a1 - a2).abs().to_degrees();
    if diff > 180.0 {
        diff = 360.0 - diff;
    }
    diff.clamp(0.0, 180.0)
}

#[inline]
pub fn distance(a: Point2<f32>, b: Point2<f32>) -> f32 {
    (a - b).norm()
}

/// Mean of the available points; `None` if fewer than `min_points` are present.
pub fn centroid<I>(points: I, min_points: usize) -> Option<Point2<f32>>
where
    I: IntoIterator<Item = Option<Point2<f32>>>,
{
    let mut sum = nalgebra::Vector2::<f32>::zeros();
    let mut n = 0usize;
    for p in points.into_iter().flatten() {
        sum += p.coords;
        n += 1;
    }
    if n == 0 || n < min_points {
        return None;
    }
    Some(Point2::from(sum / n as f32))
}

/// Min/max of a set of samples, used to rescale them into `[0, 1]`.
///
/// Image Y grows downward, so "higher in the frame" is a *smaller* value.
/// Callers pick the convention explicitly: [`MinMax::direct`] when larger raw
/// values are better, [`MinMax::inverted`] when smaller raw values are better.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct MinMax {
    pub min: f32,
    pub max: f32,
}

impl MinMax {
    /// Extremes over the finite values; `None` if there are none.
    pub fn from_values<I>(values: I) -> Option<MinMax>
    where
        I: IntoIterator<Item = f32>,
    {
        values
            .into_iter()
            .filter(|v| v.is_finite())
            .fold(None, |acc: Option<MinMax>, v| match acc {
                None => Some(MinMax { min: v, max: v }),
                Some(m) => Some(MinMax {
                    min: m.min.min(v),
                    max: m.max.max(v),
                }),
            })
    }

    #[inline]
    pub fn range(&self) -> f32 {
        self.max - self.min
    }

    /// `(v - min) / (max - min)`, clamped to `[0, 1]`. A flat range maps to `0.5`.
    #[inline]
    pub fn direct(&self, v: f32) -> f32 {
        if self.range() < DEGENERATE_RANGE {
            return 0.5;
        }
        ((v - self.min) / self.range()).clamp(0.0, 1.0)
    }

    /// `1 - (v - min) / (max - min)`, clamped to `[0, 1]`. A flat range maps to `0.5`.
    #[inline]
    pub fn inverted(&self, v: f32) -> f32 {
        if self.range() < DEGENERATE_RANGE {
            return 0.5;
        }
        1.0 - self.direct(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn angle_is_symmetric() {
        let a = Point2::new(3.0, -1.0);
        let v = Point2::new(0.5, 0.5);
        let b = Point2::new(-2.0, 4.0);
        assert_abs_diff_eq!(
            angle_at_vertex(a, v, b),
            angle_at_vertex(b, v, a),
            epsilon = 1e-4
        );
    }

    #[test]
    fn collinear_and_folded_angles() {
        let v = Point2::new(0.0, 0.0);
        let straight = angle_at_vertex(Point2::new(-1.0, 0.0), v, Point2::new(2.0, 0.0));
        assert_abs_diff_eq!(straight, 180.0, epsilon = 1e-4);

        let folded = angle_at_vertex(Point2::new(1.0, 1.0), v, Point2::new(3.0, 3.0));
        assert_abs_diff_eq!(folded, 0.0, epsilon = 1e-4);

        let right = angle_at_vertex(Point2::new(0.0, 5.0), v, Point2::new(5.0, 0.0));
        assert_abs_diff_eq!(right, 90.0, epsilon = 1e-4);
    }

    #[test]
    fn angle_wraps_across_the_branch_cut() {
        // Rays at +170 and -170 degrees are 20 degrees apart, not 340.
        let v = Point2::new(0.0, 0.0);
        let p1 = Point2::new(170f32.to_radians().cos(), 170f32.to_radians().sin());
        let p2 = Point2::new((-170f32).to_radians().cos(), (-170f32).to_radians().sin());
        assert_abs_diff_eq!(angle_at_vertex(p1, v, p2), 20.0, epsilon = 1e-3);
    }

    #[test]
    fn distance_is_euclidean() {
        assert_abs_diff_eq!(
            distance(Point2::new(0.0, 0.0), Point2::new(3.0, 4.0)),
            5.0
        );
    }

    #[test]
    fn centroid_requires_minimum_points() {
        let pts = [Some(Point2::new(0.0, 0.0)), None, Some(Point2::new(2.0, 4.0))];
        assert_eq!(centroid(pts, 2), Some(Point2::new(1.0, 2.0)));
        assert_eq!(centroid(pts, 3), None);
        assert_eq!(centroid([None, None], 0), None);
    }

    #[test]
    fn min_max_conventions() {
        let mm = MinMax::from_values([100.0, 300.0, 200.0, f32::NAN]).unwrap();
        assert_eq!(mm, MinMax { min: 100.0, max: 300.0 });
        assert_abs_diff_eq!(mm.direct(300.0), 1.0);
        assert_abs_diff_eq!(mm.direct(200.0), 0.5);
        // A smaller image Y is higher in the frame and scores higher inverted.
        assert_abs_diff_eq!(mm.inverted(100.0), 1.0);
        assert_abs_diff_eq!(mm.inverted(300.0), 0.0);
    }

    #[test]
    fn min_max_degenerate_range_is_neutral() {
        let mm = MinMax::from_values([7.0, 7.0]).unwrap();
        assert_abs_diff_eq!(mm.direct(7.0), 0.5);
        assert_abs_diff_eq!(mm.inverted(7.0), 0.5);
        assert!(MinMax::from_values(std::iter::empty()).is_none());
    }
}
