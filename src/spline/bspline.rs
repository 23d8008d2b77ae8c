//! Clamped uniform B-spline curves in the plane.

use crate::core::WorldPoint;

/// A 2-D B-spline over N control points with a clamped uniform knot
/// vector, evaluated at parameter t in [0, 1].
///
/// The degree is cubic whenever enough control points exist and degrades
/// to N-1 for tiny control polygons, so two control points produce the
/// connecting segment. The curve interpolates the first and last control
/// points.
#[derive(Clone, Debug)]
pub struct BSpline2 {
    control: Vec<WorldPoint>,
    knots: Vec<f64>,
    degree: usize,
}

impl BSpline2 {
    /// Build a clamped uniform cubic B-spline from the control points.
    ///
    /// Returns `None` with fewer than two control points.
    pub fn new(control: Vec<WorldPoint>) -> Option<Self> {
        let n = control.len();
        if n < 2 {
            return None;
        }
        let degree = 3.min(n - 1);

        // Clamped uniform knots: degree+1 zeros, evenly spaced interior
        // knots, degree+1 ones.
        let spans = n - degree;
        let mut knots = Vec::with_capacity(n + degree + 1);
        for _ in 0..=degree {
            knots.push(0.0);
        }
        for i in 1..spans {
            knots.push(i as f64 / spans as f64);
        }
        for _ in 0..=degree {
            knots.push(1.0);
        }

        Some(Self {
            control,
            knots,
            degree,
        })
    }

    /// Number of control points.
    #[inline]
    pub fn control_count(&self) -> usize {
        self.control.len()
    }

    /// Evaluate the curve at t (clamped to [0, 1]) with de Boor's
    /// algorithm.
    pub fn point_at(&self, t: f64) -> WorldPoint {
        let t = t.clamp(0.0, 1.0);
        let p = self.degree;
        let n = self.control.len();

        // Knot span k with knots[k] <= t < knots[k+1], clamped so the
        // local control window stays valid at t = 1.
        let mut k = p;
        while k < n - 1 && self.knots[k + 1] <= t {
            k += 1;
        }

        let mut work: Vec<WorldPoint> = (0..=p).map(|j| self.control[k - p + j]).collect();
        for r in 1..=p {
            for j in (r..=p).rev() {
                let i = k - p + j;
                let denom = self.knots[i + p - r + 1] - self.knots[i];
                let alpha = if denom > f64::EPSILON {
                    (t - self.knots[i]) / denom
                } else {
                    0.0
                };
                work[j] = work[j - 1] * (1.0 - alpha) + work[j] * alpha;
            }
        }
        work[p]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_interpolates_endpoints() {
        let control = vec![
            WorldPoint::new(0.0, 0.0),
            WorldPoint::new(1.0, 2.0),
            WorldPoint::new(3.0, -1.0),
            WorldPoint::new(5.0, 0.5),
            WorldPoint::new(6.0, 0.0),
        ];
        let spline = BSpline2::new(control.clone()).unwrap();

        let start = spline.point_at(0.0);
        assert_abs_diff_eq!(start.x, control[0].x, epsilon = 1e-12);
        assert_abs_diff_eq!(start.y, control[0].y, epsilon = 1e-12);

        let end = spline.point_at(1.0);
        assert_abs_diff_eq!(end.x, control[4].x, epsilon = 1e-12);
        assert_abs_diff_eq!(end.y, control[4].y, epsilon = 1e-12);
    }

    #[test]
    fn test_collinear_control_stays_on_line() {
        let control: Vec<WorldPoint> =
            (0..8).map(|i| WorldPoint::new(i as f64, 0.0)).collect();
        let spline = BSpline2::new(control).unwrap();
        for i in 0..=40 {
            let t = i as f64 / 40.0;
            let p = spline.point_at(t);
            assert_abs_diff_eq!(p.y, 0.0, epsilon = 1e-12);
            assert!(p.x >= -1e-12 && p.x <= 7.0 + 1e-12);
        }
    }

    #[test]
    fn test_monotone_parameterization_along_line() {
        let control: Vec<WorldPoint> =
            (0..6).map(|i| WorldPoint::new(2.0 * i as f64, 0.0)).collect();
        let spline = BSpline2::new(control).unwrap();
        let mut last_x = -1.0;
        for i in 0..=30 {
            let t = i as f64 / 30.0;
            let p = spline.point_at(t);
            assert!(p.x > last_x);
            last_x = p.x;
        }
    }

    #[test]
    fn test_two_control_points_is_a_segment() {
        let spline = BSpline2::new(vec![
            WorldPoint::new(0.0, 0.0),
            WorldPoint::new(4.0, 2.0),
        ])
        .unwrap();
        let mid = spline.point_at(0.5);
        assert_abs_diff_eq!(mid.x, 2.0, epsilon = 1e-12);
        assert_abs_diff_eq!(mid.y, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_stays_in_convex_hull() {
        let control = vec![
            WorldPoint::new(0.0, 0.0),
            WorldPoint::new(1.0, 3.0),
            WorldPoint::new(2.0, 3.0),
            WorldPoint::new(3.0, 0.0),
        ];
        let spline = BSpline2::new(control).unwrap();
        for i in 0..=50 {
            let p = spline.point_at(i as f64 / 50.0);
            assert!(p.y >= -1e-9 && p.y <= 3.0 + 1e-9);
            assert!(p.x >= -1e-9 && p.x <= 3.0 + 1e-9);
        }
    }

    #[test]
    fn test_rejects_single_point() {
        assert!(BSpline2::new(vec![WorldPoint::ZERO]).is_none());
    }
}
