//! Piecewise cubic Hermite interpolation (PCHIP).
//!
//! Knot slopes follow Fritsch–Carlson: a weighted harmonic mean of the
//! neighbouring secant slopes, zero at local extrema, and a one-sided
//! three-point estimate at the ends that is limited so the interpolant never
//! overshoots the data. The result is monotone wherever the data are.
//!
//! Extrapolation is refused. Queries outside the knot range produce
//! [`ProfileError::OutOfRangeInterpolation`]; only a rounding-level allowance
//! of `RANGE_SLACK` (relative to the knot span) is tolerated at either end.

use crate::error::ProfileError;

const RANGE_SLACK: f64 = 1e-12;

/// A PCHIP interpolant over fixed knots.
#[derive(Debug, Clone)]
pub struct Pchip {
    x: Vec<f64>,
    y: Vec<f64>,
    slopes: Vec<f64>,
}

impl Pchip {
    /// Build the interpolant. Knots must be finite with strictly increasing `x`.
    pub fn new(x: &[f64], y: &[f64]) -> Result<Self, ProfileError> {
        if x.len() != y.len() {
            return Err(ProfileError::InvalidCurve(format!(
                "pchip knots have mismatched lengths ({} x, {} y)",
                x.len(),
                y.len()
            )));
        }
        if x.len() < 2 {
            return Err(ProfileError::InvalidCurve(
                "pchip needs at least two knots".to_string(),
            ));
        }
        if x.iter().chain(y.iter()).any(|v| !v.is_finite()) {
            return Err(ProfileError::InvalidCurve(
                "pchip knots must be finite".to_string(),
            ));
        }
        if let Some(i) = x.windows(2).position(|w| w[1] <= w[0]) {
            return Err(ProfileError::InvalidCurve(format!(
                "pchip knots must be strictly increasing (x[{}]={} >= x[{}]={})",
                i,
                x[i],
                i + 1,
                x[i + 1]
            )));
        }

        let slopes = knot_slopes(x, y);
        Ok(Self {
            x: x.to_vec(),
            y: y.to_vec(),
            slopes,
        })
    }

    /// Lower and upper end of the knot range.
    pub fn domain(&self) -> (f64, f64) {
        (self.x[0], self.x[self.x.len() - 1])
    }

    /// Evaluate at a single abscissa.
    pub fn eval(&self, q: f64) -> Result<f64, ProfileError> {
        let (min, max) = self.domain();
        let slack = RANGE_SLACK * (max - min);
        if !(q.is_finite() && q >= min - slack && q <= max + slack) {
            return Err(ProfileError::OutOfRangeInterpolation { x: q, min, max });
        }
        let q = q.clamp(min, max);

        let n = self.x.len();
        let k = self.x.partition_point(|&xi| xi <= q).clamp(1, n - 1) - 1;

        let h = self.x[k + 1] - self.x[k];
        let t = (q - self.x[k]) / h;
        let t2 = t * t;
        let t3 = t2 * t;

        let h00 = 2.0 * t3 - 3.0 * t2 + 1.0;
        let h10 = t3 - 2.0 * t2 + t;
        let h01 = -2.0 * t3 + 3.0 * t2;
        let h11 = t3 - t2;

        Ok(h00 * self.y[k]
            + h10 * h * self.slopes[k]
            + h01 * self.y[k + 1]
            + h11 * h * self.slopes[k + 1])
    }

    /// Evaluate at many abscissae.
    pub fn eval_many(&self, queries: &[f64]) -> Result<Vec<f64>, ProfileError> {
        queries.iter().map(|&q| self.eval(q)).collect()
    }
}

fn knot_slopes(x: &[f64], y: &[f64]) -> Vec<f64> {
    let n = x.len();
    let h: Vec<f64> = x.windows(2).map(|w| w[1] - w[0]).collect();
    let delta: Vec<f64> = (0..n - 1).map(|k| (y[k + 1] - y[k]) / h[k]).collect();

    if n == 2 {
        return vec![delta[0], delta[0]];
    }

    let mut d = vec![0.0; n];
    for k in 1..n - 1 {
        let (d0, d1) = (delta[k - 1], delta[k]);
        if d0 * d1 <= 0.0 {
            continue;
        }
        let w1 = 2.0 * h[k] + h[k - 1];
        let w2 = h[k] + 2.0 * h[k - 1];
        d[k] = (w1 + w2) / (w1 / d0 + w2 / d1);
    }

    d[0] = end_slope(h[0], h[1], delta[0], delta[1]);
    d[n - 1] = end_slope(h[n - 2], h[n - 3], delta[n - 2], delta[n - 3]);
    d
}

/// Shape-preserving three-point end slope.
fn end_slope(h0: f64, h1: f64, m0: f64, m1: f64) -> f64 {
    let d = ((2.0 * h0 + h1) * m0 - h0 * m1) / (h0 + h1);
    if d.signum() != m0.signum() || m0 == 0.0 {
        0.0
    } else if m0.signum() != m1.signum() && d.abs() > 3.0 * m0.abs() {
        3.0 * m0
    } else {
        d
    }
}
