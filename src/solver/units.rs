//! Angular momentum and the two nondimensional frames.
//!
//! The solver moves between three frames:
//! - dimensional `(r, V)` in metres and m/s
//! - inner frame `(r/rmax, M/Mm)`
//! - outer frame `(r/r0, M/M0)`

use crate::domain::{Curve, MergePoint};

/// Absolute angular momentum `r·V + ½f·r²`.
pub fn angular_momentum(r: f64, v: f64, fcor: f64) -> f64 {
    r * v + 0.5 * fcor * r * r
}

/// Azimuthal wind implied by angular momentum `m` at radius `r`, with `V(0) = 0`.
pub fn wind_from_momentum(r: f64, m: f64, fcor: f64) -> f64 {
    if r == 0.0 {
        0.0
    } else {
        m / r - 0.5 * fcor * r
    }
}

/// Dimensional scales of one candidate storm.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scales {
    pub rmax: f64,
    pub r0: f64,
    /// Angular momentum at `rmax`.
    pub mm: f64,
    /// Angular momentum at `r0`, `½f·r0²`.
    pub m0: f64,
    pub fcor: f64,
}

impl Scales {
    pub fn new(rmax: f64, vmax: f64, r0: f64, fcor: f64) -> Self {
        Self {
            rmax,
            r0,
            mm: angular_momentum(rmax, vmax, fcor),
            m0: angular_momentum(r0, 0.0, fcor),
            fcor,
        }
    }

    pub fn rmax_over_r0(&self) -> f64 {
        self.rmax / self.r0
    }

    pub fn mm_over_m0(&self) -> f64 {
        self.mm / self.m0
    }

    /// Re-express an outer-frame curve in the inner frame.
    pub fn to_inner_frame(&self, outer: &Curve) -> Curve {
        outer.scaled(1.0 / self.rmax_over_r0(), 1.0 / self.mm_over_m0())
    }

    /// Dimensional radii and winds from inner-frame samples.
    pub fn dimensional(&self, r_over_rmax: &[f64], m_over_mm: &[f64]) -> (Vec<f64>, Vec<f64>) {
        r_over_rmax
            .iter()
            .zip(m_over_mm)
            .map(|(&x, &m)| {
                let r = x * self.rmax;
                (r, wind_from_momentum(r, m * self.mm, self.fcor))
            })
            .unzip()
    }

    /// Dimensional radius and wind speed of the merge point.
    pub fn merge_radius_and_wind(&self, merge: MergePoint) -> (f64, f64) {
        let rmerge = merge.rmerge_over_r0 * self.r0;
        let vmerge = (self.m0 / self.r0)
            * (merge.mmerge_over_m0 / merge.rmerge_over_r0 - merge.rmerge_over_r0);
        (rmerge, vmerge)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wind_and_momentum_invert_each_other() {
        let m = angular_momentum(40_000.0, 50.0, 5e-5);
        assert!((wind_from_momentum(40_000.0, m, 5e-5) - 50.0).abs() < 1e-9);
        assert_eq!(wind_from_momentum(0.0, 123.0, 5e-5), 0.0);
    }

    #[test]
    fn merge_wind_matches_dimensional_formula() {
        let s = Scales::new(40_000.0, 50.0, 600_000.0, 5e-5);
        let merge = MergePoint {
            rmerge_over_r0: 0.25,
            mmerge_over_m0: 0.4,
        };
        let (rmerge, vmerge) = s.merge_radius_and_wind(merge);
        assert!((rmerge - 150_000.0).abs() < 1e-6);
        let expected = wind_from_momentum(rmerge, 0.4 * s.m0, 5e-5);
        assert!((vmerge - expected).abs() < 1e-9);
    }

    #[test]
    fn dimensional_sets_zero_wind_at_centre() {
        let s = Scales::new(40_000.0, 50.0, 600_000.0, 5e-5);
        let (r, v) = s.dimensional(&[0.0, 1.0], &[0.0, 1.0]);
        assert_eq!(r, vec![0.0, 40_000.0]);
        assert_eq!(v[0], 0.0);
        assert!((v[1] - 50.0).abs() < 1e-9);
    }
}
