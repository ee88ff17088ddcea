//! Outer wind profile of Emanuel (2004), in nondimensional angular momentum.
//!
//! Outside the convecting core, Ekman suction balances radiative subsidence,
//! which gives
//!
//! ```text
//! d(M/M0)/d(r/r0) = γ ((M/M0) - (r/r0)²)² / (1 - (r/r0)²),    γ = Cd·f·r0 / w_cool
//! ```
//!
//! with `M0 = ½f·r0²`. The curve is integrated inward from `M/M0 = 1` at
//! `r/r0 = 1` with a forward Euler step; the first inward step has zero slope.

use crate::domain::Curve;
use crate::math::grid_ending_at;
use crate::models::model::{OuterDrag, OuterProfileModel};

/// Default step in `r/r0`.
const STEP: f64 = 1e-3;
/// Finer step used for very large or very small storms.
const FINE_STEP: f64 = 1e-4;
const FINE_ABOVE_R0: f64 = 2_500_000.0;
const FINE_BELOW_R0: f64 = 200_000.0;

/// Drag coefficient as a function of 10 m wind speed (Donelan et al. 2004).
///
/// Constant below 6 m/s and above 35.4 m/s, linear in between.
pub fn donelan_drag(v: f64) -> f64 {
    const CD_LOW: f64 = 6.2e-4;
    const CD_HIGH: f64 = 2.35e-3;
    const V_LOW: f64 = 6.0;
    const V_HIGH: f64 = 35.4;

    if v <= V_LOW {
        CD_LOW
    } else if v > V_HIGH {
        CD_HIGH
    } else {
        CD_LOW + (CD_HIGH - CD_LOW) / (V_HIGH - V_LOW) * (v - V_LOW)
    }
}

/// Step in `r/r0` used for a storm of outer radius `r0`.
pub fn e04_step(r0: f64) -> f64 {
    if r0 > FINE_ABOVE_R0 || r0 < FINE_BELOW_R0 {
        FINE_STEP
    } else {
        STEP
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct E04Model;

impl OuterProfileModel for E04Model {
    fn momentum_curve(
        &self,
        r0: f64,
        fcor: f64,
        drag: OuterDrag,
        w_cool: f64,
        sample_count: usize,
    ) -> Curve {
        let fcor = fcor.abs();
        let step = e04_step(r0);
        let n = sample_count.min((1.0 / step).round() as usize).max(2);

        let r_frac = grid_ending_at(1.0, step, n);
        let mut m_frac = vec![0.0; n];
        m_frac[n - 1] = 1.0;
        m_frac[n - 2] = 1.0;

        // Velocity scale M0/r0.
        let v_scale = 0.5 * fcor * r0;
        let mut m = 1.0;
        let mut r = r_frac[n - 2];
        for i in (0..n - 2).rev() {
            let cd = if drag.vary {
                donelan_drag(v_scale * (m / r - r))
            } else {
                drag.cd
            };
            let gamma = cd * fcor * r0 / w_cool;
            let slope = gamma * (m - r * r).powi(2) / (1.0 - r * r);
            m -= slope * step;
            r = r_frac[i];
            m_frac[i] = m;
        }

        Curve::new(r_frac, m_frac)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn static_drag() -> OuterDrag {
        OuterDrag {
            vary: false,
            cd: 1.5e-3,
        }
    }

    #[test]
    fn drag_fit_is_piecewise_linear() {
        assert_eq!(donelan_drag(0.0), 6.2e-4);
        assert_eq!(donelan_drag(50.0), 2.35e-3);
        let mid = donelan_drag(20.7);
        assert!((mid - 0.5 * (6.2e-4 + 2.35e-3)).abs() < 1e-12);
    }

    #[test]
    fn curve_ends_at_one_one() {
        let c = E04Model.momentum_curve(800_000.0, 5e-5, static_drag(), 2e-3, 100_000);
        assert_eq!(c.len(), 1000);
        assert_eq!(*c.x.last().unwrap(), 1.0);
        assert_eq!(*c.y.last().unwrap(), 1.0);
        assert_eq!(c.y[c.len() - 2], 1.0);
    }

    #[test]
    fn momentum_increases_outward() {
        let c = E04Model.momentum_curve(800_000.0, 5e-5, static_drag(), 2e-3, 100_000);
        for w in c.y.windows(2) {
            assert!(w[1] >= w[0]);
        }
        assert!(c.y[0] > 0.0);
    }

    #[test]
    fn wind_is_non_negative_inside_r0() {
        let c = E04Model.momentum_curve(600_000.0, 5e-5, static_drag(), 2e-3, 100_000);
        for (x, m) in c.points() {
            assert!(m >= x * x - 1e-12, "V < 0 at r/r0={x}");
        }
    }

    #[test]
    fn large_storms_use_the_fine_step() {
        let c = E04Model.momentum_curve(3_000_000.0, 5e-5, static_drag(), 2e-3, 100_000);
        assert_eq!(c.len(), 10_000);
        assert!((c.x[1] - c.x[0] - 1e-4).abs() < 1e-12);
    }

    #[test]
    fn sample_count_limits_the_inward_extent() {
        let c = E04Model.momentum_curve(800_000.0, 5e-5, static_drag(), 2e-3, 100);
        assert_eq!(c.len(), 100);
        assert!((c.x[0] - 0.901).abs() < 1e-12);
    }

    #[test]
    fn varying_drag_changes_the_curve() {
        let fixed = E04Model.momentum_curve(800_000.0, 5e-5, static_drag(), 2e-3, 100_000);
        let vary = E04Model.momentum_curve(
            800_000.0,
            5e-5,
            OuterDrag { vary: true, cd: 1.5e-3 },
            2e-3,
            100_000,
        );
        assert_ne!(fixed.y, vary.y);
    }
}
