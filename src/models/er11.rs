//! Inner-core wind profile of Emanuel & Rotunno (2011).
//!
//! In angular-momentum form the profile is
//!
//! ```text
//! (M/Mm)^(2 - C) = 2 (r/rmax)² / (2 - C + C (r/rmax)²),    C = Ck/Cd
//! ```
//!
//! with `Mm = rmax·Vmax + ½f·rmax²`, and `V = M/r - ½f·r`.
//!
//! With `f > 0` the peak of this formula sits slightly inside `rmax` and a
//! little below `Vmax`. [`Er11Model`] therefore nudges its input radius and
//! peak speed until the sampled profile peaks at the requested `rmax` (within
//! half a grid step) with the requested `Vmax` (within 1%). The correction
//! does not always settle, typically for small `C` combined with a large
//! Rossby number `Vmax / (f·rmax)`; that is reported as a
//! [`ConvergenceFailure`].

use crate::models::model::{ConvergenceFailure, InnerProfileModel};

/// Evaluate the uncorrected ER11 wind speed at each radius.
///
/// `V(0)` is set to zero exactly.
pub fn er11_wind_speeds(vmax: f64, rmax: f64, fcor: f64, ck_cd: f64, radii: &[f64]) -> Vec<f64> {
    let fcor = fcor.abs();
    let mm = rmax * vmax + 0.5 * fcor * rmax * rmax;
    let exponent = 1.0 / (2.0 - ck_cd);

    radii
        .iter()
        .map(|&r| {
            if r == 0.0 {
                return 0.0;
            }
            let u = (r / rmax) * (r / rmax);
            let ratio = 2.0 * u / (2.0 - ck_cd + ck_cd * u);
            (mm / r) * ratio.powf(exponent) - 0.5 * fcor * r
        })
        .collect()
}

/// ER11 profile with the peak-location correction.
#[derive(Debug, Clone, Copy)]
pub struct Er11Model {
    /// Cap on both the radius and the peak-speed correction loops.
    pub max_corrections: usize,
    /// Relative tolerance on the sampled peak speed.
    pub vmax_tolerance: f64,
}

impl Default for Er11Model {
    fn default() -> Self {
        Self {
            max_corrections: 20,
            vmax_tolerance: 1e-2,
        }
    }
}

impl Er11Model {
    fn failure(&self, vmax: f64, rmax: f64, ck_cd: f64, reason: impl Into<String>) -> ConvergenceFailure {
        ConvergenceFailure {
            vmax,
            rmax,
            ck_cd,
            reason: reason.into(),
        }
    }
}

impl InnerProfileModel for Er11Model {
    fn wind_speeds(
        &self,
        vmax: f64,
        rmax: f64,
        fcor: f64,
        ck_cd: f64,
        radii: &[f64],
    ) -> Result<Vec<f64>, ConvergenceFailure> {
        if radii.len() < 2 {
            return Err(self.failure(vmax, rmax, ck_cd, "need at least two radii"));
        }
        if !(ck_cd > 0.0 && ck_cd < 2.0) {
            return Err(self.failure(vmax, rmax, ck_cd, "ck_cd must lie in (0, 2)"));
        }
        if !(vmax > 0.0 && rmax > 0.0) {
            return Err(self.failure(vmax, rmax, ck_cd, "vmax and rmax must be > 0"));
        }

        let dr = radii[1] - radii[0];
        let sample = |v_in: f64, r_in: f64| -> Result<(Vec<f64>, f64, f64), ConvergenceFailure> {
            let v = er11_wind_speeds(v_in, r_in, fcor, ck_cd, radii);
            let (r_peak, v_peak) = peak(radii, &v)
                .ok_or_else(|| self.failure(vmax, rmax, ck_cd, "non-finite wind speed"))?;
            Ok((v, r_peak, v_peak))
        };

        let (mut v, r_peak, v_peak) = sample(vmax, rmax)?;
        let mut dr_in = rmax - r_peak;
        let mut dv_max = vmax - v_peak;

        let mut r_in = rmax;
        let mut v_in = vmax;
        let mut corrections = 0;

        while dr_in.abs() > dr / 2.0 || (dv_max / vmax).abs() >= self.vmax_tolerance {
            corrections += 1;
            if corrections > self.max_corrections {
                return Err(self.failure(
                    vmax,
                    rmax,
                    ck_cd,
                    format!("peak not settled after {} corrections", self.max_corrections),
                ));
            }

            r_in += dr_in;

            let mut speed_corrections = 0;
            while (dv_max / v_in).abs() >= self.vmax_tolerance {
                speed_corrections += 1;
                if speed_corrections > self.max_corrections {
                    return Err(self.failure(vmax, rmax, ck_cd, "peak speed not settled"));
                }
                v_in += dv_max;
                let (_, _, v_peak) = sample(v_in, r_in)?;
                dv_max = vmax - v_peak;
            }

            let (v_next, r_peak, v_peak) = sample(v_in, r_in)?;
            v = v_next;
            dv_max = vmax - v_peak;
            dr_in = rmax - r_peak;
        }

        Ok(v)
    }
}

/// Location and value of the first maximum, or `None` if any sample is not finite.
fn peak(radii: &[f64], v: &[f64]) -> Option<(f64, f64)> {
    if v.iter().any(|x| !x.is_finite()) {
        return None;
    }
    let mut best = 0;
    for (i, &vi) in v.iter().enumerate() {
        if vi > v[best] {
            best = i;
        }
    }
    Some((radii[best], v[best]))
}
