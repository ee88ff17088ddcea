//! Profile model seams.
//!
//! The merge solver only relies on two primitive operations:
//! - sample the inner (high-wind) profile on a set of radii
//! - tabulate the outer (low-wind) profile in nondimensional form
//!
//! Both are traits so alternative closures (or test doubles) can be plugged in.

use crate::domain::Curve;

/// The inner model could not produce a valid curve for these parameters.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("inner profile did not converge (vmax={vmax} m/s, rmax={rmax} m, ck_cd={ck_cd}): {reason}")]
pub struct ConvergenceFailure {
    pub vmax: f64,
    pub rmax: f64,
    pub ck_cd: f64,
    pub reason: String,
}

/// Drag closure of the outer model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OuterDrag {
    /// Use the wind-speed dependent drag coefficient.
    pub vary: bool,
    /// Static drag coefficient (ignored when `vary` is set).
    pub cd: f64,
}

/// Analytic wind profile valid near the radius of maximum wind.
pub trait InnerProfileModel {
    /// Wind speed (m/s) at each radius (m) for a profile peaking at
    /// `vmax` at `rmax`. `radii` are uniformly spaced and start at 0.
    fn wind_speeds(
        &self,
        vmax: f64,
        rmax: f64,
        fcor: f64,
        ck_cd: f64,
        radii: &[f64],
    ) -> Result<Vec<f64>, ConvergenceFailure>;
}

/// Nondimensional wind profile valid far from the storm centre.
pub trait OuterProfileModel {
    /// `(r/r0, M/M0)` for a profile that vanishes at `r0`, ending at `(1, 1)`.
    fn momentum_curve(
        &self,
        r0: f64,
        fcor: f64,
        drag: OuterDrag,
        w_cool: f64,
        sample_count: usize,
    ) -> Curve;
}
