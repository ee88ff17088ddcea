//! Numerical settings of the merge solver.

use crate::error::ProfileError;
use crate::math::BisectionSchedule;

/// Tolerances, brackets, grid steps and caps used by [`crate::solver::MergeSolver`].
///
/// The defaults reproduce the published ER11+E04 merge procedure; most
/// callers never change them.
#[derive(Debug, Clone, PartialEq)]
pub struct SolverOptions {
    /// Bracket of the outer search over `rmax / rfit`.
    pub rmax_over_rfit_bounds: (f64, f64),
    /// Outer search stops when its step falls below this.
    pub rmax_over_rfit_tolerance: f64,
    /// Bracket of the inner search over `rmax / r0`.
    pub rmax_over_r0_bounds: (f64, f64),
    /// Inner search stops when its step falls below this.
    pub rmax_over_r0_tolerance: f64,
    /// Cap on trials per bisection; reaching it is a hard failure.
    pub max_bisection_iterations: usize,

    /// The inner profile is sampled on `r/rmax ∈ [0, inner_extent]`.
    pub inner_extent: f64,
    /// Step in `r/rmax` of the inner sampling grid.
    pub inner_step: f64,
    /// Step used instead when `rmax > large_storm_rmax`.
    pub inner_step_fine: f64,
    /// Radius of maximum wind (m) above which the fine inner step is used.
    pub large_storm_rmax: f64,

    /// Requested number of outer-model samples (the model may cap it).
    pub outer_sample_count: usize,
    /// Step in `r/rmax` of the output grid.
    pub output_step: f64,

    /// Increment applied to `Ck/Cd` when a search fails to stabilize.
    pub ck_cd_increment: f64,
    /// Upper bound on `Ck/Cd`, for clamping and for escalation.
    pub ck_cd_ceiling: f64,
}

impl Default for SolverOptions {
    fn default() -> Self {
        Self {
            rmax_over_rfit_bounds: (0.01, 1.0),
            rmax_over_rfit_tolerance: 1e-4,
            rmax_over_r0_bounds: (0.01, 0.75),
            rmax_over_r0_tolerance: 1e-6,
            max_bisection_iterations: 64,
            inner_extent: 50.0,
            inner_step: 0.01,
            inner_step_fine: 0.001,
            large_storm_rmax: 100_000.0,
            outer_sample_count: 100_000,
            output_step: 0.01,
            ck_cd_increment: 0.1,
            ck_cd_ceiling: 1.9,
        }
    }
}

impl SolverOptions {
    pub fn validate(&self) -> Result<(), ProfileError> {
        check_bounds("rmax_over_rfit_bounds", self.rmax_over_rfit_bounds, 1.0)?;
        check_bounds("rmax_over_r0_bounds", self.rmax_over_r0_bounds, 1.0)?;

        let positive = [
            ("rmax_over_rfit_tolerance", self.rmax_over_rfit_tolerance),
            ("rmax_over_r0_tolerance", self.rmax_over_r0_tolerance),
            ("inner_extent", self.inner_extent),
            ("inner_step", self.inner_step),
            ("inner_step_fine", self.inner_step_fine),
            ("large_storm_rmax", self.large_storm_rmax),
            ("output_step", self.output_step),
            ("ck_cd_increment", self.ck_cd_increment),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(ProfileError::InvalidRequest(format!(
                    "solver option {name} must be finite and > 0, got {value}"
                )));
            }
        }
        if !(self.ck_cd_ceiling > 0.0 && self.ck_cd_ceiling < 2.0) {
            return Err(ProfileError::InvalidRequest(format!(
                "solver option ck_cd_ceiling must lie in (0, 2), got {}",
                self.ck_cd_ceiling
            )));
        }
        if self.max_bisection_iterations == 0 || self.outer_sample_count < 2 {
            return Err(ProfileError::InvalidRequest(
                "solver options need max_bisection_iterations >= 1 and outer_sample_count >= 2"
                    .to_string(),
            ));
        }
        Ok(())
    }

    pub(crate) fn outer_schedule(&self) -> BisectionSchedule {
        BisectionSchedule {
            lower: self.rmax_over_rfit_bounds.0,
            upper: self.rmax_over_rfit_bounds.1,
            tolerance: self.rmax_over_rfit_tolerance,
            max_iterations: self.max_bisection_iterations,
        }
    }

    pub(crate) fn inner_schedule(&self) -> BisectionSchedule {
        BisectionSchedule {
            lower: self.rmax_over_r0_bounds.0,
            upper: self.rmax_over_r0_bounds.1,
            tolerance: self.rmax_over_r0_tolerance,
            max_iterations: self.max_bisection_iterations,
        }
    }
}

fn check_bounds(name: &str, (lower, upper): (f64, f64), max: f64) -> Result<(), ProfileError> {
    if lower.is_finite() && upper.is_finite() && lower > 0.0 && upper > lower && upper <= max {
        Ok(())
    } else {
        Err(ProfileError::InvalidRequest(format!(
            "solver option {name} must satisfy 0 < lower < upper <= {max}, got ({lower}, {upper})"
        )))
    }
}
