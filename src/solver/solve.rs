//! Outer search and the public solver.
//!
//! Given:
//! - `Vmax`, `rfit`, `Vfit` and `f`
//! - an inner and an outer profile model
//!
//! we search `rmax/rfit` by bisection. Each trial:
//! - samples the inner model for that `rmax`
//! - runs the inner search to find `r0` and the merge point
//! - compares the merged momentum at `rfit` with the target `rfit·Vfit + ½f·rfit²`
//!
//! If the last trial failed or the target was never bracketed, `Ck/Cd` is
//! raised and the whole search repeats, up to the ceiling.

use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::domain::{Curve, MergedProfile, ProfileRequest};
use crate::error::{NonConvergenceReport, ProfileError};
use crate::math::{Direction, IterationCapExceeded, Pchip, Verdict, bisect, uniform_grid};
use crate::models::{E04Model, Er11Model, InnerProfileModel, OuterDrag, OuterProfileModel};
use crate::solver::assemble::{assemble, merged_knots};
use crate::solver::exchange::resolve_ck_cd;
use crate::solver::eye::apply_eye_adjustment;
use crate::solver::merge::{MergeTrial, OuterSetup, find_merge};
use crate::solver::options::SolverOptions;
use crate::solver::units::{Scales, angular_momentum};

/// Two-level bisection solver for merged ER11+E04 profiles.
///
/// The model types are parameters so the search can be exercised with
/// substitute closures.
#[derive(Debug, Clone, Default)]
pub struct MergeSolver<I = Er11Model, O = E04Model> {
    inner: I,
    outer: O,
    options: SolverOptions,
}

impl MergeSolver {
    /// Solver with the ER11 and E04 models and default options.
    pub fn new() -> Self {
        Self::default()
    }
}

/// Result of one outer trial that produced a merge.
#[derive(Debug, Clone)]
struct OuterTrial {
    rmax: f64,
    merge: MergeTrial,
}

/// Inner sampling grids in `r/rmax`, shared by every trial of a solve.
struct InnerGrids {
    coarse: Vec<f64>,
    fine: Vec<f64>,
}

/// Fixed inputs of one outer search.
struct SearchContext<'a> {
    request: &'a ProfileRequest,
    fcor: f64,
    ck_cd: f64,
    fit_momentum: f64,
    grids: &'a InnerGrids,
}

impl<I, O> MergeSolver<I, O>
where
    I: InnerProfileModel,
    O: OuterProfileModel,
{
    pub fn with_models(inner: I, outer: O, options: SolverOptions) -> Self {
        Self {
            inner,
            outer,
            options,
        }
    }

    /// Solve one request.
    pub fn solve(&self, request: &ProfileRequest) -> Result<MergedProfile, ProfileError> {
        request.validate()?;
        self.options.validate()?;

        let fcor = request.fcor.abs();
        let ceiling = self.options.ck_cd_ceiling;
        let grids = InnerGrids {
            coarse: uniform_grid(0.0, self.options.inner_extent, self.options.inner_step)?,
            fine: uniform_grid(0.0, self.options.inner_extent, self.options.inner_step_fine)?,
        };

        let mut ck_cd = resolve_ck_cd(request, ceiling).value;
        let mut attempts = 0;
        loop {
            attempts += 1;
            let ctx = SearchContext {
                request,
                fcor,
                ck_cd,
                fit_momentum: request.fit_momentum(),
                grids: &grids,
            };

            let outcome = bisect(&self.options.outer_schedule(), |x| self.try_rmax(&ctx, x))
                .map_err(|cap| cap_exceeded(request, ck_cd, attempts, cap))?;

            let reason = match (outcome.last_failed, outcome.bracketed, outcome.record) {
                (false, true, Some(trial)) => {
                    info!(
                        rmax = trial.rmax,
                        r0 = trial.merge.r0,
                        ck_cd,
                        attempts,
                        iterations = outcome.iterations,
                        "merged profile converged"
                    );
                    return self.finish(request, fcor, ck_cd, trial);
                }
                (true, _, _) => "inner profile or merge failed on the last trial",
                _ => "fit target was never bracketed",
            };

            if ck_cd >= ceiling {
                return Err(ProfileError::non_convergence(NonConvergenceReport {
                    rmax_over_rfit: outcome.value,
                    rmax: outcome.value * request.rfit,
                    ck_cd,
                    attempts,
                    reason: reason.to_string(),
                }));
            }

            let next = (ck_cd + self.options.ck_cd_increment).min(ceiling);
            warn!(
                from = ck_cd,
                to = next,
                reason,
                "adjusting Ck/Cd to find a convergent solution"
            );
            ck_cd = next;
        }
    }

    /// Evaluate one trial `rmax/rfit`.
    fn try_rmax(&self, ctx: &SearchContext<'_>, rmax_over_rfit: f64) -> Verdict<OuterTrial> {
        let request = ctx.request;
        let rmax = rmax_over_rfit * request.rfit;
        let r_over_rmax = if rmax > self.options.large_storm_rmax {
            &ctx.grids.fine
        } else {
            &ctx.grids.coarse
        };
        let radii: Vec<f64> = r_over_rmax.iter().map(|x| x * rmax).collect();

        let winds = match self
            .inner
            .wind_speeds(request.vmax, rmax, ctx.fcor, ctx.ck_cd, &radii)
        {
            Ok(v) => v,
            Err(err) => {
                debug!(rmax, error = %err, "inner profile failed");
                return Verdict::Failed(Direction::Decrease);
            }
        };

        let mm = angular_momentum(rmax, request.vmax, ctx.fcor);
        let inner = valid_inner_branch(r_over_rmax, &radii, &winds, mm, ctx.fcor);
        let setup = OuterSetup {
            fcor: ctx.fcor,
            drag: OuterDrag {
                vary: request.cd_vary,
                cd: request.cd,
            },
            w_cool: request.w_cool,
            sample_count: self.options.outer_sample_count,
        };

        let merge = match find_merge(
            &self.outer,
            &self.options.inner_schedule(),
            rmax,
            mm,
            &inner,
            &setup,
        ) {
            Ok(Some(trial)) => trial,
            Ok(None) => {
                debug!(rmax, "inner and outer curves never met");
                return Verdict::Failed(Direction::Decrease);
            }
            Err(cap) => {
                debug!(rmax, iterations = cap.iterations, "inner search hit its cap");
                return Verdict::Failed(Direction::Decrease);
            }
        };

        let rfit_over_r0 = request.rfit / merge.r0;
        let direction = if rfit_over_r0 > 1.0 {
            // The fit radius lies beyond r0, where the profile has no wind.
            Direction::Decrease
        } else {
            let knots = merged_knots(&merge.inner, &merge.outer, merge.merge);
            let implied = match Pchip::new(&knots.x, &knots.y).and_then(|p| p.eval(rfit_over_r0)) {
                Ok(m) => m,
                Err(err) => {
                    debug!(rmax, error = %err, "merged curve could not be evaluated at rfit");
                    return Verdict::Failed(Direction::Decrease);
                }
            };
            let mismatch = implied - ctx.fit_momentum / merge.m0;
            debug!(rmax, r0 = merge.r0, mismatch, "outer trial");
            if mismatch > 0.0 {
                Direction::Decrease
            } else {
                Direction::Increase
            }
        };

        Verdict::Evaluated {
            direction,
            record: OuterTrial { rmax, merge },
        }
    }

    fn finish(
        &self,
        request: &ProfileRequest,
        fcor: f64,
        ck_cd: f64,
        trial: OuterTrial,
    ) -> Result<MergedProfile, ProfileError> {
        let scales = Scales::new(trial.rmax, request.vmax, trial.merge.r0, fcor);
        let mut profile = assemble(
            &scales,
            &trial.merge.inner,
            &trial.merge.outer,
            trial.merge.merge,
            self.options.output_step,
            ck_cd,
        )?;

        if request.eye_adj {
            apply_eye_adjustment(
                &profile.radii,
                &mut profile.wind_speeds,
                profile.rmax,
                request.alpha_eye,
            );
        }
        Ok(profile)
    }
}

impl<I, O> MergeSolver<I, O>
where
    I: InnerProfileModel + Sync,
    O: OuterProfileModel + Sync,
{
    /// Solve independent requests in parallel, keeping the input order.
    pub fn solve_batch(&self, requests: &[ProfileRequest]) -> Vec<Result<MergedProfile, ProfileError>> {
        requests.par_iter().map(|req| self.solve(req)).collect()
    }
}

/// Inner samples in `(r/rmax, M/Mm)` up to the first negative wind outside
/// `rmax`, or the first non-finite sample.
///
/// For `Ck/Cd > 1` the profile is slightly negative just off the centre; its
/// momentum is still positive there, so those samples stay.
fn valid_inner_branch(r_over_rmax: &[f64], radii: &[f64], winds: &[f64], mm: f64, fcor: f64) -> Curve {
    let keep = winds
        .iter()
        .zip(r_over_rmax)
        .position(|(v, x)| !v.is_finite() || (*x > 1.0 && *v < 0.0))
        .unwrap_or(winds.len());
    Curve::new(
        r_over_rmax[..keep].to_vec(),
        radii[..keep]
            .iter()
            .zip(&winds[..keep])
            .map(|(&r, &v)| angular_momentum(r, v, fcor) / mm)
            .collect(),
    )
}

fn cap_exceeded(
    request: &ProfileRequest,
    ck_cd: f64,
    attempts: usize,
    cap: IterationCapExceeded,
) -> ProfileError {
    ProfileError::non_convergence(NonConvergenceReport {
        rmax_over_rfit: cap.value,
        rmax: cap.value * request.rfit,
        ck_cd,
        attempts,
        reason: format!("outer search hit its cap of {} iterations", cap.iterations),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_branch_stops_at_first_negative_wind_outside_rmax() {
        let x = [0.0, 1.0, 2.0, 3.0];
        let r = [0.0, 10.0, 20.0, 30.0];
        let v = [0.0, 5.0, -1.0, 2.0];
        let c = valid_inner_branch(&x, &r, &v, 100.0, 0.0);
        assert_eq!(c.x, vec![0.0, 1.0]);
        assert_eq!(c.y, vec![0.0, 0.5]);
    }

    #[test]
    fn valid_branch_keeps_weak_negative_winds_near_the_centre() {
        let rmax = 40_000.0;
        let x = [0.0, 0.01, 0.05, 0.2, 1.0, 2.0];
        let radii: Vec<f64> = x.iter().map(|x| x * rmax).collect();
        let winds = crate::models::er11_wind_speeds(70.0, rmax, 5e-5, 1.6, &radii);
        assert!(winds[1] < 0.0);
        let mm = angular_momentum(rmax, 70.0, 5e-5);
        let c = valid_inner_branch(&x, &radii, &winds, mm, 5e-5);
        assert_eq!(c.len(), x.len());
        assert!(c.y.windows(2).all(|w| w[1] > w[0]));
    }

    #[test]
    fn high_ck_cd_inner_profile_still_merges() {
        let rmax = 40_000.0;
        let grid = uniform_grid(0.0, 50.0, 0.01).unwrap();
        let radii: Vec<f64> = grid.iter().map(|x| x * rmax).collect();
        let winds = crate::models::er11_wind_speeds(70.0, rmax, 5e-5, 1.6, &radii);
        let mm = angular_momentum(rmax, 70.0, 5e-5);
        let inner = valid_inner_branch(&grid, &radii, &winds, mm, 5e-5);
        assert!(inner.len() > 100);

        let options = SolverOptions::default();
        let setup = OuterSetup {
            fcor: 5e-5,
            drag: OuterDrag {
                vary: false,
                cd: 1.5e-3,
            },
            w_cool: 2e-3,
            sample_count: options.outer_sample_count,
        };
        let found = find_merge(&E04Model, &options.inner_schedule(), rmax, mm, &inner, &setup).unwrap();
        assert!(found.is_some());
    }

    /// Outer model with constant `M/M0 = 1`; any rising inner curve crosses it.
    struct FlatOuter;

    impl OuterProfileModel for FlatOuter {
        fn momentum_curve(&self, _: f64, _: f64, _: OuterDrag, _: f64, _: usize) -> Curve {
            Curve::new(vec![0.0, 1.0], vec![1.0, 1.0])
        }
    }

    #[test]
    fn fit_radius_beyond_r0_shrinks_rmax() {
        // A tight rmax/r0 bracket forces r0 below rfit.
        let options = SolverOptions {
            rmax_over_r0_bounds: (0.6, 0.9),
            ..SolverOptions::default()
        };
        let solver = MergeSolver::with_models(Er11Model::default(), FlatOuter, options);
        let request = ProfileRequest::new(50.0, 200_000.0, 15.0, 5e-5);
        let grids = InnerGrids {
            coarse: uniform_grid(0.0, 50.0, 0.01).unwrap(),
            fine: uniform_grid(0.0, 50.0, 0.001).unwrap(),
        };
        let ctx = SearchContext {
            request: &request,
            fcor: 5e-5,
            ck_cd: 1.0,
            fit_momentum: request.fit_momentum(),
            grids: &grids,
        };

        match solver.try_rmax(&ctx, 0.5) {
            Verdict::Evaluated {
                direction,
                record,
            } => {
                assert!(record.merge.r0 < request.rfit, "r0={}", record.merge.r0);
                assert_eq!(direction, Direction::Decrease);
            }
            other => panic!("expected an evaluated trial, got {other:?}"),
        }
    }

    #[test]
    fn invalid_request_fails_before_any_model_runs() {
        struct Panicky;
        impl InnerProfileModel for Panicky {
            fn wind_speeds(
                &self,
                _: f64,
                _: f64,
                _: f64,
                _: f64,
                _: &[f64],
            ) -> Result<Vec<f64>, crate::models::ConvergenceFailure> {
                panic!("model must not run");
            }
        }
        let solver = MergeSolver::with_models(Panicky, E04Model, SolverOptions::default());
        let req = ProfileRequest::new(-1.0, 200_000.0, 15.0, 5e-5);
        assert!(matches!(solver.solve(&req), Err(ProfileError::InvalidRequest(_))));
    }
}
