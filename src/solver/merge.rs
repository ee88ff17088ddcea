//! Inner search: the outer radius at which both curves touch.
//!
//! For a fixed `rmax`, sweep `rmax/r0` by bisection. Each trial builds the
//! outer curve for `r0 = rmax / (rmax/r0)`, rescales the inner curve into the
//! same `(r/r0, M/M0)` frame and intersects them. The outer profile keeps a
//! finite momentum at the centre while the inner one drops to zero, so:
//! - no intersection means `r0` is too large; grow `rmax/r0`
//! - an intersection means `r0` may still grow; record it and lower `rmax/r0`
//!
//! The search therefore converges on the largest `r0` at which the curves
//! still meet, i.e. where they become tangent.

use tracing::trace;

use crate::domain::{Curve, MergePoint};
use crate::math::{
    BisectionOutcome, BisectionSchedule, Direction, IterationCapExceeded, Verdict, bisect,
    curve_intersections,
};
use crate::models::{OuterDrag, OuterProfileModel};

/// Everything the outer search needs from a successful inner trial.
#[derive(Debug, Clone)]
pub struct MergeTrial {
    pub rmax_over_r0: f64,
    pub r0: f64,
    pub m0: f64,
    pub merge: MergePoint,
    /// Inner profile in `(r/r0, M/M0)`.
    pub inner: Curve,
    /// Outer profile in `(r/r0, M/M0)`.
    pub outer: Curve,
}

/// Outer-model settings held fixed during one inner search.
#[derive(Debug, Clone, Copy)]
pub struct OuterSetup {
    pub fcor: f64,
    pub drag: OuterDrag,
    pub w_cool: f64,
    pub sample_count: usize,
}

/// Run the inner search for one `rmax`.
///
/// `inner` is the inner profile in `(r/rmax, M/Mm)`, already cut before the
/// negative-wind tail outside `rmax`. Returns `Ok(None)` when no trial intersected.
pub fn find_merge<O>(
    outer_model: &O,
    schedule: &BisectionSchedule,
    rmax: f64,
    mm: f64,
    inner: &Curve,
    setup: &OuterSetup,
) -> Result<Option<MergeTrial>, IterationCapExceeded>
where
    O: OuterProfileModel + ?Sized,
{
    let outcome: BisectionOutcome<MergeTrial> = bisect(schedule, |rmax_over_r0| {
        let r0 = rmax / rmax_over_r0;
        let m0 = 0.5 * setup.fcor * r0 * r0;

        let outer = outer_model.momentum_curve(
            r0,
            setup.fcor,
            setup.drag,
            setup.w_cool,
            setup.sample_count,
        );
        let inner = inner_within_r0(inner, rmax_over_r0, mm / m0);

        let hits = curve_intersections(&outer, &inner);
        if hits.is_empty() {
            trace!(rmax_over_r0, r0, "no intersection");
            return Verdict::Moved(Direction::Increase);
        }

        let n = hits.len() as f64;
        let merge = MergePoint {
            rmerge_over_r0: hits.iter().map(|h| h.0).sum::<f64>() / n,
            mmerge_over_m0: hits.iter().map(|h| h.1).sum::<f64>() / n,
        };
        trace!(
            rmax_over_r0,
            r0,
            intersections = hits.len(),
            rmerge_over_r0 = merge.rmerge_over_r0,
            "curves intersect"
        );
        Verdict::Evaluated {
            direction: Direction::Decrease,
            record: MergeTrial {
                rmax_over_r0,
                r0,
                m0,
                merge,
                inner,
                outer,
            },
        }
    })?;

    Ok(outcome.record)
}

/// Rescale the inner curve into `(r/r0, M/M0)`, dropping samples past `r0`
/// except the first one so the curve still spans the outer domain.
fn inner_within_r0(inner: &Curve, rmax_over_r0: f64, mm_over_m0: f64) -> Curve {
    let inside = inner.x.partition_point(|&x| x * rmax_over_r0 <= 1.0);
    let end = (inside + 1).min(inner.len());
    Curve::new(
        inner.x[..end].iter().map(|x| x * rmax_over_r0).collect(),
        inner.y[..end].iter().map(|y| y * mm_over_m0).collect(),
    )
}
