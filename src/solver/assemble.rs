//! Splicing the inner and outer curves into the final profile.

use crate::domain::{Curve, MergePoint, MergedProfile, NondimSummary};
use crate::error::ProfileError;
use crate::math::{Pchip, uniform_grid};
use crate::solver::units::Scales;

/// Knots of the merged momentum curve in `(r/r0, M/M0)`.
///
/// Inner samples strictly below the merge point come first, then outer
/// samples at or beyond it. Both selections require the radius and the
/// momentum conditions together, so the knots are strictly ascending in `r`.
pub fn merged_knots(inner: &Curve, outer: &Curve, merge: MergePoint) -> Curve {
    let (rm, mm) = (merge.rmerge_over_r0, merge.mmerge_over_m0);
    inner
        .filtered(|x, y| x < rm && y < mm)
        .concat(outer.filtered(|x, y| x >= rm && y >= mm))
}

/// Build the dimensional profile on `r/rmax ∈ [0, r0/rmax]` with step
/// `output_step`, interpolating `M/Mm` through the merged knots by PCHIP.
pub fn assemble(
    scales: &Scales,
    inner: &Curve,
    outer: &Curve,
    merge: MergePoint,
    output_step: f64,
    ck_cd: f64,
) -> Result<MergedProfile, ProfileError> {
    let knots = scales.to_inner_frame(&merged_knots(inner, outer, merge));
    let pchip = Pchip::new(&knots.x, &knots.y)?;

    let r_over_rmax = uniform_grid(0.0, scales.r0 / scales.rmax, output_step)?;
    let m_over_mm = pchip.eval_many(&r_over_rmax)?;
    let (radii, wind_speeds) = scales.dimensional(&r_over_rmax, &m_over_mm);
    let (rmerge, vmerge) = scales.merge_radius_and_wind(merge);

    let rmax_over_r0 = scales.rmax_over_r0();
    let mm_over_m0 = scales.mm_over_m0();
    let nondim = NondimSummary {
        r_over_r0: r_over_rmax.iter().map(|x| x * rmax_over_r0).collect(),
        m_over_m0: m_over_mm.iter().map(|m| m * mm_over_m0).collect(),
        rmax_over_r0,
        mm_over_m0,
        rmerge_over_r0: merge.rmerge_over_r0,
        mmerge_over_m0: merge.mmerge_over_m0,
    };

    Ok(MergedProfile {
        radii,
        wind_speeds,
        rmax: scales.rmax,
        r0: scales.r0,
        rmerge,
        vmerge,
        mm: scales.mm,
        m0: scales.m0,
        ck_cd,
        nondim,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toy_curves() -> (Curve, Curve, MergePoint) {
        let inner = Curve::new(vec![0.0, 0.1, 0.2, 0.3, 0.4], vec![0.0, 0.2, 0.35, 0.40, 0.5]);
        let outer = Curve::new(vec![0.2, 0.4, 0.6, 0.8, 1.0], vec![0.3, 0.45, 0.6, 0.8, 1.0]);
        let merge = MergePoint {
            rmerge_over_r0: 0.35,
            mmerge_over_m0: 0.42,
        };
        (inner, outer, merge)
    }

    #[test]
    fn knots_take_inner_then_outer() {
        let (inner, outer, merge) = toy_curves();
        let k = merged_knots(&inner, &outer, merge);
        assert_eq!(k.x, vec![0.0, 0.1, 0.2, 0.3, 0.4, 0.6, 0.8, 1.0]);
        assert_eq!(k.y, vec![0.0, 0.2, 0.35, 0.40, 0.45, 0.6, 0.8, 1.0]);
    }

    #[test]
    fn knots_drop_inner_samples_above_merge_momentum() {
        let (inner, outer, _) = toy_curves();
        let merge = MergePoint {
            rmerge_over_r0: 0.35,
            mmerge_over_m0: 0.38,
        };
        let k = merged_knots(&inner, &outer, merge);
        assert!(!k.x.contains(&0.3));
        assert!(k.x.windows(2).all(|w| w[1] > w[0]));
    }

    #[test]
    fn profile_spans_centre_to_r0() {
        let (inner, outer, merge) = toy_curves();
        let scales = Scales::new(40_000.0, 50.0, 400_000.0, 5e-5);
        let p = assemble(&scales, &inner, &outer, merge, 0.01, 1.0).unwrap();
        assert_eq!(p.radii[0], 0.0);
        assert_eq!(p.wind_speeds[0], 0.0);
        assert!((p.radii.last().unwrap() - 400_000.0).abs() < 1e-6);
        assert!(p.radii.windows(2).all(|w| w[1] > w[0]));
        assert_eq!(p.radii.len(), p.wind_speeds.len());
        assert_eq!(p.nondim.r_over_r0.len(), p.radii.len());
        assert!((p.rmerge - 140_000.0).abs() < 1e-6);
        // M/M0 = 1 at r0 means zero wind there.
        assert!(p.wind_speeds.last().unwrap().abs() < 1e-6);
    }
}
