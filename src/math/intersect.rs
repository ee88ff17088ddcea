//! Intersections between two piecewise-linear curves.
//!
//! The merge search compares curves whose abscissae are sorted (radius
//! fractions), so the common case is a linear sweep: on the overlap interval
//! both curves are linear between consecutive breakpoints of the merged grid,
//! and every sign change of their difference is one crossing. Curves that are
//! not x-monotone fall back to a segment-by-segment test.

use crate::domain::Curve;

/// All intersection points `(x, y)` of `a` and `b`.
///
/// An empty result is a normal outcome. Non-finite samples are ignored.
pub fn curve_intersections(a: &Curve, b: &Curve) -> Vec<(f64, f64)> {
    let a = finite_part(a);
    let b = finite_part(b);
    if a.len() < 2 || b.len() < 2 {
        return Vec::new();
    }

    if is_strictly_increasing(&a.x) && is_strictly_increasing(&b.x) {
        sweep_sorted(&a, &b)
    } else {
        segment_pairs(&a, &b)
    }
}

fn finite_part(c: &Curve) -> Curve {
    c.filtered(|x, y| x.is_finite() && y.is_finite())
}

fn is_strictly_increasing(x: &[f64]) -> bool {
    x.windows(2).all(|w| w[1] > w[0])
}

/// Linear interpolation on a sorted curve; `x` must lie inside its range.
fn lerp_sorted(c: &Curve, x: f64) -> f64 {
    let n = c.x.len();
    let hi = c.x.partition_point(|&xi| xi < x).clamp(1, n - 1);
    let lo = hi - 1;
    let (x0, x1) = (c.x[lo], c.x[hi]);
    let t = (x - x0) / (x1 - x0);
    c.y[lo] + (c.y[hi] - c.y[lo]) * t
}

fn sweep_sorted(a: &Curve, b: &Curve) -> Vec<(f64, f64)> {
    let lo = a.x[0].max(b.x[0]);
    let hi = a.x[a.len() - 1].min(b.x[b.len() - 1]);
    if lo > hi {
        return Vec::new();
    }

    // Merged breakpoints of both curves on [lo, hi].
    let mut xs: Vec<f64> = Vec::with_capacity(a.len() + b.len() + 2);
    xs.push(lo);
    let (mut i, mut j) = (0, 0);
    while i < a.len() || j < b.len() {
        let next = match (a.x.get(i), b.x.get(j)) {
            (Some(&xa), Some(&xb)) if xa <= xb => {
                i += 1;
                xa
            }
            (Some(_), Some(&xb)) => {
                j += 1;
                xb
            }
            (Some(&xa), None) => {
                i += 1;
                xa
            }
            (None, Some(&xb)) => {
                j += 1;
                xb
            }
            (None, None) => break,
        };
        if next > lo && next < hi && next > xs[xs.len() - 1] {
            xs.push(next);
        }
    }
    if hi > xs[xs.len() - 1] {
        xs.push(hi);
    }

    let ya: Vec<f64> = xs.iter().map(|&x| lerp_sorted(a, x)).collect();
    let diff: Vec<f64> = xs
        .iter()
        .zip(ya.iter())
        .map(|(&x, &y)| y - lerp_sorted(b, x))
        .collect();

    let mut out = Vec::new();
    for k in 0..xs.len() {
        if diff[k] == 0.0 {
            out.push((xs[k], ya[k]));
            continue;
        }
        if k + 1 < xs.len() && diff[k] * diff[k + 1] < 0.0 {
            let t = diff[k] / (diff[k] - diff[k + 1]);
            let x = xs[k] + (xs[k + 1] - xs[k]) * t;
            let y = ya[k] + (ya[k + 1] - ya[k]) * t;
            out.push((x, y));
        }
    }
    out
}

fn segment_pairs(a: &Curve, b: &Curve) -> Vec<(f64, f64)> {
    let mut out = Vec::new();
    for i in 0..a.len() - 1 {
        let (p0, p1) = ((a.x[i], a.y[i]), (a.x[i + 1], a.y[i + 1]));
        for j in 0..b.len() - 1 {
            let (q0, q1) = ((b.x[j], b.y[j]), (b.x[j + 1], b.y[j + 1]));
            if !boxes_overlap(p0, p1, q0, q1) {
                continue;
            }
            if let Some(hit) = segment_intersection(p0, p1, q0, q1) {
                let duplicate = out
                    .last()
                    .is_some_and(|&(x, y): &(f64, f64)| x == hit.0 && y == hit.1);
                if !duplicate {
                    out.push(hit);
                }
            }
        }
    }
    out
}

fn boxes_overlap(p0: (f64, f64), p1: (f64, f64), q0: (f64, f64), q1: (f64, f64)) -> bool {
    p0.0.min(p1.0) <= q0.0.max(q1.0)
        && q0.0.min(q1.0) <= p0.0.max(p1.0)
        && p0.1.min(p1.1) <= q0.1.max(q1.1)
        && q0.1.min(q1.1) <= p0.1.max(p1.1)
}

/// Intersection of two closed segments; parallel (including collinear)
/// segments report nothing.
fn segment_intersection(
    p0: (f64, f64),
    p1: (f64, f64),
    q0: (f64, f64),
    q1: (f64, f64),
) -> Option<(f64, f64)> {
    let r = (p1.0 - p0.0, p1.1 - p0.1);
    let s = (q1.0 - q0.0, q1.1 - q0.1);
    let denom = r.0 * s.1 - r.1 * s.0;
    if denom == 0.0 {
        return None;
    }
    let qp = (q0.0 - p0.0, q0.1 - p0.1);
    let t = (qp.0 * s.1 - qp.1 * s.0) / denom;
    let u = (qp.0 * r.1 - qp.1 * r.0) / denom;
    if (0.0..=1.0).contains(&t) && (0.0..=1.0).contains(&u) {
        Some((p0.0 + t * r.0, p0.1 + t * r.1))
    } else {
        None
    }
}
