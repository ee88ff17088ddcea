//! Uniform radial grids.
//!
//! Grid points are generated as `start + i·step` rather than by repeated
//! addition, so the same request always produces bit-identical grids and the
//! last point never drifts past `end`.

use crate::error::ProfileError;

/// Relative slack used when deciding whether `end` itself is a grid point.
const END_SLACK: f64 = 1e-9;

/// Generate `start, start + step, ...` up to and including `end` (when `end`
/// falls on the grid within rounding).
pub fn uniform_grid(start: f64, end: f64, step: f64) -> Result<Vec<f64>, ProfileError> {
    if !(start.is_finite() && end.is_finite() && step.is_finite() && step > 0.0 && end >= start) {
        return Err(ProfileError::InvalidCurve(format!(
            "invalid grid: start={start}, end={end}, step={step} (need finite values, step>0, end>=start)"
        )));
    }

    let n = ((end - start) / step + END_SLACK).floor() as usize;
    let mut out = Vec::with_capacity(n + 1);
    for i in 0..=n {
        out.push((start + step * i as f64).min(end));
    }
    Ok(out)
}

/// Generate `count` points with spacing `step` that end exactly at `end`.
pub fn grid_ending_at(end: f64, step: f64, count: usize) -> Vec<f64> {
    (0..count)
        .map(|i| end - step * (count - 1 - i) as f64)
        .collect()
}
