//! Surface pressure implied by a wind profile.
//!
//! Assumes gradient-wind balance, `dp/dr = ρ (V²/r + f·V)`, and integrates
//! inward from the environmental pressure at the outermost radius.

use crate::error::ProfileError;

/// Environmental surface pressure (Pa).
pub const ENVIRONMENT_PRESSURE: f64 = 101_500.0;
/// Near-surface air density (kg/m³).
pub const AIR_DENSITY: f64 = 1.15;

/// Pressure (hPa) at each radius of an ascending wind profile.
pub fn pressure_profile(
    radii: &[f64],
    winds: &[f64],
    fcor: f64,
    p_env: f64,
    rho: f64,
) -> Result<Vec<f64>, ProfileError> {
    if radii.len() != winds.len() {
        return Err(ProfileError::InvalidCurve(format!(
            "radii and winds differ in length ({} vs {})",
            radii.len(),
            winds.len()
        )));
    }
    if radii.is_empty() {
        return Ok(Vec::new());
    }
    if radii.windows(2).any(|w| w[1] < w[0]) {
        return Err(ProfileError::InvalidCurve(
            "radii must be ascending".to_string(),
        ));
    }

    let n = radii.len();
    let mut p = vec![0.0; n];
    p[n - 1] = p_env;
    for i in (0..n - 1).rev() {
        let r_mid = 0.5 * (radii[i] + radii[i + 1]);
        let v = winds[i];
        p[i] = p[i + 1] - rho * (v * v / r_mid + fcor * v) * (radii[i + 1] - radii[i]);
    }

    Ok(p.into_iter().map(|pa| pa / 100.0).collect())
}
