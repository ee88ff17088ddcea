//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - built from CLI flags or a JSON request file
//! - passed through the solver by reference
//! - exported to JSON and reloaded later for inspection

use serde::{Deserialize, Serialize};

use crate::error::ProfileError;

/// Default exponent of the eye-region power-law flattening.
pub const DEFAULT_ALPHA_EYE: f64 = 0.15;

/// Input to a merged-profile solve.
///
/// Field names follow the usual notation of the ER11/E04 literature. The
/// Coriolis parameter may be signed (southern hemisphere); the solver uses
/// its absolute value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProfileRequest {
    /// Maximum azimuthal wind speed (m/s).
    pub vmax: f64,
    /// Radius at which the wind speed `vfit` is known (m).
    pub rfit: f64,
    /// Wind speed observed at `rfit` (m/s).
    pub vfit: f64,
    /// Coriolis parameter (1/s).
    pub fcor: f64,
    /// Use the wind-speed dependent drag coefficient in the outer model.
    #[serde(default)]
    pub cd_vary: bool,
    /// Static surface drag coefficient for the outer model.
    #[serde(default = "default_cd")]
    pub cd: f64,
    /// Radiative-subsidence rate in the free troposphere (m/s).
    #[serde(default = "default_w_cool")]
    pub w_cool: f64,
    /// Derive `ck_cd` from `vmax` instead of using the static value.
    #[serde(default)]
    pub ck_cd_vary: bool,
    /// Static ratio of the enthalpy and momentum exchange coefficients.
    #[serde(default = "default_ck_cd")]
    pub ck_cd: f64,
    /// Flatten the wind speed inside `rmax`.
    #[serde(default)]
    pub eye_adj: bool,
    #[serde(default = "default_alpha_eye")]
    pub alpha_eye: f64,
}

fn default_cd() -> f64 {
    1.5e-3
}

fn default_w_cool() -> f64 {
    2e-3
}

fn default_ck_cd() -> f64 {
    1.0
}

fn default_alpha_eye() -> f64 {
    DEFAULT_ALPHA_EYE
}

impl ProfileRequest {
    /// A request with the default drag, cooling, exchange and eye settings.
    pub fn new(vmax: f64, rfit: f64, vfit: f64, fcor: f64) -> Self {
        Self {
            vmax,
            rfit,
            vfit,
            fcor,
            cd_vary: false,
            cd: default_cd(),
            w_cool: default_w_cool(),
            ck_cd_vary: false,
            ck_cd: default_ck_cd(),
            eye_adj: false,
            alpha_eye: default_alpha_eye(),
        }
    }

    /// Reject requests the solver cannot work with before any model runs.
    pub fn validate(&self) -> Result<(), ProfileError> {
        let positive = [
            ("vmax", self.vmax),
            ("rfit", self.rfit),
            ("cd", self.cd),
            ("w_cool", self.w_cool),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(ProfileError::InvalidRequest(format!(
                    "{name} must be finite and > 0, got {value}"
                )));
            }
        }

        let non_negative = [("vfit", self.vfit), ("alpha_eye", self.alpha_eye)];
        for (name, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(ProfileError::InvalidRequest(format!(
                    "{name} must be finite and >= 0, got {value}"
                )));
            }
        }

        if !(self.fcor.is_finite() && self.fcor != 0.0) {
            return Err(ProfileError::InvalidRequest(format!(
                "fcor must be finite and non-zero, got {}",
                self.fcor
            )));
        }

        if !self.ck_cd_vary && !(self.ck_cd.is_finite() && self.ck_cd > 0.0) {
            return Err(ProfileError::InvalidRequest(format!(
                "ck_cd must be finite and > 0, got {}",
                self.ck_cd
            )));
        }

        Ok(())
    }

    /// Absolute angular momentum at the fit radius, `rfit·Vfit + ½|f|·rfit²`.
    pub fn fit_momentum(&self) -> f64 {
        crate::solver::units::angular_momentum(self.rfit, self.vfit, self.fcor.abs())
    }
}

/// A sampled curve `y(x)`.
///
/// Used both for nondimensional `(r/r0, M/M0)` curves and for dimensional
/// profiles.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Curve {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}

impl Curve {
    pub fn new(x: Vec<f64>, y: Vec<f64>) -> Self {
        debug_assert_eq!(x.len(), y.len());
        Self { x, y }
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// Iterate over `(x, y)` pairs.
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.x.iter().copied().zip(self.y.iter().copied())
    }

    /// Keep only the samples for which `keep(x, y)` holds.
    pub fn filtered(&self, mut keep: impl FnMut(f64, f64) -> bool) -> Curve {
        let (x, y) = self.points().filter(|&(x, y)| keep(x, y)).unzip();
        Curve { x, y }
    }

    /// Multiply abscissae by `sx` and ordinates by `sy`.
    pub fn scaled(&self, sx: f64, sy: f64) -> Curve {
        Curve {
            x: self.x.iter().map(|x| x * sx).collect(),
            y: self.y.iter().map(|y| y * sy).collect(),
        }
    }

    /// Append the samples of `other` after the samples of `self`.
    pub fn concat(mut self, other: Curve) -> Curve {
        self.x.extend(other.x);
        self.y.extend(other.y);
        self
    }
}

/// Point at which the inner and outer curves are spliced, in `(r/r0, M/M0)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MergePoint {
    pub rmerge_over_r0: f64,
    pub mmerge_over_m0: f64,
}

/// Nondimensional view of a merged profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NondimSummary {
    pub r_over_r0: Vec<f64>,
    pub m_over_m0: Vec<f64>,
    pub rmax_over_r0: f64,
    pub mm_over_m0: f64,
    pub rmerge_over_r0: f64,
    pub mmerge_over_m0: f64,
}

/// Final radial wind profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MergedProfile {
    /// Radii (m), ascending, starting at 0.
    pub radii: Vec<f64>,
    /// Azimuthal wind speed at each radius (m/s).
    pub wind_speeds: Vec<f64>,
    pub rmax: f64,
    pub r0: f64,
    pub rmerge: f64,
    pub vmerge: f64,
    /// Angular momentum at `rmax` (m²/s).
    pub mm: f64,
    /// Angular momentum at `r0` (m²/s).
    pub m0: f64,
    /// Exchange-coefficient ratio the solution was found with.
    pub ck_cd: f64,
    pub nondim: NondimSummary,
}

impl MergedProfile {
    /// Linearly interpolated wind speed at radius `r`, if `r` is on the grid.
    pub fn wind_speed_at(&self, r: f64) -> Option<f64> {
        let last = *self.radii.last()?;
        if !(r.is_finite() && r >= self.radii[0] && r <= last) {
            return None;
        }
        if self.radii.len() < 2 {
            return self.wind_speeds.first().copied();
        }
        let hi = self.radii.partition_point(|&ri| ri < r).max(1);
        let lo = hi - 1;
        let (r0, r1) = (self.radii[lo], self.radii[hi]);
        let (v0, v1) = (self.wind_speeds[lo], self.wind_speeds[hi]);
        if r1 == r0 {
            return Some(v0);
        }
        Some(v0 + (v1 - v0) * (r - r0) / (r1 - r0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_rejects_non_positive_vmax() {
        let req = ProfileRequest::new(0.0, 200_000.0, 15.0, 5e-5);
        assert!(matches!(req.validate(), Err(ProfileError::InvalidRequest(_))));
    }

    #[test]
    fn validate_accepts_southern_hemisphere_fcor() {
        let req = ProfileRequest::new(50.0, 200_000.0, 15.0, -5e-5);
        assert!(req.validate().is_ok());
    }

    #[test]
    fn validate_skips_static_ck_cd_when_varying() {
        let mut req = ProfileRequest::new(50.0, 200_000.0, 15.0, 5e-5);
        req.ck_cd = f64::NAN;
        assert!(req.validate().is_err());
        req.ck_cd_vary = true;
        assert!(req.validate().is_ok());
    }

    #[test]
    fn request_json_fills_defaults() {
        let req: ProfileRequest =
            serde_json::from_str(r#"{"vmax": 50, "rfit": 200000, "vfit": 15, "fcor": 5e-5}"#)
                .unwrap();
        assert_eq!(req, ProfileRequest::new(50.0, 200_000.0, 15.0, 5e-5));
    }

    #[test]
    fn curve_filter_and_scale() {
        let c = Curve::new(vec![0.0, 1.0, 2.0], vec![0.0, 10.0, 20.0]);
        let kept = c.filtered(|x, _| x >= 1.0).scaled(2.0, 0.5);
        assert_eq!(kept.x, vec![2.0, 4.0]);
        assert_eq!(kept.y, vec![5.0, 10.0]);
    }

    #[test]
    fn wind_speed_lookup_interpolates_linearly() {
        let profile = MergedProfile {
            radii: vec![0.0, 100.0, 200.0],
            wind_speeds: vec![0.0, 10.0, 30.0],
            rmax: 100.0,
            r0: 200.0,
            rmerge: 150.0,
            vmerge: 20.0,
            mm: 1000.0,
            m0: 1.0,
            ck_cd: 1.0,
            nondim: NondimSummary {
                r_over_r0: vec![],
                m_over_m0: vec![],
                rmax_over_r0: 0.5,
                mm_over_m0: 1.0,
                rmerge_over_r0: 0.75,
                mmerge_over_m0: 1.0,
            },
        };
        assert_eq!(profile.wind_speed_at(0.0), Some(0.0));
        assert_eq!(profile.wind_speed_at(150.0), Some(20.0));
        assert_eq!(profile.wind_speed_at(200.0), Some(30.0));
        assert_eq!(profile.wind_speed_at(250.0), None);
    }
}
