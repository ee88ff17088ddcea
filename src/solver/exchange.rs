//! Resolution of the exchange-coefficient ratio `Ck/Cd`.
//!
//! When the request asks for a varying ratio, it comes from a quadratic fit
//! in `Vmax` (Chavas et al. 2015). Either way the value is capped: beyond the
//! cap the inner profile leaves its calibration range, and at `Ck/Cd = 2` it
//! is undefined.

use tracing::warn;

use crate::domain::ProfileRequest;

const COEF_QUAD: f64 = 5.5041e-4;
const COEF_LIN: f64 = -0.0259;
const COEF_CONST: f64 = 0.7627;

/// `Ck/Cd` after applying the fit and the ceiling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedCkCd {
    pub value: f64,
    /// The fitted or supplied value exceeded the ceiling.
    pub clamped: bool,
}

/// Quadratic fit of `Ck/Cd` against `Vmax` (m/s).
pub fn ck_cd_from_vmax(vmax: f64) -> f64 {
    COEF_QUAD * vmax * vmax + COEF_LIN * vmax + COEF_CONST
}

/// Pick the request's `Ck/Cd` and cap it at `ceiling`.
pub fn resolve_ck_cd(request: &ProfileRequest, ceiling: f64) -> ResolvedCkCd {
    let raw = if request.ck_cd_vary {
        ck_cd_from_vmax(request.vmax)
    } else {
        request.ck_cd
    };

    if raw > ceiling {
        warn!(
            ck_cd = raw,
            ceiling,
            vmax = request.vmax,
            "Ck/Cd is capped; vmax lies outside the range the Ck/Cd fit was calibrated on"
        );
        ResolvedCkCd {
            value: ceiling,
            clamped: true,
        }
    } else {
        ResolvedCkCd {
            value: raw,
            clamped: false,
        }
    }
}
