//! Error types.
//!
//! The library reports solver problems through [`ProfileError`]. The binary
//! wraps everything in [`AppError`], which only adds a process exit code.

/// Diagnostics attached to a solve that could not be stabilized.
#[derive(Debug, Clone, PartialEq)]
pub struct NonConvergenceReport {
    /// Last trial `rmax / rfit` tried by the outer search.
    pub rmax_over_rfit: f64,
    /// Last trial radius of maximum wind (m).
    pub rmax: f64,
    /// Exchange-coefficient ratio in use when the solver gave up.
    pub ck_cd: f64,
    /// Number of full two-level searches attempted.
    pub attempts: usize,
    pub reason: String,
}

/// Errors surfaced by the profile solver.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ProfileError {
    #[error("invalid profile request: {0}")]
    InvalidRequest(String),

    #[error("invalid curve: {0}")]
    InvalidCurve(String),

    #[error(
        "merged profile did not converge after {} attempt(s): {} (last rmax/rfit={:.5}, rmax={:.1} m, Ck/Cd={:.2})",
        .0.attempts, .0.reason, .0.rmax_over_rfit, .0.rmax, .0.ck_cd
    )]
    NonConvergence(Box<NonConvergenceReport>),

    #[error("interpolation query {x} lies outside the tabulated range [{min}, {max}]")]
    OutOfRangeInterpolation { x: f64, min: f64, max: f64 },
}

impl ProfileError {
    pub fn non_convergence(report: NonConvergenceReport) -> Self {
        ProfileError::NonConvergence(Box::new(report))
    }
}

/// Error returned by the `cle` binary.
#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl From<ProfileError> for AppError {
    fn from(err: ProfileError) -> Self {
        let exit_code = match err {
            ProfileError::InvalidRequest(_) => 3,
            _ => 4,
        };
        AppError::new(exit_code, err.to_string())
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_follow_error_kind() {
        let invalid: AppError = ProfileError::InvalidRequest("vmax".into()).into();
        assert_eq!(invalid.exit_code(), 3);

        let report = NonConvergenceReport {
            rmax_over_rfit: 0.01,
            rmax: 2000.0,
            ck_cd: 1.9,
            attempts: 10,
            reason: "fit target not bracketed".into(),
        };
        let failed: AppError = ProfileError::non_convergence(report).into();
        assert_eq!(failed.exit_code(), 4);
        assert!(failed.to_string().contains("10 attempt(s)"));
    }
}
