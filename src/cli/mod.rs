//! Command-line parsing for the merged wind-profile solver.
//!
//! The goal of this module is to keep **argument parsing** separate from the
//! solver and from command dispatch (`crate::app`).

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "cle", version, about = "ER11+E04 merged tropical-cyclone wind profiles")]
pub struct Cli {
    /// Log solver progress at debug level (`RUST_LOG` overrides).
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Solve one profile from flags or a request JSON file.
    Solve(SolveArgs),
    /// Solve every request of a JSON array in parallel.
    Batch(BatchArgs),
    /// Print the summary of a saved profile JSON.
    Show(ShowArgs),
}

/// Options for a single solve.
///
/// Either `--request` or all of `--vmax`, `--rfit`, `--vfit` and `--fcor`
/// must be given. Flags override values read from the request file.
#[derive(Debug, Args, Clone)]
pub struct SolveArgs {
    /// Request JSON file (one request object).
    #[arg(long, value_name = "JSON")]
    pub request: Option<PathBuf>,

    /// Maximum wind speed (m/s).
    #[arg(long, required_unless_present = "request")]
    pub vmax: Option<f64>,

    /// Radius of the known outer wind speed (m).
    #[arg(long, required_unless_present = "request")]
    pub rfit: Option<f64>,

    /// Wind speed at `rfit` (m/s).
    #[arg(long, required_unless_present = "request")]
    pub vfit: Option<f64>,

    /// Coriolis parameter (1/s); may be negative in the southern hemisphere.
    #[arg(long, allow_hyphen_values = true, required_unless_present = "request")]
    pub fcor: Option<f64>,

    /// Surface drag coefficient of the outer model [default: 1.5e-3].
    #[arg(long)]
    pub cd: Option<f64>,

    /// Use the wind-speed dependent drag coefficient in the outer model.
    #[arg(long)]
    pub cd_vary: bool,

    /// Radiative-subsidence rate (m/s) [default: 2e-3].
    #[arg(long)]
    pub w_cool: Option<f64>,

    /// Ratio of exchange coefficients Ck/Cd [default: 1].
    #[arg(long)]
    pub ck_cd: Option<f64>,

    /// Derive Ck/Cd from vmax.
    #[arg(long)]
    pub ck_cd_vary: bool,

    /// Flatten the wind speed inside rmax.
    #[arg(long)]
    pub eye_adj: bool,

    /// Exponent of the eye flattening [default: 0.15].
    #[arg(long)]
    pub alpha_eye: Option<f64>,

    /// Also compute the surface pressure profile.
    #[arg(long)]
    pub pressure: bool,

    /// Export the profile (`rr`, `VV`, scalars, request) to JSON.
    #[arg(long, value_name = "JSON")]
    pub export: Option<PathBuf>,
}

/// Options for batch solving.
#[derive(Debug, Args, Clone)]
pub struct BatchArgs {
    /// JSON file holding an array of requests.
    #[arg(long, value_name = "JSON")]
    pub requests: PathBuf,

    /// Also compute surface pressure profiles for the export.
    #[arg(long)]
    pub pressure: bool,

    /// Export all results to one JSON array.
    #[arg(long, value_name = "JSON")]
    pub export: Option<PathBuf>,
}

/// Options for inspecting a saved profile.
#[derive(Debug, Args, Clone)]
pub struct ShowArgs {
    /// Profile JSON file produced by `cle solve --export`.
    #[arg(long, value_name = "JSON")]
    pub profile: PathBuf,
}
