//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments and installs logging
//! - builds requests from flags or JSON
//! - runs the solver
//! - prints summaries and writes optional exports

use clap::Parser;
use tracing::info;

use crate::cli::{BatchArgs, Cli, Command, ShowArgs, SolveArgs};
use crate::domain::{MergedProfile, ProfileRequest};
use crate::error::AppError;
use crate::io::{BatchRecord, ProfileFile};
use crate::models::{AIR_DENSITY, ENVIRONMENT_PRESSURE, pressure_profile};
use crate::solver::MergeSolver;

/// Entry point for the `cle` binary.
pub fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    crate::logging::init_with_level(if cli.verbose { "debug" } else { "info" });

    match cli.command {
        Command::Solve(args) => handle_solve(args),
        Command::Batch(args) => handle_batch(args),
        Command::Show(args) => handle_show(args),
    }
}

fn handle_solve(args: SolveArgs) -> Result<(), AppError> {
    let request = request_from_args(&args)?;
    let profile = MergeSolver::new().solve(&request)?;

    println!("{}", crate::report::format_solve_summary(&request, &profile));

    if let Some(path) = &args.export {
        let pressures = if args.pressure {
            Some(pressures_for(&request, &profile)?)
        } else {
            None
        };
        crate::io::write_profile_json(path, &ProfileFile::new(&request, &profile, pressures))?;
        info!(path = %path.display(), "profile exported");
    } else if args.pressure {
        let pressures = pressures_for(&request, &profile)?;
        if let Some(p0) = pressures.first() {
            println!("Central pressure: {p0:.1} hPa");
        }
    }

    Ok(())
}

fn handle_batch(args: BatchArgs) -> Result<(), AppError> {
    let requests = crate::io::read_requests(&args.requests)?;
    info!(count = requests.len(), "solving batch");

    let results = MergeSolver::new().solve_batch(&requests);
    println!("{}", crate::report::format_batch_summary(&requests, &results));

    if let Some(path) = &args.export {
        let mut records = Vec::with_capacity(results.len());
        for (index, (request, result)) in requests.iter().zip(&results).enumerate() {
            let record = match result {
                Ok(profile) => {
                    let pressures = if args.pressure {
                        Some(pressures_for(request, profile)?)
                    } else {
                        None
                    };
                    BatchRecord {
                        index,
                        profile: Some(ProfileFile::new(request, profile, pressures)),
                        error: None,
                    }
                }
                Err(err) => BatchRecord {
                    index,
                    profile: None,
                    error: Some(err.to_string()),
                },
            };
            records.push(record);
        }
        crate::io::write_batch_json(path, &records)?;
        info!(path = %path.display(), "batch exported");
    }

    if results.iter().any(|r| r.is_err()) {
        return Err(AppError::new(4, "One or more batch requests failed."));
    }
    Ok(())
}

fn handle_show(args: ShowArgs) -> Result<(), AppError> {
    let file = crate::io::read_profile_json(&args.profile)?;
    println!("{}", crate::report::format_profile_file(&file));
    Ok(())
}

/// Build a request from a JSON file and/or flags; flags win.
pub fn request_from_args(args: &SolveArgs) -> Result<ProfileRequest, AppError> {
    let mut req = match &args.request {
        Some(path) => crate::io::read_request(path)?,
        None => {
            let missing = || AppError::new(2, "vmax, rfit, vfit and fcor are required without --request.");
            ProfileRequest::new(
                args.vmax.ok_or_else(missing)?,
                args.rfit.ok_or_else(missing)?,
                args.vfit.ok_or_else(missing)?,
                args.fcor.ok_or_else(missing)?,
            )
        }
    };

    if args.request.is_some() {
        if let Some(v) = args.vmax {
            req.vmax = v;
        }
        if let Some(v) = args.rfit {
            req.rfit = v;
        }
        if let Some(v) = args.vfit {
            req.vfit = v;
        }
        if let Some(v) = args.fcor {
            req.fcor = v;
        }
    }
    if let Some(v) = args.cd {
        req.cd = v;
    }
    if let Some(v) = args.w_cool {
        req.w_cool = v;
    }
    if let Some(v) = args.ck_cd {
        req.ck_cd = v;
    }
    if let Some(v) = args.alpha_eye {
        req.alpha_eye = v;
    }
    req.cd_vary |= args.cd_vary;
    req.ck_cd_vary |= args.ck_cd_vary;
    req.eye_adj |= args.eye_adj;

    Ok(req)
}

fn pressures_for(request: &ProfileRequest, profile: &MergedProfile) -> Result<Vec<f64>, AppError> {
    Ok(pressure_profile(
        &profile.radii,
        &profile.wind_speeds,
        request.fcor.abs(),
        ENVIRONMENT_PRESSURE,
        AIR_DENSITY,
    )?)
}
