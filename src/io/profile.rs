//! Read/write profile JSON files.
//!
//! A profile file is the portable form of one solve:
//! - the request that produced it
//! - the headline scalars (`rmax`, `r0`, merge point, `Ck/Cd`)
//! - the radial grid `rr` (m) and wind speeds `VV` (m/s)
//! - optionally, the surface pressure at each radius (hPa)

use std::fs::File;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{MergedProfile, ProfileRequest};
use crate::error::AppError;

/// On-disk representation of a solved profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileFile {
    pub tool: String,
    pub generated_at: DateTime<Utc>,
    pub request: ProfileRequest,
    pub rmax: f64,
    pub r0: f64,
    pub rmerge: f64,
    pub vmerge: f64,
    pub ck_cd: f64,
    #[serde(rename = "rr")]
    pub radii: Vec<f64>,
    #[serde(rename = "VV")]
    pub wind_speeds: Vec<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pressures_hpa: Option<Vec<f64>>,
}

impl ProfileFile {
    pub fn new(request: &ProfileRequest, profile: &MergedProfile, pressures_hpa: Option<Vec<f64>>) -> Self {
        Self {
            tool: "cle".to_string(),
            generated_at: Utc::now(),
            request: *request,
            rmax: profile.rmax,
            r0: profile.r0,
            rmerge: profile.rmerge,
            vmerge: profile.vmerge,
            ck_cd: profile.ck_cd,
            radii: profile.radii.clone(),
            wind_speeds: profile.wind_speeds.clone(),
            pressures_hpa,
        }
    }
}

/// One entry of a batch export: either a profile or the error message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchRecord {
    pub index: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<ProfileFile>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Write a profile JSON file.
pub fn write_profile_json(path: &Path, file: &ProfileFile) -> Result<(), AppError> {
    write_json(path, file)
}

/// Write a batch export (JSON array of [`BatchRecord`]).
pub fn write_batch_json(path: &Path, records: &[BatchRecord]) -> Result<(), AppError> {
    write_json(path, records)
}

/// Read a profile JSON file.
pub fn read_profile_json(path: &Path) -> Result<ProfileFile, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::new(2, format!("Failed to open profile JSON '{}': {e}", path.display())))?;
    serde_json::from_reader(file).map_err(|e| AppError::new(2, format!("Invalid profile JSON: {e}")))
}

fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create '{}': {e}", path.display())))?;
    serde_json::to_writer_pretty(file, value)
        .map_err(|e| AppError::new(2, format!("Failed to write '{}': {e}", path.display())))
}
