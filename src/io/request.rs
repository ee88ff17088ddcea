//! Read profile requests from JSON.
//!
//! A request file holds either one request object or an array of them.
//! Omitted optional fields take the documented defaults.

use std::fs::File;
use std::path::Path;

use serde::Deserialize;

use crate::domain::ProfileRequest;
use crate::error::AppError;

#[derive(Deserialize)]
#[serde(untagged)]
enum RequestDoc {
    One(ProfileRequest),
    Many(Vec<ProfileRequest>),
}

/// Read every request in a JSON file.
pub fn read_requests(path: &Path) -> Result<Vec<ProfileRequest>, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::new(2, format!("Failed to open request JSON '{}': {e}", path.display())))?;
    let doc: RequestDoc =
        serde_json::from_reader(file).map_err(|e| AppError::new(2, format!("Invalid request JSON: {e}")))?;
    Ok(match doc {
        RequestDoc::One(req) => vec![req],
        RequestDoc::Many(reqs) => reqs,
    })
}

/// Read a file that must contain exactly one request.
pub fn read_request(path: &Path) -> Result<ProfileRequest, AppError> {
    let mut reqs = read_requests(path)?;
    if reqs.len() != 1 {
        return Err(AppError::new(
            2,
            format!("Expected one request in '{}', found {}", path.display(), reqs.len()),
        ));
    }
    Ok(reqs.remove(0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_tmp(contents: &str) -> tempfile::NamedTempFile {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(contents.as_bytes()).unwrap();
        f
    }

    #[test]
    fn single_request_gets_defaults() {
        let f = write_tmp(r#"{"vmax": 50, "rfit": 300000, "vfit": 12, "fcor": 5e-5}"#);
        let req = read_request(f.path()).unwrap();
        let expected = ProfileRequest::new(50.0, 300_000.0, 12.0, 5e-5);
        assert_eq!(req.vmax, expected.vmax);
        assert!((req.cd - expected.cd).abs() < 1e-15);
        assert!((req.w_cool - expected.w_cool).abs() < 1e-15);
        assert_eq!(req.ck_cd, 1.0);
        assert_eq!(req.alpha_eye, expected.alpha_eye);
        assert!(!req.cd_vary && !req.ck_cd_vary && !req.eye_adj);
    }

    #[test]
    fn array_of_requests() {
        let f = write_tmp(
            r#"[{"vmax": 50, "rfit": 300000, "vfit": 12, "fcor": 5e-5},
                {"vmax": 40, "rfit": 250000, "vfit": 10, "fcor": -5e-5, "eye_adj": true}]"#,
        );
        let reqs = read_requests(f.path()).unwrap();
        assert_eq!(reqs.len(), 2);
        assert!(reqs[1].eye_adj);
        assert!(read_request(f.path()).is_err());
    }

    #[test]
    fn malformed_json_is_an_input_error() {
        let f = write_tmp("{not json");
        assert_eq!(read_requests(f.path()).unwrap_err().exit_code(), 2);
    }
}
