//! Formatted terminal output.
//!
//! Formatting lives in one place so:
//! - the solver stays free of presentation concerns
//! - output changes are localized

use crate::domain::{MergedProfile, ProfileRequest};
use crate::error::ProfileError;
use crate::io::ProfileFile;

/// Number of rows in the radial table.
const TABLE_ROWS: usize = 12;

/// Summary of one solve: inputs, headline scalars and a coarse radial table.
pub fn format_solve_summary(request: &ProfileRequest, profile: &MergedProfile) -> String {
    let mut out = String::new();

    out.push_str("=== cle - ER11+E04 merged wind profile ===\n");
    out.push_str(&format_request(request));
    out.push_str(&format_scalars(
        profile.rmax,
        profile.r0,
        profile.rmerge,
        profile.vmerge,
        profile.ck_cd,
    ));
    out.push_str(&format!(
        "Nondim: rmax/r0={:.4} Mm/M0={:.4} rmerge/r0={:.4} Mmerge/M0={:.4}\n",
        profile.nondim.rmax_over_r0,
        profile.nondim.mm_over_m0,
        profile.nondim.rmerge_over_r0,
        profile.nondim.mmerge_over_m0,
    ));
    out.push('\n');
    out.push_str(&format_table(&profile.radii, &profile.wind_speeds, None));

    out
}

/// Summary of a saved profile file.
pub fn format_profile_file(file: &ProfileFile) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "=== {} profile generated {} ===\n",
        file.tool,
        file.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    out.push_str(&format_request(&file.request));
    out.push_str(&format_scalars(file.rmax, file.r0, file.rmerge, file.vmerge, file.ck_cd));
    out.push('\n');
    out.push_str(&format_table(
        &file.radii,
        &file.wind_speeds,
        file.pressures_hpa.as_deref(),
    ));

    out
}

/// One line per batch request.
pub fn format_batch_summary(
    requests: &[ProfileRequest],
    results: &[Result<MergedProfile, ProfileError>],
) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{:>5} {:>8} {:>10} {:>8} {:>10} {:>10} {:>6}  {}\n",
        "#", "vmax", "rfit_km", "vfit", "rmax_km", "r0_km", "ck_cd", "status"
    ));
    for (i, (req, res)) in requests.iter().zip(results).enumerate() {
        let head = format!(
            "{:>5} {:>8.2} {:>10.1} {:>8.2}",
            i,
            req.vmax,
            req.rfit / 1000.0,
            req.vfit
        );
        match res {
            Ok(p) => out.push_str(&format!(
                "{head} {:>10.2} {:>10.1} {:>6.2}  ok\n",
                p.rmax / 1000.0,
                p.r0 / 1000.0,
                p.ck_cd
            )),
            Err(e) => out.push_str(&format!("{head} {:>10} {:>10} {:>6}  {e}\n", "-", "-", "-")),
        }
    }
    let failed = results.iter().filter(|r| r.is_err()).count();
    out.push_str(&format!("\n{} solved, {} failed\n", results.len() - failed, failed));
    out
}

fn format_request(req: &ProfileRequest) -> String {
    let mut out = format!(
        "Input: vmax={:.2} m/s | rfit={:.1} km | vfit={:.2} m/s | f={:.3e} 1/s\n",
        req.vmax,
        req.rfit / 1000.0,
        req.vfit,
        req.fcor
    );
    out.push_str(&format!(
        "Outer: Cd={} (vary={}) | w_cool={} m/s\n",
        req.cd, req.cd_vary, req.w_cool
    ));
    let eye = if req.eye_adj {
        format!("alpha={}", req.alpha_eye)
    } else {
        "off".to_string()
    };
    out.push_str(&format!(
        "Inner: Ck/Cd={} (vary={}) | eye={eye}\n",
        req.ck_cd, req.ck_cd_vary
    ));
    out
}

fn format_scalars(rmax: f64, r0: f64, rmerge: f64, vmerge: f64, ck_cd: f64) -> String {
    format!(
        "Result: rmax={:.2} km | r0={:.1} km | rmerge={:.1} km | Vmerge={:.2} m/s | Ck/Cd used={:.2}\n",
        rmax / 1000.0,
        r0 / 1000.0,
        rmerge / 1000.0,
        vmerge,
        ck_cd
    )
}

fn format_table(radii: &[f64], winds: &[f64], pressures: Option<&[f64]>) -> String {
    let mut out = String::new();
    match pressures {
        Some(_) => out.push_str(&format!("{:>10} {:>10} {:>10}\n", "r_km", "V_ms", "p_hPa")),
        None => out.push_str(&format!("{:>10} {:>10}\n", "r_km", "V_ms")),
    }

    for i in table_rows(radii.len()) {
        let r = radii[i] / 1000.0;
        let v = winds.get(i).copied().unwrap_or(f64::NAN);
        match pressures.and_then(|p| p.get(i)) {
            Some(p) => out.push_str(&format!("{r:>10.1} {v:>10.2} {p:>10.1}\n")),
            None => out.push_str(&format!("{r:>10.1} {v:>10.2}\n")),
        }
    }
    out
}

/// Evenly spaced row indices, always including the first and last sample.
fn table_rows(n: usize) -> Vec<usize> {
    if n <= TABLE_ROWS {
        return (0..n).collect();
    }
    let mut rows: Vec<usize> = (0..TABLE_ROWS)
        .map(|k| k * (n - 1) / (TABLE_ROWS - 1))
        .collect();
    rows.dedup();
    rows
}
