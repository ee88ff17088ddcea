/// Flatten the wind speed inside `rmax` by the factor `(r/rmax)^alpha`.
///
/// Samples at or beyond `rmax` are left untouched.
pub fn apply_eye_adjustment(radii: &[f64], winds: &mut [f64], rmax: f64, alpha: f64) {
    for (r, v) in radii.iter().zip(winds.iter_mut()) {
        if *r < rmax {
            *v *= (r / rmax).powf(alpha);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_the_eye_is_scaled() {
        let radii = [0.0, 10_000.0, 20_000.0, 40_000.0, 80_000.0];
        let mut winds = [0.0, 20.0, 40.0, 50.0, 30.0];
        apply_eye_adjustment(&radii, &mut winds, 40_000.0, 0.15);
        assert_eq!(winds[0], 0.0);
        assert!((winds[1] - 20.0 * 0.25_f64.powf(0.15)).abs() < 1e-12);
        assert!(winds[2] < 40.0);
        assert_eq!(winds[3], 50.0);
        assert_eq!(winds[4], 30.0);
    }

    #[test]
    fn zero_alpha_is_identity() {
        let radii = [0.0, 10_000.0, 20_000.0];
        let mut winds = [0.0, 20.0, 40.0];
        apply_eye_adjustment(&radii, &mut winds, 40_000.0, 0.0);
        assert_eq!(winds, [0.0, 20.0, 40.0]);
    }
}
