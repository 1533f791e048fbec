//! Solvers for Kepler's equation M = E - e·sin E.
//!
//! Three schemes are provided, selectable by the caller: fixed-point
//! iteration (robust, slow for high eccentricities), Newton–Raphson, and
//! Halley's method. All take the mean anomaly in radians and return the
//! eccentric anomaly in radians; convergence is judged on the residual
//! M - (E - e·sin E).

use thiserror::Error;

/// Tolerance conventionally used with [`fixed_point`].
pub const FIXED_POINT_TOLERANCE: f64 = 1.0e-8;

/// Tolerance conventionally used with [`newton_raphson`] and [`halley`].
pub const NEWTON_TOLERANCE: f64 = 1.0e-14;

const MAX_FIXED_POINT_ITERATIONS: u32 = 100_000;
const MAX_NEWTON_ITERATIONS: u32 = 100;

/// A Kepler solver failed to reach the requested residual.
#[derive(Debug, Clone, Error)]
#[error(
    "Kepler solver did not converge within {iterations} iterations \
     (M = {mean_anomaly_rad} rad, e = {eccentricity})"
)]
pub struct ConvergenceError {
    pub mean_anomaly_rad: f64,
    pub eccentricity: f64,
    pub iterations: u32,
}

/// Fixed-point iteration E ← M + e·sin E.
pub fn fixed_point(
    mean_anomaly_rad: f64,
    eccentricity: f64,
    max_error: f64,
) -> Result<f64, ConvergenceError> {
    let m = mean_anomaly_rad;
    let e = eccentricity;
    let mut big_e = m;
    for _ in 0..MAX_FIXED_POINT_ITERATIONS {
        if (m - (big_e - e * big_e.sin())).abs() < max_error {
            return Ok(big_e);
        }
        big_e = m + e * big_e.sin();
    }
    Err(ConvergenceError {
        mean_anomaly_rad: m,
        eccentricity: e,
        iterations: MAX_FIXED_POINT_ITERATIONS,
    })
}

/// Newton–Raphson iteration on f(E) = E - e·sin E - M.
pub fn newton_raphson(
    mean_anomaly_rad: f64,
    eccentricity: f64,
    max_error: f64,
) -> Result<f64, ConvergenceError> {
    let m = mean_anomaly_rad;
    let e = eccentricity;
    // Starting near pi avoids the slow branch for highly eccentric orbits.
    let mut big_e = if e < 0.8 { m } else { std::f64::consts::PI };
    for _ in 0..MAX_NEWTON_ITERATIONS {
        let f = big_e - e * big_e.sin() - m;
        if f.abs() < max_error {
            return Ok(big_e);
        }
        big_e -= f / (1.0 - e * big_e.cos());
    }
    Err(ConvergenceError {
        mean_anomaly_rad: m,
        eccentricity: e,
        iterations: MAX_NEWTON_ITERATIONS,
    })
}

/// Halley's method, third-order variant of the Newton iteration.
pub fn halley(
    mean_anomaly_rad: f64,
    eccentricity: f64,
    max_error: f64,
) -> Result<f64, ConvergenceError> {
    let m = mean_anomaly_rad;
    let e = eccentricity;
    let mut big_e = if e < 0.8 { m } else { std::f64::consts::PI };
    for _ in 0..MAX_NEWTON_ITERATIONS {
        let (sin_e, cos_e) = big_e.sin_cos();
        let f = big_e - e * sin_e - m;
        if f.abs() < max_error {
            return Ok(big_e);
        }
        let fp = 1.0 - e * cos_e;
        let fpp = e * sin_e;
        big_e -= 2.0 * f * fp / (2.0 * fp * fp - f * fpp);
    }
    Err(ConvergenceError {
        mean_anomaly_rad: m,
        eccentricity: e,
        iterations: MAX_NEWTON_ITERATIONS,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn residual(big_e: f64, e: f64, m: f64) -> f64 {
        (m - (big_e - e * big_e.sin())).abs()
    }

    #[test]
    fn fixed_point_meets_its_tolerance() {
        let mut e = 0.0;
        while e < 1.0 {
            for m_deg in 0..360 {
                let m = (m_deg as f64).to_radians();
                let big_e = fixed_point(m, e, FIXED_POINT_TOLERANCE).unwrap();
                assert!(residual(big_e, e, m) < FIXED_POINT_TOLERANCE);
            }
            e += 0.05;
        }
    }

    #[test]
    fn newton_raphson_meets_its_tolerance() {
        let mut e = 0.0;
        while e < 1.0 {
            for m_deg in 0..360 {
                let m = (m_deg as f64).to_radians();
                let big_e = newton_raphson(m, e, NEWTON_TOLERANCE).unwrap();
                assert!(residual(big_e, e, m) < NEWTON_TOLERANCE);
            }
            e += 0.05;
        }
    }

    #[test]
    fn halley_meets_its_tolerance() {
        let mut e = 0.0;
        while e < 1.0 {
            for m_deg in 0..360 {
                let m = (m_deg as f64).to_radians();
                let big_e = halley(m, e, NEWTON_TOLERANCE).unwrap();
                assert!(residual(big_e, e, m) < NEWTON_TOLERANCE);
            }
            e += 0.05;
        }
    }

    #[test]
    fn circular_orbit_is_identity() {
        for m_deg in [0.0, 45.0, 123.0, 359.0] {
            let m = f64::to_radians(m_deg);
            assert_eq!(newton_raphson(m, 0.0, NEWTON_TOLERANCE).unwrap(), m);
        }
    }
}
