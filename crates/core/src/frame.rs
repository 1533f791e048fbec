//! Rotations between the J2000 ecliptic and equatorial reference frames.
//!
//! Both frames share the vernal-equinox x-axis; they differ by a rotation
//! about it through the mean obliquity of the ecliptic at J2000.

use crate::vector::Vector3D;

/// Mean obliquity of the ecliptic at J2000.0 (degrees).
pub const OBLIQUITY_J2000_DEG: f64 = 23.43678;

/// Rotate a vector from the J2000 ecliptic frame into the equatorial frame.
pub fn equatorial_from_ecliptic(v: &Vector3D) -> Vector3D {
    let eps = OBLIQUITY_J2000_DEG.to_radians();
    let (sin_eps, cos_eps) = eps.sin_cos();
    Vector3D::new(
        v.x,
        cos_eps * v.y - sin_eps * v.z,
        sin_eps * v.y + cos_eps * v.z,
    )
}

/// Rotate a vector from the J2000 equatorial frame into the ecliptic frame.
/// Exact inverse of [`equatorial_from_ecliptic`].
pub fn ecliptic_from_equatorial(v: &Vector3D) -> Vector3D {
    let eps = OBLIQUITY_J2000_DEG.to_radians();
    let (sin_eps, cos_eps) = eps.sin_cos();
    Vector3D::new(
        v.x,
        cos_eps * v.y + sin_eps * v.z,
        -sin_eps * v.y + cos_eps * v.z,
    )
}

/// Unit vector in the ecliptic frame for a pole given by its equatorial
/// right ascension and declination (degrees). Used for planet spin axes.
pub fn pole_direction_ecliptic(ra_deg: f64, dec_deg: f64) -> Vector3D {
    let ra = ra_deg.to_radians();
    let dec = dec_deg.to_radians();
    let equatorial = Vector3D::new(
        dec.cos() * ra.cos(),
        dec.cos() * ra.sin(),
        dec.sin(),
    );
    ecliptic_from_equatorial(&equatorial)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::ASTRONOMICAL_UNIT_M;

    #[test]
    fn obliquity_rotation_round_trips() {
        let v = Vector3D::new(
            0.3 * ASTRONOMICAL_UNIT_M,
            -1.2 * ASTRONOMICAL_UNIT_M,
            0.04 * ASTRONOMICAL_UNIT_M,
        );
        let round_trip = ecliptic_from_equatorial(&equatorial_from_ecliptic(&v));
        assert!(
            round_trip.distance(&v) < 1e-10 * ASTRONOMICAL_UNIT_M,
            "round trip moved the vector by {} m",
            round_trip.distance(&v)
        );
    }

    #[test]
    fn x_axis_is_shared() {
        let v = Vector3D::new(1.0, 0.0, 0.0);
        assert_eq!(equatorial_from_ecliptic(&v), v);
        assert_eq!(ecliptic_from_equatorial(&v), v);
    }

    #[test]
    fn ecliptic_north_tilts_by_obliquity() {
        let north = Vector3D::new(0.0, 0.0, 1.0);
        let rotated = equatorial_from_ecliptic(&north);
        let expected_z = OBLIQUITY_J2000_DEG.to_radians().cos();
        assert!((rotated.z - expected_z).abs() < 1e-15);
    }
}
