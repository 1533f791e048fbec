//! Conversions between osculating elements and Cartesian states.
//!
//! Elements come in as degrees and AU; states go out in metres and metres
//! per second, in the frame the elements are referred to (heliocentric
//! J2000 ecliptic for planets, planetocentric for moon fallbacks).

use orrery_core::constants::ASTRONOMICAL_UNIT_M;
use orrery_core::vector::Vector3D;

use crate::elements::{normalize_degrees, OrbitalElements};
use crate::solve::{self, ConvergenceError, NEWTON_TOLERANCE};

/// Eccentricity below which the argument of perihelion is reported as zero.
const CIRCULAR_THRESHOLD: f64 = 1.0e-12;

/// Inclination (radians) below which the ascending node is reported as zero.
const EQUATORIAL_THRESHOLD: f64 = 1.0e-12;

/// Position and velocity from osculating elements around a center with
/// standard gravitational parameter `mu_m3_s2`.
///
/// The velocity is the analytic two-body derivative, not a numerical
/// difference.
pub fn position_velocity_from_elements(
    elements: &OrbitalElements,
    mu_m3_s2: f64,
) -> Result<(Vector3D, Vector3D), ConvergenceError> {
    let a = elements.semi_major_axis_au * ASTRONOMICAL_UNIT_M;
    let e = elements.eccentricity;
    let m = elements.mean_anomaly_deg.to_radians();
    let big_e = solve::newton_raphson(m, e, NEWTON_TOLERANCE)?;
    let (sin_e, cos_e) = big_e.sin_cos();
    let axis_ratio = (1.0 - e * e).sqrt();

    // In-plane coordinates with x towards perihelion.
    let x_orbit = a * (cos_e - e);
    let y_orbit = a * axis_ratio * sin_e;

    // dE/dt from Kepler's equation, then the in-plane velocity.
    let mean_motion = (mu_m3_s2 / (a * a * a)).sqrt();
    let e_dot = mean_motion / (1.0 - e * cos_e);
    let vx_orbit = -a * sin_e * e_dot;
    let vy_orbit = a * axis_ratio * cos_e * e_dot;

    let rotation = OrbitPlane::from_elements(elements);
    Ok((
        rotation.to_ecliptic(x_orbit, y_orbit),
        rotation.to_ecliptic(vx_orbit, vy_orbit),
    ))
}

/// Position only; convenience wrapper over
/// [`position_velocity_from_elements`].
pub fn position_from_elements(
    elements: &OrbitalElements,
    mu_m3_s2: f64,
) -> Result<Vector3D, ConvergenceError> {
    position_velocity_from_elements(elements, mu_m3_s2).map(|(position, _)| position)
}

/// Osculating elements from a Cartesian state around a center with
/// standard gravitational parameter `mu_m3_s2`.
///
/// Degenerate geometries are resolved deterministically: a circular orbit
/// reports ω = 0 and measures the mean anomaly from the node, an
/// equatorial orbit reports Ω = 0 and measures from the x-axis.
pub fn elements_from_position_velocity(
    position: &Vector3D,
    velocity: &Vector3D,
    mu_m3_s2: f64,
) -> OrbitalElements {
    let r = position.norm();
    let speed_squared = velocity.norm_squared();

    // Specific angular momentum and node vector k × h.
    let h = position.cross(velocity);
    let h_norm = h.norm();
    let node = Vector3D::new(-h.y, h.x, 0.0);
    let node_norm = node.norm();

    // Eccentricity vector points from focus to perihelion.
    let e_vec = ((speed_squared - mu_m3_s2 / r) * *position
        - position.dot(velocity) * *velocity)
        * (1.0 / mu_m3_s2);
    let eccentricity = e_vec.norm();

    let semi_major_axis_m = 1.0 / (2.0 / r - speed_squared / mu_m3_s2);
    let inclination = (h.x * h.x + h.y * h.y).sqrt().atan2(h.z);
    let equatorial = inclination < EQUATORIAL_THRESHOLD;
    let circular = eccentricity < CIRCULAR_THRESHOLD;

    let long_asc_node = if equatorial {
        0.0
    } else {
        node.y.atan2(node.x)
    };

    // Reference direction in the orbit plane from which perihelion and the
    // body itself are measured: the node line, or the x-axis when the node
    // is undefined.
    let reference = if equatorial {
        Vector3D::new(1.0, 0.0, 0.0)
    } else {
        node * (1.0 / node_norm)
    };

    let arg_perihelion = if circular {
        0.0
    } else {
        in_plane_angle(&reference, &e_vec, &h, h_norm)
    };

    let true_anomaly = if circular {
        // Argument of latitude stands in for the true anomaly.
        in_plane_angle(&reference, position, &h, h_norm)
    } else {
        in_plane_angle(&(e_vec * (1.0 / eccentricity)), position, &h, h_norm)
    };

    // Eccentric and mean anomaly from the true anomaly.
    let axis_ratio = (1.0 - eccentricity * eccentricity).sqrt();
    let (sin_nu, cos_nu) = true_anomaly.sin_cos();
    let big_e = (axis_ratio * sin_nu).atan2(eccentricity + cos_nu);
    let mean_anomaly = big_e - eccentricity * big_e.sin();

    OrbitalElements {
        semi_major_axis_au: semi_major_axis_m / ASTRONOMICAL_UNIT_M,
        eccentricity,
        inclination_deg: inclination.to_degrees(),
        mean_anomaly_deg: normalize_degrees(mean_anomaly.to_degrees()),
        arg_perihelion_deg: normalize_degrees(arg_perihelion.to_degrees()),
        long_asc_node_deg: normalize_degrees(long_asc_node.to_degrees()),
    }
}

/// Sampled orbit curve: a closed ring of 360 equally spaced true-anomaly
/// samples, used by callers for display purposes.
pub fn sample_orbit(
    elements: &OrbitalElements,
) -> Vec<Vector3D> {
    let a = elements.semi_major_axis_au * ASTRONOMICAL_UNIT_M;
    let e = elements.eccentricity;
    let semi_latus_rectum = a * (1.0 - e * e);
    let rotation = OrbitPlane::from_elements(elements);
    (0..360)
        .map(|step| {
            let nu = f64::from(step).to_radians();
            let (sin_nu, cos_nu) = nu.sin_cos();
            let radius = semi_latus_rectum / (1.0 + e * cos_nu);
            rotation.to_ecliptic(radius * cos_nu, radius * sin_nu)
        })
        .collect()
}

/// Orbit curve directly from a Cartesian state.
pub fn sample_orbit_from_state(
    position: &Vector3D,
    velocity: &Vector3D,
    mu_m3_s2: f64,
) -> Vec<Vector3D> {
    sample_orbit(&elements_from_position_velocity(position, velocity, mu_m3_s2))
}

/// Signed angle from `from` to `to` around the orbit normal `h`.
fn in_plane_angle(from: &Vector3D, to: &Vector3D, h: &Vector3D, h_norm: f64) -> f64 {
    let sin_component = from.cross(to).dot(h) / h_norm;
    let cos_component = from.dot(to);
    sin_component.atan2(cos_component)
}

/// Rotation from the orbit plane (x towards perihelion) into the ecliptic.
struct OrbitPlane {
    row_x: (f64, f64),
    row_y: (f64, f64),
    row_z: (f64, f64),
}

impl OrbitPlane {
    fn from_elements(elements: &OrbitalElements) -> Self {
        let (sin_w, cos_w) = elements.arg_perihelion_deg.to_radians().sin_cos();
        let (sin_o, cos_o) = elements.long_asc_node_deg.to_radians().sin_cos();
        let (sin_i, cos_i) = elements.inclination_deg.to_radians().sin_cos();
        OrbitPlane {
            row_x: (
                cos_w * cos_o - sin_w * sin_o * cos_i,
                -sin_w * cos_o - cos_w * sin_o * cos_i,
            ),
            row_y: (
                cos_w * sin_o + sin_w * cos_o * cos_i,
                -sin_w * sin_o + cos_w * cos_o * cos_i,
            ),
            row_z: (sin_w * sin_i, cos_w * sin_i),
        }
    }

    fn to_ecliptic(&self, x_orbit: f64, y_orbit: f64) -> Vector3D {
        Vector3D::new(
            self.row_x.0 * x_orbit + self.row_x.1 * y_orbit,
            self.row_y.0 * x_orbit + self.row_y.1 * y_orbit,
            self.row_z.0 * x_orbit + self.row_z.1 * y_orbit,
        )
    }
}
