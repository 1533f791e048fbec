//! Physical and astronomical constants expressed in SI units (unless stated otherwise).

/// Astronomical unit (m). DE-series value; kept consistent with the element tables.
pub const ASTRONOMICAL_UNIT_M: f64 = 1.495_978_706_91e11;

/// Speed of light in vacuum (m/s).
pub const SPEED_OF_LIGHT_M_S: f64 = 299_792_458.0;

/// Newtonian constant of gravitation (m³ kg⁻¹ s⁻²).
///
/// Used only for bodies without a measured standard gravitational
/// parameter; μ = G·M is known to greater accuracy than either factor.
pub const GRAVITATIONAL_CONSTANT: f64 = 6.674_30e-11;

/// Seconds per Julian day.
pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// Days per Julian century.
pub const DAYS_PER_CENTURY: f64 = 36_525.0;

/// Julian date of the J2000.0 epoch (2000-01-01 12:00).
pub const J2000_JD: f64 = 2_451_545.0;
