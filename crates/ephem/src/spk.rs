//! The SPK kernel reader abstraction and the NAIF integer codes the
//! dispatch tables use.
//!
//! Parsing the DAF/SPK container is a separate component; this crate only
//! consumes its contract: given seconds past J2000 and a target/observer
//! pair, a reader answers with kilometres and kilometres per day in the
//! J2000 equatorial frame, or fails with an out-of-range error. Readers
//! are expected to open their file lazily and to answer purely as a
//! function of `(instant, target, observer)` once open.

use thiserror::Error;

/// One Chebyshev segment advertised by a kernel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpkSegment {
    pub target_id: i32,
    pub observer_id: i32,
    pub jd_start: f64,
    pub jd_end: f64,
    pub record_type: i32,
}

/// Errors produced by a kernel reader.
#[derive(Debug, Error)]
pub enum SpkError {
    #[error("no segment covers target {target_id} / observer {observer_id} at et = {seconds_past_j2000} s")]
    OutOfRange {
        target_id: i32,
        observer_id: i32,
        seconds_past_j2000: f64,
    },
    #[error("kernel read failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Read access to one SPK kernel file.
pub trait SpkReader {
    /// The segment directory of the kernel.
    fn segments(&self) -> Vec<SpkSegment>;

    /// Position (km) and velocity (km/day) of `target_id` relative to
    /// `observer_id` in the J2000 equatorial frame.
    fn state_km(
        &self,
        seconds_past_j2000: f64,
        target_id: i32,
        observer_id: i32,
    ) -> Result<([f64; 3], [f64; 3]), SpkError>;
}

/// Solar-system barycenter.
pub const SSB: i32 = 0;
/// The Sun.
pub const SUN: i32 = 10;
/// Earth-Moon barycenter.
pub const EARTH_MOON_BARYCENTER: i32 = 3;

/// NAIF id of a body, for those the dispatch tables know about.
///
/// Planets use their barycenter codes (the form DE-series kernels carry
/// segments for); Earth and the Moon use their body codes relative to the
/// Earth-Moon barycenter.
pub fn naif_code(body: &str) -> Option<i32> {
    let code = match body {
        "Sun" => SUN,
        "Mercury" => 1,
        "Venus" => 2,
        "Earth" => 399,
        "Moon" => 301,
        "Mars" => 4,
        "Jupiter" => 5,
        "Saturn" => 6,
        "Uranus" => 7,
        "Neptune" => 8,
        "Pluto" => 9,
        "Io" => 501,
        "Europa" => 502,
        "Ganymede" => 503,
        "Callisto" => 504,
        "Mimas" => 601,
        "Enceladus" => 602,
        "Tethys" => 603,
        "Dione" => 604,
        "Rhea" => 605,
        "Titan" => 606,
        "Hyperion" => 607,
        "Iapetus" => 608,
        "Phoebe" => 609,
        "Ariel" => 701,
        "Umbriel" => 702,
        "Titania" => 703,
        "Oberon" => 704,
        "Miranda" => 705,
        "Triton" => 801,
        _ => return None,
    };
    Some(code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_follow_the_naif_scheme() {
        assert_eq!(naif_code("Sun"), Some(10));
        assert_eq!(naif_code("Moon"), Some(301));
        assert_eq!(naif_code("Titan"), Some(606));
        assert_eq!(naif_code("Triton"), Some(801));
        assert_eq!(naif_code("Halley"), None);
    }
}
