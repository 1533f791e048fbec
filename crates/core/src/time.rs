//! Time scales: seconds past J2000, Julian dates, and the proleptic
//! Gregorian calendar.
//!
//! All internal arithmetic works in seconds past the J2000.0 epoch
//! (JD 2451545.0, 2000-01-01 12:00 UTC) as a signed f64; calendar dates
//! appear only at the API edges. Years follow astronomical numbering, so
//! 3000 BC is year -2999 and the proleptic Gregorian rules extend before
//! 1582.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::{DAYS_PER_CENTURY, J2000_JD, SECONDS_PER_DAY};

const MILLIS_PER_DAY: i64 = 86_400_000;
const NOON_MILLIS: i64 = 43_200_000;
const J2000_JDN: i64 = 2_451_545;

/// A UTC civil date and time with millisecond precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarDate {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    #[serde(default)]
    pub hour: u32,
    #[serde(default)]
    pub minute: u32,
    #[serde(default)]
    pub second: u32,
    #[serde(default)]
    pub millisecond: u32,
}

impl CalendarDate {
    pub fn new(year: i32, month: u32, day: u32, hour: u32, minute: u32, second: u32) -> Self {
        Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
            millisecond: 0,
        }
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02} {:02}:{:02}:{:02}.{:03}",
            self.year, self.month, self.day, self.hour, self.minute, self.second, self.millisecond
        )
    }
}

/// An instant in time, stored as seconds past J2000.0.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Instant {
    seconds_past_j2000: f64,
}

impl Instant {
    /// The J2000.0 epoch itself.
    pub const J2000: Instant = Instant {
        seconds_past_j2000: 0.0,
    };

    pub fn from_seconds_past_j2000(seconds: f64) -> Self {
        Self {
            seconds_past_j2000: seconds,
        }
    }

    pub fn seconds_past_j2000(&self) -> f64 {
        self.seconds_past_j2000
    }

    pub fn from_julian_date(jd: f64) -> Self {
        Self::from_seconds_past_j2000((jd - J2000_JD) * SECONDS_PER_DAY)
    }

    pub fn julian_date(&self) -> f64 {
        J2000_JD + self.seconds_past_j2000 / SECONDS_PER_DAY
    }

    /// Julian centuries past J2000.0.
    pub fn centuries_past_j2000(&self) -> f64 {
        self.seconds_past_j2000 / (SECONDS_PER_DAY * DAYS_PER_CENTURY)
    }

    /// Julian days past J2000.0.
    pub fn days_past_j2000(&self) -> f64 {
        self.seconds_past_j2000 / SECONDS_PER_DAY
    }

    /// This instant shifted by a signed number of seconds.
    pub fn plus_seconds(&self, seconds: f64) -> Self {
        Self::from_seconds_past_j2000(self.seconds_past_j2000 + seconds)
    }

    /// Construct from a UTC calendar date.
    ///
    /// The day number is summed exactly before the sub-day part is added,
    /// so calendar round trips are stable over the whole ±3000-year domain.
    pub fn from_calendar(date: &CalendarDate) -> Self {
        let jdn = julian_day_number(date.year, date.month, date.day);
        let ms_of_day = i64::from(date.hour) * 3_600_000
            + i64::from(date.minute) * 60_000
            + i64::from(date.second) * 1_000
            + i64::from(date.millisecond);
        let seconds =
            ((jdn - J2000_JDN) * 86_400) as f64 + (ms_of_day - NOON_MILLIS) as f64 / 1_000.0;
        Self::from_seconds_past_j2000(seconds)
    }

    /// Convenience constructor for whole-second UTC dates.
    pub fn from_utc(year: i32, month: u32, day: u32, hour: u32, minute: u32, second: u32) -> Self {
        Self::from_calendar(&CalendarDate::new(year, month, day, hour, minute, second))
    }

    /// Convert back to a UTC calendar date, rounded to the nearest
    /// millisecond.
    pub fn to_calendar(&self) -> CalendarDate {
        let total_ms = (self.seconds_past_j2000 * 1_000.0).round() as i64 + NOON_MILLIS;
        let day_offset = total_ms.div_euclid(MILLIS_PER_DAY);
        let ms_of_day = total_ms.rem_euclid(MILLIS_PER_DAY);
        let (year, month, day) = calendar_from_julian_day_number(J2000_JDN + day_offset);
        CalendarDate {
            year,
            month,
            day,
            hour: (ms_of_day / 3_600_000) as u32,
            minute: (ms_of_day % 3_600_000 / 60_000) as u32,
            second: (ms_of_day % 60_000 / 1_000) as u32,
            millisecond: (ms_of_day % 1_000) as u32,
        }
    }
}

impl fmt::Display for Instant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_calendar())
    }
}

/// Julian day number (the day starting at the preceding noon) of a
/// proleptic Gregorian date.
fn julian_day_number(year: i32, month: u32, day: u32) -> i64 {
    let a = (14 - month as i64).div_euclid(12);
    let y = year as i64 + 4_800 - a;
    let m = month as i64 + 12 * a - 3;
    day as i64
        + (153 * m + 2).div_euclid(5)
        + 365 * y
        + y.div_euclid(4)
        - y.div_euclid(100)
        + y.div_euclid(400)
        - 32_045
}

fn calendar_from_julian_day_number(jdn: i64) -> (i32, u32, u32) {
    let a = jdn + 32_044;
    let b = (4 * a + 3).div_euclid(146_097);
    let c = a - (146_097 * b).div_euclid(4);
    let d = (4 * c + 3).div_euclid(1_461);
    let e = c - (1_461 * d).div_euclid(4);
    let m = (5 * e + 2).div_euclid(153);
    let day = e - (153 * m + 2).div_euclid(5) + 1;
    let month = m + 3 - 12 * m.div_euclid(10);
    let year = 100 * b + d - 4_800 + m.div_euclid(10);
    (year as i32, month as u32, day as u32)
}
