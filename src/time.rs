//! Time scales for the almanac calculations.
//!
//! Provides Julian Day conversions in both directions (civil UTC to JD and
//! back) and a ΔT (Delta T) estimator after Espenak & Meeus, used to move
//! between ephemeris time and UTC.

#![allow(clippy::unreadable_literal)]

use crate::math::{floor, polynomial, round};
use crate::{Error, Result};
#[cfg(feature = "chrono")]
use chrono::{Datelike, TimeZone, Timelike};

/// Seconds per day (86,400)
const SECONDS_PER_DAY: f64 = 86_400.0;

/// Julian Day Number for the start of the Gregorian calendar (1582-10-15)
const GREGORIAN_START_JDN: f64 = 2_299_161.0;

/// Julian date representation for astronomical calculations.
///
/// The stored value is referenced to UT1 (treated as UTC here); the
/// associated ΔT gives the offset to Terrestrial Time, so the same value can
/// be read as a Julian Ephemeris Day via [`JulianDate::julian_ephemeris_day`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JulianDate {
    /// Julian Date (JD) - referenced to UT1
    jd: f64,
    /// Delta T in seconds - difference between TT and UT1
    delta_t: f64,
}

impl JulianDate {
    /// Creates a new Julian date from a timezone-aware chrono `DateTime`.
    ///
    /// Converts the datetime to UTC for the Julian Date calculation.
    ///
    /// # Arguments
    /// * `datetime` - Timezone-aware date and time
    /// * `delta_t` - ΔT in seconds (difference between TT and UT1)
    ///
    /// # Errors
    /// Returns error if the date/time components are outside valid ranges.
    #[cfg(feature = "chrono")]
    pub fn from_datetime<Tz: TimeZone>(
        datetime: &chrono::DateTime<Tz>,
        delta_t: f64,
    ) -> Result<Self> {
        let utc = datetime.with_timezone(&chrono::Utc);
        Self::from_utc(
            utc.year(),
            utc.month(),
            utc.day(),
            utc.hour(),
            utc.minute(),
            f64::from(utc.second()) + f64::from(utc.nanosecond()) / 1e9,
            delta_t,
        )
    }

    /// Creates a new Julian date from calendar date and time-of-day in UTC.
    ///
    /// # Arguments
    /// * `year` - Year (can be negative for BCE years)
    /// * `month` - Month (1-12)
    /// * `day` - Day of month (1-31)
    /// * `hour` - Hour (0-23)
    /// * `minute` - Minute (0-59)
    /// * `second` - Second (0-59, can include fractional seconds)
    /// * `delta_t` - ΔT in seconds (difference between TT and UT1)
    ///
    /// # Errors
    /// Returns error if any date/time component is outside valid ranges,
    /// including days dropped by the Gregorian calendar reform
    /// (1582-10-05 through 1582-10-14).
    ///
    /// # Example
    /// ```
    /// # use solar_almanac::time::JulianDate;
    /// let jd = JulianDate::from_utc(2000, 1, 1, 12, 0, 0.0, 0.0).unwrap();
    /// assert_eq!(jd.julian_date(), 2_451_545.0); // J2000.0 epoch
    /// ```
    pub fn from_utc(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: f64,
        delta_t: f64,
    ) -> Result<Self> {
        if !(1..=12).contains(&month) {
            return Err(Error::invalid_datetime("month must be between 1 and 12"));
        }
        if day < 1 || day > days_in_month(year, month, day)? {
            return Err(Error::invalid_datetime("day is out of range for month"));
        }
        if hour > 23 {
            return Err(Error::invalid_datetime("hour must be between 0 and 23"));
        }
        if minute > 59 {
            return Err(Error::invalid_datetime("minute must be between 0 and 59"));
        }
        if !(0.0..60.0).contains(&second) {
            return Err(Error::invalid_datetime(
                "second must be between 0 and 59.999...",
            ));
        }

        let jd = civil_to_julian_day(year, month, day, hour, minute, second);
        Ok(Self { jd, delta_t })
    }

    /// Creates a Julian date directly from a Julian Day value referenced to UT1.
    #[must_use]
    pub const fn from_julian_day(jd: f64, delta_t: f64) -> Self {
        Self { jd, delta_t }
    }

    /// Creates a Julian date from a Julian Ephemeris Day value.
    ///
    /// The ephemeris instant (Terrestrial Time) is shifted back by ΔT so the
    /// stored value is referenced to UT1.
    #[must_use]
    pub fn from_ephemeris_day(jde: f64, delta_t: f64) -> Self {
        Self {
            jd: jde - delta_t / SECONDS_PER_DAY,
            delta_t,
        }
    }

    /// Gets the Julian Date (JD) value, referenced to UT1.
    #[must_use]
    pub const fn julian_date(&self) -> f64 {
        self.jd
    }

    /// Gets the ΔT value in seconds.
    #[must_use]
    pub const fn delta_t(&self) -> f64 {
        self.delta_t
    }

    /// Calculates the Julian Ephemeris Day (JDE): JD + ΔT/86400.
    #[must_use]
    pub fn julian_ephemeris_day(&self) -> f64 {
        self.jd + self.delta_t / SECONDS_PER_DAY
    }

    /// Converts back to calendar date and time-of-day in UTC.
    ///
    /// The time of day is rounded to the nearest whole second.
    #[must_use]
    pub fn to_civil_utc(&self) -> CivilUtc {
        julian_day_to_civil(self.jd)
    }

    /// Converts to a chrono UTC instant, rounded to the nearest whole second.
    ///
    /// # Errors
    /// Returns `ComputationError` if the instant lies outside the range
    /// representable by `chrono` (roughly ±262,000 years).
    #[cfg(feature = "chrono")]
    pub fn to_utc_datetime(&self) -> Result<chrono::DateTime<chrono::Utc>> {
        let civil = self.to_civil_utc();
        chrono::Utc
            .with_ymd_and_hms(
                civil.year,
                civil.month,
                civil.day,
                civil.hour,
                civil.minute,
                civil.second as u32,
            )
            .single()
            .ok_or_else(|| Error::computation_error("instant outside representable range"))
    }
}

/// Calendar date and time-of-day in UTC, as recovered from a Julian Day value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CivilUtc {
    /// Year (can be negative for BCE years)
    pub year: i32,
    /// Month (1-12)
    pub month: u32,
    /// Day of month (1-31)
    pub day: u32,
    /// Hour (0-23)
    pub hour: u32,
    /// Minute (0-59)
    pub minute: u32,
    /// Second (whole seconds after rounding)
    pub second: f64,
}

/// Calculates a Julian Day value from UTC date/time components.
///
/// Follows Meeus, "Astronomical Algorithms", 2nd edition, chapter 7,
/// including the Gregorian calendar correction after 1582-10-15.
fn civil_to_julian_day(year: i32, month: u32, day: u32, hour: u32, minute: u32, second: f64) -> f64 {
    let mut y = f64::from(year);
    let mut m = f64::from(month);

    // January and February count as months 13 and 14 of the previous year
    if m < 3.0 {
        y -= 1.0;
        m += 12.0;
    }

    let d = f64::from(day) + (f64::from(hour) + (f64::from(minute) + second / 60.0) / 60.0) / 24.0;

    let mut jd = floor(365.25 * (y + 4716.0)) + floor(30.6001 * (m + 1.0)) + d - 1524.5;

    if jd >= GREGORIAN_START_JDN {
        let a = floor(y / 100.0);
        jd += 2.0 - a + floor(a / 4.0);
    }

    jd
}

/// Recovers UTC date/time components from a Julian Day value.
///
/// Inverse of [`civil_to_julian_day`], again after Meeus chapter 7. The time
/// of day is rounded to the nearest second, carrying into the next day when
/// the rounding crosses midnight.
fn julian_day_to_civil(jd: f64) -> CivilUtc {
    let mut z = floor(jd + 0.5);
    let f = jd + 0.5 - z;

    let mut seconds = round(f * SECONDS_PER_DAY);
    if seconds >= SECONDS_PER_DAY {
        seconds -= SECONDS_PER_DAY;
        z += 1.0;
    }

    let a = if z < GREGORIAN_START_JDN {
        z
    } else {
        let alpha = floor((z - 1_867_216.25) / 36_524.25);
        z + 1.0 + alpha - floor(alpha / 4.0)
    };

    let b = a + 1524.0;
    let c = floor((b - 122.1) / 365.25);
    let d = floor(365.25 * c);
    let e = floor((b - d) / 30.6001);

    let day = (b - d - floor(30.6001 * e)) as u32;
    let month = if e < 14.0 { e - 1.0 } else { e - 13.0 } as u32;
    let year = if month > 2 { c - 4716.0 } else { c - 4715.0 } as i32;

    let hour = (seconds / 3600.0) as u32;
    let minute = ((seconds % 3600.0) / 60.0) as u32;
    let second = seconds % 60.0;

    CivilUtc {
        year,
        month,
        day,
        hour,
        minute,
        second,
    }
}

const fn is_gregorian_date(year: i32, month: u32, day: u32) -> bool {
    year > 1582 || (year == 1582 && (month > 10 || (month == 10 && day >= 15)))
}

const fn is_leap_year(year: i32, is_gregorian: bool) -> bool {
    if is_gregorian {
        (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
    } else {
        year % 4 == 0
    }
}

fn days_in_month(year: i32, month: u32, day: u32) -> Result<u32> {
    if year == 1582 && month == 10 && (5..=14).contains(&day) {
        return Err(Error::invalid_datetime(
            "dates 1582-10-05 through 1582-10-14 do not exist in Gregorian calendar",
        ));
    }

    let days = match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => {
            if is_leap_year(year, is_gregorian_date(year, month, day)) {
                29
            } else {
                28
            }
        }
        _ => return Err(Error::invalid_datetime("month must be between 1 and 12")),
    };
    Ok(days)
}

/// A polynomial fit segment for the ΔT estimate.
struct DeltaTFit {
    /// Exclusive upper bound (decimal year) for this segment.
    until: f64,
    /// Year the fit argument is measured from.
    origin: f64,
    /// Divisor applied to the year offset (1 for fits in years, 100 for centuries).
    scale: f64,
    /// Polynomial coefficients, lowest order first.
    coeffs: &'static [f64],
}

/// Polynomial fits from Espenak & Meeus, 2014 revision.
/// See: <https://www.eclipsewise.com/help/deltatpoly2014.html>
const DELTA_T_FITS: &[DeltaTFit] = &[
    DeltaTFit {
        until: 500.0,
        origin: 0.0,
        scale: 100.0,
        coeffs: &[
            10583.6,
            -1014.41,
            33.78311,
            -5.952053,
            -0.1798452,
            0.022174192,
            0.0090316521,
        ],
    },
    DeltaTFit {
        until: 1600.0,
        origin: 1000.0,
        scale: 100.0,
        coeffs: &[
            1574.2,
            -556.01,
            71.23472,
            0.319781,
            -0.8503463,
            -0.005050998,
            0.0083572073,
        ],
    },
    DeltaTFit {
        until: 1700.0,
        origin: 1600.0,
        scale: 1.0,
        coeffs: &[120.0, -0.9808, -0.01532, 1.0 / 7129.0],
    },
    DeltaTFit {
        until: 1800.0,
        origin: 1700.0,
        scale: 1.0,
        coeffs: &[8.83, 0.1603, -0.0059285, 0.00013336, -1.0 / 1_174_000.0],
    },
    DeltaTFit {
        until: 1860.0,
        origin: 1800.0,
        scale: 1.0,
        coeffs: &[
            13.72,
            -0.332447,
            0.0068612,
            0.0041116,
            -0.00037436,
            0.0000121272,
            -0.0000001699,
            0.000000000875,
        ],
    },
    DeltaTFit {
        until: 1900.0,
        origin: 1860.0,
        scale: 1.0,
        coeffs: &[
            7.62,
            0.5737,
            -0.251754,
            0.01680668,
            -0.0004473624,
            1.0 / 233_174.0,
        ],
    },
    DeltaTFit {
        until: 1920.0,
        origin: 1900.0,
        scale: 1.0,
        coeffs: &[-2.79, 1.494119, -0.0598939, 0.0061966, -0.000197],
    },
    DeltaTFit {
        until: 1941.0,
        origin: 1920.0,
        scale: 1.0,
        coeffs: &[21.20, 0.84493, -0.076100, 0.0020936],
    },
    DeltaTFit {
        until: 1961.0,
        origin: 1950.0,
        scale: 1.0,
        coeffs: &[29.07, 0.407, -1.0 / 233.0, 1.0 / 2547.0],
    },
    DeltaTFit {
        until: 1986.0,
        origin: 1975.0,
        scale: 1.0,
        coeffs: &[45.45, 1.067, -1.0 / 260.0, -1.0 / 718.0],
    },
    DeltaTFit {
        until: 2005.0,
        origin: 2000.0,
        scale: 1.0,
        coeffs: &[
            63.86,
            0.3345,
            -0.060374,
            0.0017275,
            0.000651814,
            0.00002373599,
        ],
    },
    DeltaTFit {
        until: 2015.0,
        origin: 2005.0,
        scale: 1.0,
        coeffs: &[64.69, 0.2930],
    },
    DeltaTFit {
        until: 3000.0,
        origin: 2015.0,
        scale: 1.0,
        coeffs: &[67.62, 0.3645, 0.0039755],
    },
];

/// ΔT (Delta T) estimation.
///
/// ΔT is the difference between Terrestrial Time (TT) and Universal Time
/// (UT1), needed to convert ephemeris instants to civil time.
pub struct DeltaT;

impl DeltaT {
    /// Estimates ΔT in seconds for a given decimal year.
    ///
    /// Uses the piecewise polynomial fits of Espenak & Meeus (2014 revision)
    /// for years -500 to 3000. Outside that range the long-term parabolic
    /// trend `-20 + 32u²` (u in centuries from 1820) is used instead of
    /// rejecting the input; estimates there carry growing uncertainty.
    ///
    /// # Example
    /// ```
    /// # use solar_almanac::time::DeltaT;
    /// let delta_t = DeltaT::estimate(2024.0);
    /// assert!(delta_t > 60.0 && delta_t < 80.0);
    /// ```
    #[must_use]
    pub fn estimate(decimal_year: f64) -> f64 {
        if (-500.0..=3000.0).contains(&decimal_year) {
            for fit in DELTA_T_FITS {
                if decimal_year < fit.until {
                    let u = (decimal_year - fit.origin) / fit.scale;
                    return polynomial(fit.coeffs, u);
                }
            }
        }

        // Long-term parabola, also used for the final in-range segment bound
        let u = (decimal_year - 1820.0) / 100.0;
        polynomial(&[-20.0, 0.0, 32.0], u)
    }

    /// Estimates ΔT from year and month.
    ///
    /// The decimal year is taken at mid-month: year + (month - 0.5) / 12.
    ///
    /// # Errors
    /// Returns error if month is outside the range 1-12.
    pub fn estimate_from_date(year: i32, month: u32) -> Result<f64> {
        if !(1..=12).contains(&month) {
            return Err(Error::invalid_datetime("month must be between 1 and 12"));
        }

        let decimal_year = f64::from(year) + (f64::from(month) - 0.5) / 12.0;
        Ok(Self::estimate(decimal_year))
    }

    /// Estimates ΔT from any chrono date-like type (`DateTime`, `NaiveDate`, ...).
    ///
    /// # Errors
    /// Returns error if the date components are invalid.
    #[cfg(feature = "chrono")]
    #[allow(clippy::needless_pass_by_value)]
    pub fn estimate_from_date_like<D: Datelike>(date: D) -> Result<f64> {
        Self::estimate_from_date(date.year(), date.month())
    }
}
