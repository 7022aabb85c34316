//! Solstice and equinox calculations.
//!
//! Implements the low-precision seasonal marker algorithm from Meeus,
//! *Astronomical Algorithms*, 2nd edition, chapter 27: a polynomial for the
//! mean event instant as a function of the year, corrected by a 24-term
//! periodic series and by ΔT to land in civil (UTC) time.
//!
//! Accuracy is well under a minute for years within a couple of centuries of
//! J2000. The polynomial fits cover roughly -1000 to +3000; more distant
//! years are not rejected but their results grow steadily less accurate.

#![allow(clippy::unreadable_literal)]

use crate::math::{cos, degrees_to_radians, polynomial};
use crate::time::{DeltaT, JulianDate};
#[cfg(feature = "chrono")]
use crate::Result;
#[cfg(feature = "chrono")]
use chrono::{DateTime, Datelike, Utc};

/// Julian Day Number for J2000.0 epoch (2000-01-01 12:00:00 UTC)
const J2000_JDN: f64 = 2_451_545.0;

/// Days per Julian century
const DAYS_PER_CENTURY: f64 = 36_525.0;

/// One of the four seasonal markers of a calendar year.
///
/// Solstices and equinoxes are global instants; the same marker is the start
/// of opposite seasons in the two hemispheres, so they are named by month
/// rather than by season.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SeasonalMarker {
    /// Sun crosses the celestial equator heading north (March 19-21 UTC).
    MarchEquinox,
    /// Sun reaches its northernmost declination (June 20-21 UTC).
    JuneSolstice,
    /// Sun crosses the celestial equator heading south (September 21-24 UTC).
    SeptemberEquinox,
    /// Sun reaches its southernmost declination (December 20-23 UTC).
    DecemberSolstice,
}

impl SeasonalMarker {
    /// All four markers, in the order they occur within a year.
    pub const ALL: [Self; 4] = [
        Self::MarchEquinox,
        Self::JuneSolstice,
        Self::SeptemberEquinox,
        Self::DecemberSolstice,
    ];

    /// The calendar month (UTC) in which this marker always falls.
    #[must_use]
    pub const fn month(self) -> u32 {
        match self {
            Self::MarchEquinox => 3,
            Self::JuneSolstice => 6,
            Self::SeptemberEquinox => 9,
            Self::DecemberSolstice => 12,
        }
    }

    const fn table_index(self) -> usize {
        match self {
            Self::MarchEquinox => 0,
            Self::JuneSolstice => 1,
            Self::SeptemberEquinox => 2,
            Self::DecemberSolstice => 3,
        }
    }
}

impl core::fmt::Display for SeasonalMarker {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let name = match self {
            Self::MarchEquinox => "March equinox",
            Self::JuneSolstice => "June solstice",
            Self::SeptemberEquinox => "September equinox",
            Self::DecemberSolstice => "December solstice",
        };
        f.write_str(name)
    }
}

/// Mean event JDE polynomials for years -1000 to +1000 (Meeus Table 27.A).
///
/// Argument is year/1000; rows follow [`SeasonalMarker::ALL`] order.
const MEAN_EVENT_EARLY: [[f64; 5]; 4] = [
    [1721139.29189, 365242.13740, 0.06134, 0.00111, -0.00071],
    [1721233.25401, 365241.72562, -0.05323, 0.00907, 0.00025],
    [1721325.70455, 365242.49558, -0.11677, -0.00297, 0.00074],
    [1721414.39987, 365242.88257, -0.00769, -0.00933, -0.00006],
];

/// Mean event JDE polynomials for years +1000 to +3000 (Meeus Table 27.B).
///
/// Argument is (year - 2000)/1000; rows follow [`SeasonalMarker::ALL`] order.
const MEAN_EVENT_MODERN: [[f64; 5]; 4] = [
    [2451623.80984, 365242.37404, 0.05169, -0.00411, -0.00057],
    [2451716.56767, 365241.62603, 0.00325, 0.00888, -0.00030],
    [2451810.21715, 365242.01767, -0.11575, 0.00337, 0.00078],
    [2451900.05952, 365242.74049, -0.06223, -0.00823, 0.00032],
];

/// Periodic correction terms (A, B, C) from Meeus Table 27.C.
///
/// The correction is S = Σ A·cos(B + C·T) with B, C·T in degrees and T in
/// Julian centuries from J2000.
const PERIODIC_TERMS: [(f64, f64, f64); 24] = [
    (485.0, 324.96, 1934.136),
    (203.0, 337.23, 32964.467),
    (199.0, 342.08, 20.186),
    (182.0, 27.85, 445267.112),
    (156.0, 73.14, 45036.886),
    (136.0, 171.52, 22518.443),
    (77.0, 222.54, 65928.934),
    (74.0, 296.72, 3034.906),
    (70.0, 243.58, 9037.513),
    (58.0, 119.81, 33718.147),
    (52.0, 297.17, 150.678),
    (50.0, 21.02, 2281.226),
    (45.0, 247.54, 29929.562),
    (44.0, 325.15, 31555.956),
    (29.0, 60.93, 4443.417),
    (18.0, 155.12, 67555.328),
    (17.0, 288.79, 4562.452),
    (16.0, 198.04, 62894.029),
    (14.0, 199.76, 31436.921),
    (12.0, 95.39, 14577.848),
    (12.0, 287.11, 31931.756),
    (12.0, 320.81, 34777.259),
    (9.0, 227.73, 1222.114),
    (8.0, 15.45, 16859.074),
];

/// Mean (uncorrected) event instant as a Julian Ephemeris Day.
fn mean_event_jde(marker: SeasonalMarker, year: i32) -> f64 {
    let idx = marker.table_index();
    if year < 1000 {
        polynomial(&MEAN_EVENT_EARLY[idx], f64::from(year) / 1000.0)
    } else {
        polynomial(&MEAN_EVENT_MODERN[idx], f64::from(year - 2000) / 1000.0)
    }
}

/// Calculates a seasonal marker instant as a [`JulianDate`].
///
/// This is the numeric core of the calculator and works without `chrono`.
/// The returned value is referenced to UT1/UTC; the ΔT used for the
/// ephemeris-to-civil conversion is available via [`JulianDate::delta_t`].
///
/// # Example
/// ```
/// # use solar_almanac::seasons::{self, SeasonalMarker};
/// let jd = seasons::marker_julian_date(SeasonalMarker::JuneSolstice, 2024);
/// let civil = jd.to_civil_utc();
/// assert_eq!((civil.year, civil.month, civil.day), (2024, 6, 20));
/// ```
#[must_use]
pub fn marker_julian_date(marker: SeasonalMarker, year: i32) -> JulianDate {
    let jde0 = mean_event_jde(marker, year);
    let t = (jde0 - J2000_JDN) / DAYS_PER_CENTURY;

    // Solar mean anomaly term scaling the periodic correction
    let w = degrees_to_radians(35999.373 * t - 2.47);
    let delta_lambda = 1.0 + 0.0334 * cos(w) + 0.0007 * cos(2.0 * w);

    let mut s = 0.0;
    for &(a, b, c) in &PERIODIC_TERMS {
        s += a * cos(degrees_to_radians(b + c * t));
    }

    let jde = jde0 + 0.00001 * s / delta_lambda;

    let delta_t = DeltaT::estimate(f64::from(year) + (f64::from(marker.month()) - 0.5) / 12.0);
    JulianDate::from_ephemeris_day(jde, delta_t)
}

/// Calculates a seasonal marker instant as a UTC datetime.
///
/// # Errors
/// Returns error only if the instant cannot be represented by `chrono`
/// (years beyond roughly ±262,000).
#[cfg(feature = "chrono")]
pub fn marker_time(marker: SeasonalMarker, year: i32) -> Result<DateTime<Utc>> {
    marker_julian_date(marker, year).to_utc_datetime()
}

/// Instant of the March equinox of the given year, in UTC.
///
/// # Errors
/// Returns error only if the instant cannot be represented by `chrono`.
///
/// # Example
/// ```
/// # use chrono::Datelike;
/// let equinox = solar_almanac::seasons::march_equinox(2024).unwrap();
/// assert_eq!((equinox.month(), equinox.day()), (3, 20));
/// ```
#[cfg(feature = "chrono")]
pub fn march_equinox(year: i32) -> Result<DateTime<Utc>> {
    marker_time(SeasonalMarker::MarchEquinox, year)
}

/// Instant of the June solstice of the given year, in UTC.
///
/// # Errors
/// Returns error only if the instant cannot be represented by `chrono`.
#[cfg(feature = "chrono")]
pub fn june_solstice(year: i32) -> Result<DateTime<Utc>> {
    marker_time(SeasonalMarker::JuneSolstice, year)
}

/// Instant of the September equinox of the given year, in UTC.
///
/// # Errors
/// Returns error only if the instant cannot be represented by `chrono`.
#[cfg(feature = "chrono")]
pub fn september_equinox(year: i32) -> Result<DateTime<Utc>> {
    marker_time(SeasonalMarker::SeptemberEquinox, year)
}

/// Instant of the December solstice of the given year, in UTC.
///
/// # Errors
/// Returns error only if the instant cannot be represented by `chrono`.
#[cfg(feature = "chrono")]
pub fn december_solstice(year: i32) -> Result<DateTime<Utc>> {
    marker_time(SeasonalMarker::DecemberSolstice, year)
}

/// A seasonal marker together with its computed UTC instant.
#[cfg(feature = "chrono")]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkerInstant {
    marker: SeasonalMarker,
    time: DateTime<Utc>,
}

#[cfg(feature = "chrono")]
impl MarkerInstant {
    /// Which seasonal marker this is.
    #[must_use]
    pub const fn marker(&self) -> SeasonalMarker {
        self.marker
    }

    /// The marker's instant in UTC.
    #[must_use]
    pub const fn time(&self) -> DateTime<Utc> {
        self.time
    }
}

/// Calculates a [`MarkerInstant`] for the given marker and year.
///
/// # Errors
/// Returns error only if the instant cannot be represented by `chrono`.
#[cfg(feature = "chrono")]
pub fn marker_instant(marker: SeasonalMarker, year: i32) -> Result<MarkerInstant> {
    Ok(MarkerInstant {
        marker,
        time: marker_time(marker, year)?,
    })
}

/// All seasonal markers of the year before, the year of, and the year after
/// the reference instant, in ascending order.
///
/// The window therefore spans at least one full year on each side of the
/// reference instant. Markers occur in a fixed order within a year and the
/// December solstice always precedes the following March equinox, so the
/// construction order is already chronological.
///
/// # Errors
/// Returns error only if an instant cannot be represented by `chrono`.
#[cfg(feature = "chrono")]
pub fn recent_markers(around: DateTime<Utc>) -> Result<[MarkerInstant; 12]> {
    let placeholder = MarkerInstant {
        marker: SeasonalMarker::MarchEquinox,
        time: around,
    };
    let mut markers = [placeholder; 12];

    let mut i = 0;
    for year in (around.year() - 1)..=(around.year() + 1) {
        for marker in SeasonalMarker::ALL {
            markers[i] = marker_instant(marker, year)?;
            i += 1;
        }
    }

    Ok(markers)
}

/// The earliest seasonal marker strictly after the reference instant.
///
/// A reference instant that coincides exactly with a marker is excluded;
/// the marker after it is returned instead.
///
/// # Errors
/// Returns error only if an instant cannot be represented by `chrono`.
///
/// # Panics
/// Panics if the marker window fails to bracket the reference instant,
/// which the ±1-year span rules out; such a panic indicates a defect in the
/// window construction, not a runtime condition.
#[cfg(feature = "chrono")]
pub fn next_marker(after: DateTime<Utc>) -> Result<MarkerInstant> {
    let markers = recent_markers(after)?;
    let found = markers
        .iter()
        .find(|m| m.time() > after)
        .copied()
        .expect("marker window extends a full year past the reference instant");
    Ok(found)
}

/// The latest seasonal marker strictly before the reference instant.
///
/// A reference instant that coincides exactly with a marker is excluded;
/// the marker before it is returned instead.
///
/// # Errors
/// Returns error only if an instant cannot be represented by `chrono`.
///
/// # Panics
/// Panics if the marker window fails to bracket the reference instant,
/// which the ±1-year span rules out; such a panic indicates a defect in the
/// window construction, not a runtime condition.
#[cfg(feature = "chrono")]
pub fn previous_marker(before: DateTime<Utc>) -> Result<MarkerInstant> {
    let markers = recent_markers(before)?;
    let found = markers
        .iter()
        .rev()
        .find(|m| m.time() < before)
        .copied()
        .expect("marker window extends a full year before the reference instant");
    Ok(found)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marker_months_numeric_core() {
        for year in [1800, 1900, 2000, 2024, 2100] {
            for marker in SeasonalMarker::ALL {
                let civil = marker_julian_date(marker, year).to_civil_utc();
                assert_eq!(civil.year, year);
                assert_eq!(
                    civil.month,
                    marker.month(),
                    "{marker} of {year} landed in month {}",
                    civil.month
                );
            }
        }
    }

    #[test]
    fn test_markers_ordered_within_year() {
        for year in [1850, 1950, 2024, 2150] {
            let jds: [f64; 4] = SeasonalMarker::ALL
                .map(|marker| marker_julian_date(marker, year).julian_date());
            assert!(jds[0] < jds[1] && jds[1] < jds[2] && jds[2] < jds[3]);

            let next_march =
                marker_julian_date(SeasonalMarker::MarchEquinox, year + 1).julian_date();
            assert!(jds[3] < next_march);
        }
    }

    #[test]
    fn test_early_table_is_used_before_year_1000() {
        // The two fits disagree strongly far outside their ranges; a sanity
        // check that year 500 still lands in the right month catches a wrong
        // table selection.
        let civil = marker_julian_date(SeasonalMarker::JuneSolstice, 500).to_civil_utc();
        assert_eq!(civil.year, 500);
        assert_eq!(civil.month, 6);
    }

    #[cfg(feature = "chrono")]
    mod chrono_api {
        use super::super::*;
        use chrono::Timelike;

        #[test]
        fn test_reference_year_2024() {
            // Published values: Mar 20 03:06, Jun 20 20:51, Sep 22 12:44,
            // Dec 21 09:20 UTC.
            let march = march_equinox(2024).unwrap();
            assert_eq!((march.month(), march.day()), (3, 20));
            assert_eq!(march.hour(), 3);

            let june = june_solstice(2024).unwrap();
            assert_eq!((june.month(), june.day()), (6, 20));
            assert_eq!(june.hour(), 20);

            let september = september_equinox(2024).unwrap();
            assert_eq!((september.month(), september.day()), (9, 22));
            assert_eq!(september.hour(), 12);

            let december = december_solstice(2024).unwrap();
            assert_eq!((december.month(), december.day()), (12, 21));
            assert_eq!(december.hour(), 9);
        }

        #[test]
        fn test_recent_markers_sorted_and_bracketing() {
            let reference = "2024-07-15T12:00:00Z".parse().unwrap();
            let markers = recent_markers(reference).unwrap();

            assert!(markers.windows(2).all(|w| w[0].time() <= w[1].time()));
            assert!(markers.first().unwrap().time() < reference);
            assert!(markers.last().unwrap().time() > reference);
        }

        #[test]
        fn test_next_and_previous_are_strict() {
            let reference = "2024-07-15T12:00:00Z".parse().unwrap();

            let next = next_marker(reference).unwrap();
            assert!(next.time() > reference);
            assert_eq!(next.marker(), SeasonalMarker::SeptemberEquinox);

            let previous = previous_marker(reference).unwrap();
            assert!(previous.time() < reference);
            assert_eq!(previous.marker(), SeasonalMarker::JuneSolstice);
        }

        #[test]
        fn test_exact_marker_hit_belongs_to_neither_side() {
            let solstice = june_solstice(2024).unwrap();

            let next = next_marker(solstice).unwrap();
            assert_eq!(next.marker(), SeasonalMarker::SeptemberEquinox);
            assert!(next.time() > solstice);

            let previous = previous_marker(solstice).unwrap();
            assert_eq!(previous.marker(), SeasonalMarker::MarchEquinox);
            assert!(previous.time() < solstice);
        }

        #[test]
        fn test_year_boundary_window() {
            // Early January: the previous marker lives in the prior year.
            let reference = "2025-01-02T00:00:00Z".parse().unwrap();

            let previous = previous_marker(reference).unwrap();
            assert_eq!(previous.marker(), SeasonalMarker::DecemberSolstice);
            assert_eq!(previous.time().year(), 2024);

            let next = next_marker(reference).unwrap();
            assert_eq!(next.marker(), SeasonalMarker::MarchEquinox);
            assert_eq!(next.time().year(), 2025);
        }
    }
}
