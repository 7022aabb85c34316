//! Solar day model: sunrise, sunset, daylight duration and event derivation.
//!
//! Sunrise and sunset instants are computed with the NOAA sunrise equation
//! (fractional-year Fourier series for solar declination and the equation of
//! time, hour-angle solution at a zenith of 90.833°). The equation is a
//! low-precision model, good to a few minutes at moderate latitudes.
//!
//! Polar day and polar night are normal results, not errors: the affected
//! day simply has no sunrise/sunset instants and a daylight duration of
//! zero. The two cases stay distinguishable through [`DayEvents`].

use crate::error::{check_latitude, check_longitude};
use crate::math::{acos, cos, degrees_to_radians, radians_to_degrees, round, sin};
use crate::Result;
use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, Utc};

/// Sun zenith angle for sunrise/sunset in degrees (90° plus refraction and
/// the sun's apparent radius).
const SUNRISE_SUNSET_ZENITH: f64 = 90.833;

/// Upper bound on calendar-day advances when searching for the next event.
///
/// Keeps the search bounded through polar transitions; a query deep in polar
/// night yields "no event" rather than a months-long scan.
const MAX_DAY_ADVANCES: usize = 3;

/// A validated geographic coordinate in degrees.
///
/// Latitude is limited to [-90, +90] and longitude to [-180, +180]; NaN and
/// infinite values are rejected at construction, so every downstream
/// computation is total.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    latitude: f64,
    longitude: f64,
}

impl Coordinate {
    /// Creates a coordinate from latitude and longitude in degrees.
    ///
    /// # Errors
    /// Returns `InvalidLatitude` or `InvalidLongitude` for out-of-range or
    /// non-finite values.
    ///
    /// # Example
    /// ```
    /// # use solar_almanac::Coordinate;
    /// let vienna = Coordinate::new(48.21, 16.37).unwrap();
    /// assert_eq!(vienna.latitude(), 48.21);
    ///
    /// assert!(Coordinate::new(95.0, 0.0).is_err());
    /// assert!(Coordinate::new(f64::NAN, 0.0).is_err());
    /// ```
    pub fn new(latitude: f64, longitude: f64) -> Result<Self> {
        check_latitude(latitude)?;
        check_longitude(longitude)?;
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Gets the latitude in degrees.
    #[must_use]
    pub const fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Gets the longitude in degrees.
    #[must_use]
    pub const fn longitude(&self) -> f64 {
        self.longitude
    }
}

// Construction rejects NaN, so equality is reflexive.
impl Eq for Coordinate {}

/// Classification of a day's solar events at a location.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayEvents {
    /// Regular day with a sunrise and a sunset
    Regular {
        /// Instant the sun's upper limb crosses the horizon upward
        sunrise: DateTime<Utc>,
        /// Instant the sun's upper limb crosses the horizon downward
        sunset: DateTime<Utc>,
    },
    /// Polar day - the sun stays above the horizon all day
    PolarDay,
    /// Polar night - the sun stays below the horizon all day
    PolarNight,
}

/// Sunrise and sunset for one calendar date at one coordinate.
///
/// An immutable value computed on demand; two computations for equal inputs
/// are value-equal and independent. Nothing is cached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SolarDay {
    date: NaiveDate,
    coordinate: Coordinate,
    events: DayEvents,
}

impl SolarDay {
    /// Computes the solar day for a calendar date at a coordinate.
    ///
    /// The date is the civil calendar date whose solar events are sought;
    /// the returned instants are absolute (UTC-anchored) and may fall on a
    /// neighbouring UTC date at extreme longitudes.
    ///
    /// # Example
    /// ```
    /// # use chrono::NaiveDate;
    /// # use solar_almanac::{Coordinate, SolarDay};
    /// let quito = Coordinate::new(-0.18, -78.47).unwrap();
    /// let day = SolarDay::new(NaiveDate::from_ymd_opt(2024, 3, 20).unwrap(), quito);
    ///
    /// // Near the equator, daylight is always close to 12 hours
    /// assert!((day.daylight().num_minutes() - 12 * 60).abs() < 20);
    /// ```
    #[must_use]
    pub fn new(date: NaiveDate, coordinate: Coordinate) -> Self {
        let events = compute_day_events(date, coordinate);
        Self {
            date,
            coordinate,
            events,
        }
    }

    /// The calendar date this day was computed for.
    #[must_use]
    pub const fn date(&self) -> NaiveDate {
        self.date
    }

    /// The coordinate this day was computed for.
    #[must_use]
    pub const fn coordinate(&self) -> Coordinate {
        self.coordinate
    }

    /// The day's event classification.
    #[must_use]
    pub const fn events(&self) -> &DayEvents {
        &self.events
    }

    /// The sunrise instant, absent on polar days and nights.
    #[must_use]
    pub const fn sunrise(&self) -> Option<DateTime<Utc>> {
        if let DayEvents::Regular { sunrise, .. } = self.events {
            Some(sunrise)
        } else {
            None
        }
    }

    /// The sunset instant, absent on polar days and nights.
    #[must_use]
    pub const fn sunset(&self) -> Option<DateTime<Utc>> {
        if let DayEvents::Regular { sunset, .. } = self.events {
            Some(sunset)
        } else {
            None
        }
    }

    /// Checks whether the sun stays above the horizon all day.
    #[must_use]
    pub const fn is_polar_day(&self) -> bool {
        matches!(self.events, DayEvents::PolarDay)
    }

    /// Checks whether the sun stays below the horizon all day.
    #[must_use]
    pub const fn is_polar_night(&self) -> bool {
        matches!(self.events, DayEvents::PolarNight)
    }

    /// Daylight duration: sunset minus sunrise.
    ///
    /// Zero whenever either event is absent, and never negative: an inverted
    /// event pair (which the solver cannot produce for valid inputs) clamps
    /// to zero rather than propagating a negative duration.
    #[must_use]
    pub fn daylight(&self) -> Duration {
        match self.events {
            DayEvents::Regular { sunrise, sunset } => {
                let length = sunset - sunrise;
                if length < Duration::zero() {
                    Duration::zero()
                } else {
                    length
                }
            }
            DayEvents::PolarDay | DayEvents::PolarNight => Duration::zero(),
        }
    }

    /// Signed daylight difference: `self.daylight() - other.daylight()`.
    ///
    /// Positive when `self` has more daylight; antisymmetric in its
    /// arguments. Used for "N minutes more/less daylight than ..." displays.
    #[must_use]
    pub fn daylight_delta(&self, other: &Self) -> Duration {
        self.daylight() - other.daylight()
    }
}

/// A single solar event with its instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolarEvent {
    /// The sun rises at the contained instant
    Sunrise(DateTime<Utc>),
    /// The sun sets at the contained instant
    Sunset(DateTime<Utc>),
}

impl SolarEvent {
    /// The instant of the event, regardless of its kind.
    #[must_use]
    pub const fn instant(&self) -> DateTime<Utc> {
        match self {
            Self::Sunrise(instant) | Self::Sunset(instant) => *instant,
        }
    }

    /// Checks whether this is a sunrise.
    #[must_use]
    pub const fn is_sunrise(&self) -> bool {
        matches!(self, Self::Sunrise(_))
    }

    /// Checks whether this is a sunset.
    #[must_use]
    pub const fn is_sunset(&self) -> bool {
        matches!(self, Self::Sunset(_))
    }
}

/// The next solar event strictly after the reference instant.
///
/// Classifies the reference instant against the day's events: before sunrise
/// the sunrise is next, during daylight the sunset is next, after sunset the
/// search advances one calendar day at a time (same coordinate) and returns
/// the first future sunrise. A reference instant exactly equal to an event
/// instant counts as past, so that event is not returned.
///
/// The day-advance is bounded by a small fixed limit; deep in polar night
/// the result is `None` rather than an unbounded scan.
///
/// The reference instant is an explicit parameter; this function never reads
/// the system clock.
#[must_use]
pub fn next_event(now: DateTime<Utc>, day: &SolarDay) -> Option<SolarEvent> {
    let mut current = *day;
    for _ in 0..=MAX_DAY_ADVANCES {
        if let DayEvents::Regular { sunrise, sunset } = *current.events() {
            if now < sunrise {
                return Some(SolarEvent::Sunrise(sunrise));
            }
            if now < sunset {
                return Some(SolarEvent::Sunset(sunset));
            }
        }
        let next_date = current.date().succ_opt()?;
        current = SolarDay::new(next_date, current.coordinate());
    }
    None
}

/// Rebases an instant between two fixed UTC offsets.
///
/// Shifts the instant by the signed difference between the target and source
/// offsets, both in seconds east of UTC. This is an isolated workaround for
/// callers whose upstream values are anchored to the device clock's offset
/// but must be displayed in the location's own time zone; with a fully
/// timezone-aware instant type the conversion is unnecessary.
#[must_use]
pub fn shift_between_zones(
    instant: DateTime<Utc>,
    source_offset_seconds: i32,
    target_offset_seconds: i32,
) -> DateTime<Utc> {
    instant + Duration::seconds(i64::from(target_offset_seconds) - i64::from(source_offset_seconds))
}

/// Hour-angle solution for the configured zenith.
enum HourAngle {
    /// Sun crosses the horizon; half the daylight arc in degrees
    Crossing(f64),
    /// Sun stays above the horizon (polar day)
    AlwaysUp,
    /// Sun stays below the horizon (polar night)
    AlwaysDown,
}

/// NOAA sunrise equation for one date and coordinate.
///
/// Works in minutes past UTC midnight of the given date, then converts the
/// rise/set minutes to absolute instants rounded to whole seconds.
fn compute_day_events(date: NaiveDate, coordinate: Coordinate) -> DayEvents {
    let days_in_year = if date.leap_year() { 366.0 } else { 365.0 };

    // Fractional year at solar noon of the date, in radians
    let gamma = core::f64::consts::TAU * (f64::from(date.ordinal()) - 1.0 + 0.5) / days_in_year;

    // Equation of time in minutes
    let eqtime = 229.18
        * (0.000075 + 0.001868 * cos(gamma)
            - 0.032077 * sin(gamma)
            - 0.014615 * cos(2.0 * gamma)
            - 0.040849 * sin(2.0 * gamma));

    // Solar declination in radians
    let decl = 0.006918 - 0.399912 * cos(gamma) + 0.070257 * sin(gamma)
        - 0.006758 * cos(2.0 * gamma)
        + 0.000907 * sin(2.0 * gamma)
        - 0.002697 * cos(3.0 * gamma)
        + 0.00148 * sin(3.0 * gamma);

    let solar_noon_minutes = 720.0 - 4.0 * coordinate.longitude() - eqtime;

    match hour_angle(coordinate.latitude(), decl) {
        HourAngle::Crossing(half_arc_degrees) => {
            // One degree of hour angle is four minutes of time
            let sunrise_minutes = solar_noon_minutes - 4.0 * half_arc_degrees;
            let sunset_minutes = solar_noon_minutes + 4.0 * half_arc_degrees;
            DayEvents::Regular {
                sunrise: instant_at(date, sunrise_minutes),
                sunset: instant_at(date, sunset_minutes),
            }
        }
        HourAngle::AlwaysUp => DayEvents::PolarDay,
        HourAngle::AlwaysDown => DayEvents::PolarNight,
    }
}

/// Solves cos(ha) for the sunrise/sunset zenith and classifies the result.
fn hour_angle(latitude_degrees: f64, declination_radians: f64) -> HourAngle {
    let zenith = degrees_to_radians(SUNRISE_SUNSET_ZENITH);
    let latitude = degrees_to_radians(latitude_degrees);

    let cos_ha = (cos(zenith) - sin(latitude) * sin(declination_radians))
        / (cos(latitude) * cos(declination_radians));

    if cos_ha < -1.0 {
        HourAngle::AlwaysUp
    } else if cos_ha > 1.0 {
        HourAngle::AlwaysDown
    } else {
        HourAngle::Crossing(radians_to_degrees(acos(cos_ha)))
    }
}

/// Absolute instant for minutes past UTC midnight of a date.
///
/// Minutes may be negative or exceed 1440; the instant then falls on the
/// previous or next UTC date, which is correct for extreme longitudes.
fn instant_at(date: NaiveDate, minutes_past_midnight: f64) -> DateTime<Utc> {
    let midnight = date.and_time(NaiveTime::MIN).and_utc();
    midnight + Duration::seconds(round(minutes_past_midnight * 60.0) as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn test_coordinate_validation() {
        assert!(Coordinate::new(0.0, 0.0).is_ok());
        assert!(Coordinate::new(90.0, 180.0).is_ok());
        assert!(Coordinate::new(-90.0, -180.0).is_ok());

        assert!(Coordinate::new(90.1, 0.0).is_err());
        assert!(Coordinate::new(0.0, -180.1).is_err());
        assert!(Coordinate::new(f64::NAN, 0.0).is_err());
        assert!(Coordinate::new(0.0, f64::INFINITY).is_err());
    }

    #[test]
    fn test_equatorial_day_is_about_twelve_hours() {
        let singapore = Coordinate::new(1.28, 103.83).unwrap();

        for month in [3, 6, 9, 12] {
            let day = SolarDay::new(date(2024, month, 15), singapore);
            let minutes = day.daylight().num_minutes();
            assert!(
                (minutes - 727).abs() < 10,
                "month {month}: daylight {minutes} minutes"
            );
        }
    }

    #[test]
    fn test_polar_day_and_night_classification() {
        let longyearbyen = Coordinate::new(78.22, 15.65).unwrap();

        let midsummer = SolarDay::new(date(2024, 6, 21), longyearbyen);
        assert!(midsummer.is_polar_day());
        assert_eq!(midsummer.sunrise(), None);
        assert_eq!(midsummer.sunset(), None);
        assert_eq!(midsummer.daylight(), Duration::zero());

        let midwinter = SolarDay::new(date(2024, 12, 21), longyearbyen);
        assert!(midwinter.is_polar_night());
        assert_eq!(midwinter.sunrise(), None);
        assert_eq!(midwinter.sunset(), None);
        assert_eq!(midwinter.daylight(), Duration::zero());
    }

    #[test]
    fn test_daylight_never_negative_and_ordered() {
        let vienna = Coordinate::new(48.21, 16.37).unwrap();

        for month in 1..=12 {
            let day = SolarDay::new(date(2024, month, 10), vienna);
            assert!(day.daylight() >= Duration::zero());

            let (sunrise, sunset) = (day.sunrise().unwrap(), day.sunset().unwrap());
            assert!(sunrise < sunset);
        }
    }

    #[test]
    fn test_daylight_delta_is_antisymmetric() {
        let oslo = Coordinate::new(59.91, 10.75).unwrap();
        let june = SolarDay::new(date(2024, 6, 21), oslo);
        let december = SolarDay::new(date(2024, 12, 21), oslo);

        let delta = june.daylight_delta(&december);
        assert!(delta > Duration::zero());
        assert_eq!(delta, -december.daylight_delta(&june));
        assert_eq!(june.daylight_delta(&june), Duration::zero());
    }

    #[test]
    fn test_equal_inputs_give_value_equal_days() {
        let vienna = Coordinate::new(48.21, 16.37).unwrap();
        let a = SolarDay::new(date(2024, 6, 21), vienna);
        let b = SolarDay::new(date(2024, 6, 21), vienna);
        assert_eq!(a, b);
    }

    #[test]
    fn test_next_event_state_classification() {
        let vienna = Coordinate::new(48.21, 16.37).unwrap();
        let day = SolarDay::new(date(2024, 6, 21), vienna);
        let sunrise = day.sunrise().unwrap();
        let sunset = day.sunset().unwrap();

        // Before sunrise
        let event = next_event(sunrise - Duration::hours(1), &day).unwrap();
        assert_eq!(event, SolarEvent::Sunrise(sunrise));
        assert!(event.is_sunrise());

        // During daylight
        let event = next_event(sunrise + Duration::hours(1), &day).unwrap();
        assert_eq!(event, SolarEvent::Sunset(sunset));
        assert!(event.is_sunset());

        // After sunset: tomorrow's sunrise
        let tomorrow = SolarDay::new(date(2024, 6, 22), vienna);
        let event = next_event(sunset + Duration::hours(1), &day).unwrap();
        assert_eq!(event, SolarEvent::Sunrise(tomorrow.sunrise().unwrap()));
    }

    #[test]
    fn test_next_event_exact_hit_counts_as_past() {
        let vienna = Coordinate::new(48.21, 16.37).unwrap();
        let day = SolarDay::new(date(2024, 6, 21), vienna);
        let sunrise = day.sunrise().unwrap();
        let sunset = day.sunset().unwrap();

        // Exactly at sunrise the next event is the sunset
        let event = next_event(sunrise, &day).unwrap();
        assert_eq!(event, SolarEvent::Sunset(sunset));

        // Exactly at sunset the next event is tomorrow's sunrise
        let event = next_event(sunset, &day).unwrap();
        assert!(event.is_sunrise());
        assert!(event.instant() > sunset);
    }

    #[test]
    fn test_next_event_is_bounded_in_polar_night() {
        let longyearbyen = Coordinate::new(78.22, 15.65).unwrap();
        let day = SolarDay::new(date(2024, 12, 1), longyearbyen);
        let now = date(2024, 12, 1).and_time(NaiveTime::MIN).and_utc();

        // Months from the next sunrise; the bounded search gives up
        assert_eq!(next_event(now, &day), None);
    }

    #[test]
    fn test_next_event_spans_polar_transition() {
        // A few days before the sun first rises again the bounded search
        // still finds the upcoming sunrise.
        let longyearbyen = Coordinate::new(78.22, 15.65).unwrap();

        let mut first_light = None;
        for day_of_feb in 1..=28 {
            let day = SolarDay::new(date(2024, 2, day_of_feb), longyearbyen);
            if !day.is_polar_night() {
                first_light = Some(day_of_feb);
                break;
            }
        }
        let first_light = first_light.expect("sun returns to 78°N in February");
        assert!(first_light > 2, "expected some polar nights in early February");

        let query_day = SolarDay::new(date(2024, 2, first_light - 1), longyearbyen);
        let now = query_day.date().and_time(NaiveTime::MIN).and_utc();
        let event = next_event(now, &query_day).unwrap();
        assert!(event.is_sunrise());
    }

    #[test]
    fn test_shift_between_zones() {
        let instant = "2024-06-21T12:00:00Z".parse::<DateTime<Utc>>().unwrap();

        // Same offset: identity
        assert_eq!(shift_between_zones(instant, 3600, 3600), instant);

        // Device at UTC+2, location at UTC-7: shift back nine hours
        let shifted = shift_between_zones(instant, 2 * 3600, -7 * 3600);
        assert_eq!(shifted, instant - Duration::hours(9));

        // Antisymmetric
        let back = shift_between_zones(shifted, -7 * 3600, 2 * 3600);
        assert_eq!(back, instant);
    }
}
