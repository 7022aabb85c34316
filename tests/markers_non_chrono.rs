//! Exercises the numeric seasonal marker API without going through chrono,
//! as a `no_std` consumer would.

use solar_almanac::seasons::{self, SeasonalMarker};
use solar_almanac::time::DeltaT;

#[test]
fn marker_julian_dates_recover_civil_components() {
    let jd = seasons::marker_julian_date(SeasonalMarker::JuneSolstice, 2024);
    let civil = jd.to_civil_utc();

    assert_eq!((civil.year, civil.month, civil.day), (2024, 6, 20));
    // Published instant is 20:51 UTC
    assert_eq!(civil.hour, 20);
    assert!((i64::from(civil.minute) - 51).abs() <= 1);
}

#[test]
fn ephemeris_and_civil_scales_differ_by_delta_t() {
    let jd = seasons::marker_julian_date(SeasonalMarker::DecemberSolstice, 2024);

    let delta_t_days = jd.delta_t() / 86_400.0;
    let difference = jd.julian_ephemeris_day() - jd.julian_date();
    assert!((difference - delta_t_days).abs() < 1e-9);

    // ΔT for late 2024 is around 70 seconds
    assert!(jd.delta_t() > 60.0 && jd.delta_t() < 80.0);
}

#[test]
fn marker_delta_t_follows_marker_month() {
    let march = seasons::marker_julian_date(SeasonalMarker::MarchEquinox, 2024);
    let expected = DeltaT::estimate_from_date(2024, 3).unwrap();
    assert_eq!(march.delta_t(), expected);
}

#[test]
fn distant_years_still_produce_plausible_julian_dates() {
    // Accuracy decays far from the fit range, but results stay ordered and
    // roughly one tropical year apart.
    let a = seasons::marker_julian_date(SeasonalMarker::MarchEquinox, -700);
    let b = seasons::marker_julian_date(SeasonalMarker::MarchEquinox, -699);

    let year_length = b.julian_date() - a.julian_date();
    assert!((year_length - 365.24).abs() < 0.5);
}
