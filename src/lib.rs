//! # Solar Almanac
//!
//! Seasonal marker (solstice/equinox) and daylight calculations for calendar
//! and clock applications.

//!
//! This library provides two small, independent computation cores:
//! - **Seasonal markers**: the four yearly solstice/equinox instants for any
//!   calendar year, via the low-precision orbital approximation from Meeus,
//!   *Astronomical Algorithms* (mean-event polynomial, 24-term periodic
//!   correction, ΔT), plus helpers to find the next/previous marker around an
//!   arbitrary instant.
//! - **Solar day model**: sunrise, sunset, daylight duration and "next solar
//!   event" derivation for a date and geographic coordinate, using the NOAA
//!   sunrise equation. Polar day and polar night are represented as absent
//!   events, never as errors.
//!
//! All operations are pure, synchronous functions of their inputs: no shared
//! state, no caching, no reads of the current time. Reference instants are
//! always explicit parameters, so results are deterministic and testable.
//!
//! ## Feature Flags
//!
//! - `std` (default): native math functions
//! - `chrono` (default): `DateTime<Utc>` based convenience API; required for
//!   the solar day model
//! - `libm`: pure Rust math for `no_std` environments
//!
//! The seasonal marker core works without `chrono`, returning
//! [`time::JulianDate`] values.
//!
//! ## Accuracy
//!
//! Marker instants agree with published reference tables to well under a
//! minute for years within a couple of centuries of the present. The
//! approximation is a polynomial fit; it is not rejected for distant years
//! but grows steadily less accurate outside roughly ±1000 years of J2000.
//! The daylight model uses the NOAA low-precision sunrise equation, good to
//! a few minutes at moderate latitudes.
//!
//! ## Quick Start
//!
//! ### Seasonal markers
//! ```rust
//! # #[cfg(feature = "chrono")] {
//! use solar_almanac::seasons;
//!
//! let solstice = seasons::june_solstice(2024).unwrap();
//! println!("June solstice 2024: {solstice}"); // 2024-06-20 UTC
//!
//! let reference = "2024-07-01T00:00:00Z".parse().unwrap();
//! let next = seasons::next_marker(reference).unwrap();
//! println!("next marker after July 2024: {:?}", next.marker());
//! # }
//! ```
//!
//! ### Daylight
//! ```rust
//! # #[cfg(feature = "chrono")] {
//! use chrono::NaiveDate;
//! use solar_almanac::{Coordinate, SolarDay};
//!
//! let vienna = Coordinate::new(48.21, 16.37).unwrap();
//! let date = NaiveDate::from_ymd_opt(2024, 6, 21).unwrap();
//! let day = SolarDay::new(date, vienna);
//!
//! if let (Some(sunrise), Some(sunset)) = (day.sunrise(), day.sunset()) {
//!     println!("sunrise {sunrise}, sunset {sunset}");
//!     println!("daylight: {} minutes", day.daylight().num_minutes());
//! }
//! # }
//! ```
//!
//! ## References
//!
//! - Meeus, J. (1998). Astronomical Algorithms, 2nd ed., chapter 27
//!   (Equinoxes and Solstices).
//! - Espenak, F.; Meeus, J. (2014). Polynomial expressions for Delta T.
//! - NOAA Global Monitoring Laboratory solar calculator equations,
//!   <https://gml.noaa.gov/grad/solcalc/>

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::pedantic, clippy::nursery, clippy::cargo, clippy::all)]
#![allow(
    clippy::module_name_repetitions,
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::cargo_common_metadata,
    clippy::multiple_crate_versions, // Acceptable for dev-dependencies
    clippy::float_cmp, // Exact comparisons of mathematical constants in tests
)]

// Public API exports
#[cfg(feature = "chrono")]
pub use crate::daylight::{Coordinate, DayEvents, SolarDay, SolarEvent};
pub use crate::error::{Error, Result};
#[cfg(feature = "chrono")]
pub use crate::seasons::MarkerInstant;
pub use crate::seasons::SeasonalMarker;

// Algorithm modules
#[cfg(feature = "chrono")]
pub mod daylight;
pub mod seasons;

// Core modules
pub mod error;
pub mod time;

// Internal modules
mod math;
