//! Sunrise, sunset, and daylight duration report for diverse global locations,
//! including the polar cases where no events occur.

use chrono::{NaiveDate, NaiveTime};
use solar_almanac::daylight::{self, Coordinate, DayEvents, SolarDay};

struct City {
    name: &'static str,
    latitude: f64,
    longitude: f64,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cities = [
        City {
            name: "Longyearbyen, Norway (Arctic)",
            latitude: 78.22,
            longitude: 15.65,
        },
        City {
            name: "Vienna, Austria",
            latitude: 48.21,
            longitude: 16.37,
        },
        City {
            name: "Singapore",
            latitude: 1.283333,
            longitude: 103.833333,
        },
        City {
            name: "Auckland, New Zealand",
            latitude: -36.840556,
            longitude: 174.74,
        },
    ];

    // December solstice shows the most extreme variation between hemispheres
    let date = NaiveDate::from_ymd_opt(2024, 12, 21).unwrap();

    for city in &cities {
        let coordinate = Coordinate::new(city.latitude, city.longitude)?;
        let day = SolarDay::new(date, coordinate);

        println!("=== {} ===", city.name);
        println!(
            "Coordinates: {:.2}°, {:.2}°",
            city.latitude, city.longitude
        );

        match day.events() {
            DayEvents::Regular { sunrise, sunset } => {
                println!("  Sunrise: {}", sunrise.format("%H:%M UTC"));
                println!("  Sunset:  {}", sunset.format("%H:%M UTC"));
                let daylight = day.daylight();
                println!(
                    "  Daylight: {}h {:02}m",
                    daylight.num_hours(),
                    daylight.num_minutes() % 60
                );
            }
            DayEvents::PolarDay => println!("  Sun above the horizon all day"),
            DayEvents::PolarNight => println!("  Sun below the horizon all day"),
        }

        let midnight = date.and_time(NaiveTime::MIN).and_utc();
        match daylight::next_event(midnight, &day) {
            Some(event) if event.is_sunrise() => {
                println!("  Next event: sunrise at {}", event.instant());
            }
            Some(event) => {
                println!("  Next event: sunset at {}", event.instant());
            }
            None => println!("  No upcoming event within the search window"),
        }
        println!();
    }

    Ok(())
}
