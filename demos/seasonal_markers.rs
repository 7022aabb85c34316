//! Prints the equinoxes and solstices for a range of years, plus the markers
//! bracketing the current moment.

use chrono::Utc;
use solar_almanac::seasons::{self, SeasonalMarker};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    for year in 2024..=2028 {
        println!("=== {year} ===");
        for marker in SeasonalMarker::ALL {
            let time = seasons::marker_time(marker, year)?;
            println!("  {marker:<18} {}", time.format("%Y-%m-%d %H:%M UTC"));
        }
        println!();
    }

    let now = Utc::now();
    let previous = seasons::previous_marker(now)?;
    let next = seasons::next_marker(now)?;

    println!(
        "Last marker: {} at {}",
        previous.marker(),
        previous.time().format("%Y-%m-%d %H:%M UTC")
    );
    println!(
        "Next marker: {} at {}",
        next.marker(),
        next.time().format("%Y-%m-%d %H:%M UTC")
    );

    Ok(())
}
