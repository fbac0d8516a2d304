//! Text rendering of the pipeline's view state.

use chrono::Local;
use skycast_core::{CurrentWeather, ForecastDay, ViewState};

const BAR_WIDTH: usize = 21;

pub fn view(state: &ViewState) {
    match state {
        ViewState::Idle => println!("Search for a city to see the weather."),
        ViewState::Loading => println!("Loading..."),
        ViewState::Error(message) => println!("Error: {message}"),
        ViewState::Success { current, forecast } => {
            current_weather(current);
            if let Some(days) = forecast {
                forecast_section(days);
            }
        }
    }
}

pub fn recent(entries: &[String]) {
    if entries.is_empty() {
        return;
    }
    println!();
    println!("Recent: {}", entries.join(", "));
}

fn current_weather(current: &CurrentWeather) {
    let today = Local::now().format("%A, %b %d, %Y");

    println!("{}, {} - {}", current.city, current.country, today);
    println!(
        "  {:.0}\u{b0}C (feels like {:.0}\u{b0})  {}",
        current.temperature, current.feels_like, current.description
    );
    println!(
        "  low {:.0}\u{b0}  [{}]  high {:.0}\u{b0}",
        current.temp_min,
        temp_bar(current.temp_range_position()),
        current.temp_max
    );

    match current.visibility_m {
        Some(meters) => println!(
            "  wind {:.1} m/s  humidity {}%  pressure {} hPa  visibility {:.1} km",
            current.wind_speed,
            current.humidity,
            current.pressure,
            f64::from(meters) / 1000.0
        ),
        None => println!(
            "  wind {:.1} m/s  humidity {}%  pressure {} hPa",
            current.wind_speed, current.humidity, current.pressure
        ),
    }
}

fn forecast_section(days: &[ForecastDay]) {
    println!();
    println!("5-day forecast:");
    for day in days {
        println!("  {:<4} {:<4} {:>3}\u{b0}", day.label, day.icon, day.temperature);
    }
}

// Range indicator: a dash track with a marker at the given percentage.
fn temp_bar(position: u8) -> String {
    let index = usize::from(position.min(100)) * (BAR_WIDTH - 1) / 100;

    (0..BAR_WIDTH)
        .map(|i| if i == index { '*' } else { '-' })
        .collect()
}
