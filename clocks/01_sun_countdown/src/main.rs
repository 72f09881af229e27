//! Sun Countdown
//!
//! Counts down to the next sunrise, sunset, twilight bound or solar noon at a
//! configured location, lists a day's solar events, and summarizes the sun's
//! altitude over a year.

mod chart;
mod countdown;

use std::error::Error;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::thread;
use std::time::Duration as StdDuration;

use chrono::{Datelike, NaiveDate, Utc};
use chrono_tz::Tz;
use clap::{Parser, Subcommand};
use log::warn;
use serde::Deserialize;
use sun_core::{
    day_length, parse_timezone, solve_event, upcoming_event, GeoCoordinate, SolarEventKind,
    UtcOffsetResolver,
};

use crate::countdown::{describe_error, format_remaining, format_utc_offset, Countdown};

const PROGRAM_NAME: &str = "sun_countdown";
const DEFAULT_TZ: &str = "Europe/Zagreb";

/// Configuration file contents
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct Config {
    zone_id: String,
    latitude: f64,
    longitude: f64,
    event: SolarEventKind,
    tick_millis: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            zone_id: DEFAULT_TZ.to_string(),
            latitude: 45.8150,
            longitude: 15.9819,
            event: SolarEventKind::Sunset,
            tick_millis: 100,
        }
    }
}

#[derive(Parser)]
#[command(name = "sun_countdown", about = "Countdown to solar events")]
struct Cli {
    /// Config file (defaults to the platform config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Latitude in degrees, positive north
    #[arg(long, global = true, allow_hyphen_values = true)]
    latitude: Option<f64>,
    /// Longitude in degrees, positive east
    #[arg(long, global = true, allow_hyphen_values = true)]
    longitude: Option<f64>,
    /// IANA time zone, e.g. Europe/Zagreb
    #[arg(long, global = true)]
    zone: Option<String>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Count down to the next occurrence of an event
    Countdown {
        /// Event name, e.g. sunrise or civil_dusk
        #[arg(long)]
        event: Option<SolarEventKind>,
        /// Print the remaining time once and exit
        #[arg(long)]
        once: bool,
    },
    /// List all solar events for a date
    Events {
        /// Local date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Monthly sun altitude summary for a year
    Chart {
        /// Year, defaults to the current year
        #[arg(long)]
        year: Option<i32>,
        /// Sampling interval in minutes
        #[arg(long, default_value = "60", value_parser = clap::value_parser!(u32).range(1..=1440))]
        interval_minutes: u32,
    },
}

/// Resolved inputs for every command
struct Settings {
    location: GeoCoordinate,
    zone: Tz,
    event: SolarEventKind,
    tick: StdDuration,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let settings = load_settings(&cli)?;

    match cli.command {
        Commands::Countdown { event, once } => {
            run_countdown(&settings, event.unwrap_or(settings.event), once)
        }
        Commands::Events { date } => {
            let today = Utc::now().with_timezone(&settings.zone).date_naive();
            print_events(&settings, date.unwrap_or(today));
            Ok(())
        }
        Commands::Chart {
            year,
            interval_minutes,
        } => {
            let this_year = Utc::now().with_timezone(&settings.zone).date_naive();
            print_chart(&settings, year.unwrap_or(this_year.year()), interval_minutes)
        }
    }
}

fn load_settings(cli: &Cli) -> Result<Settings, Box<dyn Error>> {
    let loaded = match &cli.config {
        Some(path) => sun_core::load_config_from(path),
        None => sun_core::load_config(PROGRAM_NAME),
    };
    let config: Config = match loaded {
        Ok(config) => config.unwrap_or_default(),
        Err(e) => {
            warn!("Failed to load config: {}", e);
            Config::default()
        }
    };

    let location = GeoCoordinate::new(
        cli.latitude.unwrap_or(config.latitude),
        cli.longitude.unwrap_or(config.longitude),
    )?;
    let zone = parse_timezone(cli.zone.as_deref().unwrap_or(&config.zone_id))?;

    Ok(Settings {
        location,
        zone,
        event: config.event,
        tick: StdDuration::from_millis(config.tick_millis.max(10)),
    })
}

fn run_countdown(settings: &Settings, event: SolarEventKind, once: bool) -> Result<(), Box<dyn Error>> {
    let now = Utc::now();
    let today = now.with_timezone(&settings.zone).date_naive();

    let target = match upcoming_event(now, today, event, settings.location, &settings.zone) {
        Ok(target) => target,
        Err(e) => {
            println!("{}", describe_error(e));
            return Ok(());
        }
    };

    let countdown = Countdown::new(now, target);
    println!(
        "{} at {}: {} ({})",
        event,
        settings.location,
        countdown.target().format("%Y-%m-%d %H:%M:%S"),
        format_utc_offset(countdown.target().offset().local_minus_utc())
    );

    let mut stdout = io::stdout();
    loop {
        let now = Utc::now();
        if countdown.is_finished(now) {
            println!("\rTime is up!{:30}", "");
            return Ok(());
        }

        print!(
            "\r{} [{:5.1}%]",
            format_remaining(countdown.remaining(now)),
            countdown.progress(now) * 100.0
        );
        stdout.flush()?;

        if once {
            println!();
            return Ok(());
        }
        thread::sleep(settings.tick);
    }
}

fn print_events(settings: &Settings, date: NaiveDate) {
    let offset = settings.zone.offset_on(date).local_minus_utc();
    println!(
        "{} at {} ({}, {})",
        date,
        settings.location,
        settings.zone.name(),
        format_utc_offset(offset)
    );

    for kind in SolarEventKind::ALL {
        match solve_event(date, kind, settings.location, offset) {
            Ok(time) => println!("  {:<18} {}", kind.label(), time.format("%H:%M:%S")),
            Err(e) => println!("  {:<18} {}", kind.label(), describe_error(e)),
        }
    }

    match day_length(date, settings.location, &settings.zone) {
        Ok(length) => println!(
            "  {:<18} {}h {:02}m",
            "Day Length",
            length.num_hours(),
            length.num_minutes() % 60
        ),
        Err(e) => println!("  {:<18} {}", "Day Length", describe_error(e)),
    }
}

fn print_chart(settings: &Settings, year: i32, interval_minutes: u32) -> Result<(), Box<dyn Error>> {
    let months = chart::sweep_year(year, settings.location, &settings.zone, interval_minutes)?;

    println!("{} at {}, every {} min", year, settings.location, interval_minutes);
    println!("  {:>5}  {:>12}  {:>9}", "Month", "Max altitude", "Daylight");
    for month in months {
        let max = month
            .max_altitude
            .map(|a| format!("{:.1}°", a))
            .unwrap_or_else(|| "-".to_string());
        println!(
            "  {:>5}  {:>12}  {:>8.1}%",
            month.month,
            max,
            month.daylight_share() * 100.0
        );
    }
    Ok(())
}
