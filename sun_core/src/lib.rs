//! Sun Core - solar event and solar position calculations
//!
//! Two stateless solvers over explicit inputs:
//!
//! - [`solve_event`] finds the instant of a named solar event (sunrise, sunset,
//!   twilight bounds, solar noon) on a calendar date using the zenith-angle
//!   hour-angle method.
//! - [`solve_position`] finds the sun's altitude and azimuth at an instant using
//!   the NOAA equation-of-time method.
//!
//! Neither solver reads the host clock or time zone. UTC offsets are passed in
//! directly or through a [`UtcOffsetResolver`].

pub mod config;
pub mod error;
pub mod event;
pub mod math;
pub mod offset;
pub mod position;
pub mod types;

pub use config::{config_dir, config_path, load_config, load_config_from, ConfigError};
pub use error::SolarError;
pub use event::{day_length, next_event_after, solve_event, upcoming_event, MAX_SCAN_DAYS};
pub use offset::{parse_timezone, OffsetFn, UtcOffsetResolver};
pub use position::{solve_position, solve_position_above_horizon};
pub use types::{EventPolarity, GeoCoordinate, SolarEventKind, SolarPosition};
