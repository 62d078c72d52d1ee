//! Host configuration parsed from environment variables.
//!
//! Every setting has a default; numbers that fail to parse fall back to it.
//! Colors and zero durations are rejected because they cannot be rendered.

use std::time::Duration;

use viewfinder::color::{Color, ColorParseError, OverlayStyle};
use viewfinder::consts::DEFAULT_CYCLE_MS;
use viewfinder::geometry::ViewportSize;

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

pub const DEFAULT_WIDTH: u32 = 1080;
pub const DEFAULT_HEIGHT: u32 = 1920;
pub const DEFAULT_FRAME_INTERVAL_MS: u64 = 16;
pub const DEFAULT_FRAMES: u64 = 120;
pub const DEFAULT_MASK_COLOR: &str = "#60000000";
pub const DEFAULT_LASER_COLOR: &str = "#ffcc0000";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid {var}: {source}")]
    Color {
        var: &'static str,
        #[source]
        source: ColorParseError,
    },
    #[error("{var} must be greater than zero")]
    Zero { var: &'static str },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostConfig {
    pub viewport: ViewportSize,
    pub frame_interval: Duration,
    /// Frames to render before detaching. Zero runs until Ctrl-C.
    pub frames: u64,
    pub cycle: Duration,
    pub style: OverlayStyle,
    /// Log the first frame's draw list as JSON.
    pub dump_json: bool,
    /// Feed synthetic decoder points and draw them.
    pub result_points: bool,
}

impl HostConfig {
    /// Build typed host config from environment variables.
    ///
    /// Optional:
    /// - `VIEWFINDER_WIDTH` / `VIEWFINDER_HEIGHT`: default 1080x1920
    /// - `VIEWFINDER_FRAME_INTERVAL_MS`: default 16
    /// - `VIEWFINDER_FRAMES`: default 120, `0` runs until interrupted
    /// - `VIEWFINDER_CYCLE_MS`: default 2000
    /// - `VIEWFINDER_MASK_COLOR`: default `#60000000`
    /// - `VIEWFINDER_LASER_COLOR`: default `#ffcc0000`
    /// - `VIEWFINDER_DUMP_JSON`: default false
    /// - `VIEWFINDER_RESULT_POINTS`: default false
    pub fn from_env() -> Result<Self, ConfigError> {
        let viewport = ViewportSize::new(
            env_parse("VIEWFINDER_WIDTH", DEFAULT_WIDTH),
            env_parse("VIEWFINDER_HEIGHT", DEFAULT_HEIGHT),
        );
        let frame_interval = positive_ms("VIEWFINDER_FRAME_INTERVAL_MS", DEFAULT_FRAME_INTERVAL_MS)?;
        let cycle = positive_ms("VIEWFINDER_CYCLE_MS", DEFAULT_CYCLE_MS)?;

        let mask_color = env_color("VIEWFINDER_MASK_COLOR", DEFAULT_MASK_COLOR)?;
        let laser_color = env_color("VIEWFINDER_LASER_COLOR", DEFAULT_LASER_COLOR)?;

        Ok(Self {
            viewport,
            frame_interval,
            frames: env_parse("VIEWFINDER_FRAMES", DEFAULT_FRAMES),
            cycle,
            style: OverlayStyle::new(mask_color, laser_color),
            dump_json: env_parse("VIEWFINDER_DUMP_JSON", false),
            result_points: env_parse("VIEWFINDER_RESULT_POINTS", false),
        })
    }
}

pub(crate) fn env_parse<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr + Copy,
{
    std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse::<T>().ok())
        .unwrap_or(default)
}

fn positive_ms(var: &'static str, default: u64) -> Result<Duration, ConfigError> {
    match env_parse(var, default) {
        0 => Err(ConfigError::Zero { var }),
        ms => Ok(Duration::from_millis(ms)),
    }
}

fn env_color(var: &'static str, default: &str) -> Result<Color, ConfigError> {
    let raw = std::env::var(var).unwrap_or_else(|_| default.to_owned());
    raw.parse().map_err(|source| ConfigError::Color { var, source })
}
