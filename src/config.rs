use crate::models::DEFAULT_TARGET;
use chrono::{FixedOffset, NaiveDate, Offset, Utc};
use std::{env, path::PathBuf};
use tracing::warn;

const DEFAULT_PORT: u16 = 8000;
const DEFAULT_DATA_PATH: &str = "data/focus.json";
// Asia/Kolkata
const DEFAULT_UTC_OFFSET_MINUTES: i32 = 330;

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub data_path: PathBuf,
    pub default_target: i64,
    pub utc_offset: FixedOffset,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            default_target: DEFAULT_TARGET,
            utc_offset: offset_from_minutes(DEFAULT_UTC_OFFSET_MINUTES)
                .unwrap_or_else(|| Utc.fix()),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(path) = env::var("APP_DATA_PATH") {
            config.data_path = PathBuf::from(path);
        }
        if let Some(port) = parse_var::<u16>("PORT") {
            config.port = port;
        }
        if let Some(target) = parse_var::<i64>("FOCUS_DEFAULT_TARGET") {
            if target > 0 {
                config.default_target = target;
            } else {
                warn!("ignoring FOCUS_DEFAULT_TARGET={target}, must be > 0");
            }
        }
        if let Some(minutes) = parse_var::<i32>("FOCUS_UTC_OFFSET_MINUTES") {
            match offset_from_minutes(minutes) {
                Some(offset) => config.utc_offset = offset,
                None => warn!("ignoring out of range FOCUS_UTC_OFFSET_MINUTES={minutes}"),
            }
        }

        config
    }

    pub fn today(&self) -> NaiveDate {
        Utc::now().with_timezone(&self.utc_offset).date_naive()
    }
}

fn parse_var<T: std::str::FromStr>(name: &str) -> Option<T> {
    let raw = env::var(name).ok()?;
    match raw.trim().parse::<T>() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!("ignoring unparsable {name}={raw}");
            None
        }
    }
}

fn offset_from_minutes(minutes: i32) -> Option<FixedOffset> {
    FixedOffset::east_opt(minutes.checked_mul(60)?)
}
