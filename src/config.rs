use std::env;
use std::time::Duration;

use crate::error::AppError;
use crate::services::{MockLatency, TableOptions, courses_table::DEFAULT_SEARCH_DEBOUNCE};

#[derive(Clone, Debug)]
pub struct Config {
    /// SQLite store when set, in-memory store otherwise.
    pub database_url: Option<String>,
    pub latency: MockLatency,
    pub search_debounce: Duration,
    pub is_paid: Option<bool>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: None,
            latency: MockLatency::realistic(),
            search_debounce: DEFAULT_SEARCH_DEBOUNCE,
            is_paid: None,
        }
    }
}

impl Config {
    pub fn new_from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup; empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let latency = match get("COURSELIST_MOCK_LATENCY").as_deref().map(str::trim) {
            None | Some("on") => MockLatency::realistic(),
            Some("off") => MockLatency::none(),
            Some(other) => {
                return Err(AppError::Config(format!(
                    "COURSELIST_MOCK_LATENCY must be on or off, got {}",
                    other
                )));
            }
        };

        let search_debounce = match get("COURSELIST_SEARCH_DEBOUNCE_MS") {
            None => DEFAULT_SEARCH_DEBOUNCE,
            Some(ms) => ms.trim().parse::<u64>().map(Duration::from_millis).map_err(|_| {
                AppError::Config(format!("COURSELIST_SEARCH_DEBOUNCE_MS is not a number: {}", ms))
            })?,
        };

        let is_paid = get("COURSELIST_PAID")
            .map(|v| {
                v.trim().parse::<bool>().map_err(|_| {
                    AppError::Config(format!("COURSELIST_PAID must be true or false, got {}", v))
                })
            })
            .transpose()?;

        Ok(Self {
            database_url: get("DATABASE_URL"),
            latency,
            search_debounce,
            is_paid,
        })
    }

    pub fn table_options(&self) -> TableOptions {
        TableOptions {
            is_paid: self.is_paid,
            search_debounce: self.search_debounce,
            initial_courses: Vec::new(),
        }
    }
}
