//! Weather collaborator: fetches current conditions for a location.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Current conditions at a location.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WeatherReport {
    /// Degrees Celsius.
    pub temperature_c: f64,
    /// Relative humidity, percent.
    pub humidity_pct: f64,
    pub condition: String,
    /// Metres per second.
    pub wind_speed_ms: f64,
}

impl std::fmt::Display for WeatherReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Temperature: {}°C", self.temperature_c)?;
        writeln!(f, "Humidity: {}%", self.humidity_pct)?;
        writeln!(f, "Condition: {}", self.condition)?;
        write!(f, "Wind: {} m/s", self.wind_speed_ms)
    }
}

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum WeatherError {
    #[error("no location configured")]
    NoLocation,
    #[error("weather service: {0}")]
    Service(String),
}

#[async_trait]
pub trait WeatherFetcher: Send + Sync {
    async fn fetch(&self, location: &str) -> Result<WeatherReport, WeatherError>;
}

/// Returns the same light-rain report for every location.
#[derive(Debug, Default)]
pub struct MockWeatherFetcher {
    calls: AtomicUsize,
}

impl MockWeatherFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn report() -> WeatherReport {
        WeatherReport {
            temperature_c: 28.0,
            humidity_pct: 78.0,
            condition: "light rain".to_string(),
            wind_speed_ms: 4.2,
        }
    }

    /// Number of fetches served so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl WeatherFetcher for MockWeatherFetcher {
    async fn fetch(&self, location: &str) -> Result<WeatherReport, WeatherError> {
        if location.trim().is_empty() {
            return Err(WeatherError::NoLocation);
        }
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(Self::report())
    }
}
