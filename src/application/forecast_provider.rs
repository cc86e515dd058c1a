// Provider trait for hourly forecast data access
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use thiserror::Error;

/// Raw hourly series as returned by a provider, one entry per hour of the
/// requested date range. Samples may be missing.
#[derive(Debug, Clone, PartialEq)]
pub struct HourlyForecast {
    pub times: Vec<DateTime<Utc>>,
    pub temperatures: Vec<Option<f64>>,
}

#[derive(Debug, Error)]
pub enum FetchError {
    /// Transport failure or a non-success response.
    #[error("forecast request failed: {0}")]
    Network(String),
    /// Payload is missing fields or has the wrong shape.
    #[error("malformed forecast response: {0}")]
    Malformed(String),
    /// The requested day has no predecessor in the calendar range.
    #[error("no calendar day before {0}")]
    DateOutOfRange(NaiveDate),
}

#[async_trait]
pub trait ForecastProvider: Send + Sync {
    /// Hourly temperatures from the start of `start` to the end of `end`, inclusive.
    async fn hourly_temperatures(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<HourlyForecast, FetchError>;
}
