// Forecast service - Use case for building a yesterday/today snapshot
use crate::application::forecast_provider::{FetchError, ForecastProvider, HourlyForecast};
use crate::domain::forecast::{DisplayWindow, ForecastSnapshot, HOURS_PER_DAY};
use chrono::{DateTime, NaiveDate, Utc};
use std::ops::Range;
use std::sync::Arc;

#[derive(Clone)]
pub struct ForecastService {
    provider: Arc<dyn ForecastProvider>,
    window: DisplayWindow,
}

impl ForecastService {
    pub fn new(provider: Arc<dyn ForecastProvider>, window: DisplayWindow) -> Self {
        Self { provider, window }
    }

    /// Fetches yesterday and `today` in one request and cuts both days down
    /// to the display window.
    pub async fn fetch_snapshot(&self, today: NaiveDate) -> Result<ForecastSnapshot, FetchError> {
        let yesterday = today.pred_opt().ok_or(FetchError::DateOutOfRange(today))?;

        tracing::debug!(
            hours = self.window.hours(),
            "Requesting hourly forecast for {} to {}",
            yesterday,
            today
        );
        let forecast = self.provider.hourly_temperatures(yesterday, today).await?;

        slice_window(forecast, self.window, Utc::now())
    }
}

fn slice_window(
    forecast: HourlyForecast,
    window: DisplayWindow,
    fetched_at: DateTime<Utc>,
) -> Result<ForecastSnapshot, FetchError> {
    if forecast.times.len() != forecast.temperatures.len() {
        return Err(FetchError::Malformed(format!(
            "{} timestamps for {} temperatures",
            forecast.times.len(),
            forecast.temperatures.len()
        )));
    }

    let needed = window.end_hour() + HOURS_PER_DAY;
    if forecast.temperatures.len() < needed {
        return Err(FetchError::Malformed(format!(
            "expected at least {} hourly entries, got {}",
            needed,
            forecast.temperatures.len()
        )));
    }

    let yesterday_hours = window.start_hour()..window.end_hour();
    let today_hours = yesterday_hours.start + HOURS_PER_DAY..yesterday_hours.end + HOURS_PER_DAY;

    let yesterday = samples(&forecast.temperatures, yesterday_hours)?;
    let today = samples(&forecast.temperatures, today_hours.clone())?;
    let times = forecast.times[today_hours].to_vec();

    ForecastSnapshot::new(yesterday, today, times, fetched_at)
        .map_err(|e| FetchError::Malformed(e.to_string()))
}

fn samples(temperatures: &[Option<f64>], hours: Range<usize>) -> Result<Vec<f64>, FetchError> {
    hours
        .map(|i| {
            temperatures[i]
                .ok_or_else(|| FetchError::Malformed(format!("missing temperature at entry {}", i)))
        })
        .collect()
}
