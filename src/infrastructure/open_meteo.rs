// Open-Meteo forecast provider implementation
use crate::application::forecast_provider::{FetchError, ForecastProvider, HourlyForecast};
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate};
use serde::Deserialize;

/// Only `temperature_2m` is charted; the rest are requested so the payload
/// already carries them.
const HOURLY_FIELDS: &str = "temperature_2m,apparent_temperature,precipitation,cloudcover";
const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone)]
pub struct OpenMeteoProvider {
    base_url: String,
    latitude: f64,
    longitude: f64,
    client: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    hourly: HourlyBlock,
}

#[derive(Debug, Deserialize)]
struct HourlyBlock {
    time: Vec<i64>,
    temperature_2m: Vec<Option<f64>>,
    #[serde(default)]
    #[allow(dead_code)]
    apparent_temperature: Vec<Option<f64>>,
    #[serde(default)]
    #[allow(dead_code)]
    precipitation: Vec<Option<f64>>,
    #[serde(default)]
    #[allow(dead_code)]
    cloudcover: Vec<Option<f64>>,
}

impl OpenMeteoProvider {
    pub fn new(base_url: String, latitude: f64, longitude: f64) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            latitude,
            longitude,
            client: reqwest::Client::new(),
        }
    }

    fn build_query_url(&self, start: NaiveDate, end: NaiveDate) -> String {
        format!(
            "{}/v1/forecast?latitude={}&longitude={}&hourly={}\
             &temperature_unit=fahrenheit&windspeed_unit=kn&precipitation_unit=inch\
             &timeformat=unixtime&timezone=auto&start_date={}&end_date={}",
            self.base_url,
            self.latitude,
            self.longitude,
            urlencoding::encode(HOURLY_FIELDS),
            start.format(DATE_FORMAT),
            end.format(DATE_FORMAT)
        )
    }
}

/// Decodes a forecast body into an hourly series.
fn parse_forecast(body: &str) -> Result<HourlyForecast, FetchError> {
    let response: ForecastResponse =
        serde_json::from_str(body).map_err(|e| FetchError::Malformed(e.to_string()))?;

    let times = response
        .hourly
        .time
        .iter()
        .map(|&seconds| {
            DateTime::from_timestamp(seconds, 0).ok_or_else(|| {
                FetchError::Malformed(format!("timestamp {} is out of range", seconds))
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(HourlyForecast {
        times,
        temperatures: response.hourly.temperature_2m,
    })
}

#[async_trait]
impl ForecastProvider for OpenMeteoProvider {
    async fn hourly_temperatures(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<HourlyForecast, FetchError> {
        let url = self.build_query_url(start, end);
        tracing::debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| FetchError::Network(format!("failed to reach Open-Meteo: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::Network(format!(
                "Open-Meteo returned status {}: {}",
                status, body
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| FetchError::Network(format!("failed to read Open-Meteo body: {}", e)))?;

        parse_forecast(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_build_query_url() {
        let provider = OpenMeteoProvider::new(
            "https://api.open-meteo.com/".to_string(),
            37.7818837,
            -122.4311703,
        );
        let url = provider.build_query_url(
            NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 5, 2).unwrap(),
        );

        assert_eq!(
            url,
            "https://api.open-meteo.com/v1/forecast?latitude=37.7818837&longitude=-122.4311703\
             &hourly=temperature_2m%2Capparent_temperature%2Cprecipitation%2Ccloudcover\
             &temperature_unit=fahrenheit&windspeed_unit=kn&precipitation_unit=inch\
             &timeformat=unixtime&timezone=auto&start_date=2024-05-01&end_date=2024-05-02"
        );
    }

    #[test]
    fn test_parse_forecast() {
        let body = r#"{
            "latitude": 37.78,
            "longitude": -122.43,
            "utc_offset_seconds": -25200,
            "hourly_units": {"time": "unixtime", "temperature_2m": "°F"},
            "hourly": {
                "time": [1714546800, 1714550400, 1714554000],
                "temperature_2m": [55.4, null, 57.1],
                "apparent_temperature": [52.0, 53.1, 54.9],
                "precipitation": [0.0, 0.0, 0.01],
                "cloudcover": [100, 87, 40]
            }
        }"#;

        let forecast = parse_forecast(body).unwrap();
        assert_eq!(
            forecast.times,
            vec![
                Utc.with_ymd_and_hms(2024, 5, 1, 7, 0, 0).unwrap(),
                Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap(),
                Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap(),
            ]
        );
        assert_eq!(forecast.temperatures, vec![Some(55.4), None, Some(57.1)]);
    }

    #[test]
    fn test_parse_forecast_without_optional_fields() {
        let body = r#"{"hourly": {"time": [0], "temperature_2m": [60]}}"#;
        let forecast = parse_forecast(body).unwrap();
        assert_eq!(forecast.temperatures, vec![Some(60.0)]);
    }

    #[test]
    fn test_parse_forecast_rejects_wrong_shape() {
        let missing_hourly = r#"{"error": true, "reason": "Latitude must be in range"}"#;
        assert!(matches!(
            parse_forecast(missing_hourly),
            Err(FetchError::Malformed(_))
        ));

        let wrong_type = r#"{"hourly": {"time": "yesterday", "temperature_2m": []}}"#;
        assert!(matches!(parse_forecast(wrong_type), Err(FetchError::Malformed(_))));

        assert!(matches!(parse_forecast("<html>"), Err(FetchError::Malformed(_))));
    }
}
