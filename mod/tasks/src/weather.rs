use std::time::Duration;

use taskboard_core::ServiceError;
use tracing::warn;

/// Open-Meteo geocoding endpoint.
const GEOCODING_URL: &str = "https://geocoding-api.open-meteo.com/v1/search";

/// Open-Meteo forecast endpoint.
const FORECAST_URL: &str = "https://api.open-meteo.com/v1/forecast";

/// Timeout applied to each outbound request.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Coordinates resolved from a city name.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Place {
    pub latitude: f64,
    pub longitude: f64,
}

/// Client for the two-step weather lookup: geocode a city name, then
/// fetch current conditions for the coordinates.
///
/// Both calls are sequential and bounded by a 10-second timeout; there is
/// no caching and no retry. A failing upstream call propagates as
/// [`ServiceError::Internal`].
pub struct WeatherClient {
    http: reqwest::Client,
    geocoding_url: String,
    forecast_url: String,
}

impl WeatherClient {
    pub fn new() -> Self {
        Self::with_urls(GEOCODING_URL, FORECAST_URL)
    }

    /// Override the upstream endpoints. Tests point these at a loopback
    /// stub server.
    pub fn with_urls(geocoding_url: &str, forecast_url: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            geocoding_url: geocoding_url.to_string(),
            forecast_url: forecast_url.to_string(),
        }
    }

    /// Resolve a city name to coordinates, requesting the single best
    /// match. `None` when the service has no match for the name.
    pub async fn geocode(&self, city: &str) -> Result<Option<Place>, ServiceError> {
        let resp = self
            .http
            .get(&self.geocoding_url)
            .query(&[("name", city), ("count", "1")])
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await
            .map_err(|e| ServiceError::Internal(format!("geocoding request failed: {e}")))?;

        if !resp.status().is_success() {
            warn!("geocoding returned {} for '{}'", resp.status(), city);
            return Err(ServiceError::Internal(format!(
                "geocoding returned {}",
                resp.status()
            )));
        }

        let body: serde_json::Value = resp
            .json()
            .await
            .map_err(|e| ServiceError::Internal(format!("geocoding response parse failed: {e}")))?;

        Ok(best_match(&body))
    }

    /// Fetch current temperature and wind speed for the coordinates.
    /// Returns the response's `current` object verbatim.
    pub async fn current_conditions(
        &self,
        place: &Place,
    ) -> Result<serde_json::Value, ServiceError> {
        let resp = self
            .http
            .get(&self.forecast_url)
            .query(&[
                ("latitude", place.latitude.to_string()),
                ("longitude", place.longitude.to_string()),
                ("current", "temperature_2m,wind_speed_10m".to_string()),
            ])
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await
            .map_err(|e| ServiceError::Internal(format!("forecast request failed: {e}")))?;

        if !resp.status().is_success() {
            warn!("forecast returned {}", resp.status());
            return Err(ServiceError::Internal(format!(
                "forecast returned {}",
                resp.status()
            )));
        }

        let body: serde_json::Value = resp
            .json()
            .await
            .map_err(|e| ServiceError::Internal(format!("forecast response parse failed: {e}")))?;

        Ok(body
            .get("current")
            .cloned()
            .unwrap_or_else(|| serde_json::json!({})))
    }
}

impl Default for WeatherClient {
    fn default() -> Self {
        Self::new()
    }
}

/// First geocoding result, if any. Guards against a missing or empty
/// `results` array — zero matches is a clean "no location found", not a
/// crash.
fn best_match(body: &serde_json::Value) -> Option<Place> {
    let first = body.get("results")?.as_array()?.first()?;
    Some(Place {
        latitude: first.get("latitude")?.as_f64()?,
        longitude: first.get("longitude")?.as_f64()?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn best_match_picks_first_result() {
        let body = serde_json::json!({
            "results": [
                {"name": "London", "latitude": 51.50853, "longitude": -0.12574},
                {"name": "London", "latitude": 42.98339, "longitude": -81.23304}
            ]
        });
        let place = best_match(&body).unwrap();
        assert_eq!(place.latitude, 51.50853);
        assert_eq!(place.longitude, -0.12574);
    }

    #[test]
    fn best_match_empty_results() {
        assert_eq!(best_match(&serde_json::json!({"results": []})), None);
    }

    #[test]
    fn best_match_missing_results_key() {
        assert_eq!(best_match(&serde_json::json!({"generationtime_ms": 0.5})), None);
    }

    #[test]
    fn best_match_malformed_entry() {
        let body = serde_json::json!({"results": [{"name": "Nowhere"}]});
        assert_eq!(best_match(&body), None);
    }
}
