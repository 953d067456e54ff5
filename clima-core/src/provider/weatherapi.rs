use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;
use url::form_urlencoded;

use crate::{
    model::{CurrentWeatherEnvelope, WeatherReading},
    transport::HttpTransport,
};

use super::{WeatherError, WeatherFetcher};

pub const DEFAULT_BASE_URL: &str = "http://api.weatherapi.com";

#[derive(Clone)]
pub struct WeatherApiFetcher {
    api_key: String,
    base_url: String,
    http: Arc<dyn HttpTransport>,
}

// Keeps the API key out of logs.
impl std::fmt::Debug for WeatherApiFetcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WeatherApiFetcher")
            .field("base_url", &self.base_url)
            .field("http", &self.http)
            .finish_non_exhaustive()
    }
}

impl WeatherApiFetcher {
    pub fn new(http: Arc<dyn HttpTransport>, api_key: String) -> Self {
        Self { api_key, base_url: DEFAULT_BASE_URL.to_string(), http }
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    fn current_url(&self, city: &str) -> String {
        format!(
            "{}/v1/current.json?key={}&q={}",
            self.base_url,
            self.api_key,
            query_escape(city)
        )
    }
}

/// Form-style escaping: spaces become `+`, everything non-alphanumeric is percent-encoded.
fn query_escape(value: &str) -> String {
    form_urlencoded::byte_serialize(value.as_bytes()).collect()
}

#[async_trait]
impl WeatherFetcher for WeatherApiFetcher {
    async fn fetch(&self, city: &str) -> Result<WeatherReading, WeatherError> {
        debug!(city, "fetching current weather");

        let res = self.http.get(&self.current_url(city)).await.map_err(WeatherError::Transport)?;

        let parsed: CurrentWeatherEnvelope =
            serde_json::from_str(&res.body).map_err(WeatherError::Decode)?;

        debug!(city, temp_c = parsed.current.temp_c, "current weather received");
        Ok(parsed.current)
    }
}
