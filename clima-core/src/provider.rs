use crate::{
    Config, PostalCode, WeatherReading,
    provider::{viacep::ViaCepResolver, weatherapi::WeatherApiFetcher},
    transport::{HttpTransport, TransportError},
};
use async_trait::async_trait;
use std::{fmt::Debug, sync::Arc};
use thiserror::Error;

pub mod viacep;
pub mod weatherapi;

#[derive(Debug, Error)]
pub enum LocationError {
    #[error("failed to fetch data from ViaCEP: {0}")]
    Transport(#[source] TransportError),

    #[error("failed to decode ViaCEP response: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("can not find zipcode")]
    NotFound,
}

#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("failed to fetch data from WeatherAPI: {0}")]
    Transport(#[source] TransportError),

    #[error("failed to decode WeatherAPI response: {0}")]
    Decode(#[source] serde_json::Error),
}

/// Resolves a postal code to the name of its city.
#[async_trait]
pub trait LocationResolver: Send + Sync + Debug {
    async fn resolve(&self, cep: &PostalCode) -> Result<String, LocationError>;
}

/// Fetches the current temperature for a city.
#[async_trait]
pub trait WeatherFetcher: Send + Sync + Debug {
    async fn fetch(&self, city: &str) -> Result<WeatherReading, WeatherError>;
}

/// Both upstream clients, sharing one transport.
#[derive(Debug, Clone)]
pub struct Providers {
    pub location: Arc<dyn LocationResolver>,
    pub weather: Arc<dyn WeatherFetcher>,
}

/// Construct the ViaCEP resolver and WeatherAPI fetcher from config.
pub fn providers_from_config(
    config: &Config,
    transport: Arc<dyn HttpTransport>,
) -> anyhow::Result<Providers> {
    config.validate()?;

    let location = ViaCepResolver::new(transport.clone()).with_base_url(&config.viacep.base_url);
    let weather = WeatherApiFetcher::new(transport, config.weatherapi.api_key.clone())
        .with_base_url(&config.weatherapi.base_url);

    Ok(Providers { location: Arc::new(location), weather: Arc::new(weather) })
}
