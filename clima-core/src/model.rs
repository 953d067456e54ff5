use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::convert::celsius_to_kelvin;

/// Length of a CEP as accepted by the lookup service.
pub const POSTAL_CODE_LEN: usize = 8;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid zipcode")]
pub struct ValidationError;

/// A Brazilian postal code (CEP). Only the length is checked.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PostalCode(String);

impl PostalCode {
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        if raw.len() != POSTAL_CODE_LEN {
            return Err(ValidationError);
        }
        Ok(Self(raw.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PostalCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<&str> for PostalCode {
    type Error = ValidationError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

/// Body returned by `GET /ws/{cep}/json/`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct LocationLookupResult {
    #[serde(default)]
    pub localidade: String,
    /// When set, `localidade` is meaningless.
    #[serde(default)]
    pub erro: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct WeatherReading {
    pub temp_c: f64,
    pub temp_f: f64,
}

/// Body returned by `GET /v1/current.json`; everything but `current` is ignored.
#[derive(Debug, Deserialize)]
pub(crate) struct CurrentWeatherEnvelope {
    pub current: WeatherReading,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeatherResponse {
    #[serde(rename = "temp_C")]
    pub temp_c: f64,
    #[serde(rename = "temp_F")]
    pub temp_f: f64,
    #[serde(rename = "temp_K")]
    pub temp_k: f64,
}

impl WeatherResponse {
    pub fn from_reading(reading: &WeatherReading) -> Self {
        Self {
            temp_c: reading.temp_c,
            temp_f: reading.temp_f,
            temp_k: celsius_to_kelvin(reading.temp_c),
        }
    }
}

impl From<WeatherReading> for WeatherResponse {
    fn from(reading: WeatherReading) -> Self {
        Self::from_reading(&reading)
    }
}
