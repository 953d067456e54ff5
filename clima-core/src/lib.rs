//! Core library for the `clima` service.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The outbound HTTP transport seam
//! - The ViaCEP location resolver and WeatherAPI fetcher
//! - Shared domain models and temperature conversion
//!
//! It is used by `clima-server`, but can also be reused by other binaries or services.

pub mod config;
pub mod convert;
pub mod model;
pub mod provider;
pub mod transport;

pub use config::Config;
pub use convert::{celsius_to_kelvin, round_to_precision};
pub use model::{LocationLookupResult, PostalCode, ValidationError, WeatherReading, WeatherResponse};
pub use provider::{
    LocationError, LocationResolver, Providers, WeatherError, WeatherFetcher,
    providers_from_config,
};
pub use transport::{HttpTransport, ReqwestTransport, TransportError, TransportResponse};
