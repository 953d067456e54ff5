use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::{
    model::{LocationLookupResult, PostalCode},
    transport::HttpTransport,
};

use super::{LocationError, LocationResolver};

pub const DEFAULT_BASE_URL: &str = "https://viacep.com.br";

#[derive(Debug, Clone)]
pub struct ViaCepResolver {
    base_url: String,
    http: Arc<dyn HttpTransport>,
}

impl ViaCepResolver {
    pub fn new(http: Arc<dyn HttpTransport>) -> Self {
        Self { base_url: DEFAULT_BASE_URL.to_string(), http }
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    fn lookup_url(&self, cep: &PostalCode) -> String {
        format!("{}/ws/{}/json/", self.base_url, cep)
    }
}

#[async_trait]
impl LocationResolver for ViaCepResolver {
    async fn resolve(&self, cep: &PostalCode) -> Result<String, LocationError> {
        let url = self.lookup_url(cep);
        debug!(%url, "looking up postal code");

        let res = self.http.get(&url).await.map_err(LocationError::Transport)?;

        let parsed: LocationLookupResult =
            serde_json::from_str(&res.body).map_err(LocationError::Decode)?;

        if parsed.erro {
            return Err(LocationError::NotFound);
        }

        debug!(%cep, city = %parsed.localidade, "postal code resolved");
        Ok(parsed.localidade)
    }
}
