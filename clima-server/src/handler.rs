use axum::{
    extract::{RawQuery, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use clima_core::{PostalCode, WeatherResponse};
use tracing::info;
use url::form_urlencoded;

use crate::{AppState, error::ApiError};

/// `GET /clima?cep=XXXXXXXX`
pub async fn clima(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
) -> Result<Response, ApiError> {
    let raw = cep_param(query.as_deref());
    let cep = PostalCode::parse(&raw)?;

    let city = state.location.resolve(&cep).await?;
    let reading = state.weather.fetch(&city).await?;
    let response = WeatherResponse::from_reading(&reading);

    info!(%cep, %city, temp_c = response.temp_c, "weather served");
    json_response(&response)
}

pub async fn health() -> &'static str {
    "ok"
}

/// First `cep` value in the query string, empty when absent.
fn cep_param(query: Option<&str>) -> String {
    query
        .and_then(|q| {
            form_urlencoded::parse(q.as_bytes())
                .find(|(key, _)| key == "cep")
                .map(|(_, value)| value.into_owned())
        })
        .unwrap_or_default()
}

fn json_response(body: &WeatherResponse) -> Result<Response, ApiError> {
    let mut json = serde_json::to_string(body)?;
    json.push('\n');

    Ok((StatusCode::OK, [(header::CONTENT_TYPE, "application/json")], json).into_response())
}
