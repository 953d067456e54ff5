//! Resolver and fetcher over the reqwest transport, against wiremock upstreams.

use std::sync::Arc;

use clima_core::{
    LocationError, LocationResolver, PostalCode, ReqwestTransport, WeatherError, WeatherFetcher,
    provider::{viacep::ViaCepResolver, weatherapi::WeatherApiFetcher},
};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn transport() -> Arc<ReqwestTransport> {
    Arc::new(ReqwestTransport::new())
}

#[tokio::test]
async fn viacep_lookup_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/ws/01001000/json/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "cep": "01001-000",
            "logradouro": "Praça da Sé",
            "localidade": "São Paulo",
            "uf": "SP"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let resolver = ViaCepResolver::new(transport()).with_base_url(&mock_server.uri());
    let cep = PostalCode::parse("01001000").unwrap();

    let city = resolver.resolve(&cep).await.unwrap();

    assert_eq!(city, "São Paulo");
}

#[tokio::test]
async fn viacep_reports_unknown_cep() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/ws/99999999/json/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "erro": true })))
        .mount(&mock_server)
        .await;

    let resolver = ViaCepResolver::new(transport()).with_base_url(&mock_server.uri());
    let cep = PostalCode::parse("99999999").unwrap();

    let err = resolver.resolve(&cep).await.unwrap_err();

    assert!(matches!(err, LocationError::NotFound));
    assert_eq!(err.to_string(), "can not find zipcode");
}

#[tokio::test]
async fn viacep_error_page_is_decode_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(400).set_body_string("<h1>Bad Request</h1>"))
        .mount(&mock_server)
        .await;

    let resolver = ViaCepResolver::new(transport()).with_base_url(&mock_server.uri());
    let cep = PostalCode::parse("0100100x").unwrap();

    let err = resolver.resolve(&cep).await.unwrap_err();

    assert!(matches!(err, LocationError::Decode(_)));
}

#[tokio::test]
async fn viacep_unreachable_is_transport_error() {
    let resolver = ViaCepResolver::new(transport()).with_base_url("http://127.0.0.1:1");
    let cep = PostalCode::parse("01001000").unwrap();

    let err = resolver.resolve(&cep).await.unwrap_err();

    assert!(matches!(err, LocationError::Transport(_)));
    assert!(err.to_string().starts_with("failed to fetch data from ViaCEP: "));
}

#[tokio::test]
async fn weatherapi_current_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/current.json"))
        .and(query_param("key", "test_key"))
        .and(query_param("q", "São Paulo"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "location": { "name": "Sao Paulo", "country": "Brazil" },
            "current": {
                "temp_c": 28.5,
                "temp_f": 83.3,
                "condition": { "text": "Partly cloudy" }
            }
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let fetcher =
        WeatherApiFetcher::new(transport(), "test_key".into()).with_base_url(&mock_server.uri());

    let reading = fetcher.fetch("São Paulo").await.unwrap();

    assert_eq!(reading.temp_c, 28.5);
    assert_eq!(reading.temp_f, 83.3);
}

#[tokio::test]
async fn weatherapi_rejected_key_is_decode_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/current.json"))
        .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
            "error": { "code": 2006, "message": "API key is invalid." }
        })))
        .mount(&mock_server)
        .await;

    let fetcher =
        WeatherApiFetcher::new(transport(), "bad_key".into()).with_base_url(&mock_server.uri());

    let err = fetcher.fetch("Recife").await.unwrap_err();

    assert!(matches!(err, WeatherError::Decode(_)));
    assert!(err.to_string().starts_with("failed to decode WeatherAPI response: "));
}
