/// Integration tests with a mocked ViaCEP
/// Tests the lookup client and the search flow without hitting the real service
use rust_cep_api::config::Config;
use rust_cep_api::errors::{
    LookupError, CONNECTION_ERROR_MESSAGE, INVALID_CEP_MESSAGE, NOT_FOUND_MESSAGE,
};
use rust_cep_api::form::CepForm;
use rust_cep_api::services::ViaCepService;
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Helper function to create a service pointing at the mock server
fn create_test_service(base_url: String) -> ViaCepService {
    let config = Config {
        viacep_base_url: base_url,
        viacep_timeout_secs: 2,
        ..Config::default()
    };
    ViaCepService::new(&config).unwrap()
}

fn paulista_payload() -> serde_json::Value {
    serde_json::json!({
        "cep": "01310-930",
        "logradouro": "Avenida Paulista",
        "complemento": "2100",
        "unidade": "",
        "bairro": "Bela Vista",
        "localidade": "São Paulo",
        "uf": "SP",
        "estado": "São Paulo",
        "regiao": "Sudeste",
        "ibge": "3550308",
        "gia": "1004",
        "ddd": "11",
        "siafi": "7107"
    })
}

#[tokio::test]
async fn test_lookup_found() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/ws/01310930/json/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(paulista_payload()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let service = create_test_service(mock_server.uri());
    let address = service.fetch_address("01310-930").await.unwrap();

    assert_eq!(address.cep.as_deref(), Some("01310-930"));
    assert_eq!(address.logradouro.as_deref(), Some("Avenida Paulista"));
    assert_eq!(address.complemento.as_deref(), Some("2100"));
    assert_eq!(address.bairro.as_deref(), Some("Bela Vista"));
    assert_eq!(address.localidade.as_deref(), Some("São Paulo"));
    assert_eq!(address.uf.as_deref(), Some("SP"));
    assert_eq!(address.ibge.as_deref(), Some("3550308"));
    assert_eq!(address.ddd.as_deref(), Some("11"));
}

#[tokio::test]
async fn test_lookup_not_found() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/ws/99999999/json/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"erro": true})))
        .mount(&mock_server)
        .await;

    let service = create_test_service(mock_server.uri());
    let result = service.fetch_address("99999999").await;

    assert_eq!(result, Err(LookupError::NotFound));
}

#[tokio::test]
async fn test_lookup_not_found_string_marker() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/ws/99999999/json/"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"erro": "true"})),
        )
        .mount(&mock_server)
        .await;

    let service = create_test_service(mock_server.uri());
    let result = service.fetch_address("99999999").await;

    assert_eq!(result, Err(LookupError::NotFound));
}

#[tokio::test]
async fn test_lookup_server_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .mount(&mock_server)
        .await;

    let service = create_test_service(mock_server.uri());
    let result = service.fetch_address("01310930").await;

    assert!(matches!(result, Err(LookupError::Transport(_))));
}

#[tokio::test]
async fn test_lookup_malformed_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>Bad Request</html>"))
        .mount(&mock_server)
        .await;

    let service = create_test_service(mock_server.uri());
    let result = service.fetch_address("01310930").await;

    assert!(matches!(result, Err(LookupError::Transport(_))));
}

#[tokio::test]
async fn test_lookup_timeout() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(paulista_payload())
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&mock_server)
        .await;

    let service = create_test_service(mock_server.uri());
    let result = service.fetch_address("01310930").await;

    assert!(matches!(result, Err(LookupError::Transport(_))));
}

#[tokio::test]
async fn test_form_search_found() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/ws/01310930/json/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(paulista_payload()))
        .mount(&mock_server)
        .await;

    let service = create_test_service(mock_server.uri());
    let mut form = CepForm::new();
    form.set_input("01310930");
    assert_eq!(form.input(), "01310-930");

    form.search(&service).await;

    assert!(!form.is_loading());
    assert!(form.error().is_empty());
    let address = form.result().unwrap();
    assert_eq!(address.localidade.as_deref(), Some("São Paulo"));
}

#[tokio::test]
async fn test_form_search_not_found() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"erro": true})))
        .mount(&mock_server)
        .await;

    let service = create_test_service(mock_server.uri());
    let mut form = CepForm::new();
    form.set_input("99999-999");

    form.search(&service).await;

    assert_eq!(form.error(), NOT_FOUND_MESSAGE);
    assert!(form.result().is_none());
    assert!(!form.is_loading());
}

#[tokio::test]
async fn test_form_search_invalid_makes_no_request() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(paulista_payload()))
        .expect(0)
        .mount(&mock_server)
        .await;

    let service = create_test_service(mock_server.uri());
    let mut form = CepForm::new();
    form.set_input("123");

    form.search(&service).await;

    assert_eq!(form.error(), INVALID_CEP_MESSAGE);
    assert!(form.result().is_none());
    assert!(!form.is_loading());
}

#[tokio::test]
async fn test_form_search_unreachable() {
    // Bind then drop a listener so the port is very likely closed
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let service = create_test_service(format!("http://{}", addr));
    let mut form = CepForm::new();
    form.set_input("01310930");

    form.search(&service).await;

    assert_eq!(form.error(), CONNECTION_ERROR_MESSAGE);
    assert!(form.result().is_none());
    assert!(!form.is_loading());
}
