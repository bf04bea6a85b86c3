use std::time::Duration;

use actix_web::{test, web, App};
use serde_json::{json, Value};
use shared::ai_client::FallbackClient;
use shared::storage::BucketClient;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[path = "../src/routes.rs"]
mod routes;

fn state(server: &MockServer) -> web::Data<routes::AppState> {
    web::Data::new(routes::AppState {
        ai: FallbackClient::new(
            server.uri(),
            "test-key".into(),
            vec!["model-x".into()],
            2,
            Duration::from_millis(1),
        ),
        store: BucketClient::new(server.uri(), "destination-images".into(), "service-key".into()),
    })
}

fn gateway_body(content: &str) -> Value {
    json!({
        "choices": [{"message": {"role": "assistant", "content": content}}]
    })
}

fn content_json() -> Value {
    json!({
        "title": "Ontdek Rome",
        "metaDescription": "Alles over Rome",
        "introText": "Rome is de eeuwige stad.",
        "mainContent": "Een uitgebreid artikel.",
        "tips": ["a", "b"]
    })
}

#[actix_web::test]
async fn generate_content_returns_the_record() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(gateway_body(&content_json().to_string())),
        )
        .mount(&server)
        .await;

    let app = test::init_service(
        App::new()
            .app_data(state(&server))
            .configure(routes::configure),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/generate-content")
        .set_json(json!({
            "destination": {"name": "Rome", "country": "Italië", "category": "stedentrips"},
            "pageType": "main"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["title"], "Ontdek Rome");
    assert_eq!(body["tips"], json!(["a", "b"]));
}

#[actix_web::test]
async fn empty_destination_name_maps_to_bad_request() {
    let server = MockServer::start().await;
    let app = test::init_service(
        App::new()
            .app_data(state(&server))
            .configure(routes::configure),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/generate-content")
        .set_json(json!({
            "destination": {"name": "", "country": "Italië", "category": "stedentrips"},
            "pageType": "main"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["kind"], "client_input");
}

#[actix_web::test]
async fn prose_answer_maps_to_bad_gateway() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(gateway_body(
            "Sorry, daar kan ik geen JSON voor maken.",
        )))
        .mount(&server)
        .await;

    let app = test::init_service(
        App::new()
            .app_data(state(&server))
            .configure(routes::configure),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/generate-content")
        .set_json(json!({
            "destination": {"name": "Rome", "country": "Italië", "category": "stedentrips"},
            "pageType": "main"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 502);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["kind"], "malformed_response");
}

#[actix_web::test]
async fn gateway_exhaustion_maps_to_service_unavailable() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let app = test::init_service(
        App::new()
            .app_data(state(&server))
            .configure(routes::configure),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/generate-content")
        .set_json(json!({
            "destination": {"name": "Rome", "country": "Italië", "category": "stedentrips"},
            "pageType": "main"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 503);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["kind"], "external_service_exhausted");
}

#[actix_web::test]
async fn health_endpoint_answers() {
    let server = MockServer::start().await;
    let app = test::init_service(
        App::new()
            .app_data(state(&server))
            .configure(routes::configure),
    )
    .await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());
}
