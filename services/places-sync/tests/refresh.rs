use serde_json::{json, Value};
use shared::error::AppError;
use uuid::Uuid;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[path = "../src/places.rs"]
mod places;

fn nearby_body(place_ids: &[&str]) -> Value {
    json!({
        "status": "OK",
        "results": place_ids
            .iter()
            .map(|id| json!({"place_id": id, "name": format!("Trattoria {id}")}))
            .collect::<Vec<_>>()
    })
}

fn details_body(place_id: &str) -> Value {
    json!({
        "status": "OK",
        "result": {
            "place_id": place_id,
            "name": format!("Trattoria {place_id}"),
            "formatted_address": "Via Roma 1, Rome",
            "formatted_phone_number": "+39 06 123456",
            "website": "https://example.com",
            "url": "https://maps.example.com/?cid=1",
            "rating": 4.5,
            "user_ratings_total": 321,
            "price_level": 2,
            "opening_hours": {
                "weekday_text": ["maandag: 12:00 – 22:00"],
                "open_now": true
            },
            "photos": [{"photo_reference": format!("ref-{place_id}")}],
            "types": ["italian_restaurant", "restaurant", "food", "establishment"]
        }
    })
}

async fn mount_details(server: &MockServer, place_id: &str, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path("/details/json"))
        .and(query_param("place_id", place_id))
        .respond_with(response)
        .mount(server)
        .await;
}

#[tokio::test]
async fn assigns_sort_order_from_search_ranking() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/nearbysearch/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(nearby_body(&["a", "b"])))
        .mount(&server)
        .await;
    mount_details(&server, "a", ResponseTemplate::new(200).set_body_json(details_body("a"))).await;
    mount_details(&server, "b", ResponseTemplate::new(200).set_body_json(details_body("b"))).await;

    let client = places::PlacesClient::new(server.uri(), "test-key".into());
    let venues = client.collect_venues(Uuid::nil(), 41.9, 12.5).await.unwrap();

    assert_eq!(venues.len(), 2);
    assert_eq!(venues[0].place_id, "a");
    assert_eq!(venues[0].sort_order, 0);
    assert_eq!(venues[1].place_id, "b");
    assert_eq!(venues[1].sort_order, 1);
    assert!(venues.iter().all(|v| v.is_visible));
}

#[tokio::test]
async fn maps_detail_fields_into_the_venue() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/nearbysearch/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(nearby_body(&["a"])))
        .mount(&server)
        .await;
    mount_details(&server, "a", ResponseTemplate::new(200).set_body_json(details_body("a"))).await;

    let client = places::PlacesClient::new(server.uri(), "test-key".into());
    let venues = client.collect_venues(Uuid::nil(), 41.9, 12.5).await.unwrap();

    let venue = &venues[0];
    assert_eq!(venue.name, "Trattoria a");
    assert_eq!(venue.address.as_deref(), Some("Via Roma 1, Rome"));
    assert_eq!(venue.rating, Some(4.5));
    assert_eq!(venue.rating_count, Some(321));
    assert_eq!(venue.price_level, Some(2));
    assert_eq!(venue.open_now, Some(true));
    assert_eq!(venue.opening_hours, vec!["maandag: 12:00 – 22:00".to_string()]);
    assert_eq!(venue.cuisine_types, vec!["italian restaurant".to_string()]);
    let photo_url = venue.photo_url.as_deref().unwrap();
    assert!(photo_url.contains("photo_reference=ref-a"));
    assert!(photo_url.contains("maxwidth=800"));
}

#[tokio::test]
async fn failed_details_lookup_skips_only_that_candidate() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/nearbysearch/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(nearby_body(&["a", "b", "c"])))
        .mount(&server)
        .await;
    mount_details(&server, "a", ResponseTemplate::new(200).set_body_json(details_body("a"))).await;
    mount_details(
        &server,
        "b",
        ResponseTemplate::new(200).set_body_json(json!({"status": "NOT_FOUND"})),
    )
    .await;
    mount_details(&server, "c", ResponseTemplate::new(200).set_body_json(details_body("c"))).await;

    let client = places::PlacesClient::new(server.uri(), "test-key".into());
    let venues = client.collect_venues(Uuid::nil(), 41.9, 12.5).await.unwrap();

    assert_eq!(venues.len(), 2);
    assert_eq!(venues[0].place_id, "a");
    assert_eq!(venues[1].place_id, "c");
    // the surviving batch is renumbered without gaps
    assert_eq!(venues[0].sort_order, 0);
    assert_eq!(venues[1].sort_order, 1);
}

#[tokio::test]
async fn zero_results_is_a_valid_empty_outcome() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/nearbysearch/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "ZERO_RESULTS"})))
        .mount(&server)
        .await;

    let client = places::PlacesClient::new(server.uri(), "test-key".into());
    let venues = client.collect_venues(Uuid::nil(), 41.9, 12.5).await.unwrap();
    assert!(venues.is_empty());
}

#[tokio::test]
async fn non_ok_search_status_is_an_external_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/nearbysearch/json"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"status": "REQUEST_DENIED"})),
        )
        .mount(&server)
        .await;

    let client = places::PlacesClient::new(server.uri(), "test-key".into());
    let err = client
        .collect_venues(Uuid::nil(), 41.9, 12.5)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::ExternalApi(_)));
    assert!(err.to_string().contains("REQUEST_DENIED"));
}

#[tokio::test]
async fn caps_the_batch_at_ten_candidates() {
    let server = MockServer::start().await;
    let ids: Vec<String> = (0..14).map(|i| format!("p{i}")).collect();
    let id_refs: Vec<&str> = ids.iter().map(String::as_str).collect();
    Mock::given(method("GET"))
        .and(path("/nearbysearch/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(nearby_body(&id_refs)))
        .mount(&server)
        .await;
    for id in &ids {
        mount_details(&server, id, ResponseTemplate::new(200).set_body_json(details_body(id)))
            .await;
    }

    let client = places::PlacesClient::new(server.uri(), "test-key".into());
    let venues = client.collect_venues(Uuid::nil(), 41.9, 12.5).await.unwrap();
    assert_eq!(venues.len(), 10);
    assert_eq!(venues.last().unwrap().place_id, "p9");
}
