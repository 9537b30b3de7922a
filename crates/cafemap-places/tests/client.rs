//! Integration tests for `PlacesClient` using wiremock HTTP mocks.

use cafemap_core::Region;
use cafemap_places::{GridPoint, PlacesClient, PlacesError};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(base_url: &str) -> PlacesClient {
    PlacesClient::with_base_url("test-key", "zh-TW", 30, base_url)
        .expect("client construction should not fail")
        .with_retry(0, 0)
}

fn daan() -> Region {
    Region::new("台北市", "大安區")
}

fn point() -> GridPoint {
    GridPoint {
        lat: 25.01,
        lng: 121.528,
    }
}

#[tokio::test]
async fn resolve_region_returns_viewport() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "status": "OK",
        "results": [{
            "formatted_address": "106台灣台北市大安區",
            "geometry": {
                "location": { "lat": 25.026, "lng": 121.543 },
                "viewport": {
                    "southwest": { "lat": 25.01, "lng": 121.528 },
                    "northeast": { "lat": 25.044, "lng": 121.56 }
                }
            }
        }]
    });

    Mock::given(method("GET"))
        .and(path("/geocode/json"))
        .and(query_param("address", "台北市大安區"))
        .and(query_param("language", "zh-TW"))
        .and(query_param("key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let bounds = client
        .resolve_region(&daan())
        .await
        .expect("should resolve region");

    assert!((bounds.southwest.lat - 25.01).abs() < 1e-9);
    assert!((bounds.northeast.lng - 121.56).abs() < 1e-9);
}

#[tokio::test]
async fn resolve_region_non_ok_status_is_region_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/geocode/json"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "status": "ZERO_RESULTS", "results": [] })),
        )
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client.resolve_region(&daan()).await.unwrap_err();

    assert!(
        matches!(err, PlacesError::RegionNotFound { ref status, .. } if status == "ZERO_RESULTS"),
        "got: {err:?}"
    );
}

#[tokio::test]
async fn resolve_region_ok_without_results_is_region_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/geocode/json"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "status": "OK", "results": [] })),
        )
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client.resolve_region(&daan()).await.unwrap_err();
    assert!(matches!(err, PlacesError::RegionNotFound { .. }));
}

#[tokio::test]
async fn search_nearby_returns_candidates() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "status": "OK",
        "results": [
            { "place_id": "p1", "name": "好咖啡", "rating": 4.5, "vicinity": "大安路" },
            { "place_id": "p2", "name": "Second Cup" }
        ]
    });

    Mock::given(method("GET"))
        .and(path("/place/nearbysearch/json"))
        .and(query_param("location", "25.01,121.528"))
        .and(query_param("radius", "1000"))
        .and(query_param("keyword", "咖啡"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let results = client.search_nearby(point(), 1000, "咖啡").await;

    assert_eq!(results.len(), 2);
    assert_eq!(results[0].place_id, "p1");
    assert_eq!(results[0].rating, Some(4.5));
    assert_eq!(results[1].rating, None);
}

#[tokio::test]
async fn search_nearby_zero_results_is_empty_success() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/place/nearbysearch/json"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "status": "ZERO_RESULTS", "results": [] })),
        )
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let results = client
        .try_search_nearby(point(), 1000, "咖啡")
        .await
        .expect("ZERO_RESULTS is not an error");
    assert!(results.is_empty());
}

#[tokio::test]
async fn search_nearby_error_status_degrades_to_empty() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/place/nearbysearch/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "REQUEST_DENIED",
            "error_message": "The provided API key is invalid.",
            "results": []
        })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());

    let err = client
        .try_search_nearby(point(), 1000, "咖啡")
        .await
        .unwrap_err();
    assert!(
        matches!(err, PlacesError::ApiStatus { ref status, .. } if status == "REQUEST_DENIED"),
        "got: {err:?}"
    );
    assert!(client.search_nearby(point(), 1000, "咖啡").await.is_empty());
}

#[tokio::test]
async fn search_nearby_malformed_body_degrades_to_empty() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/place/nearbysearch/json"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client
        .try_search_nearby(point(), 1000, "咖啡")
        .await
        .unwrap_err();
    assert!(matches!(err, PlacesError::Deserialize { .. }));
    assert!(client.search_nearby(point(), 1000, "咖啡").await.is_empty());
}

#[tokio::test]
async fn server_error_does_not_leak_api_key() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/place/details/json"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client.fetch_detail("p1").await.unwrap_err();
    assert!(matches!(err, PlacesError::Http(_)));
    assert!(!err.to_string().contains("test-key"), "leaked key: {err}");
}

#[tokio::test]
async fn transient_status_is_retried() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/place/nearbysearch/json"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "status": "OVER_QUERY_LIMIT", "results": [] })),
        )
        .up_to_n_times(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/place/nearbysearch/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "OK",
            "results": [{ "place_id": "p1", "name": "Cafe" }]
        })))
        .mount(&server)
        .await;

    let client = PlacesClient::with_base_url("test-key", "zh-TW", 30, &server.uri())
        .unwrap()
        .with_retry(2, 0);
    let results = client.search_nearby(point(), 1000, "咖啡").await;

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].place_id, "p1");
}

#[tokio::test]
async fn fetch_detail_returns_parsed_detail() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "status": "OK",
        "result": {
            "place_id": "p1",
            "name": "好咖啡",
            "formatted_address": "106台北市大安區大安路1號",
            "formatted_phone_number": "02 2700 0000",
            "rating": 4.6,
            "price_level": 2,
            "serves_beer": true,
            "takeout": false,
            "types": ["cafe", "food", "point_of_interest"],
            "user_ratings_total": 87,
            "opening_hours": {
                "open_now": true,
                "weekday_text": ["星期一: 09:00–18:00"]
            },
            "reviews": [{
                "author_name": "Lin",
                "rating": 5,
                "text": "很棒",
                "relative_time_description": "3 週前"
            }]
        }
    });

    Mock::given(method("GET"))
        .and(path("/place/details/json"))
        .and(query_param("place_id", "p1"))
        .and(query_param("language", "zh-TW"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let detail = client.fetch_detail("p1").await.expect("should parse detail");

    assert_eq!(detail.place_id, "p1");
    assert_eq!(detail.price_level, Some(2));
    assert_eq!(detail.serves_beer, Some(true));
    assert_eq!(detail.takeout, Some(false));
    assert_eq!(detail.serves_brunch, None);
    assert_eq!(detail.user_ratings_total, Some(87));
    let reviews = detail.reviews.expect("reviews present");
    assert!((reviews[0].rating - 5.0).abs() < f64::EPSILON);
}

#[tokio::test]
async fn fetch_detail_without_result_is_an_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/place/details/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "NOT_FOUND",
            "html_attributions": []
        })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client.fetch_detail("missing").await.unwrap_err();
    assert!(
        matches!(err, PlacesError::ApiStatus { ref status, .. } if status == "NOT_FOUND"),
        "got: {err:?}"
    );
}
