use super::*;

fn test_client(base_url: &str) -> PlacesClient {
    PlacesClient::with_base_url("test-key", "zh-TW", 30, base_url)
        .expect("client construction should not fail")
}

#[test]
fn build_url_joins_endpoint_and_appends_language_and_key() {
    let client = test_client("https://maps.googleapis.com/maps/api");
    let url = client
        .build_url("place/details/json", &[("place_id", "p1")])
        .unwrap();
    assert_eq!(
        url.as_str(),
        "https://maps.googleapis.com/maps/api/place/details/json?place_id=p1&language=zh-TW&key=test-key"
    );
}

#[test]
fn build_url_tolerates_trailing_slash() {
    let client = test_client("https://maps.googleapis.com/maps/api/");
    let url = client.build_url("geocode/json", &[("address", "x")]).unwrap();
    assert_eq!(url.path(), "/maps/api/geocode/json");
}

#[test]
fn build_url_encodes_non_ascii_address() {
    let client = test_client("https://maps.googleapis.com/maps/api");
    let url = client
        .build_url("geocode/json", &[("address", "台北市大安區")])
        .unwrap();
    assert!(
        url.as_str().contains("address=%E5%8F%B0"),
        "address should be percent-encoded: {url}"
    );
    let decoded: Vec<(String, String)> = url.query_pairs().into_owned().collect();
    assert_eq!(decoded[0], ("address".to_string(), "台北市大安區".to_string()));
}

#[test]
fn invalid_base_url_is_rejected() {
    let result = PlacesClient::with_base_url("k", "zh-TW", 30, "not a url");
    assert!(matches!(result, Err(PlacesError::InvalidBaseUrl { .. })));
}

#[test]
fn endpoint_name_maps_paths() {
    let client = test_client("https://maps.googleapis.com/maps/api");
    let nearby = client.build_url("place/nearbysearch/json", &[]).unwrap();
    let geocode = client.build_url("geocode/json", &[]).unwrap();
    assert_eq!(endpoint_name(&nearby), "nearbysearch");
    assert_eq!(endpoint_name(&geocode), "geocode");
}
