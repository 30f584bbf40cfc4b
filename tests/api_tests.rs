//! End-to-end tests for the Stylecast HTTP surface.
//!
//! Every upstream (weather, geocoding, catalog, model) is served by one
//! wiremock server; requests go through the full router with `oneshot`.

use std::collections::HashMap;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use stylecast::location_resolver::ADDRESS_LOOKUP_ERROR;
use stylecast::{AppState, StylecastConfig, web};
use tower::ServiceExt;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const WEATHER_PATH: &str = "/data/2.5/weather";
const ADDRESS_PATH: &str = "/v2/local/geo/coord2address.json";
const CATALOG_PATH: &str = "/rest/v1/clothes";
const MODEL_PATH: &str = "/v1beta/models/gemini-1.5-flash:generateContent";

fn app_for(server: &MockServer) -> Router {
    let uri = server.uri();
    let vars: HashMap<&str, String> = HashMap::from([
        ("SUPABASE_URL", uri.clone()),
        ("SUPABASE_KEY", "service-key".to_string()),
        ("GEMINI_API_KEY", "gemini-key".to_string()),
        ("OPENWEATHER_API_KEY", "weather-key".to_string()),
        ("KAKAO_API_KEY", "kakao-key".to_string()),
        ("STYLECAST_WEATHER_BASE_URL", uri.clone()),
        ("STYLECAST_GEOCODING_BASE_URL", uri.clone()),
        ("STYLECAST_MODEL_BASE_URL", uri),
    ]);
    let config = StylecastConfig::from_lookup(|key| vars.get(key).cloned()).unwrap();
    let state = AppState::from_config(&config).unwrap();
    web::app(&config, state)
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

fn get_weather(query: &str) -> Request<Body> {
    Request::builder()
        .uri(format!("/test-weather?{query}"))
        .body(Body::empty())
        .unwrap()
}

fn post_recommend(body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/recommend")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn mount_weather(server: &MockServer, body: Value) {
    Mock::given(method("GET"))
        .and(path(WEATHER_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

fn clear_weather() -> Value {
    json!({
        "weather": [{"id": 800, "main": "Clear", "description": "맑음", "icon": "01d"}],
        "main": {"temp": 26.3, "feels_like": 27.1, "humidity": 60},
        "name": "Seoul",
        "cod": 200
    })
}

async fn mount_address(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path(ADDRESS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "documents": [{
                "road_address": {"address_name": "서울 중구 세종대로 110"},
                "address": {"address_name": "서울 중구 태평로1가 31"}
            }]
        })))
        .mount(server)
        .await;
}

async fn mount_catalog(server: &MockServer, rows: Value, expected_calls: u64) {
    Mock::given(method("GET"))
        .and(path(CATALOG_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(rows))
        .expect(expected_calls)
        .mount(server)
        .await;
}

async fn mount_model(server: &MockServer, text: &str, expected_calls: u64) {
    Mock::given(method("POST"))
        .and(path(MODEL_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{"content": {"role": "model", "parts": [{"text": text}]}}]
        })))
        .expect(expected_calls)
        .mount(server)
        .await;
}

fn summer_catalog() -> Value {
    json!([
        {"id": 1, "name": "린넨 셔츠", "category": "top", "image_url": "https://example.com/shirt.jpg"},
        {"id": 2, "name": "면 반바지", "category": "bottom", "image_url": "https://example.com/shorts.jpg"},
        {"id": 3, "name": "샌들", "category": "shoes", "image_url": "https://example.com/sandals.jpg"},
        {"id": 4, "name": "밀짚모자", "category": "hat", "image_url": "https://example.com/hat.jpg"}
    ])
}

fn model_recommendations() -> Value {
    json!([
        {
            "style_description": "시원한 여름 캐주얼룩",
            "reason": "한낮 기온이 26도를 넘습니다",
            "items": {
                "bottom": {"id": 2, "name": "면 반바지", "image_url": "https://example.com/shorts.jpg", "color": "beige"},
                "shoes": {"id": 3, "name": "샌들", "image_url": "https://example.com/sandals.jpg"},
                "top": {"id": 1, "name": "린넨 셔츠", "image_url": "https://example.com/shirt.jpg"}
            }
        }
    ])
}

#[tokio::test]
async fn test_weather_returns_all_six_fields() {
    let server = MockServer::start().await;
    mount_weather(&server, clear_weather()).await;
    mount_address(&server).await;

    let (status, body) = send(app_for(&server), get_weather("lat=37.5665&lon=126.978")).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.get("error").is_none());
    let weather = &body["weather"];
    assert_eq!(weather["city_name"], "Seoul");
    assert_eq!(weather["temp"], 26.3);
    assert_eq!(weather["feels_like"], 27.1);
    assert_eq!(weather["description"], "맑음");
    assert_eq!(weather["icon"], "01d");
    assert_eq!(weather["detailed_address"], "서울 중구 세종대로 110");
}

#[tokio::test]
async fn test_weather_provider_error_returns_error_only() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(WEATHER_PATH))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "cod": 401,
            "message": "Invalid API key."
        })))
        .mount(&server)
        .await;

    let (status, body) = send(app_for(&server), get_weather("lat=37.5665&lon=126.978")).await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(body.get("weather").is_none());
    assert_eq!(body["error"], "날씨 정보를 가져올 수 없습니다.");
}

#[tokio::test]
async fn test_weather_survives_geocoding_failure() {
    let server = MockServer::start().await;
    mount_weather(&server, clear_weather()).await;
    Mock::given(method("GET"))
        .and(path(ADDRESS_PATH))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let (status, body) = send(app_for(&server), get_weather("lat=37.5665&lon=126.978")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["weather"]["detailed_address"], ADDRESS_LOOKUP_ERROR);
}

#[tokio::test]
async fn test_weather_rejects_non_numeric_query() {
    let server = MockServer::start().await;

    let (status, body) = send(app_for(&server), get_weather("lat=north&lon=126.978")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
    assert!(body.get("weather").is_none());
}

#[tokio::test]
async fn test_recommend_strips_fences_and_returns_sets_verbatim() {
    let server = MockServer::start().await;
    mount_weather(&server, clear_weather()).await;
    mount_address(&server).await;
    mount_catalog(&server, summer_catalog(), 1).await;
    let reply = format!(
        "```json\n{}\n```",
        json!({"recommendations": model_recommendations()})
    );
    mount_model(&server, &reply, 1).await;

    let (status, body) = send(
        app_for(&server),
        post_recommend(json!({"lat": 37.5665, "lon": 126.978})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["weather"]["city_name"], "Seoul");
    assert_eq!(body["recommendations"], model_recommendations());
}

#[tokio::test]
async fn test_recommend_sends_unfiltered_catalog_to_model() {
    let server = MockServer::start().await;
    mount_weather(&server, clear_weather()).await;
    mount_address(&server).await;
    mount_catalog(&server, summer_catalog(), 1).await;
    let reply = json!({"recommendations": model_recommendations()}).to_string();
    mount_model(&server, &reply, 1).await;

    let (status, _) = send(
        app_for(&server),
        post_recommend(json!({"lat": 37.5665, "lon": 126.978})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let requests = server.received_requests().await.unwrap();
    let model_request = requests
        .iter()
        .find(|r| r.url.path() == MODEL_PATH)
        .unwrap();
    let sent: Value = serde_json::from_slice(&model_request.body).unwrap();
    let prompt = sent["contents"][0]["parts"][0]["text"].as_str().unwrap();
    assert!(prompt.contains("밀짚모자"));
    assert!(prompt.contains("서울 중구 세종대로 110"));
}

#[tokio::test]
async fn test_recommend_weather_error_skips_catalog_and_model() {
    let server = MockServer::start().await;
    mount_weather(&server, json!({"cod": "404", "message": "city not found"})).await;
    mount_catalog(&server, summer_catalog(), 0).await;
    mount_model(&server, "{}", 0).await;

    let (status, body) = send(
        app_for(&server),
        post_recommend(json!({"lat": 37.5665, "lon": 126.978})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["error"], "날씨 정보를 가져올 수 없습니다.");
    assert!(body.get("recommendations").is_none());
}

#[tokio::test]
async fn test_recommend_empty_catalog_skips_model() {
    let server = MockServer::start().await;
    mount_weather(&server, clear_weather()).await;
    mount_address(&server).await;
    mount_catalog(&server, json!([]), 1).await;
    mount_model(&server, "{}", 0).await;

    let (status, body) = send(
        app_for(&server),
        post_recommend(json!({"lat": 37.5665, "lon": 126.978})),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"error": "옷 정보를 찾을 수 없습니다."}));
}

#[tokio::test]
async fn test_recommend_invalid_model_json_has_details() {
    let server = MockServer::start().await;
    mount_weather(&server, clear_weather()).await;
    mount_address(&server).await;
    mount_catalog(&server, summer_catalog(), 1).await;
    mount_model(&server, "오늘은 린넨 셔츠가 좋겠어요!", 1).await;

    let (status, body) = send(
        app_for(&server),
        post_recommend(json!({"lat": 37.5665, "lon": 126.978})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["error"], "추천 생성 중 오류가 발생했습니다.");
    let details = body["details"].as_str().unwrap();
    assert!(!details.is_empty());
}

#[tokio::test]
async fn test_recommend_rejects_missing_coordinates() {
    let server = MockServer::start().await;

    let (status, body) = send(app_for(&server), post_recommend(json!({"lat": 37.5665}))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "위치 정보가 올바르지 않습니다.");
    assert!(!body["details"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn test_index_serves_html() {
    let server = MockServer::start().await;

    let response = app_for(&server)
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response.headers()[header::CONTENT_TYPE].to_str().unwrap();
    assert!(content_type.starts_with("text/html"));
}

#[tokio::test]
async fn test_index_renders_upstream_text_without_html_parsing() {
    let server = MockServer::start().await;

    let response = app_for(&server)
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let page = String::from_utf8(bytes.to_vec()).unwrap();

    assert!(!page.contains("innerHTML"));
    assert!(page.contains("textContent"));
}
