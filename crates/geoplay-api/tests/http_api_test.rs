//! End-to-end HTTP tests against a real server on an ephemeral port,
//! backed by the in-memory store.

use std::sync::Arc;

use reqwest::StatusCode;
use serde_json::{json, Value};

use geoplay_api::{build_router, AppState};
use geoplay_core::CoordinateBounds;
use geoplay_db::MemoryVideoRepository;

async fn spawn_server_with(bounds: CoordinateBounds) -> String {
    let state = AppState::new(Arc::new(MemoryVideoRepository::new()), bounds);
    let router = build_router(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    format!("http://{}", addr)
}

async fn spawn_server() -> String {
    spawn_server_with(CoordinateBounds::Permissive).await
}

fn video_body(name: &str, lat: f64, long: f64) -> Value {
    json!({ "Video": { "Name": name, "Location": { "Lat": lat, "Long": long } } })
}

async fn create(client: &reqwest::Client, base: &str, body: Value) -> Value {
    let resp = client
        .post(format!("{}/videos", base))
        .json(&body)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    resp.json().await.unwrap()
}

async fn list_len(client: &reqwest::Client, base: &str) -> usize {
    let body: Value = client
        .get(format!("{}/videos", base))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    body["Videos"].as_array().unwrap().len()
}

#[tokio::test]
async fn test_create_returns_201_with_generated_id() {
    let base = spawn_server().await;
    let client = reqwest::Client::new();

    let body = create(&client, &base, video_body("A", 36.12, -86.67)).await;

    let id = body["Video"]["Id"].as_str().unwrap();
    assert!(!id.is_empty());
    assert_eq!(body["Video"]["Name"], "A");
    assert_eq!(body["Video"]["Location"]["Lat"], 36.12);
    assert_eq!(body["Video"]["Location"]["Long"], -86.67);

    let fetched: Value = client
        .get(format!("{}/videos/{}", base, id))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(fetched, body);
}

#[tokio::test]
async fn test_create_normalizes_numeric_strings() {
    let base = spawn_server().await;
    let client = reqwest::Client::new();

    let body = create(
        &client,
        &base,
        json!({ "Video": { "Name": "S", "Location": { "Lat": "10.5", "Long": "-20" } } }),
    )
    .await;
    assert_eq!(body["Video"]["Location"]["Lat"], 10.5);
    assert_eq!(body["Video"]["Location"]["Long"], -20.0);
}

#[tokio::test]
async fn test_create_missing_long_is_400_and_stores_nothing() {
    let base = spawn_server().await;
    let client = reqwest::Client::new();

    let resp = client
        .post(format!("{}/videos", base))
        .json(&json!({ "Video": { "Name": "A", "Location": { "Lat": 1.0 } } }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["violations"][0]["field"], "Video.Location.Long");
    assert_eq!(body["violations"][0]["kind"], "missing");

    assert_eq!(list_len(&client, &base).await, 0);
}

#[tokio::test]
async fn test_malformed_json_is_400() {
    let base = spawn_server().await;
    let client = reqwest::Client::new();

    let resp = client
        .post(format!("{}/videos", base))
        .header("content-type", "application/json")
        .body("{\"Video\": ")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await.unwrap();
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_non_json_body_is_400() {
    let base = spawn_server().await;
    let client = reqwest::Client::new();

    let resp = client
        .post(format!("{}/videos", base))
        .header("content-type", "text/plain")
        .body("Name=A")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_non_finite_coordinates_are_400() {
    let base = spawn_server().await;
    let client = reqwest::Client::new();

    let resp = client
        .post(format!("{}/videos", base))
        .json(&json!({ "Video": { "Name": "A", "Location": { "Lat": "NaN", "Long": "inf" } } }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["violations"][0]["field"], "Video.Location.Lat");
    assert_eq!(body["violations"][0]["kind"], "not_numeric");
    assert_eq!(body["violations"][1]["field"], "Video.Location.Long");
    assert_eq!(list_len(&client, &base).await, 0);

    let created = create(&client, &base, video_body("A", 1.0, 2.0)).await;
    let id = created["Video"]["Id"].as_str().unwrap();
    let resp = client
        .patch(format!("{}/videos/{}", base, id))
        .json(&json!({ "Video": { "Location": { "Lat": "-inf" } } }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let resp = client
        .get(format!("{}/playlist?lat=NaN&long=1&radius=5", base))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_strict_coordinates_reject_out_of_range() {
    let base = spawn_server_with(CoordinateBounds::Strict).await;
    let client = reqwest::Client::new();

    let resp = client
        .post(format!("{}/videos", base))
        .json(&video_body("Pole", 95.0, 0.0))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["violations"][0]["kind"], "out_of_range");
}

#[tokio::test]
async fn test_playlist_orders_nearest_first() {
    let base = spawn_server().await;
    let client = reqwest::Client::new();

    // Stored far-first so ordering comes from distance, not insertion.
    let la = create(&client, &base, video_body("LA", 33.94, -118.40)).await;
    let here = create(&client, &base, video_body("Here", 36.12, -86.67)).await;

    for path in ["playlist", "playlists"] {
        let resp = client
            .get(format!(
                "{}/{}?lat=36.12&long=-86.67&radius=2000",
                base, path
            ))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = resp.json().await.unwrap();
        let playlist = body["Playlist"].as_array().unwrap();
        assert_eq!(playlist.len(), 2);
        assert_eq!(playlist[0], here);
        assert_eq!(playlist[1], la);
    }
}

#[tokio::test]
async fn test_playlist_excludes_outside_radius_and_hides_distance() {
    let base = spawn_server().await;
    let client = reqwest::Client::new();

    create(&client, &base, video_body("LA", 33.94, -118.40)).await;
    create(&client, &base, video_body("Here", 36.12, -86.67)).await;

    let body: Value = client
        .get(format!("{}/playlist?lat=36.12&long=-86.67&radius=100", base))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let playlist = body["Playlist"].as_array().unwrap();
    assert_eq!(playlist.len(), 1);

    let video = playlist[0]["Video"].as_object().unwrap();
    let mut keys: Vec<&str> = video.keys().map(String::as_str).collect();
    keys.sort_unstable();
    assert_eq!(keys, vec!["Id", "Location", "Name"]);
}

#[tokio::test]
async fn test_playlist_bad_params_are_400() {
    let base = spawn_server().await;
    let client = reqwest::Client::new();

    for query in [
        "lat=36.12&long=-86.67",
        "lat=36.12&long=west&radius=5",
        "lat=&long=1&radius=5",
        "",
    ] {
        let resp = client
            .get(format!("{}/playlist?{}", base, query))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "query {:?}", query);
        let body: Value = resp.json().await.unwrap();
        assert!(body["error"].is_string());
    }
}

#[tokio::test]
async fn test_patch_nonexistent_is_404_and_creates_nothing() {
    let base = spawn_server().await;
    let client = reqwest::Client::new();

    let resp = client
        .patch(format!("{}/videos/does-not-exist", base))
        .json(&json!({ "Video": { "Name": "B" } }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(list_len(&client, &base).await, 0);
}

#[tokio::test]
async fn test_patch_updates_only_supplied_fields() {
    let base = spawn_server().await;
    let client = reqwest::Client::new();
    let created = create(&client, &base, video_body("A", 1.0, 2.0)).await;
    let id = created["Video"]["Id"].as_str().unwrap();

    let resp = client
        .patch(format!("{}/videos/{}", base, id))
        .json(&json!({ "Video": { "Name": "B" } }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["Video"]["Name"], "B");
    assert_eq!(body["Video"]["Location"], json!({ "Lat": 1.0, "Long": 2.0 }));
    assert_eq!(body["Video"]["Id"], id);

    let resp = client
        .patch(format!("{}/videos/{}", base, id))
        .json(&json!({ "Video": {} }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let unchanged: Value = resp.json().await.unwrap();
    assert_eq!(unchanged, body);
}

#[tokio::test]
async fn test_patch_non_string_name_is_400() {
    let base = spawn_server().await;
    let client = reqwest::Client::new();
    let created = create(&client, &base, video_body("A", 1.0, 2.0)).await;
    let id = created["Video"]["Id"].as_str().unwrap();

    let resp = client
        .patch(format!("{}/videos/{}", base, id))
        .json(&json!({ "Video": { "Name": 5 } }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_replace() {
    let base = spawn_server().await;
    let client = reqwest::Client::new();
    let created = create(&client, &base, video_body("A", 1.0, 2.0)).await;
    let id = created["Video"]["Id"].as_str().unwrap();

    let resp = client
        .put(format!("{}/videos/{}", base, id))
        .json(&json!({
            "Video": { "Id": id, "Name": "R", "Location": { "Lat": 3.0, "Long": 4.0 } }
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["Video"]["Name"], "R");
    assert_eq!(body["Video"]["Id"], id);

    let resp = client
        .put(format!("{}/videos/{}", base, id))
        .json(&json!({
            "Video": { "Id": "other", "Name": "R", "Location": { "Lat": 3.0, "Long": 4.0 } }
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let resp = client
        .put(format!("{}/videos/missing", base))
        .json(&video_body("R", 0.0, 0.0))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(list_len(&client, &base).await, 1);
}

#[tokio::test]
async fn test_delete() {
    let base = spawn_server().await;
    let client = reqwest::Client::new();
    let created = create(&client, &base, video_body("A", 1.0, 2.0)).await;
    let id = created["Video"]["Id"].as_str().unwrap();

    let resp = client
        .delete(format!("{}/videos/{}", base, id))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["success"], format!("Deleted id: {}", id));

    let resp = client
        .delete(format!("{}/videos/{}", base, id))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let resp = client
        .get(format!("{}/videos/{}", base, id))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_root_redirects_to_video_list() {
    let base = spawn_server().await;
    let client = reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .unwrap();

    let resp = client.get(format!("{}/", base)).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(resp.headers()["location"], "/videos");
}

#[tokio::test]
async fn test_health_and_fallback() {
    let base = spawn_server().await;
    let client = reqwest::Client::new();

    let resp = client.get(format!("{}/health", base)).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp.headers().contains_key("x-request-id"));
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["status"], "healthy");

    let resp = client.get(format!("{}/unknown", base)).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"], "Not found");
}
