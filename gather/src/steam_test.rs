use super::*;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::Router;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use axum::routing::get;
use serde_json::json;

#[derive(Clone, Default)]
struct MockSteam {
    catalog: Vec<(u32, &'static str)>,
    page_size: usize,
    fail_after_pages: Option<usize>,
    requests: Arc<Mutex<Vec<HashMap<String, String>>>>,
}

async fn app_list(State(mock): State<MockSteam>, Query(params): Query<HashMap<String, String>>) -> Response {
    let served = {
        let mut requests = mock.requests.lock().expect("mock mutex should lock");
        requests.push(params.clone());
        requests.len() - 1
    };
    if mock.fail_after_pages.is_some_and(|limit| served >= limit) {
        return StatusCode::SERVICE_UNAVAILABLE.into_response();
    }

    let last: u32 = params.get("last_appid").and_then(|v| v.parse().ok()).unwrap_or(0);
    let apps: Vec<_> = mock
        .catalog
        .iter()
        .filter(|(id, _)| *id > last)
        .take(mock.page_size)
        .map(|(id, name)| json!({ "appid": id, "name": name, "last_modified": 0 }))
        .collect();
    Json(json!({ "response": { "apps": apps, "have_more_results": !apps.is_empty() } })).into_response()
}

async fn app_details(Query(params): Query<HashMap<String, String>>) -> Response {
    match params.get("appids").map(String::as_str) {
        Some("10") => Json(json!({ "10": { "success": true, "data": { "name": "Counter-Strike" } } })).into_response(),
        Some("20") => (StatusCode::OK, "<html>not json</html>").into_response(),
        _ => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn spawn_mock(mock: MockSteam) -> String {
    let app = Router::new()
        .route("/IStoreService/GetAppList/v1/", get(app_list))
        .route("/api/appdetails", get(app_details))
        .with_state(mock);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.expect("bind mock");
    let addr = listener.local_addr().expect("mock addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("mock server");
    });
    format!("http://{addr}")
}

fn client_for(base: &str) -> SteamClient {
    SteamClient::new(base, base, Duration::from_secs(5)).expect("client should build")
}

fn catalog() -> Vec<(u32, &'static str)> {
    vec![(10, "Counter-Strike"), (20, "Team Fortress Classic"), (30, "Day of Defeat"), (40, "Deathmatch Classic"), (50, "Half-Life: Opposing Force")]
}

#[tokio::test]
async fn fetch_all_ids_walks_pages_until_empty() {
    let mock = MockSteam { catalog: catalog(), page_size: 2, ..MockSteam::default() };
    let requests = mock.requests.clone();
    let base = spawn_mock(mock).await;

    let apps = client_for(&base).fetch_all_ids("secret").await.unwrap();

    let ids: Vec<u32> = apps.iter().map(|a| a.appid).collect();
    assert_eq!(ids, vec![10, 20, 30, 40, 50]);
    assert_eq!(apps[2].name, "Day of Defeat");

    let requests = requests.lock().unwrap();
    let cursors: Vec<&str> = requests.iter().map(|r| r["last_appid"].as_str()).collect();
    assert_eq!(cursors, vec!["0", "20", "40", "50"]);
}

#[tokio::test]
async fn fetch_all_ids_sends_key_and_filters() {
    let mock = MockSteam { catalog: catalog(), page_size: 10, ..MockSteam::default() };
    let requests = mock.requests.clone();
    let base = spawn_mock(mock).await;

    client_for(&base).fetch_all_ids("secret").await.unwrap();

    let requests = requests.lock().unwrap();
    let first = &requests[0];
    assert_eq!(first["key"], "secret");
    assert_eq!(first["include_games"], "true");
    assert_eq!(first["include_dlc"], "false");
    assert_eq!(first["include_software"], "false");
    assert_eq!(first["include_videos"], "false");
    assert_eq!(first["include_hardware"], "false");
    assert_eq!(first["max_results"], "50000");
}

#[tokio::test]
async fn fetch_all_ids_keeps_pages_collected_before_error_status() {
    let mock = MockSteam { catalog: catalog(), page_size: 2, fail_after_pages: Some(1), ..MockSteam::default() };
    let base = spawn_mock(mock).await;

    let apps = client_for(&base).fetch_all_ids("secret").await.unwrap();

    let ids: Vec<u32> = apps.iter().map(|a| a.appid).collect();
    assert_eq!(ids, vec![10, 20]);
}

#[tokio::test]
async fn fetch_all_ids_empty_catalog_returns_nothing() {
    let mock = MockSteam { page_size: 2, ..MockSteam::default() };
    let requests = mock.requests.clone();
    let base = spawn_mock(mock).await;

    let apps = client_for(&base).fetch_all_ids("").await.unwrap();

    assert!(apps.is_empty());
    assert_eq!(requests.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn fetch_details_returns_json_body() {
    let base = spawn_mock(MockSteam::default()).await;

    let body = client_for(&base).fetch_details(10).await.expect("details body");

    assert_eq!(body["10"]["data"]["name"], "Counter-Strike");
}

#[tokio::test]
async fn fetch_details_skips_invalid_json_and_error_status() {
    let base = spawn_mock(MockSteam::default()).await;
    let client = client_for(&base);

    assert!(client.fetch_details(20).await.is_none());
    assert!(client.fetch_details(99).await.is_none());
}

#[test]
fn new_trims_trailing_slashes() {
    let client = SteamClient::new("http://a.test/", "http://b.test//", Duration::from_secs(1)).unwrap();
    assert_eq!(client.api_base_url, "http://a.test");
    assert_eq!(client.store_base_url, "http://b.test");
}
