//! Shared helpers for the wiremock-backed integration tests.

#![allow(dead_code)]

use serde_json::{Value, json};
use syncliked::{config::Config, spotify::SpotifyClient};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

pub const USER_ID: &str = "user1";
pub const PLAYLIST_ID: &str = "pl1";
pub const PLAYLIST_URL: &str = "https://open.spotify.com/playlist/pl1";

/// Configuration pointing every Spotify endpoint at the mock server.
pub fn mock_config(server: &MockServer) -> Config {
    let mut config = Config::new("client-id", "client-secret");
    config.api_url = format!("{}/v1", server.uri());
    config.token_url = format!("{}/api/token", server.uri());
    config.auth_url = format!("{}/authorize", server.uri());
    config
}

pub fn mock_client(server: &MockServer) -> SpotifyClient {
    SpotifyClient::new(mock_config(server)).unwrap()
}

pub fn track_uri(index: usize) -> String {
    format!("spotify:track:{index:06}")
}

/// A saved-tracks page holding tracks `start..start + count`.
pub fn liked_page(start: usize, count: usize, total: usize) -> Value {
    let items: Vec<Value> = (start..start + count)
        .map(|i| {
            json!({
                "added_at": "2024-01-01T00:00:00Z",
                "track": {
                    "id": format!("{i:06}"),
                    "name": format!("Track {i}"),
                    "uri": track_uri(i)
                }
            })
        })
        .collect();

    json!({ "items": items, "next": null, "total": total })
}

/// Serves a liked-tracks collection of `total` tracks, one mock per offset.
pub async fn mount_liked_tracks(server: &MockServer, total: usize) {
    let mut offset = 0;
    loop {
        let count = total.saturating_sub(offset).min(50);
        Mock::given(method("GET"))
            .and(path("/v1/me/tracks"))
            .and(query_param("limit", "50"))
            .and(query_param("offset", offset.to_string()))
            .respond_with(ResponseTemplate::new(200).set_body_json(liked_page(offset, count, total)))
            .mount(server)
            .await;

        if count < 50 {
            break;
        }
        offset += 50;
    }
}

pub async fn mount_current_user(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/v1/me"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "id": USER_ID, "display_name": "Test User" })),
        )
        .mount(server)
        .await;
}

pub async fn mount_create_playlist(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path(format!("/v1/users/{USER_ID}/playlists")))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": PLAYLIST_ID,
            "name": "Test",
            "external_urls": { "spotify": PLAYLIST_URL }
        })))
        .mount(server)
        .await;
}

pub async fn mount_append_tracks(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path(format!("/v1/playlists/{PLAYLIST_ID}/tracks")))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "snapshot_id": "snap" })))
        .mount(server)
        .await;
}

/// Requests received on `request_path`, in arrival order.
pub async fn requests_to(server: &MockServer, request_path: &str) -> Vec<Request> {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .into_iter()
        .filter(|r| r.url.path() == request_path)
        .collect()
}

/// `offset` query values of the liked-tracks requests, in order.
pub async fn fetched_offsets(server: &MockServer) -> Vec<usize> {
    requests_to(server, "/v1/me/tracks")
        .await
        .iter()
        .filter_map(|r| {
            r.url
                .query_pairs()
                .find(|(k, _)| k == "offset")
                .and_then(|(_, v)| v.parse().ok())
        })
        .collect()
}

/// URIs carried by each append request, in order.
pub async fn appended_batches(server: &MockServer) -> Vec<Vec<String>> {
    requests_to(server, &format!("/v1/playlists/{PLAYLIST_ID}/tracks"))
        .await
        .iter()
        .map(|r| {
            let body: Value = serde_json::from_slice(&r.body).unwrap();
            body["uris"]
                .as_array()
                .unwrap()
                .iter()
                .map(|u| u.as_str().unwrap().to_string())
                .collect()
        })
        .collect()
}
