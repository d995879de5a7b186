//! HTTP client for end-to-end tests
//!
//! This module wraps reqwest and provides methods for all server endpoints.
//!
//! When API routes or request formats change, update only this file.

use super::constants::*;
use reqwest::Response;
use serde_json::{json, Value};
use std::time::Duration;

/// HTTP test client
pub struct TestClient {
    /// The underlying reqwest client (public for custom requests in tests)
    pub client: reqwest::Client,
    /// The base URL of the test server
    pub base_url: String,
}

#[allow(dead_code)]
impl TestClient {
    pub fn new(base_url: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .expect("Failed to build reqwest client");

        Self { client, base_url }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// POSTs an arbitrary JSON body, for malformed request tests
    pub async fn post_json(&self, path: &str, body: Value) -> Response {
        self.client
            .post(self.url(path))
            .json(&body)
            .send()
            .await
            .expect("Request failed")
    }

    // ========================================================================
    // Server Endpoints
    // ========================================================================

    /// GET /
    pub async fn get_home(&self) -> Response {
        self.client
            .get(self.url("/"))
            .send()
            .await
            .expect("Home request failed")
    }

    /// GET /genres
    pub async fn get_genres(&self) -> Response {
        self.client
            .get(self.url("/genres"))
            .send()
            .await
            .expect("Genres request failed")
    }

    // ========================================================================
    // Recommendation Endpoints
    // ========================================================================

    /// POST /recommend
    pub async fn recommend(&self, song_name: &str) -> Response {
        self.post_json("/recommend", json!({ "song_name": song_name }))
            .await
    }

    /// POST /recommend_by_values
    pub async fn recommend_by_values(&self, features: [f64; 8]) -> Response {
        self.post_json(
            "/recommend_by_values",
            json!({
                "danceability": features[0],
                "energy": features[1],
                "loudness": features[2],
                "speechiness": features[3],
                "acousticness": features[4],
                "instrumentalness": features[5],
                "liveness": features[6],
                "valence": features[7],
            }),
        )
        .await
    }

    /// POST /genre
    pub async fn genre(&self, genres: &[&str]) -> Response {
        self.post_json("/genre", json!({ "genre_list": genres })).await
    }
}
