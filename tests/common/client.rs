//! HTTP client for end-to-end tests
//!
//! This module provides a high-level HTTP client that wraps reqwest
//! and provides methods for all moodmatch-server endpoints.
//!
//! When API routes or request formats change, update only this file.

use super::constants::*;
use reqwest::Response;
use serde_json::json;
use std::time::Duration;

/// HTTP test client with cookie-based session management
pub struct TestClient {
    /// The underlying reqwest client (public for custom requests in tests)
    pub client: reqwest::Client,
    /// The base URL of the test server
    pub base_url: String,
}

impl TestClient {
    /// Creates a new unauthenticated client
    ///
    /// Use this for testing authentication flows.
    /// For most tests, use `authenticated()` instead.
    pub fn new(base_url: String) -> Self {
        let client = reqwest::Client::builder()
            .cookie_store(true) // Automatically handle the visit cookie
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .expect("Failed to build reqwest client");

        Self { client, base_url }
    }

    /// Creates a client pre-authenticated with the default test visitor
    ///
    /// # Panics
    ///
    /// Panics if the login fails (indicates test infrastructure problem).
    pub async fn authenticated(base_url: String) -> Self {
        let client = Self::new(base_url);

        let response = client.login(TEST_EMAIL, TEST_PASS).await;
        assert_eq!(
            response.status(),
            reqwest::StatusCode::CREATED,
            "Test visitor authentication failed: {:?}",
            response.text().await
        );

        client
    }

    // ========================================================================
    // Authentication Endpoints
    // ========================================================================

    /// POST /v1/auth/login
    pub async fn login(&self, email: &str, password: &str) -> Response {
        self.client
            .post(format!("{}/v1/auth/login", self.base_url))
            .json(&json!({
                "email": email,
                "password": password,
            }))
            .send()
            .await
            .expect("Login request failed")
    }

    /// GET /v1/auth/logout
    pub async fn logout(&self) -> Response {
        self.client
            .get(format!("{}/v1/auth/logout", self.base_url))
            .send()
            .await
            .expect("Logout request failed")
    }

    // ========================================================================
    // Session Endpoints
    // ========================================================================

    /// GET /v1/session
    pub async fn get_session(&self) -> Response {
        self.client
            .get(format!("{}/v1/session", self.base_url))
            .send()
            .await
            .expect("Get session request failed")
    }

    /// PUT /v1/session/profile
    pub async fn update_profile(&self, update: &serde_json::Value) -> Response {
        self.client
            .put(format!("{}/v1/session/profile", self.base_url))
            .json(update)
            .send()
            .await
            .expect("Update profile request failed")
    }

    /// Fills in the default test profile in one update.
    pub async fn fill_test_profile(&self) -> Response {
        self.update_profile(&json!({
            "name": TEST_NAME,
            "age": TEST_AGE,
            "mood": TEST_MOOD,
            "feelings": TEST_FEELINGS,
        }))
        .await
    }

    /// POST /v1/session/submit
    pub async fn submit_profile(&self) -> Response {
        self.client
            .post(format!("{}/v1/session/submit", self.base_url))
            .send()
            .await
            .expect("Submit request failed")
    }

    /// GET /v1/session/recommendations
    pub async fn get_recommendations(&self) -> Response {
        self.client
            .get(format!("{}/v1/session/recommendations", self.base_url))
            .send()
            .await
            .expect("Get recommendations request failed")
    }

    /// POST /v1/session/start-over
    pub async fn start_over(&self) -> Response {
        self.client
            .post(format!("{}/v1/session/start-over", self.base_url))
            .send()
            .await
            .expect("Start over request failed")
    }

    // ========================================================================
    // Content Endpoints
    // ========================================================================

    /// GET /v1/content/mood/{mood}
    pub async fn get_mood_content(&self, mood: &str) -> Response {
        self.client
            .get(format!("{}/v1/content/mood/{}", self.base_url, mood))
            .send()
            .await
            .expect("Get mood content request failed")
    }

    // ========================================================================
    // Stats Endpoint
    // ========================================================================

    /// GET /
    pub async fn get_stats(&self) -> Response {
        self.client
            .get(format!("{}/", self.base_url))
            .send()
            .await
            .expect("Stats request failed")
    }
}
