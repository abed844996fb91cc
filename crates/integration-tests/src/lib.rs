//! Integration tests for Prism.
//!
//! These tests exercise a running admin server over HTTP. They are ignored
//! by default; run them against a disposable database.
//!
//! # Running Tests
//!
//! ```bash
//! # Start the database and apply migrations
//! prism-cli migrate
//!
//! # Seed the admin account the tests log in with
//! prism-cli user create -e "$TEST_ADMIN_EMAIL" -p "$TEST_ADMIN_PASSWORD"
//!
//! # Start the server, then:
//! cargo test -p prism-integration-tests -- --ignored
//! ```
//!
//! # Environment Variables
//!
//! - `ADMIN_BASE_URL` - Server under test (default: <http://localhost:5000>)
//! - `TEST_ADMIN_EMAIL` - Seeded admin account email
//! - `TEST_ADMIN_PASSWORD` - Seeded admin account password

use reqwest::Client;
use serde_json::{Value, json};

/// Base URL for the admin API (configurable via environment).
#[must_use]
pub fn admin_base_url() -> String {
    std::env::var("ADMIN_BASE_URL").unwrap_or_else(|_| "http://localhost:5000".to_string())
}

/// Credentials of the seeded test admin account.
#[must_use]
pub fn test_credentials() -> (String, String) {
    let email =
        std::env::var("TEST_ADMIN_EMAIL").unwrap_or_else(|_| "admin@example.com".to_string());
    let password =
        std::env::var("TEST_ADMIN_PASSWORD").unwrap_or_else(|_| "integration-test-password".to_string());
    (email, password)
}

/// A client plus the bearer token obtained from login.
pub struct TestContext {
    pub client: Client,
    pub base_url: String,
    pub token: String,
}

impl TestContext {
    /// Log in with the seeded test account and keep the token.
    ///
    /// # Panics
    ///
    /// Panics if the server is unreachable or login fails; the tests cannot
    /// proceed without a token.
    pub async fn login() -> Self {
        let client = Client::new();
        let base_url = admin_base_url();
        let (email, password) = test_credentials();

        let resp = client
            .post(format!("{base_url}/api/auth/login"))
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await
            .expect("Failed to reach admin server");

        assert!(
            resp.status().is_success(),
            "Login failed; seed the test account first (prism-cli user create)"
        );

        let body: Value = resp.json().await.expect("Login response was not JSON");
        let token = body["token"]
            .as_str()
            .expect("Login response missing token")
            .to_owned();

        Self {
            client,
            base_url,
            token,
        }
    }

    /// GET an API path with the bearer token attached.
    pub async fn get(&self, path: &str) -> reqwest::Response {
        self.client
            .get(format!("{}{path}", self.base_url))
            .bearer_auth(&self.token)
            .send()
            .await
            .expect("Request failed")
    }

    /// DELETE an API path with the bearer token attached.
    pub async fn delete(&self, path: &str) -> reqwest::Response {
        self.client
            .delete(format!("{}{path}", self.base_url))
            .bearer_auth(&self.token)
            .send()
            .await
            .expect("Request failed")
    }
}
