//! Test helpers: build AppState and router for integration tests.

#![allow(dead_code)]

use axum_test::TestServer;
use reportcam_api::constants;
use reportcam_api::setup::routes;
use reportcam_api::state::AppState;
use reportcam_core::Config;
use std::collections::HashMap;
use std::sync::Arc;

pub const TEST_CLOUD_NAME: &str = "demo";
pub const TEST_UPLOAD_PRESET: &str = "accident_reports_signed";
pub const TEST_API_KEY: &str = "123456789";
pub const TEST_SECRET: &str = "test-secret-value";

/// API path prefix for tests (e.g. `/api/v0`).
pub fn api_path(path: &str) -> String {
    format!("{}{}", constants::API_PREFIX, path)
}

pub fn config_from(pairs: &[(&str, &str)]) -> Config {
    let vars: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    Config::from_lookup(|key| vars.get(key).cloned()).expect("valid test config")
}

/// Fully configured: public widget settings and signing credentials.
pub fn signing_config() -> Config {
    config_from(&[
        ("CLOUDINARY_CLOUD_NAME", TEST_CLOUD_NAME),
        ("CLOUDINARY_UPLOAD_PRESET", TEST_UPLOAD_PRESET),
        ("CLOUDINARY_API_KEY", TEST_API_KEY),
        ("CLOUDINARY_API_SECRET", TEST_SECRET),
        ("GOOGLE_MAPS_API_KEY", "maps-public-key"),
    ])
}

/// Public widget settings only, no signing credentials.
pub fn unsigned_config() -> Config {
    config_from(&[
        ("NEXT_PUBLIC_CLOUDINARY_CLOUD_NAME", TEST_CLOUD_NAME),
        ("NEXT_PUBLIC_CLOUDINARY_UPLOAD_PRESET", TEST_UPLOAD_PRESET),
    ])
}

pub struct TestApp {
    pub server: TestServer,
    pub state: Arc<AppState>,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }
}

pub fn setup_test_app(config: Config) -> TestApp {
    let state = AppState::new(config.clone());
    let app = routes::setup_routes(&config, state.clone()).expect("Failed to build routes");
    let server = TestServer::new(app.into_make_service()).expect("Failed to create test server");
    TestApp { server, state }
}
