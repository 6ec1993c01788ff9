//! API constants

/// Versioned prefix of every API route.
pub const API_PREFIX: &str = "/api/v0";

/// Where the OpenAPI document is served.
pub const OPENAPI_PATH: &str = "/api-docs/openapi.json";

/// Service name reported in logs.
pub const SERVICE_NAME: &str = "reportcam-api";

/// Bodies are never expected on these routes; anything larger is rejected.
pub const MAX_REQUEST_BODY_BYTES: usize = 16 * 1024;

pub const DEFAULT_HTTP_CONCURRENCY_LIMIT: usize = 1024;
