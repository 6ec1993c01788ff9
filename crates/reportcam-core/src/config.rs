//! Configuration module
//!
//! This module provides configuration for the signing API and the upload widget:
//! server settings, media host credentials and the widget's upload limits.
//!
//! Values come from the environment (a `.env` file is honoured via `dotenvy`). The
//! `NEXT_PUBLIC_*` names used by the browser build are accepted as fallbacks so one
//! `.env` file can serve both sides.

use std::env;
use std::fmt;
use std::str::FromStr;

use crate::constants::{DEFAULT_ALLOWED_FORMATS, DEFAULT_MAX_FILES, DEFAULT_MAX_FILE_SIZE_MB};

// Common constants
const SERVER_PORT: u16 = 3000;
const MIN_SECRET_LENGTH: usize = 8;

/// Server configuration
#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub server_port: u16,
    pub cors_origins: Vec<String>,
    pub environment: String,
}

/// Digest used to sign upload parameters. Must match the algorithm configured on the
/// media host account, otherwise every signature is rejected downstream.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SignatureAlgorithm {
    #[default]
    Sha1,
    Sha256,
}

impl FromStr for SignatureAlgorithm {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sha1" | "sha-1" => Ok(SignatureAlgorithm::Sha1),
            "sha256" | "sha-256" => Ok(SignatureAlgorithm::Sha256),
            other => Err(anyhow::anyhow!(
                "UPLOAD_SIGNATURE_ALGORITHM must be sha1 or sha256, got '{}'",
                other
            )),
        }
    }
}

impl fmt::Display for SignatureAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SignatureAlgorithm::Sha1 => f.write_str("sha1"),
            SignatureAlgorithm::Sha256 => f.write_str("sha256"),
        }
    }
}

/// Server-only API secret. Never serialized and redacted from `Debug` output.
#[derive(Clone)]
pub struct ApiSecret(String);

impl ApiSecret {
    pub fn new(secret: impl Into<String>) -> Self {
        ApiSecret(secret.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for ApiSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiSecret([REDACTED])")
    }
}

/// Media host credentials
#[derive(Clone, Debug, Default)]
pub struct CloudinaryConfig {
    /// Public cloud account identifier
    pub cloud_name: Option<String>,
    /// Public upload preset identifier
    pub upload_preset: Option<String>,
    /// Public API key, returned alongside every signature
    pub api_key: Option<String>,
    /// Server-only secret used to sign upload parameters
    pub api_secret: Option<ApiSecret>,
    pub signature_algorithm: SignatureAlgorithm,
}

/// Limits applied by the upload widget
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WidgetLimits {
    pub max_files: u32,
    pub max_file_size_bytes: u64,
    pub allowed_formats: Vec<String>,
}

impl Default for WidgetLimits {
    fn default() -> Self {
        Self {
            max_files: DEFAULT_MAX_FILES,
            max_file_size_bytes: DEFAULT_MAX_FILE_SIZE_MB * 1024 * 1024,
            allowed_formats: DEFAULT_ALLOWED_FORMATS
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config {
    pub server: ServerConfig,
    pub cloudinary: CloudinaryConfig,
    pub widget: WidgetLimits,
    /// Public key for the map preview shown next to a report
    pub maps_api_key: Option<String>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

impl Config {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, anyhow::Error> {
        // A missing .env file is fine; real deployments set variables directly.
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| non_empty(lookup(key));
        let get_or = |key: &str, fallback: &str| get(key).or_else(|| get(fallback));

        let environment = get("ENVIRONMENT")
            .or_else(|| get("APP_ENV"))
            .unwrap_or_else(|| "development".to_string());

        let server = ServerConfig {
            server_port: match get("SERVER_PORT").or_else(|| get("PORT")) {
                Some(port) => port.parse().map_err(|_| {
                    anyhow::anyhow!("SERVER_PORT must be a valid port, got '{}'", port)
                })?,
                None => SERVER_PORT,
            },
            cors_origins: get("CORS_ORIGINS")
                .map(|s| {
                    s.split(',')
                        .map(|origin| origin.trim().to_string())
                        .filter(|origin| !origin.is_empty())
                        .collect()
                })
                .unwrap_or_default(),
            environment,
        };

        let cloudinary = CloudinaryConfig {
            cloud_name: get_or("CLOUDINARY_CLOUD_NAME", "NEXT_PUBLIC_CLOUDINARY_CLOUD_NAME"),
            upload_preset: get_or(
                "CLOUDINARY_UPLOAD_PRESET",
                "NEXT_PUBLIC_CLOUDINARY_UPLOAD_PRESET",
            ),
            api_key: get("CLOUDINARY_API_KEY"),
            api_secret: get("CLOUDINARY_API_SECRET").map(ApiSecret::new),
            signature_algorithm: match get("UPLOAD_SIGNATURE_ALGORITHM") {
                Some(value) => value.parse()?,
                None => SignatureAlgorithm::default(),
            },
        };

        let defaults = WidgetLimits::default();
        let widget = WidgetLimits {
            max_files: match get("UPLOAD_MAX_FILES") {
                Some(value) => value.parse().map_err(|_| {
                    anyhow::anyhow!("UPLOAD_MAX_FILES must be a number, got '{}'", value)
                })?,
                None => defaults.max_files,
            },
            max_file_size_bytes: match get("UPLOAD_MAX_FILE_SIZE_MB") {
                Some(value) => value
                    .parse::<u64>()
                    .map_err(|_| {
                        anyhow::anyhow!("UPLOAD_MAX_FILE_SIZE_MB must be a number, got '{}'", value)
                    })?
                    .checked_mul(1024 * 1024)
                    .ok_or_else(|| {
                        anyhow::anyhow!("UPLOAD_MAX_FILE_SIZE_MB is too large, got '{}'", value)
                    })?,
                None => defaults.max_file_size_bytes,
            },
            allowed_formats: get("UPLOAD_ALLOWED_FORMATS")
                .map(|s| {
                    s.split(',')
                        .map(|f| f.trim().trim_start_matches('.').to_lowercase())
                        .filter(|f| !f.is_empty())
                        .collect()
                })
                .unwrap_or(defaults.allowed_formats),
        };

        let config = Config {
            server,
            cloudinary,
            widget,
            maps_api_key: get_or("GOOGLE_MAPS_API_KEY", "NEXT_PUBLIC_GOOGLE_MAPS_API_KEY"),
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if let Some(secret) = &self.cloudinary.api_secret {
            if secret.expose().len() < MIN_SECRET_LENGTH {
                return Err(anyhow::anyhow!(
                    "CLOUDINARY_API_SECRET must be at least {} characters long",
                    MIN_SECRET_LENGTH
                ));
            }
        }

        // One upload session accepts at most DEFAULT_MAX_FILES files; deployments may
        // only lower it.
        if self.widget.max_files == 0 || self.widget.max_files > DEFAULT_MAX_FILES {
            return Err(anyhow::anyhow!(
                "UPLOAD_MAX_FILES must be between 1 and {}",
                DEFAULT_MAX_FILES
            ));
        }

        if self.widget.max_file_size_bytes == 0 {
            return Err(anyhow::anyhow!("UPLOAD_MAX_FILE_SIZE_MB must be greater than 0"));
        }

        if self.widget.allowed_formats.is_empty() {
            return Err(anyhow::anyhow!("UPLOAD_ALLOWED_FORMATS must not be empty"));
        }

        Ok(())
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let env = self.server.environment.to_lowercase();
        env == "production" || env == "prod"
    }

    /// Whether both credentials needed to sign uploads are present.
    pub fn signing_configured(&self) -> bool {
        self.cloudinary.api_key.is_some() && self.cloudinary.api_secret.is_some()
    }

    // Convenience getters for common fields
    pub fn server_port(&self) -> u16 {
        self.server.server_port
    }

    pub fn cors_origins(&self) -> &[String] {
        &self.server.cors_origins
    }

    pub fn environment(&self) -> &str {
        &self.server.environment
    }
}
