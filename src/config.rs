//! Application configuration loading from environment variables.
//!
//! All configuration is loaded from the environment at startup via standard
//! `std::env::var`, following the 12-factor app methodology. A `.env` file is
//! honored when present so local development does not need exported shell
//! variables.
//!
//! # Environment Variables
//!
//! ## Required Variables
//! - `BOARD_PROJECT_ID`: Managed backend project identifier
//! - `BOARD_API_KEY`: Client API key for the managed backend
//! - `BOARD_AUTH_DOMAIN`: Hostname of the identity service
//!
//! ## Optional Variables
//! - `RUST_LOG`: Logging level (default: "info,community_board=debug")
//! - `BOARD_STORAGE_BUCKET`: Bucket serving uploaded post images
//! - `BOARD_FEED_PAGE_SIZE`: Posts fetched per feed page (default: 20)

use serde::Deserialize;

/// Backend connection settings for the community-board client.
///
/// All fields are populated from environment variables at startup, with
/// defaults provided where appropriate.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Managed backend project identifier
    pub project_id: String,

    /// Client API key for the managed backend
    pub api_key: String,

    /// Hostname of the identity service (e.g., `myproject.firebaseapp.com`)
    pub auth_domain: String,

    /// Bucket serving uploaded post images, if image upload is enabled
    pub storage_bucket: Option<String>,

    /// Number of posts fetched per feed page
    pub feed_page_size: u32,
}

impl Config {
    /// Load configuration from the environment, reading `.env` first if one
    /// exists.
    ///
    /// # Errors
    ///
    /// Returns an error if any required environment variable is missing or
    /// cannot be parsed to the expected type.
    pub fn load() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_env()
    }

    /// Load configuration from environment variables only.
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            project_id: env_required("BOARD_PROJECT_ID")?,
            api_key: env_required("BOARD_API_KEY")?,
            auth_domain: env_required("BOARD_AUTH_DOMAIN")?,
            storage_bucket: std::env::var("BOARD_STORAGE_BUCKET").ok(),
            feed_page_size: env_or("BOARD_FEED_PAGE_SIZE", 20)?,
        })
    }
}

/// Load a required environment variable.
///
/// # Errors
///
/// Returns an error if the variable is not set.
fn env_required(key: &str) -> anyhow::Result<String> {
    std::env::var(key).map_err(|_| anyhow::anyhow!("Missing required environment variable: {}", key))
}

/// Load an environment variable with a default value.
///
/// Returns the parsed environment variable if set, otherwise returns the
/// default.
///
/// # Errors
///
/// Returns an error if the variable is set but cannot be parsed.
fn env_or<T>(key: &str, default: T) -> anyhow::Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(val) => val
            .parse::<T>()
            .map_err(|e| anyhow::anyhow!("Failed to parse {}: {}", key, e)),
        Err(_) => Ok(default),
    }
}
