//! Client configuration.
//!
//! Use the builder setters to customize, or [`AppConfig::from_env`] to read
//! overrides from the environment.
//!
//! ```ignore
//! use crm_client::config::AppConfig;
//!
//! let config = AppConfig::default()
//!     .with_api_base_url("https://crm.example.com/api")
//!     .with_page_size(25);
//! ```

use std::path::PathBuf;
use tracing::warn;

/// Default base URL of the customer/lead REST resources.
pub const DEFAULT_API_URL: &str = "http://localhost:3000";

/// Default base URL of the user resource used for authentication.
pub const DEFAULT_AUTH_URL: &str = "http://localhost:3001";

/// Customers fetched per page.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Data directory name under the home directory.
const DATA_DIR: &str = ".crm";

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Base URL for `/customers` and `/leads`
    pub api_base_url: String,
    /// Base URL for `/users`
    pub auth_base_url: String,
    /// Customer page size (not user-controlled)
    pub page_size: u32,
    /// Directory holding the local secure store
    pub data_dir: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_URL.to_string(),
            auth_base_url: DEFAULT_AUTH_URL.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            data_dir: default_data_dir(),
        }
    }
}

fn default_data_dir() -> PathBuf {
    dirs::home_dir()
        .map(|home| home.join(DATA_DIR))
        .unwrap_or_else(|| PathBuf::from(DATA_DIR))
}

impl AppConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = trim_url(url.into());
        self
    }

    pub fn with_auth_base_url(mut self, url: impl Into<String>) -> Self {
        self.auth_base_url = trim_url(url.into());
        self
    }

    /// Set the page size. Zero is ignored.
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        if page_size > 0 {
            self.page_size = page_size;
        }
        self
    }

    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = dir.into();
        self
    }

    /// Read `CRM_API_URL`, `CRM_AUTH_URL`, `CRM_PAGE_SIZE` and `CRM_DATA_DIR`.
    ///
    /// Unset variables keep their defaults; an unparseable page size is
    /// logged and ignored.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(url) = std::env::var("CRM_API_URL") {
            config = config.with_api_base_url(url);
        }
        if let Ok(url) = std::env::var("CRM_AUTH_URL") {
            config = config.with_auth_base_url(url);
        }
        if let Ok(raw) = std::env::var("CRM_PAGE_SIZE") {
            match raw.parse::<u32>() {
                Ok(size) if size > 0 => config = config.with_page_size(size),
                _ => warn!(value = %raw, "Ignoring invalid CRM_PAGE_SIZE"),
            }
        }
        if let Ok(dir) = std::env::var("CRM_DATA_DIR") {
            config = config.with_data_dir(dir);
        }

        config
    }
}

fn trim_url(url: String) -> String {
    url.trim_end_matches('/').to_string()
}
