//! Server configuration loaded from environment variables.
//!
//! Read once at startup and immutable afterwards. All settings have defaults
//! so the server starts with zero configuration for local development.

use std::net::SocketAddr;
use std::path::PathBuf;

use crate::gate::AdminSettings;

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Socket address for the HTTP (axum) server.
    /// Env: `HTTP_ADDR`
    /// Default: `127.0.0.1:3000`
    pub http_addr: SocketAddr,

    /// Directory holding the per-domain JSON documents and collections.
    /// Env: `CONTENT_DIR`
    /// Default: `./content`
    pub content_dir: PathBuf,

    /// Directory uploaded images are written to and served from.
    /// Env: `UPLOAD_DIR`
    /// Default: `./public/uploads`
    pub upload_dir: PathBuf,

    /// Maximum upload size in bytes.
    /// Env: `MAX_UPLOAD_SIZE`
    /// Default: 10 MiB
    pub max_upload_size: usize,

    /// Site name reported by `/info`.
    /// Env: `SITE_NAME`
    /// Default: `"Portfolio"`
    pub site_name: String,

    /// Deployment mode. Admin routes need `development`.
    /// Env: `APP_ENV`
    pub app_env: Option<String>,

    /// Admin opt-in. Admin routes need exactly `true`.
    /// Env: `ENABLE_ADMIN`
    pub enable_admin: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            http_addr: ([127, 0, 0, 1], 3000).into(),
            content_dir: PathBuf::from("./content"),
            upload_dir: PathBuf::from("./public/uploads"),
            max_upload_size: 10 * 1024 * 1024, // 10 MiB
            site_name: "Portfolio".to_string(),
            app_env: None,
            enable_admin: None,
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(addr) = lookup("HTTP_ADDR") {
            if let Ok(parsed) = addr.parse::<SocketAddr>() {
                config.http_addr = parsed;
            } else {
                tracing::warn!(value = %addr, "Invalid HTTP_ADDR, using default");
            }
        }

        if let Some(path) = lookup("CONTENT_DIR") {
            config.content_dir = PathBuf::from(path);
        }

        if let Some(path) = lookup("UPLOAD_DIR") {
            config.upload_dir = PathBuf::from(path);
        }

        if let Some(val) = lookup("MAX_UPLOAD_SIZE") {
            match val.parse::<usize>() {
                Ok(n) if n > 0 => config.max_upload_size = n,
                _ => tracing::warn!(value = %val, "Invalid MAX_UPLOAD_SIZE, using default"),
            }
        }

        if let Some(name) = lookup("SITE_NAME") {
            config.site_name = name;
        }

        // Kept raw: the gate does exact, case-sensitive matching.
        config.app_env = lookup("APP_ENV");
        config.enable_admin = lookup("ENABLE_ADMIN");

        config
    }

    pub fn admin_settings(&self) -> AdminSettings {
        AdminSettings {
            app_env: self.app_env.clone(),
            enable_admin: self.enable_admin.clone(),
        }
    }
}
