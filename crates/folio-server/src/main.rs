//! # folio-server
//!
//! HTTP server for a personal portfolio and blog.
//!
//! This binary provides:
//! - **Public read API** for the per-domain content documents (hero, bio,
//!   career, awards, contact, hometown, values) and the blog/project
//!   collections
//! - **Admin API** for editing that content and uploading images, open only
//!   when the process runs with `APP_ENV=development` and `ENABLE_ADMIN=true`
//! - **Static serving** of uploaded images

mod api;
mod config;
mod error;
mod gate;
mod uploads;

use std::sync::Arc;

use folio_content::{ContentDomain, ContentStore};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::api::AppState;
use crate::config::ServerConfig;
use crate::gate::AdminGate;
use crate::uploads::UploadStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // -----------------------------------------------------------------------
    // 1. Initialize tracing (respects RUST_LOG env var)
    // -----------------------------------------------------------------------
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,folio_server=debug")),
        )
        .init();

    info!("Starting folio server v{}", env!("CARGO_PKG_VERSION"));

    // -----------------------------------------------------------------------
    // 2. Load configuration (once; immutable from here on)
    // -----------------------------------------------------------------------
    let config = ServerConfig::from_env();
    info!(?config, "Loaded configuration");

    let gate = AdminGate::new(config.admin_settings());
    info!(admin_enabled = gate.is_admin_enabled(), "Admin gate configured");

    // -----------------------------------------------------------------------
    // 3. Initialize stores
    // -----------------------------------------------------------------------
    let store = ContentStore::new(config.content_dir.clone());

    // Surface broken documents at startup; requests still fail loudly on their own.
    for domain in ContentDomain::ALL {
        if let Err(e) = store.read_json(domain) {
            warn!(domain = %domain, error = %e, "Content document is not loadable");
        }
    }

    let uploads =
        Arc::new(UploadStore::new(config.upload_dir.clone(), config.max_upload_size).await?);

    let http_addr = config.http_addr;
    let app_state = AppState {
        store,
        uploads,
        gate,
        config: Arc::new(config),
    };

    // -----------------------------------------------------------------------
    // 4. Run the HTTP server (blocks until shutdown)
    // -----------------------------------------------------------------------
    tokio::select! {
        result = api::serve(app_state, http_addr) => {
            if let Err(e) = result {
                tracing::error!(error = %e, "HTTP server failed");
                return Err(e);
            }
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Received Ctrl+C, shutting down");
        }
    }

    Ok(())
}
