//! Filehost daemon entry point: load config, initialize logging, and run
//! the HTTP gateway. The chat side is driven by the embedding server
//! through [`filehost_daemon::build_bridge`].

use anyhow::{bail, Context, Result};
use std::sync::Arc;
use tracing::{info, warn};

use filehost_config::{config_dir, config_file_path, ensure_upload_root, load_config, validate};
use filehost_gateway::server::start_server;
use filehost_gateway::{isupport_entry, GatewayState};
use filehost_token::TokenService;

#[tokio::main]
async fn main() -> Result<()> {
    let dir = config_dir();
    let config = load_config(&config_file_path(&dir)).await?;

    filehost_logging::init_logger(&config.log_dir, &config.log_level);

    let report = validate(&config);
    for warning in &report.warnings {
        warn!("{warning}");
    }
    if !report.is_valid() {
        for error in &report.errors {
            tracing::error!("{error}");
        }
        bail!("Invalid configuration");
    }

    let upload_root = ensure_upload_root(&config).await?;

    let tokens = Arc::new(TokenService::new(
        config.jwt_secret.as_bytes().to_vec(),
        config.jwt_issuer.clone(),
        config.token_expiry,
    ));

    let public_url = config.public_url();
    let (key, value) = isupport_entry(&public_url);
    info!("Advertising {key}={value}");

    let state = GatewayState {
        upload_root: Arc::new(upload_root),
        base_uri: config.uri.clone(),
        public_url,
        authenticate: config.authenticate,
        // Without a signing secret the handler only checks credential
        // presence.
        tokens: (!config.jwt_secret.is_empty()).then(|| tokens.clone()),
    };

    let addr = config
        .listen
        .parse()
        .with_context(|| format!("Invalid listen address: {}", config.listen))?;
    start_server(addr, state).await
}
