//! Backend entry-point: loads settings, prepares storage and serves the REST
//! API.

mod server;

use actix_web::web;
use color_eyre::eyre::{Context, Result, eyre};
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use lunchvote::inbound::http::health::HealthState;
use lunchvote::outbound::persistence::{DbPool, apply_migrations};
use lunchvote::settings::AppSettings;
use server::{ServerConfig, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load().map_err(|err| eyre!("failed to load settings: {err}"))?;
    let bind_addr = settings.bind_address()?;
    let mut config =
        ServerConfig::new(bind_addr).with_voting_window(settings.voting_window()?);

    if let Some(pool_config) = settings.pool_config()? {
        if settings.skip_migrations {
            warn!("skipping database migrations");
        } else {
            apply_migrations(pool_config.database_url().to_owned())
                .await
                .wrap_err("failed to migrate database")?;
        }
        let pool = DbPool::new(pool_config)
            .await
            .wrap_err("failed to build database pool")?;
        config = config.with_db_pool(pool);
    }

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config)
        .wrap_err_with(|| format!("failed to bind {bind_addr}"))?;
    info!(%bind_addr, "lunch vote server listening");
    server.await.wrap_err("server terminated abnormally")
}
