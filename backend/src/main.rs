//! Service entry-point: loads settings, prepares storage and the event
//! topic, then serves the REST API.

mod server;

use actix_web::web;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use document_service::inbound::http::health::HealthState;
use document_service::outbound::persistence::{DbPool, migrate};
use server::{DocumentSettings, ServerConfig, build_publisher, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = DocumentSettings::from_process()
        .and_then(DocumentSettings::resolve)
        .map_err(std::io::Error::other)?;

    for (username, fingerprint) in settings.principals.fingerprints() {
        info!(%username, %fingerprint, "principal configured");
    }
    if settings.principals.is_empty() {
        warn!("no principals configured; every API request will be rejected");
    }

    let db_pool = match &settings.database {
        Some(pool_config) => {
            let applied = migrate(pool_config.database_url())
                .await
                .map_err(std::io::Error::other)?;
            info!(applied, "database migrations complete");
            Some(
                DbPool::new(pool_config.clone())
                    .await
                    .map_err(std::io::Error::other)?,
            )
        }
        None => {
            warn!("no database configured; records are kept in memory");
            None
        }
    };

    let publisher = build_publisher(
        settings.kafka_bootstrap_servers.as_deref(),
        &settings.topic,
    )
    .await
    .map_err(std::io::Error::other)?;

    let health_state = web::Data::new(HealthState::new());
    let mut config = ServerConfig::new(settings.bind_addr, publisher, settings.principals);
    if let Some(pool) = db_pool {
        config = config.with_db_pool(pool);
    }
    #[cfg(feature = "metrics")]
    let config = config.with_metrics(Some(server::make_metrics()?));

    let server = create_server(health_state.clone(), config)?;
    health_state.mark_ready();
    info!(bind_addr = %settings.bind_addr, topic = %settings.topic, "document service ready");
    server.await
}
