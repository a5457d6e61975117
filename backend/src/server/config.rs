//! HTTP server configuration object and helpers.

use std::net::SocketAddr;
use std::sync::Arc;

use document_service::domain::PrincipalRegistry;
use document_service::domain::ports::DocumentEventPublisher;
use document_service::outbound::persistence::DbPool;

#[cfg(feature = "metrics")]
use actix_web_prom::PrometheusMetrics;

/// Everything [`super::create_server`] needs to assemble the application.
///
/// Without a database pool the server keeps records in memory.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: Option<DbPool>,
    pub(crate) publisher: Arc<dyn DocumentEventPublisher>,
    pub(crate) principals: PrincipalRegistry,
    #[cfg(feature = "metrics")]
    pub(crate) prometheus: Option<PrometheusMetrics>,
}

impl ServerConfig {
    #[must_use]
    pub fn new(
        bind_addr: SocketAddr,
        publisher: Arc<dyn DocumentEventPublisher>,
        principals: PrincipalRegistry,
    ) -> Self {
        Self {
            bind_addr,
            db_pool: None,
            publisher,
            principals,
            #[cfg(feature = "metrics")]
            prometheus: None,
        }
    }

    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    #[cfg(feature = "metrics")]
    #[must_use]
    pub fn with_metrics(mut self, prometheus: Option<PrometheusMetrics>) -> Self {
        self.prometheus = prometheus;
        self
    }
}
