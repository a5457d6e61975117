//! Service settings loaded via OrthoConfig.
//!
//! Values come from CLI flags, `DOCUMENTS_*` environment variables and
//! configuration files. [`DocumentSettings::resolve`] validates them into the
//! typed values the bootstrap consumes.

use std::net::SocketAddr;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use tracing::warn;
use zeroize::Zeroizing;

use document_service::domain::{PrincipalRegistry, Role};
use document_service::outbound::persistence::PoolConfig;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 10;

/// Raw settings as read from the environment.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "DOCUMENTS")]
pub struct DocumentSettings {
    /// Socket address the HTTP server binds to.
    pub bind_addr: Option<String>,
    /// PostgreSQL URL; in-memory stores are used when absent.
    pub database_url: Option<String>,
    /// Upper bound on pooled database connections.
    pub db_max_connections: Option<u32>,
    /// Kafka bootstrap servers; events are logged when absent.
    pub kafka_bootstrap_servers: Option<String>,
    /// Topic receiving document change events. Required.
    pub kafka_topic: Option<String>,
    pub document_username: Option<String>,
    pub document_password: Option<String>,
    pub author_username: Option<String>,
    pub author_password: Option<String>,
}

/// Errors raised while validating [`DocumentSettings`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    #[error("failed to load settings: {0}")]
    Load(String),
    #[error("DOCUMENTS_KAFKA_TOPIC must name the document event topic")]
    MissingTopic,
    #[error("invalid bind address {value}: {message}")]
    InvalidBindAddr { value: String, message: String },
    #[error("DOCUMENTS_DB_MAX_CONNECTIONS must be at least 1")]
    InvalidPoolSize,
    #[error("{role} principal needs both a username and a password")]
    IncompletePrincipal { role: Role },
}

/// Validated settings consumed by the bootstrap.
#[derive(Debug)]
pub struct ResolvedSettings {
    pub bind_addr: SocketAddr,
    pub database: Option<PoolConfig>,
    pub kafka_bootstrap_servers: Option<String>,
    pub topic: String,
    pub principals: PrincipalRegistry,
}

impl DocumentSettings {
    /// Load settings from the process arguments and environment.
    pub fn from_process() -> Result<Self, SettingsError> {
        Self::load_from_iter(std::env::args_os()).map_err(|err| SettingsError::Load(err.to_string()))
    }

    pub fn resolve(self) -> Result<ResolvedSettings, SettingsError> {
        let topic = self
            .kafka_topic
            .as_deref()
            .map(str::trim)
            .filter(|topic| !topic.is_empty())
            .ok_or(SettingsError::MissingTopic)?
            .to_owned();

        let raw_addr = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        let bind_addr =
            raw_addr
                .parse::<SocketAddr>()
                .map_err(|err| SettingsError::InvalidBindAddr {
                    value: raw_addr.to_owned(),
                    message: err.to_string(),
                })?;

        let max_connections = self
            .db_max_connections
            .unwrap_or(DEFAULT_DB_MAX_CONNECTIONS);
        if max_connections == 0 {
            return Err(SettingsError::InvalidPoolSize);
        }
        let database = self
            .database_url
            .as_deref()
            .filter(|url| !url.trim().is_empty())
            .map(|url| {
                PoolConfig::new(url)
                    .with_max_size(max_connections)
                    .with_min_idle(Some(max_connections.min(2)))
            });

        let kafka_bootstrap_servers = self
            .kafka_bootstrap_servers
            .filter(|servers| !servers.trim().is_empty());

        let mut principals = PrincipalRegistry::default();
        for (role, username, password) in [
            (Role::Document, self.document_username, self.document_password),
            (Role::Author, self.author_username, self.author_password),
        ] {
            if let Some((username, password)) = principal_credentials(role, username, password)? {
                principals = principals.with_principal(username, password, [role]);
            }
        }

        Ok(ResolvedSettings {
            bind_addr,
            database,
            kafka_bootstrap_servers,
            topic,
            principals,
        })
    }
}

fn dev_username(role: Role) -> &'static str {
    match role {
        Role::Document => "krieger-document",
        Role::Author => "krieger-author",
    }
}

/// Pick the credentials for `role`, falling back to development defaults in
/// debug builds.
fn principal_credentials(
    role: Role,
    username: Option<String>,
    password: Option<String>,
) -> Result<Option<(String, Zeroizing<String>)>, SettingsError> {
    match (username, password) {
        (Some(username), Some(password)) => Ok(Some((username, Zeroizing::new(password)))),
        (None, None) if cfg!(debug_assertions) => {
            warn!(role = %role, "using development credentials (debug builds only)");
            let name = dev_username(role);
            Ok(Some((name.to_owned(), Zeroizing::new(name.to_owned()))))
        }
        (None, None) => {
            warn!(role = %role, "no credentials configured; principal disabled");
            Ok(None)
        }
        _ => Err(SettingsError::IncompletePrincipal { role }),
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for settings parsing and validation.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    const VARS: [&str; 9] = [
        "DOCUMENTS_BIND_ADDR",
        "DOCUMENTS_DATABASE_URL",
        "DOCUMENTS_DB_MAX_CONNECTIONS",
        "DOCUMENTS_KAFKA_BOOTSTRAP_SERVERS",
        "DOCUMENTS_KAFKA_TOPIC",
        "DOCUMENTS_DOCUMENT_USERNAME",
        "DOCUMENTS_DOCUMENT_PASSWORD",
        "DOCUMENTS_AUTHOR_USERNAME",
        "DOCUMENTS_AUTHOR_PASSWORD",
    ];

    fn env_vars(overrides: &[(&str, &str)]) -> [(&'static str, Option<String>); 9] {
        VARS.map(|name| {
            let value = overrides
                .iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| (*value).to_owned());
            (name, value)
        })
    }

    fn load_from_empty_args() -> DocumentSettings {
        DocumentSettings::load_from_iter([OsString::from("document-service")])
            .expect("config should load")
    }

    #[rstest]
    fn missing_topic_is_rejected() {
        let _guard = lock_env(env_vars(&[]));

        let error = load_from_empty_args().resolve().expect_err("topic required");

        assert_eq!(error, SettingsError::MissingTopic);
    }

    #[rstest]
    fn defaults_apply_when_only_the_topic_is_set() {
        let _guard = lock_env(env_vars(&[("DOCUMENTS_KAFKA_TOPIC", "documents")]));

        let resolved = load_from_empty_args().resolve().expect("settings resolve");

        assert_eq!(resolved.topic, "documents");
        assert_eq!(resolved.bind_addr, "0.0.0.0:8080".parse().expect("addr"));
        assert!(resolved.database.is_none());
        assert!(resolved.kafka_bootstrap_servers.is_none());
        // Debug test builds fall back to development principals.
        assert_eq!(resolved.principals.len(), 2);
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env(env_vars(&[
            ("DOCUMENTS_KAFKA_TOPIC", "document-events"),
            ("DOCUMENTS_BIND_ADDR", "127.0.0.1:9000"),
            ("DOCUMENTS_DATABASE_URL", "postgres://localhost/documents"),
            ("DOCUMENTS_DB_MAX_CONNECTIONS", "4"),
            ("DOCUMENTS_KAFKA_BOOTSTRAP_SERVERS", "broker:9092"),
            ("DOCUMENTS_DOCUMENT_USERNAME", "clerk"),
            ("DOCUMENTS_DOCUMENT_PASSWORD", "s3cret"),
        ]));

        let resolved = load_from_empty_args().resolve().expect("settings resolve");

        assert_eq!(resolved.bind_addr, "127.0.0.1:9000".parse().expect("addr"));
        let database = resolved.database.expect("database configured");
        assert_eq!(database.database_url(), "postgres://localhost/documents");
        assert_eq!(database.max_size(), 4);
        assert_eq!(resolved.kafka_bootstrap_servers.as_deref(), Some("broker:9092"));
        let users: Vec<String> = resolved
            .principals
            .fingerprints()
            .map(|(user, _)| user.to_owned())
            .collect();
        assert!(users.contains(&"clerk".to_owned()));
    }

    #[rstest]
    #[case(
        "DOCUMENTS_DB_MAX_CONNECTIONS",
        "0",
        SettingsError::InvalidPoolSize
    )]
    #[case(
        "DOCUMENTS_AUTHOR_USERNAME",
        "editor",
        SettingsError::IncompletePrincipal { role: Role::Author }
    )]
    fn invalid_values_are_rejected(
        #[case] name: &str,
        #[case] value: &str,
        #[case] expected: SettingsError,
    ) {
        let _guard = lock_env(env_vars(&[("DOCUMENTS_KAFKA_TOPIC", "documents"), (name, value)]));

        let error = load_from_empty_args().resolve().expect_err("invalid settings");

        assert_eq!(error, expected);
    }

    #[rstest]
    fn malformed_bind_address_is_reported() {
        let _guard = lock_env(env_vars(&[
            ("DOCUMENTS_KAFKA_TOPIC", "documents"),
            ("DOCUMENTS_BIND_ADDR", "localhost"),
        ]));

        let error = load_from_empty_args().resolve().expect_err("invalid address");

        assert!(matches!(error, SettingsError::InvalidBindAddr { value, .. } if value == "localhost"));
    }
}
