//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Repository implementations only translate between Diesel rows and domain
//! types. Row structs (`models.rs`) and table definitions (`schema.rs`) stay
//! private to this module. Connections come from a `bb8` pool through
//! `diesel-async`, and every database failure is mapped into the port's
//! typed error.
//!
//! # Example
//!
//! ```no_run
//! use document_service::outbound::persistence::{DbPool, DieselDocumentRepository, PoolConfig};
//!
//! # async fn wire() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/documents")).await?;
//! let repo = DieselDocumentRepository::new(pool);
//! # let _ = repo;
//! # Ok(())
//! # }
//! ```

mod diesel_author_repository;
mod diesel_basic_error_mapping;
mod diesel_document_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_author_repository::DieselAuthorRepository;
pub use diesel_document_repository::DieselDocumentRepository;
pub use migrations::{MIGRATIONS, MigrationError, migrate, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
