//! Shared error types for the services crate.
//!
//! The progress store itself exposes no error type: stale, malformed or
//! unwritable progress degrades to "lose optional progress" by design, so
//! the only fallible surface here is service bootstrap.

use thiserror::Error;

use storage::sqlite::SqliteInitError;

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
}
