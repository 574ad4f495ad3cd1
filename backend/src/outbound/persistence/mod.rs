//! Diesel-backed persistence adapter for the account record store.

mod diesel_account_store;
mod models;
mod schema;

pub mod pool;

pub use diesel_account_store::DieselAccountStore;
pub use pool::{DbPool, PoolError, PoolSettings};

use diesel_async::async_connection_wrapper::AsyncConnectionWrapper;
use diesel_async::AsyncPgConnection;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};

/// Migrations embedded from `backend/migrations` at compile time.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Apply all pending migrations against the given database.
///
/// Runs on a blocking thread because the migration harness drives a
/// synchronous connection.
///
/// # Errors
///
/// Returns [`PoolError::Build`] when the connection cannot be established or
/// a migration fails.
pub async fn run_migrations(database_url: &str) -> Result<(), PoolError> {
    let database_url = database_url.to_owned();
    tokio::task::spawn_blocking(move || -> Result<(), PoolError> {
        use diesel::Connection;

        let mut conn = AsyncConnectionWrapper::<AsyncPgConnection>::establish(&database_url)
            .map_err(|err| PoolError::build(err.to_string()))?;
        conn.run_pending_migrations(MIGRATIONS)
            .map(|_| ())
            .map_err(|err| PoolError::build(err.to_string()))
    })
    .await
    .map_err(|err| PoolError::build(err.to_string()))?
}
