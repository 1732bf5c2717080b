//! SQLite connection pool for the fleet database.
//!
//! Every pooled connection is configured on checkout: WAL journaling, enforced
//! foreign keys, a bounded wait on locks and a Unicode-aware `lower()`.

use std::time::Duration;

use diesel::connection::SimpleConnection;
use diesel::r2d2::{ConnectionManager, CustomizeConnection, Pool, PooledConnection};
use diesel::sql_types::Text;
use diesel::sqlite::SqliteConnection;

use crate::repository::errors::{RepositoryError, RepositoryResult};

pub type DbPool = Pool<ConnectionManager<SqliteConnection>>;
pub type DbConnection = PooledConnection<ConnectionManager<SqliteConnection>>;

diesel::define_sql_function! {
    /// SQL `lower()`. Replaced on every connection by full Unicode case
    /// folding, so it agrees with [`str::to_lowercase`].
    fn lower(x: Text) -> Text;
}

#[derive(Debug)]
/// Options that are applied each time a connection is acquired from the pool.
pub struct ConnectionOptions {
    /// Enable Write Ahead Logging mode for SQLite.
    pub enable_wal: bool,
    /// Enforce foreign key checks for SQLite.
    pub enable_foreign_keys: bool,
    /// Timeout to wait for a locked database.
    pub busy_timeout: Option<Duration>,
}

impl CustomizeConnection<SqliteConnection, diesel::r2d2::Error> for ConnectionOptions {
    fn on_acquire(&self, conn: &mut SqliteConnection) -> Result<(), diesel::r2d2::Error> {
        (|| {
            if self.enable_wal {
                conn.batch_execute("PRAGMA journal_mode = WAL; PRAGMA synchronous = NORMAL;")?;
            }
            if self.enable_foreign_keys {
                conn.batch_execute("PRAGMA foreign_keys = ON;")?;
            }
            if let Some(d) = self.busy_timeout {
                conn.batch_execute(&format!("PRAGMA busy_timeout = {};", d.as_millis()))?;
            }
            // SQLite's built-in lower() folds ASCII only.
            lower_utils::register_impl(conn, |x: String| x.to_lowercase())?;
            Ok(())
        })()
        .map_err(diesel::r2d2::Error::QueryError)
    }
}

/// Builds the connection pool for `database_url`.
///
/// `timeout` bounds both waiting for a pooled connection and waiting on a
/// locked database. It must be positive.
pub fn establish_connection_pool(
    database_url: &str,
    timeout: Duration,
) -> RepositoryResult<DbPool> {
    if timeout.is_zero() {
        return Err(RepositoryError::ConnectionError(
            "query timeout must be positive".to_string(),
        ));
    }

    let manager = ConnectionManager::<SqliteConnection>::new(database_url);
    let pool = Pool::builder()
        .connection_timeout(timeout)
        .connection_customizer(Box::new(ConnectionOptions {
            enable_wal: true,
            enable_foreign_keys: true,
            busy_timeout: Some(timeout),
        }))
        .build(manager)?;

    Ok(pool)
}

/// Checks a connection out of the pool, waiting at most the pool's timeout.
pub fn get_connection(pool: &DbPool) -> RepositoryResult<DbConnection> {
    pool.get().map_err(|err| {
        let state = pool.state();
        log::error!(
            "No database connection available ({} of {} idle): {err}",
            state.idle_connections,
            state.connections
        );
        RepositoryError::from(err)
    })
}

#[cfg(test)]
mod tests {
    use diesel::prelude::*;

    use super::*;

    #[test]
    fn zero_timeout_is_rejected() {
        let result = establish_connection_pool(":memory:", Duration::ZERO);

        assert!(matches!(result, Err(RepositoryError::ConnectionError(_))));
    }

    #[test]
    fn lower_folds_non_ascii_letters() {
        let pool = establish_connection_pool(":memory:", Duration::from_secs(5))
            .expect("in-memory pool");
        let mut conn = get_connection(&pool).expect("connection");

        let folded = diesel::select(lower("ÉLODIE Ñ"))
            .get_result::<String>(&mut conn)
            .expect("select lower");

        assert_eq!(folded, "élodie ñ");
    }
}
