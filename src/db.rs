//! SQLite tuning on top of the shared connection pool.

use diesel::connection::SimpleConnection;
use pushkind_common::db::DbPool;
use pushkind_common::repository::errors::RepositoryResult;

/// Switch the database file to write-ahead logging.
///
/// The journal mode is stored in the file itself, so running this once at
/// startup covers every connection the pool opens later.
pub fn enable_wal(pool: &DbPool) -> RepositoryResult<()> {
    let mut conn = pool.get()?;
    conn.batch_execute("PRAGMA journal_mode = WAL;")?;
    Ok(())
}
