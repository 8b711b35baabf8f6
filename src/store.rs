//! SQLite persistence for the catalog.
//!
//! [`Store`] owns the connection pool and applies the schema in
//! `migrations/` when opened. The submodules are thin per-table
//! repositories: plain async functions taking a `&mut SqliteConnection`, so
//! the same call works on a pooled connection or inside a transaction.
//!
//! ```rust,no_run
//! use folio_core::store::Store;
//! use std::path::Path;
//!
//! # async fn run() -> folio_core::FolioResult<()> {
//! let store = Store::open(Path::new("/tmp/catalog.db")).await?;
//! let mut tx = store.pool().begin().await?;
//! let categories = folio_core::store::category::find_all(&mut tx).await?;
//! tx.commit().await?;
//! # let _ = categories;
//! # Ok(())
//! # }
//! ```

pub mod category;
pub mod category_product;
pub mod client;
pub mod order;
pub mod photo;
pub mod product;

use crate::config::CatalogConfig;
use crate::error::FolioResult;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use std::str::FromStr;
use tracing::{debug, info};

#[derive(Debug, Clone)]
pub struct Store {
    pub(crate) pool: SqlitePool,
    pub(crate) config: CatalogConfig,
}

impl Store {
    /// Connects with `config`, creating the database file and its directory
    /// when missing, then runs pending migrations.
    ///
    /// # Errors
    /// - [`FolioError::Db`](crate::FolioError::Db) if the URL is invalid or the connection fails
    /// - [`FolioError::Migrate`](crate::FolioError::Migrate) if the schema cannot be applied
    /// - [`FolioError::Io`](crate::FolioError::Io) if the parent directory cannot be created
    /// - [`FolioError::Config`](crate::FolioError::Config) if `config` fails [`CatalogConfig::validate`]
    pub async fn connect(config: CatalogConfig) -> FolioResult<Self> {
        config.validate()?;

        let options = SqliteConnectOptions::from_str(&config.database_url)?
            .create_if_missing(true)
            .foreign_keys(true);

        if let Some(parent) = options.get_filename().parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .connect_with(options)
            .await?;

        sqlx::migrate!("./migrations").run(&pool).await?;
        info!(url = %config.database_url, "catalog store ready");

        Ok(Store { pool, config })
    }

    /// Opens (or creates) a file-backed store at `path` with default settings.
    pub async fn open(path: &Path) -> FolioResult<Self> {
        Self::connect(CatalogConfig::for_path(path)).await
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }

    /// Waits for checked-out connections to return and closes the pool.
    pub async fn close(&self) {
        debug!("closing catalog store");
        self.pool.close().await;
    }
}

/// Most ids bound in one statement. SQLite rejects more than 32766 variables.
pub(crate) const MAX_BOUND_IDS: usize = 10_000;

/// Appends `(?, ?, ...)` binding every id. Callers must skip empty lists and
/// split longer ones into [`MAX_BOUND_IDS`] chunks.
pub(crate) fn push_id_list(qb: &mut QueryBuilder<'_, Sqlite>, ids: &[i64]) {
    qb.push("(");
    let mut separated = qb.separated(", ");
    for id in ids {
        separated.push_bind(*id);
    }
    separated.push_unseparated(")");
}

/// Drops repeated ids while keeping first-seen order.
pub(crate) fn dedup_ids(ids: &[i64]) -> Vec<i64> {
    let mut seen = HashSet::with_capacity(ids.len());
    ids.iter().copied().filter(|id| seen.insert(*id)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dedup_ids_keeps_first_occurrence() {
        assert_eq!(dedup_ids(&[3, 1, 3, 2, 1]), vec![3, 1, 2]);
        assert!(dedup_ids(&[]).is_empty());
    }

    #[test]
    fn push_id_list_binds_each_id() {
        let mut qb = QueryBuilder::<Sqlite>::new("SELECT id FROM products WHERE id IN ");
        push_id_list(&mut qb, &[1, 2, 3]);
        assert_eq!(qb.sql(), "SELECT id FROM products WHERE id IN (?, ?, ?)");
    }
}
