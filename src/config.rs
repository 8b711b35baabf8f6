use crate::error::{FolioError, FolioResult};
use std::path::{Path, PathBuf};

const DEFAULT_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_TOP_SELLING_LIMIT: u32 = 4;

/// Settings needed to open a [`Store`](crate::store::Store).
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// sqlx connection string, e.g. `sqlite:/var/lib/folio/catalog.db`.
    pub database_url: String,
    pub max_connections: u32,
    /// Upper bound for [`top_selling_products`](crate::catalog::products::ProductManager::top_selling_products).
    pub top_selling_limit: u32,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self::for_path(&Self::default_database_path())
    }
}

impl CatalogConfig {
    /// Builds a config for a file-backed store at `path`, keeping the other defaults.
    pub fn for_path(path: &Path) -> Self {
        Self {
            database_url: format!("sqlite:{}", path.display()),
            max_connections: DEFAULT_MAX_CONNECTIONS,
            top_selling_limit: DEFAULT_TOP_SELLING_LIMIT,
        }
    }

    /// Reads `FOLIO_DATABASE_URL`, `FOLIO_MAX_CONNECTIONS` and
    /// `FOLIO_TOP_SELLING_LIMIT`, falling back to [`Default`] for anything unset.
    ///
    /// # Errors
    /// Returns [`FolioError::Config`] when a numeric variable does not parse
    /// or the result fails [`validate`](Self::validate).
    pub fn from_env() -> FolioResult<Self> {
        let defaults = Self::default();

        let config = Self {
            database_url: std::env::var("FOLIO_DATABASE_URL").unwrap_or(defaults.database_url),
            max_connections: parse_var("FOLIO_MAX_CONNECTIONS", defaults.max_connections)?,
            top_selling_limit: parse_var("FOLIO_TOP_SELLING_LIMIT", defaults.top_selling_limit)?,
        };
        config.validate()?;

        Ok(config)
    }

    /// Rejects settings the pool cannot work with.
    ///
    /// # Errors
    /// [`FolioError::Config`] if `max_connections` is 0, since such a pool
    /// never hands out a connection.
    pub fn validate(&self) -> FolioResult<()> {
        if self.max_connections == 0 {
            return Err(FolioError::Config(
                "max_connections must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// `{data_dir}/folio/catalog.db`, or `./catalog.db` when the platform has no data dir.
    fn default_database_path() -> PathBuf {
        dirs::data_dir()
            .map(|dir| dir.join("folio"))
            .unwrap_or_else(|| PathBuf::from("."))
            .join("catalog.db")
    }
}

fn parse_var(key: &str, default: u32) -> FolioResult<u32> {
    match std::env::var(key) {
        Ok(raw) => parse_value(key, &raw),
        Err(_) => Ok(default),
    }
}

fn parse_value(key: &str, raw: &str) -> FolioResult<u32> {
    raw.trim()
        .parse()
        .map_err(|_| FolioError::Config(format!("{key} must be a non-negative integer, got '{raw}'")))
}
