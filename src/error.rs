use std::fmt;
use thiserror::Error;

/// The kind of record a [`FolioError::NotFound`] refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    Client,
    Product,
    Category,
    Photo,
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Entity::Client => "client",
            Entity::Product => "product",
            Entity::Category => "category",
            Entity::Photo => "photo",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Error)]
pub enum FolioError {
    #[error("{entity} {id} not found")]
    NotFound { entity: Entity, id: i64 },

    #[error("Database error: {0}")]
    Db(#[from] sqlx::Error),

    #[error("Migration failed: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl FolioError {
    pub(crate) fn not_found(entity: Entity, id: i64) -> Self {
        FolioError::NotFound { entity, id }
    }

    /// Returns `true` for the domain `NotFound` error, whatever the entity.
    pub fn is_not_found(&self) -> bool {
        matches!(self, FolioError::NotFound { .. })
    }
}

pub type FolioResult<T> = Result<T, FolioError>;
