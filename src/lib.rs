//! # folio_core
//!
//! Catalog backend for a bookstore: clients, products (books), categories,
//! photos and orders, stored in SQLite through sqlx.
//!
//! ## Features
//!
//! - **Product lifecycle**: create with categories and photos, partial updates, cascading deletes
//! - **Stock control**: decrements that never drop below zero
//! - **Shaped views**: full public views, id-only admin views, per-category listings
//! - **Top sellers**: bounded ranking of the most recently ordered products
//! - **Clients**: registration with an address, lookup and listing
//! - **Atomic writes**: every multi-step operation runs in one transaction
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use folio_core::{CatalogConfig, Store};
//!
//! # async fn run() -> folio_core::FolioResult<()> {
//! let store = Store::connect(CatalogConfig::from_env()?).await?;
//!
//! for summary in store.products().list_products().await? {
//!     println!("{} by {} ({} in stock)", summary.name, summary.author, summary.amount_stock);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! - **[`domain`]**: records, input payloads and response views
//! - **[`store`]**: the connection pool, schema and per-table queries
//! - **[`catalog`]**: managers that validate, write transactionally and shape results
//! - **[`config`]**: connection settings and limits
//! - **[`error`]**: unified error handling
//!
//! ## Error Handling
//!
//! All operations return [`FolioResult<T>`]. The only domain failure is
//! [`FolioError::NotFound`], raised when a referenced client, product,
//! category or photo id does not exist. Store failures surface untouched as
//! [`FolioError::Db`].
//!
//! ```rust,no_run
//! use folio_core::{FolioError, FolioResult, Store};
//!
//! async fn stock_of(store: &Store, id: i64) -> FolioResult<Option<i64>> {
//!     match store.products().get_product(id).await {
//!         Ok(product) => Ok(Some(product.amount_stock)),
//!         Err(FolioError::NotFound { .. }) => Ok(None),
//!         Err(e) => Err(e),
//!     }
//! }
//! ```

pub mod catalog;
pub mod config;
pub mod domain;
pub mod error;
pub mod store;

/// Re-exports the most commonly used types for convenience.
pub use config::CatalogConfig;
pub use error::{Entity, FolioError, FolioResult};
pub use store::Store;
