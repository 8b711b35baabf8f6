//! High-level catalog operations.
//!
//! Each manager borrows a [`Store`] and exposes the operations a request
//! layer calls directly: validate referenced ids, perform the writes inside
//! one transaction, and return freshly loaded, shaped data.
//!
//! ```rust,no_run
//! use folio_core::domain::{NewPhoto, NewProduct};
//! use folio_core::store::Store;
//! use std::path::Path;
//!
//! # async fn run() -> folio_core::FolioResult<()> {
//! let store = Store::open(Path::new("/tmp/catalog.db")).await?;
//! let scifi = store.categories().create_category("Science fiction").await?;
//!
//! let dune = store
//!     .products()
//!     .create_product(NewProduct {
//!         name: "Dune".into(),
//!         author: "Frank Herbert".into(),
//!         synopsis: "Desert planet politics".into(),
//!         amount_stock: 10,
//!         pages: 412,
//!         year: 1965,
//!         price: 30,
//!         categories: vec![scifi.id],
//!         photos: vec![NewPhoto { link: "dune.jpg".into() }],
//!     })
//!     .await?;
//!
//! store.products().decrement_stock(dune.id, 2).await?;
//! # Ok(())
//! # }
//! ```

pub mod categories;
pub mod clients;
pub mod orders;
pub mod photos;
pub mod products;

use crate::domain::{Category, PhotoRef, Product, ProductView};
use crate::error::{Entity, FolioError, FolioResult};
use crate::store::{Store, category, photo, product};
use sqlx::SqliteConnection;
use std::collections::{HashMap, HashSet};
use tracing::warn;

use categories::CategoryManager;
use clients::ClientManager;
use orders::OrderManager;
use photos::PhotoManager;
use products::ProductManager;

impl Store {
    pub fn products(&self) -> ProductManager<'_> {
        ProductManager::new(self)
    }

    pub fn clients(&self) -> ClientManager<'_> {
        ClientManager::new(self)
    }

    pub fn categories(&self) -> CategoryManager<'_> {
        CategoryManager::new(self)
    }

    pub fn photos(&self) -> PhotoManager<'_> {
        PhotoManager::new(self)
    }

    pub fn orders(&self) -> OrderManager<'_> {
        OrderManager::new(self)
    }
}

pub(crate) async fn require_product(conn: &mut SqliteConnection, id: i64) -> FolioResult<Product> {
    match product::find_by_id(conn, id).await? {
        Some(product) => Ok(product),
        None => {
            warn!(product_id = id, "product not found");
            Err(FolioError::not_found(Entity::Product, id))
        }
    }
}

pub(crate) async fn require_category(
    conn: &mut SqliteConnection,
    id: i64,
) -> FolioResult<Category> {
    match category::find_by_id(conn, id).await? {
        Some(category) => Ok(category),
        None => {
            warn!(category_id = id, "category not found");
            Err(FolioError::not_found(Entity::Category, id))
        }
    }
}

/// Fails with the first id in `ids` that has no category row.
pub(crate) async fn require_categories(
    conn: &mut SqliteConnection,
    ids: &[i64],
) -> FolioResult<()> {
    let found: HashSet<i64> = category::find_by_ids(conn, ids)
        .await?
        .into_iter()
        .map(|c| c.id)
        .collect();

    if let Some(&missing) = ids.iter().find(|id| !found.contains(id)) {
        warn!(category_id = missing, "category not found");
        return Err(FolioError::not_found(Entity::Category, missing));
    }

    Ok(())
}

/// Attaches photos and categories to each product, in two batched queries.
pub(crate) async fn load_views(
    conn: &mut SqliteConnection,
    products: Vec<Product>,
) -> FolioResult<Vec<ProductView>> {
    let ids: Vec<i64> = products.iter().map(|p| p.id).collect();

    let mut photos_by_product: HashMap<i64, Vec<PhotoRef>> = HashMap::new();
    for photo in photo::find_by_products(&mut *conn, &ids).await? {
        photos_by_product
            .entry(photo.product_id)
            .or_default()
            .push(photo.into());
    }

    let mut categories_by_product: HashMap<i64, Vec<Category>> = HashMap::new();
    for (product_id, category) in category::find_for_products(&mut *conn, &ids).await? {
        categories_by_product
            .entry(product_id)
            .or_default()
            .push(category);
    }

    Ok(products
        .into_iter()
        .map(|p| {
            let photos = photos_by_product.remove(&p.id).unwrap_or_default();
            let categories = categories_by_product.remove(&p.id).unwrap_or_default();
            ProductView::new(p, photos, categories)
        })
        .collect())
}

pub(crate) async fn load_view(
    conn: &mut SqliteConnection,
    product: Product,
) -> FolioResult<ProductView> {
    let id = product.id;
    load_views(conn, vec![product])
        .await?
        .pop()
        .ok_or_else(|| FolioError::not_found(Entity::Product, id))
}
