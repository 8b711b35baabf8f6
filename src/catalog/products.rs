use crate::catalog::{load_view, load_views, require_categories, require_category, require_product};
use crate::domain::{
    AdminProductView, CategoryWithProducts, NewProduct, Product, ProductPatch, ProductSummary,
    ProductView,
};
use crate::error::{Entity, FolioError, FolioResult};
use crate::store::{Store, category_product, dedup_ids, order, photo, product};
use tracing::{debug, info, warn};

/// Product lifecycle: creation with categories and photos, partial updates,
/// cascading deletes, stock adjustments and the public/admin read views.
pub struct ProductManager<'a> {
    store: &'a Store,
}

impl<'a> ProductManager<'a> {
    pub fn new(store: &'a Store) -> Self {
        ProductManager { store }
    }

    /// Creates a product, links it to `new.categories` and stores `new.photos`.
    ///
    /// All category ids are checked before anything is written, and the whole
    /// sequence runs in one transaction. Repeated category ids are linked once.
    ///
    /// # Errors
    /// - [`FolioError::NotFound`] naming the first unknown category id
    /// - [`FolioError::Db`] if any statement fails; nothing is persisted
    pub async fn create_product(&self, new: NewProduct) -> FolioResult<ProductView> {
        let category_ids = dedup_ids(&new.categories);
        let mut tx = self.store.pool.begin().await?;

        require_categories(&mut tx, &category_ids).await?;

        let created = product::create(&mut tx, &new).await?;
        category_product::bulk_create(&mut tx, created.id, &category_ids).await?;
        photo::bulk_create(&mut tx, created.id, &new.photos).await?;

        let view = load_view(&mut tx, created).await?;
        tx.commit().await?;

        info!(
            product_id = view.id,
            categories = view.categories.len(),
            photos = view.photos.len(),
            "created product"
        );
        Ok(view)
    }

    /// Every product with photo links and category ids.
    pub async fn list_products(&self) -> FolioResult<Vec<ProductSummary>> {
        let mut conn = self.store.pool.acquire().await?;
        let products = product::find_all(&mut conn).await?;
        let views = load_views(&mut conn, products).await?;

        debug!(count = views.len(), "listed products");
        Ok(views.into_iter().map(ProductSummary::from).collect())
    }

    /// The most recently ordered products, bounded by
    /// [`CatalogConfig::top_selling_limit`](crate::config::CatalogConfig::top_selling_limit).
    ///
    /// Ranking is by the newest order id per product, not by order count.
    /// Products without orders never appear, unlike earlier versions that
    /// ranked them through a left outer join.
    pub async fn top_selling_products(&self) -> FolioResult<Vec<ProductView>> {
        let limit = self.store.config.top_selling_limit;
        let mut conn = self.store.pool.acquire().await?;

        let products = product::find_top_selling(&mut conn, limit).await?;
        load_views(&mut conn, products).await
    }

    /// A category together with every product linked to it.
    ///
    /// # Errors
    /// [`FolioError::NotFound`] if the category does not exist.
    pub async fn products_by_category(&self, category_id: i64) -> FolioResult<CategoryWithProducts> {
        let mut conn = self.store.pool.acquire().await?;
        let category = require_category(&mut conn, category_id).await?;

        let ids = category_product::product_ids_for_category(&mut conn, category_id).await?;
        let products = product::find_by_ids(&mut conn, &ids).await?;
        let products = load_views(&mut conn, products).await?;

        debug!(category_id, count = products.len(), "listed products by category");
        Ok(CategoryWithProducts {
            id: category.id,
            name: category.name,
            products,
        })
    }

    /// Full public view of one product.
    ///
    /// # Errors
    /// [`FolioError::NotFound`] if the product does not exist.
    pub async fn get_product(&self, id: i64) -> FolioResult<ProductView> {
        let mut conn = self.store.pool.acquire().await?;
        let found = require_product(&mut conn, id).await?;
        load_view(&mut conn, found).await
    }

    /// Admin projection of one product: photo and category ids only.
    pub async fn get_product_for_admin(&self, id: i64) -> FolioResult<AdminProductView> {
        Ok(self.get_product(id).await?.into())
    }

    pub async fn list_products_for_admin(&self) -> FolioResult<Vec<AdminProductView>> {
        let mut conn = self.store.pool.acquire().await?;
        let products = product::find_all(&mut conn).await?;
        let views = load_views(&mut conn, products).await?;

        Ok(views.into_iter().map(AdminProductView::from).collect())
    }

    /// Looks a product up by id, failing with [`FolioError::NotFound`] when absent.
    pub async fn ensure_product_exists(&self, id: i64) -> FolioResult<Product> {
        let mut conn = self.store.pool.acquire().await?;
        require_product(&mut conn, id).await
    }

    /// Applies `patch` to the product with `id`.
    ///
    /// - `categories: Some(ids)` replaces every association with exactly `ids`.
    /// - `photos: Some(list)` appends photos; existing ones are kept.
    /// - Scalar fields set to `Some` overwrite, `None` keeps the stored value.
    ///
    /// Runs in one transaction.
    ///
    /// # Errors
    /// [`FolioError::NotFound`] for an unknown product or category id.
    pub async fn update_product(&self, id: i64, patch: ProductPatch) -> FolioResult<ProductView> {
        let mut tx = self.store.pool.begin().await?;
        let mut current = require_product(&mut tx, id).await?;

        if let Some(categories) = &patch.categories {
            let category_ids = dedup_ids(categories);
            require_categories(&mut tx, &category_ids).await?;
            category_product::destroy_by_product(&mut tx, id).await?;
            category_product::bulk_create(&mut tx, id, &category_ids).await?;
        }

        if let Some(photos) = &patch.photos {
            photo::bulk_create(&mut tx, id, photos).await?;
        }

        current.apply(&patch);
        product::save(&mut tx, &current).await?;

        let view = load_view(&mut tx, current).await?;
        tx.commit().await?;

        info!(product_id = id, "updated product");
        Ok(view)
    }

    /// Deletes the product's photos, category links and orders, then the product.
    ///
    /// # Errors
    /// [`FolioError::NotFound`] if the product does not exist.
    pub async fn delete_product(&self, id: i64) -> FolioResult<()> {
        let mut tx = self.store.pool.begin().await?;
        require_product(&mut tx, id).await?;

        let photos = photo::destroy_by_product(&mut tx, id).await?;
        let links = category_product::destroy_by_product(&mut tx, id).await?;
        let orders = order::destroy_by_product(&mut tx, id).await?;
        product::destroy(&mut tx, id).await?;

        tx.commit().await?;

        info!(product_id = id, photos, links, orders, "deleted product");
        Ok(())
    }

    /// Removes `amount` units from stock, never going below zero.
    ///
    /// A negative `amount` is accepted and raises the stock.
    ///
    /// # Errors
    /// [`FolioError::NotFound`] if the product does not exist.
    pub async fn decrement_stock(&self, id: i64, amount: i64) -> FolioResult<Product> {
        let mut conn = self.store.pool.acquire().await?;

        match product::decrement_stock(&mut conn, id, amount).await? {
            Some(updated) => {
                info!(product_id = id, amount, stock = updated.amount_stock, "decremented stock");
                Ok(updated)
            }
            None => {
                warn!(product_id = id, "product not found");
                Err(FolioError::not_found(Entity::Product, id))
            }
        }
    }
}
