use crate::catalog::require_product;
use crate::domain::ProductOrder;
use crate::error::FolioResult;
use crate::store::{Store, order};
use tracing::info;

/// Order rows referencing products. They only feed the top-selling ranking.
pub struct OrderManager<'a> {
    store: &'a Store,
}

impl<'a> OrderManager<'a> {
    pub fn new(store: &'a Store) -> Self {
        OrderManager { store }
    }

    /// # Errors
    /// [`FolioError::NotFound`](crate::FolioError::NotFound) if the product does not exist.
    pub async fn record_order(&self, product_id: i64) -> FolioResult<ProductOrder> {
        let mut tx = self.store.pool.begin().await?;
        require_product(&mut tx, product_id).await?;

        let created = order::create(&mut tx, product_id).await?;
        tx.commit().await?;

        info!(order_id = created.id, product_id, "recorded order");
        Ok(created)
    }

    pub async fn list_orders_for_product(&self, product_id: i64) -> FolioResult<Vec<ProductOrder>> {
        let mut conn = self.store.pool.acquire().await?;
        order::find_by_product(&mut conn, product_id).await
    }
}
