use crate::catalog::require_product;
use crate::domain::{NewPhoto, Photo};
use crate::error::{Entity, FolioError, FolioResult};
use crate::store::{Store, photo};
use tracing::{info, warn};

/// Photos owned by products.
///
/// Product create and update call [`photo::bulk_create`] directly inside
/// their own transaction; this manager covers standalone photo edits.
pub struct PhotoManager<'a> {
    store: &'a Store,
}

impl<'a> PhotoManager<'a> {
    pub fn new(store: &'a Store) -> Self {
        PhotoManager { store }
    }

    /// Appends `photos` to the product with `product_id`.
    ///
    /// # Errors
    /// [`FolioError::NotFound`] if the product does not exist.
    pub async fn add_photos(&self, product_id: i64, photos: Vec<NewPhoto>) -> FolioResult<Vec<Photo>> {
        let mut tx = self.store.pool.begin().await?;
        require_product(&mut tx, product_id).await?;

        let created = photo::bulk_create(&mut tx, product_id, &photos).await?;
        tx.commit().await?;

        info!(product_id, count = created.len(), "added photos");
        Ok(created)
    }

    pub async fn list_photos(&self, product_id: i64) -> FolioResult<Vec<Photo>> {
        let mut conn = self.store.pool.acquire().await?;
        photo::find_by_product(&mut conn, product_id).await
    }

    /// # Errors
    /// [`FolioError::NotFound`] if no photo has this id.
    pub async fn delete_photo(&self, id: i64) -> FolioResult<()> {
        let mut conn = self.store.pool.acquire().await?;

        if !photo::destroy(&mut conn, id).await? {
            warn!(photo_id = id, "photo not found");
            return Err(FolioError::not_found(Entity::Photo, id));
        }

        info!(photo_id = id, "deleted photo");
        Ok(())
    }
}
