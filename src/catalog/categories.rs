use crate::catalog::require_category;
use crate::domain::Category;
use crate::error::FolioResult;
use crate::store::{Store, category};
use tracing::info;

pub struct CategoryManager<'a> {
    store: &'a Store,
}

impl<'a> CategoryManager<'a> {
    pub fn new(store: &'a Store) -> Self {
        CategoryManager { store }
    }

    pub async fn create_category(&self, name: &str) -> FolioResult<Category> {
        let mut conn = self.store.pool.acquire().await?;
        let created = category::create(&mut conn, name).await?;

        info!(category_id = created.id, name, "created category");
        Ok(created)
    }

    pub async fn list_categories(&self) -> FolioResult<Vec<Category>> {
        let mut conn = self.store.pool.acquire().await?;
        category::find_all(&mut conn).await
    }

    /// # Errors
    /// [`FolioError::NotFound`](crate::FolioError::NotFound) if the category does not exist.
    pub async fn get_category(&self, id: i64) -> FolioResult<Category> {
        let mut conn = self.store.pool.acquire().await?;
        require_category(&mut conn, id).await
    }
}
