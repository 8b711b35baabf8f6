use crate::domain::{Client, NewClient};
use crate::error::{Entity, FolioError, FolioResult};
use crate::store::{Store, client};
use tracing::{debug, info, warn};

/// Registration and lookup of customers.
pub struct ClientManager<'a> {
    store: &'a Store,
}

impl<'a> ClientManager<'a> {
    pub fn new(store: &'a Store) -> Self {
        ClientManager { store }
    }

    /// Stores a new client and their address together.
    ///
    /// No uniqueness or field checks are made beyond what the schema enforces.
    pub async fn create_client(&self, new: NewClient) -> FolioResult<Client> {
        let mut tx = self.store.pool.begin().await?;
        let created = client::create(&mut tx, &new).await?;
        tx.commit().await?;

        info!(client_id = created.id, "created client");
        Ok(created)
    }

    pub async fn list_clients(&self) -> FolioResult<Vec<Client>> {
        let mut conn = self.store.pool.acquire().await?;
        let clients = client::find_all(&mut conn).await?;

        debug!(count = clients.len(), "listed clients");
        Ok(clients)
    }

    /// # Errors
    /// [`FolioError::NotFound`] if no client has this id.
    pub async fn get_client(&self, id: i64) -> FolioResult<Client> {
        let mut conn = self.store.pool.acquire().await?;

        client::find_by_id(&mut conn, id).await?.ok_or_else(|| {
            warn!(client_id = id, "client not found");
            FolioError::not_found(Entity::Client, id)
        })
    }
}
