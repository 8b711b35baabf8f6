use crate::domain::{Address, Client, NewClient};
use crate::error::FolioResult;
use sqlx::SqliteConnection;
use std::collections::HashMap;

const ADDRESS_COLUMNS: &str =
    "id, client_id, street, number, complement, district, city, state, zip_code";

/// Inserts the client row and its address. Run inside a transaction so the
/// pair is written together.
pub async fn create(conn: &mut SqliteConnection, new: &NewClient) -> FolioResult<Client> {
    let mut client = sqlx::query_as::<_, Client>(
        "INSERT INTO clients (name, email, phone) VALUES (?, ?, ?)
         RETURNING id, name, email, phone",
    )
    .bind(&new.name)
    .bind(&new.email)
    .bind(&new.phone)
    .fetch_one(&mut *conn)
    .await?;

    let address = &new.address;
    let sql = format!(
        "INSERT INTO addresses (client_id, street, number, complement, district, city, state, zip_code)
         VALUES (?, ?, ?, ?, ?, ?, ?, ?)
         RETURNING {ADDRESS_COLUMNS}"
    );
    let stored = sqlx::query_as::<_, Address>(&sql)
        .bind(client.id)
        .bind(&address.street)
        .bind(&address.number)
        .bind(&address.complement)
        .bind(&address.district)
        .bind(&address.city)
        .bind(&address.state)
        .bind(&address.zip_code)
        .fetch_one(&mut *conn)
        .await?;

    client.address = Some(stored);
    Ok(client)
}

pub async fn find_by_id(conn: &mut SqliteConnection, id: i64) -> FolioResult<Option<Client>> {
    let client = sqlx::query_as::<_, Client>(
        "SELECT id, name, email, phone FROM clients WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(&mut *conn)
    .await?;

    let Some(mut client) = client else {
        return Ok(None);
    };

    let sql = format!("SELECT {ADDRESS_COLUMNS} FROM addresses WHERE client_id = ?");
    client.address = sqlx::query_as::<_, Address>(&sql)
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;

    Ok(Some(client))
}

/// Every client with its address attached, ordered by id.
pub async fn find_all(conn: &mut SqliteConnection) -> FolioResult<Vec<Client>> {
    let mut clients =
        sqlx::query_as::<_, Client>("SELECT id, name, email, phone FROM clients ORDER BY id")
            .fetch_all(&mut *conn)
            .await?;

    if clients.is_empty() {
        return Ok(clients);
    }

    // every client is listed, so every address is needed
    let sql = format!("SELECT {ADDRESS_COLUMNS} FROM addresses");
    let mut by_client: HashMap<i64, Address> = sqlx::query_as::<_, Address>(&sql)
        .fetch_all(&mut *conn)
        .await?
        .into_iter()
        .map(|a| (a.client_id, a))
        .collect();

    for client in &mut clients {
        client.address = by_client.remove(&client.id);
    }

    Ok(clients)
}
