use crate::domain::ProductOrder;
use crate::error::FolioResult;
use sqlx::SqliteConnection;

pub async fn create(conn: &mut SqliteConnection, product_id: i64) -> FolioResult<ProductOrder> {
    let order = sqlx::query_as::<_, ProductOrder>(
        "INSERT INTO product_orders (product_id) VALUES (?) RETURNING id, product_id",
    )
    .bind(product_id)
    .fetch_one(conn)
    .await?;

    Ok(order)
}

pub async fn find_by_product(
    conn: &mut SqliteConnection,
    product_id: i64,
) -> FolioResult<Vec<ProductOrder>> {
    let orders = sqlx::query_as::<_, ProductOrder>(
        "SELECT id, product_id FROM product_orders WHERE product_id = ? ORDER BY id",
    )
    .bind(product_id)
    .fetch_all(conn)
    .await?;

    Ok(orders)
}

pub async fn destroy_by_product(conn: &mut SqliteConnection, product_id: i64) -> FolioResult<u64> {
    let res = sqlx::query("DELETE FROM product_orders WHERE product_id = ?")
        .bind(product_id)
        .execute(conn)
        .await?;

    Ok(res.rows_affected())
}
