use crate::error::FolioResult;
use crate::store::MAX_BOUND_IDS;
use sqlx::{QueryBuilder, Sqlite, SqliteConnection};

/// Links `product_id` to every id in `category_ids` with multi-row inserts.
pub async fn bulk_create(
    conn: &mut SqliteConnection,
    product_id: i64,
    category_ids: &[i64],
) -> FolioResult<()> {
    // two variables per row
    for chunk in category_ids.chunks(MAX_BOUND_IDS / 2) {
        let mut qb =
            QueryBuilder::<Sqlite>::new("INSERT INTO category_products (product_id, category_id) ");
        qb.push_values(chunk, |mut row, category_id| {
            row.push_bind(product_id).push_bind(*category_id);
        });
        qb.build().execute(&mut *conn).await?;
    }

    Ok(())
}

pub async fn destroy_by_product(conn: &mut SqliteConnection, product_id: i64) -> FolioResult<u64> {
    let res = sqlx::query("DELETE FROM category_products WHERE product_id = ?")
        .bind(product_id)
        .execute(conn)
        .await?;

    Ok(res.rows_affected())
}

pub async fn product_ids_for_category(
    conn: &mut SqliteConnection,
    category_id: i64,
) -> FolioResult<Vec<i64>> {
    let ids = sqlx::query_scalar::<_, i64>(
        "SELECT product_id FROM category_products WHERE category_id = ? ORDER BY product_id",
    )
    .bind(category_id)
    .fetch_all(conn)
    .await?;

    Ok(ids)
}
