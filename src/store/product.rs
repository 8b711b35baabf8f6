use crate::domain::{NewProduct, Product, clamp_stock};
use crate::error::FolioResult;
use crate::store::{MAX_BOUND_IDS, push_id_list};
use sqlx::{QueryBuilder, Sqlite, SqliteConnection};

const COLUMNS: &str = "id, name, author, synopsis, amount_stock, pages, year, price";

/// Inserts the scalar fields of `new`; categories and photos are left to the caller.
pub async fn create(conn: &mut SqliteConnection, new: &NewProduct) -> FolioResult<Product> {
    let sql = format!(
        "INSERT INTO products (name, author, synopsis, amount_stock, pages, year, price)
         VALUES (?, ?, ?, ?, ?, ?, ?)
         RETURNING {COLUMNS}"
    );

    let product = sqlx::query_as::<_, Product>(&sql)
        .bind(&new.name)
        .bind(&new.author)
        .bind(&new.synopsis)
        .bind(clamp_stock(new.amount_stock))
        .bind(new.pages)
        .bind(new.year)
        .bind(new.price)
        .fetch_one(conn)
        .await?;

    Ok(product)
}

pub async fn find_by_id(conn: &mut SqliteConnection, id: i64) -> FolioResult<Option<Product>> {
    let sql = format!("SELECT {COLUMNS} FROM products WHERE id = ?");
    let product = sqlx::query_as::<_, Product>(&sql)
        .bind(id)
        .fetch_optional(conn)
        .await?;

    Ok(product)
}

pub async fn find_all(conn: &mut SqliteConnection) -> FolioResult<Vec<Product>> {
    let sql = format!("SELECT {COLUMNS} FROM products ORDER BY id");
    let products = sqlx::query_as::<_, Product>(&sql).fetch_all(conn).await?;

    Ok(products)
}

/// Products among `ids` that exist, ordered by id.
pub async fn find_by_ids(conn: &mut SqliteConnection, ids: &[i64]) -> FolioResult<Vec<Product>> {
    let mut products = Vec::new();

    for chunk in ids.chunks(MAX_BOUND_IDS) {
        let mut qb =
            QueryBuilder::<Sqlite>::new(format!("SELECT {COLUMNS} FROM products WHERE id IN "));
        push_id_list(&mut qb, chunk);

        products.extend(qb.build_query_as::<Product>().fetch_all(&mut *conn).await?);
    }

    products.sort_by_key(|p| p.id);
    Ok(products)
}

/// Products that have been ordered, most recently ordered first, at most `limit` rows.
///
/// Recency is the highest `product_orders.id` per product. The inner join
/// leaves out products that were never ordered. Earlier versions of this
/// catalog used a LEFT OUTER JOIN here, so unordered products showed up in
/// the ranking too.
pub async fn find_top_selling(conn: &mut SqliteConnection, limit: u32) -> FolioResult<Vec<Product>> {
    let products = sqlx::query_as::<_, Product>(
        "SELECT p.id AS id, p.name AS name, p.author AS author, p.synopsis AS synopsis,
                p.amount_stock AS amount_stock, p.pages AS pages, p.year AS year, p.price AS price
         FROM products p
         JOIN product_orders o ON o.product_id = p.id
         GROUP BY p.id
         ORDER BY MAX(o.id) DESC
         LIMIT ?",
    )
    .bind(limit)
    .fetch_all(conn)
    .await?;

    Ok(products)
}

/// Writes every scalar field of `product` back to its row.
pub async fn save(conn: &mut SqliteConnection, product: &Product) -> FolioResult<()> {
    sqlx::query(
        "UPDATE products
         SET name = ?, author = ?, synopsis = ?, amount_stock = ?, pages = ?, year = ?, price = ?,
             updated_at = CURRENT_TIMESTAMP
         WHERE id = ?",
    )
    .bind(&product.name)
    .bind(&product.author)
    .bind(&product.synopsis)
    .bind(clamp_stock(product.amount_stock))
    .bind(product.pages)
    .bind(product.year)
    .bind(product.price)
    .bind(product.id)
    .execute(conn)
    .await?;

    Ok(())
}

/// Subtracts `amount` from the stock in one statement, flooring at zero and
/// saturating at `i64::MAX` when a negative `amount` would overflow.
///
/// Returns `None` when no product has this id.
pub async fn decrement_stock(
    conn: &mut SqliteConnection,
    id: i64,
    amount: i64,
) -> FolioResult<Option<Product>> {
    let sql = format!(
        "UPDATE products
         SET amount_stock = CASE
                 WHEN ? >= amount_stock THEN 0
                 WHEN amount_stock > ? THEN {max}
                 ELSE amount_stock - ?
             END,
             updated_at = CURRENT_TIMESTAMP
         WHERE id = ?
         RETURNING {COLUMNS}",
        max = i64::MAX
    );

    let product = sqlx::query_as::<_, Product>(&sql)
        .bind(amount)
        .bind(overflow_ceiling(amount))
        .bind(amount)
        .bind(id)
        .fetch_optional(conn)
        .await?;

    Ok(product)
}

/// Largest stock for which `stock - amount` still fits in an `i64`.
///
/// SQLite turns an overflowing integer subtraction into a REAL, so the
/// statement must never evaluate one.
fn overflow_ceiling(amount: i64) -> i64 {
    if amount < 0 {
        i64::MAX + amount
    } else {
        i64::MAX
    }
}

pub async fn destroy(conn: &mut SqliteConnection, id: i64) -> FolioResult<bool> {
    let res = sqlx::query("DELETE FROM products WHERE id = ?")
        .bind(id)
        .execute(conn)
        .await?;

    Ok(res.rows_affected() > 0)
}

#[cfg(test)]
mod tests {
    use super::overflow_ceiling;

    #[test]
    fn overflow_ceiling_only_shrinks_for_negative_amounts() {
        assert_eq!(overflow_ceiling(5), i64::MAX);
        assert_eq!(overflow_ceiling(0), i64::MAX);
        assert_eq!(overflow_ceiling(-10), i64::MAX - 10);
        assert_eq!(overflow_ceiling(i64::MIN), -1);
    }
}
