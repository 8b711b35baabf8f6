use crate::domain::Category;
use crate::error::FolioResult;
use crate::store::{MAX_BOUND_IDS, push_id_list};
use sqlx::{QueryBuilder, Sqlite, SqliteConnection};

pub async fn create(conn: &mut SqliteConnection, name: &str) -> FolioResult<Category> {
    let category = sqlx::query_as::<_, Category>(
        "INSERT INTO categories (name) VALUES (?) RETURNING id, name",
    )
    .bind(name)
    .fetch_one(conn)
    .await?;

    Ok(category)
}

pub async fn find_by_id(conn: &mut SqliteConnection, id: i64) -> FolioResult<Option<Category>> {
    let category = sqlx::query_as::<_, Category>("SELECT id, name FROM categories WHERE id = ?")
        .bind(id)
        .fetch_optional(conn)
        .await?;

    Ok(category)
}

pub async fn find_all(conn: &mut SqliteConnection) -> FolioResult<Vec<Category>> {
    let categories = sqlx::query_as::<_, Category>("SELECT id, name FROM categories ORDER BY id")
        .fetch_all(conn)
        .await?;

    Ok(categories)
}

/// Returns the categories among `ids` that exist, ordered by id.
pub async fn find_by_ids(conn: &mut SqliteConnection, ids: &[i64]) -> FolioResult<Vec<Category>> {
    let mut categories = Vec::new();

    for chunk in ids.chunks(MAX_BOUND_IDS) {
        let mut qb = QueryBuilder::<Sqlite>::new("SELECT id, name FROM categories WHERE id IN ");
        push_id_list(&mut qb, chunk);

        categories.extend(qb.build_query_as::<Category>().fetch_all(&mut *conn).await?);
    }

    categories.sort_by_key(|c| c.id);
    Ok(categories)
}

/// Categories linked to each of `product_ids`, as `(product_id, category)`
/// pairs ordered by product then category id.
pub async fn find_for_products(
    conn: &mut SqliteConnection,
    product_ids: &[i64],
) -> FolioResult<Vec<(i64, Category)>> {
    let mut links = Vec::new();

    for chunk in product_ids.chunks(MAX_BOUND_IDS) {
        let mut qb = QueryBuilder::<Sqlite>::new(
            "SELECT cp.product_id, c.id, c.name
             FROM category_products cp
             JOIN categories c ON c.id = cp.category_id
             WHERE cp.product_id IN ",
        );
        push_id_list(&mut qb, chunk);

        let rows = qb
            .build_query_as::<(i64, i64, String)>()
            .fetch_all(&mut *conn)
            .await?;
        links.extend(
            rows.into_iter()
                .map(|(product_id, id, name)| (product_id, Category { id, name })),
        );
    }

    links.sort_by_key(|(product_id, category)| (*product_id, category.id));
    Ok(links)
}
