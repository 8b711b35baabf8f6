use crate::domain::{NewPhoto, Photo};
use crate::error::FolioResult;
use crate::store::{MAX_BOUND_IDS, push_id_list};
use sqlx::{QueryBuilder, Sqlite, SqliteConnection};

/// Persists `photos` as owned by `product_id` and returns the stored rows.
///
/// This is the photo collaborator used by product create and update; it runs
/// on whatever connection (or transaction) the caller passes in.
pub async fn bulk_create(
    conn: &mut SqliteConnection,
    product_id: i64,
    photos: &[NewPhoto],
) -> FolioResult<Vec<Photo>> {
    let mut created = Vec::with_capacity(photos.len());

    // two variables per row
    for chunk in photos.chunks(MAX_BOUND_IDS / 2) {
        let mut qb = QueryBuilder::<Sqlite>::new("INSERT INTO photos (link, product_id) ");
        qb.push_values(chunk, |mut row, photo| {
            row.push_bind(photo.link.clone()).push_bind(product_id);
        });
        qb.push(" RETURNING id, link, product_id");

        created.extend(qb.build_query_as::<Photo>().fetch_all(&mut *conn).await?);
    }

    Ok(created)
}

pub async fn find_by_id(conn: &mut SqliteConnection, id: i64) -> FolioResult<Option<Photo>> {
    let photo =
        sqlx::query_as::<_, Photo>("SELECT id, link, product_id FROM photos WHERE id = ?")
            .bind(id)
            .fetch_optional(conn)
            .await?;

    Ok(photo)
}

pub async fn find_by_product(conn: &mut SqliteConnection, product_id: i64) -> FolioResult<Vec<Photo>> {
    find_by_products(conn, &[product_id]).await
}

/// Photos owned by any of `product_ids`, ordered by product then photo id.
pub async fn find_by_products(
    conn: &mut SqliteConnection,
    product_ids: &[i64],
) -> FolioResult<Vec<Photo>> {
    let mut photos = Vec::new();

    for chunk in product_ids.chunks(MAX_BOUND_IDS) {
        let mut qb = QueryBuilder::<Sqlite>::new(
            "SELECT id, link, product_id FROM photos WHERE product_id IN ",
        );
        push_id_list(&mut qb, chunk);

        photos.extend(qb.build_query_as::<Photo>().fetch_all(&mut *conn).await?);
    }

    photos.sort_by_key(|p| (p.product_id, p.id));
    Ok(photos)
}

pub async fn destroy(conn: &mut SqliteConnection, id: i64) -> FolioResult<bool> {
    let res = sqlx::query("DELETE FROM photos WHERE id = ?")
        .bind(id)
        .execute(conn)
        .await?;

    Ok(res.rows_affected() > 0)
}

pub async fn destroy_by_product(conn: &mut SqliteConnection, product_id: i64) -> FolioResult<u64> {
    let res = sqlx::query("DELETE FROM photos WHERE product_id = ?")
        .bind(product_id)
        .execute(conn)
        .await?;

    Ok(res.rows_affected())
}
