mod common;

use common::{book, open_store, seed_categories};
use folio_core::domain::{NewPhoto, ProductPatch};
use folio_core::{CatalogConfig, Entity, FolioError, FolioResult, Store};
use tempfile::TempDir;

#[tokio::test]
async fn open_creates_missing_directories() -> FolioResult<()> {
    let tmpdir = TempDir::new()?;
    let db_path = tmpdir.path().join("nested/deeper/catalog.db");

    let store = Store::open(&db_path).await?;
    assert!(db_path.exists());
    store.close().await;

    Ok(())
}

#[tokio::test]
async fn data_survives_reopening() -> FolioResult<()> {
    let tmpdir = TempDir::new()?;
    let db_path = tmpdir.path().join("catalog.db");

    let store = Store::open(&db_path).await?;
    let created = store
        .products()
        .create_product(book("Dune", Vec::new(), &["a.jpg"]))
        .await?;
    store.close().await;

    let reopened = Store::open(&db_path).await?;
    let fetched = reopened.products().get_product(created.id).await?;
    assert_eq!(fetched, created);

    Ok(())
}

#[tokio::test]
async fn categories_can_be_created_and_fetched() -> FolioResult<()> {
    let (_tmpdir, store) = open_store().await?;
    let cats = seed_categories(&store, &["Drama", "Comedy"]).await?;

    let fetched = store.categories().get_category(cats[1].id).await?;
    assert_eq!(fetched.name, "Comedy");
    assert_eq!(store.categories().list_categories().await?, cats);

    let err = store.categories().get_category(77).await.unwrap_err();
    assert!(matches!(
        err,
        FolioError::NotFound {
            entity: Entity::Category,
            id: 77
        }
    ));

    Ok(())
}

#[tokio::test]
async fn photos_can_be_added_and_deleted_individually() -> FolioResult<()> {
    let (_tmpdir, store) = open_store().await?;
    let created = store
        .products()
        .create_product(book("Dune", Vec::new(), &["a.jpg"]))
        .await?;
    let photos = store.photos();

    let added = photos
        .add_photos(
            created.id,
            vec![NewPhoto {
                link: "b.jpg".into(),
            }],
        )
        .await?;
    assert_eq!(added.len(), 1);
    assert_eq!(added[0].product_id, created.id);
    assert_eq!(photos.list_photos(created.id).await?.len(), 2);

    photos.delete_photo(added[0].id).await?;
    let remaining = photos.list_photos(created.id).await?;
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].link, "a.jpg");

    assert!(photos.delete_photo(added[0].id).await.unwrap_err().is_not_found());
    assert!(photos.add_photos(999, Vec::new()).await.unwrap_err().is_not_found());

    Ok(())
}

#[tokio::test]
async fn connect_rejects_a_pool_without_connections() -> FolioResult<()> {
    let tmpdir = TempDir::new()?;
    let db_path = tmpdir.path().join("catalog.db");

    let mut config = CatalogConfig::for_path(&db_path);
    config.max_connections = 0;

    let err = Store::connect(config).await.unwrap_err();
    assert!(matches!(err, FolioError::Config(_)));
    assert!(!db_path.exists());

    Ok(())
}

#[test]
fn product_patch_decodes_partial_json() {
    let patch: ProductPatch = serde_json::from_str(r#"{"price": 0, "categories": []}"#).unwrap();

    assert_eq!(patch.price, Some(0));
    assert_eq!(patch.categories, Some(Vec::new()));
    assert!(patch.name.is_none());
    assert!(patch.photos.is_none());
}
