mod common;

use common::{book, open_store};
use folio_core::{CatalogConfig, FolioResult, Store};
use tempfile::TempDir;

#[tokio::test]
async fn top_selling_is_bounded_and_ordered_by_latest_order() -> FolioResult<()> {
    let (_tmpdir, store) = open_store().await?;
    let products = store.products();
    let orders = store.orders();

    let mut ids = Vec::new();
    for name in ["One", "Two", "Three", "Four", "Five", "Six"] {
        ids.push(products.create_product(book(name, Vec::new(), &[])).await?.id);
    }

    // ordered oldest to newest; "One" is ordered twice, last of all
    for id in [ids[0], ids[1], ids[2], ids[3], ids[4], ids[0]] {
        orders.record_order(id).await?;
    }

    let top = products.top_selling_products().await?;
    let names: Vec<_> = top.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["One", "Five", "Four", "Three"]);

    Ok(())
}

#[tokio::test]
async fn products_without_orders_are_not_ranked() -> FolioResult<()> {
    let (_tmpdir, store) = open_store().await?;
    let products = store.products();

    let sold = products.create_product(book("Sold", Vec::new(), &["s.jpg"])).await?;
    products.create_product(book("Shelved", Vec::new(), &[])).await?;
    store.orders().record_order(sold.id).await?;

    let top = products.top_selling_products().await?;
    assert_eq!(top.len(), 1);
    assert_eq!(top[0].id, sold.id);
    assert_eq!(top[0].photos[0].link, "s.jpg");

    Ok(())
}

#[tokio::test]
async fn top_selling_limit_follows_config() -> FolioResult<()> {
    let tmpdir = TempDir::new()?;
    let mut config = CatalogConfig::for_path(&tmpdir.path().join("catalog.db"));
    config.top_selling_limit = 2;
    let store = Store::connect(config).await?;

    for name in ["A", "B", "C"] {
        let created = store.products().create_product(book(name, Vec::new(), &[])).await?;
        store.orders().record_order(created.id).await?;
    }

    let top = store.products().top_selling_products().await?;
    let names: Vec<_> = top.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["C", "B"]);

    Ok(())
}

#[tokio::test]
async fn ordering_a_missing_product_is_not_found() -> FolioResult<()> {
    let (_tmpdir, store) = open_store().await?;

    let err = store.orders().record_order(12).await.unwrap_err();
    assert!(err.is_not_found());

    Ok(())
}
