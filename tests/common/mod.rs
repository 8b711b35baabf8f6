#![allow(dead_code)]

use folio_core::domain::{Category, NewPhoto, NewProduct};
use folio_core::{FolioResult, Store};
use tempfile::TempDir;
use tracing_subscriber::EnvFilter;

/// Installs a test-friendly subscriber once; `RUST_LOG=folio_core=debug` shows store traffic.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Opens a fresh store in its own temp dir. Keep the `TempDir` alive for the test.
pub async fn open_store() -> FolioResult<(TempDir, Store)> {
    init_tracing();
    let tmpdir = TempDir::new()?;
    let store = Store::open(&tmpdir.path().join("catalog.db")).await?;
    Ok((tmpdir, store))
}

pub async fn seed_categories(store: &Store, names: &[&str]) -> FolioResult<Vec<Category>> {
    let mut created = Vec::new();
    for name in names {
        created.push(store.categories().create_category(name).await?);
    }
    Ok(created)
}

pub fn book(name: &str, categories: Vec<i64>, photos: &[&str]) -> NewProduct {
    NewProduct {
        name: name.to_string(),
        author: "Frank Herbert".to_string(),
        synopsis: "A desert planet and its spice.".to_string(),
        amount_stock: 10,
        pages: 412,
        year: 1965,
        price: 30,
        categories,
        photos: photos
            .iter()
            .map(|link| NewPhoto {
                link: link.to_string(),
            })
            .collect(),
    }
}
