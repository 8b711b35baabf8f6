//! Records, input payloads and the shaped views returned by the catalog.
//!
//! Row types derive [`sqlx::FromRow`] and map one table each. Input types
//! derive [`Deserialize`] so a request layer can decode JSON into them
//! directly. Views derive [`Serialize`] with camelCase keys.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A book in the catalog, exactly as stored in `products`.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub author: String,
    pub synopsis: String,
    pub amount_stock: i64,
    pub pages: i64,
    pub year: i64,
    pub price: i64,
}

impl Product {
    /// Applies every field present in `patch`, leaving the others untouched.
    ///
    /// Presence is explicit, so `Some(0)` or `Some(String::new())` overwrite.
    pub fn apply(&mut self, patch: &ProductPatch) {
        if let Some(name) = &patch.name {
            self.name = name.clone();
        }
        if let Some(author) = &patch.author {
            self.author = author.clone();
        }
        if let Some(synopsis) = &patch.synopsis {
            self.synopsis = synopsis.clone();
        }
        if let Some(amount_stock) = patch.amount_stock {
            self.amount_stock = clamp_stock(amount_stock);
        }
        if let Some(pages) = patch.pages {
            self.pages = pages;
        }
        if let Some(year) = patch.year {
            self.year = year;
        }
        if let Some(price) = patch.price {
            self.price = price;
        }
    }
}

/// Stock can never go below zero.
pub(crate) fn clamp_stock(amount: i64) -> i64 {
    amount.max(0)
}

#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Photo {
    pub id: i64,
    pub link: String,
    pub product_id: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductOrder {
    pub id: i64,
    pub product_id: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub id: i64,
    pub client_id: i64,
    pub street: String,
    pub number: String,
    pub complement: Option<String>,
    pub district: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
}

/// A customer and their address.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct Client {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    #[sqlx(skip)]
    pub address: Option<Address>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPhoto {
    pub link: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    pub name: String,
    pub author: String,
    pub synopsis: String,
    #[serde(default)]
    pub amount_stock: i64,
    pub pages: i64,
    pub year: i64,
    pub price: i64,
    #[serde(default)]
    pub categories: Vec<i64>,
    #[serde(default)]
    pub photos: Vec<NewPhoto>,
}

/// A partial product update.
///
/// `categories: Some(_)` replaces the whole association set, while
/// `photos: Some(_)` appends to the existing photos.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPatch {
    pub name: Option<String>,
    pub author: Option<String>,
    pub synopsis: Option<String>,
    pub amount_stock: Option<i64>,
    pub pages: Option<i64>,
    pub year: Option<i64>,
    pub price: Option<i64>,
    pub categories: Option<Vec<i64>>,
    pub photos: Option<Vec<NewPhoto>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAddress {
    pub street: String,
    pub number: String,
    pub complement: Option<String>,
    pub district: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewClient {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: NewAddress,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PhotoRef {
    pub id: i64,
    pub link: String,
}

impl From<Photo> for PhotoRef {
    fn from(photo: Photo) -> Self {
        PhotoRef {
            id: photo.id,
            link: photo.link,
        }
    }
}

/// Full public view of one product: photos with links, categories with names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductView {
    pub id: i64,
    pub name: String,
    pub author: String,
    pub synopsis: String,
    pub amount_stock: i64,
    pub pages: i64,
    pub year: i64,
    pub price: i64,
    pub photos: Vec<PhotoRef>,
    pub categories: Vec<Category>,
}

impl ProductView {
    pub fn new(product: Product, photos: Vec<PhotoRef>, categories: Vec<Category>) -> Self {
        ProductView {
            id: product.id,
            name: product.name,
            author: product.author,
            synopsis: product.synopsis,
            amount_stock: product.amount_stock,
            pages: product.pages,
            year: product.year,
            price: product.price,
            photos,
            categories,
        }
    }

    pub fn category_ids(&self) -> Vec<i64> {
        self.categories.iter().map(|c| c.id).collect()
    }
}

/// Entry of the public product list: photos with links, categories by id only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSummary {
    pub id: i64,
    pub name: String,
    pub author: String,
    pub synopsis: String,
    pub amount_stock: i64,
    pub pages: i64,
    pub year: i64,
    pub price: i64,
    pub photos: Vec<PhotoRef>,
    pub categories: Vec<i64>,
}

impl From<ProductView> for ProductSummary {
    fn from(view: ProductView) -> Self {
        let categories = view.category_ids();
        ProductSummary {
            id: view.id,
            name: view.name,
            author: view.author,
            synopsis: view.synopsis,
            amount_stock: view.amount_stock,
            pages: view.pages,
            year: view.year,
            price: view.price,
            photos: view.photos,
            categories,
        }
    }
}

/// Reduced projection for back-office editing: ids only for photos and categories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminProductView {
    pub id: i64,
    pub name: String,
    pub price: i64,
    pub author: String,
    pub year: i64,
    pub synopsis: String,
    pub pages: i64,
    pub amount_stock: i64,
    pub photos_ids: Vec<i64>,
    pub categories: Vec<i64>,
}

impl From<ProductView> for AdminProductView {
    fn from(view: ProductView) -> Self {
        let categories = view.category_ids();
        AdminProductView {
            id: view.id,
            name: view.name,
            price: view.price,
            author: view.author,
            year: view.year,
            synopsis: view.synopsis,
            pages: view.pages,
            amount_stock: view.amount_stock,
            photos_ids: view.photos.iter().map(|p| p.id).collect(),
            categories,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryWithProducts {
    pub id: i64,
    pub name: String,
    pub products: Vec<ProductView>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dune() -> Product {
        Product {
            id: 1,
            name: "Dune".into(),
            author: "Herbert".into(),
            synopsis: "Spice".into(),
            amount_stock: 10,
            pages: 412,
            year: 1965,
            price: 30,
        }
    }

    #[test]
    fn apply_keeps_absent_fields() {
        let mut product = dune();
        product.apply(&ProductPatch {
            name: Some("Dune Messiah".into()),
            ..Default::default()
        });

        assert_eq!(product.name, "Dune Messiah");
        assert_eq!(product.author, "Herbert");
        assert_eq!(product.price, 30);
    }

    #[test]
    fn apply_writes_zero_values() {
        let mut product = dune();
        product.apply(&ProductPatch {
            price: Some(0),
            amount_stock: Some(-3),
            ..Default::default()
        });

        assert_eq!(product.price, 0);
        assert_eq!(product.amount_stock, 0);
    }
}
