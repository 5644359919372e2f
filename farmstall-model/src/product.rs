use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::ModelError;
use crate::ids::{CategoryId, ProductId};

/// Publication state of a product listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductStatus {
    #[default]
    Active,
    Draft,
    OutOfStock,
}

impl ProductStatus {
    pub const ALL: [Self; 3] = [Self::Active, Self::Draft, Self::OutOfStock];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Draft => "draft",
            Self::OutOfStock => "out_of_stock",
        }
    }
}

impl std::fmt::Display for ProductStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProductStatus {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ModelError::UnknownProductStatus(s.to_string()))
    }
}

/// Category summary embedded in product payloads.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ProductCategoryRef {
    pub id: CategoryId,
    pub name: String,
}

/// A product listing owned by the shop.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: f64,
    pub stock_quantity: i64,
    pub category_id: CategoryId,
    pub status: ProductStatus,
    pub image_url: Option<String>,
    #[serde(deserialize_with = "crate::nullable::or_default")]
    pub description: String,
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<ProductCategoryRef>,
}

impl Product {
    /// Name of the embedded category, if the backend sent one.
    pub fn category_name(&self) -> Option<&str> {
        self.category.as_ref().map(|c| c.name.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_round_trips_through_wire_names() {
        let p: Product = serde_json::from_str(
            r#"{"id":"p1","name":"Eggs","price":4.5,"stockQuantity":30,
                "categoryId":"c1","status":"out_of_stock",
                "category":{"id":"c1","name":"Dairy"}}"#,
        )
        .unwrap();
        assert_eq!(p.status, ProductStatus::OutOfStock);
        assert_eq!(p.category_name(), Some("Dairy"));
        assert_eq!("Draft".parse::<ProductStatus>().unwrap(), ProductStatus::Draft);
        assert!("archived".parse::<ProductStatus>().is_err());
    }

    #[test]
    fn null_description_reads_as_empty() {
        let p: Product =
            serde_json::from_str(r#"{"id":"p2","name":"Honey","description":null}"#)
                .unwrap();
        assert_eq!(p.description, "");
    }
}
