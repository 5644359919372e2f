//! Core data model definitions shared across Farmstall crates.
//!
//! Every type here mirrors the JSON the commerce backend speaks: field names
//! are camelCase on the wire and all responses arrive wrapped in an
//! [`ApiEnvelope`].
#![allow(missing_docs)]

pub use ::chrono;

pub mod category;
pub mod envelope;
pub mod error;
pub mod forms;
pub mod ids;
mod nullable;
pub mod order;
pub mod product;
pub mod shop;

// Intentionally curated re-exports for downstream consumers.
pub use category::{Category, CategoryProduct};
pub use envelope::ApiEnvelope;
pub use error::{ModelError, Result as ModelResult};
pub use forms::{
    CategoryDraft, LoginRequest, OrderStatusUpdate, ProductDraft,
    ShopProfileUpdate, Upload,
};
pub use ids::{CategoryId, OrderId, ProductId, ShopId, UserId};
pub use order::{
    Order, OrderCustomer, OrderItem, OrderItemProduct, OrderStatus,
    ShippingAddress,
};
pub use product::{Product, ProductCategoryRef, ProductStatus};
pub use shop::Shop;
