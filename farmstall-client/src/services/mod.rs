//! Resource services for the shop dashboard.
//!
//! Each service is a trait with an `*ApiAdapter` implementation backed by
//! [`ApiClient`](crate::api_client::ApiClient), so front ends can swap in
//! their own implementations for tests.

pub mod category;
pub mod order;
pub mod product;
pub mod shop;

pub use category::{CategoryApiAdapter, CategoryService};
pub use order::{OrderApiAdapter, OrderService};
pub use product::{ProductApiAdapter, ProductService};
pub use shop::{ShopApiAdapter, ShopService};
