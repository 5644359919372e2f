//! Client-side filtering, sorting, paging and list reconciliation for the
//! dashboard tables.

pub mod categories;
pub mod orders;
pub mod paging;
pub mod products;
pub mod reconcile;

pub use categories::search_categories;
pub use orders::{OrderFilter, filter_orders};
pub use paging::{Page, paginate};
pub use products::{ProductQuery, ProductSortField, SortOrder, unique_category_names};
pub use reconcile::{Identified, ResourceList};

/// Case-insensitive substring match; an empty needle matches everything.
pub(crate) fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    needle.is_empty() || haystack.to_lowercase().contains(&needle.to_lowercase())
}
