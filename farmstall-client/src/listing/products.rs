use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use farmstall_model::Product;

use super::contains_ignore_case;

/// Category filter value meaning "no filter".
pub const ALL_CATEGORIES: &str = "all";

/// Column a product table is sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProductSortField {
    Name,
    Price,
    Stock,
    #[default]
    CreatedAt,
}

impl ProductSortField {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Price => "price",
            Self::Stock => "stock",
            Self::CreatedAt => "created",
        }
    }
}

impl fmt::Display for ProductSortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProductSortField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "name" => Ok(Self::Name),
            "price" => Ok(Self::Price),
            "stock" | "inventory" => Ok(Self::Stock),
            "created" | "createdat" | "created_at" | "date" => Ok(Self::CreatedAt),
            other => Err(format!("unknown sort field '{other}'")),
        }
    }
}

/// Sort order direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Descending,
    Ascending,
}

impl SortOrder {
    pub fn reversed(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }

    fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Ascending => ordering,
            Self::Descending => ordering.reverse(),
        }
    }
}

/// Search, category filter and sort state of the products table.
///
/// The default view is newest first across all categories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductQuery {
    pub search: String,
    pub category: String,
    pub sort_by: ProductSortField,
    pub order: SortOrder,
}

impl Default for ProductQuery {
    fn default() -> Self {
        Self {
            search: String::new(),
            category: ALL_CATEGORIES.to_string(),
            sort_by: ProductSortField::default(),
            order: SortOrder::default(),
        }
    }
}

impl ProductQuery {
    /// Header click: the active column flips direction, a new column starts
    /// ascending.
    pub fn toggle_sort(&mut self, field: ProductSortField) {
        if self.sort_by == field {
            self.order = self.order.reversed();
        } else {
            self.sort_by = field;
            self.order = SortOrder::Ascending;
        }
    }

    pub fn matches(&self, product: &Product) -> bool {
        let category_ok = self.category.is_empty()
            || self.category == ALL_CATEGORIES
            || product.category_name() == Some(self.category.as_str());
        category_ok && contains_ignore_case(&product.name, self.search.trim())
    }

    fn compare(&self, a: &Product, b: &Product) -> Ordering {
        let ordering = match self.sort_by {
            ProductSortField::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
            ProductSortField::Price => a.price.total_cmp(&b.price),
            ProductSortField::Stock => a.stock_quantity.cmp(&b.stock_quantity),
            ProductSortField::CreatedAt => a.created_at.cmp(&b.created_at),
        };
        self.order.apply(ordering)
    }

    /// Filtered and sorted view over `products`.
    pub fn apply<'a>(&self, products: &'a [Product]) -> Vec<&'a Product> {
        let mut view: Vec<&Product> = products.iter().filter(|p| self.matches(p)).collect();
        view.sort_by(|a, b| self.compare(a, b));
        view
    }
}

/// Distinct category names present in `products`, sorted.
pub fn unique_category_names(products: &[Product]) -> Vec<String> {
    products
        .iter()
        .filter_map(Product::category_name)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use farmstall_model::chrono::{TimeZone, Utc};
    use farmstall_model::{ProductCategoryRef, ProductId};

    fn product(id: &str, name: &str, price: f64, stock: i64, category: &str, day: u32) -> Product {
        Product {
            id: ProductId::new(id),
            name: name.to_string(),
            price,
            stock_quantity: stock,
            created_at: Some(Utc.with_ymd_and_hms(2024, 5, day, 8, 0, 0).unwrap()),
            category: Some(ProductCategoryRef {
                id: category.to_lowercase().into(),
                name: category.to_string(),
            }),
            ..Product::default()
        }
    }

    fn catalogue() -> Vec<Product> {
        vec![
            product("1", "Carrots", 2.5, 40, "Vegetables", 1),
            product("2", "apples", 3.0, 10, "Fruit", 3),
            product("3", "Baby carrots", 4.0, 0, "Vegetables", 2),
        ]
    }

    fn ids(view: &[&Product]) -> Vec<String> {
        view.iter().map(|p| p.id.to_string()).collect()
    }

    #[test]
    fn default_view_is_newest_first() {
        let products = catalogue();
        assert_eq!(ids(&ProductQuery::default().apply(&products)), ["2", "3", "1"]);
    }

    #[test]
    fn search_is_case_insensitive_and_combines_with_category() {
        let products = catalogue();
        let mut query = ProductQuery {
            search: "CARROT".into(),
            ..ProductQuery::default()
        };
        assert_eq!(ids(&query.apply(&products)), ["3", "1"]);

        query.category = "Fruit".into();
        assert!(query.apply(&products).is_empty());
    }

    #[test]
    fn toggle_sort_flips_or_resets() {
        let mut query = ProductQuery::default();
        query.toggle_sort(ProductSortField::Price);
        assert_eq!((query.sort_by, query.order), (ProductSortField::Price, SortOrder::Ascending));
        query.toggle_sort(ProductSortField::Price);
        assert_eq!(query.order, SortOrder::Descending);
        query.toggle_sort(ProductSortField::Name);
        assert_eq!((query.sort_by, query.order), (ProductSortField::Name, SortOrder::Ascending));
    }

    #[test]
    fn sorts_by_each_field() {
        let products = catalogue();
        let mut query = ProductQuery::default();

        query.toggle_sort(ProductSortField::Name);
        assert_eq!(ids(&query.apply(&products)), ["2", "3", "1"]);

        query.toggle_sort(ProductSortField::Stock);
        assert_eq!(ids(&query.apply(&products)), ["3", "2", "1"]);

        query.toggle_sort(ProductSortField::Price);
        query.toggle_sort(ProductSortField::Price);
        assert_eq!(ids(&query.apply(&products)), ["3", "2", "1"]);
    }

    #[test]
    fn category_names_are_unique_and_sorted() {
        assert_eq!(unique_category_names(&catalogue()), ["Fruit", "Vegetables"]);
    }

    #[test]
    fn sort_field_parses_aliases() {
        assert_eq!("inventory".parse::<ProductSortField>(), Ok(ProductSortField::Stock));
        assert_eq!("createdAt".parse::<ProductSortField>(), Ok(ProductSortField::CreatedAt));
        assert!("colour".parse::<ProductSortField>().is_err());
    }
}
