//! Backend endpoint paths, relative to the configured base URL.

pub mod auth {
    pub const LOGIN: &str = "/shop/auth/login";
    pub const REGISTER: &str = "/shop/auth/register";
}

pub mod shops {
    pub const PROFILE: &str = "/shops/profile";
    pub const UPDATE: &str = "/shops/update";
    pub const PRODUCTS: &str = "/shops/products";
    pub const ORDERS: &str = "/shops/orders";
}

pub mod products {
    pub const COLLECTION: &str = "/products";

    pub fn item(id: &str) -> String {
        format!("{COLLECTION}/{id}")
    }

    /// Public catalogue of one shop.
    pub fn for_shop(shop_id: &str) -> String {
        format!("/{shop_id}/products")
    }
}

pub mod categories {
    pub const COLLECTION: &str = "/categories";

    pub fn item(id: &str) -> String {
        format!("{COLLECTION}/{id}")
    }
}

pub mod orders {
    pub const COLLECTION: &str = "/orders";

    pub fn item(id: &str) -> String {
        format!("{COLLECTION}/{id}")
    }
}
