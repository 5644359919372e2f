//! Strongly typed identifiers.
//!
//! The backend hands out opaque string ids for every resource. Wrapping them
//! keeps a product id from being passed where an order id is expected.

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug,
            Clone,
            PartialEq,
            Eq,
            PartialOrd,
            Ord,
            Hash,
            Default,
            serde::Serialize,
            serde::Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn new(raw: impl Into<String>) -> Self {
                Self(raw.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(raw: &str) -> Self {
                Self(raw.to_string())
            }
        }

        impl From<String> for $name {
            fn from(raw: String) -> Self {
                Self(raw)
            }
        }
    };
}

string_id!(
    /// Identifier of a shop (the authenticated identity).
    ShopId
);
string_id!(
    /// Identifier of a product listing.
    ProductId
);
string_id!(
    /// Identifier of a product category.
    CategoryId
);
string_id!(
    /// Identifier of a customer order.
    OrderId
);
string_id!(
    /// Identifier of a customer account.
    UserId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_serialize_as_bare_strings() {
        let id = ProductId::new("p-17");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"p-17\"");

        let parsed: OrderId = serde_json::from_str("\"o-2\"").unwrap();
        assert_eq!(parsed.as_str(), "o-2");
        assert_eq!(parsed.to_string(), "o-2");
    }
}
