use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::ShopId;

/// The authenticated shop identity as returned by `GET /shops/profile`.
///
/// The backend is loose about which fields it populates, so everything
/// except `id` falls back to its default when absent or `null`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Shop {
    pub id: ShopId,
    #[serde(deserialize_with = "crate::nullable::or_default")]
    pub name: String,
    #[serde(deserialize_with = "crate::nullable::or_default")]
    pub owner_name: String,
    #[serde(deserialize_with = "crate::nullable::or_default")]
    pub email: String,
    #[serde(deserialize_with = "crate::nullable::or_default")]
    pub role: String,
    #[serde(deserialize_with = "crate::nullable::or_default")]
    pub location: String,
    #[serde(deserialize_with = "crate::nullable::or_default")]
    pub phone_number: String,
    pub description: Option<String>,
    #[serde(deserialize_with = "crate::nullable::or_default")]
    pub is_verified: bool,
    #[serde(deserialize_with = "crate::nullable::or_default")]
    pub is_banned: bool,
    #[serde(deserialize_with = "crate::nullable::or_default")]
    pub is_approved: bool,
    #[serde(rename = "type", deserialize_with = "crate::nullable::or_default")]
    pub shop_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_count: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Shop {
    /// A shop may use the dashboard only when the backend has approved it
    /// and it is not banned.
    pub fn is_active(&self) -> bool {
        self.is_approved && !self.is_banned
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_profile_payload() {
        let raw = r#"{
            "id": "1",
            "name": "Hillside Farm",
            "ownerName": "R. Moss",
            "email": "shop@example.com",
            "role": "SHOP",
            "location": "Valley Rd",
            "phoneNumber": "555-0101",
            "description": null,
            "isVerified": true,
            "isBanned": false,
            "isApproved": true,
            "type": "FARM",
            "createdAt": "2024-03-01T10:00:00Z"
        }"#;
        let shop: Shop = serde_json::from_str(raw).unwrap();
        assert_eq!(shop.id.as_str(), "1");
        assert_eq!(shop.owner_name, "R. Moss");
        assert_eq!(shop.shop_type, "FARM");
        assert!(shop.is_active());
        assert!(shop.created_at.is_some());
        assert!(shop.updated_at.is_none());
    }

    #[test]
    fn sparse_payload_uses_defaults() {
        let shop: Shop = serde_json::from_str(r#"{"id":"9","name":"X"}"#).unwrap();
        assert_eq!(shop.name, "X");
        assert!(!shop.is_verified);
        assert!(!shop.is_active());
    }

    #[test]
    fn null_fields_fall_back_to_defaults() {
        let raw = r#"{
            "id": "4",
            "name": "Orchard",
            "ownerName": null,
            "location": null,
            "phoneNumber": null,
            "isApproved": null,
            "type": null
        }"#;
        let shop: Shop = serde_json::from_str(raw).unwrap();
        assert_eq!(shop.name, "Orchard");
        assert_eq!(shop.location, "");
        assert_eq!(shop.phone_number, "");
        assert_eq!(shop.shop_type, "");
        assert!(!shop.is_approved);
    }
}
