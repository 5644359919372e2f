//! Request payloads sent to the backend.
//!
//! Multipart payloads expose their text parts through `form_fields` and their
//! optional file part separately; the HTTP layer decides how to encode them.

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};
use crate::ids::CategoryId;
use crate::order::OrderStatus;
use crate::product::ProductStatus;

/// Credentials for `POST /shop/auth/login`.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

impl std::fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginRequest")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// A file attached to a multipart request.
#[derive(Clone, PartialEq)]
pub struct Upload {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl Upload {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: None,
            bytes,
        }
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }
}

impl std::fmt::Debug for Upload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Upload")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// Product create/update form.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProductDraft {
    pub name: String,
    pub price: f64,
    pub description: String,
    pub stock_quantity: i64,
    pub category_id: Option<CategoryId>,
    pub status: Option<ProductStatus>,
    pub image: Option<Upload>,
}

impl ProductDraft {
    pub const IMAGE_FIELD: &'static str = "image";

    pub fn form_fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = vec![
            ("name", self.name.clone()),
            ("price", self.price.to_string()),
            ("description", self.description.clone()),
            ("stockQuantity", self.stock_quantity.to_string()),
        ];
        if let Some(category_id) = &self.category_id {
            fields.push(("categoryId", category_id.to_string()));
        }
        if let Some(status) = self.status {
            fields.push(("status", status.as_str().to_string()));
        }
        fields
    }
}

/// Category create/update form.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CategoryDraft {
    pub name: String,
    pub description: Option<String>,
    pub image: Option<Upload>,
}

impl CategoryDraft {
    pub const IMAGE_FIELD: &'static str = "image";

    pub fn new(name: impl Into<String>, description: Option<String>) -> Self {
        Self {
            name: name.into(),
            description,
            image: None,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(ModelError::InvalidField {
                field: "name",
                reason: "Category name is required".to_string(),
            });
        }
        Ok(())
    }

    pub fn form_fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("name", self.name.trim().to_string()),
            ("description", self.description.clone().unwrap_or_default()),
        ]
    }
}

/// Shop profile form for `PUT /shops/update`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ShopProfileUpdate {
    pub name: String,
    pub owner_name: String,
    pub email: String,
    pub phone_number: String,
    pub location: String,
    pub description: Option<String>,
    pub profile_image: Option<Upload>,
}

impl ShopProfileUpdate {
    pub const IMAGE_FIELD: &'static str = "profileImage";

    /// Pre-fill the form from the current profile, as the settings screen does.
    pub fn from_shop(shop: &crate::shop::Shop) -> Self {
        Self {
            name: shop.name.clone(),
            owner_name: shop.owner_name.clone(),
            email: shop.email.clone(),
            phone_number: shop.phone_number.clone(),
            location: shop.location.clone(),
            description: shop.description.clone(),
            profile_image: None,
        }
    }

    pub fn form_fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("name", self.name.clone()),
            ("ownerName", self.owner_name.clone()),
            ("email", self.email.clone()),
            ("phoneNumber", self.phone_number.clone()),
            ("location", self.location.clone()),
            ("description", self.description.clone().unwrap_or_default()),
        ]
    }
}

/// JSON body for `PUT /orders/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderStatusUpdate {
    pub status: OrderStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tracking_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub carrier: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl OrderStatusUpdate {
    pub fn new(status: OrderStatus) -> Self {
        Self {
            status,
            tracking_number: None,
            carrier: None,
            reason: None,
        }
    }
}
