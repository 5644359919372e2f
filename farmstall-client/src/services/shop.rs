use std::sync::Arc;

use async_trait::async_trait;
use farmstall_model::{Order, Product, ProductDraft, Shop, ShopProfileUpdate};

use crate::api_client::{ApiClient, multipart_form};
use crate::errors::ApiResult;
use crate::routes::shops;

/// Operations on the signed-in shop itself.
#[async_trait]
pub trait ShopService: Send + Sync {
    async fn profile(&self) -> ApiResult<Shop>;

    /// Update profile fields and optionally replace the profile image.
    async fn update_profile(&self, update: &ShopProfileUpdate) -> ApiResult<Shop>;

    async fn products(&self) -> ApiResult<Vec<Product>>;

    async fn add_product(&self, draft: &ProductDraft) -> ApiResult<Product>;

    async fn orders(&self) -> ApiResult<Vec<Order>>;
}

#[derive(Debug, Clone)]
pub struct ShopApiAdapter {
    client: Arc<ApiClient>,
}

impl ShopApiAdapter {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ShopService for ShopApiAdapter {
    async fn profile(&self) -> ApiResult<Shop> {
        self.client.get(shops::PROFILE).await
    }

    async fn update_profile(&self, update: &ShopProfileUpdate) -> ApiResult<Shop> {
        let image = update
            .profile_image
            .as_ref()
            .map(|upload| (ShopProfileUpdate::IMAGE_FIELD, upload));
        let form = multipart_form(update.form_fields(), image)?;
        log::debug!("[ShopService] Updating profile for '{}'", update.name);
        self.client.put_multipart(shops::UPDATE, form).await
    }

    async fn products(&self) -> ApiResult<Vec<Product>> {
        self.client.get(shops::PRODUCTS).await
    }

    async fn add_product(&self, draft: &ProductDraft) -> ApiResult<Product> {
        let image = draft
            .image
            .as_ref()
            .map(|upload| (ProductDraft::IMAGE_FIELD, upload));
        let form = multipart_form(draft.form_fields(), image)?;
        self.client.post_multipart(shops::PRODUCTS, form).await
    }

    async fn orders(&self) -> ApiResult<Vec<Order>> {
        self.client.get(shops::ORDERS).await
    }
}
