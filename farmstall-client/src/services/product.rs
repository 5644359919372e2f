use std::sync::Arc;

use async_trait::async_trait;
use farmstall_model::{Product, ProductDraft, ProductId, ShopId};

use crate::api_client::{ApiClient, multipart_form};
use crate::errors::ApiResult;
use crate::routes::products;

#[async_trait]
pub trait ProductService: Send + Sync {
    async fn add(&self, draft: &ProductDraft) -> ApiResult<Product>;

    async fn update(&self, id: &ProductId, draft: &ProductDraft) -> ApiResult<Product>;

    async fn delete(&self, id: &ProductId) -> ApiResult<()>;

    /// Public product list of any shop.
    async fn list_for_shop(&self, shop_id: &ShopId) -> ApiResult<Vec<Product>>;
}

#[derive(Debug, Clone)]
pub struct ProductApiAdapter {
    client: Arc<ApiClient>,
}

impl ProductApiAdapter {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }
}

fn draft_form(draft: &ProductDraft) -> ApiResult<reqwest::multipart::Form> {
    let image = draft
        .image
        .as_ref()
        .map(|upload| (ProductDraft::IMAGE_FIELD, upload));
    multipart_form(draft.form_fields(), image)
}

#[async_trait]
impl ProductService for ProductApiAdapter {
    async fn add(&self, draft: &ProductDraft) -> ApiResult<Product> {
        self.client
            .post_multipart(products::COLLECTION, draft_form(draft)?)
            .await
    }

    async fn update(&self, id: &ProductId, draft: &ProductDraft) -> ApiResult<Product> {
        self.client
            .put_multipart(&products::item(id.as_str()), draft_form(draft)?)
            .await
    }

    async fn delete(&self, id: &ProductId) -> ApiResult<()> {
        self.client.delete(&products::item(id.as_str())).await
    }

    async fn list_for_shop(&self, shop_id: &ShopId) -> ApiResult<Vec<Product>> {
        self.client.get(&products::for_shop(shop_id.as_str())).await
    }
}
