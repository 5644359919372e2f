use std::sync::Arc;

use async_trait::async_trait;
use farmstall_model::{Category, CategoryDraft, CategoryId};

use crate::api_client::{ApiClient, multipart_form};
use crate::errors::{ApiError, ApiResult};
use crate::routes::categories;

#[async_trait]
pub trait CategoryService: Send + Sync {
    async fn list(&self) -> ApiResult<Vec<Category>>;

    async fn add(&self, draft: &CategoryDraft) -> ApiResult<Category>;

    async fn update(&self, id: &CategoryId, draft: &CategoryDraft) -> ApiResult<Category>;

    async fn delete(&self, id: &CategoryId) -> ApiResult<()>;
}

#[derive(Debug, Clone)]
pub struct CategoryApiAdapter {
    client: Arc<ApiClient>,
}

impl CategoryApiAdapter {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }
}

/// Validated multipart body; a blank name never reaches the backend.
fn draft_form(draft: &CategoryDraft) -> ApiResult<reqwest::multipart::Form> {
    draft
        .validate()
        .map_err(|e| ApiError::InvalidRequest(e.to_string()))?;
    let image = draft
        .image
        .as_ref()
        .map(|upload| (CategoryDraft::IMAGE_FIELD, upload));
    multipart_form(draft.form_fields(), image)
}

#[async_trait]
impl CategoryService for CategoryApiAdapter {
    async fn list(&self) -> ApiResult<Vec<Category>> {
        self.client.get(categories::COLLECTION).await
    }

    async fn add(&self, draft: &CategoryDraft) -> ApiResult<Category> {
        self.client
            .post_multipart(categories::COLLECTION, draft_form(draft)?)
            .await
    }

    async fn update(&self, id: &CategoryId, draft: &CategoryDraft) -> ApiResult<Category> {
        self.client
            .put_multipart(&categories::item(id.as_str()), draft_form(draft)?)
            .await
    }

    async fn delete(&self, id: &CategoryId) -> ApiResult<()> {
        self.client.delete(&categories::item(id.as_str())).await
    }
}
