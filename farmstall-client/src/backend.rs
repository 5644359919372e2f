use async_trait::async_trait;
use farmstall_model::{LoginRequest, Shop};
use serde_json::Value;

use crate::api_client::ApiClient;
use crate::errors::ApiResult;
use crate::routes;

/// The two backend calls the session controller depends on.
#[async_trait]
pub trait SessionBackend: Send + Sync {
    /// Exchange credentials for a token. `Ok(None)` means the server
    /// accepted the request but sent no usable token.
    async fn login(&self, credentials: &LoginRequest) -> ApiResult<Option<String>>;

    /// Fetch the shop profile using exactly `token`.
    async fn fetch_profile(&self, token: &str) -> ApiResult<Shop>;
}

#[async_trait]
impl SessionBackend for ApiClient {
    async fn login(&self, credentials: &LoginRequest) -> ApiResult<Option<String>> {
        let envelope = self
            .post_envelope::<_, Value>(routes::auth::LOGIN, credentials)
            .await?;
        Ok(envelope
            .into_data()
            .and_then(|data| data.as_str().map(str::to_string))
            .filter(|token| !token.is_empty()))
    }

    async fn fetch_profile(&self, token: &str) -> ApiResult<Shop> {
        self.get_with_token(routes::shops::PROFILE, token).await
    }
}
