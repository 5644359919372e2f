use std::fmt;
use std::time::Duration;

use farmstall_config::Config;
use farmstall_model::{ApiEnvelope, Upload};
use log::{debug, info, warn};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;

use crate::errors::{ApiError, ApiResult};
use crate::routes;
use crate::token::TokenCell;

/// Endpoints whose 401 means "wrong credentials", not "stale token".
const CREDENTIAL_ENDPOINTS: [&str; 2] = [routes::auth::LOGIN, routes::auth::REGISTER];

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP client for the shop backend.
///
/// Attaches the bearer token held by the shared [`TokenCell`] and clears
/// that cell whenever a protected endpoint answers 401.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    tokens: TokenCell,
}

impl fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field("has_token", &self.tokens.is_present())
            .finish()
    }
}

impl ApiClient {
    pub fn new(base_url: &str, tokens: TokenCell) -> ApiResult<Self> {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT, tokens)
    }

    pub fn with_timeout(
        base_url: &str,
        timeout: Duration,
        tokens: TokenCell,
    ) -> ApiResult<Self> {
        let base_url = normalize_base_url(base_url);
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::InvalidRequest(e.to_string()))?;

        info!("[ApiClient] Creating API client with base URL: {}", base_url);

        Ok(Self {
            client,
            base_url,
            tokens,
        })
    }

    pub fn from_config(config: &Config, tokens: TokenCell) -> ApiResult<Self> {
        Self::with_timeout(config.base_url(), config.api.timeout, tokens)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn tokens(&self) -> &TokenCell {
        &self.tokens
    }

    pub fn build_url(&self, path: impl AsRef<str>) -> String {
        let p = path.as_ref();
        if p.starts_with("http://") || p.starts_with("https://") {
            return p.to_string();
        }
        format!("{}/{}", self.base_url, p.trim_start_matches('/'))
    }

    /// Attach a bearer header. An explicit token wins over the cell.
    fn authorize(
        &self,
        builder: RequestBuilder,
        explicit: Option<&str>,
    ) -> (RequestBuilder, Option<String>) {
        let token = explicit.map(str::to_string).or_else(|| self.tokens.get());
        match token {
            Some(token) => (builder.bearer_auth(&token), Some(token)),
            None => (builder, None),
        }
    }

    async fn send(
        &self,
        path: &str,
        builder: RequestBuilder,
        explicit_token: Option<&str>,
    ) -> ApiResult<Option<Value>> {
        let (request, sent_token) = self.authorize(builder, explicit_token);
        let response = request.send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;

        if status.is_success() {
            if status == StatusCode::NO_CONTENT || bytes.is_empty() {
                return Ok(None);
            }
            return serde_json::from_slice(&bytes)
                .map(Some)
                .map_err(|e| ApiError::InvalidResponse(e.to_string()));
        }

        let body = parse_error_body(&bytes);
        if status == StatusCode::UNAUTHORIZED {
            self.on_unauthorized(path, sent_token.as_deref());
            return Err(ApiError::Unauthorized { body });
        }

        debug!("[ApiClient] {} {} -> {}", path, status.as_u16(), status);
        Err(ApiError::Status {
            status: status.as_u16(),
            body,
        })
    }

    fn on_unauthorized(&self, path: &str, sent_token: Option<&str>) {
        if is_credential_endpoint(path) {
            return;
        }
        let Some(token) = sent_token else {
            return;
        };
        match self.tokens.clear_if(token) {
            Ok(true) => {
                warn!("[ApiClient] {} answered 401, cleared stored token", path)
            }
            Ok(false) => {}
            Err(e) => warn!(
                "[ApiClient] {} answered 401 but clearing token failed: {}",
                path, e
            ),
        }
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        path: &str,
        builder: RequestBuilder,
        explicit_token: Option<&str>,
    ) -> ApiResult<ApiEnvelope<T>> {
        match self.send(path, builder, explicit_token).await? {
            Some(value) => serde_json::from_value(value)
                .map_err(|e| ApiError::InvalidResponse(e.to_string())),
            None => Ok(ApiEnvelope {
                data: None,
                message: None,
            }),
        }
    }

    async fn execute_data<T: DeserializeOwned>(
        &self,
        path: &str,
        builder: RequestBuilder,
        explicit_token: Option<&str>,
    ) -> ApiResult<T> {
        self.execute(path, builder, explicit_token)
            .await?
            .into_data()
            .ok_or(ApiError::EmptyResponse)
    }

    /// GET returning the envelope's `data`.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let request = self.client.get(self.build_url(path));
        self.execute_data(path, request, None).await
    }

    /// GET with a caller-supplied token instead of the cell's.
    pub async fn get_with_token<T: DeserializeOwned>(
        &self,
        path: &str,
        token: &str,
    ) -> ApiResult<T> {
        let request = self.client.get(self.build_url(path));
        self.execute_data(path, request, Some(token)).await
    }

    /// POST a JSON body and return the full envelope.
    pub async fn post_envelope<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> ApiResult<ApiEnvelope<T>> {
        let request = self.client.post(self.build_url(path)).json(body);
        self.execute(path, request, None).await
    }

    pub async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> ApiResult<T> {
        let request = self.client.post(self.build_url(path)).json(body);
        self.execute_data(path, request, None).await
    }

    pub async fn put<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> ApiResult<T> {
        let request = self.client.put(self.build_url(path)).json(body);
        self.execute_data(path, request, None).await
    }

    pub async fn post_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        form: Form,
    ) -> ApiResult<T> {
        let request = self.client.post(self.build_url(path)).multipart(form);
        self.execute_data(path, request, None).await
    }

    pub async fn put_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        form: Form,
    ) -> ApiResult<T> {
        let request = self.client.put(self.build_url(path)).multipart(form);
        self.execute_data(path, request, None).await
    }

    /// DELETE; any `data` in the response is ignored.
    pub async fn delete(&self, path: &str) -> ApiResult<()> {
        let request = self.client.delete(self.build_url(path));
        self.send(path, request, None).await.map(|_| ())
    }
}

/// Build a multipart form from text fields and an optional file part.
pub fn multipart_form(
    fields: Vec<(&'static str, String)>,
    file: Option<(&'static str, &Upload)>,
) -> ApiResult<Form> {
    let mut form = Form::new();
    for (name, value) in fields {
        form = form.text(name, value);
    }
    if let Some((name, upload)) = file {
        let mut part =
            Part::bytes(upload.bytes.clone()).file_name(upload.file_name.clone());
        if let Some(content_type) = &upload.content_type {
            part = part
                .mime_str(content_type)
                .map_err(|e| ApiError::InvalidRequest(e.to_string()))?;
        }
        form = form.part(name, part);
    }
    Ok(form)
}

fn is_credential_endpoint(path: &str) -> bool {
    let path = path.split('?').next().unwrap_or(path);
    CREDENTIAL_ENDPOINTS
        .iter()
        .any(|endpoint| path.trim_end_matches('/') == *endpoint)
}

fn parse_error_body(bytes: &[u8]) -> Option<Value> {
    if bytes.is_empty() {
        return None;
    }
    serde_json::from_slice(bytes).ok().or_else(|| {
        let text = String::from_utf8_lossy(bytes).trim().to_string();
        (!text.is_empty()).then_some(Value::String(text))
    })
}

fn normalize_base_url(raw: &str) -> String {
    let normalized = farmstall_config::util::normalize_base_url(raw);
    if normalized != raw {
        debug!(
            "[ApiClient] Normalized base URL from '{}' to '{}'",
            raw, normalized
        );
    }
    normalized
}
