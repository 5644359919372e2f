use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, bail};
use farmstall_client::services::{
    CategoryApiAdapter, OrderApiAdapter, ProductApiAdapter, ShopApiAdapter,
};
use farmstall_client::{ApiClient, FileStorage, SessionController, SessionPhase, TokenCell};
use farmstall_config::{Config, ConfigLoad, ConfigLoader};
use farmstall_model::{Shop, Upload};
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use super::GlobalArgs;

/// Everything a command needs, wired once per invocation.
#[derive(Debug)]
pub struct AppContext {
    pub config: Config,
    pub json: bool,
    pub client: Arc<ApiClient>,
    pub session: SessionController,
}

impl AppContext {
    pub fn build(args: &GlobalArgs) -> anyhow::Result<Self> {
        let mut loader = ConfigLoader::new();
        if let Some(path) = &args.config {
            loader = loader.with_config_path(path);
        }
        if let Some(url) = &args.api_url {
            loader = loader.with_api_url(url);
        }
        let ConfigLoad { config, metadata } =
            loader.load().context("failed to load configuration")?;

        init_tracing(&config.logging.filter);
        if let Some(path) = &metadata.config_file {
            debug!("loaded configuration from {}", path.display());
        }
        if let Some(path) = &metadata.env_file {
            debug!("loaded .env file from {}", path.display());
        }

        let storage = Arc::new(FileStorage::new(config.token_path()));
        let tokens = TokenCell::load(storage).with_context(|| {
            format!("failed to read session file {}", config.token_path().display())
        })?;
        let client = Arc::new(
            ApiClient::from_config(&config, tokens.clone())
                .context("failed to create HTTP client")?,
        );
        let session = SessionController::new(client.clone(), tokens);

        Ok(Self {
            config,
            json: args.json,
            client,
            session,
        })
    }

    /// Restore the stored session and insist that it is valid.
    pub async fn require_login(&self) -> anyhow::Result<Shop> {
        self.session.bootstrap().await;
        if let Ok(shop) = self.session.require_identity() {
            return Ok(shop);
        }
        let session = self.session.session();
        match session.phase {
            SessionPhase::Degraded => bail!(
                "could not verify the stored session: {}",
                session.last_error.as_deref().unwrap_or("backend unreachable")
            ),
            _ => bail!("not logged in; run `farmstallctl login` first"),
        }
    }

    pub fn shop(&self) -> ShopApiAdapter {
        ShopApiAdapter::new(self.client.clone())
    }

    pub fn products(&self) -> ProductApiAdapter {
        ProductApiAdapter::new(self.client.clone())
    }

    pub fn categories(&self) -> CategoryApiAdapter {
        CategoryApiAdapter::new(self.client.clone())
    }

    pub fn orders(&self) -> OrderApiAdapter {
        OrderApiAdapter::new(self.client.clone())
    }
}

fn init_tracing(default_filter: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_filter.into());
    let initialized = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
    if initialized.is_err() {
        debug!("tracing subscriber already installed");
    }
}

/// Read an image for upload, guessing its content type from the extension.
pub fn read_upload(path: &Path) -> anyhow::Result<Upload> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("upload")
        .to_string();
    let upload = Upload::new(file_name, bytes);
    Ok(match image_content_type(path) {
        Some(content_type) => upload.with_content_type(content_type),
        None => upload,
    })
}

fn image_content_type(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "webp" => Some("image/webp"),
        "gif" => Some("image/gif"),
        _ => None,
    }
}
