use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use farmstall_model::{LoginRequest, Shop, ShopId};
use parking_lot::Mutex;
use tokio::sync::Notify;

use crate::backend::SessionBackend;
use crate::errors::{ApiError, ApiResult};

pub(crate) fn shop(id: &str, name: &str) -> Shop {
    Shop {
        id: ShopId::new(id),
        name: name.to_string(),
        email: format!("{}@farm.test", name.to_lowercase()),
        is_approved: true,
        ..Shop::default()
    }
}

/// Lets a test hold `fetch_profile` until it decides to release it.
#[derive(Default)]
pub(crate) struct Gate {
    pub entered: Notify,
    pub release: Notify,
}

/// Backend replaying queued responses in order.
#[derive(Default)]
pub(crate) struct ScriptedBackend {
    logins: Mutex<VecDeque<ApiResult<Option<String>>>>,
    profiles: Mutex<VecDeque<ApiResult<Shop>>>,
    profile_tokens: Mutex<Vec<String>>,
    calls: AtomicUsize,
    gate: Option<Arc<Gate>>,
}

impl ScriptedBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn gated(mut self) -> Self {
        self.gate = Some(Arc::new(Gate::default()));
        self
    }

    pub fn gate(&self) -> Arc<Gate> {
        self.gate.clone().expect("backend was not built with gated()")
    }

    pub fn login_ok(self, token: &str) -> Self {
        self.logins.lock().push_back(Ok(Some(token.to_string())));
        self
    }

    pub fn login_none(self) -> Self {
        self.logins.lock().push_back(Ok(None));
        self
    }

    pub fn login_err(self, err: ApiError) -> Self {
        self.logins.lock().push_back(Err(err));
        self
    }

    pub fn profile_ok(self, shop: Shop) -> Self {
        self.profiles.lock().push_back(Ok(shop));
        self
    }

    pub fn profile_err(self, err: ApiError) -> Self {
        self.profiles.lock().push_back(Err(err));
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn profile_tokens(&self) -> Vec<String> {
        self.profile_tokens.lock().clone()
    }
}

#[async_trait]
impl SessionBackend for ScriptedBackend {
    async fn login(&self, _credentials: &LoginRequest) -> ApiResult<Option<String>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.logins
            .lock()
            .pop_front()
            .unwrap_or_else(|| Err(ApiError::Transport("no scripted login".into())))
    }

    async fn fetch_profile(&self, token: &str) -> ApiResult<Shop> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.profile_tokens.lock().push(token.to_string());
        if let Some(gate) = &self.gate {
            gate.entered.notify_one();
            gate.release.notified().await;
        }
        self.profiles
            .lock()
            .pop_front()
            .unwrap_or_else(|| Err(ApiError::Transport("no scripted profile".into())))
    }
}
