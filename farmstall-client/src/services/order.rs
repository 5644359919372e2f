use std::sync::Arc;

use async_trait::async_trait;
use farmstall_model::{Order, OrderId, OrderStatus, OrderStatusUpdate};

use crate::api_client::ApiClient;
use crate::errors::ApiResult;
use crate::routes::orders;

#[async_trait]
pub trait OrderService: Send + Sync {
    async fn list(&self) -> ApiResult<Vec<Order>>;

    async fn update_status(&self, id: &OrderId, update: &OrderStatusUpdate) -> ApiResult<Order>;

    async fn delete(&self, id: &OrderId) -> ApiResult<()>;

    async fn ship(&self, id: &OrderId, tracking_number: &str) -> ApiResult<Order> {
        let mut update = OrderStatusUpdate::new(OrderStatus::Shipped);
        update.tracking_number = Some(tracking_number.to_string());
        self.update_status(id, &update).await
    }

    async fn deliver(&self, id: &OrderId) -> ApiResult<Order> {
        self.update_status(id, &OrderStatusUpdate::new(OrderStatus::Delivered))
            .await
    }

    async fn cancel(&self, id: &OrderId, reason: Option<&str>) -> ApiResult<Order> {
        let mut update = OrderStatusUpdate::new(OrderStatus::Cancelled);
        update.reason = reason.map(str::to_string);
        self.update_status(id, &update).await
    }
}

#[derive(Debug, Clone)]
pub struct OrderApiAdapter {
    client: Arc<ApiClient>,
}

impl OrderApiAdapter {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl OrderService for OrderApiAdapter {
    async fn list(&self) -> ApiResult<Vec<Order>> {
        self.client.get(orders::COLLECTION).await
    }

    async fn update_status(&self, id: &OrderId, update: &OrderStatusUpdate) -> ApiResult<Order> {
        log::debug!("[OrderService] Order {} -> {}", id, update.status.as_str());
        self.client.put(&orders::item(id.as_str()), update).await
    }

    async fn delete(&self, id: &OrderId) -> ApiResult<()> {
        self.client.delete(&orders::item(id.as_str())).await
    }
}
