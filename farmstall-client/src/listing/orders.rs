use std::fmt;
use std::str::FromStr;

use farmstall_model::{Order, OrderStatus};

/// Status filter of the orders table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrderFilter {
    #[default]
    All,
    Status(OrderStatus),
}

impl OrderFilter {
    pub fn matches(self, order: &Order) -> bool {
        match self {
            Self::All => true,
            Self::Status(status) => order.order_status == status,
        }
    }
}

impl fmt::Display for OrderFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::Status(status) => f.write_str(status.as_str()),
        }
    }
}

impl FromStr for OrderFilter {
    type Err = farmstall_model::ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        s.parse().map(Self::Status)
    }
}

pub fn filter_orders(orders: &[Order], filter: OrderFilter) -> Vec<&Order> {
    orders.iter().filter(|o| filter.matches(o)).collect()
}
