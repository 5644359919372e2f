use thiserror::Error;

/// Errors produced by model constructors and parsers.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("unknown order status '{0}'")]
    UnknownOrderStatus(String),

    #[error("unknown product status '{0}'")]
    UnknownProductStatus(String),

    #[error("invalid {field}: {reason}")]
    InvalidField { field: &'static str, reason: String },
}

pub type Result<T> = std::result::Result<T, ModelError>;
