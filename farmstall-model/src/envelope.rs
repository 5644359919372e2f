use serde::{Deserialize, Serialize};

/// Wrapper every backend response arrives in: `{ "data": ..., "message": ... }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiEnvelope<T> {
    pub fn new(data: T) -> Self {
        Self {
            data: Some(data),
            message: None,
        }
    }

    pub fn into_data(self) -> Option<T> {
        self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_data_is_none() {
        let env: ApiEnvelope<String> =
            serde_json::from_str(r#"{"message":"ok"}"#).unwrap();
        assert_eq!(env.data, None);
        assert_eq!(env.message.as_deref(), Some("ok"));
    }

    #[test]
    fn null_data_is_none() {
        let env: ApiEnvelope<String> =
            serde_json::from_str(r#"{"data":null}"#).unwrap();
        assert!(env.into_data().is_none());
    }
}
