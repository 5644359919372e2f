use serde_json::Value;

/// Pull the most specific message out of an error response body.
///
/// Tried in order: `message`, `error` (string or `{message}`), the `errors`
/// array joined with `", "`, a bare string body. Anything else yields
/// `fallback`.
pub fn extract_error_message(body: Option<&Value>, fallback: &str) -> String {
    body.and_then(message_from_body)
        .unwrap_or_else(|| fallback.to_string())
}

fn message_from_body(body: &Value) -> Option<String> {
    match body {
        Value::Object(map) => map
            .get("message")
            .and_then(non_empty_str)
            .or_else(|| map.get("error").and_then(message_like))
            .or_else(|| map.get("errors").and_then(joined_errors)),
        Value::String(_) => non_empty_str(body),
        _ => None,
    }
}

fn non_empty_str(value: &Value) -> Option<String> {
    value
        .as_str()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn message_like(value: &Value) -> Option<String> {
    non_empty_str(value).or_else(|| {
        value
            .get("message")
            .or_else(|| value.get("msg"))
            .and_then(non_empty_str)
    })
}

fn joined_errors(value: &Value) -> Option<String> {
    let parts: Vec<String> = match value {
        Value::Array(items) => items.iter().filter_map(message_like).collect(),
        other => message_like(other).into_iter().collect(),
    };
    if parts.is_empty() {
        None
    } else {
        Some(parts.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const FALLBACK: &str = "Something went wrong";

    #[test]
    fn message_wins_over_everything() {
        let body = json!({"message": "Invalid credentials", "error": "Unauthorized"});
        assert_eq!(extract_error_message(Some(&body), FALLBACK), "Invalid credentials");
    }

    #[test]
    fn error_field_is_second() {
        let body = json!({"message": "", "error": "Account banned"});
        assert_eq!(extract_error_message(Some(&body), FALLBACK), "Account banned");

        let nested = json!({"error": {"message": "Token expired"}});
        assert_eq!(extract_error_message(Some(&nested), FALLBACK), "Token expired");
    }

    #[test]
    fn errors_array_is_joined() {
        let body = json!({"errors": ["email is required", {"msg": "password too short"}]});
        assert_eq!(
            extract_error_message(Some(&body), FALLBACK),
            "email is required, password too short"
        );
    }

    #[test]
    fn falls_back_when_nothing_usable() {
        assert_eq!(extract_error_message(None, FALLBACK), FALLBACK);
        assert_eq!(extract_error_message(Some(&json!({"errors": []})), FALLBACK), FALLBACK);
        assert_eq!(extract_error_message(Some(&json!(42)), FALLBACK), FALLBACK);
        assert_eq!(extract_error_message(Some(&json!("  ")), FALLBACK), FALLBACK);
    }

    #[test]
    fn plain_text_body_is_used() {
        let body = json!("Bad Gateway");
        assert_eq!(extract_error_message(Some(&body), FALLBACK), "Bad Gateway");
    }
}
