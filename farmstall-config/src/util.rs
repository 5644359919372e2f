use std::time::Duration;

/// Parse a duration from either a bare number of seconds (`"45"`) or a
/// humantime expression (`"1m 30s"`).
pub fn parse_duration(raw: &str) -> Result<Duration, humantime::DurationError> {
    let trimmed = raw.trim();
    if let Ok(secs) = trimmed.parse::<u64>() {
        return Ok(Duration::from_secs(secs));
    }
    humantime::parse_duration(trimmed)
}

/// Treat empty and whitespace-only values as unset.
pub fn non_empty(raw: Option<String>) -> Option<String> {
    raw.and_then(|value| {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// Add an `http` scheme when none is given and trim trailing slashes so that path joining
/// never produces `//`. Many users type `localhost:3000/api/v1`.
pub fn normalize_base_url(raw: &str) -> String {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.contains("://") {
        trimmed.to_string()
    } else {
        format!("http://{trimmed}")
    }
}
