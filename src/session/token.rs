// src/session/token.rs - Access token extraction from login responses

use super::DEFAULT_TOKEN_TYPE;

/// JSON fields that may carry the access token, in priority order. A bare
/// string body is tried after these.
pub const TOKEN_FIELDS: [&str; 2] = ["access_token", "token"];

/// Extract the access token from a login response body.
///
/// Accepts a JSON object with one of [`TOKEN_FIELDS`], a JSON string literal,
/// or a plain-text body. Empty values never count. Only the plain-text body
/// is trimmed; JSON values are kept exactly as sent.
pub fn extract_token(body: &str) -> Option<String> {
    let text = body.trim();
    match serde_json::from_str::<serde_json::Value>(text) {
        Ok(serde_json::Value::Object(map)) => TOKEN_FIELDS.iter().find_map(|field| {
            map.get(*field)
                .and_then(|v| v.as_str())
                .filter(|t| !t.is_empty())
                .map(str::to_string)
        }),
        Ok(serde_json::Value::String(s)) => (!s.is_empty()).then_some(s),
        Ok(_) => None,
        Err(_) => (!text.is_empty()).then(|| text.to_string()),
    }
}

/// Token scheme named by the response, defaulting to `Bearer`.
pub fn extract_token_type(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body.trim())
        .ok()
        .and_then(|v| {
            v.get("token_type")
                .and_then(|t| t.as_str())
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(str::to_string)
        })
        .unwrap_or_else(|| DEFAULT_TOKEN_TYPE.to_string())
}
