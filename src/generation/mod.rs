// src/generation/mod.rs - Prompt-driven video generation

pub mod history;
pub mod manager;
pub mod params;

pub use history::{GenerationRequest, History};
pub use manager::{Draft, GenerationManager, GenerationState};
pub use params::{ClipDuration, Resolution};

/// Accepted identifier fields of a generation response, in priority order.
pub const ID_FIELDS: [&str; 3] = ["id", "video_id", "videoId"];

/// Pull the server-assigned video id out of a generation response body.
///
/// The body must be a JSON object. The first field of [`ID_FIELDS`] holding a
/// non-empty string or a number wins.
pub fn extract_video_id(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    let map = value.as_object()?;
    ID_FIELDS.iter().find_map(|field| match map.get(*field)? {
        serde_json::Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        serde_json::Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}
