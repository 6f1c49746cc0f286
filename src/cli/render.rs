// src/cli/render.rs - Plain-text rendering of the generator screen

use crate::generation::history::{GenerationRequest, History};
use crate::generation::manager::Draft;
use crate::generation::params::MAX_PROMPT_CHARS;

/// History listings show at most this many prompt characters.
pub const PROMPT_PREVIEW_CHARS: usize = 120;

pub fn truncate_prompt(prompt: &str) -> String {
    if prompt.chars().count() > PROMPT_PREVIEW_CHARS {
        let head: String = prompt.chars().take(PROMPT_PREVIEW_CHARS).collect();
        format!("{head}…")
    } else {
        prompt.to_string()
    }
}

pub fn char_counter(prompt: &str) -> String {
    format!("{}/{}", prompt.chars().count(), MAX_PROMPT_CHARS)
}

pub fn draft_summary(draft: &Draft) -> String {
    format!(
        "{} · {} · prompt {}",
        draft.resolution.label(),
        draft.duration,
        char_counter(draft.prompt())
    )
}

pub fn entry_lines(entry: &GenerationRequest) -> Vec<String> {
    vec![
        format!(
            "{}  {}",
            entry.created_at,
            entry.stream_url.as_deref().unwrap_or("Pending")
        ),
        format!("  {}", truncate_prompt(&entry.prompt)),
        format!("  {} · {}", entry.resolution, entry.duration),
    ]
}

/// The visible part of the history, newest first.
pub fn history_lines(history: &History) -> Vec<String> {
    if history.is_empty() {
        return vec!["Generated videos will appear here.".to_string()];
    }
    history
        .recent()
        .enumerate()
        .flat_map(|(i, entry)| {
            let mut lines = entry_lines(entry);
            lines[0] = format!("{}. {}", i + 1, lines[0]);
            lines
        })
        .collect()
}
