// src/generation/history.rs - In-memory record of completed generation requests

use std::collections::VecDeque;

use chrono::{DateTime, TimeZone};

use super::params::{ClipDuration, Resolution};

/// Number of entries surfaced for display. Older entries are retained.
pub const VISIBLE_HISTORY: usize = 5;

/// Display format of [`GenerationRequest::created_at`], e.g. `Oct 19, 02:30 PM`.
pub const CREATED_AT_FORMAT: &str = "%b %d, %I:%M %p";

pub fn display_timestamp<Tz: TimeZone>(at: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    at.format(CREATED_AT_FORMAT).to_string()
}

/// One submitted prompt and the video the backend assigned to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub id: String,
    pub created_at: String,
    pub prompt: String,
    pub resolution: Resolution,
    pub duration: ClipDuration,
    pub stream_url: Option<String>,
}

/// Newest-first list of generation requests.
#[derive(Debug, Clone, Default)]
pub struct History {
    entries: VecDeque<GenerationRequest>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, entry: GenerationRequest) {
        self.entries.push_front(entry);
    }

    /// Every entry, most recent first.
    pub fn all(&self) -> impl Iterator<Item = &GenerationRequest> {
        self.entries.iter()
    }

    /// The entries exposed for display.
    pub fn recent(&self) -> impl Iterator<Item = &GenerationRequest> {
        self.entries.iter().take(VISIBLE_HISTORY)
    }

    /// Entry by display position (0 = newest).
    pub fn get(&self, index: usize) -> Option<&GenerationRequest> {
        self.entries.get(index)
    }

    pub fn latest(&self) -> Option<&GenerationRequest> {
        self.entries.front()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
