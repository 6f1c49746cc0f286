// src/generation/params.rs - Prompt rules and the enumerated video options

use std::fmt;
use std::str::FromStr;

use crate::infra::errors::ValidationError;

/// Minimum trimmed prompt length, in characters, before generation is allowed.
pub const MIN_PROMPT_CHARS: usize = 10;

/// Prompt input is capped at this many characters.
pub const MAX_PROMPT_CHARS: usize = 1000;

/// Truncate `input` to at most [`MAX_PROMPT_CHARS`] characters.
pub fn cap_prompt(input: &str) -> String {
    input.chars().take(MAX_PROMPT_CHARS).collect()
}

/// Check the trimmed prompt against the minimum length.
pub fn validate_prompt(prompt: &str) -> Result<(), ValidationError> {
    if prompt.trim().chars().count() < MIN_PROMPT_CHARS {
        return Err(ValidationError::PromptTooShort {
            min: MIN_PROMPT_CHARS,
        });
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Resolution {
    #[default]
    FullHd1920x1080,
    Hd1280x720,
    Vertical1080x1920,
    Square1024x1024,
}

impl Resolution {
    pub const ALL: [Resolution; 4] = [
        Resolution::FullHd1920x1080,
        Resolution::Hd1280x720,
        Resolution::Vertical1080x1920,
        Resolution::Square1024x1024,
    ];

    /// Wire value sent to the backend.
    pub fn as_str(&self) -> &'static str {
        match self {
            Resolution::FullHd1920x1080 => "1920x1080",
            Resolution::Hd1280x720 => "1280x720",
            Resolution::Vertical1080x1920 => "1080x1920",
            Resolution::Square1024x1024 => "1024x1024",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Resolution::FullHd1920x1080 => "1920×1080 (Full HD)",
            Resolution::Hd1280x720 => "1280×720 (HD)",
            Resolution::Vertical1080x1920 => "1080×1920 (Vertical / Shorts)",
            Resolution::Square1024x1024 => "1024×1024 (Square)",
        }
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Resolution {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace('×', "x");
        Resolution::ALL
            .into_iter()
            .find(|r| r.as_str() == normalized)
            .ok_or_else(|| ValidationError::UnsupportedResolution(s.to_string()))
    }
}

/// Clip length in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ClipDuration {
    #[default]
    Five,
    Ten,
    Fifteen,
}

impl ClipDuration {
    pub const ALL: [ClipDuration; 3] = [ClipDuration::Five, ClipDuration::Ten, ClipDuration::Fifteen];

    pub fn seconds(&self) -> u32 {
        match self {
            ClipDuration::Five => 5,
            ClipDuration::Ten => 10,
            ClipDuration::Fifteen => 15,
        }
    }
}

impl fmt::Display for ClipDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}s", self.seconds())
    }
}

impl TryFrom<u32> for ClipDuration {
    type Error = ValidationError;

    fn try_from(seconds: u32) -> Result<Self, Self::Error> {
        ClipDuration::ALL
            .into_iter()
            .find(|d| d.seconds() == seconds)
            .ok_or_else(|| ValidationError::UnsupportedDuration(seconds.to_string()))
    }
}

impl FromStr for ClipDuration {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.trim().trim_end_matches('s');
        digits
            .parse::<u32>()
            .map_err(|_| ValidationError::UnsupportedDuration(s.to_string()))
            .and_then(|secs| {
                ClipDuration::try_from(secs)
                    .map_err(|_| ValidationError::UnsupportedDuration(s.to_string()))
            })
    }
}
