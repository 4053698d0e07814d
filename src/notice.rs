//! Notices — transient user-visible notifications raised by view actions.
//!
//! DESIGN
//! ======
//! Every action that succeeds or is rejected produces a `Notice` for the
//! caller to display. Rejections carry a grepable error code through the
//! `ErrorCode` trait and always render with the destructive tone.

use serde::{Deserialize, Serialize};

// =============================================================================
// ERROR CODES
// =============================================================================

/// Grepable error code for structured rejections.
pub trait ErrorCode: std::fmt::Display {
    fn error_code(&self) -> &'static str;
}

// =============================================================================
// NOTICE
// =============================================================================

/// Visual weight of a notice.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    #[default]
    Default,
    Destructive,
}

/// A transient notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub title: String,
    pub description: String,
    pub tone: Tone,
    /// Error code when the notice reports a rejection.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl Notice {
    pub fn info(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self { title: title.into(), description: description.into(), tone: Tone::Default, code: None }
    }

    /// Build a destructive notice for a rejected action.
    pub fn rejected(err: &(impl ErrorCode + ?Sized), title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            tone: Tone::Destructive,
            code: Some(err.error_code().to_string()),
        }
    }

    #[must_use]
    pub fn is_destructive(&self) -> bool {
        self.tone == Tone::Destructive
    }
}

#[cfg(test)]
#[path = "notice_test.rs"]
mod tests;
