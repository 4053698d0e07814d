//! Student chat state — message log, typing flag and reveal buffer.
//!
//! DESIGN
//! ======
//! A submission appends the user message immediately and starts a reveal.
//! Each `advance_reveal` call discloses one more character of the chosen
//! response into `current_response`; the call after the buffer is complete
//! commits the text as an assistant message and clears the typing flag.
//! The caller decides how ticks are paced.

#[cfg(test)]
#[path = "chat_test.rs"]
mod chat_test;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use tracing::info;
use uuid::Uuid;

use crate::notice::{ErrorCode, Notice};

/// Opening assistant message of every session.
pub const GREETING: &str = "Hello! I'm your University AI Assistant. How can I help you today?";

// =============================================================================
// ERROR TYPE
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ChatError {
    #[error("question is empty")]
    EmptyInput,
    #[error("assistant is still typing")]
    Busy,
    #[error("message not found: {0}")]
    MessageNotFound(Uuid),
    #[error("chat session is closed")]
    Disposed,
}

impl ErrorCode for ChatError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::EmptyInput => "E_EMPTY_INPUT",
            Self::Busy => "E_BUSY",
            Self::MessageNotFound(_) => "E_MESSAGE_NOT_FOUND",
            Self::Disposed => "E_DISPOSED",
        }
    }
}

impl ChatError {
    #[must_use]
    pub fn notice(&self) -> Notice {
        match self {
            Self::EmptyInput => Notice::rejected(self, "Question cannot be empty", "Please type a question before sending."),
            Self::Busy => Notice::rejected(self, "Assistant is typing", "Wait for the current answer to finish."),
            Self::MessageNotFound(_) => Notice::rejected(self, "Message not found", "The message is no longer available."),
            Self::Disposed => Notice::rejected(self, "Chat closed", "Reopen the chat to ask another question."),
        }
    }
}

// =============================================================================
// MESSAGE
// =============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// A single chat message.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Message {
    pub id: Uuid,
    /// Logical clock; strictly increasing within a session.
    pub seq: u64,
    pub content: String,
    pub role: Role,
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
    #[serde(default)]
    pub flagged: bool,
}

// =============================================================================
// REVEAL
// =============================================================================

/// Outcome of one reveal tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RevealProgress {
    /// No reveal in progress.
    Idle,
    /// One more character disclosed; `shown` characters are now buffered.
    Revealing { shown: usize },
    /// The full text was committed as an assistant message.
    Committed,
}

#[derive(Clone, Debug)]
struct Reveal {
    text: String,
    /// Byte offset of the next character to disclose.
    cursor: usize,
    shown: usize,
}

// =============================================================================
// CHAT STATE
// =============================================================================

#[derive(Clone, Debug)]
pub struct ChatState {
    pub messages: Vec<Message>,
    pub is_typing: bool,
    /// Partially revealed assistant response.
    pub current_response: String,
    reveal: Option<Reveal>,
    next_seq: u64,
}

impl Default for ChatState {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatState {
    /// A session opened with the assistant greeting.
    #[must_use]
    pub fn new() -> Self {
        let mut state = Self::empty();
        state.push_message(Role::Assistant, GREETING);
        state
    }

    /// A session with no messages at all.
    #[must_use]
    pub fn empty() -> Self {
        Self { messages: Vec::new(), is_typing: false, current_response: String::new(), reveal: None, next_seq: 0 }
    }

    /// Whether the send control is enabled for `input`.
    #[must_use]
    pub fn can_send(&self, input: &str) -> bool {
        !input.trim().is_empty() && !self.is_typing
    }

    /// Append a message stamped with the next logical time.
    pub fn push_message(&mut self, role: Role, content: impl Into<String>) -> &Message {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.messages.push(Message {
            id: Uuid::new_v4(),
            seq,
            content: content.into(),
            role,
            timestamp: OffsetDateTime::now_utc(),
            flagged: false,
        });
        &self.messages[self.messages.len() - 1]
    }

    /// Validate and append a user question. Nothing changes on rejection.
    ///
    /// # Errors
    ///
    /// `EmptyInput` for blank questions, `Busy` while a reveal is running.
    pub fn send(&mut self, question: &str) -> Result<&Message, ChatError> {
        if question.trim().is_empty() {
            return Err(ChatError::EmptyInput);
        }
        if self.is_typing {
            return Err(ChatError::Busy);
        }
        Ok(self.push_message(Role::User, question))
    }

    /// Start revealing `text`. Marks the session as typing.
    pub fn begin_reveal(&mut self, text: impl Into<String>) {
        self.is_typing = true;
        self.current_response.clear();
        self.reveal = Some(Reveal { text: text.into(), cursor: 0, shown: 0 });
    }

    /// Disclose one character, or commit once the buffer holds the full text.
    pub fn advance_reveal(&mut self) -> RevealProgress {
        let Some(reveal) = self.reveal.as_mut() else {
            return RevealProgress::Idle;
        };

        if let Some(ch) = reveal.text[reveal.cursor..].chars().next() {
            reveal.cursor += ch.len_utf8();
            reveal.shown += 1;
            self.current_response.push(ch);
            return RevealProgress::Revealing { shown: reveal.shown };
        }

        let Some(done) = self.reveal.take() else {
            return RevealProgress::Idle;
        };
        self.current_response.clear();
        self.is_typing = false;
        let message = self.push_message(Role::Assistant, done.text);
        info!(message_id = %message.id, chars = done.shown, "assistant response committed");
        RevealProgress::Committed
    }

    /// Flip the flag on a message, returning the new value.
    ///
    /// # Errors
    ///
    /// `MessageNotFound` if no message has `id`.
    pub fn toggle_flag(&mut self, id: Uuid) -> Result<bool, ChatError> {
        let message = self
            .messages
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or(ChatError::MessageNotFound(id))?;
        message.flagged = !message.flagged;
        Ok(message.flagged)
    }

    /// Most recent message, if any.
    #[must_use]
    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }
}
