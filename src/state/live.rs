//! Live query feed state — newest-first incoming queries and a single-item
//! viewport for faculty actions.
//!
//! DESIGN
//! ======
//! The list is capped; pushing beyond capacity evicts the oldest entries.
//! The viewport index cycles forward and back and is clamped whenever the
//! list shrinks. Direct responses are recorded so a sent reply is never a
//! silent, traceless success.

#[cfg(test)]
#[path = "live_test.rs"]
mod live_test;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use time::macros::datetime;
use tracing::info;
use uuid::Uuid;

use super::Priority;
use crate::notice::{ErrorCode, Notice};

// =============================================================================
// ERROR TYPE
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FeedError {
    #[error("live feed is empty")]
    EmptyFeed,
    #[error("response text is empty")]
    EmptyResponse,
}

impl ErrorCode for FeedError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::EmptyFeed => "E_EMPTY_FEED",
            Self::EmptyResponse => "E_EMPTY_RESPONSE",
        }
    }
}

impl FeedError {
    #[must_use]
    pub fn notice(&self) -> Notice {
        match self {
            Self::EmptyFeed => Notice::rejected(self, "No live queries", "There is no query to act on yet."),
            Self::EmptyResponse => {
                Notice::rejected(self, "Response cannot be empty", "Please enter a response before sending.")
            }
        }
    }
}

// =============================================================================
// RECORDS
// =============================================================================

/// A student query arriving in the live feed.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LiveQuery {
    pub id: Uuid,
    pub student_name: String,
    pub student_id: String,
    pub question: String,
    pub ai_response: String,
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
    pub priority: Priority,
    #[serde(default)]
    pub flagged: bool,
}

/// A faculty reply sent straight to the student behind a live query.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DirectResponse {
    pub id: Uuid,
    pub query_id: Uuid,
    pub student_name: String,
    pub text: String,
    #[serde(with = "time::serde::rfc3339")]
    pub sent_at: OffsetDateTime,
}

/// Result of flagging the query under the viewport.
#[derive(Clone, Debug, PartialEq)]
pub struct FlagOutcome {
    pub query: LiveQuery,
    /// True when the query had been flagged before this call.
    pub already_flagged: bool,
}

impl FlagOutcome {
    #[must_use]
    pub fn notice(&self) -> Notice {
        if self.already_flagged {
            Notice::info("Query flagged for review", "This query is already in the review panel.")
        } else {
            Notice::info("Query flagged for review", "This query has been added to the review panel.")
        }
    }
}

// =============================================================================
// LIVE FEED STATE
// =============================================================================

#[derive(Clone, Debug)]
pub struct LiveFeedState {
    /// Newest first, at most `capacity` entries.
    pub queries: Vec<LiveQuery>,
    pub current_index: usize,
    pub sent: Vec<DirectResponse>,
    capacity: usize,
}

impl LiveFeedState {
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self { queries: Vec::new(), current_index: 0, sent: Vec::new(), capacity: capacity.max(1) }
    }

    /// A feed preloaded with the morning's queries.
    #[must_use]
    pub fn seeded(capacity: usize) -> Self {
        let mut state = Self::new(capacity);
        state.queries = seed_queries();
        state.queries.truncate(state.capacity);
        state
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[must_use]
    pub fn current(&self) -> Option<&LiveQuery> {
        self.queries.get(self.current_index)
    }

    /// Prepend a new query, evicting the oldest beyond capacity.
    pub fn push(&mut self, query: LiveQuery) {
        self.queries.insert(0, query);
        self.queries.truncate(self.capacity);
        self.clamp_index();
    }

    pub fn next(&mut self) {
        if !self.queries.is_empty() {
            self.current_index = (self.current_index + 1) % self.queries.len();
        }
    }

    pub fn prev(&mut self) {
        let len = self.queries.len();
        if len > 0 {
            self.current_index = (self.current_index + len - 1) % len;
        }
    }

    /// Flag the query under the viewport. Flagging twice succeeds without
    /// changing anything.
    ///
    /// # Errors
    ///
    /// `EmptyFeed` when there is no query to flag.
    pub fn flag_current(&mut self) -> Result<FlagOutcome, FeedError> {
        let query = self
            .queries
            .get_mut(self.current_index)
            .ok_or(FeedError::EmptyFeed)?;
        let already_flagged = query.flagged;
        query.flagged = true;
        if !already_flagged {
            info!(query_id = %query.id, student = %query.student_name, "live query flagged");
        }
        Ok(FlagOutcome { query: query.clone(), already_flagged })
    }

    /// Record a direct reply to the student behind the current query.
    ///
    /// # Errors
    ///
    /// `EmptyResponse` for blank text, `EmptyFeed` with no current query.
    pub fn respond(&mut self, text: &str) -> Result<&DirectResponse, FeedError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(FeedError::EmptyResponse);
        }
        let query = self.current().ok_or(FeedError::EmptyFeed)?;
        let response = DirectResponse {
            id: Uuid::new_v4(),
            query_id: query.id,
            student_name: query.student_name.clone(),
            text: text.to_string(),
            sent_at: OffsetDateTime::now_utc(),
        };
        info!(query_id = %response.query_id, response_id = %response.id, "direct response sent");
        self.sent.push(response);
        Ok(&self.sent[self.sent.len() - 1])
    }

    /// Direct responses sent for a given query, oldest first.
    #[must_use]
    pub fn responses_for(&self, query_id: Uuid) -> Vec<&DirectResponse> {
        self.sent.iter().filter(|r| r.query_id == query_id).collect()
    }

    fn clamp_index(&mut self) {
        if self.current_index >= self.queries.len() {
            self.current_index = self.queries.len().saturating_sub(1);
        }
    }
}

/// Notice raised after a direct response is recorded.
#[must_use]
pub fn response_sent_notice() -> Notice {
    Notice::info("Response sent", "Your response has been sent to the student.")
}

// =============================================================================
// SEED DATA
// =============================================================================

fn seed(
    student_name: &str,
    student_id: &str,
    question: &str,
    ai_response: &str,
    timestamp: OffsetDateTime,
    priority: Priority,
) -> LiveQuery {
    LiveQuery {
        id: Uuid::new_v4(),
        student_name: student_name.into(),
        student_id: student_id.into(),
        question: question.into(),
        ai_response: ai_response.into(),
        timestamp,
        priority,
        flagged: false,
    }
}

fn seed_queries() -> Vec<LiveQuery> {
    vec![
        seed(
            "Jordan Rivera",
            "SID2025201",
            "How do I apply for a scholarship?",
            "To apply for a scholarship, visit the Financial Aid office or go to the university portal and navigate to the 'Scholarships' section. Complete the application form and submit all required documents by the deadline.",
            datetime!(2025-03-19 10:15 UTC),
            Priority::Medium,
        ),
        seed(
            "Riley Cooper",
            "SID2025156",
            "What are the library hours during finals week?",
            "During finals week, the main library is open 24/7. The specialized libraries (Science, Law, and Medical) have extended hours from 7 AM to 2 AM.",
            datetime!(2025-03-19 9:45 UTC),
            Priority::Low,
        ),
        seed(
            "Quinn Martinez",
            "SID2025089",
            "How do I declare a minor?",
            "To declare a minor, you need to fill out the Minor Declaration Form available on the Registrar's website. Submit the completed form to your academic advisor for approval.",
            datetime!(2025-03-19 9:30 UTC),
            Priority::Medium,
        ),
        seed(
            "Avery Thompson",
            "SID2025112",
            "What is the policy on academic probation?",
            "Academic probation is imposed when a student's GPA falls below 2.0. Students on probation must maintain a semester GPA of at least 2.0 to avoid academic suspension.",
            datetime!(2025-03-19 9:15 UTC),
            Priority::High,
        ),
        seed(
            "Cameron Wilson",
            "SID2025067",
            "How do I request an official transcript?",
            "Official transcripts can be requested through the university portal. There is a $10 fee per transcript, and processing takes 3-5 business days.",
            datetime!(2025-03-19 9:00 UTC),
            Priority::Low,
        ),
    ]
}
