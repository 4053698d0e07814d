//! Review workflow — flagged answers awaiting faculty review.
//!
//! DESIGN
//! ======
//! Each record is `pending` until a reviewer approves it or saves a
//! correction; both outcomes are terminal. Search and the facet filter are
//! independent predicates ANDed into the visible list. Manual reordering only
//! changes display order and never the stored list.
//!
//! Every mutation validates first and either fully applies or returns an
//! error with state untouched.

#[cfg(test)]
#[path = "review_test.rs"]
mod review_test;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use time::macros::datetime;
use tracing::info;
use uuid::Uuid;

use super::Priority;
use super::live::LiveQuery;
use crate::notice::{ErrorCode, Notice};

// =============================================================================
// ERROR TYPE
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReviewError {
    #[error("flagged query not found: {0}")]
    NotFound(Uuid),
    #[error("flagged query {id} is already {status}")]
    NotPending { id: Uuid, status: ReviewStatus },
    #[error("correction text is empty")]
    EmptyCorrection,
    #[error("no correction is being edited")]
    NotEditing,
}

impl ErrorCode for ReviewError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "E_NOT_FOUND",
            Self::NotPending { .. } => "E_NOT_PENDING",
            Self::EmptyCorrection => "E_EMPTY_CORRECTION",
            Self::NotEditing => "E_NOT_EDITING",
        }
    }
}

impl ReviewError {
    #[must_use]
    pub fn notice(&self) -> Notice {
        match self {
            Self::NotFound(_) => Notice::rejected(self, "Query not found", "The flagged query is no longer available."),
            Self::NotPending { status, .. } => {
                Notice::rejected(self, "Already reviewed", format!("This response has already been {status}."))
            }
            Self::EmptyCorrection => {
                Notice::rejected(self, "Correction cannot be empty", "Please enter a corrected response before saving.")
            }
            Self::NotEditing => Notice::rejected(self, "Nothing to save", "Open a response for editing first."),
        }
    }
}

// =============================================================================
// STATUS + FACETS
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewStatus {
    Pending,
    Approved,
    Corrected,
}

impl ReviewStatus {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Corrected => "corrected",
        }
    }
}

impl fmt::Display for ReviewStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Single-select filter over priority or status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Facet {
    #[default]
    All,
    Priority(Priority),
    Status(ReviewStatus),
}

impl Facet {
    #[must_use]
    pub fn matches(self, query: &FlaggedQuery) -> bool {
        match self {
            Self::All => true,
            Self::Priority(p) => query.priority == p,
            Self::Status(s) => query.status == s,
        }
    }
}

impl fmt::Display for Facet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::Priority(p) => fmt::Display::fmt(p, f),
            Self::Status(s) => fmt::Display::fmt(s, f),
        }
    }
}

impl FromStr for Facet {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(Self::All),
            "pending" => Ok(Self::Status(ReviewStatus::Pending)),
            "approved" => Ok(Self::Status(ReviewStatus::Approved)),
            "corrected" => Ok(Self::Status(ReviewStatus::Corrected)),
            other => other
                .parse::<Priority>()
                .map(Self::Priority)
                .map_err(|_| format!("unknown filter: {other}")),
        }
    }
}

// =============================================================================
// FLAGGED QUERY
// =============================================================================

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FlaggedQuery {
    pub id: Uuid,
    pub student_name: String,
    pub student_id: String,
    pub question: String,
    pub ai_response: String,
    #[serde(with = "time::serde::rfc3339")]
    pub date: OffsetDateTime,
    pub priority: Priority,
    pub status: ReviewStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub corrected_response: Option<String>,
}

impl FlaggedQuery {
    /// Case-insensitive substring match on question, response or student.
    /// An empty term matches everything.
    #[must_use]
    pub fn matches_search(&self, term: &str) -> bool {
        let term = term.to_lowercase();
        self.question.to_lowercase().contains(&term)
            || self.ai_response.to_lowercase().contains(&term)
            || self.student_name.to_lowercase().contains(&term)
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.status == ReviewStatus::Pending
    }
}

impl From<&LiveQuery> for FlaggedQuery {
    fn from(query: &LiveQuery) -> Self {
        Self {
            id: query.id,
            student_name: query.student_name.clone(),
            student_id: query.student_id.clone(),
            question: query.question.clone(),
            ai_response: query.ai_response.clone(),
            date: query.timestamp,
            priority: query.priority,
            status: ReviewStatus::Pending,
            corrected_response: None,
        }
    }
}

// =============================================================================
// REVIEW STATE
// =============================================================================

/// Correction draft open in the panel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Editing {
    pub id: Uuid,
    pub draft: String,
}

#[derive(Clone, Debug, Default)]
pub struct ReviewState {
    pub queries: Vec<FlaggedQuery>,
    pub search_term: String,
    pub active_filter: Facet,
    pub expanded_id: Option<Uuid>,
    pub editing: Option<Editing>,
    /// Manual display order; ids not listed follow in stored order.
    display_order: Vec<Uuid>,
}

impl ReviewState {
    #[must_use]
    pub fn new(queries: Vec<FlaggedQuery>) -> Self {
        Self { queries, ..Self::default() }
    }

    /// The panel as it opens: five pending answers flagged this week.
    #[must_use]
    pub fn seeded() -> Self {
        Self::new(seed_queries())
    }

    #[must_use]
    pub fn get(&self, id: Uuid) -> Option<&FlaggedQuery> {
        self.queries.iter().find(|q| q.id == id)
    }

    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.queries.iter().filter(|q| q.is_pending()).count()
    }

    // -------------------------------------------------------------------------
    // Views
    // -------------------------------------------------------------------------

    #[must_use]
    pub fn search(&self, term: &str) -> Vec<&FlaggedQuery> {
        self.query(term, Facet::All)
    }

    #[must_use]
    pub fn filter(&self, facet: Facet) -> Vec<&FlaggedQuery> {
        self.query("", facet)
    }

    /// Records matching both the search term and the facet, in stored order.
    #[must_use]
    pub fn query(&self, term: &str, facet: Facet) -> Vec<&FlaggedQuery> {
        self.queries
            .iter()
            .filter(|q| facet.matches(q) && q.matches_search(term))
            .collect()
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
    }

    pub fn set_filter(&mut self, facet: Facet) {
        self.active_filter = facet;
    }

    /// The active search and filter, in display order.
    #[must_use]
    pub fn visible(&self) -> Vec<&FlaggedQuery> {
        let mut visible = self.query(&self.search_term, self.active_filter);
        if !self.display_order.is_empty() {
            visible.sort_by_key(|q| {
                self.display_order
                    .iter()
                    .position(|id| *id == q.id)
                    .unwrap_or(usize::MAX)
            });
        }
        visible
    }

    /// Set a manual display order. Unknown ids are dropped.
    pub fn reorder(&mut self, order: &[Uuid]) {
        let mut kept: Vec<Uuid> = Vec::with_capacity(order.len());
        for id in order {
            if self.get(*id).is_some() && !kept.contains(id) {
                kept.push(*id);
            }
        }
        self.display_order = kept;
    }

    // -------------------------------------------------------------------------
    // Transitions
    // -------------------------------------------------------------------------

    /// Mark a pending answer as accurate.
    ///
    /// # Errors
    ///
    /// `NotFound` for unknown ids, `NotPending` once reviewed.
    pub fn approve(&mut self, id: Uuid) -> Result<Notice, ReviewError> {
        let query = self.pending_mut(id)?;
        query.status = ReviewStatus::Approved;
        if self.editing.as_ref().is_some_and(|e| e.id == id) {
            self.editing = None;
        }
        info!(query_id = %id, "response approved");
        Ok(Notice::info("Response approved", "The AI response has been marked as accurate."))
    }

    /// Replace a pending answer with a faculty correction.
    ///
    /// # Errors
    ///
    /// `EmptyCorrection` for blank text, `NotFound` for unknown ids,
    /// `NotPending` once reviewed.
    pub fn correct(&mut self, id: Uuid, text: &str) -> Result<Notice, ReviewError> {
        if text.trim().is_empty() {
            return Err(ReviewError::EmptyCorrection);
        }
        let query = self.pending_mut(id)?;
        query.status = ReviewStatus::Corrected;
        query.ai_response = text.to_string();
        query.corrected_response = Some(text.to_string());
        if self.editing.as_ref().is_some_and(|e| e.id == id) {
            self.editing = None;
        }
        info!(query_id = %id, chars = text.chars().count(), "response corrected");
        Ok(Notice::info("Response corrected", "The student will be notified of your correction."))
    }

    /// Accept a query flagged from the live feed. Returns false if a record
    /// with the same id is already under review.
    pub fn enqueue(&mut self, query: FlaggedQuery) -> bool {
        if self.get(query.id).is_some() {
            return false;
        }
        info!(query_id = %query.id, priority = %query.priority, "query queued for review");
        self.queries.insert(0, query);
        true
    }

    fn pending_mut(&mut self, id: Uuid) -> Result<&mut FlaggedQuery, ReviewError> {
        let query = self
            .queries
            .iter_mut()
            .find(|q| q.id == id)
            .ok_or(ReviewError::NotFound(id))?;
        if !query.is_pending() {
            return Err(ReviewError::NotPending { id, status: query.status });
        }
        Ok(query)
    }

    // -------------------------------------------------------------------------
    // Panel interaction
    // -------------------------------------------------------------------------

    /// Expand a record, or collapse it if already expanded. Any open
    /// correction draft is discarded either way.
    pub fn toggle_expand(&mut self, id: Uuid) {
        self.editing = None;
        if self.expanded_id == Some(id) {
            self.expanded_id = None;
        } else {
            self.expanded_id = Some(id);
        }
    }

    /// Open a correction draft prefilled with the current answer.
    ///
    /// # Errors
    ///
    /// `NotFound` for unknown ids, `NotPending` once reviewed.
    pub fn start_editing(&mut self, id: Uuid) -> Result<(), ReviewError> {
        let draft = self.pending_mut(id)?.ai_response.clone();
        self.editing = Some(Editing { id, draft });
        Ok(())
    }

    /// Replace the draft text.
    ///
    /// # Errors
    ///
    /// `NotEditing` when no draft is open.
    pub fn set_draft(&mut self, text: impl Into<String>) -> Result<(), ReviewError> {
        let editing = self.editing.as_mut().ok_or(ReviewError::NotEditing)?;
        editing.draft = text.into();
        Ok(())
    }

    pub fn cancel_editing(&mut self) {
        self.editing = None;
    }

    /// Save the open draft as a correction.
    ///
    /// # Errors
    ///
    /// `NotEditing` when no draft is open, otherwise as `correct`. The draft
    /// stays open on rejection.
    pub fn save_correction(&mut self) -> Result<Notice, ReviewError> {
        let Editing { id, draft } = self.editing.clone().ok_or(ReviewError::NotEditing)?;
        self.correct(id, &draft)
    }
}

// =============================================================================
// SEED DATA
// =============================================================================

fn seed(
    student_name: &str,
    student_id: &str,
    question: &str,
    ai_response: &str,
    date: OffsetDateTime,
    priority: Priority,
) -> FlaggedQuery {
    FlaggedQuery {
        id: Uuid::new_v4(),
        student_name: student_name.into(),
        student_id: student_id.into(),
        question: question.into(),
        ai_response: ai_response.into(),
        date,
        priority,
        status: ReviewStatus::Pending,
        corrected_response: None,
    }
}

fn seed_queries() -> Vec<FlaggedQuery> {
    vec![
        seed(
            "Alex Johnson",
            "SID2025001",
            "What is the deadline for dropping a course without a 'W' grade?",
            "The deadline for dropping a course without receiving a 'W' grade is two weeks after the start of the semester.",
            datetime!(2025-03-18 0:00 UTC),
            Priority::High,
        ),
        seed(
            "Jamie Smith",
            "SID2025042",
            "How many credits do I need to graduate with honors?",
            "To graduate with honors, you need to complete 120 credits with a GPA of 3.5 or higher.",
            datetime!(2025-03-17 0:00 UTC),
            Priority::Medium,
        ),
        seed(
            "Taylor Williams",
            "SID2025078",
            "What are the requirements for applying to the Computer Science graduate program?",
            "To apply for the Computer Science graduate program, you need a bachelor's degree in Computer Science or a related field, a minimum GPA of 3.0, GRE scores, and three letters of recommendation.",
            datetime!(2025-03-15 0:00 UTC),
            Priority::Low,
        ),
        seed(
            "Morgan Lee",
            "SID2025103",
            "Is there a limit to how many courses I can take per semester?",
            "The maximum course load is 18 credits per semester. To take more than 18 credits, you need approval from your academic advisor.",
            datetime!(2025-03-14 0:00 UTC),
            Priority::Medium,
        ),
        seed(
            "Casey Brown",
            "SID2025129",
            "How do I apply for a teaching assistant position?",
            "To apply for a teaching assistant position, you need to contact the department offering the course and submit your resume, transcript, and a letter of recommendation from a faculty member.",
            datetime!(2025-03-12 0:00 UTC),
            Priority::Low,
        ),
    ]
}
