#[cfg(test)]
#[path = "history_test.rs"]
mod history_test;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use time::macros::datetime;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HistoryStatus {
    Answered,
    Flagged,
    Resolved,
}

/// A past student question with the answer it received.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct QueryHistoryItem {
    pub id: Uuid,
    pub question: String,
    pub answer: String,
    #[serde(with = "time::serde::rfc3339")]
    pub date: OffsetDateTime,
    pub status: HistoryStatus,
}

/// Read-only query history with a search box and one expanded entry.
#[derive(Clone, Debug, Default)]
pub struct HistoryState {
    pub items: Vec<QueryHistoryItem>,
    pub search_term: String,
    pub expanded_id: Option<Uuid>,
}

impl HistoryState {
    #[must_use]
    pub fn seeded() -> Self {
        Self { items: seed_items(), ..Self::default() }
    }

    /// Case-insensitive substring match on question or answer.
    #[must_use]
    pub fn search(&self, term: &str) -> Vec<&QueryHistoryItem> {
        let term = term.to_lowercase();
        self.items
            .iter()
            .filter(|item| item.question.to_lowercase().contains(&term) || item.answer.to_lowercase().contains(&term))
            .collect()
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
    }

    #[must_use]
    pub fn visible(&self) -> Vec<&QueryHistoryItem> {
        self.search(&self.search_term)
    }

    pub fn toggle_expand(&mut self, id: Uuid) {
        self.expanded_id = if self.expanded_id == Some(id) { None } else { Some(id) };
    }
}

fn item(question: &str, answer: &str, date: OffsetDateTime, status: HistoryStatus) -> QueryHistoryItem {
    QueryHistoryItem { id: Uuid::new_v4(), question: question.into(), answer: answer.into(), date, status }
}

fn seed_items() -> Vec<QueryHistoryItem> {
    vec![
        item(
            "When is the final exam for Computer Science 101?",
            "The final exam for CS101 will be held on May 20th, 2025 at 10:00 AM in the Main Hall.",
            datetime!(2025-03-15 0:00 UTC),
            HistoryStatus::Answered,
        ),
        item(
            "What is the grading policy for late assignments?",
            "Late assignments incur a 10% penalty per day, up to a maximum of 50%. After 5 days, assignments will not be accepted without a valid excuse.",
            datetime!(2025-03-10 0:00 UTC),
            HistoryStatus::Flagged,
        ),
        item(
            "How do I apply for a course extension?",
            "To apply for a course extension, you need to fill out the Extension Request Form available on the student portal and submit it to your academic advisor at least two weeks before the end of the semester.",
            datetime!(2025-03-05 0:00 UTC),
            HistoryStatus::Resolved,
        ),
        item(
            "What are the prerequisites for Advanced Machine Learning?",
            "The prerequisites for Advanced Machine Learning (CS450) are: Introduction to Machine Learning (CS350), Data Structures and Algorithms (CS201), and Statistics for Computer Science (MATH240). You must have received at least a B grade in each of these courses.",
            datetime!(2025-02-28 0:00 UTC),
            HistoryStatus::Answered,
        ),
        item(
            "How do I access the online library resources off-campus?",
            "To access the university library resources off-campus, you need to use the VPN service provided by the university. Log in with your student credentials at vpn.university.edu and then you can access all digital resources as if you were on campus.",
            datetime!(2025-02-20 0:00 UTC),
            HistoryStatus::Answered,
        ),
    ]
}
