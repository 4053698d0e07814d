//! Canned responder — keyword classification of student questions.
//!
//! DESIGN
//! ======
//! Keyword groups are scanned in order against the lowercased question; the
//! first group with any substring hit wins. Order matters: "test my grade"
//! answers with the grading policy because grading is checked before exams.
//! Matches carry a fixed high confidence, the fallback a low one.

use serde::{Deserialize, Serialize};

pub const DEADLINE_RESPONSE: &str =
    "The assignment submission deadline is April 15th, 2025. Late submissions will incur a 10% penalty per day.";

pub const GRADING_RESPONSE: &str = "Grading is done on a scale of A to F. A: 90-100%, B: 80-89%, C: 70-79%, D: 60-69%, F: below 60%. Your final grade will be available two weeks after the final exam.";

pub const EXAM_RESPONSE: &str = "The final exam will be held on May 20th, 2025. It will cover all material from weeks 1-12. You are allowed one sheet of handwritten notes.";

pub const FALLBACK_RESPONSE: &str = "I don't have specific information about that. Please contact your professor or check the university portal for more details.";

const MATCH_CONFIDENCE: f32 = 0.9;
const FALLBACK_CONFIDENCE: f32 = 0.3;

/// Topic a question was classified into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Topic {
    Deadline,
    Grading,
    Exam,
    Unknown,
}

/// Ordered keyword groups. First hit wins.
const KEYWORD_GROUPS: &[(Topic, &[&str])] = &[
    (Topic::Deadline, &["deadline", "submission"]),
    (Topic::Grading, &["grade", "grading"]),
    (Topic::Exam, &["exam", "test"]),
];

impl Topic {
    #[must_use]
    pub fn response(self) -> &'static str {
        match self {
            Self::Deadline => DEADLINE_RESPONSE,
            Self::Grading => GRADING_RESPONSE,
            Self::Exam => EXAM_RESPONSE,
            Self::Unknown => FALLBACK_RESPONSE,
        }
    }

    #[must_use]
    pub fn confidence(self) -> f32 {
        match self {
            Self::Unknown => FALLBACK_CONFIDENCE,
            _ => MATCH_CONFIDENCE,
        }
    }
}

/// A canned answer chosen for a question.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CannedResponse {
    pub topic: Topic,
    pub text: &'static str,
    pub confidence: f32,
}

/// Classify a question by ordered keyword groups.
#[must_use]
pub fn classify(question: &str) -> Topic {
    let lowered = question.to_lowercase();
    KEYWORD_GROUPS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| lowered.contains(k)))
        .map_or(Topic::Unknown, |(topic, _)| *topic)
}

/// Pick the canned answer for a question.
#[must_use]
pub fn respond(question: &str) -> CannedResponse {
    let topic = classify(question);
    CannedResponse { topic, text: topic.response(), confidence: topic.confidence() }
}

#[cfg(test)]
#[path = "responder_test.rs"]
mod tests;
