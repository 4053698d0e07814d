//! Student and faculty dashboards.
//!
//! DESIGN
//! ======
//! Each dashboard owns its views outright. The faculty live feed exists only
//! while the live tab is selected: leaving the tab disposes the feed and its
//! generator, and returning opens a fresh seeded feed. Flagging a live query
//! hands a pending copy to the review list.

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod dashboard_test;

use tracing::debug;

use crate::config::DeskConfig;
use crate::notice::Notice;
use crate::services::feed::LiveFeed;
use crate::services::simulator::ChatSession;
use crate::state::history::HistoryState;
use crate::state::live::FeedError;
use crate::state::review::{FlaggedQuery, ReviewState};

// =============================================================================
// STUDENT
// =============================================================================

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StudentTab {
    #[default]
    Chat,
    History,
}

pub struct StudentDashboard {
    pub tab: StudentTab,
    pub chat: ChatSession,
    pub history: HistoryState,
}

impl StudentDashboard {
    #[must_use]
    pub fn new(config: &DeskConfig) -> Self {
        Self { tab: StudentTab::Chat, chat: ChatSession::new(config), history: HistoryState::seeded() }
    }

    pub fn select_tab(&mut self, tab: StudentTab) {
        self.tab = tab;
    }
}

// =============================================================================
// FACULTY
// =============================================================================

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FacultyTab {
    #[default]
    Review,
    Live,
}

pub struct FacultyDashboard {
    tab: FacultyTab,
    config: DeskConfig,
    pub review: ReviewState,
    live: Option<LiveFeed>,
}

impl FacultyDashboard {
    #[must_use]
    pub fn new(config: &DeskConfig) -> Self {
        Self { tab: FacultyTab::Review, config: *config, review: ReviewState::seeded(), live: None }
    }

    #[must_use]
    pub fn tab(&self) -> FacultyTab {
        self.tab
    }

    /// Switch tabs. Opening the live tab must happen inside a tokio runtime.
    pub fn select_tab(&mut self, tab: FacultyTab) {
        if tab == self.tab {
            return;
        }
        self.tab = tab;
        match tab {
            FacultyTab::Live => self.live = Some(LiveFeed::start(&self.config)),
            FacultyTab::Review => {
                if let Some(mut feed) = self.live.take() {
                    feed.dispose();
                    debug!("live feed closed");
                }
            }
        }
    }

    /// The live feed, while the live tab is open.
    #[must_use]
    pub fn live(&self) -> Option<&LiveFeed> {
        self.live.as_ref()
    }

    /// Flag the live query under the viewport and queue it for review.
    ///
    /// # Errors
    ///
    /// `EmptyFeed` when the live tab is closed or the feed is empty.
    pub fn flag_live_query(&mut self) -> Result<Notice, FeedError> {
        let feed = self.live.as_ref().ok_or(FeedError::EmptyFeed)?;
        let outcome = feed.flag_current()?;
        self.review.enqueue(FlaggedQuery::from(&outcome.query));
        Ok(outcome.notice())
    }

    /// Respond directly to the student behind the current live query.
    ///
    /// # Errors
    ///
    /// `EmptyFeed` when the live tab is closed, otherwise as `LiveFeed::respond`.
    pub fn respond_live(&self, text: &str) -> Result<Notice, FeedError> {
        self.live.as_ref().ok_or(FeedError::EmptyFeed)?.respond(text)
    }

    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.review.pending_count()
    }

    /// Sidebar summary line.
    #[must_use]
    pub fn pending_summary(&self) -> String {
        match self.pending_count() {
            1 => "1 query pending review".to_string(),
            n => format!("{n} queries pending review"),
        }
    }
}
