//! Live feed service — periodic synthetic query injection.
//!
//! DESIGN
//! ======
//! A background task wakes every feed period, synthesizes one query from
//! fixed pools and prepends it to the feed. `LiveFeed` owns the state and
//! the generator; dropping or disposing it stops generation.

use std::sync::{Arc, Mutex, Weak};
use std::time::Duration;

use rand::Rng;
use time::OffsetDateTime;
use tokio::time::{Instant, interval_at};
use tracing::{debug, info};
use uuid::Uuid;

use super::lock;
use crate::config::DeskConfig;
use crate::notice::Notice;
use crate::state::Priority;
use crate::state::live::{FeedError, FlagOutcome, LiveFeedState, LiveQuery, response_sent_notice};
use crate::task::TaskHandle;

pub const STUDENT_NAMES: [&str; 10] =
    ["Alex", "Jamie", "Taylor", "Morgan", "Casey", "Jordan", "Riley", "Quinn", "Avery", "Cameron"];

pub const QUESTION_POOL: [&str; 5] = [
    "How do I access my course materials online?",
    "What are the requirements for graduating with honors?",
    "Can I take courses from other departments?",
    "How do I join a student club?",
    "What mental health resources are available on campus?",
];

pub const PLACEHOLDER_RESPONSE: &str = "I'll need to look into that for you. Please check back in a moment.";

/// Build one synthetic incoming query.
pub fn synthesize_query<R: Rng + ?Sized>(rng: &mut R) -> LiveQuery {
    let name = STUDENT_NAMES[rng.random_range(0..STUDENT_NAMES.len())];
    let suffix: u16 = rng.random_range(100..=999);
    let question = QUESTION_POOL[rng.random_range(0..QUESTION_POOL.len())];
    let priority = Priority::ALL[rng.random_range(0..Priority::ALL.len())];

    LiveQuery {
        id: Uuid::new_v4(),
        student_name: name.to_string(),
        student_id: format!("SID2025{suffix}"),
        question: question.to_string(),
        ai_response: PLACEHOLDER_RESPONSE.to_string(),
        timestamp: OffsetDateTime::now_utc(),
        priority,
        flagged: false,
    }
}

/// Spawn the generator for a feed. Returns a handle for shutdown.
pub fn spawn_feed_generator(state: Weak<Mutex<LiveFeedState>>, period: Duration) -> TaskHandle {
    TaskHandle::spawn("live-feed", async move {
        let mut ticks = interval_at(Instant::now() + period, period);
        loop {
            ticks.tick().await;
            let Some(state) = state.upgrade() else {
                debug!("live feed gone; generator stopped");
                return;
            };
            let query = synthesize_query(&mut rand::rng());
            info!(query_id = %query.id, priority = %query.priority, "synthetic live query");
            lock(&state).push(query);
        }
    })
}

// =============================================================================
// LIVE FEED VIEW
// =============================================================================

pub struct LiveFeed {
    state: Arc<Mutex<LiveFeedState>>,
    generator: Option<TaskHandle>,
}

impl LiveFeed {
    /// Open a seeded feed and start generating. Must be called from within a
    /// tokio runtime.
    #[must_use]
    pub fn start(config: &DeskConfig) -> Self {
        Self::with_state(LiveFeedState::seeded(config.feed_capacity), config.feed_period)
    }

    #[must_use]
    pub fn with_state(state: LiveFeedState, period: Duration) -> Self {
        let state = Arc::new(Mutex::new(state));
        let generator = spawn_feed_generator(Arc::downgrade(&state), period);
        Self { state, generator: Some(generator) }
    }

    #[must_use]
    pub fn snapshot(&self) -> LiveFeedState {
        lock(&self.state).clone()
    }

    #[must_use]
    pub fn current(&self) -> Option<LiveQuery> {
        lock(&self.state).current().cloned()
    }

    pub fn next(&self) {
        lock(&self.state).next();
    }

    pub fn prev(&self) {
        lock(&self.state).prev();
    }

    /// Flag the query under the viewport.
    ///
    /// # Errors
    ///
    /// `EmptyFeed` when there is nothing to flag.
    pub fn flag_current(&self) -> Result<FlagOutcome, FeedError> {
        lock(&self.state).flag_current()
    }

    /// Send a direct response for the query under the viewport.
    ///
    /// # Errors
    ///
    /// `EmptyResponse` for blank text, `EmptyFeed` with no current query.
    pub fn respond(&self, text: &str) -> Result<Notice, FeedError> {
        lock(&self.state).respond(text)?;
        Ok(response_sent_notice())
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.generator.as_ref().is_some_and(|g| !g.is_finished())
    }

    /// Stop generating. Safe to call more than once.
    pub fn dispose(&mut self) {
        if let Some(mut generator) = self.generator.take() {
            generator.cancel();
        }
    }
}

impl Drop for LiveFeed {
    fn drop(&mut self) {
        self.dispose();
    }
}

#[cfg(test)]
#[path = "feed_test.rs"]
mod tests;
