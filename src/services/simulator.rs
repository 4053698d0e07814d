//! Response simulator — the student chat session.
//!
//! DESIGN
//! ======
//! `ChatSession` owns its `ChatState` behind `Arc<Mutex<_>>`. A submission
//! is validated and appended synchronously, then a reveal task ticks once per
//! typing interval, disclosing one character per tick until the response is
//! committed. The task holds a `Weak` reference and exits as soon as the
//! session is disposed.

use std::sync::{Arc, Mutex, Weak};
use std::time::Duration;

use tokio::time::{Instant, interval_at};
use tracing::{debug, info};
use uuid::Uuid;

use super::lock;
use super::responder::{self, Topic};
use crate::config::DeskConfig;
use crate::state::chat::{ChatError, ChatState, RevealProgress};
use crate::task::TaskHandle;

pub struct ChatSession {
    state: Arc<Mutex<ChatState>>,
    typing_interval: Duration,
    reveal: Option<TaskHandle>,
    disposed: bool,
}

impl ChatSession {
    #[must_use]
    pub fn new(config: &DeskConfig) -> Self {
        Self::with_state(ChatState::new(), config)
    }

    #[must_use]
    pub fn with_state(state: ChatState, config: &DeskConfig) -> Self {
        Self { state: Arc::new(Mutex::new(state)), typing_interval: config.typing_interval, reveal: None, disposed: false }
    }

    /// Submit a question. The user message is appended immediately and the
    /// canned answer starts revealing in the background.
    ///
    /// Must be called from within a tokio runtime.
    ///
    /// # Errors
    ///
    /// `EmptyInput` for blank questions, `Busy` while a previous answer is
    /// still revealing, `Disposed` once the session is closed. Nothing is
    /// mutated on error.
    pub fn submit(&mut self, question: &str) -> Result<Topic, ChatError> {
        if self.disposed {
            return Err(ChatError::Disposed);
        }
        let canned = {
            let mut state = lock(&self.state);
            let message_id = state.send(question)?.id;
            let canned = responder::respond(question);
            state.begin_reveal(canned.text);
            info!(%message_id, topic = ?canned.topic, confidence = canned.confidence, "question submitted");
            canned
        };

        let weak = Arc::downgrade(&self.state);
        self.reveal = Some(TaskHandle::spawn("reveal", run_reveal(weak, self.typing_interval)));
        Ok(canned.topic)
    }

    /// Flip the flag on a message.
    ///
    /// # Errors
    ///
    /// `MessageNotFound` if no message has `id`, `Disposed` once the session
    /// is closed.
    pub fn toggle_flag(&self, id: Uuid) -> Result<bool, ChatError> {
        if self.disposed {
            return Err(ChatError::Disposed);
        }
        lock(&self.state).toggle_flag(id)
    }

    #[must_use]
    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    #[must_use]
    pub fn is_typing(&self) -> bool {
        lock(&self.state).is_typing
    }

    #[must_use]
    pub fn can_send(&self, input: &str) -> bool {
        lock(&self.state).can_send(input)
    }

    /// Clone of the current state for rendering.
    #[must_use]
    pub fn snapshot(&self) -> ChatState {
        lock(&self.state).clone()
    }

    /// Wait for an in-flight reveal to commit.
    pub async fn settle(&mut self) {
        if let Some(task) = self.reveal.as_mut() {
            task.join().await;
        }
        self.reveal = None;
    }

    /// Close the session: stop any in-flight reveal and refuse further
    /// mutations. Safe to call more than once.
    pub fn dispose(&mut self) {
        self.disposed = true;
        if let Some(mut task) = self.reveal.take() {
            task.cancel();
        }
    }
}

impl Drop for ChatSession {
    fn drop(&mut self) {
        self.dispose();
    }
}

async fn run_reveal(state: Weak<Mutex<ChatState>>, period: Duration) {
    let mut ticks = interval_at(Instant::now() + period, period);
    loop {
        ticks.tick().await;
        let Some(state) = state.upgrade() else {
            debug!("chat session gone; reveal stopped");
            return;
        };
        let progress = lock(&state).advance_reveal();
        if matches!(progress, RevealProgress::Committed | RevealProgress::Idle) {
            return;
        }
    }
}

#[cfg(test)]
#[path = "simulator_test.rs"]
mod tests;
