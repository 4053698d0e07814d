//! Services — canned responses and the timer tasks that drive view state.

pub mod feed;
pub mod responder;
pub mod simulator;

use std::sync::{Mutex, MutexGuard, PoisonError};

/// Lock view state, recovering from poisoning. Never held across an await.
pub(crate) fn lock<T>(state: &Mutex<T>) -> MutexGuard<'_, T> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}
