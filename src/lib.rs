//! # querydesk
//!
//! Client-side logic for a university query desk: a student chat that answers
//! from canned responses with a typing effect, and a faculty dashboard that
//! reviews flagged answers and watches a live feed of incoming questions.
//!
//! DESIGN
//! ======
//! Pure state containers live in `state` and are tested synchronously. Timer
//! driven behavior (typing reveal, live feed generation) lives in `services`
//! and runs as cancellable tokio tasks owned by the view that started them.
//! `dashboard` composes both into the two user-facing views.

pub mod config;
pub mod dashboard;
pub mod notice;
pub mod services;
pub mod state;
pub mod task;
