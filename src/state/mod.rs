//! View state containers.
//!
//! DESIGN
//! ======
//! State is split by view (`chat`, `live`, `review`, `history`) so each view
//! owns a small focused model. Containers are plain data with synchronous
//! operations; timers in `services` drive them through the same methods.

pub mod chat;
pub mod history;
pub mod live;
pub mod priority;
pub mod review;

pub use priority::Priority;
