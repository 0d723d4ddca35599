//! Per-client sessions.
//!
//! Each session owns one [`Display`] behind its own mutex: cycles of one
//! session run one at a time, different sessions run in parallel.

mod error;
mod manager;

pub use error::SessionError;
pub use manager::{EntryPoint, SessionManager};
