//! Feature implementations for focusflow.
//!
//! - Focus sessions, the timer engine and session storage
//! - Statistics and insights

pub mod focus;
pub mod stats;
