//! focusflow - A terminal focus timer
//!
//! This crate provides a focus-session engine (timer state machine, session
//! history, statistics) and a command-line front-end with a full-screen timer.

#![deny(unsafe_code)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod cli;
pub mod config;
pub mod error;
pub mod features;
pub mod logging;
pub mod output;
pub mod storage;
pub mod tui;

pub use cli::args::{Cli, Commands, OutputFormat};
pub use error::FocusError;
pub use features::focus::{FocusEngine, FocusSession, SessionCategory, SessionStore};
