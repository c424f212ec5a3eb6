//! peakmatch-core: Matching engine, scoring, and session history.
//!
//! This crate holds everything about a matching quiz that is not drawing or
//! reading the terminal: the board state machine, the score formula, the
//! persisted history and the screen flow around them.

pub mod config;
pub mod engine;
pub mod error;
pub mod history;
pub mod model;
pub mod parser;
pub mod scoring;
pub mod session;
pub mod shuffle;
pub mod storage;
pub mod traits;

pub use error::{QuizError, Result};
