//! # Engine Module
//!
//! Defines the fluctuation pipeline: what each step runs, which files it
//! depends on, how it is configured, and how failures and progress are
//! reported.
//!
//! - **Configuration** ([`config`]) - Group identifiers, selections, file names, executable
//! - **Steps** ([`steps`]) - The eight ordered invocations and their artifacts
//! - **Progress Monitoring** ([`progress`]) - Callback-based progress events
//! - **Error Handling** ([`error`]) - Pipeline error types

pub mod config;
pub mod error;
pub mod progress;
pub mod steps;
