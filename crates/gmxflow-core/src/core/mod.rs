//! # Core Module
//!
//! Building blocks for driving an interactive command-line toolkit from code.
//!
//! - **Command Lines** ([`command`]) - An executable, its arguments, and the
//!   newline-terminated answers it expects on standard input
//! - **Execution** ([`runner`]) - The [`runner::CommandRunner`] trait and the
//!   blocking [`runner::ProcessRunner`] that spawns real child processes
//!
//! Keeping execution behind a trait lets callers substitute a test double
//! that simulates success or failure without any external process.

pub mod command;
pub mod runner;
