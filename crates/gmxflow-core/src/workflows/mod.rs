//! # Workflows Module
//!
//! High-level entry points that tie the [`crate::engine`] definitions to a
//! [`crate::core::runner::CommandRunner`].
//!
//! - **Fluctuation Workflow** ([`rmsf`]) - Index building, unwrapping,
//!   centering, fitting, and RMSF calculation, run strictly in order with
//!   fail-fast error propagation.

pub mod rmsf;
