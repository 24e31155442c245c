//! # gmxflow Core Library
//!
//! Scripted orchestration of a GROMACS post-processing pipeline that turns a raw
//! molecular-dynamics trajectory into a per-residue RMSF (root-mean-square
//! fluctuation) report.
//!
//! All numerical work (index building, periodic-boundary unwrapping, centering,
//! fitting, fluctuation analysis) is done by the external toolkit. This library
//! decides *what* to run, feeds each invocation its interactive answers, and
//! stops at the first failure.
//!
//! ## Architecture
//!
//! - **[`core`]: Process plumbing.** Command lines with scripted standard input
//!   ([`core::command`]) and the [`core::runner::CommandRunner`] capability that
//!   executes them, with a real child-process implementation.
//!
//! - **[`engine`]: Pipeline definition.** Configuration, the eight pipeline
//!   steps with their file dependencies, errors, and progress events.
//!
//! - **[`workflows`]: The Public API.** Entry points that plan or run the
//!   complete pipeline against any `CommandRunner`.

pub mod core;
pub mod engine;
pub mod workflows;
