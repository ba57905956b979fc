//! # Workflows Module
//!
//! High-level entry points that turn a model definition into a complete rule
//! set.
//!
//! - **Assembly Workflow** ([`assemble`]) - declares monomer types, runs the
//!   transcription and translation generators for every configured protein,
//!   and applies parameter overrides.
//! - **Definition Resolution** ([`resolve`]) - converts rate tables and factor
//!   pattern text from a definition into generator inputs.

pub mod assemble;
pub mod resolve;
