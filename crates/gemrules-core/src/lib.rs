//! # GEMRules Core Library
//!
//! Rule-template generators for gene-expression machinery in rule-based
//! biochemical models. Given a protein and a handful of kinetic constants, the
//! generators emit the complete, internally consistent set of complex-pattern
//! rules that implement transcription (basal and transcription-factor gated)
//! and the five-stage translation pipeline, ready to be handed to a
//! BioNetGen-compatible network-generation engine.
//!
//! ## Architectural Philosophy
//!
//! - **[`core`]: The Foundation.** Typed monomers, sites, complex patterns,
//!   parameters and rules, the `ModelBuilder` registry that owns them, the
//!   naming contract, and file I/O (definition files, BNGL export).
//!
//! - **[`generators`]: The Templates.** Stateless functions that take a
//!   `&mut ModelBuilder`, a resolved protein unit and kinetic constants, and
//!   commit a complete rule set atomically.
//!
//! - **[`workflows`]: The Public API.** End-to-end assembly of a model from a
//!   declarative definition file.

pub mod core;
pub mod generators;
pub mod workflows;
