//! # Core Module
//!
//! The data model and registry shared by every generator, plus the I/O needed
//! to feed definitions in and hand finished rule sets to external tools.
//!
//! - **Complex-pattern model** ([`models`]) - monomer types, site conditions,
//!   complex patterns, parameters, rules and the `ModelBuilder` registry
//! - **Naming contract** ([`naming`]) - deterministic parameter and rule names
//! - **Errors** ([`error`]) - the fatal error kinds raised during model assembly
//! - **File I/O** ([`io`]) - TOML definitions, BNGL pattern text and export,
//!   parameter override tables

pub mod error;
pub mod io;
pub mod models;
pub mod naming;
