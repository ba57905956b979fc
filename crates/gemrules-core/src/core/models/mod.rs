//! # Core Models Module
//!
//! The complex-pattern data model that both generators read and write.
//!
//! ## Key Components
//!
//! - [`monomer`] - Typed monomers with ordered bond and state sites
//! - [`pattern`] - Site conditions, monomer/complex/reaction patterns and bond bookkeeping
//! - [`parameter`] - Named positive rate constants
//! - [`rule`] - Named rules and their mass-action rate laws
//! - [`model`] - The finished, read-only model registry
//! - [`builder`] - `ModelBuilder`, the mutable registry generators write into
//! - [`ids`] - Stable keys for monomers, parameters and rules
//!
//! ## Usage
//!
//! ```ignore
//! use gemrules::core::models::{builder::ModelBuilder, monomer::{MonomerType, Site}};
//!
//! let mut builder = ModelBuilder::new();
//! let rnap = builder.add_monomer(MonomerType::new("RNAp", vec![Site::bond("gene")]))?;
//! let kf = builder.add_parameter("kf_g_PSA_RNAp", 0.1)?;
//! ```

pub mod builder;
pub mod ids;
pub mod model;
pub mod monomer;
pub mod parameter;
pub mod pattern;
pub mod rule;
