//! # Generators Module
//!
//! Rule-template generators for the gene-expression machinery of a protein.
//!
//! Each generator takes the `ModelBuilder` explicitly, a resolved protein unit
//! (so every collaborator monomer is known to exist with the expected sites),
//! and the kinetic constants for the pathway. Generation is atomic per call:
//! either every parameter and rule is committed, or none is.
//!
//! - [`transcription`] - basal and transcription-factor gated transcription,
//!   plus mRNA decay
//! - [`translation`] - the cap-binding / subunit-joining / elongation /
//!   termination pipeline, plus protein decay
//! - [`units`] - resolution of the gene, mRNA, protein and machinery monomers
//! - [`kinetics`] - fixed-shape rate tables

pub mod kinetics;
pub mod transcription;
pub mod translation;
pub mod units;
