//! File formats around the model registry.
//!
//! Definition files (TOML) and parameter override tables (CSV) flow in;
//! BNGL model files flow out. TF patterns inside definitions are written in
//! BNGL pattern syntax and parsed against the registry.

pub mod bngl;
pub mod definition;
pub mod overrides;
pub mod pattern_parser;
pub mod traits;
