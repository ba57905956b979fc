use super::pattern_parser::PatternParseError;
use crate::core::error::{ModelError, SymbolKind};
use crate::core::models::monomer::{MonomerType, Site};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DefinitionError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("TOML parsing error for '{path}': {source}")]
    Toml {
        path: String,
        source: toml::de::Error,
    },
    #[error("CSV parsing error for '{path}': {source}")]
    Csv { path: String, source: csv::Error },
    #[error("Invalid pattern for transcription factor '{factor}': {source}")]
    Pattern {
        factor: String,
        source: PatternParseError,
    },
    #[error(transparent)]
    Model(#[from] ModelError),
}

/// A complete model description: monomer declarations plus the transcription
/// and translation units to generate.
#[derive(Debug, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct ModelDefinition {
    #[serde(default)]
    pub monomers: Vec<MonomerDefinition>,
    #[serde(default)]
    pub transcription: Vec<TranscriptionDefinition>,
    #[serde(default)]
    pub translation: Vec<TranslationDefinition>,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct MonomerDefinition {
    pub name: String,
    #[serde(default)]
    pub sites: Vec<String>,
    /// State values per state site; sites without an entry are bond sites.
    #[serde(default)]
    pub states: BTreeMap<String, Vec<String>>,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct TranscriptionDefinition {
    pub protein: String,
    /// `[kf, kr, kcat]` of basal polymerase recruitment.
    pub basal: Vec<f64>,
    pub mrna_decay: f64,
    #[serde(default)]
    pub factors: Vec<FactorDefinition>,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct FactorDefinition {
    pub name: String,
    pub pattern: String,
    /// `[kon, koff]`.
    pub binding: Vec<f64>,
    /// `[kf, kr, kcat]` of polymerase recruitment while bound.
    pub rates: Vec<f64>,
    #[serde(default)]
    pub slot: Option<String>,
    #[serde(default)]
    pub bound_through: Option<usize>,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct TranslationDefinition {
    pub protein: String,
    /// Three `[kf, kr]` rows: cap binding, 40S binding, 60S joining.
    pub binding: Vec<Vec<f64>>,
    pub release: f64,
    pub elongate: f64,
    pub terminate: f64,
    pub protein_decay: f64,
}

impl ModelDefinition {
    pub fn load(path: &Path) -> Result<Self, DefinitionError> {
        let content = std::fs::read_to_string(path).map_err(|e| DefinitionError::Io {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        toml::from_str(&content).map_err(|e| DefinitionError::Toml {
            path: path.to_string_lossy().to_string(),
            source: e,
        })
    }

    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}

impl MonomerDefinition {
    /// Builds the monomer type, keeping site declaration order.
    pub fn to_monomer_type(&self) -> Result<MonomerType, ModelError> {
        if let Some(orphan) = self.states.keys().find(|s| !self.sites.contains(s)) {
            return Err(ModelError::missing(
                SymbolKind::Site,
                format!("{}.{}", self.name, orphan),
            ));
        }
        let sites = self
            .sites
            .iter()
            .map(|site| match self.states.get(site) {
                Some(values) => {
                    let values: Vec<&str> = values.iter().map(String::as_str).collect();
                    Site::state(site, &values)
                }
                None => Site::bond(site),
            })
            .collect();
        Ok(MonomerType::new(&self.name, sites))
    }
}
