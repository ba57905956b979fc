use super::definition::DefinitionError;
use crate::core::error::ModelError;
use crate::core::models::builder::ModelBuilder;
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ParameterOverride {
    pub name: String,
    pub value: f64,
}

/// A `name,value` table of replacement parameter values, such as the output
/// of a fitting run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParameterOverrides {
    entries: Vec<ParameterOverride>,
}

impl ParameterOverrides {
    pub fn new(entries: Vec<ParameterOverride>) -> Self {
        Self { entries }
    }

    pub fn load(path: &Path) -> Result<Self, DefinitionError> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_path(path)
            .map_err(|e| DefinitionError::Csv {
                path: path.to_string_lossy().to_string(),
                source: e,
            })?;

        let mut entries = Vec::new();
        for result in reader.deserialize::<ParameterOverride>() {
            let record = result.map_err(|e| DefinitionError::Csv {
                path: path.to_string_lossy().to_string(),
                source: e,
            })?;
            entries.push(record);
        }
        Ok(Self { entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Replaces the value of every listed parameter. Stops at the first
    /// unknown name or invalid value; earlier rows stay applied.
    pub fn apply(&self, builder: &mut ModelBuilder) -> Result<(), ModelError> {
        for entry in &self.entries {
            builder.set_parameter_value(&entry.name, entry.value)?;
            debug!("Override {} = {}", entry.name, entry.value);
        }
        Ok(())
    }
}
