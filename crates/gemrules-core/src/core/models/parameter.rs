use crate::core::error::ModelError;

/// A named rate constant. Values are always strictly positive and finite.
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    pub name: String,
    value: f64,
}

impl Parameter {
    pub fn new(name: &str, value: f64) -> Result<Self, ModelError> {
        validate_value(name, value)?;
        Ok(Self {
            name: name.to_string(),
            value,
        })
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub(crate) fn set_value(&mut self, value: f64) -> Result<(), ModelError> {
        validate_value(&self.name, value)?;
        self.value = value;
        Ok(())
    }
}

fn validate_value(name: &str, value: f64) -> Result<(), ModelError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ModelError::InvalidParameter {
            name: name.to_string(),
            value,
        })
    }
}
