use crate::core::error::ModelError;

/// Forward/reverse constants of a reversible binding step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RatePair {
    pub forward: f64,
    pub reverse: f64,
}

/// Binding constants plus the catalytic constant of the step they enable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RateTriple {
    pub forward: f64,
    pub reverse: f64,
    pub catalytic: f64,
}

impl RatePair {
    pub fn new(forward: f64, reverse: f64) -> Self {
        Self { forward, reverse }
    }

    /// Reads a `[kf, kr]` row, failing with a shape mismatch on any other arity.
    pub fn from_slice(what: &str, values: &[f64]) -> Result<Self, ModelError> {
        match *values {
            [forward, reverse] => Ok(Self { forward, reverse }),
            _ => Err(shape_mismatch(what, 2, values.len())),
        }
    }
}

impl RateTriple {
    pub fn new(forward: f64, reverse: f64, catalytic: f64) -> Self {
        Self {
            forward,
            reverse,
            catalytic,
        }
    }

    /// Reads a `[kf, kr, kcat]` row, failing with a shape mismatch on any
    /// other arity.
    pub fn from_slice(what: &str, values: &[f64]) -> Result<Self, ModelError> {
        match *values {
            [forward, reverse, catalytic] => Ok(Self {
                forward,
                reverse,
                catalytic,
            }),
            _ => Err(shape_mismatch(what, 3, values.len())),
        }
    }
}

/// Rate constants for the full translation pipeline of one protein.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TranslationKinetics {
    /// Cap binding, 40S binding and 60S joining, in that order.
    pub binding: [RatePair; 3],
    pub release: f64,
    pub elongate: f64,
    pub terminate: f64,
    pub protein_decay: f64,
}

impl TranslationKinetics {
    /// Converts a table of `[kf, kr]` rows into the three initiation steps.
    pub fn binding_from_rows(what: &str, rows: &[Vec<f64>]) -> Result<[RatePair; 3], ModelError> {
        let [cap, small, large] = rows else {
            return Err(shape_mismatch(what, 3, rows.len()));
        };
        Ok([
            RatePair::from_slice(&format!("{}[0]", what), cap)?,
            RatePair::from_slice(&format!("{}[1]", what), small)?,
            RatePair::from_slice(&format!("{}[2]", what), large)?,
        ])
    }
}

fn shape_mismatch(what: &str, expected: usize, found: usize) -> ModelError {
    ModelError::ShapeMismatch {
        what: what.to_string(),
        expected,
        found,
    }
}
