use thiserror::Error;

/// The kind of registry symbol a lookup failed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolKind {
    Monomer,
    Site,
    State,
    Parameter,
    Rule,
}

impl std::fmt::Display for SymbolKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Monomer => "monomer",
            Self::Site => "site",
            Self::State => "state",
            Self::Parameter => "parameter",
            Self::Rule => "rule",
        };
        f.write_str(label)
    }
}

/// Fatal errors raised while declaring monomers or generating rules.
///
/// None of these are recoverable: each signals a programmer or configuration
/// error, and any generator call that raises one commits nothing.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ModelError {
    #[error("Missing {kind} '{name}' in model registry")]
    MissingSymbol { kind: SymbolKind, name: String },

    #[error("Shape mismatch for {what}: expected {expected} value(s), found {found}")]
    ShapeMismatch {
        what: String,
        expected: usize,
        found: usize,
    },

    #[error("Duplicate {kind} name '{name}'")]
    DuplicateName { kind: SymbolKind, name: String },

    #[error("Invalid name '{0}': must be a non-reserved identifier")]
    InvalidName(String),

    #[error("Parameter '{name}' must be a positive finite number (got {value})")]
    InvalidParameter { name: String, value: f64 },

    #[error("Rule '{rule}' leaves bond {bond} dangling")]
    DanglingBond { rule: String, bond: u32 },

    #[error("Invalid pattern: {0}")]
    InvalidPattern(String),
}

impl ModelError {
    pub(crate) fn missing(kind: SymbolKind, name: impl Into<String>) -> Self {
        Self::MissingSymbol {
            kind,
            name: name.into(),
        }
    }
}
