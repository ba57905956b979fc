//! Turns the declarative unit sections of a [`ModelDefinition`] into the typed
//! inputs of the rule generators.
//!
//! [`ModelDefinition`]: crate::core::io::definition::ModelDefinition

use crate::core::error::ModelError;
use crate::core::io::definition::{
    DefinitionError, FactorDefinition, TranscriptionDefinition, TranslationDefinition,
};
use crate::core::io::pattern_parser::parse_complex;
use crate::core::models::model::Model;
use crate::generators::kinetics::{RatePair, RateTriple, TranslationKinetics};
use crate::generators::transcription::TranscriptionFactor;

pub fn basal_rates(unit: &TranscriptionDefinition) -> Result<RateTriple, ModelError> {
    RateTriple::from_slice(&format!("{}.basal", unit.protein), &unit.basal)
}

/// Parses every factor pattern against the declared monomer types.
pub fn transcription_factors(
    unit: &TranscriptionDefinition,
    model: &Model,
) -> Result<Vec<TranscriptionFactor>, DefinitionError> {
    unit.factors
        .iter()
        .map(|factor| resolve_factor(factor, model, &unit.protein))
        .collect()
}

fn resolve_factor(
    factor: &FactorDefinition,
    model: &Model,
    protein: &str,
) -> Result<TranscriptionFactor, DefinitionError> {
    let pattern = parse_complex(model, &factor.pattern).map_err(|source| {
        DefinitionError::Pattern {
            factor: factor.name.clone(),
            source,
        }
    })?;
    let binding = RatePair::from_slice(
        &format!("{}.{}.binding", protein, factor.name),
        &factor.binding,
    )?;
    let rates = RateTriple::from_slice(
        &format!("{}.{}.rates", protein, factor.name),
        &factor.rates,
    )?;

    let mut resolved = TranscriptionFactor::new(&factor.name, pattern, binding, rates);
    if let Some(index) = factor.bound_through {
        resolved = resolved.bound_through(index);
    }
    if let Some(slot) = &factor.slot {
        resolved = resolved.in_slot(slot);
    }
    Ok(resolved)
}

pub fn translation_kinetics(
    unit: &TranslationDefinition,
) -> Result<TranslationKinetics, ModelError> {
    Ok(TranslationKinetics {
        binding: TranslationKinetics::binding_from_rows(
            &format!("{}.binding", unit.protein),
            &unit.binding,
        )?,
        release: unit.release,
        elongate: unit.elongate,
        terminate: unit.terminate,
        protein_decay: unit.protein_decay,
    })
}
