use crate::core::error::{ModelError, SymbolKind};
use crate::core::io::traits::ModelWriter;
use crate::core::models::ids::ParameterId;
use crate::core::models::model::Model;
use crate::core::models::monomer::{MonomerType, SiteKind};
use crate::core::models::pattern::{ComplexPattern, MonomerPattern, ReactionPattern, SiteCondition};
use crate::core::models::rule::{RateLaw, Rule};
use std::io::{self, Write};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BnglError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Cannot render rule '{rule}': {source}")]
    Render { rule: String, source: ModelError },
}

/// Writes a model as a BioNetGen `begin model` ... `end model` file.
///
/// Blocks follow declaration order, so the same model always produces the
/// same bytes.
pub struct BnglWriter;

impl ModelWriter for BnglWriter {
    type Error = BnglError;

    fn write_to(model: &Model, writer: &mut impl Write) -> Result<(), Self::Error> {
        writeln!(writer, "begin model")?;

        writeln!(writer, "begin parameters")?;
        for (_, parameter) in model.parameters() {
            writeln!(
                writer,
                "  {} {}",
                parameter.name,
                format_value(parameter.value())
            )?;
        }
        writeln!(writer, "end parameters")?;
        writeln!(writer)?;

        writeln!(writer, "begin molecule types")?;
        for (_, monomer) in model.monomers() {
            writeln!(writer, "  {}", molecule_type(monomer))?;
        }
        writeln!(writer, "end molecule types")?;
        writeln!(writer)?;

        writeln!(writer, "begin reaction rules")?;
        for (_, rule) in model.rules() {
            let line = rule_line(model, rule).map_err(|source| BnglError::Render {
                rule: rule.name.clone(),
                source,
            })?;
            writeln!(writer, "  {}", line)?;
        }
        writeln!(writer, "end reaction rules")?;

        writeln!(writer, "end model")?;
        Ok(())
    }
}

/// Renders a rule as `name: reactants <-> products kf, kr`.
pub fn rule_line(model: &Model, rule: &Rule) -> Result<String, ModelError> {
    let reactants = reaction_pattern(model, &rule.reactants)?;
    let products = reaction_pattern(model, &rule.products)?;
    let (arrow, rates) = match rule.rate {
        RateLaw::Reversible { forward, reverse } => (
            "<->",
            format!(
                "{}, {}",
                parameter_name(model, forward)?,
                parameter_name(model, reverse)?
            ),
        ),
        RateLaw::Irreversible(rate) | RateLaw::Catalytic(rate) => {
            ("->", parameter_name(model, rate)?.to_string())
        }
    };
    Ok(format!(
        "{}: {} {} {} {}",
        rule.name, reactants, arrow, products, rates
    ))
}

pub fn reaction_pattern(model: &Model, pattern: &ReactionPattern) -> Result<String, ModelError> {
    if pattern.is_empty() {
        return Ok("0".to_string());
    }
    let complexes = pattern
        .complexes()
        .iter()
        .map(|complex| complex_pattern(model, complex))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(complexes.join(" + "))
}

pub fn complex_pattern(model: &Model, complex: &ComplexPattern) -> Result<String, ModelError> {
    let monomers = complex
        .monomers()
        .iter()
        .map(|monomer| monomer_pattern(model, monomer))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(monomers.join("."))
}

pub fn monomer_pattern(model: &Model, pattern: &MonomerPattern) -> Result<String, ModelError> {
    let monomer = model.require_monomer(pattern.monomer)?;
    let sites: Vec<String> = pattern
        .sites()
        .iter()
        .map(|(site, condition)| match condition {
            SiteCondition::Free => site.clone(),
            SiteCondition::Bond(id) => format!("{}!{}", site, id),
            SiteCondition::Occupied => format!("{}!+", site),
            SiteCondition::Wild => format!("{}!?", site),
            SiteCondition::State(value) => format!("{}~{}", site, value),
        })
        .collect();
    Ok(format!("{}({})", monomer.name, sites.join(",")))
}

fn molecule_type(monomer: &MonomerType) -> String {
    let sites: Vec<String> = monomer
        .sites()
        .iter()
        .map(|site| match &site.kind {
            SiteKind::Bond => site.name.clone(),
            SiteKind::State(values) => format!("{}~{}", site.name, values.join("~")),
        })
        .collect();
    format!("{}({})", monomer.name, sites.join(","))
}

fn parameter_name(model: &Model, id: ParameterId) -> Result<&str, ModelError> {
    model
        .parameter(id)
        .map(|p| p.name.as_str())
        .ok_or_else(|| ModelError::missing(SymbolKind::Parameter, format!("{:?}", id)))
}

/// Plain notation for moderate magnitudes, exponent notation otherwise.
fn format_value(value: f64) -> String {
    if (1e-3..1e6).contains(&value) {
        format!("{}", value)
    } else {
        format!("{:e}", value)
    }
}
