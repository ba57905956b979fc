use crate::cli::InspectArgs;
use crate::config::require_file;
use crate::error::Result;
use gemrules::core::io::definition::ModelDefinition;
use gemrules::workflows::assemble::{self, AssembledModel};
use std::fmt;
use tracing::info;

pub fn run(args: InspectArgs) -> Result<()> {
    require_file(&args.model, "model definition")?;
    info!("Loading model definition from {:?}", &args.model);
    let definition = ModelDefinition::load(&args.model)?;
    let assembled = assemble::run(&definition, None)?;

    print!(
        "{}",
        Report {
            assembled: &assembled,
            list_rules: args.rules,
        }
    );
    Ok(())
}

/// Per-unit and total counts of an assembled model, optionally followed by
/// the rule list.
pub struct Report<'a> {
    pub assembled: &'a AssembledModel,
    pub list_rules: bool,
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{:<16} {:<14} {:>8} {:>6} {:>11}",
            "protein", "unit", "factors", "rules", "parameters"
        )?;
        for unit in &self.assembled.units {
            writeln!(
                f,
                "{:<16} {:<14} {:>8} {:>6} {:>11}",
                unit.protein, unit.kind, unit.factors, unit.rules, unit.parameters
            )?;
        }

        let model = &self.assembled.model;
        writeln!(f)?;
        writeln!(f, "monomer types:    {}", model.num_monomers())?;
        writeln!(f, "rules:            {}", model.num_rules())?;
        writeln!(f, "reversible rules: {}", self.assembled.reversible_rules())?;
        writeln!(f, "parameters:       {}", model.num_parameters())?;

        if self.list_rules {
            writeln!(f)?;
            for (_, rule) in model.rules() {
                let arrow = if rule.rate.is_reversible() { "<->" } else { "->" };
                writeln!(f, "  {} {}", arrow, rule.name)?;
            }
        }
        Ok(())
    }
}
