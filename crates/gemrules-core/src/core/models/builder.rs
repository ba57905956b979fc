use super::ids::{MonomerId, ParameterId, RuleId};
use super::model::Model;
use super::monomer::{MonomerType, SiteKind};
use super::parameter::Parameter;
use super::pattern::{MonomerPattern, SiteCondition};
use super::rule::Rule;
use crate::core::error::{ModelError, SymbolKind};
use crate::core::naming::is_valid_identifier;
use std::collections::HashSet;
use tracing::{debug, trace};

/// The mutable model registry that generators write into.
///
/// A builder is passed explicitly (`&mut ModelBuilder`) to every generator,
/// which makes ordering and ownership visible at the call site. Every insertion
/// is validated: names must be unique identifiers, parameters must be positive,
/// and rules must reference existing monomers, sites, states and parameters
/// without leaving any bond dangling.
#[derive(Debug, Default)]
pub struct ModelBuilder {
    model: Model,
}

/// Insertion counts recorded at the start of a transaction.
struct Checkpoint {
    monomers: usize,
    parameters: usize,
    rules: usize,
}

impl ModelBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn model(&self) -> &Model {
        &self.model
    }

    pub fn build(self) -> Model {
        self.model
    }

    /// Declares a monomer type.
    ///
    /// # Errors
    ///
    /// Fails if the name is not a valid identifier or already taken, if a site
    /// name repeats, or if a state site declares no values.
    pub fn add_monomer(&mut self, monomer: MonomerType) -> Result<MonomerId, ModelError> {
        ensure_identifier(&monomer.name)?;
        if self.model.monomer_names.contains_key(&monomer.name) {
            return Err(ModelError::DuplicateName {
                kind: SymbolKind::Monomer,
                name: monomer.name,
            });
        }

        let mut seen = HashSet::new();
        for site in monomer.sites() {
            ensure_identifier(&site.name)?;
            if !seen.insert(site.name.as_str()) {
                return Err(ModelError::DuplicateName {
                    kind: SymbolKind::Site,
                    name: format!("{}.{}", monomer.name, site.name),
                });
            }
            if let SiteKind::State(values) = &site.kind {
                if values.is_empty() {
                    return Err(ModelError::InvalidPattern(format!(
                        "state site '{}.{}' declares no values",
                        monomer.name, site.name
                    )));
                }
            }
        }

        trace!("Declaring monomer type '{}'", monomer.name);
        let name = monomer.name.clone();
        let id = self.model.monomers.insert(monomer);
        self.model.monomer_names.insert(name, id);
        self.model.monomer_order.push(id);
        Ok(id)
    }

    /// Creates a named rate constant.
    pub fn add_parameter(&mut self, name: &str, value: f64) -> Result<ParameterId, ModelError> {
        ensure_identifier(name)?;
        if self.model.parameter_names.contains_key(name) {
            return Err(ModelError::DuplicateName {
                kind: SymbolKind::Parameter,
                name: name.to_string(),
            });
        }
        let parameter = Parameter::new(name, value)?;
        debug!("Parameter {} = {}", name, value);
        let id = self.model.parameters.insert(parameter);
        self.model.parameter_names.insert(name.to_string(), id);
        self.model.parameter_order.push(id);
        Ok(id)
    }

    /// Replaces the value of an existing parameter.
    pub fn set_parameter_value(&mut self, name: &str, value: f64) -> Result<(), ModelError> {
        let id = self
            .model
            .find_parameter(name)
            .ok_or_else(|| ModelError::missing(SymbolKind::Parameter, name))?;
        let parameter = self
            .model
            .parameters
            .get_mut(id)
            .ok_or_else(|| ModelError::missing(SymbolKind::Parameter, name))?;
        parameter.set_value(value)
    }

    /// Validates and registers a rule.
    pub fn add_rule(&mut self, rule: Rule) -> Result<RuleId, ModelError> {
        ensure_identifier(&rule.name)?;
        if self.model.rule_names.contains_key(&rule.name) {
            return Err(ModelError::DuplicateName {
                kind: SymbolKind::Rule,
                name: rule.name,
            });
        }
        self.validate_rule(&rule)?;

        debug!(
            "Rule {} ({} -> {} complexes, reversible: {})",
            rule.name,
            rule.reactants.complexes().len(),
            rule.products.complexes().len(),
            rule.rate.is_reversible()
        );
        let name = rule.name.clone();
        let id = self.model.rules.insert(rule);
        self.model.rule_names.insert(name, id);
        self.model.rule_order.push(id);
        Ok(id)
    }

    /// Runs `action` against this builder, rolling back every monomer,
    /// parameter and rule it inserted if it fails.
    ///
    /// Parameter value changes made inside the action are not rolled back.
    pub fn transaction<F, R>(&mut self, action: F) -> Result<R, ModelError>
    where
        F: FnOnce(&mut Self) -> Result<R, ModelError>,
    {
        let checkpoint = Checkpoint {
            monomers: self.model.monomer_order.len(),
            parameters: self.model.parameter_order.len(),
            rules: self.model.rule_order.len(),
        };

        match action(self) {
            Ok(result) => Ok(result),
            Err(e) => {
                debug!("Rolling back staged model changes: {}", e);
                self.rollback(checkpoint);
                Err(e)
            }
        }
    }

    fn rollback(&mut self, checkpoint: Checkpoint) {
        let model = &mut self.model;

        for id in model.rule_order.drain(checkpoint.rules..) {
            if let Some(rule) = model.rules.remove(id) {
                model.rule_names.remove(&rule.name);
            }
        }
        for id in model.parameter_order.drain(checkpoint.parameters..) {
            if let Some(parameter) = model.parameters.remove(id) {
                model.parameter_names.remove(&parameter.name);
            }
        }
        for id in model.monomer_order.drain(checkpoint.monomers..) {
            if let Some(monomer) = model.monomers.remove(id) {
                model.monomer_names.remove(&monomer.name);
            }
        }
    }

    fn validate_rule(&self, rule: &Rule) -> Result<(), ModelError> {
        for id in rule.rate.parameters() {
            if self.model.parameter(id).is_none() {
                return Err(ModelError::missing(
                    SymbolKind::Parameter,
                    format!("{:?} (rule '{}')", id, rule.name),
                ));
            }
        }

        for side in [&rule.reactants, &rule.products] {
            for complex in side.complexes() {
                if let Some(&bond) = complex.dangling_bonds().first() {
                    return Err(ModelError::DanglingBond {
                        rule: rule.name.clone(),
                        bond,
                    });
                }
                for monomer in complex.monomers() {
                    self.validate_monomer_pattern(monomer)?;
                }
            }
        }
        Ok(())
    }

    fn validate_monomer_pattern(&self, pattern: &MonomerPattern) -> Result<(), ModelError> {
        let monomer = self.model.require_monomer(pattern.monomer)?;
        for (site_name, condition) in pattern.sites() {
            let site = monomer.site(site_name).ok_or_else(|| {
                ModelError::missing(SymbolKind::Site, format!("{}.{}", monomer.name, site_name))
            })?;

            match (&site.kind, condition) {
                (SiteKind::State(_), SiteCondition::State(value)) => {
                    if !site.has_state(value) {
                        return Err(ModelError::missing(
                            SymbolKind::State,
                            format!("{}.{}~{}", monomer.name, site_name, value),
                        ));
                    }
                }
                (SiteKind::Bond, c) if c.is_bond_condition() => {}
                (SiteKind::Bond, _) => {
                    return Err(ModelError::InvalidPattern(format!(
                        "bond site '{}.{}' cannot hold a state",
                        monomer.name, site_name
                    )));
                }
                (SiteKind::State(_), _) => {
                    return Err(ModelError::InvalidPattern(format!(
                        "state site '{}.{}' cannot hold a bond",
                        monomer.name, site_name
                    )));
                }
            }
        }
        Ok(())
    }
}

fn ensure_identifier(name: &str) -> Result<(), ModelError> {
    if is_valid_identifier(name) {
        Ok(())
    } else {
        Err(ModelError::InvalidName(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::monomer::Site;
    use crate::core::models::pattern::{ComplexPattern, ReactionPattern};
    use crate::core::models::rule::RateLaw;

    fn builder_with_gene() -> (ModelBuilder, MonomerId, MonomerId) {
        let mut builder = ModelBuilder::new();
        let gene = builder
            .add_monomer(MonomerType::new(
                "g_PSA",
                vec![Site::bond("rnap"), Site::bond("tf")],
            ))
            .unwrap();
        let rnap = builder
            .add_monomer(MonomerType::new("RNAp", vec![Site::bond("gene")]))
            .unwrap();
        (builder, gene, rnap)
    }

    fn binding_rule(name: &str, gene: MonomerId, rnap: MonomerId, k: ParameterId) -> Rule {
        Rule::new(
            name,
            ReactionPattern::from(MonomerPattern::new(gene).free("rnap").free("tf"))
                .plus(MonomerPattern::new(rnap).free("gene")),
            ComplexPattern::new(vec![
                MonomerPattern::new(gene).bond("rnap", 1).free("tf"),
                MonomerPattern::new(rnap).bond("gene", 1),
            ]),
            RateLaw::Irreversible(k),
        )
    }

    #[test]
    fn add_monomer_rejects_duplicates_and_bad_declarations() {
        let (mut builder, _, _) = builder_with_gene();

        let duplicate = builder.add_monomer(MonomerType::new("RNAp", vec![]));
        assert!(matches!(
            duplicate,
            Err(ModelError::DuplicateName {
                kind: SymbolKind::Monomer,
                ..
            })
        ));

        let repeated_site =
            builder.add_monomer(MonomerType::new("X", vec![Site::bond("a"), Site::bond("a")]));
        assert!(matches!(
            repeated_site,
            Err(ModelError::DuplicateName {
                kind: SymbolKind::Site,
                ..
            })
        ));

        let empty_states = builder.add_monomer(MonomerType::new("Y", vec![Site::state("s", &[])]));
        assert!(matches!(empty_states, Err(ModelError::InvalidPattern(_))));

        let bad_name = builder.add_monomer(MonomerType::new("9lives", vec![]));
        assert!(matches!(bad_name, Err(ModelError::InvalidName(_))));
        assert_eq!(builder.model().num_monomers(), 2);
    }

    #[test]
    fn add_parameter_enforces_unique_positive_values() {
        let mut builder = ModelBuilder::new();
        builder.add_parameter("kf", 1.0).unwrap();
        assert!(matches!(
            builder.add_parameter("kf", 2.0),
            Err(ModelError::DuplicateName { .. })
        ));
        assert!(matches!(
            builder.add_parameter("kr", 0.0),
            Err(ModelError::InvalidParameter { .. })
        ));
        assert_eq!(builder.model().num_parameters(), 1);
    }

    #[test]
    fn set_parameter_value_updates_existing_parameter() {
        let mut builder = ModelBuilder::new();
        let id = builder.add_parameter("kcat", 1.0).unwrap();
        builder.set_parameter_value("kcat", 3.5).unwrap();
        assert_eq!(builder.model().parameter(id).unwrap().value(), 3.5);
        assert!(matches!(
            builder.set_parameter_value("missing", 1.0),
            Err(ModelError::MissingSymbol {
                kind: SymbolKind::Parameter,
                ..
            })
        ));
    }

    #[test]
    fn add_rule_accepts_well_formed_rule() {
        let (mut builder, gene, rnap) = builder_with_gene();
        let k = builder.add_parameter("k", 1.0).unwrap();
        let id = builder.add_rule(binding_rule("bind", gene, rnap, k)).unwrap();

        assert_eq!(builder.model().find_rule("bind"), Some(id));
        assert_eq!(builder.model().num_rules(), 1);
        assert!(matches!(
            builder.add_rule(binding_rule("bind", gene, rnap, k)),
            Err(ModelError::DuplicateName {
                kind: SymbolKind::Rule,
                ..
            })
        ));
    }

    #[test]
    fn add_rule_rejects_dangling_bonds() {
        let (mut builder, gene, rnap) = builder_with_gene();
        let k = builder.add_parameter("k", 1.0).unwrap();
        let rule = Rule::new(
            "broken",
            MonomerPattern::new(gene).bond("rnap", 1),
            MonomerPattern::new(rnap).free("gene"),
            RateLaw::Irreversible(k),
        );
        assert_eq!(
            builder.add_rule(rule),
            Err(ModelError::DanglingBond {
                rule: "broken".to_string(),
                bond: 1
            })
        );
    }

    #[test]
    fn add_rule_rejects_unknown_sites_states_and_kind_mismatches() {
        let (mut builder, gene, _) = builder_with_gene();
        let mrna = builder
            .add_monomer(MonomerType::new(
                "mRNA_PSA",
                vec![Site::bond("eif4e"), Site::state("elong", &["i", "a"])],
            ))
            .unwrap();
        let k = builder.add_parameter("k", 1.0).unwrap();

        let unknown_site = Rule::new(
            "r1",
            MonomerPattern::new(gene).free("promoter"),
            ReactionPattern::empty(),
            RateLaw::Irreversible(k),
        );
        assert!(matches!(
            builder.add_rule(unknown_site),
            Err(ModelError::MissingSymbol {
                kind: SymbolKind::Site,
                ..
            })
        ));

        let unknown_state = Rule::new(
            "r2",
            MonomerPattern::new(mrna).state("elong", "x"),
            ReactionPattern::empty(),
            RateLaw::Irreversible(k),
        );
        assert!(matches!(
            builder.add_rule(unknown_state),
            Err(ModelError::MissingSymbol {
                kind: SymbolKind::State,
                ..
            })
        ));

        let state_on_bond_site = Rule::new(
            "r3",
            MonomerPattern::new(mrna).state("eif4e", "i"),
            ReactionPattern::empty(),
            RateLaw::Irreversible(k),
        );
        assert!(matches!(
            builder.add_rule(state_on_bond_site),
            Err(ModelError::InvalidPattern(_))
        ));

        let bond_on_state_site = Rule::new(
            "r4",
            MonomerPattern::new(mrna).free("elong"),
            ReactionPattern::empty(),
            RateLaw::Irreversible(k),
        );
        assert!(matches!(
            builder.add_rule(bond_on_state_site),
            Err(ModelError::InvalidPattern(_))
        ));
        assert_eq!(builder.model().num_rules(), 0);
    }

    #[test]
    fn transaction_rolls_back_all_insertions_on_error() {
        let (mut builder, gene, rnap) = builder_with_gene();
        builder.add_parameter("k_existing", 1.0).unwrap();

        let result: Result<(), ModelError> = builder.transaction(|b| {
            let k = b.add_parameter("k_new", 1.0)?;
            b.add_rule(binding_rule("bind", gene, rnap, k))?;
            b.add_monomer(MonomerType::new("Extra", vec![]))?;
            b.add_parameter("k_existing", 2.0)?;
            Ok(())
        });

        assert!(matches!(result, Err(ModelError::DuplicateName { .. })));
        let model = builder.model();
        assert_eq!(model.num_parameters(), 1);
        assert_eq!(model.num_rules(), 0);
        assert_eq!(model.num_monomers(), 2);
        assert!(model.find_parameter("k_new").is_none());
        assert!(model.find_rule("bind").is_none());
        assert!(model.find_monomer("Extra").is_none());
        assert!(model.find_parameter("k_existing").is_some());
    }

    #[test]
    fn transaction_commits_on_success() {
        let (mut builder, gene, rnap) = builder_with_gene();
        let rule_id = builder
            .transaction(|b| {
                let k = b.add_parameter("k", 1.0)?;
                b.add_rule(binding_rule("bind", gene, rnap, k))
            })
            .unwrap();
        assert_eq!(builder.model().find_rule("bind"), Some(rule_id));
        assert_eq!(builder.build().num_parameters(), 1);
    }
}
