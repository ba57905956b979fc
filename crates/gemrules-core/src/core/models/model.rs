use super::ids::{MonomerId, ParameterId, RuleId};
use super::monomer::MonomerType;
use super::parameter::Parameter;
use super::rule::Rule;
use crate::core::error::{ModelError, SymbolKind};
use slotmap::SlotMap;
use std::collections::HashMap;

/// The model registry: every declared monomer type, rate parameter and rule.
///
/// A `Model` is read-only; all mutation goes through
/// [`ModelBuilder`](super::builder::ModelBuilder). Iteration always follows
/// declaration order so exports are deterministic.
#[derive(Debug, Clone, Default)]
pub struct Model {
    pub(super) monomers: SlotMap<MonomerId, MonomerType>,
    pub(super) monomer_names: HashMap<String, MonomerId>,
    pub(super) monomer_order: Vec<MonomerId>,

    pub(super) parameters: SlotMap<ParameterId, Parameter>,
    pub(super) parameter_names: HashMap<String, ParameterId>,
    pub(super) parameter_order: Vec<ParameterId>,

    pub(super) rules: SlotMap<RuleId, Rule>,
    pub(super) rule_names: HashMap<String, RuleId>,
    pub(super) rule_order: Vec<RuleId>,
}

impl Model {
    /// Retrieves a monomer type by its ID.
    pub fn monomer(&self, id: MonomerId) -> Option<&MonomerType> {
        self.monomers.get(id)
    }

    /// Retrieves a monomer type by its ID, failing with a missing-symbol error.
    pub fn require_monomer(&self, id: MonomerId) -> Result<&MonomerType, ModelError> {
        self.monomers
            .get(id)
            .ok_or_else(|| ModelError::missing(SymbolKind::Monomer, format!("{:?}", id)))
    }

    pub fn find_monomer(&self, name: &str) -> Option<MonomerId> {
        self.monomer_names.get(name).copied()
    }

    /// Looks a monomer type up by name, failing with a missing-symbol error.
    pub fn monomer_id(&self, name: &str) -> Result<MonomerId, ModelError> {
        self.find_monomer(name)
            .ok_or_else(|| ModelError::missing(SymbolKind::Monomer, name))
    }

    /// Monomer types in declaration order.
    pub fn monomers(&self) -> impl Iterator<Item = (MonomerId, &MonomerType)> {
        self.monomer_order
            .iter()
            .filter_map(|&id| self.monomers.get(id).map(|m| (id, m)))
    }

    pub fn parameter(&self, id: ParameterId) -> Option<&Parameter> {
        self.parameters.get(id)
    }

    pub fn find_parameter(&self, name: &str) -> Option<ParameterId> {
        self.parameter_names.get(name).copied()
    }

    /// Parameters in creation order.
    pub fn parameters(&self) -> impl Iterator<Item = (ParameterId, &Parameter)> {
        self.parameter_order
            .iter()
            .filter_map(|&id| self.parameters.get(id).map(|p| (id, p)))
    }

    pub fn rule(&self, id: RuleId) -> Option<&Rule> {
        self.rules.get(id)
    }

    pub fn find_rule(&self, name: &str) -> Option<RuleId> {
        self.rule_names.get(name).copied()
    }

    /// Convenience lookup of a rule by name.
    pub fn rule_named(&self, name: &str) -> Option<&Rule> {
        self.find_rule(name).and_then(|id| self.rules.get(id))
    }

    /// Rules in creation order.
    pub fn rules(&self) -> impl Iterator<Item = (RuleId, &Rule)> {
        self.rule_order
            .iter()
            .filter_map(|&id| self.rules.get(id).map(|r| (id, r)))
    }

    pub fn num_monomers(&self) -> usize {
        self.monomer_order.len()
    }

    pub fn num_parameters(&self) -> usize {
        self.parameter_order.len()
    }

    pub fn num_rules(&self) -> usize {
        self.rule_order.len()
    }
}
