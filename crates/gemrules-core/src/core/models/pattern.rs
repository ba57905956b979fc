use super::ids::MonomerId;
use std::collections::BTreeMap;

/// Bond identifiers are local to the pattern that carries them.
pub type BondId = u32;

/// The constraint a pattern places on one site of a monomer instance.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SiteCondition {
    /// Bond site with no bond.
    Free,
    /// Bond site joined to the one other site carrying the same id.
    Bond(BondId),
    /// Bond site bound to some unspecified partner.
    Occupied,
    /// Bond site that may or may not be bound.
    Wild,
    /// State site holding the given value.
    State(String),
}

impl SiteCondition {
    pub fn is_bond_condition(&self) -> bool {
        !matches!(self, Self::State(_))
    }
}

/// One monomer instance inside a pattern.
///
/// Sites keep the order in which they were constrained; sites that are never
/// mentioned are unconstrained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonomerPattern {
    pub monomer: MonomerId,
    sites: Vec<(String, SiteCondition)>,
}

impl MonomerPattern {
    pub fn new(monomer: MonomerId) -> Self {
        Self {
            monomer,
            sites: Vec::new(),
        }
    }

    /// Sets the condition for `site`, replacing any earlier one.
    pub fn with(mut self, site: &str, condition: SiteCondition) -> Self {
        self.set(site, condition);
        self
    }

    pub fn free(self, site: &str) -> Self {
        self.with(site, SiteCondition::Free)
    }

    pub fn bond(self, site: &str, id: BondId) -> Self {
        self.with(site, SiteCondition::Bond(id))
    }

    pub fn state(self, site: &str, value: &str) -> Self {
        self.with(site, SiteCondition::State(value.to_string()))
    }

    pub fn set(&mut self, site: &str, condition: SiteCondition) {
        match self.sites.iter_mut().find(|(name, _)| name == site) {
            Some((_, existing)) => *existing = condition,
            None => self.sites.push((site.to_string(), condition)),
        }
    }

    pub fn sites(&self) -> &[(String, SiteCondition)] {
        &self.sites
    }

    pub fn condition(&self, site: &str) -> Option<&SiteCondition> {
        self.sites
            .iter()
            .find(|(name, _)| name == site)
            .map(|(_, condition)| condition)
    }

    pub fn bonds(&self) -> impl Iterator<Item = (&str, BondId)> {
        self.sites.iter().filter_map(|(site, condition)| match condition {
            SiteCondition::Bond(id) => Some((site.as_str(), *id)),
            _ => None,
        })
    }
}

/// A (possibly bonded) multiset of monomer instances. Shared bond ids encode
/// the edges of the complex.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ComplexPattern {
    monomers: Vec<MonomerPattern>,
}

impl ComplexPattern {
    pub fn new(monomers: Vec<MonomerPattern>) -> Self {
        Self { monomers }
    }

    pub fn monomers(&self) -> &[MonomerPattern] {
        &self.monomers
    }

    pub fn monomer_mut(&mut self, index: usize) -> Option<&mut MonomerPattern> {
        self.monomers.get_mut(index)
    }

    pub fn len(&self) -> usize {
        self.monomers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.monomers.is_empty()
    }

    /// Appends a monomer instance to the complex.
    pub fn join(mut self, monomer: MonomerPattern) -> Self {
        self.monomers.push(monomer);
        self
    }

    /// Appends every monomer instance of `other`, keeping its bond ids as-is.
    pub fn merge(mut self, other: ComplexPattern) -> Self {
        self.monomers.extend(other.monomers);
        self
    }

    /// The largest bond id in use, or 0 for an unbonded pattern.
    pub fn max_bond_id(&self) -> BondId {
        self.monomers
            .iter()
            .flat_map(|m| m.bonds().map(|(_, id)| id))
            .max()
            .unwrap_or(0)
    }

    /// Groups bond endpoints by bond id as `(monomer index, site)` pairs.
    pub fn bond_endpoints(&self) -> BTreeMap<BondId, Vec<(usize, &str)>> {
        let mut endpoints: BTreeMap<BondId, Vec<(usize, &str)>> = BTreeMap::new();
        for (index, monomer) in self.monomers.iter().enumerate() {
            for (site, id) in monomer.bonds() {
                endpoints.entry(id).or_default().push((index, site));
            }
        }
        endpoints
    }

    /// Bond ids that do not appear on exactly two sites of two distinct
    /// monomer instances.
    pub fn dangling_bonds(&self) -> Vec<BondId> {
        self.bond_endpoints()
            .into_iter()
            .filter(|(_, ends)| ends.len() != 2 || ends[0].0 == ends[1].0)
            .map(|(id, _)| id)
            .collect()
    }

    /// Describes every bond by the typed sites it joins, independent of the
    /// local bond numbering.
    pub fn bond_signatures(&self) -> Vec<BondSignature> {
        self.bond_endpoints()
            .into_values()
            .filter(|ends| ends.len() == 2)
            .map(|ends| {
                let a = (self.monomers[ends[0].0].monomer, ends[0].1.to_string());
                let b = (self.monomers[ends[1].0].monomer, ends[1].1.to_string());
                BondSignature::new(a, b)
            })
            .collect()
    }
}

impl From<MonomerPattern> for ComplexPattern {
    fn from(monomer: MonomerPattern) -> Self {
        Self::new(vec![monomer])
    }
}

/// One side of a rule: a sum of disconnected complex patterns. May be empty,
/// as on the product side of a degradation rule.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ReactionPattern {
    complexes: Vec<ComplexPattern>,
}

impl ReactionPattern {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn new(complexes: Vec<ComplexPattern>) -> Self {
        Self { complexes }
    }

    pub fn plus(mut self, complex: impl Into<ComplexPattern>) -> Self {
        self.complexes.push(complex.into());
        self
    }

    pub fn complexes(&self) -> &[ComplexPattern] {
        &self.complexes
    }

    pub fn is_empty(&self) -> bool {
        self.complexes.is_empty()
    }

    pub fn monomer_count(&self) -> usize {
        self.complexes.iter().map(ComplexPattern::len).sum()
    }

    /// Sorted bond signatures across every complex on this side.
    pub fn bond_signatures(&self) -> Vec<BondSignature> {
        let mut signatures: Vec<BondSignature> = self
            .complexes
            .iter()
            .flat_map(ComplexPattern::bond_signatures)
            .collect();
        signatures.sort();
        signatures
    }
}

impl From<ComplexPattern> for ReactionPattern {
    fn from(complex: ComplexPattern) -> Self {
        Self::new(vec![complex])
    }
}

impl From<MonomerPattern> for ReactionPattern {
    fn from(monomer: MonomerPattern) -> Self {
        Self::new(vec![monomer.into()])
    }
}

/// A bond described by its two `(monomer type, site)` endpoints, stored in
/// canonical order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BondSignature {
    pub a: (MonomerId, String),
    pub b: (MonomerId, String),
}

impl BondSignature {
    pub fn new(a: (MonomerId, String), b: (MonomerId, String)) -> Self {
        if a <= b { Self { a, b } } else { Self { a: b, b: a } }
    }
}
