use super::ids::ParameterId;
use super::pattern::{BondSignature, ReactionPattern};

/// Mass-action rate law attached to a rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateLaw {
    /// Binding/unbinding pair with forward and reverse constants.
    Reversible {
        forward: ParameterId,
        reverse: ParameterId,
    },
    /// One-way conversion or degradation.
    Irreversible(ParameterId),
    /// One-way rewrite in which the catalyst complex reappears unchanged on the
    /// product side.
    Catalytic(ParameterId),
}

impl RateLaw {
    pub fn is_reversible(&self) -> bool {
        matches!(self, Self::Reversible { .. })
    }

    pub fn parameters(&self) -> Vec<ParameterId> {
        match *self {
            Self::Reversible { forward, reverse } => vec![forward, reverse],
            Self::Irreversible(rate) | Self::Catalytic(rate) => vec![rate],
        }
    }
}

/// A named transformation from a reactant pattern to a product pattern.
#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    pub name: String,
    pub reactants: ReactionPattern,
    pub products: ReactionPattern,
    pub rate: RateLaw,
}

/// Bonds a rule breaks and forms, described by typed endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BondChanges {
    pub broken: Vec<BondSignature>,
    pub formed: Vec<BondSignature>,
}

impl BondChanges {
    pub fn is_empty(&self) -> bool {
        self.broken.is_empty() && self.formed.is_empty()
    }
}

impl Rule {
    pub fn new(
        name: &str,
        reactants: impl Into<ReactionPattern>,
        products: impl Into<ReactionPattern>,
        rate: RateLaw,
    ) -> Self {
        Self {
            name: name.to_string(),
            reactants: reactants.into(),
            products: products.into(),
            rate,
        }
    }

    /// Multiset difference of bond signatures between the two sides.
    pub fn bond_changes(&self) -> BondChanges {
        let before = self.reactants.bond_signatures();
        let after = self.products.bond_signatures();
        BondChanges {
            broken: multiset_difference(&before, &after),
            formed: multiset_difference(&after, &before),
        }
    }
}

fn multiset_difference(left: &[BondSignature], right: &[BondSignature]) -> Vec<BondSignature> {
    let mut remaining = right.to_vec();
    let mut difference = Vec::new();
    for signature in left {
        match remaining.iter().position(|s| s == signature) {
            Some(pos) => {
                remaining.swap_remove(pos);
            }
            None => difference.push(signature.clone()),
        }
    }
    difference
}
