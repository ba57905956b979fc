use super::ids::MonomerId;
use super::pattern::{MonomerPattern, SiteCondition};

/// The two flavours of site a monomer can declare.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SiteKind {
    /// Holds zero or one bond to a site on another monomer instance.
    Bond,
    /// Holds one value from a fixed, ordered enumeration.
    State(Vec<String>),
}

/// A named attribute (port) of a monomer type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Site {
    pub name: String,
    pub kind: SiteKind,
}

impl Site {
    pub fn bond(name: &str) -> Self {
        Self {
            name: name.to_string(),
            kind: SiteKind::Bond,
        }
    }

    pub fn state(name: &str, values: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            kind: SiteKind::State(values.iter().map(|v| v.to_string()).collect()),
        }
    }

    pub fn is_bond(&self) -> bool {
        matches!(self.kind, SiteKind::Bond)
    }

    /// The enumerated values of a state site; empty for bond sites.
    pub fn states(&self) -> &[String] {
        match &self.kind {
            SiteKind::Bond => &[],
            SiteKind::State(values) => values,
        }
    }

    pub fn has_state(&self, value: &str) -> bool {
        self.states().iter().any(|s| s == value)
    }

    /// The first enumerated value; newly synthesized monomers start here.
    pub fn default_state(&self) -> Option<&str> {
        self.states().first().map(String::as_str)
    }
}

/// A named species type with an ordered set of sites.
///
/// Monomer types are declared once, before any rule generation, and are never
/// mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonomerType {
    pub name: String,
    sites: Vec<Site>,
}

impl MonomerType {
    pub fn new(name: &str, sites: Vec<Site>) -> Self {
        Self {
            name: name.to_string(),
            sites,
        }
    }

    pub fn sites(&self) -> &[Site] {
        &self.sites
    }

    pub fn site(&self, name: &str) -> Option<&Site> {
        self.sites.iter().find(|s| s.name == name)
    }

    pub fn has_site(&self, name: &str) -> bool {
        self.site(name).is_some()
    }

    pub fn has_bond_site(&self, name: &str) -> bool {
        self.site(name).is_some_and(Site::is_bond)
    }

    /// Builds the fully-unbound default instance of this type: every bond site
    /// free, every state site at its first enumerated value.
    pub fn default_pattern(&self, id: MonomerId) -> MonomerPattern {
        self.sites
            .iter()
            .fold(MonomerPattern::new(id), |pattern, site| match &site.kind {
                SiteKind::Bond => pattern.with(&site.name, SiteCondition::Free),
                SiteKind::State(_) => match site.default_state() {
                    Some(first) => pattern.state(&site.name, first),
                    None => pattern,
                },
            })
    }
}
