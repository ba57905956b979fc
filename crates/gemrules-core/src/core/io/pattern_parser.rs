use crate::core::models::model::Model;
use crate::core::models::pattern::{BondId, ComplexPattern, MonomerPattern, SiteCondition};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PatternParseError {
    #[error("Pattern is empty")]
    Empty,
    #[error("Unknown monomer type '{0}'")]
    UnknownMonomer(String),
    #[error("Malformed monomer pattern '{text}': {reason}")]
    Malformed { text: String, reason: String },
    #[error("Invalid bond label '{label}' on site '{site}'")]
    InvalidBond { site: String, label: String },
}

/// Parses a BNGL complex pattern such as `AR(lig!2,gene,state~p).DHT(b!2)`.
///
/// Monomer names are resolved against `model`. Site names and state values
/// are taken verbatim; they are checked when a rule using the pattern is
/// registered.
pub fn parse_complex(model: &Model, text: &str) -> Result<ComplexPattern, PatternParseError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(PatternParseError::Empty);
    }

    let monomers = split_monomers(text)?
        .into_iter()
        .map(|part| parse_monomer(model, part))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(ComplexPattern::new(monomers))
}

/// Splits on `.` outside parentheses.
fn split_monomers(text: &str) -> Result<Vec<&str>, PatternParseError> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (i, c) in text.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth = depth.checked_sub(1).ok_or_else(|| malformed(text, "unbalanced ')'"))?;
            }
            '.' if depth == 0 => {
                parts.push(&text[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    if depth != 0 {
        return Err(malformed(text, "unclosed '('"));
    }
    parts.push(&text[start..]);
    Ok(parts)
}

fn parse_monomer(model: &Model, text: &str) -> Result<MonomerPattern, PatternParseError> {
    let text = text.trim();
    let (name, body) = match text.find('(') {
        Some(open) => {
            let body = text[open + 1..]
                .strip_suffix(')')
                .ok_or_else(|| malformed(text, "expected ')' at end"))?;
            (text[..open].trim(), body)
        }
        None => (text, ""),
    };
    if name.is_empty() {
        return Err(malformed(text, "missing monomer name"));
    }

    let id = model
        .find_monomer(name)
        .ok_or_else(|| PatternParseError::UnknownMonomer(name.to_string()))?;

    let mut pattern = MonomerPattern::new(id);
    for site in body.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        let (site_name, condition) = parse_site(text, site)?;
        if pattern.condition(site_name).is_some() {
            return Err(malformed(text, &format!("site '{}' repeated", site_name)));
        }
        pattern.set(site_name, condition);
    }
    Ok(pattern)
}

fn parse_site<'a>(monomer: &str, site: &'a str) -> Result<(&'a str, SiteCondition), PatternParseError> {
    if let Some((name, value)) = site.split_once('~') {
        if value.is_empty() || value.contains(['~', '!']) {
            return Err(malformed(monomer, &format!("bad state on '{}'", name)));
        }
        return Ok((name, SiteCondition::State(value.to_string())));
    }

    let Some((name, label)) = site.split_once('!') else {
        return Ok((site, SiteCondition::Free));
    };
    let condition = match label {
        "+" => SiteCondition::Occupied,
        "?" => SiteCondition::Wild,
        _ => label
            .parse::<BondId>()
            .map(SiteCondition::Bond)
            .map_err(|_| PatternParseError::InvalidBond {
                site: name.to_string(),
                label: label.to_string(),
            })?,
    };
    Ok((name, condition))
}

fn malformed(text: &str, reason: &str) -> PatternParseError {
    PatternParseError::Malformed {
        text: text.to_string(),
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::builder::ModelBuilder;
    use crate::core::models::monomer::{MonomerType, Site};

    fn model() -> ModelBuilder {
        let mut builder = ModelBuilder::new();
        builder
            .add_monomer(MonomerType::new(
                "AR",
                vec![
                    Site::bond("lig"),
                    Site::bond("ar"),
                    Site::bond("gene"),
                    Site::state("state", &["u", "p"]),
                ],
            ))
            .unwrap();
        builder
            .add_monomer(MonomerType::new("DHT", vec![Site::bond("b")]))
            .unwrap();
        builder
    }

    #[test]
    fn parses_dimer_with_internal_bonds() {
        let builder = model();
        let pattern = parse_complex(
            builder.model(),
            "AR(lig,ar!1,gene,state~p).AR(lig,ar!1,gene,state~p)",
        )
        .unwrap();

        assert_eq!(pattern.len(), 2);
        let first = &pattern.monomers()[0];
        assert_eq!(first.condition("lig"), Some(&SiteCondition::Free));
        assert_eq!(first.condition("ar"), Some(&SiteCondition::Bond(1)));
        assert_eq!(
            first.condition("state"),
            Some(&SiteCondition::State("p".to_string()))
        );
        assert!(pattern.dangling_bonds().is_empty());
        assert_eq!(pattern.max_bond_id(), 1);
    }

    #[test]
    fn parses_wildcards_and_keeps_site_order() {
        let builder = model();
        let pattern = parse_complex(builder.model(), " AR( gene!? , lig!+ ) ").unwrap();
        let sites: Vec<_> = pattern.monomers()[0]
            .sites()
            .iter()
            .map(|(name, condition)| (name.as_str(), condition.clone()))
            .collect();
        assert_eq!(
            sites,
            [
                ("gene", SiteCondition::Wild),
                ("lig", SiteCondition::Occupied)
            ]
        );
    }

    #[test]
    fn bare_name_is_unconstrained_monomer() {
        let builder = model();
        let pattern = parse_complex(builder.model(), "DHT").unwrap();
        assert!(pattern.monomers()[0].sites().is_empty());
    }

    #[test]
    fn rejects_unknown_monomer() {
        let builder = model();
        assert_eq!(
            parse_complex(builder.model(), "ETS(gene)"),
            Err(PatternParseError::UnknownMonomer("ETS".to_string()))
        );
    }

    #[test]
    fn rejects_malformed_text() {
        let builder = model();
        for text in ["", "AR(gene", "AR(gene))", "AR(gene).", "AR(gene,gene)", "AR(state~)"] {
            assert!(parse_complex(builder.model(), text).is_err(), "{:?}", text);
        }
        assert!(matches!(
            parse_complex(builder.model(), "AR(gene!x)"),
            Err(PatternParseError::InvalidBond { .. })
        ));
    }
}
