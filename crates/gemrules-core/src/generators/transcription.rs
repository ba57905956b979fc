//! Transcription rule templates.
//!
//! Transcription scheme for a gene `g`:
//!
//! | reaction | description |
//! |---|---|
//! | `g + RNAp <-> g-RNAp` | RNA polymerase binds the free gene |
//! | `g-RNAp -> g-RNAp + mRNA` | basal transcription |
//! | `g + TF <-> g-TF` | transcription factor binds the free gene |
//! | `g-TF + RNAp <-> g-TF-RNAp` | factor-gated polymerase recruitment |
//! | `g-TF-RNAp -> g-TF-RNAp + mRNA` | factor-gated transcription |
//! | `mRNA -> 0` | decay of free mRNA |
//!
//! Basal polymerase binding and factor binding both require the polymerase
//! site and every factor slot to be free, so they compete for the same gene
//! molecule without any explicit coordination between rules.

use super::kinetics::{RatePair, RateTriple};
use super::units::{
    FACTOR_GENE_SITE, GENE_POLYMERASE_SITE, POLYMERASE_GENE_SITE, ProteinTranscriptionUnit,
    free_mrna,
};
use crate::core::error::{ModelError, SymbolKind};
use crate::core::models::builder::ModelBuilder;
use crate::core::models::ids::ParameterId;
use crate::core::models::model::Model;
use crate::core::models::pattern::{
    BondId, ComplexPattern, MonomerPattern, ReactionPattern, SiteCondition,
};
use crate::core::models::rule::{RateLaw, Rule};
use crate::core::naming;
use tracing::{info, instrument};

/// A regulatory complex allowed to occupy one of the gene's factor slots.
#[derive(Debug, Clone, PartialEq)]
pub struct TranscriptionFactor {
    /// Display name used in parameter and rule names. Must be unique per gene.
    pub name: String,
    /// The complex as it exists free in solution; its internal bonds are kept.
    pub pattern: ComplexPattern,
    /// `kon`/`koff` of the factor binding the gene.
    pub binding: RatePair,
    /// `kf`/`kr`/`kcat` of polymerase recruitment and transcription while bound.
    pub transcription: RateTriple,
    /// Index of the pattern member that binds the gene. Defaults to the first
    /// member whose type declares a `gene` site.
    pub gene_binder: Option<usize>,
    /// Gene slot the factor occupies. Defaults to the gene's first factor slot.
    pub slot: Option<String>,
}

impl TranscriptionFactor {
    pub fn new(
        name: &str,
        pattern: impl Into<ComplexPattern>,
        binding: RatePair,
        transcription: RateTriple,
    ) -> Self {
        Self {
            name: name.to_string(),
            pattern: pattern.into(),
            binding,
            transcription,
            gene_binder: None,
            slot: None,
        }
    }

    pub fn bound_through(mut self, index: usize) -> Self {
        self.gene_binder = Some(index);
        self
    }

    pub fn in_slot(mut self, slot: &str) -> Self {
        self.slot = Some(slot.to_string());
        self
    }
}

/// Emits basal transcription, mRNA decay, and one gated pathway per factor.
///
/// Produces `3 + 3 * factors.len()` rules and `4 + 5 * factors.len()`
/// parameters. Nothing is committed if any step fails.
///
/// # Errors
///
/// * `MissingSymbol` if a factor's gene-binding member or slot does not exist.
/// * `DuplicateName` if rules for this gene (or a factor name) already exist.
/// * `InvalidParameter` if any rate is not positive and finite.
/// * `InvalidPattern` if a factor's bond ids leave no room for the two gene
///   bonds.
#[instrument(skip_all, name = "transcription_rules")]
pub fn generate_transcription<'a>(
    builder: &'a mut ModelBuilder,
    unit: &ProteinTranscriptionUnit,
    basal: RateTriple,
    mrna_decay: f64,
    factors: &[TranscriptionFactor],
) -> Result<&'a mut ModelBuilder, ModelError> {
    let gene = builder.model().require_monomer(unit.gene)?.name.clone();
    let mrna = builder.model().require_monomer(unit.mrna)?.name.clone();

    builder.transaction(|b| {
        emit_basal_pathway(b, unit, &gene, basal)?;
        emit_mrna_decay(b, unit, &mrna, mrna_decay)?;
        for factor in factors {
            emit_factor_pathway(b, unit, &gene, factor)?;
        }
        Ok(())
    })?;

    info!(
        "Generated transcription rules for {} ({} transcription factor(s)).",
        gene,
        factors.len()
    );
    Ok(builder)
}

fn emit_basal_pathway(
    b: &mut ModelBuilder,
    unit: &ProteinTranscriptionUnit,
    gene: &str,
    rates: RateTriple,
) -> Result<(), ModelError> {
    let [kf_name, kr_name, kcat_name] = naming::basal_rate_names(gene);
    let kf = b.add_parameter(&kf_name, rates.forward)?;
    let kr = b.add_parameter(&kr_name, rates.reverse)?;
    let kcat = b.add_parameter(&kcat_name, rates.catalytic)?;

    let free_gene = gene_pattern(unit, SiteCondition::Free, None);
    let gene_rnap = ComplexPattern::new(vec![
        gene_pattern(unit, SiteCondition::Bond(1), None),
        polymerase(unit, SiteCondition::Bond(1)),
    ]);

    b.add_rule(Rule::new(
        &naming::basal_binding_rule(gene),
        ReactionPattern::from(free_gene).plus(polymerase(unit, SiteCondition::Free)),
        gene_rnap.clone(),
        RateLaw::Reversible {
            forward: kf,
            reverse: kr,
        },
    ))?;
    b.add_rule(transcription_rule(
        &naming::basal_transcription_rule(gene),
        unit,
        gene_rnap,
        kcat,
    ))?;
    Ok(())
}

fn emit_mrna_decay(
    b: &mut ModelBuilder,
    unit: &ProteinTranscriptionUnit,
    mrna: &str,
    rate: f64,
) -> Result<(), ModelError> {
    let kdeg = b.add_parameter(&naming::mrna_decay_rate(mrna), rate)?;
    b.add_rule(Rule::new(
        &naming::mrna_decay_rule(mrna),
        free_mrna(unit.mrna),
        ReactionPattern::empty(),
        RateLaw::Irreversible(kdeg),
    ))?;
    Ok(())
}

fn emit_factor_pathway(
    b: &mut ModelBuilder,
    unit: &ProteinTranscriptionUnit,
    gene: &str,
    factor: &TranscriptionFactor,
) -> Result<(), ModelError> {
    let binder = gene_binder_index(b.model(), factor)?;
    let slot = factor_slot(b.model(), unit, factor)?;

    // Fresh bond ids above the factor's internal bonds.
    let exhausted = || {
        ModelError::InvalidPattern(format!(
            "bond ids of transcription factor '{}' leave no room for gene bonds",
            factor.name
        ))
    };
    let factor_bond: BondId = factor
        .pattern
        .max_bond_id()
        .checked_add(1)
        .ok_or_else(exhausted)?;
    let polymerase_bond: BondId = factor_bond.checked_add(1).ok_or_else(exhausted)?;

    let free_factor = with_gene_site(&factor.pattern, binder, SiteCondition::Free);
    let bound_factor = with_gene_site(&factor.pattern, binder, SiteCondition::Bond(factor_bond));

    let gene_factor = ComplexPattern::from(gene_pattern(
        unit,
        SiteCondition::Free,
        Some((slot, factor_bond)),
    ))
    .merge(bound_factor.clone());
    let gene_factor_rnap = ComplexPattern::from(gene_pattern(
        unit,
        SiteCondition::Bond(polymerase_bond),
        Some((slot, factor_bond)),
    ))
    .merge(bound_factor)
    .join(polymerase(unit, SiteCondition::Bond(polymerase_bond)));

    let [kon_name, koff_name] = naming::factor_binding_rate_names(gene, &factor.name);
    let kon = b.add_parameter(&kon_name, factor.binding.forward)?;
    let koff = b.add_parameter(&koff_name, factor.binding.reverse)?;
    b.add_rule(Rule::new(
        &naming::factor_binding_rule(gene, &factor.name),
        ReactionPattern::from(gene_pattern(unit, SiteCondition::Free, None)).plus(free_factor),
        gene_factor.clone(),
        RateLaw::Reversible {
            forward: kon,
            reverse: koff,
        },
    ))?;

    let [kf_name, kr_name, kcat_name] = naming::factor_rate_names(gene, &factor.name);
    let kf = b.add_parameter(&kf_name, factor.transcription.forward)?;
    let kr = b.add_parameter(&kr_name, factor.transcription.reverse)?;
    let kcat = b.add_parameter(&kcat_name, factor.transcription.catalytic)?;
    b.add_rule(Rule::new(
        &naming::factor_polymerase_rule(gene, &factor.name),
        ReactionPattern::from(gene_factor).plus(polymerase(unit, SiteCondition::Free)),
        gene_factor_rnap.clone(),
        RateLaw::Reversible {
            forward: kf,
            reverse: kr,
        },
    ))?;
    b.add_rule(transcription_rule(
        &naming::factor_transcription_rule(gene, &factor.name),
        unit,
        gene_factor_rnap,
        kcat,
    ))?;
    Ok(())
}

/// The transcribing complex persists unchanged and releases one new mRNA.
fn transcription_rule(
    name: &str,
    unit: &ProteinTranscriptionUnit,
    complex: ComplexPattern,
    kcat: ParameterId,
) -> Rule {
    Rule::new(
        name,
        complex.clone(),
        ReactionPattern::from(complex).plus(free_mrna(unit.mrna)),
        RateLaw::Catalytic(kcat),
    )
}

/// The gene with its polymerase site set to `polymerase` and every factor
/// slot free except the optionally occupied one.
fn gene_pattern(
    unit: &ProteinTranscriptionUnit,
    polymerase: SiteCondition,
    occupied: Option<(&str, BondId)>,
) -> MonomerPattern {
    unit.factor_slots.iter().fold(
        MonomerPattern::new(unit.gene).with(GENE_POLYMERASE_SITE, polymerase),
        |pattern, slot| match occupied {
            Some((occupied_slot, bond)) if occupied_slot == slot => pattern.bond(slot, bond),
            _ => pattern.free(slot),
        },
    )
}

fn polymerase(unit: &ProteinTranscriptionUnit, gene_site: SiteCondition) -> MonomerPattern {
    MonomerPattern::new(unit.rna_polymerase).with(POLYMERASE_GENE_SITE, gene_site)
}

fn with_gene_site(pattern: &ComplexPattern, binder: usize, condition: SiteCondition) -> ComplexPattern {
    let mut pattern = pattern.clone();
    if let Some(member) = pattern.monomer_mut(binder) {
        member.set(FACTOR_GENE_SITE, condition);
    }
    pattern
}

fn gene_binder_index(model: &Model, factor: &TranscriptionFactor) -> Result<usize, ModelError> {
    let has_gene_site = |index: usize| -> Result<bool, ModelError> {
        let member = &factor.pattern.monomers()[index];
        Ok(model
            .require_monomer(member.monomer)?
            .has_bond_site(FACTOR_GENE_SITE))
    };
    let missing = || {
        ModelError::missing(
            SymbolKind::Site,
            format!("{}.{}", factor.name, FACTOR_GENE_SITE),
        )
    };

    match factor.gene_binder {
        Some(index) if index < factor.pattern.len() => {
            if has_gene_site(index)? {
                Ok(index)
            } else {
                Err(missing())
            }
        }
        Some(_) => Err(missing()),
        None => {
            for index in 0..factor.pattern.len() {
                if has_gene_site(index)? {
                    return Ok(index);
                }
            }
            Err(missing())
        }
    }
}

fn factor_slot<'u>(
    model: &Model,
    unit: &'u ProteinTranscriptionUnit,
    factor: &TranscriptionFactor,
) -> Result<&'u str, ModelError> {
    let requested = factor.slot.as_deref();
    let slot = match requested {
        None => unit.factor_slots.first(),
        Some(name) => unit.factor_slots.iter().find(|s| s.as_str() == name),
    };
    slot.map(String::as_str).ok_or_else(|| {
        let gene = model
            .monomer(unit.gene)
            .map(|m| m.name.as_str())
            .unwrap_or("gene");
        ModelError::missing(
            SymbolKind::Site,
            format!("{}.{}", gene, requested.unwrap_or("tf")),
        )
    })
}
