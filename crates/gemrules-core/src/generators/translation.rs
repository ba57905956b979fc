//! Translation rule templates.
//!
//! Translation scheme for the mRNA of protein `X`:
//!
//! | reaction | description |
//! |---|---|
//! | `mRNA + eIF4E <-> mRNA-eIF4E` | cap binding |
//! | `mRNA-eIF4E + 40S <-> mRNA-eIF4E-40S` | small subunit recruitment |
//! | `mRNA-eIF4E-40S + 60S <-> mRNA-eIF4E-40S-60S` | large subunit joining |
//! | `mRNA-eIF4E-40S-60S -> mRNA-40S-60S + eIF4E` | eIF4E release |
//! | `mRNA-40S-60S (idle) -> mRNA-40S-60S (active)` | elongation |
//! | `mRNA-40S-60S (active) -> mRNA + 40S + 60S + X` | termination |
//! | `X -> 0` | protein decay |

use super::kinetics::TranslationKinetics;
use super::units::{
    EIF4E_MRNA_SITE, ELONGATION_ACTIVE, ELONGATION_IDLE, LARGE_SUBUNIT_SITE, MRNA_CAP_SITE,
    MRNA_ELONGATION_SITE, MRNA_RIBOSOME_SITE, ProteinTranslationUnit, SMALL_SUBUNIT_LARGE_SITE,
    SMALL_SUBUNIT_MRNA_SITE, free_mrna,
};
use crate::core::error::ModelError;
use crate::core::models::builder::ModelBuilder;
use crate::core::models::pattern::{ComplexPattern, MonomerPattern, ReactionPattern, SiteCondition};
use crate::core::models::rule::{RateLaw, Rule};
use crate::core::naming::{self, InitiationStep};
use tracing::{info, instrument};

const CAP_BOND: u32 = 1;
const SMALL_SUBUNIT_BOND: u32 = 2;
const LARGE_SUBUNIT_BOND: u32 = 3;

/// Emits the seven-rule translation pipeline and protein decay for one protein.
///
/// Produces 7 rules and 10 parameters. Nothing is committed if any step
/// fails.
///
/// # Errors
///
/// * `DuplicateName` if translation rules for this mRNA or protein already exist.
/// * `InvalidParameter` if any rate is not positive and finite.
#[instrument(skip_all, name = "translation_rules")]
pub fn generate_translation<'a>(
    builder: &'a mut ModelBuilder,
    unit: &ProteinTranslationUnit,
    kinetics: &TranslationKinetics,
) -> Result<&'a mut ModelBuilder, ModelError> {
    let mrna = builder.model().require_monomer(unit.mrna)?.name.clone();
    let protein_type = builder.model().require_monomer(unit.protein)?;
    let protein = protein_type.name.clone();
    let protein_pattern = protein_type.default_pattern(unit.protein);

    builder.transaction(|b| {
        emit_initiation(b, unit, &mrna, kinetics)?;
        emit_elongation(b, unit, &mrna, &protein, protein_pattern.clone(), kinetics)?;
        emit_protein_decay(b, &protein, protein_pattern.clone(), kinetics.protein_decay)
    })?;

    info!("Generated translation rules for {}.", protein);
    Ok(builder)
}

fn emit_initiation(
    b: &mut ModelBuilder,
    unit: &ProteinTranslationUnit,
    mrna: &str,
    kinetics: &TranslationKinetics,
) -> Result<(), ModelError> {
    for (step, rates) in InitiationStep::ALL.into_iter().zip(kinetics.binding) {
        let [kf_name, kr_name] = step.rate_names(mrna);
        let forward = b.add_parameter(&kf_name, rates.forward)?;
        let reverse = b.add_parameter(&kr_name, rates.reverse)?;
        let (reactants, products) = initiation_patterns(unit, step);
        b.add_rule(Rule::new(
            &step.rule_name(mrna),
            reactants,
            products,
            RateLaw::Reversible { forward, reverse },
        ))?;
    }
    Ok(())
}

/// Reactant and product sides of one reversible initiation step.
fn initiation_patterns(
    unit: &ProteinTranslationUnit,
    step: InitiationStep,
) -> (ReactionPattern, ComplexPattern) {
    match step {
        InitiationStep::CapBinding => (
            ReactionPattern::from(free_mrna(unit.mrna)).plus(eif4e(unit, SiteCondition::Free)),
            capped_mrna(unit, SiteCondition::Free),
        ),
        InitiationStep::SmallSubunitBinding => (
            ReactionPattern::from(capped_mrna(unit, SiteCondition::Free))
                .plus(small_subunit(unit, SiteCondition::Free, SiteCondition::Free)),
            capped_mrna(unit, SiteCondition::Bond(SMALL_SUBUNIT_BOND)).join(small_subunit(
                unit,
                SiteCondition::Bond(SMALL_SUBUNIT_BOND),
                SiteCondition::Free,
            )),
        ),
        InitiationStep::LargeSubunitJoining => (
            ReactionPattern::from(
                capped_mrna(unit, SiteCondition::Bond(SMALL_SUBUNIT_BOND)).join(small_subunit(
                    unit,
                    SiteCondition::Bond(SMALL_SUBUNIT_BOND),
                    SiteCondition::Free,
                )),
            )
            .plus(large_subunit(unit, SiteCondition::Free)),
            capped_mrna(unit, SiteCondition::Bond(SMALL_SUBUNIT_BOND))
                .join(small_subunit(
                    unit,
                    SiteCondition::Bond(SMALL_SUBUNIT_BOND),
                    SiteCondition::Bond(LARGE_SUBUNIT_BOND),
                ))
                .join(large_subunit(unit, SiteCondition::Bond(LARGE_SUBUNIT_BOND))),
        ),
    }
}

fn emit_elongation(
    b: &mut ModelBuilder,
    unit: &ProteinTranslationUnit,
    mrna: &str,
    protein: &str,
    protein_pattern: MonomerPattern,
    kinetics: &TranslationKinetics,
) -> Result<(), ModelError> {
    let k_release = b.add_parameter(&naming::release_rate(protein), kinetics.release)?;
    let initiated = capped_mrna(unit, SiteCondition::Bond(SMALL_SUBUNIT_BOND))
        .join(small_subunit(
            unit,
            SiteCondition::Bond(SMALL_SUBUNIT_BOND),
            SiteCondition::Bond(LARGE_SUBUNIT_BOND),
        ))
        .join(large_subunit(unit, SiteCondition::Bond(LARGE_SUBUNIT_BOND)));
    b.add_rule(Rule::new(
        &naming::release_rule(mrna),
        initiated,
        ReactionPattern::from(ribosome_on_mrna(unit, ELONGATION_IDLE))
            .plus(eif4e(unit, SiteCondition::Free)),
        RateLaw::Irreversible(k_release),
    ))?;

    let k_elongate = b.add_parameter(&naming::elongation_rate(protein), kinetics.elongate)?;
    b.add_rule(Rule::new(
        &naming::elongation_rule(mrna),
        ribosome_on_mrna(unit, ELONGATION_IDLE),
        ribosome_on_mrna(unit, ELONGATION_ACTIVE),
        RateLaw::Irreversible(k_elongate),
    ))?;

    let k_terminate = b.add_parameter(&naming::termination_rate(protein), kinetics.terminate)?;
    b.add_rule(Rule::new(
        &naming::termination_rule(mrna),
        ribosome_on_mrna(unit, ELONGATION_ACTIVE),
        ReactionPattern::from(free_mrna(unit.mrna))
            .plus(small_subunit(unit, SiteCondition::Free, SiteCondition::Free))
            .plus(large_subunit(unit, SiteCondition::Free))
            .plus(protein_pattern),
        RateLaw::Irreversible(k_terminate),
    ))?;
    Ok(())
}

fn emit_protein_decay(
    b: &mut ModelBuilder,
    protein: &str,
    protein_pattern: MonomerPattern,
    rate: f64,
) -> Result<(), ModelError> {
    let k_deg = b.add_parameter(&naming::protein_decay_rate(protein), rate)?;
    b.add_rule(Rule::new(
        &naming::protein_decay_rule(protein),
        protein_pattern,
        ReactionPattern::empty(),
        RateLaw::Irreversible(k_deg),
    ))?;
    Ok(())
}

/// mRNA with eIF4E on the cap; the ribosome site is set by the caller.
fn capped_mrna(unit: &ProteinTranslationUnit, ribosome: SiteCondition) -> ComplexPattern {
    ComplexPattern::new(vec![
        MonomerPattern::new(unit.mrna)
            .bond(MRNA_CAP_SITE, CAP_BOND)
            .with(MRNA_RIBOSOME_SITE, ribosome)
            .state(MRNA_ELONGATION_SITE, ELONGATION_IDLE),
        eif4e(unit, SiteCondition::Bond(CAP_BOND)),
    ])
}

/// mRNA carrying the assembled 80S ribosome without eIF4E.
fn ribosome_on_mrna(unit: &ProteinTranslationUnit, elongation: &str) -> ComplexPattern {
    ComplexPattern::new(vec![
        MonomerPattern::new(unit.mrna)
            .free(MRNA_CAP_SITE)
            .bond(MRNA_RIBOSOME_SITE, SMALL_SUBUNIT_BOND)
            .state(MRNA_ELONGATION_SITE, elongation),
        small_subunit(
            unit,
            SiteCondition::Bond(SMALL_SUBUNIT_BOND),
            SiteCondition::Bond(LARGE_SUBUNIT_BOND),
        ),
        large_subunit(unit, SiteCondition::Bond(LARGE_SUBUNIT_BOND)),
    ])
}

fn eif4e(unit: &ProteinTranslationUnit, mrna: SiteCondition) -> MonomerPattern {
    MonomerPattern::new(unit.eif4e).with(EIF4E_MRNA_SITE, mrna)
}

fn small_subunit(
    unit: &ProteinTranslationUnit,
    mrna: SiteCondition,
    large: SiteCondition,
) -> MonomerPattern {
    MonomerPattern::new(unit.small_subunit)
        .with(SMALL_SUBUNIT_MRNA_SITE, mrna)
        .with(SMALL_SUBUNIT_LARGE_SITE, large)
}

fn large_subunit(unit: &ProteinTranslationUnit, small: SiteCondition) -> MonomerPattern {
    MonomerPattern::new(unit.large_subunit).with(LARGE_SUBUNIT_SITE, small)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::kinetics::RatePair;
    use crate::generators::units::fixtures::expression_model;

    fn kinetics() -> TranslationKinetics {
        TranslationKinetics {
            binding: [
                RatePair::new(0.1, 0.2),
                RatePair::new(0.3, 0.4),
                RatePair::new(0.5, 0.6),
            ],
            release: 0.7,
            elongate: 0.8,
            terminate: 0.9,
            protein_decay: 0.05,
        }
    }

    fn translated(proteins: &[&str]) -> ModelBuilder {
        let mut builder = expression_model(proteins);
        for protein in proteins {
            let unit = ProteinTranslationUnit::resolve(builder.model(), protein).unwrap();
            generate_translation(&mut builder, &unit, &kinetics()).unwrap();
        }
        builder
    }

    #[test]
    fn emits_seven_rules_and_ten_parameters() {
        let builder = translated(&["CycD"]);
        let model = builder.model();
        assert_eq!(model.num_rules(), 7);
        assert_eq!(model.num_parameters(), 10);

        let names: Vec<&str> = model.rules().map(|(_, r)| r.name.as_str()).collect();
        assert_eq!(
            names,
            [
                "mRNA_CycD_binds_eIF4E",
                "mRNA_CycD_eIF4E_binds_40S",
                "mRNA_CycD_eIF4E_40S_binds_60S",
                "mRNA_CycD_eIF4E_40S_60S_releases_eIF4E",
                "mRNA_CycD_40S_60S_elongates",
                "mRNA_CycD_40S_60S_translates",
                "CycD_degrades",
            ]
        );

        let kf = model.find_parameter("kf_mRNA_CycD_eIF4E_binds_40S").unwrap();
        assert_eq!(model.parameter(kf).unwrap().value(), 0.3);
        let kdeg = model.find_parameter("k_deg_CycD").unwrap();
        assert_eq!(model.parameter(kdeg).unwrap().value(), 0.05);
    }

    #[test]
    fn only_initiation_steps_are_reversible() {
        let builder = translated(&["CycD"]);
        for (_, rule) in builder.model().rules() {
            let expected = if rule.rate.is_reversible() { 2 } else { 1 };
            assert_eq!(rule.rate.parameters().len(), expected, "{}", rule.name);
        }
        let reversible = builder
            .model()
            .rules()
            .filter(|(_, r)| r.rate.is_reversible())
            .count();
        assert_eq!(reversible, 3);
    }

    #[test]
    fn each_initiation_step_forms_exactly_one_bond() {
        let builder = translated(&["CycD"]);
        let model = builder.model();
        for step in InitiationStep::ALL {
            let rule = model.rule_named(&step.rule_name("mRNA_CycD")).unwrap();
            let changes = rule.bond_changes();
            assert!(changes.broken.is_empty(), "{}", rule.name);
            assert_eq!(changes.formed.len(), 1, "{}", rule.name);
        }
    }

    #[test]
    fn release_breaks_only_the_cap_bond() {
        let builder = translated(&["CycD"]);
        let model = builder.model();
        let rule = model
            .rule_named("mRNA_CycD_eIF4E_40S_60S_releases_eIF4E")
            .unwrap();
        let changes = rule.bond_changes();
        assert!(changes.formed.is_empty());
        assert_eq!(changes.broken.len(), 1);

        let eif4e = model.find_monomer("eIF4E").unwrap();
        let broken = &changes.broken[0];
        assert!(broken.a.0 == eif4e || broken.b.0 == eif4e);
    }

    #[test]
    fn elongation_only_flips_state() {
        let builder = translated(&["CycD"]);
        let rule = builder
            .model()
            .rule_named("mRNA_CycD_40S_60S_elongates")
            .unwrap();
        assert!(rule.bond_changes().is_empty());
        let before = &rule.reactants.complexes()[0].monomers()[0];
        let after = &rule.products.complexes()[0].monomers()[0];
        assert_eq!(
            before.condition("elong"),
            Some(&SiteCondition::State("i".to_string()))
        );
        assert_eq!(
            after.condition("elong"),
            Some(&SiteCondition::State("a".to_string()))
        );
    }

    #[test]
    fn termination_releases_free_parts_and_default_protein() {
        let builder = translated(&["CycD"]);
        let model = builder.model();
        let rule = model.rule_named("mRNA_CycD_40S_60S_translates").unwrap();
        assert_eq!(rule.products.complexes().len(), 4);
        assert!(rule.products.bond_signatures().is_empty());
        assert_eq!(rule.bond_changes().broken.len(), 2);

        let protein = &rule.products.complexes()[3].monomers()[0];
        assert_eq!(protein.monomer, model.find_monomer("CycD").unwrap());
        assert_eq!(protein.condition("r1"), Some(&SiteCondition::Free));
        assert_eq!(
            protein.condition("state"),
            Some(&SiteCondition::State("u".to_string()))
        );

        let decay = model.rule_named("CycD_degrades").unwrap();
        assert_eq!(decay.reactants.complexes()[0].monomers()[0], *protein);
        assert!(decay.products.is_empty());
    }

    #[test]
    fn rule_sets_are_isomorphic_across_proteins() {
        let builder = translated(&["CycD", "PSA"]);
        let model = builder.model();
        assert_eq!(model.num_rules(), 14);
        assert_eq!(model.num_parameters(), 20);

        let rules: Vec<_> = model.rules().map(|(_, r)| r).collect();
        let (first, second) = rules.split_at(7);
        for (a, b) in first.iter().zip(second) {
            assert_eq!(a.name.replace("CycD", "PSA"), b.name);
            assert_eq!(a.rate.is_reversible(), b.rate.is_reversible());
            assert_eq!(a.reactants.monomer_count(), b.reactants.monomer_count());
            assert_eq!(a.products.monomer_count(), b.products.monomer_count());
            assert_eq!(a.bond_changes().formed.len(), b.bond_changes().formed.len());
        }
    }

    #[test]
    fn repeated_call_fails_atomically() {
        let mut builder = translated(&["CycD"]);
        let unit = ProteinTranslationUnit::resolve(builder.model(), "CycD").unwrap();
        let again = generate_translation(&mut builder, &unit, &kinetics());
        assert!(matches!(again, Err(ModelError::DuplicateName { .. })));
        assert_eq!(builder.model().num_rules(), 7);
        assert_eq!(builder.model().num_parameters(), 10);
    }

    #[test]
    fn non_positive_rate_commits_nothing() {
        let mut builder = expression_model(&["CycD"]);
        let unit = ProteinTranslationUnit::resolve(builder.model(), "CycD").unwrap();
        let mut bad = kinetics();
        bad.protein_decay = 0.0;
        let result = generate_translation(&mut builder, &unit, &bad);
        assert!(matches!(result, Err(ModelError::InvalidParameter { .. })));
        assert_eq!(builder.model().num_rules(), 0);
    }
}
