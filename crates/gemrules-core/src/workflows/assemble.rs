use super::resolve::{basal_rates, transcription_factors, translation_kinetics};
use crate::core::error::ModelError;
use crate::core::io::definition::{DefinitionError, ModelDefinition};
use crate::core::io::overrides::ParameterOverrides;
use crate::core::models::builder::ModelBuilder;
use crate::core::models::model::Model;
use crate::generators::transcription::generate_transcription;
use crate::generators::translation::generate_translation;
use crate::generators::units::{ProteinTranscriptionUnit, ProteinTranslationUnit};
use tracing::{info, instrument};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitKind {
    Transcription,
    Translation,
}

impl std::fmt::Display for UnitKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Transcription => f.pad("transcription"),
            Self::Translation => f.pad("translation"),
        }
    }
}

/// What one generator call added to the model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitSummary {
    pub protein: String,
    pub kind: UnitKind,
    pub factors: usize,
    pub rules: usize,
    pub parameters: usize,
}

#[derive(Debug, Clone)]
pub struct AssembledModel {
    pub model: Model,
    pub units: Vec<UnitSummary>,
}

impl AssembledModel {
    pub fn reversible_rules(&self) -> usize {
        self.model
            .rules()
            .filter(|(_, rule)| rule.rate.is_reversible())
            .count()
    }
}

#[instrument(skip_all, name = "assembly_workflow")]
pub fn run(
    definition: &ModelDefinition,
    overrides: Option<&ParameterOverrides>,
) -> Result<AssembledModel, DefinitionError> {
    let mut builder = ModelBuilder::new();
    let mut units = Vec::new();

    // === Phase 1: Monomer declarations ===
    for monomer in &definition.monomers {
        builder.add_monomer(monomer.to_monomer_type()?)?;
    }
    info!(
        "Declared {} monomer type(s).",
        builder.model().num_monomers()
    );

    // === Phase 2: Transcription ===
    for unit_def in &definition.transcription {
        let unit = ProteinTranscriptionUnit::resolve(builder.model(), &unit_def.protein)?;
        let basal = basal_rates(unit_def)?;
        let factors = transcription_factors(unit_def, builder.model())?;

        let summary = measure(&mut builder, &unit_def.protein, UnitKind::Transcription, |b| {
            generate_transcription(b, &unit, basal, unit_def.mrna_decay, &factors).map(|_| ())
        })?;
        units.push(UnitSummary {
            factors: factors.len(),
            ..summary
        });
    }

    // === Phase 3: Translation ===
    for unit_def in &definition.translation {
        let unit = ProteinTranslationUnit::resolve(builder.model(), &unit_def.protein)?;
        let kinetics = translation_kinetics(unit_def)?;

        units.push(measure(&mut builder, &unit_def.protein, UnitKind::Translation, |b| {
            generate_translation(b, &unit, &kinetics).map(|_| ())
        })?);
    }

    // === Phase 4: Parameter overrides ===
    if let Some(overrides) = overrides {
        overrides.apply(&mut builder)?;
        info!("Applied {} parameter override(s).", overrides.len());
    }

    let model = builder.build();
    info!(
        "Assembly complete: {} rule(s), {} parameter(s).",
        model.num_rules(),
        model.num_parameters()
    );
    Ok(AssembledModel { model, units })
}

fn measure<F>(
    builder: &mut ModelBuilder,
    protein: &str,
    kind: UnitKind,
    generate: F,
) -> Result<UnitSummary, DefinitionError>
where
    F: FnOnce(&mut ModelBuilder) -> Result<(), ModelError>,
{
    let rules_before = builder.model().num_rules();
    let parameters_before = builder.model().num_parameters();
    generate(builder)?;
    Ok(UnitSummary {
        protein: protein.to_string(),
        kind,
        factors: 0,
        rules: builder.model().num_rules() - rules_before,
        parameters: builder.model().num_parameters() - parameters_before,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::SymbolKind;
    use crate::core::io::overrides::ParameterOverride;

    const MACHINERY: &str = r#"
        [[monomers]]
        name = "RNAp"
        sites = ["gene"]

        [[monomers]]
        name = "eIF4E"
        sites = ["mrna_4ebp1"]

        [[monomers]]
        name = "_40S"
        sites = ["mrna", "_60s"]

        [[monomers]]
        name = "_60S"
        sites = ["_40s"]

        [[monomers]]
        name = "ETS"
        sites = ["erk", "gene", "state"]
        states = { state = ["u", "p"] }

        [[monomers]]
        name = "g_CycD"
        sites = ["rnap", "tf"]

        [[monomers]]
        name = "mRNA_CycD"
        sites = ["eif4e", "_40s", "elong"]
        states = { elong = ["i", "a"] }

        [[monomers]]
        name = "CycD"
    "#;

    fn definition(units: &str) -> ModelDefinition {
        ModelDefinition::parse(&format!("{}\n{}", MACHINERY, units)).unwrap()
    }

    const CYCD_TRANSCRIPTION: &str = r#"
        [[transcription]]
        protein = "CycD"
        basal = [1e-8, 1e-4, 1e-4]
        mrna-decay = 0.1

        [[transcription.factors]]
        name = "ETS_p"
        pattern = "ETS(erk,gene,state~p)"
        binding = [0.138, 1.26]
        rates = [1e-4, 1e-4, 1e-2]
    "#;

    const CYCD_TRANSLATION: &str = r#"
        [[translation]]
        protein = "CycD"
        binding = [[1e-4, 1e-6], [1e-3, 1e-6], [1e-3, 1e-4]]
        release = 4e-4
        elongate = 7e-3
        terminate = 4e-2
        protein-decay = 1e-5
    "#;

    fn cycd() -> ModelDefinition {
        definition(&format!("{}\n{}", CYCD_TRANSCRIPTION, CYCD_TRANSLATION))
    }

    #[test]
    fn assembles_transcription_and_translation_units() {
        let assembled = run(&cycd(), None).unwrap();

        assert_eq!(assembled.model.num_rules(), 6 + 7);
        assert_eq!(assembled.model.num_parameters(), 9 + 10);
        assert_eq!(assembled.reversible_rules(), 3 + 3);
        assert_eq!(
            assembled.units,
            [
                UnitSummary {
                    protein: "CycD".to_string(),
                    kind: UnitKind::Transcription,
                    factors: 1,
                    rules: 6,
                    parameters: 9,
                },
                UnitSummary {
                    protein: "CycD".to_string(),
                    kind: UnitKind::Translation,
                    factors: 0,
                    rules: 7,
                    parameters: 10,
                },
            ]
        );
    }

    #[test]
    fn overrides_replace_generated_values() {
        let overrides = ParameterOverrides::new(vec![ParameterOverride {
            name: "kdeg_mRNA_CycD".to_string(),
            value: 0.5,
        }]);
        let assembled = run(&cycd(), Some(&overrides)).unwrap();
        let model = &assembled.model;
        let id = model.find_parameter("kdeg_mRNA_CycD").unwrap();
        assert_eq!(model.parameter(id).unwrap().value(), 0.5);
    }

    #[test]
    fn missing_protein_monomers_are_reported() {
        let units = r#"
            [[translation]]
            protein = "PSA"
            binding = [[1.0, 1.0], [1.0, 1.0], [1.0, 1.0]]
            release = 1.0
            elongate = 1.0
            terminate = 1.0
            protein-decay = 1.0
        "#;
        let err = run(&definition(units), None).unwrap_err();
        assert!(matches!(
            err,
            DefinitionError::Model(ModelError::MissingSymbol {
                kind: SymbolKind::Monomer,
                ref name,
            }) if name == "mRNA_PSA"
        ));
    }

    #[test]
    fn duplicate_unit_is_rejected() {
        let units = format!("{}\n{}", CYCD_TRANSLATION, CYCD_TRANSLATION);
        let err = run(&definition(&units), None).unwrap_err();
        assert!(matches!(
            err,
            DefinitionError::Model(ModelError::DuplicateName { .. })
        ));
    }
}
