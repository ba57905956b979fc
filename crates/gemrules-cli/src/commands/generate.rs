use crate::cli::GenerateArgs;
use crate::config::{GenerateConfig, OutputTarget};
use crate::error::{CliError, Result};
use gemrules::core::io::bngl::BnglWriter;
use gemrules::core::io::definition::ModelDefinition;
use gemrules::core::io::overrides::ParameterOverrides;
use gemrules::core::io::traits::ModelWriter;
use gemrules::workflows::assemble::{self, AssembledModel};
use std::io::Write;
use tracing::info;

pub fn run(args: GenerateArgs) -> Result<()> {
    let config = GenerateConfig::from_args(&args)?;
    let assembled = assemble_from(&config)?;

    match &config.output {
        OutputTarget::Stdout => {
            let stdout = std::io::stdout();
            let mut handle = stdout.lock();
            BnglWriter::write_to(&assembled.model, &mut handle).map_err(|e| {
                CliError::Other(anyhow::anyhow!("Failed to write BNGL to stdout: {}", e))
            })?;
            handle.flush()?;
        }
        OutputTarget::File(path) => {
            info!("Writing BNGL model to {:?}", path);
            BnglWriter::write_to_path(&assembled.model, path).map_err(|e| {
                CliError::FileWriting {
                    path: path.clone(),
                    source: e.into(),
                }
            })?;
            eprintln!(
                "✓ {} rule(s) and {} parameter(s) written to: {}",
                assembled.model.num_rules(),
                assembled.model.num_parameters(),
                path.display()
            );
        }
    }
    Ok(())
}

pub fn assemble_from(config: &GenerateConfig) -> Result<AssembledModel> {
    info!("Loading model definition from {:?}", &config.model_path);
    let definition = ModelDefinition::load(&config.model_path)?;

    let overrides = match &config.overrides_path {
        Some(path) => {
            info!("Loading parameter overrides from {:?}", path);
            Some(ParameterOverrides::load(path)?)
        }
        None => None,
    };

    Ok(assemble::run(&definition, overrides.as_ref())?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use tempfile::tempdir;

    const DEFINITION: &str = r#"
[[monomers]]
name = "RNAp"
sites = ["gene"]

[[monomers]]
name = "g_CycD"
sites = ["rnap", "tf"]

[[monomers]]
name = "mRNA_CycD"
sites = ["eif4e", "_40s", "elong"]
states = { elong = ["i", "a"] }

[[transcription]]
protein = "CycD"
basal = [1e-8, 1e-4, 1e-4]
mrna-decay = 0.1
"#;

    fn write_definition(dir: &Path) -> std::path::PathBuf {
        let path = dir.join("cycd.toml");
        std::fs::write(&path, DEFINITION).unwrap();
        path
    }

    #[test]
    fn writes_bngl_file_with_every_rule() {
        let dir = tempdir().unwrap();
        let model = write_definition(dir.path());
        let output = dir.path().join("cycd.bngl");

        run(GenerateArgs {
            model,
            output: Some(output.clone()),
            overrides: None,
        })
        .unwrap();

        let text = std::fs::read_to_string(&output).unwrap();
        for rule in [
            "g_CycD_binds_RNAp:",
            "g_CycD_RNAp_transcribes:",
            "mRNA_CycD_degrades:",
        ] {
            assert!(text.contains(rule), "missing {}", rule);
        }
        assert!(text.contains("  kdeg_mRNA_CycD 0.1\n"));
    }

    #[test]
    fn overrides_are_applied_before_export() {
        let dir = tempdir().unwrap();
        let model = write_definition(dir.path());
        let overrides = dir.path().join("fit.csv");
        std::fs::write(&overrides, "name,value\nkdeg_mRNA_CycD,0.25\n").unwrap();

        let config = GenerateConfig {
            model_path: model,
            overrides_path: Some(overrides),
            output: OutputTarget::Stdout,
        };
        let assembled = assemble_from(&config).unwrap();
        let id = assembled.model.find_parameter("kdeg_mRNA_CycD").unwrap();
        assert_eq!(assembled.model.parameter(id).unwrap().value(), 0.25);
    }

    #[test]
    fn unknown_override_fails_the_run() {
        let dir = tempdir().unwrap();
        let model = write_definition(dir.path());
        let overrides = dir.path().join("fit.csv");
        std::fs::write(&overrides, "name,value\nk_unknown,0.25\n").unwrap();

        let result = run(GenerateArgs {
            model,
            output: Some(dir.path().join("out.bngl")),
            overrides: Some(overrides),
        });
        assert!(matches!(result, Err(CliError::Definition(_))));
        assert!(!dir.path().join("out.bngl").exists());
    }
}
