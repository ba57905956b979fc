use crate::cli::GenerateArgs;
use crate::error::{CliError, Result};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Where the rendered BNGL goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    Stdout,
    File(PathBuf),
}

/// Validated settings for one `generate` run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateConfig {
    pub model_path: PathBuf,
    pub overrides_path: Option<PathBuf>,
    pub output: OutputTarget,
}

impl GenerateConfig {
    pub fn from_args(args: &GenerateArgs) -> Result<Self> {
        require_file(&args.model, "model definition")?;
        if let Some(path) = &args.overrides {
            require_file(path, "parameter overrides")?;
        }

        let output = match &args.output {
            None => OutputTarget::Stdout,
            Some(path) if same_path(path, &args.model) => {
                return Err(CliError::Config(format!(
                    "output path '{}' would overwrite the model definition",
                    path.display()
                )));
            }
            Some(path) => OutputTarget::File(path.clone()),
        };

        let config = Self {
            model_path: args.model.clone(),
            overrides_path: args.overrides.clone(),
            output,
        };
        debug!("Resolved generate configuration: {:?}", config);
        Ok(config)
    }
}

pub fn require_file(path: &Path, what: &str) -> Result<()> {
    if path.is_file() {
        Ok(())
    } else {
        Err(CliError::Config(format!(
            "{} file '{}' does not exist",
            what,
            path.display()
        )))
    }
}

fn same_path(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}
