use crate::core::models::model::Model;
use std::error::Error;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Defines the interface for serializing an assembled model to a text format.
///
/// Implementors handle format-specific rendering; the path helper takes care
/// of file creation and buffering.
pub trait ModelWriter {
    /// The error type for write operations.
    type Error: Error + From<io::Error>;

    /// Writes `model` to `writer`.
    ///
    /// # Errors
    ///
    /// Returns an error if the model cannot be rendered or the writer fails.
    fn write_to(model: &Model, writer: &mut impl Write) -> Result<(), Self::Error>;

    /// Writes `model` to a file, creating or truncating it.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created or writing fails.
    fn write_to_path<P: AsRef<Path>>(model: &Model, path: P) -> Result<(), Self::Error> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        Self::write_to(model, &mut writer)?;
        writer.flush()?;
        Ok(())
    }
}
