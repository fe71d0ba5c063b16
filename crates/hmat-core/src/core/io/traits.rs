use std::error::Error;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

/// Defines the interface for reading and writing the plain-text tables the
/// toolkit exchanges between runs (score files, series files).
///
/// Implementors carry their own layout (which column holds the score, how
/// many decimals to print), so the trait methods take `&self`.
pub trait TextFormat {
    /// The in-memory representation of a whole file.
    type Data;

    /// The error type for I/O and parse failures.
    type Error: Error + From<io::Error>;

    /// Reads a whole table from a buffered reader.
    ///
    /// # Errors
    ///
    /// Returns an error if parsing fails or the reader fails.
    fn read_from(&self, reader: &mut impl BufRead) -> Result<Self::Data, Self::Error>;

    /// Writes a whole table to a writer.
    ///
    /// # Errors
    ///
    /// Returns an error if the writer fails.
    fn write_to(&self, data: &Self::Data, writer: &mut impl Write) -> Result<(), Self::Error>;

    /// Reads a table from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or parsing fails.
    fn read_from_path<P: AsRef<Path>>(&self, path: P) -> Result<Self::Data, Self::Error> {
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);
        self.read_from(&mut reader)
    }

    /// Writes a table to a file path, truncating any existing file.
    ///
    /// Callers decide beforehand whether replacing an existing file is
    /// allowed; see [`crate::engine::output::OutputGuard`].
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created or writing fails.
    fn write_to_path<P: AsRef<Path>>(&self, data: &Self::Data, path: P) -> Result<(), Self::Error> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        self.write_to(data, &mut writer)?;
        writer.flush()?;
        Ok(())
    }
}
