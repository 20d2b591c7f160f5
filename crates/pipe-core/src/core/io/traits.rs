use crate::core::models::structure::Structure;
use std::error::Error;
use std::fs::{File, OpenOptions};
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

/// Defines the interface for reading structure file formats.
///
/// Implementors handle format-specific parsing; opening files is shared.
pub trait StructureFile {
    /// The error type for I/O operations.
    type Error: Error + From<io::Error>;

    /// Reads a structure from a buffered reader.
    ///
    /// # Errors
    ///
    /// Returns an error if parsing fails or I/O operations encounter issues.
    fn read_from(reader: &mut impl BufRead) -> Result<Structure, Self::Error>;

    /// Reads a structure from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or parsing fails.
    fn read_from_path<P: AsRef<Path>>(path: P) -> Result<Structure, Self::Error> {
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);
        Self::read_from(&mut reader)
    }
}

/// Line-oriented list files: one item per line, no header.
pub trait ListFormat {
    /// The item stored on each line.
    type Item;

    /// The error type for I/O operations.
    type Error: Error + From<io::Error>;
}

/// List formats PIPE reads.
pub trait ListReader: ListFormat {
    /// Reads all items from a buffered reader.
    ///
    /// # Errors
    ///
    /// Returns an error if a line cannot be parsed or reading fails.
    fn read_from(reader: &mut impl BufRead) -> Result<Vec<Self::Item>, Self::Error>;

    /// Reads all items from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or parsing fails.
    fn read_from_path<P: AsRef<Path>>(path: P) -> Result<Vec<Self::Item>, Self::Error> {
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);
        Self::read_from(&mut reader)
    }
}

/// List formats PIPE writes.
pub trait ListWriter: ListFormat {
    /// Writes items to a writer, one per line.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    fn write_to(items: &[Self::Item], writer: &mut impl Write) -> Result<(), Self::Error>;

    /// Writes items to a file path, replacing any existing content.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created or writing fails.
    fn write_to_path<P: AsRef<Path>>(items: &[Self::Item], path: P) -> Result<(), Self::Error> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        Self::write_to(items, &mut writer)?;
        writer.flush()?;
        Ok(())
    }

    /// Appends items to a file path, creating the file if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or writing fails.
    fn append_to_path<P: AsRef<Path>>(items: &[Self::Item], path: P) -> Result<(), Self::Error> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        let mut writer = BufWriter::new(file);
        Self::write_to(items, &mut writer)?;
        writer.flush()?;
        Ok(())
    }
}
