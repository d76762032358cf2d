use std::error::Error;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

/// Defines the interface for input files the animation pipeline reads.
///
/// Implementors parse themselves out of a buffered reader; the path-based
/// helper is provided so callers only deal with `Path`s.
pub trait PhononInput: Sized {
    /// The error type for parse and I/O failures.
    type Error: Error + From<io::Error>;

    /// Reads and parses an instance from a buffered reader.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is malformed or an I/O operation fails.
    fn read_from(reader: &mut impl BufRead) -> Result<Self, Self::Error>;

    /// Reads and parses an instance from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or parsing fails.
    fn read_from_path<P: AsRef<Path>>(path: P) -> Result<Self, Self::Error> {
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);
        Self::read_from(&mut reader)
    }
}
