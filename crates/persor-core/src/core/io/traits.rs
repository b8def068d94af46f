use super::config::ParseConfig;
use crate::core::models::skeleton::Skeleton;
use crate::core::models::table::MotionTable;
use std::error::Error;
use std::io::{self, Read};
use std::path::Path;

/// Defines the interface for reading motion-capture file formats.
///
/// Implementors parse a complete file held in memory; the provided methods only take care of
/// loading the text.
pub trait MotionCaptureFile {
    /// The error type for parse and I/O failures.
    type Error: Error + From<io::Error>;

    /// Parses a skeleton and its motion table from the full text of a file.
    ///
    /// # Errors
    ///
    /// Returns an error if any section of the input is malformed.
    fn parse_str(text: &str, config: &ParseConfig)
    -> Result<(Skeleton, MotionTable), Self::Error>;

    /// Reads the whole of `reader` as text and parses it.
    ///
    /// # Errors
    ///
    /// Returns an error if reading fails, the input is not UTF-8, or parsing fails.
    fn read_from(
        reader: &mut impl Read,
        config: &ParseConfig,
    ) -> Result<(Skeleton, MotionTable), Self::Error> {
        let mut text = String::new();
        reader.read_to_string(&mut text)?;
        Self::parse_str(&text, config)
    }

    /// Reads and parses the file at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsing fails.
    fn read_from_path<P: AsRef<Path>>(
        path: P,
        config: &ParseConfig,
    ) -> Result<(Skeleton, MotionTable), Self::Error> {
        let text = std::fs::read_to_string(path)?;
        Self::parse_str(&text, config)
    }
}
