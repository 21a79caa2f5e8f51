//! Defines the custom error types for the crate.
//!
//! The converter itself cannot fail; these errors come from the XML and
//! JSON boundaries and from file handling in the binary.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum XmlMapError {
    #[error("I/O Error: {1} - {0}")]
    Io(#[source] std::io::Error, String),

    #[error("JSON Serialization Error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("Parse Error: {0}")]
    ParseError(String),
}
