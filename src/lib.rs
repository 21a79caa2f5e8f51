//! Main library for oxflib.
//!
//! Converts a parsed XML element tree into a nested mapping: repeated
//! child tags become lists, attributes get an `@` prefix and element text
//! lands under `#text` when it shares the element with attributes or
//! children.
//!
//! ```
//! use oxflib::{convert, formats};
//!
//! let root = formats::xml::parse_str(r#"<list id="7"><item>1</item><item>2</item></list>"#).unwrap();
//! let node = convert(&root);
//! assert_eq!(
//!     node.to_json(),
//!     serde_json::json!({"list": {"item": ["1", "2"], "@id": "7"}})
//! );
//! ```

pub mod converter;
pub mod element;
pub mod errors;
pub mod formats;
pub mod node;

pub use converter::{convert, load};
pub use element::Element;
pub use errors::XmlMapError;
pub use node::{GroupedValue, Mapping, Node, Value};

use log::info;
use std::fs::File;
use std::io::{self, BufReader, BufWriter};
use std::path::PathBuf;
use std::time::Instant;

/// Configuration for one command line run.
#[derive(Debug, Default)]
pub struct Config {
    /// XML file to read; stdin when `None`.
    pub input_file: Option<PathBuf>,
    /// JSON file to write; stdout when `None`.
    pub output_file: Option<PathBuf>,
    pub pretty: bool,
}

/// Read an XML document, convert it and write the result as JSON.
pub fn run(config: Config) -> Result<(), XmlMapError> {
    let start_time = Instant::now();
    match &config.input_file {
        Some(path) => info!("  Input: {}", path.display()),
        None => info!("  Input: <stdin>"),
    }
    match &config.output_file {
        Some(path) => info!("  Output: {}", path.display()),
        None => info!("  Output: <stdout>"),
    }

    // --- 1. Parse ---
    let parse_start = Instant::now();
    let root = match &config.input_file {
        Some(path) => {
            let file = File::open(path)
                .map_err(|e| XmlMapError::Io(e, "Failed to open input file".to_string()))?;
            formats::xml::parse_reader(BufReader::new(file))?
        }
        None => formats::xml::parse_reader(io::stdin().lock())?,
    };
    info!(
        "Parsed XML with root <{}>. (Took {:.2?})",
        root.tag(),
        parse_start.elapsed()
    );

    // --- 2. Convert ---
    let node = convert(&root);

    // --- 3. Write ---
    match &config.output_file {
        Some(path) => {
            let file = File::create(path)
                .map_err(|e| XmlMapError::Io(e, "Failed to create output file".to_string()))?;
            formats::json::write(BufWriter::new(file), &node, config.pretty)?;
        }
        None => formats::json::write(io::stdout().lock(), &node, config.pretty)?,
    }

    info!("Total execution time: {:.2?}", start_time.elapsed());
    Ok(())
}
