//! JSON output boundary

use crate::errors::XmlMapError;
use crate::node::Node;
use std::io::Write;

/// Write a node as JSON, followed by a newline.
pub fn write<W: Write>(mut writer: W, node: &Node, pretty: bool) -> Result<(), XmlMapError> {
    if pretty {
        serde_json::to_writer_pretty(&mut writer, node)?;
    } else {
        serde_json::to_writer(&mut writer, node)?;
    }

    writer
        .write_all(b"\n")
        .map_err(|e| XmlMapError::Io(e, "Failed to write JSON output".to_string()))?;
    writer
        .flush()
        .map_err(|e| XmlMapError::Io(e, "Failed to flush JSON output".to_string()))?;

    Ok(())
}

/// Render a node as a JSON string.
pub fn to_string(node: &Node, pretty: bool) -> Result<String, XmlMapError> {
    let rendered = if pretty {
        serde_json::to_string_pretty(node)?
    } else {
        serde_json::to_string(node)?
    };

    Ok(rendered)
}
