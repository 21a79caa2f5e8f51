//! XML input boundary.
//!
//! Drives `quick-xml` and assembles an [`Element`] tree. The tree is built
//! with an explicit stack of open elements, so document depth does not
//! grow the call stack here.
//!
//! Line endings are normalized to `\n` and literal whitespace in attribute
//! values becomes a space, both before references are expanded, so `&#10;`
//! still yields a newline. General entities declared in an internal DOCTYPE
//! subset are expanded; their replacement text is inserted literally.

use crate::element::Element;
use crate::errors::XmlMapError;
use log::debug;
use quick_xml::escape::{resolve_predefined_entity, unescape_with};
use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;
use std::borrow::Cow;
use std::collections::HashMap;
use std::io::Read;

/// Parse an XML document into its root element.
pub fn parse_str(input: &str) -> Result<Element, XmlMapError> {
    let mut reader = Reader::from_str(input);
    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;
    let mut entities: HashMap<String, String> = HashMap::new();

    loop {
        let event = reader.read_event().map_err(|e| {
            XmlMapError::ParseError(format!(
                "XML parse error at position {}: {}",
                reader.buffer_position(),
                e
            ))
        })?;

        match event {
            Event::Start(ref e) => {
                if stack.is_empty() && root.is_some() {
                    return Err(multiple_roots());
                }
                stack.push(start_element(&reader, e, &entities)?);
            }
            Event::Empty(ref e) => {
                let elem = start_element(&reader, e, &entities)?;
                close_element(&mut stack, &mut root, elem)?;
            }
            Event::End(_) => {
                // quick-xml rejects unmatched end tags before we get here
                let elem = stack.pop().ok_or_else(|| {
                    XmlMapError::ParseError("Unexpected closing tag".to_string())
                })?;
                close_element(&mut stack, &mut root, elem)?;
            }
            Event::Text(ref e) => {
                let raw = decode_raw(&reader, e)?;
                let text = expand(&normalize_line_endings(&raw), &entities)
                    .map_err(|err| XmlMapError::ParseError(format!("XML text decode error: {err}")))?;
                push_text(&mut stack, &text)?;
            }
            Event::CData(e) => {
                let bytes = e.into_inner();
                let text = std::str::from_utf8(&bytes)
                    .map_err(|err| XmlMapError::ParseError(format!("Invalid UTF-8 in CDATA: {err}")))?;
                push_text(&mut stack, &normalize_line_endings(text))?;
            }
            Event::DocType(ref e) => {
                let raw = decode_raw(&reader, e)?;
                for (name, value) in internal_entities(&raw) {
                    entities.entry(name).or_insert(value);
                }
            }
            Event::Comment(_) | Event::PI(_) | Event::Decl(_) => continue,
            Event::Eof => break,
        }
    }

    if let Some(open) = stack.last() {
        return Err(XmlMapError::ParseError(format!(
            "Unexpected end of XML: <{}> is not closed",
            open.tag()
        )));
    }

    let root = root.ok_or_else(|| XmlMapError::ParseError("No root element found".to_string()))?;
    debug!("Parsed XML document with root <{}>", root.tag());
    Ok(root)
}

/// Read a whole document from `reader` and parse it.
pub fn parse_reader<R: Read>(mut reader: R) -> Result<Element, XmlMapError> {
    let mut buf = String::new();
    reader
        .read_to_string(&mut buf)
        .map_err(|e| XmlMapError::Io(e, "Failed to read XML input".to_string()))?;
    parse_str(&buf)
}

fn start_element(
    reader: &Reader<&[u8]>,
    start: &BytesStart,
    entities: &HashMap<String, String>,
) -> Result<Element, XmlMapError> {
    let tag = decode_name(reader, start.name().as_ref())?;
    let mut elem = Element::new(tag);

    for attr in start.attributes() {
        let attr = attr.map_err(|e| XmlMapError::ParseError(format!("XML attribute error: {e}")))?;
        let name = decode_name(reader, attr.key.as_ref())?;
        let raw = decode_raw(reader, &attr.value)?;
        let value = expand(&normalize_attribute_value(&raw), entities)
            .map_err(|e| XmlMapError::ParseError(format!("XML attribute decode error: {e}")))?;
        elem.insert_attribute(name, value);
    }

    Ok(elem)
}

fn decode_raw<'b>(reader: &Reader<&[u8]>, raw: &'b [u8]) -> Result<Cow<'b, str>, XmlMapError> {
    reader
        .decoder()
        .decode(raw)
        .map_err(|e| XmlMapError::ParseError(format!("XML decode error: {e}")))
}

/// Expand character references, predefined entities and declared entities.
fn expand(
    raw: &str,
    entities: &HashMap<String, String>,
) -> Result<String, quick_xml::escape::EscapeError> {
    let expanded = unescape_with(raw, |name| {
        entities
            .get(name)
            .map(String::as_str)
            .or_else(|| resolve_predefined_entity(name))
    })?;
    Ok(expanded.into_owned())
}

fn normalize_line_endings(raw: &str) -> Cow<'_, str> {
    if raw.contains('\r') {
        Cow::Owned(raw.replace("\r\n", "\n").replace('\r', "\n"))
    } else {
        Cow::Borrowed(raw)
    }
}

fn normalize_attribute_value(raw: &str) -> Cow<'_, str> {
    let raw = normalize_line_endings(raw);
    if raw.contains(['\t', '\n']) {
        Cow::Owned(raw.replace(['\t', '\n'], " "))
    } else {
        raw
    }
}

/// Collect `<!ENTITY name "value">` declarations from a DOCTYPE body.
/// Parameter entities and external (SYSTEM/PUBLIC) entities are skipped.
fn internal_entities(doctype: &str) -> Vec<(String, String)> {
    let mut found = Vec::new();
    let mut rest = doctype;

    while let Some(pos) = rest.find("<!ENTITY") {
        rest = rest[pos + "<!ENTITY".len()..].trim_start();
        if rest.starts_with('%') {
            continue;
        }

        let name_end = rest
            .find(|c: char| c.is_whitespace())
            .unwrap_or(rest.len());
        let name = &rest[..name_end];
        rest = rest[name_end..].trim_start();

        let Some(quote) = rest.chars().next().filter(|c| *c == '"' || *c == '\'') else {
            continue;
        };
        let body = &rest[1..];
        let Some(value_end) = body.find(quote) else {
            break;
        };
        if !name.is_empty() {
            found.push((name.to_string(), body[..value_end].to_string()));
        }
        rest = &body[value_end + 1..];
    }

    found
}

fn decode_name(reader: &Reader<&[u8]>, raw: &[u8]) -> Result<String, XmlMapError> {
    reader
        .decoder()
        .decode(raw)
        .map(|name| name.into_owned())
        .map_err(|e| XmlMapError::ParseError(format!("XML name decode error: {e}")))
}

/// Attach a finished element to its parent, or make it the root.
fn close_element(
    stack: &mut [Element],
    root: &mut Option<Element>,
    elem: Element,
) -> Result<(), XmlMapError> {
    match stack.last_mut() {
        Some(parent) => parent.push_child(elem),
        None if root.is_some() => return Err(multiple_roots()),
        None => *root = Some(elem),
    }
    Ok(())
}

/// Record character data. Only text before an element's first child
/// counts as its text; anything after is tail text and is dropped.
fn push_text(stack: &mut [Element], text: &str) -> Result<(), XmlMapError> {
    match stack.last_mut() {
        Some(parent) if parent.children().is_empty() => parent.push_text(text),
        Some(_) => {}
        None if text.trim().is_empty() => {}
        None => {
            return Err(XmlMapError::ParseError(
                "Text content outside of the root element".to_string(),
            ));
        }
    }
    Ok(())
}

fn multiple_roots() -> XmlMapError {
    XmlMapError::ParseError("Multiple root elements are not supported".to_string())
}
