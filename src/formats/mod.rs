//! Input and output boundaries around the converter.
//!
//! `xml` turns XML text into an [`Element`](crate::element::Element) tree
//! and `json` writes a converted [`Node`](crate::node::Node).

pub mod json;
pub mod xml;
