//! Human-readable dumps of graphs and signatures.

use std::collections::BTreeMap;

use serde::Serialize;

use blockdag_sign::SignatureSet;
use blockdag_types::Attributes;

pub const VERTICES_HEADER: &str = "------\tVERTICES\t------";
pub const EDGES_HEADER: &str = "------\tEDGES\t------";
pub const SIGNATURES_HEADER: &str = "------\tSIGNATURES\t------";

/// Render the given sections as indented JSON, each under its header.
///
/// Empty vertex and edge collections are omitted, as is a missing
/// signature set.
pub fn render_sections(
    vertices: Option<&BTreeMap<String, Attributes>>,
    edges: Option<&[(String, String)]>,
    signatures: Option<&SignatureSet<String>>,
    indent: usize,
) -> serde_json::Result<String> {
    let mut out = String::new();
    if let Some(vertices) = vertices.filter(|v| !v.is_empty()) {
        push_section(&mut out, VERTICES_HEADER, vertices, indent)?;
    }
    if let Some(edges) = edges.filter(|e| !e.is_empty()) {
        push_section(&mut out, EDGES_HEADER, &edges, indent)?;
    }
    if let Some(signatures) = signatures {
        push_section(&mut out, SIGNATURES_HEADER, signatures, indent)?;
    }
    Ok(out)
}

fn push_section<T: Serialize + ?Sized>(
    out: &mut String,
    header: &str,
    value: &T,
    indent: usize,
) -> serde_json::Result<()> {
    out.push_str(header);
    out.push('\n');
    out.push_str(&to_indented_json(value, indent)?);
    out.push('\n');
    Ok(())
}

/// JSON with `indent` spaces per nesting level.
pub fn to_indented_json<T: Serialize + ?Sized>(
    value: &T,
    indent: usize,
) -> serde_json::Result<String> {
    let spaces = " ".repeat(indent);
    let formatter = serde_json::ser::PrettyFormatter::with_indent(spaces.as_bytes());
    let mut buf = Vec::new();
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut serializer)?;
    // serde_json only ever writes valid UTF-8.
    Ok(String::from_utf8_lossy(&buf).into_owned())
}
