//! draw.io container parsing.
//!
//! Two container shapes are supported:
//!
//! - an `<mxfile>` wrapper holding one or more `<diagram>` elements,
//!   whose text payload is decoded via [`crate::decode`] and parsed as
//!   the graph model (the first diagram wins);
//! - a document that is, or contains, an `<mxGraphModel>` directly.
//!
//! Within the model, only the direct `<mxCell>` children of `<root>`
//! are walked. A cell with `vertex="1"` becomes a node, `edge="1"` an
//! edge, anything else is ignored.

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use regex::Regex;
use sha2::{Digest, Sha256};
use tracing::debug;

use crate::classify;
use crate::decode::decode_diagram_text;
use crate::errors::FormatError;
use crate::graph::{ComponentType, Diagram, DiagramMeta, Edge, Node};

static TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]+>").unwrap());

/// Parse an uploaded diagram file into a classified [`Diagram`].
pub fn parse(bytes: &[u8]) -> Result<Diagram, FormatError> {
    let text = String::from_utf8_lossy(bytes);
    let model_xml = locate_graph_model(&text)?;
    let (mut nodes, edges) = walk_cells(&model_xml)?;

    for node in nodes.values_mut() {
        node.type_guess = classify::classify(&node.label, &node.style);
    }

    let meta = DiagramMeta {
        diagram_hash: file_sha256(bytes),
        node_count: nodes.len(),
        edge_count: edges.len(),
    };
    debug!(
        "parsed diagram {}: {} nodes, {} edges",
        meta.diagram_hash, meta.node_count, meta.edge_count
    );
    Ok(Diagram { nodes, edges, meta })
}

/// Hex SHA-256 of the raw upload.
pub fn file_sha256(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hasher
        .finalize()
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect()
}

/// Remove HTML-like markup that draw.io embeds in cell values, and trim.
fn strip_markup(value: &str) -> String {
    TAG_RE.replace_all(value, "").trim().to_string()
}

/// Find the graph-model XML inside the uploaded document.
///
/// When `<diagram>` elements exist, only the first one's text payload
/// is consulted; an empty or undecodable payload means no model. Only
/// when no `<diagram>` exists at all is the document itself searched
/// for an `<mxGraphModel>`.
fn locate_graph_model(text: &str) -> Result<String, FormatError> {
    let mut reader = Reader::from_str(text);
    let mut diagram_text: Option<String> = None;
    let mut has_model = false;

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                let name = e.local_name();
                if name.as_ref() == b"diagram" && diagram_text.is_none() {
                    diagram_text = Some(read_leading_text(&mut reader)?);
                } else if name.as_ref() == b"mxGraphModel" {
                    has_model = true;
                }
            }
            Event::Empty(e) => {
                let name = e.local_name();
                if name.as_ref() == b"diagram" && diagram_text.is_none() {
                    diagram_text = Some(String::new());
                } else if name.as_ref() == b"mxGraphModel" {
                    has_model = true;
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    match diagram_text {
        Some(payload) => {
            let decoded = decode_diagram_text(payload.trim());
            if decoded.is_empty() {
                Err(FormatError::NoGraphModel)
            } else {
                Ok(decoded)
            }
        }
        None if has_model => Ok(text.to_string()),
        None => Err(FormatError::NoGraphModel),
    }
}

/// Collect the text content of the current element up to its end tag.
/// Matching the original decoder, only text *before* the first child
/// element counts; markup children are skipped, not flattened.
fn read_leading_text(reader: &mut Reader<&[u8]>) -> Result<String, quick_xml::Error> {
    let mut text = String::new();
    let mut depth = 0usize;
    let mut saw_child = false;
    loop {
        match reader.read_event()? {
            Event::Start(_) => {
                depth += 1;
                saw_child = true;
            }
            Event::Empty(_) => saw_child = true,
            Event::End(_) => {
                if depth == 0 {
                    break;
                }
                depth -= 1;
            }
            Event::Text(t) if depth == 0 && !saw_child => text.push_str(&t.unescape()?),
            Event::CData(c) if depth == 0 && !saw_child => {
                text.push_str(&String::from_utf8_lossy(&c.into_inner()));
            }
            Event::Eof => break,
            _ => {}
        }
    }
    Ok(text)
}

/// Walk the direct `mxCell` children of the model's `<root>` container.
fn walk_cells(model_xml: &str) -> Result<(IndexMap<String, Node>, Vec<Edge>), FormatError> {
    let mut reader = Reader::from_str(model_xml);
    let mut nodes: IndexMap<String, Node> = IndexMap::new();
    let mut edges: Vec<Edge> = Vec::new();

    let mut in_model = false;
    let mut root_depth: Option<usize> = None;
    let mut root_done = false;
    let mut depth = 0usize;

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                depth += 1;
                let name = e.local_name();
                if !in_model {
                    if name.as_ref() == b"mxGraphModel" {
                        in_model = true;
                    }
                } else if root_depth.is_none() {
                    if !root_done && name.as_ref() == b"root" {
                        root_depth = Some(depth);
                    }
                } else if let Some(rd) = root_depth {
                    if !root_done && depth == rd + 1 && name.as_ref() == b"mxCell" {
                        collect_cell(&e, &mut nodes, &mut edges)?;
                    }
                }
            }
            Event::Empty(e) => {
                let name = e.local_name();
                if !in_model {
                    if name.as_ref() == b"mxGraphModel" {
                        // self-closing model: present but empty
                        in_model = true;
                    }
                } else if root_depth.is_none() {
                    if !root_done && name.as_ref() == b"root" {
                        // self-closing container: present, holds no cells
                        root_depth = Some(depth + 1);
                        root_done = true;
                    }
                } else if let Some(rd) = root_depth {
                    if !root_done && depth == rd && name.as_ref() == b"mxCell" {
                        collect_cell(&e, &mut nodes, &mut edges)?;
                    }
                }
            }
            Event::End(_) => {
                if root_depth == Some(depth) {
                    root_done = true;
                }
                depth = depth.saturating_sub(1);
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if !in_model {
        return Err(FormatError::NoGraphModel);
    }
    if root_depth.is_none() {
        return Err(FormatError::NoCellRoot);
    }
    Ok((nodes, edges))
}

fn collect_cell(
    cell: &BytesStart,
    nodes: &mut IndexMap<String, Node>,
    edges: &mut Vec<Edge>,
) -> Result<(), FormatError> {
    let mut id = String::new();
    let mut value = String::new();
    let mut style = String::new();
    let mut source = String::new();
    let mut target = String::new();
    let mut is_vertex = false;
    let mut is_edge = false;

    for attr in cell.attributes() {
        let attr = attr.map_err(quick_xml::Error::from)?;
        let val = attr.unescape_value()?.into_owned();
        match attr.key.local_name().as_ref() {
            b"id" => id = val,
            b"value" => value = val,
            b"style" => style = val,
            b"source" => source = val,
            b"target" => target = val,
            b"vertex" => is_vertex = val == "1",
            b"edge" => is_edge = val == "1",
            _ => {}
        }
    }

    if is_vertex {
        let stripped = strip_markup(&value);
        let label = if stripped.is_empty() {
            format!("Node_{id}")
        } else {
            stripped
        };
        nodes.insert(
            id.clone(),
            Node {
                id,
                label,
                raw_value: value,
                style,
                // classified after the walk
                type_guess: ComponentType::Function,
            },
        );
    } else if is_edge {
        edges.push(Edge {
            id,
            source,
            target,
            label: strip_markup(&value),
            style,
        });
    }
    Ok(())
}
