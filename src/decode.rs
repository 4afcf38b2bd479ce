//! Embedded diagram payload decoding.
//!
//! draw.io stores the content of a `<diagram>` element either as plain
//! XML or as a base64-encoded, raw-deflate-compressed blob (no zlib
//! header). Decoding is best-effort: anything that fails comes back as
//! the original text so the parser upstream can report a format error.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use flate2::read::DeflateDecoder;
use std::io::Read;
use tracing::debug;

/// Substrings that mark already-decoded graph-model XML.
const MODEL_MARKERS: [&str; 3] = ["<mxGraphModel", "<mxfile", "<root>"];

/// Decode a `<diagram>` text payload to graph-model XML.
///
/// Idempotent: text that already carries a graph-model marker is
/// returned unchanged, as is anything that cannot be decoded. Never
/// fails; undecodable UTF-8 in an inflated payload is replaced.
pub fn decode_diagram_text(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }
    if MODEL_MARKERS.iter().any(|marker| text.contains(marker)) {
        return text.to_string();
    }
    match inflate_base64(text) {
        Some(xml) => xml,
        None => {
            debug!("diagram payload is neither XML nor base64+deflate, keeping raw text");
            text.to_string()
        }
    }
}

fn inflate_base64(text: &str) -> Option<String> {
    // Embedded payloads may be wrapped across lines
    let compact: String = text.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    let raw = STANDARD.decode(compact.as_bytes()).ok()?;
    let mut decoder = DeflateDecoder::new(raw.as_slice());
    let mut xml_bytes = Vec::new();
    decoder.read_to_end(&mut xml_bytes).ok()?;
    Some(String::from_utf8_lossy(&xml_bytes).into_owned())
}
