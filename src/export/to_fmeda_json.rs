use crate::errors::ExportError;
use crate::fmeda::FmedaRow;

/// Render the FMEDA table as a pretty-printed JSON array of row
/// objects, non-ASCII preserved.
pub fn render(rows: &[FmedaRow]) -> Result<String, ExportError> {
    Ok(serde_json::to_string_pretty(rows)?)
}
