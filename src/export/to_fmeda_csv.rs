use csv::Writer;

use crate::errors::ExportError;
use crate::fmeda::{FmedaRow, FMEDA_COLUMNS};

/// Render the FMEDA table as CSV with the fixed 11-column header,
/// header included even when the table is empty.
pub fn render(rows: &[FmedaRow]) -> Result<String, ExportError> {
    let mut wtr = Writer::from_writer(vec![]);
    wtr.write_record(FMEDA_COLUMNS)?;
    for row in rows {
        wtr.write_record(&[
            row.row_id.as_str(),
            row.component_id.as_str(),
            row.component_label.as_str(),
            row.component_type.as_str(),
            row.failure_mode.as_str(),
            row.effect.as_str(),
            row.detection.as_str(),
            row.diagnostic_coverage.as_str(),
            row.failure_rate_fit.as_str(),
            row.safety_relevance.as_str(),
            row.notes.as_str(),
        ])?;
    }
    let data = wtr
        .into_inner()
        .map_err(|e| ExportError::Encoding(e.to_string()))?;
    String::from_utf8(data).map_err(|e| ExportError::Encoding(e.to_string()))
}
