//! Pipeline orchestration.
//!
//! Every user action re-runs the full pipeline from the raw bytes:
//! decode, parse, classify, derive. There is no caching across
//! invocations; that recomputation is the simplicity/correctness
//! tradeoff this tool commits to.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use tracing::{debug, info};

use crate::comments::{CommentEntry, CommentStore, Severity};
use crate::common;
use crate::drawio;
use crate::export;
use crate::fmeda;
use crate::plan::{ExportFileType, Plan};

/// Execute a run plan: parse the diagram it names and write every
/// export profile, paths resolved relative to the plan file.
pub fn execute_plan(plan_path: &str) -> Result<()> {
    info!("Executing plan: {}", plan_path);

    let plan_file_path = Path::new(plan_path);
    let content = fs::read_to_string(plan_file_path)
        .with_context(|| format!("reading plan file {plan_path}"))?;
    let plan: Plan = serde_yaml::from_str(&content)?;
    debug!("Plan: {:?}", plan);

    let base_dir = plan_file_path.parent().unwrap_or_else(|| Path::new("."));
    let diagram_path = base_dir.join(&plan.import.filename);
    info!("Importing diagram: {}", diagram_path.display());
    let bytes = fs::read(&diagram_path)
        .with_context(|| format!("reading diagram {}", diagram_path.display()))?;

    let diagram = drawio::parse(&bytes)?;
    info!("Diagram loaded with {}", diagram.stats());

    let rows = fmeda::generate(&diagram);
    info!("Generated {} FMEDA rows", rows.len());

    for profile in &plan.export.profiles {
        info!(
            "Exporting file: {} using exporter {:?}",
            profile.filename, profile.exporter
        );
        let output = match profile.exporter {
            ExportFileType::DOT => export::to_dot::render(&diagram),
            ExportFileType::NormalizedXML => export::to_xml::render(&diagram)?,
            ExportFileType::FmedaCsv => export::to_fmeda_csv::render(&rows)?,
            ExportFileType::FmedaJson => export::to_fmeda_json::render(&rows)?,
        };
        let out_path = base_dir.join(&profile.filename);
        common::write_string_to_file(&out_path, &output)?;
    }

    Ok(())
}

/// Attach a review comment to one FMEDA row of a diagram. Re-runs the
/// pipeline on the diagram bytes, resolves the row by id, validates and
/// appends. Each call is a distinct new record; resubmitting duplicates.
pub fn add_comment(
    diagram_path: &str,
    store_path: &str,
    row_id: &str,
    field: &str,
    severity: Severity,
    text: &str,
) -> Result<CommentEntry> {
    let bytes = fs::read(diagram_path)
        .with_context(|| format!("reading diagram {diagram_path}"))?;
    let diagram = drawio::parse(&bytes)?;
    let rows = fmeda::generate(&diagram);

    let Some(row) = rows.iter().find(|r| r.row_id == row_id) else {
        bail!(
            "no FMEDA row '{}' in this diagram ({} rows total)",
            row_id,
            rows.len()
        );
    };

    let entry = CommentEntry::new(&diagram.meta.diagram_hash, row, field, severity, text)?;
    let store = CommentStore::new(store_path);
    store.append(entry.clone())?;
    info!("Comment saved for row {} ({})", row_id, field);
    Ok(entry)
}
