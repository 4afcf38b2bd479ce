//! FMEDA skeleton generation.
//!
//! Every node expands into one row per applicable failure mode, taken
//! from a fixed per-type template table. Effect and detection are
//! derived from graph topology; rates, coverage and relevance stay
//! placeholders for downstream review.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::graph::{ComponentType, Diagram};

/// Column schema of the exported table, in order.
pub const FMEDA_COLUMNS: [&str; 11] = [
    "row_id",
    "component_id",
    "component_label",
    "component_type",
    "failure_mode",
    "effect",
    "detection",
    "diagnostic_coverage",
    "failure_rate_FIT",
    "safety_relevance",
    "notes",
];

/// One (component, failure mode) pair. Generated fresh on every
/// pipeline run, never mutated afterwards.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct FmedaRow {
    pub row_id: String,
    pub component_id: String,
    pub component_label: String,
    pub component_type: ComponentType,
    pub failure_mode: String,
    pub effect: String,
    pub detection: String,
    pub diagnostic_coverage: String,
    #[serde(rename = "failure_rate_FIT")]
    pub failure_rate_fit: String,
    pub safety_relevance: String,
    pub notes: String,
}

const FUNCTION_MODES: &[&str] = &["Failure to perform function"];

/// Failure-mode templates per component type. `None` means the type has
/// no entry of its own and falls back to the `Function` template.
/// The strings are part of the output contract; do not reword them.
pub fn failure_modes(component_type: ComponentType) -> Option<&'static [&'static str]> {
    use ComponentType::*;
    match component_type {
        Sensor => Some(&["Open circuit", "Short circuit", "Drift/Offset"]),
        Comparator => Some(&["Stuck high", "Stuck low", "Offset drift"]),
        OpAmp => Some(&["Output saturates high", "Output saturates low", "Gain drift"]),
        Mcu => Some(&["CPU hang", "I/O stuck", "Clock fail"]),
        Adc => Some(&["Conversion freeze", "Code stuck", "Reference drift"]),
        Mosfet => Some(&["Drain-source short", "Open circuit", "Gate oxide short"]),
        LdoRegulator => Some(&["Output overvoltage", "Output undervoltage", "Shutdown stuck"]),
        Connector => Some(&["Pin open", "Short between pins"]),
        Interface => Some(&["Bus stuck dominant", "Bus stuck recessive", "Frame loss"]),
        Power => Some(&["No output", "Overvoltage", "Undervoltage"]),
        AndGate | OrGate => Some(&["Logical fault"]),
        Function => Some(FUNCTION_MODES),
        Watchdog => None,
    }
}

/// Expand the diagram into FMEDA rows, in node-insertion order, with
/// `row_id` sequential across the whole table (`R0001`, `R0002`, ...).
pub fn generate(diagram: &Diagram) -> Vec<FmedaRow> {
    let out_degrees = diagram.out_degrees();
    // computed once per run and passed into row derivation explicitly
    let global_watchdog = diagram.has_watchdog();
    debug!(
        "generating FMEDA rows for {} nodes (watchdog present: {})",
        diagram.nodes.len(),
        global_watchdog
    );

    let mut rows = Vec::new();
    let mut rid = 1usize;
    for (id, node) in &diagram.nodes {
        let modes = failure_modes(node.type_guess).unwrap_or(FUNCTION_MODES);
        let outgoing = out_degrees.get(id.as_str()).copied().unwrap_or(0);
        for mode in modes {
            rows.push(FmedaRow {
                row_id: format!("R{rid:04}"),
                component_id: id.clone(),
                component_label: node.label.clone(),
                component_type: node.type_guess,
                failure_mode: (*mode).to_string(),
                effect: infer_effect(outgoing),
                detection: infer_detection(node.type_guess, global_watchdog),
                diagnostic_coverage: String::new(),
                failure_rate_fit: String::new(),
                safety_relevance: "TBD".to_string(),
                notes: String::new(),
            });
            rid += 1;
        }
    }
    rows
}

fn infer_effect(outgoing: usize) -> String {
    if outgoing > 0 {
        format!("Propagates to {outgoing} downstream node(s)")
    } else {
        "Local effect only".to_string()
    }
}

fn infer_detection(component_type: ComponentType, global_watchdog: bool) -> String {
    use ComponentType::*;
    match component_type {
        Mcu if global_watchdog => "Watchdog supervision".to_string(),
        Adc | Comparator | OpAmp => "Range/consistency checks".to_string(),
        Connector | Sensor => "Plausibility / continuity check".to_string(),
        _ => "TBD".to_string(),
    }
}
