use serde::{Deserialize, Serialize};

/// ## Structure
/// This module contains the data structures for the run-plan file.
///
/// ```text
/// Plan
///   ├── import: ImportConfig
///   │   └── filename: String
///   └── export: ExportConfig
///       └── profiles: Vec<ExportProfile>
///           ├── filename: String
///           └── exporter: ExportFileType
///               ├── DOT
///               ├── NormalizedXML
///               ├── FmedaCsv
///               └── FmedaJson
/// ```

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Plan {
    pub import: ImportConfig,
    pub export: ExportConfig,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ImportConfig {
    pub filename: String,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ExportConfig {
    pub profiles: Vec<ExportProfile>,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ExportProfile {
    pub filename: String,
    pub exporter: ExportFileType,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExportFileType {
    DOT,
    NormalizedXML,
    FmedaCsv,
    FmedaJson,
}

impl Default for Plan {
    /// Starter plan written by `init`: one diagram in, all four
    /// exports out.
    fn default() -> Self {
        Plan {
            import: ImportConfig {
                filename: "diagram.drawio".to_string(),
            },
            export: ExportConfig {
                profiles: vec![
                    ExportProfile {
                        filename: "graph.dot".to_string(),
                        exporter: ExportFileType::DOT,
                    },
                    ExportProfile {
                        filename: "normalized_diagram.xml".to_string(),
                        exporter: ExportFileType::NormalizedXML,
                    },
                    ExportProfile {
                        filename: "fmeda.csv".to_string(),
                        exporter: ExportFileType::FmedaCsv,
                    },
                    ExportProfile {
                        filename: "fmeda.json".to_string(),
                        exporter: ExportFileType::FmedaJson,
                    },
                ],
            },
        }
    }
}
