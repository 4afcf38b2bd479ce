//! Error types for diagram parsing, export rendering and the comment log.

use thiserror::Error;

/// Structural errors raised while locating the graph model in an
/// uploaded file. These abort the pipeline; nothing partial is emitted.
#[derive(Error, Debug)]
pub enum FormatError {
    /// No `<mxGraphModel>` found, neither inside a `<diagram>` wrapper
    /// nor anywhere in the document
    #[error("could not find an <mxGraphModel> in the diagram file")]
    NoGraphModel,

    /// The graph model lacks its `<root>` cell container
    #[error("unexpected draw.io structure: <root> under <mxGraphModel> is missing")]
    NoCellRoot,

    /// Malformed XML
    #[error("invalid XML: {0}")]
    Xml(#[from] quick_xml::Error),
}

/// Errors while serializing pipeline outputs.
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("encoding error: {0}")]
    Encoding(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors around the review comment log. Validation failures block the
/// append before anything touches disk.
#[derive(Error, Debug)]
pub enum CommentError {
    #[error("comment text must not be empty")]
    EmptyComment,

    #[error("'{0}' is not a commentable FMEDA column")]
    UnknownField(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
