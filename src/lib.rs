pub mod classify;
pub mod comments;
pub mod common;
pub mod decode;
pub mod drawio;
pub mod errors;
pub mod export;
pub mod fmeda;
pub mod graph;
pub mod plan;
pub mod plan_execution;
