//! Error taxonomy for path analysis runs.
//!
//! Selection and configuration errors abort a run before any path work.
//! `ComponentFailed` never reaches callers: the centrality engine logs it and
//! degrades the affected component to 0.0.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnalysisError {
    #[error("Either a node count or a node list must be provided")]
    Configuration,

    #[error("{}", validation_message(.missing, .blacklisted))]
    Validation {
        missing: Vec<String>,
        blacklisted: Vec<String>,
    },

    #[error(
        "No valid protein nodes found after filtering blacklist. \
         Disable the blacklist to include blacklisted nodes."
    )]
    EmptyPool,

    #[error("Requested {requested} random nodes but only {available} eligible nodes exist")]
    SampleTooLarge { requested: usize, available: usize },

    #[error("No valid nodes remain for analysis")]
    NoValidNodes,

    #[error("Ubiquity threshold must be within [0, 1], got {0}")]
    InvalidThreshold(f64),

    #[error("Centrality computation failed for component {component}: {reason}")]
    ComponentFailed { component: usize, reason: String },
}

pub type AnalysisResult<T> = std::result::Result<T, AnalysisError>;

fn validation_message(missing: &[String], blacklisted: &[String]) -> String {
    let mut lines = Vec::new();
    if !missing.is_empty() {
        lines.push(format!("Nodes not found in network: {}", missing.join(", ")));
    }
    if !blacklisted.is_empty() {
        lines.push(format!(
            "Blacklisted nodes detected: {}\n\
             To proceed, either:\n\
             1. Remove the blacklisted nodes from your input\n\
             2. Disable the blacklist",
            blacklisted.join(", ")
        ));
    }
    lines.join("\n")
}
