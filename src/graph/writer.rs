//! Reporting collaborator seam.
//!
//! Rendering (HTML/text) and file output live outside this crate. A
//! [`ReportSink`] receives each finished [`AnalysisReport`];
//! [`AnalysisWriter`] logs the run summary and forwards the report.

use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;

use super::models::AnalysisReport;

/// Receives finished reports. Implemented by the reporting collaborator.
#[async_trait]
pub trait ReportSink: Send + Sync {
    async fn write(&self, report: &AnalysisReport) -> Result<()>;
}

/// Forwards reports to a sink after logging their summary.
pub struct AnalysisWriter {
    sink: Arc<dyn ReportSink>,
}

impl AnalysisWriter {
    pub fn new(sink: Arc<dyn ReportSink>) -> Self {
        Self { sink }
    }

    pub async fn write_report(&self, report: &AnalysisReport) -> Result<()> {
        let summary = &report.summary;
        info!(
            run_id = %report.run_id,
            pairs = summary.pair_count,
            connected_pairs = summary.connected_pair_count,
            paths = summary.path_count,
            analyzed_nodes = summary.analyzed_node_count,
            ubiquitous = report.ubiquitous.as_ref().map(|u| u.len()).unwrap_or(0),
            "Writing analysis report"
        );
        self.sink.write(report).await
    }
}
