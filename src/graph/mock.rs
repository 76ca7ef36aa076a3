//! Mocks for testing consumers of the analysis seams.
//!
//! `MockNetworkAnalyzer` returns a pre-configured report without touching a
//! graph; `MockReportSink` records every report it receives.

use anyhow::{bail, Result};
use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::engine::NetworkAnalyzer;
use super::filter::Selection;
use super::models::{AnalysisReport, AnalysisSummary};
use super::writer::ReportSink;

/// Build an empty report.
pub fn empty_report() -> AnalysisReport {
    AnalysisReport {
        run_id: Uuid::new_v4(),
        computed_at: Utc::now(),
        selected: vec![],
        paths: vec![],
        pair_frequencies: Default::default(),
        global_frequencies: Default::default(),
        occurrences: Default::default(),
        centrality: Default::default(),
        ubiquitous: None,
        summary: AnalysisSummary::default(),
    }
}

/// Mock implementation of `NetworkAnalyzer`.
///
/// Returns the configured report, or an empty one if not configured.
pub struct MockNetworkAnalyzer {
    result: Option<AnalysisReport>,
}

impl MockNetworkAnalyzer {
    pub fn new() -> Self {
        Self { result: None }
    }

    pub fn with_report(report: AnalysisReport) -> Self {
        Self {
            result: Some(report),
        }
    }
}

impl Default for MockNetworkAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl NetworkAnalyzer for MockNetworkAnalyzer {
    async fn analyze(&self, _selection: Selection) -> Result<AnalysisReport> {
        Ok(self.result.clone().unwrap_or_else(empty_report))
    }
}

/// Sink that keeps reports in memory.
pub struct MockReportSink {
    pub reports: RwLock<Vec<AnalysisReport>>,
    fail: bool,
}

impl MockReportSink {
    pub fn new() -> Self {
        Self {
            reports: RwLock::new(Vec::new()),
            fail: false,
        }
    }

    /// A sink whose writes always fail.
    pub fn failing() -> Self {
        Self {
            reports: RwLock::new(Vec::new()),
            fail: true,
        }
    }
}

impl Default for MockReportSink {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ReportSink for MockReportSink {
    async fn write(&self, report: &AnalysisReport) -> Result<()> {
        if self.fail {
            bail!("report sink unavailable");
        }
        self.reports.write().await.push(report.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_returns_empty_by_default() {
        let mock = MockNetworkAnalyzer::new();
        let report = mock
            .analyze(Selection::Random { count: 3 })
            .await
            .unwrap();
        assert_eq!(report.summary.path_count, 0);
        assert!(report.paths.is_empty());
    }

    #[tokio::test]
    async fn test_mock_returns_configured_report() {
        let mut configured = empty_report();
        configured.summary.path_count = 12;
        configured.summary.pair_count = 3;

        let mock = MockNetworkAnalyzer::with_report(configured);
        let report = mock
            .analyze(Selection::Explicit(vec!["A".into()]))
            .await
            .unwrap();
        assert_eq!(report.summary.path_count, 12);
        assert_eq!(report.summary.pair_count, 3);
    }
}
