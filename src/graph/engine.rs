//! Analysis engine — orchestrates a full path analysis run.
//!
//! [`AnalysisRun`] owns one run over a loaded graph:
//!
//! 1. **Selection**: eligible endpoints via [`NodeFilter`]
//! 2. **Paths**: all shortest paths for every unordered pair, one pool unit per pair
//! 3. **Frequencies**: per-pair and global tables folded in pair order
//! 4. **Centrality**: betweenness over the nodes touched by any path
//! 5. **Ubiquity**: nodes present on most of the run's paths
//!
//! The [`NetworkAnalyzer`] trait is the single entry point for collaborators
//! and enables mocking in downstream consumer tests.

use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};
use uuid::Uuid;

use super::centrality::CentralityEngine;
use super::error::AnalysisResult;
use super::extraction::GraphSource;
use super::filter::{NodeFilter, Selection};
use super::frequency::FrequencyAggregator;
use super::models::{
    AnalysisConfig, AnalysisReport, AnalysisSummary, InteractionGraph, NodePair, PathRecord,
};
use super::paths::all_shortest_paths;
use super::pool::WorkerPool;
use super::ubiquity::identify_ubiquitous;
use super::writer::{AnalysisWriter, ReportSink};

// ============================================================================
// Single run
// ============================================================================

/// Accumulator threaded through the fold over analyzed pairs.
#[derive(Debug, Default)]
struct PathFold {
    frequencies: FrequencyAggregator,
    paths: Vec<PathRecord>,
    analyzed: BTreeSet<String>,
    connected_pairs: usize,
}

impl PathFold {
    fn absorb(mut self, graph: &InteractionGraph, pair: &NodePair, paths: Vec<PathRecord>) -> Self {
        if self.frequencies.fold(graph, pair, &paths) {
            self.connected_pairs += 1;
            for path in &paths {
                self.analyzed.extend(path.nodes.iter().cloned());
            }
            self.paths.extend(paths);
        }
        self
    }
}

/// One analysis run over a shared, read-only graph.
#[derive(Debug)]
pub struct AnalysisRun {
    graph: Arc<InteractionGraph>,
    config: AnalysisConfig,
    filter: NodeFilter,
    pool: WorkerPool,
}

impl AnalysisRun {
    /// Validate `config` and prepare a run. The worker pool is sized here.
    pub fn new(graph: Arc<InteractionGraph>, config: AnalysisConfig) -> AnalysisResult<Self> {
        config.validate()?;
        let filter = NodeFilter::from_config(&config);
        let pool = WorkerPool::new(config.max_workers);
        Ok(Self {
            graph,
            config,
            filter,
            pool,
        })
    }

    pub fn graph(&self) -> &InteractionGraph {
        &self.graph
    }

    pub fn filter(&self) -> &NodeFilter {
        &self.filter
    }

    pub fn select(&self, selection: &Selection) -> AnalysisResult<Vec<String>> {
        self.filter.select(&self.graph, selection)
    }

    /// Unique unordered pairs of `selected`. Self-pairs are added only when
    /// zero-length paths are enabled.
    pub fn pairs(&self, selected: &[String]) -> Vec<NodePair> {
        let mut pairs = BTreeSet::new();
        for (i, a) in selected.iter().enumerate() {
            if self.config.include_self_paths {
                pairs.insert(NodePair::new(a.as_str(), a.as_str()));
            }
            for b in &selected[i + 1..] {
                if a != b {
                    pairs.insert(NodePair::new(a.as_str(), b.as_str()));
                }
            }
        }
        pairs.into_iter().collect()
    }

    /// Run the whole analysis. Selection errors abort before any path work.
    pub fn run(&self, selection: &Selection) -> AnalysisResult<AnalysisReport> {
        let started = Instant::now();
        let graph: &InteractionGraph = &self.graph;

        let eligible_count = self.filter.eligible_pool(graph).len();
        let selected = self.select(selection)?;
        let pairs = self.pairs(&selected);
        info!(
            selected = selected.len(),
            pairs = pairs.len(),
            workers = self.pool.workers(),
            "Starting path analysis"
        );

        let include_self = self.config.include_self_paths;
        let discovered = self.pool.map(&pairs, |pair| {
            all_shortest_paths(graph, pair.first(), pair.second(), include_self)
        });

        let fold = pairs
            .iter()
            .zip(discovered)
            .fold(PathFold::default(), |acc, (pair, paths)| {
                acc.absorb(graph, pair, paths)
            });
        debug!(
            connected_pairs = fold.connected_pairs,
            paths = fold.paths.len(),
            analyzed_nodes = fold.analyzed.len(),
            "Path discovery finished"
        );

        let centrality = CentralityEngine::new(&self.pool, self.config.large_graph_threshold)
            .compute_centrality(graph, fold.analyzed.iter().map(String::as_str));

        let (pair_frequencies, global_frequencies, occurrences) = fold.frequencies.into_parts();
        let ubiquitous = self.config.track_ubiquity.then(|| {
            identify_ubiquitous(
                occurrences.counts(),
                occurrences.total_paths(),
                self.config.ubiquity_threshold,
            )
        });

        let summary = AnalysisSummary {
            eligible_count,
            graph_node_count: graph.node_count(),
            selected_count: selected.len(),
            pair_count: pairs.len(),
            connected_pair_count: fold.connected_pairs,
            path_count: fold.paths.len(),
            analyzed_node_count: fold.analyzed.len(),
            computation_ms: started.elapsed().as_millis() as u64,
        };
        info!(
            paths = summary.path_count,
            connected_pairs = summary.connected_pair_count,
            ubiquitous = ubiquitous.as_ref().map(|u| u.len()).unwrap_or(0),
            elapsed_ms = summary.computation_ms,
            "Path analysis complete"
        );

        Ok(AnalysisReport {
            run_id: Uuid::new_v4(),
            computed_at: Utc::now(),
            selected,
            paths: fold.paths,
            pair_frequencies,
            global_frequencies,
            occurrences,
            centrality,
            ubiquitous,
            summary,
        })
    }
}

// ============================================================================
// Trait
// ============================================================================

/// Network analyzer trait — single entry point for collaborators.
///
/// Consumers use `Arc<dyn NetworkAnalyzer>` for dependency injection.
/// The real implementation (`GraphAnalyzer`) performs load → analyze → report.
/// A mock implementation (`MockNetworkAnalyzer`) returns a pre-configured report.
#[async_trait]
pub trait NetworkAnalyzer: Send + Sync {
    /// Analyze the network for the given endpoint selection.
    async fn analyze(&self, selection: Selection) -> Result<AnalysisReport>;
}

// ============================================================================
// Concrete implementation
// ============================================================================

/// Analyzer backed by a loader and a report sink.
///
/// ```
/// use std::sync::Arc;
/// use interactome_analyzer::graph::{
///     AnalysisConfig, AnalysisReport, GraphAnalyzer, InMemoryGraphSource, NetworkAnalyzer,
///     RawEdge, RawNode, ReportSink, Selection,
/// };
///
/// struct Discard;
///
/// #[async_trait::async_trait]
/// impl ReportSink for Discard {
///     async fn write(&self, _report: &AnalysisReport) -> anyhow::Result<()> {
///         Ok(())
///     }
/// }
///
/// # tokio_test::block_on(async {
/// let protein = |id: &str| RawNode {
///     id: id.into(),
///     name: String::new(),
///     entity_type: Some("Protein".into()),
/// };
/// let edge = |a: &str, b: &str| RawEdge {
///     source: a.into(),
///     target: b.into(),
///     label: None,
/// };
/// let source = InMemoryGraphSource::new(
///     vec![protein("EGFR"), protein("GRB2"), protein("SOS1")],
///     vec![edge("EGFR", "GRB2"), edge("GRB2", "SOS1")],
/// );
///
/// let analyzer = GraphAnalyzer::new(Arc::new(source), Arc::new(Discard), AnalysisConfig::default());
/// let report = analyzer
///     .analyze(Selection::Explicit(vec!["EGFR".into(), "SOS1".into()]))
///     .await
///     .unwrap();
/// assert_eq!(report.summary.path_count, 1);
/// # });
/// ```
pub struct GraphAnalyzer {
    source: Arc<dyn GraphSource>,
    writer: AnalysisWriter,
    config: AnalysisConfig,
}

impl GraphAnalyzer {
    pub fn new(
        source: Arc<dyn GraphSource>,
        sink: Arc<dyn ReportSink>,
        config: AnalysisConfig,
    ) -> Self {
        Self {
            source,
            writer: AnalysisWriter::new(sink),
            config,
        }
    }
}

#[async_trait]
impl NetworkAnalyzer for GraphAnalyzer {
    async fn analyze(&self, selection: Selection) -> Result<AnalysisReport> {
        // 1. Load
        let graph = Arc::new(self.source.load().await?);

        // 2. Analyze off the async runtime
        let config = self.config.clone();
        let report = tokio::task::spawn_blocking(move || {
            AnalysisRun::new(graph, config)?.run(&selection)
        })
        .await??;

        // 3. Report
        self.writer.write_report(&report).await?;

        Ok(report)
    }
}

// ============================================================================
// Tests
// ============================================================================
