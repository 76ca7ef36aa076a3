//! Interaction network path analysis engine.
//!
//! Enumerates every shortest path between selected entities of a biological
//! interaction network, aggregates how often each node lies on those paths,
//! flags ubiquitous nodes and scores betweenness centrality over the subgraph
//! the paths touched. Uses petgraph for storage, rustworkx-core for
//! betweenness and rayon for the bounded worker pool.
//!
//! ## Architecture
//!
//! ```text
//! loader (GraphSource) ──► extraction ──► petgraph::UnGraph
//!                                              │
//!                              filter ──► selected endpoints
//!                                              │
//!                               paths (one pool unit per pair)
//!                                              │
//!                                  frequency fold ──► ubiquity
//!                                              │
//!                          centrality (one pool unit per component)
//!                                              │
//!                                       AnalysisReport
//!                                              │
//!                                 writer ──► ReportSink
//! ```
//!
//! ## Modules
//!
//! - [`models`] — Data structures (InteractionGraph, NodePair, frequency tables, AnalysisConfig)
//! - [`error`] — `AnalysisError` taxonomy
//! - [`filter`] — Metabolite blacklist and endpoint selection
//! - [`paths`] — All-shortest-paths enumeration
//! - [`frequency`] — Per-pair and global frequency aggregation
//! - [`ubiquity`] — Ubiquitous node detection
//! - [`pool`] — Bounded rayon worker pool
//! - [`centrality`] — Component-parallel betweenness centrality
//! - [`extraction`] — Loader records → petgraph conversion via the GraphSource trait
//! - [`writer`] — Report hand-off via the ReportSink trait
//! - [`engine`] — `AnalysisRun`, `NetworkAnalyzer` trait and `GraphAnalyzer` orchestrator
//! - [`mock`] — `MockNetworkAnalyzer` and `MockReportSink` for testing (cfg(test) only)

pub mod centrality;
pub mod engine;
pub mod error;
pub mod extraction;
pub mod filter;
pub mod frequency;
pub mod models;
pub mod paths;
pub mod pool;
pub mod ubiquity;
pub mod writer;

#[cfg(test)]
pub mod mock;

// Re-export primary types for convenience
pub use centrality::{top_centrality_by_type, CentralityEngine, CentralityPlan, CentralityScores};
pub use engine::{AnalysisRun, GraphAnalyzer, NetworkAnalyzer};
pub use error::{AnalysisError, AnalysisResult};
pub use extraction::{GraphExtractor, GraphSource, InMemoryGraphSource, RawEdge, RawNode};
pub use filter::{Blacklist, NodeFilter, Selection, DEFAULT_BLACKLIST};
pub use frequency::FrequencyAggregator;
pub use models::{
    AnalysisConfig, AnalysisReport, AnalysisSummary, EntityNode, EntityType,
    GlobalFrequencyTable, Interaction, InteractionGraph, NodePair, OccurrenceCounts,
    PairFrequencies, PairFrequencyTable, PathRecord, TypedFrequencies,
};
pub use paths::{all_shortest_paths, shortest_path_length};
pub use pool::WorkerPool;
pub use ubiquity::identify_ubiquitous;
pub use writer::{AnalysisWriter, ReportSink};
