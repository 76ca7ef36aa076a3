//! Interaction network data models.
//!
//! Defines the type system shared by every stage of a path analysis run:
//!
//! ## Input types (loading → analysis)
//! - [`EntityType`] / [`EntityNode`] — typed biological entities
//! - [`Interaction`] — unit-weight undirected interaction
//! - [`InteractionGraph`] — petgraph wrapper with ID ↔ NodeIndex mapping
//!
//! ## Output types (analysis → reporting)
//! - [`NodePair`] / [`PathRecord`] — analyzed pairs and their shortest paths
//! - [`PairFrequencies`] / [`GlobalFrequencyTable`] / [`OccurrenceCounts`] — path frequencies
//! - [`AnalysisSummary`] / [`AnalysisReport`] — aggregated result of a run
//!
//! ## Configuration
//! - [`AnalysisConfig`] — tuning parameters for selection, ubiquity and centrality

use petgraph::graph::{EdgeIndex, NodeIndex, UnGraph};
use petgraph::visit::EdgeRef;
use serde::{Deserialize, Serialize, Serializer};
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

use super::error::{AnalysisError, AnalysisResult};

// ============================================================================
// Input types — Graph structure
// ============================================================================

/// Category of a biological entity.
///
/// Closed set: anything the loader cannot map resolves to [`EntityType::Unknown`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub enum EntityType {
    Protein,
    SmallMolecule,
    Reaction,
    Complex,
    #[default]
    Unknown,
}

impl EntityType {
    /// Map a BioPAX-style type string (`biopaxType` attribute) to an entity type.
    pub fn from_biopax(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "protein" | "proteinreference" => Self::Protein,
            "smallmolecule" | "small_molecule" | "small molecule" | "smallmoleculereference" => {
                Self::SmallMolecule
            }
            "reaction"
            | "biochemicalreaction"
            | "transport"
            | "transportwithbiochemicalreaction"
            | "complexassembly"
            | "degradation"
            | "catalysis"
            | "control"
            | "modulation"
            | "templatereaction"
            | "templatereactionregulation"
            | "conversion" => Self::Reaction,
            "complex" => Self::Complex,
            _ => Self::Unknown,
        }
    }
}

impl std::fmt::Display for EntityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Protein => write!(f, "Protein"),
            Self::SmallMolecule => write!(f, "SmallMolecule"),
            Self::Reaction => write!(f, "Reaction"),
            Self::Complex => write!(f, "Complex"),
            Self::Unknown => write!(f, "Unknown"),
        }
    }
}

impl From<&str> for EntityType {
    fn from(raw: &str) -> Self {
        Self::from_biopax(raw)
    }
}

/// A typed entity of the interaction network.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityNode {
    /// Unique identifier within the graph
    pub id: String,
    /// Biological category
    pub entity_type: EntityType,
    /// Display name assigned by the relabeling step (empty → the id is used)
    #[serde(default)]
    pub name: String,
}

impl EntityNode {
    pub fn new(id: impl Into<String>, entity_type: EntityType) -> Self {
        Self {
            id: id.into(),
            entity_type,
            name: String::new(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Name used for blacklist matching and reporting.
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            &self.id
        } else {
            &self.name
        }
    }
}

/// An undirected interaction between two entities. All interactions weigh 1.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Interaction {
    /// Interaction kind as found in the source file (reporting only)
    pub label: Option<String>,
}

// ============================================================================
// InteractionGraph — petgraph wrapper with ID mapping
// ============================================================================

/// Wrapper around `petgraph::UnGraph` with ID ↔ NodeIndex mapping.
///
/// Adjacency is symmetric by construction and parallel interactions are
/// collapsed into one edge, so every neighbor appears once.
#[derive(Debug, Clone)]
pub struct InteractionGraph {
    /// The underlying undirected graph
    pub graph: UnGraph<EntityNode, Interaction>,
    /// Mapping from node ID to petgraph NodeIndex
    pub id_to_index: HashMap<String, NodeIndex>,
}

impl InteractionGraph {
    pub fn new() -> Self {
        Self {
            graph: UnGraph::new_undirected(),
            id_to_index: HashMap::new(),
        }
    }

    pub fn with_capacity(nodes: usize, edges: usize) -> Self {
        Self {
            graph: UnGraph::with_capacity(nodes, edges),
            id_to_index: HashMap::with_capacity(nodes),
        }
    }

    /// Add a node to the graph. Returns the NodeIndex.
    /// If a node with the same ID already exists, returns its existing index.
    pub fn add_node(&mut self, node: EntityNode) -> NodeIndex {
        if let Some(&idx) = self.id_to_index.get(&node.id) {
            return idx;
        }
        let id = node.id.clone();
        let idx = self.graph.add_node(node);
        self.id_to_index.insert(id, idx);
        idx
    }

    /// Add an interaction between two nodes identified by their IDs.
    /// Returns `None` if either endpoint is unknown. Re-adding an existing
    /// interaction returns the existing edge.
    pub fn add_edge(&mut self, a: &str, b: &str, interaction: Interaction) -> Option<EdgeIndex> {
        let a_idx = *self.id_to_index.get(a)?;
        let b_idx = *self.id_to_index.get(b)?;
        Some(self.graph.update_edge(a_idx, b_idx, interaction))
    }

    pub fn get_node(&self, id: &str) -> Option<&EntityNode> {
        let idx = self.id_to_index.get(id)?;
        self.graph.node_weight(*idx)
    }

    pub fn get_index(&self, id: &str) -> Option<NodeIndex> {
        self.id_to_index.get(id).copied()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.id_to_index.contains_key(id)
    }

    /// Type of a node; unknown IDs resolve to [`EntityType::Unknown`].
    pub fn node_type(&self, id: &str) -> EntityType {
        self.get_node(id)
            .map(|n| n.entity_type)
            .unwrap_or(EntityType::Unknown)
    }

    /// Undirected neighbors of a node (empty for unknown IDs).
    pub fn neighbors<'a>(&'a self, id: &str) -> impl Iterator<Item = &'a str> + 'a {
        let idx = self.get_index(id);
        idx.into_iter()
            .flat_map(move |i| self.graph.neighbors(i))
            .map(move |n| self.graph[n].id.as_str())
    }

    /// All node IDs in insertion order.
    pub fn node_ids(&self) -> impl Iterator<Item = &str> {
        self.graph.node_weights().map(|n| n.id.as_str())
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Build the subgraph induced by `ids`. IDs absent from the graph are ignored.
    /// Node order follows the parent graph, so the result is deterministic.
    pub fn induced_subgraph<'a, I>(&self, ids: I) -> InteractionGraph
    where
        I: IntoIterator<Item = &'a str>,
    {
        let keep: HashSet<NodeIndex> = ids
            .into_iter()
            .filter_map(|id| self.get_index(id))
            .collect();

        let mut sub = InteractionGraph::with_capacity(keep.len(), keep.len() * 2);
        for idx in self.graph.node_indices() {
            if keep.contains(&idx) {
                sub.add_node(self.graph[idx].clone());
            }
        }
        for edge in self.graph.edge_references() {
            if keep.contains(&edge.source()) && keep.contains(&edge.target()) {
                sub.add_edge(
                    &self.graph[edge.source()].id,
                    &self.graph[edge.target()].id,
                    edge.weight().clone(),
                );
            }
        }
        sub
    }
}

impl Default for InteractionGraph {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Output types — Paths and frequencies
// ============================================================================

/// Unordered pair of node IDs, stored with the smaller ID first.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodePair {
    first: String,
    second: String,
}

impl NodePair {
    pub fn new(a: impl Into<String>, b: impl Into<String>) -> Self {
        let (a, b) = (a.into(), b.into());
        if a <= b {
            Self {
                first: a,
                second: b,
            }
        } else {
            Self {
                first: b,
                second: a,
            }
        }
    }

    pub fn first(&self) -> &str {
        &self.first
    }

    pub fn second(&self) -> &str {
        &self.second
    }

    pub fn contains(&self, id: &str) -> bool {
        self.first == id || self.second == id
    }
}

impl std::fmt::Display for NodePair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}|{}", self.first, self.second)
    }
}

// Serialized as "A|B" so pairs can key JSON objects.
impl Serialize for NodePair {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// One shortest path found between two nodes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathRecord {
    pub start: String,
    pub end: String,
    /// Node IDs from `start` to `end`
    pub nodes: Vec<String>,
    /// Number of edges (`nodes.len() - 1`)
    pub length: usize,
}

impl PathRecord {
    pub fn new(nodes: Vec<String>) -> Self {
        Self {
            start: nodes.first().cloned().unwrap_or_default(),
            end: nodes.last().cloned().unwrap_or_default(),
            length: nodes.len().saturating_sub(1),
            nodes,
        }
    }
}

/// Frequencies grouped by entity type: type → node → value.
pub type TypedFrequencies = BTreeMap<EntityType, BTreeMap<String, f64>>;

/// Normalized node frequencies for a single analyzed pair.
#[derive(Debug, Clone, Serialize)]
pub struct PairFrequencies {
    pub pair: NodePair,
    /// Number of shortest paths found for the pair (always ≥ 1)
    pub path_count: usize,
    /// Raw occurrences of each node across the pair's paths
    pub raw_counts: BTreeMap<String, usize>,
    /// occurrence count ÷ path count, grouped by type
    pub frequencies: TypedFrequencies,
}

impl PairFrequencies {
    /// Normalized frequency of `node` for this pair.
    pub fn frequency(&self, node: &str) -> Option<f64> {
        self.frequencies
            .values()
            .find_map(|nodes| nodes.get(node).copied())
    }
}

/// Pair → per-pair frequencies. Pairs without any path are never recorded.
pub type PairFrequencyTable = BTreeMap<NodePair, PairFrequencies>;

/// Sum of per-pair normalized frequencies across a run, grouped by type.
#[derive(Debug, Clone, Default, Serialize)]
pub struct GlobalFrequencyTable {
    pub(crate) by_type: TypedFrequencies,
}

impl GlobalFrequencyTable {
    pub fn by_type(&self) -> &TypedFrequencies {
        &self.by_type
    }

    pub fn get(&self, node: &str) -> Option<f64> {
        self.by_type
            .values()
            .find_map(|nodes| nodes.get(node).copied())
    }

    /// Number of distinct nodes in the table.
    pub fn len(&self) -> usize {
        self.by_type.values().map(|nodes| nodes.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Highest `limit` nodes of each type, by descending frequency then ID.
    pub fn top_by_type(&self, limit: usize) -> BTreeMap<EntityType, Vec<(String, f64)>> {
        self.by_type
            .iter()
            .map(|(ty, nodes)| {
                let mut ranked: Vec<(String, f64)> =
                    nodes.iter().map(|(id, v)| (id.clone(), *v)).collect();
                ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
                ranked.truncate(limit);
                (*ty, ranked)
            })
            .collect()
    }
}

/// Raw node occurrences across every path of a run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct OccurrenceCounts {
    pub(crate) counts: BTreeMap<String, usize>,
    pub(crate) total_paths: usize,
}

impl OccurrenceCounts {
    pub fn counts(&self) -> &BTreeMap<String, usize> {
        &self.counts
    }

    pub fn count(&self, node: &str) -> usize {
        self.counts.get(node).copied().unwrap_or(0)
    }

    pub fn total_paths(&self) -> usize {
        self.total_paths
    }
}

// ============================================================================
// Aggregated analysis result
// ============================================================================

/// Summary counts of a run, for reporting only.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalysisSummary {
    /// Nodes eligible as analysis endpoints (type + blacklist)
    pub eligible_count: usize,
    /// Nodes in the input graph
    pub graph_node_count: usize,
    pub selected_count: usize,
    /// Unordered pairs analyzed
    pub pair_count: usize,
    /// Pairs with at least one path
    pub connected_pair_count: usize,
    /// Shortest paths found across all pairs
    pub path_count: usize,
    /// Distinct nodes touched by any path
    pub analyzed_node_count: usize,
    pub computation_ms: u64,
}

/// Complete result of one analysis run, handed to the reporting collaborator.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub run_id: uuid::Uuid,
    pub computed_at: chrono::DateTime<chrono::Utc>,
    pub selected: Vec<String>,
    pub paths: Vec<PathRecord>,
    pub pair_frequencies: PairFrequencyTable,
    pub global_frequencies: GlobalFrequencyTable,
    pub occurrences: OccurrenceCounts,
    pub centrality: HashMap<String, f64>,
    /// `None` when ubiquity tracking is disabled
    pub ubiquitous: Option<BTreeSet<String>>,
    pub summary: AnalysisSummary,
}

impl AnalysisReport {
    /// Paths sorted by length then start node, the order reports list them in.
    pub fn sorted_paths(&self) -> Vec<&PathRecord> {
        let mut paths: Vec<&PathRecord> = self.paths.iter().collect();
        paths.sort_by(|a, b| {
            a.length
                .cmp(&b.length)
                .then_with(|| a.start.cmp(&b.start))
                .then_with(|| a.nodes.cmp(&b.nodes))
        });
        paths
    }
}

// ============================================================================
// Configuration
// ============================================================================

/// Tuning parameters for a path analysis run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Apply the metabolite blacklist to endpoint selection (default: true)
    pub blacklist_enabled: bool,
    /// Patterns added to the default blacklist
    pub extra_blacklist: Vec<String>,
    /// Entity types eligible for random selection (default: Protein)
    pub endpoint_types: Vec<EntityType>,
    /// Occurrence ratio at which a node counts as ubiquitous (default: 0.9)
    pub ubiquity_threshold: f64,
    /// Compute the ubiquitous node set (default: true)
    pub track_ubiquity: bool,
    /// Pair every selected node with itself and enumerate its zero-length path
    /// (default: false). Self-pairs count toward `pair_count`, `path_count` and
    /// the pair and global frequency tables, but not toward the occurrence
    /// counts used for ubiquity.
    pub include_self_paths: bool,
    /// Scoped subgraphs at or above this size are decomposed even when connected (default: 1000)
    pub large_graph_threshold: usize,
    /// Worker pool size; `None` uses the available parallelism
    pub max_workers: Option<usize>,
    /// Seed for random selection; `None` draws from entropy
    pub seed: Option<u64>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            blacklist_enabled: true,
            extra_blacklist: vec![],
            endpoint_types: vec![EntityType::Protein],
            ubiquity_threshold: 0.9,
            track_ubiquity: true,
            include_self_paths: false,
            large_graph_threshold: 1000,
            max_workers: None,
            seed: None,
        }
    }
}

impl AnalysisConfig {
    pub fn validate(&self) -> AnalysisResult<()> {
        if !(0.0..=1.0).contains(&self.ubiquity_threshold) {
            return Err(AnalysisError::InvalidThreshold(self.ubiquity_threshold));
        }
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
