//! Betweenness centrality over the analysis-scoped subgraph.
//!
//! The scope is the set of nodes touched by the enumerated paths, so the cost
//! is bounded by what was analyzed rather than by the whole input network.
//!
//! ## Plans
//!
//! - **WholeGraph**: the scoped subgraph is connected and below the
//!   large-graph threshold → one normalized betweenness computation.
//! - **PerComponent**: the subgraph is disconnected (or large) → each
//!   component of two or more nodes is scored on the worker pool, isolated
//!   nodes score 0.0, and every score is scaled by
//!   `component size / scoped node count` so large fragments dominate.
//!
//! Components share no shortest paths, so decomposition loses nothing. A
//! component whose computation fails scores 0.0 without affecting the others.

use std::collections::{BTreeMap, HashMap, VecDeque};
use std::panic::{catch_unwind, AssertUnwindSafe};
use tracing::{debug, info, warn};

use super::error::{AnalysisError, AnalysisResult};
use super::models::{EntityType, InteractionGraph};
use super::pool::WorkerPool;

/// Node ID → betweenness score.
pub type CentralityScores = HashMap<String, f64>;

/// Node count from which rustworkx parallelizes a single computation.
const PARALLEL_THRESHOLD: usize = 200;

// ============================================================================
// Betweenness Centrality (via rustworkx-core)
// ============================================================================

/// Compute normalized betweenness centrality for all nodes of `graph`.
///
/// Endpoints excluded; scores on a connected graph are in [0, 1].
pub fn betweenness_centrality(graph: &InteractionGraph) -> CentralityScores {
    let g = &graph.graph;
    if g.node_count() == 0 {
        return HashMap::new();
    }

    let scores = rustworkx_core::centrality::betweenness_centrality(
        g,
        false, // include_endpoints
        true,  // normalized
        PARALLEL_THRESHOLD,
    );

    let mut result = HashMap::with_capacity(g.node_count());
    for idx in g.node_indices() {
        let score = scores[idx.index()].unwrap_or(0.0);
        result.insert(g[idx].id.clone(), score);
    }
    result
}

/// Highest `limit` scores of each entity type, by descending score then ID.
pub fn top_centrality_by_type(
    scores: &CentralityScores,
    graph: &InteractionGraph,
    limit: usize,
) -> BTreeMap<EntityType, Vec<(String, f64)>> {
    let mut grouped: BTreeMap<EntityType, Vec<(String, f64)>> = BTreeMap::new();
    for (node, score) in scores {
        grouped
            .entry(graph.node_type(node))
            .or_default()
            .push((node.clone(), *score));
    }
    for ranked in grouped.values_mut() {
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        ranked.truncate(limit);
    }
    grouped
}

// ============================================================================
// Connected Components
// ============================================================================

/// Connected components of the undirected view, largest first.
///
/// Members keep the graph's node order; ties on size are broken by the first
/// member's ID so the ordering is deterministic.
pub fn connected_components(graph: &InteractionGraph) -> Vec<Vec<String>> {
    let g = &graph.graph;
    let n = g.node_count();
    if n == 0 {
        return vec![];
    }

    let mut component_of: Vec<Option<usize>> = vec![None; n];
    let mut component_count = 0usize;

    for start in g.node_indices() {
        if component_of[start.index()].is_some() {
            continue;
        }
        let mut queue = VecDeque::new();
        queue.push_back(start);
        component_of[start.index()] = Some(component_count);

        while let Some(current) = queue.pop_front() {
            for neighbor in g.neighbors(current) {
                if component_of[neighbor.index()].is_none() {
                    component_of[neighbor.index()] = Some(component_count);
                    queue.push_back(neighbor);
                }
            }
        }
        component_count += 1;
    }

    let mut components: Vec<Vec<String>> = vec![Vec::new(); component_count];
    for idx in g.node_indices() {
        if let Some(comp) = component_of[idx.index()] {
            components[comp].push(g[idx].id.clone());
        }
    }
    components.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.first().cmp(&b.first())));
    components
}

// ============================================================================
// Component-parallel engine
// ============================================================================

/// How a scoped subgraph will be scored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CentralityPlan {
    /// Nothing to score
    Empty,
    /// Connected and small: a single computation
    WholeGraph,
    /// One unit of work per component, largest first
    PerComponent(Vec<Vec<String>>),
}

pub struct CentralityEngine<'p> {
    pool: &'p WorkerPool,
    large_graph_threshold: usize,
}

impl<'p> CentralityEngine<'p> {
    pub fn new(pool: &'p WorkerPool, large_graph_threshold: usize) -> Self {
        Self {
            pool,
            large_graph_threshold,
        }
    }

    /// Decide how to score `scoped` from its component structure.
    pub fn plan(&self, scoped: &InteractionGraph) -> CentralityPlan {
        if scoped.node_count() == 0 {
            return CentralityPlan::Empty;
        }
        let components = connected_components(scoped);
        if components.len() == 1 && scoped.node_count() < self.large_graph_threshold {
            CentralityPlan::WholeGraph
        } else {
            CentralityPlan::PerComponent(components)
        }
    }

    /// Betweenness centrality of the subgraph of `graph` induced by `scope`.
    /// Returns one score per scoped node present in the graph.
    pub fn compute_centrality<'a, I>(&self, graph: &InteractionGraph, scope: I) -> CentralityScores
    where
        I: IntoIterator<Item = &'a str>,
    {
        let scoped = graph.induced_subgraph(scope);
        match self.plan(&scoped) {
            CentralityPlan::Empty => HashMap::new(),
            CentralityPlan::WholeGraph => {
                info!(
                    nodes = scoped.node_count(),
                    edges = scoped.edge_count(),
                    "Computing centrality on connected subgraph"
                );
                let outcome = score_component(0, &scoped, betweenness_centrality);
                let members: Vec<String> = scoped.node_ids().map(str::to_string).collect();
                let mut outcomes = HashMap::new();
                outcomes.insert(0, outcome);
                recombine(&[members], outcomes, scoped.node_count())
            }
            CentralityPlan::PerComponent(components) => {
                info!(
                    nodes = scoped.node_count(),
                    components = components.len(),
                    workers = self.pool.workers(),
                    "Computing centrality per connected component"
                );
                self.score_components(&scoped, &components)
            }
        }
    }

    fn score_components(
        &self,
        scoped: &InteractionGraph,
        components: &[Vec<String>],
    ) -> CentralityScores {
        self.score_components_with(scoped, components, betweenness_centrality)
    }

    fn score_components_with<F>(
        &self,
        scoped: &InteractionGraph,
        components: &[Vec<String>],
        scorer: F,
    ) -> CentralityScores
    where
        F: Fn(&InteractionGraph) -> CentralityScores + Sync + Send,
    {
        let work: Vec<(usize, &Vec<String>)> = components
            .iter()
            .enumerate()
            .filter(|(_, members)| members.len() >= 2)
            .collect();

        let results = self.pool.map(&work, |&(id, members)| {
            let sub = scoped.induced_subgraph(members.iter().map(String::as_str));
            score_component(id, &sub, &scorer)
        });

        let outcomes: HashMap<usize, AnalysisResult<CentralityScores>> =
            work.iter().map(|(id, _)| *id).zip(results).collect();
        recombine(components, outcomes, scoped.node_count())
    }
}

/// Score one connected component, turning panics and non-finite scores into
/// a `ComponentFailed` error.
fn score_component<F>(
    component: usize,
    graph: &InteractionGraph,
    scorer: F,
) -> AnalysisResult<CentralityScores>
where
    F: Fn(&InteractionGraph) -> CentralityScores,
{
    let scores = catch_unwind(AssertUnwindSafe(|| scorer(graph))).map_err(
        |panic| {
            let reason = panic
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| panic.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "worker panicked".to_string());
            AnalysisError::ComponentFailed { component, reason }
        },
    )?;

    if let Some((node, value)) = scores.iter().find(|(_, v)| !v.is_finite()) {
        return Err(AnalysisError::ComponentFailed {
            component,
            reason: format!("non-finite score {} for {}", value, node),
        });
    }
    debug!(component, nodes = graph.node_count(), "Component scored");
    Ok(scores)
}

/// Merge per-component outcomes into one score map.
///
/// Each score is scaled by `component size / total`. Single-node components,
/// failed components and components without an outcome score 0.0.
pub fn recombine(
    components: &[Vec<String>],
    mut outcomes: HashMap<usize, AnalysisResult<CentralityScores>>,
    total: usize,
) -> CentralityScores {
    let mut scores = HashMap::with_capacity(total);

    for (id, members) in components.iter().enumerate() {
        let outcome = if members.len() < 2 {
            None
        } else {
            outcomes.remove(&id)
        };

        match outcome {
            Some(Ok(component_scores)) => {
                let factor = members.len() as f64 / total.max(1) as f64;
                for member in members {
                    let score = component_scores.get(member).copied().unwrap_or(0.0);
                    scores.insert(member.clone(), score * factor);
                }
            }
            Some(Err(err)) => {
                warn!(
                    component = id,
                    size = members.len(),
                    error = %err,
                    "Centrality computation failed, scoring component as 0.0"
                );
                for member in members {
                    scores.insert(member.clone(), 0.0);
                }
            }
            None => {
                for member in members {
                    scores.insert(member.clone(), 0.0);
                }
            }
        }
    }
    scores
}

// ============================================================================
// Tests
// ============================================================================
