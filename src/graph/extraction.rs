//! Loader collaborator seam.
//!
//! File parsing (GraphML) and display-name relabeling live outside this crate.
//! A loader hands over flat node and edge records through [`GraphSource`];
//! [`GraphExtractor`] turns them into an [`InteractionGraph`], mapping type
//! strings onto [`EntityType`] and dropping edges whose endpoints are unknown.

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::models::{EntityNode, EntityType, Interaction, InteractionGraph};

/// A node record as produced by a loader.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawNode {
    pub id: String,
    /// Display name after relabeling (may be empty)
    #[serde(default)]
    pub name: String,
    /// Type attribute as found in the source (e.g. BioPAX `biopaxType`)
    #[serde(default)]
    pub entity_type: Option<String>,
}

/// An edge record as produced by a loader. Direction is ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawEdge {
    pub source: String,
    pub target: String,
    #[serde(default)]
    pub label: Option<String>,
}

/// Supplies a fully loaded graph. Implemented by the loading collaborator.
#[async_trait]
pub trait GraphSource: Send + Sync {
    async fn load(&self) -> Result<InteractionGraph>;
}

/// Builds an [`InteractionGraph`] from loader records.
pub struct GraphExtractor;

impl GraphExtractor {
    pub fn build(nodes: &[RawNode], edges: &[RawEdge]) -> InteractionGraph {
        let mut graph = InteractionGraph::with_capacity(nodes.len(), edges.len());

        for raw in nodes {
            let entity_type = raw
                .entity_type
                .as_deref()
                .map(EntityType::from_biopax)
                .unwrap_or_default();
            graph.add_node(EntityNode::new(raw.id.as_str(), entity_type).with_name(raw.name.as_str()));
        }

        let mut skipped = 0usize;
        for raw in edges {
            let interaction = Interaction {
                label: raw.label.clone(),
            };
            if graph.add_edge(&raw.source, &raw.target, interaction).is_none() {
                skipped += 1;
            }
        }
        if skipped > 0 {
            warn!(skipped, "Dropped interactions with an unknown endpoint");
        }

        debug!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "Interaction graph built"
        );
        graph
    }
}

/// Source backed by records already in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryGraphSource {
    nodes: Vec<RawNode>,
    edges: Vec<RawEdge>,
}

impl InMemoryGraphSource {
    pub fn new(nodes: Vec<RawNode>, edges: Vec<RawEdge>) -> Self {
        Self { nodes, edges }
    }
}

#[async_trait]
impl GraphSource for InMemoryGraphSource {
    async fn load(&self) -> Result<InteractionGraph> {
        Ok(GraphExtractor::build(&self.nodes, &self.edges))
    }
}
