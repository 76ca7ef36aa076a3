//! All-shortest-paths enumeration on the undirected interaction view.
//!
//! A BFS from the start node records, for every node reached, each predecessor
//! lying on a minimum-length route. Backtracking over those predecessor lists
//! from the end node yields every shortest path, not just one.

use petgraph::graph::NodeIndex;
use std::collections::VecDeque;

use super::models::{InteractionGraph, PathRecord};

/// BFS distances and shortest-route predecessors from a single source.
struct BfsLayers {
    dist: Vec<Option<usize>>,
    preds: Vec<Vec<NodeIndex>>,
}

impl BfsLayers {
    /// Explore from `source`, stopping once the layer of `target` is complete.
    fn explore(graph: &InteractionGraph, source: NodeIndex, target: Option<NodeIndex>) -> Self {
        let g = &graph.graph;
        let bound = g.node_count();
        let mut dist: Vec<Option<usize>> = vec![None; bound];
        let mut preds: Vec<Vec<NodeIndex>> = vec![Vec::new(); bound];

        dist[source.index()] = Some(0);
        let mut queue = VecDeque::new();
        queue.push_back((source, 0usize));

        while let Some((current, d)) = queue.pop_front() {
            if let Some(t) = target {
                if matches!(dist[t.index()], Some(dt) if d >= dt) {
                    break;
                }
            }
            for neighbor in g.neighbors(current) {
                match dist[neighbor.index()] {
                    None => {
                        dist[neighbor.index()] = Some(d + 1);
                        preds[neighbor.index()].push(current);
                        queue.push_back((neighbor, d + 1));
                    }
                    Some(nd) if nd == d + 1 => preds[neighbor.index()].push(current),
                    _ => {}
                }
            }
        }

        Self { dist, preds }
    }
}

/// Every minimum-length path between `start` and `end`.
///
/// Returns an empty vec when no path exists or either ID is unknown; callers
/// validate IDs before searching. When `start == end` the result is a single
/// zero-length path if `include_self` is set, empty otherwise.
pub fn all_shortest_paths(
    graph: &InteractionGraph,
    start: &str,
    end: &str,
    include_self: bool,
) -> Vec<PathRecord> {
    let (Some(source), Some(target)) = (graph.get_index(start), graph.get_index(end)) else {
        return Vec::new();
    };
    if source == target {
        return if include_self {
            vec![PathRecord::new(vec![start.to_string()])]
        } else {
            Vec::new()
        };
    }

    let layers = BfsLayers::explore(graph, source, Some(target));
    if layers.dist[target.index()].is_none() {
        return Vec::new();
    }

    // Walk predecessor lists back from the target; trails are built end → start.
    let g = &graph.graph;
    let mut paths = Vec::new();
    let mut stack: Vec<(NodeIndex, Vec<NodeIndex>)> = vec![(target, vec![target])];
    while let Some((node, trail)) = stack.pop() {
        if node == source {
            let nodes = trail.iter().rev().map(|idx| g[*idx].id.clone()).collect();
            paths.push(PathRecord::new(nodes));
            continue;
        }
        for &pred in &layers.preds[node.index()] {
            let mut next = trail.clone();
            next.push(pred);
            stack.push((pred, next));
        }
    }
    paths
}

/// Shortest-path distance in edges, `None` when unreachable or unknown.
pub fn shortest_path_length(graph: &InteractionGraph, start: &str, end: &str) -> Option<usize> {
    let source = graph.get_index(start)?;
    let target = graph.get_index(end)?;
    BfsLayers::explore(graph, source, Some(target)).dist[target.index()]
}
