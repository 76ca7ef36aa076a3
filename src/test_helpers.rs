//! Test graph factories shared by the unit tests.
#![allow(dead_code)]

use crate::graph::models::{EntityNode, EntityType, Interaction, InteractionGraph};

/// Build a graph of proteins from an edge list. Nodes are created on first use.
pub fn graph_from_edges(edges: &[(&str, &str)]) -> InteractionGraph {
    let mut g = InteractionGraph::new();
    for (a, b) in edges {
        g.add_node(EntityNode::new(*a, EntityType::Protein));
        g.add_node(EntityNode::new(*b, EntityType::Protein));
        g.add_edge(a, b, Interaction::default());
    }
    g
}

/// Add a typed node to an existing graph.
pub fn add_typed(g: &mut InteractionGraph, id: &str, entity_type: EntityType) {
    g.add_node(EntityNode::new(id, entity_type));
}

/// Triangle A–B–C plus isolated node D, all proteins.
pub fn triangle_with_isolated() -> InteractionGraph {
    let mut g = graph_from_edges(&[("A", "B"), ("B", "C"), ("C", "A")]);
    add_typed(&mut g, "D", EntityType::Protein);
    g
}

/// Linear chain node_0 – node_1 – … – node_{n-1}.
pub fn chain_graph(n: usize) -> InteractionGraph {
    let mut g = InteractionGraph::new();
    let names: Vec<String> = (0..n).map(|i| format!("node_{}", i)).collect();
    for name in &names {
        g.add_node(EntityNode::new(name.as_str(), EntityType::Protein));
    }
    for pair in names.windows(2) {
        g.add_edge(&pair[0], &pair[1], Interaction::default());
    }
    g
}

/// Star: center connected to leaf_0 … leaf_{n-1}.
pub fn star_graph(n_leaves: usize) -> InteractionGraph {
    let mut g = InteractionGraph::new();
    g.add_node(EntityNode::new("center", EntityType::Complex));
    for i in 0..n_leaves {
        let id = format!("leaf_{}", i);
        g.add_node(EntityNode::new(id.as_str(), EntityType::Protein));
        g.add_edge("center", &id, Interaction::default());
    }
    g
}

/// Rectangular grid with nodes named `r{row}c{col}`.
pub fn grid_graph(rows: usize, cols: usize) -> InteractionGraph {
    let mut g = InteractionGraph::new();
    for r in 0..rows {
        for c in 0..cols {
            g.add_node(EntityNode::new(format!("r{}c{}", r, c), EntityType::Protein));
        }
    }
    for r in 0..rows {
        for c in 0..cols {
            let id = format!("r{}c{}", r, c);
            if r + 1 < rows {
                g.add_edge(&id, &format!("r{}c{}", r + 1, c), Interaction::default());
            }
            if c + 1 < cols {
                g.add_edge(&id, &format!("r{}c{}", r, c + 1), Interaction::default());
            }
        }
    }
    g
}

/// Two proteins joined through a reaction and a small molecule on parallel
/// routes: P1 – R1 – P2 and P1 – M1 – P2, plus a tail P2 – P3.
pub fn diamond_with_tail() -> InteractionGraph {
    let mut g = InteractionGraph::new();
    add_typed(&mut g, "P1", EntityType::Protein);
    add_typed(&mut g, "P2", EntityType::Protein);
    add_typed(&mut g, "P3", EntityType::Protein);
    add_typed(&mut g, "R1", EntityType::Reaction);
    add_typed(&mut g, "M1", EntityType::SmallMolecule);
    for (a, b) in [("P1", "R1"), ("R1", "P2"), ("P1", "M1"), ("M1", "P2"), ("P2", "P3")] {
        g.add_edge(a, b, Interaction::default());
    }
    g
}
