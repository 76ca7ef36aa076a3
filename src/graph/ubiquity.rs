//! Ubiquitous node detection.

use std::collections::{BTreeMap, BTreeSet};

/// Nodes whose raw occurrence count divided by the run's total path count is
/// at least `threshold`. No paths means no ubiquitous nodes.
pub fn identify_ubiquitous(
    counts: &BTreeMap<String, usize>,
    total_paths: usize,
    threshold: f64,
) -> BTreeSet<String> {
    if total_paths == 0 {
        return BTreeSet::new();
    }
    let total = total_paths as f64;
    counts
        .iter()
        .filter(|(_, &count)| count as f64 / total >= threshold)
        .map(|(node, _)| node.clone())
        .collect()
}
