//! Path frequency aggregation.
//!
//! For each analyzed pair, a node's normalized frequency is the number of the
//! pair's shortest paths it lies on divided by how many shortest paths the pair
//! has. The global table sums those per-pair values, so a node central to many
//! pairs can exceed 1.0. Grouping by entity type only partitions the output.

use std::collections::BTreeMap;

use super::models::{
    EntityType, GlobalFrequencyTable, InteractionGraph, NodePair, OccurrenceCounts, PairFrequencies,
    PairFrequencyTable, PathRecord, TypedFrequencies,
};

/// Build the frequency entry for one pair. Returns `None` when the pair has no
/// path, so unreachable pairs never appear in the tables.
pub fn fold_pair(
    graph: &InteractionGraph,
    pair: &NodePair,
    paths: &[PathRecord],
) -> Option<PairFrequencies> {
    if paths.is_empty() {
        return None;
    }

    let mut raw_counts: BTreeMap<String, usize> = BTreeMap::new();
    for path in paths {
        for node in &path.nodes {
            *raw_counts.entry(node.clone()).or_default() += 1;
        }
    }

    let path_count = paths.len();
    let mut frequencies = TypedFrequencies::new();
    for (node, count) in &raw_counts {
        frequencies
            .entry(graph.node_type(node))
            .or_default()
            .insert(node.clone(), *count as f64 / path_count as f64);
    }

    Some(PairFrequencies {
        pair: pair.clone(),
        path_count,
        raw_counts,
        frequencies,
    })
}

impl GlobalFrequencyTable {
    /// Add one pair's normalized frequencies.
    pub fn accumulate(&mut self, entry: &PairFrequencies) {
        for (ty, nodes) in &entry.frequencies {
            let bucket = self.by_type.entry(*ty).or_default();
            for (node, freq) in nodes {
                *bucket.entry(node.clone()).or_default() += freq;
            }
        }
    }
}

impl OccurrenceCounts {
    /// Add one pair's raw occurrences and path count.
    pub fn record(&mut self, entry: &PairFrequencies) {
        for (node, count) in &entry.raw_counts {
            *self.counts.entry(node.clone()).or_default() += count;
        }
        self.total_paths += entry.path_count;
    }

    /// Highest `limit` nodes of each type, by descending count then ID.
    pub fn top_by_type(
        &self,
        graph: &InteractionGraph,
        limit: usize,
    ) -> BTreeMap<EntityType, Vec<(String, usize)>> {
        let mut grouped: BTreeMap<EntityType, Vec<(String, usize)>> = BTreeMap::new();
        for (node, count) in &self.counts {
            grouped
                .entry(graph.node_type(node))
                .or_default()
                .push((node.clone(), *count));
        }
        for ranked in grouped.values_mut() {
            ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
            ranked.truncate(limit);
        }
        grouped
    }
}

/// Running accumulator for one analysis run.
#[derive(Debug, Default)]
pub struct FrequencyAggregator {
    pairs: PairFrequencyTable,
    global: GlobalFrequencyTable,
    occurrences: OccurrenceCounts,
}

impl FrequencyAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold a pair's paths into every table. Returns whether the pair was recorded.
    ///
    /// Self-pairs only carry a zero-length path, so they are left out of the
    /// occurrence counts that ubiquity is measured against.
    pub fn fold(&mut self, graph: &InteractionGraph, pair: &NodePair, paths: &[PathRecord]) -> bool {
        match fold_pair(graph, pair, paths) {
            Some(entry) => {
                self.global.accumulate(&entry);
                if pair.first() != pair.second() {
                    self.occurrences.record(&entry);
                }
                self.pairs.insert(pair.clone(), entry);
                true
            }
            None => false,
        }
    }

    pub fn pairs(&self) -> &PairFrequencyTable {
        &self.pairs
    }

    pub fn global(&self) -> &GlobalFrequencyTable {
        &self.global
    }

    pub fn occurrences(&self) -> &OccurrenceCounts {
        &self.occurrences
    }

    pub fn into_parts(self) -> (PairFrequencyTable, GlobalFrequencyTable, OccurrenceCounts) {
        (self.pairs, self.global, self.occurrences)
    }
}
