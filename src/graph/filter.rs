//! Endpoint eligibility and node selection.
//!
//! A node may serve as an analysis endpoint when its name is not blacklisted.
//! Blacklist matching is whole-word: an entry matches a name when the two are
//! equal after normalization, or when every token of the entry appears as a
//! token of the name ("ATP" matches "ATP Synthase Complex" but not "ATPase").

use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashSet;
use tracing::debug;

use super::error::{AnalysisError, AnalysisResult};
use super::models::{AnalysisConfig, EntityType, InteractionGraph};

/// Ubiquitous metabolites excluded from endpoint selection by default.
pub const DEFAULT_BLACKLIST: &[&str] = &[
    "ATP",
    "ADP",
    "NADH",
    "NAD+",
    "NADPH",
    "NADP+",
    "FADH2",
    "FAD",
    "Pyruvate",
    "Pi",
    "Phosphate",
    "PPi",
    "Pyrophosphate",
    "H+",
    "Proton",
    "CO2",
    "H2O",
    "O2",
];

fn normalize(name: &str) -> String {
    name.trim().to_uppercase()
}

/// Case-insensitive set of name patterns.
#[derive(Debug, Clone, Default)]
pub struct Blacklist {
    exact: HashSet<String>,
    token_sets: Vec<HashSet<String>>,
}

impl Blacklist {
    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::default().with_entries(entries)
    }

    /// The default metabolite blacklist.
    pub fn metabolites() -> Self {
        Self::new(DEFAULT_BLACKLIST.iter().copied())
    }

    pub fn with_entries<I, S>(mut self, entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for entry in entries {
            let normalized = normalize(entry.as_ref());
            if normalized.is_empty() || !self.exact.insert(normalized.clone()) {
                continue;
            }
            let tokens: HashSet<String> =
                normalized.split_whitespace().map(str::to_string).collect();
            self.token_sets.push(tokens);
        }
        self
    }

    pub fn len(&self) -> usize {
        self.exact.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exact.is_empty()
    }

    pub fn is_blacklisted(&self, name: &str) -> bool {
        let name = normalize(name);
        if self.exact.contains(&name) {
            return true;
        }
        let name_tokens: HashSet<&str> = name.split_whitespace().collect();
        self.token_sets.iter().any(|entry| {
            !entry.is_empty() && entry.iter().all(|t| name_tokens.contains(t.as_str()))
        })
    }
}

/// How the caller wants endpoints chosen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// Uniform sample without replacement from the eligible pool
    Random { count: usize },
    /// Exactly these node IDs, validated against graph and blacklist
    Explicit(Vec<String>),
}

impl Selection {
    /// Build a selection from the two optional inputs of a front end.
    /// A count takes precedence when both are given.
    pub fn from_options(count: Option<usize>, nodes: Option<Vec<String>>) -> AnalysisResult<Self> {
        match (count, nodes) {
            (Some(count), _) => Ok(Self::Random { count }),
            (None, Some(nodes)) => Ok(Self::Explicit(nodes)),
            (None, None) => Err(AnalysisError::Configuration),
        }
    }
}

/// Blacklist-based eligibility test and endpoint selection.
#[derive(Debug, Clone)]
pub struct NodeFilter {
    blacklist: Blacklist,
    endpoint_types: Vec<EntityType>,
    seed: Option<u64>,
}

impl NodeFilter {
    pub fn new(blacklist: Blacklist, endpoint_types: Vec<EntityType>) -> Self {
        Self {
            blacklist,
            endpoint_types,
            seed: None,
        }
    }

    pub fn from_config(config: &AnalysisConfig) -> Self {
        let blacklist = if config.blacklist_enabled {
            Blacklist::metabolites().with_entries(&config.extra_blacklist)
        } else {
            Blacklist::default()
        };
        Self {
            blacklist,
            endpoint_types: config.endpoint_types.clone(),
            seed: config.seed,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn blacklist(&self) -> &Blacklist {
        &self.blacklist
    }

    pub fn is_eligible(&self, name: &str) -> bool {
        !self.blacklist.is_blacklisted(name)
    }

    /// IDs of nodes of an endpoint type with an eligible name, sorted.
    pub fn eligible_pool(&self, graph: &InteractionGraph) -> Vec<String> {
        let mut pool: Vec<String> = graph
            .graph
            .node_weights()
            .filter(|n| self.endpoint_types.contains(&n.entity_type))
            .filter(|n| self.is_eligible(n.display_name()))
            .map(|n| n.id.clone())
            .collect();
        pool.sort();
        pool
    }

    pub fn select(
        &self,
        graph: &InteractionGraph,
        selection: &Selection,
    ) -> AnalysisResult<Vec<String>> {
        match selection {
            Selection::Random { count } => self.select_random(&self.eligible_pool(graph), *count),
            Selection::Explicit(nodes) => self.select_explicit(graph, nodes),
        }
    }

    /// Sample `count` distinct nodes from `pool`. Never clamps: asking for more
    /// nodes than the pool holds is an error.
    pub fn select_random(&self, pool: &[String], count: usize) -> AnalysisResult<Vec<String>> {
        if pool.is_empty() {
            return Err(AnalysisError::EmptyPool);
        }
        if count > pool.len() {
            return Err(AnalysisError::SampleTooLarge {
                requested: count,
                available: pool.len(),
            });
        }

        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let selected: Vec<String> = rand::seq::index::sample(&mut rng, pool.len(), count)
            .into_iter()
            .map(|i| pool[i].clone())
            .collect();

        debug!(
            pool = pool.len(),
            selected = selected.len(),
            "Sampled random endpoints"
        );
        Ok(selected)
    }

    /// Validate an explicit list. Every entry is classified before failing so
    /// the error names all missing and all blacklisted nodes at once.
    pub fn select_explicit(
        &self,
        graph: &InteractionGraph,
        nodes: &[String],
    ) -> AnalysisResult<Vec<String>> {
        let mut seen = HashSet::new();
        let mut missing = Vec::new();
        let mut blacklisted = Vec::new();
        let mut valid = Vec::new();

        for id in nodes {
            if !seen.insert(id.as_str()) {
                continue;
            }
            match graph.get_node(id) {
                None => missing.push(id.clone()),
                Some(node) if !self.is_eligible(node.display_name()) => {
                    blacklisted.push(id.clone())
                }
                Some(_) => valid.push(id.clone()),
            }
        }

        if !missing.is_empty() || !blacklisted.is_empty() {
            return Err(AnalysisError::Validation {
                missing,
                blacklisted,
            });
        }
        if valid.is_empty() {
            return Err(AnalysisError::NoValidNodes);
        }
        Ok(valid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::models::EntityNode;

    fn small_network() -> InteractionGraph {
        let mut g = InteractionGraph::new();
        for id in ["EGFR", "GRB2", "SOS1", "KRAS"] {
            g.add_node(EntityNode::new(id, EntityType::Protein));
        }
        g.add_node(EntityNode::new("ATP", EntityType::SmallMolecule));
        g.add_node(EntityNode::new("ATP Synthase Complex", EntityType::Protein));
        g.add_node(EntityNode::new("ATPase", EntityType::Protein));
        g.add_node(EntityNode::new("R1", EntityType::Reaction));
        g
    }

    // --- Blacklist ---

    #[test]
    fn test_exact_match_is_case_insensitive() {
        let bl = Blacklist::metabolites();
        assert!(bl.is_blacklisted("ATP"));
        assert!(bl.is_blacklisted("  atp "));
        assert!(bl.is_blacklisted("nad+"));
        assert!(!bl.is_blacklisted("EGFR"));
    }

    #[test]
    fn test_whole_token_match_and_partial_string_non_match() {
        let bl = Blacklist::new(["ATP"]);
        // "ATP" is a whole token of the name
        assert!(bl.is_blacklisted("ATP Synthase Complex"));
        // Substring only, not a token
        assert!(!bl.is_blacklisted("ATPase"));
        assert!(!bl.is_blacklisted("ATP-binding cassette"));
    }

    #[test]
    fn test_multi_word_entry_matches_as_token_subset() {
        let bl = Blacklist::new(["coenzyme a"]);
        assert!(bl.is_blacklisted("Acetyl Coenzyme A"));
        assert!(bl.is_blacklisted("A coenzyme"));
        assert!(!bl.is_blacklisted("Coenzyme Q10"));
    }

    #[test]
    fn test_blank_entries_are_ignored() {
        let bl = Blacklist::new(["", "   "]);
        assert!(bl.is_empty());
        assert!(!bl.is_blacklisted("anything"));
        assert!(!bl.is_blacklisted(""));
    }

    #[test]
    fn test_eligibility_is_pure() {
        let filter = NodeFilter::from_config(&AnalysisConfig::default());
        let first: Vec<bool> = ["ATP", "EGFR", "H2O", "KRAS"]
            .iter()
            .map(|n| filter.is_eligible(n))
            .collect();
        let second: Vec<bool> = ["ATP", "EGFR", "H2O", "KRAS"]
            .iter()
            .map(|n| filter.is_eligible(n))
            .collect();
        assert_eq!(first, second);
        assert_eq!(first, vec![false, true, false, true]);
    }

    #[test]
    fn test_disabled_blacklist_allows_everything() {
        let config = AnalysisConfig {
            blacklist_enabled: false,
            ..Default::default()
        };
        let filter = NodeFilter::from_config(&config);
        assert!(filter.is_eligible("ATP"));
        assert!(filter.blacklist().is_empty());
    }

    #[test]
    fn test_extra_blacklist_entries_are_added() {
        let config = AnalysisConfig {
            extra_blacklist: vec!["Ubiquitin".into()],
            ..Default::default()
        };
        let filter = NodeFilter::from_config(&config);
        assert!(!filter.is_eligible("UBIQUITIN"));
        assert!(!filter.is_eligible("ATP"));
    }

    // --- Selection ---

    #[test]
    fn test_selection_requires_count_or_list() {
        assert_eq!(
            Selection::from_options(None, None),
            Err(AnalysisError::Configuration)
        );
        assert_eq!(
            Selection::from_options(Some(3), Some(vec!["A".into()])),
            Ok(Selection::Random { count: 3 })
        );
        assert_eq!(
            Selection::from_options(None, Some(vec!["A".into()])),
            Ok(Selection::Explicit(vec!["A".into()]))
        );
    }

    #[test]
    fn test_eligible_pool_filters_type_and_blacklist() {
        let g = small_network();
        let filter = NodeFilter::from_config(&AnalysisConfig::default());
        let pool = filter.eligible_pool(&g);
        // ATP is a small molecule, "ATP Synthase Complex" is blacklisted by token
        assert_eq!(pool, vec!["ATPase", "EGFR", "GRB2", "KRAS", "SOS1"]);
    }

    #[test]
    fn test_random_selection_is_distinct_and_seeded() {
        let g = small_network();
        let filter = NodeFilter::from_config(&AnalysisConfig::default()).with_seed(7);
        let a = filter.select(&g, &Selection::Random { count: 3 }).unwrap();
        let b = filter.select(&g, &Selection::Random { count: 3 }).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), 3);
        let unique: HashSet<&String> = a.iter().collect();
        assert_eq!(unique.len(), 3);
        let pool = filter.eligible_pool(&g);
        assert!(a.iter().all(|id| pool.contains(id)));
    }

    #[test]
    fn test_random_selection_rejects_oversized_request() {
        let g = small_network();
        let filter = NodeFilter::from_config(&AnalysisConfig::default());
        let err = filter
            .select(&g, &Selection::Random { count: 50 })
            .unwrap_err();
        assert_eq!(
            err,
            AnalysisError::SampleTooLarge {
                requested: 50,
                available: 5
            }
        );
    }

    #[test]
    fn test_random_selection_empty_pool() {
        let mut g = InteractionGraph::new();
        g.add_node(EntityNode::new("ATP", EntityType::Protein));
        g.add_node(EntityNode::new("H2O", EntityType::SmallMolecule));
        let filter = NodeFilter::from_config(&AnalysisConfig::default());
        let err = filter
            .select(&g, &Selection::Random { count: 1 })
            .unwrap_err();
        assert_eq!(err, AnalysisError::EmptyPool);
    }

    #[test]
    fn test_explicit_selection_aggregates_all_offenders() {
        let g = small_network();
        let filter = NodeFilter::from_config(&AnalysisConfig::default());
        let nodes = vec![
            "EGFR".to_string(),
            "MISSING".to_string(),
            "ATP".to_string(),
            "ALSO_MISSING".to_string(),
        ];
        let err = filter.select_explicit(&g, &nodes).unwrap_err();
        match &err {
            AnalysisError::Validation {
                missing,
                blacklisted,
            } => {
                assert_eq!(missing, &vec!["MISSING".to_string(), "ALSO_MISSING".to_string()]);
                assert_eq!(blacklisted, &vec!["ATP".to_string()]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
        let msg = err.to_string();
        assert!(msg.contains("MISSING"));
        assert!(msg.contains("ATP"));
    }

    #[test]
    fn test_explicit_selection_dedups_and_keeps_order() {
        let g = small_network();
        let filter = NodeFilter::from_config(&AnalysisConfig::default());
        let nodes = vec!["KRAS".to_string(), "EGFR".to_string(), "KRAS".to_string()];
        let selected = filter.select_explicit(&g, &nodes).unwrap();
        assert_eq!(selected, vec!["KRAS", "EGFR"]);
    }

    #[test]
    fn test_explicit_selection_accepts_non_endpoint_types() {
        let g = small_network();
        let filter = NodeFilter::from_config(&AnalysisConfig::default());
        let selected = filter
            .select_explicit(&g, &["R1".to_string(), "EGFR".to_string()])
            .unwrap();
        assert_eq!(selected.len(), 2);
    }

    #[test]
    fn test_explicit_selection_empty_list() {
        let g = small_network();
        let filter = NodeFilter::from_config(&AnalysisConfig::default());
        assert_eq!(
            filter.select_explicit(&g, &[]).unwrap_err(),
            AnalysisError::NoValidNodes
        );
    }
}
