// Nearest-relative reduction: dense relatedness matrix -> sparse digraph.
//
// Each community keeps exactly one outgoing edge, toward the community its
// commenters most often also comment in. Edges of weight exactly 0 are
// dropped but their endpoints stay in the graph, so every community is
// always a node.

use std::collections::{BTreeMap, HashMap};

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use tracing::debug;

use super::overlap::RelatednessMatrix;

/// One kept edge of the relatedness graph.
#[derive(Debug, Clone, PartialEq)]
pub struct NearestRelative {
    pub source: String,
    pub target: String,
    /// Share of the source's commenters also seen in the target, in (0, 1].
    pub weight: f64,
}

/// Directed graph of communities with at most one outgoing edge per node.
#[derive(Debug, Clone, Default)]
pub struct RelatednessGraph {
    graph: DiGraph<String, f64>,
    index: HashMap<String, NodeIndex>,
}

impl RelatednessGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a community node if it isn't there yet, returning its index.
    pub fn ensure_node(&mut self, name: &str) -> NodeIndex {
        if let Some(&idx) = self.index.get(name) {
            return idx;
        }
        let idx = self.graph.add_node(name.to_string());
        self.index.insert(name.to_string(), idx);
        idx
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Community names in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &str> {
        self.graph.node_weights().map(String::as_str)
    }

    /// All kept edges.
    pub fn edges(&self) -> Vec<NearestRelative> {
        self.graph
            .edge_references()
            .map(|edge| NearestRelative {
                source: self.graph[edge.source()].clone(),
                target: self.graph[edge.target()].clone(),
                weight: *edge.weight(),
            })
            .collect()
    }

    /// The outgoing edge of `community`, if it kept one.
    pub fn nearest_relative(&self, community: &str) -> Option<NearestRelative> {
        let &idx = self.index.get(community)?;
        self.graph
            .edges_directed(idx, Direction::Outgoing)
            .next()
            .map(|edge| NearestRelative {
                source: community.to_string(),
                target: self.graph[edge.target()].clone(),
                weight: *edge.weight(),
            })
    }

    /// Underlying petgraph graph, for export.
    pub fn graph(&self) -> &DiGraph<String, f64> {
        &self.graph
    }

    /// Add the outgoing edge of `source`. Each source gets at most one.
    fn add_outgoing(&mut self, source: NodeIndex, target: NodeIndex, weight: f64) {
        debug_assert!(
            self.graph
                .edges_directed(source, Direction::Outgoing)
                .next()
                .is_none(),
            "source already has an outgoing edge"
        );
        self.graph.add_edge(source, target, weight);
    }
}

/// Pick the highest-weight target in a matrix row.
///
/// Ties go to the lexicographically smallest target name. A target equal to
/// `source` and NaN weights are never chosen.
pub fn closest_relative<'a>(
    source: &str,
    row: &'a BTreeMap<String, f64>,
) -> Option<(&'a str, f64)> {
    let mut best: Option<(&'a str, f64)> = None;

    // BTreeMap iterates in ascending name order, so a strict `>` keeps the
    // first (smallest) name among equal weights.
    for (target, &weight) in row {
        if target == source || weight.is_nan() {
            continue;
        }
        match best {
            Some((_, best_weight)) if weight <= best_weight => {}
            _ => best = Some((target.as_str(), weight)),
        }
    }

    best
}

/// Reduce a relatedness matrix to the nearest-relative graph.
///
/// `communities` is the full node set; every name in it becomes a node even
/// when it has no row in the matrix (e.g. a community with no commenters).
pub fn reduce_to_nearest<I, S>(matrix: &RelatednessMatrix, communities: I) -> RelatednessGraph
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut graph = RelatednessGraph::new();
    for name in communities {
        graph.ensure_node(name.as_ref());
    }

    for (source, row) in matrix {
        let source_idx = graph.ensure_node(source);

        let Some((target, weight)) = closest_relative(source, row) else {
            debug!(community = %source, "No candidate relatives");
            continue;
        };
        let target_idx = graph.ensure_node(target);

        // Exact comparison: only a true zero overlap is dropped.
        if weight == 0.0 {
            debug!(community = %source, "Nearest relative has zero overlap, no edge");
            continue;
        }

        graph.add_outgoing(source_idx, target_idx, weight);
    }

    graph
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(entries: &[(&str, f64)]) -> BTreeMap<String, f64> {
        entries.iter().map(|(k, w)| (k.to_string(), *w)).collect()
    }

    fn matrix(rows: &[(&str, &[(&str, f64)])]) -> RelatednessMatrix {
        rows.iter()
            .map(|(source, entries)| (source.to_string(), row(entries)))
            .collect()
    }

    #[test]
    fn test_closest_relative_picks_maximum() {
        let r = row(&[("a", 0.1), ("b", 0.7), ("c", 0.3)]);
        assert_eq!(closest_relative("src", &r), Some(("b", 0.7)));
    }

    #[test]
    fn test_closest_relative_ties_go_to_smallest_name() {
        let r = row(&[("zeta", 0.4), ("alpha", 0.4), ("mid", 0.4)]);
        assert_eq!(closest_relative("src", &r), Some(("alpha", 0.4)));
    }

    #[test]
    fn test_closest_relative_ignores_self_and_nan() {
        let r = row(&[("src", 1.0), ("a", f64::NAN), ("b", 0.2)]);
        assert_eq!(closest_relative("src", &r), Some(("b", 0.2)));
        assert_eq!(closest_relative("src", &row(&[("src", 1.0)])), None);
        assert_eq!(closest_relative("src", &row(&[])), None);
    }

    #[test]
    fn test_three_community_example() {
        // A={x,y}, B={x}, C={}
        let m = matrix(&[
            ("A", &[("B", 0.5), ("C", 0.0)]),
            ("B", &[("A", 1.0), ("C", 0.0)]),
        ]);
        let graph = reduce_to_nearest(&m, ["A", "B", "C"]);

        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.edge_count(), 2);

        let a = graph.nearest_relative("A").unwrap();
        assert_eq!((a.target.as_str(), a.weight), ("B", 0.5));
        let b = graph.nearest_relative("B").unwrap();
        assert_eq!((b.target.as_str(), b.weight), ("A", 1.0));
        assert!(graph.nearest_relative("C").is_none());
        assert!(graph.contains("C"));
    }

    #[test]
    fn test_zero_weight_drops_edge_but_keeps_nodes() {
        let m = matrix(&[("lonely", &[("other", 0.0)])]);
        let graph = reduce_to_nearest(&m, ["lonely", "other"]);
        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn test_tiny_positive_weight_is_kept() {
        let m = matrix(&[("a", &[("b", 0.0001)])]);
        let graph = reduce_to_nearest(&m, ["a", "b"]);
        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.nearest_relative("a").unwrap().weight, 0.0001);
    }

    #[test]
    fn test_self_entry_never_becomes_loop() {
        let m = matrix(&[("a", &[("a", 1.0), ("b", 0.2)])]);
        let graph = reduce_to_nearest(&m, ["a", "b"]);
        for edge in graph.edges() {
            assert_ne!(edge.source, edge.target);
        }
        assert_eq!(graph.nearest_relative("a").unwrap().target, "b");
    }

    #[test]
    fn test_at_most_one_outgoing_edge_per_node() {
        let m = matrix(&[
            ("a", &[("b", 0.2), ("c", 0.9), ("d", 0.1)]),
            ("b", &[("a", 0.3), ("c", 0.3), ("d", 0.3)]),
            ("c", &[("a", 0.5), ("b", 0.4), ("d", 0.0)]),
            ("d", &[("a", 0.0), ("b", 0.0), ("c", 0.0)]),
        ]);
        let graph = reduce_to_nearest(&m, ["a", "b", "c", "d"]);

        let mut sources: Vec<String> = graph.edges().into_iter().map(|e| e.source).collect();
        let total = sources.len();
        sources.sort();
        sources.dedup();
        assert_eq!(sources.len(), total);
        assert_eq!(total, 3, "d has only zero weights");
        assert_eq!(graph.nearest_relative("b").unwrap().target, "a");
    }

    #[test]
    fn test_rows_for_unlisted_communities_still_add_nodes() {
        let m = matrix(&[("a", &[("b", 0.5)])]);
        let graph = reduce_to_nearest(&m, Vec::<String>::new());
        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn test_nodes_keep_input_order() {
        let graph = reduce_to_nearest(&RelatednessMatrix::new(), ["b", "a", "c"]);
        let names: Vec<&str> = graph.nodes().collect();
        assert_eq!(names, vec!["b", "a", "c"]);
    }
}
