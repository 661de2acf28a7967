use std::collections::BTreeSet;

use petgraph::visit::EdgeRef;
use spatgraph_core::SpatialGraph;

/// Collects the graph's edges as normalised `(min, max)` index pairs.
pub fn edge_pairs(graph: &SpatialGraph) -> Vec<(usize, usize)> {
    let mut pairs: Vec<(usize, usize)> = graph
        .edge_references()
        .map(|edge| {
            let (a, b) = (edge.source().index(), edge.target().index());
            (a.min(b), a.max(b))
        })
        .collect();
    pairs.sort_unstable();
    pairs
}

/// Asserts the graph is simple: no self-loops and no duplicate edges for any
/// unordered pair.
pub fn assert_simple(graph: &SpatialGraph) {
    let pairs = edge_pairs(graph);
    assert!(
        pairs.iter().all(|(a, b)| a != b),
        "graph contains a self-loop"
    );
    let unique: BTreeSet<(usize, usize)> = pairs.iter().copied().collect();
    assert_eq!(
        unique.len(),
        pairs.len(),
        "graph contains a duplicate edge"
    );
}
