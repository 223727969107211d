use proptest::prelude::*;

/// Acyclic relation set over `nodes` models, declared twice in independent
/// orders, with a shuffled model insertion order
#[derive(Debug, Clone)]
pub struct RelationScenario {
    pub nodes: usize,
    /// `(target, foreign)` pairs; `target > foreign` keeps the graph acyclic
    pub edges: Vec<(usize, usize)>,
    pub shuffled_edges: Vec<(usize, usize)>,
    pub insertion_order: Vec<usize>,
}

/// Strategy for generating acyclic `(target, foreign)` edge lists
pub fn acyclic_edges_strategy(nodes: usize) -> impl Strategy<Value = Vec<(usize, usize)>> {
    prop::collection::vec((1..nodes, 0..nodes), 0..16).prop_map(|pairs| {
        pairs
            .into_iter()
            .filter(|(target, foreign)| target > foreign)
            .collect::<Vec<_>>()
    })
}

pub fn relation_scenario_strategy() -> impl Strategy<Value = RelationScenario> {
    (2usize..8)
        .prop_flat_map(|nodes| (Just(nodes), acyclic_edges_strategy(nodes)))
        .prop_flat_map(|(nodes, edges)| {
            (
                Just(nodes),
                Just(edges.clone()),
                Just(edges).prop_shuffle(),
                Just((0..nodes).collect::<Vec<_>>()).prop_shuffle(),
            )
        })
        .prop_map(
            |(nodes, edges, shuffled_edges, insertion_order)| RelationScenario {
                nodes,
                edges,
                shuffled_edges,
                insertion_order,
            },
        )
}
