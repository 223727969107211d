//! # Dependency Resolver
//!
//! Computes the build order for a set of models from their declared
//! relations, so that every foreign model is finalized before any target that
//! depends on it.
//!
//! Each model starts at rank 0. A pass walks every `(target, foreign)` edge and
//! raises `rank[foreign]` to `rank[target] + 1` whenever the foreign model does
//! not already outrank its target. Passes repeat until one changes nothing,
//! then models are ordered by descending rank with ties kept in insertion
//! order.
//!
//! On an acyclic graph the longest dependency chain has at most one edge per
//! relation, so relaxation settles within `relations + 1` passes. A pass that
//! still raises a rank at that cap can only come from a cycle.

use crate::error::{FixtureError, FixtureResult};
use crate::models::ModelRef;
use std::cmp::Reverse;
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// Outcome of a successful resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedOrder {
    /// Model refs in build order
    pub order: Vec<ModelRef>,
    /// Final rank of every model; higher ranks build first
    pub ranks: HashMap<ModelRef, usize>,
    /// Passes run, including the final pass that changed nothing
    pub passes: usize,
}

#[derive(Debug, Clone, Default)]
pub struct DependencyResolver {
    refs: Vec<ModelRef>,
    edges: Vec<(ModelRef, ModelRef)>,
}

impl DependencyResolver {
    /// Resolver over `refs`, given in insertion order
    pub fn new(refs: impl IntoIterator<Item = ModelRef>) -> Self {
        Self {
            refs: refs.into_iter().collect(),
            edges: Vec::new(),
        }
    }

    /// Add a `(target, foreign)` edge: `target` depends on `foreign`
    pub fn with_edge(mut self, target: ModelRef, foreign: ModelRef) -> Self {
        self.edges.push((target, foreign));
        self
    }

    pub fn with_edges(mut self, edges: impl IntoIterator<Item = (ModelRef, ModelRef)>) -> Self {
        self.edges.extend(edges);
        self
    }

    /// Pass cap used when none is configured
    pub fn default_pass_limit(&self) -> usize {
        self.edges.len() + 1
    }

    pub fn resolve(&self, max_passes: Option<usize>) -> FixtureResult<ResolvedOrder> {
        let limit = max_passes.unwrap_or_else(|| self.default_pass_limit());
        let mut ranks: HashMap<ModelRef, usize> =
            self.refs.iter().map(|model_ref| (*model_ref, 0)).collect();

        let mut still_rising = Vec::new();
        for pass in 1..=limit {
            still_rising = self.relax(&mut ranks);
            if still_rising.is_empty() {
                debug!(
                    models = self.refs.len(),
                    relations = self.edges.len(),
                    passes = pass,
                    "Dependency ranks converged"
                );
                return Ok(self.order_by_rank(ranks, pass));
            }
        }

        Err(FixtureError::CyclicDependency {
            passes: limit,
            unresolved: still_rising,
        })
    }

    /// One relaxation pass; returns the refs whose rank was raised, in first
    /// raised order.
    fn relax(&self, ranks: &mut HashMap<ModelRef, usize>) -> Vec<ModelRef> {
        let mut raised = Vec::new();
        let mut seen = HashSet::new();

        for (target, foreign) in &self.edges {
            let (Some(&target_rank), Some(&foreign_rank)) = (ranks.get(target), ranks.get(foreign))
            else {
                continue;
            };

            if target_rank >= foreign_rank {
                ranks.insert(*foreign, target_rank + 1);
                if seen.insert(*foreign) {
                    raised.push(*foreign);
                }
            }
        }

        raised
    }

    fn order_by_rank(&self, ranks: HashMap<ModelRef, usize>, passes: usize) -> ResolvedOrder {
        let mut order = self.refs.clone();
        // Stable, so equal ranks keep insertion order
        order.sort_by_key(|model_ref| Reverse(ranks[model_ref]));

        ResolvedOrder {
            order,
            ranks,
            passes,
        }
    }
}
