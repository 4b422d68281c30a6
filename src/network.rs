//! Route network graph and flown-edge aggregation.

use crate::instance::Instance;
use crate::schedule::{Minutes, Schedules};
use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::BTreeMap;

/// Number of feasible legs flown per (origin, destination).
pub fn flown_edge_counts(schedules: &Schedules) -> BTreeMap<(String, String), usize> {
    let mut counts = BTreeMap::new();
    for leg in schedules.values().flatten().filter(|leg| leg.feasible) {
        *counts
            .entry((leg.gene.origin.clone(), leg.gene.dest.clone()))
            .or_insert(0) += 1;
    }
    counts
}

/// Directed graph of airports (nodes) and routes (edges weighted by duration).
pub struct RouteNetwork {
    pub graph: DiGraph<String, Minutes>,
    nodes: BTreeMap<String, NodeIndex>,
}

impl RouteNetwork {
    /// Build the network from an instance.
    ///
    /// Route endpoints missing from the airport table still get a node.
    pub fn from_instance(instance: &Instance) -> Self {
        let mut network = RouteNetwork {
            graph: DiGraph::new(),
            nodes: BTreeMap::new(),
        };

        for airport in instance.airports() {
            network.node(&airport.code);
        }
        for route in instance.routes() {
            let from = network.node(&route.origin);
            let to = network.node(&route.dest);
            network.graph.add_edge(from, to, route.duration_min);
        }

        network
    }

    fn node(&mut self, code: &str) -> NodeIndex {
        if let Some(&idx) = self.nodes.get(code) {
            return idx;
        }
        let idx = self.graph.add_node(code.to_string());
        self.nodes.insert(code.to_string(), idx);
        idx
    }

    /// Node of an airport code.
    pub fn node_index(&self, code: &str) -> Option<NodeIndex> {
        self.nodes.get(code).copied()
    }

    /// Check whether a direct route exists.
    pub fn has_route(&self, origin: &str, dest: &str) -> bool {
        match (self.node_index(origin), self.node_index(dest)) {
            (Some(a), Some(b)) => self.graph.contains_edge(a, b),
            _ => false,
        }
    }

    /// Flown edges that belong to the network, with their leg counts.
    pub fn flown_edges(&self, schedules: &Schedules) -> Vec<((String, String), usize)> {
        flown_edge_counts(schedules)
            .into_iter()
            .filter(|((origin, dest), _)| self.has_route(origin, dest))
            .collect()
    }
}
