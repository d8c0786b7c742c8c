//! Community detection over the undirected view of the lens graph.
//!
//! Two interchangeable [`Partitioner`] strategies are provided; which one runs
//! is decided by configuration when the graph is built, not by probing at
//! query time.

use crate::config::{ClusterAlgorithm, ClusteringConfig};
use crate::types::LensGraph;
use petgraph::unionfind::UnionFind;
use petgraph::visit::EdgeRef;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

const MIN_GAIN: f64 = 1e-12;
const MAX_SWEEPS: usize = 1_000;

/// Clusters keyed by a dense id, plus the strategy that produced them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Clustering {
    pub algorithm: String,
    pub clusters: BTreeMap<usize, Vec<String>>,
}

/// Undirected, weighted adjacency over node positions.
///
/// A pair is adjacent when an edge exists in either direction; if both
/// directions exist the stronger weight is kept.
#[derive(Debug, Clone)]
pub struct UndirectedView {
    adjacency: Vec<Vec<(usize, f64)>>,
}

impl UndirectedView {
    #[must_use]
    pub fn from_graph(graph: &LensGraph) -> Self {
        let mut pairs: BTreeMap<(usize, usize), f64> = BTreeMap::new();
        for edge in graph.graph.edge_references() {
            let (a, b) = (edge.source().index(), edge.target().index());
            let key = (a.min(b), a.max(b));
            let weight = edge.weight().weight.max(0.0);
            pairs
                .entry(key)
                .and_modify(|w| *w = w.max(weight))
                .or_insert(weight);
        }
        Self::from_pairs(graph.node_count(), pairs)
    }

    fn from_pairs(nodes: usize, pairs: BTreeMap<(usize, usize), f64>) -> Self {
        let mut adjacency = vec![Vec::new(); nodes];
        for ((a, b), weight) in pairs {
            adjacency[a].push((b, weight));
            adjacency[b].push((a, weight));
        }
        for neighbors in &mut adjacency {
            neighbors.sort_by_key(|(n, _)| *n);
        }
        Self { adjacency }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.adjacency.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }

    pub fn neighbors(&self, node: usize) -> &[(usize, f64)] {
        &self.adjacency[node]
    }
}

/// Splits an undirected view into groups of node positions.
pub trait Partitioner: Send + Sync {
    fn name(&self) -> &'static str;
    fn partition(&self, view: &UndirectedView) -> Vec<Vec<usize>>;
}

/// Multi-level modularity optimisation (Louvain).
///
/// Nodes are visited in index order and ties go to the community seen first,
/// so the result is fully determined by the input graph.
#[derive(Debug, Clone, Copy)]
pub struct Louvain {
    pub resolution: f64,
}

/// Connected components of the undirected view; isolated lenses are dropped.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConnectedComponents;

#[must_use]
pub fn partitioner_for(config: &ClusteringConfig) -> Box<dyn Partitioner> {
    match config.algorithm {
        ClusterAlgorithm::Louvain => Box::new(Louvain {
            resolution: config.resolution,
        }),
        ClusterAlgorithm::ConnectedComponents => Box::new(ConnectedComponents),
    }
}

impl Partitioner for ConnectedComponents {
    fn name(&self) -> &'static str {
        "connected_components"
    }

    fn partition(&self, view: &UndirectedView) -> Vec<Vec<usize>> {
        let mut sets = UnionFind::<usize>::new(view.len());
        for node in 0..view.len() {
            for &(other, _) in view.neighbors(node) {
                sets.union(node, other);
            }
        }
        let labels: Vec<usize> = (0..view.len()).map(|n| sets.find(n)).collect();
        group_by_label(&labels)
            .into_iter()
            .filter(|members| members.len() > 1)
            .collect()
    }
}

impl Partitioner for Louvain {
    fn name(&self) -> &'static str {
        "louvain"
    }

    fn partition(&self, view: &UndirectedView) -> Vec<Vec<usize>> {
        let mut membership: Vec<usize> = (0..view.len()).collect();
        let mut level = Level::from_view(view);

        loop {
            let (labels, moved) = level.local_moves(self.resolution);
            if !moved {
                break;
            }
            for community in &mut membership {
                *community = labels[*community];
            }
            level = level.aggregate(&labels);
        }

        group_by_label(&membership)
    }
}

/// One level of the Louvain hierarchy: communities of the previous level
/// collapsed into single nodes carrying their internal weight as a self loop.
struct Level {
    adjacency: Vec<Vec<(usize, f64)>>,
    self_loops: Vec<f64>,
}

impl Level {
    fn from_view(view: &UndirectedView) -> Self {
        Self {
            adjacency: view.adjacency.clone(),
            self_loops: vec![0.0; view.len()],
        }
    }

    fn degrees(&self) -> Vec<f64> {
        self.adjacency
            .iter()
            .zip(&self.self_loops)
            .map(|(neighbors, loop_w)| 2.0 * loop_w + neighbors.iter().map(|(_, w)| w).sum::<f64>())
            .collect()
    }

    /// Greedy modularity moves until no node changes community.
    /// Returns dense community labels and whether anything moved.
    fn local_moves(&self, resolution: f64) -> (Vec<usize>, bool) {
        let n = self.adjacency.len();
        let degree = self.degrees();
        let m2: f64 = degree.iter().sum();
        let mut community: Vec<usize> = (0..n).collect();
        if m2 <= 0.0 {
            return (community, false);
        }

        let mut totals = degree.clone();
        let mut moved_any = false;

        for _ in 0..MAX_SWEEPS {
            let mut moved = false;
            for node in 0..n {
                let current = community[node];
                let k = degree[node];
                totals[current] -= k;

                // Link weight from `node` into each adjacent community, first-seen order.
                let mut links: Vec<(usize, f64)> = Vec::new();
                for &(other, w) in &self.adjacency[node] {
                    let c = community[other];
                    match links.iter_mut().find(|(lc, _)| *lc == c) {
                        Some((_, total)) => *total += w,
                        None => links.push((c, w)),
                    }
                }

                let gain = |c: usize, w: f64| w - resolution * totals[c] * k / m2;
                let own = links
                    .iter()
                    .find(|(c, _)| *c == current)
                    .map_or(0.0, |(_, w)| *w);
                let mut best = current;
                let mut best_gain = gain(current, own);
                for &(c, w) in &links {
                    let g = gain(c, w);
                    if g > best_gain + MIN_GAIN {
                        best = c;
                        best_gain = g;
                    }
                }

                totals[best] += k;
                if best != current {
                    community[node] = best;
                    moved = true;
                    moved_any = true;
                }
            }
            if !moved {
                break;
            }
        }

        (dense_labels(&community), moved_any)
    }

    fn aggregate(&self, labels: &[usize]) -> Self {
        let count = labels.iter().max().map_or(0, |m| m + 1);
        let mut self_loops = vec![0.0; count];
        let mut pairs: BTreeMap<(usize, usize), f64> = BTreeMap::new();

        for (node, neighbors) in self.adjacency.iter().enumerate() {
            let c = labels[node];
            self_loops[c] += self.self_loops[node];
            for &(other, w) in neighbors {
                if other <= node {
                    continue;
                }
                let d = labels[other];
                if c == d {
                    self_loops[c] += w;
                } else {
                    *pairs.entry((c.min(d), c.max(d))).or_insert(0.0) += w;
                }
            }
        }

        let view = UndirectedView::from_pairs(count, pairs);
        Self {
            adjacency: view.adjacency,
            self_loops,
        }
    }
}

/// Relabel to 0.. in order of first appearance.
fn dense_labels(labels: &[usize]) -> Vec<usize> {
    let mut mapping: HashMap<usize, usize> = HashMap::new();
    labels
        .iter()
        .map(|label| {
            let next = mapping.len();
            *mapping.entry(*label).or_insert(next)
        })
        .collect()
}

fn group_by_label(labels: &[usize]) -> Vec<Vec<usize>> {
    let dense = dense_labels(labels);
    let mut groups: Vec<Vec<usize>> = Vec::new();
    for (node, &label) in dense.iter().enumerate() {
        if label == groups.len() {
            groups.push(Vec::new());
        }
        groups[label].push(node);
    }
    groups
}

impl LensGraph {
    /// Clusters of tightly related lenses using the configured strategy.
    #[must_use]
    pub fn clusters(&self) -> Clustering {
        let partitioner = partitioner_for(&self.config().clustering);
        self.clusters_with(partitioner.as_ref())
    }

    /// Clusters produced by an explicit strategy.
    #[must_use]
    pub fn clusters_with(&self, partitioner: &dyn Partitioner) -> Clustering {
        let view = UndirectedView::from_graph(self);
        let clusters = partitioner
            .partition(&view)
            .into_iter()
            .enumerate()
            .map(|(cluster_id, members)| {
                let ids = members
                    .into_iter()
                    .map(|pos| self.id_of(petgraph::graph::NodeIndex::new(pos)).to_string())
                    .collect();
                (cluster_id, ids)
            })
            .collect();

        log::debug!("Clustered lens graph with {}", partitioner.name());
        Clustering {
            algorithm: partitioner.name().to_string(),
            clusters,
        }
    }
}
