use crate::config::GraphConfig;
use petgraph::graph::{DiGraph, EdgeIndex, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// A single analytical concept in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lens {
    pub id: String,
    pub name: String,
    /// Integer episode marker; lenses without one take no temporal edges.
    pub sequence_index: Option<i64>,
    pub lens_type: String,
    pub definition: String,
    pub tags: Vec<String>,
}

/// Kind of a relationship edge.
///
/// Curated relationships keep the label they were authored with; `contrast`
/// and `paradox` labels get their own variants because several queries key
/// on dialectical opposition.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationshipKind {
    Contrast,
    Paradox,
    Frame,
    Temporal,
    Concept,
    Curated(String),
}

impl RelationshipKind {
    /// Kind for a curated relationship with the given authored label.
    #[must_use]
    pub fn curated(label: &str) -> Self {
        let label = label.trim();
        match label.to_ascii_lowercase().as_str() {
            "contrast" => Self::Contrast,
            "paradox" => Self::Paradox,
            "" => Self::Curated("unknown".to_string()),
            _ => Self::Curated(label.to_string()),
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Contrast => "contrast",
            Self::Paradox => "paradox",
            Self::Frame => "frame",
            Self::Temporal => "temporal",
            Self::Concept => "concept",
            Self::Curated(label) => label,
        }
    }

    #[must_use]
    pub const fn is_dialectical(&self) -> bool {
        matches!(self, Self::Contrast | Self::Paradox)
    }
}

impl fmt::Display for RelationshipKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Directed relationship between two lenses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LensEdge {
    pub kind: RelationshipKind,
    /// Connection strength; higher is stronger.
    pub weight: f64,
    pub insight: String,
    /// What produced a derived edge: frame id, `"3->4"` episode step, or shared tag.
    pub origin: Option<String>,
}

/// Node and edge counts, broken down by relationship kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphStats {
    pub nodes: usize,
    pub edges: usize,
    pub edges_by_kind: BTreeMap<String, usize>,
}

/// Immutable relationship graph over the lens catalog.
///
/// Only [`crate::GraphBuilder`] can add nodes or edges; once built, every
/// operation takes `&self`, so a graph can be shared across threads behind an
/// `Arc` without locking.
#[derive(Debug, Clone)]
pub struct LensGraph {
    pub(crate) graph: DiGraph<Lens, LensEdge>,
    index: HashMap<String, NodeIndex>,
    config: GraphConfig,
}

impl LensGraph {
    pub(crate) fn new(config: GraphConfig) -> Self {
        Self {
            graph: DiGraph::new(),
            index: HashMap::new(),
            config,
        }
    }

    /// Add a lens; a repeated id keeps the first lens and returns its index.
    pub(crate) fn add_node(&mut self, lens: Lens) -> NodeIndex {
        if let Some(&idx) = self.index.get(&lens.id) {
            return idx;
        }
        let id = lens.id.clone();
        let idx = self.graph.add_node(lens);
        self.index.insert(id, idx);
        idx
    }

    /// Add `from -> to` unless that ordered pair already has an edge.
    pub(crate) fn add_edge_if_absent(
        &mut self,
        from: NodeIndex,
        to: NodeIndex,
        edge: LensEdge,
    ) -> bool {
        if from == to || self.graph.contains_edge(from, to) {
            return false;
        }
        self.graph.add_edge(from, to, edge);
        true
    }

    /// Add `from -> to` unless the pair is already connected in either direction.
    pub(crate) fn add_edge_if_unconnected(
        &mut self,
        from: NodeIndex,
        to: NodeIndex,
        edge: LensEdge,
    ) -> bool {
        if self.graph.contains_edge(to, from) {
            return false;
        }
        self.add_edge_if_absent(from, to, edge)
    }

    #[must_use]
    pub fn config(&self) -> &GraphConfig {
        &self.config
    }

    #[must_use]
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    #[must_use]
    pub fn node_index(&self, id: &str) -> Option<NodeIndex> {
        self.index.get(id).copied()
    }

    /// Look a lens up by id.
    #[must_use]
    pub fn lens(&self, id: &str) -> Option<&Lens> {
        self.node_index(id).map(|idx| &self.graph[idx])
    }

    pub(crate) fn lens_at(&self, idx: NodeIndex) -> &Lens {
        &self.graph[idx]
    }

    pub(crate) fn id_of(&self, idx: NodeIndex) -> &str {
        &self.graph[idx].id
    }

    /// Resolve a human-supplied reference: exact id, then case-insensitive
    /// name, then case-insensitive name substring (first in catalog order).
    #[must_use]
    pub fn resolve(&self, reference: &str) -> Option<&Lens> {
        if let Some(lens) = self.lens(reference) {
            return Some(lens);
        }

        let needle = reference.trim().to_lowercase();
        if needle.is_empty() {
            return None;
        }

        let lenses: Vec<&Lens> = self.lenses().collect();
        lenses
            .iter()
            .find(|lens| lens.name.to_lowercase() == needle)
            .or_else(|| {
                lenses
                    .iter()
                    .find(|lens| lens.name.to_lowercase().contains(&needle))
            })
            .copied()
    }

    /// All lenses in catalog order.
    pub fn lenses(&self) -> impl Iterator<Item = &Lens> {
        self.graph.node_indices().map(|idx| &self.graph[idx])
    }

    /// Edge between an ordered pair, if any.
    #[must_use]
    pub fn edge(&self, from: &str, to: &str) -> Option<&LensEdge> {
        let from = self.node_index(from)?;
        let to = self.node_index(to)?;
        self.edge_between(from, to)
    }

    pub(crate) fn edge_between(&self, from: NodeIndex, to: NodeIndex) -> Option<&LensEdge> {
        self.graph.find_edge(from, to).map(|e| &self.graph[e])
    }

    pub(crate) fn weight_between(&self, from: NodeIndex, to: NodeIndex) -> f64 {
        self.edge_between(from, to).map_or(0.0, |e| e.weight)
    }

    /// Edges touching `node` in the given direction, in insertion order.
    ///
    /// petgraph walks adjacency lists newest-first; callers that promise
    /// reproducible "first discovery" semantics need the load order instead.
    pub(crate) fn edges_in_order(
        &self,
        node: NodeIndex,
        direction: Direction,
    ) -> Vec<(NodeIndex, &LensEdge)> {
        let mut edges: Vec<(EdgeIndex, NodeIndex, &LensEdge)> = self
            .graph
            .edges_directed(node, direction)
            .map(|e| {
                let other = match direction {
                    Direction::Outgoing => e.target(),
                    Direction::Incoming => e.source(),
                };
                (e.id(), other, e.weight())
            })
            .collect();
        edges.sort_by_key(|(id, _, _)| *id);
        edges
            .into_iter()
            .map(|(_, other, edge)| (other, edge))
            .collect()
    }

    /// Successor nodes in insertion order.
    pub(crate) fn successors(&self, node: NodeIndex) -> Vec<NodeIndex> {
        self.edges_in_order(node, Direction::Outgoing)
            .into_iter()
            .map(|(n, _)| n)
            .collect()
    }

    #[must_use]
    pub fn stats(&self) -> GraphStats {
        let mut edges_by_kind = BTreeMap::new();
        for edge in self.graph.edge_weights() {
            *edges_by_kind
                .entry(edge.kind.as_str().to_string())
                .or_insert(0) += 1;
        }
        GraphStats {
            nodes: self.node_count(),
            edges: self.edge_count(),
            edges_by_kind,
        }
    }

    /// Every edge as `(source_id, target_id, edge)`, in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = (&str, &str, &LensEdge)> {
        self.graph.edge_references().map(|e| {
            (
                self.id_of(e.source()),
                self.id_of(e.target()),
                e.weight(),
            )
        })
    }
}
