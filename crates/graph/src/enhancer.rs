//! Graph-based augmentation of externally retrieved lens sets.

use crate::snapshot::{null_as_default, Episode};
use crate::types::{Lens, LensGraph};
use petgraph::graph::NodeIndex;
use petgraph::Direction;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashSet;
use std::sync::Arc;

const RECOMMENDATION_REASON: &str = "Connected through graph relationships";

/// Where a retrieved lens came from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Provenance {
    /// Produced by the caller's own retrieval (search, embeddings, ...).
    #[default]
    External,
    /// Added from graph structure.
    Graph,
}

/// One entry of a retrieval result set.
///
/// Fields the graph does not know about are kept in `extra` and passed
/// through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetrievedLens {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub episode: Option<Episode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub definition: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub related_concepts: Vec<String>,
    #[serde(default)]
    pub source: Provenance,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl RetrievedLens {
    /// A bare externally retrieved id with no metadata.
    #[must_use]
    pub fn external(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: None,
            episode: None,
            definition: None,
            related_concepts: Vec::new(),
            source: Provenance::External,
            extra: Map::new(),
        }
    }

    fn from_graph(lens: &Lens) -> Self {
        Self {
            id: lens.id.clone(),
            name: Some(lens.name.clone()),
            episode: lens.sequence_index.map(Episode::Number),
            definition: Some(lens.definition.clone()),
            related_concepts: lens.tags.clone(),
            source: Provenance::Graph,
            extra: Map::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub id: String,
    pub name: String,
    pub episode: Option<i64>,
    pub score: f64,
    pub reason: String,
}

/// Augments retrieval results with structurally related lenses.
#[derive(Debug, Clone)]
pub struct RetrievalEnhancer {
    graph: Arc<LensGraph>,
}

impl RetrievalEnhancer {
    pub fn new(graph: Arc<LensGraph>) -> Self {
        Self { graph }
    }

    #[must_use]
    pub fn graph(&self) -> &LensGraph {
        &self.graph
    }

    /// Append graph-derived lenses to `initial`.
    ///
    /// Candidates are, in order: bridges among all initial ids, contrasts of
    /// the first few ids, then neighborhoods of the first couple. Anything
    /// already in `initial` or unknown to the graph is skipped; the original
    /// entries are returned first and unchanged.
    #[must_use]
    pub fn enhance(&self, initial: Vec<RetrievedLens>) -> Vec<RetrievedLens> {
        let graph = self.graph.as_ref();
        let settings = &graph.config().enhancer;

        let mut seeds: Vec<String> = Vec::new();
        for lens in &initial {
            if !seeds.contains(&lens.id) {
                seeds.push(lens.id.clone());
            }
        }

        let mut candidates: Vec<String> = graph
            .find_bridges(&seeds)
            .into_iter()
            .map(|bridge| bridge.id)
            .collect();
        for seed in seeds.iter().take(settings.contrast_seeds) {
            candidates.extend(graph.find_contrasts(seed).into_iter().map(|c| c.id));
        }
        for seed in seeds.iter().take(settings.neighborhood_seeds) {
            candidates.extend(
                graph
                    .neighborhood(seed, settings.neighborhood_radius)
                    .into_values()
                    .flatten(),
            );
        }

        let mut seen: HashSet<String> = seeds.into_iter().collect();
        let initial_len = initial.len();
        let mut enhanced = initial;
        for id in candidates {
            if !seen.insert(id.clone()) {
                continue;
            }
            if let Some(lens) = graph.lens(&id) {
                enhanced.push(RetrievedLens::from_graph(lens));
            }
        }

        log::info!(
            "Enhanced {} lenses to {} using graph",
            initial_len,
            enhanced.len()
        );
        enhanced
    }

    /// Lenses adjacent (either direction) to `current` but not in it, ranked
    /// by the total weight of their edges to the current set.
    #[must_use]
    pub fn recommend(&self, current: &[String], limit: usize) -> Vec<Recommendation> {
        let graph = self.graph.as_ref();
        let members = graph.known_unique(current);
        let excluded: HashSet<NodeIndex> = members.iter().copied().collect();

        let mut scores: Vec<(NodeIndex, f64)> = Vec::new();
        for &member in &members {
            for direction in [Direction::Outgoing, Direction::Incoming] {
                for (other, edge) in graph.edges_in_order(member, direction) {
                    if excluded.contains(&other) {
                        continue;
                    }
                    match scores.iter_mut().find(|(n, _)| *n == other) {
                        Some((_, score)) => *score += edge.weight,
                        None => scores.push((other, edge.weight)),
                    }
                }
            }
        }

        scores.sort_by(|a, b| b.1.total_cmp(&a.1));
        scores
            .into_iter()
            .take(limit)
            .map(|(idx, score)| {
                let lens = graph.lens_at(idx);
                Recommendation {
                    id: lens.id.clone(),
                    name: lens.name.clone(),
                    episode: lens.sequence_index,
                    score,
                    reason: RECOMMENDATION_REASON.to_string(),
                }
            })
            .collect()
    }
}
