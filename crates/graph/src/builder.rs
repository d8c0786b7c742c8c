use crate::config::GraphConfig;
use crate::error::{GraphError, Result};
use crate::snapshot::{FrameRecord, LensRecord, RelationshipRecord, SnapshotSource};
use crate::types::{Lens, LensEdge, LensGraph, RelationshipKind};
use petgraph::graph::NodeIndex;
use std::collections::{BTreeMap, HashMap};

/// Assembles a [`LensGraph`] from a snapshot.
///
/// Relationship sources are applied in a fixed precedence order and the first
/// edge written for a pair wins:
///
/// 1. curated relationships (one edge per ordered pair),
/// 2. frame co-membership,
/// 3. temporal adjacency of episode markers,
/// 4. shared rare tags.
///
/// Derived kinds (2-4) are dropped when the pair is already connected in
/// either direction, even by an unrelated curated edge. Weights are never
/// merged.
#[derive(Debug, Clone)]
pub struct GraphBuilder {
    config: GraphConfig,
}

#[derive(Debug, Default, Clone, Copy)]
struct EdgeTally {
    added: usize,
    suppressed: usize,
}

impl GraphBuilder {
    #[must_use]
    pub const fn new(config: GraphConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &GraphConfig {
        &self.config
    }

    /// Build a graph from whatever documents `source` can provide.
    ///
    /// A document that fails to load is logged and skipped. The only hard
    /// failure is ending up with no lenses at all.
    pub fn build(&self, source: &dyn SnapshotSource) -> Result<LensGraph> {
        let mut graph = LensGraph::new(self.config.clone());

        // Phase 1: lenses become nodes
        let lenses = load_or_skip("lens catalog", source.load_lenses());
        for record in lenses {
            graph.add_node(Self::lens_from_record(record));
        }
        if graph.node_count() == 0 {
            return Err(GraphError::EmptyCatalog);
        }
        log::info!("Loaded {} lenses into graph", graph.node_count());

        // Phase 2: curated relationships
        let relationships = load_or_skip("relationships", source.load_relationships());
        let curated = self.add_curated(&mut graph, &relationships);
        log::info!(
            "Loaded {} curated relationships ({} skipped)",
            curated.added,
            curated.suppressed
        );

        // Phase 3: frame co-membership
        let frames = load_or_skip("frames", source.load_frames());
        let framed = self.add_frame_edges(&mut graph, &frames);

        // Phase 4: temporal adjacency
        let temporal = self.add_temporal_edges(&mut graph);

        // Phase 5: shared rare tags
        let concept = self.add_concept_edges(&mut graph);

        log::debug!(
            "Derived edges added/suppressed: frame {}/{}, temporal {}/{}, concept {}/{}",
            framed.added,
            framed.suppressed,
            temporal.added,
            temporal.suppressed,
            concept.added,
            concept.suppressed
        );
        log::info!(
            "Built lens graph: {} nodes, {} edges",
            graph.node_count(),
            graph.edge_count()
        );

        Ok(graph)
    }

    fn lens_from_record(record: LensRecord) -> Lens {
        let sequence_index = record.episode.as_ref().and_then(|e| e.sequence_index());
        Lens {
            id: record.id,
            name: record.name,
            sequence_index,
            lens_type: record.lens_type,
            definition: record.definition,
            tags: record.related_concepts,
        }
    }

    fn add_curated(&self, graph: &mut LensGraph, relationships: &[RelationshipRecord]) -> EdgeTally {
        let mut tally = EdgeTally::default();
        for rel in relationships {
            let endpoints = graph
                .node_index(&rel.source_id)
                .zip(graph.node_index(&rel.target_id));
            let Some((from, to)) = endpoints else {
                log::debug!(
                    "Skipping relationship {} -> {}: unknown lens",
                    rel.source_id,
                    rel.target_id
                );
                tally.suppressed += 1;
                continue;
            };

            let edge = LensEdge {
                kind: RelationshipKind::curated(&rel.kind),
                weight: rel.weight,
                insight: rel.insight.clone(),
                origin: None,
            };
            if graph.add_edge_if_absent(from, to, edge) {
                tally.added += 1;
            } else {
                tally.suppressed += 1;
            }
        }
        tally
    }

    fn add_frame_edges(&self, graph: &mut LensGraph, frames: &[FrameRecord]) -> EdgeTally {
        let mut tally = EdgeTally::default();
        for frame in frames {
            let members: Vec<NodeIndex> = frame
                .lens_ids
                .iter()
                .filter_map(|id| graph.node_index(id))
                .collect();
            let template = LensEdge {
                kind: RelationshipKind::Frame,
                weight: self.config.weights.frame,
                insight: String::new(),
                origin: Some(frame.id.clone()),
            };
            connect_pairs(graph, &members, &template, &mut tally);
        }
        tally
    }

    fn add_temporal_edges(&self, graph: &mut LensGraph) -> EdgeTally {
        let mut by_episode: BTreeMap<i64, Vec<NodeIndex>> = BTreeMap::new();
        for idx in graph.graph.node_indices() {
            if let Some(ep) = graph.lens_at(idx).sequence_index {
                by_episode.entry(ep).or_default().push(idx);
            }
        }

        let mut tally = EdgeTally::default();
        for (&ep, earlier) in &by_episode {
            let Some(later) = ep.checked_add(1).and_then(|next| by_episode.get(&next)) else {
                continue;
            };
            for &from in earlier {
                for &to in later {
                    let edge = LensEdge {
                        kind: RelationshipKind::Temporal,
                        weight: self.config.weights.temporal,
                        insight: String::new(),
                        origin: Some(format!("{ep}->{}", ep + 1)),
                    };
                    record(&mut tally, graph.add_edge_if_unconnected(from, to, edge));
                }
            }
        }
        tally
    }

    fn add_concept_edges(&self, graph: &mut LensGraph) -> EdgeTally {
        // Tag -> lenses carrying it, in order of first appearance.
        let mut order: Vec<String> = Vec::new();
        let mut by_tag: HashMap<String, Vec<NodeIndex>> = HashMap::new();
        for idx in graph.graph.node_indices() {
            for tag in &graph.lens_at(idx).tags {
                let tag = tag.trim().to_lowercase();
                if tag.is_empty() {
                    continue;
                }
                let members = by_tag.entry(tag.clone()).or_insert_with(|| {
                    order.push(tag);
                    Vec::new()
                });
                if !members.contains(&idx) {
                    members.push(idx);
                }
            }
        }

        let mut tally = EdgeTally::default();
        for tag in order {
            let members = &by_tag[&tag];
            if !self.config.rare_tag.contains(members.len()) {
                continue;
            }
            let template = LensEdge {
                kind: RelationshipKind::Concept,
                weight: self.config.weights.concept,
                insight: String::new(),
                origin: Some(tag.clone()),
            };
            connect_pairs(graph, members, &template, &mut tally);
        }
        tally
    }
}

/// Connect every earlier member to every later one with a copy of `template`.
fn connect_pairs(
    graph: &mut LensGraph,
    members: &[NodeIndex],
    template: &LensEdge,
    tally: &mut EdgeTally,
) {
    for (i, &from) in members.iter().enumerate() {
        for &to in &members[i + 1..] {
            record(tally, graph.add_edge_if_unconnected(from, to, template.clone()));
        }
    }
}

fn record(tally: &mut EdgeTally, added: bool) {
    if added {
        tally.added += 1;
    } else {
        tally.suppressed += 1;
    }
}

fn load_or_skip<T>(what: &str, loaded: Result<Vec<T>>) -> Vec<T> {
    loaded.unwrap_or_else(|e| {
        log::error!("Failed to load {what}: {e}");
        Vec::new()
    })
}
