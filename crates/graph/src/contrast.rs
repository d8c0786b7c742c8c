use crate::types::LensGraph;
use petgraph::graph::NodeIndex;
use petgraph::Direction;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A lens standing in dialectical tension with the queried one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContrastingLens {
    pub id: String,
    pub insight: String,
}

/// Thesis / antithesis / synthesis triple.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Triad {
    pub thesis: String,
    pub antithesis: String,
    pub synthesis: String,
    pub contrast_insight: String,
    pub synthesis_insight: String,
}

impl LensGraph {
    /// Lenses joined to `id` by a `contrast` or `paradox` edge in either
    /// direction: outgoing edges first, then incoming. No deduplication.
    #[must_use]
    pub fn find_contrasts(&self, id: &str) -> Vec<ContrastingLens> {
        let Some(node) = self.node_index(id) else {
            return Vec::new();
        };

        [Direction::Outgoing, Direction::Incoming]
            .into_iter()
            .flat_map(|direction| self.edges_in_order(node, direction))
            .filter(|(_, edge)| edge.kind.is_dialectical())
            .map(|(other, edge)| ContrastingLens {
                id: self.id_of(other).to_string(),
                insight: edge.insight.clone(),
            })
            .collect()
    }

    /// Up to `limit` triads for `thesis`.
    ///
    /// Each contrast of the thesis is an antithesis candidate (at most
    /// `2 * limit` are tried). The synthesis is the first lens both sides
    /// point to; failing that, the middle of the best route from thesis to
    /// antithesis when that route has an intermediate lens.
    #[must_use]
    pub fn triads(&self, thesis: &str, limit: usize) -> Vec<Triad> {
        let Some(thesis_idx) = self.node_index(thesis) else {
            return Vec::new();
        };

        let mut triads = Vec::new();
        for contrast in self.find_contrasts(thesis).into_iter().take(limit * 2) {
            if triads.len() >= limit {
                break;
            }
            let Some(antithesis_idx) = self.node_index(&contrast.id) else {
                continue;
            };
            let Some(synthesis_idx) = self.synthesis_for(thesis_idx, antithesis_idx) else {
                continue;
            };

            let synthesis_insight = format!(
                "The tension between {} and {} can be transcended through {}, which offers a \
                 higher-order perspective that integrates both viewpoints rather than choosing \
                 between them.",
                self.lens_at(thesis_idx).name,
                self.lens_at(antithesis_idx).name,
                self.lens_at(synthesis_idx).name,
            );
            triads.push(Triad {
                thesis: thesis.to_string(),
                antithesis: contrast.id,
                synthesis: self.id_of(synthesis_idx).to_string(),
                contrast_insight: contrast.insight,
                synthesis_insight,
            });
        }
        triads
    }

    fn synthesis_for(&self, thesis: NodeIndex, antithesis: NodeIndex) -> Option<NodeIndex> {
        let antithesis_next: HashSet<NodeIndex> =
            self.successors(antithesis).into_iter().collect();
        let common = self
            .successors(thesis)
            .into_iter()
            .find(|n| *n != thesis && *n != antithesis && antithesis_next.contains(n));
        if common.is_some() {
            return common;
        }

        let best = self
            .find_path(
                self.id_of(thesis),
                self.id_of(antithesis),
                self.config().query.max_path_length,
            )
            .into_iter()
            .next()?;
        if best.lenses.len() < 3 {
            return None;
        }
        self.node_index(&best.lenses[best.lenses.len() / 2])
    }
}
