use crate::types::LensGraph;
use petgraph::graph::NodeIndex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bridge {
    pub id: String,
    /// Total weight of edges, either direction, tying the bridge to the query set.
    pub score: f64,
}

impl LensGraph {
    /// Lenses that sit one hop between members of `ids`.
    ///
    /// For every unordered pair a candidate is any lens `x` with `a -> x -> b`
    /// or `b -> x -> a`. Candidates are ranked by the summed weight of their
    /// edges to and from every other member of `ids`; ties keep discovery
    /// order. Unknown ids are ignored.
    #[must_use]
    pub fn find_bridges(&self, ids: &[String]) -> Vec<Bridge> {
        let members = self.known_unique(ids);

        let mut seen = HashSet::new();
        let mut candidates: Vec<NodeIndex> = Vec::new();
        for (i, &a) in members.iter().enumerate() {
            for &b in &members[i + 1..] {
                for (from, to) in [(a, b), (b, a)] {
                    for middle in self.successors(from) {
                        if middle != to && self.graph.contains_edge(middle, to) && seen.insert(middle)
                        {
                            candidates.push(middle);
                        }
                    }
                }
            }
        }

        let mut bridges: Vec<Bridge> = candidates
            .into_iter()
            .map(|bridge| {
                let score = members
                    .iter()
                    .filter(|&&member| member != bridge)
                    .map(|&member| {
                        self.weight_between(member, bridge) + self.weight_between(bridge, member)
                    })
                    .sum();
                Bridge {
                    id: self.id_of(bridge).to_string(),
                    score,
                }
            })
            .collect();

        bridges.sort_by(|a, b| b.score.total_cmp(&a.score));
        bridges.truncate(self.config().query.bridge_limit);
        bridges
    }

    /// Node indices for the known ids, first occurrence only.
    pub(crate) fn known_unique(&self, ids: &[String]) -> Vec<NodeIndex> {
        let mut seen = HashSet::new();
        ids.iter()
            .filter_map(|id| self.node_index(id))
            .filter(|idx| seen.insert(*idx))
            .collect()
    }
}
