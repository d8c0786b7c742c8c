use crate::types::LensGraph;
use petgraph::Direction;
use std::collections::{BTreeMap, HashSet, VecDeque};

/// Lenses reachable from a starting lens, grouped by relationship kind label.
pub type Neighborhood = BTreeMap<String, Vec<String>>;

impl LensGraph {
    /// Breadth-first walk over outgoing edges up to `radius` hops.
    ///
    /// A lens is filed under the kind of the edge that first reached it and is
    /// never revisited, even if a shorter or stronger edge of another kind
    /// leads to it later. The start lens is never included.
    #[must_use]
    pub fn neighborhood(&self, id: &str, radius: usize) -> Neighborhood {
        let mut groups = Neighborhood::new();
        let Some(start) = self.node_index(id) else {
            return groups;
        };

        let mut visited = HashSet::from([start]);
        let mut queue = VecDeque::from([(start, 0usize)]);

        while let Some((current, depth)) = queue.pop_front() {
            if depth >= radius {
                continue;
            }

            for (next, edge) in self.edges_in_order(current, Direction::Outgoing) {
                if visited.insert(next) {
                    groups
                        .entry(edge.kind.as_str().to_string())
                        .or_default()
                        .push(self.id_of(next).to_string());
                    queue.push_back((next, depth + 1));
                }
            }
        }

        groups
    }
}
