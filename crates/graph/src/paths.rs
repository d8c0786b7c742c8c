use crate::types::LensGraph;
use petgraph::algo::{all_simple_paths, astar};
use petgraph::graph::NodeIndex;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// A route through the graph scored by the sum of its edge weights.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredPath {
    pub lenses: Vec<String>,
    pub score: f64,
}

/// Best route found between one pair of lenses in a synthesis query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PairPath {
    pub from: String,
    pub to: String,
    pub path: Vec<String>,
    /// Number of lenses on the path, endpoints included.
    pub length: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Synthesis {
    pub paths: Vec<PairPath>,
    pub insight: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressionStep {
    pub step: usize,
    pub id: String,
    pub name: String,
    pub insight: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Progression {
    pub steps: Vec<ProgressionStep>,
    pub summary: String,
}

impl LensGraph {
    /// Top-scoring simple directed paths from `source` to `target` with at
    /// most `max_length` edges.
    ///
    /// Paths are ranked by total edge weight (higher first), then by fewer
    /// hops, then by lens ids. Unknown endpoints or no route give an empty list.
    #[must_use]
    pub fn find_path(&self, source: &str, target: &str, max_length: usize) -> Vec<ScoredPath> {
        let (Some(from), Some(to)) = (self.node_index(source), self.node_index(target)) else {
            return Vec::new();
        };
        if from == to {
            return Vec::new();
        }
        let Some(max_intermediate) = max_length.checked_sub(1) else {
            return Vec::new();
        };

        let mut scored: Vec<(Vec<NodeIndex>, f64)> =
            all_simple_paths::<Vec<NodeIndex>, _>(&self.graph, from, to, 0, Some(max_intermediate))
                .map(|path| {
                    let score = self.path_weight(&path);
                    (path, score)
                })
                .collect();

        scored.sort_by(|a, b| {
            b.1.total_cmp(&a.1)
                .then_with(|| a.0.len().cmp(&b.0.len()))
                .then_with(|| self.compare_routes(&a.0, &b.0))
        });
        scored.truncate(self.config().query.path_limit);

        scored
            .into_iter()
            .map(|(path, score)| ScoredPath {
                lenses: self.ids(&path),
                score,
            })
            .collect()
    }

    /// Weighted shortest route from `start` toward a lens whose definition or
    /// tags mention `target_text` (case-insensitive).
    ///
    /// Edge cost is the inverse of the edge weight, floored at
    /// `query.min_edge_weight`. Only the first `query.journey_candidate_limit`
    /// matching lenses are tried and routes longer than
    /// `query.journey_max_edges` edges are discarded; the route with the
    /// fewest lenses wins.
    #[must_use]
    pub fn suggest_journey(&self, start: &str, target_text: &str) -> Vec<String> {
        let Some(start_idx) = self.node_index(start) else {
            return Vec::new();
        };
        let needle = target_text.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }

        let query = self.config().query;
        let floor = query.min_edge_weight;

        let candidates: Vec<NodeIndex> = self
            .graph
            .node_indices()
            .filter(|&idx| {
                let lens = self.lens_at(idx);
                lens.definition.to_lowercase().contains(&needle)
                    || lens.tags.iter().any(|t| t.to_lowercase().contains(&needle))
            })
            .take(query.journey_candidate_limit)
            .collect();

        candidates
            .into_iter()
            .filter_map(|goal| {
                astar(
                    &self.graph,
                    start_idx,
                    |n| n == goal,
                    |e| 1.0 / e.weight().weight.max(floor),
                    |_| 0.0,
                )
                .map(|(_cost, path)| path)
            })
            .filter(|path| path.len() - 1 <= query.journey_max_edges)
            .min_by_key(Vec::len)
            .map(|path| self.ids(&path))
            .unwrap_or_default()
    }

    /// Best connecting route for every pair in `ids`, shortest routes first.
    ///
    /// Returns `None` for fewer than two ids or when no pair is connected.
    #[must_use]
    pub fn synthesis_path(&self, ids: &[String]) -> Option<Synthesis> {
        if ids.len() < 2 {
            return None;
        }

        let max_length = self.config().query.max_path_length;
        let mut paths = Vec::new();
        for (i, from) in ids.iter().enumerate() {
            for to in &ids[i + 1..] {
                if let Some(best) = self.find_path(from, to, max_length).into_iter().next() {
                    paths.push(PairPath {
                        from: from.clone(),
                        to: to.clone(),
                        length: best.lenses.len(),
                        path: best.lenses,
                    });
                }
            }
        }

        paths.sort_by_key(|p| p.length);
        paths.truncate(3);
        let insight = self.path_insight(paths.first()?);
        Some(Synthesis { paths, insight })
    }

    /// Learning progression from `start` to `target` along the best route,
    /// evenly down-sampled to at most `max_steps` lenses (the target is always
    /// kept).
    #[must_use]
    pub fn progression(&self, start: &str, target: &str, max_steps: usize) -> Option<Progression> {
        if max_steps == 0 {
            return None;
        }
        let best = self
            .find_path(start, target, self.config().query.max_path_length)
            .into_iter()
            .next()?;

        let route = sample_evenly(&best.lenses, max_steps);
        let total = route.len();
        let mut steps: Vec<ProgressionStep> = Vec::with_capacity(total);
        for (i, id) in route.iter().enumerate() {
            let Some(lens) = self.lens(id) else { continue };
            let insight = if i == 0 {
                format!(
                    "Begin with {} to establish the foundation for this conceptual journey.",
                    lens.name
                )
            } else if i == total - 1 {
                format!(
                    "Arrive at {}, integrating insights from the preceding lenses.",
                    lens.name
                )
            } else {
                let previous = steps
                    .last()
                    .map_or("the previous lens", |s| s.name.as_str());
                format!(
                    "{} builds on {previous}, adding a new dimension to the exploration.",
                    lens.name
                )
            };
            steps.push(ProgressionStep {
                step: i + 1,
                id: lens.id.clone(),
                name: lens.name.clone(),
                insight,
            });
        }

        let name_of = |id: &str| self.lens(id).map_or(id, |l| l.name.as_str()).to_string();
        let summary = format!(
            "A {}-step journey from {} to {}",
            steps.len(),
            name_of(start),
            name_of(target)
        );
        Some(Progression { steps, summary })
    }

    fn path_insight(&self, pair: &PairPath) -> String {
        match pair.path.len() {
            2 => "These lenses are directly connected".to_string(),
            3 => {
                let bridge = self
                    .lens(&pair.path[1])
                    .map_or("Unknown", |l| l.name.as_str());
                format!("These lenses connect through {bridge}")
            }
            n => format!(
                "These lenses connect through a {} step journey",
                n.saturating_sub(1)
            ),
        }
    }

    pub(crate) fn path_weight(&self, path: &[NodeIndex]) -> f64 {
        path.windows(2)
            .map(|w| self.weight_between(w[0], w[1]))
            .sum()
    }

    fn compare_routes(&self, a: &[NodeIndex], b: &[NodeIndex]) -> Ordering {
        a.iter()
            .map(|&n| self.id_of(n))
            .cmp(b.iter().map(|&n| self.id_of(n)))
    }

    pub(crate) fn ids(&self, path: &[NodeIndex]) -> Vec<String> {
        path.iter().map(|&n| self.id_of(n).to_string()).collect()
    }
}

/// Keep `max` evenly spaced entries of `route`, always ending on its last one.
fn sample_evenly(route: &[String], max: usize) -> Vec<String> {
    if route.len() <= max {
        return route.to_vec();
    }
    #[allow(clippy::cast_precision_loss)]
    let stride = route.len() as f64 / max as f64;
    let mut indices: Vec<usize> = (0..max)
        .map(|i| {
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let at = (i as f64 * stride) as usize;
            at
        })
        .collect();
    if let Some(last) = indices.last_mut() {
        *last = route.len() - 1;
    }
    indices.into_iter().map(|i| route[i].clone()).collect()
}
