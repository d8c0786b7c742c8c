use crate::error::{GraphError, Result};
use crate::types::LensGraph;
use petgraph::Direction;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;

/// Structural importance measure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CentralityMeasure {
    Betweenness,
    Eigenvector,
    #[serde(rename = "pagerank")]
    PageRank,
    Degree,
}

impl CentralityMeasure {
    /// Recognised measure names, case-insensitive.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "betweenness" => Some(Self::Betweenness),
            "eigenvector" => Some(Self::Eigenvector),
            "pagerank" | "page_rank" => Some(Self::PageRank),
            "degree" => Some(Self::Degree),
            _ => None,
        }
    }

    /// Parse a measure name; anything unrecognised means degree centrality.
    #[must_use]
    pub fn parse(name: &str) -> Self {
        Self::from_name(name).unwrap_or(Self::Degree)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Betweenness => "betweenness",
            Self::Eigenvector => "eigenvector",
            Self::PageRank => "pagerank",
            Self::Degree => "degree",
        }
    }
}

impl fmt::Display for CentralityMeasure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CentralEntry {
    pub id: String,
    pub score: f64,
    pub name: String,
}

/// Ranked lenses together with the measure that actually produced them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CentralityRanking {
    pub requested: CentralityMeasure,
    pub used: CentralityMeasure,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    pub entries: Vec<CentralEntry>,
}

impl CentralityRanking {
    #[must_use]
    pub fn degraded(&self) -> bool {
        self.requested != self.used
    }
}

impl LensGraph {
    /// Top lenses under `measure`.
    ///
    /// Eigenvector failure degrades to degree centrality; pagerank failure
    /// degrades to betweenness and says so in `note`. Ties keep catalog order.
    #[must_use]
    pub fn rank(&self, measure: CentralityMeasure) -> CentralityRanking {
        let (used, scores, note) = match measure {
            CentralityMeasure::Betweenness => (measure, self.betweenness_scores(), None),
            CentralityMeasure::Degree => (measure, self.degree_scores(), None),
            CentralityMeasure::Eigenvector => match self.eigenvector_scores() {
                Ok(scores) => (measure, scores, None),
                Err(e) => {
                    log::debug!("Eigenvector centrality unavailable, using degree: {e}");
                    (CentralityMeasure::Degree, self.degree_scores(), None)
                }
            },
            CentralityMeasure::PageRank => match self.pagerank_scores() {
                Ok(scores) => (measure, scores, None),
                Err(e) => {
                    log::warn!("PageRank failed, falling back to betweenness: {e}");
                    (
                        CentralityMeasure::Betweenness,
                        self.betweenness_scores(),
                        Some(format!(
                            "Using betweenness centrality because PageRank is unavailable ({e})"
                        )),
                    )
                }
            },
        };

        let mut ranked: Vec<(usize, f64)> = scores.into_iter().enumerate().collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
        ranked.truncate(self.config().query.centrality_limit);

        let entries = ranked
            .into_iter()
            .map(|(pos, score)| {
                let lens = self.lens_at(petgraph::graph::NodeIndex::new(pos));
                CentralEntry {
                    id: lens.id.clone(),
                    score,
                    name: lens.name.clone(),
                }
            })
            .collect();

        CentralityRanking {
            requested: measure,
            used,
            note,
            entries,
        }
    }

    /// [`LensGraph::rank`] for a measure given by name.
    #[must_use]
    pub fn rank_by_name(&self, measure: &str) -> CentralityRanking {
        self.rank(CentralityMeasure::parse(measure))
    }

    fn adjacency(&self) -> Vec<Vec<(usize, f64)>> {
        self.graph
            .node_indices()
            .map(|idx| {
                self.edges_in_order(idx, Direction::Outgoing)
                    .into_iter()
                    .map(|(next, edge)| (next.index(), edge.weight))
                    .collect()
            })
            .collect()
    }

    /// (in + out degree) / (n - 1); every node scores 1 in graphs of one node.
    #[must_use]
    pub fn degree_scores(&self) -> Vec<f64> {
        let n = self.node_count();
        if n <= 1 {
            return vec![1.0; n];
        }
        #[allow(clippy::cast_precision_loss)]
        let scale = 1.0 / (n - 1) as f64;
        self.graph
            .node_indices()
            .map(|idx| {
                let degree = self.graph.edges_directed(idx, Direction::Outgoing).count()
                    + self.graph.edges_directed(idx, Direction::Incoming).count();
                #[allow(clippy::cast_precision_loss)]
                let degree = degree as f64;
                degree * scale
            })
            .collect()
    }

    /// Unweighted shortest-path betweenness (Brandes), normalised by
    /// `(n - 1)(n - 2)` for graphs with more than two nodes.
    #[must_use]
    pub fn betweenness_scores(&self) -> Vec<f64> {
        let adjacency = self.adjacency();
        let n = adjacency.len();
        let mut centrality = vec![0.0; n];

        for source in 0..n {
            let mut order = Vec::with_capacity(n);
            let mut predecessors: Vec<Vec<usize>> = vec![Vec::new(); n];
            let mut paths = vec![0.0_f64; n];
            let mut distance: Vec<Option<usize>> = vec![None; n];
            paths[source] = 1.0;
            distance[source] = Some(0);

            let mut queue = VecDeque::from([source]);
            while let Some(v) = queue.pop_front() {
                order.push(v);
                let Some(dv) = distance[v] else { continue };
                for &(w, _) in &adjacency[v] {
                    if distance[w].is_none() {
                        distance[w] = Some(dv + 1);
                        queue.push_back(w);
                    }
                    if distance[w] == Some(dv + 1) {
                        paths[w] += paths[v];
                        predecessors[w].push(v);
                    }
                }
            }

            let mut dependency = vec![0.0_f64; n];
            while let Some(w) = order.pop() {
                for &v in &predecessors[w] {
                    dependency[v] += paths[v] / paths[w] * (1.0 + dependency[w]);
                }
                if w != source {
                    centrality[w] += dependency[w];
                }
            }
        }

        if n > 2 {
            #[allow(clippy::cast_precision_loss)]
            let scale = 1.0 / ((n - 1) * (n - 2)) as f64;
            for value in &mut centrality {
                *value *= scale;
            }
        }
        centrality
    }

    /// Unweighted eigenvector centrality by power iteration over incoming
    /// edges, with the previous vector added each round to damp oscillation.
    pub fn eigenvector_scores(&self) -> Result<Vec<f64>> {
        let adjacency = self.adjacency();
        let n = adjacency.len();
        if n == 0 {
            return Err(GraphError::Degenerate {
                measure: "eigenvector",
                reason: "graph has no nodes".to_string(),
            });
        }

        let settings = self.config().centrality;
        #[allow(clippy::cast_precision_loss)]
        let n_f = n as f64;
        let mut x = vec![1.0 / n_f; n];

        for _ in 0..settings.eigenvector_max_iter {
            let last = x.clone();
            for (u, neighbors) in adjacency.iter().enumerate() {
                for &(v, _) in neighbors {
                    x[v] += last[u];
                }
            }

            let norm = x.iter().map(|v| v * v).sum::<f64>().sqrt();
            let norm = if norm > 0.0 { norm } else { 1.0 };
            for value in &mut x {
                *value /= norm;
            }

            let change: f64 = x.iter().zip(&last).map(|(a, b)| (a - b).abs()).sum();
            if change < n_f * settings.tolerance {
                return Ok(x);
            }
        }

        Err(GraphError::NotConverged {
            measure: "eigenvector",
            iterations: settings.eigenvector_max_iter,
        })
    }

    /// Weighted PageRank; dangling lenses spread their rank uniformly.
    pub fn pagerank_scores(&self) -> Result<Vec<f64>> {
        let adjacency = self.adjacency();
        let n = adjacency.len();
        if n == 0 {
            return Ok(Vec::new());
        }
        if let Some(bad) = adjacency
            .iter()
            .flatten()
            .map(|(_, w)| *w)
            .find(|w| !w.is_finite() || *w < 0.0)
        {
            return Err(GraphError::Degenerate {
                measure: "pagerank",
                reason: format!("edge weight {bad} is not a finite non-negative number"),
            });
        }

        let settings = self.config().centrality;
        let alpha = settings.pagerank_damping;
        #[allow(clippy::cast_precision_loss)]
        let n_f = n as f64;
        let uniform = 1.0 / n_f;
        let out_weight: Vec<f64> = adjacency
            .iter()
            .map(|neighbors| neighbors.iter().map(|(_, w)| w).sum())
            .collect();

        let mut x = vec![uniform; n];
        for _ in 0..settings.pagerank_max_iter {
            let last = std::mem::replace(&mut x, vec![0.0; n]);
            let dangling: f64 = last
                .iter()
                .zip(&out_weight)
                .filter(|(_, w)| **w <= 0.0)
                .map(|(rank, _)| rank)
                .sum();

            for (u, neighbors) in adjacency.iter().enumerate() {
                if out_weight[u] <= 0.0 {
                    continue;
                }
                for &(v, w) in neighbors {
                    x[v] += alpha * last[u] * w / out_weight[u];
                }
            }
            let base = alpha * dangling * uniform + (1.0 - alpha) * uniform;
            for value in &mut x {
                *value += base;
            }

            let change: f64 = x.iter().zip(&last).map(|(a, b)| (a - b).abs()).sum();
            if change < n_f * settings.tolerance {
                return Ok(x);
            }
        }

        Err(GraphError::NotConverged {
            measure: "pagerank",
            iterations: settings.pagerank_max_iter,
        })
    }
}
