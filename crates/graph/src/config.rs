use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Top-level configuration for building and querying a lens graph.
///
/// Every section falls back to its defaults, so a partial TOML file only
/// needs to name the values it overrides:
///
/// ```toml
/// [weights]
/// frame = 0.25
///
/// [clustering]
/// algorithm = "connected_components"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    pub snapshot: SnapshotConfig,
    pub weights: DerivedWeights,
    pub rare_tag: RareTagBand,
    pub query: QueryConfig,
    pub enhancer: EnhancerConfig,
    pub centrality: CentralityConfig,
    pub clustering: ClusteringConfig,
}

impl GraphConfig {
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        Ok(toml::from_str(raw)?)
    }

    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&raw)
    }
}

/// Where the three snapshot documents live.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnapshotConfig {
    pub data_dir: PathBuf,
    pub catalog_file: String,
    pub relationships_file: String,
    pub frames_file: String,
}

impl Default for SnapshotConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            catalog_file: "all_lenses_for_analysis.json".to_string(),
            relationships_file: "claude_lens_connections_analysis.json".to_string(),
            frames_file: "lens_frames_thematic.json".to_string(),
        }
    }
}

/// Weights assigned to relationships the builder derives itself.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DerivedWeights {
    pub frame: f64,
    pub temporal: f64,
    pub concept: f64,
}

impl Default for DerivedWeights {
    fn default() -> Self {
        Self {
            frame: 0.3,
            temporal: 0.1,
            concept: 0.4,
        }
    }
}

/// Inclusive band of lens counts for which a shared tag produces concept edges.
/// Tags shared more widely are too generic to carry information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RareTagBand {
    pub min_lenses: usize,
    pub max_lenses: usize,
}

impl Default for RareTagBand {
    fn default() -> Self {
        Self {
            min_lenses: 2,
            max_lenses: 5,
        }
    }
}

impl RareTagBand {
    #[must_use]
    pub fn contains(&self, count: usize) -> bool {
        (self.min_lenses..=self.max_lenses).contains(&count)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryConfig {
    /// Default edge bound for `find_path`.
    pub max_path_length: usize,
    pub path_limit: usize,
    pub bridge_limit: usize,
    pub journey_max_edges: usize,
    pub journey_candidate_limit: usize,
    /// Floor applied to edge weights before inverting them into search costs.
    pub min_edge_weight: f64,
    pub centrality_limit: usize,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            max_path_length: 4,
            path_limit: 3,
            bridge_limit: 5,
            journey_max_edges: 5,
            journey_candidate_limit: 5,
            min_edge_weight: 0.01,
            centrality_limit: 10,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnhancerConfig {
    pub contrast_seeds: usize,
    pub neighborhood_seeds: usize,
    pub neighborhood_radius: usize,
    pub recommend_limit: usize,
}

impl Default for EnhancerConfig {
    fn default() -> Self {
        Self {
            contrast_seeds: 3,
            neighborhood_seeds: 2,
            neighborhood_radius: 1,
            recommend_limit: 5,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CentralityConfig {
    pub pagerank_damping: f64,
    pub pagerank_max_iter: usize,
    pub eigenvector_max_iter: usize,
    /// Per-node tolerance; convergence requires total change below `n * tolerance`.
    pub tolerance: f64,
}

impl Default for CentralityConfig {
    fn default() -> Self {
        Self {
            pagerank_damping: 0.85,
            pagerank_max_iter: 100,
            eigenvector_max_iter: 100,
            tolerance: 1e-6,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClusterAlgorithm {
    #[default]
    Louvain,
    ConnectedComponents,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClusteringConfig {
    pub algorithm: ClusterAlgorithm,
    pub resolution: f64,
}

impl Default for ClusteringConfig {
    fn default() -> Self {
        Self {
            algorithm: ClusterAlgorithm::Louvain,
            resolution: 1.0,
        }
    }
}
