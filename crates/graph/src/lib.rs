//! # Lens Graph
//!
//! Relationship graph over a catalog of analytical lenses, with structural
//! queries for navigation and retrieval augmentation.
//!
//! ## Features
//!
//! - **Path finding** - weighted routes and journeys between lenses
//! - **Bridges and contrasts** - connectors within a set, dialectical opposites
//! - **Neighborhoods and clusters** - local and global structure
//! - **Centrality** - betweenness, eigenvector, pagerank and degree rankings
//! - **Retrieval enhancement** - widen an external result set using the graph
//!
//! ## Architecture
//!
//! ```text
//! Snapshot (catalog, relationships, frames)
//!     │
//!     ├──> Graph Builder
//!     │      ├─ Lenses become nodes
//!     │      ├─ Curated relationships (first edge per pair wins)
//!     │      ├─ Frame co-membership
//!     │      ├─ Temporal adjacency
//!     │      └─ Shared rare tags
//!     │
//!     ├──> Lens Graph (petgraph, immutable once built)
//!     │      ├─ Nodes: lenses
//!     │      └─ Edges: curated / frame / temporal / concept
//!     │
//!     └──> Queries (&self, shareable behind Arc)
//!            ├─ find_path, suggest_journey, find_bridges, find_contrasts
//!            ├─ neighborhood, clusters, rank
//!            └─ RetrievalEnhancer: enhance, recommend
//! ```

mod bridges;
mod builder;
mod centrality;
mod cluster;
mod config;
mod contrast;
mod enhancer;
mod error;
mod handle;
mod neighborhood;
mod paths;
mod snapshot;
mod types;

pub use bridges::Bridge;
pub use builder::GraphBuilder;
pub use centrality::{CentralEntry, CentralityMeasure, CentralityRanking};
pub use cluster::{
    partitioner_for, Clustering, ConnectedComponents, Louvain, Partitioner, UndirectedView,
};
pub use config::{
    CentralityConfig, ClusterAlgorithm, ClusteringConfig, DerivedWeights, EnhancerConfig,
    GraphConfig, QueryConfig, RareTagBand, SnapshotConfig,
};
pub use contrast::{ContrastingLens, Triad};
pub use enhancer::{Provenance, Recommendation, RetrievalEnhancer, RetrievedLens};
pub use error::{GraphError, Result};
pub use handle::GraphHandle;
pub use neighborhood::Neighborhood;
pub use paths::{PairPath, Progression, ProgressionStep, ScoredPath, Synthesis};
pub use snapshot::{
    parse_frames, parse_lenses, parse_relationships, DirectorySnapshot, Episode, FrameRecord,
    LensRecord, RelationshipRecord, Snapshot, SnapshotSource,
};
pub use types::{GraphStats, Lens, LensEdge, LensGraph, RelationshipKind};
