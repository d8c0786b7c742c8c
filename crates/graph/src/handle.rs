use crate::builder::GraphBuilder;
use crate::error::Result;
use crate::snapshot::SnapshotSource;
use crate::types::LensGraph;
use std::sync::{Arc, PoisonError, RwLock};

/// Shared owner of the current lens graph.
///
/// Readers take an `Arc` snapshot with [`GraphHandle::current`] and query it
/// without holding any lock. A rebuild constructs a complete new graph first
/// and only then swaps the pointer, so in-flight queries keep the graph they
/// started with.
#[derive(Debug)]
pub struct GraphHandle {
    inner: RwLock<Arc<LensGraph>>,
    builder: GraphBuilder,
}

impl GraphHandle {
    /// Build the initial graph from `source`.
    pub fn build(builder: GraphBuilder, source: &dyn SnapshotSource) -> Result<Self> {
        let graph = builder.build(source)?;
        Ok(Self::new(builder, graph))
    }

    pub fn new(builder: GraphBuilder, graph: LensGraph) -> Self {
        Self {
            inner: RwLock::new(Arc::new(graph)),
            builder,
        }
    }

    #[must_use]
    pub fn current(&self) -> Arc<LensGraph> {
        let graph = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&*graph)
    }

    /// Swap in an already built graph, returning the one it replaces.
    pub fn replace(&self, graph: LensGraph) -> Arc<LensGraph> {
        let mut slot = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        std::mem::replace(&mut *slot, Arc::new(graph))
    }

    /// Rebuild from `source`; on failure the previous graph stays current.
    pub fn rebuild(&self, source: &dyn SnapshotSource) -> Result<Arc<LensGraph>> {
        let graph = match self.builder.build(source) {
            Ok(graph) => Arc::new(graph),
            Err(e) => {
                log::error!("Lens graph rebuild failed, keeping previous graph: {e}");
                return Err(e);
            }
        };

        let mut slot = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        *slot = Arc::clone(&graph);
        log::info!(
            "Lens graph swapped: {} nodes, {} edges",
            graph.node_count(),
            graph.edge_count()
        );
        Ok(graph)
    }
}
