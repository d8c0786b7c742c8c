use anyhow::{anyhow, Result};
use lens_graph::LensGraph;
use std::sync::Arc;

/// Per-request view of the loaded graph.
pub struct CommandContext {
    graph: Arc<LensGraph>,
}

impl CommandContext {
    pub fn new(graph: Arc<LensGraph>) -> Self {
        Self { graph }
    }

    pub fn graph(&self) -> &LensGraph {
        &self.graph
    }

    pub fn shared_graph(&self) -> Arc<LensGraph> {
        Arc::clone(&self.graph)
    }

    /// Turn a human reference (id or name) into a lens id.
    pub fn resolve(&self, reference: &str) -> Result<String> {
        self.graph
            .resolve(reference)
            .map(|lens| lens.id.clone())
            .ok_or_else(|| anyhow!("Lens not found: {reference}"))
    }

    pub fn resolve_all(&self, references: &[String]) -> Result<Vec<String>> {
        references.iter().map(|r| self.resolve(r)).collect()
    }
}
