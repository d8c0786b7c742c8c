mod context;
pub mod domain;
mod services;

pub use domain::{CommandAction, CommandRequest, CommandResponse};

use anyhow::Result;
use context::CommandContext;
use domain::CommandStatus;
use lens_graph::LensGraph;
use services::Services;
use std::sync::Arc;
use std::time::Instant;

pub struct CommandHandler {
    graph: Arc<LensGraph>,
    services: Services,
}

impl CommandHandler {
    pub fn new(graph: Arc<LensGraph>) -> Self {
        Self {
            graph,
            services: Services::default(),
        }
    }

    pub fn execute(&self, request: CommandRequest) -> Result<CommandResponse> {
        let CommandRequest { action, payload } = request;
        let started = Instant::now();

        let mut outcome = self.services.route(
            action,
            payload,
            &CommandContext::new(Arc::clone(&self.graph)),
        )?;

        outcome.meta.duration_ms = Some(started.elapsed().as_millis() as u64);
        outcome.meta.graph_nodes = Some(self.graph.node_count());
        outcome.meta.graph_edges = Some(self.graph.edge_count());

        Ok(CommandResponse {
            status: CommandStatus::Ok,
            message: None,
            hints: outcome.hints,
            data: outcome.data,
            meta: outcome.meta,
        })
    }

    /// Like [`CommandHandler::execute`], but failures become an error envelope.
    pub fn respond(&self, request: CommandRequest) -> CommandResponse {
        self.execute(request)
            .unwrap_or_else(|e| CommandResponse::error(format!("{e:#}")))
    }
}
