mod paths;
mod retrieval;
mod structure;

use crate::command::context::CommandContext;
use crate::command::domain::{CommandAction, CommandOutcome};
use anyhow::Result;
use paths::PathService;
use retrieval::RetrievalService;
use serde_json::Value;
use structure::StructureService;

#[derive(Default)]
pub struct Services {
    paths: PathService,
    structure: StructureService,
    retrieval: RetrievalService,
}

impl Services {
    pub fn route(
        &self,
        action: CommandAction,
        payload: Value,
        ctx: &CommandContext,
    ) -> Result<CommandOutcome> {
        match action {
            CommandAction::Lens => self.structure.lens(payload, ctx),
            CommandAction::Stats => self.structure.stats(ctx),
            CommandAction::Path => self.paths.path(payload, ctx),
            CommandAction::Journey => self.paths.journey(payload, ctx),
            CommandAction::Synthesis => self.paths.synthesis(payload, ctx),
            CommandAction::Progression => self.paths.progression(payload, ctx),
            CommandAction::Bridges => self.structure.bridges(payload, ctx),
            CommandAction::Contrasts => self.structure.contrasts(payload, ctx),
            CommandAction::Triads => self.structure.triads(payload, ctx),
            CommandAction::Neighborhood => self.structure.neighborhood(payload, ctx),
            CommandAction::Clusters => self.structure.clusters(ctx),
            CommandAction::Central => self.structure.central(payload, ctx),
            CommandAction::Enhance => self.retrieval.enhance(payload, ctx),
            CommandAction::Recommend => self.retrieval.recommend(payload, ctx),
        }
    }
}
