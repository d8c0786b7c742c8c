use crate::command::context::CommandContext;
use crate::command::domain::{parse_payload, CommandOutcome, EnhancePayload, LensSetPayload};
use anyhow::Result;
use lens_graph::{Provenance, RetrievalEnhancer};
use serde_json::{json, Value};

#[derive(Default)]
pub struct RetrievalService;

impl RetrievalService {
    pub fn enhance(&self, payload: Value, ctx: &CommandContext) -> Result<CommandOutcome> {
        let payload: EnhancePayload = parse_payload(payload)?;
        let enhancer = RetrievalEnhancer::new(ctx.shared_graph());

        let results = enhancer.enhance(payload.results);
        let added = results
            .iter()
            .filter(|r| r.source == Provenance::Graph)
            .count();
        CommandOutcome::from_value(json!({ "results": results, "added": added }))
    }

    pub fn recommend(&self, payload: Value, ctx: &CommandContext) -> Result<CommandOutcome> {
        let payload: LensSetPayload = parse_payload(payload)?;
        let ids = ctx.resolve_all(&payload.lenses)?;
        let limit = payload
            .limit
            .unwrap_or(ctx.graph().config().enhancer.recommend_limit);

        let enhancer = RetrievalEnhancer::new(ctx.shared_graph());
        let recommendations = enhancer.recommend(&ids, limit);
        Ok(
            CommandOutcome::from_value(json!({ "recommendations": recommendations }))?
                .with_resolved(ids),
        )
    }
}
