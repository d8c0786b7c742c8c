use crate::command::context::CommandContext;
use crate::command::domain::{
    parse_payload, CommandOutcome, HintKind, JourneyPayload, LensSetPayload, PathPayload,
    ProgressionPayload, DEFAULT_PROGRESSION_STEPS,
};
use anyhow::Result;
use serde_json::{json, Value};

#[derive(Default)]
pub struct PathService;

impl PathService {
    pub fn path(&self, payload: Value, ctx: &CommandContext) -> Result<CommandOutcome> {
        let payload: PathPayload = parse_payload(payload)?;
        let from = ctx.resolve(&payload.from)?;
        let to = ctx.resolve(&payload.to)?;
        let max_length = payload
            .max_length
            .unwrap_or(ctx.graph().config().query.max_path_length);

        let paths = ctx.graph().find_path(&from, &to, max_length);
        let empty = paths.is_empty();
        let mut outcome =
            CommandOutcome::from_value(json!({ "paths": paths }))?.with_resolved(vec![from, to]);
        if empty {
            outcome = outcome.with_hint(
                HintKind::Info,
                format!("No route within {max_length} steps - try a larger --max-length"),
            );
        }
        Ok(outcome)
    }

    pub fn journey(&self, payload: Value, ctx: &CommandContext) -> Result<CommandOutcome> {
        let payload: JourneyPayload = parse_payload(payload)?;
        let start = ctx.resolve(&payload.start)?;

        let journey = ctx.graph().suggest_journey(&start, &payload.target);
        let steps: Vec<Value> = journey
            .iter()
            .filter_map(|id| ctx.graph().lens(id))
            .map(|lens| json!({ "id": lens.id, "name": lens.name }))
            .collect();
        Ok(CommandOutcome::from_value(json!({ "journey": steps }))?.with_resolved(vec![start]))
    }

    pub fn synthesis(&self, payload: Value, ctx: &CommandContext) -> Result<CommandOutcome> {
        let payload: LensSetPayload = parse_payload(payload)?;
        let ids = ctx.resolve_all(&payload.lenses)?;

        let synthesis = ctx.graph().synthesis_path(&ids);
        Ok(CommandOutcome::from_value(json!({ "synthesis": synthesis }))?.with_resolved(ids))
    }

    pub fn progression(&self, payload: Value, ctx: &CommandContext) -> Result<CommandOutcome> {
        let payload: ProgressionPayload = parse_payload(payload)?;
        let start = ctx.resolve(&payload.start)?;
        let target = ctx.resolve(&payload.target)?;
        let max_steps = payload.max_steps.unwrap_or(DEFAULT_PROGRESSION_STEPS);

        let progression = ctx.graph().progression(&start, &target, max_steps);
        Ok(
            CommandOutcome::from_value(json!({ "progression": progression }))?
                .with_resolved(vec![start, target]),
        )
    }
}
