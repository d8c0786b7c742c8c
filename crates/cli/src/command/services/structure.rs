use crate::command::context::CommandContext;
use crate::command::domain::{
    parse_payload, CentralPayload, CommandOutcome, HintKind, LensPayload, LensSetPayload,
    NeighborhoodPayload, TriadPayload, DEFAULT_RADIUS, DEFAULT_TRIAD_LIMIT,
};
use anyhow::{anyhow, Result};
use lens_graph::CentralityMeasure;
use serde_json::{json, Value};

#[derive(Default)]
pub struct StructureService;

impl StructureService {
    pub fn lens(&self, payload: Value, ctx: &CommandContext) -> Result<CommandOutcome> {
        let payload: LensPayload = parse_payload(payload)?;
        let lens = ctx
            .graph()
            .resolve(&payload.lens)
            .ok_or_else(|| anyhow!("Lens not found: {}", payload.lens))?;
        CommandOutcome::from_value(lens)
    }

    pub fn stats(&self, ctx: &CommandContext) -> Result<CommandOutcome> {
        CommandOutcome::from_value(ctx.graph().stats())
    }

    pub fn bridges(&self, payload: Value, ctx: &CommandContext) -> Result<CommandOutcome> {
        let payload: LensSetPayload = parse_payload(payload)?;
        let ids = ctx.resolve_all(&payload.lenses)?;

        let bridges = ctx.graph().find_bridges(&ids);
        Ok(CommandOutcome::from_value(json!({ "bridges": bridges }))?.with_resolved(ids))
    }

    pub fn contrasts(&self, payload: Value, ctx: &CommandContext) -> Result<CommandOutcome> {
        let payload: LensPayload = parse_payload(payload)?;
        let id = ctx.resolve(&payload.lens)?;

        let contrasts = ctx.graph().find_contrasts(&id);
        Ok(CommandOutcome::from_value(json!({ "contrasts": contrasts }))?.with_resolved(vec![id]))
    }

    pub fn triads(&self, payload: Value, ctx: &CommandContext) -> Result<CommandOutcome> {
        let payload: TriadPayload = parse_payload(payload)?;
        let id = ctx.resolve(&payload.lens)?;

        let triads = ctx
            .graph()
            .triads(&id, payload.limit.unwrap_or(DEFAULT_TRIAD_LIMIT));
        Ok(CommandOutcome::from_value(json!({ "triads": triads }))?.with_resolved(vec![id]))
    }

    pub fn neighborhood(&self, payload: Value, ctx: &CommandContext) -> Result<CommandOutcome> {
        let payload: NeighborhoodPayload = parse_payload(payload)?;
        let id = ctx.resolve(&payload.lens)?;

        let neighborhood = ctx
            .graph()
            .neighborhood(&id, payload.radius.unwrap_or(DEFAULT_RADIUS));
        Ok(
            CommandOutcome::from_value(json!({ "neighborhood": neighborhood }))?
                .with_resolved(vec![id]),
        )
    }

    pub fn clusters(&self, ctx: &CommandContext) -> Result<CommandOutcome> {
        CommandOutcome::from_value(ctx.graph().clusters())
    }

    pub fn central(&self, payload: Value, ctx: &CommandContext) -> Result<CommandOutcome> {
        let payload: CentralPayload = parse_payload(payload)?;
        let known = CentralityMeasure::from_name(&payload.measure);
        let measure = known.unwrap_or(CentralityMeasure::Degree);

        let ranking = ctx.graph().rank(measure);
        let mut outcome = CommandOutcome::from_value(&ranking)?;
        if known.is_none() {
            outcome = outcome.with_hint(
                HintKind::Warn,
                format!("Unknown measure '{}', ranked by {measure}", payload.measure),
            );
        }
        if let Some(note) = ranking.note {
            outcome = outcome.with_hint(HintKind::Info, note);
        }
        Ok(outcome)
    }
}
