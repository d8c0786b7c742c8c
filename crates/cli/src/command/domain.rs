use anyhow::Result;
use lens_graph::RetrievedLens;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;

pub const DEFAULT_RADIUS: usize = 2;
pub const DEFAULT_TRIAD_LIMIT: usize = 3;
pub const DEFAULT_PROGRESSION_STEPS: usize = 5;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CommandRequest {
    pub action: CommandAction,
    #[serde(default = "empty_payload")]
    pub payload: Value,
}

fn empty_payload() -> Value {
    Value::Object(Default::default())
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CommandAction {
    Lens,
    Stats,
    Path,
    Journey,
    Synthesis,
    Progression,
    Bridges,
    Contrasts,
    Triads,
    Neighborhood,
    Clusters,
    Central,
    Enhance,
    Recommend,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct LensPayload {
    pub lens: String,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct PathPayload {
    pub from: String,
    pub to: String,
    #[serde(default)]
    pub max_length: Option<usize>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct JourneyPayload {
    pub start: String,
    pub target: String,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct ProgressionPayload {
    pub start: String,
    pub target: String,
    #[serde(default)]
    pub max_steps: Option<usize>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct LensSetPayload {
    pub lenses: Vec<String>,
    #[serde(default)]
    pub limit: Option<usize>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct TriadPayload {
    pub lens: String,
    #[serde(default)]
    pub limit: Option<usize>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct NeighborhoodPayload {
    pub lens: String,
    #[serde(default)]
    pub radius: Option<usize>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct CentralPayload {
    #[serde(default = "default_measure")]
    pub measure: String,
}

fn default_measure() -> String {
    "betweenness".to_string()
}

#[derive(Debug, Deserialize, Serialize)]
pub struct EnhancePayload {
    pub results: Vec<RetrievedLens>,
}

#[derive(Debug, Serialize)]
pub struct CommandResponse {
    pub status: CommandStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub hints: Vec<Hint>,
    #[serde(default)]
    pub data: Value,
    #[serde(default)]
    pub meta: ResponseMeta,
}

impl CommandResponse {
    pub fn is_error(&self) -> bool {
        matches!(self.status, CommandStatus::Error)
    }

    pub fn error(message: String) -> Self {
        Self {
            status: CommandStatus::Error,
            hints: classify_error(&message),
            message: Some(message),
            data: Value::Null,
            meta: ResponseMeta::default(),
        }
    }
}

#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CommandStatus {
    Ok,
    Error,
}

#[derive(Debug, Serialize, Clone)]
pub struct Hint {
    #[serde(rename = "type")]
    pub kind: HintKind,
    pub text: String,
}

#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum HintKind {
    Info,
    Action,
    Warn,
}

#[derive(Debug, Serialize, Default, Clone)]
pub struct ResponseMeta {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub graph_nodes: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub graph_edges: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolved: Option<Vec<String>>,
}

pub struct CommandOutcome {
    pub data: Value,
    pub hints: Vec<Hint>,
    pub meta: ResponseMeta,
}

impl CommandOutcome {
    pub fn from_value<T: Serialize>(value: T) -> Result<Self> {
        Ok(Self {
            data: serde_json::to_value(value)?,
            hints: Vec::new(),
            meta: ResponseMeta::default(),
        })
    }

    pub fn with_hint(mut self, kind: HintKind, text: impl Into<String>) -> Self {
        self.hints.push(Hint {
            kind,
            text: text.into(),
        });
        self
    }

    pub fn with_resolved(mut self, ids: Vec<String>) -> Self {
        self.meta.resolved = Some(ids);
        self
    }
}

pub fn parse_payload<T: DeserializeOwned>(payload: Value) -> Result<T> {
    serde_json::from_value(payload).map_err(Into::into)
}

pub fn classify_error(message: &str) -> Vec<Hint> {
    let mut hints = Vec::new();

    if message.contains("Lens not found") {
        hints.push(Hint {
            kind: HintKind::Action,
            text: "Unknown lens - pass an id, an exact name or a distinctive part of the name."
                .to_string(),
        });
    }

    if message.contains("no lenses") || message.contains("Failed to load") {
        hints.push(Hint {
            kind: HintKind::Action,
            text: "Snapshot looks empty - check --data-dir and the catalog file name in the config."
                .to_string(),
        });
    }

    if message.contains("missing field") || message.contains("unknown variant") {
        hints.push(Hint {
            kind: HintKind::Warn,
            text: "Request payload does not match the action - see `lens-graph --help`.".to_string(),
        });
    }

    hints
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn request_defaults_to_empty_payload() {
        let request: CommandRequest = serde_json::from_value(json!({"action": "stats"})).unwrap();
        assert_eq!(request.action, CommandAction::Stats);
        assert_eq!(request.payload, json!({}));
    }

    #[test]
    fn central_payload_defaults_to_betweenness() {
        let payload: CentralPayload = parse_payload(json!({})).unwrap();
        assert_eq!(payload.measure, "betweenness");
    }

    #[test]
    fn triads_default_to_three() {
        let payload: TriadPayload = parse_payload(json!({"lens": "l1"})).unwrap();
        assert_eq!(payload.limit.unwrap_or(DEFAULT_TRIAD_LIMIT), 3);
    }

    #[test]
    fn unknown_lens_errors_get_a_hint() {
        let response = CommandResponse::error("Lens not found: Zen".to_string());
        assert!(response.is_error());
        assert_eq!(response.hints.len(), 1);
        assert_eq!(response.hints[0].kind, HintKind::Action);
    }
}
