use serde::Serialize;
use serde_json::{Map, Value};

use super::MatchError;
use crate::constants::clamp_limit;
use crate::profile::Role;
use crate::scoring::MatchResult;

const MISSING_FIELDS: &str = "Body must include: requester_id, prompt";

/// A validated match request.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchRequest {
    pub requester_id: String,
    pub prompt: String,
    /// Role of the caller; candidates come from the opposite role.
    pub role: Role,
    /// Already clamped into `[MIN_MATCH_LIMIT, MAX_MATCH_LIMIT]`.
    pub limit: usize,
}

impl MatchRequest {
    /// Validates a JSON body `{requester_id, prompt, role?, limit?}`.
    ///
    /// `default_role` applies when the body carries no `role`.
    pub fn from_json(body: &Value, default_role: Role) -> Result<Self, MatchError> {
        let Some(obj) = body.as_object() else {
            return Err(MatchError::Validation(
                "Request body must be a JSON object".to_string(),
            ));
        };

        let requester_id = non_blank(obj, "requester_id");
        let prompt = non_blank(obj, "prompt");
        let (Some(requester_id), Some(prompt)) = (requester_id, prompt) else {
            return Err(MatchError::Validation(MISSING_FIELDS.to_string()));
        };

        if uuid::Uuid::parse_str(&requester_id).is_err() {
            return Err(MatchError::Validation(
                "requester_id must be a UUID".to_string(),
            ));
        }

        let role = match obj.get("role") {
            None | Some(Value::Null) => default_role,
            Some(Value::String(s)) => s
                .parse::<Role>()
                .map_err(|e| MatchError::Validation(e.to_string()))?,
            Some(_) => {
                return Err(MatchError::Validation("role must be a string".to_string()));
            }
        };

        let limit = match obj.get("limit") {
            None | Some(Value::Null) => clamp_limit(None),
            Some(Value::Number(n)) => {
                let requested = n.as_i64().or_else(|| n.as_f64().map(|f| f as i64));
                clamp_limit(requested)
            }
            Some(_) => {
                return Err(MatchError::Validation(
                    "limit must be an integer".to_string(),
                ));
            }
        };

        Ok(Self {
            requester_id,
            prompt,
            role,
            limit,
        })
    }
}

fn non_blank(obj: &Map<String, Value>, key: &str) -> Option<String> {
    obj.get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Successful response envelope.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchResponse {
    pub ok: bool,
    pub requester_id: String,
    pub results: Vec<MatchResult>,
}

impl MatchResponse {
    pub fn new(requester_id: impl Into<String>, results: Vec<MatchResult>) -> Self {
        Self {
            ok: true,
            requester_id: requester_id.into(),
            results,
        }
    }
}
