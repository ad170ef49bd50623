use respond::ChatConversation;
use serde::Deserialize;
use serde_json::Value;

use crate::error::ChatError;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    pub message: String,
    #[serde(default)]
    pub conversation_history: Option<ChatConversation>,
}

impl ChatRequest {
    pub fn into_parts(self) -> (String, ChatConversation) {
        (self.message, self.conversation_history.unwrap_or_default())
    }
}

pub fn extract_request(payload: &Value) -> Result<ChatRequest, ChatError> {
    // direct invocations carry the request fields at the top level
    if payload.get("message").is_some() {
        return ChatRequest::deserialize(payload)
            .map_err(|e| ChatError::BadRequest(format!("invalid request: {e}")));
    }

    let body = match payload.get("body") {
        Some(Value::String(body)) => body,
        Some(Value::Null) | None => return Err(ChatError::BadRequest("request missing body".into())),
        Some(_) => return Err(ChatError::BadRequest("request body must be a string".into())),
    };

    serde_json::from_str(body).map_err(|e| ChatError::BadRequest(format!("invalid request body: {e}")))
}

/// Caller identity attached by an upstream cognito authorizer.
pub fn caller_identity(payload: &Value) -> Option<&str> {
    let claims = payload.pointer("/requestContext/authorizer/claims")?;
    claims
        .get("email")
        .and_then(Value::as_str)
        .or_else(|| claims.get("cognito:username").and_then(Value::as_str))
}

pub fn is_preflight(payload: &Value) -> bool {
    let method = payload
        .get("httpMethod")
        .or_else(|| payload.pointer("/requestContext/http/method"))
        .and_then(Value::as_str);
    matches!(method, Some(method) if method.eq_ignore_ascii_case("OPTIONS"))
}
