use std::collections::BTreeMap;

use respond::ChatConversation;
use serde::Serialize;
use serde_json::json;

use crate::error::ChatError;

const CORS_ALLOW_HEADERS: &str =
    "Content-Type,X-Amz-Date,Authorization,X-Api-Key,X-Amz-Security-Token";
const CORS_ALLOW_METHODS: &str = "OPTIONS,POST";

/// Lambda proxy integration response.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse {
    pub status_code: u16,
    pub headers: BTreeMap<String, String>,
    pub body: String,
    pub is_base64_encoded: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ChatReplyBody<'a> {
    success: bool,
    response: &'a str,
    conversation_history: &'a ChatConversation,
}

impl ApiResponse {
    pub fn success(response: &str, conversation: &ChatConversation) -> Result<Self, ChatError> {
        let body = serde_json::to_string(&ChatReplyBody {
            success: true,
            response,
            conversation_history: conversation,
        })
        .map_err(anyhow::Error::from)?;

        Ok(Self::with_body(200, body))
    }

    pub fn from_error(error: &ChatError) -> Self {
        let body = json!({ "success": false, "error": error.to_string() });
        Self::with_body(error.status_code(), body.to_string())
    }

    pub fn preflight() -> Self {
        Self::with_body(200, String::new())
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }

    fn with_body(status_code: u16, body: String) -> Self {
        let headers = [
            ("Content-Type", "application/json"),
            ("Access-Control-Allow-Origin", "*"),
            ("Access-Control-Allow-Headers", CORS_ALLOW_HEADERS),
            ("Access-Control-Allow-Methods", CORS_ALLOW_METHODS),
        ]
        .into_iter()
        .map(|(name, value)| (name.to_string(), value.to_string()))
        .collect();

        Self {
            status_code,
            headers,
            body,
            is_base64_encoded: false,
        }
    }
}
