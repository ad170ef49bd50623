use respond::{format_prompt, ChatConversation, ChatMessage, GenerationClient};
use serde_json::Value;
use tracing::{error, info};

pub mod config;
pub mod error;
pub mod request;
pub mod response;

pub use config::ChatConfig;
pub use error::ChatError;
pub use response::ApiResponse;

/// Per-process state shared by every invocation.
pub struct ChatContext {
    client: GenerationClient,
    region: Option<String>,
}

impl ChatContext {
    pub fn new(client: GenerationClient, region: Option<String>) -> Self {
        Self { client, region }
    }

    pub async fn from_env() -> anyhow::Result<Self> {
        let config = ChatConfig::from_env()?;
        let client = GenerationClient::new(&config.endpoint_url, config.generation_timeout)?;

        let sdk_config = aws_config::load_from_env().await;
        let region = sdk_config.region().map(|region| region.to_string());
        match &region {
            Some(region) => info!("Initialized chat context in region: {region}"),
            None => info!("No configured region, resolving from function arn"),
        }

        Ok(Self::new(client, region))
    }

    pub fn region<'a>(&'a self, invoked_function_arn: &'a str) -> &'a str {
        self.region
            .as_deref()
            .unwrap_or_else(|| config::region_from_arn(invoked_function_arn))
    }
}

#[derive(Debug, Clone)]
pub struct ChatReply {
    pub response: String,
    pub conversation: ChatConversation,
}

/// Appends `message` to `history`, asks the endpoint for the model's turn and
/// appends that too.
pub async fn chat_turn(
    message: String,
    mut history: ChatConversation,
    client: &GenerationClient,
) -> Result<ChatReply, ChatError> {
    history.push(ChatMessage::from_user(message));

    let prompt_txt = format_prompt(history.messages());
    let response = client.generate(&prompt_txt).await?;

    history.push(ChatMessage::from_model(response.clone()));
    Ok(ChatReply {
        response,
        conversation: history,
    })
}

pub async fn handle_event(
    payload: &Value,
    invoked_function_arn: &str,
    ctx: &ChatContext,
) -> ApiResponse {
    info!("Received event: {payload}");

    if request::is_preflight(payload) {
        return ApiResponse::preflight();
    }

    match process_event(payload, invoked_function_arn, ctx).await {
        Ok(response) => response,
        Err(e) => {
            error!("Error handling chat request: {e:?}");
            ApiResponse::from_error(&e)
        }
    }
}

async fn process_event(
    payload: &Value,
    invoked_function_arn: &str,
    ctx: &ChatContext,
) -> Result<ApiResponse, ChatError> {
    info!("Serving chat request in region: {}", ctx.region(invoked_function_arn));
    if let Some(user) = request::caller_identity(payload) {
        info!("Authenticated user: {user}");
    }

    let (message, history) = request::extract_request(payload)?.into_parts();
    info!(
        "Processing message: `{message}` (history = {} messages)",
        history.len()
    );

    let ChatReply {
        response,
        conversation,
    } = chat_turn(message, history, &ctx.client).await?;

    ApiResponse::success(&response, &conversation)
}
