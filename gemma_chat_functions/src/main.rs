use chat_functions::{handle_event, ApiResponse, ChatContext};
use lambda_runtime::{service_fn, Error, LambdaEvent};
use serde_json::Value;
use tracing::info;

use std::sync::Arc;

async fn func(event: LambdaEvent<Value>, ctx: Arc<ChatContext>) -> Result<ApiResponse, Error> {
    let invoked_function_arn = &event.context.invoked_function_arn;
    Ok(handle_event(&event.payload, invoked_function_arn, &ctx).await)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    // required to enable CloudWatch error logging by the runtime
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        // disable printing the name of the module in every log line.
        .with_target(false)
        // disabling time is handy because CloudWatch will add the ingestion time.
        .without_time()
        .init();

    if let Ok(env_path) = dotenvy::dotenv() {
        info!("Loaded environment from '{}'", env_path.display());
    }

    let ctx = Arc::new(ChatContext::from_env().await?);
    let handler = service_fn(|event| func(event, ctx.clone()));

    lambda_runtime::run(handler).await?;
    Ok(())
}
