use respond::GenerationError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChatError {
    #[error("bad request: {0}")]
    BadRequest(String),

    #[error(transparent)]
    Generation(#[from] GenerationError),

    #[error("unexpected internal error")]
    Unexpected(#[from] anyhow::Error),
}

impl ChatError {
    pub fn status_code(&self) -> u16 {
        match self {
            ChatError::BadRequest(_) => 400,
            ChatError::Generation(_) | ChatError::Unexpected(_) => 500,
        }
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;

    #[test]
    fn chat_error_status_codes() {
        let bad_request = ChatError::BadRequest("missing field `message`".to_string());
        let unexpected = ChatError::Unexpected(anyhow::anyhow!("boom"));

        assert_eq!(bad_request.status_code(), 400);
        assert_eq!(unexpected.status_code(), 500);
    }

    #[test]
    fn chat_error_messages_hide_internals() {
        let unexpected = ChatError::Unexpected(anyhow::anyhow!("secret token abc123"));
        assert_eq!(unexpected.to_string(), "unexpected internal error");

        let generation = ChatError::from(GenerationError::EndpointError {
            status: reqwest::StatusCode::BAD_GATEWAY,
            body: "upstream stack trace".to_string(),
        });
        assert_eq!(generation.status_code(), 500);
        assert!(!generation.to_string().contains("stack trace"));
        assert!(generation.to_string().contains("502"));
    }
}
