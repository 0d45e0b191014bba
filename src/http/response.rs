//! Response shaping.
//!
//! Success is a JSON `{"message": ...}` body; failure is a fixed plain-text
//! line per operation. Underlying errors never reach the client.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::audit::Operation;

#[derive(Debug, Serialize)]
struct MessageBody {
    message: &'static str,
}

/// Client-facing result of one operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionOutcome {
    Completed(Operation),
    Failed(Operation),
}

impl TransactionOutcome {
    pub fn status(self) -> StatusCode {
        match self {
            TransactionOutcome::Completed(_) => StatusCode::OK,
            TransactionOutcome::Failed(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for TransactionOutcome {
    fn into_response(self) -> Response {
        match self {
            TransactionOutcome::Completed(op) => (
                self.status(),
                Json(MessageBody {
                    message: op.success_message(),
                }),
            )
                .into_response(),
            TransactionOutcome::Failed(op) => (self.status(), op.failure_message()).into_response(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::header::CONTENT_TYPE;

    async fn body_text(response: Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_completed_is_json() {
        let response = TransactionOutcome::Completed(Operation::Insert).into_response();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[CONTENT_TYPE], "application/json");
        assert_eq!(
            body_text(response).await,
            r#"{"message":"Insert transaction logged and file uploaded to S3 successfully!"}"#
        );
    }

    #[tokio::test]
    async fn test_failed_is_plain_text() {
        let response = TransactionOutcome::Failed(Operation::Update).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(response.headers()[CONTENT_TYPE]
            .to_str()
            .unwrap()
            .starts_with("text/plain"));
        assert_eq!(body_text(response).await, "Error processing update transaction");
    }
}
