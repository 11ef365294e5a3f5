use axum::{http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;

use crate::gateway::GatewayError;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    Unauthorized(String),
    NotFound(String),
    InvalidSignature,
    Upstream,
    Internal,
}

impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        tracing::error!(error = %err, "database error");
        ApiError::Internal
    }
}

impl From<GatewayError> for ApiError {
    fn from(err: GatewayError) -> Self {
        tracing::error!(error = %err, "payment gateway error");
        ApiError::Upstream
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, code, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "invalid_request", msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, "unauthorized", msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg),
            ApiError::InvalidSignature => (
                StatusCode::BAD_REQUEST,
                "invalid_signature",
                "Payment signature mismatch".to_string(),
            ),
            ApiError::Upstream => (
                StatusCode::BAD_GATEWAY,
                "upstream_error",
                "Payment gateway unavailable".to_string(),
            ),
            ApiError::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                "Unexpected error".to_string(),
            ),
        };

        (
            status,
            Json(ErrorResponse {
                error: ErrorBody {
                    code: code.to_string(),
                    message,
                },
            }),
        )
            .into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use axum::response::IntoResponse;

    fn rt() -> tokio::runtime::Runtime {
        tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let body = to_bytes(response.into_body(), 1024).await.unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[test]
    fn test_bad_request_response() {
        rt().block_on(async {
            let response = ApiError::BadRequest("placementId required".to_string()).into_response();

            assert_eq!(response.status(), StatusCode::BAD_REQUEST);

            let json = body_json(response).await;
            assert_eq!(json["error"]["code"], "invalid_request");
            assert_eq!(json["error"]["message"], "placementId required");
        });
    }

    #[test]
    fn test_unauthorized_response() {
        rt().block_on(async {
            let response =
                ApiError::Unauthorized("invalid api key".to_string()).into_response();

            assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

            let json = body_json(response).await;
            assert_eq!(json["error"]["code"], "unauthorized");
            assert_eq!(json["error"]["message"], "invalid api key");
        });
    }

    #[test]
    fn test_not_found_response() {
        rt().block_on(async {
            let response = ApiError::NotFound("placement not found".to_string()).into_response();

            assert_eq!(response.status(), StatusCode::NOT_FOUND);

            let json = body_json(response).await;
            assert_eq!(json["error"]["code"], "not_found");
            assert_eq!(json["error"]["message"], "placement not found");
        });
    }

    #[test]
    fn test_invalid_signature_response() {
        rt().block_on(async {
            let response = ApiError::InvalidSignature.into_response();

            assert_eq!(response.status(), StatusCode::BAD_REQUEST);

            let json = body_json(response).await;
            assert_eq!(json["error"]["code"], "invalid_signature");
            assert_eq!(json["error"]["message"], "Payment signature mismatch");
        });
    }

    #[test]
    fn test_upstream_response() {
        rt().block_on(async {
            let response = ApiError::Upstream.into_response();

            assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

            let json = body_json(response).await;
            assert_eq!(json["error"]["code"], "upstream_error");
        });
    }

    #[test]
    fn test_internal_error_response() {
        rt().block_on(async {
            let response = ApiError::Internal.into_response();

            assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

            let json = body_json(response).await;
            assert_eq!(json["error"]["code"], "internal_error");
            assert_eq!(json["error"]["message"], "Unexpected error");
        });
    }
}
