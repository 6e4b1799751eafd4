//! Response envelope and error mapping.
//!
//! Every handler replies with the same JSON envelope: `success` plus either
//! a `data` payload or an `error` object. Validation failures additionally
//! surface per-field `details` so a client can point at the offending
//! input instead of parsing the flattened message.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use moto_core::{ErrorResponse, MotoError};
use serde::{Deserialize, Serialize};
use tracing::error;

/// JSON envelope shared by every endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorResponse>,
}

impl<T> ApiResponse<T> {
    /// Wraps a payload in a successful envelope.
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }
}

impl ApiResponse<()> {
    fn failure(error: ErrorResponse) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error),
        }
    }
}

/// Newtype that lets handlers bubble a [`MotoError`] straight out with `?`.
#[derive(Debug)]
pub struct AppError(pub MotoError);

impl From<MotoError> for AppError {
    fn from(err: MotoError) -> Self {
        Self(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        // Client errors are the caller's problem; server errors are ours
        if status.is_server_error() {
            error!("Request failed: {}", self.0);
        }

        let mut payload = ErrorResponse::from_error(&self.0);
        if let MotoError::Validation { fields, .. } = &self.0 {
            if !fields.is_empty() {
                payload = payload.with_details(fields.clone());
            }
        }

        (status, Json(ApiResponse::failure(payload))).into_response()
    }
}

/// Handler result: a wrapped payload or an error envelope.
pub type ApiResult<T> = Result<Json<ApiResponse<T>>, AppError>;

/// 200 with the payload wrapped in the envelope.
pub fn ok<T>(data: T) -> ApiResult<T> {
    Ok(Json(ApiResponse::success(data)))
}

/// 201 with the payload wrapped in the envelope.
pub fn created<T>(data: T) -> (StatusCode, Json<ApiResponse<T>>) {
    (StatusCode::CREATED, Json(ApiResponse::success(data)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use moto_core::FieldError;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn test_success_envelope_omits_error() {
        let json = serde_json::to_value(ApiResponse::success(7)).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["data"], 7);
        assert!(json.get("error").is_none());
    }

    #[tokio::test]
    async fn test_validation_error_renders_field_details() {
        let err = AppError(MotoError::validation_with_fields(
            "email: Invalid email address",
            vec![FieldError {
                field: "email".to_string(),
                message: "Invalid email address".to_string(),
                code: "email".to_string(),
            }],
        ));

        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let json = body_json(response).await;
        assert_eq!(json["success"], false);
        assert_eq!(json["error"]["code"], "VALIDATION_ERROR");
        assert_eq!(json["error"]["details"][0]["field"], "email");
    }

    #[tokio::test]
    async fn test_non_validation_error_has_no_details() {
        let response = AppError(MotoError::not_found("User", 9)).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let json = body_json(response).await;
        assert_eq!(json["error"]["code"], "NOT_FOUND");
        assert!(json["error"].get("details").is_none());
    }
}
