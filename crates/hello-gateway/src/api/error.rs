// HTTP polish for error responses.

use axum::{
    http::{StatusCode, Uri},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use hello_core::error::{ClientCode, HelloError};

/// `HelloError` rendered as `{"error": CODE, "message": ...}`.
#[derive(Debug)]
pub struct ApiError(pub HelloError);

impl From<HelloError> for ApiError {
    fn from(e: HelloError) -> Self {
        Self(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let code = self.0.client_code();
        let status = match code {
            ClientCode::BadRequest | ClientCode::UnsupportedVersion => StatusCode::BAD_REQUEST,
            ClientCode::NotFound => StatusCode::NOT_FOUND,
            ClientCode::Forbidden => StatusCode::FORBIDDEN,
            ClientCode::Metrics | ClientCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let body = Json(json!({
            "error": code.as_str(),
            "message": self.0.to_string(),
        }));
        (status, body).into_response()
    }
}

pub async fn not_found(uri: Uri) -> ApiError {
    HelloError::NotFound(uri.path().to_owned()).into()
}
