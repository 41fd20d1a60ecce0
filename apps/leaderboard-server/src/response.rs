use actix_web::{HttpResponse, http::StatusCode};

/// `{"error": message}` with the given status.
pub(crate) fn json_error(status: StatusCode, message: impl Into<String>) -> HttpResponse {
    HttpResponse::build(status).json(serde_json::json!({ "error": message.into() }))
}
