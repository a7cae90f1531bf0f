use crate::errors::ServerError;
use crate::responses::json_body;
use astra::Response;
use serde_json::json;

// Type alias commonly used by route handlers.
pub type ResultResp = Result<Response, ServerError>;

/// Convert a ServerError into a proper JSON error response.
pub fn error_to_response(err: ServerError) -> Response {
    match err {
        ServerError::NotFound => error_response(404, "Not Found"),
        ServerError::BadRequest(msg) => error_response(400, &msg),
        ServerError::Upstream(msg) => error_response(502, &msg),
        ServerError::InternalError => error_response(500, "Internal Server Error"),
    }
}

pub fn error_response(status: u16, message: &str) -> Response {
    json_body(status, &json!({ "error": message }))
}
