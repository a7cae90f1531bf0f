use crate::responses::ResultResp;
use astra::{Body, Response, ResponseBuilder};
use serde_json::{json, Value};

/// 200 response with a JSON body.
pub fn json_response(value: &Value) -> ResultResp {
    Ok(json_body(200, value))
}

/// 200 response carrying the `{"error": ...}` envelope. Used where a failure
/// belongs to the caller's request rather than the server, so the service
/// keeps serving.
pub fn json_error_body(message: &str) -> ResultResp {
    Ok(json_body(200, &json!({ "error": message })))
}

pub fn json_body(status: u16, value: &Value) -> Response {
    let body = serde_json::to_string(value).unwrap_or_else(|_| "null".to_string());

    ResponseBuilder::new()
        .status(status)
        .header("Content-Type", mime::APPLICATION_JSON.as_ref())
        .body(Body::from(body))
        .unwrap()
}
