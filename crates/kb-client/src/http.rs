//! Shared HTTP response helpers for backend calls.
//!
//! Every backend route answers with a JSON envelope: `{"ok": true, ...}` on
//! success, `{"ok": false, "error"|"detail": ...}` on soft failure, and a
//! FastAPI `{"detail": ...}` body with a 4xx/5xx status on hard failure.
//! These helpers turn all three into [`BackendError`] so the route modules
//! only deal with request construction and payload mapping.

use kb_core::entities::PreviewTable;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::BackendError;

/// Check an HTTP response for a non-success status.
///
/// Returns the response unchanged on success, otherwise
/// [`BackendError::Api`] carrying the `detail` of the error body.
pub async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, BackendError> {
    if !resp.status().is_success() {
        let status = resp.status().as_u16();
        let body = resp.text().await.unwrap_or_default();
        return Err(BackendError::Api {
            status,
            message: error_message(&body),
        });
    }
    Ok(resp)
}

/// Send a request, check its status, and decode the JSON body.
pub async fn send_json(request: reqwest::RequestBuilder) -> Result<Value, BackendError> {
    let resp = check_response(request.send().await?).await?;
    Ok(resp.json::<Value>().await?)
}

/// Unwrap an `{"ok": true, ...}` envelope into `T`.
pub fn into_payload<T: DeserializeOwned>(value: Value) -> Result<T, BackendError> {
    if value.get("ok").and_then(Value::as_bool) != Some(true) {
        return Err(BackendError::Rejected(rejection_reason(&value)));
    }
    serde_json::from_value(value).map_err(|e| BackendError::Parse(e.to_string()))
}

/// Decode a preview response.
///
/// The ad hoc `/preview` route omits `ok`, so success is judged by
/// `type == "table"`; an explicit `ok: false` is still a rejection.
pub fn into_table(value: Value) -> Result<PreviewTable, BackendError> {
    let explicitly_failed = value.get("ok").and_then(Value::as_bool) == Some(false);
    let is_table = value.get("type").and_then(Value::as_str) == Some("table");
    if explicitly_failed || !is_table {
        return Err(BackendError::Rejected(rejection_reason(&value)));
    }
    serde_json::from_value(value).map_err(|e| BackendError::Parse(e.to_string()))
}

/// `detail`, else `error`, else a generic message.
fn rejection_reason(value: &Value) -> String {
    ["detail", "error"]
        .iter()
        .find_map(|key| value.get(*key).filter(|v| !v.is_null()).map(value_text))
        .unwrap_or_else(|| String::from("unknown error"))
}

fn error_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v.get("detail").map(value_text))
        .unwrap_or_else(|| body.to_string())
}

fn value_text(value: &Value) -> String {
    value
        .as_str()
        .map_or_else(|| value.to_string(), ToString::to_string)
}
