//! Structured API errors and the message dictionaries that resolve them.
//!
//! A failed response resolves to an [`ApiError`] through two dictionaries:
//! the HTTP-status-indexed template table (with a `DEFAULT` fallback) and
//! the application error-code table keyed by the backend's `code` strings.
//! Message precedence, in order: explicit message mined from the body, a
//! known application code, the status template, the default template.
//! Reordering these changes which message a user sees.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Templates and dictionaries
// ---------------------------------------------------------------------------

/// One code/message pair in an error dictionary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorTemplate {
    pub code: String,
    pub message: String,
}

impl ErrorTemplate {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

/// Status-indexed error templates plus the mandatory default entry.
#[derive(Debug, Clone)]
pub struct ErrorDictionary {
    default: ErrorTemplate,
    by_status: HashMap<u16, ErrorTemplate>,
}

impl Default for ErrorDictionary {
    fn default() -> Self {
        let by_status = HashMap::from([
            (400, ErrorTemplate::new("BAD_REQUEST", "입력하신 정보를 다시 확인해 주세요.")),
            (401, ErrorTemplate::new("UNAUTHORIZED", "로그인이 필요하거나 세션이 만료되었습니다.")),
            (403, ErrorTemplate::new("FORBIDDEN", "이 작업을 수행할 권한이 없습니다.")),
            (404, ErrorTemplate::new("NOT_FOUND", "요청하신 리소스를 찾을 수 없습니다.")),
            (409, ErrorTemplate::new("CONFLICT", "이미 처리된 요청이거나 충돌이 발생했습니다.")),
            (
                422,
                ErrorTemplate::new("VALIDATION_FAILED", "입력값이 유효하지 않습니다. 항목을 다시 확인해 주세요."),
            ),
            (429, ErrorTemplate::new("RATE_LIMITED", "잠시 후 다시 시도해 주세요.")),
            (500, ErrorTemplate::new("SERVER_ERROR", "서버에 오류가 발생했습니다. 잠시 후 다시 시도해 주세요.")),
        ]);

        Self {
            default: ErrorTemplate::new(
                "UNEXPECTED_ERROR",
                "요청 처리 중 문제가 발생했습니다. 잠시 후 다시 시도해 주세요.",
            ),
            by_status,
        }
    }
}

impl ErrorDictionary {
    /// Replace or add the template for one HTTP status.
    pub fn with_status(mut self, status: u16, template: ErrorTemplate) -> Self {
        self.by_status.insert(status, template);
        self
    }

    /// Replace the default fallback template.
    pub fn with_default(mut self, template: ErrorTemplate) -> Self {
        self.default = template;
        self
    }

    /// Template for a status, falling back to the default entry.
    pub fn template_for(&self, status: u16) -> &ErrorTemplate {
        self.by_status.get(&status).unwrap_or(&self.default)
    }
}

/// Message for a backend application error code, when the code is one the
/// client knows how to phrase for the user.
pub fn app_code_message(code: &str) -> Option<&'static str> {
    match code {
        "SCHEDULE_NOT_FOUND" => Some("검사 일정을 찾을 수 없습니다."),
        "BUNDLE_NOT_FOUND" => Some("포장을 찾을 수 없습니다."),
        "SLOT_NOT_FOUND" => Some("냉장고 칸을 찾을 수 없습니다."),
        "LABEL_ALREADY_TAKEN" => Some("이미 사용 중인 라벨 번호입니다."),
        "SLOT_CAPACITY_EXCEEDED" => Some("해당 칸의 보관 한도를 초과했습니다."),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// ApiError
// ---------------------------------------------------------------------------

/// Code carried by errors that never reached the server.
pub const NETWORK_ERROR_CODE: &str = "NETWORK_ERROR";

/// Code carried when a 2xx body fails to decode as the expected type.
pub const DECODE_ERROR_CODE: &str = "DECODE_ERROR";

/// Normalized API failure: what to show (`message`), what happened
/// (`code`, `status`), and any field-level details the backend attached.
///
/// Transport failures use `status` 0 and [`NETWORK_ERROR_CODE`].
#[derive(Debug, Clone, PartialEq, Serialize, thiserror::Error)]
#[error("{code} ({status}): {message}")]
pub struct ApiError {
    pub code: String,
    pub message: String,
    pub status: u16,
    pub details: Option<serde_json::Value>,
}

impl ApiError {
    /// A request that failed before any HTTP response arrived.
    pub fn network(source: &reqwest::Error) -> Self {
        Self {
            code: NETWORK_ERROR_CODE.into(),
            message: format!("서버에 연결하지 못했습니다: {source}"),
            status: 0,
            details: None,
        }
    }

    /// A 2xx response whose body did not decode as the expected shape.
    pub fn decode(status: u16, source: &dyn std::fmt::Display) -> Self {
        Self {
            code: DECODE_ERROR_CODE.into(),
            message: format!("응답을 해석하지 못했습니다: {source}"),
            status,
            details: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Resolution
// ---------------------------------------------------------------------------

/// Error body shape the backend emits; every field is optional.
#[derive(Debug, Default, Deserialize)]
struct ErrorPayload {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    detail: Option<String>,
    #[serde(default)]
    details: Option<serde_json::Value>,
    #[serde(default)]
    errors: Option<serde_json::Value>,
}

/// Resolve a non-2xx response into an [`ApiError`].
///
/// `body` is the raw response body; anything that is not a JSON object is
/// treated as an absent payload. Pure, so the precedence rules are
/// testable without a live server.
pub fn resolve_api_error(status: u16, body: &[u8], dictionary: &ErrorDictionary) -> ApiError {
    let payload: ErrorPayload = serde_json::from_slice(body).unwrap_or_default();
    let template = dictionary.template_for(status);

    let code = payload
        .code
        .as_deref()
        .filter(|code| !code.trim().is_empty())
        .unwrap_or(&template.code)
        .to_string();

    let message = mine_message(&payload)
        .or_else(|| {
            payload
                .code
                .as_deref()
                .and_then(app_code_message)
                .map(String::from)
        })
        .unwrap_or_else(|| template.message.clone());

    let details = payload.details.or(payload.errors);

    ApiError {
        code,
        message,
        status,
        details,
    }
}

/// Extract an explicit human-readable message from the payload: the
/// `message` field, then `detail`, then string entries under `errors`
/// (array or per-field object) joined with spaces.
fn mine_message(payload: &ErrorPayload) -> Option<String> {
    if let Some(message) = non_blank(payload.message.as_deref()) {
        return Some(message);
    }
    if let Some(detail) = non_blank(payload.detail.as_deref()) {
        return Some(detail);
    }

    let joined = match &payload.errors {
        Some(serde_json::Value::Array(entries)) => entries
            .iter()
            .filter_map(|entry| entry.as_str())
            .collect::<Vec<_>>()
            .join(" "),
        Some(serde_json::Value::Object(fields)) => fields
            .values()
            .flat_map(|entry| match entry {
                serde_json::Value::String(text) => vec![text.as_str()],
                serde_json::Value::Array(nested) => {
                    nested.iter().filter_map(|item| item.as_str()).collect()
                }
                _ => Vec::new(),
            })
            .collect::<Vec<_>>()
            .join(" "),
        _ => String::new(),
    };

    non_blank(Some(joined.as_str()))
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(String::from)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn resolve(status: u16, body: &str) -> ApiError {
        resolve_api_error(status, body.as_bytes(), &ErrorDictionary::default())
    }

    // -- precedence branches, outermost first --------------------------------

    #[test]
    fn explicit_body_message_wins_over_everything() {
        let err = resolve(
            404,
            r#"{"code": "SCHEDULE_NOT_FOUND", "message": "이 일정은 이미 삭제되었습니다."}"#,
        );
        assert_eq!(err.message, "이 일정은 이미 삭제되었습니다.");
        assert_eq!(err.code, "SCHEDULE_NOT_FOUND");
        assert_eq!(err.status, 404);
    }

    #[test]
    fn known_app_code_beats_the_status_template() {
        let err = resolve(404, r#"{"code": "SCHEDULE_NOT_FOUND"}"#);
        assert_eq!(err.message, "검사 일정을 찾을 수 없습니다.");
        assert_eq!(err.code, "SCHEDULE_NOT_FOUND");
    }

    #[test]
    fn unknown_app_code_falls_through_to_the_status_template() {
        let err = resolve(404, r#"{"code": "SOMETHING_ELSE"}"#);
        assert_eq!(err.message, "요청하신 리소스를 찾을 수 없습니다.");
        // The payload code is still surfaced even when no message maps to it.
        assert_eq!(err.code, "SOMETHING_ELSE");
    }

    #[test]
    fn unmapped_status_uses_the_default_template() {
        let err = resolve(418, "");
        assert_eq!(err.code, "UNEXPECTED_ERROR");
        assert_eq!(err.message, "요청 처리 중 문제가 발생했습니다. 잠시 후 다시 시도해 주세요.");
    }

    // -- message mining ------------------------------------------------------

    #[test]
    fn blank_message_does_not_shadow_the_code_dictionary() {
        let err = resolve(404, r#"{"code": "SCHEDULE_NOT_FOUND", "message": "   "}"#);
        assert_eq!(err.message, "검사 일정을 찾을 수 없습니다.");
    }

    #[test]
    fn detail_field_counts_as_an_explicit_message() {
        let err = resolve(400, r#"{"detail": "labelNo must be positive"}"#);
        assert_eq!(err.message, "labelNo must be positive");
    }

    #[test]
    fn errors_collections_join_into_one_message() {
        let err = resolve(422, r#"{"errors": ["name required", "expiry invalid"]}"#);
        assert_eq!(err.message, "name required expiry invalid");

        let err = resolve(
            422,
            r#"{"errors": {"name": ["required"], "expiry": "invalid"}}"#,
        );
        assert!(err.message.contains("required"));
        assert!(err.message.contains("invalid"));
    }

    #[test]
    fn errors_collection_is_preserved_as_details() {
        let err = resolve(422, r#"{"errors": ["name required"]}"#);
        assert_eq!(
            err.details,
            Some(serde_json::json!(["name required"]))
        );
    }

    #[test]
    fn non_json_body_behaves_like_no_payload() {
        let err = resolve(500, "<html>Bad Gateway</html>");
        assert_eq!(err.code, "SERVER_ERROR");
        assert_eq!(err.message, "서버에 오류가 발생했습니다. 잠시 후 다시 시도해 주세요.");
    }

    // -- overrides -----------------------------------------------------------

    #[test]
    fn per_call_overrides_replace_one_status_entry() {
        let dictionary = ErrorDictionary::default().with_status(
            404,
            ErrorTemplate::new("SLOT_MISSING", "해당 냉장고 칸이 존재하지 않습니다."),
        );
        let err = resolve_api_error(404, b"", &dictionary);
        assert_eq!(err.code, "SLOT_MISSING");
        assert_eq!(err.message, "해당 냉장고 칸이 존재하지 않습니다.");

        // Other statuses keep the stock entries.
        let err = resolve_api_error(403, b"", &dictionary);
        assert_eq!(err.code, "FORBIDDEN");
    }

    #[test]
    fn default_entry_is_overridable() {
        let dictionary = ErrorDictionary::default()
            .with_default(ErrorTemplate::new("FRIDGE_DOWN", "냉장고 서비스가 점검 중입니다."));
        let err = resolve_api_error(418, b"", &dictionary);
        assert_eq!(err.code, "FRIDGE_DOWN");
    }
}
