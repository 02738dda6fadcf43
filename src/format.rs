//! Error-to-message formatting.
//!
//! Error bodies arrive in several shapes: a bare string, `{message}`,
//! `{detail: "..."}` or `{detail: {code, message}}`. [`format_error`] folds
//! all of them into one display line. The checks run in a fixed order:
//! `message` wins over `detail`, and `detail` is unwrapped one level only.

use serde_json::Value;

pub const UNKNOWN_ERROR: &str = "Unknown error";
pub const UNEXPECTED_ERROR: &str = "Unexpected error";

/// Render an error value as a single display string.
pub fn format_error(e: Option<&Value>) -> String {
    let Some(value) = e.filter(|v| is_truthy(v)) else {
        return UNKNOWN_ERROR.to_string();
    };

    match value {
        Value::String(s) => s.clone(),
        Value::Object(map) => {
            if let Some(message) = map.get("message").filter(|v| is_truthy(v)) {
                return display(message);
            }
            if let Some(detail) = map.get("detail").filter(|v| is_truthy(v)) {
                if let Some(text) = format_detail(detail) {
                    return text;
                }
            }
            serialize(value)
        }
        other => serialize(other),
    }
}

fn format_detail(detail: &Value) -> Option<String> {
    if let Value::String(s) = detail {
        return Some(s.clone());
    }
    let obj = detail.as_object()?;
    obj.get("message")
        .filter(|v| is_truthy(v))
        .or_else(|| obj.get("code"))
        .map(display)
}

fn display(v: &Value) -> String {
    match v {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn serialize(v: &Value) -> String {
    serde_json::to_string(v).unwrap_or_else(|_| UNEXPECTED_ERROR.to_string())
}

/// JavaScript-style truthiness: null, false, 0, NaN and "" count as absent.
fn is_truthy(v: &Value) -> bool {
    match v {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0 && !f.is_nan()).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn absent_and_empty_are_unknown() {
        assert_eq!(format_error(None), "Unknown error");
        assert_eq!(format_error(Some(&Value::Null)), "Unknown error");
        assert_eq!(format_error(Some(&json!(""))), "Unknown error");
        assert_eq!(format_error(Some(&json!(false))), "Unknown error");
    }

    #[test]
    fn plain_string_passes_through() {
        assert_eq!(format_error(Some(&json!("boom"))), "boom");
    }

    #[test]
    fn message_wins_over_detail() {
        let e = json!({"message": "m", "detail": "d"});
        assert_eq!(format_error(Some(&e)), "m");
        let e = json!({"detail": {"message": "inner"}, "message": "outer"});
        assert_eq!(format_error(Some(&e)), "outer");
    }

    #[test]
    fn detail_string() {
        assert_eq!(format_error(Some(&json!({"detail": "x"}))), "x");
    }

    #[test]
    fn detail_object_message_then_code() {
        assert_eq!(format_error(Some(&json!({"detail": {"message": "y"}}))), "y");
        assert_eq!(format_error(Some(&json!({"detail": {"code": "z"}}))), "z");
        assert_eq!(
            format_error(Some(&json!({"detail": {"code": "z", "message": ""}}))),
            "z"
        );
    }

    #[test]
    fn detail_is_unwrapped_one_level_only() {
        let e = json!({"detail": {"message": {"message": "deep"}}});
        assert_eq!(format_error(Some(&e)), r#"{"message":"deep"}"#);
    }

    #[test]
    fn detail_without_message_or_code_serializes_whole_value() {
        let e = json!({"detail": [{"loc": ["body", "email"]}]});
        assert_eq!(format_error(Some(&e)), r#"{"detail":[{"loc":["body","email"]}]}"#);
    }

    #[test]
    fn empty_message_falls_through_to_detail() {
        let e = json!({"message": "", "detail": "d"});
        assert_eq!(format_error(Some(&e)), "d");
    }

    #[test]
    fn other_shapes_serialize() {
        assert_eq!(format_error(Some(&json!({"status": 500}))), r#"{"status":500}"#);
        assert_eq!(format_error(Some(&json!(42))), "42");
    }
}
