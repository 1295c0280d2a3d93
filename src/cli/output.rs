use serde::Serialize;

/// Format a result as minified JSON.
pub fn format_json<T: Serialize>(result: &T) -> String {
    serde_json::to_string(result).unwrap_or_else(|e| format!("{{\"error\":\"{e}\"}}"))
}

/// Format a result as pretty-printed JSON.
pub fn format_json_pretty<T: Serialize>(result: &T) -> String {
    serde_json::to_string_pretty(result).unwrap_or_else(|e| format!("{{\"error\":\"{e}\"}}"))
}

/// Format an error as JSON.
pub fn format_error(err: &dyn std::fmt::Display) -> String {
    format!("{{\"error\":\"{}\"}}", err.to_string().replace('"', "\\\""))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct TestData {
        name: String,
        value: i32,
    }

    #[test]
    fn format_json_is_minified() {
        let data = TestData {
            name: "skills".to_string(),
            value: 3,
        };
        assert_eq!(format_json(&data), r#"{"name":"skills","value":3}"#);
    }

    #[test]
    fn format_json_pretty_has_newlines() {
        let data = TestData {
            name: "skills".to_string(),
            value: 3,
        };
        assert!(format_json_pretty(&data).contains('\n'));
    }

    #[test]
    fn format_error_escapes_quotes() {
        let err = std::io::Error::new(std::io::ErrorKind::NotFound, "no \"file\"");
        assert_eq!(format_error(&err), r#"{"error":"no \"file\""}"#);
    }
}
