//! Log-safe rendering of potentially large or sensitive values.
//!
//! Action payloads can be arbitrarily big and may carry credentials, so
//! anything destined for a log line goes through [`mask`] (scrub sensitive
//! keys) and [`cut`] (bound the rendered length). Exact precision is not a
//! goal here — the output is for humans reading logs, not for transport.

use serde_json::Value;

/// Key fragments whose values are always scrubbed.
const SENSITIVE_KEYS: &[&str] = &["password", "token", "secret", "credential", "authorization"];

/// Replacement for scrubbed values.
const MASK: &str = "***";

/// Render a value as a string bounded to `max_len` characters.
///
/// Values short enough are rendered verbatim; longer ones are truncated on
/// a char boundary and suffixed with `...`.
pub fn cut(value: &Value, max_len: usize) -> String {
    cut_str(&render(value), max_len)
}

/// Truncate an already-rendered string to `max_len` characters.
pub fn cut_str(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        return s.to_owned();
    }

    let truncated: String = s.chars().take(max_len).collect();

    format!("{truncated}...")
}

/// Recursively replace values stored under sensitive keys with `"***"`.
///
/// Key matching is case-insensitive and matches substrings, so
/// `"authToken"` and `"db_password"` are both scrubbed.
pub fn mask(value: &Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(k, v)| {
                    if is_sensitive(k) {
                        (k.clone(), Value::String(MASK.to_owned()))
                    } else {
                        (k.clone(), mask(v))
                    }
                })
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.iter().map(mask).collect()),
        other => other.clone(),
    }
}

fn is_sensitive(key: &str) -> bool {
    let key = key.to_ascii_lowercase();

    SENSITIVE_KEYS.iter().any(|s| key.contains(s))
}

fn render(value: &Value) -> String {
    match value {
        // Bare strings render without surrounding quotes.
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn cut_leaves_short_values_alone() {
        assert_eq!(cut(&json!("hello"), 100), "hello");
        assert_eq!(cut(&json!(42), 100), "42");
    }

    #[test]
    fn cut_truncates_with_ellipsis() {
        let long = "a".repeat(50);
        let out = cut(&json!(long), 10);
        assert_eq!(out, format!("{}...", "a".repeat(10)));
    }

    #[test]
    fn cut_handles_multibyte_chars() {
        let s = "héllø wörld".repeat(10);
        let out = cut(&json!(s), 5);
        assert_eq!(out.chars().count(), 8); // 5 chars + "..."
    }

    #[test]
    fn mask_scrubs_sensitive_keys() {
        let v = json!({
            "user": "alice",
            "password": "hunter2",
            "authToken": "abc",
            "nested": {"db_password": "x", "count": 3},
            "items": [{"secret_key": "s"}]
        });

        let masked = mask(&v);

        assert_eq!(masked["user"], json!("alice"));
        assert_eq!(masked["password"], json!("***"));
        assert_eq!(masked["authToken"], json!("***"));
        assert_eq!(masked["nested"]["db_password"], json!("***"));
        assert_eq!(masked["nested"]["count"], json!(3));
        assert_eq!(masked["items"][0]["secret_key"], json!("***"));
    }

    #[test]
    fn mask_leaves_scalars_alone() {
        assert_eq!(mask(&json!("plain")), json!("plain"));
        assert_eq!(mask(&json!(null)), json!(null));
    }
}
