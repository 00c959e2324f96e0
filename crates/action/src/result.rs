use std::fmt;

use conflux_core::redact;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Outcome of running an action: success, error or cancellation.
///
/// Exactly one of [`is_success`](Self::is_success), [`is_error`](Self::is_error)
/// and [`is_cancel`](Self::is_cancel) holds for any value, and cancellation
/// dominates error when both are set. The value is immutable once
/// constructed; equality is structural over all three fields.
///
/// Full-fidelity transport uses the serde representation
/// (`{"data": .., "error": .., "cancel": ..}`); the deliberately lossy
/// external view is [`to_transport`](Self::to_transport).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionResult {
    data: Option<Value>,
    error: Option<Value>,
    #[serde(default)]
    cancel: bool,
}

impl ActionResult {
    /// Construct a result from raw parts.
    pub fn new(data: Option<Value>, error: Option<Value>, cancel: bool) -> Self {
        Self {
            data,
            error,
            cancel,
        }
    }

    /// A successful result carrying `data`.
    pub fn success(data: impl Into<Value>) -> Self {
        Self::new(Some(data.into()), None, false)
    }

    /// An error result carrying an error payload.
    ///
    /// Use this instead of failing the run when the error must still
    /// communicate a payload (e.g. an HTTP status and body) so the engine
    /// can branch on it.
    pub fn error(payload: impl Into<Value>) -> Self {
        Self::new(None, Some(payload.into()), false)
    }

    /// A cancelled result.
    pub fn cancelled() -> Self {
        Self::new(None, None, true)
    }

    /// The success payload, if any.
    pub fn data(&self) -> Option<&Value> {
        self.data.as_ref()
    }

    /// The error payload, if any.
    pub fn error_payload(&self) -> Option<&Value> {
        self.error.as_ref()
    }

    /// Returns `true` if the action was cancelled.
    pub fn is_cancel(&self) -> bool {
        self.cancel
    }

    /// Returns `true` if the action produced an error and was not cancelled.
    pub fn is_error(&self) -> bool {
        self.error.is_some() && !self.is_cancel()
    }

    /// Returns `true` if the action succeeded.
    pub fn is_success(&self) -> bool {
        !self.is_error() && !self.is_cancel()
    }

    /// The lossy external view: `{"result": <data if success else error>}`.
    ///
    /// Drops the cancel flag. Full-fidelity transport goes through the
    /// serialization registry instead.
    pub fn to_transport(&self) -> Value {
        let payload = if self.is_success() {
            self.data.clone()
        } else {
            self.error.clone()
        };

        serde_json::json!({ "result": payload })
    }

    /// Masked and truncated rendering for log lines.
    ///
    /// Sensitive keys in the payloads are scrubbed and each payload is
    /// bounded to `max_len` characters.
    pub fn cut_display(&self, max_len: usize) -> String {
        let part = |v: &Option<Value>| match v {
            Some(v) => redact::cut(&redact::mask(v), max_len),
            None => "null".to_owned(),
        };

        format!(
            "Result [data={}, error={}, cancel={}]",
            part(&self.data),
            part(&self.error),
            self.cancel
        )
    }
}

impl fmt::Display for ActionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let part = |v: &Option<Value>| v.as_ref().map_or_else(|| "null".to_owned(), Value::to_string);

        write!(
            f,
            "Result [data={}, error={}, cancel={}]",
            part(&self.data),
            part(&self.error),
            self.cancel
        )
    }
}
