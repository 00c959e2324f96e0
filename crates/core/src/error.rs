/// Generic top-level error for situations with no more specific category.
///
/// Every variant carries an explanatory message and maps to an HTTP-style
/// numeric code via [`code`](Self::code) so API layers can expose it
/// without inspecting variants.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum CoreError {
    /// An unclassified error. Reserved for problems that cannot be handled
    /// automatically (invalid startup configuration, broken invariants).
    #[error("{message}")]
    Unknown {
        /// Human-readable explanation.
        message: String,
    },
}

impl CoreError {
    /// Create an unclassified error.
    pub fn unknown(message: impl Into<String>) -> Self {
        Self::Unknown {
            message: message.into(),
        }
    }

    /// HTTP-style numeric code for API exposure.
    pub fn code(&self) -> u16 {
        match self {
            Self::Unknown { .. } => 500,
        }
    }
}

impl Default for CoreError {
    fn default() -> Self {
        Self::unknown("An unknown error occurred")
    }
}
