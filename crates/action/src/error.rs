use serde_json::Value;

/// Error type for descriptor validation and action execution.
///
/// Both variants are recoverable at the workflow-engine layer (they may
/// trigger on-error branching there); this layer performs no retries
/// itself and surfaces them to the immediate caller.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[non_exhaustive]
pub enum ActionError {
    /// Parameter validation failed before instantiation.
    ///
    /// Reports the missing and unexpected parameter names in one error,
    /// together with the action name and its resolved class name. Never
    /// retried automatically.
    #[error(
        "invalid input [action={action}, class={class:?}, \
         missing={missing:?}, unexpected={unexpected:?}]"
    )]
    InvalidInput {
        /// Name of the action whose parameters were checked.
        action: String,
        /// Resolved action class name, if the action has a static class.
        class: Option<String>,
        /// Required parameters absent from the input.
        missing: Vec<String>,
        /// Input parameters not declared in the spec.
        unexpected: Vec<String>,
    },

    /// The action could not proceed during instantiation or `run`.
    #[error("failed to process action: {message}")]
    Failed {
        /// Human-readable explanation.
        message: String,
        /// Optional structured details about the failure.
        details: Option<Value>,
    },
}

impl ActionError {
    /// Create an action failure.
    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed {
            message: message.into(),
            details: None,
        }
    }

    /// Create an action failure with structured details.
    pub fn failed_with_details(message: impl Into<String>, details: Value) -> Self {
        Self::Failed {
            message: message.into(),
            details: Some(details),
        }
    }

    /// HTTP-style numeric code for API exposure.
    pub fn code(&self) -> u16 {
        match self {
            Self::InvalidInput { .. } => 400,
            Self::Failed { .. } => 500,
        }
    }
}

/// Error type for the serialization registry.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[non_exhaustive]
pub enum SerializationError {
    /// The record names a class no factory was registered for.
    ///
    /// Fatal for that one message: retrying with the same payload cannot
    /// succeed, so the error must be surfaced, not dropped.
    #[error("cannot resolve action class `{cls}`")]
    UnresolvableClass {
        /// The fully-qualified class name from the record.
        cls: String,
    },

    /// No serializer is registered under the requested key.
    #[error("no serializer registered for key `{key}`")]
    MissingSerializer {
        /// The serialization key that was looked up.
        key: String,
    },

    /// Converting between an instance and its field map failed.
    #[error("field conversion failed: {message}")]
    Fields {
        /// The underlying conversion error, rendered.
        message: String,
    },
}

impl SerializationError {
    /// Create an unresolvable-class error.
    pub fn unresolvable(cls: impl Into<String>) -> Self {
        Self::UnresolvableClass { cls: cls.into() }
    }

    /// Create a missing-serializer error.
    pub fn missing_serializer(key: impl Into<String>) -> Self {
        Self::MissingSerializer { key: key.into() }
    }

    /// HTTP-style numeric code for API exposure.
    pub fn code(&self) -> u16 {
        match self {
            Self::UnresolvableClass { .. } | Self::Fields { .. } => 400,
            Self::MissingSerializer { .. } => 500,
        }
    }
}

impl From<serde_json::Error> for SerializationError {
    fn from(err: serde_json::Error) -> Self {
        Self::Fields {
            message: err.to_string(),
        }
    }
}
