use conflux_core::ActionContext;
use serde_json::Value;

use crate::error::{ActionError, SerializationError};
use crate::result::ActionResult;
use crate::serialization::FieldMap;

/// Serialization key shared by all action types.
///
/// One serializer handles many action types by default, so concrete actions
/// normally need no bespoke registration — they inherit this key via the
/// default [`Action::serialization_key`].
pub const ACTION_SERIALIZATION_KEY: &str = "conflux.actions.Action";

/// What `run` handed back: either a raw serializable value or an explicit
/// [`ActionResult`].
///
/// Returning a raw value is the common case; an explicit result is needed
/// when an error must still carry a payload or when the action was
/// cancelled.
#[derive(Debug, Clone, PartialEq)]
pub enum ActionOutput {
    /// A raw, serializable value (string, number, mapping, sequence).
    Raw(Value),
    /// An explicit tri-state result.
    Result(ActionResult),
}

impl ActionOutput {
    /// Normalize into an [`ActionResult`], wrapping raw values as success.
    pub fn into_result(self) -> ActionResult {
        match self {
            Self::Raw(value) => ActionResult::success(value),
            Self::Result(result) => result,
        }
    }
}

impl From<Value> for ActionOutput {
    fn from(value: Value) -> Self {
        Self::Raw(value)
    }
}

impl From<ActionResult> for ActionOutput {
    fn from(result: ActionResult) -> Self {
        Self::Result(result)
    }
}

/// The unit-of-work contract.
///
/// An action is a means to perform some useful work associated with a
/// workflow during its execution. A workflow task is configured with an
/// action and delegates to it when the task runs; in general-purpose
/// language terms the action is the method declaration and the task the
/// method call.
///
/// This is the sole interface concrete action authors must implement;
/// everything else in this crate is framework-side. Side effects (I/O,
/// external calls) are entirely the concrete action's responsibility —
/// the framework imposes no sandboxing.
///
/// # Object Safety
///
/// The trait is object-safe; descriptors hand actions out as
/// `Box<dyn Action>` and providers share descriptors across threads, so
/// implementations must be `Send + Sync`.
pub trait Action: Send + Sync + 'static {
    /// Run the action's logic against the given context.
    ///
    /// The context carries execution identifiers and the caller's security
    /// details; it is owned by the caller and must not be retained beyond
    /// the call.
    ///
    /// For asynchronous actions (see [`is_sync`](Self::is_sync)) the return
    /// value is ignored by the caller.
    ///
    /// # Errors
    ///
    /// Returns [`ActionError::Failed`] when the action cannot produce any
    /// meaningful result. An error that must still communicate a payload is
    /// instead expressed as `Ok(ActionResult::error(payload).into())` so the
    /// engine can branch on it.
    fn run(&self, context: &ActionContext) -> Result<ActionOutput, ActionError>;

    /// Returns `true` if `run` delivers the final result synchronously.
    ///
    /// `false` means the real result is delivered later through an
    /// out-of-band channel (the execution context's callback URL) and the
    /// return value of `run` must be ignored by the caller.
    fn is_sync(&self) -> bool {
        true
    }

    /// Fully-qualified name of this action's concrete type.
    ///
    /// Recorded in the transport record so the receiving process can
    /// resolve the right factory.
    fn type_tag(&self) -> &str;

    /// The instance's complete field state as a flat map.
    fn to_fields(&self) -> Result<FieldMap, SerializationError>;

    /// Extra fields grafted onto this instance by a descriptor, if it is a
    /// specialized variant. `None` for plain actions.
    fn class_attributes(&self) -> Option<&FieldMap> {
        None
    }

    /// Registry key selecting the serializer for this action.
    ///
    /// Defaults to the shared base-action key; override only for actions
    /// that register a bespoke serializer.
    fn serialization_key(&self) -> &str {
        ACTION_SERIALIZATION_KEY
    }
}

impl std::fmt::Debug for dyn Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Action")
            .field("type_tag", &self.type_tag())
            .finish_non_exhaustive()
    }
}
