//! Convenience re-exports for action authors.
//!
//! ```
//! use conflux_action::prelude::*;
//! ```

pub use conflux_core::{ActionContext, ExecutionContext, ExecutionId, SecurityContext};

pub use crate::action::{ACTION_SERIALIZATION_KEY, Action, ActionOutput};
pub use crate::composite::CompositeActionProvider;
pub use crate::descriptor::{ActionConstructor, ActionDescriptor, Scope, StaticActionDescriptor};
pub use crate::error::{ActionError, SerializationError};
pub use crate::params::ParamsSpec;
pub use crate::provider::{ActionProvider, DescriptorQuery, SortDir, StaticActionProvider};
pub use crate::result::ActionResult;
pub use crate::serialization::{
    ActionFactory, ActionSerializer, FieldMap, Record, SerializationRegistry, Serializer,
    fields_of,
};
pub use crate::wrapper::AttributedAction;
