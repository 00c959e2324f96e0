//! # Conflux Action System
//!
//! Pluggable action machinery for the Conflux workflow engine.
//!
//! This crate defines **what** actions are and **how the engine discovers,
//! validates, instantiates and transports them**, but not how the engine
//! orchestrates workflows. Actions come from providers; the engine only
//! ever talks to the composed provider surface.
//!
//! ## Core Types
//!
//! - [`Action`] — the unit-of-work contract concrete actions implement
//! - [`ActionResult`] — tri-state outcome (success, error, cancel)
//! - [`ActionDescriptor`] — metadata, parameter validation and instantiation
//!   strategy for one named action
//! - [`StaticActionDescriptor`] — descriptor backed by a static in-process
//!   type, optionally specialized per registration
//! - [`ActionProvider`] — a source of descriptors
//! - [`CompositeActionProvider`] — ordered composition of providers
//! - [`SerializationRegistry`] — class-identity-preserving transport of
//!   action instances across process boundaries
//! - [`ActionError`] / [`SerializationError`] — the crate's error taxonomy
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use conflux_action::prelude::*;
//! use serde_json::{Value, json};
//!
//! #[derive(serde::Serialize, serde::Deserialize)]
//! struct EchoAction {
//!     output: Value,
//! }
//!
//! impl Action for EchoAction {
//!     fn run(&self, _ctx: &ActionContext) -> Result<ActionOutput, ActionError> {
//!         Ok(self.output.clone().into())
//!     }
//!
//!     fn type_tag(&self) -> &str {
//!         "demo.EchoAction"
//!     }
//!
//!     fn to_fields(&self) -> Result<FieldMap, SerializationError> {
//!         fields_of(self)
//!     }
//! }
//!
//! let descriptor = StaticActionDescriptor::new(
//!     "std.echo",
//!     "Returns its input unchanged",
//!     "output",
//!     "demo.EchoAction",
//!     Arc::new(|input: FieldMap| {
//!         Ok(Box::new(EchoAction {
//!             output: input.get("output").cloned().unwrap_or(Value::Null),
//!         }) as Box<dyn Action>)
//!     }),
//! );
//!
//! let mut provider = StaticActionProvider::new("builtin");
//! provider.register(Arc::new(descriptor));
//!
//! let found = provider.find("std.echo", None).unwrap();
//! let mut input = FieldMap::new();
//! input.insert("output".to_owned(), json!("hi"));
//!
//! found.check_parameters(&input).unwrap();
//! let action = found.instantiate(input, &Value::Null).unwrap();
//! let result = action.run(&ActionContext::default()).unwrap().into_result();
//! assert_eq!(result.data(), Some(&json!("hi")));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

/// The unit-of-work contract and its output type.
pub mod action;
/// Ordered composition of action providers.
pub mod composite;
/// Action descriptors: metadata, validation and instantiation.
pub mod descriptor;
mod error;
pub mod params;
pub mod prelude;
/// Descriptor discovery: queries, the provider contract, the in-memory leaf.
pub mod provider;
/// The tri-state action result.
pub mod result;
pub mod serialization;
/// Specialized action variants.
pub mod wrapper;

pub use action::{ACTION_SERIALIZATION_KEY, Action, ActionOutput};
pub use composite::CompositeActionProvider;
pub use descriptor::{ActionConstructor, ActionDescriptor, Scope, StaticActionDescriptor};
pub use error::{ActionError, SerializationError};
pub use params::ParamsSpec;
pub use provider::{ActionProvider, DescriptorQuery, SortDir, StaticActionProvider};
pub use result::ActionResult;
pub use serialization::{
    ActionFactory, ActionSerializer, FieldMap, Record, SerializationRegistry, Serializer,
    fields_of,
};
pub use wrapper::AttributedAction;
