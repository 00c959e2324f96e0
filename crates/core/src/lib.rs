//! # Conflux Core
//!
//! Core types shared by every Conflux crate.
//!
//! ## Key Components
//!
//! - **Identifiers**: [`ExecutionId`] — strongly-typed execution identifiers
//! - **Context**: [`ActionContext`], [`SecurityContext`], [`ExecutionContext`] —
//!   the read-only bundle handed to every running action
//! - **Errors**: [`CoreError`] — the generic top-level error category with an
//!   HTTP-style code for API exposure
//! - **Redaction**: [`redact`] — log-safe truncation and masking helpers
//!
//! ## Usage
//!
//! ```rust
//! use conflux_core::{ActionContext, ExecutionContext, ExecutionId, SecurityContext};
//!
//! let ctx = ActionContext::new(
//!     SecurityContext::default(),
//!     ExecutionContext::default().with_workflow_execution_id(ExecutionId::new()),
//! );
//! assert!(ctx.execution.workflow_execution_id.is_some());
//! ```

pub mod context;
pub mod id;
pub mod redact;

mod error;

pub use context::{ActionContext, ExecutionContext, SecurityContext};
pub use error::CoreError;
pub use id::ExecutionId;

/// Result type used throughout Conflux.
pub type Result<T> = std::result::Result<T, CoreError>;

/// Common prelude for Conflux crates.
pub mod prelude {
    pub use super::{
        ActionContext, CoreError, ExecutionContext, ExecutionId, Result, SecurityContext,
    };
}
