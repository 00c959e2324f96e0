//! Contextual information handed to a running action.
//!
//! The context is a read-only bundle constructed by the workflow engine and
//! passed into `Action::run`. It is owned by the caller of `run`; actions
//! must not retain it beyond the call. This crate only defines its shape —
//! the engine decides what goes in it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::id::ExecutionId;

/// Authorization details of the caller on whose behalf an action runs.
///
/// Opaque to the framework: every field is optional and passed through
/// untouched to the concrete action, which may use it to talk to external
/// services with the caller's identity.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub struct SecurityContext {
    /// Endpoint of the identity service that issued the token.
    pub auth_uri: Option<String>,
    /// Bearer token to authenticate outbound calls with.
    pub auth_token: Option<String>,
    /// CA certificate bundle for TLS verification.
    pub auth_cacert: Option<String>,
    /// Skip TLS verification when talking to services.
    pub insecure: Option<bool>,
    /// Service endpoint catalog, kept as opaque JSON.
    pub service_catalog: Option<serde_json::Value>,
    /// Region the caller operates in.
    pub region_name: Option<String>,
    /// Whether the token is scoped to a trust.
    pub is_trust_scoped: Option<bool>,
    /// Whether the triggering message was redelivered.
    pub redelivered: Option<bool>,
    /// Expiry of the authorization token.
    pub expires_at: Option<DateTime<Utc>>,
    /// Identifier of the trust the token was issued from.
    pub trust_id: Option<String>,
    /// Whether this context targets another cloud.
    pub is_target: Option<bool>,
    /// Project (tenant) the caller belongs to.
    pub project_id: Option<String>,
    /// Human-readable project name.
    pub project_name: Option<String>,
    /// Human-readable user name.
    pub user_name: Option<String>,
}

impl SecurityContext {
    /// Empty security context (anonymous caller).
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the authentication token.
    pub fn with_auth_token(mut self, token: impl Into<String>) -> Self {
        self.auth_token = Some(token.into());
        self
    }

    /// Set the project (tenant) identifier.
    pub fn with_project_id(mut self, project_id: impl Into<String>) -> Self {
        self.project_id = Some(project_id.into());
        self
    }

    /// Set the user name.
    pub fn with_user_name(mut self, user_name: impl Into<String>) -> Self {
        self.user_name = Some(user_name.into());
        self
    }
}

/// Identifiers locating an action run inside a workflow execution.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub struct ExecutionContext {
    /// The enclosing workflow execution.
    pub workflow_execution_id: Option<ExecutionId>,
    /// The task execution this action belongs to.
    pub task_execution_id: Option<ExecutionId>,
    /// This particular action execution.
    pub action_execution_id: Option<ExecutionId>,
    /// Name of the workflow being executed.
    pub workflow_name: Option<String>,
    /// Endpoint an asynchronous action delivers its real result to.
    pub callback_url: Option<Url>,
}

impl ExecutionContext {
    /// Empty execution context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the workflow execution identifier.
    pub fn with_workflow_execution_id(mut self, id: ExecutionId) -> Self {
        self.workflow_execution_id = Some(id);
        self
    }

    /// Set the task execution identifier.
    pub fn with_task_execution_id(mut self, id: ExecutionId) -> Self {
        self.task_execution_id = Some(id);
        self
    }

    /// Set the action execution identifier.
    pub fn with_action_execution_id(mut self, id: ExecutionId) -> Self {
        self.action_execution_id = Some(id);
        self
    }

    /// Set the workflow name.
    pub fn with_workflow_name(mut self, name: impl Into<String>) -> Self {
        self.workflow_name = Some(name.into());
        self
    }

    /// Set the callback URL for asynchronous result delivery.
    pub fn with_callback_url(mut self, url: Url) -> Self {
        self.callback_url = Some(url);
        self
    }
}

/// Read-only bundle of security and execution information for one action run.
///
/// Serializes as `{ "security": {...}, "execution": {...} }` so it can cross
/// a process boundary alongside the action itself.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActionContext {
    /// Identity, credentials and trust information.
    pub security: SecurityContext,
    /// Workflow/task/action execution identifiers and callback URL.
    pub execution: ExecutionContext,
}

impl ActionContext {
    /// Bundle a security and an execution context.
    pub fn new(security: SecurityContext, execution: ExecutionContext) -> Self {
        Self {
            security,
            execution,
        }
    }
}
