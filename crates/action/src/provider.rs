use std::cmp::Ordering;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::descriptor::ActionDescriptor;

/// Sort direction for one field of a [`DescriptorQuery`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDir {
    /// Ascending.
    #[default]
    Asc,
    /// Descending.
    Desc,
}

/// Parameters of a bulk descriptor lookup.
///
/// Filtering and sorting are provider-specific; the base contract only
/// requires that ordering be deterministic for a fixed provider state.
#[derive(Debug, Clone, Default)]
pub struct DescriptorQuery {
    /// Restrict results to one namespace. `None` imposes no constraint.
    pub namespace: Option<String>,
    /// Maximum number of descriptors to return.
    pub limit: Option<usize>,
    /// Descriptor fields defining the result order.
    pub sort_fields: Vec<String>,
    /// Sort direction per field; missing entries default to ascending.
    pub sort_dirs: Vec<SortDir>,
    /// AND-joined field/value equality filters.
    pub filters: Vec<(String, Value)>,
}

impl DescriptorQuery {
    /// An unconstrained query returning everything.
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict to one namespace.
    pub fn in_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    /// Cap the number of results.
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Add a sort field with direction.
    pub fn sorted_by(mut self, field: impl Into<String>, dir: SortDir) -> Self {
        self.sort_fields.push(field.into());
        self.sort_dirs.push(dir);
        self
    }

    /// Add an equality filter.
    pub fn with_filter(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.filters.push((field.into(), value.into()));
        self
    }

    /// The direction for the `i`-th sort field (ascending when unspecified).
    fn dir(&self, i: usize) -> SortDir {
        self.sort_dirs.get(i).copied().unwrap_or_default()
    }
}

/// A source of action descriptors.
///
/// A concrete implementation can deliver descriptors any way it likes —
/// keep a static collection in memory, read a database, fetch them over the
/// network. The system composes heterogeneous providers into one via
/// [`CompositeActionProvider`](crate::CompositeActionProvider).
pub trait ActionProvider: Send + Sync {
    /// The provider's name. Some implementations ignore it, others use it
    /// to search actions in a certain way.
    fn name(&self) -> &str;

    /// Find one descriptor by name.
    ///
    /// `None` namespace addresses the default namespace.
    fn find(&self, action_name: &str, namespace: Option<&str>)
    -> Option<Arc<dyn ActionDescriptor>>;

    /// Find all descriptors matching the query.
    ///
    /// Ordering must be deterministic for a fixed provider state.
    fn find_all(&self, query: &DescriptorQuery) -> Vec<Arc<dyn ActionDescriptor>>;
}

/// An in-memory leaf provider holding a static collection of descriptors.
///
/// Descriptors keep their registration order, which is also the tiebreak
/// order when a query sorts on fields with equal values.
pub struct StaticActionProvider {
    name: String,
    descriptors: Vec<Arc<dyn ActionDescriptor>>,
}

impl StaticActionProvider {
    /// Create an empty provider.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            descriptors: Vec::new(),
        }
    }

    /// Add a descriptor. Bootstrap-phase only — the provider is expected to
    /// be read-only once lookups start.
    pub fn register(&mut self, descriptor: Arc<dyn ActionDescriptor>) {
        debug!(provider = %self.name, action = %descriptor.name(), "registering descriptor");

        self.descriptors.push(descriptor);
    }

    /// Number of registered descriptors.
    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    /// Returns `true` if no descriptors are registered.
    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }
}

impl ActionProvider for StaticActionProvider {
    fn name(&self) -> &str {
        &self.name
    }

    fn find(
        &self,
        action_name: &str,
        namespace: Option<&str>,
    ) -> Option<Arc<dyn ActionDescriptor>> {
        self.descriptors
            .iter()
            .find(|d| d.name() == action_name && d.namespace() == namespace)
            .cloned()
    }

    fn find_all(&self, query: &DescriptorQuery) -> Vec<Arc<dyn ActionDescriptor>> {
        let mut matched: Vec<Arc<dyn ActionDescriptor>> = self
            .descriptors
            .iter()
            .filter(|d| {
                query
                    .namespace
                    .as_deref()
                    .is_none_or(|ns| d.namespace() == Some(ns))
            })
            .filter(|d| {
                query
                    .filters
                    .iter()
                    .all(|(field, value)| field_matches(d.as_ref(), field, value))
            })
            .cloned()
            .collect();

        if !query.sort_fields.is_empty() {
            matched.sort_by(|a, b| compare_descriptors(a.as_ref(), b.as_ref(), query));
        }

        if let Some(limit) = query.limit {
            matched.truncate(limit);
        }

        matched
    }
}

impl std::fmt::Debug for StaticActionProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StaticActionProvider")
            .field("name", &self.name)
            .field("count", &self.descriptors.len())
            .finish()
    }
}

/// Textual value of a sortable/filterable descriptor field.
fn field_value(descriptor: &dyn ActionDescriptor, field: &str) -> Option<String> {
    match field {
        "name" => Some(descriptor.name().to_owned()),
        "description" => Some(descriptor.description().to_owned()),
        "namespace" => descriptor.namespace().map(str::to_owned),
        "project_id" => descriptor.project_id().map(str::to_owned),
        "scope" => descriptor.scope().map(|s| {
            match s {
                crate::descriptor::Scope::Public => "public",
                crate::descriptor::Scope::Private => "private",
            }
            .to_owned()
        }),
        _ => None,
    }
}

fn field_matches(descriptor: &dyn ActionDescriptor, field: &str, value: &Value) -> bool {
    let Some(actual) = field_value(descriptor, field) else {
        return false;
    };

    match value {
        Value::String(s) => &actual == s,
        other => actual == other.to_string(),
    }
}

fn compare_descriptors(
    a: &dyn ActionDescriptor,
    b: &dyn ActionDescriptor,
    query: &DescriptorQuery,
) -> Ordering {
    for (i, field) in query.sort_fields.iter().enumerate() {
        let ord = field_value(a, field).cmp(&field_value(b, field));

        let ord = match query.dir(i) {
            SortDir::Asc => ord,
            SortDir::Desc => ord.reverse(),
        };

        if ord != Ordering::Equal {
            return ord;
        }
    }

    Ordering::Equal
}
