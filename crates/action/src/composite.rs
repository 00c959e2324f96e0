use std::sync::Arc;

use tracing::debug;

use crate::descriptor::ActionDescriptor;
use crate::provider::{ActionProvider, DescriptorQuery};

/// A provider delegating to an ordered list of child providers.
///
/// The system builds one of these at startup, registers every configured
/// provider into it, and hands it to the engine as the single lookup
/// surface. Delegates are added during bootstrap via
/// [`add_action_provider`](Self::add_action_provider); once lookups start
/// the composite is read-only and safe for unsynchronized concurrent reads.
pub struct CompositeActionProvider {
    name: String,
    delegates: Vec<Arc<dyn ActionProvider>>,
}

impl CompositeActionProvider {
    /// Create an empty composite.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            delegates: Vec::new(),
        }
    }

    /// Append a delegate. Registration order is lookup-priority order.
    pub fn add_action_provider(&mut self, provider: Arc<dyn ActionProvider>) {
        debug!(composite = %self.name, delegate = %provider.name(), "adding action provider");

        self.delegates.push(provider);
    }

    /// The registered delegates, in lookup-priority order.
    pub fn delegates(&self) -> &[Arc<dyn ActionProvider>] {
        &self.delegates
    }
}

impl ActionProvider for CompositeActionProvider {
    fn name(&self) -> &str {
        &self.name
    }

    /// First delegate with a match wins; later delegates are not consulted.
    fn find(
        &self,
        action_name: &str,
        namespace: Option<&str>,
    ) -> Option<Arc<dyn ActionDescriptor>> {
        self.delegates
            .iter()
            .find_map(|p| p.find(action_name, namespace))
    }

    /// Concatenation of each delegate's results, in delegate order.
    ///
    /// No deduplication happens across delegates, and the query's limit and
    /// sort apply within each delegate rather than to the combined list. A
    /// limit of N can therefore return up to N results per delegate, and
    /// the combined list is only sorted per delegate segment.
    fn find_all(&self, query: &DescriptorQuery) -> Vec<Arc<dyn ActionDescriptor>> {
        self.delegates
            .iter()
            .flat_map(|p| p.find_all(query))
            .collect()
    }
}

impl std::fmt::Debug for CompositeActionProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompositeActionProvider")
            .field("name", &self.name)
            .field(
                "delegates",
                &self.delegates.iter().map(|p| p.name()).collect::<Vec<_>>(),
            )
            .finish()
    }
}
