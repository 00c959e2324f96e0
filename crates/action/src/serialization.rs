//! Class-identity-preserving transport of action instances.
//!
//! Actions must be transportable to a remote executor process while
//! retaining enough runtime identity to call `run` there. An instance is
//! converted to a [`Record`] — the fully-qualified type name, the extra
//! fields grafted onto it if it is a specialized variant, and its complete
//! field state — and rebuilt on the other side through a registered
//! factory. Reconstruction is two-phase: a serializable action type
//! registers a build-from-field-map factory, so invariants stay enforceable
//! and no constructor is bypassed. The flip side is that an action must not
//! perform required side effects in its constructor — the reconstructed
//! instance comes from its recorded field state alone.
//!
//! The [`SerializationRegistry`] is an explicit object with a documented
//! bootstrap phase: each module registers its serializers once at process
//! start, the registry is then shared behind an `Arc` and read-only.

use std::collections::HashMap;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::action::Action;
use crate::error::SerializationError;
use crate::wrapper::AttributedAction;

/// Flat field state of a serializable entity.
pub type FieldMap = serde_json::Map<String, Value>;

/// Convert a serde-serializable entity into its flat field map.
///
/// # Errors
///
/// Fails if the entity does not serialize to a JSON object.
pub fn fields_of<T: Serialize>(entity: &T) -> Result<FieldMap, SerializationError> {
    match serde_json::to_value(entity)? {
        Value::Object(map) => Ok(map),
        other => Err(SerializationError::Fields {
            message: format!("expected an object, got: {other}"),
        }),
    }
}

/// Transport-neutral record of one serialized instance.
///
/// Wire format: `{"cls": "<fully.qualified.Name>", "cls_attrs": {..}|null,
/// "data": {..}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Fully-qualified name of the instance's concrete type.
    pub cls: String,
    /// Extra fields grafted by a descriptor, for specialized variants.
    #[serde(default)]
    pub cls_attrs: Option<FieldMap>,
    /// The instance's complete field state.
    pub data: FieldMap,
}

/// Converts instances of one registered family to and from [`Record`]s.
///
/// [`ActionSerializer`] covers the shared base-action key; an action family
/// with special needs can implement its own and register it under a
/// distinct key.
pub trait Serializer: Send + Sync {
    /// Convert an instance into a transport record.
    fn serialize(&self, action: &dyn Action) -> Result<Record, SerializationError>;

    /// Rebuild an instance from a transport record, preserving its concrete
    /// runtime type.
    fn deserialize(&self, record: &Record) -> Result<Box<dyn Action>, SerializationError>;
}

/// Rebuilds one concrete action type from its recorded field state.
pub type ActionFactory =
    Arc<dyn Fn(&FieldMap) -> Result<Box<dyn Action>, SerializationError> + Send + Sync>;

/// The serializer covering the vast majority of actions.
///
/// Owns a class table mapping fully-qualified type names to factories.
/// Populated during bootstrap (`register_type` / `register_factory`), then
/// shared read-only behind the registry.
#[derive(Default)]
pub struct ActionSerializer {
    factories: HashMap<String, ActionFactory>,
}

impl ActionSerializer {
    /// Create an empty serializer with no known classes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a serde-deserializable action type under its type tag.
    pub fn register_type<A>(&mut self, tag: impl Into<String>)
    where
        A: Action + DeserializeOwned,
    {
        self.register_factory(
            tag,
            Arc::new(|fields: &FieldMap| {
                let action: A = serde_json::from_value(Value::Object(fields.clone()))?;

                Ok(Box::new(action) as Box<dyn Action>)
            }),
        );
    }

    /// Register an explicit factory for a type tag.
    ///
    /// The general form for actions whose reconstruction needs more than a
    /// serde derive (computed fields, interned state).
    pub fn register_factory(&mut self, tag: impl Into<String>, factory: ActionFactory) {
        let tag = tag.into();

        debug!(class = %tag, "registering action class");

        if self.factories.insert(tag.clone(), factory).is_some() {
            warn!(class = %tag, "action class registered twice, keeping the newer factory");
        }
    }

    /// Returns `true` if a factory is registered for the given tag.
    pub fn knows(&self, tag: &str) -> bool {
        self.factories.contains_key(tag)
    }
}

impl Serializer for ActionSerializer {
    fn serialize(&self, action: &dyn Action) -> Result<Record, SerializationError> {
        Ok(Record {
            cls: action.type_tag().to_owned(),
            cls_attrs: action.class_attributes().cloned(),
            data: action.to_fields()?,
        })
    }

    fn deserialize(&self, record: &Record) -> Result<Box<dyn Action>, SerializationError> {
        let factory = self
            .factories
            .get(&record.cls)
            .ok_or_else(|| SerializationError::unresolvable(&record.cls))?;

        let base = factory(&record.data)?;

        // Specialized variants get re-wrapped so the reconstructed instance
        // keeps the same shape as the original.
        match &record.cls_attrs {
            Some(attrs) if !attrs.is_empty() => {
                Ok(Box::new(AttributedAction::new(base, attrs.clone())))
            }
            _ => Ok(base),
        }
    }
}

impl std::fmt::Debug for ActionSerializer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActionSerializer")
            .field("classes", &self.factories.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// Process-wide mapping from serialization key to serializer.
///
/// Built once at process start and passed by reference (or `Arc`) to any
/// component needing serialization — never implicit global state. After
/// bootstrap all access is read-only and safe for unsynchronized
/// concurrent reads.
#[derive(Default)]
pub struct SerializationRegistry {
    serializers: HashMap<String, Arc<dyn Serializer>>,
}

impl SerializationRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a serializer under a key. Bootstrap-phase only.
    pub fn register(&mut self, key: impl Into<String>, serializer: Arc<dyn Serializer>) {
        let key = key.into();

        debug!(%key, "registering serializer");

        if self.serializers.insert(key.clone(), serializer).is_some() {
            warn!(%key, "serializer registered twice, keeping the newer one");
        }
    }

    /// Look up the serializer for a key.
    pub fn get(&self, key: &str) -> Option<Arc<dyn Serializer>> {
        self.serializers.get(key).cloned()
    }

    /// Serialize an instance using the serializer its key selects.
    ///
    /// # Errors
    ///
    /// Fails with [`SerializationError::MissingSerializer`] when no
    /// serializer is registered under the instance's key.
    pub fn serialize(&self, action: &dyn Action) -> Result<Record, SerializationError> {
        let key = action.serialization_key();

        self.get(key)
            .ok_or_else(|| SerializationError::missing_serializer(key))?
            .serialize(action)
    }

    /// Rebuild an instance from a record using the serializer under `key`.
    ///
    /// The key travels out-of-band with the record; the dispatching
    /// transport knows which family it is delivering.
    pub fn deserialize(
        &self,
        key: &str,
        record: &Record,
    ) -> Result<Box<dyn Action>, SerializationError> {
        self.get(key)
            .ok_or_else(|| SerializationError::missing_serializer(key))?
            .deserialize(record)
    }
}

impl std::fmt::Debug for SerializationRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SerializationRegistry")
            .field("keys", &self.serializers.keys().collect::<Vec<_>>())
            .finish()
    }
}
