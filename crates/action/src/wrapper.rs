use conflux_core::ActionContext;
use serde_json::Value;

use crate::action::{Action, ActionOutput};
use crate::error::{ActionError, SerializationError};
use crate::serialization::FieldMap;

/// A specialized variant of a base action.
///
/// Lets one static action type be specialized per registered descriptor —
/// the same HTTP action with different default headers per descriptor, for
/// instance — without each variant being a hand-written type. The wrapper
/// holds the base action plus the extra fields the descriptor grafted onto
/// it; `run` delegates to the base and the extra fields are reachable
/// through [`attr`](Self::attr).
///
/// On the wire the wrapper serializes as the *base* class plus a
/// `cls_attrs` map, and the deserializing side re-wraps the rebuilt base,
/// so specialized variants survive a process boundary intact.
pub struct AttributedAction {
    base: Box<dyn Action>,
    attrs: FieldMap,
}

impl AttributedAction {
    /// Wrap a base action with extra fields.
    pub fn new(base: Box<dyn Action>, attrs: FieldMap) -> Self {
        Self { base, attrs }
    }

    /// Look up one grafted field by name.
    pub fn attr(&self, name: &str) -> Option<&Value> {
        self.attrs.get(name)
    }

    /// All grafted fields.
    pub fn attributes(&self) -> &FieldMap {
        &self.attrs
    }

    /// The wrapped base action.
    pub fn base(&self) -> &dyn Action {
        self.base.as_ref()
    }
}

impl Action for AttributedAction {
    fn run(&self, context: &ActionContext) -> Result<ActionOutput, ActionError> {
        self.base.run(context)
    }

    fn is_sync(&self) -> bool {
        self.base.is_sync()
    }

    fn type_tag(&self) -> &str {
        self.base.type_tag()
    }

    fn to_fields(&self) -> Result<FieldMap, SerializationError> {
        self.base.to_fields()
    }

    fn class_attributes(&self) -> Option<&FieldMap> {
        Some(&self.attrs)
    }

    fn serialization_key(&self) -> &str {
        self.base.serialization_key()
    }
}

impl std::fmt::Debug for AttributedAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AttributedAction")
            .field("base", &self.base.type_tag())
            .field("attrs", &self.attrs)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;
    use crate::serialization::fields_of;

    #[derive(serde::Serialize)]
    struct Greeter {
        greeting: String,
    }

    impl Action for Greeter {
        fn run(&self, _context: &ActionContext) -> Result<ActionOutput, ActionError> {
            Ok(json!(self.greeting.clone()).into())
        }

        fn type_tag(&self) -> &str {
            "tests.Greeter"
        }

        fn to_fields(&self) -> Result<FieldMap, SerializationError> {
            fields_of(self)
        }
    }

    fn wrapped() -> AttributedAction {
        let mut attrs = FieldMap::new();
        attrs.insert("x".to_owned(), json!(1));

        AttributedAction::new(
            Box::new(Greeter {
                greeting: "hello".to_owned(),
            }),
            attrs,
        )
    }

    #[test]
    fn delegates_run_to_base() {
        let action = wrapped();
        let out = action.run(&ActionContext::default()).unwrap();
        assert_eq!(out.into_result().data(), Some(&json!("hello")));
    }

    #[test]
    fn exposes_grafted_fields() {
        let action = wrapped();
        assert_eq!(action.attr("x"), Some(&json!(1)));
        assert_eq!(action.attr("y"), None);
        assert_eq!(action.attributes().len(), 1);
    }

    #[test]
    fn reports_base_identity_with_attrs() {
        let action = wrapped();
        assert_eq!(action.type_tag(), "tests.Greeter");
        assert!(action.class_attributes().is_some());
        assert_eq!(
            action.to_fields().unwrap(),
            action.base().to_fields().unwrap()
        );
    }

    #[test]
    fn keeps_base_sync_flag() {
        assert!(wrapped().is_sync());
    }
}
