use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::action::Action;
use crate::error::ActionError;
use crate::params::ParamsSpec;
use crate::result::ActionResult;
use crate::serialization::FieldMap;
use crate::wrapper::AttributedAction;

/// Visibility of an action within a project (tenant).
///
/// Meaningful only when the descriptor carries a `project_id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    /// Available in all projects.
    Public,
    /// Accessible only by users of the owning project.
    Private,
}

/// Metadata, parameter validation and instantiation strategy for one named
/// action.
///
/// A descriptor is not an action — it carries everything important about a
/// particular action *before* the action is instantiated, similar to a type
/// versus its instances, except one descriptor kind may serve many
/// different actions.
///
/// Descriptors never cache instantiated actions: every
/// [`instantiate`](Self::instantiate) call produces a fresh instance, and
/// descriptors hold no mutable state, so one descriptor can serve
/// concurrent instantiations safely.
pub trait ActionDescriptor: Send + Sync {
    /// The action's name, unique within a `(namespace, project_id)` pair as
    /// enforced by providers.
    fn name(&self) -> &str;

    /// Human-readable description.
    fn description(&self) -> &str;

    /// Comma-separated parameter spec (see [`ParamsSpec`]).
    fn params_spec(&self) -> &str;

    /// The action's namespace. Not all actions support namespaces.
    fn namespace(&self) -> Option<&str> {
        None
    }

    /// Owning project (tenant), if any. Unset means usable in all projects.
    fn project_id(&self) -> Option<&str> {
        None
    }

    /// Visibility within the owning project.
    fn scope(&self) -> Option<Scope> {
        None
    }

    /// Fully-qualified name of the action's static type, or `None` when the
    /// action is dynamically generated by some kind of wrapper.
    fn action_class_name(&self) -> Option<&str> {
        None
    }

    /// Extra fields merged onto a specialized variant at instantiation
    /// time, if any.
    fn action_class_attributes(&self) -> Option<&FieldMap> {
        None
    }

    /// Preliminary check of actual parameters against the spec.
    ///
    /// A successful check does not guarantee a successful run of the
    /// instantiated action. When the spec contains the `**` sentinel no
    /// validation occurs at all.
    ///
    /// # Errors
    ///
    /// [`ActionError::InvalidInput`] reporting both the missing required
    /// parameters and the undeclared ones in a single error.
    fn check_parameters(&self, params: &FieldMap) -> Result<(), ActionError> {
        let spec = ParamsSpec::parse(self.params_spec());

        if spec.is_wildcard() {
            return Ok(());
        }

        let (missing, unexpected) = spec.compare(params);

        if missing.is_empty() && unexpected.is_empty() {
            return Ok(());
        }

        Err(ActionError::InvalidInput {
            action: self.name().to_owned(),
            class: self.action_class_name().map(str::to_owned),
            missing,
            unexpected,
        })
    }

    /// Instantiate the action with the given parameters.
    ///
    /// `wf_ctx` is the workflow context relevant at the point the action is
    /// about to start; descriptor kinds that specialize instantiation on it
    /// may inspect it, the rest pass it through.
    ///
    /// # Errors
    ///
    /// [`ActionError::Failed`] when the action cannot be constructed from
    /// the given input.
    fn instantiate(&self, input: FieldMap, wf_ctx: &Value) -> Result<Box<dyn Action>, ActionError>;

    /// Convert the result produced by the instantiated action.
    ///
    /// Identity by default. Descriptor kinds wrapping asynchronous actions
    /// use this to transform the callback payload once it reaches the
    /// engine.
    fn post_process_result(&self, result: ActionResult) -> ActionResult {
        result
    }
}

/// Builds the base action of a [`StaticActionDescriptor`] from the input
/// map.
pub type ActionConstructor =
    Arc<dyn Fn(FieldMap) -> Result<Box<dyn Action>, ActionError> + Send + Sync>;

/// Descriptor for an action backed by a static in-process type.
///
/// The constructor closure plays the role of the action type's constructor;
/// when class attributes are present, the constructed base is wrapped in an
/// [`AttributedAction`] so a single static type can be specialized per
/// registered descriptor.
#[derive(Clone)]
pub struct StaticActionDescriptor {
    name: String,
    description: String,
    params_spec: String,
    namespace: Option<String>,
    project_id: Option<String>,
    scope: Option<Scope>,
    class_name: String,
    class_attributes: Option<FieldMap>,
    constructor: ActionConstructor,
}

impl StaticActionDescriptor {
    /// Create a descriptor with the minimum required fields.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        params_spec: impl Into<String>,
        class_name: impl Into<String>,
        constructor: ActionConstructor,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            params_spec: params_spec.into(),
            namespace: None,
            project_id: None,
            scope: None,
            class_name: class_name.into(),
            class_attributes: None,
            constructor,
        }
    }

    /// Set the namespace.
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    /// Set the owning project.
    pub fn with_project_id(mut self, project_id: impl Into<String>) -> Self {
        self.project_id = Some(project_id.into());
        self
    }

    /// Set the visibility scope.
    pub fn with_scope(mut self, scope: Scope) -> Self {
        self.scope = Some(scope);
        self
    }

    /// Set the extra fields grafted onto every instantiated action.
    pub fn with_class_attributes(mut self, attrs: FieldMap) -> Self {
        self.class_attributes = Some(attrs);
        self
    }
}

impl ActionDescriptor for StaticActionDescriptor {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn params_spec(&self) -> &str {
        &self.params_spec
    }

    fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    fn project_id(&self) -> Option<&str> {
        self.project_id.as_deref()
    }

    fn scope(&self) -> Option<Scope> {
        self.scope
    }

    fn action_class_name(&self) -> Option<&str> {
        Some(&self.class_name)
    }

    fn action_class_attributes(&self) -> Option<&FieldMap> {
        self.class_attributes.as_ref()
    }

    fn instantiate(&self, input: FieldMap, _wf_ctx: &Value) -> Result<Box<dyn Action>, ActionError> {
        let base = (self.constructor)(input)?;

        match &self.class_attributes {
            // No specialization requested, hand out the declared type as is.
            None => Ok(base),
            Some(attrs) if attrs.is_empty() => Ok(base),
            Some(attrs) => Ok(Box::new(AttributedAction::new(base, attrs.clone()))),
        }
    }
}

impl std::fmt::Debug for StaticActionDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StaticActionDescriptor")
            .field("name", &self.name)
            .field("class", &self.class_name)
            .field("namespace", &self.namespace)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use conflux_core::ActionContext;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;
    use crate::action::ActionOutput;
    use crate::error::SerializationError;
    use crate::serialization::fields_of;

    #[derive(serde::Serialize, serde::Deserialize)]
    struct ConcatAction {
        left: String,
        right: String,
    }

    impl Action for ConcatAction {
        fn run(&self, _context: &ActionContext) -> Result<ActionOutput, ActionError> {
            Ok(json!(format!("{}{}", self.left, self.right)).into())
        }

        fn type_tag(&self) -> &str {
            "tests.ConcatAction"
        }

        fn to_fields(&self) -> Result<FieldMap, SerializationError> {
            fields_of(self)
        }
    }

    fn concat_constructor() -> ActionConstructor {
        Arc::new(|input: FieldMap| {
            let action: ConcatAction = serde_json::from_value(Value::Object(input))
                .map_err(|e| ActionError::failed(e.to_string()))?;

            Ok(Box::new(action) as Box<dyn Action>)
        })
    }

    fn descriptor() -> StaticActionDescriptor {
        StaticActionDescriptor::new(
            "std.concat",
            "Concatenates two strings",
            "left, right",
            "tests.ConcatAction",
            concat_constructor(),
        )
    }

    fn fields(pairs: &[(&str, Value)]) -> FieldMap {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), v.clone()))
            .collect()
    }

    #[test]
    fn metadata_accessors() {
        let d = descriptor()
            .with_namespace("strings")
            .with_project_id("p1")
            .with_scope(Scope::Private);

        assert_eq!(d.name(), "std.concat");
        assert_eq!(d.namespace(), Some("strings"));
        assert_eq!(d.project_id(), Some("p1"));
        assert_eq!(d.scope(), Some(Scope::Private));
        assert_eq!(d.action_class_name(), Some("tests.ConcatAction"));
        assert!(d.action_class_attributes().is_none());
    }

    #[test]
    fn instantiate_returns_declared_type() {
        let d = descriptor();
        let action = d
            .instantiate(
                fields(&[("left", json!("a")), ("right", json!("b"))]),
                &Value::Null,
            )
            .unwrap();

        assert_eq!(action.type_tag(), "tests.ConcatAction");
        assert!(action.class_attributes().is_none());

        let out = action.run(&ActionContext::default()).unwrap();
        assert_eq!(out.into_result().data(), Some(&json!("ab")));
    }

    #[test]
    fn instantiate_with_attributes_returns_specialized_variant() {
        let d = descriptor().with_class_attributes(fields(&[("x", json!(1))]));

        let action = d
            .instantiate(
                fields(&[("left", json!("a")), ("right", json!("b"))]),
                &Value::Null,
            )
            .unwrap();

        // Still identified by the declared class, but carrying the extras.
        assert_eq!(action.type_tag(), "tests.ConcatAction");
        assert_eq!(action.class_attributes().unwrap().get("x"), Some(&json!(1)));
    }

    #[test]
    fn instantiate_with_empty_attributes_skips_wrapping() {
        let d = descriptor().with_class_attributes(FieldMap::new());
        let action = d
            .instantiate(
                fields(&[("left", json!("a")), ("right", json!("b"))]),
                &Value::Null,
            )
            .unwrap();
        assert!(action.class_attributes().is_none());
    }

    #[test]
    fn every_instantiate_is_fresh() {
        let d = descriptor();
        let input = fields(&[("left", json!("a")), ("right", json!("b"))]);

        let first = d.instantiate(input.clone(), &Value::Null).unwrap();
        let second = d.instantiate(input, &Value::Null).unwrap();

        // Two independent allocations, both runnable.
        let ctx = ActionContext::default();
        assert_eq!(
            first.run(&ctx).unwrap().into_result(),
            second.run(&ctx).unwrap().into_result()
        );
        drop(first);
        assert!(second.run(&ctx).is_ok());
    }

    #[test]
    fn check_parameters_passes_with_defaults() {
        let d = StaticActionDescriptor::new(
            "demo",
            "",
            "a, b=1",
            "tests.ConcatAction",
            concat_constructor(),
        );
        assert!(d.check_parameters(&fields(&[("a", json!(5))])).is_ok());
    }

    #[test]
    fn check_parameters_reports_unexpected() {
        let d = StaticActionDescriptor::new(
            "demo",
            "",
            "a, b=1",
            "tests.ConcatAction",
            concat_constructor(),
        );

        let err = d
            .check_parameters(&fields(&[("a", json!(5)), ("c", json!(2))]))
            .unwrap_err();

        match err {
            ActionError::InvalidInput {
                missing,
                unexpected,
                action,
                class,
            } => {
                assert!(missing.is_empty());
                assert_eq!(unexpected, vec!["c"]);
                assert_eq!(action, "demo");
                assert_eq!(class.as_deref(), Some("tests.ConcatAction"));
            }
            ActionError::Failed { .. } => panic!("expected InvalidInput"),
        }
    }

    #[test]
    fn check_parameters_reports_missing() {
        let d = StaticActionDescriptor::new(
            "demo",
            "",
            "a, b=1",
            "tests.ConcatAction",
            concat_constructor(),
        );

        let err = d.check_parameters(&FieldMap::new()).unwrap_err();

        match err {
            ActionError::InvalidInput {
                missing, unexpected, ..
            } => {
                assert_eq!(missing, vec!["a"]);
                assert!(unexpected.is_empty());
            }
            ActionError::Failed { .. } => panic!("expected InvalidInput"),
        }
    }

    #[test]
    fn wildcard_spec_disables_validation() {
        let d = StaticActionDescriptor::new(
            "demo",
            "",
            "**kwargs",
            "tests.ConcatAction",
            concat_constructor(),
        );
        assert!(
            d.check_parameters(&fields(&[("anything", json!(1)), ("at_all", json!(2))]))
                .is_ok()
        );
    }

    #[test]
    fn post_process_result_is_identity_by_default() {
        let d = descriptor();
        let result = ActionResult::success(json!(1));
        assert_eq!(d.post_process_result(result.clone()), result);
    }
}
