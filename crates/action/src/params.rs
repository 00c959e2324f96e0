//! Parameter-spec parsing for action descriptors.
//!
//! A params spec is a comma-separated string; each entry is either a bare
//! name (required parameter) or `name=literal` (optional, the literal is an
//! indication for the user, parsed as JSON when possible and kept as raw
//! text otherwise). The all-capturing sentinel `**` disables validation
//! entirely. Escaping is not possible.

use indexmap::IndexMap;
use serde_json::Value;

use crate::serialization::FieldMap;

/// Parsed, ordered view of a descriptor's parameter spec.
#[derive(Debug, Clone, PartialEq)]
pub struct ParamsSpec {
    /// Parameter name → default literal (`None` marks a required parameter).
    params: IndexMap<String, Option<Value>>,
    wildcard: bool,
}

impl ParamsSpec {
    /// Parse a comma-separated spec string.
    ///
    /// Never fails: unparseable default literals are kept as raw text.
    pub fn parse(spec: &str) -> Self {
        let mut params = IndexMap::new();
        let mut wildcard = false;

        for entry in spec.split(',') {
            let entry = entry.trim();

            if entry.is_empty() {
                continue;
            }

            // "**kwargs"-style catch-all: no validation at all.
            if entry.starts_with("**") {
                wildcard = true;
                continue;
            }

            match entry.split_once('=') {
                Some((name, literal)) => {
                    params.insert(name.trim().to_owned(), Some(parse_literal(literal.trim())));
                }
                None => {
                    params.insert(entry.to_owned(), None);
                }
            }
        }

        Self { params, wildcard }
    }

    /// Returns `true` if the spec contains the `**` sentinel.
    pub fn is_wildcard(&self) -> bool {
        self.wildcard
    }

    /// Number of declared parameters.
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// Returns `true` if no parameters are declared.
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// The default literal for a declared parameter.
    ///
    /// `Some(None)` means declared but required; `None` means undeclared.
    pub fn default_of(&self, name: &str) -> Option<Option<&Value>> {
        self.params.get(name).map(Option::as_ref)
    }

    /// Iterate declared `(name, default)` pairs in spec order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&Value>)> {
        self.params.iter().map(|(k, v)| (k.as_str(), v.as_ref()))
    }

    /// Compare declared parameters against actual input.
    ///
    /// Returns `(missing, unexpected)`: required names absent from the
    /// input, and input names not declared in the spec. A wildcard spec
    /// always compares clean.
    pub fn compare(&self, actual: &FieldMap) -> (Vec<String>, Vec<String>) {
        if self.wildcard {
            return (Vec::new(), Vec::new());
        }

        let missing = self
            .params
            .iter()
            .filter(|(name, default)| default.is_none() && !actual.contains_key(name.as_str()))
            .map(|(name, _)| name.clone())
            .collect();

        let unexpected = actual
            .keys()
            .filter(|name| !self.params.contains_key(name.as_str()))
            .cloned()
            .collect();

        (missing, unexpected)
    }
}

/// Parse a default literal as JSON when possible, else keep it as raw text.
fn parse_literal(literal: &str) -> Value {
    serde_json::from_str(literal).unwrap_or_else(|_| Value::String(literal.to_owned()))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    fn fields(pairs: &[(&str, Value)]) -> FieldMap {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), v.clone()))
            .collect()
    }

    #[test]
    fn parses_required_and_defaulted() {
        let spec = ParamsSpec::parse("a, b=1");

        assert_eq!(spec.len(), 2);
        assert!(!spec.is_wildcard());
        assert_eq!(spec.default_of("a"), Some(None));
        assert_eq!(spec.default_of("b"), Some(Some(&json!(1))));
        assert_eq!(spec.default_of("c"), None);
    }

    #[test]
    fn preserves_declaration_order() {
        let spec = ParamsSpec::parse("zeta, alpha=2, mid");
        let names: Vec<&str> = spec.iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn json_literals_are_parsed() {
        let spec = ParamsSpec::parse(r#"flag=true, count=3, name="x", items=[1,2]"#);
        assert_eq!(spec.default_of("flag"), Some(Some(&json!(true))));
        assert_eq!(spec.default_of("count"), Some(Some(&json!(3))));
        assert_eq!(spec.default_of("name"), Some(Some(&json!("x"))));
        assert_eq!(spec.default_of("items"), Some(Some(&json!([1, 2]))));
    }

    #[test]
    fn non_json_literals_stay_raw_text() {
        let spec = ParamsSpec::parse("mode=fast");
        assert_eq!(spec.default_of("mode"), Some(Some(&json!("fast"))));
    }

    #[test]
    fn wildcard_entry_detected() {
        let spec = ParamsSpec::parse("a, **kwargs");
        assert!(spec.is_wildcard());
        // Declared names before the sentinel are still recorded.
        assert_eq!(spec.len(), 1);
    }

    #[test]
    fn compare_reports_missing() {
        let spec = ParamsSpec::parse("a, b=1");
        let (missing, unexpected) = spec.compare(&FieldMap::new());
        assert_eq!(missing, vec!["a"]);
        assert!(unexpected.is_empty());
    }

    #[test]
    fn compare_reports_unexpected() {
        let spec = ParamsSpec::parse("a, b=1");
        let (missing, unexpected) = spec.compare(&fields(&[("a", json!(5)), ("c", json!(2))]));
        assert!(missing.is_empty());
        assert_eq!(unexpected, vec!["c"]);
    }

    #[test]
    fn compare_reports_both_sets_at_once() {
        let spec = ParamsSpec::parse("a, b");
        let (missing, unexpected) = spec.compare(&fields(&[("c", json!(1))]));
        assert_eq!(missing, vec!["a", "b"]);
        assert_eq!(unexpected, vec!["c"]);
    }

    #[test]
    fn wildcard_accepts_anything() {
        let spec = ParamsSpec::parse("**kwargs");
        let (missing, unexpected) = spec.compare(&fields(&[("whatever", json!(0))]));
        assert!(missing.is_empty());
        assert!(unexpected.is_empty());
    }

    #[test]
    fn empty_entries_are_skipped() {
        let spec = ParamsSpec::parse("a, , b");
        assert_eq!(spec.len(), 2);
    }
}
