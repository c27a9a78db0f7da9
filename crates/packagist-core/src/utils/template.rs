//! URI template expansion.
//!
//! Implements the subset of RFC 6570 the registry endpoints need:
//! simple string expansion (`{name}`) and form-style query expansion
//! (`{?filters*}`, `{&filters*}`), including exploded key/value lists.
//! Every byte outside the unreserved set is percent-encoded, so a `/`
//! inside a variable never turns into a path separator.

use crate::error::{PackagistError, PackagistResult};
use crate::types::FilterSet;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Characters left untouched: ALPHA / DIGIT / "-" / "." / "_" / "~"
const UNRESERVED: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Value bound to a template variable
#[derive(Debug, Clone, Copy)]
pub enum TemplateValue<'a> {
    String(&'a str),
    Filters(&'a FilterSet),
}

/// Variable bindings for [`expand`]
#[derive(Debug, Clone, Default)]
pub struct Variables<'a> {
    bindings: Vec<(&'a str, TemplateValue<'a>)>,
}

impl<'a> Variables<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a string variable
    pub fn string(mut self, name: &'a str, value: &'a str) -> Self {
        self.bindings.push((name, TemplateValue::String(value)));
        self
    }

    /// Bind a key/value list variable
    pub fn filters(mut self, name: &'a str, value: &'a FilterSet) -> Self {
        self.bindings.push((name, TemplateValue::Filters(value)));
        self
    }

    fn lookup(&self, name: &str) -> Option<TemplateValue<'a>> {
        self.bindings
            .iter()
            .find(|(bound, _)| *bound == name)
            .map(|(_, value)| *value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Operator {
    Simple,
    Query,
    Continuation,
}

impl Operator {
    fn first(self) -> &'static str {
        match self {
            Operator::Simple => "",
            Operator::Query => "?",
            Operator::Continuation => "&",
        }
    }

    fn separator(self) -> &'static str {
        match self {
            Operator::Simple => ",",
            Operator::Query | Operator::Continuation => "&",
        }
    }

    fn named(self) -> bool {
        self != Operator::Simple
    }
}

/// Percent-encode everything outside the unreserved set
pub fn encode_component(value: &str) -> String {
    utf8_percent_encode(value, UNRESERVED).to_string()
}

/// Expand `template` with the given variable bindings.
///
/// Unbound variables and empty filter sets expand to nothing, so
/// `/packages/list.json{?filters*}` with no filters yields the bare path.
pub fn expand(template: &str, vars: &Variables<'_>) -> PackagistResult<String> {
    let mut output = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        output.push_str(&rest[..start]);
        let after = &rest[start + 1..];
        let end = after.find('}').ok_or_else(|| PackagistError::Template {
            template: template.to_string(),
            reason: "unterminated expression".to_string(),
        })?;
        expand_expression(template, &after[..end], vars, &mut output)?;
        rest = &after[end + 1..];
    }

    if rest.contains('}') {
        return Err(PackagistError::Template {
            template: template.to_string(),
            reason: "unmatched '}'".to_string(),
        });
    }
    output.push_str(rest);

    Ok(output)
}

fn expand_expression(
    template: &str,
    expression: &str,
    vars: &Variables<'_>,
    output: &mut String,
) -> PackagistResult<()> {
    let invalid = |reason: String| PackagistError::Template {
        template: template.to_string(),
        reason,
    };

    let (operator, varlist) = match expression.chars().next() {
        Some('?') => (Operator::Query, &expression[1..]),
        Some('&') => (Operator::Continuation, &expression[1..]),
        Some(c @ ('+' | '#' | '.' | '/' | ';' | '=' | ',' | '!' | '@' | '|')) => {
            return Err(invalid(format!("operator '{}' is not supported", c)));
        },
        Some(_) => (Operator::Simple, expression),
        None => return Err(invalid("empty expression".to_string())),
    };

    let mut parts = Vec::new();
    for varspec in varlist.split(',') {
        let (name, explode) = match varspec.strip_suffix('*') {
            Some(name) => (name, true),
            None => (varspec, false),
        };
        if name.is_empty() || !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(invalid(format!("invalid variable name '{}'", varspec)));
        }

        match vars.lookup(name) {
            None => {},
            Some(TemplateValue::String(value)) => {
                let encoded = encode_component(value);
                if operator.named() {
                    parts.push(format!("{}={}", name, encoded));
                } else {
                    parts.push(encoded);
                }
            },
            Some(TemplateValue::Filters(filters)) if filters.is_empty() => {},
            Some(TemplateValue::Filters(filters)) => {
                if explode {
                    let pair_separator = operator.separator();
                    let pairs: Vec<String> = filters
                        .iter()
                        .map(|(k, v)| format!("{}={}", encode_component(k), encode_component(v)))
                        .collect();
                    parts.push(pairs.join(pair_separator));
                } else {
                    let flat: Vec<String> = filters
                        .iter()
                        .flat_map(|(k, v)| [encode_component(k), encode_component(v)])
                        .collect();
                    if operator.named() {
                        parts.push(format!("{}={}", name, flat.join(",")));
                    } else {
                        parts.push(flat.join(","));
                    }
                }
            },
        }
    }

    if !parts.is_empty() {
        output.push_str(operator.first());
        output.push_str(&parts.join(operator.separator()));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_simple_expansion_encodes_slash() {
        let vars = Variables::new().string("package", "clue/zenity-react");
        let url = expand("/packages/{package}.json", &vars).unwrap();
        assert_eq!(url, "/packages/clue%2Fzenity-react.json");
    }

    #[test]
    fn test_query_expansion_omitted_when_empty() {
        let filters = FilterSet::new();
        let vars = Variables::new().filters("filters", &filters);
        let url = expand("/packages/list.json{?filters*}", &vars).unwrap();
        assert_eq!(url, "/packages/list.json");
    }

    #[test]
    fn test_exploded_query_expansion() {
        let filters = FilterSet::vendor("a").with("type", "library");
        let vars = Variables::new().filters("filters", &filters);
        let url = expand("/packages/list.json{?filters*}", &vars).unwrap();
        assert_eq!(url, "/packages/list.json?vendor=a&type=library");
    }

    #[test]
    fn test_non_exploded_query_expansion() {
        let filters = FilterSet::vendor("a").with("type", "library");
        let vars = Variables::new().filters("filters", &filters);
        let url = expand("/list{?filters}", &vars).unwrap();
        assert_eq!(url, "/list?filters=vendor,a,type,library");
    }

    #[test]
    fn test_special_characters_in_query() {
        let filters = FilterSet::new().with_query("<ä>");
        let vars = Variables::new().filters("filters", &filters);
        let url = expand("/search.json{?filters*}", &vars).unwrap();
        assert_eq!(url, "/search.json?q=%3C%C3%A4%3E");
    }

    #[test]
    fn test_continuation_and_string_query() {
        let vars = Variables::new().string("q", "a b").string("page", "2");
        let url = expand("/search.json{?q}{&page}", &vars).unwrap();
        assert_eq!(url, "/search.json?q=a%20b&page=2");
    }

    #[test]
    fn test_unbound_variable_expands_to_nothing() {
        let url = expand("/packages/{package}.json", &Variables::new()).unwrap();
        assert_eq!(url, "/packages/.json");
    }

    #[test]
    fn test_invalid_templates() {
        let vars = Variables::new();
        assert!(matches!(
            expand("/packages/{package.json", &vars),
            Err(PackagistError::Template { .. })
        ));
        assert!(expand("/packages/package}.json", &vars).is_err());
        assert!(expand("/packages/{+package}", &vars).is_err());
        assert!(expand("/packages/{}", &vars).is_err());
        assert!(expand("/packages/{pack age}", &vars).is_err());
    }

    proptest! {
        #[test]
        fn simple_expansion_never_emits_reserved_characters(name in "\\PC{0,40}") {
            let vars = Variables::new().string("package", &name);
            let expanded = expand("{package}", &vars).unwrap();

            prop_assert!(expanded
                .bytes()
                .all(|b| b.is_ascii_alphanumeric() || b"-._~%".contains(&b)));

            let decoded = percent_encoding::percent_decode_str(&expanded)
                .decode_utf8()
                .unwrap();
            prop_assert_eq!(decoded.as_ref(), name.as_str());
        }
    }
}
