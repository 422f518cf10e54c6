//! Property extraction
//!
//! Builds one ordered property map from two sources:
//!
//! 1. YAML front matter, parsed as a mapping (keys in YAML order)
//! 2. Inline `key::value` annotations in the body, optionally wrapped in a
//!    single `(...)` or `[...]`; the first annotation on each line wins
//!
//! Inline annotations override front matter values in place, and keys only
//! found inline are appended in the order their lines appear.

use crate::document::{lines, split_document};
use crate::error::ParseWarning;
use indexmap::IndexMap;
use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

/// `key::value`, optionally opened by `(` or `[`; the value runs to the
/// closing bracket/paren or the end of the line.
static INLINE_ANNOTATION_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\[(]?(\w*::[^\])]*)[\])]?").expect("inline annotation regex"));

/// A property value: YAML scalar/collection from front matter, or a string
/// from an inline annotation
pub type PropertyValue = serde_yaml::Value;

/// Ordered, case-sensitive property map
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct PropertyMap {
    entries: IndexMap<String, PropertyValue>,
}

impl PropertyMap {
    /// Create an empty map
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite; an existing key keeps its position
    pub fn insert(&mut self, key: impl Into<String>, value: PropertyValue) -> Option<PropertyValue> {
        self.entries.insert(key.into(), value)
    }

    /// Look up a property
    pub fn get(&self, key: &str) -> Option<&PropertyValue> {
        self.entries.get(key)
    }

    /// Look up a scalar property rendered as text
    ///
    /// Strings, numbers and booleans are returned as text; null and
    /// collections return `None`.
    pub fn get_str(&self, key: &str) -> Option<String> {
        self.get(key).and_then(scalar_to_string)
    }

    /// Whether `key` is present
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Number of properties
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the map is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &PropertyValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Keys in insertion order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

/// Result of extracting properties from a document
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Extraction {
    /// Merged property map
    pub properties: PropertyMap,
    /// Problems skipped along the way
    pub warnings: Vec<ParseWarning>,
}

/// Extract the merged property map from a raw document. Never fails.
pub fn extract_properties(raw: &str) -> Extraction {
    let split = split_document(raw);
    let mut extraction = Extraction::default();

    if let Some(block) = split.frontmatter {
        parse_frontmatter(block.body, &mut extraction);
    }

    for (index, line) in lines(split.body).enumerate() {
        if line.content.trim().is_empty() {
            continue;
        }
        let Some(caps) = INLINE_ANNOTATION_REGEX.captures(line.content) else {
            continue;
        };
        let Some(annotation) = caps.get(1) else {
            continue;
        };

        match annotation.as_str().split_once("::") {
            Some((key, value)) if !key.trim().is_empty() => {
                extraction.properties.insert(
                    key.trim(),
                    PropertyValue::String(value.trim().to_string()),
                );
            }
            _ => extraction.warnings.push(ParseWarning::InlineAnnotation {
                line: index + 1,
                text: line.content.to_string(),
            }),
        }
    }

    extraction
}

fn parse_frontmatter(yaml: &str, extraction: &mut Extraction) {
    let value: PropertyValue = match serde_yaml::from_str(yaml) {
        Ok(value) => value,
        Err(e) => {
            extraction
                .warnings
                .push(ParseWarning::Frontmatter(e.to_string()));
            return;
        }
    };

    match value {
        PropertyValue::Mapping(mapping) => {
            for (key, value) in mapping {
                match scalar_to_string(&key) {
                    Some(key) => {
                        extraction.properties.insert(key, value);
                    }
                    None => extraction.warnings.push(ParseWarning::Frontmatter(format!(
                        "non-scalar key {key:?} skipped"
                    ))),
                }
            }
        }
        // Empty or comment-only front matter
        PropertyValue::Null => {}
        other => extraction.warnings.push(ParseWarning::Frontmatter(format!(
            "expected a mapping, found {}",
            value_kind(&other)
        ))),
    }
}

/// Render a scalar YAML value as text
pub fn scalar_to_string(value: &PropertyValue) -> Option<String> {
    match value {
        PropertyValue::String(s) => Some(s.clone()),
        PropertyValue::Number(n) => Some(n.to_string()),
        PropertyValue::Bool(b) => Some(b.to_string()),
        PropertyValue::Tagged(tagged) => scalar_to_string(&tagged.value),
        PropertyValue::Null | PropertyValue::Sequence(_) | PropertyValue::Mapping(_) => None,
    }
}

fn value_kind(value: &PropertyValue) -> &'static str {
    match value {
        PropertyValue::Null => "null",
        PropertyValue::Bool(_) => "a boolean",
        PropertyValue::Number(_) => "a number",
        PropertyValue::String(_) => "a string",
        PropertyValue::Sequence(_) => "a sequence",
        PropertyValue::Mapping(_) => "a mapping",
        PropertyValue::Tagged(_) => "a tagged value",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(value: &str) -> PropertyValue {
        PropertyValue::String(value.to_string())
    }

    #[test]
    fn test_frontmatter_only() {
        let doc = "---\ntitle: Example\ncount: 3\ntags: [a, b]\n---\nBody\n";
        let extraction = extract_properties(doc);

        assert!(extraction.warnings.is_empty());
        let props = extraction.properties;
        assert_eq!(props.keys().collect::<Vec<_>>(), vec!["title", "count", "tags"]);
        assert_eq!(props.get("title"), Some(&text("Example")));
        assert_eq!(props.get_str("count"), Some("3".to_string()));
        assert!(props.get("tags").unwrap().is_sequence());
        assert_eq!(props.get_str("tags"), None);
    }

    #[test]
    fn test_inline_overrides_frontmatter_in_place() {
        let doc = "---\nestado: pending\ntitulo: Nota\n---\nestado::done\n";
        let props = extract_properties(doc).properties;

        assert_eq!(props.get("estado"), Some(&text("done")));
        assert_eq!(props.keys().collect::<Vec<_>>(), vec!["estado", "titulo"]);
    }

    #[test]
    fn test_inline_only_keys_follow_line_order() {
        let doc = "---\na: 1\n---\nzeta:: last\nalpha:: first\n";
        let props = extract_properties(doc).properties;
        assert_eq!(props.keys().collect::<Vec<_>>(), vec!["a", "zeta", "alpha"]);
    }

    #[test]
    fn test_wrapped_annotations() {
        let doc = "Task [due:: 2024-05-01] and more\nSee (owner:: Ana) here\nplain:: value with spaces  \n";
        let props = extract_properties(doc).properties;

        assert_eq!(props.get("due"), Some(&text("2024-05-01")));
        assert_eq!(props.get("owner"), Some(&text("Ana")));
        assert_eq!(props.get("plain"), Some(&text("value with spaces")));
    }

    #[test]
    fn test_first_annotation_per_line_wins() {
        let doc = "[a:: 1] [b:: 2]\n";
        let props = extract_properties(doc).properties;
        assert_eq!(props.get("a"), Some(&text("1")));
        assert!(!props.contains_key("b"));
    }

    #[test]
    fn test_value_split_on_first_separator() {
        let props = extract_properties("link:: a::b\n").properties;
        assert_eq!(props.get("link"), Some(&text("a::b")));
    }

    #[test]
    fn test_later_lines_override_earlier_ones() {
        let props = extract_properties("state:: open\nstate:: closed\n").properties;
        assert_eq!(props.get("state"), Some(&text("closed")));
        assert_eq!(props.len(), 1);
    }

    #[test]
    fn test_keyless_annotation_is_a_warning() {
        let extraction = extract_properties("intro\n:: orphan value\n");
        assert!(extraction.properties.is_empty());
        assert_eq!(
            extraction.warnings,
            vec![ParseWarning::InlineAnnotation {
                line: 2,
                text: ":: orphan value".to_string()
            }]
        );
    }

    #[test]
    fn test_invalid_yaml_yields_empty_base() {
        let doc = "---\ntitle: [unclosed\n---\nstate:: open\n";
        let extraction = extract_properties(doc);

        assert_eq!(extraction.properties.len(), 1);
        assert_eq!(extraction.properties.get("state"), Some(&text("open")));
        assert!(matches!(
            extraction.warnings.as_slice(),
            [ParseWarning::Frontmatter(_)]
        ));
    }

    #[test]
    fn test_non_mapping_frontmatter_is_ignored() {
        let extraction = extract_properties("---\n- a\n- b\n---\n");
        assert!(extraction.properties.is_empty());
        assert_eq!(extraction.warnings.len(), 1);
    }

    #[test]
    fn test_empty_and_comment_only_frontmatter() {
        assert!(extract_properties("---\n---\n").warnings.is_empty());
        let extraction = extract_properties("---\n# just a comment\n---\nbody\n");
        assert!(extraction.properties.is_empty());
        assert!(extraction.warnings.is_empty());
    }

    #[test]
    fn test_no_frontmatter_no_annotations() {
        let extraction = extract_properties("# Heading\n\nJust text: with a colon.\n");
        assert!(extraction.properties.is_empty());
        assert!(extraction.warnings.is_empty());
    }

    #[test]
    fn test_crlf_body_values_are_trimmed() {
        let props = extract_properties("---\r\na: 1\r\n---\r\nb:: two\r\n").properties;
        assert_eq!(props.get("b"), Some(&text("two")));
    }

    #[test]
    fn test_numeric_keys_become_strings() {
        let props = extract_properties("---\n2024: year\n---\n").properties;
        assert_eq!(props.get_str("2024"), Some("year".to_string()));
    }
}
