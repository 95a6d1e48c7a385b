//! Dynamic field selection over JSON values of unknown shape.
//!
//! User-configured widgets point at arbitrary APIs whose schema is never
//! declared. This module enumerates selectable leaf paths for the widget
//! editor and resolves selected paths at render time. Both operations are
//! modeled as a tagged-variant walk over [`serde_json::Value`] and are
//! guaranteed never to panic; a path that does not fit a row resolves to
//! `None` and renders as a placeholder.

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::ValidationError;

/// Ordered key sequence identifying a leaf inside a nested JSON value.
///
/// Equality and hashing are structural over the segment sequence.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldPath(Vec<String>);

impl FieldPath {
    pub fn new(segments: Vec<String>) -> Result<Self, ValidationError> {
        if segments.is_empty() {
            return Err(ValidationError::EmptyFieldPath);
        }
        Ok(Self(segments))
    }

    /// Parse a dot-separated path, e.g. `data.0.price`.
    pub fn from_dotted(path: &str) -> Result<Self, ValidationError> {
        Self::new(
            path.split('.')
                .filter(|segment| !segment.is_empty())
                .map(str::to_owned)
                .collect(),
        )
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }
}

impl Display for FieldPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0.join("."))
    }
}

/// Enumerate every selectable leaf path in a JSON value.
///
/// A path is selectable only where it lands on a primitive (string, number,
/// boolean, null); objects and arrays are traversed, arrays with their
/// indices as segments. A bare primitive root has no addressable path.
pub fn list_leaf_paths(value: &Value) -> Vec<FieldPath> {
    let mut paths = Vec::new();
    let mut trail = Vec::new();
    walk(value, &mut trail, &mut paths);
    paths
}

fn walk(value: &Value, trail: &mut Vec<String>, paths: &mut Vec<FieldPath>) {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                trail.push(key.clone());
                walk(child, trail, paths);
                trail.pop();
            }
        }
        Value::Array(items) => {
            for (index, child) in items.iter().enumerate() {
                trail.push(index.to_string());
                walk(child, trail, paths);
                trail.pop();
            }
        }
        _ => {
            if !trail.is_empty() {
                paths.push(FieldPath(trail.clone()));
            }
        }
    }
}

/// Resolve a path against a row of unknown shape.
///
/// Short-circuits to `None` as soon as any level is missing or not
/// indexable by the next segment.
pub fn resolve<'a>(row: &'a Value, path: &FieldPath) -> Option<&'a Value> {
    let mut current = row;
    for segment in &path.0 {
        current = match current {
            Value::Object(map) => map.get(segment)?,
            Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }
    Some(current)
}

/// Ordered set of field paths, unique by structural equality.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldSelection(Vec<FieldPath>);

impl FieldSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_paths(paths: Vec<FieldPath>) -> Self {
        let mut selection = Self::new();
        for path in paths {
            if !selection.contains(&path) {
                selection.0.push(path);
            }
        }
        selection
    }

    /// Add the path if absent, remove it if present (the widget editor's
    /// checkbox semantics).
    pub fn toggle(&mut self, path: FieldPath) {
        match self.0.iter().position(|existing| existing == &path) {
            Some(index) => {
                self.0.remove(index);
            }
            None => self.0.push(path),
        }
    }

    pub fn contains(&self, path: &FieldPath) -> bool {
        self.0.contains(path)
    }

    pub fn paths(&self) -> &[FieldPath] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn lists_only_primitive_leaves() {
        let value = json!({"a": 1, "b": {"c": 2}});

        let paths = list_leaf_paths(&value);
        let rendered: Vec<String> = paths.iter().map(ToString::to_string).collect();

        assert_eq!(rendered, vec!["a", "b.c"]);
    }

    #[test]
    fn arrays_enumerate_index_segments() {
        let value = json!({"rows": [{"price": 1}, {"price": 2}]});

        let paths = list_leaf_paths(&value);
        let rendered: Vec<String> = paths.iter().map(ToString::to_string).collect();

        assert_eq!(rendered, vec!["rows.0.price", "rows.1.price"]);
    }

    #[test]
    fn null_and_bool_count_as_leaves() {
        let value = json!({"ok": true, "gap": null});
        assert_eq!(list_leaf_paths(&value).len(), 2);
    }

    #[test]
    fn primitive_root_has_no_paths() {
        assert!(list_leaf_paths(&json!(42)).is_empty());
    }

    #[test]
    fn resolve_walks_nested_objects_and_arrays() {
        let row = json!({"a": {"b": [10, 20]}});
        let path = FieldPath::from_dotted("a.b.1").expect("path");

        assert_eq!(resolve(&row, &path), Some(&json!(20)));
    }

    #[test]
    fn resolve_missing_level_returns_none() {
        let row = json!({"a": {"b": 1}});
        let path = FieldPath::from_dotted("a.c").expect("path");

        assert_eq!(resolve(&row, &path), None);
    }

    #[test]
    fn resolve_through_primitive_returns_none() {
        let row = json!({"a": 1});
        let path = FieldPath::from_dotted("a.b").expect("path");

        assert_eq!(resolve(&row, &path), None);
    }

    #[test]
    fn resolve_non_numeric_index_returns_none() {
        let row = json!([1, 2, 3]);
        let path = FieldPath::from_dotted("first").expect("path");

        assert_eq!(resolve(&row, &path), None);
    }

    #[test]
    fn empty_path_is_rejected() {
        let err = FieldPath::from_dotted("").expect_err("must fail");
        assert!(matches!(err, ValidationError::EmptyFieldPath));
    }

    #[test]
    fn toggle_adds_then_removes() {
        let mut selection = FieldSelection::new();
        let path = FieldPath::from_dotted("a.b").expect("path");

        selection.toggle(path.clone());
        assert!(selection.contains(&path));
        assert_eq!(selection.len(), 1);

        selection.toggle(path.clone());
        assert!(!selection.contains(&path));
        assert!(selection.is_empty());
    }

    #[test]
    fn from_paths_deduplicates_structurally() {
        let a = FieldPath::from_dotted("a.b").expect("path");
        let b = FieldPath::from_dotted("a.b").expect("path");

        let selection = FieldSelection::from_paths(vec![a, b]);
        assert_eq!(selection.len(), 1);
    }
}
