//! Flattening of nested JSON objects into single-level maps
//!
//! Nested keys are joined camel-case style: `{"a": {"b": {"c": 1}}}` becomes
//! `{"aBC": 1}`. Each nested component is capitalized the way Python's
//! `str.capitalize` does it (first character upper-cased, the rest lower-cased),
//! so `{"gameModeRatings": {"standardDuels": 1}}` becomes
//! `{"gameModeRatingsStandardduels": 1}`.

use serde_json::{Map, Value};

/// Options for [`flatten_with`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct FlattenOptions<'a> {
    /// Inserted between a parent key and a nested component
    pub separator: &'a str,
    /// When set, arrays are expanded element by element, each element keyed by its
    /// index appended after this separator. When unset, arrays are kept as values.
    pub index_separator: Option<&'a str>,
}

/// Flatten with the default options: no separator, arrays kept as values
pub fn flatten(object: &Map<String, Value>) -> Map<String, Value> {
    flatten_with(object, &FlattenOptions::default())
}

/// Flatten with explicit options
pub(crate) fn flatten_with(object: &Map<String, Value>, options: &FlattenOptions<'_>) -> Map<String, Value> {
    let mut out = Map::new();
    flatten_into(object, "", options, &mut out);
    out
}

fn flatten_into(
    object: &Map<String, Value>,
    parent: &str,
    options: &FlattenOptions<'_>,
    out: &mut Map<String, Value>,
) {
    for (key, value) in object {
        let new_key = if parent.is_empty() {
            key.clone()
        } else {
            format!("{parent}{}{}", options.separator, capitalize(key))
        };

        match (value, options.index_separator) {
            (Value::Object(child), _) => flatten_into(child, &new_key, options, out),
            (Value::Array(items), Some(index_separator)) => {
                for (index, item) in items.iter().enumerate() {
                    let item_key = format!("{new_key}{index_separator}{index}");
                    match item {
                        Value::Object(child) => flatten_into(child, &item_key, options, out),
                        other => {
                            out.insert(item_key, other.clone());
                        }
                    }
                }
            }
            (other, _) => {
                out.insert(new_key, other.clone());
            }
        }
    }
}

/// Upper-case the first character and lower-case the rest
pub fn capitalize(key: &str) -> String {
    let mut chars = key.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}
