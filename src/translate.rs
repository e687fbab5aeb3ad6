//! Dotted-key lookup over a resolved message tree.
//!
//! A missing key is reported as [`LookupError`], never as an empty value:
//! `""`, `[]` and `{}` are found values, so callers can tell "section has no
//! entries" apart from "section does not exist".

use std::collections::BTreeMap;

use serde_json::Value;
use thiserror::Error;

/// Why a key could not be resolved.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    /// A path segment does not exist.
    #[error("Missing message '{key}' (no '{segment}')")]
    Missing {
        /// Requested key.
        key: String,
        /// First segment not found.
        segment: String,
    },

    /// The path continues past a string, number, boolean or null.
    #[error("Message '{key}' cannot be traversed at '{segment}'")]
    NotTraversable {
        /// Requested key.
        key: String,
        /// Segment that could not be entered.
        segment: String,
    },

    /// The value exists but is an object or array.
    #[error("Message '{key}' is not text")]
    NotText {
        /// Requested key.
        key: String,
    },
}

/// Read-only view of a message tree.
#[derive(Debug, Clone, Copy)]
pub struct Translator<'a> {
    /// Resolved message tree.
    tree: &'a Value,
    /// Separator between key segments.
    separator: &'a str,
}

impl<'a> Translator<'a> {
    /// Lookup over `tree` with keys split on `separator`.
    #[must_use]
    pub const fn new(tree: &'a Value, separator: &'a str) -> Self {
        Self { tree, separator }
    }

    /// Returns the value at `key`.
    ///
    /// Segments index objects by name and arrays by position, either as a
    /// plain segment (`items.0`) or in bracket form (`items[0]`).
    pub fn lookup(&self, key: &str) -> Result<&'a Value, LookupError> {
        let mut current = self.tree;
        for segment in split_key(key, self.separator) {
            current = match current {
                Value::Object(map) => map.get(segment),
                Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
                _ => {
                    return Err(LookupError::NotTraversable {
                        key: key.to_string(),
                        segment: segment.to_string(),
                    });
                }
            }
            .ok_or_else(|| LookupError::Missing {
                key: key.to_string(),
                segment: segment.to_string(),
            })?;
        }
        Ok(current)
    }

    /// Whether `key` resolves to any value.
    #[must_use]
    pub fn has(&self, key: &str) -> bool {
        self.lookup(key).is_ok()
    }

    /// Returns the value at `key` as display text.
    ///
    /// Numbers and booleans are stringified; `null` is empty text.
    pub fn text(&self, key: &str) -> Result<String, LookupError> {
        match self.lookup(key)? {
            Value::String(s) => Ok(s.clone()),
            Value::Null => Ok(String::new()),
            value @ (Value::Number(_) | Value::Bool(_)) => Ok(value.to_string()),
            Value::Array(_) | Value::Object(_) => {
                Err(LookupError::NotText { key: key.to_string() })
            }
        }
    }

    /// Like [`text`](Self::text), but shows the raw key when lookup fails.
    #[must_use]
    pub fn text_or_key(&self, key: &str) -> String {
        self.text(key).unwrap_or_else(|err| {
            tracing::debug!(%err, "Falling back to raw key");
            key.to_string()
        })
    }

    /// Looks up `key` and replaces `{name}` tokens with `args`.
    ///
    /// Substitution is a single pass; tokens without an argument stay as-is.
    pub fn format(&self, key: &str, args: &[(&str, &str)]) -> Result<String, LookupError> {
        Ok(interpolate(&self.text(key)?, args))
    }
}

/// Splits `key` on `separator`, also breaking out `[n]` indices.
fn split_key<'k>(key: &'k str, separator: &'k str) -> impl Iterator<Item = &'k str> {
    key.split(separator)
        .flat_map(|part| part.split(['[', ']']))
        .filter(|segment| !segment.is_empty())
}

/// Replaces `{name}` with its argument; unknown names stay as written.
fn interpolate(template: &str, args: &[(&str, &str)]) -> String {
    let mut result = String::with_capacity(template.len());
    let mut rest = template;
    while let Some((before, after_open)) = rest.split_once('{') {
        result.push_str(before);
        let Some((name, after_close)) = after_open.split_once('}') else {
            result.push('{');
            rest = after_open;
            break;
        };
        match args.iter().find(|(arg, _)| *arg == name) {
            Some((_, value)) => result.push_str(value),
            None => {
                result.push('{');
                result.push_str(name);
                result.push('}');
            }
        }
        rest = after_close;
    }
    result.push_str(rest);
    result
}

/// Flattens a tree into `key → text` pairs.
///
/// Arrays use bracket indices (`items[0]`); non-string leaves are rendered
/// as JSON.
#[must_use]
pub fn flatten_keys(tree: &Value, separator: &str) -> BTreeMap<String, String> {
    let mut result = BTreeMap::new();
    flatten_value(tree, separator, None, &mut result);
    result
}

/// Recursive worker of [`flatten_keys`].
fn flatten_value(
    value: &Value,
    separator: &str,
    prefix: Option<&str>,
    result: &mut BTreeMap<String, String>,
) {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                let full_key =
                    prefix.map_or_else(|| key.clone(), |p| format!("{p}{separator}{key}"));
                flatten_value(child, separator, Some(&full_key), result);
            }
        }
        Value::Array(items) => {
            for (index, child) in items.iter().enumerate() {
                let full_key =
                    prefix.map_or_else(|| format!("[{index}]"), |p| format!("{p}[{index}]"));
                flatten_value(child, separator, Some(&full_key), result);
            }
        }
        Value::String(s) => {
            if let Some(key) = prefix {
                result.insert(key.to_string(), s.clone());
            }
        }
        _ => {
            if let Some(key) = prefix {
                result.insert(key.to_string(), value.to_string());
            }
        }
    }
}
