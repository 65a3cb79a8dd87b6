//! Dot-path addressing into JSON-like documents
//!
//! A path is a sequence of segments separated by `.`, where a segment is a
//! bare identifier optionally followed by bracketed indices: `package.version`,
//! `items[0].version`, `[2].child`. Empty segments are skipped, so leading,
//! trailing, and doubled separators are tolerated.
//!
//! The addressor patches known-shape documents: `set` never creates
//! intermediate containers, so a missing or mistyped intermediate node fails
//! loudly instead of silently growing structure.

use crate::error::{Result, SemrelError};
use serde_json::Value;

/// One step of a parsed path expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathStep {
    /// Mapping key access, e.g. `version`
    Field(String),
    /// Sequence index access, e.g. `[3]`
    Index(usize),
}

impl std::fmt::Display for PathStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathStep::Field(name) => write!(f, "{}", name),
            PathStep::Index(n) => write!(f, "[{}]", n),
        }
    }
}

/// Tokenize a dot-path string into field and index steps.
///
/// A bracket group that is not exactly `[digits]` is literal field text, so
/// `a[x]` parses as the single field `a[x]` while `a[3]` parses as the field
/// `a` followed by index `3`.
pub fn parse_path(path: &str) -> Vec<PathStep> {
    let mut steps = Vec::new();
    for segment in path.split('.') {
        if segment.is_empty() {
            continue;
        }
        parse_segment(segment, &mut steps);
    }
    steps
}

fn parse_segment(segment: &str, steps: &mut Vec<PathStep>) {
    let mut field = String::new();
    let mut rest = segment;

    while !rest.is_empty() {
        if let Some(index) = leading_index(rest) {
            if !field.is_empty() {
                steps.push(PathStep::Field(std::mem::take(&mut field)));
            }
            steps.push(PathStep::Index(index.0));
            rest = &rest[index.1..];
            continue;
        }
        let mut chars = rest.chars();
        if let Some(c) = chars.next() {
            field.push(c);
        }
        rest = chars.as_str();
    }

    if !field.is_empty() {
        steps.push(PathStep::Field(field));
    }
}

/// If `input` starts with `[digits]`, return the index and the byte length
/// of the bracket group consumed.
fn leading_index(input: &str) -> Option<(usize, usize)> {
    let body = input.strip_prefix('[')?;
    let end = body.find(']')?;
    let digits = &body[..end];
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let index = digits.parse::<usize>().ok()?;
    Some((index, end + 2))
}

static NULL: Value = Value::Null;

/// Read the value at `path` inside `root`.
///
/// A missing mapping key yields JSON null rather than an error; a field step
/// applied to a non-mapping or an index step applied to a non-sequence fails
/// with [SemrelError::InvalidPathTarget], and an out-of-bounds index fails
/// with [SemrelError::IndexOutOfRange]. An empty path returns the root.
pub fn get<'a>(root: &'a Value, path: &str) -> Result<&'a Value> {
    let mut current = root;
    for step in parse_path(path) {
        current = descend(current, &step)?;
    }
    Ok(current)
}

fn descend<'a>(current: &'a Value, step: &PathStep) -> Result<&'a Value> {
    match step {
        PathStep::Field(name) => match current {
            Value::Object(map) => Ok(map.get(name).unwrap_or(&NULL)),
            other => Err(SemrelError::path_target(name.clone(), other)),
        },
        PathStep::Index(n) => match current {
            Value::Array(items) => items
                .get(*n)
                .ok_or_else(|| SemrelError::index_out_of_range(*n, items.len())),
            other => Err(SemrelError::path_target(step.to_string(), other)),
        },
    }
}

/// Write `new_value` at `path` inside `root`, mutating in place.
///
/// Identical traversal to [get] except that the final step assigns into the
/// mapping key or sequence slot. Every non-final step must already exist;
/// absence or a type mismatch fails with the same errors as [get]. An empty
/// path is rejected.
pub fn set(root: &mut Value, path: &str, new_value: Value) -> Result<()> {
    let steps = parse_path(path);
    let Some((last, prefix)) = steps.split_last() else {
        return Err(SemrelError::config("set requires a non-empty dot path"));
    };

    let mut current = root;
    for step in prefix {
        current = descend_mut(current, step)?;
    }

    match last {
        PathStep::Field(name) => match current {
            Value::Object(map) => {
                map.insert(name.clone(), new_value);
                Ok(())
            }
            other => Err(SemrelError::path_target(name.clone(), other)),
        },
        PathStep::Index(n) => match current {
            Value::Array(items) => {
                let len = items.len();
                match items.get_mut(*n) {
                    Some(slot) => {
                        *slot = new_value;
                        Ok(())
                    }
                    None => Err(SemrelError::index_out_of_range(*n, len)),
                }
            }
            other => Err(SemrelError::path_target(last.to_string(), other)),
        },
    }
}

fn descend_mut<'a>(current: &'a mut Value, step: &PathStep) -> Result<&'a mut Value> {
    match step {
        PathStep::Field(name) => match current {
            Value::Object(map) => map.get_mut(name).ok_or_else(|| {
                SemrelError::path_target(name.clone(), &NULL)
            }),
            other => Err(SemrelError::path_target(name.clone(), other)),
        },
        PathStep::Index(n) => match current {
            Value::Array(items) => {
                let len = items.len();
                items
                    .get_mut(*n)
                    .ok_or_else(|| SemrelError::index_out_of_range(*n, len))
            }
            other => Err(SemrelError::path_target(step.to_string(), other)),
        },
    }
}
