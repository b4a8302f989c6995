//! # Draft Mutations
//!
//! Field-level and list-level edits against one language's content tree.
//!
//! ## Mutation Semantics
//!
//! ### SetField
//! - Atomic replacement of a scalar (text, number, flag) or an absent optional field
//! - Lists and records are never replaced through SetField; use ReplaceList
//!
//! ### List operations
//! - Append, Insert, RemoveAt, ReplaceList act on the list at `path`
//! - SwapAdjacent exchanges an entry with its neighbour; moving the first entry
//!   up or the last entry down is a no-op
//!
//! Every mutation is checked by rebuilding a ContentTree from the result.
//! A mutation that would break the tree's shape is rejected and leaves the
//! draft as it was.

use crate::path::{ContentPath, Segment};
use folio_content::ContentTree;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum Mutation {
    /// Replace a scalar field or list entry
    SetField { path: ContentPath, value: Value },

    /// Add an entry to the end of a list
    Append { path: ContentPath, item: Value },

    /// Add an entry at `index`, shifting later entries down
    Insert {
        path: ContentPath,
        index: usize,
        item: Value,
    },

    /// Remove the entry at `index`
    RemoveAt { path: ContentPath, index: usize },

    /// Exchange the entry at `index` with its neighbour
    SwapAdjacent {
        path: ContentPath,
        index: usize,
        direction: Direction,
    },

    /// Replace the whole list
    ReplaceList { path: ContentPath, items: Vec<Value> },
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MutationError {
    #[error("Path not found: {0}")]
    PathNotFound(String),

    #[error("Not a list: {0}")]
    NotAList(String),

    #[error("Not a scalar field: {0}")]
    NotAScalar(String),

    #[error("Index {index} out of bounds for {path} (length {len})")]
    IndexOutOfBounds {
        path: String,
        index: usize,
        len: usize,
    },

    #[error("Unknown field: {0}")]
    UnknownField(String),

    #[error("Invalid structure: {0}")]
    InvalidStructure(String),
}

impl Mutation {
    pub fn path(&self) -> &ContentPath {
        match self {
            Mutation::SetField { path, .. }
            | Mutation::Append { path, .. }
            | Mutation::Insert { path, .. }
            | Mutation::RemoveAt { path, .. }
            | Mutation::SwapAdjacent { path, .. }
            | Mutation::ReplaceList { path, .. } => path,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Mutation::SetField { .. } => "set-field",
            Mutation::Append { .. } => "append",
            Mutation::Insert { .. } => "insert",
            Mutation::RemoveAt { .. } => "remove-at",
            Mutation::SwapAdjacent { .. } => "swap-adjacent",
            Mutation::ReplaceList { .. } => "replace-list",
        }
    }

    /// Apply to a tree and return the edited copy; `tree` itself is not touched
    pub fn apply(&self, tree: &ContentTree) -> Result<ContentTree, MutationError> {
        let mut working = serde_json::to_value(tree)
            .map_err(|e| MutationError::InvalidStructure(e.to_string()))?;

        match self {
            Mutation::SetField { path, value } => Self::apply_set(&mut working, path, value)?,

            Mutation::Append { path, item } => {
                Self::list_mut(&mut working, path)?.push(item.clone());
            }

            Mutation::Insert { path, index, item } => {
                let list = Self::list_mut(&mut working, path)?;
                if *index > list.len() {
                    return Err(out_of_bounds(path, *index, list.len()));
                }
                list.insert(*index, item.clone());
            }

            Mutation::RemoveAt { path, index } => {
                let list = Self::list_mut(&mut working, path)?;
                if *index >= list.len() {
                    return Err(out_of_bounds(path, *index, list.len()));
                }
                list.remove(*index);
            }

            Mutation::SwapAdjacent {
                path,
                index,
                direction,
            } => {
                let list = Self::list_mut(&mut working, path)?;
                if *index >= list.len() {
                    return Err(out_of_bounds(path, *index, list.len()));
                }
                let neighbour = match direction {
                    Direction::Up => index.checked_sub(1),
                    Direction::Down => Some(index + 1).filter(|n| *n < list.len()),
                };
                if let Some(neighbour) = neighbour {
                    list.swap(*index, neighbour);
                }
            }

            Mutation::ReplaceList { path, items } => {
                *Self::list_mut(&mut working, path)? = items.clone();
            }
        }

        Self::rebuild(working, self.path())
    }

    fn apply_set(working: &mut Value, path: &ContentPath, value: &Value) -> Result<(), MutationError> {
        if !is_scalar(value) {
            return Err(MutationError::NotAScalar(path.to_string()));
        }

        let (parent_path, last) = path
            .split_last()
            .ok_or_else(|| MutationError::PathNotFound(path.to_string()))?;
        let parent = parent_path
            .lookup_mut(working)
            .ok_or_else(|| MutationError::PathNotFound(path.to_string()))?;

        match (parent, last) {
            (Value::Object(fields), Segment::Key(key)) => {
                if fields.get(key).is_some_and(|existing| !is_scalar(existing)) {
                    return Err(MutationError::NotAScalar(path.to_string()));
                }
                // Absent keys are allowed here so optional fields can be filled in;
                // unknown ones are caught by `rebuild`.
                fields.insert(key.clone(), value.clone());
                Ok(())
            }
            (Value::Array(items), Segment::Index(index)) => {
                let len = items.len();
                let slot = items
                    .get_mut(*index)
                    .ok_or_else(|| out_of_bounds(&parent_path, *index, len))?;
                if !is_scalar(slot) {
                    return Err(MutationError::NotAScalar(path.to_string()));
                }
                *slot = value.clone();
                Ok(())
            }
            _ => Err(MutationError::PathNotFound(path.to_string())),
        }
    }

    fn list_mut<'a>(working: &'a mut Value, path: &ContentPath) -> Result<&'a mut Vec<Value>, MutationError> {
        match path.lookup_mut(working) {
            Some(Value::Array(items)) => Ok(items),
            Some(_) => Err(MutationError::NotAList(path.to_string())),
            None => Err(MutationError::PathNotFound(path.to_string())),
        }
    }

    /// Turn the edited JSON back into a tree, rejecting anything that does not
    /// survive the trip unchanged (wrong types, misspelled keys).
    fn rebuild(working: Value, path: &ContentPath) -> Result<ContentTree, MutationError> {
        let tree: ContentTree = serde_json::from_value(working.clone())
            .map_err(|e| MutationError::InvalidStructure(format!("{}: {}", path, e)))?;

        let rebuilt = serde_json::to_value(&tree)
            .map_err(|e| MutationError::InvalidStructure(e.to_string()))?;
        if rebuilt != strip_nulls(working) {
            return Err(MutationError::UnknownField(path.to_string()));
        }

        Ok(tree)
    }
}

fn is_scalar(value: &Value) -> bool {
    !matches!(value, Value::Array(_) | Value::Object(_))
}

fn out_of_bounds(path: &ContentPath, index: usize, len: usize) -> MutationError {
    MutationError::IndexOutOfBounds {
        path: path.to_string(),
        index,
        len,
    }
}

/// Null object members stand for absent optional fields, which serialize as omitted
fn strip_nulls(value: Value) -> Value {
    match value {
        Value::Object(fields) => Value::Object(
            fields
                .into_iter()
                .filter(|(_, v)| !v.is_null())
                .map(|(k, v)| (k, strip_nulls(v)))
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.into_iter().map(strip_nulls).collect()),
        other => other,
    }
}

/// Result of applying a mutation
#[derive(Debug, Clone, PartialEq)]
pub struct MutationResult {
    /// Draft version after the mutation
    pub version: u64,
}
