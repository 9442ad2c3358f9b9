//! Geometry operations and their named policy functions.
//!
//! Reduction and selection policies are tagged enum values, never
//! closures: an operation record stores the policy *identity* and the
//! executing command resolves it through a fixed lookup, so recorded
//! operations stay replayable across undo/redo and any persistence
//! boundary.

use serde::{Deserialize, Serialize};

use crate::model::ElementId;

/// Which dimensions a resize targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    Width,
    Height,
    Both,
}

impl Dimension {
    pub fn affects_width(&self) -> bool {
        matches!(self, Dimension::Width | Dimension::Both)
    }

    pub fn affects_height(&self) -> bool {
        matches!(self, Dimension::Height | Dimension::Both)
    }
}

/// Named reduction: maps the current values across a batch to the one
/// target value every element receives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReduceFunction {
    Min,
    Max,
    Average,
    First,
    Last,
}

impl ReduceFunction {
    /// Apply the policy to a value list. `None` for an empty list.
    pub fn apply(&self, values: &[f64]) -> Option<f64> {
        if values.is_empty() {
            return None;
        }
        let result = match self {
            ReduceFunction::Min => values.iter().cloned().fold(f64::INFINITY, f64::min),
            ReduceFunction::Max => values.iter().cloned().fold(f64::NEG_INFINITY, f64::max),
            ReduceFunction::Average => values.iter().sum::<f64>() / values.len() as f64,
            ReduceFunction::First => values[0],
            ReduceFunction::Last => values[values.len() - 1],
        };
        Some(result)
    }
}

/// Named selection: narrows the candidates used to compute an alignment
/// reference, decoupled from the set that moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectFunction {
    #[default]
    All,
    First,
    Last,
}

impl SelectFunction {
    /// Narrow a candidate slice according to the policy
    pub fn select<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        match self {
            SelectFunction::All => items,
            SelectFunction::First => items.get(..1).unwrap_or(items),
            SelectFunction::Last => {
                if items.is_empty() {
                    items
                } else {
                    &items[items.len() - 1..]
                }
            }
        }
    }
}

/// Alignment edge policies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
    Top,
    Middle,
    Bottom,
}

/// A durable, replayable geometry operation record. Created when a user
/// command fires; never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GeometryOperation {
    Resize {
        element_ids: Vec<ElementId>,
        dimension: Dimension,
        reduce: ReduceFunction,
    },
    Align {
        element_ids: Vec<ElementId>,
        alignment: Alignment,
        select: SelectFunction,
    },
}
