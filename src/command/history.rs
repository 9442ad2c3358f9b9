//! Undo/redo stack over recorded command batches.
//!
//! This is the command-history collaborator the commands delegate their
//! reversal to. Records hold the forward and reverse deltas captured at
//! execution time and are never mutated afterwards; undo and redo reuse
//! the recorded deltas rather than recomputing them.

use log::debug;

use super::batch::BoundsChange;
use super::operation::GeometryOperation;
use crate::geometry::Bounds;
use crate::model::{DiagramModel, ElementAndBounds};

/// The immutable record of one executed command batch
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCommand {
    pub operation: GeometryOperation,
    pub forward: Vec<ElementAndBounds>,
    pub reverse: Vec<ElementAndBounds>,
}

impl RecordedCommand {
    /// Build a record from the accepted changes of an execution
    pub fn from_changes(operation: GeometryOperation, accepted: &[BoundsChange]) -> Self {
        Self {
            operation,
            forward: accepted.iter().map(BoundsChange::to_element_and_bounds).collect(),
            reverse: accepted.iter().map(BoundsChange::to_reverse).collect(),
        }
    }
}

/// Append-only undo/redo stack. New forward commands evict the redo
/// tail.
#[derive(Debug, Default)]
pub struct CommandHistory {
    undo_stack: Vec<RecordedCommand>,
    redo_stack: Vec<RecordedCommand>,
}

impl CommandHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an executed command. Clears any redoable tail.
    pub fn push(&mut self, record: RecordedCommand) {
        if !self.redo_stack.is_empty() {
            debug!("history: evicting {} redo record(s)", self.redo_stack.len());
            self.redo_stack.clear();
        }
        self.undo_stack.push(record);
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Apply the most recent record's reverse deltas to the model.
    /// Returns the undone operation, or `None` when there is nothing to
    /// undo.
    pub fn undo(&mut self, model: &mut DiagramModel) -> Option<GeometryOperation> {
        let record = self.undo_stack.pop()?;
        apply_deltas(model, &record.reverse);
        let operation = record.operation.clone();
        self.redo_stack.push(record);
        Some(operation)
    }

    /// Re-apply the most recently undone record's forward deltas
    pub fn redo(&mut self, model: &mut DiagramModel) -> Option<GeometryOperation> {
        let record = self.redo_stack.pop()?;
        apply_deltas(model, &record.forward);
        let operation = record.operation.clone();
        self.undo_stack.push(record);
        Some(operation)
    }
}

/// Apply wire deltas to the model. Deltas without a position update
/// only the size; unresolvable ids are ignored.
fn apply_deltas(model: &mut DiagramModel, deltas: &[ElementAndBounds]) {
    for delta in deltas {
        let Some(element) = model.get_mut(&delta.element_id) else {
            continue;
        };
        let current = element.bounds.unwrap_or_default();
        let position = delta.new_position.unwrap_or_else(|| current.position());
        element.bounds = Some(Bounds::new(
            position.x,
            position.y,
            delta.new_size.width,
            delta.new_size.height,
        ));
    }
}
