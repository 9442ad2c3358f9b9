//! Resize a batch of elements to a common dimension.

use log::debug;

use super::batch::BoundsChange;
use super::operation::{Dimension, GeometryOperation, ReduceFunction};
use super::{emit, resolve_targets, CommandContext, CommandState};
use crate::model::{DiagramModel, ElementId};

/// Resize every qualifying element to the dimension value produced by
/// the reduction policy over the batch's current values. Each element
/// is resized symmetrically about its center.
#[derive(Debug, Clone)]
pub struct ResizeCommand {
    element_ids: Vec<ElementId>,
    dimension: Dimension,
    reduce: ReduceFunction,
    state: CommandState,
}

impl ResizeCommand {
    /// A new command over an explicit id list; an empty list targets the
    /// current selection at execution time.
    pub fn new(element_ids: Vec<ElementId>, dimension: Dimension, reduce: ReduceFunction) -> Self {
        Self {
            element_ids,
            dimension,
            reduce,
            state: CommandState::Created,
        }
    }

    pub fn state(&self) -> CommandState {
        self.state
    }

    /// The durable operation record for this command
    pub fn operation(&self) -> GeometryOperation {
        GeometryOperation::Resize {
            element_ids: self.element_ids.clone(),
            dimension: self.dimension,
            reduce: self.reduce,
        }
    }

    /// Execute the resize. Fewer than two resizable targets is a no-op:
    /// resizing a single element against itself is meaningless.
    pub fn execute(
        &mut self,
        model: &mut DiagramModel,
        context: &mut CommandContext<'_>,
    ) -> Vec<BoundsChange> {
        self.state = CommandState::Executed;

        let targets = resolve_targets(model, &self.element_ids, context.selection, |element| {
            context.capabilities.is_resizable(element)
        });
        if targets.len() < 2 {
            debug!(
                "resize: {} resizable target(s), need at least 2, no-op",
                targets.len()
            );
            return vec![];
        }

        let target_width = self.dimension.affects_width().then(|| {
            let widths: Vec<f64> = targets.iter().map(|(_, b)| b.width).collect();
            self.reduce.apply(&widths)
        });
        let target_height = self.dimension.affects_height().then(|| {
            let heights: Vec<f64> = targets.iter().map(|(_, b)| b.height).collect();
            self.reduce.apply(&heights)
        });

        let proposed = targets
            .iter()
            .map(|(id, old)| {
                let mut new = *old;
                if let Some(Some(width)) = target_width {
                    new.x = old.x - 0.5 * (width - old.width);
                    new.width = width;
                }
                if let Some(Some(height)) = target_height {
                    new.y = old.y - 0.5 * (height - old.height);
                    new.height = height;
                }
                BoundsChange::new(id.clone(), *old, new)
            })
            .collect();

        emit(model, context, self.operation(), proposed)
    }

    /// Pass-through: returns the model unchanged. Reversal of the
    /// emitted deltas is carried by the command-history collaborator.
    pub fn undo<'m>(&mut self, model: &'m mut DiagramModel) -> &'m mut DiagramModel {
        self.state = CommandState::Undone;
        model
    }

    /// Pass-through, like [`undo`](ResizeCommand::undo)
    pub fn redo<'m>(&mut self, model: &'m mut DiagramModel) -> &'m mut DiagramModel {
        self.state = CommandState::Redone;
        model
    }
}
