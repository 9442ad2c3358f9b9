//! Align a batch of elements to a common edge.

use log::debug;

use super::batch::BoundsChange;
use super::operation::{Alignment, GeometryOperation, SelectFunction};
use super::{emit, resolve_targets, CommandContext, CommandState};
use crate::geometry::Bounds;
use crate::model::{DiagramModel, ElementId};

/// Align every qualifying element so that its edge (or center) lands on
/// a reference coordinate. The selection policy narrows the subset used
/// to *compute* the reference; all qualifying elements move.
#[derive(Debug, Clone, Default)]
pub struct AlignCommand {
    element_ids: Vec<ElementId>,
    alignment: Alignment,
    select: SelectFunction,
    state: CommandState,
}

impl AlignCommand {
    /// A new command over an explicit id list; an empty list targets the
    /// current selection at execution time.
    pub fn new(element_ids: Vec<ElementId>, alignment: Alignment, select: SelectFunction) -> Self {
        Self {
            element_ids,
            alignment,
            select,
            state: CommandState::Created,
        }
    }

    pub fn state(&self) -> CommandState {
        self.state
    }

    /// The durable operation record for this command
    pub fn operation(&self) -> GeometryOperation {
        GeometryOperation::Align {
            element_ids: self.element_ids.clone(),
            alignment: self.alignment,
            select: self.select,
        }
    }

    /// Execute the alignment
    pub fn execute(
        &mut self,
        model: &mut DiagramModel,
        context: &mut CommandContext<'_>,
    ) -> Vec<BoundsChange> {
        self.state = CommandState::Executed;

        let targets = resolve_targets(model, &self.element_ids, context.selection, |element| {
            context.capabilities.is_bounds_aware_moveable(element)
        });
        if targets.is_empty() {
            debug!("align: no moveable targets, no-op");
            return vec![];
        }

        let subset: Vec<Bounds> = self
            .select
            .select(&targets)
            .iter()
            .map(|(_, bounds)| *bounds)
            .collect();
        let reference = reference_coordinate(self.alignment, &subset);

        let proposed = targets
            .iter()
            .map(|(id, old)| {
                let mut new = *old;
                match self.alignment {
                    Alignment::Left => new.x = reference,
                    Alignment::Right => new.x = reference - old.width,
                    Alignment::Center => new.x = reference - 0.5 * old.width,
                    Alignment::Top => new.y = reference,
                    Alignment::Bottom => new.y = reference - old.height,
                    Alignment::Middle => new.y = reference - 0.5 * old.height,
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

    /// Pass-through, like [`undo`](AlignCommand::undo)
    pub fn redo<'m>(&mut self, model: &'m mut DiagramModel) -> &'m mut DiagramModel {
        self.state = CommandState::Redone;
        model
    }
}

/// One reference coordinate from the selected subset: min/max of the
/// relevant edge, or the midpoint of the two for Center/Middle.
fn reference_coordinate(alignment: Alignment, subset: &[Bounds]) -> f64 {
    let min = |values: &mut dyn Iterator<Item = f64>| values.fold(f64::INFINITY, f64::min);
    let max = |values: &mut dyn Iterator<Item = f64>| values.fold(f64::NEG_INFINITY, f64::max);
    match alignment {
        Alignment::Left => min(&mut subset.iter().map(|b| b.x)),
        Alignment::Right => max(&mut subset.iter().map(|b| b.right())),
        Alignment::Center => {
            let left = min(&mut subset.iter().map(|b| b.x));
            let right = max(&mut subset.iter().map(|b| b.right()));
            0.5 * (left + right)
        }
        Alignment::Top => min(&mut subset.iter().map(|b| b.y)),
        Alignment::Bottom => max(&mut subset.iter().map(|b| b.bottom())),
        Alignment::Middle => {
            let top = min(&mut subset.iter().map(|b| b.y));
            let bottom = max(&mut subset.iter().map(|b| b.bottom()));
            0.5 * (top + bottom)
        }
    }
}
