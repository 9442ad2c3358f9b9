//! Reversible geometry commands: batch resize and align over the
//! current bounds, emitting one optimistic local update and one
//! authority-bound operation per batch.
//!
//! Command lifecycle is `Created → Executed ⇄ {Undone, Redone}`. The
//! commands' own `undo`/`redo` are pass-throughs: the emitted deltas are
//! independently reversible actions, and the command-history
//! collaborator ([`CommandHistory`]) carries the reversal semantics.

pub mod align;
pub mod batch;
pub mod history;
pub mod operation;
pub mod resize;

pub use align::AlignCommand;
pub use batch::{BoundsChange, DispatchBatch};
pub use history::{CommandHistory, RecordedCommand};
pub use operation::{Alignment, Dimension, GeometryOperation, ReduceFunction, SelectFunction};
pub use resize::ResizeCommand;

use log::debug;

use crate::geometry::Bounds;
use crate::model::{
    Capabilities, DiagramModel, ElementId, ModelElement, MovementValidator, OperationSink,
    SelectionProvider,
};

/// Lifecycle state of one command instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CommandState {
    #[default]
    Created,
    Executed,
    Undone,
    Redone,
}

/// Collaborators a command executes against. Supplied by the caller;
/// command execution is externally serialized (one command at a time).
pub struct CommandContext<'a> {
    pub selection: &'a dyn SelectionProvider,
    pub capabilities: &'a dyn Capabilities,
    pub validator: &'a dyn MovementValidator,
    pub sink: &'a mut dyn OperationSink,
}

/// Resolve a command's targets: the explicit id list, or the current
/// selection when the list is empty (order preserved either way).
/// Unresolvable ids, elements failing the capability predicate, and
/// elements without valid bounds are dropped silently. Returns a bounds
/// snapshot taken at batch-build time.
fn resolve_targets(
    model: &DiagramModel,
    element_ids: &[ElementId],
    selection: &dyn SelectionProvider,
    qualifies: impl Fn(&ModelElement) -> bool,
) -> Vec<(ElementId, Bounds)> {
    let ids = if element_ids.is_empty() {
        selection.selected_ids()
    } else {
        element_ids.to_vec()
    };
    model
        .resolve_ids(&ids)
        .into_iter()
        .filter(|element| qualifies(element))
        .filter_map(|element| {
            let bounds = element.bounds.filter(Bounds::is_valid)?;
            Some((element.id.clone(), bounds))
        })
        .collect()
}

/// Shared execute tail: validate proposals, apply the accepted changes
/// optimistically, and dispatch the mirrored batch to the sink. The
/// batch is partially applicable; an empty accepted list dispatches
/// nothing.
fn emit(
    model: &mut DiagramModel,
    context: &mut CommandContext<'_>,
    operation: GeometryOperation,
    proposed: Vec<BoundsChange>,
) -> Vec<BoundsChange> {
    let accepted = batch::validate_changes(model, proposed, context.validator);
    if accepted.is_empty() {
        debug!("command: no accepted changes, nothing dispatched");
        return accepted;
    }
    batch::apply_changes(model, &accepted);
    context.sink.dispatch(batch::build_batch(operation, &accepted));
    accepted
}
