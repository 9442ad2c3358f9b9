//! Editor facade: the single command-processing point.
//!
//! Owns the model, the command history, and the collaborator handles,
//! and wires them together: executed operations are dispatched to the
//! sink and recorded for undo/redo, layout passes run bottom-up over
//! nested containers, and validation produces the markers the navigator
//! walks.

use log::debug;

use crate::command::{
    AlignCommand, CommandContext, CommandHistory, GeometryOperation, RecordedCommand,
    ResizeCommand,
};
use crate::config::EditorConfig;
use crate::layout::{LayoutError, LayoutPass};
use crate::marker::{self, IssueMarker};
use crate::model::{
    Capabilities, DiagramModel, ElementAndBounds, ElementId, KindCapabilities, ModelElement,
    MovementValidator, OperationSink, RecordingSink, SelectionProvider, StaticSelection,
    UnrestrictedMovement,
};

/// The diagram editor core: model, history, collaborators
pub struct Editor {
    pub model: DiagramModel,
    pub history: CommandHistory,
    config: EditorConfig,
    selection: Box<dyn SelectionProvider>,
    capabilities: Box<dyn Capabilities>,
    validator: Box<dyn MovementValidator>,
    sink: Box<dyn OperationSink>,
}

impl Editor {
    /// An editor over a model with default collaborators: empty
    /// selection, kind-based capabilities, unrestricted movement, and a
    /// recording sink.
    pub fn new(model: DiagramModel, config: EditorConfig) -> Self {
        Self {
            model,
            history: CommandHistory::new(),
            config,
            selection: Box::new(StaticSelection::default()),
            capabilities: Box::new(KindCapabilities),
            validator: Box::new(UnrestrictedMovement),
            sink: Box::new(RecordingSink::default()),
        }
    }

    /// Replace the selection provider
    pub fn with_selection(mut self, selection: impl SelectionProvider + 'static) -> Self {
        self.selection = Box::new(selection);
        self
    }

    /// Replace the capability classification
    pub fn with_capabilities(mut self, capabilities: impl Capabilities + 'static) -> Self {
        self.capabilities = Box::new(capabilities);
        self
    }

    /// Replace the movement restriction policy
    pub fn with_validator(mut self, validator: impl MovementValidator + 'static) -> Self {
        self.validator = Box::new(validator);
        self
    }

    /// Replace the operation sink
    pub fn with_sink(mut self, sink: impl OperationSink + 'static) -> Self {
        self.sink = Box::new(sink);
        self
    }

    /// Execute a geometry operation: run the matching command, dispatch
    /// its batch, and record it for undo/redo. Returns the number of
    /// elements actually changed.
    pub fn execute(&mut self, operation: GeometryOperation) -> usize {
        let mut context = CommandContext {
            selection: self.selection.as_ref(),
            capabilities: self.capabilities.as_ref(),
            validator: self.validator.as_ref(),
            sink: self.sink.as_mut(),
        };
        let accepted = match &operation {
            GeometryOperation::Resize {
                element_ids,
                dimension,
                reduce,
            } => ResizeCommand::new(element_ids.clone(), *dimension, *reduce)
                .execute(&mut self.model, &mut context),
            GeometryOperation::Align {
                element_ids,
                alignment,
                select,
            } => AlignCommand::new(element_ids.clone(), *alignment, *select)
                .execute(&mut self.model, &mut context),
        };
        if accepted.is_empty() {
            return 0;
        }
        self.history
            .push(RecordedCommand::from_changes(operation, &accepted));
        accepted.len()
    }

    /// Undo the most recent command via the history collaborator
    pub fn undo(&mut self) -> Option<GeometryOperation> {
        self.history.undo(&mut self.model)
    }

    /// Redo the most recently undone command
    pub fn redo(&mut self) -> Option<GeometryOperation> {
        self.history.redo(&mut self.model)
    }

    /// Run one layout pass over every container, deepest first, and
    /// commit the results. Returns the committed bounds deltas.
    pub fn layout_all(&mut self) -> Result<Vec<ElementAndBounds>, LayoutError> {
        let mut pass = LayoutPass::new(self.config.layout.clone());
        for container_id in self.model.containers_bottom_up() {
            pass.layout_container(&self.model, &container_id, self.capabilities.as_ref())?;
        }
        let changes = pass.commit(&mut self.model);
        debug!("layout: committed {} change(s)", changes.len());
        Ok(changes)
    }

    /// Run one layout pass over a single container
    pub fn layout_container(
        &mut self,
        container_id: &ElementId,
    ) -> Result<Vec<ElementAndBounds>, LayoutError> {
        let mut pass = LayoutPass::new(self.config.layout.clone());
        pass.layout_container(&self.model, container_id, self.capabilities.as_ref())?;
        Ok(pass.commit(&mut self.model))
    }

    /// Validate the model, producing markers for navigation
    pub fn validate(&self) -> Vec<IssueMarker> {
        marker::check(&self.model)
    }

    /// Render the element tree with bounds as an indented listing
    pub fn debug_tree(&self) -> String {
        fn write_tree(out: &mut String, elem: &ModelElement, depth: usize) {
            let indent = "  ".repeat(depth);
            match elem.bounds {
                Some(b) => out.push_str(&format!(
                    "{}[{}] x={:.1} y={:.1} w={:.1} h={:.1}\n",
                    indent, elem.id, b.x, b.y, b.width, b.height
                )),
                None => out.push_str(&format!("{}[{}] <no bounds>\n", indent, elem.id)),
            }
            for child in &elem.children {
                write_tree(out, child, depth + 1);
            }
        }
        let mut out = String::new();
        for root in &self.model.roots {
            write_tree(&mut out, root, 0);
        }
        out
    }
}
