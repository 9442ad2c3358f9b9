//! Collaborator contracts consumed by the command subsystem.
//!
//! The surrounding editor supplies these: which elements are selected,
//! which movements are permitted, where emitted operation batches go,
//! and how elements are classified. They are passed as explicit
//! parameters rather than resolved from an ambient container.

use serde::{Deserialize, Serialize};

use crate::command::batch::DispatchBatch;
use crate::geometry::{Point, Size};
use crate::model::element::{ElementId, ElementKind, ModelElement};

/// Wire-level bounds delta: the new position and size of one element.
/// Together with [`ElementMove`] these are the only artifacts that cross
/// the core boundary towards the external authority and the local view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementAndBounds {
    pub element_id: ElementId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_position: Option<Point>,
    pub new_size: Size,
}

/// Wire-level position delta for one element
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementMove {
    pub element_id: ElementId,
    pub from_position: Point,
    pub to_position: Point,
}

/// Source of the current selection, in selection order
pub trait SelectionProvider {
    fn selected_ids(&self) -> Vec<ElementId>;
}

/// Movement restriction policy. Returns the accepted delta, or `None`
/// to reject the movement entirely. Consulted once per element per batch.
pub trait MovementValidator {
    fn validate(&self, element: &ModelElement, delta: Point) -> Option<Point>;
}

/// Sink for emitted operation batches. Fire-and-forget: the core never
/// consumes a response.
pub trait OperationSink {
    fn dispatch(&mut self, batch: DispatchBatch);
}

/// Boolean element classification supplied by the surrounding type system
pub trait Capabilities {
    fn is_resizable(&self, element: &ModelElement) -> bool;
    fn is_bounds_aware_moveable(&self, element: &ModelElement) -> bool;
    fn is_layoutable_child(&self, element: &ModelElement) -> bool;
}

/// A fixed selection, mainly for tests and the CLI
#[derive(Debug, Clone, Default)]
pub struct StaticSelection(pub Vec<ElementId>);

impl SelectionProvider for StaticSelection {
    fn selected_ids(&self) -> Vec<ElementId> {
        self.0.clone()
    }
}

/// Accepts every movement unchanged
#[derive(Debug, Clone, Copy, Default)]
pub struct UnrestrictedMovement;

impl MovementValidator for UnrestrictedMovement {
    fn validate(&self, _element: &ModelElement, delta: Point) -> Option<Point> {
        Some(delta)
    }
}

/// Records dispatched batches for inspection
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub batches: Vec<DispatchBatch>,
}

impl OperationSink for RecordingSink {
    fn dispatch(&mut self, batch: DispatchBatch) {
        self.batches.push(batch);
    }
}

/// Capability classification by element kind: nodes and containers are
/// resizable and moveable, labels only move, edges do neither.
#[derive(Debug, Clone, Copy, Default)]
pub struct KindCapabilities;

impl Capabilities for KindCapabilities {
    fn is_resizable(&self, element: &ModelElement) -> bool {
        matches!(element.kind, ElementKind::Node | ElementKind::Container)
    }

    fn is_bounds_aware_moveable(&self, element: &ModelElement) -> bool {
        matches!(
            element.kind,
            ElementKind::Node | ElementKind::Container | ElementKind::Label
        )
    }

    fn is_layoutable_child(&self, element: &ModelElement) -> bool {
        element.kind != ElementKind::Edge
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_capabilities() {
        let caps = KindCapabilities;
        let node = ModelElement::new("n", ElementKind::Node);
        let edge = ModelElement::new("e", ElementKind::Edge);
        let label = ModelElement::new("l", ElementKind::Label);

        assert!(caps.is_resizable(&node));
        assert!(!caps.is_resizable(&edge));
        assert!(!caps.is_resizable(&label));
        assert!(caps.is_bounds_aware_moveable(&label));
        assert!(!caps.is_layoutable_child(&edge));
    }

    #[test]
    fn test_unrestricted_movement_passes_delta() {
        let node = ModelElement::new("n", ElementKind::Node);
        let delta = Point::new(3.0, -2.0);
        assert_eq!(UnrestrictedMovement.validate(&node, delta), Some(delta));
    }
}
