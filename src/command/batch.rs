//! Shared propose-then-validate machinery for geometry commands.
//!
//! Both resize and align build [`BoundsChange`] proposals from one
//! bounds snapshot, run them through [`validate_changes`], and derive
//! the local-view deltas and the authority-bound batch from the same
//! accepted list, so the two artifacts cannot diverge.

use log::trace;
use serde::{Deserialize, Serialize};

use super::operation::GeometryOperation;
use crate::geometry::{Bounds, Point};
use crate::model::{DiagramModel, ElementAndBounds, ElementId, ElementMove, MovementValidator};

/// A proposed bounds change for one element, carrying the snapshot
/// bounds it was computed from.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundsChange {
    pub element_id: ElementId,
    pub old: Bounds,
    pub new: Bounds,
}

impl BoundsChange {
    pub fn new(element_id: ElementId, old: Bounds, new: Bounds) -> Self {
        Self {
            element_id,
            old,
            new,
        }
    }

    /// Position delta of this change
    pub fn delta(&self) -> Point {
        Point::new(self.new.x - self.old.x, self.new.y - self.old.y)
    }

    /// Forward wire delta
    pub fn to_element_and_bounds(&self) -> ElementAndBounds {
        ElementAndBounds {
            element_id: self.element_id.clone(),
            new_position: Some(self.new.position()),
            new_size: self.new.size(),
        }
    }

    /// Reverse wire delta, restoring the snapshot bounds
    pub fn to_reverse(&self) -> ElementAndBounds {
        ElementAndBounds {
            element_id: self.element_id.clone(),
            new_position: Some(self.old.position()),
            new_size: self.old.size(),
        }
    }

    /// Move delta, if the position actually changed
    pub fn to_move(&self) -> Option<ElementMove> {
        if self.old.position() == self.new.position() {
            return None;
        }
        Some(ElementMove {
            element_id: self.element_id.clone(),
            from_position: self.old.position(),
            to_position: self.new.position(),
        })
    }
}

/// The batch handed to the operation sink: local-view deltas plus the
/// mirrored authority-bound operation record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DispatchBatch {
    pub changes: Vec<ElementAndBounds>,
    pub moves: Vec<ElementMove>,
    pub operation: GeometryOperation,
}

/// Run proposals through the movement restriction policy. Every element
/// is validated against its own snapshot bounds, never against partial
/// results from earlier elements in the same batch. Rejected deltas are
/// dropped; accepted-but-adjusted deltas are applied to the proposal.
pub fn validate_changes(
    model: &DiagramModel,
    proposed: Vec<BoundsChange>,
    validator: &dyn MovementValidator,
) -> Vec<BoundsChange> {
    proposed
        .into_iter()
        .filter_map(|change| {
            let element = model.get(&change.element_id)?;
            let accepted = validator.validate(element, change.delta())?;
            trace!(
                "batch: '{}' delta accepted ({:.1},{:.1})",
                change.element_id,
                accepted.x,
                accepted.y
            );
            let new = change
                .old
                .translate(accepted)
                .with_size(change.new.size());
            Some(BoundsChange::new(change.element_id, change.old, new))
        })
        .collect()
}

/// Build the sink batch from the accepted changes
pub fn build_batch(operation: GeometryOperation, accepted: &[BoundsChange]) -> DispatchBatch {
    DispatchBatch {
        changes: accepted.iter().map(BoundsChange::to_element_and_bounds).collect(),
        moves: accepted.iter().filter_map(BoundsChange::to_move).collect(),
        operation,
    }
}

/// Apply accepted changes optimistically to the in-memory model
pub fn apply_changes(model: &mut DiagramModel, accepted: &[BoundsChange]) {
    for change in accepted {
        model.set_bounds(&change.element_id, change.new);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ElementKind, ModelElement, UnrestrictedMovement};

    struct RejectAll;

    impl MovementValidator for RejectAll {
        fn validate(&self, _element: &ModelElement, _delta: Point) -> Option<Point> {
            None
        }
    }

    fn model_with(id: &str, bounds: Bounds) -> DiagramModel {
        DiagramModel::new(vec![
            ModelElement::new(id, ElementKind::Node).with_bounds(bounds)
        ])
    }

    #[test]
    fn test_accepted_change_keeps_proposal() {
        let old = Bounds::new(0.0, 0.0, 10.0, 10.0);
        let new = Bounds::new(5.0, 0.0, 20.0, 10.0);
        let model = model_with("a", old);
        let accepted = validate_changes(
            &model,
            vec![BoundsChange::new("a".into(), old, new)],
            &UnrestrictedMovement,
        );
        assert_eq!(accepted.len(), 1);
        assert_eq!(accepted[0].new, new);
    }

    #[test]
    fn test_rejected_change_dropped() {
        let old = Bounds::new(0.0, 0.0, 10.0, 10.0);
        let model = model_with("a", old);
        let accepted = validate_changes(
            &model,
            vec![BoundsChange::new(
                "a".into(),
                old,
                Bounds::new(5.0, 5.0, 10.0, 10.0),
            )],
            &RejectAll,
        );
        assert!(accepted.is_empty());
    }

    #[test]
    fn test_unresolvable_id_dropped() {
        let model = model_with("a", Bounds::zero());
        let accepted = validate_changes(
            &model,
            vec![BoundsChange::new(
                "ghost".into(),
                Bounds::zero(),
                Bounds::new(1.0, 1.0, 0.0, 0.0),
            )],
            &UnrestrictedMovement,
        );
        assert!(accepted.is_empty());
    }

    #[test]
    fn test_move_only_when_position_changes() {
        let old = Bounds::new(0.0, 0.0, 10.0, 10.0);
        let resized_in_place = BoundsChange::new("a".into(), old, old.with_size(old.size()));
        assert!(resized_in_place.to_move().is_none());

        let moved = BoundsChange::new("a".into(), old, old.translate(Point::new(3.0, 0.0)));
        let mv = moved.to_move().unwrap();
        assert_eq!(mv.from_position, Point::new(0.0, 0.0));
        assert_eq!(mv.to_position, Point::new(3.0, 0.0));
    }

    #[test]
    fn test_reverse_restores_snapshot() {
        let old = Bounds::new(1.0, 2.0, 3.0, 4.0);
        let new = Bounds::new(5.0, 6.0, 7.0, 8.0);
        let change = BoundsChange::new("a".into(), old, new);
        let reverse = change.to_reverse();
        assert_eq!(reverse.new_position, Some(old.position()));
        assert_eq!(reverse.new_size, old.size());
    }
}
