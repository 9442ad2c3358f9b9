//! Integration tests for the geometry command subsystem

use pretty_assertions::{assert_eq, assert_ne};

use diagram_editor::geometry::{Bounds, Point};
use diagram_editor::model::{ModelElement as Element, MovementValidator};
use diagram_editor::{
    AlignCommand, Alignment, DiagramModel, Dimension, Editor, EditorConfig, ElementKind,
    GeometryOperation, ModelElement, ReduceFunction, SelectFunction,
};

fn node(id: &str, x: f64, y: f64, w: f64, h: f64) -> ModelElement {
    ModelElement::new(id, ElementKind::Node).with_bounds(Bounds::new(x, y, w, h))
}

fn three_nodes() -> DiagramModel {
    DiagramModel::new(vec![
        node("a", 10.0, 10.0, 20.0, 10.0),
        node("b", 40.0, 30.0, 30.0, 20.0),
        node("c", 25.0, 60.0, 10.0, 40.0),
    ])
}

fn all_ids() -> Vec<diagram_editor::ElementId> {
    vec!["a".into(), "b".into(), "c".into()]
}

#[test]
fn resize_width_to_max_preserves_centers() {
    let mut editor = Editor::new(three_nodes(), EditorConfig::default());
    let centers: Vec<Point> = ["a", "b", "c"]
        .iter()
        .map(|id| editor.model.bounds_of(&(*id).into()).unwrap().center())
        .collect();

    let changed = editor.execute(GeometryOperation::Resize {
        element_ids: all_ids(),
        dimension: Dimension::Width,
        reduce: ReduceFunction::Max,
    });
    assert_eq!(changed, 3);

    for (i, id) in ["a", "b", "c"].iter().enumerate() {
        let bounds = editor.model.bounds_of(&(*id).into()).unwrap();
        assert_eq!(bounds.width, 30.0);
        assert_eq!(bounds.center(), centers[i]);
    }
}

#[test]
fn align_left_equalizes_left_edges() {
    let mut editor = Editor::new(three_nodes(), EditorConfig::default());
    editor.execute(GeometryOperation::Align {
        element_ids: all_ids(),
        alignment: Alignment::Left,
        select: SelectFunction::All,
    });

    let xs: Vec<f64> = ["a", "b", "c"]
        .iter()
        .map(|id| editor.model.bounds_of(&(*id).into()).unwrap().x)
        .collect();
    assert!(xs.iter().all(|x| *x == xs[0]));
}

#[test]
fn align_defaults_are_left_all_empty() {
    let command = AlignCommand::default();
    assert_eq!(
        command.operation(),
        GeometryOperation::Align {
            element_ids: vec![],
            alignment: Alignment::Left,
            select: SelectFunction::All,
        }
    );
}

/// Rejects any movement of one specific element
struct PinElement(&'static str);

impl MovementValidator for PinElement {
    fn validate(&self, element: &Element, delta: Point) -> Option<Point> {
        if element.id.as_str() == self.0 {
            None
        } else {
            Some(delta)
        }
    }
}

#[test]
fn rejected_elements_drop_out_without_aborting_the_batch() {
    let mut editor =
        Editor::new(three_nodes(), EditorConfig::default()).with_validator(PinElement("b"));
    let changed = editor.execute(GeometryOperation::Align {
        element_ids: all_ids(),
        alignment: Alignment::Top,
        select: SelectFunction::All,
    });

    // b's delta was rejected; a and c still moved, no rollback
    assert_eq!(changed, 2);
    assert_eq!(editor.model.bounds_of(&"a".into()).unwrap().y, 10.0);
    assert_eq!(editor.model.bounds_of(&"b".into()).unwrap().y, 30.0);
    assert_eq!(editor.model.bounds_of(&"c".into()).unwrap().y, 10.0);
}

#[test]
fn undo_restores_presize_bounds_and_redo_reapplies() {
    let mut editor = Editor::new(three_nodes(), EditorConfig::default());
    let before: Vec<Bounds> = ["a", "b", "c"]
        .iter()
        .map(|id| editor.model.bounds_of(&(*id).into()).unwrap())
        .collect();

    editor.execute(GeometryOperation::Resize {
        element_ids: all_ids(),
        dimension: Dimension::Both,
        reduce: ReduceFunction::Average,
    });
    let after_a = editor.model.bounds_of(&"a".into()).unwrap();
    assert_ne!(after_a, before[0]);

    editor.undo().expect("one command recorded");
    for (i, id) in ["a", "b", "c"].iter().enumerate() {
        assert_eq!(editor.model.bounds_of(&(*id).into()).unwrap(), before[i]);
    }

    editor.redo().expect("undone command is redoable");
    assert_eq!(editor.model.bounds_of(&"a".into()).unwrap(), after_a);
}

#[test]
fn new_command_evicts_redo_tail() {
    let mut editor = Editor::new(three_nodes(), EditorConfig::default());
    editor.execute(GeometryOperation::Align {
        element_ids: all_ids(),
        alignment: Alignment::Left,
        select: SelectFunction::All,
    });
    editor.undo().expect("one command recorded");
    assert!(editor.history.can_redo());

    editor.execute(GeometryOperation::Align {
        element_ids: all_ids(),
        alignment: Alignment::Top,
        select: SelectFunction::All,
    });
    assert!(!editor.history.can_redo());
    assert!(editor.redo().is_none());
}

#[test]
fn operations_round_trip_as_a_json_batch() {
    let operations = vec![
        GeometryOperation::Resize {
            element_ids: vec!["a".into(), "b".into()],
            dimension: Dimension::Width,
            reduce: ReduceFunction::Max,
        },
        GeometryOperation::Align {
            element_ids: vec![],
            alignment: Alignment::Middle,
            select: SelectFunction::First,
        },
    ];
    let json = serde_json::to_string(&operations).expect("operations serialize");
    let back: Vec<GeometryOperation> = serde_json::from_str(&json).expect("operations parse");
    assert_eq!(operations, back);
}

#[test]
fn replayed_operation_matches_original_execution() {
    // The operation record is enough to reproduce a command run
    let operation = GeometryOperation::Resize {
        element_ids: all_ids(),
        dimension: Dimension::Both,
        reduce: ReduceFunction::Min,
    };
    let json = serde_json::to_string(&operation).unwrap();
    let replayed: GeometryOperation = serde_json::from_str(&json).unwrap();

    let mut first = Editor::new(three_nodes(), EditorConfig::default());
    first.execute(operation);
    let mut second = Editor::new(three_nodes(), EditorConfig::default());
    second.execute(replayed);

    for id in ["a", "b", "c"] {
        assert_eq!(
            first.model.bounds_of(&id.into()),
            second.model.bounds_of(&id.into())
        );
    }
}
