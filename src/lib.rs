//! Diagram editor core: box layout, reversible geometry commands, and
//! validation-marker navigation.
//!
//! Three cooperating components over a shared geometry/model layer:
//!
//! - [`layout`] computes child positions and sizes inside a container
//!   under padding, gap, alignment and free-space ("grab") rules.
//! - [`command`] executes batch geometry operations (resize to a common
//!   dimension, align to an edge), emitting an optimistic local update
//!   and a mirrored authority-bound operation, with undo/redo carried
//!   by a recorded-delta history.
//! - [`marker`] validates the model and steps through the resulting
//!   issue markers as a circular, comparator-ordered sequence.
//!
//! # Example
//!
//! ```rust
//! use diagram_editor::geometry::Bounds;
//! use diagram_editor::{DiagramModel, Editor, EditorConfig, ElementKind, ModelElement};
//!
//! let model = DiagramModel::new(vec![ModelElement::new("panel", ElementKind::Container)
//!     .with_pref_size(100.0, 100.0)
//!     .with_child(
//!         ModelElement::new("a", ElementKind::Node).with_bounds(Bounds::new(0.0, 0.0, 40.0, 10.0)),
//!     )]);
//!
//! let mut editor = Editor::new(model, EditorConfig::default());
//! editor.layout_all().unwrap();
//! assert!(editor.model.bounds_of(&"a".into()).is_some());
//! ```

pub mod command;
pub mod config;
pub mod editor;
pub mod geometry;
pub mod layout;
pub mod marker;
pub mod model;

pub use command::{
    AlignCommand, Alignment, CommandHistory, Dimension, GeometryOperation, ReduceFunction,
    ResizeCommand, SelectFunction,
};
pub use config::{ConfigError, EditorConfig};
pub use editor::Editor;
pub use layout::{LayoutError, LayoutOptions, LayoutPass};
pub use marker::{IssueMarker, MarkerNavigator, Severity, SeverityFilter};
pub use model::{DiagramModel, ElementId, ElementKind, ModelElement};
