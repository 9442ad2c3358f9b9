//! Diagram model: the element tree shared by the layout engine, the
//! geometry commands, and marker navigation.
//!
//! The model owns the elements; lookups resolve ids by walking the tree.
//! Unresolvable ids are dropped by the callers, never raised as errors.

pub mod collab;
pub mod element;

pub use collab::{
    Capabilities, ElementAndBounds, ElementMove, KindCapabilities, MovementValidator,
    OperationSink, RecordingSink, SelectionProvider, StaticSelection, UnrestrictedMovement,
};
pub use element::{ElementId, ElementKind, LayoutData, ModelElement};

use serde::{Deserialize, Serialize};

use crate::geometry::Bounds;

/// The diagram model: root elements in document order
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DiagramModel {
    pub roots: Vec<ModelElement>,
}

impl DiagramModel {
    pub fn new(roots: Vec<ModelElement>) -> Self {
        Self { roots }
    }

    /// Look up an element by id anywhere in the tree
    pub fn get(&self, id: &ElementId) -> Option<&ModelElement> {
        find_in(&self.roots, id)
    }

    /// Mutable lookup by id
    pub fn get_mut(&mut self, id: &ElementId) -> Option<&mut ModelElement> {
        find_in_mut(&mut self.roots, id)
    }

    /// Resolve a list of ids to elements, dropping unresolvable ids
    /// while preserving the input order.
    pub fn resolve_ids<'a>(&'a self, ids: &[ElementId]) -> Vec<&'a ModelElement> {
        ids.iter().filter_map(|id| self.get(id)).collect()
    }

    /// Current bounds of an element, if it has any
    pub fn bounds_of(&self, id: &ElementId) -> Option<Bounds> {
        self.get(id).and_then(|e| e.bounds)
    }

    /// Write an element's bounds. Unresolvable ids are ignored.
    pub fn set_bounds(&mut self, id: &ElementId, bounds: Bounds) {
        if let Some(elem) = self.get_mut(id) {
            elem.bounds = Some(bounds);
        }
    }

    /// Visit every element in the tree, depth-first in document order
    pub fn for_each(&self, mut visit: impl FnMut(&ModelElement)) {
        fn walk(elements: &[ModelElement], visit: &mut impl FnMut(&ModelElement)) {
            for elem in elements {
                visit(elem);
                walk(&elem.children, visit);
            }
        }
        walk(&self.roots, &mut visit);
    }

    /// Ids of all container elements, deepest first. Laying out in this
    /// order lets a single-level pass handle nested containers.
    pub fn containers_bottom_up(&self) -> Vec<ElementId> {
        fn walk(elements: &[ModelElement], out: &mut Vec<ElementId>) {
            for elem in elements {
                walk(&elem.children, out);
                if elem.kind == ElementKind::Container {
                    out.push(elem.id.clone());
                }
            }
        }
        let mut out = vec![];
        walk(&self.roots, &mut out);
        out
    }
}

fn find_in<'a>(elements: &'a [ModelElement], id: &ElementId) -> Option<&'a ModelElement> {
    for elem in elements {
        if &elem.id == id {
            return Some(elem);
        }
        if let Some(found) = find_in(&elem.children, id) {
            return Some(found);
        }
    }
    None
}

fn find_in_mut<'a>(elements: &'a mut [ModelElement], id: &ElementId) -> Option<&'a mut ModelElement> {
    for elem in elements.iter_mut() {
        if &elem.id == id {
            return Some(elem);
        }
        if !elem.children.is_empty() {
            if let Some(found) = find_in_mut(&mut elem.children, id) {
                return Some(found);
            }
        }
    }
    None
}
