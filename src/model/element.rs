//! Diagram model elements

use serde::{Deserialize, Serialize};

use crate::geometry::{Bounds, Size};
use crate::layout::LayoutOverrides;

/// Identifier of a model element
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementId(pub String);

impl ElementId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ElementId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ElementId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Classification of a model element, used by the default capability rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementKind {
    /// A plain diagram node (shape)
    Node,
    /// A node that lays out its children
    Container,
    /// A connection between elements
    Edge,
    /// A text label attached to another element
    Label,
}

/// Layout input data, distinct from the visual `bounds` which is layout output
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LayoutData {
    /// Preferred size used as layout input
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pref_size: Option<Size>,
}

/// A node in the diagram model tree
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelElement {
    pub id: ElementId,
    pub kind: ElementKind,

    /// Visual bounds: layout output, absent until first placed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bounds: Option<Bounds>,

    /// Layout input (preferred size)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout: Option<LayoutData>,

    /// Node-local layout option overrides, merged over container defaults
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout_overrides: Option<LayoutOverrides>,

    /// Absorb leftover horizontal free space
    #[serde(default)]
    pub h_grab: bool,

    /// Absorb leftover vertical free space
    #[serde(default)]
    pub v_grab: bool,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<ModelElement>,
}

impl ModelElement {
    pub fn new(id: impl Into<String>, kind: ElementKind) -> Self {
        Self {
            id: ElementId::new(id),
            kind,
            bounds: None,
            layout: None,
            layout_overrides: None,
            h_grab: false,
            v_grab: false,
            children: vec![],
        }
    }

    /// Builder: set the visual bounds
    pub fn with_bounds(mut self, bounds: Bounds) -> Self {
        self.bounds = Some(bounds);
        self
    }

    /// Builder: set the preferred size
    pub fn with_pref_size(mut self, width: f64, height: f64) -> Self {
        self.layout = Some(LayoutData {
            pref_size: Some(Size::new(width, height)),
        });
        self
    }

    /// Builder: set the grab flags
    pub fn with_grab(mut self, h_grab: bool, v_grab: bool) -> Self {
        self.h_grab = h_grab;
        self.v_grab = v_grab;
        self
    }

    /// Builder: set node-local layout overrides
    pub fn with_layout_overrides(mut self, overrides: LayoutOverrides) -> Self {
        self.layout_overrides = Some(overrides);
        self
    }

    /// Builder: add a child element
    pub fn with_child(mut self, child: ModelElement) -> Self {
        self.children.push(child);
        self
    }

    /// Preferred size from layout data, if any
    pub fn pref_size(&self) -> Option<Size> {
        self.layout.and_then(|l| l.pref_size)
    }
}
