//! Layout options and their resolution.
//!
//! A container's effective options are computed once per layout pass by
//! merging the editor-wide defaults with the node-local overrides; node
//! overrides win. Child-level behavior (grab flags) lives on the model
//! elements themselves.

use serde::{Deserialize, Serialize};

use super::error::LayoutError;
use crate::model::ElementId;

/// Horizontal alignment of children inside the container's content area
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HAlign {
    Left,
    #[default]
    Center,
    Right,
}

/// Resolved layout options for one container.
///
/// Precondition: `padding_factor > 0`. [`LayoutOptions::resolve`] rejects
/// a violating configuration before the pass runs, so the placement
/// arithmetic never divides by zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutOptions {
    /// Grow the usable interior to fit the children aggregate
    pub resize_container: bool,
    pub padding_top: f64,
    pub padding_bottom: f64,
    pub padding_left: f64,
    pub padding_right: f64,
    /// Scales the usable interior before placement; must be positive
    pub padding_factor: f64,
    /// Spacing between consecutive children along the stacking axis
    pub gap: f64,
    pub min_width: f64,
    pub min_height: f64,
    pub h_align: HAlign,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            resize_container: true,
            padding_top: 5.0,
            padding_bottom: 5.0,
            padding_left: 5.0,
            padding_right: 5.0,
            padding_factor: 1.0,
            gap: 4.0,
            min_width: 20.0,
            min_height: 20.0,
            h_align: HAlign::Center,
        }
    }
}

impl LayoutOptions {
    /// Total horizontal padding
    pub fn padding_horizontal(&self) -> f64 {
        self.padding_left + self.padding_right
    }

    /// Total vertical padding
    pub fn padding_vertical(&self) -> f64 {
        self.padding_top + self.padding_bottom
    }

    /// Merge node-local overrides over these defaults and validate the
    /// result. Called once per container per pass.
    pub fn resolve(
        &self,
        element: &ElementId,
        overrides: Option<&LayoutOverrides>,
    ) -> Result<LayoutOptions, LayoutError> {
        let mut options = self.clone();
        if let Some(o) = overrides {
            if let Some(v) = o.resize_container {
                options.resize_container = v;
            }
            if let Some(v) = o.padding_top {
                options.padding_top = v;
            }
            if let Some(v) = o.padding_bottom {
                options.padding_bottom = v;
            }
            if let Some(v) = o.padding_left {
                options.padding_left = v;
            }
            if let Some(v) = o.padding_right {
                options.padding_right = v;
            }
            if let Some(v) = o.padding_factor {
                options.padding_factor = v;
            }
            if let Some(v) = o.gap {
                options.gap = v;
            }
            if let Some(v) = o.min_width {
                options.min_width = v;
            }
            if let Some(v) = o.min_height {
                options.min_height = v;
            }
            if let Some(v) = o.h_align {
                options.h_align = v;
            }
        }
        options.validate(element)?;
        Ok(options)
    }

    fn validate(&self, element: &ElementId) -> Result<(), LayoutError> {
        if !(self.padding_factor.is_finite() && self.padding_factor > 0.0) {
            return Err(LayoutError::invalid_options(
                element.as_str(),
                format!("padding_factor must be positive, got {}", self.padding_factor),
            ));
        }
        let paddings = [
            self.padding_top,
            self.padding_bottom,
            self.padding_left,
            self.padding_right,
        ];
        if paddings.iter().any(|p| !p.is_finite()) {
            return Err(LayoutError::invalid_options(
                element.as_str(),
                "padding values must be finite",
            ));
        }
        if !self.gap.is_finite() {
            return Err(LayoutError::invalid_options(
                element.as_str(),
                "gap must be finite",
            ));
        }
        Ok(())
    }
}

/// Node-local layout option overrides. Every field is optional; absent
/// fields fall through to the container defaults.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LayoutOverrides {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resize_container: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub padding_top: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub padding_bottom: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub padding_left: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub padding_right: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub padding_factor: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gap: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_height: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub h_align: Option<HAlign>,
}

impl LayoutOverrides {
    /// Overrides with every field unset
    pub fn none() -> Self {
        Self::default()
    }

    /// Builder: override the gap
    pub fn with_gap(mut self, gap: f64) -> Self {
        self.gap = Some(gap);
        self
    }

    /// Builder: override the uniform padding on all four sides
    pub fn with_padding(mut self, padding: f64) -> Self {
        self.padding_top = Some(padding);
        self.padding_bottom = Some(padding);
        self.padding_left = Some(padding);
        self.padding_right = Some(padding);
        self
    }

    /// Builder: override the padding factor
    pub fn with_padding_factor(mut self, factor: f64) -> Self {
        self.padding_factor = Some(factor);
        self
    }

    /// Builder: override resize_container
    pub fn with_resize_container(mut self, resize: bool) -> Self {
        self.resize_container = Some(resize);
        self
    }

    /// Builder: override the horizontal alignment
    pub fn with_h_align(mut self, h_align: HAlign) -> Self {
        self.h_align = Some(h_align);
        self
    }
}
