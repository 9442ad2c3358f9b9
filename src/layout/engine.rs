//! Vertical box layout pass.
//!
//! A [`LayoutPass`] computes positions and sizes for the children of one
//! container under padding, gap, alignment and grab rules, writing results
//! into a scratch bounds table it owns. The pass is single-level and
//! non-recursive: nested containers are handled by invoking it per
//! container, deepest first, within the same pass. Child positions are
//! relative to their container's origin.
//!
//! The pass mutates nothing until [`LayoutPass::commit`] writes the
//! changed bounds back to the model and consumes the pass.

use std::collections::HashMap;

use log::{debug, trace};

use super::error::LayoutError;
use super::options::{HAlign, LayoutOptions};
use crate::geometry::{Bounds, Size};
use crate::model::{Capabilities, DiagramModel, ElementAndBounds, ElementId, ModelElement};

/// Scratch record for one element, owned by a single layout pass
#[derive(Debug, Clone, Default)]
pub struct BoundsData {
    pub bounds: Option<Bounds>,
    pub changed: bool,
}

/// One layout pass over a model. Owns the scratch bounds table; create,
/// run [`layout_container`](LayoutPass::layout_container) per container
/// (deepest first for nesting), then [`commit`](LayoutPass::commit).
#[derive(Debug)]
pub struct LayoutPass {
    defaults: LayoutOptions,
    scratch: HashMap<ElementId, BoundsData>,
}

/// A child participating in placement
struct ChildEntry {
    id: ElementId,
    /// Effective bounds used as layout input (scratch entry or model)
    bounds: Bounds,
    /// Bounds currently committed to the model, for change detection
    model_bounds: Option<Bounds>,
    h_grab: bool,
    v_grab: bool,
}

impl LayoutPass {
    pub fn new(defaults: LayoutOptions) -> Self {
        Self {
            defaults,
            scratch: HashMap::new(),
        }
    }

    /// Scratch entry for an element, if the pass has written one
    pub fn bounds_data(&self, id: &ElementId) -> Option<&BoundsData> {
        self.scratch.get(id)
    }

    /// Lay out the children of one container and size the container
    /// itself. Unresolvable container ids are skipped silently.
    pub fn layout_container(
        &mut self,
        model: &DiagramModel,
        container_id: &ElementId,
        capabilities: &dyn Capabilities,
    ) -> Result<(), LayoutError> {
        let Some(container) = model.get(container_id) else {
            debug!("layout: container '{}' not in model, skipping", container_id);
            return Ok(());
        };

        let options = self
            .defaults
            .resolve(container_id, container.layout_overrides.as_ref())?;

        let children = self.collect_children(container, capabilities);
        let aggregate = children_aggregate(&children, options.gap);

        let fixed = container.pref_size().unwrap_or_else(Size::zero);
        let usable = usable_interior(fixed, aggregate, &options);
        trace!(
            "layout '{}': aggregate {:.1}x{:.1}, usable {:.1}x{:.1}",
            container_id,
            aggregate.width,
            aggregate.height,
            usable.width,
            usable.height
        );

        // Empty-content guard: leave the container untouched this pass
        if usable.width <= 0.0 || usable.height <= 0.0 {
            debug!(
                "layout '{}': no usable interior, leaving bounds untouched",
                container_id
            );
            return Ok(());
        }

        self.place_children(&children, usable, aggregate, &options);

        let container_bounds = final_container_bounds(container, fixed, aggregate, &options);
        self.write(container, container_bounds);

        Ok(())
    }

    /// Commit all changed bounds to the model, consuming the pass.
    /// Returns the deltas in id order for deterministic output.
    pub fn commit(self, model: &mut DiagramModel) -> Vec<ElementAndBounds> {
        let mut changes: Vec<ElementAndBounds> = self
            .scratch
            .into_iter()
            .filter(|(_, data)| data.changed)
            .filter_map(|(id, data)| {
                data.bounds.map(|bounds| ElementAndBounds {
                    element_id: id,
                    new_position: Some(bounds.position()),
                    new_size: bounds.size(),
                })
            })
            .collect();
        changes.sort_by(|a, b| a.element_id.cmp(&b.element_id));

        for change in &changes {
            if let Some(position) = change.new_position {
                model.set_bounds(
                    &change.element_id,
                    Bounds::new(
                        position.x,
                        position.y,
                        change.new_size.width,
                        change.new_size.height,
                    ),
                );
            }
        }
        changes
    }

    /// Layoutable children with resolvable, positive bounds. Children
    /// lacking such bounds are skipped entirely; they contribute
    /// neither extent nor a gap slot.
    fn collect_children(
        &self,
        container: &ModelElement,
        capabilities: &dyn Capabilities,
    ) -> Vec<ChildEntry> {
        container
            .children
            .iter()
            .filter(|child| capabilities.is_layoutable_child(child))
            .filter_map(|child| {
                let bounds = self.effective_bounds(child)?;
                if !bounds.is_valid() || bounds.width <= 0.0 || bounds.height <= 0.0 {
                    return None;
                }
                Some(ChildEntry {
                    id: child.id.clone(),
                    bounds,
                    model_bounds: child.bounds,
                    h_grab: child.h_grab,
                    v_grab: child.v_grab,
                })
            })
            .collect()
    }

    /// Bounds as this pass sees them: a scratch entry from an earlier
    /// container in the same pass wins over the model bounds.
    fn effective_bounds(&self, element: &ModelElement) -> Option<Bounds> {
        if let Some(data) = self.scratch.get(&element.id) {
            return data.bounds;
        }
        element.bounds
    }

    /// Walk the children in order, applying grab adjustments, alignment
    /// and the centering offset derived from the padding factor.
    fn place_children(
        &mut self,
        children: &[ChildEntry],
        usable: Size,
        aggregate: Size,
        options: &LayoutOptions,
    ) {
        let free_height = usable.height - aggregate.height;
        let grab_count = children.iter().filter(|c| c.v_grab).count();
        let grab_extra = if grab_count > 0 {
            free_height / grab_count as f64
        } else {
            0.0
        };

        let offset_x = options.padding_left + 0.5 * (usable.width - usable.width / options.padding_factor);
        let mut y = options.padding_top + 0.5 * (usable.height - usable.height / options.padding_factor);
        let content_width = usable.width / options.padding_factor;

        for child in children {
            let mut width = child.bounds.width;
            let mut height = child.bounds.height;
            if child.v_grab {
                height += grab_extra;
            }

            // hGrab stretches to the full usable width, overriding alignment
            let dx = if child.h_grab {
                width = usable.width;
                0.0
            } else {
                match options.h_align {
                    HAlign::Left => 0.0,
                    HAlign::Center => (content_width - width) / 2.0,
                    HAlign::Right => content_width - width,
                }
            };

            let placed = Bounds::new(offset_x + dx, y, width, height);
            trace!(
                "layout: place '{}' at {:.1},{:.1} {:.1}x{:.1}",
                child.id,
                placed.x,
                placed.y,
                placed.width,
                placed.height
            );
            let entry = self.scratch.entry(child.id.clone()).or_default();
            entry.changed = entry.changed || child.model_bounds != Some(placed);
            entry.bounds = Some(placed);

            y += height + options.gap;
        }
    }

    fn write(&mut self, element: &ModelElement, bounds: Bounds) {
        let entry = self.scratch.entry(element.id.clone()).or_default();
        entry.changed = entry.changed || element.bounds != Some(bounds);
        entry.bounds = Some(bounds);
    }
}

/// Stacking-axis sum of valid child heights plus inter-child gaps;
/// cross axis is the maximum child width.
fn children_aggregate(children: &[ChildEntry], gap: f64) -> Size {
    let mut aggregate = Size::zero();
    for child in children {
        aggregate.height += child.bounds.height;
        aggregate.width = aggregate.width.max(child.bounds.width);
    }
    if children.len() > 1 {
        aggregate.height += (children.len() - 1) as f64 * gap;
    }
    aggregate
}

/// Usable interior per axis. With `resize_container` the interior grows
/// to the children aggregate; otherwise it is clamped at zero.
fn usable_interior(fixed: Size, aggregate: Size, options: &LayoutOptions) -> Size {
    let inner_width = fixed.width - options.padding_horizontal();
    let inner_height = fixed.height - options.padding_vertical();
    if options.resize_container {
        Size::new(
            options.padding_factor * inner_width.max(aggregate.width),
            options.padding_factor * inner_height.max(aggregate.height),
        )
    } else {
        Size::new(
            options.padding_factor * inner_width.max(0.0),
            options.padding_factor * inner_height.max(0.0),
        )
    }
}

/// Final container bounds: grows to fit content plus padding, never
/// shrinks below the configured minimum/preferred size. The container's
/// position is kept.
fn final_container_bounds(
    container: &ModelElement,
    fixed: Size,
    aggregate: Size,
    options: &LayoutOptions,
) -> Bounds {
    let base_width = options.min_width.max(fixed.width);
    let base_height = options.min_height.max(fixed.height);
    let width = base_width.max(aggregate.width + options.padding_horizontal());
    let height = base_height.max(aggregate.height + options.padding_vertical());
    let position = container
        .bounds
        .map(|b| b.position())
        .unwrap_or_default();
    Bounds::new(position.x, position.y, width, height)
}
