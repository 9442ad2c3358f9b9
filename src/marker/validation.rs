//! Model validation producing issue markers.
//!
//! Runs after a layout pass commits, checking for mechanical geometry
//! defects: unusable or missing bounds, zero-area elements, overlapping
//! siblings, and children escaping their container's interior. Pure
//! traversal; the model is never mutated.

use std::collections::HashMap;

use super::{resolve_marker_bounds, Issue, IssueMarker, Severity};
use crate::geometry::Bounds;
use crate::model::{DiagramModel, ElementId, ElementKind, ModelElement};

/// Run all checks on a model, returning one marker per flagged element
/// with navigation bounds resolved.
pub fn check(model: &DiagramModel) -> Vec<IssueMarker> {
    let mut issues: HashMap<ElementId, Vec<Issue>> = HashMap::new();
    let mut order: Vec<ElementId> = vec![];

    check_bounds(model, &mut issues, &mut order);
    check_sibling_overlaps(&model.roots, &mut issues, &mut order);
    for root in &model.roots {
        check_containment(root, &mut issues, &mut order);
    }

    let mut markers: Vec<IssueMarker> = order
        .into_iter()
        .filter_map(|id| {
            let found = issues.remove(&id)?;
            Some(IssueMarker::new(id, found))
        })
        .collect();
    resolve_marker_bounds(model, &mut markers);
    markers
}

fn record(
    issues: &mut HashMap<ElementId, Vec<Issue>>,
    order: &mut Vec<ElementId>,
    id: &ElementId,
    issue: Issue,
) {
    if !issues.contains_key(id) {
        order.push(id.clone());
    }
    issues.entry(id.clone()).or_default().push(issue);
}

// ── Bounds validity ───────────────────────────────────────────────

fn check_bounds(
    model: &DiagramModel,
    issues: &mut HashMap<ElementId, Vec<Issue>>,
    order: &mut Vec<ElementId>,
) {
    model.for_each(|elem| {
        // Edges route between elements and carry no own bounds
        if elem.kind == ElementKind::Edge {
            return;
        }
        match elem.bounds {
            None => record(
                issues,
                order,
                &elem.id,
                Issue::new(Severity::Warning, "element has not been laid out"),
            ),
            Some(bounds) if !bounds.is_valid() => record(
                issues,
                order,
                &elem.id,
                Issue::new(
                    Severity::Error,
                    format!(
                        "invalid bounds {:.1}x{:.1} at {:.1},{:.1}",
                        bounds.width, bounds.height, bounds.x, bounds.y
                    ),
                ),
            ),
            Some(bounds) if bounds.width == 0.0 || bounds.height == 0.0 => record(
                issues,
                order,
                &elem.id,
                Issue::new(Severity::Warning, "element has zero area"),
            ),
            Some(_) => {}
        }
    });
}

// ── Sibling overlap ───────────────────────────────────────────────

fn check_sibling_overlaps(
    siblings: &[ModelElement],
    issues: &mut HashMap<ElementId, Vec<Issue>>,
    order: &mut Vec<ElementId>,
) {
    for i in 0..siblings.len() {
        for j in (i + 1)..siblings.len() {
            let a = &siblings[i];
            let b = &siblings[j];
            let (Some(ba), Some(bb)) = (a.bounds, b.bounds) else {
                continue;
            };
            if !ba.is_valid() || !bb.is_valid() {
                continue;
            }
            if ba.intersects(&bb) {
                let overlap_w = ba.right().min(bb.right()) - ba.x.max(bb.x);
                let overlap_h = ba.bottom().min(bb.bottom()) - ba.y.max(bb.y);
                record(
                    issues,
                    order,
                    &a.id,
                    Issue::new(
                        Severity::Warning,
                        format!(
                            "overlaps sibling \"{}\" by {:.0}x{:.0}px",
                            b.id, overlap_w, overlap_h
                        ),
                    ),
                );
            }
        }
    }
    for elem in siblings {
        check_sibling_overlaps(&elem.children, issues, order);
    }
}

// ── Containment ───────────────────────────────────────────────────

/// Children are positioned relative to their container's origin, so the
/// interior is the rectangle from (0, 0) to (width, height).
fn check_containment(
    container: &ModelElement,
    issues: &mut HashMap<ElementId, Vec<Issue>>,
    order: &mut Vec<ElementId>,
) {
    if container.kind == ElementKind::Container {
        if let Some(cb) = container.bounds.filter(Bounds::is_valid) {
            for child in &container.children {
                let Some(eb) = child.bounds.filter(Bounds::is_valid) else {
                    continue;
                };
                if eb.x < 0.0 || eb.y < 0.0 || eb.right() > cb.width || eb.bottom() > cb.height {
                    record(
                        issues,
                        order,
                        &child.id,
                        Issue::new(
                            Severity::Warning,
                            format!("extends past the edge of container \"{}\"", container.id),
                        ),
                    );
                }
            }
        }
    }
    for child in &container.children {
        check_containment(child, issues, order);
    }
}
