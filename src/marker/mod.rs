//! Issue markers and circular ordered navigation over them.
//!
//! Markers are produced by [`validation`] (or any external source) and
//! traversed with a [`MarkerNavigator`]: next/previous step through the
//! comparator-sorted sequence and wrap around at either end, so
//! navigation never runs out of results while at least one marker
//! passes the filter.

pub mod validation;

pub use validation::check;

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::geometry::Bounds;
use crate::model::{DiagramModel, ElementId, ModelElement};

/// Severity of a single issue. Ordered: `Info < Warning < Error`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Info,
    Warning,
    Error,
}

/// One validation finding on an element
#[derive(Debug, Clone, PartialEq)]
pub struct Issue {
    pub severity: Severity,
    pub message: String,
}

impl Issue {
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            message: message.into(),
        }
    }
}

/// All issues attached to one element, with the bounds used for
/// reading-order navigation (resolved from the owner or its nearest
/// bounds-aware ancestor).
#[derive(Debug, Clone, PartialEq)]
pub struct IssueMarker {
    pub element_id: ElementId,
    pub issues: Vec<Issue>,
    pub bounds: Option<Bounds>,
}

impl IssueMarker {
    pub fn new(element_id: ElementId, issues: Vec<Issue>) -> Self {
        Self {
            element_id,
            issues,
            bounds: None,
        }
    }

    /// Highest severity among the marker's issues
    pub fn max_severity(&self) -> Option<Severity> {
        self.issues.iter().map(|i| i.severity).max()
    }
}

/// Marker filter by severity. The default accepts every marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SeverityFilter {
    #[default]
    All,
    /// Accept markers whose highest severity is at least this
    AtLeast(Severity),
}

impl SeverityFilter {
    pub fn accepts(&self, marker: &IssueMarker) -> bool {
        match self {
            SeverityFilter::All => true,
            SeverityFilter::AtLeast(threshold) => {
                marker.max_severity().is_some_and(|s| s >= *threshold)
            }
        }
    }
}

/// Named marker comparators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MarkerOrder {
    /// No-op comparator: every pair compares equal, the input order is
    /// kept (the sort is stable)
    #[default]
    Unordered,
    /// Ascending y, then ascending x of the marker's resolved bounds;
    /// markers without bounds sort last
    ReadingOrder,
}

impl MarkerOrder {
    pub fn compare(&self, a: &IssueMarker, b: &IssueMarker) -> Ordering {
        match self {
            MarkerOrder::Unordered => Ordering::Equal,
            MarkerOrder::ReadingOrder => match (a.bounds, b.bounds) {
                (Some(ba), Some(bb)) => ba
                    .y
                    .partial_cmp(&bb.y)
                    .unwrap_or(Ordering::Equal)
                    .then(ba.x.partial_cmp(&bb.x).unwrap_or(Ordering::Equal)),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            },
        }
    }
}

/// Stateless navigator over a marker snapshot. Calling it repeatedly
/// against a mutating model simply reflects the latest snapshot.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkerNavigator {
    pub order: MarkerOrder,
}

impl MarkerNavigator {
    pub fn new(order: MarkerOrder) -> Self {
        Self { order }
    }

    /// Navigator using the reading-order comparator
    pub fn reading_order() -> Self {
        Self::new(MarkerOrder::ReadingOrder)
    }

    /// The next marker after `current` in sorted order, wrapping to the
    /// first when `current` is the last. Without a `current`, returns
    /// the first sorted marker.
    pub fn next<'a>(
        &self,
        markers: &'a [IssueMarker],
        current: Option<&IssueMarker>,
        filter: SeverityFilter,
    ) -> Option<&'a IssueMarker> {
        let sorted = self.sorted(markers, filter);
        if sorted.is_empty() {
            return None;
        }
        let Some(current) = current else {
            return Some(sorted[0]);
        };
        let index = sorted
            .iter()
            .position(|m| self.order.compare(m, current) == Ordering::Greater)
            .unwrap_or(0);
        Some(sorted[index])
    }

    /// The previous marker before `current` in sorted order, wrapping
    /// to the last when `current` is the first. Without a `current`,
    /// returns the *first* sorted marker, same as `next`: a documented
    /// quirk, kept for parity with the editor's established behavior.
    pub fn previous<'a>(
        &self,
        markers: &'a [IssueMarker],
        current: Option<&IssueMarker>,
        filter: SeverityFilter,
    ) -> Option<&'a IssueMarker> {
        let sorted = self.sorted(markers, filter);
        if sorted.is_empty() {
            return None;
        }
        let Some(current) = current else {
            return Some(sorted[0]);
        };
        let index = sorted
            .iter()
            .rposition(|m| self.order.compare(m, current) == Ordering::Less)
            .unwrap_or(sorted.len() - 1);
        Some(sorted[index])
    }

    fn sorted<'a>(
        &self,
        markers: &'a [IssueMarker],
        filter: SeverityFilter,
    ) -> Vec<&'a IssueMarker> {
        let mut sorted: Vec<&IssueMarker> =
            markers.iter().filter(|m| filter.accepts(m)).collect();
        sorted.sort_by(|a, b| self.order.compare(a, b));
        sorted
    }
}

/// Attach navigation bounds to markers: the owner element's bounds, or
/// those of its nearest bounds-aware ancestor.
pub fn resolve_marker_bounds(model: &DiagramModel, markers: &mut [IssueMarker]) {
    for marker in markers.iter_mut() {
        marker.bounds = nearest_bounds(model, &marker.element_id);
    }
}

fn nearest_bounds(model: &DiagramModel, id: &ElementId) -> Option<Bounds> {
    fn walk<'a>(
        elements: &'a [ModelElement],
        id: &ElementId,
        ancestors: &mut Vec<&'a ModelElement>,
    ) -> bool {
        for elem in elements {
            ancestors.push(elem);
            if &elem.id == id || walk(&elem.children, id, ancestors) {
                return true;
            }
            ancestors.pop();
        }
        false
    }

    let mut ancestors = vec![];
    if !walk(&model.roots, id, &mut ancestors) {
        return None;
    }
    ancestors
        .iter()
        .rev()
        .find_map(|elem| elem.bounds.filter(Bounds::is_valid))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ElementKind;

    fn marker(id: &str, severity: Severity, x: f64, y: f64) -> IssueMarker {
        IssueMarker {
            element_id: ElementId::new(id),
            issues: vec![Issue::new(severity, "issue")],
            bounds: Some(Bounds::new(x, y, 10.0, 10.0)),
        }
    }

    fn reading_set() -> Vec<IssueMarker> {
        vec![
            marker("c", Severity::Warning, 0.0, 50.0),
            marker("a", Severity::Error, 0.0, 0.0),
            marker("b", Severity::Info, 20.0, 0.0),
        ]
    }

    #[test]
    fn test_next_follows_reading_order() {
        let markers = reading_set();
        let nav = MarkerNavigator::reading_order();
        let first = nav.next(&markers, None, SeverityFilter::All).unwrap();
        assert_eq!(first.element_id.as_str(), "a");
        let second = nav.next(&markers, Some(first), SeverityFilter::All).unwrap();
        assert_eq!(second.element_id.as_str(), "b");
    }

    #[test]
    fn test_next_wraps_to_first() {
        let markers = reading_set();
        let nav = MarkerNavigator::reading_order();
        let last = marker("c", Severity::Warning, 0.0, 50.0);
        let wrapped = nav.next(&markers, Some(&last), SeverityFilter::All).unwrap();
        assert_eq!(wrapped.element_id.as_str(), "a");
    }

    #[test]
    fn test_previous_wraps_to_last() {
        let markers = reading_set();
        let nav = MarkerNavigator::reading_order();
        let first = marker("a", Severity::Error, 0.0, 0.0);
        let wrapped = nav
            .previous(&markers, Some(&first), SeverityFilter::All)
            .unwrap();
        assert_eq!(wrapped.element_id.as_str(), "c");
    }

    #[test]
    fn test_previous_without_current_returns_first_documented_quirk() {
        // Both directions start at the first sorted marker, kept for
        // parity with the editor's established behavior.
        let markers = reading_set();
        let nav = MarkerNavigator::reading_order();
        let start = nav.previous(&markers, None, SeverityFilter::All).unwrap();
        assert_eq!(start.element_id.as_str(), "a");
    }

    #[test]
    fn test_severity_filter() {
        let markers = reading_set();
        let nav = MarkerNavigator::reading_order();
        let filter = SeverityFilter::AtLeast(Severity::Warning);
        let first = nav.next(&markers, None, filter).unwrap();
        assert_eq!(first.element_id.as_str(), "a");
        let second = nav.next(&markers, Some(first), filter).unwrap();
        // b is Info and filtered out; navigation wraps a -> c -> a
        assert_eq!(second.element_id.as_str(), "c");
    }

    #[test]
    fn test_empty_markers() {
        let nav = MarkerNavigator::default();
        assert!(nav.next(&[], None, SeverityFilter::All).is_none());
    }

    #[test]
    fn test_unordered_keeps_input_order() {
        let markers = reading_set();
        let nav = MarkerNavigator::default();
        let first = nav.next(&markers, None, SeverityFilter::All).unwrap();
        assert_eq!(first.element_id.as_str(), "c");
    }

    #[test]
    fn test_resolve_bounds_falls_back_to_ancestor() {
        let model = DiagramModel::new(vec![ModelElement::new("panel", ElementKind::Container)
            .with_bounds(Bounds::new(5.0, 5.0, 100.0, 100.0))
            .with_child(ModelElement::new("bare", ElementKind::Node))]);
        let mut markers = vec![IssueMarker::new(
            "bare".into(),
            vec![Issue::new(Severity::Warning, "no bounds")],
        )];
        resolve_marker_bounds(&model, &mut markers);
        assert_eq!(markers[0].bounds, Some(Bounds::new(5.0, 5.0, 100.0, 100.0)));
    }
}
