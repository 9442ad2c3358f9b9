//! Integration tests for validation markers and circular navigation

use diagram_editor::geometry::Bounds;
use diagram_editor::marker::{check, Issue, IssueMarker, MarkerOrder};
use diagram_editor::{
    DiagramModel, ElementKind, MarkerNavigator, ModelElement, Severity, SeverityFilter,
};

fn node(id: &str, x: f64, y: f64, w: f64, h: f64) -> ModelElement {
    ModelElement::new(id, ElementKind::Node).with_bounds(Bounds::new(x, y, w, h))
}

fn marker_at(id: &str, severity: Severity, x: f64, y: f64) -> IssueMarker {
    IssueMarker {
        element_id: id.into(),
        issues: vec![Issue::new(severity, "issue")],
        bounds: Some(Bounds::new(x, y, 10.0, 10.0)),
    }
}

#[test]
fn navigation_wraps_from_last_to_first() {
    let markers = vec![
        marker_at("m0", Severity::Warning, 0.0, 0.0),
        marker_at("m1", Severity::Warning, 0.0, 10.0),
        marker_at("m2", Severity::Warning, 0.0, 20.0),
    ];
    let navigator = MarkerNavigator::reading_order();

    let last = &markers[2];
    let wrapped = navigator
        .next(&markers, Some(last), SeverityFilter::All)
        .unwrap();
    assert_eq!(wrapped.element_id.as_str(), "m0");
}

#[test]
fn both_directions_start_at_the_first_marker() {
    // Documented quirk: previous without a current marker also returns
    // the first of the sorted sequence, not the last.
    let markers = vec![
        marker_at("m1", Severity::Warning, 0.0, 10.0),
        marker_at("m0", Severity::Warning, 0.0, 0.0),
    ];
    let navigator = MarkerNavigator::reading_order();

    let via_next = navigator.next(&markers, None, SeverityFilter::All).unwrap();
    let via_previous = navigator
        .previous(&markers, None, SeverityFilter::All)
        .unwrap();
    assert_eq!(via_next.element_id.as_str(), "m0");
    assert_eq!(via_previous.element_id.as_str(), "m0");
}

#[test]
fn full_cycle_visits_every_marker() {
    let markers = vec![
        marker_at("m2", Severity::Warning, 20.0, 10.0),
        marker_at("m0", Severity::Warning, 0.0, 0.0),
        marker_at("m1", Severity::Warning, 0.0, 10.0),
    ];
    let navigator = MarkerNavigator::reading_order();

    let mut visited = vec![];
    let mut current: Option<&IssueMarker> = None;
    for _ in 0..markers.len() {
        let next = navigator.next(&markers, current, SeverityFilter::All).unwrap();
        visited.push(next.element_id.as_str().to_string());
        current = Some(next);
    }
    assert_eq!(visited, vec!["m0", "m1", "m2"]);

    // One more step wraps around
    let wrapped = navigator.next(&markers, current, SeverityFilter::All).unwrap();
    assert_eq!(wrapped.element_id.as_str(), "m0");
}

#[test]
fn severity_filter_narrows_the_cycle() {
    let markers = vec![
        marker_at("err", Severity::Error, 0.0, 0.0),
        marker_at("info", Severity::Info, 0.0, 10.0),
        marker_at("warn", Severity::Warning, 0.0, 20.0),
    ];
    let navigator = MarkerNavigator::reading_order();
    let filter = SeverityFilter::AtLeast(Severity::Warning);

    let first = navigator.next(&markers, None, filter).unwrap();
    let second = navigator.next(&markers, Some(first), filter).unwrap();
    let third = navigator.next(&markers, Some(second), filter).unwrap();
    assert_eq!(first.element_id.as_str(), "err");
    assert_eq!(second.element_id.as_str(), "warn");
    // Info is invisible to the cycle; it wraps straight back
    assert_eq!(third.element_id.as_str(), "err");
}

#[test]
fn validation_markers_navigate_in_reading_order() {
    // Two overlapping pairs, the lower pair listed first in the model
    let model = DiagramModel::new(vec![
        node("south_a", 0.0, 100.0, 50.0, 20.0),
        node("south_b", 30.0, 100.0, 50.0, 20.0),
        node("north_a", 0.0, 0.0, 50.0, 20.0),
        node("north_b", 30.0, 0.0, 50.0, 20.0),
    ]);
    let markers = check(&model);
    assert_eq!(markers.len(), 2);

    let navigator = MarkerNavigator::reading_order();
    let first = navigator.next(&markers, None, SeverityFilter::All).unwrap();
    assert_eq!(first.element_id.as_str(), "north_a");
    let second = navigator.next(&markers, Some(first), SeverityFilter::All).unwrap();
    assert_eq!(second.element_id.as_str(), "south_a");
}

#[test]
fn unordered_navigator_keeps_model_order() {
    let markers = vec![
        marker_at("second", Severity::Warning, 0.0, 50.0),
        marker_at("first", Severity::Warning, 0.0, 0.0),
    ];
    let navigator = MarkerNavigator::new(MarkerOrder::Unordered);
    let start = navigator.next(&markers, None, SeverityFilter::All).unwrap();
    assert_eq!(start.element_id.as_str(), "second");
}

#[test]
fn no_markers_yields_no_result() {
    let navigator = MarkerNavigator::reading_order();
    assert!(navigator.next(&[], None, SeverityFilter::All).is_none());
    assert!(navigator.previous(&[], None, SeverityFilter::All).is_none());
}
