//! Resolves declarative bounds to rectangles.
//!
//! Siblings are resolved in order along each axis independently. A cursor tracks the last resolved
//! edge on the axis; `Offset` and `After` are relative to it, and every resolved edge moves it.
//! Stretching edges are resolved in a second pass, once the space taken by everything else is known.

use crate::position::{Bounds, Position};
use crate::rect::Rect;
use cgmath::{Point2, Vector2};

/// A resolved interval along one axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Span {
    pub start: f64,
    pub length: f64,
}

/// Resolves (leading, trailing) edge pairs of siblings along one axis.
///
/// - `origin`: coordinate of the parent’s leading edge
/// - `extent`: the parent’s length along this axis
pub fn resolve_axis(edges: &[(Position, Position)], origin: f64, extent: f64) -> Vec<Span> {
    let total_weight: f64 = edges
        .iter()
        .flat_map(|(leading, trailing)| [*leading, *trailing])
        .map(stretch_weight)
        .sum();

    // with no weight there is nothing to divide, so stretching edges collapse onto the cursor
    let unit = if total_weight > 0. {
        let (_, used) = place(edges, extent, 0.);
        (extent - used).max(0.) / total_weight
    } else {
        0.
    };

    let (spans, _) = place(edges, extent, unit);
    spans
        .into_iter()
        .map(|span| Span {
            start: origin + span.start,
            length: span.length,
        })
        .collect()
}

/// Resolves the bounds of a list of siblings inside a parent rectangle.
pub fn resolve_siblings(bounds: &[Bounds], parent: Rect) -> Vec<Rect> {
    let horizontal: Vec<_> = bounds.iter().map(Bounds::horizontal).collect();
    let vertical: Vec<_> = bounds.iter().map(Bounds::vertical).collect();

    let xs = resolve_axis(&horizontal, parent.origin.x, parent.size.x);
    let ys = resolve_axis(&vertical, parent.origin.y, parent.size.y);

    xs.into_iter()
        .zip(ys)
        .map(|(x, y)| Rect::new(Point2::new(x.start, y.start), Vector2::new(x.length, y.length)))
        .collect()
}

/// Resolves a single set of bounds with no preceding siblings.
pub fn resolve_bounds(bounds: &Bounds, parent: Rect) -> Rect {
    resolve_siblings(std::slice::from_ref(bounds), parent)
        .pop()
        .unwrap_or(parent)
}

fn stretch_weight(position: Position) -> f64 {
    match position {
        Position::Stretch(weight) if weight > 0. => weight,
        _ => 0.,
    }
}

/// Places all edges given the length of one unit of stretch weight.
///
/// Returns the spans relative to the parent’s leading edge and the furthest edge reached.
fn place(edges: &[(Position, Position)], extent: f64, unit: f64) -> (Vec<Span>, f64) {
    let mut cursor = 0.;
    let mut furthest: f64 = 0.;
    let mut spans = Vec::with_capacity(edges.len());

    for (leading, trailing) in edges {
        let start = edge(*leading, cursor, extent, unit);
        cursor = start;
        let end = edge(*trailing, cursor, extent, unit);
        cursor = end;

        furthest = furthest.max(start).max(end);
        spans.push(Span {
            start,
            length: (end - start).max(0.),
        });
    }

    (spans, furthest)
}

fn edge(position: Position, cursor: f64, extent: f64, unit: f64) -> f64 {
    match position {
        Position::Start => 0.,
        Position::End => extent,
        Position::At(value) => value,
        Position::Offset(value) => cursor + value,
        Position::Stretch(_) => cursor + stretch_weight(position) * unit,
        Position::After => cursor,
    }
}
