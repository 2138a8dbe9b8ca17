//! Declarative positions and bounds.

use crate::rect::Rect;
use cgmath::{Point2, Vector2};
use serde::{Deserialize, Serialize};

/// A one-dimensional edge constraint.
///
/// Positions are pure data: they only get a concrete coordinate once they’re resolved against a
/// parent extent and the edges of the preceding siblings along the same axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Position {
    /// The leading edge of the container (left or top).
    Start,

    /// The trailing edge of the container (right or bottom).
    End,

    /// An absolute coordinate from the container origin.
    At(f64),

    /// A coordinate relative to the last resolved edge on this axis.
    ///
    /// For a leading edge this is the trailing edge of the previous sibling; for a trailing edge it
    /// is the view’s own leading edge, so `Offset` acts as a length.
    Offset(f64),

    /// A share of the space left over by all non-stretching edges, proportional to its weight.
    Stretch(f64),

    /// The last resolved edge on this axis, with no gap.
    After,
}

/// One of the four sides of a [`Bounds`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    X1,
    Y1,
    X2,
    Y2,
}

impl Side {
    /// Maps host side indices (0 = left, 1 = top, 2 = right, 3 = bottom).
    pub fn from_index(index: i32) -> Option<Side> {
        match index {
            0 => Some(Side::X1),
            1 => Some(Side::Y1),
            2 => Some(Side::X2),
            3 => Some(Side::Y2),
            _ => None,
        }
    }
}

/// The declared bounds of a container: four independent edge constraints.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub x1: Position,
    pub y1: Position,
    pub x2: Position,
    pub y2: Position,
}

impl Bounds {
    /// Bounds that fill the parent.
    pub fn fill() -> Bounds {
        Bounds {
            x1: Position::Start,
            y1: Position::Start,
            x2: Position::End,
            y2: Position::End,
        }
    }

    pub fn side(&self, side: Side) -> Position {
        match side {
            Side::X1 => self.x1,
            Side::Y1 => self.y1,
            Side::X2 => self.x2,
            Side::Y2 => self.y2,
        }
    }

    /// Replaces one side, leaving the others untouched.
    pub fn set_side(&mut self, side: Side, position: Position) {
        match side {
            Side::X1 => self.x1 = position,
            Side::Y1 => self.y1 = position,
            Side::X2 => self.x2 = position,
            Side::Y2 => self.y2 = position,
        }
    }

    /// Like [`Bounds::set_side`] with a host side index; unknown indices are ignored.
    pub fn set_side_index(&mut self, index: i32, position: Position) {
        if let Some(side) = Side::from_index(index) {
            self.set_side(side, position);
        }
    }

    /// The (leading, trailing) horizontal edges.
    pub(crate) fn horizontal(&self) -> (Position, Position) {
        (self.x1, self.x2)
    }

    /// The (leading, trailing) vertical edges.
    pub(crate) fn vertical(&self) -> (Position, Position) {
        (self.y1, self.y2)
    }
}

impl Default for Bounds {
    fn default() -> Bounds {
        Bounds::fill()
    }
}

/// Resolved bounds of a container, as sent to `bounds_changed` handlers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContainerBounds {
    /// The frame in the superview’s coordinate space.
    pub frame: Rect,
}

impl ContainerBounds {
    pub fn origin(&self) -> Point2<f64> {
        self.frame.origin
    }

    pub fn size(&self) -> Vector2<f64> {
        self.frame.size
    }
}

impl From<Rect> for ContainerBounds {
    fn from(frame: Rect) -> ContainerBounds {
        ContainerBounds { frame }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_side_touches_one_side() {
        let mut bounds = Bounds::default();
        bounds.set_side(Side::X2, Position::Offset(100.));
        assert_eq!(bounds.x1, Position::Start);
        assert_eq!(bounds.y1, Position::Start);
        assert_eq!(bounds.x2, Position::Offset(100.));
        assert_eq!(bounds.y2, Position::End);
    }

    #[test]
    fn side_indices() {
        let mut bounds = Bounds::default();
        bounds.set_side_index(1, Position::At(5.));
        bounds.set_side_index(7, Position::At(9.));
        assert_eq!(bounds.side(Side::Y1), Position::At(5.));
        assert_eq!(bounds, Bounds { y1: Position::At(5.), ..Bounds::fill() });
        assert_eq!(Side::from_index(-1), None);
    }
}
