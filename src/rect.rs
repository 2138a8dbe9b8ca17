//! Rectangles.

use cgmath::{Point2, Vector2, Zero};
use core::ops;

/// A rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    /// Rectangle origin.
    pub origin: Point2<f64>,

    /// Rectangle size.
    pub size: Vector2<f64>,
}

impl Rect {
    /// Creates a new rectangle.
    pub fn new(origin: Point2<f64>, size: Vector2<f64>) -> Rect {
        Rect { origin, size }
    }

    /// Returns a zero-sized rectangle at the origin.
    pub fn zero() -> Rect {
        Rect {
            origin: Point2::new(0., 0.),
            size: Vector2::zero(),
        }
    }

    /// Returns a rectangle at the origin with the given size.
    pub fn with_size(size: Vector2<f64>) -> Rect {
        Rect {
            origin: Point2::new(0., 0.),
            size,
        }
    }

    /// Creates a rectangle from its edges.
    ///
    /// If an edge pair is inverted the size along that axis is zero.
    pub fn from_edges(x1: f64, y1: f64, x2: f64, y2: f64) -> Rect {
        Rect {
            origin: Point2::new(x1, y1),
            size: Vector2::new((x2 - x1).max(0.), (y2 - y1).max(0.)),
        }
    }

    /// The right edge.
    pub fn max_x(&self) -> f64 {
        self.origin.x + self.size.x
    }

    /// The bottom edge.
    pub fn max_y(&self) -> f64 {
        self.origin.y + self.size.y
    }

    /// Returns true if the point is inside the rectangle.
    pub fn contains(&self, point: Point2<f64>) -> bool {
        point.x >= self.origin.x
            && point.y >= self.origin.y
            && point.x < self.max_x()
            && point.y < self.max_y()
    }

    /// Returns a new rectangle with the given origin.
    pub fn with_origin(&self, origin: Point2<f64>) -> Rect {
        Rect {
            origin,
            size: self.size,
        }
    }

    /// Returns the same rectangle relative to its own origin.
    pub fn local(&self) -> Rect {
        Rect::with_size(self.size)
    }
}

impl ops::Add<Vector2<f64>> for Rect {
    type Output = Rect;
    fn add(self, offset: Vector2<f64>) -> Rect {
        Rect {
            origin: self.origin + offset,
            size: self.size,
        }
    }
}

impl ops::Sub<Vector2<f64>> for Rect {
    type Output = Rect;
    fn sub(self, offset: Vector2<f64>) -> Rect {
        Rect {
            origin: self.origin - offset,
            size: self.size,
        }
    }
}

impl Default for Rect {
    fn default() -> Rect {
        Rect::zero()
    }
}

impl From<(f64, f64, f64, f64)> for Rect {
    /// `(x, y, width, height)`
    fn from((x, y, w, h): (f64, f64, f64, f64)) -> Rect {
        Rect::new(Point2::new(x, y), Vector2::new(w, h))
    }
}

#[test]
fn test_from_edges_clamps_inverted_axes() {
    let rect = Rect::from_edges(10., 20., 5., 50.);
    assert_eq!(rect.origin, Point2::new(10., 20.));
    assert_eq!(rect.size, Vector2::new(0., 30.));
}

#[test]
fn test_translate() {
    let rect: Rect = (1., 2., 3., 4.).into();
    assert_eq!(rect + Vector2::new(10., 10.), (11., 12., 3., 4.).into());
    assert_eq!(rect - Vector2::new(1., 2.), (0., 0., 3., 4.).into());
    assert!(rect.contains(Point2::new(1., 2.)));
    assert!(!rect.contains(Point2::new(4., 2.)));
}
