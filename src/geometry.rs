//! Shared geometry primitives for the layout engine, command subsystem,
//! and marker navigation.

use serde::{Deserialize, Serialize};

/// A 2D point in the diagram coordinate system
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Origin point (0, 0)
    pub fn zero() -> Self {
        Self::new(0.0, 0.0)
    }
}

/// A 2D extent (width and height)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn zero() -> Self {
        Self::new(0.0, 0.0)
    }
}

/// An axis-aligned rectangle: the spatial extent of a diagram element.
///
/// Width and height are expected to be non-negative for valid bounds;
/// use [`Bounds::is_valid`] to reject negative or non-finite dimensions
/// before aggregating.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Bounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Zero-sized bounds at the origin
    pub fn zero() -> Self {
        Self::new(0.0, 0.0, 0.0, 0.0)
    }

    /// Whether these bounds have finite, non-negative dimensions
    pub fn is_valid(&self) -> bool {
        self.x.is_finite()
            && self.y.is_finite()
            && self.width.is_finite()
            && self.height.is_finite()
            && self.width >= 0.0
            && self.height >= 0.0
    }

    /// Right edge x-coordinate
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge y-coordinate
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Center point of the rectangle
    pub fn center(&self) -> Point {
        Point {
            x: self.x + self.width / 2.0,
            y: self.y + self.height / 2.0,
        }
    }

    /// Top-left corner as a point
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Extent as a size
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Check if this rectangle intersects another
    pub fn intersects(&self, other: &Bounds) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }

    /// Smallest rectangle containing both
    pub fn union(&self, other: &Bounds) -> Bounds {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        let right = self.right().max(other.right());
        let bottom = self.bottom().max(other.bottom());
        Bounds::new(x, y, right - x, bottom - y)
    }

    /// These bounds shifted by a delta
    pub fn translate(&self, delta: Point) -> Bounds {
        Bounds::new(self.x + delta.x, self.y + delta.y, self.width, self.height)
    }

    /// These bounds with a new top-left corner
    pub fn with_position(&self, position: Point) -> Bounds {
        Bounds::new(position.x, position.y, self.width, self.height)
    }

    /// These bounds with a new extent, position unchanged
    pub fn with_size(&self, size: Size) -> Bounds {
        Bounds::new(self.x, self.y, size.width, size.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_bounds() {
        assert!(Bounds::new(0.0, 0.0, 10.0, 5.0).is_valid());
        assert!(Bounds::zero().is_valid());
    }

    #[test]
    fn test_negative_dimension_invalid() {
        assert!(!Bounds::new(0.0, 0.0, -1.0, 5.0).is_valid());
        assert!(!Bounds::new(0.0, 0.0, 10.0, -0.5).is_valid());
    }

    #[test]
    fn test_nan_invalid() {
        assert!(!Bounds::new(f64::NAN, 0.0, 10.0, 5.0).is_valid());
        assert!(!Bounds::new(0.0, 0.0, f64::INFINITY, 5.0).is_valid());
    }

    #[test]
    fn test_center() {
        let b = Bounds::new(10.0, 20.0, 40.0, 60.0);
        assert_eq!(b.center(), Point::new(30.0, 50.0));
    }

    #[test]
    fn test_union() {
        let a = Bounds::new(0.0, 0.0, 10.0, 10.0);
        let b = Bounds::new(20.0, 5.0, 10.0, 10.0);
        let u = a.union(&b);
        assert_eq!(u, Bounds::new(0.0, 0.0, 30.0, 15.0));
    }

    #[test]
    fn test_intersects() {
        let a = Bounds::new(0.0, 0.0, 10.0, 10.0);
        assert!(a.intersects(&Bounds::new(5.0, 5.0, 10.0, 10.0)));
        assert!(!a.intersects(&Bounds::new(20.0, 20.0, 5.0, 5.0)));
    }

    #[test]
    fn test_translate() {
        let b = Bounds::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!(
            b.translate(Point::new(10.0, -2.0)),
            Bounds::new(11.0, 0.0, 3.0, 4.0)
        );
    }
}
