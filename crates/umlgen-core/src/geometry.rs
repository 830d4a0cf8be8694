//! Geometric primitives for class box layout and connector drawing.
//!
//! # Overview
//!
//! - [`Point`] - A real-valued 2D coordinate in character-grid units
//! - [`BoxSize`] - Integer width and height of a class box
//! - [`ClassBox`] - A class box placed at a top-left origin
//!
//! # Coordinate System
//!
//! umlgen uses a coordinate system consistent with SVG:
//!
//! ```text
//!   (0,0) ────────► +X
//!     │
//!     │
//!     ▼
//!    +Y
//! ```
//!
//! One unit is one character cell. Box origins always sit on integer
//! coordinates; connector geometry is fractional.

/// A 2D point in diagram coordinate space.
///
/// # Examples
///
/// ```
/// # use umlgen_core::geometry::Point;
/// let p1 = Point::new(10.0, 20.0);
/// let p2 = Point::new(5.0, 5.0);
///
/// let mid = p1.midpoint(p2);
/// assert_eq!(mid.x(), 7.5);
/// assert_eq!(mid.y(), 12.5);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    x: f64,
    y: f64,
}

impl Point {
    /// Creates a new point with the specified coordinates
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Returns the x-coordinate of the point
    pub fn x(self) -> f64 {
        self.x
    }

    /// Returns the y-coordinate of the point
    pub fn y(self) -> f64 {
        self.y
    }

    /// Adds another point to this point, returning a new point.
    pub fn add_point(self, other: Point) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }

    /// Subtracts another point from this point, returning a new point
    pub fn sub_point(self, other: Point) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }

    /// Calculates the midpoint between this point and another point
    pub fn midpoint(self, other: Point) -> Self {
        Self {
            x: (self.x + other.x) / 2.0,
            y: (self.y + other.y) / 2.0,
        }
    }

    /// Multiplies both coordinates by the given factor.
    pub fn scale(self, factor: f64) -> Self {
        Self {
            x: self.x * factor,
            y: self.y * factor,
        }
    }

    /// Euclidean distance from the origin
    pub fn hypot(self) -> f64 {
        self.x.hypot(self.y)
    }
}

/// Width and height of a class box in character cells.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct BoxSize {
    width: u32,
    height: u32,
}

impl BoxSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Returns the width in character cells
    pub fn width(self) -> u32 {
        self.width
    }

    /// Returns the height in character rows
    pub fn height(self) -> u32 {
        self.height
    }

    /// Number of grid cells the box claims once its 1-unit safety margin
    /// is included.
    ///
    /// A box spanning `[x, x + width]` touches `width + 1` integer columns,
    /// and two boxes may not share a column range and a row range at the
    /// same time, so this is the box's exclusive footprint.
    pub fn footprint(self) -> u64 {
        (u64::from(self.width) + 1) * (u64::from(self.height) + 1)
    }
}

/// A class box placed on the canvas.
///
/// The box spans `[origin, origin + size]` with inclusive edges.
///
/// # Examples
///
/// ```
/// # use umlgen_core::geometry::{BoxSize, ClassBox, Point};
/// let class_box = ClassBox::new(Point::new(2.0, 3.0), BoxSize::new(4, 2));
/// assert_eq!(class_box.bottom_right(), Point::new(6.0, 5.0));
/// assert_eq!(class_box.center(), Point::new(4.0, 4.0));
/// assert!(class_box.contains(Point::new(6.0, 5.0)));
/// assert!(!class_box.contains(Point::new(6.5, 5.0)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassBox {
    origin: Point,
    size: BoxSize,
}

impl ClassBox {
    pub fn new(origin: Point, size: BoxSize) -> Self {
        Self { origin, size }
    }

    /// Top-left corner of the box
    pub fn origin(&self) -> Point {
        self.origin
    }

    pub fn size(&self) -> BoxSize {
        self.size
    }

    pub fn min_x(&self) -> f64 {
        self.origin.x
    }

    pub fn min_y(&self) -> f64 {
        self.origin.y
    }

    pub fn max_x(&self) -> f64 {
        self.origin.x + f64::from(self.size.width)
    }

    pub fn max_y(&self) -> f64 {
        self.origin.y + f64::from(self.size.height)
    }

    /// Bottom-right corner, `origin + size`
    pub fn bottom_right(&self) -> Point {
        Point::new(self.max_x(), self.max_y())
    }

    /// Center of the box, where connectors are anchored
    pub fn center(&self) -> Point {
        self.origin.midpoint(self.bottom_right())
    }

    /// Returns true if the point lies inside the box, edges included.
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.min_x()
            && point.x <= self.max_x()
            && point.y >= self.min_y()
            && point.y <= self.max_y()
    }

    /// Returns true if the two boxes come closer than the 1-unit safety
    /// margin on both axes.
    ///
    /// The ranges conflict when either box starts inside the other's range
    /// widened by one unit on each side; the test is symmetric.
    pub fn conflicts_with(&self, other: &ClassBox) -> bool {
        let x_overlap = self.min_x() < other.max_x() + 1.0 && other.min_x() < self.max_x() + 1.0;
        let y_overlap = self.min_y() < other.max_y() + 1.0 && other.min_y() < self.max_y() + 1.0;
        x_overlap && y_overlap
    }
}
