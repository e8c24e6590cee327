use std::{
    fmt,
    ops::{Add, Sub},
};

/// Integer coordinate type used by all drawing primitives
pub type Coord = i64;
/// Floating point type used for intermediate geometry
pub type Scalar = f64;

/// `√3`, used by the equilateral triangle and Koch apex math
pub const SQRT_3: Scalar = 1.732_050_807_568_877_2;

/// Value representing a 2D integer point or offset.
///
/// Points are transient inputs to drawing operations, canvas never stores them.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Point(pub [Coord; 2]);

impl fmt::Debug for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Point([x, y]) = self;
        write!(f, "{},{}", x, y)
    }
}

impl Point {
    #[inline]
    pub const fn new(x: Coord, y: Coord) -> Self {
        Self([x, y])
    }

    /// Get `x` component of the point
    #[inline]
    pub const fn x(self) -> Coord {
        self.0[0]
    }

    /// Get `y` component of the point
    #[inline]
    pub const fn y(self) -> Coord {
        self.0[1]
    }

    /// Euclidean distance between two points
    pub fn dist(self, other: Self) -> Scalar {
        let Self([x, y]) = self - other;
        (x as Scalar).hypot(y as Scalar)
    }

    /// Midpoint with coordinates truncated toward zero
    pub fn midpoint(self, other: Self) -> Self {
        let Self([x0, y0]) = self;
        let Self([x1, y1]) = other;
        Self([(x0 + x1) / 2, (y0 + y1) / 2])
    }
}

impl From<(Coord, Coord)> for Point {
    #[inline]
    fn from(xy: (Coord, Coord)) -> Self {
        Self([xy.0, xy.1])
    }
}

impl From<[Coord; 2]> for Point {
    #[inline]
    fn from(xy: [Coord; 2]) -> Self {
        Self(xy)
    }
}

impl Add for Point {
    type Output = Point;

    #[inline]
    fn add(self, other: Point) -> Self::Output {
        let Point([x0, y0]) = self;
        let Point([x1, y1]) = other;
        Point([x0 + x1, y0 + y1])
    }
}

impl Sub for Point {
    type Output = Point;

    #[inline]
    fn sub(self, other: Point) -> Self::Output {
        let Point([x0, y0]) = self;
        let Point([x1, y1]) = other;
        Point([x0 - x1, y0 - y1])
    }
}

/// Axis aligned bounding box over integer points (both corners inclusive)
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct BBox {
    min: Point,
    max: Point,
}

impl BBox {
    /// Smallest box containing all points, `None` if there are no points
    pub fn from_points(points: &[Point]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        let bbox = rest.iter().fold(
            BBox {
                min: *first,
                max: *first,
            },
            |bbox, p| BBox {
                min: Point::new(bbox.min.x().min(p.x()), bbox.min.y().min(p.y())),
                max: Point::new(bbox.max.x().max(p.x()), bbox.max.y().max(p.y())),
            },
        );
        Some(bbox)
    }

    pub fn min(&self) -> Point {
        self.min
    }

    pub fn max(&self) -> Point {
        self.max
    }

    pub fn width(&self) -> Coord {
        self.max.x() - self.min.x()
    }

    pub fn height(&self) -> Coord {
        self.max.y() - self.min.y()
    }

    /// Center of the box, truncated toward zero
    pub fn center(&self) -> Point {
        self.min.midpoint(self.max)
    }
}

/// Round to the nearest integer coordinate, halves away from zero
#[inline]
pub fn round_coord(value: Scalar) -> Coord {
    value.round() as Coord
}

/// Apex of an equilateral triangle standing on `start -> start + (side, 0)`
///
/// Y axis points down, so the apex is above the base for positive `side`.
pub(crate) fn equilateral_apex(start: Point, side: Coord) -> Point {
    let height = (side as Scalar * SQRT_3 / 2.0) as Coord;
    Point::new(start.x() + side / 2, start.y() - height)
}
