//! Integer plane geometry: points, normalized lines and their intersections

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub};

// ============================================================================
// POINT
// ============================================================================

/// Grid point in board coordinates
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const ORIGIN: Point = Point::new(0, 0);

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, other: Point) -> Point {
        Point::new(self.x + other.x, self.y + other.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, other: Point) -> Point {
        Point::new(self.x - other.x, self.y - other.y)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

// ============================================================================
// LINE
// ============================================================================

/// Line `a*x + b*y = c` with canonical sign (`a > 0`, or `a == 0 && b > 0`)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Line {
    a: i32,
    b: i32,
    c: i32,
}

impl Line {
    pub const fn new(a: i32, b: i32, c: i32) -> Self {
        assert!(a != 0 || b != 0, "a line needs a non-zero normal");
        if a < 0 || (a == 0 && b < 0) {
            Self { a: -a, b: -b, c: -c }
        } else {
            Self { a, b, c }
        }
    }

    /// Line through two distinct points
    pub fn from_points(p1: Point, p2: Point) -> Self {
        let d = p2 - p1;
        let (a, b) = (-d.y, d.x);
        Self::new(a, b, a * p1.x + b * p1.y)
    }

    /// Line through `point` with normal `(a, b)`
    pub fn through(point: Point, normal: (i32, i32)) -> Self {
        let (a, b) = normal;
        Self::new(a, b, a * point.x + b * point.y)
    }

    pub fn coefficients(&self) -> (i32, i32, i32) {
        (self.a, self.b, self.c)
    }

    /// `a*x + b*y - c`
    pub fn evaluate(&self, point: Point) -> i32 {
        self.a * point.x + self.b * point.y - self.c
    }

    /// Sign of [`Line::evaluate`]: +1, 0 or -1
    pub fn side(&self, point: Point) -> i32 {
        self.evaluate(point).signum()
    }

    /// Same side as the origin; points on the line count as origin-side
    pub fn is_origin_side(&self, point: Point) -> bool {
        let side = self.side(point);
        side == 0 || side != self.c.signum()
    }
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x + {}y = {}", self.a, self.b, self.c)
    }
}

// ============================================================================
// INTERSECTIONS
// ============================================================================

/// Rational intersection point `(x_num / den, y_num / den)`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Intersection {
    x_num: i64,
    y_num: i64,
    den: i64,
}

impl Intersection {
    pub fn is_integral(&self) -> bool {
        self.x_num % self.den == 0 && self.y_num % self.den == 0
    }

    pub fn as_f64(&self) -> (f64, f64) {
        (
            self.x_num as f64 / self.den as f64,
            self.y_num as f64 / self.den as f64,
        )
    }

    /// Convert to a grid point; a fractional result is a construction bug
    pub fn to_point(self, l1: Line, l2: Line) -> Result<Point, ConfigError> {
        if !self.is_integral() {
            let (x, y) = self.as_f64();
            return Err(ConfigError::NonIntegralIntersection { l1, l2, x, y });
        }
        Ok(Point::new(
            (self.x_num / self.den) as i32,
            (self.y_num / self.den) as i32,
        ))
    }
}

/// Solve the 2x2 system; `None` when the lines are parallel or coincident
pub fn line_intersection(l1: Line, l2: Line) -> Option<Intersection> {
    let (a1, b1, c1) = (l1.a as i64, l1.b as i64, l1.c as i64);
    let (a2, b2, c2) = (l2.a as i64, l2.b as i64, l2.c as i64);
    let den = a1 * b2 - a2 * b1;
    if den == 0 {
        return None;
    }
    Some(Intersection {
        x_num: c1 * b2 - c2 * b1,
        y_num: a1 * c2 - a2 * c1,
        den,
    })
}

/// Integral intersection of two lines, or the matching configuration error
pub fn grid_intersection(l1: Line, l2: Line) -> Result<Point, ConfigError> {
    line_intersection(l1, l2)
        .ok_or(ConfigError::ParallelLines(l1, l2))?
        .to_point(l1, l2)
}

// ============================================================================
// WEDGES
// ============================================================================

/// The two outer lines that close the wedge standing on edge `p1 -> p2`.
///
/// Together with the edge line they bound a triangle whose apex lies on the
/// far side of the edge from the origin.
pub fn trapping_lines(p1: Point, p2: Point) -> Result<[Line; 2], ConfigError> {
    let d = p2 - p1;
    let normals = if d.x == 0 {
        [(1, 1), (1, -1)]
    } else if d.y == 0 {
        [(1, 1), (-1, 1)]
    } else if d.x == -d.y {
        [(0, 1), (1, -1)]
    } else if d.x == d.y {
        [(0, 1), (1, 1)]
    } else {
        return Err(ConfigError::NoTrappingLines(p1, p2));
    };

    let edge = Line::from_points(p1, p2);
    for (n1, n2) in [(normals[0], normals[1]), (normals[1], normals[0])] {
        let l1 = Line::through(p1, n1);
        let l2 = Line::through(p2, n2);
        let apex = grid_intersection(l1, l2)?;
        if edge.side(Point::ORIGIN) != edge.side(apex) {
            return Ok([l1, l2]);
        }
    }

    Err(ConfigError::NoTrappingLines(p1, p2))
}

/// Beyond `line` (away from the origin) and inside every bounding line
pub fn point_enclosed_by(point: Point, line: &Line, bounding: &[Line]) -> bool {
    !line.is_origin_side(point) && bounding.iter().all(|l| l.is_origin_side(point))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_arithmetic() {
        let p = Point::new(3, -2) + Point::new(1, 5);
        assert_eq!(p, Point::new(4, 3));
        assert_eq!(p - Point::new(4, 3), Point::ORIGIN);
    }

    #[test]
    fn test_line_normalization() {
        assert_eq!(Line::new(-1, 2, 3), Line::new(1, -2, -3));
        assert_eq!(Line::new(0, -1, 4), Line::new(0, 1, -4));
        assert_eq!(
            Line::from_points(Point::new(0, 0), Point::new(2, 2)),
            Line::from_points(Point::new(2, 2), Point::new(0, 0))
        );
    }

    #[test]
    #[should_panic]
    fn test_degenerate_line_panics() {
        let _ = Line::new(0, 0, 1);
    }

    #[test]
    fn test_side_and_origin_side() {
        let line = Line::new(1, 0, 2); // x = 2
        assert_eq!(line.side(Point::new(3, 0)), 1);
        assert_eq!(line.side(Point::new(2, 7)), 0);
        assert_eq!(line.side(Point::new(-1, 0)), -1);
        assert!(line.is_origin_side(Point::new(0, 5)));
        assert!(line.is_origin_side(Point::new(2, 5)));
        assert!(!line.is_origin_side(Point::new(4, 0)));

        // Through the origin: everything counts as origin-side
        let diag = Line::new(1, -1, 0);
        assert!(diag.is_origin_side(Point::new(5, -5)));
    }

    #[test]
    fn test_line_intersection() {
        let l1 = Line::new(1, -1, 0);
        let l2 = Line::new(1, 1, 4);
        let hit = line_intersection(l1, l2).unwrap();
        assert!(hit.is_integral());
        assert_eq!(hit.to_point(l1, l2).unwrap(), Point::new(2, 2));
    }

    #[test]
    fn test_parallel_lines() {
        let l1 = Line::new(1, -1, 0);
        let l2 = Line::new(2, -2, 0);
        assert!(line_intersection(l1, l2).is_none());
        assert_eq!(
            grid_intersection(l1, l2),
            Err(ConfigError::ParallelLines(l1, l2))
        );
    }

    #[test]
    fn test_fractional_intersection_is_error() {
        let l1 = Line::new(1, 1, 1);
        let l2 = Line::new(1, -1, 0);
        assert!(matches!(
            grid_intersection(l1, l2),
            Err(ConfigError::NonIntegralIntersection { .. })
        ));
    }

    #[test]
    fn test_trapping_lines_vertical() {
        let lines = trapping_lines(Point::new(2, 0), Point::new(2, 4)).unwrap();
        assert_eq!(lines[0].to_string(), "1x + -1y = 2");
        assert_eq!(lines[1].to_string(), "1x + 1y = 6");
    }

    #[test]
    fn test_trapping_lines_diagonal() {
        let lines = trapping_lines(Point::new(1, 1), Point::new(4, 4)).unwrap();
        assert_eq!(lines[0].to_string(), "0x + 1y = 1");
        assert_eq!(lines[1].to_string(), "1x + 1y = 8");
    }

    #[test]
    fn test_trapping_lines_rejects_skew_edge() {
        assert_eq!(
            trapping_lines(Point::new(0, 0), Point::new(1, 3)),
            Err(ConfigError::NoTrappingLines(Point::new(0, 0), Point::new(1, 3)))
        );
    }

    #[test]
    fn test_point_enclosed_by() {
        let central = Line::new(1, 0, 2);
        let bounding = [Line::new(1, 1, 4), Line::new(1, -1, 4)];
        assert!(point_enclosed_by(Point::new(3, 0), &central, &bounding));
        assert!(!point_enclosed_by(Point::new(1, 0), &central, &bounding));
        assert!(!point_enclosed_by(Point::new(5, 5), &central, &bounding));
    }
}
