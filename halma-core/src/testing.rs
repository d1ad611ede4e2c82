//! Test doubles shared by the unit tests

use crate::geometry::Point;
use crate::layout::Layout;
use crate::piece::{Region, CENTER};

const ORTHOGONAL: [Point; 4] = [
    Point::new(1, 0),
    Point::new(0, 1),
    Point::new(-1, 0),
    Point::new(0, -1),
];

/// Rectangular grid: column 0 is region 1, the last column region 2,
/// everything in between is the shared centre.
#[derive(Clone, Debug)]
pub struct GridLayout {
    width: i32,
    height: i32,
}

impl GridLayout {
    pub fn new(width: i32, height: i32) -> Self {
        assert!(width >= 2 && height >= 1);
        Self { width, height }
    }
}

impl Layout for GridLayout {
    fn region_count(&self) -> usize {
        2
    }

    fn directions(&self) -> &[Point] {
        &ORTHOGONAL
    }

    fn positive_direction(&self, region: Region) -> Point {
        if region == 1 {
            Point::new(1, 0)
        } else {
            Point::new(-1, 0)
        }
    }

    fn contains(&self, point: Point) -> bool {
        (0..self.width).contains(&point.x) && (0..self.height).contains(&point.y)
    }

    fn points(&self) -> Vec<Point> {
        (0..self.width)
            .flat_map(|x| (0..self.height).map(move |y| Point::new(x, y)))
            .collect()
    }

    fn region(&self, point: Point) -> Option<Region> {
        if !self.contains(point) {
            return None;
        }
        Some(if point.x == 0 {
            1
        } else if point.x == self.width - 1 {
            2
        } else {
            CENTER
        })
    }

    fn opposite_region(&self, region: Region) -> Option<Region> {
        match region {
            1 => Some(2),
            2 => Some(1),
            _ => None,
        }
    }

    fn corner(&self, region: Region) -> Option<Point> {
        match region {
            1 => Some(Point::new(0, 0)),
            2 => Some(Point::new(self.width - 1, 0)),
            _ => None,
        }
    }
}
