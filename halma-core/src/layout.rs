//! Board layouts: which points exist and which region each belongs to
//!
//! The polygonal board is a central polygon (the shared area, region 0) with
//! a triangular wedge standing on each of its edges. Wedge `i` is region `i`
//! and its antipodal wedge is the region its pieces must reach. Only points
//! with an even coordinate sum exist, which turns the square grid into a
//! triangular lattice with six neighbours per point.

use crate::error::ConfigError;
use crate::geometry::{grid_intersection, point_enclosed_by, trapping_lines, Line, Point};
use crate::piece::{Piece, Region, CENTER};

// ============================================================================
// CONSTANTS
// ============================================================================

const SQUARE: [Line; 4] = [
    Line::new(0, 1, 4),
    Line::new(1, 0, 4),
    Line::new(0, 1, -4),
    Line::new(1, 0, -4),
];

const HEXAGON: [Line; 6] = [
    Line::new(0, 1, 4),
    Line::new(1, 1, 8),
    Line::new(1, -1, 8),
    Line::new(0, 1, -4),
    Line::new(1, 1, -8),
    Line::new(1, -1, -8),
];

const OCTAGON: [Line; 8] = [
    Line::new(0, 1, 8),
    Line::new(1, 1, 12),
    Line::new(1, 0, 8),
    Line::new(1, -1, 12),
    Line::new(0, 1, -8),
    Line::new(1, 1, -12),
    Line::new(1, 0, -8),
    Line::new(1, -1, -12),
];

/// Region counts with a central polygon
pub const SUPPORTED_REGION_COUNTS: [usize; 3] = [4, 6, 8];

/// Neighbour vectors on the even-sum lattice
pub const DIRECTIONS: [Point; 6] = [
    Point::new(-1, -1),
    Point::new(-1, 1),
    Point::new(1, -1),
    Point::new(1, 1),
    Point::new(-2, 0),
    Point::new(2, 0),
];

fn central_polygon(sides: usize) -> Option<&'static [Line]> {
    match sides {
        4 => Some(&SQUARE),
        6 => Some(&HEXAGON),
        8 => Some(&OCTAGON),
        _ => None,
    }
}

// ============================================================================
// LAYOUT INTERFACE
// ============================================================================

/// Board shape: containment, region membership and entry rules
pub trait Layout: Clone + Send + Sync {
    /// Number of player regions `n`; valid regions are `0..=n`
    fn region_count(&self) -> usize;

    /// Single-step movement vectors
    fn directions(&self) -> &[Point];

    /// Unit vector from `region` towards its opposite region (heuristics only)
    fn positive_direction(&self, region: Region) -> Point;

    /// Whether `point` is on the board
    fn contains(&self, point: Point) -> bool;

    /// All board points
    fn points(&self) -> Vec<Point>;

    /// Region of a board point, `None` off the board
    fn region(&self, point: Point) -> Option<Region>;

    /// Antipodal region, `None` for the centre
    fn opposite_region(&self, region: Region) -> Option<Region>;

    /// Extremal point of a player region (where its pieces start)
    fn corner(&self, region: Region) -> Option<Point>;

    fn is_valid_region(&self, region: Region) -> bool {
        (region as usize) <= self.region_count()
    }

    /// Entry rule. Jump landings pass `relax_region_restriction` so chains
    /// may cross regions the piece could never stop in.
    fn can_enter(&self, piece: &Piece, point: Point, relax_region_restriction: bool) -> bool {
        let Some(point_region) = self.region(point) else {
            return false;
        };
        if !self.is_valid_region(piece.region) || !self.is_valid_region(point_region) {
            return false;
        }
        if point_region == CENTER {
            return true;
        }
        relax_region_restriction
            || point_region == piece.region
            || self.opposite_region(piece.region) == Some(point_region)
    }

    /// Whether `piece` may rest where it stands
    fn is_valid_piece(&self, piece: &Piece) -> bool {
        piece.region != CENTER
            && self.is_valid_region(piece.region)
            && self.contains(piece.point)
            && self.can_enter(piece, piece.point, false)
    }
}

// ============================================================================
// POLYGON LAYOUT
// ============================================================================

/// Polygonal board with 4, 6 or 8 wedge regions
#[derive(Clone, Debug)]
pub struct PolygonLayout {
    central: Vec<Line>,
    wedges: Vec<[Line; 2]>,
    corners: Vec<Point>,
    x_bounds: (i32, i32),
    y_bounds: (i32, i32),
}

impl PolygonLayout {
    /// Build the board for `sides` regions
    pub fn new(sides: usize) -> Result<Self, ConfigError> {
        let central = central_polygon(sides)
            .ok_or(ConfigError::UnsupportedRegionCount(sides))?
            .to_vec();

        let mut wedges = Vec::with_capacity(sides);
        for cur in 0..sides {
            let prev = (cur + sides - 1) % sides;
            let next = (cur + 1) % sides;
            let p1 = grid_intersection(central[cur], central[prev])?;
            let p2 = grid_intersection(central[cur], central[next])?;
            wedges.push(trapping_lines(p1, p2)?);
        }

        let corners = wedges
            .iter()
            .map(|&[l1, l2]| grid_intersection(l1, l2))
            .collect::<Result<Vec<_>, _>>()?;

        let bounds = |coord: fn(&Point) -> i32| {
            let values = corners.iter().map(coord);
            (
                values.clone().min().unwrap_or(0),
                values.max().unwrap_or(0),
            )
        };
        let x_bounds = bounds(|p| p.x);
        let y_bounds = bounds(|p| p.y);

        Ok(Self {
            central,
            wedges,
            corners,
            x_bounds,
            y_bounds,
        })
    }

    /// Edges of the shared central polygon
    pub fn central_polygon(&self) -> &[Line] {
        &self.central
    }

    /// Outer bounding line pair of each wedge, in region order
    pub fn outer_polygon(&self) -> &[[Line; 2]] {
        &self.wedges
    }

    /// Wedge apexes, in region order
    pub fn corners(&self) -> &[Point] {
        &self.corners
    }

    pub fn x_bounds(&self) -> (i32, i32) {
        self.x_bounds
    }

    pub fn y_bounds(&self) -> (i32, i32) {
        self.y_bounds
    }

    fn in_central_polygon(&self, point: Point) -> bool {
        self.central.iter().all(|line| line.is_origin_side(point))
    }

    fn wedge_of(&self, point: Point) -> Option<Region> {
        self.central
            .iter()
            .zip(&self.wedges)
            .position(|(line, wedge)| point_enclosed_by(point, line, wedge))
            .map(|idx| idx as Region + 1)
    }
}

impl Layout for PolygonLayout {
    fn region_count(&self) -> usize {
        self.central.len()
    }

    fn directions(&self) -> &[Point] {
        &DIRECTIONS
    }

    fn positive_direction(&self, region: Region) -> Point {
        assert!(
            region != CENTER && self.is_valid_region(region),
            "positive direction is only defined for player regions"
        );
        let (a, b, c) = self.central[region as usize - 1].coefficients();
        Point::new(-a * c.signum(), -b * c.signum())
    }

    fn contains(&self, point: Point) -> bool {
        if (point.x + point.y) & 1 != 0 {
            return false;
        }
        let (x_min, x_max) = self.x_bounds;
        let (y_min, y_max) = self.y_bounds;
        if point.x < x_min || point.x > x_max || point.y < y_min || point.y > y_max {
            return false;
        }
        self.in_central_polygon(point) || self.wedge_of(point).is_some()
    }

    fn points(&self) -> Vec<Point> {
        let (x_min, x_max) = self.x_bounds;
        let (y_min, y_max) = self.y_bounds;
        (x_min..=x_max)
            .flat_map(|x| (y_min..=y_max).map(move |y| Point::new(x, y)))
            .filter(|&p| self.contains(p))
            .collect()
    }

    fn region(&self, point: Point) -> Option<Region> {
        if !self.contains(point) {
            return None;
        }
        Some(self.wedge_of(point).unwrap_or(CENTER))
    }

    fn opposite_region(&self, region: Region) -> Option<Region> {
        if region == CENTER {
            return None;
        }
        let n = self.region_count();
        Some((((region as usize - 1) + n / 2) % n + 1) as Region)
    }

    fn corner(&self, region: Region) -> Option<Point> {
        if region == CENTER {
            return None;
        }
        self.corners.get(region as usize - 1).copied()
    }
}

// ============================================================================
// TESTS
// ============================================================================
