//! Region filter deciding which nodes transmit and which are counted.
//!
//! Contains helper functions for:
//! - Point-in-polygon tests (even-odd rule, boundary counts as inside)
//! - Inclusive bounding-box membership
//! - The `PosEnabler` gate combining a Tx polygon, an Rx polygon and a set of
//!   enabling boxes

use serde::Deserialize;
use std::fmt;
use thiserror::Error;

/// Simple 2D point in meters.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: &Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Which of the two statistics polygons a test refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolygonKind {
    Tx,
    Rx,
}

impl fmt::Display for PolygonKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PolygonKind::Tx => write!(f, "tx"),
            PolygonKind::Rx => write!(f, "rx"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    #[error("{kind} polygon needs at least 3 vertices, got {count}")]
    TooFewVertices { kind: PolygonKind, count: usize },
    #[error("bounding box {index} is degenerate: x1 {x1} must be < x2 {x2} and y1 {y1} must be < y2 {y2}")]
    DegenerateBoundingBox { index: usize, x1: f64, x2: f64, y1: f64, y2: f64 },
}

/// Axis-aligned box, bounds inclusive.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub x1: f64,
    pub x2: f64,
    pub y1: f64,
    pub y2: f64,
}

impl BoundingBox {
    pub fn contains(&self, p: &Point) -> bool {
        p.x >= self.x1 && p.x <= self.x2 && p.y >= self.y1 && p.y <= self.y2
    }
}

/// Closed simple polygon with at least three vertices.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    vertices: Vec<Point>,
}

impl Polygon {
    pub fn new(kind: PolygonKind, vertices: Vec<Point>) -> Result<Self, GeometryError> {
        if vertices.len() < 3 {
            return Err(GeometryError::TooFewVertices {
                kind,
                count: vertices.len(),
            });
        }
        Ok(Self { vertices })
    }

    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    /// Even-odd point-in-polygon test; points on an edge are inside.
    pub fn contains(&self, p: &Point) -> bool {
        let n = self.vertices.len();
        for i in 0..n {
            let a = &self.vertices[i];
            let b = &self.vertices[(i + 1) % n];
            if orientation(a, p, b) == 0 && on_segment(a, p, b) {
                return true;
            }
        }

        let mut inside = false;
        let mut j = n - 1;
        for i in 0..n {
            let vi = &self.vertices[i];
            let vj = &self.vertices[j];
            // half-open rule on y so a ray through a vertex is counted once
            if (vi.y > p.y) != (vj.y > p.y) {
                let x_cross = vi.x + (p.y - vi.y) * (vj.x - vi.x) / (vj.y - vi.y);
                if p.x < x_cross {
                    inside = !inside;
                }
            }
            j = i;
        }
        inside
    }
}

/// Orientation of ordered triplet (a,b,c): returns 1 if clockwise, -1 if
/// counter-clockwise, and 0 if collinear.
fn orientation(a: &Point, b: &Point, c: &Point) -> i32 {
    let val = (b.y - a.y) * (c.x - b.x) - (b.x - a.x) * (c.y - b.y);
    if val > 0.0 {
        1
    } else if val < 0.0 {
        -1
    } else {
        0
    }
}

/// True if point b lies on segment a–c, assuming collinearity.
fn on_segment(a: &Point, b: &Point, c: &Point) -> bool {
    b.x >= a.x.min(c.x) && b.x <= a.x.max(c.x) && b.y >= a.y.min(c.y) && b.y <= a.y.max(c.y)
}

/// Position gate for transmission enabling and statistics membership.
///
/// With the checker disabled every position is enabled. With the checker
/// enabled a position is enabled iff it lies inside at least one bounding
/// box. The Tx and Rx polygons are independent of the checker and select the
/// nodes that statistics count as transmitters and receivers; an unset
/// polygon includes every position.
#[derive(Debug, Clone, Default)]
pub struct PosEnabler {
    tx_polygon: Option<Polygon>,
    rx_polygon: Option<Polygon>,
    bounding_boxes: Vec<BoundingBox>,
    checker_enabled: bool,
}

impl PosEnabler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_polygon(&mut self, kind: PolygonKind, vertices: Vec<Point>) -> Result<(), GeometryError> {
        let polygon = Polygon::new(kind, vertices)?;
        match kind {
            PolygonKind::Tx => self.tx_polygon = Some(polygon),
            PolygonKind::Rx => self.rx_polygon = Some(polygon),
        }
        Ok(())
    }

    pub fn set_bounding_boxes(&mut self, boxes: Vec<BoundingBox>) -> Result<(), GeometryError> {
        for (index, bb) in boxes.iter().enumerate() {
            if bb.x1 >= bb.x2 || bb.y1 >= bb.y2 {
                return Err(GeometryError::DegenerateBoundingBox {
                    index,
                    x1: bb.x1,
                    x2: bb.x2,
                    y1: bb.y1,
                    y2: bb.y2,
                });
            }
        }
        self.bounding_boxes = boxes;
        Ok(())
    }

    pub fn enable_checker(&mut self) {
        self.checker_enabled = true;
    }

    pub fn disable_checker(&mut self) {
        self.checker_enabled = false;
    }

    pub fn is_inside(&self, kind: PolygonKind, p: &Point) -> bool {
        let polygon = match kind {
            PolygonKind::Tx => &self.tx_polygon,
            PolygonKind::Rx => &self.rx_polygon,
        };
        polygon.as_ref().is_none_or(|poly| poly.contains(p))
    }

    pub fn is_enabled(&self, p: &Point) -> bool {
        !self.checker_enabled || self.bounding_boxes.iter().any(|bb| bb.contains(p))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64) -> Point {
        Point { x, y }
    }

    fn square() -> Vec<Point> {
        vec![p(0.0, 0.0), p(10.0, 0.0), p(10.0, 10.0), p(0.0, 10.0)]
    }

    #[test]
    fn polygon_needs_three_vertices() {
        let err = Polygon::new(PolygonKind::Rx, vec![p(0.0, 0.0), p(1.0, 1.0)]).unwrap_err();
        assert_eq!(err, GeometryError::TooFewVertices { kind: PolygonKind::Rx, count: 2 });
    }

    #[test]
    fn point_in_polygon_interior_boundary_exterior() {
        let poly = Polygon::new(PolygonKind::Tx, square()).unwrap();
        assert!(poly.contains(&p(5.0, 5.0)));
        assert!(poly.contains(&p(0.0, 5.0)));
        assert!(poly.contains(&p(10.0, 10.0)));
        assert!(!poly.contains(&p(10.5, 5.0)));
        assert!(!poly.contains(&p(-1.0, 0.0)));
    }

    #[test]
    fn ray_through_vertex_is_counted_once() {
        // diamond whose left and right corners lie on the test ray
        let poly = Polygon::new(PolygonKind::Tx, vec![p(0.0, 5.0), p(5.0, 0.0), p(10.0, 5.0), p(5.0, 10.0)]).unwrap();
        assert!(poly.contains(&p(5.0, 5.0)));
        assert!(!poly.contains(&p(-3.0, 5.0)));
        assert!(!poly.contains(&p(12.0, 5.0)));
    }

    #[test]
    fn concave_polygon_notch_is_outside() {
        let u_shape = vec![p(0.0, 0.0), p(9.0, 0.0), p(9.0, 9.0), p(6.0, 9.0), p(6.0, 3.0), p(3.0, 3.0), p(3.0, 9.0), p(0.0, 9.0)];
        let poly = Polygon::new(PolygonKind::Rx, u_shape).unwrap();
        assert!(!poly.contains(&p(4.5, 6.0)));
        assert!(poly.contains(&p(1.5, 6.0)));
        assert!(poly.contains(&p(4.5, 1.5)));
    }

    #[test]
    fn disabled_checker_enables_everything() {
        let mut enabler = PosEnabler::new();
        enabler
            .set_bounding_boxes(vec![BoundingBox { x1: 0.0, x2: 10.0, y1: 0.0, y2: 10.0 }])
            .unwrap();
        assert!(enabler.is_enabled(&p(100.0, 100.0)));
        enabler.enable_checker();
        assert!(!enabler.is_enabled(&p(100.0, 100.0)));
        assert!(enabler.is_enabled(&p(10.0, 0.0)));
        enabler.disable_checker();
        assert!(enabler.is_enabled(&p(100.0, 100.0)));
    }

    #[test]
    fn enabled_when_inside_any_box() {
        let mut enabler = PosEnabler::new();
        enabler
            .set_bounding_boxes(vec![
                BoundingBox { x1: 0.0, x2: 10.0, y1: 0.0, y2: 10.0 },
                BoundingBox { x1: 50.0, x2: 60.0, y1: 0.0, y2: 10.0 },
            ])
            .unwrap();
        enabler.enable_checker();
        assert!(enabler.is_enabled(&p(55.0, 5.0)));
        assert!(!enabler.is_enabled(&p(30.0, 5.0)));
    }

    #[test]
    fn degenerate_box_rejected() {
        let mut enabler = PosEnabler::new();
        let err = enabler
            .set_bounding_boxes(vec![BoundingBox { x1: 5.0, x2: 5.0, y1: 0.0, y2: 1.0 }])
            .unwrap_err();
        assert!(matches!(err, GeometryError::DegenerateBoundingBox { index: 0, .. }));
    }

    #[test]
    fn unset_polygons_include_everything() {
        let mut enabler = PosEnabler::new();
        assert!(enabler.is_inside(PolygonKind::Rx, &p(1e6, 1e6)));
        enabler.set_polygon(PolygonKind::Rx, square()).unwrap();
        assert!(!enabler.is_inside(PolygonKind::Rx, &p(1e6, 1e6)));
        assert!(enabler.is_inside(PolygonKind::Tx, &p(1e6, 1e6)));
    }
}
