use geo::{Coord, LineString};
use serde::{Deserialize, Serialize};

use super::ring::{InvalidRing, ValidRing};

/// A 2D point in drawing units (meters).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vertex {
    pub x: f64,
    pub y: f64,
}

impl Vertex {
    #[inline] pub fn new(x: f64, y: f64) -> Self { Self { x, y } }

    #[inline] pub(crate) fn is_finite(&self) -> bool { self.x.is_finite() && self.y.is_finite() }
}

impl From<(f64, f64)> for Vertex {
    #[inline] fn from((x, y): (f64, f64)) -> Self { Self { x, y } }
}

impl From<Vertex> for Coord<f64> {
    #[inline] fn from(v: Vertex) -> Self { Coord { x: v.x, y: v.y } }
}

/// A closed polygon given by its ordered vertices.
/// The edge from the last vertex back to the first is implicit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Polygon {
    vertices: Vec<Vertex>,
}

impl Polygon {
    pub fn new(vertices: Vec<Vertex>) -> Self { Self { vertices } }

    /// Get the vertices as given by the drawing.
    #[inline] pub fn vertices(&self) -> &[Vertex] { &self.vertices }

    /// Get the number of vertices (including a repeated closing vertex, if present).
    #[inline] pub fn len(&self) -> usize { self.vertices.len() }

    #[inline] pub fn is_empty(&self) -> bool { self.vertices.is_empty() }

    /// Count vertices after collapsing consecutive duplicates (cyclically).
    pub fn distinct_vertex_count(&self) -> usize {
        let n = self.vertices.len();
        if n == 0 { return 0 }

        let repeats = (0..n)
            .filter(|&i| self.vertices[i] == self.vertices[(i + 1) % n])
            .count();

        // A ring of identical points collapses to one point, not zero.
        (n - repeats).max(1)
    }

    /// Signed shoelace area: positive for counter-clockwise rings.
    pub fn signed_area(&self) -> f64 {
        let n = self.vertices.len();
        if n < 3 { return 0.0 }

        let mut a = 0.0;
        for i in 0..n {
            let (p, q) = (self.vertices[i], self.vertices[(i + 1) % n]);
            a += p.x * q.y - q.x * p.y;
        }
        a / 2.0
    }

    /// Unsigned shoelace area over the implicit cyclic vertex sequence.
    /// Polygons with fewer than three distinct vertices have zero area.
    pub fn area(&self) -> f64 {
        if self.distinct_vertex_count() < 3 { return 0.0 }
        self.signed_area().abs()
    }

    /// Closed coordinate sequence: the start vertex is appended if the drawing left the ring open.
    pub(crate) fn closed_coords(&self) -> Vec<Coord<f64>> {
        let mut coords: Vec<Coord<f64>> = self.vertices.iter().map(|&v| v.into()).collect();
        if let (Some(&first), Some(&last)) = (coords.first(), coords.last()) {
            if first != last {
                coords.push(first);
            }
        }
        coords
    }

    /// Closed ring as a geo LineString.
    #[inline] pub(crate) fn to_line_string(&self) -> LineString<f64> { LineString::new(self.closed_coords()) }

    /// Close the ring and check it is usable for spatial predicates.
    /// Self-intersecting or degenerate rings come back as `Err(InvalidRing)` rather than panicking.
    #[inline]
    pub fn to_validated_ring(&self) -> Result<ValidRing, InvalidRing> {
        ValidRing::try_from_polygon(self)
    }
}

impl<V: Into<Vertex>> FromIterator<V> for Polygon {
    fn from_iter<I: IntoIterator<Item = V>>(iter: I) -> Self {
        Self::new(iter.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn poly(points: &[(f64, f64)]) -> Polygon {
        points.iter().copied().collect()
    }

    #[test]
    fn unit_square_area() {
        assert_eq!(poly(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]).area(), 1.0);
    }

    #[test]
    fn right_triangle_area() {
        assert_eq!(poly(&[(0.0, 0.0), (4.0, 0.0), (0.0, 3.0)]).area(), 6.0);
    }

    #[test]
    fn area_ignores_orientation() {
        let ccw = poly(&[(0.0, 0.0), (2.0, 0.0), (2.0, 3.0), (0.0, 3.0)]);
        let cw = poly(&[(0.0, 3.0), (2.0, 3.0), (2.0, 0.0), (0.0, 0.0)]);

        assert!(ccw.signed_area() > 0.0);
        assert!(cw.signed_area() < 0.0);
        assert_eq!(ccw.area(), cw.area());
    }

    #[test]
    fn explicitly_closed_ring_has_same_area() {
        let open = poly(&[(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0)]);
        let closed = poly(&[(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0), (0.0, 0.0)]);
        assert_eq!(open.area(), closed.area());
    }

    #[test]
    fn fewer_than_three_distinct_vertices_is_zero() {
        assert_eq!(poly(&[]).area(), 0.0);
        assert_eq!(poly(&[(0.0, 0.0), (1.0, 1.0)]).area(), 0.0);
        assert_eq!(poly(&[(0.0, 0.0), (1.0, 1.0), (1.0, 1.0), (0.0, 0.0)]).area(), 0.0);
        assert_eq!(poly(&[(2.0, 2.0), (2.0, 2.0), (2.0, 2.0)]).distinct_vertex_count(), 1);
    }

    #[test]
    fn closed_coords_appends_start_once() {
        let open = poly(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0)]);
        assert_eq!(open.closed_coords().len(), 4);

        let closed = poly(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 0.0)]);
        assert_eq!(closed.closed_coords().len(), 4);
    }
}
