use std::fmt;

use geo::algorithm::line_intersection::{line_intersection, LineIntersection};
use geo::{Area, BooleanOps, BoundingRect, Coord, Line, LineString, MultiPolygon, Rect};
use rstar::RTree;
use serde::Serialize;

use super::{bbox::{envelope, BoundingBox}, polygon::Polygon};

/// Why a ring cannot take part in spatial predicates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InvalidReason {
    NonFinite,        // NaN or infinite coordinate
    TooFewVertices,   // fewer than 3 distinct vertices
    ZeroArea,         // all vertices collinear
    SelfIntersecting, // edges cross, touch or fold back on each other
}

impl fmt::Display for InvalidReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            InvalidReason::NonFinite => "non-finite coordinate",
            InvalidReason::TooFewVertices => "fewer than 3 distinct vertices",
            InvalidReason::ZeroArea => "zero area",
            InvalidReason::SelfIntersecting => "self-intersecting ring",
        })
    }
}

/// A closed ring that failed validation.
#[derive(Debug, Clone)]
pub struct InvalidRing {
    reason: InvalidReason,
    ring: LineString<f64>,
}

impl InvalidRing {
    #[inline] pub fn reason(&self) -> InvalidReason { self.reason }

    /// Attempt a validity repair by resolving the ring against itself.
    /// Only self-intersecting rings are repairable; degenerate ones have nothing left to keep.
    pub fn repair(&self) -> Option<ValidRing> {
        if self.reason != InvalidReason::SelfIntersecting { return None }

        let polygon = geo::Polygon::new(self.ring.clone(), vec![]);
        let resolved = polygon.union(&polygon);
        ValidRing::from_shape(resolved, true)
    }
}

/// A closed, simple, non-degenerate ring ready for containment and overlap tests.
/// Repaired rings may resolve into several parts, hence the MultiPolygon.
#[derive(Debug, Clone)]
pub struct ValidRing {
    shape: MultiPolygon<f64>,
    bbox: Rect<f64>,
    area: f64,
    repaired: bool,
}

impl ValidRing {
    pub(crate) fn try_from_polygon(polygon: &Polygon) -> Result<Self, InvalidRing> {
        let ring = polygon.to_line_string();
        let invalid = |reason| Err(InvalidRing { reason, ring: ring.clone() });

        if !polygon.vertices().iter().all(|v| v.is_finite()) {
            return invalid(InvalidReason::NonFinite);
        }
        if polygon.distinct_vertex_count() < 3 {
            return invalid(InvalidReason::TooFewVertices);
        }
        if is_collinear(&ring) {
            return invalid(InvalidReason::ZeroArea);
        }
        // Checked before the area: a symmetric bow tie has zero shoelace area.
        if is_self_intersecting(&ring) {
            return invalid(InvalidReason::SelfIntersecting);
        }

        let shape = MultiPolygon::new(vec![geo::Polygon::new(ring.clone(), vec![])]);
        Self::from_shape(shape, false).map_or_else(|| invalid(InvalidReason::ZeroArea), Ok)
    }

    fn from_shape(shape: MultiPolygon<f64>, repaired: bool) -> Option<Self> {
        let area = shape.unsigned_area();
        if !(area > 0.0) { return None }
        let bbox = shape.bounding_rect()?;
        Some(Self { shape, bbox, area, repaired })
    }

    /// Get the underlying geometry.
    #[inline] pub fn shape(&self) -> &MultiPolygon<f64> { &self.shape }

    /// Get the bounding rectangle.
    #[inline] pub fn bbox(&self) -> Rect<f64> { self.bbox }

    /// Area of the (possibly repaired) geometry.
    #[inline] pub fn area(&self) -> f64 { self.area }

    /// True if this ring came out of a validity repair.
    #[inline] pub fn is_repaired(&self) -> bool { self.repaired }
}

/// Drop consecutive repeated coordinates of a closed ring, keeping it closed.
fn dedup_closed(ring: &LineString<f64>) -> Vec<Coord<f64>> {
    let mut coords: Vec<Coord<f64>> = Vec::with_capacity(ring.0.len());
    for &c in &ring.0 {
        if coords.last() != Some(&c) {
            coords.push(c);
        }
    }
    coords
}

/// True if every vertex lies on the line through the first two distinct vertices.
fn is_collinear(ring: &LineString<f64>) -> bool {
    let coords = dedup_closed(ring);
    let Some(&a) = coords.first() else { return true };
    let Some(&b) = coords.iter().find(|&&c| c != a) else { return true };

    coords.iter().all(|c| (b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x) == 0.0)
}

/// Edge-pair check over an R-tree of edge bounding boxes.
/// Adjacent edges may only share their common vertex; any other contact is a self-intersection.
fn is_self_intersecting(ring: &LineString<f64>) -> bool {
    let coords = dedup_closed(ring);
    let lines: Vec<Line<f64>> = coords.windows(2)
        .map(|w| Line::new(w[0], w[1]))
        .collect();
    let m = lines.len();

    let rtree = RTree::bulk_load(lines.iter().enumerate()
        .map(|(i, line)| BoundingBox::new(i, line.bounding_rect()))
        .collect());

    for (i, line) in lines.iter().enumerate() {
        for other in rtree.locate_in_envelope_intersecting(&envelope(&line.bounding_rect(), 0.0)) {
            let j = other.idx();
            if j <= i { continue }

            let adjacent = j == i + 1 || (i == 0 && j == m - 1);
            match line_intersection(*line, lines[j]) {
                None => {}
                Some(LineIntersection::SinglePoint { .. }) if adjacent => {}
                Some(LineIntersection::Collinear { intersection }) if adjacent => {
                    // Folding back along the previous edge.
                    if intersection.start != intersection.end { return true }
                }
                Some(_) => return true,
            }
        }
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;

    fn poly(points: &[(f64, f64)]) -> Polygon {
        points.iter().copied().collect()
    }

    #[test]
    fn square_is_valid() {
        let ring = poly(&[(0.0, 0.0), (2.0, 0.0), (2.0, 2.0), (0.0, 2.0)])
            .to_validated_ring()
            .unwrap();

        assert_eq!(ring.area(), 4.0);
        assert!(!ring.is_repaired());
        assert_eq!(ring.bbox().min(), Coord { x: 0.0, y: 0.0 });
        assert_eq!(ring.bbox().max(), Coord { x: 2.0, y: 2.0 });
    }

    #[test]
    fn duplicated_vertices_are_tolerated() {
        let ring = poly(&[(0.0, 0.0), (2.0, 0.0), (2.0, 0.0), (2.0, 2.0), (0.0, 2.0), (0.0, 0.0)])
            .to_validated_ring();
        assert!(ring.is_ok());
    }

    #[test]
    fn bow_tie_is_self_intersecting() {
        let err = poly(&[(0.0, 0.0), (2.0, 2.0), (2.0, 0.0), (0.0, 2.0)])
            .to_validated_ring()
            .unwrap_err();
        assert_eq!(err.reason(), InvalidReason::SelfIntersecting);
    }

    #[test]
    fn bow_tie_repairs_to_positive_area() {
        let err = poly(&[(0.0, 0.0), (2.0, 2.0), (2.0, 0.0), (0.0, 2.0)])
            .to_validated_ring()
            .unwrap_err();

        let repaired = err.repair().expect("bow tie should be repairable");
        assert!(repaired.is_repaired());
        assert!(repaired.area() > 0.0);
        assert!(repaired.area() <= 2.0 + 1e-9);
    }

    #[test]
    fn degenerate_rings_are_rejected() {
        let collinear = poly(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0)]).to_validated_ring().unwrap_err();
        assert_eq!(collinear.reason(), InvalidReason::ZeroArea);
        assert!(collinear.repair().is_none());

        let two = poly(&[(0.0, 0.0), (1.0, 0.0)]).to_validated_ring().unwrap_err();
        assert_eq!(two.reason(), InvalidReason::TooFewVertices);

        let nan = poly(&[(0.0, 0.0), (f64::NAN, 0.0), (1.0, 1.0)]).to_validated_ring().unwrap_err();
        assert_eq!(nan.reason(), InvalidReason::NonFinite);
    }

    #[test]
    fn spike_is_self_intersecting() {
        // Walks out to (3, 1) and straight back along the same edge.
        let err = poly(&[(0.0, 0.0), (2.0, 0.0), (2.0, 1.0), (3.0, 1.0), (2.0, 1.0), (2.0, 2.0), (0.0, 2.0)])
            .to_validated_ring()
            .unwrap_err();
        assert_eq!(err.reason(), InvalidReason::SelfIntersecting);
    }

    #[test]
    fn tessellated_arc_is_valid() {
        let n = 4000;
        let circle: Polygon = (0..n)
            .map(|k| {
                let t = std::f64::consts::TAU * k as f64 / n as f64;
                (10.0 * t.cos(), 10.0 * t.sin())
            })
            .collect();

        let ring = circle.to_validated_ring().unwrap();
        assert!((ring.area() - std::f64::consts::PI * 100.0).abs() < 0.01);
    }

    #[test]
    fn crossing_between_distant_edges_is_found() {
        let star: Polygon = (0..5)
            .map(|k| {
                let t = std::f64::consts::TAU * (2 * k) as f64 / 5.0;
                (t.cos(), t.sin())
            })
            .collect();

        let err = star.to_validated_ring().unwrap_err();
        assert_eq!(err.reason(), InvalidReason::SelfIntersecting);
    }
}
