use geo::{Area, BooleanOps, Buffer, Relate};
use tracing::{debug, trace, warn};

use crate::config::ComparisonConfig;
use super::{bbox, polygon::Polygon, ring::{InvalidReason, ValidRing}};

/// Area shared by two rings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Overlap {
    pub area: f64,
    /// The exact overlap was near zero and `area` comes from the buffered retry.
    pub estimated: bool,
}

impl Overlap {
    const NONE: Overlap = Overlap { area: 0.0, estimated: false };

    #[inline] pub fn is_empty(&self) -> bool { !(self.area > 0.0) }
}

/// Containment and overlap tests with the tolerances of one comparison run.
#[derive(Debug, Clone, Copy)]
pub struct SpatialPredicates {
    tangent_buffer: f64,
    tangent_epsilon: f64,
    min_estimated_area: f64,
}

impl Default for SpatialPredicates {
    fn default() -> Self { Self::from(&ComparisonConfig::default()) }
}

impl From<&ComparisonConfig> for SpatialPredicates {
    fn from(config: &ComparisonConfig) -> Self {
        Self {
            tangent_buffer: config.tangent_buffer,
            tangent_epsilon: config.tangent_epsilon,
            min_estimated_area: config.min_estimated_area,
        }
    }
}

impl SpatialPredicates {
    /// Exact overlaps at or below this count as none.
    #[inline] pub fn tangent_epsilon(&self) -> f64 { self.tangent_epsilon }

    /// Validate a polygon, repairing it if possible.
    /// Returns the reason it was rejected when neither works.
    pub fn resolve(&self, polygon: &Polygon) -> Result<ValidRing, InvalidReason> {
        match polygon.to_validated_ring() {
            Ok(ring) => Ok(ring),
            Err(invalid) => invalid.repair().ok_or(invalid.reason()),
        }
    }

    /// True iff `inner` lies entirely within the closed region of `outer`.
    /// The bounding boxes only reject early; the decision is made on the geometry.
    pub fn ring_contains(&self, outer: &ValidRing, inner: &ValidRing) -> bool {
        if !bbox::covers(&outer.bbox(), &inner.bbox()) { return false }
        outer.shape().relate(inner.shape()).is_contains()
    }

    /// Exact area of `a ∩ b`, with no near-tangent retry.
    pub fn ring_overlap_exact(&self, a: &ValidRing, b: &ValidRing) -> f64 {
        if !bbox::overlaps(&a.bbox(), &b.bbox()) { return 0.0 }
        a.shape().intersection(b.shape()).unsigned_area()
    }

    /// Area of `a ∩ b`, retrying with a buffered `a` when the exact overlap is near zero.
    pub fn ring_overlap(&self, a: &ValidRing, b: &ValidRing) -> Overlap {
        if !bbox::overlaps(&a.bbox(), &b.bbox()) { return Overlap::NONE }

        let exact = self.ring_overlap_exact(a, b);
        if exact > self.tangent_epsilon {
            return Overlap { area: exact, estimated: false };
        }

        match self.buffered_estimate(a, b) {
            Some(area) => {
                debug!(exact, estimate = area, "near-tangent overlap estimated from buffered ring");
                Overlap { area, estimated: true }
            }
            None => Overlap { area: exact.max(0.0), estimated: false },
        }
    }

    /// Intersect `b` with `a` grown by the tangent buffer, then scale the result back to
    /// the proportion of the unbuffered `a` it represents.
    fn buffered_estimate(&self, a: &ValidRing, b: &ValidRing) -> Option<f64> {
        if !(self.tangent_buffer > 0.0) { return None }

        let grown = a.shape().buffer(self.tangent_buffer);
        let grown_area = grown.unsigned_area();
        if !(grown_area > 0.0) { return None }

        let buffered = grown.intersection(b.shape()).unsigned_area();
        trace!(buffered, grown_area, "buffered retry");
        if buffered <= self.min_estimated_area { return None }

        let estimate = (a.area() * buffered / grown_area).min(a.area()).min(b.area());
        (estimate > self.min_estimated_area).then_some(estimate)
    }

    /// Containment on raw polygons; malformed geometry is never contained nor containing.
    pub fn contains(&self, outer: &Polygon, inner: &Polygon) -> bool {
        match (self.resolve(outer), self.resolve(inner)) {
            (Ok(outer), Ok(inner)) => self.ring_contains(&outer, &inner),
            _ => false,
        }
    }

    /// Overlap area on raw polygons; malformed geometry that cannot be repaired yields zero.
    pub fn intersection_area(&self, a: &Polygon, b: &Polygon) -> f64 {
        match (self.resolve(a), self.resolve(b)) {
            (Ok(a), Ok(b)) => self.ring_overlap(&a, &b).area,
            (Err(reason), _) | (_, Err(reason)) => {
                warn!(%reason, "intersection skipped for malformed polygon");
                0.0
            }
        }
    }

    /// True iff the polygons share a positive area.
    #[inline]
    pub fn intersects(&self, a: &Polygon, b: &Polygon) -> bool {
        self.intersection_area(a, b) > 0.0
    }
}

/// Containment test with default tolerances.
#[inline]
pub fn contains(outer: &Polygon, inner: &Polygon) -> bool {
    SpatialPredicates::default().contains(outer, inner)
}

/// Overlap area with default tolerances.
#[inline]
pub fn intersection_area(a: &Polygon, b: &Polygon) -> f64 {
    SpatialPredicates::default().intersection_area(a, b)
}
