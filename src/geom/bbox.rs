use geo::{Coord, Rect};
use rstar::{RTreeObject, AABB};

/// A bounding box in an R-tree, associated with a polygon by index.
#[derive(Debug, Clone)]
pub(crate) struct BoundingBox {
    idx: usize, // Index of corresponding polygon in the indexed set
    bbox: Rect<f64>,
}

impl BoundingBox {
    pub(crate) fn new(idx: usize, bbox: Rect<f64>) -> Self {
        Self { idx, bbox }
    }

    /// Get the index of the corresponding polygon.
    pub(crate) fn idx(&self) -> usize { self.idx }
}

impl RTreeObject for BoundingBox {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_corners(self.bbox.min().into(), self.bbox.max().into())
    }
}

/// Envelope of a rectangle grown by `pad` on every side.
#[inline]
pub(crate) fn envelope(rect: &Rect<f64>, pad: f64) -> AABB<[f64; 2]> {
    AABB::from_corners(
        [rect.min().x - pad, rect.min().y - pad],
        [rect.max().x + pad, rect.max().y + pad],
    )
}

/// True if the rectangles share at least one point (touching counts).
#[inline]
pub(crate) fn overlaps(a: &Rect<f64>, b: &Rect<f64>) -> bool {
    a.min().x <= b.max().x && b.min().x <= a.max().x
        && a.min().y <= b.max().y && b.min().y <= a.max().y
}

/// True if `outer` covers `inner` entirely (shared edges allowed).
#[inline]
pub(crate) fn covers(outer: &Rect<f64>, inner: &Rect<f64>) -> bool {
    let (o_min, o_max): (Coord<f64>, Coord<f64>) = (outer.min(), outer.max());
    o_min.x <= inner.min().x && o_min.y <= inner.min().y
        && inner.max().x <= o_max.x && inner.max().y <= o_max.y
}
