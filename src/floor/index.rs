use geo::Rect;
use rstar::RTree;
use smallvec::SmallVec;

use crate::geom::{envelope, BoundingBox};

/// R-tree over the bounding boxes of the primary polygons of one drawing.
#[derive(Debug)]
pub(crate) struct PrimaryIndex {
    rtree: RTree<BoundingBox>,
}

impl PrimaryIndex {
    /// Construct an index from `(position, bbox)` pairs.
    pub(crate) fn new(boxes: impl IntoIterator<Item = (usize, Rect<f64>)>) -> Self {
        Self {
            rtree: RTree::bulk_load(boxes.into_iter()
                .map(|(idx, bbox)| BoundingBox::new(idx, bbox))
                .collect()),
        }
    }

    /// Positions whose bounding boxes meet `bbox` (touching included), in ascending order.
    pub(crate) fn candidates(&self, bbox: &Rect<f64>) -> SmallVec<[usize; 8]> {
        let mut found: SmallVec<[usize; 8]> = self.rtree
            .locate_in_envelope_intersecting(&envelope(bbox, 0.0))
            .map(|bb| bb.idx())
            .collect();
        found.sort_unstable();
        found
    }
}

#[cfg(test)]
mod tests {
    use geo::Coord;

    use super::*;

    fn rect(x0: f64, y0: f64, x1: f64, y1: f64) -> Rect<f64> {
        Rect::new(Coord { x: x0, y: y0 }, Coord { x: x1, y: y1 })
    }

    #[test]
    fn candidates_are_sorted_by_position() {
        let index = PrimaryIndex::new([
            (4, rect(0.0, 0.0, 10.0, 10.0)),
            (1, rect(5.0, 5.0, 6.0, 6.0)),
            (7, rect(20.0, 20.0, 30.0, 30.0)),
        ]);

        assert_eq!(index.candidates(&rect(4.0, 4.0, 5.5, 5.5)).as_slice(), &[1, 4]);
        assert_eq!(index.candidates(&rect(10.0, 10.0, 12.0, 12.0)).as_slice(), &[4]);
        assert!(index.candidates(&rect(40.0, 40.0, 41.0, 41.0)).is_empty());
    }
}
