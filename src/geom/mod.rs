mod bbox;
mod polygon;
mod predicate;
mod ring;

pub(crate) use bbox::{envelope, BoundingBox};
pub use polygon::{Polygon, Vertex};
pub use predicate::{contains, intersection_area, Overlap, SpatialPredicates};
pub use ring::{InvalidReason, InvalidRing, ValidRing};
