#![doc = "Planchers public API"]
mod common;
mod compare;
mod config;
mod diagnostics;
mod floor;
mod geom;
mod layer;

#[doc(inline)]
pub use compare::{aggregate, compare, compare_with, Comparison, ComparisonResult, DestinationMetrics, TaBreakdown};

#[doc(inline)]
pub use config::ComparisonConfig;

#[doc(inline)]
pub use diagnostics::Warning;

#[doc(inline)]
pub use floor::{deduct, DestinationAccumulator, DrawingState, RoleCounts, TaggedPolygon};

#[doc(inline)]
pub use geom::{contains, intersection_area, InvalidReason, InvalidRing, Overlap, Polygon, SpatialPredicates, ValidRing, Vertex};

#[doc(inline)]
pub use layer::{classify, display_name, is_known_destination, rdv_ratio, resolve_destination, Role, DEMOLITION_MARKER};

#[doc(inline)]
pub use common::{read_floor_file, write_result_json, FloorFile, PolylineRecord};
