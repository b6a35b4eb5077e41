mod accumulator;
mod deduction;
mod index;
mod tagged;

pub use accumulator::{DestinationAccumulator, RoleCounts};
pub use deduction::deduct;
pub use tagged::{DrawingState, TaggedPolygon};

pub(crate) use deduction::{Deduction, StateLedger};
