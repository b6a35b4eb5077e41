mod classify;
mod destination;
mod role;

pub use classify::{classify, DEMOLITION_MARKER};
pub use destination::{display_name, is_known_destination, rdv_ratio, resolve_destination};
pub use role::Role;
