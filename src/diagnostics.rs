use std::fmt;

use serde::Serialize;
use tracing::warn;

use crate::{floor::DrawingState, geom::InvalidReason, layer::Role};

/// A data-quality problem recovered during a comparison.
/// None of these abort the run; they travel with the result instead.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Warning {
    /// Degenerate or unrepairable polygon, excluded from spatial predicates with zero area.
    MalformedGeometry { state: DrawingState, index: usize, layer: String, reason: InvalidReason },
    /// Self-intersecting polygon used after a validity repair.
    RepairedGeometry { state: DrawingState, index: usize, layer: String },
    /// Layer matching no known pattern.
    Unclassified { state: DrawingState, index: usize, layer: String },
    /// Deductible polygon contained in and overlapping no primary polygon.
    UnmatchedDeductible { state: DrawingState, index: usize, layer: String, role: Role, area: f64 },
    /// Overlaps of one deductible polygon summed past its own area and were scaled down.
    OverAttribution { state: DrawingState, index: usize, layer: String, attributed: f64, area: f64 },
    /// Deductions exceeded the primary area of a destination; usable area clamped to zero.
    OverDeduction { state: DrawingState, destination: String, primary_area: f64, deducted: f64 },
    /// Demolition polygon in the project drawing, ignored.
    MisplacedDemolition { state: DrawingState, index: usize, layer: String },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::MalformedGeometry { state, index, layer, reason } =>
                write!(f, "{state} polygon #{index} ({layer}) is malformed: {reason}"),
            Warning::RepairedGeometry { state, index, layer } =>
                write!(f, "{state} polygon #{index} ({layer}) was repaired before use"),
            Warning::Unclassified { state, index, layer } =>
                write!(f, "{state} polygon #{index} has unclassified layer '{layer}'"),
            Warning::UnmatchedDeductible { state, index, layer, role, area } =>
                write!(f, "{state} {role} polygon #{index} ({layer}, {area:.4}) has no parent surface"),
            Warning::OverAttribution { state, index, layer, attributed, area } =>
                write!(f, "{state} polygon #{index} ({layer}) overlaps {attributed:.4} but measures {area:.4}; clamped"),
            Warning::OverDeduction { state, destination, primary_area, deducted } =>
                write!(f, "{state} destination {destination}: deductions {deducted:.4} exceed surface {primary_area:.4}; clamped to 0"),
            Warning::MisplacedDemolition { state, index, layer } =>
                write!(f, "{state} polygon #{index} ({layer}) is a demolition zone outside the existing drawing; ignored"),
        }
    }
}

/// Collects warnings for one run, logging each as it arrives.
#[derive(Debug, Default)]
pub(crate) struct Diagnostics {
    warnings: Vec<Warning>,
}

impl Diagnostics {
    pub(crate) fn push(&mut self, warning: Warning) {
        warn!("{warning}");
        self.warnings.push(warning);
    }

    #[inline] pub(crate) fn into_warnings(self) -> Vec<Warning> { self.warnings }
}
