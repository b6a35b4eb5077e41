use std::collections::BTreeMap;

use serde::Serialize;

use crate::{
    diagnostics::Warning,
    floor::{DrawingState, RoleCounts},
};
use super::metrics::DestinationMetrics;

/// Outcome of one existing/project comparison.
/// Values are full precision until [`ComparisonResult::rounded`] is applied.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub floor: Option<String>,
    pub destinations: BTreeMap<String, DestinationMetrics>,
    pub summary: DestinationMetrics,
    pub census: BTreeMap<DrawingState, RoleCounts>,
    pub warnings: Vec<Warning>,
}

impl ComparisonResult {
    /// Get the metrics of a destination key.
    #[inline] pub fn destination(&self, key: &str) -> Option<&DestinationMetrics> { self.destinations.get(key) }

    /// Usable area of a destination in one drawing (zero when absent).
    pub fn usable_area(&self, key: &str, state: DrawingState) -> f64 {
        self.destination(key).map_or(0.0, |m| match state {
            DrawingState::Existing => m.existing_area,
            DrawingState::Project => m.project_area,
        })
    }

    /// Role census of one drawing.
    pub fn census(&self, state: DrawingState) -> RoleCounts {
        self.census.get(&state).cloned().unwrap_or_default()
    }

    #[inline] pub fn has_warnings(&self) -> bool { !self.warnings.is_empty() }

    /// Copy with every area rounded to `precision` decimal places.
    pub fn rounded(&self, precision: u32) -> Self {
        Self {
            floor: self.floor.clone(),
            destinations: self.destinations.iter()
                .map(|(key, metrics)| (key.clone(), metrics.rounded(precision)))
                .collect(),
            summary: self.summary.rounded(precision),
            census: self.census.clone(),
            warnings: self.warnings.clone(),
        }
    }
}
