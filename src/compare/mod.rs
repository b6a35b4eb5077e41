mod aggregate;
mod metrics;
mod result;

use std::collections::{BTreeMap, BTreeSet};

use anyhow::{bail, ensure, Result};
use tracing::debug;

use crate::{
    config::ComparisonConfig,
    diagnostics::Diagnostics,
    floor::{Deduction, DestinationAccumulator, DrawingState, StateLedger, TaggedPolygon},
};

pub use aggregate::aggregate;
pub use metrics::{DestinationMetrics, TaBreakdown};
pub use result::ComparisonResult;

/// Compare the existing and project drawings of one floor with default tolerances.
pub fn compare(existing: &[TaggedPolygon], project: &[TaggedPolygon]) -> Result<ComparisonResult> {
    Comparison::new(ComparisonConfig::default())?.run(existing, project)
}

/// Compare the existing and project drawings of one floor.
pub fn compare_with(
    existing: &[TaggedPolygon],
    project: &[TaggedPolygon],
    config: &ComparisonConfig,
) -> Result<ComparisonResult> {
    Comparison::new(config.clone())?.run(existing, project)
}

/// A configured comparison, optionally labelled with the floor it describes.
#[derive(Debug, Clone, Default)]
pub struct Comparison {
    config: ComparisonConfig,
    floor: Option<String>,
}

impl Comparison {
    pub fn new(config: ComparisonConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config, floor: None })
    }

    pub fn with_floor(mut self, floor: impl Into<String>) -> Self {
        self.floor = Some(floor.into());
        self
    }

    #[inline] pub fn config(&self) -> &ComparisonConfig { &self.config }

    /// Deduct both drawings and aggregate every destination seen in either of them.
    pub fn run(&self, existing: &[TaggedPolygon], project: &[TaggedPolygon]) -> Result<ComparisonResult> {
        ensure!(!existing.is_empty(), "[compare] existing polygon set is empty");
        ensure!(!project.is_empty(), "[compare] project polygon set is empty");
        for (expected, polygons) in [(DrawingState::Existing, existing), (DrawingState::Project, project)] {
            if let Some((i, p)) = polygons.iter().enumerate().find(|(_, p)| p.state != expected) {
                bail!("[compare] polygon #{i} of the {expected} set is tagged {}", p.state);
            }
        }

        let mut diagnostics = Diagnostics::default();
        let mut accumulators: BTreeMap<(String, DrawingState), DestinationAccumulator> = BTreeMap::new();
        let mut census = BTreeMap::new();

        for (state, polygons) in [(DrawingState::Existing, existing), (DrawingState::Project, project)] {
            let StateLedger { accumulators: totals, census: counts } =
                Deduction::new(state, &self.config, &mut diagnostics).run(polygons);
            debug!(%state, polygons = polygons.len(), destinations = totals.len(), "deduction complete");

            accumulators.extend(totals.into_iter().map(|(destination, acc)| ((destination, state), acc)));
            census.insert(state, counts);
        }

        let keys: BTreeSet<&String> = accumulators.keys().map(|(destination, _)| destination).collect();
        let destinations: BTreeMap<String, DestinationMetrics> = keys.into_iter()
            .map(|destination| {
                let metrics = aggregate(
                    destination,
                    accumulators.get(&(destination.clone(), DrawingState::Existing)),
                    accumulators.get(&(destination.clone(), DrawingState::Project)),
                    self.config.negligible_removed,
                );
                (destination.clone(), metrics)
            })
            .collect();

        let mut summary = DestinationMetrics::default();
        for metrics in destinations.values() {
            summary += metrics;
        }

        let warnings = diagnostics.into_warnings();
        debug!(destinations = destinations.len(), warnings = warnings.len(), "comparison complete");

        Ok(ComparisonResult { floor: self.floor.clone(), destinations, summary, census, warnings })
    }
}
