use std::collections::BTreeMap;

use smallvec::SmallVec;
use tracing::{debug, trace};

use crate::{
    config::ComparisonConfig,
    diagnostics::{Diagnostics, Warning},
    geom::{SpatialPredicates, ValidRing},
    layer::{classify, Role},
};
use super::{
    accumulator::{DestinationAccumulator, RoleCounts},
    index::PrimaryIndex,
    tagged::{DrawingState, TaggedPolygon},
};

/// Per-destination totals and role census of one drawing.
#[derive(Debug, Default)]
pub(crate) struct StateLedger {
    pub(crate) accumulators: BTreeMap<String, DestinationAccumulator>,
    pub(crate) census: RoleCounts,
}

/// A primary polygon with its destination and usable geometry.
struct PrimarySurface {
    destination: String,
    ring: Option<ValidRing>,
}

/// A polygon attributed to parent primaries, with its input position.
struct Attributable {
    index: usize,
    role: Role,
    ring: ValidRing,
}

/// Runs the deduction engine over the polygons of one drawing.
pub(crate) struct Deduction<'a> {
    state: DrawingState,
    predicates: SpatialPredicates,
    attribution_tolerance: f64,
    diagnostics: &'a mut Diagnostics,
}

impl<'a> Deduction<'a> {
    pub(crate) fn new(state: DrawingState, config: &ComparisonConfig, diagnostics: &'a mut Diagnostics) -> Self {
        Self {
            state,
            predicates: SpatialPredicates::from(config),
            attribution_tolerance: config.attribution_tolerance,
            diagnostics,
        }
    }

    /// Classify, accumulate primary areas, attribute deductible and demolition polygons.
    pub(crate) fn run(mut self, polygons: &[TaggedPolygon]) -> StateLedger {
        let mut ledger = StateLedger::default();
        let mut primaries: Vec<PrimarySurface> = Vec::new();
        let mut deductibles: Vec<Attributable> = Vec::new();
        let mut demolitions: Vec<Attributable> = Vec::new();

        for (index, polygon) in polygons.iter().enumerate() {
            let (role, destination) = classify(&polygon.layer_tag);
            ledger.census.record(role);

            match (role, destination) {
                (Role::Primary, Some(destination)) => {
                    let ring = self.resolve(index, polygon);
                    let area = ring.as_ref().map_or(0.0, ValidRing::area);
                    ledger.accumulators.entry(destination.clone()).or_default().primary_area += area;
                    trace!(state = %self.state, index, %destination, area, "primary surface");
                    primaries.push(PrimarySurface { destination, ring });
                }
                (Role::Demolition, _) if self.state == DrawingState::Project => {
                    self.diagnostics.push(Warning::MisplacedDemolition {
                        state: self.state,
                        index,
                        layer: polygon.layer_tag.clone(),
                    });
                }
                (Role::Demolition, _) => {
                    if let Some(ring) = self.resolve(index, polygon) {
                        demolitions.push(Attributable { index, role, ring });
                    }
                }
                (role, _) if role.is_deductible() => {
                    if let Some(ring) = self.resolve(index, polygon) {
                        deductibles.push(Attributable { index, role, ring });
                    }
                }
                _ => {
                    self.diagnostics.push(Warning::Unclassified {
                        state: self.state,
                        index,
                        layer: polygon.layer_tag.clone(),
                    });
                }
            }
        }

        let index = PrimaryIndex::new(primaries.iter().enumerate()
            .filter_map(|(i, primary)| primary.ring.as_ref().map(|ring| (i, ring.bbox()))));

        for deductible in &deductibles {
            self.attribute(deductible, polygons, &primaries, &index, &mut ledger.accumulators);
        }

        for demolition in &demolitions {
            for i in index.candidates(&demolition.ring.bbox()) {
                let Some(ring) = primaries[i].ring.as_ref() else { continue };
                let area = self.predicates.ring_overlap_exact(ring, &demolition.ring);
                if !(area > self.predicates.tangent_epsilon()) { continue }

                debug!(state = %self.state, index = demolition.index, destination = %primaries[i].destination,
                    area, "demolition overlap");
                if let Some(acc) = ledger.accumulators.get_mut(&primaries[i].destination) {
                    acc.demolition_overlap_area += area;
                }
            }
        }

        for (destination, acc) in &ledger.accumulators {
            if acc.is_over_deducted() {
                self.diagnostics.push(Warning::OverDeduction {
                    state: self.state,
                    destination: destination.clone(),
                    primary_area: acc.primary_area,
                    deducted: acc.deducted_area(),
                });
            }
        }

        ledger
    }

    /// Validate (or repair) a polygon's ring, reporting what had to be done.
    fn resolve(&mut self, index: usize, polygon: &TaggedPolygon) -> Option<ValidRing> {
        match self.predicates.resolve(&polygon.polygon) {
            Ok(ring) => {
                if ring.is_repaired() {
                    self.diagnostics.push(Warning::RepairedGeometry {
                        state: self.state,
                        index,
                        layer: polygon.layer_tag.clone(),
                    });
                }
                Some(ring)
            }
            Err(reason) => {
                self.diagnostics.push(Warning::MalformedGeometry {
                    state: self.state,
                    index,
                    layer: polygon.layer_tag.clone(),
                    reason,
                });
                None
            }
        }
    }

    /// Attribute one deductible polygon: whole area to the first primary containing it,
    /// otherwise its overlap with each intersecting primary, never more than its own area.
    fn attribute(
        &mut self,
        deductible: &Attributable,
        polygons: &[TaggedPolygon],
        primaries: &[PrimarySurface],
        index: &PrimaryIndex,
        accumulators: &mut BTreeMap<String, DestinationAccumulator>,
    ) {
        let ring = &deductible.ring;
        let candidates = index.candidates(&ring.bbox());

        let parent = candidates.iter().copied().find(|&i| {
            primaries[i].ring.as_ref().is_some_and(|outer| self.predicates.ring_contains(outer, ring))
        });
        if let Some(i) = parent {
            let destination = &primaries[i].destination;
            debug!(state = %self.state, index = deductible.index, role = %deductible.role, %destination,
                area = ring.area(), "contained deduction");
            if let Some(acc) = accumulators.get_mut(destination) {
                acc.add_deduction(deductible.role, ring.area());
            }
            return;
        }

        let shares: SmallVec<[(usize, f64); 8]> = candidates.iter().copied()
            .filter_map(|i| {
                let outer = primaries[i].ring.as_ref()?;
                let overlap = self.predicates.ring_overlap(ring, outer);
                (!overlap.is_empty()).then_some((i, overlap.area))
            })
            .collect();

        let layer = || polygons[deductible.index].layer_tag.clone();

        if shares.is_empty() {
            self.diagnostics.push(Warning::UnmatchedDeductible {
                state: self.state,
                index: deductible.index,
                layer: layer(),
                role: deductible.role,
                area: ring.area(),
            });
            return;
        }

        let attributed: f64 = shares.iter().map(|&(_, area)| area).sum();
        let scale = if attributed > ring.area() { ring.area() / attributed } else { 1.0 };
        if attributed > ring.area() * (1.0 + self.attribution_tolerance) {
            self.diagnostics.push(Warning::OverAttribution {
                state: self.state,
                index: deductible.index,
                layer: layer(),
                attributed,
                area: ring.area(),
            });
        }

        for &(i, area) in &shares {
            let destination = &primaries[i].destination;
            debug!(state = %self.state, index = deductible.index, role = %deductible.role, %destination,
                area = area * scale, "partial deduction");
            if let Some(acc) = accumulators.get_mut(destination) {
                acc.add_deduction(deductible.role, area * scale);
            }
        }
    }
}

/// Run the deduction engine on one drawing with default tolerances.
pub fn deduct(state: DrawingState, polygons: &[TaggedPolygon]) -> BTreeMap<String, DestinationAccumulator> {
    let mut diagnostics = Diagnostics::default();
    Deduction::new(state, &ComparisonConfig::default(), &mut diagnostics)
        .run(polygons)
        .accumulators
}
