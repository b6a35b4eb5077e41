use std::collections::BTreeMap;

use serde::Serialize;

use crate::layer::Role;

/// Running totals for one destination in one drawing.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DestinationAccumulator {
    pub primary_area: f64,
    pub void_area: f64,
    pub low_headroom_area: f64,
    pub other_area: f64,            // subtracted on the SDP sheet only
    pub demolition_overlap_area: f64, // informational, not subtracted
}

impl DestinationAccumulator {
    /// Add a deductible surface to the running total of its role.
    pub(crate) fn add_deduction(&mut self, role: Role, area: f64) {
        match role {
            Role::Void => self.void_area += area,
            Role::LowHeadroom => self.low_headroom_area += area,
            Role::OtherDeductible => self.other_area += area,
            Role::Primary | Role::Demolition | Role::Unclassified => {
                debug_assert!(false, "{role} surfaces are not deductions");
            }
        }
    }

    /// Voids and low-headroom surfaces, the deductions that reduce usable area.
    #[inline] pub fn deducted_area(&self) -> f64 { self.void_area + self.low_headroom_area }

    /// True if deductions exceed the primary area.
    #[inline] pub fn is_over_deducted(&self) -> bool { self.deducted_area() > self.primary_area }

    /// Primary area minus deductions, floored at zero.
    #[inline] pub fn usable_area(&self) -> f64 { (self.primary_area - self.deducted_area()).max(0.0) }

    /// SDP sheet surface: usable area also less the other deductible surfaces, floored at zero.
    #[inline] pub fn sdp_area(&self) -> f64 { (self.usable_area() - self.other_area).max(0.0) }
}

/// Number of polygons per role in one drawing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RoleCounts(BTreeMap<Role, usize>);

impl RoleCounts {
    #[inline] pub(crate) fn record(&mut self, role: Role) { *self.0.entry(role).or_default() += 1 }

    /// Get the count for a role (zero if none seen).
    #[inline] pub fn get(&self, role: Role) -> usize { self.0.get(&role).copied().unwrap_or(0) }

    /// Total number of polygons counted.
    #[inline] pub fn total(&self) -> usize { self.0.values().sum() }
}
