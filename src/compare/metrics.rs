use std::ops::AddAssign;

use serde::Serialize;

use crate::floor::DestinationAccumulator;

/// Round to a fixed number of decimal places.
#[inline]
pub(crate) fn round_to(value: f64, precision: u32) -> f64 {
    let factor = 10f64.powi(precision as i32);
    let rounded = (value * factor).round() / factor;
    if rounded == 0.0 { 0.0 } else { rounded }
}

/// The T.A. sheet of one destination in one drawing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct TaBreakdown {
    pub ta_before_deduction: f64,
    pub voids: f64,
    pub low_headroom: f64,
    pub other_deductions: f64,
    pub ta_after_deduction: f64,
}

impl From<&DestinationAccumulator> for TaBreakdown {
    fn from(acc: &DestinationAccumulator) -> Self {
        Self {
            ta_before_deduction: acc.primary_area,
            voids: acc.void_area,
            low_headroom: acc.low_headroom_area,
            other_deductions: acc.other_area,
            ta_after_deduction: acc.usable_area(),
        }
    }
}

impl TaBreakdown {
    pub fn rounded(&self, precision: u32) -> Self {
        Self {
            ta_before_deduction: round_to(self.ta_before_deduction, precision),
            voids: round_to(self.voids, precision),
            low_headroom: round_to(self.low_headroom, precision),
            other_deductions: round_to(self.other_deductions, precision),
            ta_after_deduction: round_to(self.ta_after_deduction, precision),
        }
    }
}

impl AddAssign<&TaBreakdown> for TaBreakdown {
    fn add_assign(&mut self, other: &TaBreakdown) {
        self.ta_before_deduction += other.ta_before_deduction;
        self.voids += other.voids;
        self.low_headroom += other.low_headroom;
        self.other_deductions += other.other_deductions;
        self.ta_after_deduction += other.ta_after_deduction;
    }
}

/// Regulatory fields of one destination (or of the summary row).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct DestinationMetrics {
    /// Existing usable area `E[d]`.
    pub existing_area: f64,
    /// Project usable area `P[d]`.
    pub project_area: f64,
    pub created: f64,
    pub demolished_reconstructed: f64,
    pub removed: f64,
    /// RDV surface: project area times the destination ratio.
    pub rdv_area: f64,
    /// SDP sheet: existing usable area less the other deductible surfaces.
    pub sdp_existing_area: f64,
    /// SDP sheet: project usable area less the other deductible surfaces.
    pub sdp_project_area: f64,
    /// SDP sheet RDV: SDP project area times the destination ratio.
    pub sdp_rdv_area: f64,
    pub existing: TaBreakdown,
    pub project: TaBreakdown,
}

impl DestinationMetrics {
    pub fn rounded(&self, precision: u32) -> Self {
        Self {
            existing_area: round_to(self.existing_area, precision),
            project_area: round_to(self.project_area, precision),
            created: round_to(self.created, precision),
            demolished_reconstructed: round_to(self.demolished_reconstructed, precision),
            removed: round_to(self.removed, precision),
            rdv_area: round_to(self.rdv_area, precision),
            sdp_existing_area: round_to(self.sdp_existing_area, precision),
            sdp_project_area: round_to(self.sdp_project_area, precision),
            sdp_rdv_area: round_to(self.sdp_rdv_area, precision),
            existing: self.existing.rounded(precision),
            project: self.project.rounded(precision),
        }
    }

    /// Net change of usable area between the two drawings.
    #[inline] pub fn net_change(&self) -> f64 { self.project_area - self.existing_area }
}

impl AddAssign<&DestinationMetrics> for DestinationMetrics {
    fn add_assign(&mut self, other: &DestinationMetrics) {
        self.existing_area += other.existing_area;
        self.project_area += other.project_area;
        self.created += other.created;
        self.demolished_reconstructed += other.demolished_reconstructed;
        self.removed += other.removed;
        self.rdv_area += other.rdv_area;
        self.sdp_existing_area += other.sdp_existing_area;
        self.sdp_project_area += other.sdp_project_area;
        self.sdp_rdv_area += other.sdp_rdv_area;
        self.existing += &other.existing;
        self.project += &other.project;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounding_uses_fixed_decimals() {
        assert_eq!(round_to(1.234_56, 4), 1.2346);
        assert_eq!(round_to(2.5, 0), 3.0);
        assert_eq!(round_to(-0.000_01, 4), 0.0);
        assert!(round_to(-0.000_01, 4).is_sign_positive());
    }

    #[test]
    fn breakdown_from_accumulator() {
        let acc = DestinationAccumulator {
            primary_area: 100.0,
            void_area: 10.0,
            low_headroom_area: 2.5,
            other_area: 7.0,
            demolition_overlap_area: 0.0,
        };
        let ta = TaBreakdown::from(&acc);
        assert_eq!(ta.ta_before_deduction, 100.0);
        assert_eq!(ta.other_deductions, 7.0);
        assert_eq!(ta.ta_after_deduction, 87.5);
    }

    #[test]
    fn metrics_sum_fieldwise() {
        let mut total = DestinationMetrics::default();
        let row = DestinationMetrics {
            existing_area: 1.0,
            created: 2.0,
            rdv_area: 0.5,
            sdp_project_area: 0.25,
            ..Default::default()
        };
        total += &row;
        total += &row;
        assert_eq!(total.sdp_project_area, 0.5);
        assert_eq!(total.existing_area, 2.0);
        assert_eq!(total.created, 4.0);
        assert_eq!(total.rdv_area, 1.0);
        assert_eq!(total.removed, 0.0);
    }
}
