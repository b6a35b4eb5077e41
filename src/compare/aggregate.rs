use crate::{floor::DestinationAccumulator, layer::rdv_ratio};
use super::metrics::{DestinationMetrics, TaBreakdown};

/// Combine the existing and project totals of one destination into its regulatory fields.
/// A destination absent from one drawing counts as zero there.
pub fn aggregate(
    destination: &str,
    existing: Option<&DestinationAccumulator>,
    project: Option<&DestinationAccumulator>,
    negligible_removed: f64,
) -> DestinationMetrics {
    let demolished = existing.map_or(0.0, |acc| acc.demolition_overlap_area);
    let sdp_existing = existing.map_or(0.0, DestinationAccumulator::sdp_area);
    let sdp_project = project.map_or(0.0, DestinationAccumulator::sdp_area);
    let ratio = rdv_ratio(destination);
    let existing = existing.map(TaBreakdown::from).unwrap_or_default();
    let project = project.map(TaBreakdown::from).unwrap_or_default();

    let e = existing.ta_after_deduction;
    let p = project.ta_after_deduction;
    let removed = (e - p - demolished).max(0.0);

    DestinationMetrics {
        existing_area: e,
        project_area: p,
        created: (p - e).max(0.0),
        demolished_reconstructed: demolished,
        removed: if removed < negligible_removed { 0.0 } else { removed },
        rdv_area: p * ratio,
        sdp_existing_area: sdp_existing,
        sdp_project_area: sdp_project,
        sdp_rdv_area: sdp_project * ratio,
        existing,
        project,
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    fn acc(primary: f64, void: f64, demolition: f64) -> DestinationAccumulator {
        DestinationAccumulator {
            primary_area: primary,
            void_area: void,
            demolition_overlap_area: demolition,
            ..Default::default()
        }
    }

    #[test]
    fn growth_is_created() {
        let row = aggregate("COMMERCE_CIN", Some(&acc(100.0, 10.0, 0.0)), Some(&acc(100.0, 0.0, 0.0)), 0.01);
        assert_eq!(row.existing_area, 90.0);
        assert_eq!(row.project_area, 100.0);
        assert_eq!(row.created, 10.0);
        assert_eq!(row.removed, 0.0);
        assert_relative_eq!(row.rdv_area, 80.0);
    }

    #[test]
    fn demolition_offsets_removed() {
        let row = aggregate("AUTRE_BUREAU", Some(&acc(100.0, 0.0, 30.0)), Some(&acc(50.0, 0.0, 0.0)), 0.01);
        assert_eq!(row.created, 0.0);
        assert_eq!(row.demolished_reconstructed, 30.0);
        assert_eq!(row.removed, 20.0);
    }

    #[test]
    fn demolition_larger_than_loss_never_goes_negative() {
        let row = aggregate("AUTRE_BUREAU", Some(&acc(100.0, 0.0, 80.0)), Some(&acc(90.0, 0.0, 0.0)), 0.01);
        assert_eq!(row.removed, 0.0);
    }

    #[test]
    fn negligible_removed_is_zeroed() {
        let row = aggregate("AUTRE_BUREAU", Some(&acc(100.005, 0.0, 0.0)), Some(&acc(100.0, 0.0, 0.0)), 0.01);
        assert_eq!(row.removed, 0.0);
    }

    #[test]
    fn sdp_sheet_also_deducts_other_surfaces() {
        let existing = DestinationAccumulator { primary_area: 100.0, void_area: 10.0, other_area: 20.0, ..Default::default() };
        let project = DestinationAccumulator { primary_area: 100.0, other_area: 40.0, ..Default::default() };
        let row = aggregate("HABITATION_L", Some(&existing), Some(&project), 0.01);

        assert_eq!(row.existing_area, 90.0);
        assert_eq!(row.project_area, 100.0);
        assert_eq!(row.sdp_existing_area, 70.0);
        assert_eq!(row.sdp_project_area, 60.0);
        assert_relative_eq!(row.rdv_area, 75.0);
        assert_relative_eq!(row.sdp_rdv_area, 45.0);
    }

    #[test]
    fn missing_sides_count_as_zero() {
        let gone = aggregate("HABITATION_L", Some(&acc(40.0, 0.0, 0.0)), None, 0.01);
        assert_eq!(gone.removed, 40.0);
        assert_eq!(gone.project, TaBreakdown::default());

        let new = aggregate("HABITATION_L", None, Some(&acc(40.0, 0.0, 0.0)), 0.01);
        assert_eq!(new.created, 40.0);
        assert_relative_eq!(new.rdv_area, 30.0);
    }
}
