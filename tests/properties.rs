// Property tests over generated axis-aligned floor plans:
//   non-negative areas, conservation of split deductions, idempotence.

use planchers::{compare, deduct, DrawingState, TaggedPolygon};
use proptest::prelude::*;

const DESTINATIONS: [&str; 3] = ["COMMERCE_CIN", "HABITATION_L", "AUTRE_BUREAU"];
const DEDUCTIONS: [&str; 3] = ["GEX_EDS_SDP_2-TREMIE", "GEX_EDS_SDP_3-H-180", "GEX_EDS_TA_SDP_CAHIER_DEMO"];

type Rect = (u8, u8, u8, u8);

fn rect_strategy() -> impl Strategy<Value = Rect> {
    (0u8..40, 0u8..40, 1u8..20, 1u8..20)
}

fn tagged(layer: &str, state: DrawingState, (x, y, w, h): Rect) -> TaggedPolygon {
    let (x0, y0) = (x as f64, y as f64);
    let (x1, y1) = (x0 + w as f64, y0 + h as f64);
    TaggedPolygon::from_points(layer, state, [(x0, y0), (x1, y0), (x1, y1), (x0, y1)])
}

fn drawing(state: DrawingState, primaries: &[(usize, Rect)], deductions: &[(usize, Rect)]) -> Vec<TaggedPolygon> {
    let primaries = primaries.iter()
        .map(|&(d, r)| tagged(&format!("GEX_EDS_SDP_1-{}", DESTINATIONS[d]), state, r));
    let deductions = deductions.iter()
        .filter(|&&(k, _)| state == DrawingState::Existing || k != 2)
        .map(|&(k, r)| tagged(DEDUCTIONS[k], state, r));
    primaries.chain(deductions).collect()
}

fn plan_strategy() -> impl Strategy<Value = (Vec<(usize, Rect)>, Vec<(usize, Rect)>)> {
    (
        prop::collection::vec((0usize..3, rect_strategy()), 1..5),
        prop::collection::vec((0usize..3, rect_strategy()), 0..5),
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn every_reported_area_is_non_negative(
        (existing_primaries, existing_deductions) in plan_strategy(),
        (project_primaries, project_deductions) in plan_strategy()
    ) {
        let existing = drawing(DrawingState::Existing, &existing_primaries, &existing_deductions);
        let project = drawing(DrawingState::Project, &project_primaries, &project_deductions);
        let result = compare(&existing, &project).unwrap();

        for row in result.destinations.values().chain([&result.summary]) {
            prop_assert!(row.existing_area >= 0.0);
            prop_assert!(row.project_area >= 0.0);
            prop_assert!(row.created >= 0.0);
            prop_assert!(row.removed >= 0.0);
            prop_assert!(row.demolished_reconstructed >= 0.0);
            prop_assert!(row.existing.ta_after_deduction >= 0.0);
            prop_assert!(row.project.ta_after_deduction >= 0.0);
        }
    }

    #[test]
    fn a_split_deduction_never_exceeds_its_own_area(
        primaries in prop::collection::vec((0usize..3, rect_strategy()), 1..6),
        void in rect_strategy()
    ) {
        let mut polygons = drawing(DrawingState::Existing, &primaries, &[]);
        polygons.push(tagged("GEX_EDS_SDP_2-TREMIE", DrawingState::Existing, void));
        let void_area = (void.2 as f64) * (void.3 as f64);

        let attributed: f64 = deduct(DrawingState::Existing, &polygons).values()
            .map(|acc| acc.void_area)
            .sum();

        prop_assert!(attributed <= void_area * 1.01 + 1e-9, "attributed {attributed} of {void_area}");
    }

    #[test]
    fn comparing_twice_gives_the_same_result(
        (existing_primaries, existing_deductions) in plan_strategy(),
        (project_primaries, project_deductions) in plan_strategy()
    ) {
        let existing = drawing(DrawingState::Existing, &existing_primaries, &existing_deductions);
        let project = drawing(DrawingState::Project, &project_primaries, &project_deductions);

        prop_assert_eq!(compare(&existing, &project).unwrap(), compare(&existing, &project).unwrap());
    }
}
