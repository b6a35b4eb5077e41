use std::sync::LazyLock;

use regex::Regex;

use super::{destination::resolve_destination, role::Role};

/// Marker carried by every demolition layer.
pub const DEMOLITION_MARKER: &str = "GEX_EDS_TA_SDP_CAHIER_DEMO";

/// Surface layers: `GEX_EDS_SDP_<n>` optionally followed by `-<suffix>`.
static SURFACE_LAYER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"GEX_EDS_SDP_(\d+)(?:-(.*))?").expect("surface layer pattern is valid")
});

/// Role carried by each surface layer number.
fn surface_role(number: &str) -> Role {
    match number {
        "1" => Role::Primary,
        "2" => Role::Void,
        "3" => Role::LowHeadroom,
        "4" | "5" | "7" => Role::OtherDeductible,
        _ => Role::Unclassified,
    }
}

/// Map a raw CAD layer name to a role and, for primary layers, a destination key.
/// Primary layers without a usable suffix cannot be bucketed and come back unclassified.
pub fn classify(layer_tag: &str) -> (Role, Option<String>) {
    if layer_tag.contains(DEMOLITION_MARKER) {
        return (Role::Demolition, None);
    }

    let Some(captures) = SURFACE_LAYER.captures(layer_tag) else {
        return (Role::Unclassified, None);
    };

    match surface_role(&captures[1]) {
        Role::Primary => {
            let suffix = captures.get(2).map_or("", |m| m.as_str());
            match resolve_destination(suffix) {
                Some(destination) => (Role::Primary, Some(destination)),
                None => (Role::Unclassified, None),
            }
        }
        role => (role, None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primary_layers_carry_destination() {
        assert_eq!(
            classify("GEX_EDS_SDP_1-COMMERCE_CIN"),
            (Role::Primary, Some("COMMERCE_CIN".to_string()))
        );
        assert_eq!(
            classify("GEX_EDS_SDP_1-EXPLOITATIO0"),
            (Role::Primary, Some("EXPLOITATIO".to_string()))
        );
    }

    #[test]
    fn primary_without_suffix_is_unclassified() {
        assert_eq!(classify("GEX_EDS_SDP_1"), (Role::Unclassified, None));
        assert_eq!(classify("GEX_EDS_SDP_1-"), (Role::Unclassified, None));
    }

    #[test]
    fn special_roles() {
        assert_eq!(classify("GEX_EDS_SDP_2-TREMIE").0, Role::Void);
        assert_eq!(classify("GEX_EDS_SDP_3-H-180").0, Role::LowHeadroom);
        assert_eq!(classify("GEX_EDS_SDP_4-LOCAL_TECH").0, Role::OtherDeductible);
        assert_eq!(classify("GEX_EDS_SDP_5").0, Role::OtherDeductible);
        assert_eq!(classify("GEX_EDS_SDP_7-PK").0, Role::OtherDeductible);
        assert_eq!(classify("GEX_EDS_TA_SDP_CAHIER_DEMO"), (Role::Demolition, None));
    }

    #[test]
    fn deductible_roles_have_no_destination() {
        assert_eq!(classify("GEX_EDS_SDP_2-COMMERCE_CIN"), (Role::Void, None));
    }

    #[test]
    fn unknown_layers_are_unclassified() {
        assert_eq!(classify("0").0, Role::Unclassified);
        assert_eq!(classify("COTATIONS").0, Role::Unclassified);
        assert_eq!(classify("GEX_EDS_SDP_6-X").0, Role::Unclassified);
        // Layer number 10 is not layer 1.
        assert_eq!(classify("GEX_EDS_SDP_10-COMMERCE_CIN").0, Role::Unclassified);
    }
}
