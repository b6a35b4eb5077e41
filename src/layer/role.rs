use std::fmt;

use serde::{Deserialize, Serialize};

/// Functional role of a polygon, derived from its CAD layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Primary,         // Gross floor area of one destination
    Void,            // Opening in the floor plate (stairwell, shaft)
    LowHeadroom,     // Ceiling height below 1.80 m
    Demolition,      // Demolished zone, existing drawing only
    OtherDeductible, // Remaining deductible surfaces
    Unclassified,    // Excluded from all accumulation
}

impl Role {
    /// Roles whose polygons are attributed to a parent primary polygon.
    #[inline]
    pub fn is_deductible(&self) -> bool {
        matches!(self, Role::Void | Role::LowHeadroom | Role::OtherDeductible)
    }

    pub fn to_str(&self) -> &'static str {
        match self {
            Role::Primary => "primary",
            Role::Void => "void",
            Role::LowHeadroom => "low_headroom",
            Role::Demolition => "demolition",
            Role::OtherDeductible => "other_deductible",
            Role::Unclassified => "unclassified",
        }
    }

    pub fn order() -> [Role; 6] {
        [
            Role::Primary,
            Role::Void,
            Role::LowHeadroom,
            Role::Demolition,
            Role::OtherDeductible,
            Role::Unclassified,
        ]
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.pad(self.to_str()) }
}
