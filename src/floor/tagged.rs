use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{geom::{Polygon, Vertex}, layer::{classify, Role}};

/// Which of the two compared drawings a polygon comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DrawingState {
    Existing,
    Project,
}

impl DrawingState {
    pub fn to_str(&self) -> &'static str {
        match self {
            DrawingState::Existing => "existing",
            DrawingState::Project => "project",
        }
    }

    pub fn order() -> [DrawingState; 2] { [DrawingState::Existing, DrawingState::Project] }
}

impl fmt::Display for DrawingState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.pad(self.to_str()) }
}

/// A polygon handed over by the CAD parser, with its raw layer name.
#[derive(Debug, Clone, PartialEq)]
pub struct TaggedPolygon {
    pub layer_tag: String,
    pub state: DrawingState,
    pub polygon: Polygon,
}

impl TaggedPolygon {
    pub fn new(layer_tag: impl Into<String>, state: DrawingState, polygon: Polygon) -> Self {
        Self { layer_tag: layer_tag.into(), state, polygon }
    }

    /// Build from raw `(x, y)` pairs.
    pub fn from_points<V: Into<Vertex>>(
        layer_tag: impl Into<String>,
        state: DrawingState,
        points: impl IntoIterator<Item = V>,
    ) -> Self {
        Self::new(layer_tag, state, points.into_iter().collect())
    }

    /// Role derived from the layer name.
    #[inline] pub fn role(&self) -> Role { classify(&self.layer_tag).0 }

    /// Destination key derived from the layer name (primary layers only).
    #[inline] pub fn destination(&self) -> Option<String> { classify(&self.layer_tag).1 }
}
