use std::{fs::File, io::{BufReader, BufWriter, Write}, path::Path};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::{
    common::ensure_parent_dir,
    floor::{DrawingState, TaggedPolygon},
    geom::{Polygon, Vertex},
};

/// One closed polyline as emitted by the CAD extractor.
/// Extra fields (color, line weight, entity type) are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolylineRecord {
    pub layer: String,
    pub vertices: Vec<Vertex>,
}

impl PolylineRecord {
    fn into_tagged(self, state: DrawingState) -> TaggedPolygon {
        TaggedPolygon::new(self.layer, state, Polygon::new(self.vertices))
    }
}

/// The two drawings of one floor, as extracted from CAD files.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FloorFile {
    #[serde(default)]
    pub floor: Option<String>,
    #[serde(default)]
    pub existing: Vec<PolylineRecord>,
    #[serde(default)]
    pub project: Vec<PolylineRecord>,
}

impl FloorFile {
    /// Tagged polygons of the existing drawing.
    pub fn existing_polygons(&self) -> Vec<TaggedPolygon> {
        self.existing.iter().cloned().map(|r| r.into_tagged(DrawingState::Existing)).collect()
    }

    /// Tagged polygons of the project drawing.
    pub fn project_polygons(&self) -> Vec<TaggedPolygon> {
        self.project.iter().cloned().map(|r| r.into_tagged(DrawingState::Project)).collect()
    }

    /// Parse a floor file from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("[FloorFile.from_json_str] Failed to parse floor JSON")
    }
}

/// Reads a floor file from a JSON file at `path`.
pub fn read_floor_file(path: &Path) -> Result<FloorFile> {
    let file = File::open(path)
        .with_context(|| format!("Failed to read JSON file: {}", path.display()))?;
    serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("[read_floor_file] Failed to parse floor JSON: {}", path.display()))
}

/// Writes `value` as pretty JSON to `path`, creating the parent directory if needed.
pub fn write_result_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    ensure_parent_dir(path)?;
    let file = File::create(path)
        .with_context(|| format!("Failed to create JSON file: {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, value)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}
