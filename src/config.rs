use std::{fs::File, io::BufReader, path::Path};

use anyhow::{ensure, Context, Result};
use serde::{Deserialize, Serialize};

/// Numeric tolerances and output settings for one comparison run.
/// All lengths and areas are in drawing units (meters, square meters).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ComparisonConfig {
    /// Buffer applied to a ring when its exact overlap with another is near zero.
    pub tangent_buffer: f64,
    /// Exact overlaps at or below this are treated as near zero.
    pub tangent_epsilon: f64,
    /// Buffered overlap estimates at or below this are discarded.
    pub min_estimated_area: f64,
    /// Relative excess over a deductible polygon's own area tolerated before warning.
    pub attribution_tolerance: f64,
    /// Removed areas below this are rounding noise and reported as zero.
    pub negligible_removed: f64,
    /// Decimal places kept when rounding results for output.
    pub precision: u32,
}

impl Default for ComparisonConfig {
    fn default() -> Self {
        Self {
            tangent_buffer: 0.01,
            tangent_epsilon: 1e-9,
            min_estimated_area: 0.001,
            attribution_tolerance: 0.01,
            negligible_removed: 0.01,
            precision: 4,
        }
    }
}

impl ComparisonConfig {
    /// Highest supported output precision.
    pub const MAX_PRECISION: u32 = 12;

    /// Fail on values no computation could be well-defined with.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("tangent_buffer", self.tangent_buffer),
            ("tangent_epsilon", self.tangent_epsilon),
            ("min_estimated_area", self.min_estimated_area),
            ("attribution_tolerance", self.attribution_tolerance),
            ("negligible_removed", self.negligible_removed),
        ] {
            ensure!(
                value.is_finite() && value >= 0.0,
                "[ComparisonConfig.validate] {name} must be a finite non-negative number, got {value}"
            );
        }
        ensure!(
            self.precision <= Self::MAX_PRECISION,
            "[ComparisonConfig.validate] precision must be at most {}, got {}",
            Self::MAX_PRECISION, self.precision
        );
        Ok(())
    }

    /// Read a configuration from a JSON file; missing fields take their defaults.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Self = serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }
}
