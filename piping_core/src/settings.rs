//! # Estimating Settings
//!
//! Empirical constants used by the fitting calculations. They encode
//! estimating conventions rather than physics, so they live here as named,
//! overridable values instead of inline literals.
//!
//! Settings can be loaded from a TOML file; any key left out keeps its
//! default value:
//!
//! ```toml
//! steel_density_kg_dm3 = 7.85
//! flanges_per_fitting = 3
//! weld_pipe_mass_fraction = 0.025
//! weld_deposit_kg_per_m = 0.5
//! ```
//!
//! ## Example
//!
//! ```rust
//! use piping_core::settings::EstimatingSettings;
//!
//! let settings = EstimatingSettings::from_toml_str("flanges_per_fitting = 2").unwrap();
//! assert_eq!(settings.flanges_per_fitting, 2);
//! assert_eq!(settings.steel_density_kg_dm3, 7.85);
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::units::KgPerDm3;

/// Empirical constants for fitting mass and weld estimation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EstimatingSettings {
    /// Carbon steel density (kg/dm³)
    pub steel_density_kg_dm3: f64,

    /// Flanged outlets assumed on every tee/lateral/cross
    pub flanges_per_fitting: u32,

    /// Welds per flange (inside + outside fillet)
    pub welds_per_flange: u32,

    /// Share of joined pipe mass allowed for weld metal (SABS719 only)
    pub weld_pipe_mass_fraction: f64,

    /// Weld metal deposited per metre of weld (kg/m)
    pub weld_deposit_kg_per_m: f64,

    /// Gusset plates per gusseted tee
    pub gussets_per_fitting: u32,

    /// Shortest bolt considered when sizing flange bolts (mm)
    pub min_bolt_length_mm: f64,

    /// Bolt length as a multiple of flange thickness
    pub bolt_length_factor: f64,

    /// Shape factor applied to the SABS62 body volume approximation
    pub sabs62_shape_factor: f64,

    /// Wall thickness assumed for SABS62 bodies, by nominal diameter
    pub sabs62_wall_thickness: WallThicknessTable,
}

impl Default for EstimatingSettings {
    fn default() -> Self {
        EstimatingSettings {
            steel_density_kg_dm3: 7.85,
            flanges_per_fitting: 3,
            welds_per_flange: 2,
            weld_pipe_mass_fraction: 0.025,
            weld_deposit_kg_per_m: 0.5,
            gussets_per_fitting: 2,
            min_bolt_length_mm: 50.0,
            bolt_length_factor: 3.0,
            sabs62_shape_factor: 0.5,
            sabs62_wall_thickness: WallThicknessTable::default(),
        }
    }
}

impl EstimatingSettings {
    /// Steel density as a typed unit
    pub fn steel_density(&self) -> KgPerDm3 {
        KgPerDm3(self.steel_density_kg_dm3)
    }

    /// Steel density in kg/m³, used by the SABS62 body volume
    pub fn steel_density_kg_m3(&self) -> f64 {
        self.steel_density_kg_dm3 * 1000.0
    }

    /// Parse settings from TOML text.
    pub fn from_toml_str(text: &str) -> CalcResult<Self> {
        let settings: EstimatingSettings =
            toml::from_str(text).map_err(|e| CalcError::SerializationError {
                reason: format!("Invalid estimating settings: {}", e),
            })?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a TOML file.
    pub fn load(path: &Path) -> CalcResult<Self> {
        let text = fs::read_to_string(path).map_err(|e| {
            CalcError::file_error("read", path.display().to_string(), e.to_string())
        })?;
        Self::from_toml_str(&text)
    }

    /// Validate settings values.
    pub fn validate(&self) -> CalcResult<()> {
        if self.steel_density_kg_dm3 <= 0.0 {
            return Err(CalcError::invalid_input(
                "steel_density_kg_dm3",
                self.steel_density_kg_dm3.to_string(),
                "Density must be positive",
            ));
        }
        if self.weld_pipe_mass_fraction < 0.0 || self.weld_pipe_mass_fraction > 1.0 {
            return Err(CalcError::invalid_input(
                "weld_pipe_mass_fraction",
                self.weld_pipe_mass_fraction.to_string(),
                "Fraction must be between 0 and 1",
            ));
        }
        if self.weld_deposit_kg_per_m < 0.0 {
            return Err(CalcError::invalid_input(
                "weld_deposit_kg_per_m",
                self.weld_deposit_kg_per_m.to_string(),
                "Deposit rate cannot be negative",
            ));
        }
        for (field, count) in [
            ("flanges_per_fitting", self.flanges_per_fitting),
            ("gussets_per_fitting", self.gussets_per_fitting),
            ("welds_per_flange", self.welds_per_flange),
        ] {
            if count == 0 {
                return Err(CalcError::invalid_input(field, "0", "Count per fitting must be at least 1"));
            }
        }
        if self.min_bolt_length_mm <= 0.0 {
            return Err(CalcError::invalid_input(
                "min_bolt_length_mm",
                self.min_bolt_length_mm.to_string(),
                "Minimum bolt length must be positive",
            ));
        }
        if self.bolt_length_factor <= 0.0 {
            return Err(CalcError::invalid_input(
                "bolt_length_factor",
                self.bolt_length_factor.to_string(),
                "Factor must be positive",
            ));
        }
        self.sabs62_wall_thickness.validate()
    }
}

/// One step of the wall thickness step function.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WallThicknessStep {
    /// Largest nominal diameter this step covers (inclusive, mm)
    pub max_nominal_diameter_mm: f64,
    /// Wall thickness for sizes up to `max_nominal_diameter_mm`
    pub wall_thickness_mm: f64,
}

/// Step function from nominal diameter to an assumed wall thickness.
///
/// Steps must be in ascending order of `max_nominal_diameter_mm`; sizes above
/// the last step use `above_mm`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WallThicknessTable {
    pub steps: Vec<WallThicknessStep>,
    pub above_mm: f64,
}

impl Default for WallThicknessTable {
    fn default() -> Self {
        let step = |max_nominal_diameter_mm, wall_thickness_mm| WallThicknessStep {
            max_nominal_diameter_mm,
            wall_thickness_mm,
        };
        WallThicknessTable {
            steps: vec![
                step(100.0, 6.0),
                step(200.0, 8.0),
                step(400.0, 10.0),
                step(600.0, 12.0),
            ],
            above_mm: 14.0,
        }
    }
}

impl WallThicknessTable {
    /// Wall thickness (mm) for a nominal diameter
    pub fn wall_thickness_for(&self, nominal_diameter_mm: f64) -> f64 {
        self.steps
            .iter()
            .find(|s| nominal_diameter_mm <= s.max_nominal_diameter_mm)
            .map(|s| s.wall_thickness_mm)
            .unwrap_or(self.above_mm)
    }

    fn validate(&self) -> CalcResult<()> {
        let ascending = self
            .steps
            .windows(2)
            .all(|w| w[0].max_nominal_diameter_mm < w[1].max_nominal_diameter_mm);
        if !ascending {
            return Err(CalcError::invalid_input(
                "sabs62_wall_thickness.steps",
                format!("{} steps", self.steps.len()),
                "Steps must be in ascending order of nominal diameter",
            ));
        }
        Ok(())
    }
}
