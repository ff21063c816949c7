//! # Reference Data
//!
//! Read-only tables the fitting calculations draw from: NB↔OD, steel
//! specifications, pipe dimensions, fitting dimensions, flange dimensions and
//! bolt/nut masses.
//!
//! The calculations only see the [`ReferenceData`] trait. A relational
//! backend implements it with queries; [`ReferenceSnapshot`] implements it in
//! memory and is what the CLI and the tests use.
//!
//! Every lookup returns `CalcResult<Option<_>>`: `Ok(None)` means the table
//! has no matching row, `Err` means the store itself failed. Whether a miss is
//! fatal is decided by the caller, not the store.
//!
//! ## Example
//!
//! ```rust
//! use piping_core::reference::{builtin_snapshot, ReferenceData};
//!
//! let store = builtin_snapshot();
//! let nb = store.lookup_nb_nps(200).unwrap().unwrap();
//! assert_eq!(nb.outside_diameter_mm, 219.1);
//! ```

pub mod builtin;
pub mod snapshot;

pub use builtin::{builtin_snapshot, builtin_snapshot_ref};
pub use snapshot::{ReferenceSnapshot, SnapshotMeta, SNAPSHOT_SCHEMA_VERSION};

use serde::{Deserialize, Serialize};

use crate::errors::CalcResult;
use crate::fittings::{FittingStandard, FittingType};

/// Nominal bore to outside diameter mapping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NbNpsRecord {
    /// Nominal bore (mm)
    pub nominal_diameter_mm: u32,
    /// Nominal pipe size designation in inches (e.g. "8"), informational
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nps: Option<String>,
    /// Actual outside diameter (mm)
    pub outside_diameter_mm: f64,
}

/// Steel specification (material grade) that pipe dimensions belong to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SteelSpecificationRecord {
    pub id: u32,
    /// Display name (e.g. "SABS 719 ERW")
    pub name: String,
}

/// Pipe wall data for one nominal bore and schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipeDimensionRecord {
    pub nominal_diameter_mm: u32,
    /// Schedule exactly as entered in the table ("Sch40", "40", "Sch 80", "STD")
    pub schedule_designation: String,
    /// Steel specification this row belongs to, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub steel_specification_id: Option<u32>,
    pub wall_thickness_mm: f64,
    /// Tabulated mass per metre (kg/m), authoritative when positive
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mass_kg_per_m: Option<f64>,
}

/// Standard-specific fitting dimensions.
///
/// SABS719 rows carry A/B/C (A = branch centre-to-face for short tees,
/// B = branch height for gusset tees, C = gusset section). SABS62 rows carry
/// a centre-to-face value and, for laterals, an angle range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FittingDimensionRecord {
    pub standard: FittingStandard,
    pub fitting_type: FittingType,
    pub nominal_diameter_mm: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub angle_range: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dimension_a_mm: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dimension_b_mm: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dimension_c_mm: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub centre_to_face_mm: Option<f64>,
}

impl FittingDimensionRecord {
    /// Dimension A, or 0 when absent
    pub fn a_mm(&self) -> f64 {
        self.dimension_a_mm.unwrap_or(0.0)
    }

    /// Dimension B, or 0 when absent
    pub fn b_mm(&self) -> f64 {
        self.dimension_b_mm.unwrap_or(0.0)
    }

    /// Dimension C, or 0 when absent
    pub fn c_mm(&self) -> f64 {
        self.dimension_c_mm.unwrap_or(0.0)
    }

    /// Centre-to-face, or 0 when absent
    pub fn centre_to_face(&self) -> f64 {
        self.centre_to_face_mm.unwrap_or(0.0)
    }
}

/// Flange mass and drilling for one size, flange standard and pressure class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlangeDimensionRecord {
    pub nominal_diameter_mm: u32,
    pub standard_id: u32,
    pub pressure_class_id: u32,
    /// Mass of one flange (kg)
    pub mass_kg: f64,
    /// Bolt holes per flange
    pub num_holes: u32,
    /// Flange thickness `b` (mm), used to size the bolts
    pub flange_thickness_mm: f64,
    /// Pitch circle diameter (mm), informational
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pcd_mm: Option<f64>,
    /// Bolt designation used with this flange (e.g. "M16")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bolt_ref: Option<String>,
}

/// Mass of one bolt of a given designation and length.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoltMassRecord {
    pub bolt_ref: String,
    pub length_mm: f64,
    pub mass_kg: f64,
}

/// Mass of one nut for a bolt designation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NutMassRecord {
    pub bolt_ref: String,
    pub mass_kg: f64,
}

/// Read-only query interface over the reference tables.
///
/// Implementations must be safe to share between threads; the calculations
/// never write through this trait.
pub trait ReferenceData: Send + Sync {
    /// Outside diameter row for a nominal bore.
    fn lookup_nb_nps(&self, nominal_diameter_mm: u32) -> CalcResult<Option<NbNpsRecord>>;

    /// Steel specification by id.
    fn lookup_steel_specification(&self, id: u32) -> CalcResult<Option<SteelSpecificationRecord>>;

    /// First pipe dimension matching any schedule candidate, tried in order.
    ///
    /// With `steel_specification_id` set, only rows of that specification
    /// match.
    fn lookup_pipe_dimension(
        &self,
        nominal_diameter_mm: u32,
        schedule_candidates: &[String],
        steel_specification_id: Option<u32>,
    ) -> CalcResult<Option<PipeDimensionRecord>>;

    /// Fitting dimensions; `angle_range` filters only when given.
    fn lookup_fitting_dimension(
        &self,
        standard: FittingStandard,
        fitting_type: FittingType,
        nominal_diameter_mm: u32,
        angle_range: Option<&str>,
    ) -> CalcResult<Option<FittingDimensionRecord>>;

    /// Flange row for a size, flange standard and pressure class.
    fn lookup_flange_dimension(
        &self,
        nominal_diameter_mm: u32,
        standard_id: u32,
        pressure_class_id: u32,
    ) -> CalcResult<Option<FlangeDimensionRecord>>;

    /// Shortest bolt of `bolt_ref` whose length is at least `min_length_mm`.
    fn lookup_bolt_mass_at_least(
        &self,
        bolt_ref: &str,
        min_length_mm: f64,
    ) -> CalcResult<Option<BoltMassRecord>>;

    /// Nut mass for a bolt designation.
    fn lookup_nut_mass(&self, bolt_ref: &str) -> CalcResult<Option<NutMassRecord>>;

    /// Every fitting dimension row of a standard, for catalogue queries.
    fn fitting_dimensions(&self, standard: FittingStandard) -> CalcResult<Vec<FittingDimensionRecord>>;
}
