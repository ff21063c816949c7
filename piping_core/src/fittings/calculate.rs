//! # Fitting Mass Calculation
//!
//! Entry point for quoting a fitting: total mass, its breakdown by category
//! and the weld metrics an estimator needs to price the fabrication.
//!
//! ## Pipelines
//!
//! - **SABS719** (fabricated): the fitting is built from cut pipe. Mass comes
//!   from the run pipe (lengths A + B on the request), a branch stub sized
//!   from the fitting table, gusset plates for gusseted types, welds and
//!   flange hardware. The body itself carries no separate mass.
//! - **SABS62** (cast/forged): the body mass is estimated from the table's
//!   centre-to-face dimension and the outside diameter, with optional
//!   tangent pipe, flange welds and flange hardware.
//!
//! Missing mandatory reference rows fail with `NotFound`; missing flange,
//! bolt, nut or tangent data is reported in `warnings` and contributes zero.
//! Every numeric output is rounded to 2 decimals once, at the end.
//!
//! ## Example
//!
//! ```rust
//! use piping_core::fittings::{calculate_fitting, FittingRequest, FittingStandard, FittingType};
//! use piping_core::reference::builtin_snapshot;
//!
//! let store = builtin_snapshot();
//! let request = FittingRequest::new(FittingStandard::Sabs719, FittingType::ShortTee, 200)
//!     .with_schedule("Sch 40")
//!     .with_pipe_lengths(1000.0, 1000.0)
//!     .with_steel_specification(1);
//!
//! let result = calculate_fitting(&store, &request).unwrap();
//! assert!(result.total_mass_kg > 0.0);
//! assert_eq!(result.outside_diameter_mm, 219.1);
//! ```

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::reference::{FittingDimensionRecord, ReferenceData};
use crate::settings::EstimatingSettings;
use crate::units::{round2, Kilograms};

use super::dimensions::resolve_fitting_dimensions;
use super::flange_hardware::{flange_hardware, HardwareLookup};
use super::gusset::{gussets_for, GussetGeometry};
use super::pipe_weight::{find_pipe_dimension, length_mass, mass_per_metre};
use super::welds::{estimate_welds, WeldSummary};
use super::{FittingGeometry, FittingStandard, FittingType};

// =============================================================================
// REQUEST
// =============================================================================

fn default_quantity() -> u32 {
    1
}

/// A fitting to be quoted.
///
/// SABS719 requests must carry a schedule and both pipe lengths. SABS62
/// requests only need them for tangent pipe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FittingRequest {
    pub standard: FittingStandard,
    pub fitting_type: FittingType,
    /// Nominal bore (mm)
    pub nominal_diameter_mm: u32,
    /// SABS62 lateral angle band (e.g. "60-90"); ignored for SABS719
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub angle_range: Option<String>,
    /// Free-form schedule ("Sch40", "Sch 40", "40")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schedule: Option<String>,
    /// Run pipe length A (mm)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pipe_length_a_mm: Option<f64>,
    /// Run pipe length B (mm)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pipe_length_b_mm: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub steel_specification_id: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flange_standard_id: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flange_pressure_class_id: Option<u32>,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

impl FittingRequest {
    pub fn new(standard: FittingStandard, fitting_type: FittingType, nominal_diameter_mm: u32) -> Self {
        Self {
            standard,
            fitting_type,
            nominal_diameter_mm,
            angle_range: None,
            schedule: None,
            pipe_length_a_mm: None,
            pipe_length_b_mm: None,
            steel_specification_id: None,
            flange_standard_id: None,
            flange_pressure_class_id: None,
            quantity: 1,
        }
    }

    pub fn with_angle_range(mut self, angle_range: impl Into<String>) -> Self {
        self.angle_range = Some(angle_range.into());
        self
    }

    pub fn with_schedule(mut self, schedule: impl Into<String>) -> Self {
        self.schedule = Some(schedule.into());
        self
    }

    pub fn with_pipe_lengths(mut self, a_mm: f64, b_mm: f64) -> Self {
        self.pipe_length_a_mm = Some(a_mm);
        self.pipe_length_b_mm = Some(b_mm);
        self
    }

    pub fn with_steel_specification(mut self, id: u32) -> Self {
        self.steel_specification_id = Some(id);
        self
    }

    pub fn with_flange(mut self, standard_id: u32, pressure_class_id: u32) -> Self {
        self.flange_standard_id = Some(standard_id);
        self.flange_pressure_class_id = Some(pressure_class_id);
        self
    }

    pub fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = quantity;
        self
    }

    /// Checks that hold for either standard.
    pub fn validate(&self) -> CalcResult<()> {
        if self.quantity == 0 {
            return Err(CalcError::invalid_input(
                "quantity",
                self.quantity.to_string(),
                "Quantity must be at least 1",
            ));
        }
        if self.nominal_diameter_mm == 0 {
            return Err(CalcError::invalid_input(
                "nominal_diameter_mm",
                "0",
                "Nominal diameter must be positive",
            ));
        }
        for (field, value) in [
            ("pipe_length_a_mm", self.pipe_length_a_mm),
            ("pipe_length_b_mm", self.pipe_length_b_mm),
        ] {
            if let Some(v) = value {
                if !v.is_finite() || v < 0.0 {
                    return Err(CalcError::invalid_input(
                        field,
                        v.to_string(),
                        "Pipe length must be a non-negative number",
                    ));
                }
            }
        }
        Ok(())
    }

    /// Reject quantities whose flange or gusset counts do not fit a `u32`.
    pub fn validate_counts(&self, settings: &EstimatingSettings) -> CalcResult<()> {
        for (per_fitting, what) in [
            (settings.flanges_per_fitting, "flanges"),
            (settings.gussets_per_fitting, "gusset plates"),
        ] {
            if per_fitting.checked_mul(self.quantity).is_none() {
                return Err(CalcError::invalid_input(
                    "quantity",
                    self.quantity.to_string(),
                    format!("Quantity x {} {} per fitting exceeds {}", per_fitting, what, u32::MAX),
                ));
            }
        }
        Ok(())
    }

    /// Schedule with surrounding whitespace removed, `None` when blank
    fn schedule_trimmed(&self) -> Option<&str> {
        self.schedule.as_deref().map(str::trim).filter(|s| !s.is_empty())
    }
}

// =============================================================================
// RESULT
// =============================================================================

/// Mass breakdown and weld metrics for a batch of fittings.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FittingResult {
    // === Mass (kg) ===
    pub total_mass_kg: f64,
    /// Cast body (SABS62); always 0 for fabricated fittings
    pub fitting_mass_kg: f64,
    /// Run, branch and tangent pipe
    pub pipe_mass_kg: f64,
    pub gusset_mass_kg: f64,
    pub flange_mass_kg: f64,
    pub bolt_mass_kg: f64,
    pub nut_mass_kg: f64,
    pub weld_mass_kg: f64,

    // === Welds ===
    pub number_of_flanges: u32,
    pub number_of_flange_welds: u32,
    pub flange_weld_length_m: f64,
    pub number_of_tee_welds: u32,
    pub tee_weld_length_m: f64,
    pub gusset_weld_length_m: f64,

    // === Geometry ===
    /// Gusset leg length used (mm), 0 when the fitting has no gussets
    pub gusset_section_mm: f64,
    pub outside_diameter_mm: f64,
    pub wall_thickness_mm: f64,

    /// Degraded optional data
    #[serde(default)]
    pub warnings: Vec<String>,
}

impl FittingResult {
    #[allow(clippy::too_many_arguments)]
    fn assemble(
        outside_diameter_mm: f64,
        wall_thickness_mm: f64,
        fitting_mass: Kilograms,
        pipe_mass: Kilograms,
        gussets: &GussetGeometry,
        welds: &WeldSummary,
        hardware: &HardwareLookup,
        mut warnings: Vec<String>,
    ) -> Self {
        warnings.extend(hardware.warnings());

        let total = fitting_mass.0
            + pipe_mass.0
            + gussets.total_mass_kg
            + hardware.flange_mass_kg()
            + hardware.bolt_mass_kg()
            + hardware.nut_mass_kg()
            + welds.weld_mass_kg;

        FittingResult {
            total_mass_kg: total,
            fitting_mass_kg: fitting_mass.0,
            pipe_mass_kg: pipe_mass.0,
            gusset_mass_kg: gussets.total_mass_kg,
            flange_mass_kg: hardware.flange_mass_kg(),
            bolt_mass_kg: hardware.bolt_mass_kg(),
            nut_mass_kg: hardware.nut_mass_kg(),
            weld_mass_kg: welds.weld_mass_kg,
            number_of_flanges: welds.number_of_flanges,
            number_of_flange_welds: welds.number_of_flange_welds,
            flange_weld_length_m: welds.flange_weld_length_m,
            number_of_tee_welds: welds.number_of_tee_welds,
            tee_weld_length_m: welds.tee_weld_length_m,
            gusset_weld_length_m: welds.gusset_weld_length_m,
            gusset_section_mm: gussets.section_mm,
            outside_diameter_mm,
            wall_thickness_mm,
            warnings,
        }
    }

    /// Round every numeric output to 2 decimals.
    fn rounded(self) -> Self {
        FittingResult {
            total_mass_kg: round2(self.total_mass_kg),
            fitting_mass_kg: round2(self.fitting_mass_kg),
            pipe_mass_kg: round2(self.pipe_mass_kg),
            gusset_mass_kg: round2(self.gusset_mass_kg),
            flange_mass_kg: round2(self.flange_mass_kg),
            bolt_mass_kg: round2(self.bolt_mass_kg),
            nut_mass_kg: round2(self.nut_mass_kg),
            weld_mass_kg: round2(self.weld_mass_kg),
            flange_weld_length_m: round2(self.flange_weld_length_m),
            tee_weld_length_m: round2(self.tee_weld_length_m),
            gusset_weld_length_m: round2(self.gusset_weld_length_m),
            gusset_section_mm: round2(self.gusset_section_mm),
            outside_diameter_mm: round2(self.outside_diameter_mm),
            wall_thickness_mm: round2(self.wall_thickness_mm),
            ..self
        }
    }
}

// =============================================================================
// ENTRY POINTS
// =============================================================================

/// Calculate a fitting with the default estimating constants.
pub fn calculate_fitting(store: &dyn ReferenceData, request: &FittingRequest) -> CalcResult<FittingResult> {
    calculate_fitting_with(store, request, &EstimatingSettings::default())
}

/// Calculate a fitting with explicit estimating constants.
pub fn calculate_fitting_with(
    store: &dyn ReferenceData,
    request: &FittingRequest,
    settings: &EstimatingSettings,
) -> CalcResult<FittingResult> {
    request.validate()?;
    request.validate_counts(settings)?;
    log::debug!(
        "calculating {} x {} {} {}NB",
        request.quantity,
        request.standard,
        request.fitting_type,
        request.nominal_diameter_mm
    );

    let result = match request.standard {
        FittingStandard::Sabs719 => calculate_sabs719(store, request, settings)?,
        FittingStandard::Sabs62 => calculate_sabs62(store, request, settings)?,
    };
    Ok(result.rounded())
}

fn outside_diameter_mm(store: &dyn ReferenceData, nominal_diameter_mm: u32) -> CalcResult<f64> {
    store
        .lookup_nb_nps(nominal_diameter_mm)?
        .map(|nb| nb.outside_diameter_mm)
        .ok_or_else(|| {
            CalcError::not_found("NB to OD mapping", format!("nominal diameter {}mm", nominal_diameter_mm))
        })
}

// =============================================================================
// SABS719 (FABRICATED)
// =============================================================================

/// Branch stub length cut from the fitting table.
fn sabs719_branch_length_mm(geometry: FittingGeometry, dims: &FittingDimensionRecord) -> f64 {
    match geometry {
        FittingGeometry::Tee | FittingGeometry::Lateral => dims.a_mm(),
        FittingGeometry::GussetTee => match dims.dimension_b_mm {
            Some(b) if b > 0.0 => b,
            _ => dims.a_mm(),
        },
        FittingGeometry::GussetedBody | FittingGeometry::Plain => 0.0,
    }
}

fn calculate_sabs719(
    store: &dyn ReferenceData,
    request: &FittingRequest,
    settings: &EstimatingSettings,
) -> CalcResult<FittingResult> {
    let nd = request.nominal_diameter_mm;
    let schedule = request
        .schedule_trimmed()
        .ok_or_else(|| CalcError::missing_field("schedule", "required for SABS719 fittings"))?;
    let length_a = request
        .pipe_length_a_mm
        .ok_or_else(|| CalcError::missing_field("pipe_length_a_mm", "required for SABS719 fittings"))?;
    let length_b = request
        .pipe_length_b_mm
        .ok_or_else(|| CalcError::missing_field("pipe_length_b_mm", "required for SABS719 fittings"))?;

    let dims = resolve_fitting_dimensions(store, FittingStandard::Sabs719, request.fitting_type, nd, None)?;

    if let Some(id) = request.steel_specification_id {
        store
            .lookup_steel_specification(id)?
            .ok_or_else(|| CalcError::not_found("Steel specification", format!("id {}", id)))?;
    }

    let pipe = find_pipe_dimension(store, nd, schedule, request.steel_specification_id)?.ok_or_else(|| {
        CalcError::not_found("Pipe dimension", format!("{}NB, schedule {}", nd, schedule))
    })?;
    let od = outside_diameter_mm(store, nd)?;

    let per_metre = mass_per_metre(&pipe, od, settings.steel_density());
    let geometry = request.fitting_type.geometry();
    let run = length_mass(per_metre, length_a + length_b);
    let branch = length_mass(per_metre, sabs719_branch_length_mm(geometry, &dims));
    let pipe_mass = (run + branch) * f64::from(request.quantity);

    let gussets = if geometry.is_gusseted() {
        gussets_for(&dims, pipe.wall_thickness_mm, request.quantity, settings)
    } else {
        GussetGeometry::default()
    };

    let welds = estimate_welds(
        FittingStandard::Sabs719,
        od,
        request.quantity,
        pipe_mass.0,
        gussets.total_weld_length_m,
        settings,
    );

    let hardware = flange_hardware(
        store,
        nd,
        request.flange_standard_id,
        request.flange_pressure_class_id,
        request.quantity,
        settings,
    );

    Ok(FittingResult::assemble(
        od,
        pipe.wall_thickness_mm,
        Kilograms(0.0),
        pipe_mass,
        &gussets,
        &welds,
        &hardware,
        Vec::new(),
    ))
}

// =============================================================================
// SABS62 (CAST)
// =============================================================================

fn calculate_sabs62(
    store: &dyn ReferenceData,
    request: &FittingRequest,
    settings: &EstimatingSettings,
) -> CalcResult<FittingResult> {
    let nd = request.nominal_diameter_mm;
    let mut warnings = Vec::new();

    let dims = resolve_fitting_dimensions(
        store,
        FittingStandard::Sabs62,
        request.fitting_type,
        nd,
        request.angle_range.as_deref(),
    )?;
    let od = outside_diameter_mm(store, nd)?;
    let wall_thickness = settings.sabs62_wall_thickness.wall_thickness_for(f64::from(nd));

    if dims.centre_to_face_mm.is_none() {
        let message = format!("{} {}NB has no centre-to-face dimension, body mass is 0", request.fitting_type, nd);
        log::warn!("{}", message);
        warnings.push(message);
    }
    let centre_to_face = dims.centre_to_face();

    let od_m = od / 1000.0;
    let body_mass = Kilograms(
        centre_to_face / 1000.0
            * PI
            * od_m
            * od_m
            * settings.sabs62_shape_factor
            * settings.steel_density_kg_m3()
            * f64::from(request.quantity),
    );

    let tangent_mass = sabs62_tangent_mass(store, request, &dims, od, settings, &mut warnings)?;

    let welds = estimate_welds(FittingStandard::Sabs62, od, request.quantity, 0.0, 0.0, settings);

    let hardware = flange_hardware(
        store,
        nd,
        request.flange_standard_id,
        request.flange_pressure_class_id,
        request.quantity,
        settings,
    );

    Ok(FittingResult::assemble(
        od,
        wall_thickness,
        body_mass,
        tangent_mass,
        &GussetGeometry::default(),
        &welds,
        &hardware,
        warnings,
    ))
}

/// Straight pipe welded to a cast body.
///
/// Only quoted when schedule, steel specification and a non-zero length A
/// are all on the request. The branch tangent is one centre-to-face long for types with
/// a branch.
fn sabs62_tangent_mass(
    store: &dyn ReferenceData,
    request: &FittingRequest,
    dims: &FittingDimensionRecord,
    od: f64,
    settings: &EstimatingSettings,
    warnings: &mut Vec<String>,
) -> CalcResult<Kilograms> {
    let (Some(schedule), Some(spec_id), Some(length_a)) = (
        request.schedule_trimmed(),
        request.steel_specification_id,
        request.pipe_length_a_mm.filter(|a| *a > 0.0),
    ) else {
        return Ok(Kilograms(0.0));
    };
    let nd = request.nominal_diameter_mm;

    let Some(pipe) = find_pipe_dimension(store, nd, schedule, Some(spec_id))? else {
        let message = format!(
            "no pipe dimension for {}NB schedule {} (steel specification {}), tangent mass is 0",
            nd, schedule, spec_id
        );
        log::warn!("{}", message);
        warnings.push(message);
        return Ok(Kilograms(0.0));
    };

    let run_mm = length_a + request.pipe_length_b_mm.unwrap_or(0.0);
    let branch_mm = if request.fitting_type.geometry().has_branch() {
        dims.centre_to_face()
    } else {
        0.0
    };

    let per_metre = mass_per_metre(&pipe, od, settings.steel_density());
    Ok(length_mass(per_metre, run_mm + branch_mm) * f64::from(request.quantity))
}
