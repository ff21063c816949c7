//! # Gusset Geometry
//!
//! Gusseted tees carry triangular reinforcement plates between run and
//! branch, one on each side of the branch. Each plate is a right isosceles
//! triangle set at 45°, cut from plate of the same thickness as the pipe
//! wall, with both legs equal to the gusset section `C` from the SABS719
//! table.
//!
//! ```text
//!        |  branch
//!        |\
//!        | \  hypotenuse = L·√2
//!      L |  \
//!        |___\______ run
//!          L
//! ```
//!
//! Every edge of the plate is welded: two legs plus the hypotenuse.
//!
//! ## Example
//!
//! ```rust
//! use piping_core::fittings::gusset::gusset_plates;
//! use piping_core::settings::EstimatingSettings;
//!
//! let g = gusset_plates(50.0, 10.0, 1, &EstimatingSettings::default());
//! assert!((g.single_area_mm2 - 1250.0).abs() < 1e-9);
//! assert!((g.total_mass_kg - 0.19625).abs() < 1e-9);
//! ```

use std::f64::consts::SQRT_2;

use serde::{Deserialize, Serialize};

use crate::reference::FittingDimensionRecord;
use crate::settings::EstimatingSettings;
use crate::units::{CuDm, CuMm, Kilograms};

/// Gusset plates for a batch of identical fittings.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GussetGeometry {
    /// Gusset section / leg length L (mm); 0 when the fitting has no gussets
    pub section_mm: f64,
    /// Area of one plate (mm²)
    pub single_area_mm2: f64,
    /// Mass of one plate (kg)
    pub single_mass_kg: f64,
    /// Plates across the whole quantity
    pub plate_count: u32,
    /// Mass of all plates (kg)
    pub total_mass_kg: f64,
    /// Weld around one plate (mm)
    pub single_weld_length_mm: f64,
    /// Weld around all plates (m)
    pub total_weld_length_m: f64,
}

/// Gusset leg length from the table: C when positive, otherwise B − A.
///
/// Returns 0 when neither yields a positive length.
pub fn gusset_section_mm(dims: &FittingDimensionRecord) -> f64 {
    let c = dims.c_mm();
    if c > 0.0 {
        return c;
    }
    match (dims.dimension_a_mm, dims.dimension_b_mm) {
        (Some(a), Some(b)) if b - a > 0.0 => b - a,
        _ => 0.0,
    }
}

/// Gusset plates for a fitting row, or all zeros when no section resolves.
pub fn gussets_for(
    dims: &FittingDimensionRecord,
    plate_thickness_mm: f64,
    quantity: u32,
    settings: &EstimatingSettings,
) -> GussetGeometry {
    let section = gusset_section_mm(dims);
    if section <= 0.0 {
        log::debug!(
            "no gusset section for {} {}NB, gussets omitted",
            dims.fitting_type,
            dims.nominal_diameter_mm
        );
        return GussetGeometry::default();
    }
    gusset_plates(section, plate_thickness_mm, quantity, settings)
}

/// Plate mass and weld length for triangular gussets of leg `leg_mm`.
pub fn gusset_plates(
    leg_mm: f64,
    plate_thickness_mm: f64,
    quantity: u32,
    settings: &EstimatingSettings,
) -> GussetGeometry {
    let per_fitting = settings.gussets_per_fitting;
    let plates = per_fitting.saturating_mul(quantity);

    let area_mm2 = 0.5 * leg_mm * leg_mm;
    let volume: CuDm = CuMm(area_mm2 * plate_thickness_mm).into();
    let single_mass: Kilograms = volume * settings.steel_density();

    let single_weld_mm = leg_mm * SQRT_2 + 2.0 * leg_mm;

    GussetGeometry {
        section_mm: leg_mm,
        single_area_mm2: area_mm2,
        single_mass_kg: single_mass.0,
        plate_count: plates,
        total_mass_kg: f64::from(per_fitting) * single_mass.0 * f64::from(quantity),
        single_weld_length_mm: single_weld_mm,
        total_weld_length_m: f64::from(per_fitting) * single_weld_mm / 1000.0 * f64::from(quantity),
    }
}
