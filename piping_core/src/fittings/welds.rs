//! # Weld Lengths and Weld Mass
//!
//! Weld accounting per batch of fittings:
//!
//! - **Flange welds**: every outlet is flanged; each flange is welded inside
//!   and outside, each run one pipe circumference long.
//! - **Body welds**: a fabricated (SABS719) fitting has one tee/lateral weld
//!   per unit, one circumference long. Cast SABS62 bodies have none.
//! - **Gusset welds**: supplied by the gusset calculation.
//!
//! Weld mass is an empirical allowance, not a deposit volume:
//!
//! ```text
//! SABS719: 0.025 · pipe mass + 0.5 kg/m · (flange + body + gusset weld length)
//! SABS62:                      0.5 kg/m · flange weld length
//! ```

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::settings::EstimatingSettings;
use crate::units::{Metres, Millimetres};

use super::FittingStandard;

/// Weld counts, lengths and estimated weld mass for a batch of fittings.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct WeldSummary {
    /// Flanges across the batch
    pub number_of_flanges: u32,
    /// Flanges that are welded on (one per flange)
    pub number_of_flange_welds: u32,
    /// Total flange weld run, inside and outside (m)
    pub flange_weld_length_m: f64,
    /// Tee/lateral body welds across the batch
    pub number_of_tee_welds: u32,
    /// Total body weld run (m)
    pub tee_weld_length_m: f64,
    /// Total gusset weld run (m)
    pub gusset_weld_length_m: f64,
    /// Estimated weld metal (kg)
    pub weld_mass_kg: f64,
}

impl WeldSummary {
    /// Total weld run across all categories (m)
    pub fn total_weld_length_m(&self) -> f64 {
        self.flange_weld_length_m + self.tee_weld_length_m + self.gusset_weld_length_m
    }
}

/// Pipe circumference at the outside diameter.
pub fn circumference(outside_diameter_mm: f64) -> Metres {
    Metres::from(Millimetres(PI * outside_diameter_mm))
}

/// Weld counts, lengths and mass for `quantity` fittings.
///
/// `total_pipe_mass_kg` and `gusset_weld_length_m` only contribute for
/// SABS719.
pub fn estimate_welds(
    standard: FittingStandard,
    outside_diameter_mm: f64,
    quantity: u32,
    total_pipe_mass_kg: f64,
    gusset_weld_length_m: f64,
    settings: &EstimatingSettings,
) -> WeldSummary {
    let circumference_m = circumference(outside_diameter_mm).0;

    let number_of_flanges = settings.flanges_per_fitting.saturating_mul(quantity);
    let number_of_flange_welds = number_of_flanges;
    let flange_weld_length_m =
        f64::from(number_of_flange_welds) * f64::from(settings.welds_per_flange) * circumference_m;

    match standard {
        FittingStandard::Sabs719 => {
            let number_of_tee_welds = quantity;
            let tee_weld_length_m = f64::from(number_of_tee_welds) * circumference_m;
            let weld_mass_kg = total_pipe_mass_kg * settings.weld_pipe_mass_fraction
                + (flange_weld_length_m + tee_weld_length_m + gusset_weld_length_m)
                    * settings.weld_deposit_kg_per_m;

            WeldSummary {
                number_of_flanges,
                number_of_flange_welds,
                flange_weld_length_m,
                number_of_tee_welds,
                tee_weld_length_m,
                gusset_weld_length_m,
                weld_mass_kg,
            }
        }
        FittingStandard::Sabs62 => WeldSummary {
            number_of_flanges,
            number_of_flange_welds,
            flange_weld_length_m,
            number_of_tee_welds: 0,
            tee_weld_length_m: 0.0,
            gusset_weld_length_m: 0.0,
            weld_mass_kg: flange_weld_length_m * settings.weld_deposit_kg_per_m,
        },
    }
}
