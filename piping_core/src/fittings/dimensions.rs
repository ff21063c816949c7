//! Fitting dimension resolution.
//!
//! SABS62 tables are keyed by (type, size, angle range) since laterals come
//! in several angle bands; SABS719 tables have no angle band and any angle
//! passed in is ignored.

use crate::errors::{CalcError, CalcResult};
use crate::reference::{FittingDimensionRecord, ReferenceData};

use super::{FittingStandard, FittingType};

/// Resolve the dimension row for a fitting, failing with `NotFound` if the
/// table has no exact match.
pub fn resolve_fitting_dimensions(
    store: &dyn ReferenceData,
    standard: FittingStandard,
    fitting_type: FittingType,
    nominal_diameter_mm: u32,
    angle_range: Option<&str>,
) -> CalcResult<FittingDimensionRecord> {
    let angle_range = match standard {
        FittingStandard::Sabs62 => angle_range.filter(|a| !a.trim().is_empty()),
        FittingStandard::Sabs719 => None,
    };

    store
        .lookup_fitting_dimension(standard, fitting_type, nominal_diameter_mm, angle_range)?
        .ok_or_else(|| {
            let mut key = format!("type {}, diameter {}mm", fitting_type, nominal_diameter_mm);
            if let Some(angle) = angle_range {
                key.push_str(&format!(", angle range {}", angle));
            }
            CalcError::not_found(format!("{} fitting", standard), key)
        })
}
