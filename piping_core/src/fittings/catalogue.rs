//! Catalogue queries for building fitting selectors.
//!
//! Everything here is derived from the fitting dimension tables, so a type
//! or size only shows up once a dimension row exists for it.

use std::collections::BTreeSet;

use crate::errors::CalcResult;
use crate::reference::{FittingDimensionRecord, ReferenceData};

use super::{FittingStandard, FittingType};

/// Fitting types with at least one dimension row under `standard`.
pub fn available_fitting_types(
    store: &dyn ReferenceData,
    standard: FittingStandard,
) -> CalcResult<Vec<FittingType>> {
    let types: BTreeSet<FittingType> = store
        .fitting_dimensions(standard)?
        .into_iter()
        .map(|d| d.fitting_type)
        .collect();
    Ok(types.into_iter().collect())
}

/// Nominal diameters available for a type, ascending.
pub fn available_sizes(
    store: &dyn ReferenceData,
    standard: FittingStandard,
    fitting_type: FittingType,
) -> CalcResult<Vec<u32>> {
    let sizes: BTreeSet<u32> = store
        .fitting_dimensions(standard)?
        .into_iter()
        .filter(|d| d.fitting_type == fitting_type)
        .map(|d| d.nominal_diameter_mm)
        .collect();
    Ok(sizes.into_iter().collect())
}

/// SABS62 angle bands tabulated for a type and size.
///
/// SABS719 has no angle bands, so there is no standard parameter.
pub fn available_angle_ranges(
    store: &dyn ReferenceData,
    fitting_type: FittingType,
    nominal_diameter_mm: u32,
) -> CalcResult<Vec<String>> {
    let ranges: BTreeSet<String> = store
        .fitting_dimensions(FittingStandard::Sabs62)?
        .into_iter()
        .filter(|d| d.fitting_type == fitting_type && d.nominal_diameter_mm == nominal_diameter_mm)
        .filter_map(|d| d.angle_range)
        .collect();
    Ok(ranges.into_iter().collect())
}

/// Dimension row for display, `None` when not tabulated.
///
/// Unlike the calculation path a miss is not an error here.
pub fn fitting_dimensions(
    store: &dyn ReferenceData,
    standard: FittingStandard,
    fitting_type: FittingType,
    nominal_diameter_mm: u32,
    angle_range: Option<&str>,
) -> CalcResult<Option<FittingDimensionRecord>> {
    let angle_range = match standard {
        FittingStandard::Sabs62 => angle_range,
        FittingStandard::Sabs719 => None,
    };
    store.lookup_fitting_dimension(standard, fitting_type, nominal_diameter_mm, angle_range)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reference::builtin_snapshot_ref;

    #[test]
    fn test_types_per_standard() {
        let store = builtin_snapshot_ref();
        let sabs719 = available_fitting_types(store, FittingStandard::Sabs719).unwrap();
        assert!(sabs719.contains(&FittingType::ShortTee));
        assert!(sabs719.contains(&FittingType::GussetTee));
        assert!(!sabs719.contains(&FittingType::EqualTee));

        let sabs62 = available_fitting_types(store, FittingStandard::Sabs62).unwrap();
        assert!(sabs62.contains(&FittingType::EqualTee));
        assert!(!sabs62.contains(&FittingType::ShortTee));

        // no duplicates even though LATERAL has several rows
        let laterals = sabs62.iter().filter(|t| **t == FittingType::Lateral).count();
        assert_eq!(laterals, 1);
    }

    #[test]
    fn test_sizes_ascending() {
        let sizes =
            available_sizes(builtin_snapshot_ref(), FittingStandard::Sabs719, FittingType::ShortTee).unwrap();
        assert_eq!(sizes, vec![100, 150, 200, 250, 300]);
    }

    #[test]
    fn test_sizes_distinct() {
        let sizes = available_sizes(builtin_snapshot_ref(), FittingStandard::Sabs62, FittingType::Lateral).unwrap();
        assert_eq!(sizes, vec![100, 150]);
    }

    #[test]
    fn test_angle_ranges() {
        let store = builtin_snapshot_ref();
        let ranges = available_angle_ranges(store, FittingType::Lateral, 100).unwrap();
        assert_eq!(ranges, vec!["45-59".to_string(), "60-90".to_string()]);

        // rows without a band contribute nothing
        assert!(available_angle_ranges(store, FittingType::EqualTee, 100).unwrap().is_empty());
    }

    #[test]
    fn test_dimension_query_miss_is_none() {
        let store = builtin_snapshot_ref();
        let row = fitting_dimensions(store, FittingStandard::Sabs719, FittingType::ShortTee, 200, None).unwrap();
        assert_eq!(row.map(|r| r.a_mm()), Some(230.0));

        let miss = fitting_dimensions(store, FittingStandard::Sabs719, FittingType::ShortTee, 175, None).unwrap();
        assert!(miss.is_none());
    }
}
