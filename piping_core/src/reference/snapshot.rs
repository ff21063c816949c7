//! In-memory reference data snapshot.
//!
//! A `ReferenceSnapshot` holds a full copy of the reference tables, exported
//! from the quoting database or built by hand. It serializes to JSON (see
//! [`crate::file_io`]) and implements [`ReferenceData`], so the calculations
//! run against it without a database.
//!
//! Lookups scan the tables linearly in row order; the first matching row
//! wins, the same way the database query takes the first hit.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{
    BoltMassRecord, FittingDimensionRecord, FlangeDimensionRecord, NbNpsRecord, NutMassRecord,
    PipeDimensionRecord, ReferenceData, SteelSpecificationRecord,
};
use crate::errors::{CalcError, CalcResult};
use crate::fittings::{FittingStandard, FittingType};

/// Current schema version for snapshot files
pub const SNAPSHOT_SCHEMA_VERSION: &str = "0.1.0";

/// Snapshot header.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotMeta {
    /// Schema version (for migration compatibility)
    pub version: String,
    /// Where the data came from (database name, "builtin", ...)
    pub source: String,
    /// When the snapshot was exported
    pub exported_at: DateTime<Utc>,
}

impl SnapshotMeta {
    pub fn new(source: impl Into<String>) -> Self {
        SnapshotMeta {
            version: SNAPSHOT_SCHEMA_VERSION.to_string(),
            source: source.into(),
            exported_at: Utc::now(),
        }
    }
}

/// Full set of reference tables held in memory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReferenceSnapshot {
    pub meta: SnapshotMeta,
    #[serde(default)]
    pub nb_nps: Vec<NbNpsRecord>,
    #[serde(default)]
    pub steel_specifications: Vec<SteelSpecificationRecord>,
    #[serde(default)]
    pub pipe_dimensions: Vec<PipeDimensionRecord>,
    #[serde(default)]
    pub fitting_dimensions: Vec<FittingDimensionRecord>,
    #[serde(default)]
    pub flange_dimensions: Vec<FlangeDimensionRecord>,
    #[serde(default)]
    pub bolt_masses: Vec<BoltMassRecord>,
    #[serde(default)]
    pub nut_masses: Vec<NutMassRecord>,
}

impl ReferenceSnapshot {
    /// Create an empty snapshot.
    pub fn new(source: impl Into<String>) -> Self {
        ReferenceSnapshot {
            meta: SnapshotMeta::new(source),
            nb_nps: Vec::new(),
            steel_specifications: Vec::new(),
            pipe_dimensions: Vec::new(),
            fitting_dimensions: Vec::new(),
            flange_dimensions: Vec::new(),
            bolt_masses: Vec::new(),
            nut_masses: Vec::new(),
        }
    }

    /// Total number of rows across all tables
    pub fn len(&self) -> usize {
        self.nb_nps.len()
            + self.steel_specifications.len()
            + self.pipe_dimensions.len()
            + self.fitting_dimensions.len()
            + self.flange_dimensions.len()
            + self.bolt_masses.len()
            + self.nut_masses.len()
    }

    /// Check if the snapshot is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Check table invariants.
    ///
    /// - exactly one NB↔OD row per nominal bore, with a positive OD
    /// - positive wall thicknesses
    /// - unique steel specification ids
    pub fn validate(&self) -> CalcResult<()> {
        let mut seen = HashSet::new();
        for row in &self.nb_nps {
            if !seen.insert(row.nominal_diameter_mm) {
                return Err(CalcError::invalid_input(
                    "nb_nps",
                    format!("{}NB", row.nominal_diameter_mm),
                    "Duplicate NB-NPS row for nominal diameter",
                ));
            }
            if row.outside_diameter_mm <= 0.0 {
                return Err(CalcError::invalid_input(
                    "nb_nps.outside_diameter_mm",
                    row.outside_diameter_mm.to_string(),
                    format!("Outside diameter for {}NB must be positive", row.nominal_diameter_mm),
                ));
            }
        }

        let mut spec_ids = HashSet::new();
        for spec in &self.steel_specifications {
            if !spec_ids.insert(spec.id) {
                return Err(CalcError::invalid_input(
                    "steel_specifications",
                    spec.id.to_string(),
                    "Duplicate steel specification id",
                ));
            }
        }

        if let Some(row) = self.pipe_dimensions.iter().find(|p| p.wall_thickness_mm <= 0.0) {
            return Err(CalcError::invalid_input(
                "pipe_dimensions.wall_thickness_mm",
                row.wall_thickness_mm.to_string(),
                format!(
                    "Wall thickness for {}NB {} must be positive",
                    row.nominal_diameter_mm, row.schedule_designation
                ),
            ));
        }

        Ok(())
    }
}

impl ReferenceData for ReferenceSnapshot {
    fn lookup_nb_nps(&self, nominal_diameter_mm: u32) -> CalcResult<Option<NbNpsRecord>> {
        Ok(self
            .nb_nps
            .iter()
            .find(|r| r.nominal_diameter_mm == nominal_diameter_mm)
            .cloned())
    }

    fn lookup_steel_specification(&self, id: u32) -> CalcResult<Option<SteelSpecificationRecord>> {
        Ok(self.steel_specifications.iter().find(|s| s.id == id).cloned())
    }

    fn lookup_pipe_dimension(
        &self,
        nominal_diameter_mm: u32,
        schedule_candidates: &[String],
        steel_specification_id: Option<u32>,
    ) -> CalcResult<Option<PipeDimensionRecord>> {
        for candidate in schedule_candidates {
            let hit = self.pipe_dimensions.iter().find(|p| {
                p.nominal_diameter_mm == nominal_diameter_mm
                    && p.schedule_designation == *candidate
                    && steel_specification_id
                        .map_or(true, |id| p.steel_specification_id == Some(id))
            });
            if let Some(row) = hit {
                return Ok(Some(row.clone()));
            }
        }
        Ok(None)
    }

    fn lookup_fitting_dimension(
        &self,
        standard: FittingStandard,
        fitting_type: FittingType,
        nominal_diameter_mm: u32,
        angle_range: Option<&str>,
    ) -> CalcResult<Option<FittingDimensionRecord>> {
        Ok(self
            .fitting_dimensions
            .iter()
            .find(|f| {
                f.standard == standard
                    && f.fitting_type == fitting_type
                    && f.nominal_diameter_mm == nominal_diameter_mm
                    && angle_range.map_or(true, |a| f.angle_range.as_deref() == Some(a))
            })
            .cloned())
    }

    fn lookup_flange_dimension(
        &self,
        nominal_diameter_mm: u32,
        standard_id: u32,
        pressure_class_id: u32,
    ) -> CalcResult<Option<FlangeDimensionRecord>> {
        Ok(self
            .flange_dimensions
            .iter()
            .find(|f| {
                f.nominal_diameter_mm == nominal_diameter_mm
                    && f.standard_id == standard_id
                    && f.pressure_class_id == pressure_class_id
            })
            .cloned())
    }

    fn lookup_bolt_mass_at_least(
        &self,
        bolt_ref: &str,
        min_length_mm: f64,
    ) -> CalcResult<Option<BoltMassRecord>> {
        Ok(self
            .bolt_masses
            .iter()
            .filter(|b| b.bolt_ref == bolt_ref && b.length_mm >= min_length_mm)
            .min_by(|a, b| a.length_mm.total_cmp(&b.length_mm))
            .cloned())
    }

    fn lookup_nut_mass(&self, bolt_ref: &str) -> CalcResult<Option<NutMassRecord>> {
        Ok(self.nut_masses.iter().find(|n| n.bolt_ref == bolt_ref).cloned())
    }

    fn fitting_dimensions(&self, standard: FittingStandard) -> CalcResult<Vec<FittingDimensionRecord>> {
        Ok(self
            .fitting_dimensions
            .iter()
            .filter(|f| f.standard == standard)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reference::builtin_snapshot;

    fn candidates(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_builtin_snapshot_is_valid() {
        let snapshot = builtin_snapshot();
        assert!(!snapshot.is_empty());
        snapshot.validate().unwrap();
    }

    #[test]
    fn test_first_schedule_candidate_wins() {
        let snapshot = builtin_snapshot();
        // 200NB is stored as "Sch40"; the earlier candidates miss
        let hit = snapshot
            .lookup_pipe_dimension(200, &candidates(&["Sch 40", "40", "Sch40"]), None)
            .unwrap()
            .unwrap();
        assert_eq!(hit.schedule_designation, "Sch40");

        let miss = snapshot
            .lookup_pipe_dimension(200, &candidates(&["Sch 160"]), None)
            .unwrap();
        assert!(miss.is_none());
    }

    #[test]
    fn test_pipe_dimension_filters_by_steel_spec() {
        let snapshot = builtin_snapshot();
        let sch40 = candidates(&["Sch40"]);
        assert!(snapshot.lookup_pipe_dimension(200, &sch40, Some(1)).unwrap().is_some());
        assert!(snapshot.lookup_pipe_dimension(200, &sch40, Some(99)).unwrap().is_none());
    }

    #[test]
    fn test_bolt_lookup_takes_nearest_length_at_or_above() {
        let snapshot = builtin_snapshot();
        let bolt = snapshot.lookup_bolt_mass_at_least("M16", 60.0).unwrap().unwrap();
        assert_eq!(bolt.length_mm, 65.0);

        let exact = snapshot.lookup_bolt_mass_at_least("M16", 65.0).unwrap().unwrap();
        assert_eq!(exact.length_mm, 65.0);

        assert!(snapshot.lookup_bolt_mass_at_least("M16", 500.0).unwrap().is_none());
        assert!(snapshot.lookup_bolt_mass_at_least("M99", 50.0).unwrap().is_none());
    }

    #[test]
    fn test_angle_range_filters_only_when_given() {
        let snapshot = builtin_snapshot();
        let any = snapshot
            .lookup_fitting_dimension(FittingStandard::Sabs62, FittingType::Lateral, 100, None)
            .unwrap();
        assert!(any.is_some());

        let steep = snapshot
            .lookup_fitting_dimension(FittingStandard::Sabs62, FittingType::Lateral, 100, Some("45-59"))
            .unwrap()
            .unwrap();
        assert_eq!(steep.angle_range.as_deref(), Some("45-59"));

        let none = snapshot
            .lookup_fitting_dimension(FittingStandard::Sabs62, FittingType::Lateral, 100, Some("10-20"))
            .unwrap();
        assert!(none.is_none());
    }

    #[test]
    fn test_duplicate_nb_rows_rejected() {
        let mut snapshot = builtin_snapshot();
        let dup = snapshot.nb_nps[0].clone();
        snapshot.nb_nps.push(dup);
        let err = snapshot.validate().unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }
}
