//! Pipe mass per metre.
//!
//! Tabulated masses are authoritative. Rows without one fall back to the
//! thin-wall annulus approximation
//!
//! ```text
//! m = π · t · (OD − t) · ρ / 1000      [kg/m, t and OD in mm, ρ in kg/dm³]
//! ```
//!
//! which ignores ovality and mill tolerance.

use std::f64::consts::PI;

use crate::errors::CalcResult;
use crate::reference::{PipeDimensionRecord, ReferenceData};
use crate::units::{KgPerDm3, KgPerMetre, Kilograms, Metres, Millimetres};

use super::schedule::schedule_candidates;

/// Mass per metre of a pipe row at the given outside diameter.
pub fn mass_per_metre(
    pipe: &PipeDimensionRecord,
    outside_diameter_mm: f64,
    density: KgPerDm3,
) -> KgPerMetre {
    match pipe.mass_kg_per_m {
        Some(mass) if mass > 0.0 => KgPerMetre(mass),
        _ => thin_wall_mass_per_metre(pipe.wall_thickness_mm, outside_diameter_mm, density),
    }
}

/// Thin-wall cylinder mass per metre.
pub fn thin_wall_mass_per_metre(
    wall_thickness_mm: f64,
    outside_diameter_mm: f64,
    density: KgPerDm3,
) -> KgPerMetre {
    KgPerMetre(PI * wall_thickness_mm * (outside_diameter_mm - wall_thickness_mm) * density.0 / 1000.0)
}

/// Mass of a straight length of pipe.
pub fn length_mass(per_metre: KgPerMetre, length_mm: f64) -> Kilograms {
    per_metre * Metres::from(Millimetres(length_mm))
}

/// Probe the pipe table with every candidate form of `schedule`.
pub fn find_pipe_dimension(
    store: &dyn ReferenceData,
    nominal_diameter_mm: u32,
    schedule: &str,
    steel_specification_id: Option<u32>,
) -> CalcResult<Option<PipeDimensionRecord>> {
    let candidates = schedule_candidates(schedule);
    store.lookup_pipe_dimension(nominal_diameter_mm, &candidates, steel_specification_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reference::builtin_snapshot_ref;

    const STEEL: KgPerDm3 = KgPerDm3(7.85);

    fn pipe(wall: f64, mass: Option<f64>) -> PipeDimensionRecord {
        PipeDimensionRecord {
            nominal_diameter_mm: 200,
            schedule_designation: "Sch40".to_string(),
            steel_specification_id: None,
            wall_thickness_mm: wall,
            mass_kg_per_m: mass,
        }
    }

    #[test]
    fn test_tabulated_mass_is_authoritative() {
        let m = mass_per_metre(&pipe(8.18, Some(42.55)), 219.1, STEEL);
        assert_eq!(m.0, 42.55);
    }

    #[test]
    fn test_thin_wall_fallback() {
        // π · 8.18 · 210.92 · 7.85 / 1000 = 42.549
        let m = mass_per_metre(&pipe(8.18, None), 219.1, STEEL);
        assert!((m.0 - 42.549).abs() < 0.01);
    }

    #[test]
    fn test_zero_tabulated_mass_falls_back() {
        let with_zero = mass_per_metre(&pipe(8.18, Some(0.0)), 219.1, STEEL);
        let without = mass_per_metre(&pipe(8.18, None), 219.1, STEEL);
        assert_eq!(with_zero, without);
    }

    #[test]
    fn test_length_mass() {
        let mass = length_mass(KgPerMetre(20.0), 750.0);
        assert!((mass.0 - 15.0).abs() < 1e-9);
    }

    #[test]
    fn test_schedule_forms_resolve_same_row() {
        let store = builtin_snapshot_ref();
        let rows: Vec<_> = ["Sch40", "Sch 40", "40", "sch40"]
            .iter()
            .map(|s| find_pipe_dimension(store, 200, s, None).unwrap().unwrap())
            .collect();
        for row in &rows {
            assert_eq!(row, &rows[0]);
        }

        // 100NB is stored as a bare "40"
        let bare = find_pipe_dimension(store, 100, "Sch 40", Some(1)).unwrap().unwrap();
        assert_eq!(bare.schedule_designation, "40");
    }

    #[test]
    fn test_unknown_schedule_misses() {
        let store = builtin_snapshot_ref();
        assert!(find_pipe_dimension(store, 200, "Sch160", None).unwrap().is_none());
        assert!(find_pipe_dimension(store, 200, "MEDIUM", None).unwrap().is_none());
    }
}
