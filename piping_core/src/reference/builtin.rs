//! Built-in reference data (for use without a database export)
//!
//! A representative subset of the quoting tables: NB↔OD for the common
//! bores, Sch40/Sch80 carbon steel pipe, a handful of SABS719 and SABS62
//! fittings and SABS 1123 flanges with their bolting. Used for demos and
//! tests; production quotes load an exported snapshot instead.
//!
//! Schedule designations are deliberately stored the way the source tables
//! have them ("Sch40", "Sch 40", "40", "STD"), since the schedule normalizer
//! has to cope with exactly that mix.

use once_cell::sync::Lazy;

use super::{
    BoltMassRecord, FittingDimensionRecord, FlangeDimensionRecord, NbNpsRecord, NutMassRecord,
    PipeDimensionRecord, ReferenceSnapshot, SteelSpecificationRecord,
};
use crate::fittings::{FittingStandard, FittingType};

/// Steel specification id for SABS 719 ERW pipe in the built-in data
pub const SPEC_SABS719_ERW: u32 = 1;
/// Steel specification id for SABS 62 ERW pipe in the built-in data
pub const SPEC_SABS62_ERW: u32 = 2;
/// Flange standard id for SABS 1123 in the built-in data
pub const FLANGE_SABS1123: u32 = 1;
/// Pressure class id for 1000/3
pub const CLASS_1000_3: u32 = 1;
/// Pressure class id for 1600/3
pub const CLASS_1600_3: u32 = 2;

static BUILTIN: Lazy<ReferenceSnapshot> = Lazy::new(build);

/// Get a copy of the built-in reference snapshot.
pub fn builtin_snapshot() -> ReferenceSnapshot {
    BUILTIN.clone()
}

/// Borrow the shared built-in reference snapshot.
pub fn builtin_snapshot_ref() -> &'static ReferenceSnapshot {
    &BUILTIN
}

fn build() -> ReferenceSnapshot {
    let mut snapshot = ReferenceSnapshot::new("builtin");

    // NB, NPS, OD (mm)
    let nb_nps = [
        (15, "1/2", 21.3),
        (20, "3/4", 26.9),
        (25, "1", 33.7),
        (32, "1 1/4", 42.4),
        (40, "1 1/2", 48.3),
        (50, "2", 60.3),
        (65, "2 1/2", 76.1),
        (80, "3", 88.9),
        (100, "4", 114.3),
        (125, "5", 139.7),
        (150, "6", 168.3),
        (200, "8", 219.1),
        (250, "10", 273.0),
        (300, "12", 323.9),
        (350, "14", 355.6),
        (400, "16", 406.4),
        (450, "18", 457.0),
        (500, "20", 508.0),
        (600, "24", 610.0),
    ];
    for (nb, nps, od) in nb_nps {
        snapshot.nb_nps.push(NbNpsRecord {
            nominal_diameter_mm: nb,
            nps: Some(nps.to_string()),
            outside_diameter_mm: od,
        });
    }

    snapshot.steel_specifications = vec![
        SteelSpecificationRecord { id: SPEC_SABS719_ERW, name: "SABS 719 ERW".to_string() },
        SteelSpecificationRecord { id: SPEC_SABS62_ERW, name: "SABS 62 ERW".to_string() },
        SteelSpecificationRecord { id: 3, name: "ASTM A106 Gr B".to_string() },
    ];

    // NB, schedule as entered, spec, wall (mm), tabulated kg/m
    let pipes: [(u32, &str, u32, f64, Option<f64>); 14] = [
        (50, "Sch40", SPEC_SABS719_ERW, 3.91, Some(5.44)),
        (80, "Sch 40", SPEC_SABS719_ERW, 5.49, Some(11.29)),
        (100, "40", SPEC_SABS719_ERW, 6.02, Some(16.07)),
        (150, "Sch40", SPEC_SABS719_ERW, 7.11, Some(28.26)),
        (150, "Sch 80", SPEC_SABS719_ERW, 10.97, Some(42.56)),
        // no tabulated mass: derived from wall thickness
        (200, "Sch40", SPEC_SABS719_ERW, 8.18, None),
        (200, "Sch80", SPEC_SABS719_ERW, 12.70, Some(64.64)),
        (250, "Sch40", SPEC_SABS719_ERW, 9.27, Some(60.29)),
        (300, "STD", SPEC_SABS719_ERW, 9.53, Some(73.88)),
        (300, "Sch40", SPEC_SABS719_ERW, 10.31, Some(79.73)),
        (400, "Sch 20", SPEC_SABS719_ERW, 7.92, Some(77.83)),
        (100, "Sch40", SPEC_SABS62_ERW, 6.02, Some(16.07)),
        (150, "Sch40", SPEC_SABS62_ERW, 7.11, Some(28.26)),
        (200, "WT8", SPEC_SABS62_ERW, 8.0, None),
    ];
    for (nb, schedule, spec, wall, mass) in pipes {
        snapshot.pipe_dimensions.push(PipeDimensionRecord {
            nominal_diameter_mm: nb,
            schedule_designation: schedule.to_string(),
            steel_specification_id: Some(spec),
            wall_thickness_mm: wall,
            mass_kg_per_m: mass,
        });
    }

    // SABS719: type, NB, A, B, C
    let sabs719 = [
        (FittingType::ShortTee, 100, Some(150.0), None, None),
        (FittingType::ShortTee, 150, Some(200.0), None, None),
        (FittingType::ShortTee, 200, Some(230.0), None, None),
        (FittingType::ShortTee, 250, Some(280.0), None, None),
        (FittingType::ShortTee, 300, Some(320.0), None, None),
        (FittingType::UnequalShortTee, 200, Some(230.0), None, None),
        (FittingType::ShortReducingTee, 200, Some(230.0), None, None),
        (FittingType::GussetTee, 100, Some(150.0), Some(250.0), Some(100.0)),
        (FittingType::GussetTee, 200, Some(230.0), Some(330.0), Some(100.0)),
        (FittingType::GussetTee, 300, Some(320.0), Some(470.0), Some(150.0)),
        (FittingType::UnequalGussetTee, 200, Some(230.0), Some(330.0), Some(0.0)),
        (FittingType::GussetReducingTee, 200, Some(230.0), Some(330.0), None),
        (FittingType::Lateral, 200, Some(480.0), Some(180.0), None),
        (FittingType::YPiece, 200, Some(400.0), None, None),
        (FittingType::DuckfootGussetted, 200, Some(305.0), Some(380.0), Some(75.0)),
        (FittingType::SweepElbow, 200, Some(305.0), None, None),
        (FittingType::ConReducer, 200, Some(200.0), None, None),
    ];
    for (fitting_type, nb, a, b, c) in sabs719 {
        snapshot.fitting_dimensions.push(FittingDimensionRecord {
            standard: FittingStandard::Sabs719,
            fitting_type,
            nominal_diameter_mm: nb,
            angle_range: None,
            dimension_a_mm: a,
            dimension_b_mm: b,
            dimension_c_mm: c,
            centre_to_face_mm: None,
        });
    }

    // SABS62: type, NB, angle range, centre-to-face
    let sabs62 = [
        (FittingType::EqualTee, 50, None, 165.0),
        (FittingType::EqualTee, 100, None, 178.0),
        (FittingType::EqualTee, 150, None, 229.0),
        (FittingType::EqualTee, 200, None, 279.0),
        (FittingType::EqualCross, 100, None, 178.0),
        (FittingType::Lateral, 100, Some("60-90"), 254.0),
        (FittingType::Lateral, 100, Some("45-59"), 305.0),
        (FittingType::Lateral, 150, Some("60-90"), 330.0),
        (FittingType::YPiece, 100, None, 203.0),
        (FittingType::GussettedTee, 200, None, 279.0),
        (FittingType::SweepTee, 150, None, 305.0),
        (FittingType::ConReducer, 150, None, 152.0),
    ];
    for (fitting_type, nb, angle, c2f) in sabs62 {
        snapshot.fitting_dimensions.push(FittingDimensionRecord {
            standard: FittingStandard::Sabs62,
            fitting_type,
            nominal_diameter_mm: nb,
            angle_range: angle.map(str::to_string),
            dimension_a_mm: None,
            dimension_b_mm: None,
            dimension_c_mm: None,
            centre_to_face_mm: Some(c2f),
        });
    }

    // NB, class, mass (kg), holes, thickness b (mm), PCD (mm), bolt
    let flanges = [
        (100, CLASS_1000_3, 5.0, 8, 18.0, 180.0, Some("M16")),
        (150, CLASS_1000_3, 7.3, 8, 20.0, 240.0, Some("M16")),
        (200, CLASS_1000_3, 9.4, 8, 20.0, 295.0, Some("M16")),
        (200, CLASS_1600_3, 14.8, 12, 26.0, 310.0, Some("M20")),
        (250, CLASS_1000_3, 12.1, 12, 22.0, 355.0, None),
        (300, CLASS_1000_3, 15.6, 12, 22.0, 410.0, Some("M20")),
        (400, CLASS_1000_3, 24.0, 16, 28.0, 525.0, Some("M24")),
    ];
    for (nb, class, mass, holes, b, pcd, bolt) in flanges {
        snapshot.flange_dimensions.push(FlangeDimensionRecord {
            nominal_diameter_mm: nb,
            standard_id: FLANGE_SABS1123,
            pressure_class_id: class,
            mass_kg: mass,
            num_holes: holes,
            flange_thickness_mm: b,
            pcd_mm: Some(pcd),
            bolt_ref: bolt.map(str::to_string),
        });
    }

    // bolt, length (mm), mass (kg)
    let bolts = [
        ("M16", 50.0, 0.115),
        ("M16", 65.0, 0.136),
        ("M16", 80.0, 0.161),
        ("M16", 100.0, 0.193),
        ("M20", 60.0, 0.201),
        ("M20", 70.0, 0.222),
        ("M20", 80.0, 0.243),
        ("M20", 100.0, 0.284),
        ("M20", 120.0, 0.325),
        ("M24", 90.0, 0.420),
        ("M24", 110.0, 0.488),
    ];
    for (bolt, length, mass) in bolts {
        snapshot.bolt_masses.push(BoltMassRecord {
            bolt_ref: bolt.to_string(),
            length_mm: length,
            mass_kg: mass,
        });
    }

    // M24 nuts are intentionally absent
    snapshot.nut_masses = vec![
        NutMassRecord { bolt_ref: "M16".to_string(), mass_kg: 0.033 },
        NutMassRecord { bolt_ref: "M20".to_string(), mass_kg: 0.063 },
    ];

    snapshot
}
