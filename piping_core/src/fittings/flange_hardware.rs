//! # Flange Hardware
//!
//! Flange, bolt and nut masses for the flanged outlets of a fitting.
//!
//! Flange data is optional for a quote: a missing flange row, a flange with
//! no bolt designation, a bolt table without a long enough bolt or a store
//! error all degrade to a zero contribution with a warning. None of them
//! abort the calculation. The outcome is a [`HardwareLookup`], so callers see
//! the difference between "not asked for", "resolved" and "unavailable"
//! without inspecting error types.
//!
//! Bolt sizing: bolts are taken as `max(50mm, 3 · flange thickness)` long and
//! the shortest tabulated bolt at or above that length is used. Every hole on
//! every flange gets one bolt and one nut.

use serde::{Deserialize, Serialize};

use crate::errors::CalcResult;
use crate::reference::{FlangeDimensionRecord, ReferenceData};
use crate::settings::EstimatingSettings;

/// Flange standard and pressure class ids chosen for a fitting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlangeSpec {
    pub standard_id: u32,
    pub pressure_class_id: u32,
}

/// Resolved flange hardware for a batch of fittings.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FlangeHardware {
    pub flange_count: u32,
    pub flange_mass_kg: f64,
    pub bolt_ref: Option<String>,
    /// Tabulated length of the bolt chosen (mm)
    pub bolt_length_mm: Option<f64>,
    pub bolt_count: u32,
    pub bolt_mass_kg: f64,
    pub nut_mass_kg: f64,
    /// Bolt/nut data that could not be resolved
    pub warnings: Vec<String>,
}

/// Outcome of the flange hardware step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status")]
pub enum HardwareLookup {
    /// No flange spec on the request
    NotRequested,
    /// Flange row found; bolts and nuts may still be partially missing
    Resolved(FlangeHardware),
    /// Flange data could not be used; every hardware mass is zero
    Unavailable { reason: String },
}

impl HardwareLookup {
    pub fn flange_mass_kg(&self) -> f64 {
        match self {
            HardwareLookup::Resolved(h) => h.flange_mass_kg,
            _ => 0.0,
        }
    }

    pub fn bolt_mass_kg(&self) -> f64 {
        match self {
            HardwareLookup::Resolved(h) => h.bolt_mass_kg,
            _ => 0.0,
        }
    }

    pub fn nut_mass_kg(&self) -> f64 {
        match self {
            HardwareLookup::Resolved(h) => h.nut_mass_kg,
            _ => 0.0,
        }
    }

    /// Caller-facing warnings describing degraded data
    pub fn warnings(&self) -> Vec<String> {
        match self {
            HardwareLookup::NotRequested => Vec::new(),
            HardwareLookup::Resolved(h) => h.warnings.clone(),
            HardwareLookup::Unavailable { reason } => {
                vec![format!("Flange hardware unavailable: {}", reason)]
            }
        }
    }
}

/// Resolve flange, bolt and nut masses for `quantity` fittings.
///
/// `flange_standard_id` and `pressure_class_id` must both be given for any
/// hardware to be resolved.
pub fn flange_hardware(
    store: &dyn ReferenceData,
    nominal_diameter_mm: u32,
    flange_standard_id: Option<u32>,
    pressure_class_id: Option<u32>,
    quantity: u32,
    settings: &EstimatingSettings,
) -> HardwareLookup {
    let spec = match (flange_standard_id, pressure_class_id) {
        (None, None) => return HardwareLookup::NotRequested,
        (Some(standard_id), Some(pressure_class_id)) => FlangeSpec {
            standard_id,
            pressure_class_id,
        },
        (Some(_), None) => {
            return unavailable(nominal_diameter_mm, "flange standard given without a pressure class")
        }
        (None, Some(_)) => {
            return unavailable(nominal_diameter_mm, "pressure class given without a flange standard")
        }
    };

    let flange = match store.lookup_flange_dimension(
        nominal_diameter_mm,
        spec.standard_id,
        spec.pressure_class_id,
    ) {
        Ok(Some(flange)) => flange,
        Ok(None) => {
            return unavailable(
                nominal_diameter_mm,
                &format!(
                    "no flange for {}NB, standard {}, pressure class {}",
                    nominal_diameter_mm, spec.standard_id, spec.pressure_class_id
                ),
            )
        }
        Err(e) => return unavailable(nominal_diameter_mm, &e.to_string()),
    };

    HardwareLookup::Resolved(hardware_for(store, &flange, quantity, settings))
}

fn unavailable(nominal_diameter_mm: u32, reason: &str) -> HardwareLookup {
    log::warn!("flange hardware for {}NB zeroed: {}", nominal_diameter_mm, reason);
    HardwareLookup::Unavailable {
        reason: reason.to_string(),
    }
}

fn hardware_for(
    store: &dyn ReferenceData,
    flange: &FlangeDimensionRecord,
    quantity: u32,
    settings: &EstimatingSettings,
) -> FlangeHardware {
    let flange_count = settings.flanges_per_fitting.saturating_mul(quantity);
    let mut hardware = FlangeHardware {
        flange_count,
        flange_mass_kg: f64::from(flange_count) * flange.mass_kg,
        ..FlangeHardware::default()
    };

    let Some(bolt_ref) = flange.bolt_ref.clone() else {
        return hardware;
    };

    let Some(fastener_count) = flange_count.checked_mul(flange.num_holes) else {
        warn_into(
            &mut hardware,
            format!("{} flanges x {} holes exceeds the bolt count range", flange_count, flange.num_holes),
        );
        return hardware;
    };
    let min_length_mm =
        settings.min_bolt_length_mm.max(flange.flange_thickness_mm * settings.bolt_length_factor);

    match store.lookup_bolt_mass_at_least(&bolt_ref, min_length_mm) {
        Ok(Some(bolt)) => {
            hardware.bolt_count = fastener_count;
            hardware.bolt_length_mm = Some(bolt.length_mm);
            hardware.bolt_mass_kg = f64::from(fastener_count) * bolt.mass_kg;
        }
        Ok(None) => warn_into(
            &mut hardware,
            format!("no {} bolt of at least {:.0}mm", bolt_ref, min_length_mm),
        ),
        Err(e) => warn_into(&mut hardware, format!("{} bolt lookup failed: {}", bolt_ref, e)),
    }

    match lookup_nut(store, &bolt_ref) {
        Ok(Some(nut_mass)) => hardware.nut_mass_kg = f64::from(fastener_count) * nut_mass,
        Ok(None) => warn_into(&mut hardware, format!("no nut mass for {}", bolt_ref)),
        Err(e) => warn_into(&mut hardware, format!("{} nut lookup failed: {}", bolt_ref, e)),
    }

    hardware.bolt_ref = Some(bolt_ref);
    hardware
}

fn lookup_nut(store: &dyn ReferenceData, bolt_ref: &str) -> CalcResult<Option<f64>> {
    Ok(store.lookup_nut_mass(bolt_ref)?.map(|n| n.mass_kg))
}

fn warn_into(hardware: &mut FlangeHardware, message: String) {
    log::warn!("{}", message);
    hardware.warnings.push(message);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::{CalcError, CalcResult};
    use crate::fittings::{FittingStandard, FittingType};
    use crate::reference::builtin::{CLASS_1000_3, CLASS_1600_3, FLANGE_SABS1123};
    use crate::reference::{
        builtin_snapshot_ref, BoltMassRecord, FittingDimensionRecord, NbNpsRecord, NutMassRecord,
        PipeDimensionRecord, SteelSpecificationRecord,
    };

    fn hardware(nb: u32, class: u32, quantity: u32) -> HardwareLookup {
        flange_hardware(
            builtin_snapshot_ref(),
            nb,
            Some(FLANGE_SABS1123),
            Some(class),
            quantity,
            &EstimatingSettings::default(),
        )
    }

    #[test]
    fn test_not_requested() {
        let h = flange_hardware(
            builtin_snapshot_ref(),
            200,
            None,
            None,
            1,
            &EstimatingSettings::default(),
        );
        assert_eq!(h, HardwareLookup::NotRequested);
        assert!(h.warnings().is_empty());
    }

    #[test]
    fn test_full_hardware_200nb() {
        let HardwareLookup::Resolved(h) = hardware(200, CLASS_1000_3, 1) else {
            panic!("expected resolved hardware");
        };
        assert_eq!(h.flange_count, 3);
        assert!((h.flange_mass_kg - 3.0 * 9.4).abs() < 1e-9);
        // b = 20mm -> 60mm minimum -> 65mm M16
        assert_eq!(h.bolt_length_mm, Some(65.0));
        assert_eq!(h.bolt_count, 24);
        assert!((h.bolt_mass_kg - 24.0 * 0.136).abs() < 1e-9);
        assert!((h.nut_mass_kg - 24.0 * 0.033).abs() < 1e-9);
        assert!(h.warnings.is_empty());
    }

    #[test]
    fn test_minimum_bolt_length_applies() {
        let settings = EstimatingSettings {
            bolt_length_factor: 1.0,
            ..EstimatingSettings::default()
        };
        let h = flange_hardware(
            builtin_snapshot_ref(),
            200,
            Some(FLANGE_SABS1123),
            Some(CLASS_1000_3),
            1,
            &settings,
        );
        let HardwareLookup::Resolved(h) = h else {
            panic!("expected resolved hardware");
        };
        // 20mm flange -> 50mm floor -> exact 50mm bolt
        assert_eq!(h.bolt_length_mm, Some(50.0));
    }

    #[test]
    fn test_heavier_class_uses_longer_bolts() {
        let HardwareLookup::Resolved(h) = hardware(200, CLASS_1600_3, 2) else {
            panic!("expected resolved hardware");
        };
        // b = 26mm -> 78mm -> 80mm M20, 6 flanges x 12 holes
        assert_eq!(h.bolt_ref.as_deref(), Some("M20"));
        assert_eq!(h.bolt_length_mm, Some(80.0));
        assert_eq!(h.bolt_count, 72);
    }

    #[test]
    fn test_unknown_flange_degrades() {
        let h = hardware(200, 99, 1);
        assert!(matches!(h, HardwareLookup::Unavailable { .. }));
        assert_eq!(h.flange_mass_kg(), 0.0);
        assert_eq!(h.bolt_mass_kg(), 0.0);
        assert_eq!(h.nut_mass_kg(), 0.0);
        assert_eq!(h.warnings().len(), 1);
    }

    #[test]
    fn test_half_a_flange_spec_degrades() {
        let h = flange_hardware(
            builtin_snapshot_ref(),
            200,
            Some(FLANGE_SABS1123),
            None,
            1,
            &EstimatingSettings::default(),
        );
        assert!(matches!(h, HardwareLookup::Unavailable { .. }));
    }

    #[test]
    fn test_flange_without_bolt_ref_has_flange_mass_only() {
        let HardwareLookup::Resolved(h) = hardware(250, CLASS_1000_3, 1) else {
            panic!("expected resolved hardware");
        };
        assert!((h.flange_mass_kg - 36.3).abs() < 1e-9);
        assert_eq!(h.bolt_mass_kg, 0.0);
        assert_eq!(h.nut_mass_kg, 0.0);
        assert!(h.bolt_ref.is_none());
    }

    #[test]
    fn test_missing_nut_keeps_bolts() {
        let h = hardware(400, CLASS_1000_3, 1);
        let HardwareLookup::Resolved(ref inner) = h else {
            panic!("expected resolved hardware");
        };
        // b = 28mm -> 84mm -> 90mm M24
        assert_eq!(inner.bolt_length_mm, Some(90.0));
        assert!(inner.bolt_mass_kg > 0.0);
        assert_eq!(inner.nut_mass_kg, 0.0);
        assert_eq!(h.warnings(), vec!["no nut mass for M24".to_string()]);
    }

    /// Store whose flange-side queries fail outright.
    struct FailingFlangeStore;

    impl ReferenceData for FailingFlangeStore {
        fn lookup_nb_nps(&self, _: u32) -> CalcResult<Option<NbNpsRecord>> {
            Ok(None)
        }
        fn lookup_steel_specification(&self, _: u32) -> CalcResult<Option<SteelSpecificationRecord>> {
            Ok(None)
        }
        fn lookup_pipe_dimension(
            &self,
            _: u32,
            _: &[String],
            _: Option<u32>,
        ) -> CalcResult<Option<PipeDimensionRecord>> {
            Ok(None)
        }
        fn lookup_fitting_dimension(
            &self,
            _: FittingStandard,
            _: FittingType,
            _: u32,
            _: Option<&str>,
        ) -> CalcResult<Option<FittingDimensionRecord>> {
            Ok(None)
        }
        fn lookup_flange_dimension(&self, _: u32, _: u32, _: u32) -> CalcResult<Option<FlangeDimensionRecord>> {
            Err(CalcError::store_unavailable("flange table offline"))
        }
        fn lookup_bolt_mass_at_least(&self, _: &str, _: f64) -> CalcResult<Option<BoltMassRecord>> {
            Err(CalcError::store_unavailable("bolt table offline"))
        }
        fn lookup_nut_mass(&self, _: &str) -> CalcResult<Option<NutMassRecord>> {
            Err(CalcError::store_unavailable("nut table offline"))
        }
        fn fitting_dimensions(&self, _: FittingStandard) -> CalcResult<Vec<FittingDimensionRecord>> {
            Ok(Vec::new())
        }
    }

    #[test]
    fn test_store_failure_degrades() {
        let h = flange_hardware(
            &FailingFlangeStore,
            200,
            Some(1),
            Some(1),
            1,
            &EstimatingSettings::default(),
        );
        let HardwareLookup::Unavailable { reason } = h else {
            panic!("expected unavailable hardware");
        };
        assert!(reason.contains("flange table offline"));
    }

    #[test]
    fn test_fastener_count_overflow_degrades() {
        let flange = FlangeDimensionRecord {
            nominal_diameter_mm: 200,
            standard_id: 1,
            pressure_class_id: 1,
            mass_kg: 9.4,
            num_holes: 8,
            flange_thickness_mm: 20.0,
            pcd_mm: None,
            bolt_ref: Some("M16".to_string()),
        };
        let h = hardware_for(builtin_snapshot_ref(), &flange, 1_000_000_000, &EstimatingSettings::default());
        assert_eq!(h.bolt_count, 0);
        assert_eq!(h.bolt_mass_kg, 0.0);
        assert_eq!(h.nut_mass_kg, 0.0);
        assert_eq!(h.warnings.len(), 1);
    }

    #[test]
    fn test_bolt_store_failure_keeps_flange_mass() {
        let flange = FlangeDimensionRecord {
            nominal_diameter_mm: 200,
            standard_id: 1,
            pressure_class_id: 1,
            mass_kg: 9.4,
            num_holes: 8,
            flange_thickness_mm: 20.0,
            pcd_mm: None,
            bolt_ref: Some("M16".to_string()),
        };
        let h = hardware_for(&FailingFlangeStore, &flange, 1, &EstimatingSettings::default());
        assert!((h.flange_mass_kg - 28.2).abs() < 1e-9);
        assert_eq!(h.bolt_mass_kg, 0.0);
        assert_eq!(h.nut_mass_kg, 0.0);
        assert_eq!(h.warnings.len(), 2);
    }
}
