//! # Unit Types
//!
//! Type-safe wrappers for the metric units used by piping estimators. These
//! keep millimetre table dimensions from being mixed up with metre run
//! lengths while remaining lightweight (just f64 wrappers).
//!
//! ## Metric Units
//!
//! Reference tables store dimensions in millimetres; masses are quoted in
//! kilograms and weld lengths in metres:
//! - Length: millimetres (mm), metres (m)
//! - Volume: cubic millimetres (mm³), cubic decimetres (dm³)
//! - Mass: kilograms (kg)
//! - Linear mass: kilograms per metre (kg/m)
//! - Density: kilograms per cubic decimetre (kg/dm³)
//!
//! ## Example
//!
//! ```rust
//! use piping_core::units::{KgPerMetre, Metres, Millimetres};
//!
//! let run: Metres = Millimetres(500.0).into();
//! assert_eq!(run.0, 0.5);
//!
//! let mass = KgPerMetre(42.5) * run;
//! assert_eq!(mass.0, 21.25);
//! ```

use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Mul, Sub};

// ============================================================================
// Length Units
// ============================================================================

/// Length in millimetres
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Millimetres(pub f64);

/// Length in metres
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Metres(pub f64);

impl From<Millimetres> for Metres {
    fn from(mm: Millimetres) -> Self {
        Metres(mm.0 / 1000.0)
    }
}

impl From<Metres> for Millimetres {
    fn from(m: Metres) -> Self {
        Millimetres(m.0 * 1000.0)
    }
}

// ============================================================================
// Volume Units
// ============================================================================

/// Volume in cubic millimetres
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CuMm(pub f64);

/// Volume in cubic decimetres (litres)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CuDm(pub f64);

impl From<CuMm> for CuDm {
    fn from(mm3: CuMm) -> Self {
        CuDm(mm3.0 / 1e6)
    }
}

// ============================================================================
// Mass Units
// ============================================================================

/// Mass in kilograms
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Kilograms(pub f64);

/// Linear mass in kilograms per metre
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KgPerMetre(pub f64);

/// Density in kilograms per cubic decimetre (7.85 for carbon steel)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KgPerDm3(pub f64);

impl Mul<Metres> for KgPerMetre {
    type Output = Kilograms;
    fn mul(self, rhs: Metres) -> Kilograms {
        Kilograms(self.0 * rhs.0)
    }
}

impl Mul<KgPerDm3> for CuDm {
    type Output = Kilograms;
    fn mul(self, rhs: KgPerDm3) -> Kilograms {
        Kilograms(self.0 * rhs.0)
    }
}

// ============================================================================
// Arithmetic Implementations (macro to reduce boilerplate)
// ============================================================================

macro_rules! impl_arithmetic {
    ($type:ty) => {
        impl Add for $type {
            type Output = Self;
            fn add(self, rhs: Self) -> Self::Output {
                Self(self.0 + rhs.0)
            }
        }

        impl Sub for $type {
            type Output = Self;
            fn sub(self, rhs: Self) -> Self::Output {
                Self(self.0 - rhs.0)
            }
        }

        impl Mul<f64> for $type {
            type Output = Self;
            fn mul(self, rhs: f64) -> Self::Output {
                Self(self.0 * rhs)
            }
        }

        impl Div<f64> for $type {
            type Output = Self;
            fn div(self, rhs: f64) -> Self::Output {
                Self(self.0 / rhs)
            }
        }

        impl $type {
            /// Get the raw f64 value
            pub fn value(self) -> f64 {
                self.0
            }

            /// Create from raw f64 value
            pub fn new(value: f64) -> Self {
                Self(value)
            }
        }
    };
}

impl_arithmetic!(Millimetres);
impl_arithmetic!(Metres);
impl_arithmetic!(CuMm);
impl_arithmetic!(CuDm);
impl_arithmetic!(Kilograms);
impl_arithmetic!(KgPerMetre);
impl_arithmetic!(KgPerDm3);

/// Round to two decimal places, the precision every quoted figure uses.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mm_to_metres() {
        let mm = Millimetres(1250.0);
        let m: Metres = mm.into();
        assert_eq!(m.0, 1.25);
    }

    #[test]
    fn test_volume_conversion() {
        let v: CuDm = CuMm(12_500.0).into();
        assert!((v.0 - 0.0125).abs() < 1e-12);
        let mass = v * KgPerDm3(7.85);
        assert!((mass.0 - 0.098125).abs() < 1e-12);
    }

    #[test]
    fn test_arithmetic() {
        let a = Kilograms(10.0);
        let b = Kilograms(5.0);
        assert_eq!((a + b).0, 15.0);
        assert_eq!((a - b).0, 5.0);
        assert_eq!((a * 2.0).0, 20.0);
        assert_eq!((a / 2.0).0, 5.0);
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(0.19625), 0.2);
        assert_eq!(round2(0.341421), 0.34);
        assert_eq!(round2(12.346), 12.35);
        assert_eq!(round2(0.0), 0.0);
    }

    #[test]
    fn test_serialization() {
        let mm = Millimetres(219.1);
        let json = serde_json::to_string(&mm).unwrap();
        assert_eq!(json, "219.1");

        let roundtrip: Millimetres = serde_json::from_str(&json).unwrap();
        assert_eq!(mm, roundtrip);
    }
}
