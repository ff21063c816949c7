//! Fitting standards and fitting types.
//!
//! Every fitting type maps to exactly one [`FittingGeometry`], which decides
//! how the branch stub is sized and whether gusset plates are added. The
//! mapping is an exhaustive match, so adding a fitting type forces a
//! decision about its geometry.

use serde::{Deserialize, Serialize};

/// Manufacturing standard a fitting is quoted against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FittingStandard {
    /// SABS 62: standard cast/forged fittings, body dimensions from table
    #[serde(rename = "SABS62")]
    Sabs62,
    /// SABS 719: fabricated fittings welded from cut pipe and gusset plates
    #[serde(rename = "SABS719")]
    Sabs719,
}

impl FittingStandard {
    /// Both standards, for iteration
    pub const ALL: [FittingStandard; 2] = [FittingStandard::Sabs62, FittingStandard::Sabs719];

    /// Canonical code as used in reference tables ("SABS62", "SABS719")
    pub fn code(&self) -> &'static str {
        match self {
            FittingStandard::Sabs62 => "SABS62",
            FittingStandard::Sabs719 => "SABS719",
        }
    }

    /// True for fabricated (welded) fittings
    pub fn is_fabricated(&self) -> bool {
        matches!(self, FittingStandard::Sabs719)
    }

    /// Parse a standard code, ignoring case, spaces and dashes ("sabs 719")
    pub fn from_code(s: &str) -> Option<Self> {
        let compact: String = s
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '-' && *c != '_')
            .collect::<String>()
            .to_uppercase();
        match compact.as_str() {
            "SABS62" => Some(FittingStandard::Sabs62),
            "SABS719" => Some(FittingStandard::Sabs719),
            _ => None,
        }
    }
}

impl std::fmt::Display for FittingStandard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Fitting type designation as stored in the fitting dimension tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FittingType {
    ShortTee,
    GussetTee,
    EqualTee,
    UnequalTee,
    UnequalShortTee,
    UnequalGussetTee,
    ShortReducingTee,
    GussetReducingTee,
    GussettedTee,
    SweepTee,
    Lateral,
    YPiece,
    EqualCross,
    UnequalCross,
    DuckfootShort,
    DuckfootGussetted,
    SweepLongRadius,
    SweepMediumRadius,
    SweepElbow,
    ConReducer,
    EccentricReducer,
}

impl FittingType {
    /// All fitting types for iteration
    pub const ALL: [FittingType; 21] = [
        FittingType::ShortTee,
        FittingType::GussetTee,
        FittingType::EqualTee,
        FittingType::UnequalTee,
        FittingType::UnequalShortTee,
        FittingType::UnequalGussetTee,
        FittingType::ShortReducingTee,
        FittingType::GussetReducingTee,
        FittingType::GussettedTee,
        FittingType::SweepTee,
        FittingType::Lateral,
        FittingType::YPiece,
        FittingType::EqualCross,
        FittingType::UnequalCross,
        FittingType::DuckfootShort,
        FittingType::DuckfootGussetted,
        FittingType::SweepLongRadius,
        FittingType::SweepMediumRadius,
        FittingType::SweepElbow,
        FittingType::ConReducer,
        FittingType::EccentricReducer,
    ];

    /// Table code (e.g. "SHORT_TEE")
    pub fn code(&self) -> &'static str {
        match self {
            FittingType::ShortTee => "SHORT_TEE",
            FittingType::GussetTee => "GUSSET_TEE",
            FittingType::EqualTee => "EQUAL_TEE",
            FittingType::UnequalTee => "UNEQUAL_TEE",
            FittingType::UnequalShortTee => "UNEQUAL_SHORT_TEE",
            FittingType::UnequalGussetTee => "UNEQUAL_GUSSET_TEE",
            FittingType::ShortReducingTee => "SHORT_REDUCING_TEE",
            FittingType::GussetReducingTee => "GUSSET_REDUCING_TEE",
            FittingType::GussettedTee => "GUSSETTED_TEE",
            FittingType::SweepTee => "SWEEP_TEE",
            FittingType::Lateral => "LATERAL",
            FittingType::YPiece => "Y_PIECE",
            FittingType::EqualCross => "EQUAL_CROSS",
            FittingType::UnequalCross => "UNEQUAL_CROSS",
            FittingType::DuckfootShort => "DUCKFOOT_SHORT",
            FittingType::DuckfootGussetted => "DUCKFOOT_GUSSETTED",
            FittingType::SweepLongRadius => "SWEEP_LONG_RADIUS",
            FittingType::SweepMediumRadius => "SWEEP_MEDIUM_RADIUS",
            FittingType::SweepElbow => "SWEEP_ELBOW",
            FittingType::ConReducer => "CON_REDUCER",
            FittingType::EccentricReducer => "ECCENTRIC_REDUCER",
        }
    }

    /// Parse from a table code, case-insensitive
    pub fn from_code(s: &str) -> Option<Self> {
        let upper = s.trim().to_uppercase();
        FittingType::ALL.iter().copied().find(|t| t.code() == upper)
    }

    /// Geometry class that drives branch sizing and gusset plates
    pub fn geometry(&self) -> FittingGeometry {
        match self {
            FittingType::ShortTee
            | FittingType::EqualTee
            | FittingType::UnequalShortTee
            | FittingType::ShortReducingTee => FittingGeometry::Tee,
            FittingType::GussetTee
            | FittingType::UnequalGussetTee
            | FittingType::GussetReducingTee => FittingGeometry::GussetTee,
            FittingType::Lateral | FittingType::YPiece => FittingGeometry::Lateral,
            FittingType::GussettedTee | FittingType::DuckfootGussetted => {
                FittingGeometry::GussetedBody
            }
            FittingType::UnequalTee
            | FittingType::SweepTee
            | FittingType::EqualCross
            | FittingType::UnequalCross
            | FittingType::DuckfootShort
            | FittingType::SweepLongRadius
            | FittingType::SweepMediumRadius
            | FittingType::SweepElbow
            | FittingType::ConReducer
            | FittingType::EccentricReducer => FittingGeometry::Plain,
        }
    }
}

impl std::fmt::Display for FittingType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// How a fitting is built up for estimating purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FittingGeometry {
    /// Short tee; branch stub height is dimension A
    Tee,
    /// Gusseted tee; branch stub height is dimension B (falling back to A),
    /// reinforced by triangular gusset plates
    GussetTee,
    /// Lateral or Y-piece; branch stub height is dimension A
    Lateral,
    /// Gusseted body with no separately cut branch stub
    GussetedBody,
    /// Bends, reducers, crosses and duckfoots; no branch stub
    Plain,
}

impl FittingGeometry {
    /// Whether a branch stub is cut for this geometry
    pub fn has_branch(&self) -> bool {
        matches!(
            self,
            FittingGeometry::Tee | FittingGeometry::GussetTee | FittingGeometry::Lateral
        )
    }

    /// Whether gusset plates are welded on
    pub fn is_gusseted(&self) -> bool {
        matches!(self, FittingGeometry::GussetTee | FittingGeometry::GussetedBody)
    }
}
