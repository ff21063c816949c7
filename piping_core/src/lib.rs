//! # piping_core - Steel Fitting Calculation Engine
//!
//! `piping_core` estimates the mass of steel pipe fittings for quoting: pipe,
//! cast body, gusset plates, flanges, bolts, nuts and weld metal, together
//! with the weld counts and lengths a fabricator prices labour from. Two
//! standards are covered: SABS62 (cast/forged fittings read from a table) and
//! SABS719 (fittings fabricated from cut pipe and gusset plates).
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions over a read-only reference data store
//! - **JSON-First**: Requests, results and errors implement Serialize/Deserialize
//! - **Rich Errors**: Caller mistakes and data gaps are distinct error variants
//! - **Graceful Degradation**: Missing optional data becomes a warning, not a failure
//!
//! ## Quick Start
//!
//! ```rust
//! use piping_core::fittings::{calculate_fitting, FittingRequest, FittingStandard, FittingType};
//! use piping_core::reference::builtin_snapshot;
//!
//! let store = builtin_snapshot();
//! let request = FittingRequest::new(FittingStandard::Sabs62, FittingType::EqualTee, 100);
//! let result = calculate_fitting(&store, &request).unwrap();
//!
//! // Serialize to JSON for transmission
//! let json = serde_json::to_string_pretty(&result).unwrap();
//! assert!(json.contains("total_mass_kg"));
//! ```
//!
//! ## Modules
//!
//! - [`fittings`] - Fitting calculations and catalogue queries
//! - [`reference`] - Reference data store trait, snapshot and built-in data
//! - [`settings`] - Empirical estimating constants
//! - [`units`] - Type-safe unit wrappers
//! - [`errors`] - Structured error types
//! - [`file_io`] - Snapshot files with atomic saves and locking

pub mod errors;
#[cfg(not(target_arch = "wasm32"))]
pub mod file_io;
pub mod fittings;
pub mod reference;
pub mod settings;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use errors::{CalcError, CalcResult};
#[cfg(not(target_arch = "wasm32"))]
pub use file_io::{load_snapshot, save_snapshot};
pub use fittings::{calculate_fitting, calculate_fitting_with, FittingRequest, FittingResult};
pub use reference::{ReferenceData, ReferenceSnapshot};
pub use settings::EstimatingSettings;
