//! # Fitting Calculations
//!
//! Mass and weld estimation for SABS62 (cast) and SABS719 (fabricated)
//! steel pipe fittings.
//!
//! - [`calculate`] - the entry point, dispatching on the standard
//! - [`schedule`] - free-form schedule strings to lookup candidates
//! - [`dimensions`] - fitting dimension resolution
//! - [`pipe_weight`] - pipe mass per metre
//! - [`gusset`] - gusset plate geometry
//! - [`welds`] - weld counts, lengths and mass
//! - [`flange_hardware`] - flange, bolt and nut masses
//! - [`catalogue`] - available types, sizes and angle ranges

pub mod calculate;
pub mod catalogue;
pub mod dimensions;
pub mod fitting_type;
pub mod flange_hardware;
pub mod gusset;
pub mod pipe_weight;
pub mod schedule;
pub mod welds;

pub use calculate::{calculate_fitting, calculate_fitting_with, FittingRequest, FittingResult};
pub use catalogue::{available_angle_ranges, available_fitting_types, available_sizes, fitting_dimensions};
pub use dimensions::resolve_fitting_dimensions;
pub use fitting_type::{FittingGeometry, FittingStandard, FittingType};
pub use flange_hardware::{FlangeHardware, HardwareLookup};
pub use gusset::GussetGeometry;
pub use schedule::schedule_candidates;
pub use welds::WeldSummary;
