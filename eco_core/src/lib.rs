//! # eco_core - Renewable Energy & Site Engineering Calculators
//!
//! `eco_core` is the calculation engine behind the eco-tools utility
//! calculators: unit conversion, wind and solar resource estimates, soil
//! bearing capacity, mixing-water compliance, and volume from weight. All
//! inputs and outputs are JSON-serializable.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions that take input and return results
//! - **Incomplete is not an error**: blank required fields give
//!   [`Outcome::Incomplete`] and the caller keeps its previous result
//! - **JSON-First**: All types implement Serialize/Deserialize
//! - **Rich Errors**: Structured error types for the strict edges
//!
//! ## Quick Start
//!
//! ```rust
//! use eco_core::calculations::solar::{calculate, SolarInput};
//!
//! let result = calculate(&SolarInput::new(1000.0, 10.0)).into_option().unwrap();
//! assert_eq!(result.power_display(), "2000.00");
//! assert_eq!(result.daily_energy_display(), "10.00");
//! ```
//!
//! ## Modules
//!
//! - [`calculations`] - All calculators and the shared `Outcome`/`ResultSlot` types
//! - [`equations`] - Closed-form formulas used by the calculators
//! - [`units`] - Unit catalog for the converter
//! - [`settings`] - User-adjustable defaults
//! - [`report`] - Plain-text water quality report
//! - [`pdf`] - PDF water quality report (Typst)
//! - [`errors`] - Structured error types

pub mod calculations;
pub mod equations;
pub mod errors;
pub mod pdf;
pub mod report;
pub mod settings;
pub mod units;

pub use calculations::{CalculationItem, CalculationOutput, Outcome, ResultSlot};
pub use errors::{CalcError, CalcResult};
pub use settings::Settings;
pub use units::{Unit, UnitCategory};
