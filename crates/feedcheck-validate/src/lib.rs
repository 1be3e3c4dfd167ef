//! Validation of commissions feed files.
//!
//! Each data file is checked against its template's rules (see
//! [`Validator`]); template pairs are then cross-checked by
//! [`cross_template`]. [`run_suite`] does both for a whole source
//! directory.

pub mod checks;
pub mod cross_template;
pub mod engine;
pub mod patterns;
pub mod strategy;
pub mod suite;

pub use cross_template::{FilePair, LEADING_KEY_WIDTH, validate_pair};
pub use engine::Validator;
pub use patterns::{is_boolean, is_date, is_number, is_valid_filename};
pub use strategy::{AlternativeRequiredStrategy, GenericStrategy, RuleStrategy, strategy_for};
pub use suite::{run_suite, run_suite_with};
