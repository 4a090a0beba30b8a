//! uigrade core library.
//!
//! This crate grades UI component source text (React/TSX) against a fixed,
//! weighted rule catalogue and produces a 0..=100 score with a letter grade.
//! Grading is a pure function of the input text: no parsing beyond regular
//! expressions, no I/O, no state between calls.
//!
//! High-level modules:
//! - `rules`: The ordered rule registry with lookup, search and markdown docs.
//! - `grade`: The grading pass plus parallel batch helpers.
//! - `checks`: Detector toolkit shared by the rules (tags, calls, casing).
//! - `models`: Rule schema and grading output structs.
//! - `output`: Human/JSON/markdown printers for grades and rule listings.
//! - `config`: Discovery and effective configuration resolution.
//! - `cli`: CLI argument parsing (binary uses this).
//! - `error`: Boundary errors for file, stdin and config handling.
//! - `utils`: Supporting helpers.
pub mod checks;
pub mod cli;
pub mod config;
pub mod error;
pub mod grade;
pub mod models;
pub mod output;
pub mod rules;
pub mod utils;

pub use error::Error;
pub use grade::grade;
pub use models::rule::{Category, Rule, Severity};
pub use models::{FileGrade, Grade, GradeResult, Violation};
