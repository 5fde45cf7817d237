//! Domain types, errors, and validation rules shared by the db and api crates.
//!
//! Everything here is pure: no I/O, no database access.

pub mod error;
pub mod field_errors;
pub mod form_template;
pub mod pdf_upload;
pub mod types;
