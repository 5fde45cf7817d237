//! Form template constraints and input checks.
//!
//! A template is the set of positioned fields a client lays over the pages
//! of an uploaded PDF. Geometry and `type` are free-form; only presence,
//! length and the 1-based page number are enforced.

use crate::field_errors::{FieldErrors, MSG_BLANK, MSG_REQUIRED};

// ---------------------------------------------------------------------------
// Column limits
// ---------------------------------------------------------------------------

pub const UPLOAD_ID_MAX_LEN: usize = 64;
pub const FIELD_ID_MAX_LEN: usize = 32;
pub const FIELD_TYPE_MAX_LEN: usize = 32;
pub const LABEL_MAX_LEN: usize = 128;
pub const PLACEHOLDER_MAX_LEN: usize = 256;

/// Pages are numbered from 1.
pub const MIN_PAGE_NUMBER: i32 = 1;

/// Unique constraint on `templates.upload_id`.
pub const UPLOAD_ID_CONSTRAINT: &str = "uq_templates_upload_id";

pub const MSG_UPLOAD_ID_TAKEN: &str = "template with this upload id already exists.";

// ---------------------------------------------------------------------------
// Keys
// ---------------------------------------------------------------------------

/// Error key for attribute `name` of the field at `index` in the `fields` list.
pub fn field_key(index: usize, name: &str) -> String {
    format!("fields[{index}].{name}")
}

// ---------------------------------------------------------------------------
// Checks
// ---------------------------------------------------------------------------

/// Whether a string may be empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Blank {
    Allowed,
    Rejected,
}

/// Check a string input, recording problems under `key`.
///
/// Returns the value when it passes so callers can build typed rows
/// without a second pass.
pub fn check_text(
    errors: &mut FieldErrors,
    key: &str,
    value: Option<&str>,
    max_len: usize,
    blank: Blank,
) -> Option<String> {
    let Some(value) = value else {
        if blank == Blank::Allowed {
            return Some(String::new());
        }
        errors.add(key, MSG_REQUIRED);
        return None;
    };

    if blank == Blank::Rejected && value.trim().is_empty() {
        errors.add(key, MSG_BLANK);
        return None;
    }

    if value.chars().count() > max_len {
        errors.add(
            key,
            format!("Ensure this field has no more than {max_len} characters."),
        );
        return None;
    }

    Some(value.to_string())
}

/// Check that a required scalar is present.
pub fn check_present<T: Copy>(errors: &mut FieldErrors, key: &str, value: Option<T>) -> Option<T> {
    if value.is_none() {
        errors.add(key, MSG_REQUIRED);
    }
    value
}

/// Check a required page number (1-based, no upper bound).
pub fn check_page_number(errors: &mut FieldErrors, key: &str, value: Option<i32>) -> Option<i32> {
    let page = check_present(errors, key, value)?;
    if page < MIN_PAGE_NUMBER {
        errors.add(
            key,
            format!("Ensure this value is greater than or equal to {MIN_PAGE_NUMBER}."),
        );
        return None;
    }
    Some(page)
}
