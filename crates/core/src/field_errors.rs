//! Keyed validation error collection.
//!
//! Validators push every problem they find instead of stopping at the first
//! one, so a client gets the full list of offending inputs in one response.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::error::CoreError;

/// Key used for problems that concern the request body as a whole.
pub const NON_FIELD_ERRORS: &str = "non_field_errors";

/// Message for a required input that is absent or `null`.
pub const MSG_REQUIRED: &str = "This field is required.";

/// Message for a required string that is empty or whitespace only.
pub const MSG_BLANK: &str = "This field may not be blank.";

/// Validation messages grouped by input key.
///
/// Keys are ordered so that serialized error bodies are deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a collection holding a single message.
    pub fn single(key: impl Into<String>, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.add(key, message);
        errors
    }

    pub fn add(&mut self, key: impl Into<String>, message: impl Into<String>) {
        self.0.entry(key.into()).or_default().push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Messages recorded for `key`, if any.
    pub fn get(&self, key: &str) -> Option<&[String]> {
        self.0.get(key).map(Vec::as_slice)
    }

    /// `Ok(())` when nothing was recorded, otherwise [`CoreError::InvalidFields`].
    pub fn into_result(self) -> Result<(), CoreError> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(CoreError::InvalidFields(self))
        }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (key, messages) in &self.0 {
            for message in messages {
                if !first {
                    f.write_str("; ")?;
                }
                write!(f, "{key}: {message}")?;
                first = false;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn empty_collection_is_ok() {
        assert!(FieldErrors::new().into_result().is_ok());
    }

    #[test]
    fn messages_accumulate_per_key() {
        let mut errors = FieldErrors::new();
        errors.add("label", MSG_REQUIRED);
        errors.add("label", "second");
        errors.add("type", MSG_BLANK);

        assert_eq!(errors.len(), 2);
        assert_eq!(errors.get("label").unwrap(), [MSG_REQUIRED, "second"]);
        assert_matches!(errors.into_result(), Err(CoreError::InvalidFields(_)));
    }

    #[test]
    fn serializes_as_plain_object() {
        let errors = FieldErrors::single("file", "Only PDF files are allowed.");
        let json = serde_json::to_value(&errors).unwrap();
        assert_eq!(json, serde_json::json!({ "file": ["Only PDF files are allowed."] }));
    }

    #[test]
    fn display_joins_keys_in_order() {
        let mut errors = FieldErrors::new();
        errors.add("b", "two");
        errors.add("a", "one");
        assert_eq!(errors.to_string(), "a: one; b: two");
    }
}
