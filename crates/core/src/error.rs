use crate::field_errors::FieldErrors;
use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    /// Per-key validation failures, rendered as `{ "<key>": ["<message>", ...] }`.
    #[error("Validation failed: {0}")]
    InvalidFields(FieldErrors),
}

impl From<FieldErrors> for CoreError {
    fn from(errors: FieldErrors) -> Self {
        CoreError::InvalidFields(errors)
    }
}
