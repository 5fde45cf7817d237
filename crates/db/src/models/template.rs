//! Form template models and DTOs.
//!
//! A template owns an ordered list of fields. Field rows carry bookkeeping
//! columns (`id`, `template_id`, `position`, timestamps) that are kept out of
//! the JSON representation, so a field serializes to exactly what a client
//! submitted.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use voice2pdf_core::error::CoreError;
use voice2pdf_core::field_errors::{FieldErrors, MSG_REQUIRED};
use voice2pdf_core::form_template::{
    check_page_number, check_present, check_text, field_key, Blank, FIELD_ID_MAX_LEN,
    FIELD_TYPE_MAX_LEN, LABEL_MAX_LEN, PLACEHOLDER_MAX_LEN, UPLOAD_ID_MAX_LEN,
};
use voice2pdf_core::types::{DbId, Timestamp};

// ---------------------------------------------------------------------------
// Entity structs (database rows)
// ---------------------------------------------------------------------------

/// A row from the `templates` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Template {
    pub id: DbId,
    pub upload_id: String,
    pub created_at: Timestamp,
    #[serde(skip_serializing)]
    pub updated_at: Timestamp,
}

/// A row from the `template_fields` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TemplateField {
    #[serde(skip_serializing)]
    pub id: DbId,
    #[serde(skip_serializing)]
    pub template_id: DbId,
    #[serde(skip_serializing)]
    pub position: i32,
    pub field_id: String,
    #[serde(rename = "type")]
    pub field_type: String,
    pub label: String,
    pub placeholder: String,
    pub page_number: i32,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub validation: serde_json::Value,
    pub value: String,
    #[serde(skip_serializing)]
    pub created_at: Timestamp,
    #[serde(skip_serializing)]
    pub updated_at: Timestamp,
}

/// A template together with its fields in insertion order.
#[derive(Debug, Clone, Serialize)]
pub struct TemplateWithFields {
    #[serde(flatten)]
    pub template: Template,
    pub fields: Vec<TemplateField>,
}

// ---------------------------------------------------------------------------
// Request payloads (as received)
// ---------------------------------------------------------------------------

/// One field as sent by a client. Every attribute is optional here so that
/// missing values surface as keyed validation errors instead of a generic
/// deserialization failure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FieldPayload {
    pub field_id: Option<String>,
    #[serde(rename = "type")]
    pub field_type: Option<String>,
    pub label: Option<String>,
    pub placeholder: Option<String>,
    pub page_number: Option<i32>,
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub validation: Option<serde_json::Map<String, serde_json::Value>>,
    pub value: Option<String>,
}

/// Body of `POST /api/templates/`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateTemplatePayload {
    pub upload_id: Option<String>,
    pub fields: Option<Vec<FieldPayload>>,
}

/// Body of `PUT /api/templates/{id}/`.
///
/// `fields` is required and replaces the whole field list; `upload_id` is
/// only changed when present.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateTemplatePayload {
    pub upload_id: Option<String>,
    pub fields: Option<Vec<FieldPayload>>,
}

// ---------------------------------------------------------------------------
// Validated DTOs (repository input)
// ---------------------------------------------------------------------------

/// DTO for inserting one field.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateTemplateField {
    pub field_id: String,
    pub field_type: String,
    pub label: String,
    pub placeholder: String,
    pub page_number: i32,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub validation: serde_json::Value,
    pub value: String,
}

/// DTO for creating a template and its fields.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateTemplate {
    pub upload_id: String,
    pub fields: Vec<CreateTemplateField>,
}

/// DTO for replacing a template's fields.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateTemplate {
    pub upload_id: Option<String>,
    pub fields: Vec<CreateTemplateField>,
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

impl CreateTemplatePayload {
    /// Check every attribute, collecting all problems before failing.
    pub fn validate(self) -> Result<CreateTemplate, CoreError> {
        let mut errors = FieldErrors::new();

        let upload_id = check_text(
            &mut errors,
            "upload_id",
            self.upload_id.as_deref(),
            UPLOAD_ID_MAX_LEN,
            Blank::Rejected,
        );
        let fields = validate_field_list(&mut errors, self.fields);

        match (upload_id, fields) {
            (Some(upload_id), Some(fields)) if errors.is_empty() => {
                Ok(CreateTemplate { upload_id, fields })
            }
            _ => Err(errors.into()),
        }
    }
}

impl UpdateTemplatePayload {
    /// Check every attribute, collecting all problems before failing.
    pub fn validate(self) -> Result<UpdateTemplate, CoreError> {
        let mut errors = FieldErrors::new();

        let upload_id = match self.upload_id.as_deref() {
            Some(raw) => check_text(
                &mut errors,
                "upload_id",
                Some(raw),
                UPLOAD_ID_MAX_LEN,
                Blank::Rejected,
            ),
            None => None,
        };
        let fields = validate_field_list(&mut errors, self.fields);

        match fields {
            Some(fields) if errors.is_empty() => Ok(UpdateTemplate { upload_id, fields }),
            _ => Err(errors.into()),
        }
    }
}

fn validate_field_list(
    errors: &mut FieldErrors,
    fields: Option<Vec<FieldPayload>>,
) -> Option<Vec<CreateTemplateField>> {
    let Some(fields) = fields else {
        errors.add("fields", MSG_REQUIRED);
        return None;
    };

    let validated: Vec<_> = fields
        .into_iter()
        .enumerate()
        .map(|(index, field)| field.validate(errors, index))
        .collect();

    validated.into_iter().collect()
}

impl FieldPayload {
    fn validate(self, errors: &mut FieldErrors, index: usize) -> Option<CreateTemplateField> {
        let key = |name: &str| field_key(index, name);

        let field_id = check_text(
            errors,
            &key("field_id"),
            self.field_id.as_deref(),
            FIELD_ID_MAX_LEN,
            Blank::Rejected,
        );
        let field_type = check_text(
            errors,
            &key("type"),
            self.field_type.as_deref(),
            FIELD_TYPE_MAX_LEN,
            Blank::Rejected,
        );
        let label = check_text(
            errors,
            &key("label"),
            self.label.as_deref(),
            LABEL_MAX_LEN,
            Blank::Rejected,
        );
        let placeholder = check_text(
            errors,
            &key("placeholder"),
            self.placeholder.as_deref(),
            PLACEHOLDER_MAX_LEN,
            Blank::Allowed,
        );
        let page_number = check_page_number(errors, &key("page_number"), self.page_number);
        let x = check_present(errors, &key("x"), self.x);
        let y = check_present(errors, &key("y"), self.y);
        let width = check_present(errors, &key("width"), self.width);
        let height = check_present(errors, &key("height"), self.height);

        Some(CreateTemplateField {
            field_id: field_id?,
            field_type: field_type?,
            label: label?,
            placeholder: placeholder?,
            page_number: page_number?,
            x: x?,
            y: y?,
            width: width?,
            height: height?,
            validation: serde_json::Value::Object(self.validation.unwrap_or_default()),
            value: self.value.unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use serde_json::json;

    fn name_field() -> serde_json::Value {
        json!({
            "field_id": "field1",
            "type": "text",
            "label": "Name",
            "placeholder": "Enter your name",
            "page_number": 1,
            "x": 100.0,
            "y": 200.0,
            "width": 300.0,
            "height": 50.0,
            "validation": {"required": true},
            "value": "John Doe"
        })
    }

    fn errors_of(err: CoreError) -> FieldErrors {
        match err {
            CoreError::InvalidFields(errors) => errors,
            other => panic!("expected field errors, got {other:?}"),
        }
    }

    #[test]
    fn valid_payload_converts() {
        let payload: CreateTemplatePayload = serde_json::from_value(json!({
            "upload_id": "test-upload-456",
            "fields": [name_field()]
        }))
        .unwrap();

        let create = payload.validate().unwrap();
        assert_eq!(create.upload_id, "test-upload-456");
        assert_eq!(create.fields.len(), 1);
        assert_eq!(create.fields[0].field_type, "text");
        assert_eq!(create.fields[0].validation, json!({"required": true}));
    }

    #[test]
    fn optional_attributes_default() {
        let mut field = name_field();
        let obj = field.as_object_mut().unwrap();
        obj.remove("placeholder");
        obj.remove("validation");
        obj.remove("value");

        let payload: CreateTemplatePayload =
            serde_json::from_value(json!({ "upload_id": "u", "fields": [field] })).unwrap();
        let create = payload.validate().unwrap();

        assert_eq!(create.fields[0].placeholder, "");
        assert_eq!(create.fields[0].value, "");
        assert_eq!(create.fields[0].validation, json!({}));
    }

    #[test]
    fn missing_top_level_attributes_are_reported() {
        let errors = errors_of(CreateTemplatePayload::default().validate().unwrap_err());
        assert!(errors.get("upload_id").is_some());
        assert!(errors.get("fields").is_some());
    }

    #[test]
    fn nested_errors_are_keyed_by_index() {
        let mut broken = name_field();
        broken.as_object_mut().unwrap().remove("label");
        let payload: CreateTemplatePayload = serde_json::from_value(json!({
            "upload_id": "u",
            "fields": [name_field(), broken]
        }))
        .unwrap();

        let errors = errors_of(payload.validate().unwrap_err());
        assert_eq!(errors.len(), 1);
        assert!(errors.get("fields[1].label").is_some());
    }

    #[test]
    fn empty_field_list_is_accepted() {
        let payload = CreateTemplatePayload {
            upload_id: Some("u".into()),
            fields: Some(vec![]),
        };
        assert!(payload.validate().unwrap().fields.is_empty());
    }

    #[test]
    fn update_requires_fields_but_not_upload_id() {
        let ok = UpdateTemplatePayload {
            upload_id: None,
            fields: Some(vec![]),
        };
        assert_eq!(ok.validate().unwrap().upload_id, None);

        let missing = UpdateTemplatePayload::default();
        assert_matches!(missing.validate(), Err(CoreError::InvalidFields(e)) if e.get("fields").is_some());
    }

    #[test]
    fn field_serializes_without_bookkeeping_columns() {
        let now = chrono::Utc::now();
        let field = TemplateField {
            id: 7,
            template_id: 3,
            position: 0,
            field_id: "field2".into(),
            field_type: "number".into(),
            label: "Age".into(),
            placeholder: "Enter your age".into(),
            page_number: 1,
            x: 100.0,
            y: 300.0,
            width: 150.0,
            height: 50.0,
            validation: json!({"min": 0, "max": 120}),
            value: "25".into(),
            created_at: now,
            updated_at: now,
        };

        let json = serde_json::to_value(&field).unwrap();
        assert_eq!(
            json,
            json!({
                "field_id": "field2",
                "type": "number",
                "label": "Age",
                "placeholder": "Enter your age",
                "page_number": 1,
                "x": 100.0,
                "y": 300.0,
                "width": 150.0,
                "height": 50.0,
                "validation": {"min": 0, "max": 120},
                "value": "25"
            })
        );
    }
}
