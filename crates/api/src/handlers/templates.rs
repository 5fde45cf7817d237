//! Handlers for the `/templates` resource.
//!
//! Create and update validate the whole payload before touching the
//! database. Update replaces the complete field list in one transaction.

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use voice2pdf_core::error::CoreError;
use voice2pdf_core::field_errors::FieldErrors;
use voice2pdf_core::form_template::{MSG_UPLOAD_ID_TAKEN, UPLOAD_ID_CONSTRAINT};
use voice2pdf_core::types::DbId;
use voice2pdf_db::models::template::{
    CreateTemplatePayload, TemplateWithFields, UpdateTemplatePayload,
};
use voice2pdf_db::repositories::TemplateRepo;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Response body for a created template.
#[derive(Debug, Serialize)]
pub struct CreatedTemplate {
    pub template_id: DbId,
}

/// POST /api/templates/
pub async fn create_template(
    State(state): State<AppState>,
    payload: Result<Json<CreateTemplatePayload>, JsonRejection>,
) -> AppResult<(StatusCode, Json<CreatedTemplate>)> {
    let Json(payload) = payload?;
    let input = payload.validate()?;

    let created = TemplateRepo::create(&state.pool, &input)
        .await
        .map_err(map_upload_id_conflict)?;

    tracing::info!(
        template_id = created.template.id,
        upload_id = %created.template.upload_id,
        field_count = created.fields.len(),
        "Template created"
    );

    Ok((
        StatusCode::CREATED,
        Json(CreatedTemplate {
            template_id: created.template.id,
        }),
    ))
}

/// GET /api/templates/{id}/
pub async fn get_template(
    State(state): State<AppState>,
    id: Result<Path<DbId>, PathRejection>,
) -> AppResult<Json<TemplateWithFields>> {
    let id = template_id(id)?;
    let template = TemplateRepo::find_by_id_with_fields(&state.pool, id)
        .await?
        .ok_or(not_found(id))?;
    Ok(Json(template))
}

/// PUT /api/templates/{id}/
///
/// Replaces every field of the template with the submitted list.
pub async fn update_template(
    State(state): State<AppState>,
    id: Result<Path<DbId>, PathRejection>,
    payload: Result<Json<UpdateTemplatePayload>, JsonRejection>,
) -> AppResult<Json<TemplateWithFields>> {
    let id = template_id(id)?;
    let Json(payload) = payload?;
    let input = payload.validate()?;

    let updated = TemplateRepo::update(&state.pool, id, &input)
        .await
        .map_err(map_upload_id_conflict)?
        .ok_or(not_found(id))?;

    tracing::info!(
        template_id = id,
        field_count = updated.fields.len(),
        "Template fields replaced"
    );

    Ok(Json(updated))
}

/// DELETE /api/templates/{id}/
///
/// Removes the template and, by cascade, its fields.
pub async fn delete_template(
    State(state): State<AppState>,
    id: Result<Path<DbId>, PathRejection>,
) -> AppResult<StatusCode> {
    let id = template_id(id)?;
    if !TemplateRepo::delete(&state.pool, id).await? {
        return Err(not_found(id));
    }
    tracing::info!(template_id = id, "Template deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// Unwrap the `{id}` path segment. An id that is not an integer cannot
/// name a template, so it is reported as not found.
fn template_id(path: Result<Path<DbId>, PathRejection>) -> AppResult<DbId> {
    let Path(id) = path.map_err(|rejection| AppError::InvalidId {
        entity: "Template",
        rejection,
    })?;
    Ok(id)
}

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Template",
        id,
    })
}

/// Report a duplicate `upload_id` as a validation error on that key.
fn map_upload_id_conflict(err: sqlx::Error) -> AppError {
    let is_duplicate = err
        .as_database_error()
        .is_some_and(|db_err| db_err.constraint() == Some(UPLOAD_ID_CONSTRAINT));

    if is_duplicate {
        CoreError::InvalidFields(FieldErrors::single("upload_id", MSG_UPLOAD_ID_TAKEN)).into()
    } else {
        AppError::Database(err)
    }
}
