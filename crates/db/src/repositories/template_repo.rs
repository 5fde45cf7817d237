//! Repository for the `templates` and `template_fields` tables.

use sqlx::PgPool;
use voice2pdf_core::types::DbId;

use crate::models::template::{
    CreateTemplate, CreateTemplateField, Template, TemplateField, TemplateWithFields,
    UpdateTemplate,
};

/// Column list for the `templates` table.
const COLUMNS: &str = "id, upload_id, created_at, updated_at";

/// Column list for the `template_fields` table.
const FIELD_COLUMNS: &str = "id, template_id, position, field_id, field_type, label, \
    placeholder, page_number, x, y, width, height, validation, value, \
    created_at, updated_at";

/// Provides CRUD operations for templates and their owned fields.
pub struct TemplateRepo;

impl TemplateRepo {
    /// Insert a template and all of its fields in one transaction.
    ///
    /// Nothing is committed if any insert fails, including a duplicate
    /// `upload_id` (constraint `uq_templates_upload_id`).
    pub async fn create(
        pool: &PgPool,
        input: &CreateTemplate,
    ) -> Result<TemplateWithFields, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let insert_query =
            format!("INSERT INTO templates (upload_id) VALUES ($1) RETURNING {COLUMNS}");
        let template = sqlx::query_as::<_, Template>(&insert_query)
            .bind(&input.upload_id)
            .fetch_one(&mut *tx)
            .await?;

        let fields = Self::insert_fields_inner(&mut tx, template.id, &input.fields).await?;

        tx.commit().await?;
        Ok(TemplateWithFields { template, fields })
    }

    /// Find a template by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Template>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM templates WHERE id = $1");
        sqlx::query_as::<_, Template>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a template by ID, together with its fields.
    pub async fn find_by_id_with_fields(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<TemplateWithFields>, sqlx::Error> {
        let template = Self::find_by_id(pool, id).await?;
        match template {
            Some(template) => {
                let fields = Self::list_fields(pool, template.id).await?;
                Ok(Some(TemplateWithFields { template, fields }))
            }
            None => Ok(None),
        }
    }

    /// List the fields of a template in insertion order.
    pub async fn list_fields(
        pool: &PgPool,
        template_id: DbId,
    ) -> Result<Vec<TemplateField>, sqlx::Error> {
        let query = format!(
            "SELECT {FIELD_COLUMNS} FROM template_fields \
             WHERE template_id = $1 \
             ORDER BY position, id"
        );
        sqlx::query_as::<_, TemplateField>(&query)
            .bind(template_id)
            .fetch_all(pool)
            .await
    }

    /// Replace all fields of a template and apply top-level changes.
    ///
    /// The template row is locked, its fields are deleted and the new set is
    /// inserted, all inside one transaction: a failure at any step leaves the
    /// previous field set untouched. Returns `None` if no template has `id`.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateTemplate,
    ) -> Result<Option<TemplateWithFields>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let update_query = format!(
            "UPDATE templates SET upload_id = COALESCE($2, upload_id) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        let template = sqlx::query_as::<_, Template>(&update_query)
            .bind(id)
            .bind(&input.upload_id)
            .fetch_optional(&mut *tx)
            .await?;

        let Some(template) = template else {
            tx.rollback().await?;
            return Ok(None);
        };

        sqlx::query("DELETE FROM template_fields WHERE template_id = $1")
            .bind(template.id)
            .execute(&mut *tx)
            .await?;

        let fields = Self::insert_fields_inner(&mut tx, template.id, &input.fields).await?;

        tx.commit().await?;
        Ok(Some(TemplateWithFields { template, fields }))
    }

    /// Delete a template by ID. Its fields are removed by `ON DELETE CASCADE`.
    ///
    /// Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM templates WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // -----------------------------------------------------------------------
    // Field helpers
    // -----------------------------------------------------------------------

    /// Insert `fields` for a template, numbering positions from 0.
    async fn insert_fields_inner(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        template_id: DbId,
        fields: &[CreateTemplateField],
    ) -> Result<Vec<TemplateField>, sqlx::Error> {
        let query = format!(
            "INSERT INTO template_fields \
                (template_id, position, field_id, field_type, label, placeholder, \
                 page_number, x, y, width, height, validation, value) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13) \
             RETURNING {FIELD_COLUMNS}"
        );

        let mut inserted = Vec::with_capacity(fields.len());
        for (position, field) in (0_i32..).zip(fields) {
            let row = sqlx::query_as::<_, TemplateField>(&query)
                .bind(template_id)
                .bind(position)
                .bind(&field.field_id)
                .bind(&field.field_type)
                .bind(&field.label)
                .bind(&field.placeholder)
                .bind(field.page_number)
                .bind(field.x)
                .bind(field.y)
                .bind(field.width)
                .bind(field.height)
                .bind(&field.validation)
                .bind(&field.value)
                .fetch_one(&mut **tx)
                .await?;
            inserted.push(row);
        }

        Ok(inserted)
    }
}
