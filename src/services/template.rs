//! Template service: Postgres-backed store and title sanitizing.
//!
//! DESIGN
//! ======
//! One row per template. The scene document is stored as JSONB in exactly the
//! shape the editor serializes, so nothing here understands canvas objects.
//! Listing reads only the envelope columns.
//!
//! ERROR HANDLING
//! ==============
//! Database errors are logged once here and surface as `ReadFailed` or
//! `WriteFailed`. Updating a missing row is a failed write; deleting one is
//! `NotFound`.

#[cfg(test)]
#[path = "template_test.rs"]
mod template_test;

use scene::doc::SceneDocument;
use scene::store::{StoreError, Template, TemplateId, TemplateStore, TemplateSummary};
use sqlx::types::Json;
use sqlx::{PgPool, Row};
use time::OffsetDateTime;
use tracing::{error, info};
use uuid::Uuid;

/// Title stored when the submitted one sanitizes to nothing.
pub const UNTITLED_TITLE: &str = "Untitled Template";

// =============================================================================
// SANITIZING
// =============================================================================

/// Reduce a submitted title to plain single-line text.
///
/// Markup tags are stripped, control characters become spaces, runs of
/// whitespace collapse to one space, and the ends are trimmed.
#[must_use]
pub fn sanitize_title(raw: &str) -> String {
    let mut stripped = String::with_capacity(raw.len());
    let mut rest = raw;
    while let Some(open) = rest.find('<') {
        stripped.push_str(&rest[..open]);
        match rest[open..].find('>') {
            Some(close) => rest = &rest[open + close + 1..],
            None => {
                rest = &rest[open..];
                break;
            }
        }
    }
    stripped.push_str(rest);

    let collapsed = stripped
        .split(|c: char| c.is_whitespace() || c.is_control())
        .filter(|word| !word.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

    if collapsed.is_empty() { UNTITLED_TITLE.to_owned() } else { collapsed }
}

// =============================================================================
// POSTGRES STORE
// =============================================================================

#[derive(Clone)]
pub struct PgTemplateStore {
    pool: PgPool,
}

impl PgTemplateStore {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn read_failed(err: &sqlx::Error) -> StoreError {
    error!(error = %err, "template read failed");
    StoreError::ReadFailed(err.to_string())
}

fn write_failed(err: &sqlx::Error) -> StoreError {
    error!(error = %err, "template write failed");
    StoreError::WriteFailed(err.to_string())
}

#[async_trait::async_trait]
impl TemplateStore for PgTemplateStore {
    async fn list(&self) -> Result<Vec<TemplateSummary>, StoreError> {
        let rows = sqlx::query("SELECT id, title, created_at FROM templates ORDER BY created_at DESC")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| read_failed(&e))?;

        rows.iter()
            .map(|row| {
                Ok(TemplateSummary {
                    id: TemplateId(row.try_get::<Uuid, _>("id")?),
                    title: row.try_get("title")?,
                    created_at: row.try_get::<OffsetDateTime, _>("created_at")?,
                })
            })
            .collect::<Result<Vec<_>, sqlx::Error>>()
            .map_err(|e| read_failed(&e))
    }

    async fn list_with_data(&self) -> Result<Vec<Template>, StoreError> {
        let rows = sqlx::query("SELECT id, title, data, created_at FROM templates ORDER BY created_at DESC")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| read_failed(&e))?;

        rows.iter()
            .map(|row| {
                let Json(data) = row.try_get::<Json<SceneDocument>, _>("data")?;
                Ok(Template {
                    id: Some(TemplateId(row.try_get::<Uuid, _>("id")?)),
                    title: row.try_get("title")?,
                    data,
                    created_at: Some(row.try_get::<OffsetDateTime, _>("created_at")?),
                })
            })
            .collect::<Result<Vec<_>, sqlx::Error>>()
            .map_err(|e| read_failed(&e))
    }

    async fn get(&self, id: TemplateId) -> Result<Template, StoreError> {
        let row = sqlx::query("SELECT title, data, created_at FROM templates WHERE id = $1")
            .bind(id.0)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| read_failed(&e))?
            .ok_or(StoreError::NotFound(id))?;

        let decode = || -> Result<Template, sqlx::Error> {
            let Json(data) = row.try_get::<Json<SceneDocument>, _>("data")?;
            Ok(Template {
                id: Some(id),
                title: row.try_get("title")?,
                data,
                created_at: Some(row.try_get::<OffsetDateTime, _>("created_at")?),
            })
        };
        decode().map_err(|e| read_failed(&e))
    }

    async fn create(&self, title: &str, data: &SceneDocument) -> Result<TemplateId, StoreError> {
        let id = TemplateId::new_v4();
        sqlx::query("INSERT INTO templates (id, title, data) VALUES ($1, $2, $3)")
            .bind(id.0)
            .bind(title)
            .bind(Json(data))
            .execute(&self.pool)
            .await
            .map_err(|e| write_failed(&e))?;
        info!(template_id = %id, objects = data.len(), "template created");
        Ok(id)
    }

    async fn update(&self, id: TemplateId, title: &str, data: &SceneDocument) -> Result<(), StoreError> {
        let result = sqlx::query("UPDATE templates SET title = $2, data = $3 WHERE id = $1")
            .bind(id.0)
            .bind(title)
            .bind(Json(data))
            .execute(&self.pool)
            .await
            .map_err(|e| write_failed(&e))?;
        if result.rows_affected() == 0 {
            return Err(StoreError::WriteFailed(format!("template {id} does not exist")));
        }
        info!(template_id = %id, objects = data.len(), "template updated");
        Ok(())
    }

    async fn delete(&self, id: TemplateId) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM templates WHERE id = $1")
            .bind(id.0)
            .execute(&self.pool)
            .await
            .map_err(|e| write_failed(&e))?;
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(id));
        }
        info!(template_id = %id, "template deleted");
        Ok(())
    }
}
