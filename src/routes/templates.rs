//! Template CRUD routes.
//!
//! Thin translation between HTTP and the `TemplateStore`: sanitize the title,
//! pick create or update, map store errors. All routes require `AdminUser`.

#[cfg(test)]
#[path = "templates_test.rs"]
mod templates_test;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use scene::doc::SceneDocument;
use scene::store::{Template, TemplateId};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::routes::auth::AdminUser;
use crate::routes::error::{ApiError, Operation, json_rejection_to_api, store_error_to_api};
use crate::services::template::sanitize_title;
use crate::state::AppState;

pub const SAVED_MESSAGE: &str = "Template saved successfully";
pub const DELETED_MESSAGE: &str = "Template deleted successfully";

#[derive(Debug, Deserialize)]
pub struct SaveTemplateBody {
    #[serde(default)]
    pub id: Option<TemplateId>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub data: SceneDocument,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SaveTemplateResponse {
    pub id: TemplateId,
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Unparseable ids cannot name a stored template.
fn parse_id(raw: &str) -> Result<TemplateId, ApiError> {
    raw.parse().map_err(|_| ApiError::not_found(format!("template {raw} not found")))
}

/// `GET /templates`: every template with its scene, newest first.
pub async fn list_templates(
    State(state): State<AppState>,
    _admin: AdminUser,
) -> Result<Json<Vec<Template>>, ApiError> {
    let templates = state
        .store
        .list_with_data()
        .await
        .map_err(|e| store_error_to_api(e, Operation::Read))?;
    Ok(Json(templates))
}

/// `GET /templates/{id}`: one template.
pub async fn get_template(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(raw_id): Path<String>,
) -> Result<Json<Template>, ApiError> {
    let id = parse_id(&raw_id)?;
    let template = state.store.get(id).await.map_err(|e| store_error_to_api(e, Operation::Read))?;
    Ok(Json(template))
}

/// `POST /templates`: create when `id` is absent (201), update otherwise (200).
pub async fn save_template(
    State(state): State<AppState>,
    admin: AdminUser,
    body: Result<Json<SaveTemplateBody>, JsonRejection>,
) -> Result<(StatusCode, Json<SaveTemplateResponse>), ApiError> {
    let Json(body) = body.map_err(|e| json_rejection_to_api(&e))?;
    let title = sanitize_title(&body.title);

    let (status, id) = match body.id {
        Some(id) => {
            state
                .store
                .update(id, &title, &body.data)
                .await
                .map_err(|e| store_error_to_api(e, Operation::Save))?;
            (StatusCode::OK, id)
        }
        None => {
            let id = state
                .store
                .create(&title, &body.data)
                .await
                .map_err(|e| store_error_to_api(e, Operation::Save))?;
            (StatusCode::CREATED, id)
        }
    };

    info!(template_id = %id, via = ?admin.via, created = status == StatusCode::CREATED, "template saved");
    Ok((status, Json(SaveTemplateResponse { id, message: SAVED_MESSAGE.to_owned() })))
}

/// `DELETE /templates/{id}`: remove one template.
pub async fn delete_template(
    State(state): State<AppState>,
    admin: AdminUser,
    Path(raw_id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let id = parse_id(&raw_id)?;
    state.store.delete(id).await.map_err(|e| store_error_to_api(e, Operation::Delete))?;
    info!(template_id = %id, via = ?admin.via, "template deleted");
    Ok(Json(MessageResponse { message: DELETED_MESSAGE.to_owned() }))
}
