//! Template store boundary.
//!
//! DESIGN
//! ======
//! The editor shell, the dashboard, and the HTTP gateway all consume storage
//! through the `TemplateStore` trait. Handles are injected as
//! `Arc<dyn TemplateStore>` at construction; there is no process-wide store.
//! Backends decide what "storage" means (Postgres rows, an HTTP endpoint, a
//! map in memory) but share one error taxonomy.
//!
//! ERROR HANDLING
//! ==============
//! Nothing here retries. A failed write is reported once to the caller, which
//! keeps its unsaved state and lets the operator try again.

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::consts::NEW_TEMPLATE_TITLE;
use crate::doc::SceneDocument;

// =============================================================================
// TYPES
// =============================================================================

/// Store-assigned template identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TemplateId(pub Uuid);

impl TemplateId {
    #[must_use]
    pub fn new_v4() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for TemplateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for TemplateId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// A template: metadata envelope plus the scene it carries.
///
/// `id` and `date` are absent until the store has persisted the template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Template {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<TemplateId>,
    pub title: String,
    #[serde(default)]
    pub data: SceneDocument,
    #[serde(rename = "date", default, with = "time::serde::rfc3339::option")]
    pub created_at: Option<OffsetDateTime>,
}

impl Template {
    /// An unsaved template with an empty white scene.
    #[must_use]
    pub fn new_unsaved() -> Self {
        Self { id: None, title: NEW_TEMPLATE_TITLE.to_owned(), data: SceneDocument::new(), created_at: None }
    }

    #[must_use]
    pub fn is_saved(&self) -> bool {
        self.id.is_some()
    }
}

/// Listing row shown on the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateSummary {
    pub id: TemplateId,
    pub title: String,
    #[serde(rename = "date", with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("template not found: {0}")]
    NotFound(TemplateId),
    #[error("write failed: {0}")]
    WriteFailed(String),
    #[error("permission denied")]
    PermissionDenied,
    #[error("read failed: {0}")]
    ReadFailed(String),
}

impl StoreError {
    /// Stable machine-readable code, shared with the HTTP error body.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "not_found",
            Self::WriteFailed(_) => "save_failed",
            Self::PermissionDenied => "forbidden",
            Self::ReadFailed(_) => "read_failed",
        }
    }
}

// =============================================================================
// TRAIT
// =============================================================================

#[async_trait::async_trait]
pub trait TemplateStore: Send + Sync {
    /// All templates, newest first.
    async fn list(&self) -> Result<Vec<TemplateSummary>, StoreError>;

    /// All templates with their scene data, newest first. Backends that can
    /// read everything in one query override the per-row fallback.
    async fn list_with_data(&self) -> Result<Vec<Template>, StoreError> {
        let mut templates = Vec::new();
        for summary in self.list().await? {
            match self.get(summary.id).await {
                Ok(template) => templates.push(template),
                // Deleted between the listing and the read.
                Err(StoreError::NotFound(_)) => {}
                Err(e) => return Err(e),
            }
        }
        Ok(templates)
    }

    /// Fetch one template, or `NotFound`.
    async fn get(&self, id: TemplateId) -> Result<Template, StoreError>;

    /// Persist a new template and return its assigned id.
    async fn create(&self, title: &str, data: &SceneDocument) -> Result<TemplateId, StoreError>;

    /// Overwrite an existing template. Unknown ids are a `WriteFailed`.
    async fn update(&self, id: TemplateId, title: &str, data: &SceneDocument) -> Result<(), StoreError>;

    /// Delete a template, or `NotFound`.
    async fn delete(&self, id: TemplateId) -> Result<(), StoreError>;
}
