//! Dashboard: lists templates and hands out editor sessions.
//!
//! Holds only the store handle. Opening a template loads it fresh from the
//! store every time, so the dashboard never shows or edits stale state.

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod dashboard_test;

use std::sync::Arc;

use scene::store::{Template, TemplateId, TemplateStore, TemplateSummary};
use tracing::info;

use crate::error::EditorError;
use crate::shell::EditorShell;

pub struct Dashboard {
    store: Arc<dyn TemplateStore>,
}

impl Dashboard {
    #[must_use]
    pub fn new(store: Arc<dyn TemplateStore>) -> Self {
        Self { store }
    }

    /// Templates newest first.
    ///
    /// # Errors
    ///
    /// The store's `ReadFailed` or `PermissionDenied`.
    pub async fn list_templates(&self) -> Result<Vec<TemplateSummary>, EditorError> {
        Ok(self.store.list().await?)
    }

    /// Open an editor on a new, unsaved template with an empty white scene.
    #[must_use]
    pub fn select_create_new(&self) -> EditorShell {
        EditorShell::open(Arc::clone(&self.store), Template::new_unsaved())
    }

    /// Load `id` and open an editor on it.
    ///
    /// # Errors
    ///
    /// `NotFound` for unknown ids, or any other store error.
    pub async fn select_open(&self, id: TemplateId) -> Result<EditorShell, EditorError> {
        let template = self.store.get(id).await?;
        Ok(EditorShell::open(Arc::clone(&self.store), template))
    }

    /// Delete a template. The listing is left untouched on failure.
    ///
    /// # Errors
    ///
    /// `NotFound` for unknown ids, or any other store error.
    pub async fn delete_template(&self, id: TemplateId) -> Result<(), EditorError> {
        self.store.delete(id).await?;
        info!(template_id = %id, "template deleted");
        Ok(())
    }
}
