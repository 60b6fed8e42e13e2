//! In-process template store.
//!
//! Backs the dev server when no database is configured and stands in for real
//! storage in editor and gateway tests. Writes can be made to fail on demand
//! so callers can exercise their `WriteFailed` paths.

#[cfg(test)]
#[path = "memory_test.rs"]
mod memory_test;

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use time::OffsetDateTime;
use tokio::sync::RwLock;

use crate::doc::SceneDocument;
use crate::store::{StoreError, Template, TemplateId, TemplateStore, TemplateSummary};

struct StoredTemplate {
    title: String,
    data: SceneDocument,
    created_at: OffsetDateTime,
    /// Insertion order, used to break `created_at` ties when listing.
    seq: u64,
}

#[derive(Default)]
struct Inner {
    templates: HashMap<TemplateId, StoredTemplate>,
    next_seq: u64,
}

#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
    fail_writes: AtomicBool,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent create/update/delete fail with `WriteFailed`.
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Number of stored templates.
    pub async fn len(&self) -> usize {
        self.inner.read().await.templates.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    fn check_writable(&self) -> Result<(), StoreError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::WriteFailed("storage rejected the write".into()));
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl TemplateStore for MemoryStore {
    async fn list(&self) -> Result<Vec<TemplateSummary>, StoreError> {
        let inner = self.inner.read().await;
        let mut rows: Vec<(&TemplateId, &StoredTemplate)> = inner.templates.iter().collect();
        rows.sort_by(|a, b| b.1.created_at.cmp(&a.1.created_at).then_with(|| b.1.seq.cmp(&a.1.seq)));
        Ok(rows
            .into_iter()
            .map(|(id, stored)| TemplateSummary { id: *id, title: stored.title.clone(), created_at: stored.created_at })
            .collect())
    }

    async fn get(&self, id: TemplateId) -> Result<Template, StoreError> {
        let inner = self.inner.read().await;
        let stored = inner.templates.get(&id).ok_or(StoreError::NotFound(id))?;
        Ok(Template {
            id: Some(id),
            title: stored.title.clone(),
            data: stored.data.clone(),
            created_at: Some(stored.created_at),
        })
    }

    async fn create(&self, title: &str, data: &SceneDocument) -> Result<TemplateId, StoreError> {
        self.check_writable()?;
        let id = TemplateId::new_v4();
        let mut inner = self.inner.write().await;
        let seq = inner.next_seq;
        inner.next_seq += 1;
        inner.templates.insert(
            id,
            StoredTemplate { title: title.to_owned(), data: data.clone(), created_at: OffsetDateTime::now_utc(), seq },
        );
        Ok(id)
    }

    async fn update(&self, id: TemplateId, title: &str, data: &SceneDocument) -> Result<(), StoreError> {
        self.check_writable()?;
        let mut inner = self.inner.write().await;
        let Some(stored) = inner.templates.get_mut(&id) else {
            return Err(StoreError::WriteFailed(format!("template {id} does not exist")));
        };
        stored.title = title.to_owned();
        stored.data = data.clone();
        Ok(())
    }

    async fn delete(&self, id: TemplateId) -> Result<(), StoreError> {
        self.check_writable()?;
        let mut inner = self.inner.write().await;
        inner.templates.remove(&id).map(|_| ()).ok_or(StoreError::NotFound(id))
    }
}
