//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor. It
//! holds the template store handle and the administrator token set. The
//! store is chosen once at startup (Postgres or in-memory) and handlers only
//! see the `TemplateStore` trait.

use std::sync::Arc;

use scene::store::TemplateStore;

use crate::services::auth::AdminTokens;

/// Shared application state, injected into Axum handlers via State extractor.
/// Clone is required by Axum; all inner fields are Arc-wrapped.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn TemplateStore>,
    pub admins: Arc<AdminTokens>,
}

impl AppState {
    #[must_use]
    pub fn new(store: Arc<dyn TemplateStore>, admins: AdminTokens) -> Self {
        Self { store, admins: Arc::new(admins) }
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================
