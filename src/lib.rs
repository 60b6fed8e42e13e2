//! Template server: REST/CRUD gateway over a `TemplateStore`.
//!
//! ARCHITECTURE
//! ============
//! `main` reads [`config::Config`], picks a store (Postgres via [`db`] when a
//! database is configured, in-memory otherwise), wraps it in
//! [`state::AppState`], and serves [`routes::app`]. The scene model and the
//! store trait live in the `scene` crate; this crate adds the HTTP surface,
//! administrator auth, and the Postgres backend.

pub mod config;
pub mod db;
pub mod routes;
pub mod services;
pub mod state;
