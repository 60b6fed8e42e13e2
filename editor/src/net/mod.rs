//! Network adapters for talking to a running template server.

pub mod api;

pub use api::HttpTemplateStore;
