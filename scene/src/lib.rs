//! Scene model for Pinterest-sized image templates.
//!
//! This crate owns everything about a template that is independent of how it
//! is edited or where it is stored: the serializable scene document, the
//! placement math used when images are dropped onto the canvas, and the
//! storage boundary that the editor and the HTTP gateway both talk to.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`doc`] | Scene document, canvas objects, and the background-marker invariant |
//! | [`scale`] | Fit and cover scaling plus centering on the canvas |
//! | [`store`] | `TemplateStore` trait, template records, and store errors |
//! | [`memory`] | In-process `TemplateStore` used by tests and the dev server |
//! | [`consts`] | Canvas size, default object styles, and the closed font sets |

pub mod consts;
pub mod doc;
pub mod memory;
pub mod scale;
pub mod store;
