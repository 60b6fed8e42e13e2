//! Template editor core.
//!
//! SYSTEM CONTEXT
//! ==============
//! The dashboard opens an [`shell::EditorShell`] on a template pulled from an
//! injected [`scene::store::TemplateStore`]. The shell owns the live scene and
//! the selection for the whole session; property panels read and write
//! through it and never keep copies of objects. Rendering belongs to whatever
//! canvas hosts the shell: it repaints whenever [`shell::EditorShell::revision`]
//! moves.
//!
//! Dropped image files are the only asynchronous input. They are decoded on
//! the blocking pool and applied afterwards, guarded by a session token so a
//! late decode cannot touch a closed session or a changed selection.

pub mod dashboard;
pub mod decode;
pub mod error;
pub mod net;
pub mod panels;
pub mod shell;

pub use dashboard::Dashboard;
pub use error::EditorError;
pub use shell::EditorShell;
