//! Editor error taxonomy.

use scene::doc::{ObjectId, ObjectKind};
use scene::scale::ScaleError;
use scene::store::StoreError;

#[derive(Debug, thiserror::Error)]
pub enum EditorError {
    #[error("editor session is closed")]
    SessionClosed,
    #[error("no object is selected")]
    NoSelection,
    #[error("selected {} is not editable by the {panel} panel", .actual.as_str())]
    WrongCategory { panel: &'static str, actual: ObjectKind },
    #[error("object not found: {0}")]
    ObjectNotFound(ObjectId),
    #[error("object is not selectable: {0}")]
    NotSelectable(ObjectId),
    #[error("unsupported font family: {0}")]
    UnsupportedFont(String),
    #[error("unsupported font size: {0}")]
    UnsupportedFontSize(u32),
    #[error("a save is already in flight for this session")]
    SaveInFlight,
    #[error("image placement failed: {0}")]
    Scale(#[from] ScaleError),
    #[error(transparent)]
    Store(#[from] StoreError),
}
