//! Background panel: flat color or a single cover-scaled image.

use scene::consts::DEFAULT_BACKGROUND;
use scene::doc::{CanvasObject, ObjectId, ObjectKind};

use super::PropertyPanel;
use crate::decode::{DroppedFile, PendingPlacement, PlacementTarget};
use crate::error::EditorError;
use crate::shell::EditorShell;

const PANEL: &str = "background";

#[derive(Debug, Default)]
pub struct BackgroundPanel;

impl BackgroundPanel {
    /// The color the panel's picker shows.
    #[must_use]
    pub fn color<'a>(&self, shell: &'a EditorShell) -> &'a str {
        shell.background_color()
    }

    /// # Errors
    ///
    /// `SessionClosed` after the shell is closed.
    pub fn set_color(&self, shell: &mut EditorShell, color: &str) -> Result<(), EditorError> {
        shell.set_background_color(color)
    }

    /// Accept a drop. Only the first file is used; the rest are ignored.
    ///
    /// # Errors
    ///
    /// `SessionClosed` after the shell is closed.
    pub fn drop_file(&self, shell: &EditorShell, files: Vec<DroppedFile>) -> Result<PendingPlacement, EditorError> {
        let first: Vec<DroppedFile> = files.into_iter().take(1).collect();
        shell.begin_placement(PlacementTarget::Background, first)
    }

    /// Whether the scene currently has a background image.
    #[must_use]
    pub fn has_image(&self, shell: &EditorShell) -> bool {
        shell.document().background_image().is_some()
    }

    /// # Errors
    ///
    /// `SessionClosed` after the shell is closed.
    pub fn remove_image(&self, shell: &mut EditorShell) -> Result<bool, EditorError> {
        shell.remove_background_image()
    }
}

impl PropertyPanel for BackgroundPanel {
    fn name(&self) -> &'static str {
        PANEL
    }

    fn accepts(&self, _kind: ObjectKind) -> bool {
        false
    }

    /// The background is always editable, whatever is selected.
    fn is_active(&self) -> bool {
        true
    }

    fn on_selection_changed(&mut self, _selected: Option<&CanvasObject>) {}

    /// Resets the flat color to white.
    fn create_default(&mut self, shell: &mut EditorShell) -> Result<Option<ObjectId>, EditorError> {
        shell.set_background_color(DEFAULT_BACKGROUND)?;
        Ok(None)
    }
}
