//! Image panel: drops of one or more image files.

use scene::doc::{CanvasObject, ObjectId, ObjectKind};

use super::{PropertyPanel, SelectionFollower};
use crate::decode::{DroppedFile, PendingPlacement, PlacementTarget};
use crate::error::EditorError;
use crate::shell::EditorShell;

const PANEL: &str = "image";

#[derive(Debug, Default)]
pub struct ImagePanel {
    follower: SelectionFollower,
}

impl ImagePanel {
    /// Accept a drop. Decode the returned placement off the interaction
    /// thread, then hand the batch to `EditorShell::apply_placement`; every
    /// readable file is fit-scaled, centered, and the last one selected.
    ///
    /// # Errors
    ///
    /// `SessionClosed` after the shell is closed.
    pub fn drop_files(&self, shell: &EditorShell, files: Vec<DroppedFile>) -> Result<PendingPlacement, EditorError> {
        shell.begin_placement(PlacementTarget::Foreground, files)
    }
}

impl PropertyPanel for ImagePanel {
    fn name(&self) -> &'static str {
        PANEL
    }

    fn accepts(&self, kind: ObjectKind) -> bool {
        kind == ObjectKind::Image
    }

    fn is_active(&self) -> bool {
        self.follower.is_active()
    }

    fn on_selection_changed(&mut self, selected: Option<&CanvasObject>) {
        let claimed = self.claims(selected);
        self.follower.update(claimed);
    }

    fn create_default(&mut self, _shell: &mut EditorShell) -> Result<Option<ObjectId>, EditorError> {
        Ok(None)
    }
}
