//! Property panels: one per object category.
//!
//! ARCHITECTURE
//! ============
//! Panels are thin: they remember whether the current selection belongs to
//! their category and translate field edits into `EditorShell::edit_selected`
//! calls. They never hold copies of canvas objects, so there is nothing to
//! reconcile when the selection moves or an object disappears.

#[cfg(test)]
#[path = "panels_test.rs"]
mod panels_test;

pub mod background;
pub mod image;
pub mod shapes;
pub mod text;

use scene::doc::{CanvasObject, ObjectId, ObjectKind};

use crate::error::EditorError;
use crate::shell::EditorShell;

pub use self::background::BackgroundPanel;
pub use self::image::ImagePanel;
pub use self::shapes::ShapesPanel;
pub use self::text::TextPanel;

/// Behavior shared by every property panel.
pub trait PropertyPanel {
    /// Short name used in errors and logs.
    fn name(&self) -> &'static str;

    /// Whether objects of `kind` are edited by this panel.
    fn accepts(&self, kind: ObjectKind) -> bool;

    /// Whether the panel is currently showing fields for a selected object.
    fn is_active(&self) -> bool;

    /// React to the canvas reporting a new (or no) active object.
    fn on_selection_changed(&mut self, selected: Option<&CanvasObject>);

    /// Whether `selected` is a selectable object this panel edits.
    fn claims(&self, selected: Option<&CanvasObject>) -> bool {
        selected.is_some_and(|obj| obj.is_selectable() && self.accepts(obj.kind()))
    }

    /// Run the panel's primary creation action. Panels whose objects only come
    /// from file drops return `None`.
    ///
    /// # Errors
    ///
    /// Whatever the shell returns for the mutation.
    fn create_default(&mut self, shell: &mut EditorShell) -> Result<Option<ObjectId>, EditorError>;
}

/// Tracks the active flag for panels that follow the selection.
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct SelectionFollower {
    active: bool,
}

impl SelectionFollower {
    pub(crate) fn update(&mut self, claimed: bool) {
        self.active = claimed;
    }

    pub(crate) fn is_active(self) -> bool {
        self.active
    }
}

/// The full panel set of the editor sidebar.
#[derive(Debug, Default)]
pub struct Panels {
    pub text: TextPanel,
    pub shapes: ShapesPanel,
    pub image: ImagePanel,
    pub background: BackgroundPanel,
}

impl Panels {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Push the shell's current selection to every panel.
    pub fn sync(&mut self, shell: &EditorShell) {
        let selected = shell.current_selection();
        self.text.on_selection_changed(selected);
        self.shapes.on_selection_changed(selected);
        self.image.on_selection_changed(selected);
        self.background.on_selection_changed(selected);
    }

    /// Name of the panel that edits the current selection, if any.
    #[must_use]
    pub fn active_panel(&self) -> Option<&'static str> {
        let panels: [&dyn PropertyPanel; 3] = [&self.text, &self.shapes, &self.image];
        panels.into_iter().find(|p| p.is_active()).map(PropertyPanel::name)
    }
}
