//! Text panel: content, font family, font size, and fill of text objects.

use scene::consts::{FONT_FAMILIES, FONT_SIZES};
use scene::doc::{CanvasObject, ObjectId, ObjectKind, ObjectSpec, Shape, TextShape};

use super::{PropertyPanel, SelectionFollower};
use crate::error::EditorError;
use crate::shell::EditorShell;

const PANEL: &str = "text";

#[derive(Debug, Default)]
pub struct TextPanel {
    follower: SelectionFollower,
}

fn with_text<R>(
    shell: &mut EditorShell,
    edit: impl FnOnce(&mut TextShape) -> R,
) -> Result<R, EditorError> {
    shell.edit_selected(|obj| {
        let actual = obj.kind();
        match &mut obj.shape {
            Shape::Text(text) => Ok(edit(text)),
            _ => Err(EditorError::WrongCategory { panel: PANEL, actual }),
        }
    })
}

impl TextPanel {
    /// The closed set of font families offered.
    #[must_use]
    pub fn font_families() -> &'static [&'static str] {
        &FONT_FAMILIES
    }

    /// The closed set of font sizes offered.
    #[must_use]
    pub fn font_sizes() -> &'static [u32] {
        &FONT_SIZES
    }

    /// "Add Text": a default text object at the default position.
    ///
    /// # Errors
    ///
    /// `SessionClosed` after the shell is closed.
    pub fn add_text(&mut self, shell: &mut EditorShell) -> Result<ObjectId, EditorError> {
        let id = shell.add_object(ObjectSpec::new(Shape::default_text()))?;
        self.on_selection_changed(shell.current_selection());
        Ok(id)
    }

    /// Fields of the selected text object, if one is selected.
    #[must_use]
    pub fn fields<'a>(&self, shell: &'a EditorShell) -> Option<&'a TextShape> {
        match &shell.current_selection()?.shape {
            Shape::Text(text) => Some(text),
            _ => None,
        }
    }

    /// # Errors
    ///
    /// `NoSelection` or `WrongCategory` when no text object is selected.
    pub fn set_content(&self, shell: &mut EditorShell, content: &str) -> Result<(), EditorError> {
        with_text(shell, |text| content.clone_into(&mut text.text))
    }

    /// # Errors
    ///
    /// `UnsupportedFont` for families outside the offered set, otherwise as
    /// [`TextPanel::set_content`].
    pub fn set_font_family(&self, shell: &mut EditorShell, family: &str) -> Result<(), EditorError> {
        if !FONT_FAMILIES.contains(&family) {
            return Err(EditorError::UnsupportedFont(family.to_owned()));
        }
        with_text(shell, |text| family.clone_into(&mut text.font_family))
    }

    /// # Errors
    ///
    /// `UnsupportedFontSize` for sizes outside the offered set, otherwise as
    /// [`TextPanel::set_content`].
    pub fn set_font_size(&self, shell: &mut EditorShell, size: u32) -> Result<(), EditorError> {
        if !FONT_SIZES.contains(&size) {
            return Err(EditorError::UnsupportedFontSize(size));
        }
        with_text(shell, |text| text.font_size = size)
    }

    /// # Errors
    ///
    /// As [`TextPanel::set_content`].
    pub fn set_fill(&self, shell: &mut EditorShell, color: &str) -> Result<(), EditorError> {
        with_text(shell, |text| color.clone_into(&mut text.fill))
    }
}

impl PropertyPanel for TextPanel {
    fn name(&self) -> &'static str {
        PANEL
    }

    fn accepts(&self, kind: ObjectKind) -> bool {
        kind == ObjectKind::Text
    }

    fn is_active(&self) -> bool {
        self.follower.is_active()
    }

    fn on_selection_changed(&mut self, selected: Option<&CanvasObject>) {
        let claimed = self.claims(selected);
        self.follower.update(claimed);
    }

    fn create_default(&mut self, shell: &mut EditorShell) -> Result<Option<ObjectId>, EditorError> {
        self.add_text(shell).map(Some)
    }
}
