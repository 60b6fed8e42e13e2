//! Shapes panel: rectangles, circles, and lines.
//!
//! The single color control edits `fill` on rectangles and circles and
//! `stroke` on lines.

use scene::doc::{CanvasObject, ObjectId, ObjectKind, ObjectSpec, Shape};

use super::{PropertyPanel, SelectionFollower};
use crate::error::EditorError;
use crate::shell::EditorShell;

const PANEL: &str = "shapes";

fn is_shape(kind: ObjectKind) -> bool {
    matches!(kind, ObjectKind::Rect | ObjectKind::Circle | ObjectKind::Line)
}

#[derive(Debug, Default)]
pub struct ShapesPanel {
    follower: SelectionFollower,
}

impl ShapesPanel {
    fn add(&mut self, shell: &mut EditorShell, spec: ObjectSpec) -> Result<ObjectId, EditorError> {
        let id = shell.add_object(spec)?;
        self.on_selection_changed(shell.current_selection());
        Ok(id)
    }

    /// # Errors
    ///
    /// `SessionClosed` after the shell is closed.
    pub fn add_rectangle(&mut self, shell: &mut EditorShell) -> Result<ObjectId, EditorError> {
        self.add(shell, ObjectSpec::rect())
    }

    /// # Errors
    ///
    /// `SessionClosed` after the shell is closed.
    pub fn add_circle(&mut self, shell: &mut EditorShell) -> Result<ObjectId, EditorError> {
        self.add(shell, ObjectSpec::circle())
    }

    /// # Errors
    ///
    /// `SessionClosed` after the shell is closed.
    pub fn add_line(&mut self, shell: &mut EditorShell) -> Result<ObjectId, EditorError> {
        self.add(shell, ObjectSpec::line())
    }

    /// The color the panel's picker shows for the selection.
    #[must_use]
    pub fn color<'a>(&self, shell: &'a EditorShell) -> Option<&'a str> {
        match &shell.current_selection()?.shape {
            Shape::Rect(rect) => Some(&rect.fill),
            Shape::Circle(circle) => Some(&circle.fill),
            Shape::Line(line) => Some(&line.stroke),
            Shape::Text(_) | Shape::Image(_) => None,
        }
    }

    /// # Errors
    ///
    /// `NoSelection`, or `WrongCategory` when the selection is not a shape.
    pub fn set_color(&self, shell: &mut EditorShell, color: &str) -> Result<(), EditorError> {
        shell.edit_selected(|obj| {
            let actual = obj.kind();
            let target = match &mut obj.shape {
                Shape::Rect(rect) => &mut rect.fill,
                Shape::Circle(circle) => &mut circle.fill,
                Shape::Line(line) => &mut line.stroke,
                Shape::Text(_) | Shape::Image(_) => {
                    return Err(EditorError::WrongCategory { panel: PANEL, actual });
                }
            };
            color.clone_into(target);
            Ok(())
        })
    }
}

impl PropertyPanel for ShapesPanel {
    fn name(&self) -> &'static str {
        PANEL
    }

    fn accepts(&self, kind: ObjectKind) -> bool {
        is_shape(kind)
    }

    fn is_active(&self) -> bool {
        self.follower.is_active()
    }

    fn on_selection_changed(&mut self, selected: Option<&CanvasObject>) {
        let claimed = self.claims(selected);
        self.follower.update(claimed);
    }

    fn create_default(&mut self, shell: &mut EditorShell) -> Result<Option<ObjectId>, EditorError> {
        self.add_rectangle(shell).map(Some)
    }
}
