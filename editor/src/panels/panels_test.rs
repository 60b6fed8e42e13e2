use std::sync::Arc;

use scene::consts::{DEFAULT_BACKGROUND, DEFAULT_FONT_FAMILY, DEFAULT_FONT_SIZE, DEFAULT_TEXT};
use scene::doc::Shape;
use scene::memory::MemoryStore;
use scene::store::Template;

use super::*;
use crate::decode::{DecodedBatch, DecodedImage, DroppedFile, PlacementTarget};
use crate::shell::Placement;

fn new_shell() -> EditorShell {
    EditorShell::open(Arc::new(MemoryStore::new()), Template::new_unsaved())
}

fn decoded(name: &str) -> DecodedImage {
    DecodedImage { name: name.into(), data_uri: "data:image/png;base64,".into(), width: 100, height: 100 }
}

// =============================================================================
// TEXT
// =============================================================================

#[test]
fn add_text_uses_defaults_and_activates_panel() {
    let mut shell = new_shell();
    let mut panels = Panels::new();
    panels.text.create_default(&mut shell).expect("add");

    let fields = panels.text.fields(&shell).expect("text selected");
    assert_eq!(fields.text, DEFAULT_TEXT);
    assert_eq!(fields.font_family, DEFAULT_FONT_FAMILY);
    assert_eq!(fields.font_size, DEFAULT_FONT_SIZE);
    assert!(panels.text.is_active());

    panels.sync(&shell);
    assert_eq!(panels.active_panel(), Some("text"));
    assert!(!panels.shapes.is_active());
}

#[test]
fn text_edits_apply_to_selection() {
    let mut shell = new_shell();
    let mut panel = TextPanel::default();
    panel.add_text(&mut shell).expect("add");

    panel.set_content(&mut shell, "Sale today").expect("content");
    panel.set_font_family(&mut shell, "Montserrat").expect("family");
    panel.set_font_size(&mut shell, 48).expect("size");
    panel.set_fill(&mut shell, "#336699").expect("fill");

    let fields = panel.fields(&shell).expect("text selected");
    assert_eq!(fields.text, "Sale today");
    assert_eq!(fields.font_family, "Montserrat");
    assert_eq!(fields.font_size, 48);
    assert_eq!(fields.fill, "#336699");
}

#[test]
fn text_rejects_values_outside_closed_sets() {
    let mut shell = new_shell();
    let mut panel = TextPanel::default();
    panel.add_text(&mut shell).expect("add");
    let revision = shell.revision();

    assert!(matches!(panel.set_font_family(&mut shell, "Comic Sans"), Err(EditorError::UnsupportedFont(_))));
    assert!(matches!(panel.set_font_size(&mut shell, 13), Err(EditorError::UnsupportedFontSize(13))));
    assert_eq!(shell.revision(), revision);
}

#[test]
fn text_panel_rejects_other_categories() {
    let mut shell = new_shell();
    let text = TextPanel::default();
    ShapesPanel::default().add_circle(&mut shell).expect("add");

    let err = text.set_content(&mut shell, "nope").expect_err("wrong category");
    assert!(matches!(err, EditorError::WrongCategory { panel: "text", actual: ObjectKind::Circle }));
    assert!(text.fields(&shell).is_none());
}

#[test]
fn text_edit_without_selection_fails() {
    let mut shell = new_shell();
    let panel = TextPanel::default();
    assert!(matches!(panel.set_fill(&mut shell, "#000"), Err(EditorError::NoSelection)));
}

#[test]
fn closed_sets_are_exposed() {
    assert_eq!(TextPanel::font_families().len(), 7);
    assert!(TextPanel::font_sizes().contains(&72));
}

// =============================================================================
// SHAPES
// =============================================================================

#[test]
fn shapes_create_each_kind() {
    let mut shell = new_shell();
    let mut panel = ShapesPanel::default();
    panel.add_rectangle(&mut shell).expect("rect");
    panel.add_circle(&mut shell).expect("circle");
    panel.add_line(&mut shell).expect("line");

    let kinds: Vec<ObjectKind> = shell.document().objects.iter().map(CanvasObject::kind).collect();
    assert_eq!(kinds, [ObjectKind::Rect, ObjectKind::Circle, ObjectKind::Line]);
    assert!(panel.is_active());
}

#[test]
fn shapes_default_action_is_rectangle() {
    let mut shell = new_shell();
    let id = ShapesPanel::default().create_default(&mut shell).expect("add").expect("id");
    assert_eq!(shell.document().get(id).map(CanvasObject::kind), Some(ObjectKind::Rect));
}

#[test]
fn shape_color_targets_fill_or_stroke() {
    let mut shell = new_shell();
    let mut panel = ShapesPanel::default();

    panel.add_rectangle(&mut shell).expect("rect");
    panel.set_color(&mut shell, "#ff0000").expect("fill");
    assert_eq!(panel.color(&shell), Some("#ff0000"));

    let line = panel.add_line(&mut shell).expect("line");
    panel.set_color(&mut shell, "#00ff00").expect("stroke");
    match &shell.document().get(line).expect("line").shape {
        Shape::Line(l) => assert_eq!(l.stroke, "#00ff00"),
        other => panic!("expected line, got {other:?}"),
    }
}

#[test]
fn shape_color_rejects_text() {
    let mut shell = new_shell();
    TextPanel::default().add_text(&mut shell).expect("add");
    let panel = ShapesPanel::default();
    assert!(matches!(
        panel.set_color(&mut shell, "#fff"),
        Err(EditorError::WrongCategory { panel: "shapes", actual: ObjectKind::Text })
    ));
    assert!(panel.color(&shell).is_none());
}

// =============================================================================
// IMAGE
// =============================================================================

#[test]
fn image_drop_targets_foreground() {
    let mut shell = new_shell();
    let mut panel = ImagePanel::default();
    let files = vec![DroppedFile::new("a.png", Vec::new()), DroppedFile::new("b.png", Vec::new())];
    let pending = panel.drop_files(&shell, files).expect("drop");
    assert_eq!(pending.target(), PlacementTarget::Foreground);
    assert_eq!(pending.len(), 2);
    assert_eq!(panel.create_default(&mut shell).expect("noop"), None);
}

#[test]
fn image_panel_follows_placed_image() {
    let mut shell = new_shell();
    let mut panels = Panels::new();
    let batch = DecodedBatch {
        token: shell.session_token(),
        target: PlacementTarget::Foreground,
        images: vec![decoded("a")],
        failures: Vec::new(),
    };
    assert!(matches!(shell.apply_placement(batch).expect("apply"), Placement::Placed { .. }));
    panels.sync(&shell);
    assert!(panels.image.is_active());
    assert_eq!(panels.active_panel(), Some("image"));
}

// =============================================================================
// BACKGROUND
// =============================================================================

#[test]
fn background_color_round_trip() {
    let mut shell = new_shell();
    let mut panel = BackgroundPanel;
    panel.set_color(&mut shell, "#123456").expect("color");
    assert_eq!(panel.color(&shell), "#123456");
    panel.create_default(&mut shell).expect("reset");
    assert_eq!(panel.color(&shell), DEFAULT_BACKGROUND);
    assert!(panel.is_active());
}

#[test]
fn background_drop_uses_first_file_only() {
    let shell = new_shell();
    let files = vec![DroppedFile::new("a.png", Vec::new()), DroppedFile::new("b.png", Vec::new())];
    let pending = BackgroundPanel.drop_file(&shell, files).expect("drop");
    assert_eq!(pending.target(), PlacementTarget::Background);
    assert_eq!(pending.len(), 1);
}

#[test]
fn background_image_never_activates_object_panels() {
    let mut shell = new_shell();
    let panel = BackgroundPanel;
    let mut panels = Panels::new();
    shell.set_background_image(&decoded("bg")).expect("bg");
    assert!(panel.has_image(&shell));
    panels.sync(&shell);
    assert_eq!(panels.active_panel(), None);

    assert!(panel.remove_image(&mut shell).expect("remove"));
    assert!(!panel.has_image(&shell));
}

// =============================================================================
// SELECTION CLAIMS
// =============================================================================

#[test]
fn panels_claim_only_their_own_categories() {
    let mut shell = new_shell();
    shell.set_background_image(&decoded("bg")).expect("background");
    let text_id = shell.add_object(scene::doc::ObjectSpec::text("Hi")).expect("text");

    let panels = Panels::new();
    let background = shell.document().objects.first();
    let text = shell.document().get(text_id);

    assert!(panels.text.claims(text));
    assert!(!panels.shapes.claims(text));
    assert!(!panels.image.claims(text));
    assert!(!panels.background.claims(text));
    assert!(!panels.image.claims(background), "background image is not selectable");
    assert!(!panels.text.claims(None));
}
