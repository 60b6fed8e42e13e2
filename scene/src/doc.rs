//! Document model: canvas objects, their per-kind attributes, and the scene
//! document that orders them.
//!
//! A `SceneDocument` is the whole editable state of one template: a flat
//! background color plus the objects painted on top of it, back to front. At
//! most one object carries the background marker; that object is a full-bleed
//! image that always sits at index 0 and is never selectable.
//!
//! The serde representation of these types is the wire contract shared by the
//! editor and the HTTP gateway, so field renames here are breaking changes.

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::consts::{
    DEFAULT_BACKGROUND, DEFAULT_CIRCLE_RADIUS, DEFAULT_FILL, DEFAULT_FONT_FAMILY, DEFAULT_FONT_SIZE,
    DEFAULT_LINE_LENGTH, DEFAULT_POSITION_X, DEFAULT_POSITION_Y, DEFAULT_RECT_SIZE, DEFAULT_STROKE,
    DEFAULT_STROKE_WIDTH, DEFAULT_TEXT,
};

/// Stable identifier for a canvas object within a scene.
pub type ObjectId = Uuid;

/// A point in canvas coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Object category, used by property panels to decide whether they apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectKind {
    Text,
    Rect,
    Circle,
    Line,
    Image,
}

impl ObjectKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Rect => "rect",
            Self::Circle => "circle",
            Self::Line => "line",
            Self::Image => "image",
        }
    }
}

/// Editable text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextShape {
    pub text: String,
    pub font_family: String,
    pub font_size: u32,
    pub fill: String,
}

/// Axis-aligned rectangle with its top-left corner at the object position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RectShape {
    pub width: f64,
    pub height: f64,
    pub fill: String,
}

/// Circle whose bounding box starts at the object position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CircleShape {
    pub radius: f64,
    pub fill: String,
}

/// Straight segment. Endpoints are relative to the object position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineShape {
    pub start: Point,
    pub end: Point,
    pub stroke: String,
    pub stroke_width: f64,
}

/// Raster image placed at a uniform scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageShape {
    /// `data:` URI of the dropped file, or a plain URL.
    pub src: String,
    /// Decoded pixel width before scaling.
    pub natural_width: u32,
    /// Decoded pixel height before scaling.
    pub natural_height: u32,
    /// Uniform scale applied to both axes.
    pub scale: f64,
}

impl ImageShape {
    /// Width on the canvas after scaling.
    #[must_use]
    pub fn scaled_width(&self) -> f64 {
        f64::from(self.natural_width) * self.scale
    }

    /// Height on the canvas after scaling.
    #[must_use]
    pub fn scaled_height(&self) -> f64 {
        f64::from(self.natural_height) * self.scale
    }
}

/// Per-kind attributes of a canvas object, tagged by `type` on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Shape {
    Text(TextShape),
    Rect(RectShape),
    Circle(CircleShape),
    Line(LineShape),
    Image(ImageShape),
}

impl Shape {
    #[must_use]
    pub fn kind(&self) -> ObjectKind {
        match self {
            Self::Text(_) => ObjectKind::Text,
            Self::Rect(_) => ObjectKind::Rect,
            Self::Circle(_) => ObjectKind::Circle,
            Self::Line(_) => ObjectKind::Line,
            Self::Image(_) => ObjectKind::Image,
        }
    }

    /// Text with the editor's default styling.
    #[must_use]
    pub fn text(content: impl Into<String>) -> Self {
        Self::Text(TextShape {
            text: content.into(),
            font_family: DEFAULT_FONT_FAMILY.to_owned(),
            font_size: DEFAULT_FONT_SIZE,
            fill: DEFAULT_FILL.to_owned(),
        })
    }

    /// The text a fresh "Add Text" action creates.
    #[must_use]
    pub fn default_text() -> Self {
        Self::text(DEFAULT_TEXT)
    }

    #[must_use]
    pub fn default_rect() -> Self {
        Self::Rect(RectShape { width: DEFAULT_RECT_SIZE, height: DEFAULT_RECT_SIZE, fill: DEFAULT_FILL.to_owned() })
    }

    #[must_use]
    pub fn default_circle() -> Self {
        Self::Circle(CircleShape { radius: DEFAULT_CIRCLE_RADIUS, fill: DEFAULT_FILL.to_owned() })
    }

    #[must_use]
    pub fn default_line() -> Self {
        Self::Line(LineShape {
            start: Point::new(0.0, 0.0),
            end: Point::new(DEFAULT_LINE_LENGTH, 0.0),
            stroke: DEFAULT_STROKE.to_owned(),
            stroke_width: DEFAULT_STROKE_WIDTH,
        })
    }
}

fn is_false(value: &bool) -> bool {
    !*value
}

/// One drawable element of a scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanvasObject {
    pub id: ObjectId,
    /// Left edge in canvas coordinates.
    pub x: f64,
    /// Top edge in canvas coordinates.
    pub y: f64,
    /// Marks the single full-bleed background image.
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_background: bool,
    #[serde(flatten)]
    pub shape: Shape,
}

impl CanvasObject {
    /// Build an object with a fresh id.
    #[must_use]
    pub fn new(x: f64, y: f64, shape: Shape) -> Self {
        Self { id: Uuid::new_v4(), x, y, is_background: false, shape }
    }

    #[must_use]
    pub fn kind(&self) -> ObjectKind {
        self.shape.kind()
    }

    /// Background images are excluded from normal selection and interaction.
    #[must_use]
    pub fn is_selectable(&self) -> bool {
        !self.is_background
    }
}

/// Request to create one object: a shape plus an optional explicit position.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectSpec {
    pub shape: Shape,
    pub position: Option<Point>,
}

impl ObjectSpec {
    #[must_use]
    pub fn new(shape: Shape) -> Self {
        Self { shape, position: None }
    }

    #[must_use]
    pub fn text(content: impl Into<String>) -> Self {
        Self::new(Shape::text(content))
    }

    #[must_use]
    pub fn rect() -> Self {
        Self::new(Shape::default_rect())
    }

    #[must_use]
    pub fn circle() -> Self {
        Self::new(Shape::default_circle())
    }

    #[must_use]
    pub fn line() -> Self {
        Self::new(Shape::default_line())
    }

    /// Place the object at explicit coordinates instead of the default position.
    #[must_use]
    pub fn at(mut self, x: f64, y: f64) -> Self {
        self.position = Some(Point::new(x, y));
        self
    }

    /// Materialize the object, falling back to the default position.
    #[must_use]
    pub fn into_object(self) -> CanvasObject {
        let at = self.position.unwrap_or(Point::new(DEFAULT_POSITION_X, DEFAULT_POSITION_Y));
        CanvasObject::new(at.x, at.y, self.shape)
    }
}

fn default_background() -> String {
    DEFAULT_BACKGROUND.to_owned()
}

/// Serializable snapshot of one template's canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneDocument {
    /// Flat color painted beneath every object.
    #[serde(default = "default_background")]
    pub background: String,
    /// Objects in paint order, back to front.
    #[serde(default)]
    pub objects: Vec<CanvasObject>,
}

impl Default for SceneDocument {
    fn default() -> Self {
        Self { background: default_background(), objects: Vec::new() }
    }
}

impl SceneDocument {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    #[must_use]
    pub fn index_of(&self, id: ObjectId) -> Option<usize> {
        self.objects.iter().position(|obj| obj.id == id)
    }

    #[must_use]
    pub fn get(&self, id: ObjectId) -> Option<&CanvasObject> {
        self.objects.iter().find(|obj| obj.id == id)
    }

    pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut CanvasObject> {
        self.objects.iter_mut().find(|obj| obj.id == id)
    }

    /// Append an object on top of the stack.
    pub fn push(&mut self, obj: CanvasObject) {
        self.objects.push(obj);
    }

    /// Remove an object by id, returning it if it was present.
    pub fn remove(&mut self, id: ObjectId) -> Option<CanvasObject> {
        let index = self.index_of(id)?;
        Some(self.objects.remove(index))
    }

    /// The background-marked object, if any.
    #[must_use]
    pub fn background_image(&self) -> Option<&CanvasObject> {
        self.objects.iter().find(|obj| obj.is_background)
    }

    /// Install `image` as the background image.
    ///
    /// Exactly one previously marked object is removed (matched by the marker,
    /// not by kind) and returned. The new object is marked and moved to the
    /// bottom of the paint order.
    pub fn set_background_image(&mut self, mut image: CanvasObject) -> Option<CanvasObject> {
        let previous = self.remove_background_image();
        image.is_background = true;
        self.objects.insert(0, image);
        previous
    }

    /// Remove the background-marked object, if present.
    pub fn remove_background_image(&mut self) -> Option<CanvasObject> {
        let index = self.objects.iter().position(|obj| obj.is_background)?;
        Some(self.objects.remove(index))
    }

    /// Restore the background invariant on a document loaded from storage:
    /// the first marked object moves to index 0 and any further markers are
    /// cleared. Returns `true` if anything changed.
    pub fn normalize(&mut self) -> bool {
        let mut marked = self
            .objects
            .iter()
            .enumerate()
            .filter(|(_, obj)| obj.is_background)
            .map(|(index, _)| index);
        let Some(first) = marked.next() else {
            return false;
        };
        let extra: Vec<usize> = marked.collect();

        let mut changed = !extra.is_empty();
        for index in extra {
            self.objects[index].is_background = false;
        }
        if first != 0 {
            let obj = self.objects.remove(first);
            self.objects.insert(0, obj);
            changed = true;
        }
        changed
    }
}
