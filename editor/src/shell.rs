//! Editor shell: one editing session over one template.
//!
//! DESIGN
//! ======
//! The shell exclusively owns the live `SceneDocument` and the selection for
//! the session. Selection is an `ObjectId` resolved on demand, so removing an
//! object can never leave a dangling reference behind. Every mutation bumps
//! `revision`; the host canvas repaints when it changes.
//!
//! Two counters guard asynchronous work:
//! - `generation` moves whenever the user changes the selection or closes the
//!   session. Image placements captured under an older generation are
//!   discarded on completion.
//! - `saving` is set from `begin_save` until the resulting `Saved` is handed
//!   to `finish_save` (or the save fails). A second save in that window is
//!   rejected, so an unsaved template is never created twice.
//!
//! ERROR HANDLING
//! ==============
//! A failed save leaves the document, the selection, and the dirty state
//! untouched. The error is returned once and nothing is retried.

#[cfg(test)]
#[path = "shell_test.rs"]
mod shell_test;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use scene::consts::IMAGE_MAX_DIMENSION;
use scene::doc::{CanvasObject, ImageShape, ObjectId, ObjectSpec, SceneDocument, Shape};
use scene::scale::{self, CanvasSize};
use scene::store::{StoreError, Template, TemplateId, TemplateStore};
use time::OffsetDateTime;
use tracing::{info, warn};
use uuid::Uuid;

use crate::decode::{DecodedBatch, DecodedImage, DroppedFile, PendingPlacement, PlacementTarget, SessionToken};
use crate::error::EditorError;

// =============================================================================
// SAVE
// =============================================================================

/// Clears the in-flight flag when dropped.
#[derive(Debug)]
struct SaveGuard(Arc<AtomicBool>);

impl Drop for SaveGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// A snapshot of the session on its way to the store.
pub struct PendingSave {
    store: Arc<dyn TemplateStore>,
    id: Option<TemplateId>,
    title: String,
    data: SceneDocument,
    created_at: Option<OffsetDateTime>,
    revision: u64,
    _guard: SaveGuard,
}

/// A completed save, handed back to `EditorShell::finish_save`. The session
/// stays marked as saving until this is consumed or dropped.
#[derive(Debug)]
pub struct Saved {
    pub template: Template,
    revision: u64,
    _guard: SaveGuard,
}

impl PendingSave {
    /// Write the snapshot: `create` for an unsaved template, `update` otherwise.
    ///
    /// # Errors
    ///
    /// Returns the store error unchanged.
    pub async fn run(self) -> Result<Saved, StoreError> {
        let id = match self.id {
            Some(id) => {
                self.store.update(id, &self.title, &self.data).await?;
                id
            }
            None => self.store.create(&self.title, &self.data).await?,
        };
        info!(template_id = %id, objects = self.data.len(), "template saved");
        Ok(Saved {
            template: Template { id: Some(id), title: self.title, data: self.data, created_at: self.created_at },
            revision: self.revision,
            _guard: self._guard,
        })
    }
}

// =============================================================================
// PLACEMENT
// =============================================================================

/// Outcome of applying a decoded batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Placement {
    /// Images were placed. `skipped` counts files that failed to decode or scale.
    Placed { ids: Vec<ObjectId>, skipped: usize },
    /// The session closed or the selection changed while decoding.
    Discarded,
}

// =============================================================================
// SHELL
// =============================================================================

pub struct EditorShell {
    store: Arc<dyn TemplateStore>,
    template_id: Option<TemplateId>,
    title: String,
    created_at: Option<OffsetDateTime>,
    doc: SceneDocument,
    selection: Option<ObjectId>,
    canvas: CanvasSize,
    session: Uuid,
    generation: u64,
    revision: u64,
    saved_revision: Option<u64>,
    open: bool,
    saving: Arc<AtomicBool>,
}

impl EditorShell {
    /// Start a session on `template`. Stored objects load in their stored
    /// order; a template without scene data starts white and empty.
    #[must_use]
    pub fn open(store: Arc<dyn TemplateStore>, template: Template) -> Self {
        let Template { id, title, mut data, created_at } = template;
        if data.normalize() {
            warn!(template_id = ?id, "normalized background marker on load");
        }
        info!(template_id = ?id, objects = data.len(), "editor session opened");
        Self {
            store,
            template_id: id,
            title,
            created_at,
            doc: data,
            selection: None,
            canvas: CanvasSize::default(),
            session: Uuid::new_v4(),
            generation: 0,
            revision: 0,
            saved_revision: id.map(|_| 0),
            open: true,
            saving: Arc::new(AtomicBool::new(false)),
        }
    }

    // --- Accessors ---

    #[must_use]
    pub fn template_id(&self) -> Option<TemplateId> {
        self.template_id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn document(&self) -> &SceneDocument {
        &self.doc
    }

    #[must_use]
    pub fn canvas(&self) -> CanvasSize {
        self.canvas
    }

    #[must_use]
    pub fn background_color(&self) -> &str {
        &self.doc.background
    }

    /// Monotonic mutation counter; the host canvas repaints when it changes.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// True when the scene has edits that no completed save has captured.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.saved_revision != Some(self.revision)
    }

    #[must_use]
    pub fn is_saving(&self) -> bool {
        self.saving.load(Ordering::Acquire)
    }

    #[must_use]
    pub fn session_token(&self) -> SessionToken {
        SessionToken { session: self.session, generation: self.generation }
    }

    /// The current state as a template record.
    #[must_use]
    pub fn template(&self) -> Template {
        Template {
            id: self.template_id,
            title: self.title.clone(),
            data: self.doc.clone(),
            created_at: self.created_at,
        }
    }

    // --- Selection ---

    #[must_use]
    pub fn selection_id(&self) -> Option<ObjectId> {
        self.selection
    }

    /// The selected object, resolved against the live document.
    #[must_use]
    pub fn current_selection(&self) -> Option<&CanvasObject> {
        self.selection.and_then(|id| self.doc.get(id))
    }

    /// Make `id` the active object.
    ///
    /// # Errors
    ///
    /// `ObjectNotFound` for unknown ids, `NotSelectable` for the background image.
    pub fn select(&mut self, id: ObjectId) -> Result<(), EditorError> {
        self.ensure_open()?;
        let obj = self.doc.get(id).ok_or(EditorError::ObjectNotFound(id))?;
        if !obj.is_selectable() {
            return Err(EditorError::NotSelectable(id));
        }
        self.change_selection(Some(id));
        Ok(())
    }

    /// The canvas reported no active object.
    pub fn clear_selection(&mut self) {
        self.change_selection(None);
    }

    fn change_selection(&mut self, next: Option<ObjectId>) {
        if self.selection != next {
            self.selection = next;
            self.generation += 1;
        }
    }

    /// Apply `edit` to the selected object and bump the revision on success.
    ///
    /// # Errors
    ///
    /// `NoSelection` when nothing is selected, otherwise whatever `edit` returns.
    pub fn edit_selected<R>(
        &mut self,
        edit: impl FnOnce(&mut CanvasObject) -> Result<R, EditorError>,
    ) -> Result<R, EditorError> {
        self.ensure_open()?;
        let id = self.selection.ok_or(EditorError::NoSelection)?;
        let obj = self.doc.get_mut(id).ok_or(EditorError::NoSelection)?;
        let out = edit(obj)?;
        self.touch();
        Ok(out)
    }

    // --- Objects ---

    /// Append a new object (at the default position unless `spec` carries one)
    /// and select it.
    ///
    /// # Errors
    ///
    /// `SessionClosed` after `close`.
    pub fn add_object(&mut self, spec: ObjectSpec) -> Result<ObjectId, EditorError> {
        self.ensure_open()?;
        let obj = spec.into_object();
        let id = obj.id;
        self.doc.push(obj);
        self.change_selection(Some(id));
        self.touch();
        Ok(id)
    }

    /// Remove an object. Clears the selection if it pointed at it.
    ///
    /// # Errors
    ///
    /// `ObjectNotFound` for unknown ids.
    pub fn remove_object(&mut self, id: ObjectId) -> Result<CanvasObject, EditorError> {
        self.ensure_open()?;
        let removed = self.doc.remove(id).ok_or(EditorError::ObjectNotFound(id))?;
        if self.selection == Some(id) {
            self.change_selection(None);
        }
        self.touch();
        Ok(removed)
    }

    // --- Background ---

    /// Set the flat background color.
    ///
    /// # Errors
    ///
    /// `SessionClosed` after `close`.
    pub fn set_background_color(&mut self, color: &str) -> Result<(), EditorError> {
        self.ensure_open()?;
        color.clone_into(&mut self.doc.background);
        self.touch();
        Ok(())
    }

    /// Cover-scale `image` over the canvas and install it as the background
    /// image, replacing any previous one.
    ///
    /// # Errors
    ///
    /// `SessionClosed` after `close`, `Scale` for degenerate dimensions.
    pub fn set_background_image(&mut self, image: &DecodedImage) -> Result<ObjectId, EditorError> {
        self.ensure_open()?;
        let placement =
            scale::cover_placement(f64::from(image.width), f64::from(image.height), self.canvas)?;
        let obj = image_object(image, placement);
        let id = obj.id;
        if let Some(previous) = self.doc.set_background_image(obj) {
            if self.selection == Some(previous.id) {
                self.change_selection(None);
            }
        }
        self.touch();
        Ok(id)
    }

    /// Remove the background image if there is one. Returns whether one was removed.
    ///
    /// # Errors
    ///
    /// `SessionClosed` after `close`.
    pub fn remove_background_image(&mut self) -> Result<bool, EditorError> {
        self.ensure_open()?;
        let removed = self.doc.remove_background_image().is_some();
        if removed {
            self.touch();
        }
        Ok(removed)
    }

    // --- Images ---

    /// Capture the session token for a drop of `files`.
    ///
    /// # Errors
    ///
    /// `SessionClosed` after `close`.
    pub fn begin_placement(
        &self,
        target: PlacementTarget,
        files: Vec<DroppedFile>,
    ) -> Result<PendingPlacement, EditorError> {
        self.ensure_open()?;
        Ok(PendingPlacement::new(self.session_token(), target, files))
    }

    /// Fit-scale and center a foreground image, then select it.
    ///
    /// # Errors
    ///
    /// `SessionClosed` after `close`, `Scale` for degenerate dimensions.
    pub fn place_image(&mut self, image: &DecodedImage) -> Result<ObjectId, EditorError> {
        self.ensure_open()?;
        let placement = scale::fit_placement(
            f64::from(image.width),
            f64::from(image.height),
            IMAGE_MAX_DIMENSION,
            self.canvas,
        )?;
        let obj = image_object(image, placement);
        let id = obj.id;
        self.doc.push(obj);
        // Programmatic selection; it does not invalidate other pending drops.
        self.selection = Some(id);
        self.touch();
        Ok(id)
    }

    /// Apply a finished decode if the session still matches its token.
    ///
    /// Foreground batches place every image and leave the last one selected.
    /// Background batches use only the first image.
    ///
    /// # Errors
    ///
    /// Never fails for a stale batch; returns `Placement::Discarded` instead.
    pub fn apply_placement(&mut self, batch: DecodedBatch) -> Result<Placement, EditorError> {
        if !self.open || batch.token != self.session_token() {
            warn!(
                images = batch.images.len(),
                open = self.open,
                "discarding stale image placement"
            );
            return Ok(Placement::Discarded);
        }

        let mut skipped = batch.failures.len();
        let mut ids = Vec::new();
        match batch.target {
            PlacementTarget::Foreground => {
                for image in &batch.images {
                    match self.place_image(image) {
                        Ok(id) => ids.push(id),
                        Err(e) => {
                            warn!(name = %image.name, error = %e, "skipping image placement");
                            skipped += 1;
                        }
                    }
                }
            }
            PlacementTarget::Background => {
                if let Some(image) = batch.images.first() {
                    ids.push(self.set_background_image(image)?);
                }
            }
        }
        Ok(Placement::Placed { ids, skipped })
    }

    // --- Title ---

    /// Rename the template. Takes effect on the next save.
    ///
    /// # Errors
    ///
    /// `SessionClosed` after `close`.
    pub fn set_title(&mut self, title: &str) -> Result<(), EditorError> {
        self.ensure_open()?;
        title.clone_into(&mut self.title);
        self.touch();
        Ok(())
    }

    // --- Save / close ---

    /// Snapshot the session for saving and mark a save as in flight.
    ///
    /// # Errors
    ///
    /// `SaveInFlight` while another `PendingSave` for this session is alive,
    /// `SessionClosed` after `close`.
    pub fn begin_save(&self) -> Result<PendingSave, EditorError> {
        self.ensure_open()?;
        self.saving
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| EditorError::SaveInFlight)?;
        Ok(PendingSave {
            store: Arc::clone(&self.store),
            id: self.template_id,
            title: self.title.clone(),
            data: self.doc.clone(),
            created_at: self.created_at,
            revision: self.revision,
            _guard: SaveGuard(Arc::clone(&self.saving)),
        })
    }

    /// Record the identifier assigned by a completed save and clear the
    /// in-flight flag. Returns the template as written.
    pub fn finish_save(&mut self, saved: Saved) -> Template {
        if self.template_id.is_none() {
            self.template_id = saved.template.id;
        }
        if saved.template.created_at.is_some() {
            self.created_at = saved.template.created_at;
        }
        self.saved_revision = Some(saved.revision);
        saved.template
    }

    /// Serialize the scene and write it through the store. The session stays
    /// open afterwards.
    ///
    /// # Errors
    ///
    /// `SaveInFlight`, `SessionClosed`, or the store error. Unsaved edits are
    /// kept on failure.
    pub async fn save(&mut self) -> Result<Template, EditorError> {
        let pending = self.begin_save()?;
        match pending.run().await {
            Ok(saved) => Ok(self.finish_save(saved)),
            Err(e) => {
                warn!(template_id = ?self.template_id, error = %e, "save failed; edits retained");
                Err(e.into())
            }
        }
    }

    /// End the session. Pending image placements are discarded on completion.
    pub fn close(&mut self) {
        if self.open {
            self.open = false;
            self.selection = None;
            self.generation += 1;
            info!(template_id = ?self.template_id, dirty = self.is_dirty(), "editor session closed");
        }
    }

    fn ensure_open(&self) -> Result<(), EditorError> {
        if self.open { Ok(()) } else { Err(EditorError::SessionClosed) }
    }

    fn touch(&mut self) {
        self.revision += 1;
    }
}

fn image_object(image: &DecodedImage, placement: scale::Placement) -> CanvasObject {
    CanvasObject::new(
        placement.x,
        placement.y,
        Shape::Image(ImageShape {
            src: image.data_uri.clone(),
            natural_width: image.width,
            natural_height: image.height,
            scale: placement.scale,
        }),
    )
}
