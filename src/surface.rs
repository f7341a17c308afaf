use crate::background::{FetchStatus, ImageInfo, Notice};
use crate::document::{Glyph, GlyphId};
use crate::dropin::{self, DropPayload, Pasteboard, ResolvedDrop};
use crate::error::GlyphboardResult;
use crate::gesture::{GestureResolver, MagnifyOutcome};
use crate::geometry::{DocVec, Point, Vec2};
use crate::mutation::{DocumentSink, Mutation, MutationBatch, UndoScope, dispatch};
use crate::selection::SelectionSet;
use crate::transform::{CanvasTransform, Projection, ZoomRange};
use crate::viewport::{Viewport, fit_transform};

/// Session-tunable constants for one editing surface.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SurfaceConfig {
    /// Base size of a glyph dropped at zoom 1.
    pub default_glyph_size: f64,
    /// Clamp applied to committed canvas zoom levels.
    pub zoom_range: ZoomRange,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            default_glyph_size: 40.0,
            zoom_range: ZoomRange::default(),
        }
    }
}

/// Tap routing target. Hit testing happens in the host (it owns glyph
/// bounds); exactly one handler fires per tap, and a tap landing on a glyph
/// never clears the selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TapTarget {
    Glyph(GlyphId),
    Canvas,
}

/// The interactive editing surface: composes the canvas transform, the
/// selection set, and the live gesture channels, and turns finished gestures
/// into single mutation batches against the external document.
///
/// The surface never owns the document. Every entry point that can commit
/// takes the sink for that one call; everything else is read-only against
/// surface-local state (steady pan/zoom scalars plus the in-flight live
/// deltas).
#[derive(Debug, Default)]
pub struct Surface {
    transform: CanvasTransform,
    selection: SelectionSet,
    gestures: GestureResolver,
    config: SurfaceConfig,
    background_image: Option<ImageInfo>,
    autozoom: bool,
}

impl Surface {
    pub fn new(config: SurfaceConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn transform(&self) -> &CanvasTransform {
        &self.transform
    }

    /// Restore a previously persisted view state (the host owns persistence).
    pub fn restore_transform(&mut self, transform: CanvasTransform) {
        self.transform = transform;
    }

    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    pub fn is_selected(&self, id: GlyphId) -> bool {
        self.selection.contains(id)
    }

    // --- transform queries ---

    /// Effective zoom right now: steady zoom times any live canvas
    /// magnification.
    pub fn effective_zoom(&self) -> f64 {
        self.transform.steady_zoom * self.gestures.live_canvas_zoom()
    }

    /// Point mapping for the current instant, live gesture state applied.
    pub fn projection(&self, viewport: Viewport) -> Projection {
        Projection::new(
            viewport.center(),
            self.transform.steady_pan + self.gestures.live_pan(),
            self.effective_zoom(),
        )
    }

    /// Screen position of a glyph, including the live drag preview for
    /// glyphs captured by an in-flight selection drag. The preview projects
    /// `position + offset` through the full transform, so finger movement
    /// maps 1:1 at any zoom and the preview lands exactly where the commit
    /// will put the glyph.
    pub fn glyph_screen_position(&self, glyph: &Glyph, viewport: Viewport) -> Point {
        let proj = self.projection(viewport);
        let doc = Vec2::new(glyph.position.x as f64, glyph.position.y as f64);
        match self.gestures.live_drag_offset(glyph.id) {
            Some(offset) => proj.project(doc + offset),
            None => proj.project(doc),
        }
    }

    /// Displayed size of a glyph: base size times effective zoom, times the
    /// selection-scoped live magnification when the glyph was captured by an
    /// active selection magnify. Unselected glyphs never react to it.
    pub fn glyph_display_size(&self, glyph: &Glyph) -> f64 {
        glyph.size * self.effective_zoom() * self.gestures.live_glyph_zoom(glyph.id)
    }

    // --- tap routing ---

    /// Route a single tap: toggle the tapped glyph, or clear the selection
    /// on empty canvas. Mutually exclusive by construction.
    pub fn tap(&mut self, target: TapTarget) {
        match target {
            TapTarget::Glyph(id) => self.selection.toggle(id),
            TapTarget::Canvas => self.selection.clear(),
        }
    }

    /// Double-tap: fit the background image into the viewport, ignoring the
    /// selection. No-op until an image has loaded.
    #[tracing::instrument(skip(self))]
    pub fn double_tap_fit(&mut self, viewport: Viewport) {
        if let Some(image) = self.background_image {
            self.fit(image, viewport);
        }
    }

    fn fit(&mut self, image: ImageInfo, viewport: Viewport) {
        if let Some(fitted) = fit_transform(image.size, viewport.size, self.config.zoom_range) {
            tracing::debug!(zoom = fitted.steady_zoom, "viewport fit");
            self.transform = fitted;
        }
    }

    // --- pan gesture (always canvas-scoped, never a document mutation) ---

    pub fn pan_began(&mut self) -> GlyphboardResult<()> {
        self.gestures.pan_began()
    }

    pub fn pan_changed(&mut self, translation: Vec2) {
        let zoom = self.effective_zoom();
        self.gestures.pan_changed(translation, zoom);
    }

    pub fn pan_ended(&mut self, translation: Vec2) {
        let zoom = self.effective_zoom();
        if let Some(folded) = self.gestures.pan_ended(translation, zoom) {
            self.transform.commit_pan(folded);
        }
    }

    pub fn pan_cancelled(&mut self) {
        self.gestures.pan_cancelled();
    }

    // --- magnify gesture ---

    pub fn magnify_began(&mut self) -> GlyphboardResult<()> {
        self.gestures.magnify_began(&self.selection)
    }

    pub fn magnify_changed(&mut self, factor: f64) {
        self.gestures.magnify_changed(factor);
    }

    /// End a magnify gesture. Canvas scope folds into the steady zoom;
    /// selection scope produces one `ScaleGlyph` per captured glyph as a
    /// single undoable batch, leaving the canvas zoom untouched.
    #[tracing::instrument(skip(self, sink))]
    pub fn magnify_ended(&mut self, factor: f64, sink: &mut dyn DocumentSink) {
        match self.gestures.magnify_ended(factor) {
            Some(MagnifyOutcome::CanvasZoom { factor }) => {
                self.transform.commit_zoom(factor, self.config.zoom_range);
            }
            Some(MagnifyOutcome::ScaleSelection { ids, factor }) => {
                // Factor 1 would scale nothing; keep it out of the undo log.
                if factor != 1.0 {
                    let mutations = ids
                        .into_iter()
                        .map(|id| Mutation::ScaleGlyph { id, factor })
                        .collect();
                    dispatch(sink, MutationBatch::new(UndoScope::Scale, mutations));
                }
            }
            None => {}
        }
    }

    pub fn magnify_cancelled(&mut self) {
        self.gestures.magnify_cancelled();
    }

    // --- selection drag gesture ---

    pub fn drag_began(&mut self) -> GlyphboardResult<()> {
        self.gestures.drag_began(&self.selection)
    }

    pub fn drag_changed(&mut self, translation: Vec2) {
        let zoom = self.effective_zoom();
        self.gestures.drag_changed(translation, zoom);
    }

    /// End a selection drag: one `MoveGlyph` per captured glyph, all with
    /// the same integral delta, as a single undoable batch. A drag that
    /// truncates to a zero delta commits nothing.
    #[tracing::instrument(skip(self, sink))]
    pub fn drag_ended(&mut self, translation: Vec2, sink: &mut dyn DocumentSink) {
        let zoom = self.effective_zoom();
        if let Some(out) = self.gestures.drag_ended(translation, zoom)
            && out.by != DocVec::ZERO
        {
            let mutations = out
                .ids
                .into_iter()
                .map(|id| Mutation::MoveGlyph { id, by: out.by })
                .collect();
            dispatch(sink, MutationBatch::new(UndoScope::Move, mutations));
        }
    }

    pub fn drag_cancelled(&mut self) {
        self.gestures.drag_cancelled();
    }

    // --- commands ---

    /// Remove every selected glyph as one undoable batch, then clear the
    /// selection so it never references removed glyphs.
    #[tracing::instrument(skip(self, sink))]
    pub fn remove_selected(&mut self, sink: &mut dyn DocumentSink) {
        if self.selection.is_empty() {
            return;
        }
        let ids = self.selection.captured();
        dispatch(
            sink,
            MutationBatch::single(UndoScope::RemoveGlyphs, Mutation::RemoveGlyphs { ids }),
        );
        self.selection.clear();
    }

    // --- background ---

    /// React to a background fetch transition. A success stores the natural
    /// size and, when the background was just chosen here (drop/paste),
    /// auto-fits it into the viewport. A failure is handed back for the
    /// external alert collaborator; the core never retries.
    #[tracing::instrument(skip(self))]
    pub fn background_status_changed(
        &mut self,
        status: &FetchStatus,
        viewport: Viewport,
    ) -> Option<Notice> {
        match status {
            FetchStatus::Succeeded(image) => {
                self.background_image = Some(*image);
                if self.autozoom {
                    self.fit(*image, viewport);
                }
                None
            }
            FetchStatus::Failed { url } => Some(Notice::BackgroundFetchFailed { url: url.clone() }),
            FetchStatus::Idle | FetchStatus::Fetching => None,
        }
    }

    pub fn background_image(&self) -> Option<ImageInfo> {
        self.background_image
    }

    // --- drop & paste ---

    /// Handle a drop at a screen location. URL and image payloads become the
    /// new background (auto-fit once it loads); a glyph character is added
    /// at the drop point in document coordinates, sized so it appears at the
    /// default size on screen. Returns whether the drop was handled.
    #[tracing::instrument(skip(self, payloads, sink), fields(payloads = payloads.len()))]
    pub fn drop(
        &mut self,
        payloads: &[DropPayload],
        location: Point,
        viewport: Viewport,
        sink: &mut dyn DocumentSink,
    ) -> bool {
        match dropin::resolve(payloads) {
            Some(ResolvedDrop::Background(source)) => {
                self.autozoom = true;
                dispatch(
                    sink,
                    MutationBatch::single(
                        UndoScope::SetBackground,
                        Mutation::SetBackground { source },
                    ),
                );
                true
            }
            Some(ResolvedDrop::Glyph(c)) => {
                let at = self.projection(viewport).to_document(location);
                dispatch(
                    sink,
                    MutationBatch::single(
                        UndoScope::AddGlyph,
                        Mutation::AddGlyph {
                            text: c.to_string(),
                            at,
                            size: self.config.default_glyph_size / self.effective_zoom(),
                        },
                    ),
                );
                true
            }
            None => false,
        }
    }

    /// Set the background from a pasteboard snapshot. An empty pasteboard
    /// yields a notice for the alert collaborator instead of a mutation.
    pub fn paste_background(
        &mut self,
        pasteboard: &Pasteboard,
        sink: &mut dyn DocumentSink,
    ) -> Option<Notice> {
        match dropin::resolve_paste(pasteboard) {
            Some(source) => {
                self.autozoom = true;
                dispatch(
                    sink,
                    MutationBatch::single(
                        UndoScope::SetBackground,
                        Mutation::SetBackground { source },
                    ),
                );
                None
            }
            None => Some(Notice::PasteboardEmpty),
        }
    }
}
