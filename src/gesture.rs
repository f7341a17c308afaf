use crate::document::GlyphId;
use crate::error::{GlyphboardError, GlyphboardResult};
use crate::geometry::{DocVec, Vec2};
use crate::selection::SelectionSet;

/// Live state for the three independent gesture channels.
///
/// Each channel is written by exactly one continuous gesture stream; pan and
/// magnify may be active at the same time (two-finger drag) without touching
/// each other's state. Live values exist only while a gesture is in flight
/// and reset to identity on end or cancel; nothing here ever mutates the
/// document — channel outcomes are returned to the caller, which folds them
/// into steady state or dispatches a mutation batch.
#[derive(Clone, Debug, Default)]
pub struct GestureResolver {
    pan: Option<Vec2>,
    magnify: Magnify,
    drag: Drag,
}

/// Magnify scope is decided once at gesture start and threaded through all
/// subsequent samples, so a mid-gesture selection change cannot retarget the
/// gesture.
#[derive(Clone, Debug, Default)]
enum Magnify {
    #[default]
    Idle,
    Canvas {
        live: f64,
    },
    Selection {
        live: f64,
        ids: Vec<GlyphId>,
    },
}

#[derive(Clone, Debug, Default)]
enum Drag {
    #[default]
    Idle,
    Active {
        live: Vec2,
        ids: Vec<GlyphId>,
    },
}

/// Terminal result of a magnify gesture.
#[derive(Clone, Debug, PartialEq)]
pub enum MagnifyOutcome {
    /// Fold `factor` into the canvas steady zoom.
    CanvasZoom { factor: f64 },
    /// Scale every captured glyph by `factor`; canvas zoom untouched.
    ScaleSelection { ids: Vec<GlyphId>, factor: f64 },
}

/// Terminal result of a selection drag: one identical integral delta per
/// captured glyph.
#[derive(Clone, Debug, PartialEq)]
pub struct DragOutcome {
    pub ids: Vec<GlyphId>,
    pub by: DocVec,
}

impl GestureResolver {
    pub fn new() -> Self {
        Self::default()
    }

    // --- pan channel (always canvas-scoped) ---

    pub fn pan_began(&mut self) -> GlyphboardResult<()> {
        if self.pan.is_some() {
            return Err(GlyphboardError::gesture("pan gesture already active"));
        }
        self.pan = Some(Vec2::ZERO);
        Ok(())
    }

    /// Record the latest cumulative screen-space translation. Stored in
    /// document units (`translation / zoom`) so panning feels uniform at any
    /// zoom level.
    pub fn pan_changed(&mut self, translation: Vec2, zoom: f64) {
        match &mut self.pan {
            Some(live) => *live = translation / zoom,
            None => tracing::debug!("pan sample without active gesture, ignored"),
        }
    }

    /// End the pan, returning the document-space translation to fold into
    /// the steady pan. `None` when no pan was active (cancelled earlier).
    pub fn pan_ended(&mut self, translation: Vec2, zoom: f64) -> Option<Vec2> {
        self.pan.take().map(|_| translation / zoom)
    }

    pub fn pan_cancelled(&mut self) {
        self.pan = None;
    }

    /// Current live pan contribution in document units; zero when idle.
    pub fn live_pan(&self) -> Vec2 {
        self.pan.unwrap_or(Vec2::ZERO)
    }

    // --- magnify channel ---

    /// Begin a magnify gesture, deciding its scope from the selection as it
    /// stands right now: empty selection zooms the canvas, otherwise the
    /// captured glyphs scale and the canvas is untouched.
    pub fn magnify_began(&mut self, selection: &SelectionSet) -> GlyphboardResult<()> {
        if !matches!(self.magnify, Magnify::Idle) {
            return Err(GlyphboardError::gesture("magnify gesture already active"));
        }
        self.magnify = if selection.is_empty() {
            Magnify::Canvas { live: 1.0 }
        } else {
            Magnify::Selection {
                live: 1.0,
                ids: selection.captured(),
            }
        };
        Ok(())
    }

    pub fn magnify_changed(&mut self, factor: f64) {
        match &mut self.magnify {
            Magnify::Canvas { live } | Magnify::Selection { live, .. } => *live = factor,
            Magnify::Idle => tracing::debug!("magnify sample without active gesture, ignored"),
        }
    }

    pub fn magnify_ended(&mut self, factor: f64) -> Option<MagnifyOutcome> {
        match std::mem::take(&mut self.magnify) {
            Magnify::Idle => None,
            Magnify::Canvas { .. } => Some(MagnifyOutcome::CanvasZoom { factor }),
            Magnify::Selection { ids, .. } => Some(MagnifyOutcome::ScaleSelection { ids, factor }),
        }
    }

    pub fn magnify_cancelled(&mut self) {
        self.magnify = Magnify::Idle;
    }

    /// Live canvas zoom multiplier; 1 unless a canvas-scoped magnify is in
    /// flight. Selection-scoped magnification never leaks into this.
    pub fn live_canvas_zoom(&self) -> f64 {
        match &self.magnify {
            Magnify::Canvas { live } => *live,
            _ => 1.0,
        }
    }

    /// Live size multiplier for one glyph; 1 unless a selection-scoped
    /// magnify is in flight and the glyph was captured at its start.
    pub fn live_glyph_zoom(&self, id: GlyphId) -> f64 {
        match &self.magnify {
            Magnify::Selection { live, ids } if ids.contains(&id) => *live,
            _ => 1.0,
        }
    }

    // --- selection drag channel ---

    /// Begin dragging the selected glyphs. Legal only with a non-empty
    /// selection; the membership is captured here and survives any external
    /// selection change for the rest of the gesture.
    pub fn drag_began(&mut self, selection: &SelectionSet) -> GlyphboardResult<()> {
        if !matches!(self.drag, Drag::Idle) {
            return Err(GlyphboardError::gesture("selection drag already active"));
        }
        if selection.is_empty() {
            return Err(GlyphboardError::gesture(
                "selection drag requires a non-empty selection",
            ));
        }
        self.drag = Drag::Active {
            live: Vec2::ZERO,
            ids: selection.captured(),
        };
        Ok(())
    }

    pub fn drag_changed(&mut self, translation: Vec2, zoom: f64) {
        match &mut self.drag {
            Drag::Active { live, .. } => *live = translation / zoom,
            Drag::Idle => tracing::debug!("drag sample without active gesture, ignored"),
        }
    }

    /// End the drag, producing one integral document-space delta for every
    /// captured glyph (truncated toward zero). `None` when no drag was
    /// active.
    pub fn drag_ended(&mut self, translation: Vec2, zoom: f64) -> Option<DragOutcome> {
        match std::mem::take(&mut self.drag) {
            Drag::Idle => None,
            Drag::Active { ids, .. } => Some(DragOutcome {
                ids,
                by: DocVec::from_vec2_trunc(translation / zoom),
            }),
        }
    }

    pub fn drag_cancelled(&mut self) {
        self.drag = Drag::Idle;
    }

    /// Live drag offset for one glyph, in document units; `None` unless a
    /// drag is in flight and the glyph was captured at its start.
    pub fn live_drag_offset(&self, id: GlyphId) -> Option<Vec2> {
        match &self.drag {
            Drag::Active { live, ids } if ids.contains(&id) => Some(*live),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn selection_of(ids: &[u64]) -> SelectionSet {
        let mut sel = SelectionSet::new();
        for &id in ids {
            sel.toggle(GlyphId(id));
        }
        sel
    }

    #[test]
    fn pan_folds_screen_translation_at_zoom() {
        let mut g = GestureResolver::new();
        g.pan_began().unwrap();
        g.pan_changed(Vec2::new(10.0, -6.0), 2.0);
        assert_eq!(g.live_pan(), Vec2::new(5.0, -3.0));
        let folded = g.pan_ended(Vec2::new(10.0, -6.0), 2.0).unwrap();
        assert_eq!(folded, Vec2::new(5.0, -3.0));
        assert_eq!(g.live_pan(), Vec2::ZERO);
    }

    #[test]
    fn cancelled_pan_produces_nothing() {
        let mut g = GestureResolver::new();
        g.pan_began().unwrap();
        g.pan_changed(Vec2::new(50.0, 50.0), 1.0);
        g.pan_cancelled();
        assert_eq!(g.live_pan(), Vec2::ZERO);
        assert!(g.pan_ended(Vec2::new(50.0, 50.0), 1.0).is_none());
    }

    #[test]
    fn magnify_scope_is_decided_at_begin() {
        let mut g = GestureResolver::new();
        let mut sel = selection_of(&[1, 2]);
        g.magnify_began(&sel).unwrap();

        // Selection mutations mid-gesture do not retarget the gesture.
        sel.clear();
        g.magnify_changed(1.8);
        assert_eq!(g.live_glyph_zoom(GlyphId(1)), 1.8);
        assert_eq!(g.live_glyph_zoom(GlyphId(9)), 1.0);
        assert_eq!(g.live_canvas_zoom(), 1.0);

        match g.magnify_ended(1.8).unwrap() {
            MagnifyOutcome::ScaleSelection { ids, factor } => {
                assert_eq!(ids, vec![GlyphId(1), GlyphId(2)]);
                assert_eq!(factor, 1.8);
            }
            other => panic!("expected selection scope, got {other:?}"),
        }
    }

    #[test]
    fn empty_selection_magnify_targets_canvas() {
        let mut g = GestureResolver::new();
        g.magnify_began(&SelectionSet::new()).unwrap();
        g.magnify_changed(0.5);
        assert_eq!(g.live_canvas_zoom(), 0.5);
        assert_eq!(
            g.magnify_ended(0.5).unwrap(),
            MagnifyOutcome::CanvasZoom { factor: 0.5 }
        );
        assert_eq!(g.live_canvas_zoom(), 1.0);
    }

    #[test]
    fn drag_requires_non_empty_selection() {
        let mut g = GestureResolver::new();
        assert!(g.drag_began(&SelectionSet::new()).is_err());
        assert!(g.drag_began(&selection_of(&[3])).is_ok());
    }

    #[test]
    fn drag_outcome_truncates_toward_zero() {
        let mut g = GestureResolver::new();
        g.drag_began(&selection_of(&[1, 2])).unwrap();
        g.drag_changed(Vec2::new(7.0, -7.0), 2.0);
        let out = g.drag_ended(Vec2::new(7.0, -7.0), 2.0).unwrap();
        assert_eq!(out.ids, vec![GlyphId(1), GlyphId(2)]);
        assert_eq!(out.by, DocVec::new(3, -3));
    }

    #[test]
    fn double_begin_is_a_gesture_error() {
        let mut g = GestureResolver::new();
        g.pan_began().unwrap();
        assert!(g.pan_began().is_err());
        g.magnify_began(&SelectionSet::new()).unwrap();
        assert!(g.magnify_began(&SelectionSet::new()).is_err());
    }

    #[test]
    fn pan_and_magnify_channels_are_independent() {
        let mut g = GestureResolver::new();
        g.pan_began().unwrap();
        g.magnify_began(&SelectionSet::new()).unwrap();
        g.pan_changed(Vec2::new(4.0, 0.0), 2.0);
        g.magnify_changed(2.0);
        assert_eq!(g.live_pan(), Vec2::new(2.0, 0.0));
        assert_eq!(g.live_canvas_zoom(), 2.0);
        g.magnify_cancelled();
        assert_eq!(g.live_pan(), Vec2::new(2.0, 0.0));
    }
}
