use glyphboard::{
    DocPoint, Document, DocumentSink, Mutation, MutationBatch, Surface, SurfaceConfig, TapTarget,
    UndoScope, Vec2, Viewport,
};

#[derive(Default)]
struct RecordingSink {
    batches: Vec<MutationBatch>,
}

impl DocumentSink for RecordingSink {
    fn commit(&mut self, batch: MutationBatch) {
        self.batches.push(batch);
    }
}

fn viewport() -> Viewport {
    Viewport::new(640.0, 480.0)
}

fn surface_with_glyphs(doc: &mut Document, n: u64) -> Surface {
    for i in 0..n {
        doc.add_glyph("🎃", DocPoint::new(i as i64 * 10, 0), 40.0);
    }
    Surface::new(SurfaceConfig::default())
}

#[test]
fn canvas_zoom_multiplies_steady_zoom() {
    let mut surface = Surface::new(SurfaceConfig::default());
    let mut sink = RecordingSink::default();

    surface.magnify_began().unwrap();
    surface.magnify_changed(1.5);
    surface.magnify_ended(1.5, &mut sink);

    assert_eq!(surface.transform().steady_zoom, 1.5);
    assert!(sink.batches.is_empty(), "canvas zoom is not a document edit");

    surface.magnify_began().unwrap();
    surface.magnify_ended(2.0, &mut sink);
    assert_eq!(surface.transform().steady_zoom, 3.0);
}

#[test]
fn selection_magnify_scales_each_selected_glyph_once() {
    let mut doc = Document::new();
    let mut surface = surface_with_glyphs(&mut doc, 3);
    let ids: Vec<_> = doc.glyphs().iter().map(|g| g.id).collect();
    let mut sink = RecordingSink::default();

    surface.tap(TapTarget::Glyph(ids[0]));
    surface.tap(TapTarget::Glyph(ids[2]));

    let zoom_before = surface.transform().steady_zoom;
    surface.magnify_began().unwrap();
    surface.magnify_changed(1.3);
    surface.magnify_ended(1.3, &mut sink);

    assert_eq!(surface.transform().steady_zoom, zoom_before);
    assert_eq!(sink.batches.len(), 1, "one undoable batch per gesture end");
    let batch = &sink.batches[0];
    assert_eq!(batch.scope, UndoScope::Scale);
    assert_eq!(batch.mutations.len(), 2);
    for m in &batch.mutations {
        match m {
            Mutation::ScaleGlyph { id, factor } => {
                assert!(*id == ids[0] || *id == ids[2]);
                assert_eq!(*factor, 1.3);
            }
            other => panic!("unexpected mutation {other:?}"),
        }
    }
}

#[test]
fn selection_drag_moves_each_selected_glyph_by_the_same_delta() {
    let mut doc = Document::new();
    let mut surface = surface_with_glyphs(&mut doc, 3);
    let ids: Vec<_> = doc.glyphs().iter().map(|g| g.id).collect();

    // Zoom to 2x before selecting anything, so the magnify is canvas-scoped
    // and the later screen translation is halved in document units.
    let mut sink = RecordingSink::default();
    surface.magnify_began().unwrap();
    surface.magnify_ended(2.0, &mut sink);
    assert!(sink.batches.is_empty(), "canvas zoom is not a document edit");
    assert_eq!(surface.transform().steady_zoom, 2.0);

    surface.tap(TapTarget::Glyph(ids[0]));
    surface.tap(TapTarget::Glyph(ids[1]));

    surface.drag_began().unwrap();
    surface.drag_changed(Vec2::new(11.0, -7.0));
    surface.drag_ended(Vec2::new(11.0, -7.0), &mut doc);

    // 11/2 = 5.5 -> 5, -7/2 = -3.5 -> -3 (toward zero).
    assert_eq!(doc.glyph(ids[0]).unwrap().position, DocPoint::new(5, -3));
    assert_eq!(doc.glyph(ids[1]).unwrap().position, DocPoint::new(15, -3));
    // Unselected glyph untouched.
    assert_eq!(doc.glyph(ids[2]).unwrap().position, DocPoint::new(20, 0));
}

#[test]
fn cancelled_gestures_commit_nothing() {
    let mut doc = Document::new();
    let mut surface = surface_with_glyphs(&mut doc, 1);
    let id = doc.glyphs()[0].id;
    let mut sink = RecordingSink::default();

    surface.tap(TapTarget::Glyph(id));
    let before = *surface.transform();

    surface.drag_began().unwrap();
    surface.drag_changed(Vec2::new(100.0, 100.0));
    surface.drag_cancelled();

    surface.pan_began().unwrap();
    surface.pan_changed(Vec2::new(50.0, 0.0));
    surface.pan_cancelled();

    surface.magnify_began().unwrap();
    surface.magnify_changed(3.0);
    surface.magnify_cancelled();

    assert_eq!(surface.transform(), &before);
    assert!(sink.batches.is_empty());
    assert_eq!(doc.glyphs()[0].position, DocPoint::ZERO);
    // And the next drag still works from a clean slate.
    surface.drag_began().unwrap();
    surface.drag_ended(Vec2::new(4.0, 0.0), &mut sink);
    assert_eq!(sink.batches.len(), 1);
}

#[test]
fn pan_folds_into_steady_state_without_mutations() {
    let mut surface = Surface::new(SurfaceConfig::default());

    surface.pan_began().unwrap();
    surface.pan_changed(Vec2::new(30.0, 12.0));
    surface.pan_ended(Vec2::new(30.0, 12.0));

    assert_eq!(surface.transform().steady_pan, Vec2::new(30.0, 12.0));
    assert_eq!(surface.transform().steady_zoom, 1.0);
}

#[test]
fn simultaneous_pan_and_zoom_do_not_interfere() {
    let mut surface = Surface::new(SurfaceConfig::default());
    let mut sink = RecordingSink::default();

    surface.pan_began().unwrap();
    surface.magnify_began().unwrap();

    surface.magnify_changed(2.0);
    // Pan samples during a live zoom divide by the effective zoom.
    surface.pan_changed(Vec2::new(8.0, 0.0));

    let proj = surface.projection(viewport());
    assert_eq!(proj.zoom, 2.0);
    assert_eq!(proj.pan, Vec2::new(4.0, 0.0));

    surface.magnify_ended(2.0, &mut sink);
    surface.pan_ended(Vec2::new(8.0, 0.0));

    assert_eq!(surface.transform().steady_zoom, 2.0);
    assert_eq!(surface.transform().steady_pan, Vec2::new(4.0, 0.0));
}

#[test]
fn zero_delta_drag_is_an_undo_log_no_op() {
    let mut doc = Document::new();
    let mut surface = surface_with_glyphs(&mut doc, 1);
    let id = doc.glyphs()[0].id;
    let mut sink = RecordingSink::default();

    surface.tap(TapTarget::Glyph(id));
    surface.drag_began().unwrap();
    // Sub-unit movement truncates to a zero document delta.
    surface.drag_ended(Vec2::new(0.9, -0.9), &mut sink);

    assert!(sink.batches.is_empty());
}

#[test]
fn mid_gesture_deselection_does_not_retarget_the_drag() {
    let mut doc = Document::new();
    let mut surface = surface_with_glyphs(&mut doc, 2);
    let ids: Vec<_> = doc.glyphs().iter().map(|g| g.id).collect();

    surface.tap(TapTarget::Glyph(ids[0]));
    surface.drag_began().unwrap();
    // External clear mid-gesture: the captured snapshot still commits.
    surface.tap(TapTarget::Canvas);
    surface.drag_changed(Vec2::new(6.0, 0.0));
    surface.drag_ended(Vec2::new(6.0, 0.0), &mut doc);

    assert_eq!(doc.glyph(ids[0]).unwrap().position, DocPoint::new(6, 0));
    assert_eq!(doc.glyph(ids[1]).unwrap().position, DocPoint::new(10, 0));
}

#[test]
fn tap_routing_is_mutually_exclusive() {
    let mut doc = Document::new();
    let mut surface = surface_with_glyphs(&mut doc, 2);
    let ids: Vec<_> = doc.glyphs().iter().map(|g| g.id).collect();

    surface.tap(TapTarget::Glyph(ids[0]));
    surface.tap(TapTarget::Glyph(ids[1]));
    assert_eq!(surface.selection().len(), 2);

    // A tap on a glyph only toggles that glyph, never clears the rest.
    surface.tap(TapTarget::Glyph(ids[0]));
    assert!(!surface.is_selected(ids[0]));
    assert!(surface.is_selected(ids[1]));

    surface.tap(TapTarget::Canvas);
    assert!(surface.selection().is_empty());
}
