use crate::document::{BackgroundSource, GlyphId};
use crate::geometry::{DocPoint, DocVec};

/// A discrete edit to the external document's authoritative state.
///
/// Mutations are only ever produced at gesture end (or from an explicit
/// command like remove-selected), never per intermediate gesture sample.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum Mutation {
    MoveGlyph { id: GlyphId, by: DocVec },
    ScaleGlyph { id: GlyphId, factor: f64 },
    AddGlyph { text: String, at: DocPoint, size: f64 },
    RemoveGlyphs { ids: Vec<GlyphId> },
    SetBackground { source: BackgroundSource },
}

/// The user action a batch belongs to, for the external undo collaborator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum UndoScope {
    Move,
    Scale,
    AddGlyph,
    RemoveGlyphs,
    SetBackground,
}

impl UndoScope {
    pub fn label(self) -> &'static str {
        match self {
            Self::Move => "Move",
            Self::Scale => "Scale",
            Self::AddGlyph => "Add Glyph",
            Self::RemoveGlyphs => "Remove Glyphs",
            Self::SetBackground => "Set Background",
        }
    }
}

/// All mutations produced by one gesture end, grouped as a single undoable
/// action. Dragging three selected glyphs is one batch of three moves, not
/// three actions.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct MutationBatch {
    pub scope: UndoScope,
    pub mutations: Vec<Mutation>,
}

impl MutationBatch {
    pub fn new(scope: UndoScope, mutations: Vec<Mutation>) -> Self {
        Self { scope, mutations }
    }

    pub fn single(scope: UndoScope, mutation: Mutation) -> Self {
        Self::new(scope, vec![mutation])
    }

    pub fn is_empty(&self) -> bool {
        self.mutations.is_empty()
    }
}

/// The document-mutation interface this core consumes.
///
/// Each call is synchronous and applies the whole batch before returning;
/// the implementor owns persistence and undo recording. Calls are never
/// auto-retried by the core.
pub trait DocumentSink {
    fn commit(&mut self, batch: MutationBatch);
}

/// Flush one batch into the sink. Empty batches are dropped here so a
/// no-op gesture end never reaches the document or its undo log.
#[tracing::instrument(skip(sink, batch), fields(scope = batch.scope.label(), len = batch.mutations.len()))]
pub fn dispatch(sink: &mut dyn DocumentSink, batch: MutationBatch) {
    if batch.is_empty() {
        tracing::debug!("dropping empty mutation batch");
        return;
    }
    sink.commit(batch);
}
