use crate::error::{GlyphboardError, GlyphboardResult};
use crate::geometry::{DocPoint, DocVec};
use crate::mutation::{DocumentSink, Mutation, MutationBatch};

/// Stable identity of a glyph within one document.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    serde::Serialize,
    serde::Deserialize,
)]
pub struct GlyphId(pub u64);

/// A movable, scalable text glyph overlaid on the background.
///
/// Position is integral document space; `size` is the base point size before
/// any zoom is applied.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Glyph {
    pub id: GlyphId,
    pub text: String,
    pub position: DocPoint,
    pub size: f64,
}

/// Where the background image comes from.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum BackgroundSource {
    Url(String),
    ImageData(Vec<u8>),
}

/// An in-memory authoritative document: the glyph list plus the background
/// choice.
///
/// The core engine only writes to it through [`DocumentSink`]; reads are
/// unrestricted. Hosts with their own storage implement `DocumentSink`
/// directly and skip this type.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Document {
    glyphs: Vec<Glyph>,
    background: Option<BackgroundSource>,
    next_id: u64,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn glyphs(&self) -> &[Glyph] {
        &self.glyphs
    }

    pub fn glyph(&self, id: GlyphId) -> Option<&Glyph> {
        self.glyphs.iter().find(|g| g.id == id)
    }

    pub fn background(&self) -> Option<&BackgroundSource> {
        self.background.as_ref()
    }

    pub fn add_glyph(&mut self, text: impl Into<String>, at: DocPoint, size: f64) -> GlyphId {
        let id = GlyphId(self.next_id);
        self.next_id += 1;
        self.glyphs.push(Glyph {
            id,
            text: text.into(),
            position: at,
            size,
        });
        id
    }

    pub fn move_glyph(&mut self, id: GlyphId, by: DocVec) {
        if let Some(glyph) = self.glyphs.iter_mut().find(|g| g.id == id) {
            glyph.position = glyph.position.offset(by);
        }
    }

    pub fn scale_glyph(&mut self, id: GlyphId, factor: f64) {
        if let Some(glyph) = self.glyphs.iter_mut().find(|g| g.id == id) {
            glyph.size *= factor;
        }
    }

    pub fn remove_glyphs(&mut self, ids: &[GlyphId]) {
        self.glyphs.retain(|g| !ids.contains(&g.id));
    }

    pub fn set_background(&mut self, source: BackgroundSource) {
        self.background = Some(source);
    }

    pub fn validate(&self) -> GlyphboardResult<()> {
        for glyph in &self.glyphs {
            if glyph.text.is_empty() {
                return Err(GlyphboardError::validation(format!(
                    "glyph {} has empty text",
                    glyph.id.0
                )));
            }
            if !(glyph.size > 0.0) {
                return Err(GlyphboardError::validation(format!(
                    "glyph {} size must be > 0",
                    glyph.id.0
                )));
            }
        }
        Ok(())
    }
}

impl DocumentSink for Document {
    fn commit(&mut self, batch: MutationBatch) {
        tracing::debug!(
            scope = batch.scope.label(),
            len = batch.mutations.len(),
            "applying mutation batch"
        );
        for mutation in batch.mutations {
            match mutation {
                Mutation::MoveGlyph { id, by } => self.move_glyph(id, by),
                Mutation::ScaleGlyph { id, factor } => self.scale_glyph(id, factor),
                Mutation::AddGlyph { text, at, size } => {
                    self.add_glyph(text, at, size);
                }
                Mutation::RemoveGlyphs { ids } => self.remove_glyphs(&ids),
                Mutation::SetBackground { source } => self.set_background(source),
            }
        }
    }
}
