#![forbid(unsafe_code)]

pub mod background;
pub mod document;
pub mod dropin;
pub mod error;
pub mod geometry;
pub mod gesture;
pub mod mutation;
pub mod selection;
pub mod surface;
pub mod transform;
pub mod viewport;

pub use background::{FetchStatus, ImageInfo, Notice};
pub use document::{BackgroundSource, Document, Glyph, GlyphId};
pub use dropin::{DropPayload, Pasteboard, ResolvedDrop};
pub use error::{GlyphboardError, GlyphboardResult};
pub use geometry::{DocPoint, DocVec, Point, Size, Vec2};
pub use gesture::{DragOutcome, GestureResolver, MagnifyOutcome};
pub use mutation::{DocumentSink, Mutation, MutationBatch, UndoScope};
pub use selection::SelectionSet;
pub use surface::{Surface, SurfaceConfig, TapTarget};
pub use transform::{CanvasTransform, Projection, ZoomRange};
pub use viewport::{Viewport, fit_transform};
