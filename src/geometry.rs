pub use kurbo::{Point, Size, Vec2};

/// Integral glyph position in document space.
///
/// Document coordinates are centered: `(0, 0)` projects to the viewport
/// center at identity pan/zoom. Persisted positions are always integral;
/// screen-space values only become a `DocPoint` through
/// [`trunc_to_i64`]-based conversion.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize, Default,
)]
pub struct DocPoint {
    pub x: i64,
    pub y: i64,
}

impl DocPoint {
    pub const ZERO: DocPoint = DocPoint { x: 0, y: 0 };

    pub fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    /// Offset by an integral document-space delta using saturating arithmetic.
    pub fn offset(self, by: DocVec) -> Self {
        Self {
            x: self.x.saturating_add(by.dx),
            y: self.y.saturating_add(by.dy),
        }
    }
}

/// Integral translation delta in document space.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize, Default,
)]
pub struct DocVec {
    pub dx: i64,
    pub dy: i64,
}

impl DocVec {
    pub const ZERO: DocVec = DocVec { dx: 0, dy: 0 };

    pub fn new(dx: i64, dy: i64) -> Self {
        Self { dx, dy }
    }

    /// Truncate a real-valued document-space vector toward zero.
    pub fn from_vec2_trunc(v: Vec2) -> Self {
        Self {
            dx: trunc_to_i64(v.x),
            dy: trunc_to_i64(v.y),
        }
    }
}

/// The one truncation rule of the crate: real to integral document units,
/// toward zero. Every screen-to-document conversion goes through here so the
/// rounding behavior cannot drift between call sites.
pub fn trunc_to_i64(v: f64) -> i64 {
    v.trunc() as i64
}
