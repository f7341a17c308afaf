use crate::geometry::{DocPoint, Point, Vec2, trunc_to_i64};

/// Committed view state: where the canvas sits between gestures.
///
/// `steady_pan` is stored in document units and scaled by the zoom on
/// projection, so a pan feels uniform regardless of the current zoom level.
/// Serde-derived so a host can persist the view per session.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CanvasTransform {
    pub steady_pan: Vec2,
    pub steady_zoom: f64,
}

impl Default for CanvasTransform {
    fn default() -> Self {
        Self {
            steady_pan: Vec2::ZERO,
            steady_zoom: 1.0,
        }
    }
}

impl CanvasTransform {
    /// Fold a finished pan gesture's document-space translation into the
    /// steady state.
    pub fn commit_pan(&mut self, live_translation: Vec2) {
        self.steady_pan += live_translation;
    }

    /// Fold a finished canvas zoom gesture's magnification into the steady
    /// state, clamped to `range`.
    pub fn commit_zoom(&mut self, factor: f64, range: ZoomRange) {
        self.steady_zoom = range.clamp(self.steady_zoom * factor);
    }
}

/// Allowed committed zoom levels. Live (in-gesture) zoom is not clamped; the
/// clamp applies when a gesture or a viewport fit commits.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ZoomRange {
    pub min: f64,
    pub max: f64,
}

impl Default for ZoomRange {
    fn default() -> Self {
        Self {
            min: 0.05,
            max: 20.0,
        }
    }
}

impl ZoomRange {
    pub fn clamp(self, zoom: f64) -> f64 {
        zoom.clamp(self.min, self.max)
    }
}

/// A snapshot point-mapping between document space and screen space.
///
/// Built per query from the viewport center, the effective pan
/// (`steady + live`) and the effective zoom (`steady * live`). `zoom` must be
/// positive; callers keep it so via the fit guard and the commit clamp.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projection {
    pub center: Point,
    pub pan: Vec2,
    pub zoom: f64,
}

impl Projection {
    pub fn new(center: Point, pan: Vec2, zoom: f64) -> Self {
        debug_assert!(zoom > 0.0, "effective zoom must stay positive");
        Self { center, pan, zoom }
    }

    /// Project real-valued document coordinates to screen space.
    pub fn project(&self, doc: Vec2) -> Point {
        self.center + doc * self.zoom + self.pan * self.zoom
    }

    /// Project an integral document point to screen space.
    pub fn to_screen(&self, doc: DocPoint) -> Point {
        self.project(Vec2::new(doc.x as f64, doc.y as f64))
    }

    /// Map a screen point back to the integral document grid, truncating
    /// toward zero.
    ///
    /// Round-trips exactly with [`Projection::to_screen`] for integral
    /// points; at very large zoom the sub-unit remainder of an arbitrary
    /// screen point is discarded.
    pub fn to_document(&self, screen: Point) -> DocPoint {
        let v = (screen - self.pan * self.zoom - self.center) / self.zoom;
        DocPoint::new(trunc_to_i64(v.x), trunc_to_i64(v.y))
    }
}
