use crate::geometry::{Point, Size};
use crate::transform::{CanvasTransform, ZoomRange};

/// Current viewport geometry, queried per transform computation.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Viewport {
    pub size: Size,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            size: Size::new(width, height),
        }
    }

    /// Local-frame center: the screen point document origin projects to at
    /// identity pan/zoom.
    pub fn center(&self) -> Point {
        Point::new(self.size.width / 2.0, self.size.height / 2.0)
    }
}

/// Compute the steady state that fits `image` into `viewport`: zoom to the
/// tighter axis, pan reset to zero.
///
/// Returns `None` when any dimension is non-positive (image not loaded yet,
/// or viewport collapsed) — the caller keeps its prior steady state, which is
/// never corrupted to NaN or infinity.
pub fn fit_transform(image: Size, viewport: Size, range: ZoomRange) -> Option<CanvasTransform> {
    if image.width <= 0.0 || image.height <= 0.0 || viewport.width <= 0.0 || viewport.height <= 0.0
    {
        return None;
    }
    let h_zoom = viewport.width / image.width;
    let v_zoom = viewport.height / image.height;
    Some(CanvasTransform {
        steady_pan: kurbo::Vec2::ZERO,
        steady_zoom: range.clamp(h_zoom.min(v_zoom)),
    })
}
