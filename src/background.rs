use crate::geometry::Size;

/// Natural size of a fetched background image.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ImageInfo {
    pub size: Size,
}

impl ImageInfo {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            size: Size::new(width, height),
        }
    }
}

/// Externally-driven background fetch status. The core reacts to transitions
/// only; it never polls and never retries a failed fetch.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum FetchStatus {
    Idle,
    Fetching,
    Succeeded(ImageInfo),
    Failed { url: String },
}

/// Events surfaced to the external alert/notification collaborator.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum Notice {
    BackgroundFetchFailed { url: String },
    PasteboardEmpty,
}
