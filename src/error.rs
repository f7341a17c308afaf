pub type GlyphboardResult<T> = Result<T, GlyphboardError>;

#[derive(thiserror::Error, Debug)]
pub enum GlyphboardError {
    #[error("validation error: {0}")]
    Validation(String),

    #[error("gesture error: {0}")]
    Gesture(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl GlyphboardError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn gesture(msg: impl Into<String>) -> Self {
        Self::Gesture(msg.into())
    }
}
