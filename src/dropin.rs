use crate::document::BackgroundSource;

/// One payload offered by the platform's drop/paste providers.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum DropPayload {
    Url(String),
    Image(Vec<u8>),
    Text(String),
}

/// What a recognized drop turns into.
#[derive(Clone, Debug, PartialEq)]
pub enum ResolvedDrop {
    Background(BackgroundSource),
    Glyph(char),
}

/// Resolve a provider list by payload-type priority: URL, then image bytes,
/// then text. First match wins; an unrecognized list resolves to `None` and
/// the drop is reported unhandled.
pub fn resolve(payloads: &[DropPayload]) -> Option<ResolvedDrop> {
    for p in payloads {
        if let DropPayload::Url(url) = p {
            return Some(ResolvedDrop::Background(BackgroundSource::Url(url.clone())));
        }
    }
    for p in payloads {
        if let DropPayload::Image(bytes) = p {
            return Some(ResolvedDrop::Background(BackgroundSource::ImageData(
                bytes.clone(),
            )));
        }
    }
    for p in payloads {
        if let DropPayload::Text(text) = p
            && let Some(c) = glyph_char(text)
        {
            return Some(ResolvedDrop::Glyph(c));
        }
    }
    None
}

/// Snapshot of the platform pasteboard, taken by the host when the user asks
/// to paste a background.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Pasteboard {
    pub image_data: Option<Vec<u8>>,
    pub image_url: Option<String>,
}

/// Raw image bytes win over a URL, mirroring drop resolution with the URL
/// step absent from pasteboards that carry both.
pub fn resolve_paste(pasteboard: &Pasteboard) -> Option<BackgroundSource> {
    if let Some(data) = &pasteboard.image_data {
        return Some(BackgroundSource::ImageData(data.clone()));
    }
    pasteboard
        .image_url
        .as_ref()
        .map(|url| BackgroundSource::Url(url.clone()))
}

/// Accept the first character of a dropped string as a glyph payload when it
/// plausibly is one. The gate is "non-ASCII": it admits all emoji and rejects
/// plain typed text, without pulling Unicode property tables into the crate.
fn glyph_char(text: &str) -> Option<char> {
    let c = text.chars().next()?;
    (!c.is_ascii()).then_some(c)
}
