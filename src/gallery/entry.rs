use crate::browser::html;
use web_sys::Element;

/// One playable item as the page shows it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalleryEntry {
    pub title: String,
    pub url: String,
    pub thumbnail: Option<String>,
}

impl GalleryEntry {
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        GalleryEntry {
            title: title.into(),
            url: url.into(),
            thumbnail: None,
        }
    }

    /// Reads a `.game-launcher` tile. Tiles without a `data-url` can't be
    /// launched and yield `None`.
    pub fn from_element(launcher: &Element) -> Option<Self> {
        let url = launcher
            .get_attribute(html::URL_ATTRIBUTE)
            .filter(|url| !url.trim().is_empty())?;
        let thumbnail = launcher
            .query_selector("img")
            .ok()
            .flatten()
            .and_then(|image| image.get_attribute("src"));
        Some(GalleryEntry {
            title: title_of(launcher),
            url,
            thumbnail,
        })
    }

    /// Title used for labels and file names; never empty.
    pub fn display_title(&self) -> &str {
        if self.title.is_empty() {
            "Game"
        } else {
            &self.title
        }
    }
}

/// Overlay title, else the cover label, else empty.
pub fn title_of(launcher: &Element) -> String {
    [html::TITLE_SELECTOR, html::COVER_LABEL_SELECTOR]
        .iter()
        .filter_map(|selector| launcher.query_selector(selector).ok().flatten())
        .filter_map(|label| label.text_content())
        .map(|text| text.trim().to_string())
        .find(|text| !text.is_empty())
        .unwrap_or_default()
}

pub fn is_clone(launcher: &Element) -> bool {
    launcher.get_attribute(html::CLONE_ATTRIBUTE).as_deref() == Some("true")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_title_falls_back() {
        assert_eq!(GalleryEntry::new("", "a.html").display_title(), "Game");
        assert_eq!(GalleryEntry::new("Tetris", "t.html").display_title(), "Tetris");
    }
}
