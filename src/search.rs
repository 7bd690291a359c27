use crate::browser::{self, html};
use crate::gallery::GalleryEntry;
use anyhow::{anyhow, Result};
use std::cmp::Ordering;
use web_sys::{Event, HtmlButtonElement, HtmlElement, HtmlInputElement};

/// Entries whose title contains `query` (trimmed, case-insensitive), sorted
/// case-insensitively by title and capped at `limit`. Untitled entries never
/// match; an empty query matches nothing. Each match comes with its index
/// into `entries`.
pub fn suggest<'a>(
    query: &str,
    entries: &'a [GalleryEntry],
    limit: usize,
) -> Vec<(usize, &'a GalleryEntry)> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return Vec::new();
    }
    let mut matches: Vec<(usize, &GalleryEntry)> = entries
        .iter()
        .enumerate()
        .filter(|(_, entry)| {
            !entry.title.is_empty() && entry.title.to_lowercase().contains(&query)
        })
        .collect();
    matches.sort_by(|(_, a), (_, b)| compare_titles(&a.title, &b.title));
    matches.truncate(limit);
    matches
}

fn compare_titles(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}

/// The search input and its dropdown of suggestion buttons.
pub struct SearchBox {
    input: HtmlInputElement,
    suggestions: HtmlElement,
    entries: Vec<GalleryEntry>,
    limit: usize,
}

impl SearchBox {
    pub fn new(
        input: HtmlInputElement,
        suggestions: HtmlElement,
        entries: Vec<GalleryEntry>,
        limit: usize,
    ) -> Self {
        SearchBox {
            input,
            suggestions,
            entries,
            limit,
        }
    }

    /// Rebuilds the dropdown for `query`. Gallery tiles are never touched.
    pub fn update(&self, query: &str) -> Result<()> {
        self.suggestions.set_inner_html("");
        let matches = suggest(query, &self.entries, self.limit);
        if matches.is_empty() {
            return self.hide();
        }

        for (index, entry) in matches {
            let button: HtmlButtonElement = browser::create_element("button")?;
            button.set_type("button");
            button.set_class_name(html::SUGGESTION_CLASS);
            button.set_text_content(Some(entry.title.as_str()));
            button
                .set_attribute(html::ENTRY_INDEX_ATTRIBUTE, &index.to_string())
                .map_err(|err| anyhow!("Could not tag suggestion : {:#?}", err))?;
            self.suggestions
                .append_child(&button)
                .map_err(|err| anyhow!("Could not add suggestion : {:#?}", err))?;
        }
        self.show()
    }

    pub fn on_input(&self) -> Result<()> {
        self.update(&self.input.value())
    }

    /// The entry behind a clicked suggestion button; hides the dropdown and
    /// blurs the input on the way.
    pub fn on_suggestion_click(&self, event: &Event) -> Result<Option<GalleryEntry>> {
        let selector = format!(".{}", html::SUGGESTION_CLASS);
        let Some(button) = browser::closest(event.target(), &selector) else {
            return Ok(None);
        };
        let entry = button
            .get_attribute(html::ENTRY_INDEX_ATTRIBUTE)
            .and_then(|index| index.parse::<usize>().ok())
            .and_then(|index| self.entries.get(index))
            .cloned();
        self.hide()?;
        self.input
            .blur()
            .map_err(|err| anyhow!("Could not blur search : {:#?}", err))?;
        Ok(entry)
    }

    pub fn show(&self) -> Result<()> {
        browser::set_style(&self.suggestions, &[("display", "block")])
    }

    pub fn hide(&self) -> Result<()> {
        browser::set_style(&self.suggestions, &[("display", "none")])
    }
}
