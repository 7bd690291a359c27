//! Auto-scrolling launcher strip.
//!
//! ```text
//! ┌──────── first copy (canonical) ────────┬──────── second copy (clones) ──────┐
//! │ [A] [B] [C] [D]                        │ [A] [B] [C] [D]                    │
//! └────────────────────────────────────────┴────────────────────────────────────┘
//! offset ──────────────────────────────────►│ wraps back by half the scroll width
//! ```
use crate::browser::html;
use crate::engine::Animation;
use anyhow::{anyhow, Result};
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlElement};

pub mod entry;
pub mod scroll;
pub mod sequence;

pub use self::entry::GalleryEntry;
pub use self::scroll::ScrollLoop;
pub use self::sequence::{LoopSequence, Slot};

/// The scrollable box the carousel drives.
pub trait ScrollViewport {
    /// Full scrollable content width, both copies included.
    fn scroll_width(&self) -> f64;
    fn set_scroll_left(&self, offset: f64);
}

impl ScrollViewport for HtmlElement {
    fn scroll_width(&self) -> f64 {
        Element::scroll_width(self).into()
    }

    fn set_scroll_left(&self, offset: f64) {
        Element::set_scroll_left(self, offset as i32);
    }
}

pub struct Carousel<V: ScrollViewport> {
    viewport: V,
    scroll: ScrollLoop,
}

impl<V: ScrollViewport> Carousel<V> {
    pub fn new(viewport: V, speed: f64) -> Self {
        Carousel {
            viewport,
            scroll: ScrollLoop::new(speed),
        }
    }

    pub fn offset(&self) -> f64 {
        self.scroll.offset()
    }

    pub fn viewport(&self) -> &V {
        &self.viewport
    }
}

impl<V: ScrollViewport> Animation for Carousel<V> {
    fn frame(&mut self) {
        let half_length = self.viewport.scroll_width() / 2.0;
        let offset = self.scroll.advance(half_length);
        self.viewport.set_scroll_left(offset);
    }
}

/// Appends a deep copy of every tile in `container`, each marked
/// `data-clone="true"`. Returns the sequence as it now stands in the DOM.
pub fn build_loopable_sequence(container: &Element) -> Result<LoopSequence<Element>> {
    let children = container.children();
    let originals: Vec<Element> = (0..children.length())
        .filter_map(|index| children.item(index))
        .collect();
    let mut sequence = LoopSequence::build(&originals);

    for slot in sequence.slots_mut().iter_mut().filter(|slot| !slot.canonical) {
        let copy = slot
            .item
            .clone_node_with_deep(true)
            .map_err(|err| anyhow!("Could not clone tile : {:#?}", err))?
            .dyn_into::<Element>()
            .map_err(|node| anyhow!("Cloned tile is not an element : {:#?}", node))?;
        copy.set_attribute(html::CLONE_ATTRIBUTE, "true")
            .map_err(|err| anyhow!("Could not mark clone : {:#?}", err))?;
        container
            .append_child(&copy)
            .map_err(|err| anyhow!("Could not append clone : {:#?}", err))?;
        slot.item = copy;
    }

    Ok(sequence)
}

/// Launchable entries under `root` that are not loop copies.
pub fn canonical_entries(root: &Element) -> Vec<GalleryEntry> {
    canonical_launchers(root)
        .iter()
        .filter_map(GalleryEntry::from_element)
        .collect()
}

pub fn canonical_launchers(root: &Element) -> Vec<Element> {
    let Ok(nodes) = root.query_selector_all(html::LAUNCHER_SELECTOR) else {
        return Vec::new();
    };
    (0..nodes.length())
        .filter_map(|index| nodes.item(index))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .filter(|launcher| !entry::is_clone(launcher))
        .collect()
}
