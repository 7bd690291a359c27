use crate::browser::{self, html, Interval, Listener};
use crate::config::Config;
use crate::engine::{AnimationLoop, LoopHandle, Renderer};
use crate::gallery::{self, Carousel};
use crate::launch::Launcher;
use crate::meta::MetaLine;
use crate::search::SearchBox;
use crate::snow::{Density, ParticleField};
use crate::tooltip::Tooltip;
use anyhow::{anyhow, Result};
use std::cell::RefCell;
use std::rc::Rc;
use web_sys::{Element, Event, EventTarget, HtmlCanvasElement, HtmlElement, HtmlInputElement};

/// TABLE
/// ┌──────────────────────────── Page Overview ──────────────────────────────┐
/// │                                                                         │
/// │   requestAnimationFrame ──┬──► ParticleField::frame  (#snowCanvas)      │
/// │                           └──► Carousel::frame       (#games-container) │
/// │                                                                         │
/// │   tile click / suggestion ───► Launcher ───► LaunchSession              │
/// │   mouseover / mousemove ─────► Tooltip                                  │
/// │   input / blur ──────────────► SearchBox                                │
/// │   setInterval ───────────────► MetaLine                                 │
/// │                                                                         │
/// └─────────────────────────────────────────────────────────────────────────┘
///
/// Every element is optional: whatever is missing from the document just
/// switches its feature off. Dropping the page stops both loops, clears the
/// clock, removes every listener and closes an open game.
pub struct Page {
    loops: Vec<LoopHandle>,
    listeners: Vec<Listener>,
    clock: Option<Interval>,
    launcher: Rc<Launcher>,
}

impl Page {
    pub async fn start() -> Result<Page> {
        let config = Config::load(html::CONFIG_PATH).await;
        Page::mount(&config)
    }

    pub fn mount(config: &Config) -> Result<Page> {
        let document = browser::document()?;
        let body = browser::body()?;
        let root = document
            .document_element()
            .ok_or_else(|| anyhow!("No document element"))?;

        let gallery = browser::element_by_id::<HtmlElement>(html::GALLERY_ID)?;
        let listing = browser::element_by_id::<HtmlElement>(html::LISTING_ID)?;
        let wrapper = browser::element_by_id::<HtmlElement>(html::GALLERY_WRAPPER_ID)?;

        let cover = wrapper.iter().chain(listing.iter()).cloned().collect();
        let launcher = Rc::new(Launcher::new(
            body.clone(),
            cover,
            config.export.revoke_delay_ms,
        ));

        let mut page = Page {
            loops: Vec::new(),
            listeners: Vec::new(),
            clock: None,
            launcher,
        };

        page.start_snow(config)?;
        if let Some(container) = &gallery {
            page.start_carousel(container, config)?;
        } else {
            log!("No #{} element, gallery disabled", html::GALLERY_ID);
        }

        let containers: Vec<&HtmlElement> = gallery.iter().chain(listing.iter()).collect();
        page.wire_launcher(&document, &containers)?;
        page.wire_tooltip(&body, &document, &containers)?;
        page.start_meta(config, &containers)?;
        page.wire_search(config, &root)?;

        Ok(page)
    }

    fn start_snow(&mut self, config: &Config) -> Result<()> {
        let Some(canvas) = browser::element_by_id::<HtmlCanvasElement>(html::CANVAS_ID)? else {
            log!("No #{} canvas, snow disabled", html::CANVAS_ID);
            return Ok(());
        };
        let renderer = Renderer::new(canvas)?;
        let field = Rc::new(RefCell::new(ParticleField::new(
            renderer,
            Density::from(&config.snow),
        )));
        let (width, height) = browser::viewport_size()?;
        field.borrow_mut().resize(width, height);

        let resized = field.clone();
        let window = browser::window()?;
        self.listen(&window, "resize", move |_| {
            let (width, height) = browser::viewport_size()?;
            resized.borrow_mut().resize(width, height);
            Ok(())
        })?;

        self.loops.push(AnimationLoop::start(field)?);
        Ok(())
    }

    fn start_carousel(&mut self, container: &HtmlElement, config: &Config) -> Result<()> {
        let sequence = gallery::build_loopable_sequence(container)?;
        log!("Gallery looping {} tiles", sequence.canonical().count());
        let carousel = Carousel::new(container.clone(), config.gallery.scroll_speed);
        self.loops
            .push(AnimationLoop::start(Rc::new(RefCell::new(carousel)))?);
        Ok(())
    }

    fn wire_launcher(
        &mut self,
        document: &web_sys::Document,
        containers: &[&HtmlElement],
    ) -> Result<()> {
        for container in containers {
            let launcher = self.launcher.clone();
            self.listen(container, "click", move |event| launcher.on_tile_click(event))?;
        }
        let launcher = self.launcher.clone();
        self.listen(document, "click", move |event| launcher.on_control_click(event))
    }

    fn wire_tooltip(
        &mut self,
        body: &HtmlElement,
        document: &web_sys::Document,
        containers: &[&HtmlElement],
    ) -> Result<()> {
        let tooltip = Rc::new(Tooltip::mount(body)?);
        for container in containers {
            for event in ["mouseover", "mouseout"] {
                let tooltip = tooltip.clone();
                self.listen(container, event, move |event| tooltip.on_hover(event))?;
            }
        }
        self.listen(document, "mousemove", move |event| tooltip.on_move(event))
    }

    fn start_meta(&mut self, config: &Config, containers: &[&HtmlElement]) -> Result<()> {
        let Some(element) = browser::element_by_id::<HtmlElement>(html::META_ID)? else {
            return Ok(());
        };
        let count: usize = containers
            .iter()
            .map(|container| gallery::canonical_launchers(container).len())
            .sum();
        let meta = MetaLine::new(element, count);
        meta.refresh();
        self.clock = Some(Interval::new(config.meta.refresh_ms, move || meta.refresh())?);
        Ok(())
    }

    fn wire_search(&mut self, config: &Config, root: &Element) -> Result<()> {
        let input = browser::element_by_id::<HtmlInputElement>(html::SEARCH_INPUT_ID)?;
        let suggestions = browser::element_by_id::<HtmlElement>(html::SUGGESTIONS_ID)?;
        let (Some(input), Some(suggestions)) = (input, suggestions) else {
            return Ok(());
        };
        let search = Rc::new(SearchBox::new(
            input.clone(),
            suggestions.clone(),
            gallery::canonical_entries(root),
            config.search.suggestion_limit,
        ));

        let on_input = search.clone();
        self.listen(&input, "input", move |_| on_input.on_input())?;

        let on_blur = search.clone();
        let delay = config.search.blur_delay_ms;
        self.listen(&input, "blur", move |_| {
            let search = on_blur.clone();
            browser::spawn_local(async move {
                // leave time for a click on a suggestion to land first
                let hidden = browser::sleep(delay).await.and_then(|_| search.hide());
                if let Err(err) = hidden {
                    error!("search: {:#}", err);
                }
            });
            Ok(())
        })?;

        // keep focus in the input so the suggestion click is not lost
        self.listen(&suggestions, "mousedown", |event| {
            event.prevent_default();
            Ok(())
        })?;

        let launcher = self.launcher.clone();
        self.listen(&suggestions, "click", move |event| {
            match search.on_suggestion_click(event)? {
                Some(entry) => launcher.open(entry),
                None => Ok(()),
            }
        })
    }

    fn listen(
        &mut self,
        target: &EventTarget,
        event: &'static str,
        handler: impl Fn(&Event) -> Result<()> + 'static,
    ) -> Result<()> {
        let listener = Listener::new(target, event, move |fired: Event| {
            if let Err(err) = handler(&fired) {
                error!("{} handler : {:#}", event, err);
            }
        })?;
        self.listeners.push(listener);
        Ok(())
    }
}

impl Drop for Page {
    fn drop(&mut self) {
        for handle in &self.loops {
            handle.stop();
        }
        self.clock.take();
        self.listeners.clear();
        self.launcher.close();
    }
}
