use anyhow::{anyhow, Result};
use futures::channel::oneshot::channel;
use serde::de::DeserializeOwned;
use std::future::Future;
use wasm_bindgen::closure::{Closure, WasmClosure, WasmClosureFnOnce};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;

#[rustfmt::skip]
use web_sys::{
    CanvasRenderingContext2d,
    Document,
    Element,
    EventTarget,
    HtmlCanvasElement,
    HtmlElement,
    HtmlImageElement,
    Response,
    Window,
};

// ==================== Logging ====================
macro_rules! log {
    ($($t:tt)*) => {
        web_sys::console::log_1(&format!($($t)*).into())
    }
}

macro_rules! error {
    ($($t:tt)*) => {
        web_sys::console::error_1(&format!($($t)*).into())
    }
}

// ==================== Constants ====================
// Constants related to HTML elements
pub mod html {
    pub const CANVAS_ID: &str = "snowCanvas";
    pub const CONTEXT_2D: &str = "2d";

    pub const GALLERY_ID: &str = "games-container";
    pub const LISTING_ID: &str = "all-games-container";
    pub const GALLERY_WRAPPER_ID: &str = "gallery-wrapper";
    pub const SEARCH_INPUT_ID: &str = "game-search";
    pub const SUGGESTIONS_ID: &str = "search-suggestions";
    pub const META_ID: &str = "game-meta";
    pub const TOOLTIP_ID: &str = "game-tooltip";

    pub const LAUNCHER_SELECTOR: &str = ".game-launcher";
    pub const TITLE_SELECTOR: &str = ".game-title";
    pub const COVER_LABEL_SELECTOR: &str = ".cover-label";
    pub const SUGGESTION_CLASS: &str = "search-suggestion-item";

    pub const CLONE_ATTRIBUTE: &str = "data-clone";
    pub const URL_ATTRIBUTE: &str = "data-url";
    pub const ACTION_ATTRIBUTE: &str = "data-launch-action";
    pub const ROLE_ATTRIBUTE: &str = "data-launch-role";
    pub const ENTRY_INDEX_ATTRIBUTE: &str = "data-entry-index";

    pub const CONFIG_PATH: &str = "launcher.json";
    pub const DOWNLOAD_ICON_PATH: &str = "download_24dp_FFFFFF_FILL0_wght400_GRAD0_opsz24.svg";
}

pub type LoopClosure = Closure<dyn FnMut(f64)>;

// ==================== Lookups ====================
pub fn window() -> Result<Window> {
    web_sys::window().ok_or_else(|| anyhow!("Window not found"))
}

pub fn document() -> Result<Document> {
    window()?
        .document()
        .ok_or_else(|| anyhow!("No Document Found"))
}

pub fn body() -> Result<HtmlElement> {
    document()?
        .body()
        .ok_or_else(|| anyhow!("No Body Found"))
}

pub fn context(canvas: &HtmlCanvasElement) -> Result<CanvasRenderingContext2d> {
    canvas
        .get_context(html::CONTEXT_2D)
        // Result<Option<Object>, JsValue> -> anyhow on both layers
        .map_err(|js_value| anyhow!("Error getting context : {:#?}", js_value))?
        .ok_or_else(|| anyhow!("No 2d context found"))?
        .dyn_into::<CanvasRenderingContext2d>()
        .map_err(|element| {
            anyhow!(
                "Error converting {:#?} to CanvasRenderingContext2d",
                element
            )
        })
}

/// Optional lookup: a missing element is `Ok(None)`, a present element of the
/// wrong type is an error.
pub fn element_by_id<T: JsCast>(id: &str) -> Result<Option<T>> {
    match document()?.get_element_by_id(id) {
        Some(element) => element
            .dyn_into::<T>()
            .map(Some)
            .map_err(|element| anyhow!("Error converting element '{}' : {:#?}", id, element)),
        None => Ok(None),
    }
}

pub fn create_element<T: JsCast>(tag: &str) -> Result<T> {
    document()?
        .create_element(tag)
        .map_err(|err| anyhow!("Could not create <{}> : {:#?}", tag, err))?
        .dyn_into::<T>()
        .map_err(|element| anyhow!("Error converting <{}> : {:#?}", tag, element))
}

pub fn new_image() -> Result<HtmlImageElement> {
    HtmlImageElement::new().map_err(|err| anyhow!("Could not create image element : {:#?}", err))
}

/// Nearest ancestor (or self) of the event target matching `selector`.
pub fn closest(target: Option<EventTarget>, selector: &str) -> Option<Element> {
    target
        .and_then(|target| target.dyn_into::<Element>().ok())
        .and_then(|element| element.closest(selector).ok().flatten())
}

pub fn viewport_size() -> Result<(f64, f64)> {
    let window = window()?;
    let width = window
        .inner_width()
        .map_err(|err| anyhow!("Could not read innerWidth : {:#?}", err))?
        .as_f64()
        .ok_or_else(|| anyhow!("innerWidth is not a number"))?;
    let height = window
        .inner_height()
        .map_err(|err| anyhow!("Could not read innerHeight : {:#?}", err))?
        .as_f64()
        .ok_or_else(|| anyhow!("innerHeight is not a number"))?;
    Ok((width, height))
}

/// Resolve `url` against the current page location.
pub fn absolute_url(url: &str) -> Result<String> {
    let base = window()?
        .location()
        .href()
        .map_err(|err| anyhow!("Could not read location : {:#?}", err))?;
    web_sys::Url::new_with_base(url, &base)
        .map(|resolved| resolved.href())
        .map_err(|err| anyhow!("Could not resolve url '{}' : {:#?}", url, err))
}

pub fn set_style(element: &HtmlElement, styles: &[(&str, &str)]) -> Result<()> {
    let style = element.style();
    for (property, value) in styles {
        style
            .set_property(property, value)
            .map_err(|err| anyhow!("Could not set style {} : {:#?}", property, err))?;
    }
    Ok(())
}

// ==================== Closures & Scheduling ====================
pub fn closure_once<F, T, A, R>(f: F) -> Closure<T>
where
    T: WasmClosure + ?Sized,
    F: 'static + WasmClosureFnOnce<T, A, R> + wasm_bindgen::__rt::marker::MaybeUnwindSafe,
{
    Closure::once(f)
}

pub fn closure_wrap<T: WasmClosure + ?Sized>(data: Box<T>) -> Closure<T> {
    Closure::wrap(data)
}

pub fn create_raf_closure(f: impl FnMut(f64) + 'static) -> LoopClosure {
    closure_wrap(Box::new(f) as Box<dyn FnMut(f64)>)
}

pub fn request_animation_frame(callback: &LoopClosure) -> Result<i32> {
    window()?
        .request_animation_frame(callback.as_ref().unchecked_ref())
        .map_err(|err| anyhow!("Cannot request animation frame {:#?}", err))
}

pub fn spawn_local<F>(future: F)
where
    F: Future<Output = ()> + 'static,
{
    wasm_bindgen_futures::spawn_local(future);
}

/// Resolves once `millis` have elapsed on the browser timer.
pub async fn sleep(millis: i32) -> Result<()> {
    let (tx, rx) = channel::<()>();
    let callback = closure_once(move || {
        let _ = tx.send(());
    });
    window()?
        .set_timeout_with_callback_and_timeout_and_arguments_0(
            callback.as_ref().unchecked_ref(),
            millis,
        )
        .map_err(|err| anyhow!("Could not set timeout : {:#?}", err))?;
    // callback stays owned here until the timer fires
    rx.await
        .map_err(|err| anyhow!("Timer dropped before firing : {:#?}", err))?;
    drop(callback);
    Ok(())
}

/// A `setInterval` registration, cleared when dropped.
pub struct Interval {
    id: i32,
    _callback: Closure<dyn FnMut()>,
}

impl Interval {
    pub fn new(millis: i32, callback: impl FnMut() + 'static) -> Result<Self> {
        let callback = closure_wrap(Box::new(callback) as Box<dyn FnMut()>);
        let id = window()?
            .set_interval_with_callback_and_timeout_and_arguments_0(
                callback.as_ref().unchecked_ref(),
                millis,
            )
            .map_err(|err| anyhow!("Could not set interval : {:#?}", err))?;
        Ok(Interval {
            id,
            _callback: callback,
        })
    }
}

impl Drop for Interval {
    fn drop(&mut self) {
        if let Some(window) = web_sys::window() {
            window.clear_interval_with_handle(self.id);
        }
    }
}

/// An event listener registration, removed from its target when dropped.
pub struct Listener {
    target: EventTarget,
    event: &'static str,
    callback: Closure<dyn FnMut(web_sys::Event)>,
}

impl Listener {
    pub fn new(
        target: &EventTarget,
        event: &'static str,
        callback: impl FnMut(web_sys::Event) + 'static,
    ) -> Result<Self> {
        let callback = closure_wrap(Box::new(callback) as Box<dyn FnMut(web_sys::Event)>);
        target
            .add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())
            .map_err(|err| anyhow!("Could not listen for '{}' : {:#?}", event, err))?;
        Ok(Listener {
            target: target.clone(),
            event,
            callback,
        })
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        let removed = self.target.remove_event_listener_with_callback(
            self.event,
            self.callback.as_ref().unchecked_ref(),
        );
        if let Err(err) = removed {
            error!("Listener: could not remove '{}' : {:#?}", self.event, err);
        }
    }
}

// ==================== Fetch ====================
pub async fn fetch_json<T>(json_path: &str) -> Result<T>
where
    T: DeserializeOwned,
{
    let resp_value = fetch_with_str(json_path).await?;
    let resp: Response = resp_value
        .dyn_into()
        .map_err(|element| anyhow!("error converting [{:#?}] to Response", element))?;
    if !resp.ok() {
        return Err(anyhow!("fetching {} returned status {}", json_path, resp.status()));
    }
    let json = resp
        .json()
        .map_err(|err| anyhow!("Could not get JSON from response [{:#?}]", err))?;

    let json_value = JsFuture::from(json)
        .await
        .map_err(|err| anyhow!("error fetching [{:#?}]", err))?;

    serde_wasm_bindgen::from_value(json_value)
        .map_err(|err| anyhow!("error converting response : {:#?}", err))
}

async fn fetch_with_str(resource: &str) -> Result<JsValue> {
    let resp = window()?.fetch_with_str(resource);

    JsFuture::from(resp)
        .await
        .map_err(|err| anyhow!("error fetching : {:#?}", err))
}
