// ==================== Imports ====================
use std::cell::RefCell;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsValue;

#[macro_use]
pub mod browser;
pub mod config;
pub mod engine;
pub mod gallery;
pub mod launch;
pub mod meta;
pub mod page;
pub mod search;
pub mod snow;
pub mod tooltip;

use page::Page;

// ELI5: wasm is single threaded, so the running page lives in a thread local
// slot instead of a global behind a lock
thread_local! {
    static PAGE: RefCell<Option<Page>> = const { RefCell::new(None) };
}

// ==================== Main Functions ====================
/// Main entry for Webassembly module
/// - loads launcher.json (or defaults)
/// - starts snow + carousel loops
/// - wires launcher, tooltip, search and clock
#[wasm_bindgen]
pub fn main_js() -> Result<(), JsValue> {
    // setup better panic messages for debugging
    console_error_panic_hook::set_once();

    browser::spawn_local(async move {
        match Page::start().await {
            Ok(page) => {
                let previous = PAGE.with(|slot| slot.borrow_mut().replace(page));
                drop(previous);
            }
            Err(err) => error!("Could not start page : {:#?}", err),
        }
    });

    Ok(())
}

/// Tears the page down: both loops stop, listeners and the clock are removed
/// and an open game is closed.
#[wasm_bindgen]
pub fn stop_js() {
    let page = PAGE.with(|slot| slot.borrow_mut().take());
    drop(page);
}
