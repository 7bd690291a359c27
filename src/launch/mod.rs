//! In-page player for a launched game.
//!
//! ```text
//! tile click / suggestion ──► Launcher::open(entry)
//!                               ├─► close any open session
//!                               └─► LaunchSession::open  (frame + ✕ + ⤓, hide gallery)
//! ✕ click ──────────────────► Launcher::close            (remove all three, restore)
//! ⤓ click ──────────────────► export::download           (standalone .html file)
//! ```
use crate::browser::{self, html};
use crate::gallery::GalleryEntry;
use anyhow::Result;
use std::cell::RefCell;
use web_sys::{Event, HtmlElement};

pub mod export;
pub mod session;

pub use self::session::{Action, LaunchSession};

pub struct Launcher {
    host: HtmlElement,
    cover: Vec<HtmlElement>,
    revoke_delay_ms: i32,
    session: RefCell<Option<LaunchSession>>,
}

impl Launcher {
    /// `host` receives the frame and controls; `cover` is hidden while a game
    /// plays (the gallery wrapper and the secondary listing, when present).
    pub fn new(host: HtmlElement, cover: Vec<HtmlElement>, revoke_delay_ms: i32) -> Self {
        Launcher {
            host,
            cover,
            revoke_delay_ms,
            session: RefCell::new(None),
        }
    }

    pub fn open(&self, entry: GalleryEntry) -> Result<()> {
        self.close();
        let session = LaunchSession::open(&self.host, &self.cover, entry)?;
        *self.session.borrow_mut() = Some(session);
        Ok(())
    }

    pub fn close(&self) {
        // take first so the RefCell borrow ends before teardown runs
        let session = self.session.borrow_mut().take();
        if let Some(session) = session {
            session.close();
        }
    }

    pub fn is_open(&self) -> bool {
        self.session.borrow().is_some()
    }

    pub fn playing(&self) -> Option<GalleryEntry> {
        self.session
            .borrow()
            .as_ref()
            .map(|session| session.entry().clone())
    }

    pub fn export(&self) -> Result<()> {
        match self.playing() {
            Some(entry) => export::download(&entry, self.revoke_delay_ms),
            None => Ok(()),
        }
    }

    /// Click on a gallery or listing tile; clicks outside a launchable tile
    /// are ignored.
    pub fn on_tile_click(&self, event: &Event) -> Result<()> {
        let Some(launcher) = browser::closest(event.target(), html::LAUNCHER_SELECTOR) else {
            return Ok(());
        };
        match GalleryEntry::from_element(&launcher) {
            Some(entry) => self.open(entry),
            None => Ok(()),
        }
    }

    /// Click anywhere in the document; only session controls react.
    pub fn on_control_click(&self, event: &Event) -> Result<()> {
        let action = browser::closest(event.target(), &format!("[{}]", html::ACTION_ATTRIBUTE))
            .and_then(|control| control.get_attribute(html::ACTION_ATTRIBUTE))
            .and_then(|value| Action::parse(&value));
        match action {
            Some(Action::Dismiss) => {
                self.close();
                Ok(())
            }
            Some(Action::Export) => self.export(),
            None => Ok(()),
        }
    }
}
