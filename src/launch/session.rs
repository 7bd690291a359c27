use crate::browser::{self, html};
use crate::gallery::GalleryEntry;
use anyhow::{anyhow, Result};
use web_sys::{HtmlButtonElement, HtmlElement, HtmlIFrameElement};

/// What a session control does when clicked; stored on the button as
/// `data-launch-action`.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Action {
    Dismiss,
    Export,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Dismiss => "dismiss",
            Action::Export => "export",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "dismiss" => Some(Action::Dismiss),
            "export" => Some(Action::Export),
            _ => None,
        }
    }
}

const FRAME_STYLE: &[(&str, &str)] = &[
    ("position", "fixed"),
    ("top", "2%"),
    ("left", "2%"),
    ("width", "96%"),
    ("height", "96%"),
    ("border", "none"),
    ("z-index", "1000"),
    ("border-radius", "12px"),
    ("box-shadow", "0 0 30px rgba(0, 0, 0, 0.7)"),
    ("background-color", "#111827"),
];

const CONTROL_STYLE: &[(&str, &str)] = &[
    ("position", "fixed"),
    ("top", "1.2%"),
    ("width", "32px"),
    ("height", "32px"),
    ("border-radius", "50%"),
    ("border", "none"),
    ("background", "rgba(10,10,15,0.9)"),
    ("color", "#f5f5f5"),
    ("font-size", "18px"),
    ("line-height", "32px"),
    ("cursor", "pointer"),
    ("z-index", "1001"),
    ("display", "flex"),
    ("align-items", "center"),
    ("justify-content", "center"),
    ("box-shadow", "0 0 10px rgba(0,0,0,0.8)"),
];

const ICON_STYLE: &[(&str, &str)] = &[
    ("width", "18px"),
    ("height", "18px"),
    ("pointer-events", "none"),
];

/// Elements hidden while a game is playing, with the `display` value each had
/// before so it can be put back exactly.
struct Hidden {
    element: HtmlElement,
    display: String,
}

/// One playing game: the embedded frame, its dismiss and export controls, and
/// the elements hidden underneath. Dropping the session tears all of it down.
pub struct LaunchSession {
    entry: GalleryEntry,
    frame: HtmlIFrameElement,
    dismiss: HtmlButtonElement,
    export: HtmlButtonElement,
    hidden: Vec<Hidden>,
}

impl LaunchSession {
    /// Mounts the frame and both controls into `host` and hides `cover`.
    pub fn open(host: &HtmlElement, cover: &[HtmlElement], entry: GalleryEntry) -> Result<Self> {
        let frame: HtmlIFrameElement = browser::create_element("iframe")?;
        frame.set_src(&entry.url);
        frame.set_allow_fullscreen(true);
        browser::set_style(&frame, FRAME_STYLE)?;
        mark(&frame, html::ROLE_ATTRIBUTE, "frame")?;

        let dismiss = control(Action::Dismiss, "Close game", "2.5%")?;
        dismiss.set_text_content(Some("✕"));

        let export = control(Action::Export, "Download game HTML", "5.5%")?;
        let icon = browser::new_image()?;
        icon.set_src(html::DOWNLOAD_ICON_PATH);
        icon.set_alt("Download");
        browser::set_style(&icon, ICON_STYLE)?;
        append(&export, &icon)?;

        // build the value first so a failed append below still unwinds through Drop
        let mut session = LaunchSession {
            entry,
            frame,
            dismiss,
            export,
            hidden: Vec::with_capacity(cover.len()),
        };
        append(host, &session.frame)?;
        append(host, &session.dismiss)?;
        append(host, &session.export)?;

        for element in cover {
            let style = element.style();
            let display = style
                .get_property_value("display")
                .map_err(|err| anyhow!("Could not read display : {:#?}", err))?;
            style
                .set_property("display", "none")
                .map_err(|err| anyhow!("Could not hide element : {:#?}", err))?;
            session.hidden.push(Hidden {
                element: element.clone(),
                display,
            });
        }

        Ok(session)
    }

    pub fn entry(&self) -> &GalleryEntry {
        &self.entry
    }

    pub fn close(self) {
        drop(self);
    }

    fn release(&mut self) {
        self.frame.remove();
        self.dismiss.remove();
        self.export.remove();
        for hidden in self.hidden.drain(..) {
            let style = hidden.element.style();
            let restored = if hidden.display.is_empty() {
                style.remove_property("display").map(|_| ())
            } else {
                style.set_property("display", &hidden.display)
            };
            if let Err(err) = restored {
                error!("LaunchSession: could not restore display : {:#?}", err);
            }
        }
    }
}

impl Drop for LaunchSession {
    fn drop(&mut self) {
        self.release();
    }
}

fn control(action: Action, label: &str, right: &str) -> Result<HtmlButtonElement> {
    let button: HtmlButtonElement = browser::create_element("button")?;
    button.set_type("button");
    mark(&button, "aria-label", label)?;
    mark(&button, html::ACTION_ATTRIBUTE, action.as_str())?;
    mark(&button, html::ROLE_ATTRIBUTE, action.as_str())?;
    browser::set_style(&button, CONTROL_STYLE)?;
    browser::set_style(&button, &[("right", right)])?;
    Ok(button)
}

fn mark(element: &web_sys::Element, name: &str, value: &str) -> Result<()> {
    element
        .set_attribute(name, value)
        .map_err(|err| anyhow!("Could not set {} : {:#?}", name, err))
}

fn append(parent: &web_sys::Node, child: &web_sys::Node) -> Result<()> {
    parent
        .append_child(child)
        .map(|_| ())
        .map_err(|err| anyhow!("Could not mount launch element : {:#?}", err))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn action_round_trips_through_attribute_value() {
        for action in [Action::Dismiss, Action::Export] {
            assert_eq!(Action::parse(action.as_str()), Some(action));
        }
        assert_eq!(Action::parse("play"), None);
    }
}
