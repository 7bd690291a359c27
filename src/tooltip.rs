use crate::browser::{self, html};
use crate::engine::{Point, Size};
use crate::gallery::entry;
use anyhow::{anyhow, Result};
use wasm_bindgen::JsCast;
use web_sys::{Event, HtmlElement, MouseEvent, Node};

const CURSOR_OFFSET: Point = Point { x: 14.0, y: -10.0 };
const EDGE_GAP: f64 = 8.0;

/// Top-left corner for a label of `label` size next to `cursor`, pulled back
/// inside the viewport on the right and bottom and never above the top.
pub fn place(cursor: Point, label: Size, viewport: Size) -> Point {
    let mut x = cursor.x + CURSOR_OFFSET.x;
    let mut y = cursor.y + CURSOR_OFFSET.y;

    if x + label.width > viewport.width {
        x = viewport.width - label.width - EDGE_GAP;
    }
    if y < 0.0 {
        y = 0.0;
    } else if y + label.height > viewport.height {
        y = viewport.height - label.height - EDGE_GAP;
    }
    Point { x, y }
}

/// Floating title label that follows the pointer over launcher tiles.
pub struct Tooltip {
    element: HtmlElement,
}

impl Tooltip {
    /// Creates the hidden `#game-tooltip` element and attaches it to `host`.
    pub fn mount(host: &HtmlElement) -> Result<Self> {
        let element: HtmlElement = browser::create_element("div")?;
        element.set_id(html::TOOLTIP_ID);
        browser::set_style(&element, &[("display", "none")])?;
        host.append_child(&element)
            .map_err(|err| anyhow!("Could not attach tooltip : {:#?}", err))?;
        Ok(Tooltip { element })
    }

    pub fn is_visible(&self) -> bool {
        self.element
            .style()
            .get_property_value("display")
            .map(|display| display == "block")
            .unwrap_or(false)
    }

    pub fn show(&self, title: &str, cursor: Point) -> Result<()> {
        self.element.set_text_content(Some(title));
        browser::set_style(&self.element, &[("display", "block")])?;
        self.follow(cursor)
    }

    pub fn hide(&self) -> Result<()> {
        browser::set_style(&self.element, &[("display", "none")])
    }

    pub fn follow(&self, cursor: Point) -> Result<()> {
        let rect = self.element.get_bounding_client_rect();
        let (width, height) = browser::viewport_size()?;
        let corner = place(
            cursor,
            Size::new(rect.width(), rect.height()),
            Size::new(width, height),
        );
        let left = format!("{}px", corner.x);
        let top = format!("{}px", corner.y);
        browser::set_style(&self.element, &[("left", left.as_str()), ("top", top.as_str())])
    }

    /// `mouseover` / `mouseout` on a tile container.
    pub fn on_hover(&self, event: &Event) -> Result<()> {
        let Some(launcher) = browser::closest(event.target(), html::LAUNCHER_SELECTOR) else {
            return Ok(());
        };
        let Some(mouse) = event.dyn_ref::<MouseEvent>() else {
            return Ok(());
        };
        match event.type_().as_str() {
            "mouseover" => {
                let title = entry::title_of(&launcher);
                if title.is_empty() {
                    return Ok(());
                }
                self.show(&title, cursor(mouse))
            }
            "mouseout" => {
                // moving between children of the same tile keeps the label up
                let still_inside = mouse
                    .related_target()
                    .and_then(|target| target.dyn_into::<Node>().ok())
                    .map(|node| launcher.contains(Some(&node)))
                    .unwrap_or(false);
                if still_inside {
                    Ok(())
                } else {
                    self.hide()
                }
            }
            _ => Ok(()),
        }
    }

    /// Document `mousemove`: only repositions while visible.
    pub fn on_move(&self, event: &Event) -> Result<()> {
        if !self.is_visible() {
            return Ok(());
        }
        match event.dyn_ref::<MouseEvent>() {
            Some(mouse) => self.follow(cursor(mouse)),
            None => Ok(()),
        }
    }
}

impl Drop for Tooltip {
    fn drop(&mut self) {
        self.element.remove();
    }
}

fn cursor(mouse: &MouseEvent) -> Point {
    Point {
        x: mouse.client_x().into(),
        y: mouse.client_y().into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEWPORT: Size = Size {
        width: 1024.0,
        height: 768.0,
    };
    const LABEL: Size = Size {
        width: 120.0,
        height: 24.0,
    };

    #[test]
    fn sits_right_of_and_above_cursor() {
        let corner = place(Point { x: 100.0, y: 100.0 }, LABEL, VIEWPORT);
        assert_eq!(corner, Point { x: 114.0, y: 90.0 });
    }

    #[test]
    fn pulled_back_from_right_edge() {
        let corner = place(Point { x: 1000.0, y: 100.0 }, LABEL, VIEWPORT);
        assert_eq!(corner.x, 1024.0 - 120.0 - 8.0);
    }

    #[test]
    fn never_above_the_top() {
        let corner = place(Point { x: 10.0, y: 4.0 }, LABEL, VIEWPORT);
        assert_eq!(corner.y, 0.0);
    }

    #[test]
    fn pulled_up_from_bottom_edge() {
        let corner = place(Point { x: 10.0, y: 760.0 }, LABEL, VIEWPORT);
        assert_eq!(corner.y, 768.0 - 24.0 - 8.0);
    }
}
