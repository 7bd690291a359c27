use crate::browser;
use anyhow::{anyhow, Result};
// ELI5: web assembly is a single threaded environment, so Rc RefCell > Mutex
use std::cell::{Cell, RefCell};
use std::f64::consts::TAU;
use std::fmt;
use std::rc::Rc;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

/// Anything driven once per display refresh.
pub trait Animation {
    fn frame(&mut self);
}

/// Something a particle field can paint onto. The canvas `Renderer` is the
/// real one; tests paint onto a recording stand-in.
pub trait Surface {
    fn size(&self) -> Size;
    fn resize(&mut self, size: Size);
    fn clear(&self);
    fn fill_circle(&self, center: Point, radius: f64, color: Rgba);
}

#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Size { width, height }
    }
}

/// CSS `rgba()` colour.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Rgba {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
    pub alpha: f64,
}

impl Rgba {
    pub fn white(alpha: f64) -> Self {
        Rgba {
            red: 255,
            green: 255,
            blue: 255,
            alpha,
        }
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "rgba({}, {}, {}, {})",
            self.red, self.green, self.blue, self.alpha
        )
    }
}

// ==================== Loop ====================
/// Shared stop flag between a running loop and whoever started it.
#[derive(Debug, Clone, Default)]
pub struct StopToken(Rc<Cell<bool>>);

impl StopToken {
    pub fn new() -> Self {
        StopToken::default()
    }

    pub fn stop(&self) {
        self.0.set(true);
    }

    pub fn is_stopped(&self) -> bool {
        self.0.get()
    }
}

/// Returned by `AnimationLoop::start`; stopping it ends the loop on the next
/// scheduled frame.
#[derive(Debug, Clone)]
pub struct LoopHandle {
    token: StopToken,
}

impl LoopHandle {
    pub fn stop(&self) {
        self.token.stop();
    }

    pub fn is_stopped(&self) -> bool {
        self.token.is_stopped()
    }
}

type SharedLoopClosure = Rc<RefCell<Option<browser::LoopClosure>>>;

pub struct AnimationLoop;

impl AnimationLoop {
    /// Schedules `animation.frame()` on every animation frame until the
    /// returned handle is stopped.
    pub fn start<A>(animation: Rc<RefCell<A>>) -> Result<LoopHandle>
    where
        A: Animation + 'static,
    {
        let token = StopToken::new();
        let stop = token.clone();

        // `f` holds the closure so it can reschedule itself; `g` kicks it off
        let f: SharedLoopClosure = Rc::new(RefCell::new(None));
        let g = f.clone();
        *g.borrow_mut() = Some(browser::create_raf_closure(move |_perf: f64| {
            if stop.is_stopped() {
                // drop our own closure to break the Rc cycle
                let _ = f.borrow_mut().take();
                return;
            }
            animation.borrow_mut().frame();
            if let Some(callback) = f.borrow().as_ref() {
                if let Err(err) = browser::request_animation_frame(callback) {
                    error!("AnimationLoop: {:#?}", err);
                }
            }
        }));

        browser::request_animation_frame(
            g.borrow()
                .as_ref()
                .ok_or_else(|| anyhow!("AnimationLoop: Loop is None"))?,
        )?;

        Ok(LoopHandle { token })
    }
}

// ==================== Renderer ====================
pub struct Renderer {
    canvas: HtmlCanvasElement,
    context: CanvasRenderingContext2d,
}

impl Renderer {
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self> {
        let context = browser::context(&canvas)?;
        Ok(Renderer { canvas, context })
    }
}

impl Surface for Renderer {
    fn size(&self) -> Size {
        Size::new(self.canvas.width().into(), self.canvas.height().into())
    }

    fn resize(&mut self, size: Size) {
        self.canvas.set_width(size.width.max(0.0) as u32);
        self.canvas.set_height(size.height.max(0.0) as u32);
    }

    fn clear(&self) {
        let size = self.size();
        self.context.clear_rect(0.0, 0.0, size.width, size.height);
    }

    fn fill_circle(&self, center: Point, radius: f64, color: Rgba) {
        self.context.set_fill_style_str(&color.to_string());
        self.context.begin_path();
        match self.context.arc(center.x, center.y, radius, 0.0, TAU) {
            Ok(()) => self.context.fill(),
            Err(err) => error!("Renderer: could not draw circle : {:#?}", err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rgba_formats_as_css() {
        assert_eq!(Rgba::white(0.5).to_string(), "rgba(255, 255, 255, 0.5)");
    }

    #[test]
    fn stop_token_is_shared_between_clones() {
        let token = StopToken::new();
        let handle = LoopHandle {
            token: token.clone(),
        };
        assert!(!token.is_stopped());
        handle.stop();
        assert!(token.is_stopped());
        assert!(handle.is_stopped());
    }
}
