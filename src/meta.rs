use web_sys::HtmlElement;

/// `"12 games • 09:05"`
pub fn format_meta(count: usize, hours: u32, minutes: u32) -> String {
    format!("{} games • {:02}:{:02}", count, hours, minutes)
}

/// Game count plus a wall clock, redrawn on an interval.
pub struct MetaLine {
    element: HtmlElement,
    count: usize,
}

impl MetaLine {
    pub fn new(element: HtmlElement, count: usize) -> Self {
        MetaLine { element, count }
    }

    pub fn refresh(&self) {
        let now = js_sys::Date::new_0();
        let text = format_meta(self.count, now.get_hours(), now.get_minutes());
        self.element.set_text_content(Some(text.as_str()));
    }
}
