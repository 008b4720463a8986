//! Content double shared by the ui tests.

use std::any::Any;
use std::cell::RefCell;
use std::rc::Rc;

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{buffer::Buffer, layout::Rect, style::Style};
use termfold_core::{Content, RenderContext};

/// Lifecycle calls observed by a [`TextContent`].
#[derive(Debug, Default)]
pub struct Calls {
    pub attached: usize,
    pub detached: usize,
    pub disposed: usize,
    pub keys: Vec<KeyCode>,
    pub last_area: Option<Rect>,
    /// Attach, detach, resize and dispose calls in arrival order
    pub lifecycle: Vec<&'static str>,
}

/// Content drawing its title on the first row.
pub struct TextContent {
    title: String,
    calls: Rc<RefCell<Calls>>,
}

impl TextContent {
    pub fn boxed(title: &str) -> Box<dyn Content> {
        Self::tracked(title).0
    }

    pub fn tracked(title: &str) -> (Box<dyn Content>, Rc<RefCell<Calls>>) {
        let calls = Rc::new(RefCell::new(Calls::default()));
        let content = Box::new(Self {
            title: title.to_string(),
            calls: Rc::clone(&calls),
        });
        (content, calls)
    }
}

impl Content for TextContent {
    fn name(&self) -> &'static str {
        "text"
    }

    fn title(&self) -> String {
        self.title.clone()
    }

    fn render(&mut self, area: Rect, buf: &mut Buffer, _ctx: &RenderContext) {
        buf.set_stringn(
            area.x,
            area.y,
            &self.title,
            usize::from(area.width),
            Style::default(),
        );
    }

    fn handle_key(&mut self, key: KeyEvent) -> bool {
        self.calls.borrow_mut().keys.push(key.code);
        true
    }

    fn on_attach(&mut self) {
        let mut calls = self.calls.borrow_mut();
        calls.attached += 1;
        calls.lifecycle.push("attach");
    }

    fn on_detach(&mut self) {
        let mut calls = self.calls.borrow_mut();
        calls.detached += 1;
        calls.lifecycle.push("detach");
    }

    fn on_resize(&mut self, area: Rect) {
        let mut calls = self.calls.borrow_mut();
        calls.last_area = Some(area);
        calls.lifecycle.push("resize");
    }

    fn dispose(&mut self) {
        let mut calls = self.calls.borrow_mut();
        calls.disposed += 1;
        calls.lifecycle.push("dispose");
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
