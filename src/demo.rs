//! Demo section contents.

use std::any::Any;

use chrono::Local;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    prelude::Widget,
    style::{Modifier, Style},
    text::Line,
    widgets::Paragraph,
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use termfold_core::{Content, RenderContext};

/// Cut `text` to `max_width` columns, marking the cut with an ellipsis.
fn truncate_to_width(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    if max_width == 0 {
        return String::new();
    }

    let mut result = String::new();
    let mut width = 0;
    for ch in text.chars() {
        let ch_width = ch.width().unwrap_or(0);
        if width + ch_width + 1 > max_width {
            break;
        }
        result.push(ch);
        width += ch_width;
    }
    result.push('…');
    result
}

/// Scrollable block of static text lines.
pub struct TextSection {
    title: String,
    lines: Vec<String>,
    scroll: usize,
    /// Visible rows, from the last applied area
    height: usize,
}

impl TextSection {
    pub fn new<S: Into<String>>(title: impl Into<String>, lines: impl IntoIterator<Item = S>) -> Self {
        Self {
            title: title.into(),
            lines: lines.into_iter().map(Into::into).collect(),
            scroll: 0,
            height: 0,
        }
    }

    fn max_scroll(&self) -> usize {
        self.lines.len().saturating_sub(self.height)
    }

    fn scroll_by(&mut self, delta: isize) {
        self.scroll = self
            .scroll
            .saturating_add_signed(delta)
            .min(self.max_scroll());
    }
}

impl Content for TextSection {
    fn name(&self) -> &'static str {
        "text"
    }

    fn title(&self) -> String {
        self.title.clone()
    }

    fn render(&mut self, area: Rect, buf: &mut Buffer, ctx: &RenderContext) {
        let width = usize::from(area.width);
        let lines: Vec<Line> = self
            .lines
            .iter()
            .skip(self.scroll)
            .take(usize::from(area.height))
            .map(|line| Line::from(truncate_to_width(line, width)))
            .collect();

        Paragraph::new(lines)
            .style(Style::default().fg(ctx.theme.fg).bg(ctx.theme.bg))
            .render(area, buf);
    }

    fn handle_key(&mut self, key: KeyEvent) -> bool {
        let page = self.height.max(1) as isize;
        match key.code {
            KeyCode::Char('j') => self.scroll_by(1),
            KeyCode::Char('k') => self.scroll_by(-1),
            KeyCode::PageDown => self.scroll_by(page),
            KeyCode::PageUp => self.scroll_by(-page),
            _ => return false,
        }
        true
    }

    fn on_resize(&mut self, area: Rect) {
        self.height = usize::from(area.height);
        self.scroll = self.scroll.min(self.max_scroll());
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Section whose title carries the current time.
#[derive(Default)]
pub struct ClockSection;

impl ClockSection {
    pub fn new() -> Self {
        Self
    }
}

impl Content for ClockSection {
    fn name(&self) -> &'static str {
        "clock"
    }

    fn title(&self) -> String {
        format!("Clock {}", Local::now().format("%H:%M:%S"))
    }

    fn render(&mut self, area: Rect, buf: &mut Buffer, ctx: &RenderContext) {
        let now = Local::now();
        let style = Style::default().fg(ctx.theme.fg).bg(ctx.theme.bg);
        let lines = vec![
            Line::styled(
                now.format("%A, %d %B %Y").to_string(),
                style.add_modifier(Modifier::BOLD),
            ),
            Line::styled("The title bar is refreshed on every tick.", style),
        ];
        Paragraph::new(lines).style(style).render(area, buf);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
