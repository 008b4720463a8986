//! Title bar and drag handle rendering.
//!
//! The accordion delegates title creation and drawing to a
//! [`TitleRenderer`]; [`DefaultRenderer`] draws a one-line bar
//! `▼ Title ─────≡` (or `▶` when collapsed) with the handle at the end.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
};
use termfold_core::{Content, Orientation, ThemeColors};
use termfold_layout::{Handle, SectionTitle};

/// Class identifier carried by the accordion root.
pub const ACCORDION_CLASS: &str = "accordion-panel";

/// Class identifier carried by default title bars.
pub const TITLE_CLASS: &str = "accordion-title";

const HANDLE_SYMBOL: &str = "≡";
const EXPANDED_SYMBOL: &str = "▼";
const COLLAPSED_SYMBOL: &str = "▶";

/// Interaction state affecting how a title bar is drawn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TitleState {
    /// Title bar holds keyboard focus
    pub focused: bool,
    /// Handle is being dragged
    pub dragging: bool,
}

/// Strategy creating and drawing title bars.
pub trait TitleRenderer {
    /// Class identifier for title bars created by this renderer.
    fn title_class_name(&self) -> &str;

    /// Create the drag handle attached to a new title bar.
    fn create_handle(&self) -> Handle;

    /// Create the title bar for newly added content.
    fn create_section_title(&self, content: &dyn Content) -> SectionTitle {
        SectionTitle::new(content.title(), self.title_class_name(), self.create_handle())
    }

    /// Draw a title bar into its applied area.
    fn render_title(
        &self,
        title: &SectionTitle,
        orientation: Orientation,
        state: TitleState,
        theme: &ThemeColors,
        buf: &mut Buffer,
    );
}

/// Renderer used when none is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultRenderer;

impl TitleRenderer for DefaultRenderer {
    fn title_class_name(&self) -> &str {
        TITLE_CLASS
    }

    fn create_handle(&self) -> Handle {
        Handle::new(HANDLE_SYMBOL, 1)
    }

    fn render_title(
        &self,
        title: &SectionTitle,
        orientation: Orientation,
        state: TitleState,
        theme: &ThemeColors,
        buf: &mut Buffer,
    ) {
        let area = title.area().intersection(buf.area);
        if area.is_empty() {
            return;
        }

        let style = if state.focused {
            Style::default()
                .fg(theme.title_focused)
                .bg(theme.title_bg)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.title_fg).bg(theme.title_bg)
        };
        buf.set_style(area, style);

        let arrow = if title.is_expanded() {
            EXPANDED_SYMBOL
        } else {
            COLLAPSED_SYMBOL
        };
        let handle = title.handle().area().intersection(area);

        match orientation {
            Orientation::Vertical => render_row(title, area, handle, arrow, style, buf),
            Orientation::Horizontal => render_column(title, area, handle, arrow, style, buf),
        }

        if !handle.is_empty() {
            let color = if state.dragging {
                theme.handle_active
            } else {
                theme.handle
            };
            let handle_style = style.fg(color);
            for y in handle.top()..handle.bottom() {
                for x in handle.left()..handle.right() {
                    buf[(x, y)]
                        .set_symbol(&title.handle().symbol)
                        .set_style(handle_style);
                }
            }
        }
    }
}

/// `▼ Title ───` along the first row of the bar.
fn render_row(
    title: &SectionTitle,
    area: Rect,
    handle: Rect,
    arrow: &str,
    style: Style,
    buf: &mut Buffer,
) {
    let y = area.y;
    let end = if handle.is_empty() { area.right() } else { handle.left() };
    if end <= area.x {
        return;
    }

    buf.set_stringn(area.x, y, arrow, usize::from(end - area.x), style);
    let label_start = area.x.saturating_add(2);
    let mut x = label_start;
    if label_start < end {
        let (after, _) = buf.set_stringn(
            label_start,
            y,
            title.label(),
            usize::from(end - label_start),
            style,
        );
        x = after;
    }
    if x < end {
        x += 1;
    }
    for fill in x..end {
        buf[(fill, y)].set_symbol("─").set_style(style);
    }
}

/// Arrow on top, then the label one character per row.
fn render_column(
    title: &SectionTitle,
    area: Rect,
    handle: Rect,
    arrow: &str,
    style: Style,
    buf: &mut Buffer,
) {
    let x = area.x;
    let end = if handle.is_empty() { area.bottom() } else { handle.top() };
    if end <= area.y {
        return;
    }

    buf[(x, area.y)].set_symbol(arrow).set_style(style);
    let mut y = area.y.saturating_add(2);
    for ch in title.label().chars() {
        if y >= end {
            break;
        }
        let mut symbol = [0u8; 4];
        buf[(x, y)]
            .set_symbol(ch.encode_utf8(&mut symbol))
            .set_style(style);
        y += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::TextContent;
    use ratatui::buffer::Buffer;
    use termfold_layout::{AccordionLayout, LayoutOptions};

    fn row_text(buf: &Buffer, y: u16) -> String {
        (buf.area.left()..buf.area.right())
            .map(|x| buf[(x, y)].symbol().to_string())
            .collect()
    }

    fn laid_out(area: Rect, orientation: Orientation, label: &str) -> AccordionLayout {
        let mut layout = AccordionLayout::new(LayoutOptions {
            orientation,
            spacing: 0.0,
            title_space: 1.0,
            min_content_extent: 0.0,
        });
        layout.on_container_resize(area);
        let content = TextContent::boxed(label);
        let title = DefaultRenderer.create_section_title(content.as_ref());
        layout.push(content, title);
        layout
    }

    fn render(layout: &AccordionLayout, orientation: Orientation, state: TitleState, buf: &mut Buffer) {
        let title = layout.section(0).unwrap().title();
        DefaultRenderer.render_title(title, orientation, state, &ThemeColors::default(), buf);
    }

    #[test]
    fn test_default_title_class() {
        assert_eq!(DefaultRenderer.title_class_name(), "accordion-title");
        assert_eq!(DefaultRenderer.create_handle().extent, 1);
    }

    #[test]
    fn test_create_section_title_uses_content_title() {
        let content = TextContent::boxed("Outline");
        let title = DefaultRenderer.create_section_title(content.as_ref());
        assert_eq!(title.label(), "Outline");
        assert_eq!(title.class_name(), TITLE_CLASS);
        assert!(title.is_expanded());
    }

    #[test]
    fn test_render_expanded_row() {
        let area = Rect::new(0, 0, 12, 1);
        let mut buf = Buffer::empty(area);
        let layout = laid_out(area, Orientation::Vertical, "Files");

        render(&layout, Orientation::Vertical, TitleState::default(), &mut buf);
        assert_eq!(row_text(&buf, 0), "▼ Files ───≡");
    }

    #[test]
    fn test_render_collapsed_row_truncates() {
        let area = Rect::new(0, 0, 8, 1);
        let mut buf = Buffer::empty(area);
        let mut layout = laid_out(area, Orientation::Vertical, "Very long title");
        layout.collapse(0).unwrap();

        render(&layout, Orientation::Vertical, TitleState::default(), &mut buf);
        assert_eq!(row_text(&buf, 0), "▶ Very ≡");
    }

    #[test]
    fn test_render_focused_is_bold() {
        let area = Rect::new(0, 0, 10, 1);
        let mut buf = Buffer::empty(area);
        let layout = laid_out(area, Orientation::Vertical, "Log");
        let theme = ThemeColors::default();

        let state = TitleState {
            focused: true,
            dragging: true,
        };
        render(&layout, Orientation::Vertical, state, &mut buf);
        assert!(buf[(2, 0)].modifier.contains(Modifier::BOLD));
        assert_eq!(buf[(2, 0)].fg, theme.title_focused);
        assert_eq!(buf[(9, 0)].fg, theme.handle_active);
    }

    #[test]
    fn test_render_column() {
        let area = Rect::new(0, 0, 1, 6);
        let mut buf = Buffer::empty(area);
        let layout = laid_out(area, Orientation::Horizontal, "Tab");

        render(&layout, Orientation::Horizontal, TitleState::default(), &mut buf);
        let column: Vec<&str> = (0..6).map(|y| buf[(0, y)].symbol()).collect();
        assert_eq!(column, vec!["▼", " ", "T", "a", "b", "≡"]);
    }
}
