//! Content trait definition for accordion sections.
//!
//! A section's content is any displayable unit that can be attached to
//! and detached from a host, told about size changes, and disposed.
//! The accordion never needs more than this capability.

use std::any::Any;

use crossterm::event::KeyEvent;
use ratatui::{buffer::Buffer, layout::Rect, style::Color};

/// Render context passed to content during rendering.
pub struct RenderContext<'a> {
    /// Current theme colors
    pub theme: &'a ThemeColors,
    /// Whether the section title owning this content has keyboard focus
    pub is_focused: bool,
    /// Position of the section in the accordion
    pub section_index: usize,
}

/// Minimal theme colors needed for rendering titles and content.
#[derive(Debug, Clone)]
pub struct ThemeColors {
    pub fg: Color,
    pub bg: Color,
    pub title_fg: Color,
    pub title_bg: Color,
    pub title_focused: Color,
    pub handle: Color,
    pub handle_active: Color,
}

impl Default for ThemeColors {
    fn default() -> Self {
        Self {
            fg: Color::White,
            bg: Color::Black,
            title_fg: Color::Gray,
            title_bg: Color::Black,
            title_focused: Color::Cyan,
            handle: Color::DarkGray,
            handle_active: Color::Yellow,
        }
    }
}

/// Trait for everything that can be shown inside an accordion section.
pub trait Content: Any {
    /// Unique name for content identification.
    fn name(&self) -> &'static str;

    /// Display title shown in the section title bar.
    fn title(&self) -> String;

    /// Render the content into the section's content area.
    ///
    /// Only called for expanded sections with a non-empty area.
    fn render(&mut self, area: Rect, buf: &mut Buffer, ctx: &RenderContext);

    /// Handle keyboard input forwarded while the section is focused.
    ///
    /// Returns true if the key was consumed.
    fn handle_key(&mut self, key: KeyEvent) -> bool {
        let _ = key;
        false
    }

    /// Called when the owning container is attached to a host surface.
    ///
    /// Sections added to an attached container get this before their
    /// first `on_resize`.
    fn on_attach(&mut self) {}

    /// Called when the owning container is detached from its host surface.
    fn on_detach(&mut self) {}

    /// Called after new geometry has been applied to the section.
    ///
    /// A collapsed section receives an area with zero extent along the
    /// layout axis.
    fn on_resize(&mut self, area: Rect) {
        let _ = area;
    }

    /// Release resources held by the content.
    ///
    /// Called once when the owning container is disposed.
    fn dispose(&mut self) {}

    /// Downcast to concrete type (immutable).
    fn as_any(&self) -> &dyn Any;

    /// Downcast to concrete type (mutable).
    fn as_any_mut(&mut self) -> &mut dyn Any;
}
