//! Section and section title data.

use ratatui::layout::Rect;
use termfold_core::Content;

/// Suffix appended to the title class while the section is expanded.
pub const EXPANDED_MODIFIER: &str = "mod-expanded";

/// Drag handle attached to a title bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Handle {
    /// Glyph drawn for the handle
    pub symbol: String,
    /// Cells occupied across the layout axis, at the trailing end of the title bar
    pub extent: u16,
    area: Rect,
}

impl Handle {
    /// Create handle with the given glyph and cross-axis extent.
    pub fn new(symbol: impl Into<String>, extent: u16) -> Self {
        Self {
            symbol: symbol.into(),
            extent,
            area: Rect::default(),
        }
    }

    /// Area last applied to the handle.
    pub fn area(&self) -> Rect {
        self.area
    }

    pub(crate) fn set_area(&mut self, area: Rect) {
        self.area = area;
    }
}

/// Title bar of a section: label, drag handle and expanded flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionTitle {
    label: String,
    class_name: String,
    expanded: bool,
    handle: Handle,
    area: Rect,
}

impl SectionTitle {
    /// Create an expanded title bar.
    pub fn new(label: impl Into<String>, class_name: impl Into<String>, handle: Handle) -> Self {
        Self {
            label: label.into(),
            class_name: class_name.into(),
            expanded: true,
            handle,
            area: Rect::default(),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Replace the label. Returns true if it changed.
    pub fn set_label(&mut self, label: String) -> bool {
        if self.label == label {
            return false;
        }
        self.label = label;
        true
    }

    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    pub(crate) fn set_expanded(&mut self, expanded: bool) {
        self.expanded = expanded;
    }

    /// Value of the assistive-technology expanded attribute.
    pub fn aria_expanded(&self) -> &'static str {
        if self.expanded {
            "true"
        } else {
            "false"
        }
    }

    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    /// Base class plus the expanded modifier when expanded.
    pub fn classes(&self) -> Vec<String> {
        let mut classes = vec![self.class_name.clone()];
        if self.expanded {
            classes.push(format!("{}-{}", self.class_name, EXPANDED_MODIFIER));
        }
        classes
    }

    pub fn handle(&self) -> &Handle {
        &self.handle
    }

    /// Area last applied to the title bar.
    pub fn area(&self) -> Rect {
        self.area
    }

    pub(crate) fn set_area(&mut self, area: Rect, handle_area: Rect) {
        self.area = area;
        self.handle.set_area(handle_area);
    }

    /// Check if a terminal cell lies on the title bar.
    pub fn contains(&self, column: u16, row: u16) -> bool {
        rect_contains(self.area, column, row)
    }

    /// Check if a terminal cell lies on the drag handle.
    pub fn handle_contains(&self, column: u16, row: u16) -> bool {
        rect_contains(self.handle.area, column, row)
    }
}

pub(crate) fn rect_contains(area: Rect, column: u16, row: u16) -> bool {
    column >= area.x && column < area.right() && row >= area.y && row < area.bottom()
}

/// One collapsible unit: content, its title bar, and its relative size.
pub struct Section {
    pub(crate) content: Box<dyn Content>,
    pub(crate) title: SectionTitle,
    pub(crate) expanded: bool,
    pub(crate) relative_size: f64,
    pub(crate) content_area: Rect,
}

impl Section {
    pub(crate) fn new(content: Box<dyn Content>, title: SectionTitle) -> Self {
        Self {
            content,
            title,
            expanded: true,
            relative_size: 0.0,
            content_area: Rect::default(),
        }
    }

    pub fn content(&self) -> &dyn Content {
        self.content.as_ref()
    }

    pub fn content_mut(&mut self) -> &mut dyn Content {
        self.content.as_mut()
    }

    pub fn title(&self) -> &SectionTitle {
        &self.title
    }

    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    /// Share of the content space among expanded sections (0 when collapsed).
    pub fn relative_size(&self) -> f64 {
        if self.expanded {
            self.relative_size
        } else {
            0.0
        }
    }

    /// Content area last applied by the layout.
    pub fn content_area(&self) -> Rect {
        self.content_area
    }

    pub(crate) fn set_expanded(&mut self, expanded: bool) {
        self.expanded = expanded;
        self.title.set_expanded(expanded);
    }
}

impl std::fmt::Debug for Section {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Section")
            .field("content", &self.content.name())
            .field("title", &self.title)
            .field("expanded", &self.expanded)
            .field("relative_size", &self.relative_size)
            .field("content_area", &self.content_area)
            .finish()
    }
}
