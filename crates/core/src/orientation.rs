//! Layout axis of an accordion.

use ratatui::layout::Rect;

/// Axis along which sections are stacked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    /// Sections stacked top to bottom
    #[default]
    Vertical,
    /// Sections stacked left to right
    Horizontal,
}

impl Orientation {
    /// Convert orientation to its config string
    pub fn to_str(self) -> &'static str {
        match self {
            Orientation::Vertical => "vertical",
            Orientation::Horizontal => "horizontal",
        }
    }

    /// Extent of `area` along the layout axis.
    pub fn main_extent(self, area: Rect) -> u16 {
        match self {
            Orientation::Vertical => area.height,
            Orientation::Horizontal => area.width,
        }
    }

    /// Coordinate of a point along the layout axis.
    pub fn main_coord(self, column: u16, row: u16) -> u16 {
        match self {
            Orientation::Vertical => row,
            Orientation::Horizontal => column,
        }
    }

    /// Sub-rectangle of `area` spanning `[offset, offset + extent)` along the
    /// layout axis and the full cross axis.
    pub fn slice(self, area: Rect, offset: u16, extent: u16) -> Rect {
        match self {
            Orientation::Vertical => Rect {
                x: area.x,
                y: area.y.saturating_add(offset),
                width: area.width,
                height: extent,
            },
            Orientation::Horizontal => Rect {
                x: area.x.saturating_add(offset),
                y: area.y,
                width: extent,
                height: area.height,
            },
        }
    }
}

impl std::str::FromStr for Orientation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "vertical" | "v" => Ok(Orientation::Vertical),
            "horizontal" | "h" => Ok(Orientation::Horizontal),
            _ => Err(format!("Unknown orientation: {}", s)),
        }
    }
}
