//! Event types for termfold.
//!
//! This module provides:
//! - `Event` - Input events (keyboard, mouse, resize) read from the terminal
//! - `EventHandler` - Polling for terminal events
//! - `AccordionEvent` - Notifications published by an accordion to its observers

use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event as CrosstermEvent, KeyEvent, KeyEventKind, MouseEvent};

/// Input event
#[derive(Debug, Clone)]
pub enum Event {
    /// Keyboard event
    Key(KeyEvent),
    /// Mouse event
    Mouse(MouseEvent),
    /// Terminal resize event
    Resize(u16, u16),
    /// Tick event (no input within the tick rate)
    Tick,
    /// Terminal focus lost event
    FocusLost,
    /// Terminal focus gained event
    FocusGained,
}

/// Event handler for polling terminal events
pub struct EventHandler {
    tick_rate: Duration,
}

impl EventHandler {
    /// Create new event handler with specified tick rate
    pub fn new(tick_rate: Duration) -> Self {
        Self { tick_rate }
    }

    /// Wait for next event
    pub fn next(&self) -> Result<Event> {
        if event::poll(self.tick_rate)? {
            match event::read()? {
                // With kitty keyboard protocol, we receive Press, Release, and Repeat events.
                // Only handle Press events to avoid toggling twice.
                CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => Ok(Event::Key(key)),
                CrosstermEvent::Key(_) => Ok(Event::Tick),
                CrosstermEvent::Mouse(mouse) => Ok(Event::Mouse(mouse)),
                CrosstermEvent::Resize(width, height) => Ok(Event::Resize(width, height)),
                CrosstermEvent::FocusLost => Ok(Event::FocusLost),
                CrosstermEvent::FocusGained => Ok(Event::FocusGained),
                _ => Ok(Event::Tick),
            }
        } else {
            Ok(Event::Tick)
        }
    }
}

/// Notifications published by an accordion after a state-committing operation.
///
/// Published only after state mutation and geometry application have completed.
#[derive(Debug, Clone, PartialEq)]
pub enum AccordionEvent {
    /// Section geometry was recomputed and applied
    GeometryChanged,

    /// A section was expanded or collapsed
    Toggled { index: usize, expanded: bool },

    /// Keyboard focus moved to the title bar at index
    FocusChanged(usize),

    /// The display title of a section changed
    TitleChanged(usize),

    /// A handle drag started between two expanded sections
    DragStarted { before: usize, after: usize },

    /// A handle drag was released and its weights committed
    DragFinished { before: usize, after: usize },

    /// The accordion was torn down
    Disposed,
}
