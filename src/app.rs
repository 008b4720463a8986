//! Demo application: one accordion filling the terminal above a help line.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    backend::Backend,
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    Terminal,
};

use termfold_config::Config;
use termfold_core::{AccordionEvent, Event, EventHandler};
use termfold_logger as logger;
use termfold_ui::{AccordionOptions, AccordionPanel};

use crate::demo::{ClockSection, TextSection};

const HELP: &str =
    " q quit | Space toggle | arrows focus | Ctrl+arrows move | drag ≡ to resize";

pub struct App {
    panel: AccordionPanel,
    should_quit: bool,
}

impl App {
    /// Build the demo accordion for a terminal of the given size.
    pub fn new(config: &Config, screen: Rect) -> Self {
        let mut panel = AccordionPanel::new(AccordionOptions::from_config(&config.accordion));
        panel.add_section(Box::new(TextSection::new(
            "Welcome",
            [
                "termfold stacks collapsible sections in one container.",
                "",
                "Click a title bar or press Space/Enter to collapse it;",
                "the freed space goes to the other expanded sections.",
                "Drag the ≡ handle of a title bar to move the boundary",
                "between the sections around it.",
            ],
        )));
        panel.add_section(Box::new(ClockSection::new()));
        panel.add_section(Box::new(TextSection::new(
            "Notes",
            (1..=40).map(|i| format!("Note line {} (j/k or PageUp/PageDown to scroll)", i)),
        )));

        panel.subscribe(|event| match event {
            AccordionEvent::GeometryChanged => {}
            other => logger::debug(format!("Accordion event: {:?}", other)),
        });

        panel.attach(panel_area(screen));
        if !panel.is_empty() {
            panel.focus_title(0).ok();
        }

        Self {
            panel,
            should_quit: false,
        }
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn panel(&self) -> &AccordionPanel {
        &self.panel
    }

    /// Main loop: draw, wait for the next event, dispatch it.
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>, events: &EventHandler) -> Result<()> {
        while !self.should_quit {
            terminal.draw(|frame| {
                let screen = frame.area();
                self.panel.set_area(panel_area(screen));
                self.render(screen, frame.buffer_mut());
            })?;

            let event = events.next()?;
            self.handle_event(&event)?;
        }
        Ok(())
    }

    pub fn handle_event(&mut self, event: &Event) -> Result<()> {
        match event {
            Event::Key(key) => {
                if !self.handle_global_key(*key)? {
                    self.panel.handle_event(event);
                }
            }
            Event::Resize(width, height) => {
                self.panel
                    .set_area(panel_area(Rect::new(0, 0, *width, *height)));
            }
            Event::Tick => {
                self.panel.refresh_titles();
            }
            Event::Mouse(_) | Event::FocusLost | Event::FocusGained => {
                self.panel.handle_event(event);
            }
        }
        Ok(())
    }

    /// Keys handled before the accordion sees them. Returns true if consumed.
    fn handle_global_key(&mut self, key: KeyEvent) -> Result<bool> {
        match (key.code, key.modifiers) {
            (KeyCode::Char('q'), KeyModifiers::NONE) | (KeyCode::Esc, _) => {
                self.should_quit = true;
                Ok(true)
            }
            (KeyCode::Up | KeyCode::Left, KeyModifiers::CONTROL) => {
                if let Some(index) = self.panel.focused() {
                    self.panel.move_section_up(index)?;
                }
                Ok(true)
            }
            (KeyCode::Down | KeyCode::Right, KeyModifiers::CONTROL) => {
                if let Some(index) = self.panel.focused() {
                    self.panel.move_section_down(index)?;
                }
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    fn render(&mut self, screen: Rect, buf: &mut Buffer) {
        self.panel.render(buf);

        if screen.height == 0 {
            return;
        }
        let help_row = screen.bottom() - 1;
        let style = Style::default().fg(Color::Black).bg(Color::Gray);
        buf.set_style(Rect::new(screen.x, help_row, screen.width, 1), style);
        buf.set_stringn(screen.x, help_row, HELP, usize::from(screen.width), style);
    }
}

/// Everything but the help line.
fn panel_area(screen: Rect) -> Rect {
    Rect {
        height: screen.height.saturating_sub(1),
        ..screen
    }
}
