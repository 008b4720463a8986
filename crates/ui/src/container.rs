//! Interactive accordion container.
//!
//! [`AccordionPanel`] owns an [`AccordionLayout`] and translates terminal
//! input into layout transitions: clicks on title bars toggle, keys move
//! focus between title bars, and press/drag/release on a handle resizes
//! the two expanded sections around it.

use anyhow::{anyhow, Result};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    buffer::Buffer,
    layout::{Position, Rect},
};
use termfold_config::AccordionSettings;
use termfold_core::{AccordionEvent, Content, Event, Orientation, RenderContext, SubscriptionId, ThemeColors};
use termfold_layout::{AccordionLayout, LayoutOptions, Section, SectionTitle};
use termfold_logger as logger;

use crate::renderer::{DefaultRenderer, TitleRenderer, TitleState, ACCORDION_CLASS};

/// Construction options, in terminal cells.
pub struct AccordionOptions {
    pub orientation: Orientation,
    /// Gap between adjacent sections
    pub spacing: u16,
    /// Cells reserved for every title bar
    pub title_space: u16,
    /// Content cells a handle drag never shrinks a section below
    pub min_section_size: u16,
    /// Strategy creating and drawing title bars
    pub renderer: Box<dyn TitleRenderer>,
    pub theme: ThemeColors,
}

impl AccordionOptions {
    /// Options from the `[accordion]` config section.
    ///
    /// An unknown orientation falls back to vertical.
    pub fn from_config(settings: &AccordionSettings) -> Self {
        let orientation = settings.orientation.parse::<Orientation>().unwrap_or_else(|e| {
            logger::warn(format!("Accordion config: {}, using vertical", e));
            Orientation::Vertical
        });

        Self {
            orientation,
            spacing: settings.spacing,
            title_space: settings.title_space,
            min_section_size: settings.min_section_size,
            ..Self::default()
        }
    }

    fn layout_options(&self) -> LayoutOptions {
        LayoutOptions {
            orientation: self.orientation,
            spacing: f64::from(self.spacing),
            title_space: f64::from(self.title_space),
            min_content_extent: f64::from(self.min_section_size),
        }
    }
}

impl Default for AccordionOptions {
    fn default() -> Self {
        let settings = AccordionSettings::default();
        Self {
            orientation: Orientation::Vertical,
            spacing: settings.spacing,
            title_space: settings.title_space,
            min_section_size: settings.min_section_size,
            renderer: Box::new(DefaultRenderer),
            theme: ThemeColors::default(),
        }
    }
}

/// Element found under a terminal cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitTarget {
    /// Title bar of section, outside its handle
    Title(usize),
    /// Drag handle on the title bar of section
    Handle(usize),
    /// Content region of section
    Content(usize),
}

/// Press on a handle, waiting for moves and the release.
#[derive(Debug, Clone, Copy)]
struct DragState {
    /// Section whose title bar carries the handle
    handle: usize,
    before: usize,
    after: usize,
    start_coord: u16,
    start_weights: (f64, f64),
}

enum KeyAction {
    Toggle,
    Next,
    Previous,
    First,
    Last,
}

/// Accordion bound to an area of the terminal.
pub struct AccordionPanel {
    layout: AccordionLayout,
    renderer: Box<dyn TitleRenderer>,
    theme: ThemeColors,
    attached: bool,
    disposed: bool,
    focus: Option<usize>,
    drag: Option<DragState>,
}

impl AccordionPanel {
    pub fn new(options: AccordionOptions) -> Self {
        let layout = AccordionLayout::new(options.layout_options());
        Self {
            layout,
            renderer: options.renderer,
            theme: options.theme,
            attached: false,
            disposed: false,
            focus: None,
            drag: None,
        }
    }

    /// Class identifier of the accordion root.
    pub fn class_name(&self) -> &'static str {
        ACCORDION_CLASS
    }

    pub fn layout(&self) -> &AccordionLayout {
        &self.layout
    }

    pub fn orientation(&self) -> Orientation {
        self.layout.options().orientation
    }

    pub fn set_orientation(&mut self, orientation: Orientation) {
        self.update_options(|options| options.orientation = orientation);
    }

    pub fn spacing(&self) -> u16 {
        self.layout.options().spacing as u16
    }

    pub fn set_spacing(&mut self, spacing: u16) {
        self.update_options(|options| options.spacing = f64::from(spacing));
    }

    pub fn title_space(&self) -> u16 {
        self.layout.options().title_space as u16
    }

    pub fn set_title_space(&mut self, title_space: u16) {
        self.update_options(|options| options.title_space = f64::from(title_space));
    }

    pub fn set_min_section_size(&mut self, size: u16) {
        self.update_options(|options| options.min_content_extent = f64::from(size));
    }

    pub fn renderer(&self) -> &dyn TitleRenderer {
        self.renderer.as_ref()
    }

    pub fn theme(&self) -> &ThemeColors {
        &self.theme
    }

    pub fn set_theme(&mut self, theme: ThemeColors) {
        self.theme = theme;
    }

    pub fn len(&self) -> usize {
        self.layout.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layout.is_empty()
    }

    pub fn section(&self, index: usize) -> Option<&Section> {
        self.layout.section(index)
    }

    /// Title bars in section order.
    pub fn titles(&self) -> impl Iterator<Item = &SectionTitle> {
        self.layout.titles()
    }

    pub fn is_expanded(&self, index: usize) -> Option<bool> {
        self.layout.is_expanded(index)
    }

    pub fn relative_sizes(&self) -> Vec<f64> {
        self.layout.relative_sizes()
    }

    pub fn set_relative_sizes(&mut self, sizes: &[f64]) {
        self.cancel_drag();
        self.layout.set_relative_sizes(sizes);
    }

    /// Append content as a new expanded section.
    pub fn add_section(&mut self, content: Box<dyn Content>) -> usize {
        self.insert_section(self.layout.len(), content)
    }

    /// Insert content at `index` (clamped to the end). Returns the actual index.
    pub fn insert_section(&mut self, index: usize, mut content: Box<dyn Content>) -> usize {
        self.cancel_drag();
        // Attached contents see on_attach before their first on_resize
        if self.attached {
            content.on_attach();
        }
        let title = self.renderer.create_section_title(content.as_ref());
        let index = self.layout.insert(index, content, title);

        if let Some(focus) = self.focus {
            if focus >= index {
                self.focus = Some(focus + 1);
            }
        }
        index
    }

    /// Remove section and hand back its content, detached but not disposed.
    pub fn remove_section(&mut self, index: usize) -> Result<Box<dyn Content>> {
        self.cancel_drag();
        let mut content = self.layout.remove(index)?;
        if self.attached {
            content.on_detach();
        }

        self.focus = match self.focus {
            Some(_) if self.layout.is_empty() => None,
            Some(focus) if focus > index => Some(focus - 1),
            Some(focus) => Some(focus.min(self.layout.len() - 1)),
            None => None,
        };
        Ok(content)
    }

    pub fn toggle(&mut self, index: usize) -> Result<bool> {
        self.cancel_drag();
        self.layout.toggle(index)
    }

    pub fn set_expanded(&mut self, index: usize, expanded: bool) -> Result<bool> {
        self.cancel_drag();
        self.layout.set_expanded(index, expanded)
    }

    pub fn expand(&mut self, index: usize) -> Result<bool> {
        self.set_expanded(index, true)
    }

    pub fn collapse(&mut self, index: usize) -> Result<bool> {
        self.set_expanded(index, false)
    }

    /// Move section up; focus follows the moved title bar.
    pub fn move_section_up(&mut self, index: usize) -> Result<()> {
        self.cancel_drag();
        self.layout.move_section_up(index)?;
        if index > 0 {
            self.swap_focus(index - 1, index);
        }
        Ok(())
    }

    /// Move section down; focus follows the moved title bar.
    pub fn move_section_down(&mut self, index: usize) -> Result<()> {
        self.cancel_drag();
        self.layout.move_section_down(index)?;
        if index + 1 < self.layout.len() {
            self.swap_focus(index, index + 1);
        }
        Ok(())
    }

    /// Re-read display titles from the contents. Returns the changed indices.
    pub fn refresh_titles(&mut self) -> Vec<usize> {
        self.layout.refresh_titles()
    }

    /// Index of the focused title bar.
    pub fn focused(&self) -> Option<usize> {
        self.focus
    }

    /// Move keyboard focus to a title bar.
    pub fn focus_title(&mut self, index: usize) -> Result<()> {
        if index >= self.layout.len() {
            let message = format!(
                "Accordion focus: section index {} out of bounds (len {})",
                index,
                self.layout.len()
            );
            logger::error(message.as_str());
            return Err(anyhow!(message));
        }
        if self.focus != Some(index) {
            self.focus = Some(index);
            self.layout.notify(AccordionEvent::FocusChanged(index));
        }
        Ok(())
    }

    /// Roving tab index: 0 for the title bar reachable by Tab, -1 for the rest.
    pub fn tab_index(&self, index: usize) -> i32 {
        if index == self.focus.unwrap_or(0) {
            0
        } else {
            -1
        }
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Start receiving input inside `area`.
    ///
    /// Returns false if already attached or disposed.
    pub fn attach(&mut self, area: Rect) -> bool {
        if self.disposed || self.attached {
            logger::warn("Accordion: attach ignored, already attached or disposed");
            return false;
        }

        self.attached = true;
        for content in self.layout.contents_mut() {
            content.on_attach();
        }
        self.layout.on_container_resize(area);
        logger::debug(format!(
            "Accordion: attached {} at {}x{}+{}+{}",
            self.orientation().to_str(),
            area.width,
            area.height,
            area.x,
            area.y
        ));
        true
    }

    /// Stop receiving input. Any drag in progress is dropped.
    ///
    /// Returns false if not attached.
    pub fn detach(&mut self) -> bool {
        if !self.attached {
            logger::warn("Accordion: detach ignored, not attached");
            return false;
        }

        self.drag = None;
        self.attached = false;
        for content in self.layout.contents_mut() {
            content.on_detach();
        }
        logger::debug("Accordion: detached");
        true
    }

    pub fn area(&self) -> Rect {
        self.layout.area()
    }

    /// Apply a new container area, keeping the weights.
    pub fn set_area(&mut self, area: Rect) {
        if area == self.layout.area() {
            return;
        }
        self.cancel_drag();
        self.layout.on_container_resize(area);
    }

    /// Classify and dispatch an input event.
    ///
    /// Returns true if the event was consumed. Events are ignored while
    /// detached.
    pub fn handle_event(&mut self, event: &Event) -> bool {
        if !self.attached || self.disposed {
            return false;
        }

        match event {
            Event::Key(key) => self.handle_key(*key),
            Event::Mouse(mouse) => self.handle_mouse(*mouse),
            Event::FocusLost => {
                self.cancel_drag();
                false
            }
            _ => false,
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> bool {
        let Some(focused) = self.focus else {
            return false;
        };

        let Some(action) = self.classify_key(key) else {
            return self
                .layout
                .content_mut(focused)
                .map(|content| content.handle_key(key))
                .unwrap_or(false);
        };

        let last = self.layout.len().saturating_sub(1);
        match action {
            KeyAction::Toggle => self.toggle(focused).is_ok(),
            KeyAction::Next => self.focus_title((focused + 1).min(last)).is_ok(),
            KeyAction::Previous => self.focus_title(focused.saturating_sub(1)).is_ok(),
            KeyAction::First => self.focus_title(0).is_ok(),
            KeyAction::Last => self.focus_title(last).is_ok(),
        }
    }

    fn classify_key(&self, key: KeyEvent) -> Option<KeyAction> {
        if key.modifiers != KeyModifiers::NONE {
            return None;
        }

        let (forward, backward) = match self.orientation() {
            Orientation::Vertical => (KeyCode::Down, KeyCode::Up),
            Orientation::Horizontal => (KeyCode::Right, KeyCode::Left),
        };
        match key.code {
            KeyCode::Char(' ') | KeyCode::Enter => Some(KeyAction::Toggle),
            KeyCode::Home => Some(KeyAction::First),
            KeyCode::End => Some(KeyAction::Last),
            code if code == forward => Some(KeyAction::Next),
            code if code == backward => Some(KeyAction::Previous),
            _ => None,
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) -> bool {
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                match self.hit_test(mouse.column, mouse.row) {
                    Some(HitTarget::Handle(index)) => self.begin_drag(index, mouse),
                    Some(HitTarget::Title(index)) => {
                        self.focus_title(index).is_ok() && self.toggle(index).is_ok()
                    }
                    _ => false,
                }
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                let Some(drag) = self.drag else {
                    return false;
                };
                let coord = self.orientation().main_coord(mouse.column, mouse.row);
                let delta = f64::from(coord) - f64::from(drag.start_coord);
                self.layout
                    .resize_by_drag_from(drag.before, drag.after, drag.start_weights, delta);
                true
            }
            MouseEventKind::Up(MouseButton::Left) => {
                // End drag even if released outside the accordion
                let Some(drag) = self.drag.take() else {
                    return false;
                };
                logger::debug(format!(
                    "Accordion: drag finished between {} and {}",
                    drag.before, drag.after
                ));
                self.layout.notify(AccordionEvent::GeometryChanged);
                self.layout.notify(AccordionEvent::DragFinished {
                    before: drag.before,
                    after: drag.after,
                });
                true
            }
            _ => false,
        }
    }

    /// The handle on title `index` moves the boundary between the nearest
    /// expanded section before it and the first expanded section from it on.
    fn begin_drag(&mut self, index: usize, mouse: MouseEvent) -> bool {
        let sections = self.layout.sections();
        let before = (0..index).rev().find(|i| sections[*i].is_expanded());
        let after = (index..sections.len()).find(|i| sections[*i].is_expanded());
        let (Some(before), Some(after)) = (before, after) else {
            return false;
        };
        if !self.layout.is_drag_pair(before, after) {
            return false;
        }

        self.drag = Some(DragState {
            handle: index,
            before,
            after,
            start_coord: self.orientation().main_coord(mouse.column, mouse.row),
            start_weights: (
                sections[before].relative_size(),
                sections[after].relative_size(),
            ),
        });
        logger::debug(format!(
            "Accordion: drag started between {} and {}",
            before, after
        ));
        self.layout
            .notify(AccordionEvent::DragStarted { before, after });
        true
    }

    fn cancel_drag(&mut self) {
        if self.drag.take().is_some() {
            logger::debug("Accordion: drag cancelled");
        }
    }

    /// Locate the element under a terminal cell.
    pub fn hit_test(&self, column: u16, row: u16) -> Option<HitTarget> {
        let position = Position::new(column, row);
        self.layout
            .sections()
            .iter()
            .enumerate()
            .find_map(|(index, section)| {
                let title = section.title();
                if title.handle_contains(column, row) {
                    Some(HitTarget::Handle(index))
                } else if title.contains(column, row) {
                    Some(HitTarget::Title(index))
                } else if section.content_area().contains(position) {
                    Some(HitTarget::Content(index))
                } else {
                    None
                }
            })
    }

    /// Index of the section under a terminal cell.
    pub fn section_at(&self, column: u16, row: u16) -> Option<usize> {
        self.hit_test(column, row).map(|target| match target {
            HitTarget::Title(index) | HitTarget::Handle(index) | HitTarget::Content(index) => {
                index
            }
        })
    }

    /// Draw title bars and expanded contents.
    pub fn render(&mut self, buf: &mut Buffer) {
        let orientation = self.orientation();
        let dragging = self.drag.map(|drag| drag.handle);

        for (index, title) in self.layout.titles().enumerate() {
            let state = TitleState {
                focused: self.focus == Some(index),
                dragging: dragging == Some(index),
            };
            self.renderer
                .render_title(title, orientation, state, &self.theme, buf);
        }

        for index in 0..self.layout.len() {
            let Some(area) = self
                .layout
                .section(index)
                .filter(|section| section.is_expanded())
                .map(|section| section.content_area().intersection(buf.area))
            else {
                continue;
            };
            if area.is_empty() {
                continue;
            }

            let ctx = RenderContext {
                theme: &self.theme,
                is_focused: self.focus == Some(index),
                section_index: index,
            };
            if let Some(content) = self.layout.content_mut(index) {
                content.render(area, buf, &ctx);
            }
        }
    }

    pub fn subscribe(&mut self, callback: impl FnMut(&AccordionEvent) + 'static) -> SubscriptionId {
        self.layout.subscribe(callback)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.layout.unsubscribe(id)
    }

    /// Tear down: detach, dispose every content, notify, drop observers.
    ///
    /// Later calls do nothing.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        if self.attached {
            self.detach();
        }

        for mut content in self.layout.drain_contents() {
            content.dispose();
        }
        self.focus = None;
        self.disposed = true;
        logger::debug("Accordion: disposed");
        self.layout.notify(AccordionEvent::Disposed);
        self.layout.clear_subscribers();
    }

    fn update_options(&mut self, update: impl FnOnce(&mut LayoutOptions)) {
        let mut options = self.layout.options().clone();
        update(&mut options);
        self.cancel_drag();
        self.layout.set_options(options);
    }

    fn swap_focus(&mut self, a: usize, b: usize) {
        self.focus = match self.focus {
            Some(focus) if focus == a => Some(b),
            Some(focus) if focus == b => Some(a),
            other => other,
        };
    }
}

impl Default for AccordionPanel {
    fn default() -> Self {
        Self::new(AccordionOptions::default())
    }
}

impl Drop for AccordionPanel {
    fn drop(&mut self) {
        self.dispose();
    }
}
