//! Accordion layout: ordered sections, their weights, and geometry application.
//!
//! Every state-changing operation runs in the same order: mutate the
//! section collection and weights, recompute geometry and write it to
//! every title bar and content area, then notify observers.

use anyhow::{anyhow, Result};
use ratatui::layout::Rect;
use termfold_core::{AccordionEvent, Content, Notifier, Orientation, SubscriptionId};
use termfold_logger as logger;

use crate::section::{Section, SectionTitle};
use crate::sizing::{self, SectionGeometry, SizingInput};

/// Layout parameters, in the same unit as the container extent.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutOptions {
    /// Stacking axis
    pub orientation: Orientation,
    /// Gap between adjacent sections
    pub spacing: f64,
    /// Extent reserved for every title bar
    pub title_space: f64,
    /// Content extent a handle drag never shrinks a section below
    pub min_content_extent: f64,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            orientation: Orientation::Vertical,
            spacing: 4.0,
            title_space: 22.0,
            min_content_extent: 0.0,
        }
    }
}

/// Ordered collection of collapsible sections sharing one container.
pub struct AccordionLayout {
    sections: Vec<Section>,
    options: LayoutOptions,
    area: Rect,
    geometry: Vec<SectionGeometry>,
    notifier: Notifier<AccordionEvent>,
}

impl AccordionLayout {
    /// Create empty layout.
    pub fn new(options: LayoutOptions) -> Self {
        Self {
            sections: Vec::new(),
            options,
            area: Rect::default(),
            geometry: Vec::new(),
            notifier: Notifier::new(),
        }
    }

    pub fn options(&self) -> &LayoutOptions {
        &self.options
    }

    /// Replace layout parameters and re-apply geometry.
    pub fn set_options(&mut self, options: LayoutOptions) {
        self.options = options;
        self.commit();
    }

    /// Container area last applied.
    pub fn area(&self) -> Rect {
        self.area
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn section(&self, index: usize) -> Option<&Section> {
        self.sections.get(index)
    }

    /// Title bars in section order.
    pub fn titles(&self) -> impl Iterator<Item = &SectionTitle> {
        self.sections.iter().map(|s| &s.title)
    }

    pub fn is_expanded(&self, index: usize) -> Option<bool> {
        self.sections.get(index).map(|s| s.expanded)
    }

    pub fn expanded_count(&self) -> usize {
        self.sections.iter().filter(|s| s.expanded).count()
    }

    /// Weight vector in section order; collapsed sections report 0.
    pub fn relative_sizes(&self) -> Vec<f64> {
        self.sections.iter().map(|s| s.relative_size()).collect()
    }

    /// Geometry computed by the last update, in container units.
    pub fn geometry(&self) -> &[SectionGeometry] {
        &self.geometry
    }

    /// Get mutable reference to the content of a section.
    pub fn content_mut(&mut self, index: usize) -> Option<&mut Box<dyn Content>> {
        self.sections.get_mut(index).map(|s| &mut s.content)
    }

    /// Iterator over all section contents (mutable).
    pub fn contents_mut(&mut self) -> impl Iterator<Item = &mut Box<dyn Content>> {
        self.sections.iter_mut().map(|s| &mut s.content)
    }

    /// Insert a section at `index` (clamped to the end), expanded, with a
    /// fair share of the content space. Returns the actual index.
    pub fn insert(&mut self, index: usize, content: Box<dyn Content>, title: SectionTitle) -> usize {
        let index = index.min(self.sections.len());
        let mut section = Section::new(content, title);
        section.set_expanded(true);

        let share = 1.0 / (self.expanded_count() + 1) as f64;
        for other in self.sections.iter_mut().filter(|s| s.expanded) {
            other.relative_size *= 1.0 - share;
        }
        section.relative_size = share;

        logger::debug(format!(
            "Accordion: inserted '{}' at {} with share {:.3}",
            section.title.label(),
            index,
            share
        ));
        self.sections.insert(index, section);
        self.normalize_weights();
        self.commit();
        index
    }

    /// Append a section.
    pub fn push(&mut self, content: Box<dyn Content>, title: SectionTitle) -> usize {
        self.insert(self.sections.len(), content, title)
    }

    /// Remove section by index and hand back its content.
    ///
    /// The weight of an expanded section goes to the remaining expanded
    /// sections in proportion to their own weights.
    pub fn remove(&mut self, index: usize) -> Result<Box<dyn Content>> {
        self.check_index(index, "remove")?;

        let section = self.sections.remove(index);
        logger::debug(format!(
            "Accordion: removed '{}' from {}",
            section.title.label(),
            index
        ));
        self.normalize_weights();
        self.commit();
        Ok(section.content)
    }

    /// Flip a section between expanded and collapsed. Returns the new state.
    ///
    /// Collapsing hands the freed weight to the remaining expanded sections
    /// proportionally. Expanding gives the section `1 / k` of the space,
    /// `k` being the number of expanded sections afterwards, and scales the
    /// others by `1 - 1 / k`.
    pub fn toggle(&mut self, index: usize) -> Result<bool> {
        self.check_index(index, "toggle")?;

        let expanded = !self.sections[index].expanded;
        if expanded {
            let share = 1.0 / (self.expanded_count() + 1) as f64;
            for other in self.sections.iter_mut().filter(|s| s.expanded) {
                other.relative_size *= 1.0 - share;
            }
            let section = &mut self.sections[index];
            section.set_expanded(true);
            section.relative_size = share;
        } else {
            let section = &mut self.sections[index];
            section.set_expanded(false);
            section.relative_size = 0.0;
        }
        self.normalize_weights();

        logger::debug(format!(
            "Accordion: section {} {}",
            index,
            if expanded { "expanded" } else { "collapsed" }
        ));
        self.commit();
        self.notifier
            .emit(&AccordionEvent::Toggled { index, expanded });
        Ok(expanded)
    }

    /// Bring a section into the requested state. Returns true if it changed.
    pub fn set_expanded(&mut self, index: usize, expanded: bool) -> Result<bool> {
        self.check_index(index, "set_expanded")?;
        if self.sections[index].expanded == expanded {
            return Ok(false);
        }
        self.toggle(index)?;
        Ok(true)
    }

    pub fn expand(&mut self, index: usize) -> Result<bool> {
        self.set_expanded(index, true)
    }

    pub fn collapse(&mut self, index: usize) -> Result<bool> {
        self.set_expanded(index, false)
    }

    /// Move the boundary between two adjacent expanded sections by
    /// `delta` container units. Positive values grow the earlier section.
    ///
    /// Returns false and leaves every weight untouched when the indices do
    /// not name two expanded sections with no expanded section between
    /// them, or when there is no content space to distribute.
    pub fn resize_by_drag(&mut self, index_a: usize, index_b: usize, delta: f64) -> bool {
        let (first, second) = (index_a.min(index_b), index_a.max(index_b));
        if second >= self.sections.len() {
            return false;
        }
        let start = (
            self.sections[first].relative_size,
            self.sections[second].relative_size,
        );
        self.resize_by_drag_from(first, second, start, delta)
    }

    /// Like [`resize_by_drag`](Self::resize_by_drag), but measured from the
    /// pair weights `start` recorded when the drag began.
    ///
    /// The minimum content extent only bounds the section being shrunk. A
    /// section already below the minimum keeps its weight until the
    /// pointer moves in its favour.
    pub fn resize_by_drag_from(
        &mut self,
        first: usize,
        second: usize,
        start: (f64, f64),
        delta: f64,
    ) -> bool {
        if !self.is_drag_pair(first, second) || !delta.is_finite() {
            return false;
        }

        let available = self.available_content_extent();
        if available <= 0.0 {
            return false;
        }

        let (start_first, start_second) = (start.0.max(0.0), start.1.max(0.0));
        let pair = start_first + start_second;
        let min_share = (self.options.min_content_extent.max(0.0) / available).min(pair / 2.0);
        let low = min_share.min(start_first);
        let high = pair - min_share.min(start_second);
        let target = (start_first + delta / available).clamp(low, high);

        self.sections[first].relative_size = target;
        self.sections[second].relative_size = pair - target;
        self.normalize_weights();
        self.commit();
        true
    }

    /// Check if a handle drag may move the boundary between two sections.
    pub fn is_drag_pair(&self, first: usize, second: usize) -> bool {
        if first >= second || second >= self.sections.len() {
            return false;
        }
        self.sections[first].expanded
            && self.sections[second].expanded
            && !self.sections[first + 1..second].iter().any(|s| s.expanded)
    }

    /// Re-apply the unchanged weights to a new container area.
    pub fn on_container_resize(&mut self, area: Rect) {
        self.area = area;
        self.commit();
    }

    /// Assign weights to expanded sections in order, then renormalize.
    ///
    /// Entries for collapsed sections are ignored; missing entries keep
    /// their current weight.
    pub fn set_relative_sizes(&mut self, sizes: &[f64]) {
        for (section, size) in self.sections.iter_mut().zip(sizes) {
            if section.expanded {
                section.relative_size = *size;
            }
        }
        self.normalize_weights();
        self.commit();
    }

    /// Move section up (swap with previous).
    pub fn move_section_up(&mut self, index: usize) -> Result<()> {
        if index == 0 {
            return Ok(());
        }
        self.check_index(index, "move_section_up")?;
        self.sections.swap(index - 1, index);
        self.commit();
        Ok(())
    }

    /// Move section down (swap with next).
    pub fn move_section_down(&mut self, index: usize) -> Result<()> {
        self.check_index(index, "move_section_down")?;
        if index + 1 == self.sections.len() {
            return Ok(());
        }
        self.sections.swap(index, index + 1);
        self.commit();
        Ok(())
    }

    /// Re-read every content's display title. Returns the changed indices.
    pub fn refresh_titles(&mut self) -> Vec<usize> {
        let mut changed = Vec::new();
        for (index, section) in self.sections.iter_mut().enumerate() {
            if section.title.set_label(section.content.title()) {
                changed.push(index);
            }
        }
        for index in &changed {
            self.notifier.emit(&AccordionEvent::TitleChanged(*index));
        }
        changed
    }

    /// Remove every section without notifying, handing back the contents.
    pub fn drain_contents(&mut self) -> Vec<Box<dyn Content>> {
        self.geometry.clear();
        self.sections.drain(..).map(|s| s.content).collect()
    }

    /// Content space shared by the expanded sections.
    pub fn available_content_extent(&self) -> f64 {
        sizing::available_content(self.container_extent(), self.options.spacing, &self.sizing_inputs())
    }

    pub fn subscribe(&mut self, callback: impl FnMut(&AccordionEvent) + 'static) -> SubscriptionId {
        self.notifier.subscribe(callback)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.notifier.unsubscribe(id)
    }

    /// Publish an event to all observers.
    pub fn notify(&mut self, event: AccordionEvent) {
        self.notifier.emit(&event);
    }

    /// Drop all observers.
    pub fn clear_subscribers(&mut self) {
        self.notifier.clear();
    }

    fn check_index(&self, index: usize, operation: &str) -> Result<()> {
        if index < self.sections.len() {
            return Ok(());
        }
        let message = format!(
            "Accordion {}: section index {} out of bounds (len {})",
            operation,
            index,
            self.sections.len()
        );
        logger::error(message.as_str());
        Err(anyhow!(message))
    }

    fn container_extent(&self) -> f64 {
        f64::from(self.options.orientation.main_extent(self.area))
    }

    fn sizing_inputs(&self) -> Vec<SizingInput> {
        self.sections
            .iter()
            .map(|s| SizingInput {
                title_extent: self.options.title_space,
                expanded: s.expanded,
                weight: s.relative_size(),
            })
            .collect()
    }

    fn normalize_weights(&mut self) {
        let weights: Vec<f64> = self.sections.iter().map(|s| s.relative_size()).collect();
        let mask: Vec<bool> = self.sections.iter().map(|s| s.expanded).collect();
        for (section, weight) in self.sections.iter_mut().zip(sizing::normalize(&weights, &mask)) {
            section.relative_size = weight;
        }
    }

    fn apply_geometry(&mut self) {
        let orientation = self.options.orientation;
        let inputs = self.sizing_inputs();
        self.geometry = sizing::layout(self.container_extent(), self.options.spacing, &inputs);

        let cells = sizing::to_cells(&self.geometry, orientation.main_extent(self.area));
        for (section, span) in self.sections.iter_mut().zip(cells) {
            let title_area = orientation.slice(self.area, span.offset, span.title_extent);
            let content_area = orientation.slice(
                self.area,
                span.offset + span.title_extent,
                span.content_extent,
            );
            let handle_area = trailing_handle_area(orientation, title_area, section.title.handle().extent);

            section.title.set_area(title_area, handle_area);
            section.content_area = content_area;
            section.content.on_resize(content_area);
        }
    }

    fn commit(&mut self) {
        self.apply_geometry();
        self.notifier.emit(&AccordionEvent::GeometryChanged);
    }
}

impl Default for AccordionLayout {
    fn default() -> Self {
        Self::new(LayoutOptions::default())
    }
}

/// Handle cells sit at the trailing end of the title bar, across the layout axis.
fn trailing_handle_area(orientation: Orientation, title: Rect, extent: u16) -> Rect {
    if title.is_empty() {
        return Rect::new(title.x, title.y, 0, 0);
    }
    match orientation {
        Orientation::Vertical => {
            let width = extent.min(title.width);
            Rect::new(title.right() - width, title.y, width, title.height)
        }
        Orientation::Horizontal => {
            let height = extent.min(title.height);
            Rect::new(title.x, title.bottom() - height, title.width, height)
        }
    }
}
