//! UI components for termfold.
//!
//! Provides the interactive accordion container and the title bar
//! renderer it draws with.

pub mod container;
pub mod renderer;

#[cfg(test)]
mod test_support;

pub use container::{AccordionOptions, AccordionPanel, HitTarget};
pub use renderer::{DefaultRenderer, TitleRenderer, TitleState, ACCORDION_CLASS, TITLE_CLASS};
