//! Accordion layout management for termfold.
//!
//! This crate provides the accordion engine:
//! - `sizing` - pure conversion of weights into section geometry
//! - `Section` / `SectionTitle` - per-section state and title bar data
//! - `AccordionLayout` - section collection, weight redistribution, geometry application

pub mod accordion_layout;
pub mod section;
pub mod sizing;

pub use accordion_layout::{AccordionLayout, LayoutOptions};
pub use section::{Handle, Section, SectionTitle, EXPANDED_MODIFIER};
pub use sizing::{compute_sizes, CellSpan, SectionGeometry, SizingInput};
