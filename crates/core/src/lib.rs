//! Core types and traits for termfold sections.
//!
//! This crate provides the abstractions the accordion engine consumes
//! without coupling it to any concrete widget hierarchy.

pub mod content;
pub mod event;
pub mod notifier;
pub mod orientation;

pub use content::{Content, RenderContext, ThemeColors};
pub use event::{AccordionEvent, Event, EventHandler};
pub use notifier::{Notifier, SubscriptionId};
pub use orientation::Orientation;
