//! # Event Bus Module
//!
//! Unified event bus for decoupled communication between the editing
//! engine and its consumers (panels, thumbnails, renderer glue).
//!
//! - Publishers emit typed events without knowing subscribers
//! - Subscribers filter and receive events of interest
//! - Supports both synchronous handlers and async receivers
//!
//! ## Usage
//!
//! ```rust,ignore
//! use printforge_core::event_bus::{event_bus, AppEvent, EventCategory, EventFilter, TemplateEvent};
//!
//! let subscription = event_bus().subscribe(
//!     EventFilter::Categories(vec![EventCategory::Template]),
//!     |event| {
//!         if let AppEvent::Template(TemplateEvent::Replaced { template_id, .. }) = event {
//!             println!("template swapped in: {}", template_id);
//!         }
//!     },
//! );
//!
//! // ... later
//! event_bus().unsubscribe(subscription);
//! ```

mod bus;
mod events;

pub use bus::*;
pub use events::*;
