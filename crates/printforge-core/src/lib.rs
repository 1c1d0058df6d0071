//! # PrintForge Core
//!
//! Shared foundation for the PrintForge editing engine: error taxonomy,
//! the application event bus, and reserved scene identifiers.
//!
//! The engine crates publish scene, history, template, and font events
//! through the bus defined here; UI layers subscribe without the engine
//! knowing about them.

pub mod constants;
pub mod error;
pub mod event_bus;

pub use error::{DocumentError, Error, FontError, Result, TemplateError};

pub use event_bus::{
    event_bus, AppEvent, EventBus, EventBusConfig, EventCategory, EventFilter, FontEvent,
    HistoryEvent, SceneEvent, SubscriptionId, TemplateEvent,
};
