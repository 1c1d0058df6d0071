//! Event Bus implementation.
//!
//! Provides the core EventBus struct and global instance for
//! engine-wide event distribution.

use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::{Arc, OnceLock};
use tokio::sync::broadcast;
use uuid::Uuid;

use super::events::{AppEvent, EventCategory};

/// Subscription handle for unsubscribing from events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(Uuid);

impl SubscriptionId {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl std::fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Sub({})", &self.0.to_string()[..8])
    }
}

/// Filter to receive only specific event types
#[derive(Debug, Clone, Default)]
pub enum EventFilter {
    /// Receive all events.
    #[default]
    All,
    /// Receive events matching any of these categories.
    Categories(Vec<EventCategory>),
}

impl EventFilter {
    /// Check if an event matches this filter
    pub fn matches(&self, event: &AppEvent) -> bool {
        match self {
            EventFilter::All => true,
            EventFilter::Categories(categories) => categories.contains(&event.category()),
        }
    }
}

/// Type alias for event handler functions
type EventHandler = Box<dyn Fn(AppEvent) + Send + Sync>;

/// Configuration for the event bus
#[derive(Debug, Clone)]
pub struct EventBusConfig {
    /// Channel capacity for async receivers.
    pub channel_capacity: usize,
}

impl Default for EventBusConfig {
    fn default() -> Self {
        Self {
            channel_capacity: 1024,
        }
    }
}

/// Error types for event bus operations
#[derive(Debug, Clone, thiserror::Error)]
pub enum EventBusError {
    /// No subscribers are listening
    #[error("No active subscribers")]
    NoSubscribers,
}

/// Central event bus for engine-wide event distribution
pub struct EventBus {
    /// Broadcast channel sender
    sender: broadcast::Sender<AppEvent>,
    /// Registered synchronous handlers
    handlers: Arc<RwLock<HashMap<SubscriptionId, (EventFilter, EventHandler)>>>,
    /// Configuration
    config: EventBusConfig,
}

impl EventBus {
    /// Create a new event bus with default configuration
    pub fn new() -> Self {
        Self::with_config(EventBusConfig::default())
    }

    /// Create a new event bus with custom configuration
    pub fn with_config(config: EventBusConfig) -> Self {
        let (sender, _) = broadcast::channel(config.channel_capacity);
        Self {
            sender,
            handlers: Arc::new(RwLock::new(HashMap::new())),
            config,
        }
    }

    /// Publish an event to all subscribers
    ///
    /// Returns the number of async receivers that will receive the event,
    /// or an error if nobody at all is listening.
    pub fn publish(&self, event: AppEvent) -> Result<usize, EventBusError> {
        let handlers = self.handlers.read();
        for (_, (filter, handler)) in handlers.iter() {
            if filter.matches(&event) {
                handler(event.clone());
            }
        }

        match self.sender.send(event) {
            Ok(count) => Ok(count),
            Err(_) => {
                if handlers.is_empty() {
                    Err(EventBusError::NoSubscribers)
                } else {
                    Ok(0)
                }
            }
        }
    }

    /// Subscribe to events with a synchronous handler
    ///
    /// The handler runs on the publishing thread, so it should return
    /// quickly to avoid blocking event dispatch.
    pub fn subscribe<F>(&self, filter: EventFilter, handler: F) -> SubscriptionId
    where
        F: Fn(AppEvent) + Send + Sync + 'static,
    {
        let id = SubscriptionId::new();
        let mut handlers = self.handlers.write();
        handlers.insert(id, (filter, Box::new(handler)));
        tracing::debug!("Subscription {} added", id);
        id
    }

    /// Get a receiver for manual event polling in async contexts
    pub fn receiver(&self) -> broadcast::Receiver<AppEvent> {
        self.sender.subscribe()
    }

    /// Unsubscribe from events
    ///
    /// Returns true if the subscription was found and removed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut handlers = self.handlers.write();
        let removed = handlers.remove(&id).is_some();
        if removed {
            tracing::debug!("Subscription {} removed", id);
        }
        removed
    }

    /// Get the number of active subscriptions
    pub fn subscriber_count(&self) -> usize {
        self.handlers.read().len()
    }

    /// Get the current configuration
    pub fn config(&self) -> &EventBusConfig {
        &self.config
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("subscribers", &self.subscriber_count())
            .field("config", &self.config)
            .finish()
    }
}

/// Global event bus instance
static EVENT_BUS: OnceLock<EventBus> = OnceLock::new();

/// Get or initialize the global event bus
///
/// This is the primary way to access the event bus throughout the engine.
pub fn event_bus() -> &'static EventBus {
    EVENT_BUS.get_or_init(EventBus::new)
}
