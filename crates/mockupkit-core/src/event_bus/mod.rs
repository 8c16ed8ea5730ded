//! # Event Bus Module
//!
//! Publish/subscribe notifications from the editor core to its host.
//!
//! ## Usage
//!
//! ```rust
//! use mockupkit_core::event_bus::{AppEvent, EventBus, EventCategory, EventFilter, HistoryEvent};
//!
//! let bus = EventBus::new();
//! let subscription = bus.subscribe(
//!     EventFilter::Categories(vec![EventCategory::History]),
//!     |event| {
//!         if let AppEvent::History(HistoryEvent::StateChanged { can_undo, can_redo }) = event {
//!             println!("undo: {can_undo}, redo: {can_redo}");
//!         }
//!     },
//! );
//!
//! bus.unsubscribe(subscription);
//! ```

mod bus;
mod events;

pub use bus::*;
pub use events::*;
