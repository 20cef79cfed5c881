//! Event system.
//!
//! The session controller publishes typed events through an embedded
//! [`EventHub`]; UI layers subscribe per [`SessionEventKind`] and re-read
//! card state when notified.
//!
//! ## Example Usage
//!
//! ```
//! use std::cell::Cell;
//! use std::rc::Rc;
//! use memory_match::events::{listener, EventHub, SessionEvent, SessionEventKind};
//!
//! let mut hub = EventHub::new();
//! let seen = Rc::new(Cell::new(0));
//!
//! let counter = Rc::clone(&seen);
//! hub.subscribe(
//!     SessionEventKind::AttemptsChanged,
//!     listener(move |event: &SessionEvent| {
//!         if let SessionEvent::AttemptsChanged { attempts } = event {
//!             counter.set(*attempts);
//!         }
//!     }),
//! );
//!
//! hub.publish(&SessionEvent::AttemptsChanged { attempts: 4 });
//! assert_eq!(seen.get(), 4);
//! ```

mod event;
mod hub;

pub use event::{Event, SessionEvent, SessionEventKind};
pub use hub::{listener, EventHub, Listener};
