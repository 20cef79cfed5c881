//! Game sessions.
//!
//! - `state`: the pure state of one game
//! - `scheduler`: delayed flip-back of mismatched pairs, generation-tagged
//! - `controller`: the state machine the UI layer drives
//!
//! ## Example Usage
//!
//! ```
//! use std::time::Duration;
//! use memory_match::core::{Difficulty, GameConfig};
//! use memory_match::session::{SessionController, SessionStatus, Selection};
//!
//! let mut controller = SessionController::new(GameConfig::default().with_seed(1));
//! controller.start(Difficulty::Easy).unwrap();
//! assert_eq!(controller.status(), SessionStatus::Running);
//! assert_eq!(controller.cards().len(), 4);
//!
//! // Reveal the first two cards; either they match or they flip back later.
//! let first = controller.cards()[0].id();
//! let second = controller.cards()[1].id();
//! controller.select_card(first);
//! match controller.select_card(second) {
//!     Selection::Mismatched { .. } => {
//!         controller.advance(Duration::from_millis(1000));
//!         assert!(!controller.is_busy());
//!     }
//!     other => assert!(matches!(other, Selection::Matched { attempts: 1 })),
//! }
//! assert_eq!(controller.attempts(), 1);
//! ```

mod controller;
mod scheduler;
mod state;

pub use controller::{IgnoreReason, Selection, SessionController};
pub use scheduler::{FlipBack, Generation, ManualScheduler, Scheduler};
pub use state::{Session, SessionStatus};
