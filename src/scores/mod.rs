//! Best-score persistence.
//!
//! The session controller reads and writes one integer per difficulty
//! through a [`ScoreStore`]. Backend failures never reach gameplay: the
//! controller logs them and treats the score as absent.

mod file;
mod store;

pub use file::JsonFileScoreStore;
pub use store::{MemoryScoreStore, ScoreStore};
