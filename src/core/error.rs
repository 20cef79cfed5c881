//! Error types for session setup and score persistence.
//!
//! Gameplay itself never fails: ignored selections are reported through
//! [`Selection`](crate::session::Selection), not errors.

/// Errors that can occur when configuring or starting a session.
#[derive(Debug, thiserror::Error)]
pub enum GameError {
    /// The requested grid size is not one of the supported difficulties.
    #[error("unsupported grid size {0}: expected 2, 4 or 6")]
    InvalidDifficulty(u8),

    /// The face palette cannot supply one distinct face per pair.
    #[error("palette has {available} faces but a {grid}x{grid} grid needs {required}")]
    PaletteTooSmall {
        /// Grid side length.
        grid: u8,
        /// Distinct faces required (one per pair).
        required: usize,
        /// Faces present in the palette.
        available: usize,
    },

    /// The same face appears twice among the faces a deal would use.
    #[error("face {0:?} appears more than once in the palette")]
    DuplicateFace(String),

    /// A configuration document could not be parsed.
    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
}

/// Errors raised by a score store backend.
///
/// The session controller never propagates these; it logs them and carries
/// on as if no score were stored.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The backing file could not be read or written.
    #[error("score store i/o failed: {0}")]
    Io(#[from] std::io::Error),

    /// The backing data exists but is not a key -> integer map.
    #[error("score store data is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),

    /// The backend refused the operation (storage disabled, quota, ...).
    #[error("score store unavailable: {0}")]
    Unavailable(String),
}
