//! Error types for board access.
//!
//! Game actions that break the rules are not errors: the selection state
//! machine answers them with a [`Transition`](crate::core::game::Transition).
//! Only programming errors, such as asking for a tile outside the board,
//! show up here.

use thiserror::Error;

/// Errors produced by board accessors and position setup
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Coordinate outside `[0, 8)` on either axis
    #[error("Coordinate ({x}, {y}) is outside the board (must be 0-7)")]
    OutOfRange { x: i32, y: i32 },

    /// Setup tried to put a piece onto a tile that already holds one
    #[error("Tile ({x}, {y}) is already occupied")]
    Occupied { x: i32, y: i32 },

    /// Piece id unknown to the board it was handed to
    #[error("Piece #{id} does not belong to this board")]
    UnknownPiece { id: usize },

    /// Piece already stands on a tile
    #[error("Piece #{id} is already on the board")]
    AlreadyPlaced { id: usize },
}

/// Result type alias for board operations
pub type Result<T> = std::result::Result<T, Error>;
