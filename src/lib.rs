pub mod core;

// module re-exports
pub use crate::core::definitions::{
    Cell, Coordinate, Figure, MoveRecord, PieceId, PieceKind, Selection, Side, Snapshot,
    BOARD_LENGTH,
};
pub use crate::core::engine::{Board, Piece, ShapeRule, Tile};
pub use crate::core::error::{Error, Result};
pub use crate::core::game::{Game, Observer, Transition};
pub use crate::core::player::Player;
