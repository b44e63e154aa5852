use crate::core::definitions::{PieceId, Side};

/** Bookkeeping of one side: the pieces it was given at setup and the
 * opponent pieces it has taken. Holds no rules. */
#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    side: Side,
    pieces: Vec<PieceId>,
    captured: Vec<PieceId>,
}

impl Player {
    pub fn new(side: Side) -> Player {
        Player {
            side,
            pieces: Vec::with_capacity(16),
            captured: Vec::new(),
        }
    }

    pub fn side(&self) -> Side {
        self.side
    }

    /** Pieces owned by this side, captured ones included */
    pub fn pieces(&self) -> &[PieceId] {
        &self.pieces
    }

    /** Opponent pieces taken by this side, in capture order */
    pub fn captured_pieces(&self) -> &[PieceId] {
        &self.captured
    }

    pub(crate) fn add_piece(&mut self, piece: PieceId) {
        debug_assert!(!self.pieces.contains(&piece), "Piece registered twice!");
        self.pieces.push(piece);
    }

    pub(crate) fn capture(&mut self, piece: PieceId) {
        debug_assert!(
            !self.captured.contains(&piece),
            "That's a bug! Piece captured twice!"
        );
        self.captured.push(piece);
    }
}
