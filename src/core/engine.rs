use std::fmt::Display;

use log::trace;

use crate::core::definitions::{Coordinate, PieceId, PieceKind, Side, BOARD_LENGTH};
use crate::core::error::{Error, Result};
use crate::core::utils::{between, distance, is_in_diagonal_line, is_in_straight_line};

/** Signature of a legality predicate, see [`PieceKind::is_legal_shape`] */
pub type ShapeRule = fn(&Board, Coordinate, Coordinate) -> bool;

#[derive(Clone, Debug, PartialEq)]
pub struct Piece {
    kind: PieceKind,
    owner: Side,
    move_count: u32,
    /** Cache of the tile holding this piece, written only by [`Board`] */
    tile: Option<Coordinate>,
}

impl Piece {
    fn new(kind: PieceKind, owner: Side) -> Piece {
        Piece {
            kind,
            owner,
            move_count: 0,
            tile: None,
        }
    }

    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    pub fn owner(&self) -> Side {
        self.owner
    }

    pub fn move_count(&self) -> u32 {
        self.move_count
    }

    /** Tile the piece stands on, `None` once captured */
    pub fn tile(&self) -> Option<Coordinate> {
        self.tile
    }

    pub fn is_captured(&self) -> bool {
        self.tile.is_none()
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tile {
    coordinate: Coordinate,
    occupant: Option<PieceId>,
}

impl Tile {
    pub fn coordinate(&self) -> Coordinate {
        self.coordinate
    }

    pub fn occupant(&self) -> Option<PieceId> {
        self.occupant
    }

    pub fn is_empty(&self) -> bool {
        self.occupant.is_none()
    }
}

/** Occupancy table of 8x8 tiles plus the arena of every piece ever set up.
 * Tiles are indexed `[x][y]`. */
#[derive(Clone, Debug)]
pub struct Board {
    tiles: [[Tile; BOARD_LENGTH]; BOARD_LENGTH],
    pieces: Vec<Piece>,
}

impl Board {
    pub fn new() -> Board {
        let tiles = std::array::from_fn(|x| {
            std::array::from_fn(|y| Tile {
                coordinate: Coordinate::at(x, y),
                occupant: None,
            })
        });
        Board {
            tiles,
            pieces: Vec::with_capacity(32),
        }
    }

    pub fn tile_at(&self, x: i32, y: i32) -> Result<&Tile> {
        Coordinate::new(x, y).map(|coordinate| self.tile(coordinate))
    }

    #[inline]
    pub fn tile(&self, coordinate: Coordinate) -> &Tile {
        &self.tiles[coordinate.x()][coordinate.y()]
    }

    /** Out of range squares read as empty */
    pub fn is_occupied(&self, x: i32, y: i32) -> bool {
        match Coordinate::new(x, y) {
            Ok(coordinate) => self.is_occupied_at(coordinate),
            Err(_) => false,
        }
    }

    #[inline]
    pub fn is_occupied_at(&self, coordinate: Coordinate) -> bool {
        !self.tile(coordinate).is_empty()
    }

    /** Panics for an id that did not come from this board */
    pub fn piece(&self, id: PieceId) -> &Piece {
        &self.pieces[id.0]
    }

    pub fn piece_at(&self, coordinate: Coordinate) -> Option<&Piece> {
        self.tile(coordinate).occupant.map(|id| self.piece(id))
    }

    /** Create an off-board piece. It stays in the arena for the whole game. */
    pub(crate) fn spawn(&mut self, kind: PieceKind, owner: Side) -> PieceId {
        self.pieces.push(Piece::new(kind, owner));
        PieceId(self.pieces.len() - 1)
    }

    /** Put an off-board piece of this board's arena on an empty tile */
    pub fn place_piece(&mut self, id: PieceId, coordinate: Coordinate) -> Result<()> {
        let piece = self
            .pieces
            .get(id.0)
            .ok_or(Error::UnknownPiece { id: id.0 })?;
        if piece.tile.is_some() {
            return Err(Error::AlreadyPlaced { id: id.0 });
        }
        if self.is_occupied_at(coordinate) {
            let (x, y): (i32, i32) = coordinate.into();
            return Err(Error::Occupied { x, y });
        }
        self.put(id, coordinate);
        Ok(())
    }

    pub(crate) fn put(&mut self, id: PieceId, coordinate: Coordinate) {
        debug_assert!(
            !self.is_occupied_at(coordinate),
            "Trying to place in busy place!"
        );
        debug_assert!(
            self.piece(id).tile.is_none(),
            "Piece is already standing somewhere else!"
        );
        self.tiles[coordinate.x()][coordinate.y()].occupant = Some(id);
        self.pieces[id.0].tile = Some(coordinate);
    }

    /** Clear a tile and return what stood on it */
    pub fn remove_piece(&mut self, coordinate: Coordinate) -> Option<PieceId> {
        let removed = self.tiles[coordinate.x()][coordinate.y()].occupant.take();
        if let Some(id) = removed {
            self.pieces[id.0].tile = None;
        }
        removed
    }

    /** Move the piece on `from` onto `to`, evicting whatever stood there.
     * Returns the evicted piece. Only the move commit calls this, always
     * with an occupied `from`. */
    pub(crate) fn relocate(&mut self, from: Coordinate, to: Coordinate) -> Option<PieceId> {
        let moving = self.remove_piece(from)?;
        let evicted = self.remove_piece(to);
        self.tiles[to.x()][to.y()].occupant = Some(moving);
        let piece = &mut self.pieces[moving.0];
        piece.tile = Some(to);
        piece.move_count += 1;
        trace!("{} {} moved {from} -> {to}", piece.owner, piece.kind);
        evicted
    }

    /** Pieces currently on the board with their ids */
    pub fn iter_pieces<'a>(&'a self) -> impl Iterator<Item = (PieceId, &'a Piece)> + 'a {
        Coordinate::all().filter_map(|coordinate| {
            self.tile(coordinate)
                .occupant
                .map(|id| (id, self.piece(id)))
        })
    }

    /** Every tile and piece agree on where each piece stands */
    pub fn is_consistent(&self) -> bool {
        let tiles_agree = Coordinate::all().all(|coordinate| {
            self.tile(coordinate)
                .occupant
                .map_or(true, |id| self.piece(id).tile == Some(coordinate))
        });
        let pieces_agree = self.pieces.iter().enumerate().all(|(id, piece)| {
            piece
                .tile
                .map_or(true, |coordinate| self.tile(coordinate).occupant == Some(PieceId(id)))
        });
        tiles_agree && pieces_agree
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::new()
    }
}

impl Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for y in 0..BOARD_LENGTH {
            for x in 0..BOARD_LENGTH {
                let tile = &self.tiles[x][y];
                let symbol = match tile.occupant {
                    Some(id) => {
                        let piece = self.piece(id);
                        piece.kind.symbol(piece.owner)
                    }
                    None => '.',
                };
                write!(f, "{symbol}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl PieceKind {
    /** Geometric and path rule of the piece standing on `source`.
     *
     * Callers check separately that `source != destination` and that the
     * destination does not hold a piece of the mover's side. The board is
     * read in its pre-move state. */
    pub fn is_legal_shape(
        self,
        board: &Board,
        source: Coordinate,
        destination: Coordinate,
    ) -> bool {
        match self {
            PieceKind::Pawn => pawn_shape(board, source, destination),
            PieceKind::Rook => rook_shape(board, source, destination),
            // No rule yet, see `Game::set_flip_rook_rule`
            PieceKind::FlipRook => false,
            PieceKind::Knight => knight_shape(source, destination),
            PieceKind::Bishop => bishop_shape(board, source, destination),
            PieceKind::Queen => {
                rook_shape(board, source, destination) || bishop_shape(board, source, destination)
            }
            PieceKind::King => distance(source, destination) == 1,
        }
    }
}

fn pawn_shape(board: &Board, source: Coordinate, destination: Coordinate) -> bool {
    let Some(pawn) = board.piece_at(source) else {
        return false;
    };
    let forward = pawn.owner.forward();
    let (dx, dy) = source.delta(destination);
    match dx.abs() {
        // push
        0 => {
            if board.is_occupied_at(destination) {
                return false;
            }
            // double push
            dy == forward
                || (pawn.move_count == 0
                    && dy == 2 * forward
                    && !board.is_occupied(source.x() as i32, source.y() as i32 + forward))
        }
        // capture
        1 => dy == forward && board.is_occupied_at(destination),
        _ => false,
    }
}

fn rook_shape(board: &Board, source: Coordinate, destination: Coordinate) -> bool {
    source != destination
        && is_in_straight_line(source, destination)
        && path_is_clear(board, source, destination)
}

fn bishop_shape(board: &Board, source: Coordinate, destination: Coordinate) -> bool {
    source != destination
        && is_in_diagonal_line(source, destination)
        && path_is_clear(board, source, destination)
}

fn knight_shape(source: Coordinate, destination: Coordinate) -> bool {
    let (dx, dy) = source.delta(destination);
    matches!((dx.abs(), dy.abs()), (1, 2) | (2, 1))
}

#[inline]
fn path_is_clear(board: &Board, source: Coordinate, destination: Coordinate) -> bool {
    between(source, destination).all(|coordinate| !board.is_occupied_at(coordinate))
}
