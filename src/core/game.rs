use std::fmt::Debug;

use log::{debug, info, trace};
use serde::{Deserialize, Serialize};

use crate::core::definitions::{
    Cell, Coordinate, Figure, MoveRecord, PieceId, PieceKind, Selection, Side, Snapshot,
    BOARD_LENGTH,
};
use crate::core::engine::{Board, Piece, ShapeRule, Tile};
use crate::core::error::{Error, Result};
use crate::core::player::Player;

/** Outcome of a single tile activation */
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Transition {
    /** Nothing selected and the tile holds no piece of the active side */
    Ignored(Coordinate),
    Selected(Coordinate),
    /** The selected tile was activated again */
    Deselected(Coordinate),
    /** Another piece of the active side took over the selection */
    Switched { from: Coordinate, to: Coordinate },
    /** Illegal destination, the selection stays */
    Rejected { from: Coordinate, to: Coordinate },
    Committed(MoveRecord),
}

impl Transition {
    pub fn changes_state(&self) -> bool {
        !matches!(self, Transition::Ignored(_) | Transition::Rejected { .. })
    }
}

pub type Observer = Box<dyn FnMut(&Transition) + Send + Sync>;

pub struct Game {
    board: Board,
    players: [Player; 2],
    turn_count: u32,
    selection: Selection,
    hovered: Option<Coordinate>,
    flip_rook_rule: Option<ShapeRule>,
    observers: Vec<Observer>,
}

impl Game {
    /** Board without pieces, PlayerOne to move */
    pub fn empty() -> Game {
        Game {
            board: Board::new(),
            players: [Player::new(Side::PlayerOne), Player::new(Side::PlayerTwo)],
            turn_count: 0,
            selection: Selection::Idle,
            hovered: None,
            flip_rook_rule: None,
            observers: Vec::new(),
        }
    }

    /** Standard starting position */
    pub fn new_game() -> Game {
        let mut game = Game::empty();
        for side in [Side::PlayerOne, Side::PlayerTwo] {
            for (x, kind) in PieceKind::BACK_RANK.into_iter().enumerate() {
                game.spawn_on(kind, side, Coordinate::at(x, side.back_rank()));
            }
            for x in 0..BOARD_LENGTH {
                game.spawn_on(PieceKind::Pawn, side, Coordinate::at(x, side.pawn_rank()));
            }
        }
        info!("New game set up, {} to move", game.active_side());
        trace!("Initial position:\n{}", game.board);
        game
    }

    /** Add a piece for `side` on an empty tile while setting up a position */
    pub fn place(&mut self, kind: PieceKind, side: Side, x: i32, y: i32) -> Result<PieceId> {
        let coordinate = Coordinate::new(x, y)?;
        if self.board.is_occupied_at(coordinate) {
            return Err(Error::Occupied { x, y });
        }
        Ok(self.spawn_on(kind, side, coordinate))
    }

    fn spawn_on(&mut self, kind: PieceKind, side: Side, coordinate: Coordinate) -> PieceId {
        let id = self.board.spawn(kind, side);
        self.board.put(id, coordinate);
        self.players[side.index()].add_piece(id);
        id
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn player(&self, side: Side) -> &Player {
        &self.players[side.index()]
    }

    pub fn turn_count(&self) -> u32 {
        self.turn_count
    }

    pub fn active_side(&self) -> Side {
        Side::from_turn(self.turn_count)
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn selected_tile(&self) -> Option<&Tile> {
        self.selection.tile().map(|coordinate| self.board.tile(coordinate))
    }

    pub fn piece_at(&self, x: i32, y: i32) -> Result<Option<&Piece>> {
        Ok(self.board.piece_at(Coordinate::new(x, y)?))
    }

    /** Opponent pieces taken by `side`, in capture order */
    pub fn captured_pieces(&self, side: Side) -> impl Iterator<Item = &Piece> + '_ {
        self.player(side)
            .captured_pieces()
            .iter()
            .map(|id| self.board.piece(*id))
    }

    /** Install or clear the movement rule used for [`PieceKind::FlipRook`].
     * Without one every FlipRook move is illegal. */
    pub fn set_flip_rook_rule(&mut self, rule: Option<ShapeRule>) {
        self.flip_rook_rule = rule;
    }

    /** Register a callback run after every transition that changes state */
    pub fn subscribe<F>(&mut self, observer: F)
    where
        F: FnMut(&Transition) + Send + Sync + 'static,
    {
        self.observers.push(Box::new(observer));
    }

    /** Full move check: shape of the moving piece, no own piece on the
     * destination, distinct squares. Ignores whose turn it is. */
    pub fn is_legal_move(&self, source: Coordinate, destination: Coordinate) -> bool {
        if source == destination {
            return false;
        }
        let Some(piece) = self.board.piece_at(source) else {
            return false;
        };
        if self
            .board
            .piece_at(destination)
            .is_some_and(|target| target.owner() == piece.owner())
        {
            return false;
        }
        match piece.kind() {
            PieceKind::FlipRook => self
                .flip_rook_rule
                .is_some_and(|rule| rule(&self.board, source, destination)),
            kind => kind.is_legal_shape(&self.board, source, destination),
        }
    }

    /** Would activating `(x, y)` commit a move from the current selection */
    pub fn would_be_legal(&self, x: i32, y: i32) -> bool {
        Coordinate::new(x, y)
            .map(|destination| self.would_be_legal_at(destination))
            .unwrap_or(false)
    }

    fn would_be_legal_at(&self, destination: Coordinate) -> bool {
        match self.selection {
            Selection::Selected(source) => self.is_legal_move(source, destination),
            Selection::Idle => false,
        }
    }

    pub fn hover(&mut self, x: i32, y: i32) -> Result<()> {
        self.hovered = Some(Coordinate::new(x, y)?);
        Ok(())
    }

    pub fn clear_hover(&mut self) {
        self.hovered = None;
    }

    pub fn hovered(&self) -> Option<Coordinate> {
        self.hovered
    }

    /** Preview for the hovered tile, never mutates the game */
    pub fn hovered_move_valid(&self) -> bool {
        self.hovered
            .is_some_and(|destination| self.would_be_legal_at(destination))
    }

    pub fn on_tile_activated(&mut self, x: i32, y: i32) -> Result<Transition> {
        Ok(self.activate(Coordinate::new(x, y)?))
    }

    /** Advance the selection state machine by one activated tile.
     * Rule-breaking picks are answered with `Ignored` or `Rejected`. */
    pub fn activate(&mut self, target: Coordinate) -> Transition {
        let active = self.active_side();
        let own_piece = self
            .board
            .piece_at(target)
            .is_some_and(|piece| piece.owner() == active);
        let selection = self.selection;
        let transition = match selection {
            Selection::Selected(source) if source == target => {
                self.selection = Selection::Idle;
                Transition::Deselected(target)
            }
            Selection::Idle if own_piece => {
                self.selection = Selection::Selected(target);
                Transition::Selected(target)
            }
            Selection::Idle => Transition::Ignored(target),
            Selection::Selected(source) if own_piece => {
                self.selection = Selection::Selected(target);
                Transition::Switched {
                    from: source,
                    to: target,
                }
            }
            Selection::Selected(source) => match self.board.tile(source).occupant() {
                Some(piece) if self.is_legal_move(source, target) => {
                    Transition::Committed(self.commit(piece, source, target))
                }
                _ => Transition::Rejected {
                    from: source,
                    to: target,
                },
            },
        };
        trace!("{active} activated {target}: {transition:?}");
        if transition.changes_state() {
            self.notify(&transition);
        }
        transition
    }

    fn commit(&mut self, piece: PieceId, source: Coordinate, target: Coordinate) -> MoveRecord {
        let side = self.active_side();
        let captured = self.board.relocate(source, target).map(|victim| {
            self.players[side.index()].capture(victim);
            self.board.piece(victim).kind()
        });
        let record = MoveRecord {
            piece,
            kind: self.board.piece(piece).kind(),
            side,
            from: source,
            to: target,
            captured,
            turn: self.turn_count,
        };
        self.turn_count += 1;
        self.selection = Selection::Idle;
        match captured {
            Some(victim) => debug!(
                "Turn {}: {side} {} {source} x {victim} {target}",
                record.turn, record.kind
            ),
            None => debug!(
                "Turn {}: {side} {} {source} -> {target}",
                record.turn, record.kind
            ),
        }
        record
    }

    fn notify(&mut self, transition: &Transition) {
        for observer in self.observers.iter_mut() {
            observer(transition);
        }
    }

    /** Rows of cells, indexed `[y][x]` */
    pub fn current_board(&self) -> Vec<Vec<Cell>> {
        (0..BOARD_LENGTH)
            .map(|y| {
                (0..BOARD_LENGTH)
                    .map(|x| match self.board.piece_at(Coordinate::at(x, y)) {
                        Some(piece) => Cell::Figure(Figure {
                            kind: piece.kind(),
                            side: piece.owner(),
                            move_count: piece.move_count(),
                        }),
                        None => Cell::Empty,
                    })
                    .collect()
            })
            .collect()
    }

    pub fn snapshot(&self) -> Snapshot {
        let captured_kinds =
            |side: Side| -> Vec<PieceKind> { self.captured_pieces(side).map(Piece::kind).collect() };
        Snapshot {
            cells: self.current_board(),
            turn_count: self.turn_count,
            active_side: self.active_side(),
            selection: self.selection,
            captured_by_player_one: captured_kinds(Side::PlayerOne),
            captured_by_player_two: captured_kinds(Side::PlayerTwo),
        }
    }
}

impl Default for Game {
    fn default() -> Self {
        Game::new_game()
    }
}

impl Debug for Game {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Game")
            .field("turn_count", &self.turn_count)
            .field("active_side", &self.active_side())
            .field("selection", &self.selection)
            .field("hovered", &self.hovered)
            .field("observers", &self.observers.len())
            .finish_non_exhaustive()
    }
}
