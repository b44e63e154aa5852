use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::core::error::Error;
use crate::core::utils::is_valid_coord;

pub const BOARD_LENGTH: usize = 8;

/** Square on the board, both axes in `[0, 8)` */
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "(i32, i32)", into = "(i32, i32)")]
pub struct Coordinate {
    x: u8,
    y: u8,
}

impl Coordinate {
    pub fn new(x: i32, y: i32) -> Result<Coordinate, Error> {
        if is_valid_coord(x, y) {
            Ok(Coordinate {
                x: x as u8,
                y: y as u8,
            })
        } else {
            Err(Error::OutOfRange { x, y })
        }
    }

    /** Unchecked constructor for indices already known to be in range */
    #[inline]
    pub(crate) fn at(x: usize, y: usize) -> Coordinate {
        debug_assert!(x < BOARD_LENGTH && y < BOARD_LENGTH);
        Coordinate {
            x: x as u8,
            y: y as u8,
        }
    }

    #[inline]
    pub fn x(&self) -> usize {
        self.x as usize
    }

    #[inline]
    pub fn y(&self) -> usize {
        self.y as usize
    }

    /** Signed `(dx, dy)` from `self` to `other` */
    #[inline]
    pub fn delta(&self, other: Coordinate) -> (i32, i32) {
        (
            other.x as i32 - self.x as i32,
            other.y as i32 - self.y as i32,
        )
    }

    /** Neighbour at the given offset, `None` past the edge */
    pub fn offset(&self, dx: i32, dy: i32) -> Option<Coordinate> {
        Coordinate::new(self.x as i32 + dx, self.y as i32 + dy).ok()
    }

    pub fn all() -> impl Iterator<Item = Coordinate> {
        (0..BOARD_LENGTH as u8)
            .flat_map(|y| (0..BOARD_LENGTH as u8).map(move |x| Coordinate { x, y }))
    }
}

impl TryFrom<(i32, i32)> for Coordinate {
    type Error = Error;

    fn try_from((x, y): (i32, i32)) -> Result<Self, Self::Error> {
        Coordinate::new(x, y)
    }
}

impl From<Coordinate> for (i32, i32) {
    fn from(value: Coordinate) -> Self {
        (value.x as i32, value.y as i32)
    }
}

impl Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    PlayerOne,
    PlayerTwo,
}

impl Side {
    /** Side to move after `turn_count` committed moves */
    pub fn from_turn(turn_count: u32) -> Side {
        if turn_count % 2 == 0 {
            Side::PlayerOne
        } else {
            Side::PlayerTwo
        }
    }

    pub fn opposite(self) -> Side {
        match self {
            Side::PlayerOne => Side::PlayerTwo,
            Side::PlayerTwo => Side::PlayerOne,
        }
    }

    /** Row step toward the opponent's back rank.
     * PlayerOne starts on y = 7 and advances toward y = 0. */
    pub fn forward(self) -> i32 {
        match self {
            Side::PlayerOne => -1,
            Side::PlayerTwo => 1,
        }
    }

    pub fn back_rank(self) -> usize {
        match self {
            Side::PlayerOne => BOARD_LENGTH - 1,
            Side::PlayerTwo => 0,
        }
    }

    pub fn pawn_rank(self) -> usize {
        (self.back_rank() as i32 + self.forward()) as usize
    }

    #[inline]
    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

impl Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(match self {
            Side::PlayerOne => "Player One",
            Side::PlayerTwo => "Player Two",
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceKind {
    Pawn,
    Rook,
    /** Alternate rook skin, its movement rule is not settled yet */
    FlipRook,
    Knight,
    Bishop,
    Queen,
    King,
}

impl PieceKind {
    pub const ALL: [PieceKind; 7] = [
        PieceKind::Pawn,
        PieceKind::Rook,
        PieceKind::FlipRook,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Queen,
        PieceKind::King,
    ];

    /** Standard back rank, from x = 0 to x = 7 */
    pub const BACK_RANK: [PieceKind; BOARD_LENGTH] = [
        PieceKind::Rook,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Queen,
        PieceKind::King,
        PieceKind::Bishop,
        PieceKind::Knight,
        PieceKind::Rook,
    ];

    pub fn name(self) -> &'static str {
        match self {
            PieceKind::Pawn => "pawn",
            PieceKind::Rook => "rook",
            PieceKind::FlipRook => "flip-rook",
            PieceKind::Knight => "knight",
            PieceKind::Bishop => "bishop",
            PieceKind::Queen => "queen",
            PieceKind::King => "king",
        }
    }

    /** Letter used by the text board, upper case for PlayerOne */
    pub fn symbol(self, side: Side) -> char {
        let letter = match self {
            PieceKind::Pawn => 'p',
            PieceKind::Rook => 'r',
            PieceKind::FlipRook => 'f',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        };
        match side {
            Side::PlayerOne => letter.to_ascii_uppercase(),
            Side::PlayerTwo => letter,
        }
    }
}

impl Display for PieceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.name())
    }
}

/** Handle of a piece inside the board's piece arena */
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PieceId(pub(crate) usize);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Selection {
    #[default]
    Idle,
    Selected(Coordinate),
}

impl Selection {
    pub fn tile(&self) -> Option<Coordinate> {
        match self {
            Selection::Idle => None,
            Selection::Selected(coordinate) => Some(*coordinate),
        }
    }
}

/** What a committed move did */
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    pub piece: PieceId,
    pub kind: PieceKind,
    pub side: Side,
    pub from: Coordinate,
    pub to: Coordinate,
    pub captured: Option<PieceKind>,
    /** Turn count before the move */
    pub turn: u32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Figure {
    pub kind: PieceKind,
    pub side: Side,
    pub move_count: u32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cell {
    Empty,
    Figure(Figure),
}

/** Passive copy of everything the presentation layer reads */
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /** Indexed `[y][x]` */
    pub cells: Vec<Vec<Cell>>,
    pub turn_count: u32,
    pub active_side: Side,
    pub selection: Selection,
    pub captured_by_player_one: Vec<PieceKind>,
    pub captured_by_player_two: Vec<PieceKind>,
}
