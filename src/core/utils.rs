use num_traits::signum;

use crate::core::definitions::{Coordinate, BOARD_LENGTH};

#[derive(Debug)]
pub struct BetweenIterator {
    current: Coordinate,
    target: Coordinate,
    step: (i32, i32),
}

impl Iterator for BetweenIterator {
    type Item = Coordinate;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let (dx, dy) = self.step;
        self.current = self.current.offset(dx, dy)?;
        if self.current == self.target {
            None
        } else {
            Some(self.current)
        }
    }
}

/** Squares strictly between `from` and `to`, both ends excluded.
 * The two squares must share a straight or diagonal line. */
pub fn between(from: Coordinate, to: Coordinate) -> BetweenIterator {
    #[cfg(debug_assertions)]
    if !is_in_diagonal_line(from, to) && !is_in_straight_line(from, to) {
        panic!("Points can't form line to search between them!")
    }
    let (dx, dy) = from.delta(to);
    BetweenIterator {
        current: from,
        target: to,
        step: (signum(dx), signum(dy)),
    }
}

/** Largest axis distance, 1 for every king step */
pub fn distance(from: Coordinate, to: Coordinate) -> u32 {
    let (dx, dy) = from.delta(to);
    dx.unsigned_abs().max(dy.unsigned_abs())
}

pub fn is_in_straight_line(a: Coordinate, b: Coordinate) -> bool {
    let (dx, dy) = a.delta(b);
    dx == 0 || dy == 0
}

pub fn is_in_diagonal_line(a: Coordinate, b: Coordinate) -> bool {
    let (dx, dy) = a.delta(b);
    dx.abs() == dy.abs()
}

#[inline]
pub fn is_valid_coord(x: i32, y: i32) -> bool {
    (0..BOARD_LENGTH as i32).contains(&x) && (0..BOARD_LENGTH as i32).contains(&y)
}
