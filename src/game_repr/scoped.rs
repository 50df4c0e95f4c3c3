use std::ops::{Deref, DerefMut};

use super::Position;

/// A move that stays on the board for as long as the guard lives.
///
/// Created by pushing a move (or a pass) onto a position; dropping the guard
/// pops it again, including when the code holding it returns early with `?`.
pub struct PlayedMove<'a, P: Position> {
    pos: &'a mut P,
}

impl<'a, P: Position> PlayedMove<'a, P> {
    pub fn new(pos: &'a mut P, mv: P::Move) -> Self {
        pos.push(mv);
        Self { pos }
    }

    /// Pass the turn. `None` if the position does not allow passing.
    pub fn null(pos: &'a mut P) -> Option<Self> {
        if pos.push_null() {
            Some(Self { pos })
        } else {
            None
        }
    }
}

impl<P: Position> Deref for PlayedMove<'_, P> {
    type Target = P;

    fn deref(&self) -> &P {
        self.pos
    }
}

impl<P: Position> DerefMut for PlayedMove<'_, P> {
    fn deref_mut(&mut self) -> &mut P {
        self.pos
    }
}

impl<P: Position> Drop for PlayedMove<'_, P> {
    fn drop(&mut self) {
        self.pos.pop();
    }
}
