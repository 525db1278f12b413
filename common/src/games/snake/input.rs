use super::types::Direction;

/// Buffers the player's intent between ticks and refuses 180-degree turns
/// relative to the last committed direction.
#[derive(Clone, Copy, Debug)]
pub struct InputArbiter {
    current: Direction,
    pending: Direction,
}

impl InputArbiter {
    pub fn new(initial: Direction) -> Self {
        Self {
            current: initial,
            pending: initial,
        }
    }

    pub fn current(&self) -> Direction {
        self.current
    }

    pub fn pending(&self) -> Direction {
        self.pending
    }

    /// Returns whether the intent was accepted. Rejection leaves state untouched.
    pub fn request(&mut self, intent: Direction) -> bool {
        if intent.is_opposite(&self.current) {
            return false;
        }
        self.pending = intent;
        true
    }

    pub fn commit(&mut self) -> Direction {
        self.current = self.pending;
        self.current
    }

    pub fn reset(&mut self, direction: Direction) {
        *self = Self::new(direction);
    }
}
