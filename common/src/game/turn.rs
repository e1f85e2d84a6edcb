use serde::{Deserialize, Serialize};

use super::{PlayerNum, TurnNum};

/// The rotation of players still in the game
///
/// Players take turns in sequence order. Wrapping around from the last player to the first completes a round.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct TurnOrder {
    sequence: Vec<PlayerNum>,
    current: usize,
    round: TurnNum,
}

impl TurnOrder {
    pub fn new(sequence: Vec<PlayerNum>) -> Self {
        Self {
            sequence,
            current: 0,
            round: 0,
        }
    }

    pub fn current_player(&self) -> PlayerNum {
        self.sequence[self.current]
    }

    pub fn round(&self) -> TurnNum {
        self.round
    }

    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }

    pub fn players(&self) -> &[PlayerNum] {
        &self.sequence
    }

    /// Move on to the next player, returning them
    pub fn advance(&mut self) -> PlayerNum {
        self.current = (self.current + 1) % self.sequence.len();
        if self.current == 0 {
            self.round += 1;
        }
        self.current_player()
    }

    /// Take a player out of the rotation
    ///
    /// Whoever followed the removed player is next in line. The last remaining player is never removed.
    /// Returns true if the player was removed.
    pub fn remove(&mut self, player: PlayerNum) -> bool {
        if self.sequence.len() <= 1 {
            return false;
        }

        let Some(idx) = self.sequence.iter().position(|p| *p == player) else {
            return false;
        };

        self.sequence.remove(idx);

        if idx < self.current {
            self.current -= 1;
        } else if self.current >= self.sequence.len() {
            // The removed player was current and last in the sequence
            self.current = 0;
        }
        true
    }
}
